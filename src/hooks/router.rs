//! Static route interception.
//!
//! Handlers are registered against a fixed url ahead of time and run when the
//! host dispatches that url. Each handler receives the request context and the
//! output produced so far, and returns the output to pass on; the debug
//! handlers always pass it through unchanged.

use log::debug;

use super::profiles::ProfileStore;

/// Immutable per-request data handed to every handler.
#[derive(Debug, Clone, Copy)]
pub struct RouteContext<'a> {
    pub url: &'a str,
    pub session_id: &'a str,
}

pub type RouteAction = Box<dyn Fn(&RouteContext<'_>, &mut dyn ProfileStore, String) -> String>;

pub struct Route {
    pub name: String,
    pub url: String,
    action: RouteAction,
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct StaticRouter {
    routes: Vec<Route>,
}

impl StaticRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, url: &str, action: RouteAction) {
        debug!("registered route {} on {}", name, url);
        self.routes.push(Route {
            name: name.to_string(),
            url: url.to_string(),
            action,
        });
    }

    /// Run every handler registered on `url`, in registration order, threading
    /// the output through them.
    pub fn handle(
        &self,
        url: &str,
        session_id: &str,
        profiles: &mut dyn ProfileStore,
        output: String,
    ) -> String {
        let ctx = RouteContext { url, session_id };
        self.routes
            .iter()
            .filter(|route| route.url == url)
            .fold(output, |output, route| (route.action)(&ctx, profiles, output))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn find(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::profiles::InMemoryProfiles;

    #[test]
    fn only_matching_routes_run_in_order() {
        let mut router = StaticRouter::new();
        router.register("a", "/x", Box::new(|_, _, out| format!("{out}a")));
        router.register("b", "/y", Box::new(|_, _, out| format!("{out}b")));
        router.register("c", "/x", Box::new(|ctx, _, out| format!("{out}c:{}", ctx.session_id)));

        let mut profiles = InMemoryProfiles::new();
        assert_eq!(router.handle("/x", "s1", &mut profiles, String::new()), "ac:s1");
        assert_eq!(router.handle("/z", "s1", &mut profiles, "out".to_string()), "out");
        assert_eq!(router.routes().len(), 3);
        assert_eq!(router.find("b").map(|r| r.url.as_str()), Some("/y"));
    }
}
