//! Host lifecycle seams: static route interception and profile access.

pub mod profiles;
pub mod router;

pub use profiles::{InMemoryProfiles, ProfileStore};
pub use router::{Route, RouteAction, RouteContext, StaticRouter};

/// Dispatched by the host when a game session starts.
pub const GAME_START_URL: &str = "/client/game/start";
/// Dispatched by the host when a player logs out.
pub const GAME_LOGOUT_URL: &str = "/client/game/logout";
