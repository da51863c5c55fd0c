//! Session-to-profile access for route handlers.

use std::collections::HashMap;

use crate::tables::Profile;

/// Mutable profile lookup by session id.
pub trait ProfileStore {
    fn profile_mut(&mut self, session_id: &str) -> Option<&mut Profile>;
}

/// Profiles held in memory, keyed by session id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfiles {
    profiles: HashMap<String, Profile>,
}

impl InMemoryProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, session_id: &str, profile: Profile) {
        self.profiles.insert(session_id.to_string(), profile);
    }

    pub fn get(&self, session_id: &str) -> Option<&Profile> {
        self.profiles.get(session_id)
    }

    /// Remove and return a session's profile, e.g. to write it back to disk.
    pub fn take(&mut self, session_id: &str) -> Option<Profile> {
        self.profiles.remove(session_id)
    }
}

impl ProfileStore for InMemoryProfiles {
    fn profile_mut(&mut self, session_id: &str) -> Option<&mut Profile> {
        self.profiles.get_mut(session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_by_session() {
        let mut store = InMemoryProfiles::new();
        store.insert("s1", Profile::with_stash("stash"));
        assert!(store.profile_mut("s1").is_some());
        assert!(store.profile_mut("s2").is_none());
        assert!(store.take("s1").is_some());
        assert!(store.get("s1").is_none());
    }
}
