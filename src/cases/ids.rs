//! Identifier generation for grids and slots created at load time.

use uuid::Uuid;

/// Source of fresh, collision-resistant ids for generated sub-structures.
pub trait IdProvider {
    fn generate(&mut self) -> String;
}

/// Production provider: 24 lowercase hex digits, the same shape as host ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashIdProvider;

impl IdProvider for HashIdProvider {
    fn generate(&mut self) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(24);
        id
    }
}

/// Deterministic provider yielding `<prefix>0`, `<prefix>1`, ... for reproducible dumps.
#[derive(Debug, Clone)]
pub struct SequentialIdProvider {
    prefix: String,
    next: u64,
}

impl SequentialIdProvider {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: 0,
        }
    }
}

impl IdProvider for SequentialIdProvider {
    fn generate(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
