//! Case synthesis and everything that runs at database-load time.
//!
//! Leaf to root:
//!
//! - [`ids`] - fresh ids for generated grids and slots
//! - [`filters`] - per-column filter resolution and the stripped-filter repair
//! - [`layout`] - grid and slot generation
//! - [`trade`] - trader assort, barter scheme and loyalty registration
//! - [`admission`] - where a case may be stored
//! - [`factory`] - one complete case
//! - [`keys`] - global key patches and the raid limit
//! - [`debug`] - missing-key report and profile seeding
//! - [`loader`] - the [`GildedKeyStorage`] entry points tying it together

pub mod admission;
pub mod debug;
pub mod factory;
pub mod filters;
pub mod ids;
pub mod keys;
pub mod layout;
pub mod loader;
pub mod trade;

pub use debug::{dedupe, known_item_ids, MissingKey, DEBUG_ID_MARKER};
pub use factory::create_case;
pub use ids::{HashIdProvider, IdProvider, SequentialIdProvider};
pub use loader::{GildedKeyStorage, LoadSummary, CLEANUP_ROUTE, SEED_ROUTE};
