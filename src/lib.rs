//! # Gilded Key Storage - key cases for the game server
//!
//! Gilded key storage adds a family of key and keycard cases to a game server's
//! item database. Everything is driven by one declarative config: the geometry
//! and filters of each case, who sells it and for what, and where it may be
//! stored. The same config carries a few global key tweaks.
//!
//! ## Features
//!
//! - **Case synthesis**: containers with per-column grids, or slot cases with one mount per key.
//! - **Filter resolution**: per-column overrides, plus repair of filters stripped by other mods.
//! - **Trader wiring**: assort row, barter scheme and loyalty level, registered as one upsert.
//! - **Admission rules**: allow or forbid cases in backpacks, secure containers and named items.
//! - **Key patches**: weightless, unlimited-use and discardable keys; the labs card raid limit.
//! - **Diagnostics**: missing-key report and dev-only profile seeding through static routes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gildedkeys::cases::{GildedKeyStorage, HashIdProvider};
//! use gildedkeys::config::ModConfig;
//! use gildedkeys::tables::DatabaseTables;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ModConfig::load("config.toml")?;
//!     let mut tables = DatabaseTables::load("tables.json")?;
//!
//!     let storage = GildedKeyStorage::new(config);
//!     let summary = storage.post_db_load(&mut tables, &mut HashIdProvider);
//!     println!("created {} cases", summary.cases_created.len());
//!
//!     tables.save("tables.out.json")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`cases`] - case synthesis, trader wiring, key patches and diagnostics
//! - [`config`] - configuration loading and validation
//! - [`tables`] - serde models of the host database and player profiles
//! - [`hooks`] - static route interception and session profile access
//! - [`errors`] - the crate error type
//! - [`logutil`] - logger set-up and single-line escaping

pub mod cases;
pub mod config;
pub mod errors;
pub mod hooks;
pub mod logutil;
pub mod tables;

/// Prefix used on every user-facing log line.
pub const MOD_NAME: &str = "Gilded Key Storage";
