//! Binary entrypoint for the gildedkeys CLI.
//!
//! Commands:
//! - `init` - write a starter `config.toml`
//! - `apply --tables <in.json> [--out <out.json>] [--id-prefix <p>]` - run the database-load pass over a table dump
//! - `missing-keys --tables <in.json>` - print keys and keycards no case has a slot for
//! - `seed-profile --profile <p.json>` - add every known key and case to a profile's stash
//! - `clean-profile --profile <p.json>` - remove the seeded debug items again
//!
//! See the library crate docs for module-level details: `gildedkeys::`.
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use gildedkeys::cases::debug::find_missing_keys;
use gildedkeys::cases::{GildedKeyStorage, HashIdProvider, IdProvider, SequentialIdProvider};
use gildedkeys::config::{DebugConfig, ModConfig};
use gildedkeys::hooks::{InMemoryProfiles, StaticRouter, GAME_LOGOUT_URL, GAME_START_URL};
use gildedkeys::logutil::{escape_log, init_logging};
use gildedkeys::tables::{DatabaseTables, Profile};

const CLI_SESSION: &str = "cli";

#[derive(Parser)]
#[command(name = "gildedkeys")]
#[command(about = "Gilded key and keycard cases for the game server item database")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Create every configured case in a database table dump
    Apply {
        /// Table dump to read
        #[arg(short, long)]
        tables: PathBuf,
        /// Where to write the patched tables (defaults to overwriting the input)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Generate `<prefix>0`, `<prefix>1`, ... instead of random ids
        #[arg(long)]
        id_prefix: Option<String>,
    },
    /// List keys and keycards that no case has a slot for
    MissingKeys {
        #[arg(short, long)]
        tables: PathBuf,
    },
    /// Add every configured key and case to a profile's stash
    SeedProfile {
        #[arg(short, long)]
        profile: PathBuf,
    },
    /// Remove seeded debug items from a profile
    CleanProfile {
        #[arg(short, long)]
        profile: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => {
            init_logging(None, cli.verbose);
            write_default_config(&cli.config, force)
        }
        command => {
            let config = load_config(&cli.config)?;
            init_logging(Some(&config.logging), cli.verbose);
            if !Path::new(&cli.config).exists() {
                warn!("{} not found, using the default configuration", cli.config);
            }
            run(command, config)
        }
    }
}

fn write_default_config(path: &str, force: bool) -> Result<()> {
    if Path::new(path).exists() && !force {
        return Err(anyhow!("{} already exists (use --force to overwrite)", path));
    }
    ModConfig::create_default(path)?;
    info!("Configuration file created at {}", path);
    Ok(())
}

fn run(command: Commands, config: ModConfig) -> Result<()> {
    match command {
        Commands::Init { .. } => {}
        Commands::Apply {
            tables,
            out,
            id_prefix,
        } => {
            let mut db = DatabaseTables::load(&tables)
                .map_err(|e| anyhow!("Failed to load tables {}: {}", tables.display(), e))?;
            let mut ids: Box<dyn IdProvider> = match id_prefix {
                Some(prefix) => Box::new(SequentialIdProvider::new(&prefix)),
                None => Box::new(HashIdProvider),
            };

            let storage = GildedKeyStorage::new(config);
            let summary = storage.post_db_load(&mut db, ids.as_mut());

            let out = out.unwrap_or(tables);
            db.save(&out)
                .map_err(|e| anyhow!("Failed to write tables {}: {}", out.display(), e))?;
            info!(
                "Created {} cases ({} failed), {} extra barters, patched {} keys; wrote {}",
                summary.cases_created.len(),
                summary.cases_failed.len(),
                summary.barters_registered,
                summary.keys_patched,
                out.display()
            );
        }
        Commands::MissingKeys { tables } => {
            let db = DatabaseTables::load(&tables)
                .map_err(|e| anyhow!("Failed to load tables {}: {}", tables.display(), e))?;
            let missing = find_missing_keys(&db, &config);
            for key in &missing {
                println!(
                    "{}\t{}",
                    key.id,
                    escape_log(key.name.as_deref().unwrap_or("<unnamed>"))
                );
            }
            info!("{} keys missing from config", missing.len());
        }
        Commands::SeedProfile { profile } => {
            dispatch_debug_route(config, &profile, GAME_START_URL)?;
        }
        Commands::CleanProfile { profile } => {
            dispatch_debug_route(config, &profile, GAME_LOGOUT_URL)?;
        }
    }

    Ok(())
}

/// Load the config, falling back to defaults when the file does not exist.
fn load_config(path: &str) -> Result<ModConfig> {
    if Path::new(path).exists() {
        ModConfig::load(path)
    } else {
        Ok(ModConfig::default())
    }
}

/// Run the debug routes registered on `url` against a profile file, with seeding
/// enabled and cleanup on logout regardless of the configured debug flags.
fn dispatch_debug_route(mut config: ModConfig, path: &Path, url: &str) -> Result<()> {
    let profile = Profile::load(path)
        .map_err(|e| anyhow!("Failed to load profile {}: {}", path.display(), e))?;
    config.debug = DebugConfig {
        give_profile_all_keys: true,
        force_remove_debug_items_on_start: false,
        ..config.debug
    };

    let mut router = StaticRouter::new();
    GildedKeyStorage::new(config).pre_load(&mut router);

    let mut profiles = InMemoryProfiles::new();
    profiles.insert(CLI_SESSION, profile);
    router.handle(url, CLI_SESSION, &mut profiles, String::new());

    let profile = profiles
        .take(CLI_SESSION)
        .ok_or_else(|| anyhow!("profile for session {} disappeared", CLI_SESSION))?;
    let count = profile.inventory().map_or(0, |inv| inv.items.len());
    profile
        .save(path)
        .map_err(|e| anyhow!("Failed to write profile {}: {}", path.display(), e))?;
    info!("Dispatched {} for {}; inventory now has {} items", url, path.display(), count);
    Ok(())
}
