//! Forge Planner
//!
//! Weapon crafting planner: browse recipes and upgrade trees, track the
//! material inventory, and craft a queue of weapons.

mod config;
mod dataset;
mod db;
mod history;
mod import;
mod ledger;
mod models;
mod planner;
mod queue;
mod resolver;
mod store;
mod table;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::Config;
use crate::history::CraftHistory;
use crate::ledger::Ledger;
use crate::models::join_requirements;
use crate::planner::Workshop;
use crate::queue::CraftQueue;
use crate::store::RecipeStore;

#[derive(Parser)]
#[command(name = "forge-planner")]
#[command(about = "Weapon crafting planner: recipes, upgrades, inventory and craft queue")]
struct Cli {
    /// Path to the SQLite session database (overrides the config file)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra recipe file or directory to load for this run
    #[arg(short, long)]
    recipes: Vec<PathBuf>,

    /// Leave a recipe out of the store for this run
    #[arg(long)]
    exclude: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or edit the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    #[command(flatten)]
    Session(SessionCommand),
}

/// Commands that work on the recipe store and the saved session
#[derive(Subcommand)]
enum SessionCommand {
    /// List all recipes, sorted by name
    Recipes {
        /// Only show weapons whose name contains this text (any case)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show the materials and upgrade of a weapon
    Show {
        item: String,
    },

    /// Show the upgrade chain starting at a weapon
    Tree {
        item: String,
    },

    /// List materials on hand
    Inventory,

    /// Add materials to the inventory
    Add {
        material: String,
        quantity: u32,
    },

    /// Remove materials from the inventory
    Remove {
        material: String,
        quantity: u32,
    },

    /// Show which weapons can be crafted with the current inventory
    Craftable {
        /// Only weapons needing a material containing this text (case-sensitive)
        #[arg(short, long)]
        material: Option<String>,

        /// Hide weapons that cannot be crafted yet
        #[arg(long)]
        only_craftable: bool,
    },

    /// Manage the crafting queue
    Queue {
        #[command(subcommand)]
        action: QueueAction,
    },

    /// Craft every weapon in the queue
    Craft,

    /// Show or edit the crafting history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Load recipes from a file or directory and report what was found
    Import {
        path: PathBuf,
    },

    /// Clear the inventory, queue and history
    Reset,
}

#[derive(Subcommand)]
enum QueueAction {
    List,
    Add { item: String },
    /// Remove the first queued copy of a weapon
    Remove { item: String },
    /// Remove the last queued weapon
    PopLast,
    Clear,
}

#[derive(Subcommand)]
enum HistoryAction {
    List,
    /// Forget the most recent craft
    Undo,
    Last,
    Clear,
}

#[derive(Subcommand)]
enum ConfigAction {
    Show,
    SetHistoryCapacity { capacity: usize },
    SetLogLevel { level: String },
    AddRecipeDir { dir: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };
    let config = Config::load_from(&config_path)?;

    let (level, bad_level) = match config::parse_log_level(&config.log_level) {
        Ok(level) => (level, None),
        Err(e) => (LevelFilter::INFO, Some(e)),
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(format!("forge_planner={}", level).parse()?))
        .init();

    if let Some(e) = bad_level {
        warn!(path = %config_path.display(), "{:#}, falling back to info", e);
    }
    debug!(path = %config_path.display(), "config loaded");

    match cli.command {
        Commands::Config { action } => run_config(config, &config_path, action),
        Commands::Session(command) => {
            let store = build_store(&config, &cli.recipes, &cli.exclude)?;
            let db_path = config.database_path(cli.database.as_deref());
            run_session(&config, &store, &db_path, command)
        }
    }
}

fn run_session(config: &Config, store: &RecipeStore, db_path: &Path, command: SessionCommand) -> Result<()> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    db::init_schema(&conn)?;

    let mut shop = load_workshop(&conn, store, config.history_capacity)?;

    match command {
        SessionCommand::Recipes { search } => {
            let rows: Vec<(String, Vec<String>)> = match search.as_deref() {
                Some(term) => store
                    .search(term)
                    .into_iter()
                    .map(|recipe| {
                        let tokens = recipe.requirement_strings();
                        (recipe.item, tokens)
                    })
                    .collect(),
                None => store.list_all_strings(),
            };
            if rows.is_empty() {
                println!("No matching recipes.");
            } else {
                println!("{:<30} Materials", "Weapon");
                println!("{}", "-".repeat(80));
                for (item, tokens) in rows {
                    println!("{:<30} {}", item, tokens.join(", "));
                }
            }
        }

        SessionCommand::Show { item } => match store.get(&item) {
            Some(requirements) => {
                println!("Weapon: {}", item);
                println!("Materials: {}", join_requirements(requirements));
                if let Some(upgrade) = store.get_upgrade(&item) {
                    println!("Upgrades to: {}", upgrade);
                }
                let bases = store.upgraded_from(&item);
                if !bases.is_empty() {
                    println!("Upgraded from: {}", bases.join(", "));
                }
            }
            None => println!("Weapon '{}' not found", item),
        },

        SessionCommand::Tree { item } => {
            if !store.contains(&item) {
                println!("Weapon '{}' not found", item);
            } else {
                println!("{}", item);
                for (depth, next) in store.upgrade_chain(&item).iter().enumerate() {
                    let marker = if store.contains(next) { "" } else { " (no recipe)" };
                    println!("{}-> {}{}", "  ".repeat(depth + 1), next, marker);
                }
            }
        }

        SessionCommand::Inventory => {
            if shop.ledger().is_empty() {
                println!("Inventory is empty. Use 'add' to record materials.");
            } else {
                println!("{:<35} {:>8}", "Material", "Quantity");
                println!("{}", "-".repeat(44));
                for (material, quantity) in shop.ledger().snapshot() {
                    println!("{:<35} {:>8}", material, quantity);
                }
                println!("{} materials", shop.ledger().len());
            }
        }

        SessionCommand::Add { material, quantity } => match shop.ledger_mut().add(&material, quantity) {
            Ok(total) => {
                db::save_inventory(&conn, &shop.ledger().snapshot())?;
                println!("{} now: {}", material, total);
            }
            Err(e) => println!("{}", e),
        },

        SessionCommand::Remove { material, quantity } => match shop.ledger_mut().remove(&material, quantity) {
            Ok(left) => {
                db::save_inventory(&conn, &shop.ledger().snapshot())?;
                println!("{} now: {}", material, left);
            }
            Err(e) => println!("{}", e),
        },

        SessionCommand::Craftable {
            material,
            only_craftable,
        } => {
            let rows = resolver::resolve_all(store, shop.ledger(), material.as_deref());
            println!("{:<30} {:<9} Materials", "Weapon", "Craftable");
            println!("{}", "-".repeat(80));
            for row in rows.iter().filter(|row| !only_craftable || row.resolution.craftable) {
                println!("{}", row);
            }
        }

        SessionCommand::Queue { action } => {
            run_queue(&mut shop, action);
            db::save_queue(&conn, shop.queue().iter())?;
        }

        SessionCommand::Craft => {
            if shop.queue().is_empty() {
                println!("Crafting queue is empty");
            } else {
                let outcomes = shop.drain_queue();
                debug!(state = ?shop.state(), outcomes = outcomes.len(), "queue drained");
                let crafted_at = db::now_unix();
                for outcome in &outcomes {
                    println!("{}", outcome);
                    if outcome.is_crafted() {
                        db::append_history(&conn, outcome.item(), crafted_at)?;
                    }
                }
                db::prune_history(&conn, config.history_capacity)?;
                db::save_inventory(&conn, &shop.ledger().snapshot())?;
                db::save_queue(&conn, shop.queue().iter())?;

                let crafted = outcomes.iter().filter(|o| o.is_crafted()).count();
                println!("\nCrafted {} of {} queued weapons", crafted, outcomes.len());
            }
        }

        SessionCommand::History { action } => match action {
            HistoryAction::List => {
                if shop.history().is_empty() {
                    println!("No crafts recorded.");
                } else {
                    println!(
                        "{} crafts, newest first (keeping the last {}):",
                        shop.history().len(),
                        shop.history().capacity()
                    );
                }
                for (i, item) in shop.history().iter().rev().enumerate() {
                    println!("{:>3}. {}", i + 1, item);
                }
            }
            HistoryAction::Undo => {
                let removed = shop.history_mut().undo_last();
                db::remove_latest_history(&conn)?;
                match removed {
                    Some(item) => println!("Removed {} from history", item),
                    None => println!("History is empty"),
                }
            }
            HistoryAction::Last => match shop.history().peek_last() {
                Some(item) => println!("{}", item),
                None => println!("History is empty"),
            },
            HistoryAction::Clear => {
                db::save_history(&conn, &[])?;
                println!("History cleared");
            }
        },

        SessionCommand::Import { path } => {
            let mut scratch = RecipeStore::with_buckets(config.initial_buckets);
            let stats = import::import_path(&mut scratch, &path)?;
            println!("{}", stats);
            if scratch.is_empty() {
                println!("No recipes found in {}", path.display());
            }
            for recipe in scratch.list_sorted() {
                let marker = if store.contains(&recipe.item) { " (replaces built-in)" } else { "" };
                println!("  {}: {}{}", recipe.item, recipe.requirement_strings().join(", "), marker);
            }
        }

        SessionCommand::Reset => {
            db::clear_session(&conn)?;
            println!("Session cleared: {}", db_path.display());
        }
    }

    Ok(())
}

/// Built-in dataset plus recipe directories from the config and command line,
/// minus any excluded items
fn build_store(config: &Config, extra: &[PathBuf], exclude: &[String]) -> Result<RecipeStore> {
    let mut store = dataset::load_default_store(config.initial_buckets);
    for path in config.recipe_dirs.iter().chain(extra) {
        if !path.exists() {
            warn!(path = %path.display(), "recipe path does not exist, skipping");
            continue;
        }
        import::import_path(&mut store, path)?;
    }
    for item in exclude {
        if !store.remove(item) {
            warn!(%item, "excluded recipe is not in the store");
        }
    }
    info!(
        recipes = store.len(),
        buckets = store.bucket_count(),
        load = store.load_factor(),
        "recipe store ready"
    );
    Ok(store)
}

fn load_workshop<'a>(conn: &Connection, store: &'a RecipeStore, capacity: usize) -> Result<Workshop<'a>> {
    let ledger = Ledger::from_rows(db::load_inventory(conn)?);
    let queue: CraftQueue = db::load_queue(conn)?.into_iter().collect();

    let mut history = CraftHistory::with_capacity(capacity);
    for row in db::load_history(conn, capacity)?.into_iter().rev() {
        history.record(row.item);
    }

    Ok(Workshop::new(store, ledger, queue, history))
}

fn run_queue(shop: &mut Workshop<'_>, action: QueueAction) {
    match action {
        QueueAction::List => {
            match shop.queue().peek_front() {
                Some(next) => println!("Next up: {}", next),
                None => println!("Crafting queue is empty"),
            }
            for (i, item) in shop.queue().iter().enumerate() {
                println!("{:>3}. {}", i + 1, item);
            }
        }
        QueueAction::Add { item } => {
            if shop.store().contains(&item) {
                shop.queue_mut().enqueue(item.as_str());
                println!("{} added to crafting queue", item);
            } else {
                println!("Weapon '{}' not found", item);
            }
        }
        QueueAction::Remove { item } => {
            if shop.queue_mut().remove_first_occurrence(&item) {
                println!("{} removed from crafting queue", item);
            } else {
                println!("{} is not in the crafting queue", item);
            }
        }
        QueueAction::PopLast => match shop.queue_mut().pop_back() {
            Some(item) => println!("{} removed from the end of crafting queue", item),
            None => println!("Crafting queue is empty"),
        },
        QueueAction::Clear => {
            shop.queue_mut().clear();
            println!("Crafting queue cleared");
        }
    }
}

fn run_config(mut config: Config, path: &Path, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("Config file: {}", path.display());
            print!("{}", config);
            return Ok(());
        }
        ConfigAction::SetHistoryCapacity { capacity } => config.history_capacity = capacity,
        ConfigAction::SetLogLevel { level } => config.set_log_level(&level)?,
        ConfigAction::AddRecipeDir { dir } => {
            if !config.recipe_dirs.contains(&dir) {
                config.recipe_dirs.push(dir);
            }
        }
    }
    config.save_to(path)?;
    println!("Saved {}", path.display());
    Ok(())
}
