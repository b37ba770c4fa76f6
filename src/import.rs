//! Recipe text import
//!
//! Recipe files hold one declaration per line:
//!
//! ```text
//! # comment
//! Iron Sword: 1 Iron Ore, 2 Machalite Ore
//! Iron Sword -> Iron Sword II
//! ```
//!
//! The same `"<qty> <material>"` token parser is used wherever requirement
//! strings cross back into the core.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::models::Requirement;
use crate::store::RecipeStore;

pub const RECIPE_EXTENSION: &str = "recipes";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("invalid requirement token {0:?}, expected \"<qty> <material>\"")]
    InvalidToken(String),

    #[error("requirement quantity must be positive in {0:?}")]
    ZeroQuantity(String),

    #[error("line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },
}

/// A parsed, non-empty line of a recipe file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Recipe {
        item: String,
        requirements: Vec<Requirement>,
    },
    Upgrade {
        base: String,
        upgraded: String,
    },
}

pub struct RecipeParser {
    token_re: Regex,
    upgrade_re: Regex,
    recipe_re: Regex,
}

impl RecipeParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // 5 Iron Ore
            token_re: Regex::new(r"^\s*(\d+)\s+(\S.*?)\s*$")?,
            // Kula Duda I -> Kula Duda II
            upgrade_re: Regex::new(r"^\s*(\S.*?)\s*->\s*(\S.*?)\s*$")?,
            // Kula Duda I: 1 Kulu-Ya-Ku Beak, 2 Kulu-Ya-Ku Hide
            recipe_re: Regex::new(r"^\s*([^:]*\S)\s*:\s*(.*)$")?,
        })
    }

    pub fn parse_requirement(&self, token: &str) -> Result<Requirement, ImportError> {
        let cap = self
            .token_re
            .captures(token)
            .ok_or_else(|| ImportError::InvalidToken(token.to_string()))?;
        let quantity: u32 = cap[1]
            .parse()
            .map_err(|_| ImportError::InvalidToken(token.to_string()))?;
        if quantity == 0 {
            return Err(ImportError::ZeroQuantity(token.to_string()));
        }
        Ok(Requirement::new(quantity, &cap[2]))
    }

    /// Parse a comma separated requirement list; an empty list is allowed
    pub fn parse_requirements(&self, list: &str) -> Result<Vec<Requirement>, ImportError> {
        if list.trim().is_empty() {
            return Ok(Vec::new());
        }
        list.split(',').map(|token| self.parse_requirement(token)).collect()
    }

    /// Parse one line; blank lines and comments give `Ok(None)`
    pub fn parse_line(&self, line_no: usize, line: &str) -> Result<Option<Declaration>, ImportError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        if let Some(cap) = self.upgrade_re.captures(line) {
            return Ok(Some(Declaration::Upgrade {
                base: cap[1].to_string(),
                upgraded: cap[2].to_string(),
            }));
        }

        if let Some(cap) = self.recipe_re.captures(line) {
            let requirements = self
                .parse_requirements(&cap[2])
                .map_err(|e| ImportError::InvalidLine {
                    line: line_no,
                    reason: e.to_string(),
                })?;
            return Ok(Some(Declaration::Recipe {
                item: cap[1].to_string(),
                requirements,
            }));
        }

        Err(ImportError::InvalidLine {
            line: line_no,
            reason: "expected \"<item>: <requirements>\" or \"<item> -> <item>\"".to_string(),
        })
    }
}

/// Counters for an import run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub files: usize,
    pub recipes: usize,
    pub upgrades: usize,
    pub errors: usize,
}

impl std::ops::AddAssign for ImportStats {
    fn add_assign(&mut self, other: Self) {
        self.files += other.files;
        self.recipes += other.recipes;
        self.upgrades += other.upgrades;
        self.errors += other.errors;
    }
}

impl std::fmt::Display for ImportStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Imported {} recipes and {} upgrade paths from {} files. Errors: {}",
            self.recipes, self.upgrades, self.files, self.errors
        )
    }
}

/// Apply every declaration in `text`; bad lines are logged and counted
pub fn import_str(parser: &RecipeParser, store: &mut RecipeStore, text: &str, origin: &str) -> ImportStats {
    let mut stats = ImportStats::default();

    for (idx, line) in text.lines().enumerate() {
        match parser.parse_line(idx + 1, line) {
            Ok(Some(Declaration::Recipe { item, requirements })) => {
                store.insert(item, requirements);
                stats.recipes += 1;
            }
            Ok(Some(Declaration::Upgrade { base, upgraded })) => {
                store.add_upgrade(base, upgraded);
                stats.upgrades += 1;
            }
            Ok(None) => {}
            Err(e) => {
                warn!("{}: {}", origin, e);
                stats.errors += 1;
            }
        }
    }

    stats
}

pub fn import_file(parser: &RecipeParser, store: &mut RecipeStore, path: &Path) -> Result<ImportStats> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut stats = import_str(parser, store, &content, &path.display().to_string());
    stats.files = 1;
    debug!(path = %path.display(), recipes = stats.recipes, upgrades = stats.upgrades, "imported recipe file");
    Ok(stats)
}

/// Find all `*.recipes` files under `dir`, sorted so imports are repeatable
pub fn find_recipe_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == RECIPE_EXTENSION))
        .collect();
    files.sort();
    files
}

/// Import a single file, or every recipe file below a directory
pub fn import_path(store: &mut RecipeStore, path: &Path) -> Result<ImportStats> {
    let parser = RecipeParser::new()?;

    if !path.is_dir() {
        return import_file(&parser, store, path);
    }

    let mut stats = ImportStats::default();
    for file in find_recipe_files(path) {
        stats += import_file(&parser, store, &file)?;
    }
    info!(path = %path.display(), "{}", stats);
    Ok(stats)
}
