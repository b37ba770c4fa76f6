//! Configuration management for forge-planner

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::history::DEFAULT_CAPACITY;
use crate::table::DEFAULT_BUCKETS;

pub const DEFAULT_DATABASE: &str = "forge_session.db";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: Option<PathBuf>,
    pub history_capacity: usize,
    pub initial_buckets: usize,
    pub log_level: String,
    pub recipe_dirs: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            history_capacity: DEFAULT_CAPACITY,
            initial_buckets: DEFAULT_BUCKETS,
            log_level: "info".to_string(),
            recipe_dirs: Vec::new(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("forge-planner");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from `path`, or defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Store `level` after checking it names a tracing level
    pub fn set_log_level(&mut self, level: &str) -> Result<()> {
        let parsed = parse_log_level(level)?;
        self.log_level = parsed.to_string().to_ascii_lowercase();
        Ok(())
    }

    /// Database path, with a command-line override taking precedence
    pub fn database_path(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.database.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }
}

/// Parse `off`, `error`, `warn`, `info`, `debug` or `trace` (any case)
pub fn parse_log_level(level: &str) -> Result<LevelFilter> {
    level.trim().parse::<LevelFilter>().map_err(|_| {
        anyhow!(
            "invalid log level '{}': expected one of off, error, warn, info, debug, trace",
            level
        )
    })
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.database {
            Some(db) => writeln!(f, "database:         {}", db.display())?,
            None => writeln!(f, "database:         {} (default)", DEFAULT_DATABASE)?,
        }
        writeln!(f, "history_capacity: {}", self.history_capacity)?;
        writeln!(f, "initial_buckets:  {}", self.initial_buckets)?;
        writeln!(f, "log_level:        {}", self.log_level)?;
        write!(f, "recipe_dirs:      ")?;
        if self.recipe_dirs.is_empty() {
            writeln!(f, "(none)")
        } else {
            let dirs: Vec<String> = self.recipe_dirs.iter().map(|d| d.display().to_string()).collect();
            writeln!(f, "{}", dirs.join(", "))
        }
    }
}
