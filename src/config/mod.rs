//! Where finboard keeps its files, and how it reads money.
//!
//! Everything has a default. Environment overrides:
//!
//! - `FINBOARD_DB`: database file
//! - `FINBOARD_AMOUNT_FORMAT`: `grouped` (default) or `legacy`
//! - `FINBOARD_LOG`: log filter, read by [`crate::logging`]

use anyhow::{Context, Result};
use chrono::Datelike;
use std::path::{Path, PathBuf};

use crate::money::AmountFormat;

pub const DB_ENV: &str = "FINBOARD_DB";
pub const AMOUNT_FORMAT_ENV: &str = "FINBOARD_AMOUNT_FORMAT";

const DB_FILE: &str = "finboard.db";
const LOG_FILE: &str = "finboard.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_path: PathBuf,
    pub amount_format: AmountFormat,
    /// Year the ledger opens on.
    pub default_year: i32,
}

impl Config {
    /// Resolve the platform data directory, create it, and apply the
    /// process environment.
    pub fn load() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "finboard", "finboard")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        Self::from_lookup(data_dir, |key| std::env::var(key).ok())
    }

    /// Build a config rooted at `data_dir`, reading overrides through
    /// `lookup`.
    pub fn from_lookup(data_dir: &Path, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = match lookup(DB_ENV).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(expand_home(path.trim())),
            None => data_dir.join(DB_FILE),
        };

        let amount_format = match lookup(AMOUNT_FORMAT_ENV).filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw
                .parse::<AmountFormat>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid {AMOUNT_FORMAT_ENV}"))?,
            None => AmountFormat::default(),
        };

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            db_path,
            log_path: data_dir.join(LOG_FILE),
            amount_format,
            default_year: current_year(),
        })
    }
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Expand a leading `~/` to `$HOME`.
pub fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
