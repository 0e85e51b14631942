use crate::{
    error::{HallError, HallResult},
    types::ROW_LETTERS,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Widest row a hall may have. Keeps seat codes at three characters.
pub const MAX_COLS: u32 = 99;

/// Fixed startup configuration for one hall.
///
/// Any field missing from a config file falls back to [`HallConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HallConfig {
    pub rows:          usize,
    pub cols:          u32,
    /// First row index priced as VIP. Rows before it are standard.
    pub vip_row_start: usize,
    pub price_std:     f64,
    pub price_vip:     f64,
    pub db_file:       PathBuf,
    pub ticket_dir:    PathBuf,
    pub audit_log:     PathBuf,
}

impl Default for HallConfig {
    fn default() -> Self {
        Self {
            rows:          5,
            cols:          8,
            vip_row_start: 3,
            price_std:     12.00,
            price_vip:     20.00,
            db_file:       PathBuf::from("cinema_data.json"),
            ticket_dir:    PathBuf::from("tickets"),
            audit_log:     PathBuf::from("system_audit.log"),
        }
    }
}

impl HallConfig {
    /// Load from a JSON config file.
    /// In tests, use HallConfig::in_dir().
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: HallConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Build the startup configuration from command-line arguments.
    ///
    /// Precedence: defaults, then `--config <file>`, then `--data-dir <dir>`,
    /// then the individual `--db`, `--tickets` and `--log` paths.
    pub fn from_args(args: &[String]) -> anyhow::Result<Self> {
        let mut config = match flag_path(args, "--config") {
            Some(path) => Self::load(&path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => Self::default(),
        };

        if let Some(dir) = flag_path(args, "--data-dir") {
            config = config.rooted_at(&dir);
        }
        if let Some(db) = flag_path(args, "--db") {
            config.db_file = db;
        }
        if let Some(dir) = flag_path(args, "--tickets") {
            config.ticket_dir = dir;
        }
        if let Some(audit) = flag_path(args, "--log") {
            config.audit_log = audit;
        }

        config.validate()?;
        Ok(config)
    }

    /// Default layout with every file rooted under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::default().rooted_at(dir)
    }

    /// Move the backing store, ticket directory and audit log under `dir`.
    pub fn rooted_at(mut self, dir: &Path) -> Self {
        self.db_file = dir.join("cinema_data.json");
        self.ticket_dir = dir.join("tickets");
        self.audit_log = dir.join("system_audit.log");
        self
    }

    pub fn validate(&self) -> HallResult<()> {
        if self.rows == 0 {
            return Err(HallError::InvalidConfig("rows must be at least 1".into()));
        }
        if self.rows > ROW_LETTERS.len() {
            return Err(HallError::InvalidConfig(format!(
                "rows must be at most {} (one letter per row), got {}",
                ROW_LETTERS.len(),
                self.rows
            )));
        }
        if self.cols == 0 || self.cols > MAX_COLS {
            return Err(HallError::InvalidConfig(format!(
                "cols must be between 1 and {MAX_COLS}, got {}",
                self.cols
            )));
        }
        for (name, price) in [("price_std", self.price_std), ("price_vip", self.price_vip)] {
            if !price.is_finite() || price < 0.0 {
                return Err(HallError::InvalidConfig(format!(
                    "{name} must be a non-negative amount, got {price}"
                )));
            }
        }
        Ok(())
    }

    pub fn seat_count(&self) -> usize {
        self.rows * self.cols as usize
    }
}

fn flag_path(args: &[String], flag: &str) -> Option<PathBuf> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| PathBuf::from(&w[1]))
}
