//! Runtime configuration.
//!
//! Values come from the environment (a `.env` file is loaded first by
//! [`crate::run`]); command-line flags override them.

use std::path::PathBuf;
use vocab_core::matching::CLOSE_THRESHOLD;

pub const DB_PATH_VAR: &str = "VOCAB_DB_PATH";
pub const CLOSE_THRESHOLD_VAR: &str = "VOCAB_CLOSE_THRESHOLD";
pub const SEED_VAR: &str = "VOCAB_SEED";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    /// Similarity at which a typed answer is reported as close.
    pub close_threshold: f64,
    /// Add the demo cards when a new database is created.
    pub seed_demo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            close_threshold: CLOSE_THRESHOLD,
            seed_demo: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(DB_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(CLOSE_THRESHOLD_VAR) {
            match raw.trim().parse::<f64>() {
                Ok(value) if (0.0..=1.0).contains(&value) => config.close_threshold = value,
                _ => tracing::warn!(
                    value = %raw,
                    "{} must be a number between 0 and 1, using {}",
                    CLOSE_THRESHOLD_VAR,
                    CLOSE_THRESHOLD
                ),
            }
        }

        if let Some(raw) = lookup(SEED_VAR) {
            config.seed_demo = !matches!(
                raw.trim().to_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }

        config
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vocab-srs")
        .join("cards.db")
}
