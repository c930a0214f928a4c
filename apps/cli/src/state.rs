//! Application state shared by commands.

use crate::clock::{Clock, SystemClock};
use crate::commands::cards::seed_if_empty;
use crate::config::Config;
use crate::db::{CardRepository, DbError, SqliteRepository};

/// Storage, clock and configuration for one process.
pub struct AppState {
    pub repository: Box<dyn CardRepository>,
    pub clock: Box<dyn Clock>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        repository: impl CardRepository + 'static,
        clock: impl Clock + 'static,
        config: Config,
    ) -> Self {
        Self {
            repository: Box::new(repository),
            clock: Box::new(clock),
            config,
        }
    }

    /// Open the configured database, creating it (and seeding the demo cards
    /// when enabled) on first use.
    pub fn open(config: Config) -> Result<Self, DbError> {
        let db_path = config.db_path.clone();
        let first_run = !db_path.exists();
        if let Some(parent) = db_path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), %err, "could not create data directory");
            }
        }

        tracing::debug!(path = %db_path.display(), first_run, "opening database");
        let repository = SqliteRepository::open(&db_path)?;
        let state = Self::new(repository, SystemClock, config);

        if first_run && state.config.seed_demo {
            let seeded = seed_if_empty(&state)?;
            tracing::info!(seeded, "created new card database");
        }

        Ok(state)
    }
}
