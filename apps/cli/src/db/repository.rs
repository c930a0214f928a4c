//! Repository pattern for card storage.

use crate::db::error::DbError;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use vocab_core::types::{Card, CardRecord};

type Result<T> = std::result::Result<T, DbError>;

/// Storage for the whole card collection.
///
/// The collection is the unit of read and write; there are no partial
/// updates.
pub trait CardRepository {
    /// Load every card, filling missing scheduling fields with defaults as of
    /// `now`. Unreadable data yields an empty collection.
    fn load_all(&self, now: DateTime<Utc>) -> Result<Vec<Card>>;

    /// Replace the stored collection with `cards`, keeping their order.
    fn save_all(&self, cards: &[Card]) -> Result<()>;

    /// Remove every card.
    fn clear(&self) -> Result<()>;
}

/// SQLite implementation of [`CardRepository`].
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(super::schema::SCHEMA)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![super::schema::SCHEMA_VERSION],
        )?;
        Ok(())
    }

    fn read_records(&self) -> rusqlite::Result<Vec<CardRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, front, back, example, due_at, interval_days, ease, reps FROM cards ORDER BY position",
        )?;

        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<CardRecord> {
        Ok(CardRecord {
            id: row.get(0)?,
            front: row.get(1)?,
            back: row.get(2)?,
            example: row.get(3)?,
            due_at: row.get::<_, Option<i64>>(4)?.map(|ms| ms as f64),
            interval_days: row.get(5)?,
            ease: row.get(6)?,
            reps: row.get(7)?,
        })
    }
}

impl CardRepository for SqliteRepository {
    fn load_all(&self, now: DateTime<Utc>) -> Result<Vec<Card>> {
        match self.read_records() {
            Ok(records) => Ok(records.into_iter().map(|r| r.into_card(now)).collect()),
            Err(
                err @ (rusqlite::Error::InvalidColumnType(..)
                | rusqlite::Error::FromSqlConversionFailure(..)
                | rusqlite::Error::IntegralValueOutOfRange(..)),
            ) => {
                tracing::warn!(%err, "stored cards are unreadable, starting with an empty collection");
                Ok(Vec::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn save_all(&self, cards: &[Card]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM cards", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO cards (id, position, front, back, example, due_at, interval_days, ease, reps)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for (position, card) in cards.iter().enumerate() {
                stmt.execute(params![
                    card.id,
                    position as i64,
                    card.front,
                    card.back,
                    card.example,
                    card.due_at.timestamp_millis(),
                    card.interval_days,
                    card.ease,
                    card.reps,
                ])?;
            }
        }
        tx.commit()?;
        tracing::debug!(count = cards.len(), "saved cards");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM cards", [])?;
        Ok(())
    }
}
