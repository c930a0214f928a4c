//! Common test utilities for command integration tests.
//!
//! Commands run against an in-memory SQLite repository and a fixed clock,
//! with scripted input and captured output.

#![allow(dead_code)]

pub mod fixtures;

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::path::PathBuf;
use vocab_core::types::Card;
use vocab_srs::clock::{Clock, FixedClock};
use vocab_srs::commands::OutputFormat;
use vocab_srs::config::Config;
use vocab_srs::db::SqliteRepository;
use vocab_srs::state::AppState;
use vocab_srs::{execute, Command};

/// 2023-11-14T22:13:20Z
pub fn start_time() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
}

/// Test context holding the app state and a handle on its clock.
pub struct TestContext {
    pub state: AppState,
    pub clock: FixedClock,
}

impl TestContext {
    pub fn new() -> Self {
        let clock = FixedClock::new(start_time());
        let repository = SqliteRepository::open_in_memory().expect("in-memory database");
        let config = Config {
            db_path: PathBuf::from(":memory:"),
            seed_demo: false,
            ..Config::default()
        };
        let state = AppState::new(repository, clock.clone(), config);
        Self { state, clock }
    }

    /// Create a context already holding `cards`.
    pub fn with_cards(cards: &[Card]) -> Self {
        let ctx = Self::new();
        ctx.state.repository.save_all(cards).expect("save cards");
        ctx
    }

    pub fn cards(&self) -> Vec<Card> {
        self.state
            .repository
            .load_all(self.clock.now())
            .expect("load cards")
    }

    pub fn card(&self, id: &str) -> Card {
        self.cards()
            .into_iter()
            .find(|c| c.id == id)
            .unwrap_or_else(|| panic!("card {id} not stored"))
    }

    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    /// Run a command with scripted stdin, returning captured stdout.
    pub fn run(&self, command: Command, input: &str) -> anyhow::Result<String> {
        self.run_with_format(command, OutputFormat::Plain, input)
    }

    pub fn run_with_format(
        &self,
        command: Command,
        format: OutputFormat,
        input: &str,
    ) -> anyhow::Result<String> {
        let mut input = input.as_bytes();
        let mut out = Vec::new();
        execute(&self.state, command, format, &mut input, &mut out)?;
        Ok(String::from_utf8(out).expect("utf-8 output"))
    }
}
