//! Core vocabulary library used by the `vocab` command-line app.
//!
//! Provides:
//! - Card model with boundary defaults for persisted records
//! - SM-2 style spaced repetition scheduler
//! - Due queue selection with a sticky current card
//! - Typed-answer similarity scoring (Levenshtein distance)
//! - Delimited-text (CSV) import/export codec

pub mod algorithm;
pub mod codec;
pub mod error;
pub mod matching;
pub mod queue;
pub mod types;

pub use algorithm::{apply_grade, SchedulingResult, SpacedRepetitionAlgorithm};
pub use codec::{import_rows, is_header_row, parse, to_text, ImportOutcome};
pub use error::{CardError, Result};
pub use matching::{
    compare_answers, levenshtein_distance, normalize_answer, similarity_score, MatchResult,
    CLOSE_THRESHOLD,
};
pub use queue::{count_due, due_cards, pick_current, ReviewSession};
pub use types::{Card, CardRecord, Direction, Grade, ReviewMode, DEFAULT_EASE, MINIMUM_EASE};
