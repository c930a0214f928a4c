//! Spaced repetition scheduling.

pub mod sm2;

use crate::types::{Card, Grade};
use chrono::{DateTime, Utc};

/// Result of scheduling a card after review.
#[derive(Debug, Clone)]
pub struct SchedulingResult {
    pub card: Card,
    pub next_due: DateTime<Utc>,
}

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate the card's next scheduling state after a review.
    fn schedule(&self, card: &Card, grade: Grade, now: DateTime<Utc>) -> SchedulingResult;
}

/// Grade a card with the default SM-2 parameters and return the updated card.
pub fn apply_grade(card: &Card, grade: Grade, now: DateTime<Utc>) -> Card {
    sm2::Sm2::default().schedule(card, grade, now).card
}
