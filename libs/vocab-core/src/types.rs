//! Core types for the vocabulary trainer.

use crate::error::{CardError, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ease assigned to new cards.
pub const DEFAULT_EASE: f64 = 2.5;

/// Lowest ease a card can have.
pub const MINIMUM_EASE: f64 = 1.3;

/// A single vocabulary item with its own scheduling state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    /// English side.
    pub front: String,
    /// Russian side. May hold several variants separated by `/`.
    pub back: String,
    pub example: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub due_at: DateTime<Utc>,
    pub interval_days: f64,
    pub ease: f64,
    /// Consecutive successful reviews since the last lapse.
    pub reps: u32,
}

impl Card {
    /// Create a new card, due immediately.
    ///
    /// Text fields are trimmed. Fails if the front or back is empty after
    /// trimming.
    pub fn new(front: &str, back: &str, example: &str, now: DateTime<Utc>) -> Result<Self> {
        let front = front.trim();
        let back = back.trim();
        if front.is_empty() {
            return Err(CardError::EmptyFront);
        }
        if back.is_empty() {
            return Err(CardError::EmptyBack);
        }

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            front: front.to_string(),
            back: back.to_string(),
            example: example.trim().to_string(),
            due_at: now,
            interval_days: 0.0,
            ease: DEFAULT_EASE,
            reps: 0,
        })
    }

    /// Whether the card is eligible for review at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at <= now
    }

    /// Force the card to be due at `now`. Scheduling fields are untouched.
    pub fn make_due(&mut self, now: DateTime<Utc>) {
        self.due_at = now;
    }

    /// Prompt and expected answer for the given review direction.
    pub fn prompt_and_answer(&self, direction: Direction) -> (&str, &str) {
        match direction {
            Direction::EnToRu => (&self.front, &self.back),
            Direction::RuToEn => (&self.back, &self.front),
        }
    }
}

/// Persisted card shape, as read from storage or a JSON backup.
///
/// Every scheduling field is optional; [`CardRecord::into_card`] fills the
/// defaults once so the rest of the crate works with fully populated cards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "english")]
    pub front: String,
    #[serde(default, alias = "russian")]
    pub back: String,
    #[serde(default)]
    pub example: Option<String>,
    /// Epoch milliseconds. Older backups may store fractional values.
    #[serde(default)]
    pub due_at: Option<f64>,
    #[serde(default)]
    pub interval_days: Option<f64>,
    #[serde(default)]
    pub ease: Option<f64>,
    #[serde(default)]
    pub reps: Option<u32>,
}

impl CardRecord {
    /// Resolve missing fields to their defaults and bring stored values back
    /// within card invariants: trimmed text, ease of at least
    /// [`MINIMUM_EASE`], non-negative interval.
    pub fn into_card(self, now: DateTime<Utc>) -> Card {
        let due_at = self
            .due_at
            .filter(|ms| ms.is_finite())
            .and_then(|ms| Utc.timestamp_millis_opt(ms.round() as i64).single())
            .unwrap_or(now);

        Card {
            id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            front: self.front.trim().to_string(),
            back: self.back.trim().to_string(),
            example: self
                .example
                .map(|e| e.trim().to_string())
                .unwrap_or_default(),
            due_at,
            interval_days: self
                .interval_days
                .filter(|d| d.is_finite())
                .map_or(0.0, |d| d.max(0.0)),
            ease: self
                .ease
                .filter(|e| e.is_finite())
                .map_or(DEFAULT_EASE, |e| e.max(MINIMUM_EASE)),
            reps: self.reps.unwrap_or(0),
        }
    }
}

impl From<&Card> for CardRecord {
    fn from(card: &Card) -> Self {
        Self {
            id: Some(card.id.clone()),
            front: card.front.clone(),
            back: card.back.clone(),
            example: Some(card.example.clone()),
            due_at: Some(card.due_at.timestamp_millis() as f64),
            interval_days: Some(card.interval_days),
            ease: Some(card.ease),
            reps: Some(card.reps),
        }
    }
}

/// Learner's self-rated recall quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Self::Again, Self::Hard, Self::Good, Self::Easy];

    /// SM-2 quality score (again=1, hard=3, good=4, easy=5).
    pub fn quality(self) -> u8 {
        match self {
            Self::Again => 1,
            Self::Hard => 3,
            Self::Good => 4,
            Self::Easy => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Again => "again",
            Self::Hard => "hard",
            Self::Good => "good",
            Self::Easy => "easy",
        }
    }
}

impl FromStr for Grade {
    type Err = CardError;

    /// Accepts the grade name (any case) or its button number `1..=4`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "again" | "a" => Ok(Self::Again),
            "2" | "hard" | "h" => Ok(Self::Hard),
            "3" | "good" | "g" => Ok(Self::Good),
            "4" | "easy" | "e" => Ok(Self::Easy),
            other => Err(CardError::UnknownGrade(other.to_string())),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the card is shown as the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    EnToRu,
    RuToEn,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnToRu => "en-ru",
            Self::RuToEn => "ru-en",
        }
    }
}

impl FromStr for Direction {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en-ru" | "en_to_ru" | "entoru" => Ok(Self::EnToRu),
            "ru-en" | "ru_to_en" | "rutoen" => Ok(Self::RuToEn),
            other => Err(CardError::UnknownDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnToRu => f.write_str("EN → RU"),
            Self::RuToEn => f.write_str("RU → EN"),
        }
    }
}

/// How the learner answers a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewMode {
    /// Reveal the answer, then self-grade.
    #[default]
    Flip,
    /// Type the answer, see a similarity score, then self-grade.
    Type,
}

impl FromStr for ReviewMode {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "flip" => Ok(Self::Flip),
            "type" | "typed" => Ok(Self::Type),
            other => Err(CardError::UnknownMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    #[test]
    fn new_card_has_initial_schedule() {
        let card = Card::new("  to achieve ", " достичь ", "", now()).unwrap();
        assert_eq!(card.front, "to achieve");
        assert_eq!(card.back, "достичь");
        assert_eq!(card.example, "");
        assert_eq!(card.due_at, now());
        assert_eq!(card.interval_days, 0.0);
        assert_eq!(card.ease, 2.5);
        assert_eq!(card.reps, 0);
        assert!(card.is_due(now()));
    }

    #[test]
    fn new_card_rejects_blank_sides() {
        assert_eq!(Card::new("  ", "x", "", now()), Err(CardError::EmptyFront));
        assert_eq!(Card::new("x", "\t", "", now()), Err(CardError::EmptyBack));
    }

    #[test]
    fn new_cards_get_distinct_ids() {
        let a = Card::new("a", "б", "", now()).unwrap();
        let b = Card::new("a", "б", "", now()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn record_fills_missing_fields() {
        let record: CardRecord =
            serde_json::from_str(r#"{"id":"x1","front":"cat","back":"кот"}"#).unwrap();
        let card = record.into_card(now());
        assert_eq!(card.id, "x1");
        assert_eq!(card.example, "");
        assert_eq!(card.due_at, now());
        assert_eq!(card.interval_days, 0.0);
        assert_eq!(card.ease, 2.5);
        assert_eq!(card.reps, 0);
    }

    #[test]
    fn record_accepts_legacy_field_names() {
        let json = r#"{"english":"dog","russian":"собака","dueAt":1700000000000.6,"ease":null,"reps":3}"#;
        let card = serde_json::from_str::<CardRecord>(json).unwrap().into_card(now());
        assert_eq!(card.front, "dog");
        assert_eq!(card.back, "собака");
        assert_eq!(card.due_at.timestamp_millis(), 1_700_000_000_001);
        assert_eq!(card.ease, 2.5);
        assert_eq!(card.reps, 3);
        assert!(!card.id.is_empty());
    }

    #[test]
    fn record_out_of_range_values_are_clamped() {
        let json = r#"{"front":"  cat ","back":" кот\n","example":" Кот спит. ","ease":0.4,"intervalDays":-3.5}"#;
        let card = serde_json::from_str::<CardRecord>(json).unwrap().into_card(now());
        assert_eq!(card.front, "cat");
        assert_eq!(card.back, "кот");
        assert_eq!(card.example, "Кот спит.");
        assert_eq!(card.ease, MINIMUM_EASE);
        assert_eq!(card.interval_days, 0.0);

        let valid = r#"{"front":"cat","back":"кот","ease":1.9,"intervalDays":12.5}"#;
        let card = serde_json::from_str::<CardRecord>(valid).unwrap().into_card(now());
        assert_eq!(card.ease, 1.9);
        assert_eq!(card.interval_days, 12.5);
    }

    #[test]
    fn card_serializes_in_persisted_shape() {
        let mut card = Card::new("cat", "кот", "", now()).unwrap();
        card.id = "c1".to_string();
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["dueAt"], 1_700_000_000_000i64);
        assert_eq!(value["intervalDays"], 0.0);
        assert_eq!(value["ease"], 2.5);
        assert_eq!(value["reps"], 0);
    }

    #[test]
    fn record_round_trip_preserves_card() {
        let card = Card::new("cat", "кот", "Кот спит.", now()).unwrap();
        let restored = CardRecord::from(&card).into_card(Utc::now());
        assert_eq!(restored, card);
    }

    #[test]
    fn make_due_only_moves_due_time() {
        let mut card = Card::new("cat", "кот", "", now()).unwrap();
        card.reps = 4;
        card.due_at = now() + chrono::Duration::days(10);
        card.make_due(now());
        assert_eq!(card.due_at, now());
        assert_eq!(card.reps, 4);
    }

    #[test]
    fn grade_parsing() {
        assert_eq!("Again".parse::<Grade>(), Ok(Grade::Again));
        assert_eq!("2".parse::<Grade>(), Ok(Grade::Hard));
        assert_eq!(" good ".parse::<Grade>(), Ok(Grade::Good));
        assert_eq!("e".parse::<Grade>(), Ok(Grade::Easy));
        assert!("5".parse::<Grade>().is_err());
    }

    #[test]
    fn prompt_follows_direction() {
        let card = Card::new("cat", "кот", "", now()).unwrap();
        assert_eq!(card.prompt_and_answer(Direction::EnToRu), ("cat", "кот"));
        assert_eq!(card.prompt_and_answer(Direction::RuToEn), ("кот", "cat"));
    }
}
