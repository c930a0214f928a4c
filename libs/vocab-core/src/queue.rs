//! Due queue selection and review session state.

use crate::types::{Card, Direction, ReviewMode};
use chrono::{DateTime, Utc};

/// Cards eligible for review at `now`, earliest due first.
///
/// Ties keep their relative order from `cards`.
pub fn due_cards(cards: &[Card], now: DateTime<Utc>) -> Vec<&Card> {
    let mut due: Vec<&Card> = cards.iter().filter(|c| c.is_due(now)).collect();
    due.sort_by_key(|c| c.due_at);
    due
}

/// Number of cards eligible for review at `now`.
pub fn count_due(cards: &[Card], now: DateTime<Utc>) -> usize {
    cards.iter().filter(|c| c.is_due(now)).count()
}

/// The card to present: the sticky card while it is still due, otherwise
/// the earliest due card.
pub fn pick_current<'a>(due: &[&'a Card], sticky_id: Option<&str>) -> Option<&'a Card> {
    sticky_id
        .and_then(|id| due.iter().find(|c| c.id == id))
        .or_else(|| due.first())
        .copied()
}

/// State of one review session.
///
/// Holds the id of the card on screen so it stays current across repeated
/// queries until it is graded.
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    pub current_id: Option<String>,
    pub direction: Direction,
    pub mode: ReviewMode,
}

impl ReviewSession {
    pub fn new(mode: ReviewMode, direction: Direction) -> Self {
        Self {
            current_id: None,
            direction,
            mode,
        }
    }

    /// Direction actually used for prompts. Type mode is always EN → RU.
    pub fn effective_direction(&self) -> Direction {
        match self.mode {
            ReviewMode::Flip => self.direction,
            ReviewMode::Type => Direction::EnToRu,
        }
    }

    /// Pick the current card from `due` and remember it.
    pub fn current<'a>(&mut self, due: &[&'a Card]) -> Option<&'a Card> {
        let card = pick_current(due, self.current_id.as_deref());
        self.current_id = card.map(|c| c.id.clone());
        card
    }

    /// Release the sticky card after it has been graded.
    pub fn finish_card(&mut self) {
        self.current_id = None;
    }
}
