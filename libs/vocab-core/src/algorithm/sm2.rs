//! SM-2 spaced repetition algorithm.
//!
//! Anki-lite variant of SuperMemo 2: a failed card goes to a short relearn
//! delay measured in minutes, successful reviews grow the interval by the
//! card's ease.

use super::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::types::{Card, Grade, MINIMUM_EASE};
use chrono::{DateTime, Duration, Utc};

const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub minimum_ease: f64,
    /// Delay before a lapsed card is shown again.
    pub relearn_delay: Duration,
    pub first_interval: f64,
    pub second_interval: f64,
    pub hard_multiplier: f64,
    pub easy_bonus: f64,
    /// Upper bound on the interval, in days.
    pub maximum_interval: f64,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            minimum_ease: MINIMUM_EASE,
            relearn_delay: Duration::minutes(10),
            first_interval: 1.0,
            second_interval: 3.0,
            hard_multiplier: 0.75,
            easy_bonus: 1.15,
            maximum_interval: 36_500.0,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn schedule(&self, card: &Card, grade: Grade, now: DateTime<Utc>) -> SchedulingResult {
        let quality = grade.quality();
        let mut next = card.clone();

        if quality < 3 {
            self.schedule_lapse(&mut next, now);
        } else {
            self.schedule_success(&mut next, grade, now);
        }

        SchedulingResult {
            next_due: next.due_at,
            card: next,
        }
    }
}

impl Sm2 {
    fn schedule_lapse(&self, card: &mut Card, now: DateTime<Utc>) {
        card.reps = 0;
        card.interval_days = 0.0;
        card.due_at = now + self.relearn_delay;
    }

    fn schedule_success(&self, card: &mut Card, grade: Grade, now: DateTime<Utc>) {
        card.reps = card.reps.saturating_add(1);
        card.ease = self.next_ease(card.ease, grade.quality());

        let interval = match card.reps {
            1 => self.first_interval,
            2 => self.second_interval,
            _ => (card.interval_days * card.ease).max(1.0),
        };

        // Easy is not re-floored.
        let interval = match grade {
            Grade::Hard => (interval * self.hard_multiplier).max(1.0),
            Grade::Easy => interval * self.easy_bonus,
            Grade::Good | Grade::Again => interval,
        };
        card.interval_days = interval.min(self.maximum_interval);

        let offset_ms = (card.interval_days * MS_PER_DAY).round() as i64;
        card.due_at = Duration::try_milliseconds(offset_ms)
            .and_then(|offset| now.checked_add_signed(offset))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
    }

    /// `EF' = EF + 0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)`, floored.
    fn next_ease(&self, ease: f64, quality: u8) -> f64 {
        let penalty = f64::from(5 - quality);
        (ease + 0.1 - penalty * (0.08 + penalty * 0.02)).max(self.minimum_ease)
    }
}
