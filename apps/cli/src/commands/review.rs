//! Interactive review session.

use crate::state::AppState;
use anyhow::Result;
use chrono::Duration;
use std::io::{BufRead, Write};
use vocab_core::algorithm::apply_grade;
use vocab_core::matching::compare_answers;
use vocab_core::queue::{due_cards, ReviewSession};
use vocab_core::types::{Card, Direction, Grade, ReviewMode};

/// Typed-answer line that ends the session.
const QUIT_TYPED: &str = ":q";

#[derive(Debug, Clone, Default)]
pub struct ReviewOptions {
    pub mode: ReviewMode,
    pub direction: Direction,
    /// Stop after this many graded cards.
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewSummary {
    pub reviewed: usize,
}

/// Run review until nothing is due, the limit is reached, the learner quits,
/// or input ends.
pub fn run<R: BufRead, W: Write>(
    state: &AppState,
    options: &ReviewOptions,
    input: &mut R,
    out: &mut W,
) -> Result<ReviewSummary> {
    let mut session = ReviewSession::new(options.mode, options.direction);
    let mut summary = ReviewSummary::default();

    if options.mode == ReviewMode::Type {
        writeln!(out, "Type mode: English prompt → type Russian → grade yourself.")?;
    }

    loop {
        if options.limit.is_some_and(|limit| summary.reviewed >= limit) {
            break;
        }

        let now = state.clock.now();
        let cards = state.repository.load_all(now)?;
        let due = due_cards(&cards, now);
        let Some(card) = session.current(&due).cloned() else {
            writeln!(out, "Nothing due 🎉 Add words or wait until some become due.")?;
            break;
        };
        writeln!(out, "\n[{} due] {}", due.len(), session.effective_direction())?;

        let shown = match session.mode {
            ReviewMode::Flip => show_flip(&card, session.effective_direction(), input, out)?,
            ReviewMode::Type => show_typed(state, &card, input, out)?,
        };
        if !shown {
            break;
        }
        writeln!(out, "{}", meta_line(&card))?;

        let Some(grade) = prompt_grade(input, out)? else {
            break;
        };

        grade_card(state, &card, grade, out)?;
        session.finish_card();
        summary.reviewed += 1;
    }

    writeln!(out, "Reviewed {} card(s).", summary.reviewed)?;
    Ok(summary)
}

/// Show the prompt, wait for Enter, reveal the answer. Returns false to quit.
fn show_flip<R: BufRead, W: Write>(
    card: &Card,
    direction: Direction,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    let (prompt, answer) = card.prompt_and_answer(direction);
    writeln!(out, "{prompt}")?;
    write!(out, "(Enter to reveal, q to quit) ")?;
    out.flush()?;

    match read_line(input)? {
        None => return Ok(false),
        Some(line) if line.trim().eq_ignore_ascii_case("q") => return Ok(false),
        Some(_) => {}
    }

    writeln!(out, "────────")?;
    writeln!(out, "{answer}")?;
    if !card.example.is_empty() {
        writeln!(out, "{}", card.example)?;
    }
    Ok(true)
}

/// Ask for the Russian answer and report its similarity. Returns false to quit.
fn show_typed<R: BufRead, W: Write>(
    state: &AppState,
    card: &Card,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    let (prompt, answer) = card.prompt_and_answer(Direction::EnToRu);
    writeln!(out, "{prompt}")?;
    write!(out, "Your answer (Russian, {QUIT_TYPED} to quit): ")?;
    out.flush()?;

    let typed = match read_line(input)? {
        None => return Ok(false),
        Some(line) if line.trim() == QUIT_TYPED => return Ok(false),
        Some(line) => line,
    };

    let result = compare_answers(&typed, answer, state.config.close_threshold);
    tracing::debug!(id = %card.id, similarity = result.similarity, "checked typed answer");

    let shown = if typed.trim().is_empty() { "—" } else { typed.trim() };
    writeln!(out, "Your answer:    {shown}")?;
    writeln!(out, "Correct answer: {answer}")?;
    if !card.example.is_empty() {
        writeln!(out, "Example:        {}", card.example)?;
    }
    let verdict = if result.is_close {
        "Looks close, grade yourself."
    } else {
        "Probably not, grade accordingly."
    };
    writeln!(out, "Similarity: {:.1}% • {verdict}", result.similarity * 100.0)?;
    Ok(true)
}

/// Read grades until a valid one is entered. `None` means quit or end of input.
fn prompt_grade<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<Grade>> {
    loop {
        write!(out, "Grade [1] again [2] hard [3] good [4] easy (q to quit): ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        if line.trim().eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match line.parse::<Grade>() {
            Ok(grade) => return Ok(Some(grade)),
            Err(err) => writeln!(out, "{err}")?,
        }
    }
}

/// Apply the grade to the stored copy of `card` and persist the collection.
fn grade_card<W: Write>(state: &AppState, card: &Card, grade: Grade, out: &mut W) -> Result<()> {
    let now = state.clock.now();
    let mut cards = state.repository.load_all(now)?;
    let updated = apply_grade(card, grade, now);

    match cards.iter_mut().find(|c| c.id == updated.id) {
        Some(slot) => *slot = updated.clone(),
        None => {
            tracing::warn!(id = %card.id, "card disappeared before grading");
            return Ok(());
        }
    }
    state.repository.save_all(&cards)?;

    tracing::info!(
        id = %updated.id,
        %grade,
        reps = updated.reps,
        interval_days = updated.interval_days,
        ease = updated.ease,
        "graded card"
    );
    writeln!(
        out,
        "{grade}: next review in {}.",
        describe_delay(updated.due_at - now)
    )?;
    Ok(())
}

fn meta_line(card: &Card) -> String {
    format!(
        "reps: {} • interval: {:.1}d • ease: {:.2}",
        card.reps, card.interval_days, card.ease
    )
}

fn describe_delay(delay: Duration) -> String {
    let minutes = delay.num_minutes();
    if minutes < 60 {
        format!("{minutes} min")
    } else if minutes < 24 * 60 {
        format!("{} h", minutes / 60)
    } else {
        format!("{:.1} days", delay.num_seconds() as f64 / 86_400.0)
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_delays() {
        assert_eq!(describe_delay(Duration::minutes(10)), "10 min");
        assert_eq!(describe_delay(Duration::hours(5)), "5 h");
        assert_eq!(describe_delay(Duration::days(3)), "3.0 days");
    }

    #[test]
    fn meta_line_format() {
        let card = Card::new("cat", "кот", "", chrono::Utc::now()).unwrap();
        assert_eq!(meta_line(&card), "reps: 0 • interval: 0.0d • ease: 2.50");
    }

    #[test]
    fn read_line_strips_line_endings() {
        let mut input = "good\r\nnext".as_bytes();
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("good"));
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("next"));
        assert_eq!(read_line(&mut input).unwrap(), None);
    }
}
