//! Card management commands.

use crate::commands::OutputFormat;
use crate::db::DbError;
use crate::state::AppState;
use anyhow::{bail, Context, Result};
use chrono::Local;
use std::io::Write;
use vocab_core::queue::count_due;
use vocab_core::types::Card;

const DEMO_CARDS: [(&str, &str, &str); 2] = [
    ("to achieve", "достичь / достигать", "Он достиг своей цели."),
    ("to remember", "помнить / вспомнить", "Я не могу вспомнить её имя."),
];

/// Add the demo cards if the collection is empty. Returns how many were added.
pub fn seed_if_empty(state: &AppState) -> std::result::Result<usize, DbError> {
    let now = state.clock.now();
    if !state.repository.load_all(now)?.is_empty() {
        return Ok(0);
    }

    let cards: Vec<Card> = DEMO_CARDS
        .iter()
        .filter_map(|(front, back, example)| Card::new(front, back, example, now).ok())
        .collect();
    state.repository.save_all(&cards)?;
    Ok(cards.len())
}

/// Add a single card.
pub fn add(
    state: &AppState,
    front: &str,
    back: &str,
    example: &str,
    out: &mut impl Write,
) -> Result<Card> {
    let now = state.clock.now();
    let card = Card::new(front, back, example, now)
        .context("Need at least English + Russian")?;

    let mut cards = state.repository.load_all(now)?;
    cards.push(card.clone());
    state.repository.save_all(&cards)?;

    tracing::info!(id = %card.id, "added card");
    writeln!(out, "Saved. ({})", card.id)?;
    Ok(card)
}

/// List all cards sorted by front.
pub fn list(state: &AppState, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let mut cards = state.repository.load_all(state.clock.now())?;
    cards.sort_by_cached_key(|c| c.front.to_lowercase());

    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&cards)?)?;
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                writeln!(out, "No cards yet.")?;
            }
            for card in &cards {
                writeln!(out, "{} — {}", card.front, card.back)?;
                if !card.example.is_empty() {
                    writeln!(out, "    {}", card.example.replace('\n', "\n    "))?;
                }
                writeln!(
                    out,
                    "    due: {} • reps: {} • id: {}",
                    card.due_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    card.reps,
                    card.id
                )?;
            }
        }
    }

    Ok(())
}

/// Total and due card counts.
pub fn stats(state: &AppState, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let now = state.clock.now();
    let cards = state.repository.load_all(now)?;
    let due = count_due(&cards, now);

    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({ "total": cards.len(), "due": due });
            writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
        }
        OutputFormat::Plain => writeln!(out, "Cards: {} • Due: {}", cards.len(), due)?,
    }
    Ok(())
}

/// Delete a card by id.
pub fn delete(state: &AppState, id: &str, out: &mut impl Write) -> Result<()> {
    let mut cards = state.repository.load_all(state.clock.now())?;
    let before = cards.len();
    cards.retain(|c| c.id != id);
    if cards.len() == before {
        return Err(DbError::CardNotFound(id.to_string()).into());
    }

    state.repository.save_all(&cards)?;
    tracing::info!(%id, "deleted card");
    writeln!(out, "Deleted {id}.")?;
    Ok(())
}

/// Make a card due immediately without touching its schedule otherwise.
pub fn make_due(state: &AppState, id: &str, out: &mut impl Write) -> Result<()> {
    let now = state.clock.now();
    let mut cards = state.repository.load_all(now)?;
    let card = cards
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| DbError::CardNotFound(id.to_string()))?;
    card.make_due(now);

    state.repository.save_all(&cards)?;
    writeln!(out, "{id} is due now.")?;
    Ok(())
}

/// Delete every card. Requires explicit confirmation.
pub fn clear(state: &AppState, confirmed: bool, out: &mut impl Write) -> Result<()> {
    if !confirmed {
        bail!("refusing to delete all cards without --yes");
    }
    state.repository.clear()?;
    tracing::warn!("deleted all cards");
    writeln!(out, "Cleared.")?;
    Ok(())
}
