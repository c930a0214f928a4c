//! CSV import/export and JSON backup commands.

use crate::state::AppState;
use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use vocab_core::codec::{self, ImportOutcome};
use vocab_core::types::{Card, CardRecord};

/// Import cards from a CSV file, appending them to the collection.
pub fn import_csv(state: &AppState, path: &Path, out: &mut impl Write) -> Result<ImportOutcome> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let rows = codec::parse(&text);
    if rows.is_empty() {
        bail!("CSV looks empty.");
    }

    let now = state.clock.now();
    let outcome = codec::import_rows(&rows, now);

    let mut cards = state.repository.load_all(now)?;
    cards.extend(outcome.cards.iter().cloned());
    state.repository.save_all(&cards)?;

    tracing::info!(
        added = outcome.added(),
        skipped = outcome.skipped,
        path = %path.display(),
        "imported CSV"
    );
    writeln!(out, "Imported {} card(s).", outcome.added())?;
    if outcome.skipped > 0 {
        writeln!(out, "Skipped {} row(s) without English or Russian.", outcome.skipped)?;
    }
    Ok(outcome)
}

/// Export all cards as CSV to `path`, or to `out` when no path is given.
pub fn export_csv(state: &AppState, path: Option<&Path>, out: &mut impl Write) -> Result<()> {
    let cards = state.repository.load_all(state.clock.now())?;
    write_output(path, &codec::to_text(&cards), out)?;
    if let Some(path) = path {
        writeln!(out, "Exported {} card(s) to {}.", cards.len(), path.display())?;
    }
    Ok(())
}

/// Write a JSON backup of the full collection, scheduling state included.
pub fn backup(state: &AppState, path: Option<&Path>, out: &mut impl Write) -> Result<()> {
    let cards = state.repository.load_all(state.clock.now())?;
    let json = serde_json::to_string_pretty(&cards)?;
    write_output(path, &json, out)?;
    if let Some(path) = path {
        writeln!(out, "Backed up {} card(s) to {}.", cards.len(), path.display())?;
    }
    Ok(())
}

/// Restore cards from a JSON backup.
///
/// Without `replace`, backup cards overwrite stored cards with the same id
/// and the rest are appended. Records without English or Russian are
/// skipped.
pub fn restore(
    state: &AppState,
    path: &Path,
    replace: bool,
    out: &mut impl Write,
) -> Result<usize> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let records: Vec<CardRecord> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid backup", path.display()))?;

    let now = state.clock.now();
    let restored: Vec<Card> = records
        .into_iter()
        .map(|r| r.into_card(now))
        .filter(|c| !c.front.is_empty() && !c.back.is_empty())
        .collect();

    let mut cards = if replace {
        Vec::new()
    } else {
        state.repository.load_all(now)?
    };
    for card in &restored {
        match cards.iter_mut().find(|c| c.id == card.id) {
            Some(existing) => *existing = card.clone(),
            None => cards.push(card.clone()),
        }
    }
    state.repository.save_all(&cards)?;

    tracing::info!(restored = restored.len(), replace, "restored backup");
    writeln!(out, "Restored {} card(s).", restored.len())?;
    Ok(restored.len())
}

fn write_output(path: Option<&Path>, content: &str, out: &mut impl Write) -> Result<()> {
    match path {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => writeln!(out, "{content}")?,
    }
    Ok(())
}
