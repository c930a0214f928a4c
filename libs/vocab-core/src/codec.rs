//! Delimited-text (CSV) codec for bulk import and export.
//!
//! # Format
//! ```text
//! front,back,example
//! to achieve,достичь / достигать,Он достиг своей цели.
//! "hello, world","привет, мир","He said ""hi"".
//! Second line."
//! ```
//!
//! Fields are separated by `,` and records by `\n`. `\r` is dropped
//! everywhere. A `"` toggles quoting, `""` inside quotes is a literal quote.
//! An unterminated quote runs to the end of the input.

use crate::types::Card;
use chrono::{DateTime, Utc};

const FIELD_SEPARATOR: char = ',';
const RECORD_SEPARATOR: char = '\n';
const QUOTE: char = '"';

/// Header written by [`to_text`].
pub const HEADER: [&str; 3] = ["front", "back", "example"];

/// Parse delimited text into rows of fields.
pub fn parse(text: &str) -> Vec<Vec<String>> {
    let mut parser = Parser::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == QUOTE && parser.in_quotes && chars.peek() == Some(&QUOTE) {
            chars.next();
            parser.field.push(QUOTE);
            continue;
        }
        parser.process_char(ch);
    }

    parser.finalize()
}

struct Parser {
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    field: String,
    in_quotes: bool,
}

impl Parser {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            row: Vec::new(),
            field: String::new(),
            in_quotes: false,
        }
    }

    fn process_char(&mut self, ch: char) {
        match ch {
            QUOTE => self.in_quotes = !self.in_quotes,
            FIELD_SEPARATOR if !self.in_quotes => self.end_field(),
            RECORD_SEPARATOR if !self.in_quotes => self.end_record(),
            '\r' => {}
            other => self.field.push(other),
        }
    }

    fn end_field(&mut self) {
        self.row.push(std::mem::take(&mut self.field));
    }

    fn end_record(&mut self) {
        self.end_field();
        self.rows.push(std::mem::take(&mut self.row));
    }

    fn finalize(mut self) -> Vec<Vec<String>> {
        self.end_record();

        // A trailing newline would otherwise leave a phantom blank record.
        if self
            .rows
            .last()
            .is_some_and(|row| row.iter().all(|f| f.trim().is_empty()))
        {
            self.rows.pop();
        }

        self.rows
    }
}

/// Serialize cards as delimited text with a `front,back,example` header.
///
/// No trailing newline is written.
pub fn to_text(cards: &[Card]) -> String {
    let mut records = Vec::with_capacity(cards.len() + 1);
    records.push(HEADER.join(","));

    for card in cards {
        records.push(
            [&card.front, &card.back, &card.example]
                .iter()
                .map(|f| escape_field(f))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    records.join("\n")
}

/// Quote a field if it contains a separator or a quote.
fn escape_field(field: &str) -> String {
    if field.contains([FIELD_SEPARATOR, QUOTE, RECORD_SEPARATOR]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Whether a row looks like a header (`english`/`front` and `russian`/`back`).
pub fn is_header_row(row: &[String]) -> bool {
    let tokens: Vec<String> = row.iter().map(|f| f.trim().to_lowercase()).collect();
    let has = |names: &[&str]| tokens.iter().any(|t| names.contains(&t.as_str()));
    has(&["english", "front"]) && has(&["russian", "back"])
}

/// Cards built from imported rows.
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    pub cards: Vec<Card>,
    /// Rows discarded for a missing front or back.
    pub skipped: usize,
}

impl ImportOutcome {
    pub fn added(&self) -> usize {
        self.cards.len()
    }
}

/// Build new cards from parsed rows.
///
/// A header on the first row is skipped. Rows without a front or back are
/// counted in `skipped`; extra columns are ignored.
pub fn import_rows(rows: &[Vec<String>], now: DateTime<Utc>) -> ImportOutcome {
    let start = match rows.first() {
        Some(first) if is_header_row(first) => 1,
        _ => 0,
    };

    let mut outcome = ImportOutcome::default();
    for (idx, row) in rows.iter().enumerate().skip(start) {
        let field = |i: usize| row.get(i).map(String::as_str).unwrap_or("");
        match Card::new(field(0), field(1), field(2), now) {
            Ok(card) => outcome.cards.push(card),
            Err(err) => {
                tracing::debug!(row = idx + 1, %err, "skipping import row");
                outcome.skipped += 1;
            }
        }
    }
    outcome
}
