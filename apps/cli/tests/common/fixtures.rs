//! Test fixtures and factory functions for creating test data.

use chrono::Duration;
use vocab_core::types::Card;

use super::start_time;

/// Card with a fixed id, due `due_offset_minutes` from the start time.
pub fn card(id: &str, front: &str, back: &str, due_offset_minutes: i64) -> Card {
    let mut card = Card::new(front, back, "", start_time()).expect("valid card");
    card.id = id.to_string();
    card.due_at = start_time() + Duration::minutes(due_offset_minutes);
    card
}

/// Card with an example sentence.
pub fn card_with_example(id: &str, front: &str, back: &str, example: &str) -> Card {
    let mut card = card(id, front, back, 0);
    card.example = example.to_string();
    card
}

/// The two demo words, both due now.
pub fn demo_cards() -> Vec<Card> {
    vec![
        card_with_example("achieve", "to achieve", "достичь / достигать", "Он достиг своей цели."),
        card_with_example(
            "remember",
            "to remember",
            "помнить / вспомнить",
            "Я не могу вспомнить её имя.",
        ),
    ]
}

/// CSV with a header, a multi-line quoted example and an incomplete row.
pub fn sample_csv() -> String {
    [
        "english,russian,example",
        "to read,читать,\"Я читаю книгу,\nкаждый день.\"",
        "\"to say \"\"hi\"\"\",поздороваться,",
        "to forget,,",
        "to write,писать / написать,Он пишет письмо.",
    ]
    .join("\r\n")
}
