//! Answer matching for typed mode review.

use serde::{Deserialize, Serialize};

/// Similarity at or above which a typed answer "looks close".
pub const CLOSE_THRESHOLD: f64 = 0.86;

/// Separator between synonymous variants in an accepted answer.
const VARIANT_SEPARATOR: char = '/';

/// Result of comparing a typed answer to the accepted answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Best similarity across variants, between 0.0 and 1.0.
    pub similarity: f64,
    /// Whether the similarity reached the threshold.
    pub is_close: bool,
    /// Normalized typed answer (for display).
    pub typed_normalized: String,
    /// Normalized variant that scored best.
    pub best_variant: String,
}

/// Compare a typed answer against an accepted answer that may list several
/// `/`-separated variants.
pub fn compare_answers(typed: &str, correct: &str, threshold: f64) -> MatchResult {
    let typed_normalized = normalize_answer(typed);
    let (similarity, best_variant) = best_candidate(&typed_normalized, correct);

    MatchResult {
        similarity,
        is_close: similarity >= threshold,
        typed_normalized,
        best_variant,
    }
}

/// Similarity in `[0, 1]` between a typed answer and the best-matching
/// variant of the accepted answer.
pub fn similarity_score(user: &str, correct: &str) -> f64 {
    best_candidate(&normalize_answer(user), correct).0
}

fn best_candidate(user: &str, correct: &str) -> (f64, String) {
    let mut best: Option<(f64, String)> = None;
    for candidate in candidates(correct) {
        let score = normalized_similarity(user, &candidate);
        if best.as_ref().map_or(true, |(top, _)| score > *top) {
            best = Some((score, candidate));
        }
    }
    best.unwrap_or_default()
}

/// Normalized variants of an accepted answer.
///
/// The split happens before normalization, which would otherwise turn the
/// separator into a space.
fn candidates(correct: &str) -> Vec<String> {
    let variants: Vec<String> = correct
        .split(VARIANT_SEPARATOR)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(normalize_answer)
        .collect();

    if variants.is_empty() {
        vec![normalize_answer(correct)]
    } else {
        variants
    }
}

/// Canonicalize free text for comparison.
///
/// Lowercases, folds `ё` into `е`, maps anything other than Latin/Cyrillic
/// letters, digits, whitespace and hyphens to spaces, then collapses
/// whitespace.
pub fn normalize_answer(s: &str) -> String {
    let mapped: String = s
        .to_lowercase()
        .trim()
        .chars()
        .map(|c| match c {
            'ё' => 'е',
            '\u{2019}' | '\u{2018}' | '\u{02BC}' => '\'',
            other => other,
        })
        .map(|c| if is_answer_char(c) { c } else { ' ' })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_answer_char(c: char) -> bool {
    c.is_ascii_lowercase()
        || c.is_ascii_digit()
        || ('а'..='я').contains(&c)
        || c.is_whitespace()
        || c == '-'
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in dp[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };

            dp[i][j] = (dp[i - 1][j] + 1) // deletion
                .min(dp[i][j - 1] + 1) // insertion
                .min(dp[i - 1][j - 1] + cost); // substitution
        }
    }

    dp[m][n]
}

/// Similarity of two already-normalized strings, lengths counted in chars.
fn normalized_similarity(a: &str, b: &str) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let max_len = a.chars().count().max(b.chars().count());
    let distance = levenshtein_distance(a, b);
    1.0 - (distance as f64 / max_len as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
        assert_eq!(levenshtein_distance("достич", "достичь"), 1);
    }

    #[test]
    fn test_normalize_answer() {
        assert_eq!(normalize_answer("  Ёлка  "), "елка");
        assert_eq!(normalize_answer("Он достиг своей цели."), "он достиг своей цели");
        assert_eq!(normalize_answer("don’t   stop"), "don t stop");
        assert_eq!(normalize_answer("well-known, 42!"), "well-known 42");
        assert_eq!(normalize_answer("café"), "caf");
        assert_eq!(normalize_answer("a/b"), "a b");
    }

    #[test]
    fn test_empty_answers() {
        assert_eq!(similarity_score("", "x"), 0.0);
        assert_eq!(similarity_score("x", ""), 0.0);
        assert_eq!(similarity_score("", ""), 1.0);
        assert_eq!(similarity_score("?!", "..."), 1.0);
    }

    #[test]
    fn test_variants_scored_independently() {
        assert_eq!(similarity_score("достигать", "достичь / достигать"), 1.0);
        assert_eq!(similarity_score("Достичь", "достичь / достигать"), 1.0);
        assert_eq!(similarity_score("помнить", "помнить/вспомнить"), 1.0);
    }

    #[test]
    fn test_soft_sign_omission_matches_first_variant() {
        // One edit over seven characters.
        let score = similarity_score("достич", "достичь / достигать");
        assert!((score - 6.0 / 7.0).abs() < 1e-12);
        assert!(score > similarity_score("достич", "достичь достигать"));
    }

    #[test]
    fn test_yo_folds_to_ye() {
        assert_eq!(similarity_score("еще", "ещё"), 1.0);
    }

    #[test]
    fn test_separator_only_answer_falls_back() {
        assert_eq!(similarity_score("x", " / "), 0.0);
        assert_eq!(similarity_score("", " / "), 1.0);
    }

    #[test]
    fn test_punctuation_only_variant_is_kept() {
        assert_eq!(similarity_score("", "достичь / ?!"), 1.0);
        assert_eq!(similarity_score("", "?! / достичь"), 1.0);
        assert_eq!(similarity_score("достичь", "достичь / ?!"), 1.0);
    }

    #[test]
    fn test_compare_answers_threshold() {
        let result = compare_answers("достигат", "достичь / достигать", CLOSE_THRESHOLD);
        assert!(result.is_close);
        assert_eq!(result.best_variant, "достигать");
        assert_eq!(result.typed_normalized, "достигат");

        let result = compare_answers("помнить", "достичь / достигать", CLOSE_THRESHOLD);
        assert!(!result.is_close);
        assert!(result.similarity < 0.5);
    }

    #[test]
    fn test_score_is_bounded() {
        for (user, correct) in [("a", "bbbbbb"), ("abcdef", "x"), ("кот", "cat")] {
            let score = similarity_score(user, correct);
            assert!((0.0..=1.0).contains(&score));
        }
    }
}
