//! Fuzzy similarity scoring between raw vendor labels and canonical names.
//!
//! Uses normalized Levenshtein similarity as the base algorithm, behind two
//! guards that matter more than the edit distance itself: labels whose
//! alphabetic content differs are unrelated no matter how many characters
//! they share, and labels that differ only in an embedded number (percentile
//! suffixes like `p50` vs `p90`) are distinct concepts, not typos.

use rapidfuzz::distance::levenshtein::normalized_similarity as levenshtein_similarity;
use serde::{Deserialize, Serialize};

/// Score for labels whose alphabetic content does not match.
const PREFIX_MISMATCH_SCORE: f64 = 0.1;
/// Score for labels that agree on letters but disagree on embedded digits.
const DIGIT_RUN_MISMATCH_SCORE: f64 = 0.2;
/// Flat bonus when both sides carry a matching inferred data type.
const HINT_MATCH_BONUS: f64 = 0.1;

/// Inferred data type of a label's underlying values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    /// Currency-valued (TCC, conversion factor).
    Currency,
    /// Plain numeric (wRVUs, counts).
    Numeric,
    /// Free text.
    Text,
}

/// Similarity between two labels, in [0, 1].
///
/// Deterministic, pure, and symmetric: `similarity(a, b) == similarity(b, a)`
/// for all inputs.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a_norm = normalize(a);
    let b_norm = normalize(b);
    if a_norm == b_norm {
        return 1.0;
    }

    // Unrelated labels can still share many characters; require the
    // alphabetic content to agree before trusting edit distance at all.
    if alpha_prefix(&a_norm) != alpha_prefix(&b_norm) {
        return PREFIX_MISMATCH_SCORE;
    }

    // Same letters, different numbers: tcc_p50 and tcc_p90 are different
    // concepts, not near-matches.
    let a_digits = digit_run(&a_norm);
    let b_digits = digit_run(&b_norm);
    if !a_digits.is_empty() && !b_digits.is_empty() && a_digits != b_digits {
        return DIGIT_RUN_MISMATCH_SCORE;
    }

    levenshtein_similarity(a_norm.chars(), b_norm.chars())
}

/// Similarity with an auxiliary data-type bonus.
///
/// Adds a flat `+0.1` (capped at 1.0) when both sides have an inferred data
/// type and the types agree.
#[must_use]
pub fn similarity_with_hints(
    a: &str,
    b: &str,
    a_kind: Option<DataKind>,
    b_kind: Option<DataKind>,
) -> f64 {
    let base = similarity(a, b);
    match (a_kind, b_kind) {
        (Some(lhs), Some(rhs)) if lhs == rhs => (base + HINT_MATCH_BONUS).min(1.0),
        _ => base,
    }
}

/// Lowercases and strips everything that is not ASCII alphanumeric.
pub(crate) fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// The letters of a normalized label, digits removed.
fn alpha_prefix(normalized: &str) -> String {
    normalized.chars().filter(|c| c.is_ascii_alphabetic()).collect()
}

/// The digits of a normalized label, concatenated.
fn digit_run(normalized: &str) -> String {
    normalized.chars().filter(char::is_ascii_digit).collect()
}
