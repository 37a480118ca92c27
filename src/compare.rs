//! Container comparator: elementwise application of a matcher over sequence
//! subjects, with scalar broadcast and all/some quantification.

use crate::registry::Matcher;
use crate::value::Value;

/// Pass criterion across elementwise comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Quantifier {
    /// Every index-aligned pair must satisfy the matcher (the default).
    #[default]
    All,
    /// At least one pair must satisfy the matcher; evaluation stops at the
    /// first success.
    Some,
}

/// Apply `matcher` to `actual` vs `expected`, elementwise when requested.
///
/// Rules, in order:
/// - `elementwise` off, or the subject is not a sequence (strings and maps
///   are scalars here): direct comparison of the pair.
/// - Non-sequence expected operand: broadcast by repetition to the subject's
///   length.
/// - Post-broadcast length mismatch: deterministic `false`, never an error.
/// - Otherwise AND ([`Quantifier::All`]) or OR ([`Quantifier::Some`]) across
///   index-aligned pairs.
pub(crate) fn apply(
    matcher: &Matcher,
    actual: &Value,
    expected: &Value,
    elementwise: bool,
    quantifier: Quantifier,
    tolerance: f64,
) -> bool {
    let items = match actual.as_seq() {
        Some(items) if elementwise => items,
        _ => return matcher.compare(actual, expected, tolerance),
    };

    let broadcast;
    let expected_items: &[Value] = match expected.as_seq() {
        Some(e) => e,
        None => {
            broadcast = vec![expected.clone(); items.len()];
            &broadcast
        }
    };

    if items.len() != expected_items.len() {
        return false;
    }

    let mut pairs = items.iter().zip(expected_items);
    match quantifier {
        Quantifier::All => pairs.all(|(a, e)| matcher.compare(a, e, tolerance)),
        Quantifier::Some => pairs.any(|(a, e)| matcher.compare(a, e, tolerance)),
    }
}
