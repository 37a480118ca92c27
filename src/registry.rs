//! Matcher registry: named comparison functions, extensible at runtime.
//!
//! Every matcher is a `(actual, expected, tolerance) -> bool` function plus a
//! human-readable description used in report lines. The table is keyed by
//! string and validated at lookup; registering over an existing name is legal
//! and intentional — it lets a suite redefine matcher semantics mid-run, and
//! the new behavior applies to subsequent statements only.

use crate::error::ExpectError;
use crate::value::{Kind, Value};
use glob::Pattern;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Comparison function signature: `(actual, expected, tolerance)`.
///
/// `actual` is the expectation's subject, `expected` the matcher argument.
/// The process-wide tolerance is threaded through so approximate matchers
/// (built-in or custom) can honor it.
pub type CompareFn = Arc<dyn Fn(&Value, &Value, f64) -> bool + Send + Sync>;

/// Built-in matcher names, as used by both the builder methods and by-name
/// dispatch via [`Expectation::verify`](crate::Expectation::verify).
pub mod names {
    pub const TO_BE: &str = "to_be";
    pub const TO_BE_EQUIVALENT: &str = "to_be_equivalent";
    pub const TO_BE_EXACTLY: &str = "to_be_exactly";
    pub const TO_BE_CLOSE_TO: &str = "to_be_close_to";
    pub const TO_BE_GREATER_THAN: &str = "to_be_greater_than";
    pub const TO_BE_GREATER_THAN_OR_EQUAL: &str = "to_be_greater_than_or_equal";
    pub const TO_BE_LESS_THAN: &str = "to_be_less_than";
    pub const TO_BE_LESS_THAN_OR_EQUAL: &str = "to_be_less_than_or_equal";
    pub const TO_BE_TRUTHY: &str = "to_be_truthy";
    pub const TO_BE_FALSY: &str = "to_be_falsy";
    pub const TO_BE_AN_INSTANCE_OF: &str = "to_be_an_instance_of";
    pub const TO_BE_NAN: &str = "to_be_nan";
    pub const TO_MATCH: &str = "to_match";
    pub const TO_THROW: &str = "to_throw";
}

/// A named comparison capability.
///
/// Build with [`Matcher::new`] and optional builder calls:
///
/// ```rust
/// use tinyexpect::Matcher;
///
/// let within = Matcher::new(|actual, expected, _tol| {
///     let (lo, hi) = match expected.as_seq() {
///         Some([lo, hi]) => (lo.as_number(), hi.as_number()),
///         _ => return false,
///     };
///     actual.as_number() > lo && actual.as_number() < hi
/// })
/// .describe("to be within");
/// ```
#[derive(Clone)]
pub struct Matcher {
    description: Option<String>,
    unary: bool,
    compare: CompareFn,
}

impl Matcher {
    /// Create a binary matcher from a comparison function.
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&Value, &Value, f64) -> bool + Send + Sync + 'static,
    {
        Self {
            description: None,
            unary: false,
            compare: Arc::new(compare),
        }
    }

    /// Set the description used in report lines. When absent, the registered
    /// name is used with underscores spaced out (`to_be_close_to` becomes
    /// "to be close to").
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Mark this matcher as operating on the actual value alone; report
    /// lines omit the expected operand.
    pub fn unary(mut self) -> Self {
        self.unary = true;
        self
    }

    /// Whether this matcher takes no expected operand.
    pub fn is_unary(&self) -> bool {
        self.unary
    }

    /// The report-line description.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Run the comparison function.
    pub fn compare(&self, actual: &Value, expected: &Value, tolerance: f64) -> bool {
        (self.compare)(actual, expected, tolerance)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("description", &self.description)
            .field("unary", &self.unary)
            .finish_non_exhaustive()
    }
}

/// The mutable name-to-matcher table.
#[derive(Debug, Clone, Default)]
pub struct MatcherSet {
    table: HashMap<String, Matcher>,
}

impl MatcherSet {
    /// An empty table. Most callers want [`MatcherSet::with_builtins`].
    pub fn new() -> Self {
        Self::default()
    }

    /// A table seeded with every built-in matcher.
    pub fn with_builtins() -> Self {
        let mut set = Self::new();
        set.register(names::TO_BE, Matcher::new(builtin::to_be).describe("==="));
        set.register(
            names::TO_BE_EQUIVALENT,
            Matcher::new(builtin::to_be_equivalent).describe("=="),
        );
        set.register(
            names::TO_BE_EXACTLY,
            Matcher::new(builtin::to_be_exactly).describe("to be exactly"),
        );
        set.register(names::TO_BE_CLOSE_TO, Matcher::new(builtin::to_be_close_to));
        set.register(
            names::TO_BE_GREATER_THAN,
            Matcher::new(builtin::to_be_greater_than),
        );
        set.register(
            names::TO_BE_GREATER_THAN_OR_EQUAL,
            Matcher::new(builtin::to_be_greater_than_or_equal),
        );
        set.register(
            names::TO_BE_LESS_THAN,
            Matcher::new(builtin::to_be_less_than),
        );
        set.register(
            names::TO_BE_LESS_THAN_OR_EQUAL,
            Matcher::new(builtin::to_be_less_than_or_equal),
        );
        set.register(
            names::TO_BE_TRUTHY,
            Matcher::new(builtin::to_be_truthy).unary(),
        );
        set.register(
            names::TO_BE_FALSY,
            Matcher::new(builtin::to_be_falsy).unary(),
        );
        set.register(
            names::TO_BE_AN_INSTANCE_OF,
            Matcher::new(builtin::to_be_an_instance_of),
        );
        set.register(
            names::TO_BE_NAN,
            Matcher::new(builtin::to_be_nan)
                .describe("to be NaN (not a number)")
                .unary(),
        );
        set.register(names::TO_MATCH, Matcher::new(builtin::to_match));
        // Placeholder: pass/fail for to_throw is decided by the builder from
        // the expectation's threw flag, never by this function.
        set.register(
            names::TO_THROW,
            Matcher::new(|_, _, _| false).describe("to throw").unary(),
        );
        set
    }

    /// Register or overwrite a matcher under `name`.
    pub fn register(&mut self, name: impl Into<String>, matcher: Matcher) {
        let name = name.into();
        let matcher = match matcher.description {
            Some(_) => matcher,
            None => {
                let generated = name.replace('_', " ");
                Matcher {
                    description: Some(generated),
                    ..matcher
                }
            }
        };
        self.table.insert(name, matcher);
    }

    /// Look up a matcher, or `None` if absent.
    pub fn get(&self, name: &str) -> Option<&Matcher> {
        self.table.get(name)
    }

    /// Look up a matcher, failing loud on an unknown name.
    pub fn lookup(&self, name: &str) -> Result<&Matcher, ExpectError> {
        self.table
            .get(name)
            .ok_or_else(|| ExpectError::UnknownMatcher(name.to_string()))
    }

    /// Registered matcher names, unordered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }
}

/// Built-in comparison functions.
mod builtin {
    use super::*;
    use std::cmp::Ordering;

    pub fn to_be(actual: &Value, expected: &Value, _tol: f64) -> bool {
        actual.strict_eq(expected)
    }

    pub fn to_be_equivalent(actual: &Value, expected: &Value, _tol: f64) -> bool {
        actual.loose_eq(expected)
    }

    pub fn to_be_exactly(actual: &Value, expected: &Value, _tol: f64) -> bool {
        actual.exact_eq(expected)
    }

    pub fn to_be_close_to(actual: &Value, expected: &Value, tolerance: f64) -> bool {
        (actual.as_number() - expected.as_number()).abs() < tolerance
    }

    // Ordering: two strings compare lexicographically, anything else by
    // numeric coercion. NaN on either side orders as incomparable (fail).
    fn ordering(actual: &Value, expected: &Value) -> Option<Ordering> {
        if let (Value::Str(a), Value::Str(e)) = (actual, expected) {
            return Some(a.as_str().cmp(e.as_str()));
        }
        actual.as_number().partial_cmp(&expected.as_number())
    }

    pub fn to_be_greater_than(actual: &Value, expected: &Value, _tol: f64) -> bool {
        ordering(actual, expected) == Some(Ordering::Greater)
    }

    pub fn to_be_greater_than_or_equal(actual: &Value, expected: &Value, _tol: f64) -> bool {
        matches!(
            ordering(actual, expected),
            Some(Ordering::Greater | Ordering::Equal)
        )
    }

    pub fn to_be_less_than(actual: &Value, expected: &Value, _tol: f64) -> bool {
        ordering(actual, expected) == Some(Ordering::Less)
    }

    pub fn to_be_less_than_or_equal(actual: &Value, expected: &Value, _tol: f64) -> bool {
        matches!(
            ordering(actual, expected),
            Some(Ordering::Less | Ordering::Equal)
        )
    }

    pub fn to_be_truthy(actual: &Value, _expected: &Value, _tol: f64) -> bool {
        actual.is_truthy()
    }

    pub fn to_be_falsy(actual: &Value, _expected: &Value, _tol: f64) -> bool {
        !actual.is_truthy()
    }

    pub fn to_be_an_instance_of(actual: &Value, expected: &Value, _tol: f64) -> bool {
        match expected {
            Value::Str(name) => Kind::from_name(name) == Some(actual.kind()),
            _ => false,
        }
    }

    pub fn to_be_nan(actual: &Value, _expected: &Value, _tol: f64) -> bool {
        actual.as_number().is_nan()
    }

    /// Pattern search over a string subject. Tries glob, then regex, then
    /// literal substring, so plain fragments and rich patterns both work.
    pub fn to_match(actual: &Value, expected: &Value, _tol: f64) -> bool {
        let (Value::Str(subject), Value::Str(pattern)) = (actual, expected) else {
            return false;
        };

        if let Ok(glob) = Pattern::new(pattern) {
            if glob.matches(subject) {
                return true;
            }
        }

        if let Ok(re) = Regex::new(pattern) {
            if re.is_match(subject) {
                return true;
            }
        }

        subject.contains(pattern.as_str())
    }
}
