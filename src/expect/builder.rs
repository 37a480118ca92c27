//! The expectation builder type.

use crate::compare::{self, Quantifier};
use crate::error::ExpectError;
use crate::output::Verdict;
use crate::registry::names;
use crate::run::TestRun;
use crate::value::Value;

/// Modifier state for one expectation chain. Each field may be toggled on at
/// most once; re-toggling is a no-op, never a double-toggle.
#[derive(Debug, Clone, Copy, Default)]
struct Modifiers {
    negate: bool,
    elementwise: bool,
    quantifier: Quantifier,
}

/// One actual-value evaluation plus its modifier chain, pending a matcher
/// invocation.
///
/// Created by [`TestRun::expect`] or [`TestRun::expect_from`]. Modifier
/// accessors consume the builder and return it with the modifier toggled on,
/// so chains read left to right; matcher methods consume it for good and
/// return the settled pass/fail boolean.
///
/// # Example
///
/// ```rust
/// use tinyexpect::{seq, TestRun};
///
/// let mut run = TestRun::silent();
/// assert!(run.expect(2).not().to_be(3));
/// assert!(run
///     .expect(seq![1.0, 2.0])
///     .contents()
///     .to_be_close_to(seq![1.0000001, 2.0000001]));
/// ```
pub struct Expectation<'r> {
    run: &'r mut TestRun,
    label: Option<String>,
    message: Option<String>,
    actual: Value,
    threw: bool,
    mods: Modifiers,
}

impl<'r> Expectation<'r> {
    pub(crate) fn new(
        run: &'r mut TestRun,
        label: Option<String>,
        evaluated: anyhow::Result<Value>,
    ) -> Self {
        let (actual, threw) = match evaluated {
            Ok(value) => (value, false),
            // The error stands in as the actual value, so a negated matcher
            // or to_throw can still report something meaningful.
            Err(err) => (Value::Str(err.to_string()), true),
        };
        Self {
            run,
            label,
            message: None,
            actual,
            threw,
            mods: Modifiers::default(),
        }
    }

    /// Attach a message shown in the report line.
    pub fn message(mut self, text: impl Into<String>) -> Self {
        self.message = Some(text.into());
        self
    }

    /// Negate the matcher outcome. Idempotent: a second `not()` does not
    /// un-negate.
    pub fn not(mut self) -> Self {
        self.mods.negate = true;
        self
    }

    /// Compare elementwise over a sequence subject instead of comparing the
    /// sequence as one value.
    pub fn contents(mut self) -> Self {
        self.mods.elementwise = true;
        self
    }

    /// With `contents()`, pass if at least one element pair satisfies the
    /// matcher.
    pub fn some(mut self) -> Self {
        self.mods.quantifier = Quantifier::Some;
        self
    }

    /// With `contents()`, require every element pair to satisfy the matcher.
    /// This is the default quantifier; the accessor exists to make it
    /// explicit at the call site.
    pub fn all(self) -> Self {
        self
    }

    // =========================================================================
    // Built-in matchers
    // =========================================================================

    /// Strict equality.
    pub fn to_be(self, expected: impl Into<Value>) -> bool {
        self.invoke(names::TO_BE, Some(expected.into()))
    }

    /// Coercive equality (`"1"` equals `1`).
    pub fn to_be_equivalent(self, expected: impl Into<Value>) -> bool {
        self.invoke(names::TO_BE_EQUIVALENT, Some(expected.into()))
    }

    /// Identity equality: NaN equals NaN, `0` is distinct from `-0`.
    pub fn to_be_exactly(self, expected: impl Into<Value>) -> bool {
        self.invoke(names::TO_BE_EXACTLY, Some(expected.into()))
    }

    /// `|actual - expected|` below the run's tolerance.
    pub fn to_be_close_to(self, expected: impl Into<Value>) -> bool {
        self.invoke(names::TO_BE_CLOSE_TO, Some(expected.into()))
    }

    /// Ordering: the subject is greater than the operand.
    pub fn to_be_greater_than(self, expected: impl Into<Value>) -> bool {
        self.invoke(names::TO_BE_GREATER_THAN, Some(expected.into()))
    }

    /// Ordering: the subject is greater than or equal to the operand.
    pub fn to_be_greater_than_or_equal(self, expected: impl Into<Value>) -> bool {
        self.invoke(names::TO_BE_GREATER_THAN_OR_EQUAL, Some(expected.into()))
    }

    /// Ordering: the subject is less than the operand.
    pub fn to_be_less_than(self, expected: impl Into<Value>) -> bool {
        self.invoke(names::TO_BE_LESS_THAN, Some(expected.into()))
    }

    /// Ordering: the subject is less than or equal to the operand.
    pub fn to_be_less_than_or_equal(self, expected: impl Into<Value>) -> bool {
        self.invoke(names::TO_BE_LESS_THAN_OR_EQUAL, Some(expected.into()))
    }

    /// Boolean coercion of the subject alone.
    pub fn to_be_truthy(self) -> bool {
        self.invoke(names::TO_BE_TRUTHY, None)
    }

    /// Negated boolean coercion of the subject alone.
    pub fn to_be_falsy(self) -> bool {
        self.invoke(names::TO_BE_FALSY, None)
    }

    /// Kind membership: the operand is a kind name such as `"number"` or
    /// `"array"`.
    pub fn to_be_an_instance_of(self, kind: impl Into<Value>) -> bool {
        self.invoke(names::TO_BE_AN_INSTANCE_OF, Some(kind.into()))
    }

    /// Not-a-number predicate on the subject alone, with numeric coercion.
    pub fn to_be_nan(self) -> bool {
        self.invoke(names::TO_BE_NAN, None)
    }

    /// Pattern search over a string subject: glob, regex, or substring.
    pub fn to_match(self, pattern: impl Into<Value>) -> bool {
        self.invoke(names::TO_MATCH, Some(pattern.into()))
    }

    /// Passes iff evaluating the subject thunk errored. Only meaningful for
    /// expectations built with [`TestRun::expect_from`]; a plain value never
    /// counts as having thrown.
    pub fn to_throw(self) -> bool {
        self.invoke(names::TO_THROW, None)
    }

    // =========================================================================
    // By-name dispatch
    // =========================================================================

    /// Invoke any registered matcher by name, e.g. a custom one.
    ///
    /// Fails with [`ExpectError::UnknownMatcher`] for an unregistered name,
    /// before any counter is touched.
    ///
    /// ```rust
    /// use tinyexpect::{Matcher, TestRun};
    ///
    /// let mut run = TestRun::silent();
    /// run.register_matcher(
    ///     "to_have_length",
    ///     Matcher::new(|actual, expected, _| {
    ///         actual.as_seq().map(|s| s.len() as f64) == Some(expected.as_number())
    ///     }),
    /// );
    /// let passed = run
    ///     .expect(vec![13, 14, 15, 16])
    ///     .verify("to_have_length", 4)
    ///     .unwrap();
    /// assert!(passed);
    /// ```
    pub fn verify(self, name: &str, expected: impl Into<Value>) -> Result<bool, ExpectError> {
        self.dispatch(name, Some(expected.into()))
    }

    /// By-name dispatch for matchers that take no operand.
    pub fn verify_unary(self, name: &str) -> Result<bool, ExpectError> {
        self.dispatch(name, None)
    }

    // Built-in names are seeded at TestRun construction and can only be
    // overwritten, never removed, so lookup cannot fail here.
    fn invoke(self, name: &str, expected: Option<Value>) -> bool {
        match self.dispatch(name, expected) {
            Ok(passed) => passed,
            Err(err) => panic!("{err}"),
        }
    }

    fn dispatch(self, name: &str, expected: Option<Value>) -> Result<bool, ExpectError> {
        let matcher = self.run.matchers().lookup(name)?.clone();

        let raw = if name == names::TO_THROW {
            // Pass/fail is the threw flag alone; no comparison runs.
            self.threw
        } else if self.threw {
            // A subject that threw auto-fails every other matcher
            // (pre-negation).
            false
        } else {
            compare::apply(
                &matcher,
                &self.actual,
                expected.as_ref().unwrap_or(&Value::Nil),
                self.mods.elementwise,
                self.mods.quantifier,
                self.run.tolerance(),
            )
        };

        let verdict = Verdict {
            passed: false, // settled by TestRun::report
            subject: self
                .label
                .clone()
                .unwrap_or_else(|| self.actual.to_string()),
            explicit_label: self.label.is_some(),
            message: self.message.clone(),
            description: matcher.description().to_string(),
            expected: match (&expected, matcher.is_unary()) {
                (Some(value), false) => Some(value.to_string()),
                _ => None,
            },
            negated: self.mods.negate,
            some: self.mods.quantifier == Quantifier::Some,
            elementwise: self.mods.elementwise,
        };

        Ok(self.run.report(raw, verdict))
    }
}
