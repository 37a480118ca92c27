//! The `TestRun` context: matcher registry, group counters, tolerance, and
//! the reporter, threaded explicitly through every expectation instead of
//! living in process-wide globals.

use crate::expect::Expectation;
use crate::output::{OutputConfig, Reporter, Verdict};
use crate::registry::{Matcher, MatcherSet};
use crate::value::Value;
use std::collections::HashMap;

/// Name of the always-present aggregate group. Every test counts toward it
/// regardless of which group is active. The `$` keeps it out of the way of
/// caller-chosen group names.
pub const DEFAULT_GROUP: &str = "$default";

/// Default tolerance for approximate-equality matchers.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Pass/fail tallies for one named group.
///
/// `passed <= tested` always holds; both counters only move forward until
/// the group is restarted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupStats {
    /// Number of test statements evaluated.
    pub tested: u32,
    /// Number of those that passed.
    pub passed: u32,
}

/// One run of an ad-hoc test script.
///
/// Owns all shared state: the matcher table, the per-group counters, the
/// active-group pointer, the approximate-equality tolerance, and the
/// reporter. Single-threaded by design; statements execute strictly in
/// program order.
///
/// # Example
///
/// ```rust
/// use tinyexpect::TestRun;
///
/// let mut run = TestRun::silent();
/// assert!(run.expect(5).to_be(5));
/// assert!(!run.expect(5).not().to_be(5));
/// assert_eq!(run.totals().tested, 2);
/// assert_eq!(run.totals().passed, 1);
/// ```
pub struct TestRun {
    matchers: MatcherSet,
    groups: HashMap<String, GroupStats>,
    active: String,
    tolerance: f64,
    reporter: Reporter,
}

impl TestRun {
    /// A run reporting to stdout with default output configuration.
    pub fn new() -> Self {
        Self::with_reporter(Reporter::new(OutputConfig::default()))
    }

    /// A run reporting to stdout with the given output configuration.
    pub fn with_config(config: OutputConfig) -> Self {
        Self::with_reporter(Reporter::new(config))
    }

    /// A run with a custom reporter, e.g. one capturing into a buffer.
    pub fn with_reporter(reporter: Reporter) -> Self {
        let mut groups = HashMap::new();
        groups.insert(DEFAULT_GROUP.to_string(), GroupStats::default());
        Self {
            matchers: MatcherSet::with_builtins(),
            groups,
            active: DEFAULT_GROUP.to_string(),
            tolerance: DEFAULT_TOLERANCE,
            reporter,
        }
    }

    /// A run that discards all output. Counters and return values still
    /// work, for purely programmatic use.
    pub fn silent() -> Self {
        Self::with_reporter(Reporter::silent())
    }

    /// Build an expectation for a plain value.
    pub fn expect(&mut self, value: impl Into<Value>) -> Expectation<'_> {
        Expectation::new(self, None, Ok(value.into()))
    }

    /// Build an expectation by evaluating a fallible thunk.
    ///
    /// An error from the thunk is captured, never propagated: the
    /// expectation is marked as having thrown, the error text becomes the
    /// actual value, and only `to_throw` (or a negated matcher) can then
    /// pass. `label` stands in for the source text in report lines.
    ///
    /// ```rust
    /// use tinyexpect::TestRun;
    ///
    /// let mut run = TestRun::silent();
    /// assert!(run
    ///     .expect_from("1/0", || anyhow::bail!("division by zero"))
    ///     .to_throw());
    /// ```
    pub fn expect_from<F>(&mut self, label: &str, thunk: F) -> Expectation<'_>
    where
        F: FnOnce() -> anyhow::Result<Value>,
    {
        Expectation::new(self, Some(label.to_string()), thunk())
    }

    /// Register or overwrite a matcher. Redefinition affects subsequent
    /// statements only; already-reported results are untouched.
    pub fn register_matcher(&mut self, name: impl Into<String>, matcher: Matcher) {
        self.matchers.register(name, matcher);
    }

    /// The matcher table.
    pub fn matchers(&self) -> &MatcherSet {
        &self.matchers
    }

    /// Set the process-wide tolerance for approximate-equality matchers.
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance;
    }

    /// The current approximate-equality tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Start (or restart) a named group and make it active.
    ///
    /// Restarting an existing group resets its counters to zero. The default
    /// aggregate is never reset by starting another group; naming it here is
    /// equivalent to [`TestRun::reset`] and prints the reset banner.
    pub fn start_group(&mut self, name: &str) {
        if name == DEFAULT_GROUP {
            self.reset();
            return;
        }
        self.groups.insert(name.to_string(), GroupStats::default());
        self.active = name.to_string();
        self.reporter.group_started(Some(name));
    }

    /// Print a summary for `name` and reset the active group to the default
    /// aggregate. Ending a group that never started reports zeros; naming
    /// the default aggregate is equivalent to [`TestRun::finish`].
    pub fn end_group(&mut self, name: &str) {
        if name == DEFAULT_GROUP {
            self.finish();
            return;
        }
        self.active = DEFAULT_GROUP.to_string();
        let stats = self.groups.get(name).copied().unwrap_or_default();
        self.reporter.group_finished(Some(name), stats);
    }

    /// Reset the default aggregate to zero and make it active. This is the
    /// whole-run counter reset.
    pub fn reset(&mut self) {
        self.groups
            .insert(DEFAULT_GROUP.to_string(), GroupStats::default());
        self.active = DEFAULT_GROUP.to_string();
        self.reporter.group_started(None);
    }

    /// Print the final whole-run summary from the default aggregate.
    pub fn finish(&mut self) {
        self.active = DEFAULT_GROUP.to_string();
        let stats = self.totals();
        self.reporter.group_finished(None, stats);
    }

    /// Counters for a named group, if it ever started.
    pub fn stats(&self, name: &str) -> Option<GroupStats> {
        self.groups.get(name).copied()
    }

    /// The whole-run aggregate counters.
    pub fn totals(&self) -> GroupStats {
        self.groups.get(DEFAULT_GROUP).copied().unwrap_or_default()
    }

    /// Settle one outcome: apply negation, bump counters for the active
    /// group and the default aggregate, emit the report line, and hand the
    /// final result back to the caller.
    pub(crate) fn report(&mut self, raw: bool, mut verdict: Verdict) -> bool {
        let passed = if verdict.negated { !raw } else { raw };
        verdict.passed = passed;
        self.record(passed);
        self.reporter.verdict(&verdict);
        passed
    }

    fn record(&mut self, passed: bool) {
        let entry = self.groups.entry(self.active.clone()).or_default();
        entry.tested += 1;
        if passed {
            entry.passed += 1;
        }
        if self.active != DEFAULT_GROUP {
            let aggregate = self
                .groups
                .entry(DEFAULT_GROUP.to_string())
                .or_default();
            aggregate.tested += 1;
            if passed {
                aggregate.passed += 1;
            }
        }
    }
}

impl Default for TestRun {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_group_always_present() {
        let run = TestRun::silent();
        assert_eq!(run.totals(), GroupStats::default());
    }

    #[test]
    fn test_counts_go_to_active_and_aggregate() {
        let mut run = TestRun::silent();
        run.start_group("math");
        run.expect(1).to_be(1);
        run.expect(1).to_be(2);
        run.end_group("math");

        let math = run.stats("math").unwrap();
        assert_eq!(math, GroupStats { tested: 2, passed: 1 });
        assert_eq!(run.totals(), GroupStats { tested: 2, passed: 1 });
    }

    #[test]
    fn test_default_active_counts_once() {
        let mut run = TestRun::silent();
        run.expect(1).to_be(1);
        assert_eq!(run.totals(), GroupStats { tested: 1, passed: 1 });
    }

    #[test]
    fn test_restart_resets_group_but_not_aggregate() {
        let mut run = TestRun::silent();
        run.start_group("g");
        run.expect(1).to_be(1);
        run.end_group("g");

        run.start_group("g");
        assert_eq!(run.stats("g").unwrap(), GroupStats::default());
        assert_eq!(run.totals(), GroupStats { tested: 1, passed: 1 });
    }

    #[test]
    fn test_end_group_restores_default_active() {
        let mut run = TestRun::silent();
        run.start_group("g");
        run.end_group("g");
        run.expect(1).to_be(1);
        // The test after end_group lands only in the aggregate.
        assert_eq!(run.stats("g").unwrap(), GroupStats::default());
        assert_eq!(run.totals(), GroupStats { tested: 1, passed: 1 });
    }

    #[test]
    fn test_end_unknown_group_reports_zeros() {
        let mut run = TestRun::silent();
        run.end_group("never-started");
        assert!(run.stats("never-started").is_none());
    }

    #[test]
    fn test_reset_zeroes_aggregate() {
        let mut run = TestRun::silent();
        run.expect(1).to_be(1);
        run.reset();
        assert_eq!(run.totals(), GroupStats::default());
    }

    #[test]
    fn test_tolerance_is_mutable_process_wide() {
        let mut run = TestRun::silent();
        assert_eq!(run.tolerance(), DEFAULT_TOLERANCE);
        assert!(run.expect(1.0).to_be_close_to(1.0000001));

        run.set_tolerance(1e-9);
        assert!(!run.expect(1.0).to_be_close_to(1.0000001));
    }
}
