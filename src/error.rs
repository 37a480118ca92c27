//! Error type for the expectation engine.

/// Errors raised by the engine itself, as opposed to failures of the value
/// under test. A subject thunk that errors is captured into the expectation
/// (see [`TestRun::expect_from`](crate::TestRun::expect_from)), and an
/// elementwise length mismatch is a deterministic FAIL, so neither appears
/// here.
#[derive(Debug, thiserror::Error)]
pub enum ExpectError {
    /// A matcher name was invoked that is not in the registry. This is a
    /// programmer error; counters are left untouched when it surfaces.
    #[error("unknown matcher '{0}'")]
    UnknownMatcher(String),
}
