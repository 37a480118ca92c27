//! # tinyexpect
//!
//! A minimal expectation engine for ad-hoc test scripts: chainable modifiers,
//! a runtime-extensible matcher registry, elementwise comparison over
//! sequences, per-group pass/fail tallies, and a call-recording wrapper for
//! instrumenting functions.
//!
//! All state is owned by an explicit [`TestRun`] context; nothing is global.
//! Every matcher invocation settles to a plain `bool`, so outcomes compose
//! with ordinary control flow as well as with the emitted report lines.
//!
//! ## Quick Start
//!
//! ```rust
//! use tinyexpect::{seq, TestRun};
//!
//! let mut run = TestRun::new();
//!
//! run.expect(5).to_be(5);
//! run.expect(5).not().to_be(6);
//! run.expect(3.0).to_be_close_to(3.0000001);
//!
//! run.start_group("sequences");
//! run.expect(seq![1, 2, 3]).contents().to_be(seq![1, 2, 3]);
//! run.expect(seq![1, 2, 3]).some().contents().to_be(seq![9, 9, 3]);
//! run.end_group("sequences");
//!
//! run.finish();
//! ```
//!
//! ## Evaluating fallible subjects
//!
//! The subject may be a thunk; an error it raises is captured into the
//! expectation rather than propagated, and `to_throw` asserts on it:
//!
//! ```rust
//! use tinyexpect::TestRun;
//!
//! let mut run = TestRun::silent();
//! run.expect_from("parse(\"oops\")", || {
//!     "oops".parse::<f64>()
//!         .map(Into::into)
//!         .map_err(Into::into)
//! })
//! .to_throw();
//! ```
//!
//! ## Custom matchers
//!
//! ```rust
//! use tinyexpect::{seq, Matcher, TestRun};
//!
//! let mut run = TestRun::silent();
//! run.register_matcher(
//!     "to_be_within",
//!     Matcher::new(|actual, expected, _tol| match expected.as_seq() {
//!         Some([lo, hi]) => {
//!             actual.as_number() > lo.as_number() && actual.as_number() < hi.as_number()
//!         }
//!         _ => false,
//!     }),
//! );
//! run.expect(4).verify("to_be_within", seq![2.5, 5]).unwrap();
//! ```

mod compare;

pub mod error;
pub mod expect;
pub mod output;
pub mod recorder;
pub mod registry;
pub mod run;
pub mod value;

// Core types
pub use error::ExpectError;
pub use expect::Expectation;
pub use run::{GroupStats, TestRun, DEFAULT_GROUP, DEFAULT_TOLERANCE};
pub use value::{Kind, Value};

// Matcher registry
pub use compare::Quantifier;
pub use registry::{names, CompareFn, Matcher, MatcherSet};

// Call recording
pub use recorder::{CallOutcome, CallRecord, Recorder};

// Output formatting
pub use output::{OutputConfig, Reporter};
