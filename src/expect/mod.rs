//! Fluent expectation builder: modifier chains and matcher dispatch.
//!
//! An [`Expectation`] wraps one actual-value evaluation plus its modifier
//! chain, pending exactly one matcher invocation. Modifiers (`not`,
//! `contents`, `some`, `all`) are chainable, commute, and are idempotent;
//! each matcher method settles the expectation and returns the final
//! boolean, after counters are bumped and the report line is emitted.
//!
//! # Example
//!
//! ```rust
//! use tinyexpect::{seq, TestRun};
//!
//! let mut run = TestRun::silent();
//! assert!(run.expect(5).to_be(5));
//! assert!(run.expect(seq![1, 2, 3]).some().contents().to_be(seq![9, 9, 3]));
//! ```

mod builder;

pub use builder::Expectation;
