//! Report-line formatting and the output sink.
//!
//! The engine never depends on the exact bytes of a report line, only on
//! ordering: one line per test outcome, emitted synchronously in test order,
//! plus group start/end banners. Formatting details (colors, badges) live
//! here and are configurable.

mod config;
mod formatter;

pub use config::OutputConfig;
pub use formatter::Reporter;

pub(crate) use formatter::Verdict;
