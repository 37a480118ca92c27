//! Call-recording wrapper for instrumenting callables.
//!
//! A [`Recorder`] wraps a fallible function and logs every invocation:
//! arguments, outcome (return, throw, or constructed instance), and any
//! instances built. A wrapped function that errors has the error recorded
//! and swallowed rather than re-raised, so a misbehaving callable never
//! disrupts the calling test; the record is there for post-hoc inspection.

use crate::value::Value;
use serde::Serialize;

/// The signature a recorder wraps: arguments in, value or error out.
pub type RecordedFn = Box<dyn FnMut(&[Value]) -> anyhow::Result<Value>>;

/// One invocation outcome.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CallOutcome {
    /// The wrapped function returned normally.
    Return(Value),
    /// The wrapped function errored; the error text is kept, the error is
    /// swallowed.
    Throw(String),
    /// The wrapped function was invoked in constructor mode and produced an
    /// instance.
    Instance(Value),
}

/// Append-only log of everything a wrapped callable was asked to do.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CallRecord {
    /// Argument lists, one entry per invocation, in call order.
    pub calls: Vec<Vec<Value>>,
    /// Outcomes, index-aligned with `calls`.
    pub results: Vec<CallOutcome>,
    /// Instances produced by constructor-mode invocations only.
    pub instances: Vec<Value>,
}

impl CallRecord {
    /// Total invocations, plain calls and constructions combined.
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }
}

/// Wraps a callable and records every invocation.
///
/// Constructor-style invocation is an explicit entry point
/// ([`Recorder::construct`]) rather than introspection on the call site.
///
/// # Example
///
/// ```rust
/// use tinyexpect::{Recorder, Value};
///
/// let mut doubler = Recorder::wrap(|args: &[Value]| {
///     Ok(Value::Num(args[0].as_number() * 2.0))
/// });
///
/// let out = doubler.call(&[21.into()]);
/// assert!(out.strict_eq(&42.into()));
/// assert_eq!(doubler.record().call_count(), 1);
/// ```
pub struct Recorder {
    inner: RecordedFn,
    record: CallRecord,
}

impl Recorder {
    /// Wrap a callable.
    pub fn wrap<F>(f: F) -> Self
    where
        F: FnMut(&[Value]) -> anyhow::Result<Value> + 'static,
    {
        Self {
            inner: Box::new(f),
            record: CallRecord::default(),
        }
    }

    /// A recorder around a no-op, used purely to count and capture calls
    /// (e.g. as a spy handed to an iteration callback).
    pub fn spy() -> Self {
        Self::wrap(|_| Ok(Value::Nil))
    }

    /// Invoke in plain-call mode. The return value is recorded and passed
    /// through; an error is recorded, swallowed, and `Nil` is returned.
    pub fn call(&mut self, args: &[Value]) -> Value {
        self.record.calls.push(args.to_vec());
        match (self.inner)(args) {
            Ok(value) => {
                self.record.results.push(CallOutcome::Return(value.clone()));
                value
            }
            Err(err) => {
                self.record.results.push(CallOutcome::Throw(err.to_string()));
                Value::Nil
            }
        }
    }

    /// Invoke in constructor mode. The produced value is recorded as an
    /// instance (in both `results` and `instances`) and returned; errors
    /// behave as in [`Recorder::call`].
    pub fn construct(&mut self, args: &[Value]) -> Value {
        self.record.calls.push(args.to_vec());
        match (self.inner)(args) {
            Ok(instance) => {
                self.record
                    .results
                    .push(CallOutcome::Instance(instance.clone()));
                self.record.instances.push(instance.clone());
                instance
            }
            Err(err) => {
                self.record.results.push(CallOutcome::Throw(err.to_string()));
                Value::Nil
            }
        }
    }

    /// The append-only invocation log.
    pub fn record(&self) -> &CallRecord {
        &self.record
    }
}

impl std::fmt::Debug for Recorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recorder")
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq;

    #[test]
    fn test_spy_counts_calls() {
        let mut spy = Recorder::spy();
        for i in 0..4 {
            spy.call(&[Value::from(i)]);
        }
        assert_eq!(spy.record().call_count(), 4);
        assert!(spy.record().instances.is_empty());
        assert!(spy.record().calls[2][0].strict_eq(&2.into()));
    }

    #[test]
    fn test_return_values_pass_through() {
        let mut add = Recorder::wrap(|args: &[Value]| {
            Ok(Value::Num(args[0].as_number() + args[1].as_number()))
        });
        let out = add.call(&[1.into(), 2.into()]);
        assert!(out.strict_eq(&3.into()));
        assert!(matches!(&add.record().results[0], CallOutcome::Return(v) if v.strict_eq(&3.into())));
    }

    #[test]
    fn test_errors_are_swallowed_and_recorded() {
        let mut touchy = Recorder::wrap(|args: &[Value]| {
            if args[0].strict_eq(&2.into()) {
                anyhow::bail!("I don't like 2!");
            }
            Ok(args[0].clone())
        });

        let outs: Vec<Value> = (1..=3).map(|i| touchy.call(&[i.into()])).collect();
        assert!(outs[0].strict_eq(&1.into()));
        assert!(outs[1].strict_eq(&Value::Nil));
        assert!(outs[2].strict_eq(&3.into()));

        let record = touchy.record();
        assert_eq!(record.results.len(), 3);
        assert!(matches!(&record.results[0], CallOutcome::Return(_)));
        assert!(matches!(&record.results[1], CallOutcome::Throw(msg) if msg.contains("2")));
        assert!(matches!(&record.results[2], CallOutcome::Return(_)));
    }

    #[test]
    fn test_construct_records_instances() {
        let mut maker = Recorder::wrap(|args: &[Value]| Ok(seq!["instance", args[0].clone()]));

        maker.call(&[1.into()]);
        let x = maker.construct(&[2.into()]);
        let y = maker.construct(&[3.into()]);

        let record = maker.record();
        assert_eq!(record.call_count(), 3);
        assert_eq!(record.instances.len(), 2);
        assert!(record.instances[0].strict_eq(&x));
        assert!(record.instances[1].strict_eq(&y));
        assert!(matches!(&record.results[0], CallOutcome::Return(_)));
        assert!(matches!(&record.results[1], CallOutcome::Instance(_)));
    }

    #[test]
    fn test_construct_error_adds_no_instance() {
        let mut broken = Recorder::wrap(|_: &[Value]| anyhow::bail!("no instances today"));
        let out = broken.construct(&[]);
        assert!(out.strict_eq(&Value::Nil));
        assert!(broken.record().instances.is_empty());
        assert!(matches!(&broken.record().results[0], CallOutcome::Throw(_)));
    }

    #[test]
    fn test_record_serializes() {
        let mut spy = Recorder::spy();
        spy.call(&[1.into()]);
        let json = serde_json::to_string(spy.record()).unwrap();
        assert!(json.contains("\"kind\":\"return\""));
    }
}
