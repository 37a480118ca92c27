//! Dynamic value model for expectation subjects and matcher operands.
//!
//! Matchers compare [`Value`]s, not concrete Rust types, so one registry of
//! comparison functions can serve numbers, strings, sequences, and maps
//! without a generic parameter leaking through the whole builder chain.
//! The model deliberately keeps the loose-typed comparison semantics of
//! dynamic test scripts: three grades of equality (strict, coercive, exact),
//! numeric coercion for ordering matchers, and truthiness.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A dynamically typed value under test.
///
/// Only `Seq` counts as an ordered sequence for elementwise comparison;
/// strings and maps are scalars even though they have a length.
///
/// # Example
///
/// ```rust
/// use tinyexpect::{seq, Value};
///
/// let v: Value = 5.into();
/// assert_eq!(v.kind().as_str(), "number");
///
/// let s = seq![1, 2, 3];
/// assert_eq!(s.as_seq().unwrap().len(), 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent / null / undefined.
    Nil,
    Bool(bool),
    Num(f64),
    Str(String),
    Seq(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

/// The kind of a [`Value`], used by the `to_be_an_instance_of` matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Nil,
    Bool,
    Number,
    String,
    Sequence,
    Map,
}

impl Kind {
    /// Canonical lowercase kind name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Nil => "nil",
            Kind::Bool => "bool",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Sequence => "sequence",
            Kind::Map => "map",
        }
    }

    /// Resolve a kind name, accepting common aliases (`array`, `null`,
    /// `object`, ...). Returns `None` for an unrecognized name.
    pub fn from_name(name: &str) -> Option<Kind> {
        match name.to_ascii_lowercase().as_str() {
            "nil" | "null" | "none" => Some(Kind::Nil),
            "bool" | "boolean" => Some(Kind::Bool),
            "number" | "num" | "float" | "int" => Some(Kind::Number),
            "string" | "str" => Some(Kind::String),
            "sequence" | "seq" | "array" | "list" => Some(Kind::Sequence),
            "map" | "object" => Some(Kind::Map),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Bool,
            Value::Num(_) => Kind::Number,
            Value::Str(_) => Kind::String,
            Value::Seq(_) => Kind::Sequence,
            Value::Map(_) => Kind::Map,
        }
    }

    /// The elements of this value if it is an ordered sequence.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Look up an entry of a map value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    /// Boolean coercion: `Nil`, `false`, `0`, `NaN`, and `""` are falsy;
    /// everything else (sequences and maps included, even empty ones) is
    /// truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Num(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Seq(_) | Value::Map(_) => true,
        }
    }

    /// Numeric coercion: booleans become 0/1, strings parse (empty string is
    /// 0), and everything non-coercible becomes NaN. `Nil` is NaN, so
    /// `to_be_nan` holds for an absent value.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Nil => f64::NAN,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Num(n) => *n,
            Value::Str(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            Value::Seq(_) | Value::Map(_) => f64::NAN,
        }
    }

    /// Strict equality: kinds must agree; numbers compare by `f64 ==`
    /// (NaN is unequal to itself, `0` equals `-0`); sequences and maps
    /// compare structurally.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.strict_eq(y))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.strict_eq(vb))
            }
            _ => false,
        }
    }

    /// Coercive equality: same-kind pairs fall back to strict equality;
    /// mixed scalar kinds compare by numeric coercion (`"1"` equals `1`,
    /// `true` equals `1`). `Nil` equals only `Nil`.
    pub fn loose_eq(&self, other: &Value) -> bool {
        if self.kind() == other.kind() {
            return self.strict_eq(other);
        }
        match (self, other) {
            (Value::Nil, _) | (_, Value::Nil) => false,
            (Value::Seq(_), _) | (_, Value::Seq(_)) => false,
            (Value::Map(_), _) | (_, Value::Map(_)) => false,
            _ => self.as_number() == other.as_number(),
        }
    }

    /// Identity equality in the `Object.is` sense: NaN equals NaN, and `0`
    /// is distinct from `-0`. Everything else matches strict equality.
    pub fn exact_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Num(a), Value::Num(b)) => {
                (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
            }
            _ => self.strict_eq(other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Num(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Num(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Num(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Num(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Num(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Num(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Nil,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Num(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Build a [`Value::Seq`] from a comma-separated list of convertible items.
///
/// # Example
///
/// ```rust
/// use tinyexpect::seq;
///
/// let values = seq![1, 2.5, "three"];
/// ```
#[macro_export]
macro_rules! seq {
    ($($item:expr),* $(,)?) => {
        $crate::Value::Seq(vec![$($crate::Value::from($item)),*])
    };
}
