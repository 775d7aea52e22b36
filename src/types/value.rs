use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::fact::FactValue;
use super::ints64::Ints64;
use crate::checksum::CRC_64;

/// Canonical fact value, produced by coercing whatever a [`Fact`](super::Fact)
/// returns. Conditions only ever see these four kinds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    /// A multi-valued integer attribute, e.g. dictionary-encoded domains.
    Ints(Ints64),
}

/// A numeric threshold for comparison conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Value {
    /// The numeric view of this value, if it has one.
    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Int(v) => Some(Number::Int(*v)),
            Value::Float(v) => Some(Number::Float(*v)),
            Value::Bool(_) | Value::Ints(_) => None,
        }
    }

    /// Borrow this value in its raw fact form.
    #[must_use]
    pub fn as_fact_value(&self) -> FactValue<'_> {
        match self {
            Value::Bool(v) => FactValue::Bool(*v),
            Value::Int(v) => FactValue::I64(*v),
            Value::Float(v) => FactValue::F64(*v),
            Value::Ints(v) => FactValue::I64s(v.as_slice()),
        }
    }

    /// A type-tagged digest of this value, used as a single identity factor.
    pub(crate) fn factor(&self) -> u64 {
        let mut digest = CRC_64.digest();
        match self {
            Value::Bool(v) => digest.update(&[b'b', u8::from(*v)]),
            Value::Int(v) => {
                digest.update(b"i");
                digest.update(&v.to_le_bytes());
            }
            Value::Float(v) => {
                digest.update(b"f");
                digest.update(&v.to_bits().to_le_bytes());
            }
            Value::Ints(vs) => {
                digest.update(b"s");
                for v in vs.iter() {
                    digest.update(&v.to_le_bytes());
                }
            }
        }
        digest.finalize()
    }
}

impl Number {
    /// Compare two numbers. Integers compare exactly; any float on either side
    /// moves the comparison to `f64`. Returns `None` when a NaN is involved.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compare(&self, other: &Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(b)),
            (Number::Float(a), Number::Float(b)) => a.partial_cmp(b),
            (Number::Int(a), Number::Float(b)) => (*a as f64).partial_cmp(b),
            (Number::Float(a), Number::Int(b)) => a.partial_cmp(&(*b as f64)),
        }
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        matches!(self, Number::Float(v) if v.is_nan())
    }

    pub(crate) fn factor(self) -> u64 {
        Value::from(self).factor()
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(v) => Value::Int(v),
            Number::Float(v) => Value::Float(v),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Ints64> for Value {
    fn from(v: Ints64) -> Self {
        Value::Ints(v)
    }
}

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        Value::Ints(v.into())
    }
}

impl<const N: usize> From<[i64; N]> for Value {
    fn from(v: [i64; N]) -> Self {
        Value::Ints(v.into())
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Number::Int(v)
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Number::Int(v.into())
    }
}

impl From<u32> for Number {
    fn from(v: u32) -> Self {
        Number::Int(v.into())
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Float(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Ints(v) => write!(f, "{v}"),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{v}"),
            Number::Float(v) => write!(f, "{v}"),
        }
    }
}
