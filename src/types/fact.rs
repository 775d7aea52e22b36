use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::ints64::Ints64;
use super::rule::Rule;
use super::value::Value;

/// Identifies a fact attribute. Stable for the lifetime of a qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FactKey(pub u16);

impl FactKey {
    #[must_use]
    pub const fn new(key: u16) -> Self {
        Self(key)
    }

    /// Sugar for [`Rule::check`].
    ///
    /// ```
    /// use qfy::{Condition, FactKey, Rule};
    ///
    /// const COUNTRY: FactKey = FactKey::new(1);
    /// const BROWSER: FactKey = FactKey::new(2);
    ///
    /// let rule = Rule::all([
    ///     COUNTRY.must_be(Condition::one_of([1_i64, 2, 3])),
    ///     BROWSER.must_be(Condition::none_of([6_i64, 5, 4])),
    /// ]);
    /// assert_eq!(rule.to_string(), "( #1 +[1 2 3] AND #2 -[4 5 6] )");
    /// ```
    #[must_use]
    pub fn must_be(self, condition: Condition) -> Rule {
        Rule::check(self, condition)
    }
}

impl From<u16> for FactKey {
    fn from(key: u16) -> Self {
        Self(key)
    }
}

impl fmt::Display for FactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An input record presented to a [`Qualifier`](super::Qualifier), e.g. one
/// bid request.
///
/// Returning `None` means the attribute is absent. Facts are only ever read.
pub trait Fact {
    fn get_qualifiable(&self, key: FactKey) -> Option<FactValue<'_>>;
}

impl<F: Fact + ?Sized> Fact for &F {
    fn get_qualifiable(&self, key: FactKey) -> Option<FactValue<'_>> {
        (**self).get_qualifiable(key)
    }
}

/// The raw, dynamically typed value of a fact attribute.
///
/// Every integer width and every integer slice width is accepted and coerced
/// into a [`Value`]. `Str` and `Floats` are representable but unsupported:
/// checks over them evaluate to `false`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FactValue<'a> {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    I8s(&'a [i8]),
    I16s(&'a [i16]),
    I32s(&'a [i32]),
    I64s(&'a [i64]),
    Isizes(&'a [isize]),
    U8s(&'a [u8]),
    U16s(&'a [u16]),
    U32s(&'a [u32]),
    U64s(&'a [u64]),
    Usizes(&'a [usize]),
    Str(&'a str),
    Floats(&'a [f64]),
}

impl FactValue<'_> {
    /// Coerce into one of the four canonical kinds.
    ///
    /// Returns `None` for unsupported types. Unsigned values above
    /// `i64::MAX` wrap around.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn coerce(self) -> Option<Value> {
        let value = match self {
            FactValue::Bool(v) => Value::Bool(v),
            FactValue::I8(v) => Value::Int(v.into()),
            FactValue::I16(v) => Value::Int(v.into()),
            FactValue::I32(v) => Value::Int(v.into()),
            FactValue::I64(v) => Value::Int(v),
            FactValue::Isize(v) => Value::Int(v as i64),
            FactValue::U8(v) => Value::Int(v.into()),
            FactValue::U16(v) => Value::Int(v.into()),
            FactValue::U32(v) => Value::Int(v.into()),
            FactValue::U64(v) => Value::Int(v as i64),
            FactValue::Usize(v) => Value::Int(v as i64),
            FactValue::F32(v) => Value::Float(v.into()),
            FactValue::F64(v) => Value::Float(v),
            FactValue::I8s(vs) => Value::Ints(widen(vs, i64::from)),
            FactValue::I16s(vs) => Value::Ints(widen(vs, i64::from)),
            FactValue::I32s(vs) => Value::Ints(widen(vs, i64::from)),
            FactValue::I64s(vs) => Value::Ints(Ints64::from(vs)),
            FactValue::Isizes(vs) => Value::Ints(widen(vs, |v| v as i64)),
            FactValue::U8s(vs) => Value::Ints(widen(vs, i64::from)),
            FactValue::U16s(vs) => Value::Ints(widen(vs, i64::from)),
            FactValue::U32s(vs) => Value::Ints(widen(vs, i64::from)),
            FactValue::U64s(vs) => Value::Ints(widen(vs, |v| v as i64)),
            FactValue::Usizes(vs) => Value::Ints(widen(vs, |v| v as i64)),
            FactValue::Str(_) | FactValue::Floats(_) => return None,
        };
        Some(value)
    }
}

fn widen<T: Copy>(values: &[T], f: impl Fn(T) -> i64) -> Ints64 {
    values.iter().map(|&v| f(v)).collect()
}

macro_rules! fact_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for FactValue<'_> {
                fn from(v: $ty) -> Self {
                    FactValue::$variant(v)
                }
            }
        )*
    };
}

macro_rules! fact_value_from_slice {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a [$ty]> for FactValue<'a> {
                fn from(v: &'a [$ty]) -> Self {
                    FactValue::$variant(v)
                }
            }
        )*
    };
}

fact_value_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

fact_value_from_slice! {
    i8 => I8s,
    i16 => I16s,
    i32 => I32s,
    i64 => I64s,
    isize => Isizes,
    u8 => U8s,
    u16 => U16s,
    u32 => U32s,
    u64 => U64s,
    usize => Usizes,
    f64 => Floats,
}

impl<'a> From<&'a str> for FactValue<'a> {
    fn from(v: &'a str) -> Self {
        FactValue::Str(v)
    }
}

/// A simple owned fact backed by a map of canonical values.
///
/// ```
/// use qfy::{Fact, FactKey, MapFact, Value};
///
/// let fact = MapFact::new()
///     .set(FactKey(1), 7_i64)
///     .set(FactKey(2), vec![3_i64, 1]);
/// assert_eq!(fact.get(FactKey(2)), Some(&Value::from(vec![1_i64, 3])));
/// assert!(fact.get_qualifiable(FactKey(9)).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapFact {
    values: HashMap<FactKey, Value>,
}

impl MapFact {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute value, consuming and returning the fact.
    #[must_use]
    pub fn set(mut self, key: impl Into<FactKey>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set an attribute value (mutable reference version).
    pub fn insert(&mut self, key: impl Into<FactKey>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: FactKey) -> Option<&Value> {
        self.values.get(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Fact for MapFact {
    fn get_qualifiable(&self, key: FactKey) -> Option<FactValue<'_>> {
        self.values.get(&key).map(Value::as_fact_value)
    }
}
