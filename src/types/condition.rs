use std::cmp::Ordering;
use std::fmt;
use std::ops::Not;

use super::ints64::Ints64;
use super::value::{Number, Value};
use crate::checksum::{checksum, sign, CRC_64};

#[cfg(test)]
thread_local! {
    /// Number of `Condition::matches` calls on the current thread.
    pub(crate) static MATCH_CALLS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// A leaf predicate over a single coerced fact value.
///
/// Conditions are immutable. Their identity is computed once at construction
/// from the kind and operands, so structurally equal conditions share it.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    id: u64,
    kind: ConditionKind,
}

/// The closed set of condition variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionKind {
    /// Value equals the operand exactly, type included.
    Equal(Value),
    Greater(Number),
    Less(Number),
    GreaterOrEqual(Number),
    LessOrEqual(Number),
    /// Inclusive on both ends.
    Between { min: Number, max: Number },
    /// Value (or any element of a multi-valued value) is in the set.
    OneOf(Ints64),
    /// Value shares no element with the set. Absent values pass.
    NoneOf(Ints64),
    Not(Box<Condition>),
}

impl Condition {
    fn new(kind: ConditionKind) -> Self {
        let id = identity(&kind);
        Self { id, kind }
    }

    #[must_use]
    pub fn equal_to(value: impl Into<Value>) -> Self {
        Self::new(ConditionKind::Equal(value.into()))
    }

    #[must_use]
    pub fn greater_than(threshold: impl Into<Number>) -> Self {
        Self::new(ConditionKind::Greater(threshold.into()))
    }

    #[must_use]
    pub fn less_than(threshold: impl Into<Number>) -> Self {
        Self::new(ConditionKind::Less(threshold.into()))
    }

    #[must_use]
    pub fn greater_or_equal(threshold: impl Into<Number>) -> Self {
        Self::new(ConditionKind::GreaterOrEqual(threshold.into()))
    }

    #[must_use]
    pub fn less_or_equal(threshold: impl Into<Number>) -> Self {
        Self::new(ConditionKind::LessOrEqual(threshold.into()))
    }

    #[must_use]
    pub fn between(min: impl Into<Number>, max: impl Into<Number>) -> Self {
        Self::new(ConditionKind::Between {
            min: min.into(),
            max: max.into(),
        })
    }

    #[must_use]
    pub fn one_of(values: impl Into<Ints64>) -> Self {
        Self::new(ConditionKind::OneOf(values.into()))
    }

    #[must_use]
    pub fn none_of(values: impl Into<Ints64>) -> Self {
        Self::new(ConditionKind::NoneOf(values.into()))
    }

    #[must_use]
    pub fn negate(condition: Condition) -> Self {
        Self::new(ConditionKind::Not(Box::new(condition)))
    }

    /// The content-derived identity.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> &ConditionKind {
        &self.kind
    }

    /// Test a coerced fact value. `None` means the attribute is absent.
    ///
    /// Never fails: values of a type the condition cannot handle do not match,
    /// except for `NoneOf`, which passes them.
    #[must_use]
    pub fn matches(&self, value: Option<&Value>) -> bool {
        #[cfg(test)]
        MATCH_CALLS.with(|calls| calls.set(calls.get() + 1));

        match &self.kind {
            ConditionKind::Equal(expected) => value == Some(expected),
            ConditionKind::Greater(t) => compare(value, t, Ordering::is_gt),
            ConditionKind::Less(t) => compare(value, t, Ordering::is_lt),
            ConditionKind::GreaterOrEqual(t) => compare(value, t, Ordering::is_ge),
            ConditionKind::LessOrEqual(t) => compare(value, t, Ordering::is_le),
            ConditionKind::Between { min, max } => {
                compare(value, min, Ordering::is_ge) && compare(value, max, Ordering::is_le)
            }
            ConditionKind::OneOf(set) => included(set, value),
            ConditionKind::NoneOf(set) => !included(set, value),
            ConditionKind::Not(inner) => !inner.matches(value),
        }
    }
}

fn compare(value: Option<&Value>, threshold: &Number, accept: fn(Ordering) -> bool) -> bool {
    value
        .and_then(Value::as_number)
        .and_then(|n| n.compare(threshold))
        .is_some_and(accept)
}

fn included(set: &Ints64, value: Option<&Value>) -> bool {
    match value {
        Some(Value::Int(v)) => set.exists(*v),
        Some(Value::Ints(vs)) => set.intersects(vs),
        _ => false,
    }
}

fn identity(kind: &ConditionKind) -> u64 {
    match kind {
        ConditionKind::Equal(v) => checksum(sign::EQUAL, [v.factor()]),
        ConditionKind::Greater(t) => checksum(sign::GREATER, [t.factor()]),
        ConditionKind::Less(t) => checksum(sign::LESS, [t.factor()]),
        ConditionKind::GreaterOrEqual(t) => checksum(sign::GREATER_OR_EQUAL, [t.factor()]),
        ConditionKind::LessOrEqual(t) => checksum(sign::LESS_OR_EQUAL, [t.factor()]),
        ConditionKind::Between { min, max } => {
            // bounds are positional, so fold them into one factor
            let mut digest = CRC_64.digest();
            digest.update(&min.factor().to_le_bytes());
            digest.update(&max.factor().to_le_bytes());
            checksum(sign::BETWEEN, [digest.finalize()])
        }
        ConditionKind::OneOf(set) => set.checksum(sign::ONE_OF),
        ConditionKind::NoneOf(set) => set.checksum(sign::NONE_OF),
        ConditionKind::Not(inner) => checksum(sign::NOT, [inner.id()]),
    }
}

impl Not for Condition {
    type Output = Condition;

    fn not(self) -> Condition {
        Condition::negate(self)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConditionKind::Equal(v) => write!(f, "={v}"),
            ConditionKind::Greater(t) => write!(f, ">{t}"),
            ConditionKind::Less(t) => write!(f, "<{t}"),
            ConditionKind::GreaterOrEqual(t) => write!(f, ">={t}"),
            ConditionKind::LessOrEqual(t) => write!(f, "<={t}"),
            ConditionKind::Between { min, max } => write!(f, "[{min}..{max}]"),
            ConditionKind::OneOf(set) => write!(f, "+{set}"),
            ConditionKind::NoneOf(set) => write!(f, "-{set}"),
            ConditionKind::Not(inner) => write!(f, "!{inner}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Value {
        Value::Ints(Ints64::from(values))
    }

    #[test]
    fn one_of_identity() {
        assert_eq!(Condition::one_of([3_i64, 2, 1]).id(), 4_016_361_724_135_366_094);
        assert_eq!(Condition::one_of([2_i64, 3, 1]).id(), 4_016_361_724_135_366_094);
        assert_eq!(Condition::one_of([7_i64, 8, 9]).id(), 11_523_927_376_963_847_877);
    }

    #[test]
    fn none_of_identity() {
        assert_eq!(Condition::none_of([3_i64, 2, 1]).id(), 17_194_010_691_906_675_252);
        assert_eq!(Condition::none_of([2_i64, 3, 1]).id(), 17_194_010_691_906_675_252);
        assert_eq!(Condition::none_of([7_i64, 8, 9]).id(), 5_101_638_233_538_279_743);
    }

    #[test]
    fn negation_identity() {
        let cond = !Condition::one_of([3_i64, 2, 1]);
        assert_eq!(cond.id(), 5_849_970_728_172_636_964);
        assert_ne!(cond.id(), (!Condition::none_of([3_i64, 2, 1])).id());
    }

    #[test]
    fn comparison_identities_are_distinct() {
        let ids = [
            Condition::equal_to(5_i64).id(),
            Condition::greater_than(5_i64).id(),
            Condition::less_than(5_i64).id(),
            Condition::greater_or_equal(5_i64).id(),
            Condition::less_or_equal(5_i64).id(),
            Condition::between(5_i64, 5_i64).id(),
            Condition::greater_than(5.0).id(),
            Condition::equal_to(true).id(),
        ];
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn between_identity_is_positional() {
        assert_ne!(
            Condition::between(1_i64, 5_i64).id(),
            Condition::between(5_i64, 1_i64).id()
        );
        assert_eq!(
            Condition::between(1_i64, 5_i64).id(),
            Condition::between(1_i64, 5_i64).id()
        );
    }

    #[test]
    fn one_of_matches() {
        let cond = Condition::one_of([3_i64, 2, 1]);
        assert!(!cond.matches(None));
        assert!(!cond.matches(Some(&ints(&[]))));
        assert!(cond.matches(Some(&ints(&[1]))));
        assert!(cond.matches(Some(&ints(&[1, 2]))));
        assert!(cond.matches(Some(&ints(&[7, 2]))));
        assert!(!cond.matches(Some(&ints(&[7, 8]))));
        assert!(cond.matches(Some(&Value::Int(2))));
        assert!(!cond.matches(Some(&Value::Int(4))));
        assert!(!cond.matches(Some(&Value::Bool(true))));
        assert!(!cond.matches(Some(&Value::Float(1.0))));
    }

    #[test]
    fn none_of_matches() {
        let cond = Condition::none_of([3_i64, 2, 1]);
        assert!(cond.matches(None));
        assert!(cond.matches(Some(&ints(&[]))));
        assert!(!cond.matches(Some(&ints(&[1]))));
        assert!(!cond.matches(Some(&ints(&[1, 2]))));
        assert!(!cond.matches(Some(&ints(&[7, 2]))));
        assert!(cond.matches(Some(&ints(&[7, 8]))));
        assert!(!cond.matches(Some(&Value::Int(3))));
        assert!(cond.matches(Some(&Value::Int(4))));
        assert!(cond.matches(Some(&Value::Bool(true))));
    }

    #[test]
    fn negation_matches() {
        let cond = !Condition::one_of([3_i64, 2, 1]);
        assert!(cond.matches(None));
        assert!(cond.matches(Some(&ints(&[]))));
        assert!(!cond.matches(Some(&ints(&[1]))));
        assert!(!cond.matches(Some(&ints(&[5, 2]))));
        assert!(cond.matches(Some(&ints(&[7, 8]))));
    }

    #[test]
    fn equality_matches() {
        let cond = Condition::equal_to(10_i64);
        assert!(cond.matches(Some(&Value::Int(10))));
        assert!(!cond.matches(Some(&Value::Int(11))));
        assert!(!cond.matches(Some(&Value::Float(10.0))));
        assert!(!cond.matches(None));

        let cond = Condition::equal_to(true);
        assert!(cond.matches(Some(&Value::Bool(true))));
        assert!(!cond.matches(Some(&Value::Bool(false))));
        assert!(!cond.matches(Some(&Value::Int(1))));

        assert!(!Condition::equal_to(f64::NAN).matches(Some(&Value::Float(f64::NAN))));
    }

    #[test]
    fn comparisons_match() {
        let v = Value::Int(10);
        assert!(Condition::greater_than(5_i64).matches(Some(&v)));
        assert!(!Condition::greater_than(10_i64).matches(Some(&v)));
        assert!(Condition::greater_or_equal(10_i64).matches(Some(&v)));
        assert!(!Condition::greater_or_equal(11_i64).matches(Some(&v)));
        assert!(Condition::less_than(20_i64).matches(Some(&v)));
        assert!(!Condition::less_than(10_i64).matches(Some(&v)));
        assert!(Condition::less_or_equal(10_i64).matches(Some(&v)));
        assert!(!Condition::less_or_equal(9_i64).matches(Some(&v)));
    }

    #[test]
    fn comparisons_cross_numeric_types() {
        assert!(Condition::greater_than(9.5).matches(Some(&Value::Int(10))));
        assert!(Condition::less_than(11_i64).matches(Some(&Value::Float(10.5))));
        assert!(!Condition::greater_than(f64::NAN).matches(Some(&Value::Int(10))));
        assert!(!Condition::less_than(1_i64).matches(Some(&Value::Float(f64::NAN))));
    }

    #[test]
    fn comparisons_reject_non_numeric() {
        assert!(!Condition::greater_than(0_i64).matches(None));
        assert!(!Condition::greater_than(0_i64).matches(Some(&Value::Bool(true))));
        assert!(!Condition::less_than(100_i64).matches(Some(&ints(&[1]))));
        assert!(!Condition::between(0_i64, 100_i64).matches(Some(&ints(&[1]))));
    }

    #[test]
    fn between_is_inclusive() {
        let cond = Condition::between(1_i64, 5_i64);
        assert!(cond.matches(Some(&Value::Int(1))));
        assert!(cond.matches(Some(&Value::Int(3))));
        assert!(cond.matches(Some(&Value::Int(5))));
        assert!(!cond.matches(Some(&Value::Int(0))));
        assert!(!cond.matches(Some(&Value::Int(6))));
        assert!(cond.matches(Some(&Value::Float(4.999))));
        assert!(!Condition::between(5_i64, 1_i64).matches(Some(&Value::Int(3))));
    }

    #[test]
    fn display() {
        assert_eq!(Condition::one_of([3_i64, 2, 1]).to_string(), "+[1 2 3]");
        assert_eq!(Condition::none_of([3_i64, 2, 1]).to_string(), "-[1 2 3]");
        assert_eq!((!Condition::one_of([3_i64, 2, 1])).to_string(), "!+[1 2 3]");
        assert_eq!(Condition::equal_to(true).to_string(), "=true");
        assert_eq!(Condition::greater_than(3_i64).to_string(), ">3");
        assert_eq!(Condition::less_than(2.5).to_string(), "<2.5");
        assert_eq!(Condition::greater_or_equal(1_i64).to_string(), ">=1");
        assert_eq!(Condition::less_or_equal(1_i64).to_string(), "<=1");
        assert_eq!(Condition::between(1_i64, 9_i64).to_string(), "[1..9]");
    }
}
