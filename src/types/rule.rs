use std::fmt;

use super::condition::Condition;
use super::fact::{Fact, FactKey};
use super::state::State;
use crate::checksum::{checksum, sign, Checksum};

/// A composable boolean expression over fact attributes.
///
/// Rules are immutable and carry an identity derived from their kind and the
/// identities of their parts. Children of [`Rule::all`] and [`Rule::any`] are
/// hashed order-independently, so structurally identical rules share a memo
/// slot during evaluation however they were assembled.
///
/// # Example
///
/// ```
/// use qfy::{Condition, FactKey, MapFact, Rule};
///
/// let us = Rule::check(FactKey(1), Condition::one_of([1_i64]));
/// let not_ie = Rule::check(FactKey(2), Condition::none_of([10_i64]));
/// let rule = us.and(not_ie);
///
/// assert!(rule.evaluate(&MapFact::new().set(FactKey(1), 1_i64)));
/// assert!(!rule.evaluate(&MapFact::new().set(FactKey(1), 1_i64).set(FactKey(2), 10_i64)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    id: u64,
    kind: RuleKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// Apply a condition to a single fact attribute.
    Check { key: FactKey, condition: Condition },
    /// Logical AND. Empty is `false`.
    All(Vec<Rule>),
    /// Logical OR. Empty is `false`.
    Any(Vec<Rule>),
}

impl Rule {
    #[must_use]
    pub fn check(key: FactKey, condition: Condition) -> Self {
        let id = checksum(sign::CHECK, [u64::from(key.0), condition.id()]);
        Self {
            id,
            kind: RuleKind::Check { key, condition },
        }
    }

    #[must_use]
    pub fn all(rules: impl IntoIterator<Item = Rule>) -> Self {
        let rules: Vec<Rule> = rules.into_iter().collect();
        Self {
            id: composite_id(sign::ALL, &rules),
            kind: RuleKind::All(rules),
        }
    }

    #[must_use]
    pub fn any(rules: impl IntoIterator<Item = Rule>) -> Self {
        let rules: Vec<Rule> = rules.into_iter().collect();
        Self {
            id: composite_id(sign::ANY, &rules),
            kind: RuleKind::Any(rules),
        }
    }

    /// Combine two rules with logical AND. Does not flatten nested conjunctions.
    #[must_use]
    pub fn and(self, other: Rule) -> Self {
        Self::all([self, other])
    }

    /// Combine two rules with logical OR. Does not flatten nested disjunctions.
    #[must_use]
    pub fn or(self, other: Rule) -> Self {
        Self::any([self, other])
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Evaluate against `fact`, reading and filling the memo caches of `state`.
    ///
    /// `state` must only ever have seen this same fact since its last reset.
    pub fn perform(&self, fact: &dyn Fact, state: &mut State) -> bool {
        crate::evaluate::perform(self, fact, state)
    }

    /// Evaluate against `fact` with a fresh, throwaway state.
    #[must_use]
    pub fn evaluate(&self, fact: &dyn Fact) -> bool {
        self.perform(fact, &mut State::new())
    }
}

fn composite_id(sign: u8, rules: &[Rule]) -> u64 {
    let mut hash = Checksum::with_capacity(sign, rules.len());
    hash.extend(rules.iter().map(Rule::id));
    hash.sum64()
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rules, op) = match &self.kind {
            RuleKind::Check { key, condition } => return write!(f, "{key} {condition}"),
            RuleKind::All(rules) => (rules, "AND"),
            RuleKind::Any(rules) => (rules, "OR"),
        };
        write!(f, "(")?;
        for (i, rule) in rules.iter().enumerate() {
            if i > 0 {
                write!(f, " {op}")?;
            }
            write!(f, " {rule}")?;
        }
        write!(f, " )")
    }
}
