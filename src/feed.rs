use std::cmp::Ordering;

use crate::types::{Condition, ConditionKind, FactKey, Outcome, Rule, Value};
use crate::FeedError;

/// Validate a flat list of attribute checks and combine them into one
/// conjunction.
pub(crate) fn feed(
    outcome: Outcome,
    checks: Vec<(FactKey, Condition)>,
) -> Result<Rule, FeedError> {
    if checks.is_empty() {
        return Err(FeedError::EmptyDefinition { outcome });
    }
    for (key, condition) in &checks {
        check_condition(outcome, *key, condition)?;
    }

    Ok(Rule::all(
        checks
            .into_iter()
            .map(|(key, condition)| Rule::check(key, condition)),
    ))
}

fn check_condition(outcome: Outcome, key: FactKey, condition: &Condition) -> Result<(), FeedError> {
    match condition.kind() {
        ConditionKind::OneOf(set) | ConditionKind::NoneOf(set) if set.is_empty() => {
            Err(FeedError::EmptyOperands { outcome, key })
        }
        ConditionKind::Equal(Value::Float(v)) if v.is_nan() => {
            Err(FeedError::NanThreshold { outcome, key })
        }
        ConditionKind::Greater(t)
        | ConditionKind::Less(t)
        | ConditionKind::GreaterOrEqual(t)
        | ConditionKind::LessOrEqual(t)
            if t.is_nan() =>
        {
            Err(FeedError::NanThreshold { outcome, key })
        }
        ConditionKind::Between { min, max } => match min.compare(max) {
            None => Err(FeedError::NanThreshold { outcome, key }),
            Some(Ordering::Greater) => Err(FeedError::InvertedRange { outcome, key }),
            Some(_) => Ok(()),
        },
        ConditionKind::Not(inner) => check_condition(outcome, key, inner),
        _ => Ok(()),
    }
}
