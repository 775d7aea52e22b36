use std::collections::hash_map::Entry;

use crate::types::{Condition, Fact, FactKey, Rule, RuleKind, State, Target};

/// Evaluate every target in registration order, appending the outcomes of the
/// matching ones to `state.results`.
pub(crate) fn select(targets: &[Target], fact: &dyn Fact, state: &mut State) {
    for target in targets {
        if perform(target.rule(), fact, state) {
            state.results.push(target.outcome());
        }
    }
}

pub(crate) fn perform(rule: &Rule, fact: &dyn Fact, state: &mut State) -> bool {
    if let Some(result) = state.rule(rule.id()) {
        return result;
    }

    let result = match rule.kind() {
        RuleKind::Check { key, condition } => check(*key, condition, fact, state),
        RuleKind::All(rules) => perform_all(rules, fact, state),
        RuleKind::Any(rules) => perform_any(rules, fact, state),
    };
    state.remember(rule.id(), result)
}

fn check(key: FactKey, condition: &Condition, fact: &dyn Fact, state: &mut State) -> bool {
    let value = match state.facts_mut().entry(key) {
        Entry::Occupied(entry) => entry.into_mut(),
        Entry::Vacant(entry) => match fact.get_qualifiable(key) {
            None => entry.insert(None),
            Some(raw) => match raw.coerce() {
                Some(value) => entry.insert(Some(value)),
                // unsupported type: the check fails whatever the condition
                None => return false,
            },
        },
    };
    condition.matches(value.as_ref())
}

fn perform_all(rules: &[Rule], fact: &dyn Fact, state: &mut State) -> bool {
    if rules.is_empty() {
        return false;
    }
    if rules.iter().any(|rule| state.rule(rule.id()) == Some(false)) {
        return false;
    }
    rules.iter().all(|rule| perform(rule, fact, state))
}

fn perform_any(rules: &[Rule], fact: &dyn Fact, state: &mut State) -> bool {
    if rules.is_empty() {
        return false;
    }
    if rules.iter().any(|rule| state.rule(rule.id()) == Some(true)) {
        return true;
    }
    rules.iter().any(|rule| perform(rule, fact, state))
}
