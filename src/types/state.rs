use std::collections::HashMap;

use super::fact::FactKey;
use super::value::Value;
use crate::config::QualifierConfig;

/// An outcome identifier associated with a rule at registration.
pub type Outcome = i64;

/// Per-evaluation scratch space.
///
/// Holds the memoized results of rules and conditions by identity, the
/// coerced values of the fact attributes read so far, and the outcome buffer
/// of the current selection. A state is only meaningful for one fact; call
/// [`reset`](Self::reset) before presenting another.
#[derive(Debug, Default)]
pub struct State {
    rules: HashMap<u64, bool>,
    facts: HashMap<FactKey, Option<Value>>,
    pub(crate) results: Vec<Outcome>,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&QualifierConfig::default())
    }

    /// Create a state with its caches pre-sized from `config`.
    #[must_use]
    pub fn with_config(config: &QualifierConfig) -> Self {
        Self {
            rules: HashMap::with_capacity(config.rule_cache_capacity),
            facts: HashMap::with_capacity(config.fact_cache_capacity),
            results: Vec::with_capacity(config.result_capacity),
        }
    }

    /// Empty every cache, keeping the allocated storage.
    pub fn reset(&mut self) {
        self.rules.clear();
        self.facts.clear();
        self.results.clear();
    }

    /// The memoized result of the rule or condition with this identity.
    #[must_use]
    pub fn rule(&self, id: u64) -> Option<bool> {
        self.rules.get(&id).copied()
    }

    pub(crate) fn remember(&mut self, id: u64, result: bool) -> bool {
        self.rules.insert(id, result);
        result
    }

    /// The cached coerced value of an attribute.
    ///
    /// The outer `None` means the attribute was never read; `Some(None)`
    /// means it was read and is absent from the fact.
    #[must_use]
    pub fn fact(&self, key: FactKey) -> Option<Option<&Value>> {
        self.facts.get(&key).map(Option::as_ref)
    }

    pub(crate) fn facts_mut(&mut self) -> &mut HashMap<FactKey, Option<Value>> {
        &mut self.facts
    }

    /// Outcomes matched by the current selection.
    #[must_use]
    pub fn results(&self) -> &[Outcome] {
        &self.results
    }

    /// Number of memoized rule results.
    #[must_use]
    pub fn memoized(&self) -> usize {
        self.rules.len()
    }

    /// Number of cached attribute values.
    #[must_use]
    pub fn cached_facts(&self) -> usize {
        self.facts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.facts.is_empty() && self.results.is_empty()
    }
}
