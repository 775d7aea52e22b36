#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sizing knobs for a [`Qualifier`](crate::Qualifier) and its pooled states.
///
/// ```
/// use qfy::QualifierConfig;
///
/// let config = QualifierConfig::default()
///     .with_rule_cache_capacity(1_000)
///     .with_max_pooled_states(8);
/// assert_eq!(config.rule_cache_capacity, 1_000);
/// assert_eq!(config.fact_cache_capacity, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct QualifierConfig {
    /// Initial capacity of the rule-result memo in each state.
    pub rule_cache_capacity: usize,
    /// Initial capacity of the coerced fact value cache in each state.
    pub fact_cache_capacity: usize,
    /// Initial capacity of the matched outcome buffer in each state.
    pub result_capacity: usize,
    /// Upper bound on idle states kept by the pool.
    pub max_pooled_states: usize,
}

impl Default for QualifierConfig {
    fn default() -> Self {
        Self {
            rule_cache_capacity: 100,
            fact_cache_capacity: 20,
            result_capacity: 16,
            max_pooled_states: 64,
        }
    }
}

impl QualifierConfig {
    #[must_use]
    pub fn with_rule_cache_capacity(mut self, capacity: usize) -> Self {
        self.rule_cache_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_fact_cache_capacity(mut self, capacity: usize) -> Self {
        self.fact_cache_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_result_capacity(mut self, capacity: usize) -> Self {
        self.result_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_max_pooled_states(mut self, max: usize) -> Self {
        self.max_pooled_states = max;
        self
    }
}
