use std::fmt;

use tracing::debug;

use super::condition::Condition;
use super::fact::{Fact, FactKey};
use super::rule::Rule;
use super::state::Outcome;
use crate::config::QualifierConfig;
use crate::error::FeedError;
use crate::pool::StatePool;

/// A registered rule and the outcome it qualifies for.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    rule: Rule,
    outcome: Outcome,
}

impl Target {
    #[must_use]
    pub fn new(rule: Rule, outcome: Outcome) -> Self {
        Self { rule, outcome }
    }

    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }
}

/// A registry of targets, and the entry point for selecting the outcomes a
/// fact qualifies for.
///
/// Build the registry once with [`resolve`](Self::resolve) or
/// [`feed`](Self::feed), then share it (typically behind `Arc`) and call
/// [`select`](Self::select) from any number of threads. Each call borrows a
/// pooled [`State`](super::State), so structurally identical checks shared by
/// many targets are evaluated once per fact.
///
/// # Example
///
/// ```
/// use qfy::{Condition, FactKey, MapFact, Qualifier};
///
/// const COUNTRY: FactKey = FactKey::new(1);
/// const BROWSER: FactKey = FactKey::new(2);
///
/// let mut qualifier = Qualifier::new();
/// qualifier.resolve(COUNTRY.must_be(Condition::one_of([1_i64])), 93);
/// qualifier
///     .feed(94, vec![
///         (COUNTRY, Condition::one_of([1_i64])),
///         (BROWSER, Condition::none_of([11_i64])),
///     ])
///     .unwrap();
///
/// let fact = MapFact::new().set(COUNTRY, 1_i64).set(BROWSER, 11_i64);
/// assert_eq!(qualifier.select(&fact), vec![93]);
/// ```
#[derive(Debug)]
pub struct Qualifier {
    targets: Vec<Target>,
    pool: StatePool,
    config: QualifierConfig,
}

impl Qualifier {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(QualifierConfig::default())
    }

    #[must_use]
    pub fn with_config(config: QualifierConfig) -> Self {
        Self {
            targets: Vec::new(),
            pool: StatePool::new(config),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &QualifierConfig {
        &self.config
    }

    /// Register `rule` under `outcome`.
    ///
    /// Targets are evaluated in registration order. Registering the same
    /// outcome twice yields it twice when both rules match.
    pub fn resolve(&mut self, rule: Rule, outcome: Outcome) {
        debug!(
            event = "resolve",
            outcome,
            rule = rule.id(),
            targets = self.targets.len() + 1,
        );
        self.targets.push(Target::new(rule, outcome));
    }

    /// Register `outcome` for facts passing every one of `checks`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] if there are no checks or one of them can never
    /// be satisfied. Nothing is registered in that case.
    pub fn feed(
        &mut self,
        outcome: Outcome,
        checks: Vec<(FactKey, Condition)>,
    ) -> Result<(), FeedError> {
        let rule = crate::feed::feed(outcome, checks).map_err(|err| {
            debug!(event = "feed_rejected", outcome, error = %err);
            err
        })?;
        self.resolve(rule, outcome);
        Ok(())
    }

    /// The outcomes whose rules match `fact`, in registration order.
    #[must_use]
    pub fn select(&self, fact: &dyn Fact) -> Vec<Outcome> {
        let mut state = self.pool.acquire();
        crate::evaluate::select(&self.targets, fact, &mut state);
        state.results().to_vec()
    }

    /// Like [`select`](Self::select), yielding nothing for a missing fact.
    #[must_use]
    pub fn select_opt(&self, fact: Option<&dyn Fact>) -> Vec<Outcome> {
        match fact {
            Some(fact) => self.select(fact),
            None => Vec::new(),
        }
    }

    /// Registered targets, in registration order.
    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl Default for Qualifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Qualifier({} targets)", self.targets.len())
    }
}
