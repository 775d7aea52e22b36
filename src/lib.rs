//! Rule qualification: find which of many registered targets a fact
//! qualifies for.
//!
//! Targets are boolean [`Rule`]s over fact attributes, built from
//! [`Condition`]s. Every condition and rule carries a content-derived CRC-64
//! identity, so checks shared by many targets are evaluated once per fact.

mod checksum;
mod config;
mod error;
mod evaluate;
mod feed;
mod pool;
mod types;

pub use checksum::{checksum, Checksum};
pub use config::QualifierConfig;
pub use error::FeedError;
pub use types::{
    Condition, ConditionKind, Fact, FactKey, FactValue, Ints64, MapFact, Number, Outcome,
    Qualifier, Rule, RuleKind, State, Target, Value,
};
