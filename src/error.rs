use thiserror::Error;

use crate::types::{FactKey, Outcome};

/// Rejected target definition, returned by [`Qualifier::feed()`](crate::Qualifier::feed).
///
/// Evaluation itself never fails; these are caught while building the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("outcome {outcome} has no attribute checks")]
    EmptyDefinition { outcome: Outcome },

    #[error("outcome {outcome}: empty operand set for {key}")]
    EmptyOperands { outcome: Outcome, key: FactKey },

    #[error("outcome {outcome}: inverted range for {key}")]
    InvertedRange { outcome: Outcome, key: FactKey },

    #[error("outcome {outcome}: NaN threshold for {key}")]
    NanThreshold { outcome: Outcome, key: FactKey },
}

impl FeedError {
    /// The outcome whose definition was rejected.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        match self {
            FeedError::EmptyDefinition { outcome }
            | FeedError::EmptyOperands { outcome, .. }
            | FeedError::InvertedRange { outcome, .. }
            | FeedError::NanThreshold { outcome, .. } => *outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_definition_message() {
        let err = FeedError::EmptyDefinition { outcome: 91 };
        assert_eq!(err.to_string(), "outcome 91 has no attribute checks");
    }

    #[test]
    fn empty_operands_message() {
        let err = FeedError::EmptyOperands {
            outcome: 92,
            key: FactKey(3),
        };
        assert_eq!(err.to_string(), "outcome 92: empty operand set for #3");
    }

    #[test]
    fn inverted_range_message() {
        let err = FeedError::InvertedRange {
            outcome: -1,
            key: FactKey(0),
        };
        assert_eq!(err.to_string(), "outcome -1: inverted range for #0");
    }

    #[test]
    fn nan_threshold_message() {
        let err = FeedError::NanThreshold {
            outcome: 7,
            key: FactKey(2),
        };
        assert_eq!(err.to_string(), "outcome 7: NaN threshold for #2");
        assert_eq!(err.outcome(), 7);
    }
}
