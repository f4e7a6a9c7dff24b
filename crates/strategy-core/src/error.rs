//! Error types for the strategy engine.

use thiserror::Error;

/// Errors raised while querying or evaluating a strategy registry.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// The identity is not tracked by the registry it was queried against.
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    /// The registry was asked to track a strategy the catalog does not define.
    #[error("no catalog entry for strategy: {0}")]
    MissingCatalogEntry(String),

    /// A strategy needed its predicate and none was registered.
    #[error("no predicate registered for strategy: {0}")]
    MissingPredicate(String),

    /// A predicate failed; the actor's turn is aborted.
    #[error("predicate for {strategy} failed: {source}")]
    Predicate {
        strategy: String,
        #[source]
        source: PredicateError,
    },
}

/// Failure returned by an activation predicate.
#[derive(Debug, Error)]
pub enum PredicateError {
    #[error("{0}")]
    Failed(String),

    /// A registry query made by the predicate failed.
    #[error(transparent)]
    Strategy(Box<StrategyError>),
}

impl PredicateError {
    pub fn new(message: impl Into<String>) -> Self {
        PredicateError::Failed(message.into())
    }
}

impl From<StrategyError> for PredicateError {
    fn from(error: StrategyError) -> Self {
        PredicateError::Strategy(Box::new(error))
    }
}

/// Invalid strategy catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("strategy {0} has contradictory eligibility flags")]
    ConflictingEligibility(String),

    #[error(
        "strategy {label}: recheck interval {recheck} and minimum adoption {minimum} \
         are both negative but the strategy is not permanent"
    )]
    InvalidInterval {
        label: String,
        recheck: i32,
        minimum: i32,
    },

    #[error("duplicate catalog entry: {0}")]
    Duplicate(String),

    #[error("catalog names an unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_error_wraps_registry_error() {
        let error: PredicateError = StrategyError::UnknownStrategy("at_war".into()).into();
        assert_eq!(error.to_string(), "unknown strategy: at_war");
    }

    #[test]
    fn test_predicate_failure_message() {
        let error = StrategyError::Predicate {
            strategy: "found_city".into(),
            source: PredicateError::new("no settler"),
        };
        assert_eq!(error.to_string(), "predicate for found_city failed: no settler");
    }
}
