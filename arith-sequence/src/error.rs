//! Explainer errors

use arith_core::ArithError;
use thiserror::Error;

/// Failure while generating or explaining a sequence.
///
/// Returned unchanged to the caller. Counts are never clamped and
/// arithmetic never wraps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplainError {
    /// A parameter is outside what the closed form accepts
    /// (a term count below one, a non-finite float).
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The value of a term does not fit the chosen numeric type.
    #[error("term {index} overflows the numeric type")]
    Overflow { index: usize },
}

impl ExplainError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }
}

impl From<ExplainError> for ArithError {
    fn from(err: ExplainError) -> Self {
        match err {
            ExplainError::InvalidParameter { name: "term_count", reason } => {
                ArithError::invalid_parameter("term_count", reason)
                    .with_suggestion("Use a term count of at least 1")
            }
            ExplainError::InvalidParameter { name, reason } => ArithError::invalid_parameter(name, reason),
            ExplainError::Overflow { index } => {
                ArithError::overflow(format!("term {} does not fit the numeric type", index))
            }
        }
    }
}
