//! Input-shape errors.
//!
//! Only malformed input is an error. A bounded search that ends before
//! reaching the requested count is a normal outcome, reported through
//! [`crate::SearchOutcome::Exhausted`].

/// Errors raised at the boundary of a generation call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("divisor set is empty")]
    EmptyDivisorSet,

    #[error("invalid divisor {value} at position {position}: {reason}")]
    InvalidDivisor {
        position: usize,
        value: String,
        reason: &'static str,
    },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl Error {
    /// Shorthand for [`Error::InvalidParameter`].
    pub fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
