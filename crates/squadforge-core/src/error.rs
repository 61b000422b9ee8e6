//! Error types for SquadForge input validation

use thiserror::Error;

/// Rejection of malformed candidates or constraint parameters.
///
/// Raised before any search starts; a solve is never attempted on input
/// that fails validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Candidate at the given pool position has an empty identifier
    #[error("candidate #{index} has an empty identifier")]
    EmptyId { index: usize },

    /// Two candidates share an identifier
    #[error("duplicate candidate identifier '{0}'")]
    DuplicateId(String),

    /// A numeric candidate field is negative
    #[error("candidate '{id}': {field} must be non-negative, got {value}")]
    Negative {
        id: String,
        field: &'static str,
        value: f64,
    },

    /// A numeric candidate field is NaN or infinite
    #[error("candidate '{id}': {field} must be finite")]
    NonFinite { id: String, field: &'static str },

    /// The budget cap is negative or not finite
    #[error("budget cap must be a finite non-negative amount, got {0}")]
    InvalidBudget(f64),

    /// The scoring policy produced a negative impact
    #[error("candidate '{id}': impact must be non-negative, got {impact}")]
    NegativeImpact { id: String, impact: f64 },

    /// A role label could not be recognized
    #[error("unknown role '{0}'")]
    UnknownRole(String),
}

/// Result type alias for validation
pub type Result<T> = std::result::Result<T, ValidationError>;
