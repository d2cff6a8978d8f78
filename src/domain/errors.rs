use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Invalid company handle: {0}")]
    InvalidHandle(String),

    #[error("Equity must be between 0 and 1, got {0}")]
    EquityOutOfRange(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field cannot be changed: {0}")]
    ImmutableField(String),
}

impl DomainError {
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
