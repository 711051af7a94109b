use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            // DB errors mapped from repositories contain "Database error:" prefix
            DomainError::Validation(msg) => msg.starts_with("Database error:"),
            _ => false,
        }
    }
}
