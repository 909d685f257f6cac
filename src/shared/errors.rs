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

    /// Reserved for the persistence layer; the discovery core never raises it.
    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    pub fn restaurant_not_found(id: impl ToString) -> Self {
        DomainError::NotFound {
            entity: "Restaurant",
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_key() {
        let err = DomainError::restaurant_not_found("abc");
        assert_eq!(err.to_string(), "Not found: Restaurant with id=abc");
        assert!(err.is_not_found());
    }

    #[test]
    fn validation_message() {
        let err = DomainError::validation("day_of_week must be in 0..=6");
        assert_eq!(err.to_string(), "Validation: day_of_week must be in 0..=6");
        assert!(!err.is_not_found());
    }
}
