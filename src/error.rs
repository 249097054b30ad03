// ⚠️ Error Taxonomy
// Every failure a registry operation can report, with the message shown to the librarian

use thiserror::Error;

// ============================================================================
// FIELD VALIDATION
// ============================================================================

/// A patron field failed its format or range rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Patron ID cannot be empty.")]
    EmptyId,

    #[error("Patron ID must be 7 digits.")]
    WrongLength,

    #[error("Patron ID must be only numbers.")]
    NonNumericId,

    #[error("Fine cannot be empty.")]
    EmptyFine,

    #[error("Patron Overdue fine must be in the format of 0.00, you can only use numbers and one decimal point.")]
    NotDecimalFine,

    #[error("Overdue fine must be between 0.00 and 250.00.")]
    FineOutOfRange,
}

// ============================================================================
// REGISTRY OPERATIONS
// ============================================================================

/// Failure of a registry operation
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No Patron found with id {id}")]
    NotFound { id: String },

    #[error("Patron with id {id} already exists.")]
    AlreadyExists { id: String },

    /// Import line did not split into the expected number of fields
    #[error("Invalid data format. Expected 4 columns, found {found}.")]
    ColumnCount { found: usize },

    #[error("Error reading file. Check that the file exists and is readable.")]
    Io(#[source] std::io::Error),
}

impl RegistryError {
    /// The validation failure behind this error, if it is one
    pub fn validation(&self) -> Option<ValidationError> {
        match self {
            RegistryError::Validation(kind) => Some(*kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::EmptyId.to_string(), "Patron ID cannot be empty.");
        assert_eq!(ValidationError::WrongLength.to_string(), "Patron ID must be 7 digits.");
        assert_eq!(
            ValidationError::FineOutOfRange.to_string(),
            "Overdue fine must be between 0.00 and 250.00."
        );
    }

    #[test]
    fn test_registry_error_wraps_validation_transparently() {
        let err = RegistryError::from(ValidationError::NonNumericId);
        assert_eq!(err.to_string(), "Patron ID must be only numbers.");
        assert_eq!(err.validation(), Some(ValidationError::NonNumericId));
    }

    #[test]
    fn test_registry_error_messages_name_the_id() {
        let not_found = RegistryError::NotFound { id: "7654321".to_string() };
        assert_eq!(not_found.to_string(), "No Patron found with id 7654321");
        assert!(not_found.validation().is_none());

        let duplicate = RegistryError::AlreadyExists { id: "1234567".to_string() };
        assert_eq!(duplicate.to_string(), "Patron with id 1234567 already exists.");

        let columns = RegistryError::ColumnCount { found: 3 };
        assert_eq!(
            columns.to_string(),
            "Invalid data format. Expected 4 columns, found 3."
        );
    }
}
