//! Validation errors for entity records.

/// Errors raised when a record fails field-level validation.
///
/// These are structural errors only. Business rules that need the rest of
/// the collection (duplicate names, live references) belong to the services
/// that own the collection, with the exception of [`Self::DanglingReference`]
/// which services raise after resolving a foreign key.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Missing {
        /// Field name as it appears on the wire.
        field: &'static str,
    },

    /// A text field contains only whitespace.
    #[error("{field} cannot be blank")]
    Blank {
        /// Field name as it appears on the wire.
        field: &'static str,
    },

    /// A text field exceeds its character limit.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Field name as it appears on the wire.
        field: &'static str,
        /// Maximum allowed length in characters.
        max: usize,
    },

    /// A date is not in `YYYY-MM-DD` form.
    #[error("{field} must be a date in YYYY-MM-DD format (got '{value}')")]
    InvalidDate {
        /// Field name as it appears on the wire.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// The end date precedes the start date.
    #[error("endDate must be on or after startDate")]
    EndBeforeStart,

    /// The status is not one of the known project statuses.
    #[error("status must be one of {allowed} (got '{value}')")]
    InvalidStatus {
        /// The rejected input.
        value: String,
        /// Comma-separated list of accepted values.
        allowed: String,
    },

    /// A color is not a `#RRGGBB` HEX string.
    #[error("color must be a HEX color like #FF6B6B (got '{0}')")]
    InvalidColor(String),

    /// A foreign key does not resolve to a live record.
    #[error("{field} refers to a record that does not exist: {id}")]
    DanglingReference {
        /// Field name as it appears on the wire.
        field: &'static str,
        /// The unresolved id.
        id: String,
    },
}
