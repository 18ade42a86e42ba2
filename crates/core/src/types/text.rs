//! Bounded text fields.

use crate::ValidationError;

/// Validate a required, non-blank text field of at most `max` characters.
///
/// Length is measured in characters, so CJK names are held to the same
/// limit as ASCII ones.
///
/// # Errors
///
/// Returns [`ValidationError::Missing`] for an empty string,
/// [`ValidationError::Blank`] for whitespace only, and
/// [`ValidationError::TooLong`] past `max` characters.
pub fn validate_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Missing { field });
    }
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}
