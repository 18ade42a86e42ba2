//! Product line record.

use serde::{Deserialize, Serialize};

use crate::{ProductLineId, ValidationError, now_millis, validate_text};

/// A top-level grouping of projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLine {
    pub id: ProductLineId,
    pub name: String,
    /// Display position; see [`crate::ordering`].
    pub order: u32,
    /// Epoch milliseconds.
    pub created_at: i64,
}

impl ProductLine {
    /// Maximum name length in characters.
    pub const MAX_NAME_LENGTH: usize = 100;

    /// Create a new product line with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the name is empty, blank, or longer
    /// than [`Self::MAX_NAME_LENGTH`] characters.
    pub fn new(name: impl Into<String>, order: u32) -> Result<Self, ValidationError> {
        let line = Self {
            id: ProductLineId::generate(),
            name: name.into(),
            order,
            created_at: now_millis(),
        };
        line.validate()?;
        Ok(line)
    }

    /// Check field-level constraints.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the first violated constraint.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_text("name", &self.name, Self::MAX_NAME_LENGTH)
    }

    /// Replace the name, leaving the record untouched if the new one is invalid.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the new name is invalid.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        validate_text("name", &name, Self::MAX_NAME_LENGTH)?;
        self.name = name;
        Ok(())
    }
}
