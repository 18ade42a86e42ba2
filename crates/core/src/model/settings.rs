//! User display settings.

use serde::{Deserialize, Serialize};

use crate::{ProductLineId, ValidationError};

/// Singleton settings document.
///
/// The ids listed here are not checked against live product lines: a
/// deleted product line simply stops matching anything on the timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub visible_product_lines: Vec<ProductLineId>,
}

impl Settings {
    /// Settings restricted to the given product lines.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Blank`] if any id is empty or whitespace.
    pub fn with_visible(ids: Vec<ProductLineId>) -> Result<Self, ValidationError> {
        let settings = Self {
            visible_product_lines: ids,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check field-level constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Blank`] if any id is empty or whitespace.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.visible_product_lines.iter().any(ProductLineId::is_blank) {
            return Err(ValidationError::Blank {
                field: "productLineIds",
            });
        }
        Ok(())
    }
}
