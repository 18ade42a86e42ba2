//! Owner (person responsible for projects) record.

use serde::{Deserialize, Serialize};

use crate::{HexColor, OwnerId, ValidationError, now_millis, validate_text};

/// A person responsible for one or more projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
    pub color: HexColor,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Whether the owner's projects are shown on the timeline.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

const fn default_visible() -> bool {
    true
}

/// Partial update for an owner. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct OwnerPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub visible: Option<bool>,
}

impl OwnerPatch {
    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none() && self.visible.is_none()
    }
}

impl Owner {
    /// Maximum name length in characters.
    pub const MAX_NAME_LENGTH: usize = 50;
    /// Display name of the reserved default owner.
    pub const DEFAULT_NAME: &'static str = "未分配";
    /// Fixed grey used for the reserved default owner.
    pub const DEFAULT_COLOR: &'static str = "#95A5A6";

    /// Create a visible owner with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the name is empty, blank, or longer
    /// than [`Self::MAX_NAME_LENGTH`] characters.
    pub fn new(name: impl Into<String>, color: HexColor) -> Result<Self, ValidationError> {
        let owner = Self {
            id: OwnerId::generate(),
            name: name.into(),
            color,
            created_at: now_millis(),
            visible: true,
        };
        owner.validate()?;
        Ok(owner)
    }

    /// The reserved "unassigned" owner that legacy projects fall back to.
    #[must_use]
    pub fn default_owner() -> Self {
        Self {
            id: OwnerId::default_owner(),
            name: Self::DEFAULT_NAME.to_owned(),
            color: HexColor::from_static(Self::DEFAULT_COLOR),
            created_at: now_millis(),
            visible: true,
        }
    }

    /// Check field-level constraints.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the first violated constraint.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_text("name", &self.name, Self::MAX_NAME_LENGTH)
    }

    /// Merge a patch and re-validate.
    ///
    /// The record is only modified if the merged result is valid.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the merged record is invalid.
    pub fn apply(&mut self, patch: OwnerPatch) -> Result<(), ValidationError> {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(color) = patch.color {
            next.color = HexColor::parse(&color)?;
        }
        if let Some(visible) = patch.visible {
            next.visible = visible;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}
