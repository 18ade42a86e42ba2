//! Project record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    OwnerId, ProductLineId, ProjectId, ProjectStatus, ValidationError, now_millis, validate_text,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date field.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] if the input is not a real
/// calendar date in that format.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_owned(),
    })
}

/// A project scheduled on the roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub product_line_id: ProductLineId,
    pub owner_id: OwnerId,
    #[serde(default)]
    pub is_pending: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
    #[serde(default)]
    pub remarks: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds, refreshed on every update.
    pub updated_at: i64,
}

/// Raw fields for creating a project.
///
/// Dates and status arrive as strings so that parse failures surface as
/// validation errors rather than decode errors.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub product_line_id: ProductLineId,
    pub owner_id: OwnerId,
    pub is_pending: bool,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub remarks: Option<String>,
}

/// Partial update for a project. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub product_line_id: Option<ProductLineId>,
    pub owner_id: Option<OwnerId>,
    pub is_pending: Option<bool>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub remarks: Option<String>,
}

impl ProjectPatch {
    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.product_line_id.is_none()
            && self.owner_id.is_none()
            && self.is_pending.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.status.is_none()
            && self.remarks.is_none()
    }
}

impl Project {
    /// Maximum name length in characters.
    pub const MAX_NAME_LENGTH: usize = 200;
    /// Maximum remarks length in characters.
    pub const MAX_REMARKS_LENGTH: usize = 500;

    /// Build and validate a new project with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if any field is malformed or the end
    /// date precedes the start date.
    pub fn create(input: NewProject) -> Result<Self, ValidationError> {
        let now = now_millis();
        let project = Self {
            id: ProjectId::generate(),
            name: input.name,
            product_line_id: input.product_line_id,
            owner_id: input.owner_id,
            is_pending: input.is_pending,
            start_date: parse_date("startDate", &input.start_date)?,
            end_date: parse_date("endDate", &input.end_date)?,
            status: ProjectStatus::parse(&input.status)?,
            remarks: input.remarks.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        project.validate()?;
        Ok(project)
    }

    /// Check field-level constraints.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the first violated constraint.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_text("name", &self.name, Self::MAX_NAME_LENGTH)?;
        if self.product_line_id.is_blank() {
            return Err(ValidationError::Missing {
                field: "productLineId",
            });
        }
        if self.owner_id.is_blank() {
            return Err(ValidationError::Missing { field: "ownerId" });
        }
        if self.end_date < self.start_date {
            return Err(ValidationError::EndBeforeStart);
        }
        if self.remarks.chars().count() > Self::MAX_REMARKS_LENGTH {
            return Err(ValidationError::TooLong {
                field: "remarks",
                max: Self::MAX_REMARKS_LENGTH,
            });
        }
        Ok(())
    }

    /// Merge a patch, re-validate, and bump `updated_at`.
    ///
    /// The record is only modified if the merged result is valid.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the merged record is invalid.
    pub fn apply(&mut self, patch: ProjectPatch) -> Result<(), ValidationError> {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(product_line_id) = patch.product_line_id {
            next.product_line_id = product_line_id;
        }
        if let Some(owner_id) = patch.owner_id {
            next.owner_id = owner_id;
        }
        if let Some(is_pending) = patch.is_pending {
            next.is_pending = is_pending;
        }
        if let Some(start_date) = patch.start_date {
            next.start_date = parse_date("startDate", &start_date)?;
        }
        if let Some(end_date) = patch.end_date {
            next.end_date = parse_date("endDate", &end_date)?;
        }
        if let Some(status) = patch.status {
            next.status = ProjectStatus::parse(&status)?;
        }
        if let Some(remarks) = patch.remarks {
            next.remarks = remarks;
        }
        next.validate()?;
        next.updated_at = now_millis().max(self.updated_at);
        *self = next;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input() -> NewProject {
        NewProject {
            name: "Checkout redesign".to_string(),
            product_line_id: ProductLineId::new("pl-1"),
            owner_id: OwnerId::new("owner-1"),
            is_pending: false,
            start_date: "2025-01-01".to_string(),
            end_date: "2025-03-31".to_string(),
            status: "开发".to_string(),
            remarks: None,
        }
    }

    #[test]
    fn test_create_valid() {
        let project = Project::create(input()).unwrap();
        assert!(project.id.as_str().starts_with("proj-"));
        assert_eq!(project.status, ProjectStatus::Development);
        assert_eq!(project.remarks, "");
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut bad = input();
        bad.end_date = "2024-12-31".to_string();
        assert_eq!(
            Project::create(bad).unwrap_err(),
            ValidationError::EndBeforeStart
        );
    }

    #[test]
    fn test_same_day_accepted() {
        let mut same = input();
        same.end_date = same.start_date.clone();
        assert!(Project::create(same).is_ok());
    }

    #[test]
    fn test_invalid_date_rejected() {
        let mut bad = input();
        bad.start_date = "2025-02-30".to_string();
        assert!(matches!(
            Project::create(bad).unwrap_err(),
            ValidationError::InvalidDate {
                field: "startDate",
                ..
            }
        ));

        let mut bad = input();
        bad.end_date = "31/03/2025".to_string();
        assert!(matches!(
            Project::create(bad).unwrap_err(),
            ValidationError::InvalidDate {
                field: "endDate",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_status_rejected() {
        let mut bad = input();
        bad.status = "shipped".to_string();
        assert!(matches!(
            Project::create(bad).unwrap_err(),
            ValidationError::InvalidStatus { .. }
        ));
    }

    #[test]
    fn test_missing_references_rejected() {
        let mut bad = input();
        bad.owner_id = OwnerId::new("");
        assert_eq!(
            Project::create(bad).unwrap_err(),
            ValidationError::Missing { field: "ownerId" }
        );

        let mut bad = input();
        bad.product_line_id = ProductLineId::new(" ");
        assert_eq!(
            Project::create(bad).unwrap_err(),
            ValidationError::Missing {
                field: "productLineId"
            }
        );
    }

    #[test]
    fn test_name_and_remarks_limits() {
        let mut bad = input();
        bad.name = "x".repeat(201);
        assert!(Project::create(bad).is_err());

        let mut ok = input();
        ok.name = "x".repeat(200);
        ok.remarks = Some("备".repeat(500));
        assert!(Project::create(ok).is_ok());

        let mut bad = input();
        bad.remarks = Some("备".repeat(501));
        assert_eq!(
            Project::create(bad).unwrap_err(),
            ValidationError::TooLong {
                field: "remarks",
                max: 500
            }
        );
    }

    #[test]
    fn test_apply_merges_and_revalidates() {
        let mut project = Project::create(input()).unwrap();
        project
            .apply(ProjectPatch {
                status: Some("测试".to_string()),
                is_pending: Some(true),
                ..ProjectPatch::default()
            })
            .unwrap();
        assert_eq!(project.status, ProjectStatus::Testing);
        assert!(project.is_pending);
        assert_eq!(project.name, "Checkout redesign");
        assert!(project.updated_at >= project.created_at);
    }

    #[test]
    fn test_apply_rejects_without_mutating() {
        let mut project = Project::create(input()).unwrap();
        let before = project.clone();
        let err = project
            .apply(ProjectPatch {
                name: Some("Renamed".to_string()),
                end_date: Some("2024-01-01".to_string()),
                ..ProjectPatch::default()
            })
            .unwrap_err();
        assert_eq!(err, ValidationError::EndBeforeStart);
        assert_eq!(project, before);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ProjectPatch::default().is_empty());
        assert!(
            !ProjectPatch {
                remarks: Some(String::new()),
                ..ProjectPatch::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn test_legacy_record_defaults() {
        let json = r#"{
            "id": "proj-1",
            "name": "Legacy",
            "productLineId": "pl-1",
            "ownerId": "owner-default",
            "startDate": "2024-01-01",
            "endDate": "2024-02-01",
            "status": "规划",
            "createdAt": 1,
            "updatedAt": 1
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert!(!project.is_pending);
        assert_eq!(project.remarks, "");
        assert_eq!(
            serde_json::to_value(&project).unwrap()["startDate"],
            "2024-01-01"
        );
    }
}
