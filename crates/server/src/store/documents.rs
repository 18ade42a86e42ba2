//! On-disk document shapes.
//!
//! Each collection file is a single object wrapping one array. Records are
//! stored in their wire form, except product lines, whose `order` field may
//! be absent in files written before ordering existed.

use serde::{Deserialize, Serialize};

use roadmap_core::{Owner, ProductLine, ProductLineId, Project};

use super::StoreError;

/// `productlines.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductLinesDocument {
    #[serde(default)]
    pub productlines: Vec<StoredProductLine>,
}

/// `projects.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectsDocument {
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// `owners.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnersDocument {
    #[serde(default)]
    pub owners: Vec<Owner>,
}

/// Product line as stored, with an optional `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProductLine {
    pub id: ProductLineId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    pub created_at: i64,
}

impl From<ProductLine> for StoredProductLine {
    fn from(line: ProductLine) -> Self {
        Self {
            id: line.id,
            name: line.name,
            order: Some(line.order),
            created_at: line.created_at,
        }
    }
}

impl TryFrom<StoredProductLine> for ProductLine {
    type Error = StoreError;

    fn try_from(stored: StoredProductLine) -> Result<Self, Self::Error> {
        let order = stored.order.ok_or_else(|| {
            StoreError::DataCorruption(format!("product line {} has no order", stored.id))
        })?;
        Ok(Self {
            id: stored.id,
            name: stored.name,
            order,
            created_at: stored.created_at,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_product_line_without_order() {
        let json = r#"{"productlines":[{"id":"pl-1","name":"支付","createdAt":1}]}"#;
        let doc: ProductLinesDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.productlines[0].order, None);
        assert!(ProductLine::try_from(doc.productlines[0].clone()).is_err());
    }

    #[test]
    fn test_stored_round_trip_keeps_order() {
        let line = ProductLine::new("支付", 4).unwrap();
        let stored = StoredProductLine::from(line.clone());
        assert_eq!(ProductLine::try_from(stored).unwrap(), line);
    }

    #[test]
    fn test_empty_object_is_empty_collection() {
        let doc: OwnersDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.owners.is_empty());
    }
}
