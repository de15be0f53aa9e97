//! Category references carried on subscriptions
//!
//! Categories themselves are managed elsewhere; the engine only needs the
//! identity, name and color to label breakdown buckets and calendar entries.
//! Subscriptions without a category share one "uncategorized" bucket whose
//! key, name and color are defined once here.

use serde::{Deserialize, Serialize};

use super::ids::CategoryId;

/// Bucket key for subscriptions without a category
pub const UNCATEGORIZED_KEY: &str = "uncategorized";
/// Display name for the uncategorized bucket
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";
/// Color for the uncategorized bucket, also the fallback for colorless categories
pub const UNCATEGORIZED_COLOR: &str = "#9E9E9E";

/// A category as attached to a subscription record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CategoryRef {
    pub fn new(id: CategoryId, name: impl Into<String>, color: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color,
        }
    }
}

/// Display label for a breakdown bucket or calendar entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryLabel {
    /// Grouping key: the category UUID, or [`UNCATEGORIZED_KEY`]
    pub key: String,
    pub name: String,
    pub color: String,
}

impl CategoryLabel {
    pub fn uncategorized() -> Self {
        Self {
            key: UNCATEGORIZED_KEY.to_string(),
            name: UNCATEGORIZED_NAME.to_string(),
            color: UNCATEGORIZED_COLOR.to_string(),
        }
    }

    /// Label for an optional category reference
    pub fn for_category(category: Option<&CategoryRef>) -> Self {
        match category {
            Some(category) => Self {
                key: category.id.full(),
                name: category.name.clone(),
                color: category
                    .color
                    .clone()
                    .unwrap_or_else(|| UNCATEGORIZED_COLOR.to_string()),
            },
            None => Self::uncategorized(),
        }
    }

    /// Label for a bare category id with no richer lookup available
    ///
    /// The raw id doubles as the display name.
    pub fn placeholder(raw_id: &str) -> Self {
        let raw_id = raw_id.trim();
        if raw_id.is_empty() {
            return Self::uncategorized();
        }
        Self {
            key: raw_id.to_string(),
            name: raw_id.to_string(),
            color: UNCATEGORIZED_COLOR.to_string(),
        }
    }

    pub fn is_uncategorized(&self) -> bool {
        self.key == UNCATEGORIZED_KEY
    }
}
