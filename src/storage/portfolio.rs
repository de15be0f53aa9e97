//! Portfolio file format
//!
//! One JSON document holding a set of subscriptions (with their soft-removal
//! state) and the split policies attached to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::file_io::{read_json_required, write_json_atomic};
use crate::error::SubkeepResult;
use crate::models::{SplitPolicy, Subscription};

/// A subscription plus its soft-removal marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSubscription {
    #[serde(flatten)]
    pub subscription: Subscription,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_at: Option<DateTime<Utc>>,
}

impl StoredSubscription {
    pub fn new(subscription: Subscription) -> Self {
        Self {
            subscription,
            removed_at: None,
        }
    }

    pub fn is_removed(&self) -> bool {
        self.removed_at.is_some()
    }
}

/// On-disk portfolio document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioFile {
    #[serde(default)]
    pub subscriptions: Vec<StoredSubscription>,
    #[serde(default)]
    pub split_policies: Vec<SplitPolicy>,
}

impl PortfolioFile {
    pub fn load<P: AsRef<Path>>(path: P) -> SubkeepResult<Self> {
        read_json_required(path)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> SubkeepResult<()> {
        write_json_atomic(path, self)
    }
}
