//! Changeset resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::resources::Resource;

/// A grouping of record edits made in one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Changeset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub form_id: String,

    /// Free-form metadata attached by the client that made the edits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,

    /// Set once the changeset is closed; closed changesets accept no
    /// further edits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_changes: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Changeset {
    /// True once the changeset has been closed upstream.
    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }
}

impl Resource for Changeset {
    const PATH: &'static str = "changesets";
    const COLLECTION: &'static str = "changesets";
    const ITEM: &'static str = "changeset";
}
