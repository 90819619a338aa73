//! Project resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resources::Resource;

/// A project grouping records across forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Project {
    const PATH: &'static str = "projects";
    const COLLECTION: &'static str = "projects";
    const ITEM: &'static str = "project";
}
