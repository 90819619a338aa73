//! Map layer resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resources::Resource;

/// A reference map layer configured on the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    /// Layer source type ("mbtiles", "tilexyz", ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub layer_type: Option<String>,

    /// Source URL or identifier, shape depends on `layer_type`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Layer {
    const PATH: &'static str = "layers";
    const COLLECTION: &'static str = "layers";
    const ITEM: &'static str = "layer";
}
