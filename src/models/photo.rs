//! Photo media resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::media::{MediaKind, MediaResource};
use crate::resources::Resource;

/// Metadata for a photo attached to a record.
///
/// Binary content is served from the media endpoints (original,
/// thumbnail, large); downloads are only valid once `stored` and
/// `processed` are both true and the photo has not been soft-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    /// Media access key, the id used in URLs and form values
    pub access_key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,

    /// "image/jpeg" or "image/png"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,

    /// The original upload reached durable storage
    #[serde(default = "flag_default")]
    pub stored: bool,

    /// Derived variants (thumbnail, large) have been generated
    #[serde(default = "flag_default")]
    pub processed: bool,

    /// Soft-deletion timestamp; set when the photo was removed upstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Flags absent from older payloads mean the check does not apply.
fn flag_default() -> bool {
    true
}

impl Resource for Photo {
    const PATH: &'static str = "photos";
    const COLLECTION: &'static str = "photos";
    const ITEM: &'static str = "photo";
}

impl MediaResource for Photo {
    const KIND: MediaKind = MediaKind::Photo;

    fn stored(&self) -> bool {
        self.stored
    }

    fn processed(&self) -> bool {
        self.processed
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}
