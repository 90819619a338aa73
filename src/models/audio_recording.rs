//! Audio media resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::media::{MediaKind, MediaResource};
use crate::resources::Resource;

/// Metadata for an audio recording attached to a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioRecording {
    /// Media access key, the id used in URLs and form values
    pub access_key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,

    #[serde(default = "flag_default")]
    pub stored: bool,

    #[serde(default = "flag_default")]
    pub processed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    /// A GPS track was recorded alongside the audio
    #[serde(default)]
    pub has_track: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn flag_default() -> bool {
    true
}

impl Resource for AudioRecording {
    const PATH: &'static str = "audio";
    const COLLECTION: &'static str = "audio";
    const ITEM: &'static str = "audio";
}

impl MediaResource for AudioRecording {
    const KIND: MediaKind = MediaKind::Audio;

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
