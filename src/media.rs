//! Media kinds, variants, and validated binary downloads.
//!
//! Every media kind serves its binaries from fixed variant paths next to
//! the metadata endpoint. Downloads validate metadata first: the
//! upstream keeps serving stale binaries for soft-deleted media, so the
//! client refuses those itself.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures_util::{Stream, StreamExt};
use log::debug;
use std::fmt;

use crate::client::AtlasLinkClient;
use crate::error::{AtlasLinkError, Result};
use crate::resources::Resource;

/// The four media kinds attached to records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
    Audio,
    Signature,
}

impl MediaKind {
    /// URL path segment under `/api/v2`.
    pub fn path(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photos",
            MediaKind::Video => "videos",
            MediaKind::Audio => "audio",
            MediaKind::Signature => "signatures",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Signature => "signature",
        };
        write!(f, "{}", name)
    }
}

/// Which rendition of a media item to download.
///
/// Not every kind serves every variant; unsupported combinations fail
/// with `ConfigurationError` before any request goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaVariant {
    /// Full-resolution upload
    Original,
    /// Small preview rendition
    Thumbnail,
    /// Large display rendition (photos and signatures)
    Large,
    /// GPS track recorded alongside video/audio, as JSON
    Track,
}

impl fmt::Display for MediaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaVariant::Original => "original",
            MediaVariant::Thumbnail => "thumbnail",
            MediaVariant::Large => "large",
            MediaVariant::Track => "track",
        };
        write!(f, "{}", name)
    }
}

/// Fixed variant path for a media item, relative to `/api/v2`.
pub(crate) fn variant_path(kind: MediaKind, id: &str, variant: MediaVariant) -> Result<String> {
    let path = match (kind, variant) {
        (MediaKind::Photo, MediaVariant::Original) => format!("photos/{}.jpg", id),
        (MediaKind::Photo, MediaVariant::Thumbnail) => format!("photos/{}/thumbnail.jpg", id),
        (MediaKind::Photo, MediaVariant::Large) => format!("photos/{}/large.jpg", id),

        (MediaKind::Signature, MediaVariant::Original) => format!("signatures/{}.png", id),
        (MediaKind::Signature, MediaVariant::Thumbnail) => {
            format!("signatures/{}/thumbnail.png", id)
        }
        (MediaKind::Signature, MediaVariant::Large) => format!("signatures/{}/large.png", id),

        (MediaKind::Video, MediaVariant::Original) => format!("videos/{}.mp4", id),
        (MediaKind::Video, MediaVariant::Thumbnail) => format!("videos/{}/thumbnail.jpg", id),
        (MediaKind::Video, MediaVariant::Track) => format!("videos/{}/track.json", id),

        (MediaKind::Audio, MediaVariant::Original) => format!("audio/{}.m4a", id),
        (MediaKind::Audio, MediaVariant::Track) => format!("audio/{}/track.json", id),

        (kind, variant) => {
            return Err(AtlasLinkError::ConfigurationError(format!(
                "{} media has no {} variant",
                kind, variant
            )))
        }
    };
    Ok(path)
}

/// A resource whose binary content is downloadable.
///
/// Implemented by [`Photo`](crate::models::Photo),
/// [`Video`](crate::models::Video),
/// [`AudioRecording`](crate::models::AudioRecording), and
/// [`Signature`](crate::models::Signature).
pub trait MediaResource: Resource {
    const KIND: MediaKind;

    /// The original upload reached durable storage
    fn stored(&self) -> bool;

    /// Derived renditions have been generated
    fn processed(&self) -> bool;

    /// Soft-deletion timestamp
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// Fail with `NotFound` when the binary cannot be served.
    fn ensure_downloadable(&self, id: &str) -> Result<()> {
        if self.deleted_at().is_some() {
            return Err(AtlasLinkError::NotFound(format!(
                "{} {} was deleted",
                Self::KIND,
                id
            )));
        }
        if !self.stored() {
            return Err(AtlasLinkError::NotFound(format!(
                "{} {} is not yet stored",
                Self::KIND,
                id
            )));
        }
        if !self.processed() {
            return Err(AtlasLinkError::NotFound(format!(
                "{} {} is not yet processed",
                Self::KIND,
                id
            )));
        }
        Ok(())
    }
}

impl AtlasLinkClient {
    /// Download a media item's binary content into memory.
    ///
    /// Metadata is checked first: soft-deleted, unstored, or unprocessed
    /// media fails with `NotFound` without touching the binary endpoint.
    ///
    /// # Example
    /// ```rust,no_run
    /// # async fn example() -> atlas_link::Result<()> {
    /// use atlas_link::{AtlasLinkClient, MediaVariant, Photo, Region};
    ///
    /// let client = AtlasLinkClient::builder()
    ///     .region(Region::Us)
    ///     .api_token("token")
    ///     .build()?;
    ///
    /// let bytes = client
    ///     .download_media::<Photo>("a4c2f8", MediaVariant::Thumbnail)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn download_media<M: MediaResource>(
        &self,
        id: &str,
        variant: MediaVariant,
    ) -> Result<Bytes> {
        let response = self.media_response::<M>(id, variant).await?;
        let bytes = response.bytes().await?;
        debug!(
            "[MEDIA] Downloaded {} {} ({} bytes, {} variant)",
            M::KIND,
            id,
            bytes.len(),
            variant
        );
        Ok(bytes)
    }

    /// Download a media item's binary content as a chunked stream.
    ///
    /// Same validation as [`download_media`](Self::download_media);
    /// prefer this for large originals.
    pub async fn download_media_stream<M: MediaResource>(
        &self,
        id: &str,
        variant: MediaVariant,
    ) -> Result<impl Stream<Item = Result<Bytes>>> {
        let response = self.media_response::<M>(id, variant).await?;
        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(AtlasLinkError::from)))
    }

    async fn media_response<M: MediaResource>(
        &self,
        id: &str,
        variant: MediaVariant,
    ) -> Result<reqwest::Response> {
        // Resolve the variant path before the metadata round trip so a
        // bad kind/variant combination fails fast.
        let path = variant_path(M::KIND, id, variant)?;

        let metadata: M = self.get::<M>(id).await?;
        metadata.ensure_downloadable(id)?;

        let url = self.api_url(&path);
        let media_timeout = self.timeouts().media_timeout;
        debug!("[MEDIA] GET {} (timeout {:?})", url, media_timeout);

        let response = self
            .execute_with_retry(|client| client.get(&url).timeout(media_timeout))
            .await?;
        self.check_status(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Photo, Signature};

    #[test]
    fn test_photo_variant_paths() {
        assert_eq!(
            variant_path(MediaKind::Photo, "abc", MediaVariant::Original).unwrap(),
            "photos/abc.jpg"
        );
        assert_eq!(
            variant_path(MediaKind::Photo, "abc", MediaVariant::Thumbnail).unwrap(),
            "photos/abc/thumbnail.jpg"
        );
        assert_eq!(
            variant_path(MediaKind::Photo, "abc", MediaVariant::Large).unwrap(),
            "photos/abc/large.jpg"
        );
    }

    #[test]
    fn test_track_paths() {
        assert_eq!(
            variant_path(MediaKind::Video, "v1", MediaVariant::Track).unwrap(),
            "videos/v1/track.json"
        );
        assert_eq!(
            variant_path(MediaKind::Audio, "a1", MediaVariant::Track).unwrap(),
            "audio/a1/track.json"
        );
    }

    #[test]
    fn test_unsupported_variants_rejected() {
        assert!(variant_path(MediaKind::Photo, "abc", MediaVariant::Track).is_err());
        assert!(variant_path(MediaKind::Audio, "a1", MediaVariant::Large).is_err());
        assert!(variant_path(MediaKind::Video, "v1", MediaVariant::Large).is_err());
    }

    fn photo(stored: bool, processed: bool, deleted: bool) -> Photo {
        serde_json::from_value(serde_json::json!({
            "access_key": "abc",
            "stored": stored,
            "processed": processed,
            "deleted_at": if deleted { Some("2026-01-01T00:00:00Z") } else { None },
        }))
        .unwrap()
    }

    #[test]
    fn test_downloadable_photo() {
        assert!(photo(true, true, false).ensure_downloadable("abc").is_ok());
    }

    #[test]
    fn test_unstored_photo_is_not_found() {
        let result = photo(false, true, false).ensure_downloadable("abc");
        assert!(matches!(result, Err(AtlasLinkError::NotFound(_))));
    }

    #[test]
    fn test_unprocessed_photo_is_not_found() {
        let result = photo(true, false, false).ensure_downloadable("abc");
        assert!(matches!(result, Err(AtlasLinkError::NotFound(_))));
    }

    #[test]
    fn test_soft_deleted_photo_is_not_found() {
        let result = photo(true, true, true).ensure_downloadable("abc");
        assert!(matches!(result, Err(AtlasLinkError::NotFound(_))));
    }

    #[test]
    fn test_flags_default_to_available() {
        let signature: Signature = serde_json::from_value(serde_json::json!({
            "access_key": "sig1"
        }))
        .unwrap();
        assert!(signature.ensure_downloadable("sig1").is_ok());
    }
}
