//! # atlas-link
//!
//! Typed async client for the Atlas field-data platform HTTP API:
//! paginated REST resources (forms, records, media, projects, layers,
//! changesets) and the read-only SQL query endpoint, under `/api/v2`.
//!
//! The client is a thin wrapper: upstream statuses surface as typed
//! errors, pagination passes through verbatim, and no business logic
//! runs locally.
//!
//! ```rust,no_run
//! use atlas_link::{AtlasLinkClient, Form, ListParams, Region};
//!
//! # async fn example() -> atlas_link::Result<()> {
//! let client = AtlasLinkClient::builder()
//!     .region(Region::Us)
//!     .api_token(std::env::var("ATLAS_API_TOKEN").unwrap_or_default())
//!     .build()?;
//!
//! // Paginated REST listing
//! let forms = client
//!     .list::<Form>(&ListParams::new().per_page(100))
//!     .await?;
//! println!("{} of {} forms", forms.len(), forms.total_count);
//!
//! // SQL over the same data
//! let result = client
//!     .query("SELECT name, record_count FROM forms ORDER BY name")
//!     .await?;
//! println!("{} rows", result.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod media;
pub mod models;
pub mod query;
pub mod region;
pub mod resources;
pub mod timeouts;

pub use auth::AuthProvider;
pub use client::{AtlasLinkClient, AtlasLinkClientBuilder};
pub use error::{AtlasLinkError, Result};
pub use media::{MediaKind, MediaResource, MediaVariant};
pub use models::{
    AudioRecording, Changeset, Form, FormElement, FormValues, Layer, Page, Photo, PhotoReference,
    Project, QueryField, QueryFormat, QueryRequest, QueryResponse, Record, Signature, Video,
};
pub use region::Region;
pub use resources::{ListParams, Resource};
pub use timeouts::{AtlasLinkTimeouts, AtlasLinkTimeoutsBuilder};
