//! Paginated CRUD operations over the REST resources.
//!
//! Every listable resource shares one envelope shape: pagination fields
//! inline next to a resource-named collection key. The [`Resource`]
//! trait pins those names per model so the operations stay generic.

use chrono::{DateTime, Utc};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::client::AtlasLinkClient;
use crate::error::{AtlasLinkError, Result};
use crate::models::Page;

/// A REST resource exposed under `/api/v2`.
pub trait Resource: DeserializeOwned + Serialize + Send + Sync {
    /// URL path segment, e.g. `forms`
    const PATH: &'static str;

    /// Collection key in list envelopes, e.g. `"forms"`
    const COLLECTION: &'static str;

    /// Object key in single-item envelopes, e.g. `"form"`
    const ITEM: &'static str;
}

/// Filters and pagination for list calls.
///
/// `per_page` passes through verbatim; the upstream default and maximum
/// are both 20000. Timestamp filters are sent as epoch seconds.
///
/// # Examples
///
/// ```rust
/// use atlas_link::ListParams;
/// use chrono::{TimeZone, Utc};
///
/// let params = ListParams::new()
///     .form_id("7a0c3378-b63a-4707-b459-df499698f23c")
///     .updated_since(Utc.timestamp_opt(1704067200, 0).unwrap())
///     .per_page(500);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub form_id: Option<String>,
    pub project_id: Option<String>,
    pub changeset_id: Option<String>,
    pub updated_since: Option<DateTime<Utc>>,
    pub created_since: Option<DateTime<Utc>>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a specific page (1-based).
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Restrict to one form's items (records, photos, changesets).
    pub fn form_id(mut self, form_id: impl Into<String>) -> Self {
        self.form_id = Some(form_id.into());
        self
    }

    /// Restrict to one project's items.
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Restrict to items touched by one changeset.
    pub fn changeset_id(mut self, changeset_id: impl Into<String>) -> Self {
        self.changeset_id = Some(changeset_id.into());
        self
    }

    /// Only items updated at or after this instant.
    pub fn updated_since(mut self, updated_since: DateTime<Utc>) -> Self {
        self.updated_since = Some(updated_since);
        self
    }

    /// Only items created at or after this instant.
    pub fn created_since(mut self, created_since: DateTime<Utc>) -> Self {
        self.created_since = Some(created_since);
        self
    }

    pub(crate) fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        if let Some(form_id) = &self.form_id {
            pairs.push(("form_id", form_id.clone()));
        }
        if let Some(project_id) = &self.project_id {
            pairs.push(("project_id", project_id.clone()));
        }
        if let Some(changeset_id) = &self.changeset_id {
            pairs.push(("changeset_id", changeset_id.clone()));
        }
        if let Some(updated_since) = self.updated_since {
            pairs.push(("updated_since", updated_since.timestamp().to_string()));
        }
        if let Some(created_since) = self.created_since {
            pairs.push(("created_since", created_since.timestamp().to_string()));
        }
        pairs
    }
}

impl AtlasLinkClient {
    /// List one page of a resource.
    ///
    /// # Example
    /// ```rust,no_run
    /// # async fn example() -> atlas_link::Result<()> {
    /// use atlas_link::{AtlasLinkClient, Form, ListParams, Region};
    ///
    /// let client = AtlasLinkClient::builder()
    ///     .region(Region::Us)
    ///     .api_token("token")
    ///     .build()?;
    ///
    /// let page = client.list::<Form>(&ListParams::new().per_page(100)).await?;
    /// println!("{} of {} forms", page.len(), page.total_count);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list<T: Resource>(&self, params: &ListParams) -> Result<Page<T>> {
        let url = self.api_url(&format!("{}.json", T::PATH));
        let pairs = params.to_query_pairs();
        debug!("[LIST] GET {} page={:?}", url, params.page);

        let response = self
            .execute_with_retry(|client| client.get(&url).query(&pairs))
            .await?;
        let response = self.check_status(response).await?;

        let body: Value = response.json().await?;
        let page = page_from_envelope(body, T::COLLECTION)?;
        debug!(
            "[LIST] {} page {}/{} ({} items, {} total)",
            T::PATH,
            page.current_page,
            page.total_pages,
            page.len(),
            page.total_count
        );
        Ok(page)
    }

    /// List every item of a resource, walking pages until exhausted.
    ///
    /// Starts from `params.page` when set, page 1 otherwise.
    pub async fn list_all<T: Resource>(&self, params: &ListParams) -> Result<Vec<T>> {
        let mut all = Vec::new();
        let mut page_num = params.page.unwrap_or(1);

        loop {
            let page_params = params.clone().page(page_num);
            let page: Page<T> = self.list(&page_params).await?;
            let last = page.is_empty() || page.is_last();
            all.extend(page.items);
            if last {
                break;
            }
            page_num += 1;
        }

        debug!("[LIST] {} fully paged: {} items", T::PATH, all.len());
        Ok(all)
    }

    /// Fetch a single item by id.
    pub async fn get<T: Resource>(&self, id: &str) -> Result<T> {
        let url = self.api_url(&format!("{}/{}.json", T::PATH, id));
        debug!("[GET] {}", url);

        let response = self
            .execute_with_retry(|client| client.get(&url))
            .await?;
        let response = self.check_status(response).await?;

        let body: Value = response.json().await?;
        item_from_envelope(body, T::ITEM)
    }

    /// Create an item.
    ///
    /// The upstream returns the stored object, including its assigned id
    /// and timestamps. Missing required fields fail with
    /// [`ValidationError`](AtlasLinkError::ValidationError).
    pub async fn create<T: Resource>(&self, item: &T) -> Result<T> {
        let url = self.api_url(&format!("{}.json", T::PATH));
        debug!("[CREATE] POST {}", url);

        let payload = wrap_item(item, T::ITEM)?;
        let response = self
            .execute_with_retry(|client| client.post(&url).json(&payload))
            .await?;
        let response = self.check_status(response).await?;

        let body: Value = response.json().await?;
        item_from_envelope(body, T::ITEM)
    }

    /// Replace an item.
    ///
    /// The upstream treats this as full replacement: any field omitted
    /// from `item` is silently dropped from the stored object. Always
    /// send a complete object fetched via [`get`](Self::get); there is
    /// deliberately no partial-update helper.
    pub async fn update<T: Resource>(&self, id: &str, item: &T) -> Result<T> {
        let url = self.api_url(&format!("{}/{}.json", T::PATH, id));
        debug!("[UPDATE] PUT {}", url);

        let payload = wrap_item(item, T::ITEM)?;
        let response = self
            .execute_with_retry(|client| client.put(&url).json(&payload))
            .await?;
        let response = self.check_status(response).await?;

        let body: Value = response.json().await?;
        item_from_envelope(body, T::ITEM)
    }

    /// Delete an item.
    ///
    /// Media attached to deleted records is soft-deleted upstream and
    /// stops being downloadable.
    pub async fn delete<T: Resource>(&self, id: &str) -> Result<()> {
        let url = self.api_url(&format!("{}/{}.json", T::PATH, id));
        debug!("[DELETE] {}", url);

        let response = self
            .execute_with_retry(|client| client.delete(&url))
            .await?;
        self.check_status(response).await?;
        Ok(())
    }
}

/// Wrap an item in its single-object envelope (`{"form": {...}}`).
fn wrap_item<T: Serialize>(item: &T, key: &str) -> Result<Value> {
    let mut envelope = serde_json::Map::new();
    envelope.insert(key.to_string(), serde_json::to_value(item)?);
    Ok(Value::Object(envelope))
}

/// Unwrap a single-object envelope, tolerating bare objects.
fn item_from_envelope<T: DeserializeOwned>(mut body: Value, key: &str) -> Result<T> {
    let item_value = match body.get_mut(key).map(Value::take) {
        Some(value) => value,
        None => body,
    };
    Ok(serde_json::from_value(item_value)?)
}

/// Lift a flat list envelope into a [`Page`].
pub(crate) fn page_from_envelope<T: DeserializeOwned>(
    mut body: Value,
    collection: &str,
) -> Result<Page<T>> {
    let items_value = body.get_mut(collection).map(Value::take).ok_or_else(|| {
        AtlasLinkError::SerializationError(format!(
            "list envelope is missing the '{}' collection",
            collection
        ))
    })?;
    let items: Vec<T> = serde_json::from_value(items_value)?;

    let current_page = envelope_u64(&body, "current_page").unwrap_or(1) as u32;
    let total_pages = envelope_u64(&body, "total_pages").unwrap_or(1) as u32;
    let total_count = envelope_u64(&body, "total_count").unwrap_or(items.len() as u64);
    let per_page = envelope_u64(&body, "per_page").unwrap_or(items.len() as u64) as u32;

    Ok(Page {
        items,
        current_page,
        total_pages,
        total_count,
        per_page,
    })
}

fn envelope_u64(body: &Value, key: &str) -> Option<u64> {
    body.get(key).and_then(Value::as_u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_list_params_pairs() {
        let params = ListParams::new()
            .page(2)
            .per_page(100)
            .form_id("f1")
            .updated_since(Utc.timestamp_opt(1704067200, 0).unwrap());

        let pairs = params.to_query_pairs();
        assert!(pairs.contains(&("page", "2".to_string())));
        assert!(pairs.contains(&("per_page", "100".to_string())));
        assert!(pairs.contains(&("form_id", "f1".to_string())));
        assert!(pairs.contains(&("updated_since", "1704067200".to_string())));
    }

    #[test]
    fn test_empty_params_send_nothing() {
        assert!(ListParams::new().to_query_pairs().is_empty());
    }

    #[test]
    fn test_page_envelope() {
        let body = json!({
            "widgets": [{"value": 1}, {"value": 2}],
            "current_page": 1,
            "total_pages": 171,
            "total_count": 341,
            "per_page": 2
        });

        #[derive(serde::Deserialize)]
        struct Widget {
            value: u32,
        }

        let page: Page<Widget> = page_from_envelope(body, "widgets").unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.items[1].value, 2);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 171);
        assert_eq!(page.total_count, 341);
        assert_eq!(page.per_page, 2);
        assert_eq!(page.expected_pages(), page.total_pages);
        assert!(page.len() <= page.per_page as usize);
    }

    #[test]
    fn test_page_envelope_missing_collection() {
        let body = json!({"current_page": 1});
        let result: Result<Page<Value>> = page_from_envelope(body, "forms");
        assert!(matches!(
            result,
            Err(AtlasLinkError::SerializationError(_))
        ));
    }

    #[test]
    fn test_item_envelope_unwraps() {
        #[derive(serde::Deserialize)]
        struct Widget {
            value: u32,
        }

        let wrapped: Widget = item_from_envelope(json!({"widget": {"value": 7}}), "widget").unwrap();
        assert_eq!(wrapped.value, 7);

        let bare: Widget = item_from_envelope(json!({"value": 9}), "widget").unwrap();
        assert_eq!(bare.value, 9);
    }

    #[test]
    fn test_wrap_item() {
        let wrapped = wrap_item(&json!({"name": "x"}), "form").unwrap();
        assert_eq!(wrapped["form"]["name"], "x");
    }
}
