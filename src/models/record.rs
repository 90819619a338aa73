//! Record resource and its form-values payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::resources::Resource;

/// A single submitted record on a form.
///
/// `form_values` maps short hexadecimal field keys (see
/// [`Form::field_labels`](crate::models::Form::field_labels)) to
/// user-entered values, whose shape varies per field type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub form_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changeset_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_accuracy: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_accuracy: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub form_values: FormValues,
}

impl Resource for Record {
    const PATH: &'static str = "records";
    const COLLECTION: &'static str = "records";
    const ITEM: &'static str = "record";
}

/// Field key to entered value, kept as raw JSON.
///
/// Value shapes are field-type specific (strings, choice objects, photo
/// lists, nested repeatable entries), so the map is deliberately opaque;
/// typed accessors sit on top.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormValues(pub Map<String, Value>);

impl FormValues {
    /// Value for a field key, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a field value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// A photo referenced from within a record's form values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoReference {
    /// Media access key, usable with the photo endpoints
    pub photo_id: String,

    /// Dotted path of the field holding the photo, with repeatable
    /// indices (`inspections[2].site_photo`)
    pub field_path: String,

    pub caption: Option<String>,
}

impl Record {
    /// Collect every photo referenced anywhere in the form values,
    /// including inside repeatable entries.
    pub fn photo_references(&self) -> Vec<PhotoReference> {
        let mut refs = Vec::new();
        for (key, value) in self.form_values.iter() {
            collect_photos(value, key, &mut refs);
        }
        refs
    }
}

fn collect_photos(value: &Value, path: &str, out: &mut Vec<PhotoReference>) {
    match value {
        Value::Object(map) => {
            if let Some(photo_id) = map.get("photo_id").and_then(Value::as_str) {
                out.push(PhotoReference {
                    photo_id: photo_id.to_string(),
                    field_path: path.to_string(),
                    caption: map
                        .get("caption")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                });
            } else {
                for (key, nested) in map {
                    collect_photos(nested, &format!("{}.{}", path, key), out);
                }
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_photos(item, &format!("{}[{}]", path, index), out);
            }
        }
        _ => {}
    }
}
