//! Form resource and its field-schema tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::resources::Resource;

/// A data-collection form, including its full field schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Form {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Lifecycle status ("active", "inactive")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Field schema tree. Required on create.
    #[serde(default)]
    pub elements: Vec<FormElement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Form {
    const PATH: &'static str = "forms";
    const COLLECTION: &'static str = "forms";
    const ITEM: &'static str = "form";
}

/// One element of a form's field schema.
///
/// Elements nest: Sections and Repeatables carry child elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormElement {
    /// Element type: "TextField", "PhotoField", "Section", "Repeatable", ...
    #[serde(rename = "type")]
    pub element_type: String,

    /// Short hexadecimal field key, the key used in record form values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// Child elements for Sections and Repeatables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<FormElement>,
}

/// Address sub-components exposed as individual columns.
const ADDRESS_PARTS: &[&str] = &[
    "sub_thoroughfare",
    "thoroughfare",
    "suite",
    "locality",
    "admin_area",
    "sub_admin_area",
    "postal_code",
    "country",
];

impl Form {
    /// Map short field keys to human-readable labels.
    ///
    /// Walks the element tree: Section and Label elements contribute no
    /// columns of their own but their children are visited; Repeatable
    /// children get the repeatable's label as a prefix; AddressField
    /// expands to its sub-components; Photo and Video fields expose their
    /// caption (and video id) sub-fields.
    pub fn field_labels(&self) -> BTreeMap<String, String> {
        let mut labels = BTreeMap::new();
        collect_labels(&self.elements, "", &mut labels);
        labels
    }
}

fn collect_labels(elements: &[FormElement], parent_label: &str, out: &mut BTreeMap<String, String>) {
    for element in elements {
        let element_type = element.element_type.as_str();

        // Sections and Labels are layout, not data
        if element_type == "Section" || element_type == "Label" {
            collect_labels(&element.elements, parent_label, out);
            continue;
        }

        let key = element.key.as_deref().or(element.data_name.as_deref());
        let mut full_label = String::new();

        if let Some(key) = key {
            let label = element.label.as_deref().unwrap_or("");
            full_label = if !parent_label.is_empty() && !label.is_empty() {
                format!("{} - {}", parent_label, label)
            } else if !label.is_empty() {
                label.to_string()
            } else {
                titleize(key)
            };

            match element_type {
                "AddressField" => {
                    // Only the sub-components hold data
                    for part in ADDRESS_PARTS {
                        out.insert(
                            format!("{}_{}", key, part),
                            format!("{} - {}", full_label, titleize(part)),
                        );
                    }
                }
                "VideoField" => {
                    out.insert(key.to_string(), full_label.clone());
                    out.insert(format!("{}_caption", key), format!("{} - Caption", full_label));
                    out.insert(
                        format!("{}_video_id", key),
                        format!("{} - Video ID", full_label),
                    );
                }
                "PhotoField" => {
                    out.insert(key.to_string(), full_label.clone());
                    out.insert(format!("{}_caption", key), format!("{} - Caption", full_label));
                }
                _ => {
                    out.insert(key.to_string(), full_label.clone());
                }
            }
        }

        if !element.elements.is_empty() {
            let nested_label = if element_type == "Repeatable" && !full_label.is_empty() {
                full_label.as_str()
            } else {
                parent_label
            };
            collect_labels(&element.elements, nested_label, out);
        }
    }
}

/// "fire_hydrant_id" -> "Fire Hydrant Id"
fn titleize(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(element_type: &str, key: &str, label: &str) -> FormElement {
        FormElement {
            element_type: element_type.to_string(),
            key: Some(key.to_string()),
            data_name: None,
            label: if label.is_empty() {
                None
            } else {
                Some(label.to_string())
            },
            required: false,
            elements: vec![],
        }
    }

    #[test]
    fn test_titleize() {
        assert_eq!(titleize("postal_code"), "Postal Code");
        assert_eq!(titleize("name"), "Name");
    }

    #[test]
    fn test_plain_fields_use_labels() {
        let form = Form {
            id: None,
            name: "Hydrants".to_string(),
            description: None,
            status: None,
            elements: vec![field("TextField", "a1b2", "Hydrant Number")],
            record_count: None,
            created_at: None,
            updated_at: None,
        };

        let labels = form.field_labels();
        assert_eq!(labels["a1b2"], "Hydrant Number");
    }

    #[test]
    fn test_sections_are_transparent() {
        let mut section = field("Section", "s1", "Location");
        section.elements = vec![field("TextField", "c3d4", "Street")];

        let form = Form {
            id: None,
            name: "f".to_string(),
            description: None,
            status: None,
            elements: vec![section],
            record_count: None,
            created_at: None,
            updated_at: None,
        };

        let labels = form.field_labels();
        // Section label does not prefix its children
        assert_eq!(labels["c3d4"], "Street");
        assert!(!labels.contains_key("s1"));
    }

    #[test]
    fn test_repeatable_prefixes_children() {
        let mut repeatable = field("Repeatable", "r1", "Inspections");
        repeatable.elements = vec![field("DateField", "e5f6", "Date")];

        let form = Form {
            id: None,
            name: "f".to_string(),
            description: None,
            status: None,
            elements: vec![repeatable],
            record_count: None,
            created_at: None,
            updated_at: None,
        };

        let labels = form.field_labels();
        assert_eq!(labels["e5f6"], "Inspections - Date");
        assert_eq!(labels["r1"], "Inspections");
    }

    #[test]
    fn test_address_field_expands_parts() {
        let form = Form {
            id: None,
            name: "f".to_string(),
            description: None,
            status: None,
            elements: vec![field("AddressField", "ad01", "Site Address")],
            record_count: None,
            created_at: None,
            updated_at: None,
        };

        let labels = form.field_labels();
        assert_eq!(labels["ad01_postal_code"], "Site Address - Postal Code");
        assert_eq!(labels["ad01_country"], "Site Address - Country");
        // The parent key itself holds no data
        assert!(!labels.contains_key("ad01"));
    }

    #[test]
    fn test_photo_field_exposes_caption() {
        let form = Form {
            id: None,
            name: "f".to_string(),
            description: None,
            status: None,
            elements: vec![field("PhotoField", "ph01", "Site Photos")],
            record_count: None,
            created_at: None,
            updated_at: None,
        };

        let labels = form.field_labels();
        assert_eq!(labels["ph01"], "Site Photos");
        assert_eq!(labels["ph01_caption"], "Site Photos - Caption");
    }

    #[test]
    fn test_missing_label_falls_back_to_key() {
        let form = Form {
            id: None,
            name: "f".to_string(),
            description: None,
            status: None,
            elements: vec![field("TextField", "serial_no", "")],
            record_count: None,
            created_at: None,
            updated_at: None,
        };

        let labels = form.field_labels();
        assert_eq!(labels["serial_no"], "Serial No");
    }
}
