//! Structured results from the SQL query endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One column of a query result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryField {
    pub name: String,

    /// Upstream type name ("string", "integer", "geometry", ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
}

/// JSON-format query result.
///
/// Rows arrive as objects keyed by column name; [`row_values`] and
/// [`rows_as_values`] provide the array view ordered by `fields`.
///
/// [`row_values`]: QueryResponse::row_values
/// [`rows_as_values`]: QueryResponse::rows_as_values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Result-set schema, in column order
    #[serde(default)]
    pub fields: Vec<QueryField>,

    /// Result rows, keyed by column name
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u64>,

    /// Upstream execution time in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
}

impl QueryResponse {
    /// Column names in schema order.
    pub fn column_names(&self) -> Vec<String> {
        self.fields.iter().map(|field| field.name.clone()).collect()
    }

    /// One row as values ordered by the schema; absent columns become
    /// JSON null.
    pub fn row_values(&self, row_idx: usize) -> Option<Vec<Value>> {
        let row = self.rows.get(row_idx)?;
        Some(
            self.fields
                .iter()
                .map(|field| row.get(&field.name).cloned().unwrap_or(Value::Null))
                .collect(),
        )
    }

    /// All rows as schema-ordered value arrays.
    pub fn rows_as_values(&self) -> Vec<Vec<Value>> {
        (0..self.rows.len())
            .filter_map(|idx| self.row_values(idx))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> QueryResponse {
        serde_json::from_value(json!({
            "fields": [
                {"name": "id", "type": "string"},
                {"name": "name", "type": "string"},
                {"name": "record_count", "type": "integer"}
            ],
            "rows": [
                {"id": "f1", "name": "Hydrants", "record_count": 12},
                {"name": "Valves", "id": "f2"}
            ],
            "row_count": 2,
            "time": 0.034
        }))
        .unwrap()
    }

    #[test]
    fn test_column_names_in_schema_order() {
        let response = fixture();
        assert_eq!(response.column_names(), vec!["id", "name", "record_count"]);
    }

    #[test]
    fn test_row_values_ordered_and_padded() {
        let response = fixture();

        let first = response.row_values(0).unwrap();
        assert_eq!(first, vec![json!("f1"), json!("Hydrants"), json!(12)]);

        // second row omits record_count, which pads to null
        let second = response.row_values(1).unwrap();
        assert_eq!(second, vec![json!("f2"), json!("Valves"), Value::Null]);

        assert!(response.row_values(2).is_none());
    }

    #[test]
    fn test_empty_response_defaults() {
        let response: QueryResponse = serde_json::from_str("{}").unwrap();
        assert!(response.is_empty());
        assert_eq!(response.len(), 0);
        assert!(response.column_names().is_empty());
    }
}
