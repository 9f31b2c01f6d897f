use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::taxonomy::DepthLevel;

pub const NO_JUSTIFICATION: &str = "No justification provided";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// A repeated header name resolves to its last occurrence.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn trimmed(&self, column: &str) -> &str {
        self.get(column).map(str::trim).unwrap_or("")
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for RawRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnNames {
    pub entity: String,
    pub tags: String,
    pub area: String,
    pub category: String,
    pub subcategory: String,
    pub depth: String,
    pub justification: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            entity: "Number - Name".to_string(),
            tags: "Tags".to_string(),
            area: "Area".to_string(),
            category: "Category".to_string(),
            subcategory: "Subcategory".to_string(),
            depth: "Depth of Coverage".to_string(),
            justification: "Justification".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoverageRecord {
    pub entity_id: String,
    pub area: String,
    pub category: String,
    pub subcategory: String,
    pub depth: DepthLevel,
    pub justification: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoverageEntry {
    pub depth: DepthLevel,
    pub justification: String,
}

impl CoverageEntry {
    pub fn new(depth: DepthLevel, justification: impl Into<String>) -> Self {
        Self {
            depth,
            justification: justification.into(),
        }
    }
}

pub type EntityCoverageMap = BTreeMap<String, CoverageEntry>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_columns_resolve_to_last() {
        let row = RawRow::new(vec![
            ("Area".to_string(), "first".to_string()),
            ("Area".to_string(), "  second ".to_string()),
        ]);
        assert_eq!(row.get("Area"), Some("  second "));
        assert_eq!(row.trimmed("Area"), "second");
        assert_eq!(row.trimmed("Missing"), "");
    }

    #[test]
    fn raw_row_serializes_as_ordered_object() {
        let row = RawRow::new(vec![
            ("b".to_string(), "1".to_string()),
            ("a".to_string(), "2".to_string()),
        ]);
        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(json, r#"{"b":"1","a":"2"}"#);
    }
}
