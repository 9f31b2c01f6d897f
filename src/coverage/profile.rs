use serde::Serialize;

use crate::coverage::grid::{GridCell, LeafGrid};
use crate::taxonomy::DepthLevel;

pub type JustificationGrid = LeafGrid<Option<String>>;

#[derive(Debug, Clone, Serialize)]
pub struct EntityProfile {
    pub entity_id: String,
    pub tags: Vec<String>,
    pub grid: JustificationGrid,
}

impl EntityProfile {
    pub fn justification_at(
        &self,
        area: &str,
        category: &str,
        subcategory: &str,
        depth: DepthLevel,
    ) -> Option<&str> {
        self.grid
            .at(area, category, subcategory, depth)
            .and_then(|j| j.as_deref())
    }

    pub fn covered(&self) -> impl Iterator<Item = &GridCell<Option<String>>> {
        self.grid.cells().iter().filter(|c| c.value.is_some())
    }
}

/// Parses a tag field such as `["ml", "ops"]` or `['ml','ops']`.
pub fn extract_tags(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    let inner = raw.strip_prefix('[').unwrap_or(raw);
    let inner = inner.strip_suffix(']').unwrap_or(inner).trim();

    let mut tags = Vec::new();
    for token in inner.split(',') {
        let tag = token
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'')
            .trim();
        if !tag.is_empty() {
            tags.push(tag.to_string());
        }
    }
    let mut unique = Vec::with_capacity(tags.len());
    push_unique_tags(&mut unique, tags);
    unique
}

pub fn push_unique_tags(into: &mut Vec<String>, tags: Vec<String>) {
    for tag in tags {
        if !into.contains(&tag) {
            into.push(tag);
        }
    }
}
