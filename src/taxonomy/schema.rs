use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DepthLevel {
    Primary,
    Significant,
    Minor,
}

impl DepthLevel {
    pub const ALL: [DepthLevel; 3] = [
        DepthLevel::Primary,
        DepthLevel::Significant,
        DepthLevel::Minor,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Significant => 1,
            Self::Minor => 2,
        }
    }
}

impl Display for DepthLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Primary => "Primary",
            Self::Significant => "Significant",
            Self::Minor => "Minor",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxonomyError {
    #[error("taxonomy has no areas")]
    NoAreas,
    #[error("area '{0}' has no categories")]
    EmptyArea(String),
    #[error("category '{0}' has no subcategories")]
    EmptyCategory(String),
    #[error("duplicate area name: {0}")]
    DuplicateArea(String),
    #[error("duplicate category name: {0}")]
    DuplicateCategory(String),
    #[error("duplicate subcategory name: {0}")]
    DuplicateSubcategory(String),
    #[error("depth labels must be distinct and non-empty: {0:?}")]
    InvalidDepths([String; 3]),
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub subcategories: Vec<String>,
}

impl Category {
    pub fn new<S: Into<String>>(name: impl Into<String>, subcategories: Vec<S>) -> Self {
        Self {
            name: name.into(),
            subcategories: subcategories.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Area {
    pub name: String,
    pub categories: Vec<Category>,
}

impl Area {
    pub fn new(name: impl Into<String>, categories: Vec<Category>) -> Self {
        Self {
            name: name.into(),
            categories,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf<'a> {
    pub area: &'a str,
    pub category: &'a str,
    pub subcategory: &'a str,
}

/// Category and subcategory names are unique across the whole tree, so
/// per-entity coverage can be keyed by subcategory alone.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Taxonomy {
    areas: Vec<Area>,
    depths: [String; 3],
}

impl Taxonomy {
    pub fn new(areas: Vec<Area>, depths: [String; 3]) -> Result<Self, TaxonomyError> {
        if areas.is_empty() {
            return Err(TaxonomyError::NoAreas);
        }

        let mut area_names = HashSet::new();
        let mut category_names = HashSet::new();
        let mut subcategory_names = HashSet::new();
        for area in &areas {
            if !area_names.insert(area.name.as_str()) {
                return Err(TaxonomyError::DuplicateArea(area.name.clone()));
            }
            if area.categories.is_empty() {
                return Err(TaxonomyError::EmptyArea(area.name.clone()));
            }
            for category in &area.categories {
                if !category_names.insert(category.name.as_str()) {
                    return Err(TaxonomyError::DuplicateCategory(category.name.clone()));
                }
                if category.subcategories.is_empty() {
                    return Err(TaxonomyError::EmptyCategory(category.name.clone()));
                }
                for subcategory in &category.subcategories {
                    if !subcategory_names.insert(subcategory.as_str()) {
                        return Err(TaxonomyError::DuplicateSubcategory(subcategory.clone()));
                    }
                }
            }
        }

        let distinct: HashSet<&str> = depths.iter().map(String::as_str).collect();
        if distinct.len() != 3 || depths.iter().any(|d| d.trim().is_empty()) {
            return Err(TaxonomyError::InvalidDepths(depths));
        }

        Ok(Self { areas, depths })
    }

    /// Skips validation; only for data already known to satisfy `new`.
    pub(crate) fn from_trusted_parts(areas: Vec<Area>, depths: [String; 3]) -> Self {
        Self { areas, depths }
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn areas_in_order(&self) -> Vec<&str> {
        self.areas.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn categories_of(&self, area: &str) -> Vec<&str> {
        self.find_area(area)
            .map(|a| a.categories.iter().map(|c| c.name.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn subcategories_of(&self, category: &str) -> &[String] {
        self.find_category(category)
            .map(|c| c.subcategories.as_slice())
            .unwrap_or(&[])
    }

    pub fn depth_levels_in_order(&self) -> &[String; 3] {
        &self.depths
    }

    pub fn is_valid_area(&self, area: &str) -> bool {
        self.find_area(area).is_some()
    }

    pub fn is_valid_category(&self, area: &str, category: &str) -> bool {
        self.find_area(area)
            .map(|a| a.categories.iter().any(|c| c.name == category))
            .unwrap_or(false)
    }

    pub fn is_valid_subcategory(&self, category: &str, subcategory: &str) -> bool {
        self.subcategories_of(category)
            .iter()
            .any(|s| s == subcategory)
    }

    /// Exact label match, or the short heading (`Level 1`) when exactly one
    /// label starts with it.
    pub fn depth_level(&self, label: &str) -> Option<DepthLevel> {
        if let Some(idx) = self.depths.iter().position(|d| d == label) {
            return Some(DepthLevel::ALL[idx]);
        }
        let mut by_heading = DepthLevel::ALL
            .into_iter()
            .filter(|level| self.depth_heading(*level) == label);
        match (by_heading.next(), by_heading.next()) {
            (Some(level), None) => Some(level),
            _ => None,
        }
    }

    pub fn depth_label(&self, level: DepthLevel) -> &str {
        &self.depths[level.index()]
    }

    pub fn depth_heading(&self, level: DepthLevel) -> String {
        let label = self.depth_label(level);
        label.split(' ').take(2).collect::<Vec<_>>().join(" ")
    }

    pub fn depth_band(&self, level: DepthLevel) -> String {
        let label = self.depth_label(level);
        label.split(' ').skip(2).collect::<Vec<_>>().join(" ")
    }

    pub fn resolve(
        &self,
        area: &str,
        category: &str,
        subcategory: &str,
        depth: &str,
    ) -> Option<DepthLevel> {
        if !self.is_valid_category(area, category) {
            return None;
        }
        if !self.is_valid_subcategory(category, subcategory) {
            return None;
        }
        self.depth_level(depth)
    }

    pub fn leaves(&self) -> impl Iterator<Item = Leaf<'_>> + '_ {
        self.areas.iter().flat_map(|area| {
            area.categories.iter().flat_map(move |category| {
                category.subcategories.iter().map(move |subcategory| Leaf {
                    area: area.name.as_str(),
                    category: category.name.as_str(),
                    subcategory: subcategory.as_str(),
                })
            })
        })
    }

    pub fn leaf_count(&self) -> usize {
        self.areas
            .iter()
            .flat_map(|a| &a.categories)
            .map(|c| c.subcategories.len())
            .sum()
    }

    pub fn subcategory_position(&self, subcategory: &str) -> Option<usize> {
        self.leaves().position(|leaf| leaf.subcategory == subcategory)
    }

    fn find_area(&self, area: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.name == area)
    }

    fn find_category(&self, category: &str) -> Option<&Category> {
        self.areas
            .iter()
            .flat_map(|a| &a.categories)
            .find(|c| c.name == category)
    }
}
