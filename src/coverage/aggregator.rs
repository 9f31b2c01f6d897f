use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::info;

use crate::coverage::grid::CellKey;
use crate::coverage::profile::{extract_tags, push_unique_tags, EntityProfile, JustificationGrid};
use crate::coverage::CoverageIndex;
use crate::taxonomy::Taxonomy;
use crate::types::{
    ColumnNames, CoverageEntry, CoverageRecord, EntityCoverageMap, RawRow, NO_JUSTIFICATION,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub rows_seen: usize,
    pub rows_indexed: usize,
    pub rows_skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverageBuild {
    pub index: CoverageIndex,
    pub entity_maps: BTreeMap<String, EntityCoverageMap>,
    /// Sorted, from every row with an identifier, valid or not.
    pub entities: Vec<String>,
    pub stats: BuildStats,
}

impl CoverageBuild {
    pub fn coverage_of(&self, entity_id: &str) -> Option<&EntityCoverageMap> {
        self.entity_maps.get(entity_id)
    }

    pub fn knows_entity(&self, entity_id: &str) -> bool {
        self.entities
            .binary_search_by(|e| e.as_str().cmp(entity_id))
            .is_ok()
    }
}

pub struct CoverageAggregator<'a> {
    taxonomy: &'a Taxonomy,
    columns: ColumnNames,
}

impl<'a> CoverageAggregator<'a> {
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self {
            taxonomy,
            columns: ColumnNames::default(),
        }
    }

    pub fn with_columns(mut self, columns: ColumnNames) -> Self {
        self.columns = columns;
        self
    }

    pub fn record_from_row(&self, row: &RawRow) -> Option<CoverageRecord> {
        let entity_id = row.trimmed(&self.columns.entity);
        let area = row.trimmed(&self.columns.area);
        let category = row.trimmed(&self.columns.category);
        let subcategory = row.trimmed(&self.columns.subcategory);
        let depth = row.trimmed(&self.columns.depth);
        if [entity_id, area, category, subcategory, depth]
            .iter()
            .any(|v| v.is_empty())
        {
            return None;
        }
        let depth = self.taxonomy.resolve(area, category, subcategory, depth)?;
        Some(CoverageRecord {
            entity_id: entity_id.to_string(),
            area: area.to_string(),
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            depth,
            justification: self.justification_of(row),
        })
    }

    pub fn build_index(&self, rows: &[RawRow]) -> CoverageBuild {
        let mut index = CoverageIndex::for_taxonomy(self.taxonomy);
        let mut entity_maps: BTreeMap<String, EntityCoverageMap> = BTreeMap::new();
        let mut stats = BuildStats {
            rows_seen: rows.len(),
            ..BuildStats::default()
        };

        for row in rows {
            let Some(record) = self.record_from_row(row) else {
                stats.rows_skipped += 1;
                continue;
            };
            let key = CellKey::new(
                record.area.as_str(),
                record.category.as_str(),
                record.subcategory.as_str(),
                record.depth,
            );
            if let Some(cell) = index.get_mut(&key) {
                cell.push(record.entity_id.clone());
            }
            // Later rows for the same (entity, subcategory) overwrite earlier ones.
            entity_maps.entry(record.entity_id).or_default().insert(
                record.subcategory,
                CoverageEntry::new(record.depth, record.justification),
            );
            stats.rows_indexed += 1;
        }

        let entities = self.entity_list(rows);
        info!(
            "indexed {} of {} rows ({} skipped) across {} entities",
            stats.rows_indexed,
            stats.rows_seen,
            stats.rows_skipped,
            entities.len()
        );

        CoverageBuild {
            index,
            entity_maps,
            entities,
            stats,
        }
    }

    pub fn entity_list(&self, rows: &[RawRow]) -> Vec<String> {
        rows.iter()
            .map(|row| row.trimmed(&self.columns.entity))
            .filter(|id| !id.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn profile(&self, rows: &[RawRow], entity_id: &str) -> Option<EntityProfile> {
        let mut tags = Vec::new();
        let mut grid = JustificationGrid::for_taxonomy(self.taxonomy);
        let mut seen = false;

        for row in rows {
            if row.trimmed(&self.columns.entity) != entity_id {
                continue;
            }
            seen = true;
            push_unique_tags(&mut tags, extract_tags(row.trimmed(&self.columns.tags)));
            if let Some(record) = self.record_from_row(row) {
                let key = CellKey::new(
                    record.area,
                    record.category,
                    record.subcategory,
                    record.depth,
                );
                if let Some(slot) = grid.get_mut(&key) {
                    *slot = Some(record.justification);
                }
            }
        }

        seen.then(|| EntityProfile {
            entity_id: entity_id.to_string(),
            tags,
            grid,
        })
    }

    fn justification_of(&self, row: &RawRow) -> String {
        let text = row.trimmed(&self.columns.justification);
        if text.is_empty() {
            NO_JUSTIFICATION.to_string()
        } else {
            text.to_string()
        }
    }
}
