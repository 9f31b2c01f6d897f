use serde::Serialize;
use thiserror::Error;

use crate::coverage::CoverageBuild;
use crate::types::EntityCoverageMap;
use crate::venn::{Member, SetRegionComputer, VennRegions};

static NO_COVERAGE: EntityCoverageMap = EntityCoverageMap::new();

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("select at least two entities to compare (got {0})")]
    TooFew(usize),
    #[error("at most three entities can be compared (got {0})")]
    TooMany(usize),
    #[error("entity selected more than once: {0}")]
    Duplicate(String),
    #[error("unknown entity: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone)]
pub struct Selection<'b> {
    entities: Vec<&'b str>,
    maps: Vec<&'b EntityCoverageMap>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub entities: Vec<String>,
    #[serde(flatten)]
    pub regions: VennRegions,
}

impl Comparison {
    pub fn entity(&self, member: Member) -> Option<&str> {
        self.entities.get(member.index()).map(String::as_str)
    }
}

impl<'b> Selection<'b> {
    /// An entity that appears only in rows that failed validation compares as
    /// an empty coverage map.
    pub fn resolve<S: AsRef<str>>(
        build: &'b CoverageBuild,
        ids: &[S],
    ) -> Result<Self, SelectionError> {
        match ids.len() {
            0 | 1 => return Err(SelectionError::TooFew(ids.len())),
            2 | 3 => {}
            n => return Err(SelectionError::TooMany(n)),
        }

        let mut entities = Vec::with_capacity(ids.len());
        let mut maps = Vec::with_capacity(ids.len());
        for id in ids {
            let id = id.as_ref().trim();
            let Ok(pos) = build.entities.binary_search_by(|e| e.as_str().cmp(id)) else {
                return Err(SelectionError::Unknown(id.to_string()));
            };
            let entity = build.entities[pos].as_str();
            if entities.contains(&entity) {
                return Err(SelectionError::Duplicate(entity.to_string()));
            }
            entities.push(entity);
            maps.push(build.coverage_of(entity).unwrap_or(&NO_COVERAGE));
        }
        Ok(Self { entities, maps })
    }

    pub fn compare(&self, computer: &SetRegionComputer<'_>) -> Comparison {
        let regions =
            computer.compute_regions(self.maps[0], self.maps[1], self.maps.get(2).copied());
        Comparison {
            entities: self.entities.iter().map(|e| e.to_string()).collect(),
            regions,
        }
    }
}
