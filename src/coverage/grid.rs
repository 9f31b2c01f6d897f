use std::collections::HashMap;

use serde::Serialize;

use crate::taxonomy::{DepthLevel, Taxonomy};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellKey {
    pub area: String,
    pub category: String,
    pub subcategory: String,
    pub depth: DepthLevel,
}

impl CellKey {
    pub fn new(
        area: impl Into<String>,
        category: impl Into<String>,
        subcategory: impl Into<String>,
        depth: DepthLevel,
    ) -> Self {
        Self {
            area: area.into(),
            category: category.into(),
            subcategory: subcategory.into(),
            depth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell<T> {
    #[serde(flatten)]
    pub key: CellKey,
    pub value: T,
}

/// Every leaf x depth of a taxonomy, pre-populated and kept in taxonomy order.
#[derive(Debug, Clone, Serialize)]
pub struct LeafGrid<T> {
    cells: Vec<GridCell<T>>,
    #[serde(skip)]
    positions: HashMap<CellKey, usize>,
}

impl<T: Default> LeafGrid<T> {
    pub fn for_taxonomy(taxonomy: &Taxonomy) -> Self {
        let mut cells = Vec::with_capacity(taxonomy.leaf_count() * DepthLevel::ALL.len());
        let mut positions = HashMap::with_capacity(cells.capacity());
        for leaf in taxonomy.leaves() {
            for depth in DepthLevel::ALL {
                let key = CellKey::new(leaf.area, leaf.category, leaf.subcategory, depth);
                positions.insert(key.clone(), cells.len());
                cells.push(GridCell {
                    key,
                    value: T::default(),
                });
            }
        }
        Self { cells, positions }
    }
}

impl<T> LeafGrid<T> {
    pub fn get(&self, key: &CellKey) -> Option<&T> {
        self.positions.get(key).map(|&idx| &self.cells[idx].value)
    }

    pub fn get_mut(&mut self, key: &CellKey) -> Option<&mut T> {
        self.positions
            .get(key)
            .map(|&idx| &mut self.cells[idx].value)
    }

    pub fn at(
        &self,
        area: &str,
        category: &str,
        subcategory: &str,
        depth: DepthLevel,
    ) -> Option<&T> {
        self.get(&CellKey::new(area, category, subcategory, depth))
    }

    pub fn cells(&self) -> &[GridCell<T>] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
