pub mod aggregator;
pub mod grid;
pub mod profile;

pub use aggregator::{BuildStats, CoverageAggregator, CoverageBuild};
pub use grid::{CellKey, GridCell, LeafGrid};
pub use profile::{extract_tags, EntityProfile, JustificationGrid};

use crate::taxonomy::DepthLevel;

/// Leaf x depth -> entities reporting it, in input order.
pub type CoverageIndex = LeafGrid<Vec<String>>;

impl LeafGrid<Vec<String>> {
    pub fn entities_at(
        &self,
        area: &str,
        category: &str,
        subcategory: &str,
        depth: DepthLevel,
    ) -> Option<&[String]> {
        self.at(area, category, subcategory, depth)
            .map(Vec::as_slice)
    }

    pub fn crowded(&self, threshold: usize) -> impl Iterator<Item = &GridCell<Vec<String>>> {
        self.cells()
            .iter()
            .filter(move |cell| threshold > 0 && cell.value.len() >= threshold)
    }

    pub fn empty_cells(&self) -> usize {
        self.cells().iter().filter(|c| c.value.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use crate::ingest::parse;
    use crate::taxonomy::{Taxonomy, DEPTH_LABELS};

    use super::*;

    #[test]
    fn crowded_cells_respect_threshold() {
        let mut text = String::from("Number - Name,Area,Category,Subcategory,Depth of Coverage\n");
        for course in ["a", "b", "c"] {
            text.push_str(&format!(
                "{course},Foundational,2. AI & ML Methods,2.4 Generative AI & NLP,{}\n",
                DEPTH_LABELS[2]
            ));
        }
        let tax = Taxonomy::curriculum();
        let build = CoverageAggregator::new(&tax).build_index(&parse(&text));

        assert_eq!(build.index.crowded(3).count(), 1);
        assert_eq!(build.index.crowded(4).count(), 0);
        assert_eq!(build.index.crowded(0).count(), 0);
        assert_eq!(build.index.empty_cells(), build.index.len() - 1);
    }
}
