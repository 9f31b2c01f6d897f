pub mod curriculum;
pub mod schema;

pub use curriculum::DEPTH_LABELS;
pub use schema::{Area, Category, DepthLevel, Leaf, Taxonomy, TaxonomyError};
