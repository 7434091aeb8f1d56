//! incomegrid-core: label normalization, fuzzy scoring, the investment /
//! income taxonomies, and the classifier that ties them together.

pub mod classifier;
pub mod normalize;
pub mod similarity;
pub mod table;
pub mod taxonomy;

pub use classifier::{Classification, Kind, MATCH_FLOOR, NO_MATCH, TERM_FLOOR, classify, score_against_terms};
pub use normalize::{Normalizer, affiliation_tokens, canonicalize, income_prefix};
pub use similarity::Scorer;
pub use table::{CellValue, Row};
pub use taxonomy::{Axis, BUILTIN_RECORD_ORDER, Category, CategoryRegistry, TOTAL, Taxonomy, TaxonomyError};
