//! incomegrid-statement: place statement rows on the investment / income
//! grid and assemble the normalized records.

pub mod coordinates;
pub mod pipeline;
pub mod records;

pub use coordinates::{Coordinate, CoordinateWalker, ScoringConfig};
pub use pipeline::{
    DEFAULT_END_LABEL, DEFAULT_START_LABEL, Extraction, StatementOptions, extract_records,
    extract_statement, extract_table,
};
pub use records::{Record, RecordGrid};
