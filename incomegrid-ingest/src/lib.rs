//! incomegrid-ingest: load statement tables from delimited files and slice
//! out the income section between two marker rows.

pub mod cells;
pub mod parsers;
pub mod range;

pub use cells::CellParser;
pub use parsers::delimited::{load_table, parse_table};
pub use range::{RangeError, extract_range};
