//! Slice the rows between two marker labels.
//!
//! Markers are compared in canonical form, so `"Investment income"`,
//! `"INVESTMENT INCOME:"` and `"investmentincome"` all name the same row.

use log::warn;

use incomegrid_core::{Row, canonicalize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("start label `{0}` not found in table")]
    StartNotFound(String),

    #[error("end label `{0}` not found after the start label")]
    EndNotFound(String),
}

/// Rows strictly after the first `start` row, through the first `end` row
/// that follows it (inclusive).
pub fn extract_range<'a>(rows: &'a [Row], start: &str, end: &str) -> Result<&'a [Row], RangeError> {
    let start_key = canonicalize(start);
    let end_key = canonicalize(end);

    let Some(start_idx) = rows.iter().position(|r| canonicalize(&r.label) == start_key) else {
        warn!("start label {:?} not found in {} rows", start, rows.len());
        return Err(RangeError::StartNotFound(start.to_string()));
    };

    let after = &rows[start_idx + 1..];
    let Some(end_offset) = after.iter().position(|r| canonicalize(&r.label) == end_key) else {
        warn!("end label {:?} not found after row {}", end, start_idx);
        return Err(RangeError::EndNotFound(end.to_string()));
    };

    Ok(&after[..=end_offset])
}
