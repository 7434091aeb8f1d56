//! End-to-end extraction: load a statement table, slice the investment
//! income section, walk it, and fill the record grid.

use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;

use incomegrid_core::{CategoryRegistry, Row};
use incomegrid_ingest::{extract_range, load_table};

use crate::coordinates::{Coordinate, CoordinateWalker, ScoringConfig};
use crate::records::{Record, RecordGrid};

/// Canonical label of the row that opens the income section.
pub const DEFAULT_START_LABEL: &str = "investmentincome";
/// Canonical label of the section's closing total.
pub const DEFAULT_END_LABEL: &str = "totalinvestmentincome";

#[derive(Debug, Clone)]
pub struct StatementOptions {
    pub start_label: String,
    pub end_label: String,
    pub has_headers: bool,
    /// Fail instead of continuing with no rows when a marker is missing.
    pub strict: bool,
    pub scoring: ScoringConfig,
}

impl Default for StatementOptions {
    fn default() -> Self {
        Self {
            start_label: DEFAULT_START_LABEL.to_string(),
            end_label: DEFAULT_END_LABEL.to_string(),
            has_headers: true,
            strict: false,
            scoring: ScoringConfig::default(),
        }
    }
}

/// Result of one extraction run.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub coordinates: Vec<Coordinate>,
    pub records: Vec<Record>,
    /// Rows whose coordinates named a record.
    pub placed: usize,
}

impl Extraction {
    pub fn filled(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| r.is_filled())
    }
}

/// Classify already-sliced rows and assemble the records.
pub fn extract_records(rows: &[Row], registry: &CategoryRegistry, scoring: ScoringConfig) -> Extraction {
    let coordinates = CoordinateWalker::new(registry).with_scoring(scoring).walk(rows);
    let mut grid = RecordGrid::new(registry);
    let placed = grid.fill(&coordinates);

    Extraction {
        coordinates,
        records: grid.into_records(),
        placed,
    }
}

/// Slice the income section out of a full table and extract it.
pub fn extract_table(rows: &[Row], registry: &CategoryRegistry, opts: &StatementOptions) -> Result<Extraction> {
    let section: &[Row] = match extract_range(rows, &opts.start_label, &opts.end_label) {
        Ok(section) => section,
        Err(e) if !opts.strict => {
            warn!("{}; continuing with no rows", e);
            &[]
        }
        Err(e) => return Err(e.into()),
    };
    Ok(extract_records(section, registry, opts.scoring))
}

/// Load a statement file and extract it.
pub fn extract_statement(
    path: impl AsRef<Path>,
    registry: &CategoryRegistry,
    opts: &StatementOptions,
) -> Result<Extraction> {
    let path = path.as_ref();
    let rows = load_table(path, opts.has_headers)?;
    let extraction =
        extract_table(&rows, registry, opts).with_context(|| format!("extracting {}", path.display()))?;
    info!(
        "{}: {} section rows, {} placed, {} records filled",
        path.display(),
        extraction.coordinates.len(),
        extraction.placed,
        extraction.filled().count()
    );
    Ok(extraction)
}
