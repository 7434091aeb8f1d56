//! CSV statement tables.
//!
//! Column 0 is the line label, columns 1 and 2 are the two reporting
//! periods. Extra columns are ignored and short rows are padded with
//! absent values.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use incomegrid_core::Row;

use crate::cells::CellParser;

/// Parse a delimited table from any reader.
///
/// With `has_headers` the first record is treated as a column header and
/// skipped. Records with no label and no values are dropped.
pub fn parse_table<R: io::Read>(reader: R, has_headers: bool) -> Result<Vec<Row>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(has_headers)
        .from_reader(reader);

    let cells = CellParser::new()?;
    let mut rows = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("reading record {}", i + 1))?;

        let label = record.get(0).unwrap_or("").trim().to_string();
        let value1 = record.get(1).and_then(|s| cells.parse(s));
        let value2 = record.get(2).and_then(|s| cells.parse(s));

        if label.is_empty() && value1.is_none() && value2.is_none() {
            debug!("skipping empty record {}", i + 1);
            continue;
        }

        rows.push(Row::new(label, value1, value2));
    }

    Ok(rows)
}

/// Load a delimited table from disk.
pub fn load_table(path: impl AsRef<Path>, has_headers: bool) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let rows = parse_table(file, has_headers).with_context(|| format!("parsing {}", path.display()))?;
    debug!("loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
