use anyhow::{Context, Result};
use clap::ValueEnum;
use std::io::Write;

use incomegrid_core::CellValue;
use incomegrid_statement::{Coordinate, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn cell(v: &Option<CellValue>) -> String {
    v.as_ref().map(|c| c.to_string()).unwrap_or_default()
}

pub fn write_records(records: &[Record], format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records).context("serialize records")?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut w = csv::Writer::from_writer(out);
            w.write_record(["investment", "income", "value1", "value2"])?;
            for r in records {
                w.write_record([
                    r.investment.as_str(),
                    r.income.as_str(),
                    cell(&r.value1).as_str(),
                    cell(&r.value2).as_str(),
                ])?;
            }
            w.flush()?;
        }
        OutputFormat::Table => {
            writeln!(out, "{:<16} {:<10} {:>14} {:>14}", "INVESTMENT", "INCOME", "VALUE1", "VALUE2")?;
            writeln!(out, "{}", "-".repeat(57))?;
            for r in records {
                writeln!(
                    out,
                    "{:<16} {:<10} {:>14} {:>14}",
                    r.investment,
                    r.income,
                    cell(&r.value1),
                    cell(&r.value2)
                )?;
            }
        }
    }
    Ok(())
}

pub fn write_coordinates(coords: &[Coordinate], format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, coords).context("serialize coordinates")?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut w = csv::Writer::from_writer(out);
            w.write_record([
                "label",
                "value1",
                "value2",
                "heading",
                "heading_kind",
                "heading_score",
                "subheading",
                "subheading_kind",
                "subheading_score",
            ])?;
            for c in coords {
                w.write_record([
                    c.row.label.clone(),
                    cell(&c.row.value1),
                    cell(&c.row.value2),
                    c.heading.category.clone(),
                    c.heading.kind.to_string(),
                    c.heading.score.to_string(),
                    c.subheading.category.clone(),
                    c.subheading.kind.to_string(),
                    c.subheading.score.to_string(),
                ])?;
            }
            w.flush()?;
        }
        OutputFormat::Table => {
            for c in coords {
                writeln!(
                    out,
                    "{:<48} | {:<32} | {}",
                    truncate(&c.row.label, 48),
                    c.heading.to_string(),
                    c.subheading
                )?;
            }
        }
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut t: String = s.chars().take(max - 1).collect();
    t.push('…');
    t
}
