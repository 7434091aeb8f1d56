//! Two-pass coordinate assignment over statement rows.
//!
//! Statements encode a two-level hierarchy with nothing but blank value
//! columns and free-text labels: a label-only row opens a section (an
//! affiliation class or an income type) and the filled rows below it are
//! line items on the other axis. Pass 1 carries the open section forward
//! as each row's heading; pass 2 classifies each filled row on the axis
//! the heading did not use.

use log::debug;
use serde::{Deserialize, Serialize};

use incomegrid_core::{
    Axis, CategoryRegistry, Classification, Normalizer, Row, Scorer, TOTAL, affiliation_tokens,
    classify,
};

/// Similarity function used at each step of the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Section headings, on either axis.
    pub heading: Scorer,
    /// Line items searched against the income taxonomy.
    pub income_subheading: Scorer,
    /// Line items searched against the investment taxonomy.
    pub investment_subheading: Scorer,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            heading: Scorer::TokenSet,
            income_subheading: Scorer::PartialTokenSet,
            investment_subheading: Scorer::TokenSet,
        }
    }
}

/// A row annotated with its heading and subheading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: Row,
    pub heading: Classification,
    pub subheading: Classification,
}

pub struct CoordinateWalker<'a> {
    registry: &'a CategoryRegistry,
    scoring: ScoringConfig,
}

impl<'a> CoordinateWalker<'a> {
    pub fn new(registry: &'a CategoryRegistry) -> Self {
        Self {
            registry,
            scoring: ScoringConfig::default(),
        }
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Classify a label-only row. Labels with control/affiliate vocabulary
    /// open an investment section, everything else an income section.
    pub fn classify_heading(&self, label: &str) -> Classification {
        let (axis, normalizer) = if affiliation_tokens(label).is_empty() {
            (Axis::Income, Normalizer::Income)
        } else {
            (Axis::Investment, Normalizer::Affiliation)
        };
        classify(label, self.registry.taxonomy(axis), self.scoring.heading, normalizer)
    }

    /// Classify a line item against the taxonomy opposite its heading.
    pub fn classify_subheading(&self, label: &str, heading_axis: Axis) -> Classification {
        match heading_axis.opposite() {
            Axis::Income => classify(
                label,
                self.registry.income(),
                self.scoring.income_subheading,
                Normalizer::Income,
            ),
            Axis::Investment => classify(
                label,
                self.registry.investment(),
                self.scoring.investment_subheading,
                Normalizer::Affiliation,
            ),
        }
    }

    /// Pass 1: a left fold carrying the most recent section heading.
    ///
    /// The last row is the statement's grand total and always closes the
    /// investment axis.
    pub fn headings(&self, rows: &[Row]) -> Vec<Classification> {
        let mut headings: Vec<Classification> = rows
            .iter()
            .scan(Classification::unmatched(Axis::Investment), |current, row| {
                if row.is_blank() {
                    *current = self.classify_heading(&row.label);
                    debug!("heading {:?} -> {}", row.label, current);
                }
                Some(current.clone())
            })
            .collect();

        if let Some(last) = headings.last_mut() {
            *last = Classification::forced(TOTAL, Axis::Investment);
        }
        headings
    }

    /// Pass 2: subheadings for filled rows; blank rows get none.
    ///
    /// A heading that matched nothing is treated like the walk's initial
    /// investment-side state.
    pub fn subheadings(&self, rows: &[Row], headings: &[Classification]) -> Vec<Classification> {
        let mut subheadings: Vec<Classification> = rows
            .iter()
            .zip(headings)
            .map(|(row, heading)| {
                if row.is_blank() {
                    Classification::unmatched(Axis::Investment)
                } else {
                    let axis = heading.kind.axis().unwrap_or(Axis::Investment);
                    self.classify_subheading(&row.label, axis)
                }
            })
            .collect();

        if let Some(last) = subheadings.last_mut() {
            *last = Classification::forced(TOTAL, Axis::Income);
        }
        subheadings
    }

    /// Run both passes.
    pub fn walk(&self, rows: &[Row]) -> Vec<Coordinate> {
        let headings = self.headings(rows);
        let subheadings = self.subheadings(rows, &headings);

        rows.iter()
            .zip(headings)
            .zip(subheadings)
            .map(|((row, heading), subheading)| Coordinate {
                row: row.clone(),
                heading,
                subheading,
            })
            .collect()
    }
}
