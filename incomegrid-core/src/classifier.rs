//! Fuzzy classification of a label into a taxonomy category.
//!
//! Every term of every category is scored against the normalized label.
//! A category needs one term at or above [`TERM_FLOOR`] to be considered,
//! and the winner must clear [`MATCH_FLOOR`] or the label is "No match".

use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::normalize::Normalizer;
use crate::similarity::Scorer;
use crate::taxonomy::{Axis, Taxonomy};

/// Sentinel category for labels no category accepted.
pub const NO_MATCH: &str = "No match";

/// Minimum best-term score for a category to be a candidate at all.
pub const TERM_FLOOR: u8 = 40;

/// Winning scores at or below this are rejected.
pub const MATCH_FLOOR: u8 = 50;

/// Axis of a classification, or the no-match sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "investment")]
    Investment,
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "No match")]
    NoMatch,
}

impl Kind {
    pub fn axis(&self) -> Option<Axis> {
        match self {
            Kind::Investment => Some(Axis::Investment),
            Kind::Income => Some(Axis::Income),
            Kind::NoMatch => None,
        }
    }
}

impl From<Axis> for Kind {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Investment => Kind::Investment,
            Axis::Income => Kind::Income,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Investment => f.write_str("investment"),
            Kind::Income => f.write_str("income"),
            Kind::NoMatch => f.write_str(NO_MATCH),
        }
    }
}

/// Outcome of classifying one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: String,
    pub kind: Kind,
    pub score: u8,
}

impl Classification {
    pub fn new(category: impl Into<String>, kind: Kind, score: u8) -> Self {
        Self {
            category: category.into(),
            kind,
            score,
        }
    }

    /// `("No match", "No match", 0)`.
    pub fn no_match() -> Self {
        Self::new(NO_MATCH, Kind::NoMatch, 0)
    }

    /// "No match" that still sits on an axis, as used for the walker's
    /// initial heading and for blank-row subheadings.
    pub fn unmatched(axis: Axis) -> Self {
        Self::new(NO_MATCH, axis.into(), 0)
    }

    /// Unconditional assignment, not the result of scoring.
    pub fn forced(category: impl Into<String>, axis: Axis) -> Self {
        Self::new(category, axis.into(), 100)
    }

    pub fn is_match(&self) -> bool {
        self.kind != Kind::NoMatch && self.category != NO_MATCH
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.category, self.kind, self.score)
    }
}

/// Best score of `normalized` against `terms`, or 0 below [`TERM_FLOOR`].
pub fn score_against_terms(normalized: &str, terms: &[String], scorer: Scorer) -> u8 {
    let best = terms
        .iter()
        .map(|term| scorer.score(normalized, term))
        .max()
        .unwrap_or(0);
    if best >= TERM_FLOOR { best } else { 0 }
}

/// Classify `label` against `taxonomy`.
///
/// Ties keep the earlier category, so taxonomy order is significant.
pub fn classify(
    label: &str,
    taxonomy: &Taxonomy,
    scorer: Scorer,
    normalizer: Normalizer,
) -> Classification {
    let normalized = normalizer.apply(label);

    let mut best: Option<(&str, Axis)> = None;
    let mut best_score = 0u8;
    for category in taxonomy.categories() {
        let score = score_against_terms(&normalized, &category.terms, scorer);
        trace!("{:?} vs {}: {}", normalized, category.name, score);
        if score > best_score {
            best = Some((category.name.as_str(), category.kind));
            best_score = score;
        }
    }

    match best {
        Some((name, axis)) if best_score > MATCH_FLOOR => {
            Classification::new(name, axis.into(), best_score)
        }
        _ => Classification::no_match(),
    }
}
