//! Investment and income taxonomies: ordered categories of synonym terms.
//!
//! Category order matters. The classifier keeps the first category on a
//! score tie, so the built-in lists reproduce the authored order exactly.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name shared by the income "total" category and the grand-total row.
pub const TOTAL: &str = "total";

/// Income column order of the built-in record grid.
pub const BUILTIN_RECORD_ORDER: [&str; 6] = ["interest", TOTAL, "dividend", "pik", "fee", "other"];

/// The two axes a statement row is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Investment,
    Income,
}

impl Axis {
    pub fn opposite(self) -> Axis {
        match self {
            Axis::Investment => Axis::Income,
            Axis::Income => Axis::Investment,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Investment => "investment",
            Axis::Income => "income",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaxonomyError {
    #[error("{axis} taxonomy has no categories")]
    Empty { axis: Axis },

    #[error("duplicate category `{name}` in {axis} taxonomy")]
    Duplicate { axis: Axis, name: String },

    #[error("category `{name}` has no terms")]
    NoTerms { name: String },

    #[error("category `{name}` is {found} but was placed in the {expected} taxonomy")]
    WrongAxis { name: String, found: Axis, expected: Axis },

    #[error("`total` is reserved for the grand-total row and cannot name an investment category")]
    ReservedTotal,

    #[error("record order {order:?} must list every income category exactly once")]
    RecordOrder { order: Vec<String> },
}

/// A named category with its synonym terms.
///
/// Terms are compared against normalized labels as authored, so they are
/// expected to already be lowercase with no punctuation or spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub kind: Axis,
    pub terms: Vec<String>,
}

impl Category {
    pub fn new<I, S>(name: impl Into<String>, kind: Axis, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind,
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }
}

/// An ordered, validated set of categories on one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    axis: Axis,
    categories: Vec<Category>,
}

impl Taxonomy {
    pub fn new(axis: Axis, categories: Vec<Category>) -> Result<Self, TaxonomyError> {
        if categories.is_empty() {
            return Err(TaxonomyError::Empty { axis });
        }

        let mut seen = HashSet::new();
        for c in &categories {
            if c.kind != axis {
                return Err(TaxonomyError::WrongAxis {
                    name: c.name.clone(),
                    found: c.kind,
                    expected: axis,
                });
            }
            if c.terms.is_empty() {
                return Err(TaxonomyError::NoTerms { name: c.name.clone() });
            }
            if axis == Axis::Investment && c.name == TOTAL {
                return Err(TaxonomyError::ReservedTotal);
            }
            if !seen.insert(c.name.as_str()) {
                return Err(TaxonomyError::Duplicate {
                    axis,
                    name: c.name.clone(),
                });
            }
        }

        Ok(Self { axis, categories })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Both taxonomies, looked up by axis.
///
/// `record_order` fixes the income columns of the record grid. It is
/// independent of the income taxonomy order, which decides score ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    investment: Taxonomy,
    income: Taxonomy,
    record_order: Vec<String>,
}

impl CategoryRegistry {
    pub fn new(investment: Taxonomy, income: Taxonomy) -> Result<Self, TaxonomyError> {
        for (taxonomy, expected) in [(&investment, Axis::Investment), (&income, Axis::Income)] {
            if taxonomy.axis() != expected {
                return Err(TaxonomyError::WrongAxis {
                    name: taxonomy.names().next().unwrap_or_default().to_string(),
                    found: taxonomy.axis(),
                    expected,
                });
            }
        }
        let record_order = income.names().map(str::to_string).collect();
        Ok(Self {
            investment,
            income,
            record_order,
        })
    }

    /// Replace the grid's income column order. Must be a permutation of
    /// the income category names.
    pub fn with_record_order<I, S>(mut self, order: I) -> Result<Self, TaxonomyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let order: Vec<String> = order.into_iter().map(Into::into).collect();
        let mut listed: Vec<&str> = order.iter().map(String::as_str).collect();
        let mut names: Vec<&str> = self.income.names().collect();
        listed.sort_unstable();
        names.sort_unstable();
        if listed != names {
            return Err(TaxonomyError::RecordOrder { order });
        }
        self.record_order = order;
        Ok(self)
    }

    /// The built-in statement-of-operations vocabulary.
    pub fn builtin() -> Self {
        Self {
            investment: Taxonomy {
                axis: Axis::Investment,
                categories: builtin_investment(),
            },
            income: Taxonomy {
                axis: Axis::Income,
                categories: builtin_income(),
            },
            record_order: BUILTIN_RECORD_ORDER.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn taxonomy(&self, axis: Axis) -> &Taxonomy {
        match axis {
            Axis::Investment => &self.investment,
            Axis::Income => &self.income,
        }
    }

    pub fn investment(&self) -> &Taxonomy {
        &self.investment
    }

    pub fn income(&self) -> &Taxonomy {
        &self.income
    }

    pub fn record_order(&self) -> impl Iterator<Item = &str> {
        self.record_order.iter().map(String::as_str)
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_investment() -> Vec<Category> {
    vec![
        Category::new(
            "non_affiliated",
            Axis::Investment,
            [
                "noncontrollednonaffiliate",
                "noncontrollednonaffiliated",
                "noncontrolledunaffiliate",
                "noncontrolledunaffiliatednoncontrolnonaffiliate",
                "noncontrolnonaffiliated",
                "noncontrolunaffiliate",
                "noncontrolunaffiliated",
            ],
        ),
        Category::new(
            "affiliated",
            Axis::Investment,
            [
                "noncontrolledaffiliate",
                "noncontrolledaffiliated",
                "noncontrolaffiliate",
                "noncontrolaffiliated",
                "affiliate",
            ],
        ),
        Category::new(
            "control",
            Axis::Investment,
            [
                "controlledaffiliate",
                "controlledaffiliated",
                "controlaffiliate",
                "controlaffiliated",
                "control",
            ],
        ),
    ]
}

fn builtin_income() -> Vec<Category> {
    vec![
        Category::new("interest", Axis::Income, ["interestincome", "incomeexcluding"]),
        Category::new("dividend", Axis::Income, ["dividend"]),
        Category::new("fee", Axis::Income, ["fee"]),
        Category::new(TOTAL, Axis::Income, ["total", "interestfeeanddividend", "totalinvestment"]),
        Category::new("pik", Axis::Income, ["pik", "paymentinkind", "paidinkind"]),
        Category::new("other", Axis::Income, ["other"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let reg = CategoryRegistry::builtin();
        let inv: Vec<_> = reg.investment().names().collect();
        let inc: Vec<_> = reg.income().names().collect();
        assert_eq!(inv, vec!["non_affiliated", "affiliated", "control"]);
        assert_eq!(inc, vec!["interest", "dividend", "fee", "total", "pik", "other"]);
    }

    #[test]
    fn test_builtin_passes_validation() {
        let reg = CategoryRegistry::builtin();
        let inv = Taxonomy::new(Axis::Investment, reg.investment().categories().to_vec()).unwrap();
        let inc = Taxonomy::new(Axis::Income, reg.income().categories().to_vec()).unwrap();
        let rebuilt = CategoryRegistry::new(inv, inc)
            .unwrap()
            .with_record_order(BUILTIN_RECORD_ORDER)
            .unwrap();
        assert_eq!(rebuilt, reg);
    }

    #[test]
    fn test_record_order() {
        let reg = CategoryRegistry::builtin();
        let order: Vec<_> = reg.record_order().collect();
        assert_eq!(order, vec!["interest", "total", "dividend", "pik", "fee", "other"]);

        // Without an explicit order the grid follows the taxonomy
        let plain = CategoryRegistry::new(reg.investment().clone(), reg.income().clone()).unwrap();
        assert!(plain.record_order().eq(reg.income().names()));

        let short = plain.clone().with_record_order(["interest", "total"]);
        assert!(matches!(short, Err(TaxonomyError::RecordOrder { .. })));

        let unknown = plain.with_record_order(["interest", "total", "dividend", "pik", "fee", "royalty"]);
        assert!(matches!(unknown, Err(TaxonomyError::RecordOrder { .. })));
    }

    #[test]
    fn test_lookup_by_axis() {
        let reg = CategoryRegistry::builtin();
        assert_eq!(reg.taxonomy(Axis::Income).axis(), Axis::Income);
        assert_eq!(reg.taxonomy(Axis::Investment.opposite()).len(), 6);
        assert_eq!(reg.taxonomy(Axis::Income.opposite()).len(), 3);
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(
            Taxonomy::new(Axis::Income, vec![]),
            Err(TaxonomyError::Empty { axis: Axis::Income })
        );

        let dup = vec![
            Category::new("fee", Axis::Income, ["fee"]),
            Category::new("fee", Axis::Income, ["fees"]),
        ];
        assert!(matches!(
            Taxonomy::new(Axis::Income, dup),
            Err(TaxonomyError::Duplicate { .. })
        ));

        let empty_terms = vec![Category::new("fee", Axis::Income, Vec::<String>::new())];
        assert!(matches!(
            Taxonomy::new(Axis::Income, empty_terms),
            Err(TaxonomyError::NoTerms { .. })
        ));

        let wrong = vec![Category::new("control", Axis::Investment, ["control"])];
        assert!(matches!(
            Taxonomy::new(Axis::Income, wrong),
            Err(TaxonomyError::WrongAxis { .. })
        ));

        let reserved = vec![Category::new(TOTAL, Axis::Investment, ["total"])];
        assert_eq!(
            Taxonomy::new(Axis::Investment, reserved),
            Err(TaxonomyError::ReservedTotal)
        );
    }

    #[test]
    fn test_registry_rejects_swapped_axes() {
        let reg = CategoryRegistry::builtin();
        let err = CategoryRegistry::new(reg.income().clone(), reg.investment().clone()).unwrap_err();
        assert!(matches!(err, TaxonomyError::WrongAxis { .. }));
    }
}
