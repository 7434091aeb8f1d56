//! The investment × income record grid and how classified rows fill it.

use log::debug;
use serde::{Deserialize, Serialize};

use incomegrid_core::{CategoryRegistry, CellValue, TOTAL};

use crate::coordinates::Coordinate;

/// One cell of the normalized output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub investment: String,
    pub income: String,
    pub value1: Option<CellValue>,
    pub value2: Option<CellValue>,
}

impl Record {
    fn empty(investment: &str, income: &str) -> Self {
        Self {
            investment: investment.to_string(),
            income: income.to_string(),
            value1: None,
            value2: None,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.value1.is_some() || self.value2.is_some()
    }

    /// Pair match in either order.
    fn matches(&self, a: &str, b: &str) -> bool {
        (self.investment == a && self.income == b) || (self.investment == b && self.income == a)
    }
}

/// Every investment/income pair plus the single grand-total record.
///
/// Investment-major; income columns follow the registry's record order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordGrid {
    records: Vec<Record>,
}

impl RecordGrid {
    pub fn new(registry: &CategoryRegistry) -> Self {
        let mut records: Vec<Record> = registry
            .investment()
            .names()
            .flat_map(|inv| registry.record_order().map(move |inc| Record::empty(inv, inc)))
            .collect();
        records.push(Record::empty(TOTAL, TOTAL));
        Self { records }
    }

    /// Write each row's values into the record its heading and subheading
    /// name, returning how many rows landed. Later rows overwrite earlier
    /// ones; rows naming no record are dropped.
    pub fn fill(&mut self, coordinates: &[Coordinate]) -> usize {
        let mut placed = 0;
        for coord in coordinates {
            let heading = coord.heading.category.as_str();
            let subheading = coord.subheading.category.as_str();

            let mut hit = false;
            for record in self.records.iter_mut().filter(|r| r.matches(heading, subheading)) {
                if record.is_filled() {
                    debug!(
                        "overwriting ({}, {}) with {:?}",
                        record.investment, record.income, coord.row.label
                    );
                }
                record.value1 = coord.row.value1.clone();
                record.value2 = coord.row.value2.clone();
                hit = true;
            }

            if hit {
                placed += 1;
            } else {
                debug!("dropping {:?} ({} / {})", coord.row.label, heading, subheading);
            }
        }
        placed
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use incomegrid_core::{Axis, Classification, Kind, Row};

    fn get<'a>(grid: &'a RecordGrid, investment: &str, income: &str) -> Option<&'a Record> {
        grid.records
            .iter()
            .find(|r| r.investment == investment && r.income == income)
    }

    fn coord(row: Row, heading: (&str, Kind), subheading: (&str, Kind)) -> Coordinate {
        Coordinate {
            row,
            heading: Classification::new(heading.0, heading.1, 100),
            subheading: Classification::new(subheading.0, subheading.1, 100),
        }
    }

    #[test]
    fn test_grid_size_and_order() {
        let registry = CategoryRegistry::builtin();
        let grid = RecordGrid::new(&registry);
        assert_eq!(grid.records.len(), 3 * 6 + 1);
        assert!(grid.records.iter().all(|r| !r.is_filled()));

        let first = &grid.records[0];
        assert_eq!((first.investment.as_str(), first.income.as_str()), ("non_affiliated", "interest"));
        let incomes: Vec<_> = grid.records[..6].iter().map(|r| r.income.as_str()).collect();
        assert_eq!(incomes, vec!["interest", "total", "dividend", "pik", "fee", "other"]);
        let last = grid.records.last().unwrap();
        assert_eq!((last.investment.as_str(), last.income.as_str()), ("total", "total"));
        assert!(get(&grid, "control", "total").is_some());
        assert!(get(&grid, "total", "interest").is_none());
    }

    #[test]
    fn test_fill_either_order() {
        let registry = CategoryRegistry::builtin();
        let mut grid = RecordGrid::new(&registry);
        let coords = vec![
            coord(
                Row::values("Interest income", 100.0, 120.0),
                ("non_affiliated", Kind::Investment),
                ("interest", Kind::Income),
            ),
            coord(
                Row::values("Controlled/affiliated investments", 7.0, 3.0),
                ("dividend", Kind::Income),
                ("control", Kind::Investment),
            ),
        ];

        assert_eq!(grid.fill(&coords), 2);
        let r = get(&grid, "non_affiliated", "interest").unwrap();
        assert_eq!(r.value1, Some(CellValue::Number(100.0)));
        assert_eq!(r.value2, Some(CellValue::Number(120.0)));
        assert_eq!(get(&grid, "control", "dividend").unwrap().value1, Some(CellValue::Number(7.0)));
    }

    #[test]
    fn test_unmatched_rows_dropped() {
        let registry = CategoryRegistry::builtin();
        let mut grid = RecordGrid::new(&registry);
        let coords = vec![
            Coordinate {
                row: Row::values("Gibberish", 1.0, 2.0),
                heading: Classification::no_match(),
                subheading: Classification::unmatched(Axis::Investment),
            },
            coord(
                Row::values("Odd", 1.0, 2.0),
                ("affiliated", Kind::Investment),
                ("No match", Kind::NoMatch),
            ),
        ];
        assert_eq!(grid.fill(&coords), 0);
        assert!(grid.records.iter().all(|r| !r.is_filled()));
    }

    #[test]
    fn test_last_writer_wins() {
        let registry = CategoryRegistry::builtin();
        let coords = vec![
            coord(Row::values("Fee income", 1.0, 1.0), ("control", Kind::Investment), ("fee", Kind::Income)),
            coord(Row::values("Other fees", 2.0, 2.0), ("control", Kind::Investment), ("fee", Kind::Income)),
        ];
        let mut grid = RecordGrid::new(&registry);
        assert_eq!(grid.fill(&coords), 2);
        let fee = grid
            .records
            .iter()
            .find(|r| r.investment == "control" && r.income == "fee")
            .unwrap();
        assert_eq!(fee.value1, Some(CellValue::Number(2.0)));
    }

    #[test]
    fn test_grand_total() {
        let registry = CategoryRegistry::builtin();
        let coords = vec![coord(
            Row::values("Total investment income", 500.0, 600.0),
            ("total", Kind::Investment),
            ("total", Kind::Income),
        )];
        let mut grid = RecordGrid::new(&registry);
        assert_eq!(grid.fill(&coords), 1);
        assert_eq!(get(&grid, "total", "total").unwrap().value2, Some(CellValue::Number(600.0)));
        assert_eq!(grid.records.iter().filter(|r| r.is_filled()).count(), 1);
    }
}
