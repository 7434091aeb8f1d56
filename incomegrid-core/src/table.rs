//! Statement table rows.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A value cell, passed through without validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

/// One statement line: a free-text label and two period columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub label: String,
    pub value1: Option<CellValue>,
    pub value2: Option<CellValue>,
}

impl Row {
    pub fn new(
        label: impl Into<String>,
        value1: Option<CellValue>,
        value2: Option<CellValue>,
    ) -> Self {
        Self {
            label: label.into(),
            value1,
            value2,
        }
    }

    /// A label-only row, i.e. a section heading.
    pub fn heading(label: impl Into<String>) -> Self {
        Self::new(label, None, None)
    }

    /// Convenience for numeric lines in both periods.
    pub fn values(label: impl Into<String>, value1: f64, value2: f64) -> Self {
        Self::new(label, Some(value1.into()), Some(value2.into()))
    }

    /// Blank rows carry no value in either column.
    pub fn is_blank(&self) -> bool {
        self.value1.is_none() && self.value2.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_rows() {
        assert!(Row::heading("Investment income").is_blank());
        assert!(!Row::values("Interest income", 100.0, 120.0).is_blank());
        assert!(!Row::new("Dividend income", None, Some(5.0.into())).is_blank());
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Number(100.0).to_string(), "100");
        assert_eq!(CellValue::Number(-12.5).to_string(), "-12.5");
        assert_eq!(CellValue::from("—").to_string(), "—");
    }

    #[test]
    fn test_cell_serializes_untagged() {
        let row = Row::new("Fee income", Some(1250.0.into()), Some("—".into()));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["value1"], serde_json::json!(1250.0));
        assert_eq!(json["value2"], serde_json::json!("—"));
    }
}
