//! Value cell parsing.
//!
//! Statement exports print amounts as `1,234`, `$1,234.50` or `(1,234)` for
//! negatives. Those become numbers. Blank cells and the usual spreadsheet
//! null markers (`n/a`, `NULL`, `#N/A`, ...) are absent. Anything else
//! (dashes, footnote marks) is kept verbatim as text.

use anyhow::Result;
use regex::Regex;

use incomegrid_core::CellValue;

/// Cell contents read as missing values, matched exactly after trimming.
const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub struct CellParser {
    paren_re: Regex,
    amount_re: Regex,
}

impl CellParser {
    pub fn new() -> Result<Self> {
        let paren_re = Regex::new(r"^\(\s*(?P<inner>[^()]*?)\s*\)$")?;
        let amount_re = Regex::new(concat!(
            r"^(?P<sign>-)?\s*\$?\s*",
            r"(?P<num>(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?|\.\d+)$"
        ))?;
        Ok(Self { paren_re, amount_re })
    }

    pub fn parse(&self, raw: &str) -> Option<CellValue> {
        let s = raw.trim();
        if s.is_empty() || NULL_TOKENS.contains(&s) {
            return None;
        }

        let (body, negated) = match self.paren_re.captures(s) {
            Some(caps) => (caps.name("inner").map_or("", |m| m.as_str()), true),
            None => (s, false),
        };

        let number = self.amount_re.captures(body).and_then(|caps| {
            let n: f64 = caps["num"].replace(',', "").parse().ok()?;
            let n = if caps.name("sign").is_some() { -n } else { n };
            Some(if negated { -n } else { n })
        });

        Some(match number {
            Some(n) => CellValue::Number(n),
            None => CellValue::Text(s.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Option<CellValue> {
        CellParser::new().unwrap().parse(s)
    }

    #[test]
    fn test_blank_cells_are_absent() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
    }

    #[test]
    fn test_null_markers_are_absent() {
        for s in ["n/a", "N/A", "NA", "NULL", "null", "nan", "NaN", "None", "#N/A"] {
            assert_eq!(parse(s), None, "{:?}", s);
        }
        // Only exact markers, not words that contain them
        assert_eq!(parse("Nancy"), Some(CellValue::Text("Nancy".to_string())));
        assert_eq!(parse("none"), Some(CellValue::Text("none".to_string())));
    }

    #[test]
    fn test_amount_formats() {
        assert_eq!(parse("100"), Some(CellValue::Number(100.0)));
        assert_eq!(parse("198,552"), Some(CellValue::Number(198552.0)));
        assert_eq!(parse("$ 1,234.50"), Some(CellValue::Number(1234.5)));
        assert_eq!(parse("-15.00"), Some(CellValue::Number(-15.0)));
        assert_eq!(parse("(3,605)"), Some(CellValue::Number(-3605.0)));
        assert_eq!(parse("$(12)"), Some(CellValue::Text("$(12)".to_string())));
    }

    #[test]
    fn test_non_numeric_passes_through() {
        assert_eq!(parse("—"), Some(CellValue::Text("—".to_string())));
        assert_eq!(parse(" n/a "), None);
        assert_eq!(parse("1,23"), Some(CellValue::Text("1,23".to_string())));
    }
}
