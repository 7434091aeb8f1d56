//! Label normalization: canonical comparable tokens plus the two
//! domain reducers used when classifying statement headings.

/// Strip punctuation, lowercase, and drop all whitespace.
///
/// `"Non-Controlled / Affiliated"` becomes `"noncontrolledaffiliated"`.
/// The final pass also drops combining marks that lowercasing can add
/// (`İ` lowercases to `i` plus a dot above).
pub fn canonicalize(s: &str) -> String {
    let kept: String = s
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    kept.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Lowercased text before the first `"income"`, or the whole lowercased
/// string when the word does not appear.
pub fn income_prefix(s: &str) -> String {
    let lower = s.to_lowercase();
    match lower.split_once("income") {
        Some((head, _)) => head.to_string(),
        None => lower,
    }
}

/// Keep only words mentioning control or affiliation, joined and canonicalized.
///
/// An empty result means the label carries no affiliation vocabulary.
pub fn affiliation_tokens(s: &str) -> String {
    let kept: String = s
        .to_lowercase()
        .split_whitespace()
        .filter(|w| w.contains("control") || w.contains("affiliate"))
        .collect();
    canonicalize(&kept)
}

/// Normalization strategy applied to a label before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    Income,
    Affiliation,
}

impl Normalizer {
    pub fn apply(&self, label: &str) -> String {
        match self {
            Normalizer::Income => canonicalize(&income_prefix(label)),
            Normalizer::Affiliation => affiliation_tokens(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_strips_punctuation_and_space() {
        assert_eq!(canonicalize("Non-Controlled/Non-Affiliated Investments"), "noncontrollednonaffiliatedinvestments");
        assert_eq!(canonicalize("  Total Investment\tIncome  "), "totalinvestmentincome");
        assert_eq!(canonicalize("Payment-in-kind (PIK)"), "paymentinkindpik");
        assert_eq!(canonicalize(""), "");
        assert_eq!(canonicalize("İNTEREST"), "interest");
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        for s in [
            "Interest income",
            "From controlled/affiliated investments:",
            "$1,234.56",
            "Fee & other income (net)",
            "İstanbul Holdings",
            "",
        ] {
            let once = canonicalize(s);
            assert_eq!(canonicalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_income_prefix() {
        assert_eq!(income_prefix("Interest Income"), "interest ");
        assert_eq!(income_prefix("Total investment income from controlled"), "total investment ");
        assert_eq!(income_prefix("Dividends"), "dividends");
        // Only the first occurrence splits
        assert_eq!(income_prefix("Other income, income excluded"), "other ");
    }

    #[test]
    fn test_affiliation_tokens() {
        assert_eq!(
            affiliation_tokens("From Non-Controlled/Non-Affiliated Investments:"),
            "noncontrollednonaffiliated"
        );
        assert_eq!(affiliation_tokens("Controlled affiliated investments"), "controlledaffiliated");
        assert_eq!(affiliation_tokens("Interest income"), "");
        assert_eq!(affiliation_tokens(""), "");
    }

    #[test]
    fn test_normalizer_strategies() {
        let label = "Payment-in-kind interest income";
        assert_eq!(Normalizer::Income.apply(label), "paymentinkindinterest");
        assert_eq!(Normalizer::Affiliation.apply(label), "");
    }
}
