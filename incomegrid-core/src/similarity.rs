//! Fuzzy string similarity on a 0..=100 integer scale.
//!
//! `ratio` is the normalized Indel similarity (`2 * LCS / (|a| + |b|)`),
//! the partial variant slides the shorter string across the longer one,
//! and the token-set variants compare the shared/unshared word sets so
//! that reordered or padded labels still score high.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Similarity function used by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scorer {
    Ratio,
    PartialRatio,
    TokenSet,
    PartialTokenSet,
    JaroWinkler,
}

impl Scorer {
    pub fn score(&self, a: &str, b: &str) -> u8 {
        match self {
            Scorer::Ratio => ratio(a, b),
            Scorer::PartialRatio => partial_ratio(a, b),
            Scorer::TokenSet => token_set_ratio(a, b),
            Scorer::PartialTokenSet => partial_token_set_ratio(a, b),
            Scorer::JaroWinkler => jaro_winkler(a, b),
        }
    }
}

fn to_percent(similarity: f64) -> u8 {
    (similarity * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
}

/// Length of the longest common subsequence.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn indel_similarity(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    (2 * lcs_len(a, b)) as f64 / total as f64
}

/// Whole-string similarity. Either side empty scores 0.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    to_percent(indel_similarity(&a, &b))
}

/// Best `ratio` of the shorter string against any equal-length window of
/// the longer one.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

    let mut best = 0.0f64;
    for window in longer.windows(shorter.len()) {
        let r = indel_similarity(shorter, window);
        if r > 0.995 {
            return 100;
        }
        best = best.max(r);
    }
    to_percent(best)
}

/// Replace anything that is not alphanumeric with a space, lowercase, trim.
fn process(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

fn token_set(a: &str, b: &str, ratio_fn: fn(&str, &str) -> u8) -> u8 {
    let p1 = process(a);
    let p2 = process(b);
    if p1.is_empty() || p2.is_empty() {
        return 0;
    }

    let tokens1: BTreeSet<&str> = p1.split_whitespace().collect();
    let tokens2: BTreeSet<&str> = p2.split_whitespace().collect();

    // BTreeSet set operations already yield sorted tokens
    let sect = tokens1.intersection(&tokens2).copied().collect::<Vec<_>>().join(" ");
    let diff1 = tokens1.difference(&tokens2).copied().collect::<Vec<_>>().join(" ");
    let diff2 = tokens2.difference(&tokens1).copied().collect::<Vec<_>>().join(" ");

    let combined_1to2 = format!("{} {}", sect, diff1).trim().to_string();
    let combined_2to1 = format!("{} {}", sect, diff2).trim().to_string();

    [
        ratio_fn(&sect, &combined_1to2),
        ratio_fn(&sect, &combined_2to1),
        ratio_fn(&combined_1to2, &combined_2to1),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

/// Token-set similarity: shared words dominate, word order is ignored.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    token_set(a, b, ratio)
}

/// Token-set similarity with substring-tolerant comparison of the sets.
pub fn partial_token_set_ratio(a: &str, b: &str) -> u8 {
    token_set(a, b, partial_ratio)
}

/// Jaro-Winkler similarity scaled to 0..=100.
pub fn jaro_winkler(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    to_percent(strsim::jaro_winkler(a, b))
}
