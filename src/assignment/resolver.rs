//! Customer entity resolution.
//!
//! Job files carry free-text customer names ("1001 - Acme Co. (East)")
//! that must be mapped onto the canonical names used by the mileage
//! table. Resolution first normalizes both sides, then consults the
//! manual override table, then falls back to fuzzy scoring.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::MatchingConfig;

fn prefix_pattern() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    // Leading job/site numbers with an optional dash separator, e.g.
    // "1001 - Acme Co" or "1001- Acme Co".
    PREFIX.get_or_init(|| Regex::new(r"^\d+\s*[-\u{2013}]?\s*").expect("prefix pattern is valid"))
}

/// Normalizes a customer name for comparison.
///
/// The pipeline, in order: trim, strip a leading numeric/separator
/// prefix, drop parenthetical segments, keep only alphanumerics and
/// spaces, lowercase, collapse runs of whitespace.
///
/// # Examples
///
/// ```
/// use assignment_engine::assignment::normalize_customer_name;
///
/// assert_eq!(
///     normalize_customer_name("1001 - Acme Co. (East)"),
///     "acme co"
/// );
/// assert_eq!(normalize_customer_name("ACME CO EAST"), "acme co east");
/// ```
pub fn normalize_customer_name(raw: &str) -> String {
    let stripped = prefix_pattern().replace(raw.trim(), "");

    let mut depth = 0usize;
    let mut cleaned = String::with_capacity(stripped.len());
    for ch in stripped.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            _ if ch.is_alphanumeric() => cleaned.extend(ch.to_lowercase()),
            _ if ch.is_whitespace() => cleaned.push(' '),
            _ => {}
        }
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves raw job customer names to canonical mileage-table customers.
///
/// Resolution is a pure function of the raw name, the canonical name set,
/// the override table, and the threshold: the same inputs always produce
/// the same output. The similarity metric is strsim normalized
/// Levenshtein on the normalized names (0.0 to 1.0); score ties are
/// broken by the lexicographically smallest canonical name.
#[derive(Debug, Clone)]
pub struct CustomerResolver {
    /// (canonical, normalized) pairs, sorted by canonical name.
    candidates: Vec<(String, String)>,
    overrides: HashMap<String, String>,
    threshold: f64,
}

impl CustomerResolver {
    /// Builds a resolver over the canonical customer set.
    ///
    /// Override values are trimmed and lowercased so they line up with
    /// the canonical identities used by the mileage table.
    pub fn new(canonical: impl IntoIterator<Item = String>, matching: &MatchingConfig) -> Self {
        let mut candidates: Vec<(String, String)> = canonical
            .into_iter()
            .map(|name| {
                let normalized = normalize_customer_name(&name);
                (name, normalized)
            })
            .collect();
        candidates.sort();
        candidates.dedup();

        let overrides = matching
            .overrides
            .iter()
            .map(|(raw, canonical)| {
                (
                    normalize_customer_name(raw),
                    canonical.trim().to_lowercase(),
                )
            })
            .collect();

        Self {
            candidates,
            overrides,
            threshold: matching.threshold,
        }
    }

    /// Resolves a raw customer name to a canonical one, or `None` when no
    /// candidate clears the threshold.
    pub fn resolve(&self, raw: &str) -> Option<String> {
        let normalized = normalize_customer_name(raw);
        if normalized.is_empty() {
            return None;
        }

        if let Some(canonical) = self.overrides.get(&normalized) {
            return Some(canonical.clone());
        }

        let (canonical, score) = self.best_match(&normalized)?;
        (score >= self.threshold).then(|| canonical.to_string())
    }

    /// Returns the best-scoring canonical candidate and its score,
    /// ignoring the acceptance threshold.
    pub fn best_match(&self, normalized: &str) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (canonical, candidate) in &self.candidates {
            let score = strsim::normalized_levenshtein(normalized, candidate);
            // Strict greater keeps the lexicographically smallest name on
            // ties, since candidates are sorted.
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((canonical, score));
            }
        }
        best
    }
}
