//! Configuration types for the assignment engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// Customer-name matching configuration from matching.yaml.
///
/// Scores are strsim normalized Levenshtein similarity on a 0.0 to 1.0
/// scale; the metric is part of the engine's contract, since a different
/// metric would shift matches near the threshold.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    /// Minimum similarity score for a fuzzy match to be accepted.
    pub threshold: f64,
    /// Manual corrections: normalized raw name to canonical customer
    /// name. Consulted before any fuzzy scoring.
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: 0.85,
            overrides: HashMap::new(),
        }
    }
}

/// The contractor per-diem rule.
#[derive(Debug, Clone, Deserialize)]
pub struct PerDiemRule {
    /// Round-trip miles that must be strictly exceeded.
    pub miles_over: Decimal,
    /// Per-diem amount in dollars.
    pub amount: Decimal,
}

/// One contractor mileage-bonus tier.
#[derive(Debug, Clone, Deserialize)]
pub struct BonusTier {
    /// Round-trip miles that must be strictly exceeded.
    pub miles_over: Decimal,
    /// Bonus amount in dollars.
    pub amount: Decimal,
}

/// Travel-cost configuration from costing.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct CostingConfig {
    /// Dollars per round-trip mile, used to derive a base cost when the
    /// mileage table does not supply one.
    pub per_mile_rate: Decimal,
    /// Contractor per-diem rule.
    pub per_diem: PerDiemRule,
    /// Contractor bonus tiers. Stored highest threshold first; the first
    /// tier whose threshold is strictly exceeded wins.
    pub bonus_tiers: Vec<BonusTier>,
}

impl CostingConfig {
    /// Sorts bonus tiers highest threshold first so tier selection can
    /// take the first strict match.
    pub(crate) fn normalize(&mut self) {
        self.bonus_tiers
            .sort_by(|a, b| b.miles_over.cmp(&a.miles_over));
    }
}

impl Default for CostingConfig {
    fn default() -> Self {
        Self {
            per_mile_rate: Decimal::new(725, 3),
            per_diem: PerDiemRule {
                miles_over: Decimal::from(175),
                amount: Decimal::from(225),
            },
            bonus_tiers: vec![
                BonusTier {
                    miles_over: Decimal::from(800),
                    amount: Decimal::from(500),
                },
                BonusTier {
                    miles_over: Decimal::from(400),
                    amount: Decimal::from(250),
                },
            ],
        }
    }
}

/// A hard (evaluator, customer) exclusion.
///
/// The named evaluator is never assignable to the named customer, at any
/// cost. Customer names are compared on the canonical (trimmed,
/// lowercased) identity used by the mileage table.
#[derive(Debug, Clone, Deserialize)]
pub struct ExclusionRule {
    /// The evaluator's name.
    pub evaluator: String,
    /// The canonical customer name.
    pub customer: String,
}

/// Last-resort evaluator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LastResortConfig {
    /// Evaluators the optimizer should avoid unless no alternative exists.
    #[serde(default)]
    pub evaluators: Vec<String>,
    /// Additive cost penalty; an order of magnitude above realistic
    /// travel costs.
    pub penalty: Decimal,
}

impl Default for LastResortConfig {
    fn default() -> Self {
        Self {
            evaluators: Vec::new(),
            penalty: Decimal::from(10_000),
        }
    }
}

/// Eligibility configuration from eligibility.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EligibilityConfig {
    /// Hard (evaluator, customer) exclusions.
    #[serde(default)]
    pub exclusions: Vec<ExclusionRule>,
    /// Last-resort pool and its penalty.
    #[serde(default)]
    pub last_resort: LastResortConfig,
}

impl EligibilityConfig {
    /// Returns true when the (evaluator, customer) pair is block-listed.
    pub fn is_excluded(&self, evaluator: &str, customer: &str) -> bool {
        self.exclusions.iter().any(|rule| {
            rule.evaluator.trim() == evaluator.trim()
                && rule.customer.trim().to_lowercase() == customer.trim().to_lowercase()
        })
    }

    /// Returns true when the evaluator belongs to the last-resort pool.
    pub fn is_last_resort(&self, evaluator: &str) -> bool {
        self.last_resort
            .evaluators
            .iter()
            .any(|name| name.trim() == evaluator.trim())
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    matching: MatchingConfig,
    costing: CostingConfig,
    eligibility: EligibilityConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        matching: MatchingConfig,
        mut costing: CostingConfig,
        eligibility: EligibilityConfig,
    ) -> Self {
        costing.normalize();
        Self {
            matching,
            costing,
            eligibility,
        }
    }

    /// Returns the matching configuration.
    pub fn matching(&self) -> &MatchingConfig {
        &self.matching
    }

    /// Returns the costing configuration.
    pub fn costing(&self) -> &CostingConfig {
        &self.costing
    }

    /// Returns the eligibility configuration.
    pub fn eligibility(&self) -> &EligibilityConfig {
        &self.eligibility
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(
            MatchingConfig::default(),
            CostingConfig::default(),
            EligibilityConfig::default(),
        )
    }
}
