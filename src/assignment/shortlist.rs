//! Ranked shortlists for the manual assignment path.
//!
//! Instead of a full solve, a human can pick evaluators job by job from
//! a ranked shortlist. One-time use is preserved by passing the set of
//! already-assigned evaluators into each shortlist computation; there is
//! no shared mutable state between calls.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EligibilityConfig;
use crate::models::{EmploymentStatus, UnresolvedJob};

use super::matrix::MileageTable;

/// Default number of candidates per shortlist.
pub const DEFAULT_SHORTLIST_SIZE: usize = 5;

/// The ranked shortlist for one resolved job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobShortlist {
    /// The job being staffed.
    pub job_number: String,
    /// The raw customer name from the job table.
    pub customer_company: String,
    /// The resolved canonical customer.
    pub customer: String,
    /// Candidates, cheapest first.
    pub candidates: Vec<ShortlistEntry>,
}

/// Shortlists for every resolved job, plus resolution diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortlistReport {
    /// One shortlist per resolved job, in job order.
    pub shortlists: Vec<JobShortlist>,
    /// Jobs whose customer did not resolve.
    pub unresolved_jobs: Vec<UnresolvedJob>,
}

/// One candidate on a shortlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortlistEntry {
    /// The candidate evaluator.
    pub evaluator: String,
    /// Round-trip miles from the mileage record.
    pub round_trip_miles: Option<Decimal>,
    /// Unpenalized total cost for this pairing.
    pub total_cost: Decimal,
    /// The candidate's employment status.
    pub status: EmploymentStatus,
}

/// Ranks the eligible evaluators for one customer, cheapest first.
///
/// Block-listed pairings and already-assigned evaluators never appear.
/// Cost ties are ordered by evaluator name so the ranking is stable.
/// Costs are the unpenalized record totals; the last-resort penalty is
/// an optimizer bias, not a price a human needs to see.
pub fn rank_shortlist(
    table: &MileageTable,
    customer: &str,
    eligibility: &EligibilityConfig,
    already_assigned: &HashSet<String>,
    top_k: usize,
) -> Vec<ShortlistEntry> {
    let mut candidates: Vec<ShortlistEntry> = table
        .records_for_customer(customer)
        .filter(|record| !eligibility.is_excluded(&record.evaluator, &record.customer))
        .filter(|record| !already_assigned.contains(&record.evaluator))
        .map(|record| ShortlistEntry {
            evaluator: record.evaluator.clone(),
            round_trip_miles: record.round_trip_miles,
            total_cost: record.costs.total_cost,
            status: record.status,
        })
        .collect();

    candidates.sort_by(|a, b| {
        a.total_cost
            .cmp(&b.total_cost)
            .then_with(|| a.evaluator.cmp(&b.evaluator))
    });
    candidates.truncate(top_k);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CostingConfig, ExclusionRule, LastResortConfig};
    use crate::models::MileageRecord;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn row(evaluator: &str, miles: &str, cost: &str) -> MileageRecord {
        MileageRecord {
            evaluator: evaluator.to_string(),
            customer: "acme co".to_string(),
            one_way_miles: None,
            round_trip_miles: Some(dec(miles)),
            drive_time_hours: None,
            base_cost: Some(dec(cost)),
        }
    }

    fn table() -> MileageTable {
        MileageTable::annotate(
            vec![
                row("Okafor", "120", "87"),
                row("Rivera", "60", "43.50"),
                row("Chen", "200", "145"),
            ],
            &["Okafor".to_string(), "Rivera".to_string(), "Chen".to_string()],
            &CostingConfig::default(),
        )
    }

    /// SL-001: candidates come back cheapest first.
    #[test]
    fn test_sl_001_ranked_cheapest_first() {
        let shortlist = rank_shortlist(
            &table(),
            "acme co",
            &EligibilityConfig::default(),
            &HashSet::new(),
            DEFAULT_SHORTLIST_SIZE,
        );

        let names: Vec<&str> = shortlist.iter().map(|e| e.evaluator.as_str()).collect();
        assert_eq!(names, vec!["Rivera", "Okafor", "Chen"]);
        assert_eq!(shortlist[0].total_cost, dec("43.50"));
    }

    /// SL-002: already-assigned evaluators are excluded.
    #[test]
    fn test_sl_002_assigned_evaluators_excluded() {
        let assigned: HashSet<String> = ["Rivera".to_string()].into_iter().collect();
        let shortlist = rank_shortlist(
            &table(),
            "acme co",
            &EligibilityConfig::default(),
            &assigned,
            DEFAULT_SHORTLIST_SIZE,
        );

        assert!(shortlist.iter().all(|e| e.evaluator != "Rivera"));
        assert_eq!(shortlist[0].evaluator, "Okafor");
    }

    /// SL-003: top-k truncation keeps the cheapest candidates.
    #[test]
    fn test_sl_003_top_k_truncation() {
        let shortlist = rank_shortlist(
            &table(),
            "acme co",
            &EligibilityConfig::default(),
            &HashSet::new(),
            2,
        );

        assert_eq!(shortlist.len(), 2);
        assert_eq!(shortlist[0].evaluator, "Rivera");
        assert_eq!(shortlist[1].evaluator, "Okafor");
    }

    /// SL-004: block-listed pairings never appear, even unassigned.
    #[test]
    fn test_sl_004_exclusions_filtered() {
        let eligibility = EligibilityConfig {
            exclusions: vec![ExclusionRule {
                evaluator: "Rivera".to_string(),
                customer: "acme co".to_string(),
            }],
            last_resort: LastResortConfig::default(),
        };

        let shortlist = rank_shortlist(
            &table(),
            "acme co",
            &eligibility,
            &HashSet::new(),
            DEFAULT_SHORTLIST_SIZE,
        );

        assert!(shortlist.iter().all(|e| e.evaluator != "Rivera"));
    }

    /// SL-005: cost ties rank by evaluator name for stability.
    #[test]
    fn test_sl_005_cost_ties_rank_by_name() {
        let table = MileageTable::annotate(
            vec![row("Zhao", "100", "87"), row("Adams", "100", "87")],
            &["Zhao".to_string(), "Adams".to_string()],
            &CostingConfig::default(),
        );

        let shortlist = rank_shortlist(
            &table,
            "acme co",
            &EligibilityConfig::default(),
            &HashSet::new(),
            DEFAULT_SHORTLIST_SIZE,
        );

        assert_eq!(shortlist[0].evaluator, "Adams");
        assert_eq!(shortlist[1].evaluator, "Zhao");
    }

    /// SL-006: an unknown customer yields an empty shortlist.
    #[test]
    fn test_sl_006_unknown_customer_is_empty() {
        let shortlist = rank_shortlist(
            &table(),
            "far field co",
            &EligibilityConfig::default(),
            &HashSet::new(),
            DEFAULT_SHORTLIST_SIZE,
        );
        assert!(shortlist.is_empty());
    }
}
