//! Annotated mileage table and cost matrix construction.
//!
//! The mileage table joins raw distance rows with roster-derived status
//! and the cost model, deduplicating repeated (evaluator, customer)
//! observations. The cost matrix then produces one entry per eligible
//! (evaluator, slot) pair, with exclusions and last-resort penalties
//! applied before the solver ever sees a cost.

use std::collections::{BTreeMap, BTreeSet, btree_map::Entry};

use rust_decimal::Decimal;

use crate::config::{CostingConfig, EligibilityConfig};
use crate::models::{EmploymentStatus, JobSlot, MileageRecord, UnfillableSlot};

use super::cost_model::{CostBreakdown, derive_cost};

/// One deduplicated (evaluator, customer) observation with derived costs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedMileage {
    /// The evaluator's name, trimmed.
    pub evaluator: String,
    /// The canonical customer identity: trimmed and lowercased.
    pub customer: String,
    /// Status derived from the full-time roster.
    pub status: EmploymentStatus,
    /// One-way miles as observed.
    pub one_way_miles: Option<Decimal>,
    /// Round-trip miles as observed.
    pub round_trip_miles: Option<Decimal>,
    /// Drive time as observed.
    pub drive_time_hours: Option<Decimal>,
    /// Base cost, supplied or derived from miles and the per-mile rate.
    pub base_cost: Option<Decimal>,
    /// The derived cost breakdown.
    pub costs: CostBreakdown,
}

/// The annotated, deduplicated mileage table for one run.
///
/// Keys are (evaluator, customer) pairs; iteration order is therefore
/// deterministic, which downstream tie-breaks rely on.
#[derive(Debug, Clone, Default)]
pub struct MileageTable {
    records: BTreeMap<(String, String), AnnotatedMileage>,
}

impl MileageTable {
    /// Annotates raw mileage rows with status and derived costs.
    ///
    /// Evaluator names are trimmed; customer names are trimmed and
    /// lowercased to form the canonical identity the resolver matches
    /// against. Rows without a base cost derive one from round-trip miles
    /// and the configured per-mile rate. When the same (evaluator,
    /// customer) pair appears more than once the record with the highest
    /// total cost is kept; exact cost ties keep the later row.
    pub fn annotate(
        rows: Vec<MileageRecord>,
        full_time_roster: &[String],
        costing: &CostingConfig,
    ) -> Self {
        let mut records = BTreeMap::new();

        for row in rows {
            let evaluator = row.evaluator.trim().to_string();
            let customer = row.customer.trim().to_lowercase();
            if evaluator.is_empty() || customer.is_empty() {
                continue;
            }

            let status = EmploymentStatus::from_roster(&evaluator, full_time_roster);
            let base_cost = row
                .base_cost
                .or_else(|| row.round_trip_miles.map(|miles| miles * costing.per_mile_rate));
            let costs = derive_cost(status, row.round_trip_miles, base_cost, costing);

            let annotated = AnnotatedMileage {
                evaluator: evaluator.clone(),
                customer: customer.clone(),
                status,
                one_way_miles: row.one_way_miles,
                round_trip_miles: row.round_trip_miles,
                drive_time_hours: row.drive_time_hours,
                base_cost,
                costs,
            };

            match records.entry((evaluator, customer)) {
                Entry::Vacant(slot) => {
                    slot.insert(annotated);
                }
                Entry::Occupied(mut slot) => {
                    if annotated.costs.total_cost >= slot.get().costs.total_cost {
                        slot.insert(annotated);
                    }
                }
            }
        }

        Self { records }
    }

    /// Looks up the record for an (evaluator, customer) pair.
    pub fn get(&self, evaluator: &str, customer: &str) -> Option<&AnnotatedMileage> {
        self.records
            .get(&(evaluator.to_string(), customer.to_string()))
    }

    /// Returns the distinct canonical customer names, sorted.
    pub fn customers(&self) -> Vec<String> {
        let set: BTreeSet<&String> = self.records.keys().map(|(_, customer)| customer).collect();
        set.into_iter().cloned().collect()
    }

    /// Iterates the records covering one customer, in evaluator order.
    pub fn records_for_customer<'a>(
        &'a self,
        customer: &'a str,
    ) -> impl Iterator<Item = &'a AnnotatedMileage> {
        self.records
            .values()
            .filter(move |record| record.customer == customer)
    }

    /// Number of deduplicated records in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One feasible (evaluator, slot) pairing and its solver cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixEntry {
    /// The evaluator's name.
    pub evaluator: String,
    /// Index into [`CostMatrix::slots`].
    pub slot: usize,
    /// Total cost including any last-resort penalty. Report rows show
    /// the unpenalized record costs; the penalty only biases the
    /// optimizer.
    pub cost: Decimal,
    /// Whether the penalty was applied to this entry.
    pub last_resort: bool,
}

/// The sparse cost matrix consumed by the solver.
#[derive(Debug, Clone)]
pub struct CostMatrix {
    /// All expanded slots, fillable or not.
    pub slots: Vec<JobSlot>,
    /// Feasible (evaluator, slot) entries.
    pub entries: Vec<MatrixEntry>,
    /// Slots with no eligible evaluator, reported rather than solved.
    pub unfillable: Vec<UnfillableSlot>,
}

impl CostMatrix {
    /// Builds the matrix for the given slots.
    ///
    /// Block-listed (evaluator, customer) pairs are dropped before
    /// anything else; last-resort evaluators get the configured penalty
    /// added to every entry. Slots that end up with no entries are
    /// recorded as unfillable diagnostics.
    pub fn build(
        table: &MileageTable,
        slots: Vec<JobSlot>,
        eligibility: &EligibilityConfig,
    ) -> Self {
        let mut entries = Vec::new();
        let mut unfillable = Vec::new();

        for (idx, slot) in slots.iter().enumerate() {
            let before = entries.len();
            for record in table.records_for_customer(&slot.customer) {
                if eligibility.is_excluded(&record.evaluator, &record.customer) {
                    continue;
                }
                let last_resort = eligibility.is_last_resort(&record.evaluator);
                let mut cost = record.costs.total_cost;
                if last_resort {
                    cost += eligibility.last_resort.penalty;
                }
                entries.push(MatrixEntry {
                    evaluator: record.evaluator.clone(),
                    slot: idx,
                    cost,
                    last_resort,
                });
            }
            if entries.len() == before {
                unfillable.push(UnfillableSlot {
                    job_number: slot.job_number.clone(),
                    customer: slot.customer.clone(),
                });
            }
        }

        Self {
            slots,
            entries,
            unfillable,
        }
    }

    /// The distinct evaluators with at least one entry.
    pub fn eligible_evaluators(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .map(|entry| entry.evaluator.as_str())
            .collect()
    }

    /// The indices of slots with at least one entry.
    pub fn fillable_slots(&self) -> BTreeSet<usize> {
        self.entries.iter().map(|entry| entry.slot).collect()
    }
}
