//! Joins solver output back into the final assignment table.

use crate::config::EligibilityConfig;
use crate::models::{AssignmentRow, AssignmentTier, JobSlot};

use super::matrix::MileageTable;
use super::solver::SlotAssignment;

/// Projects solver decisions onto the assignment table.
///
/// Each decision is joined with its slot and the annotated mileage
/// record for the (evaluator, customer) pair. Rows carry the
/// unpenalized record costs; the tier column records whether the
/// evaluator came from the last-resort pool. Output is sorted by job
/// number, then evaluator. Pure projection, no new business logic.
pub fn assemble(
    assignments: &[SlotAssignment],
    slots: &[JobSlot],
    table: &MileageTable,
    eligibility: &EligibilityConfig,
) -> Vec<AssignmentRow> {
    let mut rows: Vec<AssignmentRow> = assignments
        .iter()
        .filter_map(|assignment| {
            let slot = slots.get(assignment.slot)?;
            let record = table.get(&assignment.evaluator, &slot.customer)?;
            let tier = if eligibility.is_last_resort(&assignment.evaluator) {
                AssignmentTier::LastResortManager
            } else {
                AssignmentTier::Primary
            };
            Some(AssignmentRow {
                job_number: slot.job_number.clone(),
                customer: slot.customer.clone(),
                evaluator: record.evaluator.clone(),
                round_trip_miles: record.round_trip_miles,
                base_cost: record.base_cost,
                per_diem: record.costs.per_diem,
                mileage_bonus: record.costs.mileage_bonus,
                total_cost: record.costs.total_cost,
                status: record.status,
                tier,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        a.job_number
            .cmp(&b.job_number)
            .then_with(|| a.evaluator.cmp(&b.evaluator))
    });
    rows
}
