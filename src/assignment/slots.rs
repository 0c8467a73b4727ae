//! Job slot expansion.
//!
//! A job needing N evaluators becomes N identical slots; the solver fills
//! each slot with exactly one evaluator.

use crate::models::{JobSlot, ResolvedJob};

/// Counts how many evaluators a job needs from its free-text assignee
/// field.
///
/// The count is the number of non-empty comma-separated tokens; a missing
/// or blank field means one evaluator. The count is never zero.
///
/// # Examples
///
/// ```
/// use assignment_engine::assignment::assignee_count;
///
/// assert_eq!(assignee_count(Some("Rivera, Okafor")), 2);
/// assert_eq!(assignee_count(Some("Rivera")), 1);
/// assert_eq!(assignee_count(None), 1);
/// ```
pub fn assignee_count(assignees: Option<&str>) -> usize {
    let count = assignees
        .map(|field| {
            field
                .split(',')
                .filter(|token| !token.trim().is_empty())
                .count()
        })
        .unwrap_or(0);
    count.max(1)
}

/// Expands resolved jobs into assignment slots.
///
/// Each job contributes `evaluators_needed` slots tagged with its job
/// number and resolved customer. Pure expansion; slot order follows job
/// order.
pub fn expand_slots(jobs: &[ResolvedJob]) -> Vec<JobSlot> {
    jobs.iter()
        .flat_map(|job| {
            std::iter::repeat_with(|| JobSlot {
                job_number: job.job_number.clone(),
                customer: job.customer.clone(),
            })
            .take(job.evaluators_needed)
        })
        .collect()
}
