//! Job and job-slot models.

use serde::{Deserialize, Serialize};

/// One work order from the uploaded job table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job number.
    pub job_number: String,
    /// Free-text customer name; may carry numeric prefixes, parenthetical
    /// notes, and punctuation that entity resolution strips.
    pub customer_company: String,
    /// Comma-separated assignee list used only to infer how many
    /// evaluators the job needs. Absent means one evaluator.
    pub assignees: Option<String>,
}

/// A job whose customer resolved against the mileage table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedJob {
    /// Unique job number.
    pub job_number: String,
    /// The raw customer name from the job table.
    pub customer_company: String,
    /// The canonical customer identity in the mileage table.
    pub customer: String,
    /// How many evaluators this job needs; always at least one.
    pub evaluators_needed: usize,
}

/// One assignable seat on a job.
///
/// A job needing N evaluators expands into N slots sharing the same
/// resolved customer; the solver fills each slot with exactly one
/// evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSlot {
    /// The job this slot belongs to.
    pub job_number: String,
    /// The resolved customer shared by all slots of the job.
    pub customer: String,
}
