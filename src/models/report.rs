//! Assignment report models.
//!
//! This module contains the [`AssignmentReport`] type and its associated
//! structures that capture all outputs from an assignment run: assignment
//! rows, totals, solve status, and diagnostics.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::EmploymentStatus;

/// The tier an assignment was made at.
///
/// Last-resort managers carry a large additive cost penalty in the matrix,
/// so the optimizer only reaches for them when no primary evaluator can
/// cover a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentTier {
    /// A regular evaluator chosen on cost alone.
    Primary,
    /// A penalized manager used because no alternative was available.
    LastResortManager,
}

/// Terminal status of one solver invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Every feasible slot was filled at minimum total cost.
    Optimal,
    /// The slots could not all be filled under the one-time-use
    /// constraint. No partial assignment is fabricated.
    Infeasible,
}

/// One row of the final assignment table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    /// The job being staffed.
    pub job_number: String,
    /// The canonical customer the job resolved to.
    pub customer: String,
    /// The evaluator filling this slot.
    pub evaluator: String,
    /// Round-trip miles from the chosen mileage record.
    pub round_trip_miles: Option<Decimal>,
    /// Base travel cost before supplements.
    pub base_cost: Option<Decimal>,
    /// Contractor per-diem supplement.
    pub per_diem: Decimal,
    /// Contractor distance-tier bonus.
    pub mileage_bonus: Decimal,
    /// Base cost plus per-diem plus bonus.
    pub total_cost: Decimal,
    /// The evaluator's employment status.
    pub status: EmploymentStatus,
    /// Whether the assignment drew on the last-resort pool.
    pub tier: AssignmentTier,
}

/// A job whose customer name could not be resolved against the mileage
/// table. Such jobs are excluded from slot expansion and reported here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedJob {
    /// The job number from the job table.
    pub job_number: String,
    /// The raw customer name that failed to resolve.
    pub customer_company: String,
}

/// A slot with no eligible evaluator in the cost matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnfillableSlot {
    /// The job the slot belongs to.
    pub job_number: String,
    /// The resolved customer with no mileage coverage.
    pub customer: String,
}

/// Diagnostics accumulated over one run.
///
/// These are recoverable conditions, reported for visibility rather than
/// failing the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunDiagnostics {
    /// Jobs excluded because their customer did not resolve.
    pub unresolved_jobs: Vec<UnresolvedJob>,
    /// Slots excluded because no evaluator covers their customer.
    pub unfillable_slots: Vec<UnfillableSlot>,
}

/// Aggregated totals for an assignment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    /// Sum of total cost over all assignment rows.
    pub grand_total: Decimal,
    /// Number of slots the solver filled.
    pub assigned_slots: usize,
    /// Number of slots produced by expansion, fillable or not.
    pub total_slots: usize,
}

/// The complete result of one assignment run.
///
/// # Example
///
/// ```
/// use assignment_engine::models::{
///     AssignmentReport, RunDiagnostics, RunTotals, SolveStatus,
/// };
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let report = AssignmentReport {
///     run_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "1.0.0".to_string(),
///     status: SolveStatus::Optimal,
///     assignments: vec![],
///     totals: RunTotals {
///         grand_total: Decimal::ZERO,
///         assigned_slots: 0,
///         total_slots: 0,
///     },
///     diagnostics: RunDiagnostics {
///         unresolved_jobs: vec![],
///         unfillable_slots: vec![],
///     },
/// };
/// assert_eq!(report.status, SolveStatus::Optimal);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentReport {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// Terminal solver status for the run.
    pub status: SolveStatus,
    /// The assignment table, sorted by job number then evaluator.
    pub assignments: Vec<AssignmentRow>,
    /// Aggregated totals.
    pub totals: RunTotals,
    /// Unresolved customers and unfillable slots observed during the run.
    pub diagnostics: RunDiagnostics,
}
