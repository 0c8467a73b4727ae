//! Constrained minimum-cost assignment solve.
//!
//! The solve is a binary program over the sparse cost matrix: one
//! indicator per feasible (evaluator, slot) pair, each fillable slot
//! filled exactly once, each evaluator used at most once across the
//! whole run.

use std::collections::BTreeMap;

use good_lp::{
    Expression, ResolutionError, Solution, SolverModel, default_solver, variable, variables,
};
use rust_decimal::prelude::ToPrimitive;

use crate::error::{EngineError, EngineResult};
use crate::models::SolveStatus;

use super::matrix::CostMatrix;

/// One solver decision: the evaluator chosen for a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAssignment {
    /// Index into the matrix's slot list.
    pub slot: usize,
    /// The evaluator filling the slot.
    pub evaluator: String,
}

/// The outcome of one solver invocation.
///
/// An infeasible run carries no assignments: the engine reports the
/// status explicitly rather than fabricating a partial result that
/// violates the fill or one-time-use invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome {
    /// Terminal status of the solve.
    pub status: SolveStatus,
    /// Chosen (slot, evaluator) pairs, ordered by slot index.
    pub assignments: Vec<SlotAssignment>,
}

/// Solves the minimum-cost assignment over the matrix.
///
/// Unfillable slots were already split off during matrix construction;
/// every slot with at least one entry gets an exact-fill constraint.
/// The optimal objective value is deterministic for a given matrix.
/// When several assignments tie on cost the backend may pick any of
/// them, so tests and callers should assert on cost and invariants,
/// not on which tied evaluator landed where.
///
/// # Errors
///
/// Returns [`EngineError::Solver`] when the backend fails for any
/// reason other than infeasibility; infeasibility is a normal outcome
/// reported through [`SolveStatus::Infeasible`].
pub fn solve(matrix: &CostMatrix) -> EngineResult<SolveOutcome> {
    let fillable = matrix.fillable_slots();
    if fillable.is_empty() {
        return Ok(SolveOutcome {
            status: SolveStatus::Optimal,
            assignments: Vec::new(),
        });
    }

    // Cheap counting bound: fewer eligible evaluators than slots can
    // never satisfy one-time use. Detected here so the caller gets a
    // clear status instead of an opaque backend failure.
    if matrix.eligible_evaluators().len() < fillable.len() {
        return Ok(SolveOutcome {
            status: SolveStatus::Infeasible,
            assignments: Vec::new(),
        });
    }

    let mut vars = variables!();
    let xs: Vec<_> = (0..matrix.entries.len())
        .map(|i| vars.add(variable().binary().name(format!("assign_{i}"))))
        .collect();

    let objective = matrix
        .entries
        .iter()
        .zip(&xs)
        .fold(Expression::from(0.0), |acc, (entry, x)| {
            acc + entry.cost.to_f64().unwrap_or(f64::MAX) * *x
        });

    let mut problem = vars.minimise(objective).using(default_solver);

    // Each fillable slot is filled exactly once.
    let mut by_slot: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, entry) in matrix.entries.iter().enumerate() {
        by_slot.entry(entry.slot).or_default().push(i);
    }
    for group in by_slot.values() {
        let sum = group
            .iter()
            .fold(Expression::from(0.0), |acc, &i| acc + xs[i]);
        problem.add_constraint(sum.eq(1.0));
    }

    // Each evaluator is used at most once across the entire run. A
    // single binary variable already satisfies the bound, so only
    // evaluators with multiple entries need a constraint.
    let mut by_evaluator: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, entry) in matrix.entries.iter().enumerate() {
        by_evaluator
            .entry(entry.evaluator.as_str())
            .or_default()
            .push(i);
    }
    for group in by_evaluator.values() {
        if group.len() <= 1 {
            continue;
        }
        let sum = group
            .iter()
            .fold(Expression::from(0.0), |acc, &i| acc + xs[i]);
        problem.add_constraint(sum.leq(1.0));
    }

    match problem.solve() {
        Ok(solution) => {
            let mut assignments: Vec<SlotAssignment> = matrix
                .entries
                .iter()
                .zip(&xs)
                .filter(|(_, x)| solution.value(**x) >= 0.5)
                .map(|(entry, _)| SlotAssignment {
                    slot: entry.slot,
                    evaluator: entry.evaluator.clone(),
                })
                .collect();
            assignments.sort_by(|a, b| a.slot.cmp(&b.slot));
            Ok(SolveOutcome {
                status: SolveStatus::Optimal,
                assignments,
            })
        }
        Err(ResolutionError::Infeasible) => Ok(SolveOutcome {
            status: SolveStatus::Infeasible,
            assignments: Vec::new(),
        }),
        Err(err) => Err(EngineError::Solver {
            message: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::matrix::MatrixEntry;
    use crate::models::JobSlot;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn slot(job_number: &str, customer: &str) -> JobSlot {
        JobSlot {
            job_number: job_number.to_string(),
            customer: customer.to_string(),
        }
    }

    fn entry(evaluator: &str, slot: usize, cost: &str) -> MatrixEntry {
        MatrixEntry {
            evaluator: evaluator.to_string(),
            slot,
            cost: dec(cost),
            last_resort: false,
        }
    }

    fn matrix(slots: Vec<JobSlot>, entries: Vec<MatrixEntry>) -> CostMatrix {
        CostMatrix {
            slots,
            entries,
            unfillable: Vec::new(),
        }
    }

    /// SV-001: a two-slot job with exactly two eligible evaluators takes
    /// both of them.
    #[test]
    fn test_sv_001_two_slot_job_uses_both_evaluators() {
        let m = matrix(
            vec![slot("J-1001", "acme co"), slot("J-1001", "acme co")],
            vec![
                entry("Okafor", 0, "100"),
                entry("Rivera", 0, "300"),
                entry("Okafor", 1, "100"),
                entry("Rivera", 1, "300"),
            ],
        );

        let outcome = solve(&m).unwrap();
        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert_eq!(outcome.assignments.len(), 2);

        let mut evaluators: Vec<&str> = outcome
            .assignments
            .iter()
            .map(|a| a.evaluator.as_str())
            .collect();
        evaluators.sort();
        assert_eq!(evaluators, vec!["Okafor", "Rivera"]);
    }

    /// SV-002: one-time use holds across jobs; total cost is minimized
    /// globally.
    #[test]
    fn test_sv_002_one_time_use_across_jobs() {
        // Okafor is cheapest for both jobs but can only take one.
        let m = matrix(
            vec![slot("J-1001", "acme co"), slot("J-1002", "acme co")],
            vec![
                entry("Okafor", 0, "100"),
                entry("Rivera", 0, "500"),
                entry("Okafor", 1, "100"),
                entry("Rivera", 1, "150"),
            ],
        );

        let outcome = solve(&m).unwrap();
        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert_eq!(outcome.assignments.len(), 2);

        // Optimal split: Okafor -> slot 0, Rivera -> slot 1 (100 + 150).
        assert_eq!(outcome.assignments[0].evaluator, "Okafor");
        assert_eq!(outcome.assignments[1].evaluator, "Rivera");
    }

    /// SV-003: every slot is filled when capacity allows.
    #[test]
    fn test_sv_003_full_fill_when_feasible() {
        let m = matrix(
            vec![
                slot("J-1001", "acme co"),
                slot("J-1002", "national fuel"),
                slot("J-1003", "national grid"),
            ],
            vec![
                entry("Okafor", 0, "100"),
                entry("Rivera", 0, "120"),
                entry("Rivera", 1, "80"),
                entry("Chen", 1, "90"),
                entry("Chen", 2, "70"),
                entry("Okafor", 2, "60"),
            ],
        );

        let outcome = solve(&m).unwrap();
        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert_eq!(outcome.assignments.len(), 3);

        let mut evaluators: Vec<&str> = outcome
            .assignments
            .iter()
            .map(|a| a.evaluator.as_str())
            .collect();
        evaluators.sort();
        evaluators.dedup();
        assert_eq!(evaluators.len(), 3, "no evaluator may be reused");
    }

    /// SV-004: three slots and two eligible evaluators is infeasible and
    /// says so.
    #[test]
    fn test_sv_004_count_infeasibility_detected() {
        let m = matrix(
            vec![
                slot("J-1001", "acme co"),
                slot("J-1001", "acme co"),
                slot("J-1002", "acme co"),
            ],
            vec![
                entry("Okafor", 0, "100"),
                entry("Rivera", 0, "120"),
                entry("Okafor", 1, "100"),
                entry("Rivera", 1, "120"),
                entry("Okafor", 2, "100"),
                entry("Rivera", 2, "120"),
            ],
        );

        let outcome = solve(&m).unwrap();
        assert_eq!(outcome.status, SolveStatus::Infeasible);
        assert!(outcome.assignments.is_empty());
    }

    /// SV-005: structural infeasibility past the counting bound is still
    /// reported, never silently relaxed.
    #[test]
    fn test_sv_005_structural_infeasibility_detected() {
        // Three evaluators exist, but slots 0 and 1 can only be covered
        // by Okafor.
        let m = matrix(
            vec![
                slot("J-1001", "acme co"),
                slot("J-1002", "acme co"),
                slot("J-1003", "national fuel"),
            ],
            vec![
                entry("Okafor", 0, "100"),
                entry("Okafor", 1, "100"),
                entry("Rivera", 2, "80"),
                entry("Chen", 2, "90"),
            ],
        );

        let outcome = solve(&m).unwrap();
        assert_eq!(outcome.status, SolveStatus::Infeasible);
        assert!(outcome.assignments.is_empty());
    }

    /// SV-006: a penalized evaluator loses to a pricier primary while the
    /// penalty gap holds.
    #[test]
    fn test_sv_006_penalty_ordering_respected() {
        let m = matrix(
            vec![slot("J-1001", "acme co")],
            vec![
                MatrixEntry {
                    evaluator: "Sherman".to_string(),
                    slot: 0,
                    cost: dec("10050"), // 50 raw + 10000 penalty
                    last_resort: true,
                },
                entry("Okafor", 0, "900"),
            ],
        );

        let outcome = solve(&m).unwrap();
        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert_eq!(outcome.assignments[0].evaluator, "Okafor");
    }

    /// SV-007: the penalized evaluator still serves when nobody else can.
    #[test]
    fn test_sv_007_last_resort_used_when_alone() {
        let m = matrix(
            vec![slot("J-1001", "acme co")],
            vec![MatrixEntry {
                evaluator: "Sherman".to_string(),
                slot: 0,
                cost: dec("10050"),
                last_resort: true,
            }],
        );

        let outcome = solve(&m).unwrap();
        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert_eq!(outcome.assignments[0].evaluator, "Sherman");
    }

    /// SV-008: an empty matrix is trivially optimal.
    #[test]
    fn test_sv_008_empty_matrix_is_optimal() {
        let m = matrix(Vec::new(), Vec::new());
        let outcome = solve(&m).unwrap();
        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert!(outcome.assignments.is_empty());
    }
}
