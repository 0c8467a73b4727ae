//! HTTP request handlers for the assignment engine API.
//!
//! This module contains the handler functions for all API endpoints and
//! the orchestration pipeline they drive: annotate the mileage table,
//! resolve customers, expand slots, build the cost matrix, solve, and
//! assemble the report.

use std::collections::{BTreeSet, HashSet};

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::assignment::{
    CostMatrix, CustomerResolver, JobShortlist, MileageTable, ShortlistReport, assemble,
    assignee_count, expand_slots, rank_shortlist, solve,
};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AssignmentReport, Job, MileageRecord, ResolvedJob, RunDiagnostics, RunTotals, UnresolvedJob,
};

use super::request::{AssignmentRequest, ShortlistRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/assignments", post(assignments_handler))
        .route("/shortlists", post(shortlists_handler))
        .with_state(state)
}

/// Handler for the POST /assignments endpoint.
///
/// Accepts one snapshot of the input tables and returns the optimized
/// assignment report.
async fn assignments_handler(
    State(state): State<AppState>,
    payload: Result<Json<AssignmentRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing assignment request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_error(&rejection, correlation_id);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let mileage: Vec<MileageRecord> = request.mileage.into_iter().map(Into::into).collect();
    let jobs: Vec<Job> = request.jobs.into_iter().map(Into::into).collect();

    match run_assignment(mileage, &request.full_time_roster, jobs, state.config().config()) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %report.run_id,
                status = ?report.status,
                assigned_slots = report.totals.assigned_slots,
                total_slots = report.totals.total_slots,
                grand_total = %report.totals.grand_total,
                unresolved = report.diagnostics.unresolved_jobs.len(),
                unfillable = report.diagnostics.unfillable_slots.len(),
                "Assignment run completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(report),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Assignment run failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Handler for the POST /shortlists endpoint.
///
/// Returns a ranked shortlist per resolved job for the manual
/// assignment flow. Evaluators named in `assigned` are excluded,
/// which is how one-time use carries across successive manual picks.
async fn shortlists_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortlistRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing shortlist request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_error(&rejection, correlation_id);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let mileage: Vec<MileageRecord> = request.mileage.into_iter().map(Into::into).collect();
    let jobs: Vec<Job> = request.jobs.into_iter().map(Into::into).collect();

    let report = build_shortlists(
        mileage,
        &request.full_time_roster,
        jobs,
        &request.assigned,
        request.top_k,
        state.config().config(),
    );

    info!(
        correlation_id = %correlation_id,
        shortlists = report.shortlists.len(),
        unresolved = report.unresolved_jobs.len(),
        "Shortlist request completed"
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(report),
    )
        .into_response()
}

/// Maps a JSON extraction failure onto an API error body.
fn rejection_to_error(rejection: &JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Runs the full assignment pipeline over one input snapshot.
fn run_assignment(
    mileage: Vec<MileageRecord>,
    full_time_roster: &[String],
    jobs: Vec<Job>,
    config: &EngineConfig,
) -> EngineResult<AssignmentReport> {
    let mut seen = BTreeSet::new();
    for job in &jobs {
        if !seen.insert(job.job_number.clone()) {
            return Err(EngineError::DuplicateJob {
                job_number: job.job_number.clone(),
            });
        }
    }

    let table = MileageTable::annotate(mileage, full_time_roster, config.costing());
    let resolver = CustomerResolver::new(table.customers(), config.matching());

    let mut resolved = Vec::new();
    let mut unresolved = Vec::new();
    for job in jobs {
        match resolver.resolve(&job.customer_company) {
            Some(customer) => {
                let evaluators_needed = assignee_count(job.assignees.as_deref());
                resolved.push(ResolvedJob {
                    job_number: job.job_number,
                    customer_company: job.customer_company,
                    customer,
                    evaluators_needed,
                });
            }
            None => unresolved.push(UnresolvedJob {
                job_number: job.job_number,
                customer_company: job.customer_company,
            }),
        }
    }

    let slots = expand_slots(&resolved);
    let total_slots = slots.len();
    let matrix = CostMatrix::build(&table, slots, config.eligibility());
    let outcome = solve(&matrix)?;
    let assignments = assemble(&outcome.assignments, &matrix.slots, &table, config.eligibility());

    let grand_total = assignments.iter().map(|row| row.total_cost).sum();

    Ok(AssignmentReport {
        run_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        status: outcome.status,
        totals: RunTotals {
            grand_total,
            assigned_slots: assignments.len(),
            total_slots,
        },
        assignments,
        diagnostics: RunDiagnostics {
            unresolved_jobs: unresolved,
            unfillable_slots: matrix.unfillable,
        },
    })
}

/// Builds ranked shortlists for every resolved job.
fn build_shortlists(
    mileage: Vec<MileageRecord>,
    full_time_roster: &[String],
    jobs: Vec<Job>,
    assigned: &[String],
    top_k: usize,
    config: &EngineConfig,
) -> ShortlistReport {
    let table = MileageTable::annotate(mileage, full_time_roster, config.costing());
    let resolver = CustomerResolver::new(table.customers(), config.matching());

    let assigned: HashSet<String> = assigned.iter().map(|name| name.trim().to_string()).collect();

    let mut shortlists = Vec::new();
    let mut unresolved = Vec::new();
    for job in jobs {
        match resolver.resolve(&job.customer_company) {
            Some(customer) => {
                let candidates =
                    rank_shortlist(&table, &customer, config.eligibility(), &assigned, top_k);
                shortlists.push(JobShortlist {
                    job_number: job.job_number,
                    customer_company: job.customer_company,
                    customer,
                    candidates,
                });
            }
            None => unresolved.push(UnresolvedJob {
                job_number: job.job_number,
                customer_company: job.customer_company,
            }),
        }
    }

    ShortlistReport {
        shortlists,
        unresolved_jobs: unresolved,
    }
}
