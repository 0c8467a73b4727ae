//! HTTP API module for the assignment engine.
//!
//! This module provides the REST endpoints for computing optimized
//! assignments and manual-selection shortlists.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AssignmentRequest, JobRequest, MileageRowRequest, ShortlistRequest};
pub use response::ApiError;
pub use state::AppState;
