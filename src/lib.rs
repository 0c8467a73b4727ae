//! Assignment engine for dispatching field evaluators to customer jobs.
//!
//! This crate resolves free-text customer names against a known mileage
//! table, derives tiered travel costs per (evaluator, customer) pair, and
//! solves a capacity-constrained minimum-cost assignment of evaluators to
//! job slots.

#![warn(missing_docs)]

pub mod api;
pub mod assignment;
pub mod config;
pub mod error;
pub mod models;
