//! Request types for the assignment engine API.
//!
//! This module defines the JSON request structures for the
//! `/assignments` and `/shortlists` endpoints, plus the lenient numeric
//! decoding that turns dirty spreadsheet values into `None` instead of
//! rejecting the whole upload.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::assignment::DEFAULT_SHORTLIST_SIZE;
use crate::models::{Job, MileageRecord};

/// Request body for the `/assignments` endpoint.
///
/// Carries one immutable snapshot of the three input tables. File
/// parsing lives with the caller; by the time data reaches this API it
/// is plain JSON rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRequest {
    /// Distance/cost observations per (evaluator, customer) pair.
    pub mileage: Vec<MileageRowRequest>,
    /// Last names of full-time evaluators.
    #[serde(default)]
    pub full_time_roster: Vec<String>,
    /// The uploaded job table.
    pub jobs: Vec<JobRequest>,
}

/// Request body for the `/shortlists` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortlistRequest {
    /// Distance/cost observations per (evaluator, customer) pair.
    pub mileage: Vec<MileageRowRequest>,
    /// Last names of full-time evaluators.
    #[serde(default)]
    pub full_time_roster: Vec<String>,
    /// The uploaded job table.
    pub jobs: Vec<JobRequest>,
    /// Evaluators already hand-picked earlier in the session; they are
    /// excluded from every returned shortlist.
    #[serde(default)]
    pub assigned: Vec<String>,
    /// How many candidates to return per job.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    DEFAULT_SHORTLIST_SIZE
}

/// One mileage table row in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MileageRowRequest {
    /// The evaluator's name.
    pub evaluator: String,
    /// The customer name as it appears in the distance table.
    pub customer: String,
    /// One-way miles; non-numeric values coerce to null.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub one_way_miles: Option<Decimal>,
    /// Round-trip miles; non-numeric values coerce to null.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub round_trip_miles: Option<Decimal>,
    /// Drive time in hours; non-numeric values coerce to null.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub drive_time_hours: Option<Decimal>,
    /// Base travel cost; omit to derive it from miles.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub base_cost: Option<Decimal>,
}

/// One job table row in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequest {
    /// Unique job number; numbers are accepted and stringified.
    #[serde(deserialize_with = "job_number")]
    pub job_number: String,
    /// Free-text customer name.
    pub customer_company: String,
    /// Comma-separated assignee list, or null.
    #[serde(default)]
    pub assignees: Option<String>,
}

/// Decodes a number, numeric string, or junk value into `Option<Decimal>`.
///
/// Nulls, unparseable strings, and non-numeric JSON values all coerce to
/// `None`; the cost model treats them as zero contribution.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        serde_json::Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }))
}

/// Accepts job numbers as strings or bare numbers.
fn job_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s.trim().to_string()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "job_number must be a string or number, got {other}"
        ))),
    }
}

impl From<MileageRowRequest> for MileageRecord {
    fn from(req: MileageRowRequest) -> Self {
        MileageRecord {
            evaluator: req.evaluator,
            customer: req.customer,
            one_way_miles: req.one_way_miles,
            round_trip_miles: req.round_trip_miles,
            drive_time_hours: req.drive_time_hours,
            base_cost: req.base_cost,
        }
    }
}

impl From<JobRequest> for Job {
    fn from(req: JobRequest) -> Self {
        Job {
            job_number: req.job_number,
            customer_company: req.customer_company,
            assignees: req.assignees,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_mileage_row_accepts_numbers_and_strings() {
        let json = r#"{
            "evaluator": "Okafor",
            "customer": "National Fuel",
            "one_way_miles": 105.2,
            "round_trip_miles": "210.4",
            "base_cost": "152.54"
        }"#;

        let row: MileageRowRequest = serde_json::from_str(json).unwrap();
        assert_eq!(row.one_way_miles, Some(dec("105.2")));
        assert_eq!(row.round_trip_miles, Some(dec("210.4")));
        assert_eq!(row.drive_time_hours, None);
        assert_eq!(row.base_cost, Some(dec("152.54")));
    }

    #[test]
    fn test_non_numeric_miles_coerce_to_null() {
        let json = r#"{
            "evaluator": "Okafor",
            "customer": "National Fuel",
            "round_trip_miles": "n/a",
            "base_cost": "TBD"
        }"#;

        let row: MileageRowRequest = serde_json::from_str(json).unwrap();
        assert_eq!(row.round_trip_miles, None);
        assert_eq!(row.base_cost, None);
    }

    #[test]
    fn test_explicit_null_miles_coerce_to_null() {
        let json = r#"{
            "evaluator": "Okafor",
            "customer": "National Fuel",
            "round_trip_miles": null
        }"#;

        let row: MileageRowRequest = serde_json::from_str(json).unwrap();
        assert_eq!(row.round_trip_miles, None);
    }

    #[test]
    fn test_job_number_accepts_bare_numbers() {
        let json = r#"{
            "job_number": 1526,
            "customer_company": "Acme Co"
        }"#;

        let job: JobRequest = serde_json::from_str(json).unwrap();
        assert_eq!(job.job_number, "1526");
        assert_eq!(job.assignees, None);
    }

    #[test]
    fn test_job_number_rejects_other_types() {
        let json = r#"{
            "job_number": [1, 2],
            "customer_company": "Acme Co"
        }"#;

        assert!(serde_json::from_str::<JobRequest>(json).is_err());
    }

    #[test]
    fn test_shortlist_request_defaults() {
        let json = r#"{
            "mileage": [],
            "jobs": []
        }"#;

        let req: ShortlistRequest = serde_json::from_str(json).unwrap();
        assert!(req.full_time_roster.is_empty());
        assert!(req.assigned.is_empty());
        assert_eq!(req.top_k, DEFAULT_SHORTLIST_SIZE);
    }

    #[test]
    fn test_conversion_to_domain_types() {
        let row = MileageRowRequest {
            evaluator: "Okafor".to_string(),
            customer: "Acme Co".to_string(),
            one_way_miles: None,
            round_trip_miles: Some(dec("98")),
            drive_time_hours: None,
            base_cost: None,
        };
        let record: MileageRecord = row.into();
        assert_eq!(record.round_trip_miles, Some(dec("98")));

        let job_req = JobRequest {
            job_number: "J-1001".to_string(),
            customer_company: "Acme Co".to_string(),
            assignees: Some("Rivera, Okafor".to_string()),
        };
        let job: Job = job_req.into();
        assert_eq!(job.job_number, "J-1001");
    }
}
