//! Mileage record model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One raw (evaluator, customer) distance observation from the mileage table.
///
/// Numeric fields are optional: missing or non-numeric source values arrive
/// here as `None` and contribute zero to derived costs rather than failing
/// the run. The same (evaluator, customer) pair may appear more than once
/// in raw input; deduplication happens when the table is annotated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MileageRecord {
    /// The evaluator's name.
    pub evaluator: String,
    /// The customer name as it appears in the distance table.
    pub customer: String,
    /// One-way distance in miles.
    pub one_way_miles: Option<Decimal>,
    /// Round-trip distance in miles; drives per-diem and bonus tiers.
    pub round_trip_miles: Option<Decimal>,
    /// Estimated drive time in hours.
    pub drive_time_hours: Option<Decimal>,
    /// Base travel cost in dollars, when supplied directly. When absent it
    /// is derived from round-trip miles and the configured per-mile rate.
    pub base_cost: Option<Decimal>,
}
