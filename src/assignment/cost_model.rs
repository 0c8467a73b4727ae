//! Travel cost derivation for one mileage record.
//!
//! This module computes the per-diem, mileage bonus, and total cost for an
//! (evaluator, customer) pair from round-trip miles and employment status.

use rust_decimal::Decimal;

use crate::config::CostingConfig;
use crate::models::EmploymentStatus;

/// The structured cost breakdown for one mileage record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostBreakdown {
    /// Contractor per-diem supplement; zero for full-time staff.
    pub per_diem: Decimal,
    /// Contractor distance-tier bonus; zero for full-time staff.
    pub mileage_bonus: Decimal,
    /// Base cost plus per-diem plus bonus.
    pub total_cost: Decimal,
}

/// Derives the cost breakdown for one (evaluator, customer) observation.
///
/// All thresholds use strict `>` semantics: 175 round-trip miles earns no
/// per-diem, 176 does. Missing miles or base cost contribute zero rather
/// than failing; this function has no error conditions.
///
/// # Arguments
///
/// * `status` - The evaluator's employment status
/// * `round_trip_miles` - Round-trip miles, if known
/// * `base_cost` - Base travel cost, already derived from miles when the
///   source table did not supply one
/// * `costing` - Rate and tier configuration
///
/// # Examples
///
/// ```
/// use assignment_engine::assignment::derive_cost;
/// use assignment_engine::config::CostingConfig;
/// use assignment_engine::models::EmploymentStatus;
/// use rust_decimal::Decimal;
///
/// let costing = CostingConfig::default();
/// let breakdown = derive_cost(
///     EmploymentStatus::Contract,
///     Some(Decimal::from(420)),
///     Some(Decimal::from(300)),
///     &costing,
/// );
/// assert_eq!(breakdown.per_diem, Decimal::from(225));
/// assert_eq!(breakdown.mileage_bonus, Decimal::from(250));
/// assert_eq!(breakdown.total_cost, Decimal::from(775));
/// ```
pub fn derive_cost(
    status: EmploymentStatus,
    round_trip_miles: Option<Decimal>,
    base_cost: Option<Decimal>,
    costing: &CostingConfig,
) -> CostBreakdown {
    let per_diem = match round_trip_miles {
        Some(miles) if status.is_contract() && miles > costing.per_diem.miles_over => {
            costing.per_diem.amount
        }
        _ => Decimal::ZERO,
    };

    let mileage_bonus = match round_trip_miles {
        Some(miles) if status.is_contract() => costing
            .bonus_tiers
            .iter()
            .find(|tier| miles > tier.miles_over)
            .map(|tier| tier.amount)
            .unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    };

    CostBreakdown {
        per_diem,
        mileage_bonus,
        total_cost: base_cost.unwrap_or(Decimal::ZERO) + per_diem + mileage_bonus,
    }
}
