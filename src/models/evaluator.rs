//! Employment status derivation for inspection staff.

use serde::{Deserialize, Serialize};

/// Represents the employment arrangement of an evaluator.
///
/// Per-diem and mileage bonuses apply to contractors only; full-time
/// staff travel costs are limited to the base travel cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Salaried staff member on the full-time roster.
    FullTime,
    /// Contract evaluator paid per engagement.
    Contract,
}

impl EmploymentStatus {
    /// Derives the status of a named evaluator from the full-time roster.
    ///
    /// An evaluator is full-time when their name appears on the roster
    /// after trimming surrounding whitespace on both sides; everyone else
    /// is a contractor.
    ///
    /// # Examples
    ///
    /// ```
    /// use assignment_engine::models::EmploymentStatus;
    ///
    /// let roster = vec!["Alvarez".to_string(), "Chen".to_string()];
    /// assert_eq!(
    ///     EmploymentStatus::from_roster(" Alvarez ", &roster),
    ///     EmploymentStatus::FullTime
    /// );
    /// assert_eq!(
    ///     EmploymentStatus::from_roster("Okafor", &roster),
    ///     EmploymentStatus::Contract
    /// );
    /// ```
    pub fn from_roster(name: &str, roster: &[String]) -> Self {
        let name = name.trim();
        if roster.iter().any(|r| r.trim() == name) {
            EmploymentStatus::FullTime
        } else {
            EmploymentStatus::Contract
        }
    }

    /// Returns true for contract evaluators.
    pub fn is_contract(&self) -> bool {
        *self == EmploymentStatus::Contract
    }
}
