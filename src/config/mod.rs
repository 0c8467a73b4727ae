//! Configuration loading and types for the assignment engine.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BonusTier, CostingConfig, EligibilityConfig, EngineConfig, ExclusionRule, LastResortConfig,
    MatchingConfig, PerDiemRule,
};
