//! Goal Planner - feasibility and capital allocation engine for household goals
//!
//! This library provides:
//! - Greedy allocation of monthly savings across prioritized goals by risk bucket
//! - Per-goal funding strategy (inflation-adjusted target, annuity contribution, asset mix)
//! - Savings capacity growth projection from income growth and bonuses
//! - Currency rate lookup over manually entered exchange rates
//! - Parallel batch planning across households

pub mod error;
pub mod goals;
pub mod household;
pub mod assumptions;
pub mod planning;
pub mod currency;
pub mod batch;

// Re-export commonly used types
pub use error::{PlannerError, PlannerResult};
pub use goals::{Asset, FinancialGoal, Priority, RiskLevel};
pub use household::{FinancialProfile, HouseholdInput, RiskAllocation};
pub use assumptions::Assumptions;
pub use planning::{
    calculate_strategy, check_feasibility, project_growth_multiplier, FeasibilityAllocator,
    FeasibilityStatus, PlanResult, StrategyCalculator,
};
pub use currency::{resolve_rate, CurrencyCode, RateTable};
pub use batch::HouseholdRunner;
