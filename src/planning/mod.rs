//! Goal feasibility and capital allocation engine

mod pools;
mod growth;
mod strategy;
mod allocator;
mod results;

pub use pools::{join_labels, Bucket, BucketPools, Draw, FUNDING_TOLERANCE};
pub use growth::project_growth_multiplier;
pub use strategy::{
    blended_return, calculate_strategy, contribution_split, horizon_years,
    required_monthly_contribution, suggested_allocation, StrategyCalculator, DAYS_PER_YEAR, MIN_YEARS,
};
pub use allocator::{
    check_feasibility, compare_goals, months_to_deadline, FeasibilityAllocator, FundingPolicy,
    DAYS_PER_MONTH, GROWTH_MIN_MONTHS, LONG_TERM_MONTHS, MIN_MONTHS, SHORT_TERM_MONTHS,
};
pub use results::{
    BucketReport, BucketSummary, ContributionShare, FeasibilityResult, FeasibilityStatus,
    GoalAssessment, PlanResult, PlanSummary, StrategyAssumptions, StrategyResult,
};
