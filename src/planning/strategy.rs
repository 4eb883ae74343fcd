//! Per-goal funding strategy: inflation-adjusted target, required monthly
//! contribution, horizon-based asset mix, and contributor split

use super::pools::Bucket;
use super::results::{ContributionShare, StrategyAssumptions, StrategyResult};
use crate::assumptions::Assumptions;
use crate::goals::FinancialGoal;
use crate::household::{FinancialProfile, RiskAllocation};
use chrono::NaiveDate;

/// Average year length used for strategy horizons
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Floor on the strategy horizon, about 36 days
pub const MIN_YEARS: f64 = 0.1;

/// Years from `as_of` to `deadline`, floored at `MIN_YEARS`
pub fn horizon_years(as_of: NaiveDate, deadline: NaiveDate) -> f64 {
    let days = (deadline - as_of).num_days() as f64;
    (days / DAYS_PER_YEAR).max(MIN_YEARS)
}

/// Suggested bucket mix (percent) for a horizon in years
pub fn suggested_allocation(years: f64) -> RiskAllocation {
    if years < 3.0 {
        RiskAllocation::new(100.0, 0.0, 0.0)
    } else if years <= 7.0 {
        RiskAllocation::new(20.0, 80.0, 0.0)
    } else {
        RiskAllocation::new(10.0, 30.0, 60.0)
    }
}

/// Weighted average of the bucket returns under `mix`
pub fn blended_return(mix: &RiskAllocation, assumptions: &Assumptions) -> f64 {
    (mix.conservative * assumptions.return_for(Bucket::Conservative)
        + mix.moderate * assumptions.return_for(Bucket::Moderate)
        + mix.aggressive * assumptions.return_for(Bucket::Aggressive))
        / 100.0
}

/// Monthly payment that grows `current_amount` to `future_value` over `years`
///
/// Ordinary annuity at `annual_return / 12` per month. The current amount is
/// compounded forward before solving; the result is never negative.
pub fn required_monthly_contribution(
    future_value: f64,
    current_amount: f64,
    annual_return: f64,
    years: f64,
) -> f64 {
    let n = years * 12.0;
    let r = annual_return / 12.0;

    if r == 0.0 {
        return ((future_value - current_amount) / n).max(0.0);
    }

    let growth = (1.0 + r).powf(n);
    let projected_current = current_amount * growth;
    if projected_current >= future_value {
        return 0.0;
    }

    (future_value - projected_current) * r / (growth - 1.0)
}

/// Split `required` across contributors in proportion to net income
///
/// Empty when there is nothing to split or the income data cannot be used.
pub fn contribution_split(required: f64, profile: &FinancialProfile) -> Vec<ContributionShare> {
    let total_income = profile.total_net_income();
    let usable = required > 0.0
        && total_income.is_finite()
        && total_income > 0.0
        && profile.income.iter().all(|i| i.net_monthly.is_finite() && i.net_monthly >= 0.0);
    if !usable {
        return Vec::new();
    }

    profile
        .income
        .iter()
        .map(|source| {
            let share = source.net_monthly / total_income;
            ContributionShare {
                contributor_id: source.contributor_id.clone(),
                amount: required * share,
                percentage: share * 100.0,
            }
        })
        .collect()
}

/// Strategy calculator bound to one assumption table
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyCalculator {
    assumptions: Assumptions,
}

impl StrategyCalculator {
    pub fn new(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Strategy using the goal's own cash balance as the starting amount
    pub fn calculate(
        &self,
        goal: &FinancialGoal,
        profile: &FinancialProfile,
        as_of: NaiveDate,
    ) -> Option<StrategyResult> {
        self.calculate_with_funding(goal, goal.current_amount, profile, as_of)
    }

    /// Strategy starting from `current_amount` instead of the goal's cash balance
    ///
    /// `None` when the goal has no deadline.
    pub fn calculate_with_funding(
        &self,
        goal: &FinancialGoal,
        current_amount: f64,
        profile: &FinancialProfile,
        as_of: NaiveDate,
    ) -> Option<StrategyResult> {
        let deadline = goal.deadline?;
        let years = horizon_years(as_of, deadline);

        let inflation = self.assumptions.inflation_rate;
        let future_value = goal.target_amount * (1.0 + inflation).powf(years);

        let mix = suggested_allocation(years);
        let return_rate = blended_return(&mix, &self.assumptions);
        let required = required_monthly_contribution(future_value, current_amount, return_rate, years);

        Some(StrategyResult {
            future_value,
            required_monthly_contribution: required,
            suggested_allocation: mix,
            assumptions: StrategyAssumptions {
                inflation_rate: inflation,
                return_rate,
            },
            contribution_split: contribution_split(required, profile),
        })
    }
}

/// Strategy for one goal under the default planning assumptions
pub fn calculate_strategy(
    goal: &FinancialGoal,
    profile: &FinancialProfile,
    as_of: NaiveDate,
) -> Option<StrategyResult> {
    StrategyCalculator::default().calculate(goal, profile, as_of)
}
