//! Greedy feasibility allocation of monthly savings across prioritized goals

use super::growth::project_growth_multiplier;
use super::pools::{join_labels, Bucket, BucketPools, FUNDING_TOLERANCE};
use super::results::{BucketReport, FeasibilityResult, FeasibilityStatus, GoalAssessment, PlanResult};
use super::strategy::StrategyCalculator;
use crate::assumptions::Assumptions;
use crate::goals::{Asset, FinancialGoal, Priority, RiskLevel};
use crate::household::FinancialProfile;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::cmp::Ordering;

/// Average month length used for feasibility horizons
pub const DAYS_PER_MONTH: f64 = 30.44;

/// Floor on the feasibility horizon, about 3 days
pub const MIN_MONTHS: f64 = 0.1;

/// Goals due sooner than this are funded from the conservative bucket only
pub const SHORT_TERM_MONTHS: f64 = 24.0;

/// Goals due at or after this use the long-term bucket order
pub const LONG_TERM_MONTHS: f64 = 60.0;

/// Growth multiplier is only applied beyond this horizon
pub const GROWTH_MIN_MONTHS: f64 = 12.0;

/// Months from `as_of` to `deadline`, floored at `MIN_MONTHS`
pub fn months_to_deadline(as_of: NaiveDate, deadline: NaiveDate) -> f64 {
    let days = (deadline - as_of).num_days() as f64;
    (days / DAYS_PER_MONTH).max(MIN_MONTHS)
}

/// Processing order: priority score descending, then deadline ascending
///
/// A missing priority scores as `Low`. A missing deadline sorts as
/// `NaiveDate::MAX`, after every dated goal of the same priority.
pub fn compare_goals(a: &FinancialGoal, b: &FinancialGoal) -> Ordering {
    let deadline_key = |g: &FinancialGoal| g.deadline.unwrap_or(NaiveDate::MAX);
    Priority::score(b.priority)
        .cmp(&Priority::score(a.priority))
        .then_with(|| deadline_key(a).cmp(&deadline_key(b)))
}

/// Which bucket policy a goal falls under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundingPolicy {
    /// Conservative bucket only
    ShortTerm,
    /// Moderate, then conservative
    MediumTerm,
    /// Override or horizon order, with growth scaling
    LongTerm,
}

impl FundingPolicy {
    /// Any explicit risk level routes the goal through the long-term policy,
    /// whatever its horizon.
    pub fn for_goal(months: f64, risk_level: Option<RiskLevel>) -> Self {
        if months >= LONG_TERM_MONTHS || risk_level.is_some() {
            FundingPolicy::LongTerm
        } else if months < SHORT_TERM_MONTHS {
            FundingPolicy::ShortTerm
        } else {
            FundingPolicy::MediumTerm
        }
    }

    /// Buckets this policy may draw from, in draw order
    pub fn bucket_order(&self, months: f64, risk_level: Option<RiskLevel>) -> &'static [Bucket] {
        const CONSERVATIVE: &[Bucket] = &[Bucket::Conservative];
        const MODERATE_FIRST: &[Bucket] = &[Bucket::Moderate, Bucket::Conservative];
        const AGGRESSIVE_FIRST: &[Bucket] = &[Bucket::Aggressive, Bucket::Moderate, Bucket::Conservative];

        match self {
            FundingPolicy::ShortTerm => CONSERVATIVE,
            FundingPolicy::MediumTerm => MODERATE_FIRST,
            FundingPolicy::LongTerm => match risk_level {
                Some(RiskLevel::Aggressive) => AGGRESSIVE_FIRST,
                Some(RiskLevel::Moderate) => MODERATE_FIRST,
                Some(RiskLevel::Conservative) => CONSERVATIVE,
                None if months < SHORT_TERM_MONTHS => CONSERVATIVE,
                None if months < LONG_TERM_MONTHS => MODERATE_FIRST,
                None => AGGRESSIVE_FIRST,
            },
        }
    }
}

/// Single-pass allocator over one household's goals
#[derive(Debug, Clone, Copy, Default)]
pub struct FeasibilityAllocator {
    strategy: StrategyCalculator,
}

impl FeasibilityAllocator {
    pub fn new(assumptions: Assumptions) -> Self {
        Self {
            strategy: StrategyCalculator::new(assumptions),
        }
    }

    pub fn assumptions(&self) -> &Assumptions {
        self.strategy.assumptions()
    }

    /// Evaluate every goal against the household's capacity as of `as_of`
    ///
    /// Goals claim capacity in `compare_goals` order; an earlier goal's draw is
    /// never revisited. Neither the goals nor the profile are modified.
    pub fn check_feasibility(
        &self,
        goals: &[FinancialGoal],
        profile: &FinancialProfile,
        assets: &[Asset],
        as_of: NaiveDate,
    ) -> PlanResult {
        let initial = BucketPools::from_profile(profile);

        let mut ordered: Vec<&FinancialGoal> = goals.iter().collect();
        ordered.sort_by(|a, b| compare_goals(a, b));

        let (remaining, assessments) = ordered.into_iter().fold(
            (initial, Vec::with_capacity(goals.len())),
            |(pools, mut assessments), goal| {
                let (pools, feasibility) = self.assess_goal(goal, profile, assets, as_of, pools);
                let strategy = self.strategy.calculate_with_funding(
                    goal,
                    goal.effective_funding(assets),
                    profile,
                    as_of,
                );
                assessments.push(GoalAssessment {
                    goal: goal.clone(),
                    feasibility,
                    strategy,
                });
                (pools, assessments)
            },
        );

        let plan = PlanResult {
            goals: assessments,
            monthly_unallocated: remaining.total(),
            buckets: BucketReport::new(&initial, &remaining),
        };

        info!(
            "Planned {} goals: capacity {:.2}/month, unallocated {:.2}/month",
            plan.goals.len(),
            initial.total(),
            plan.monthly_unallocated
        );

        plan
    }

    /// Allocate one goal against `pools`, returning the updated pools
    pub fn assess_goal(
        &self,
        goal: &FinancialGoal,
        profile: &FinancialProfile,
        assets: &[Asset],
        as_of: NaiveDate,
        pools: BucketPools,
    ) -> (BucketPools, FeasibilityResult) {
        let Some(deadline) = goal.deadline else {
            debug!("Goal {} has no deadline", goal.id);
            return (pools, FeasibilityResult::no_deadline());
        };

        let funding = goal.effective_funding(assets);
        let months = months_to_deadline(as_of, deadline);
        if !goal.target_amount.is_finite() || !funding.is_finite() {
            warn!("Goal {} has a non-finite target or funding amount, skipping allocation", goal.id);
            return (
                pools,
                FeasibilityResult {
                    status: FeasibilityStatus::NotFeasible,
                    reason: "Target or current amount is not a valid number".to_string(),
                    required_monthly: 0.0,
                    funded_amount: 0.0,
                    funding_gap: 0.0,
                    months_to_deadline: months,
                    timeline_issues: Vec::new(),
                    bucket_used: None,
                },
            );
        }
        let required_total = (goal.target_amount - funding).max(0.0);
        let required_monthly = required_total / months;

        if required_monthly <= 0.0 {
            debug!("Goal {} is already covered by {:.2} of funding", goal.id, funding);
            return (
                pools,
                FeasibilityResult {
                    status: FeasibilityStatus::Feasible,
                    reason: "Already funded by current savings and linked assets".to_string(),
                    required_monthly: 0.0,
                    funded_amount: 0.0,
                    funding_gap: 0.0,
                    months_to_deadline: months,
                    timeline_issues: Vec::new(),
                    bucket_used: None,
                },
            );
        }

        let policy = FundingPolicy::for_goal(months, goal.risk_level);
        let order = policy.bucket_order(months, goal.risk_level);
        let multiplier = if policy == FundingPolicy::LongTerm && months > GROWTH_MIN_MONTHS {
            project_growth_multiplier(
                months / 12.0,
                profile.income_growth_rate,
                profile.annual_bonus,
                profile.total_monthly_capacity(),
            )
        } else {
            1.0
        };

        let capacity_today: f64 = order.iter().map(|b| pools[*b]).sum();
        let (pools, draw) = pools.draw(order, required_monthly, multiplier);
        let gap = (required_monthly - draw.funded).max(0.0);

        debug!(
            "Goal {}: {:?} policy, need {:.2}/month over {:.1} months, funded {:.2} from {:?} (x{:.3})",
            goal.id, policy, required_monthly, months, draw.funded, draw.buckets, multiplier
        );

        let mut timeline_issues = Vec::new();
        let (status, reason) = if gap <= FUNDING_TOLERANCE {
            if capacity_today < required_monthly - FUNDING_TOLERANCE {
                timeline_issues.push(format!(
                    "Relies on savings capacity growing to {:.2}x today's level",
                    multiplier
                ));
                (
                    FeasibilityStatus::ConditionallyFeasible,
                    "Funded assuming projected income growth and bonuses".to_string(),
                )
            } else {
                (
                    FeasibilityStatus::Feasible,
                    format!("Fully funded from {} savings", join_labels(&draw.buckets)),
                )
            }
        } else {
            let reason = match policy {
                FundingPolicy::ShortTerm => {
                    timeline_issues.push(
                        "Short-term goals are funded only from conservative savings; \
                         moderate and aggressive capacity is never used for them"
                            .to_string(),
                    );
                    format!("Insufficient conservative capacity: short {:.2}/month", gap)
                }
                FundingPolicy::MediumTerm | FundingPolicy::LongTerm => {
                    format!("Insufficient savings capacity: short {:.2}/month", gap)
                }
            };

            let locked = pools.locked_buckets(order);
            if locked.is_empty() {
                timeline_issues.push(format!(
                    "Increase monthly savings or extend the deadline to close the {:.2}/month gap",
                    gap
                ));
            } else {
                let available: f64 = locked.iter().map(|b| pools[*b]).sum();
                timeline_issues.push(format!(
                    "{:.2}/month remains in {} but is locked out by the risk-horizon policy for a {:.1}-month goal",
                    available,
                    join_labels(&locked),
                    months
                ));
            }

            (FeasibilityStatus::NotFeasible, reason)
        };

        let result = FeasibilityResult {
            status,
            reason,
            required_monthly,
            funded_amount: draw.funded,
            funding_gap: gap,
            months_to_deadline: months,
            timeline_issues,
            bucket_used: draw.label(),
        };

        (pools, result)
    }
}

/// Evaluate goals under the default planning assumptions
pub fn check_feasibility(
    goals: &[FinancialGoal],
    profile: &FinancialProfile,
    assets: &[Asset],
    as_of: NaiveDate,
) -> PlanResult {
    FeasibilityAllocator::default().check_feasibility(goals, profile, assets, as_of)
}
