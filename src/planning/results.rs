//! Output structures for a planning run

use super::pools::BucketPools;
use crate::goals::{FinancialGoal, GoalCategory};
use crate::household::RiskAllocation;
use serde::{Deserialize, Serialize};

/// Verdict for one goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeasibilityStatus {
    Feasible,
    /// Funded only if projected income growth materializes
    ConditionallyFeasible,
    NotFeasible,
}

impl FeasibilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeasibilityStatus::Feasible => "feasible",
            FeasibilityStatus::ConditionallyFeasible => "conditionally-feasible",
            FeasibilityStatus::NotFeasible => "not-feasible",
        }
    }
}

/// Feasibility of one goal against the household's pools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeasibilityResult {
    pub status: FeasibilityStatus,
    pub reason: String,
    pub required_monthly: f64,
    pub funded_amount: f64,
    pub funding_gap: f64,
    pub months_to_deadline: f64,
    pub timeline_issues: Vec<String>,
    pub bucket_used: Option<String>,
}

impl FeasibilityResult {
    /// Result for a goal that has no deadline: nothing can be computed
    pub fn no_deadline() -> Self {
        Self {
            status: FeasibilityStatus::NotFeasible,
            reason: "No deadline set".to_string(),
            required_monthly: 0.0,
            funded_amount: 0.0,
            funding_gap: 0.0,
            months_to_deadline: 0.0,
            timeline_issues: Vec::new(),
            bucket_used: None,
        }
    }

    pub fn is_fully_funded(&self) -> bool {
        self.status != FeasibilityStatus::NotFeasible
    }
}

/// Rates the strategy was computed with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyAssumptions {
    pub inflation_rate: f64,
    pub return_rate: f64,
}

/// One contributor's share of the required contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionShare {
    pub contributor_id: String,
    pub amount: f64,
    pub percentage: f64,
}

/// Recommended funding strategy for one goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyResult {
    /// Target inflated to the deadline
    pub future_value: f64,
    pub required_monthly_contribution: f64,
    pub suggested_allocation: RiskAllocation,
    pub assumptions: StrategyAssumptions,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contribution_split: Vec<ContributionShare>,
}

/// A goal together with everything computed for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalAssessment {
    #[serde(flatten)]
    pub goal: FinancialGoal,
    pub feasibility: FeasibilityResult,
    pub strategy: Option<StrategyResult>,
}

impl GoalAssessment {
    /// Horizon label to display: the goal's own category, else one derived from the deadline
    pub fn category(&self) -> Option<GoalCategory> {
        self.goal.category.or_else(|| {
            self.goal
                .deadline
                .map(|_| GoalCategory::from_months(self.feasibility.months_to_deadline))
        })
    }
}

/// Original and post-allocation capacity of one bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketSummary {
    pub total: f64,
    pub remaining: f64,
}

/// Per-bucket capacity report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketReport {
    pub conservative: BucketSummary,
    pub moderate: BucketSummary,
    pub aggressive: BucketSummary,
}

impl BucketReport {
    pub fn new(initial: &BucketPools, remaining: &BucketPools) -> Self {
        Self {
            conservative: BucketSummary {
                total: initial.conservative,
                remaining: remaining.conservative,
            },
            moderate: BucketSummary {
                total: initial.moderate,
                remaining: remaining.moderate,
            },
            aggressive: BucketSummary {
                total: initial.aggressive,
                remaining: remaining.aggressive,
            },
        }
    }
}

/// Consolidated plan for one household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResult {
    /// Goals in the order they claimed capacity
    pub goals: Vec<GoalAssessment>,
    pub monthly_unallocated: f64,
    pub buckets: BucketReport,
}

/// Summary statistics for a plan
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub total_goals: usize,
    pub feasible: usize,
    pub conditionally_feasible: usize,
    pub not_feasible: usize,
    pub total_required_monthly: f64,
    pub total_funded_monthly: f64,
    pub monthly_unallocated: f64,
}

impl PlanResult {
    /// Look up a goal's assessment by goal id
    pub fn goal(&self, id: &str) -> Option<&GoalAssessment> {
        self.goals.iter().find(|g| g.goal.id == id)
    }

    pub fn summary(&self) -> PlanSummary {
        let mut summary = PlanSummary {
            total_goals: self.goals.len(),
            monthly_unallocated: self.monthly_unallocated,
            ..Default::default()
        };

        for assessment in &self.goals {
            let f = &assessment.feasibility;
            match f.status {
                FeasibilityStatus::Feasible => summary.feasible += 1,
                FeasibilityStatus::ConditionallyFeasible => summary.conditionally_feasible += 1,
                FeasibilityStatus::NotFeasible => summary.not_feasible += 1,
            }
            summary.total_required_monthly += f.required_monthly;
            summary.total_funded_monthly += f.funded_amount;
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_deadline_result_is_zeroed() {
        let r = FeasibilityResult::no_deadline();
        assert_eq!(r.status, FeasibilityStatus::NotFeasible);
        assert_eq!(r.reason, "No deadline set");
        assert_eq!(r.required_monthly, 0.0);
        assert_eq!(r.months_to_deadline, 0.0);
        assert!(r.bucket_used.is_none());
        assert!(!r.is_fully_funded());
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&FeasibilityStatus::ConditionallyFeasible).unwrap();
        assert_eq!(json, "\"conditionally-feasible\"");
        assert_eq!(FeasibilityStatus::NotFeasible.as_str(), "not-feasible");
    }

    #[test]
    fn test_bucket_report() {
        let report = BucketReport::new(
            &BucketPools::new(100.0, 200.0, 300.0),
            &BucketPools::new(50.0, 0.0, 300.0),
        );
        assert_eq!(report.conservative, BucketSummary { total: 100.0, remaining: 50.0 });
        assert_eq!(report.moderate.remaining, 0.0);
        assert_eq!(report.aggressive.total, 300.0);
    }

    fn assessment(id: &str, status: FeasibilityStatus, required: f64, funded: f64) -> GoalAssessment {
        GoalAssessment {
            goal: FinancialGoal::new(id, id, 1000.0),
            feasibility: FeasibilityResult {
                status,
                reason: String::new(),
                required_monthly: required,
                funded_amount: funded,
                funding_gap: required - funded,
                months_to_deadline: 36.0,
                timeline_issues: Vec::new(),
                bucket_used: None,
            },
            strategy: None,
        }
    }

    #[test]
    fn test_plan_summary_counts_and_totals() {
        let plan = PlanResult {
            goals: vec![
                assessment("a", FeasibilityStatus::Feasible, 200.0, 200.0),
                assessment("b", FeasibilityStatus::ConditionallyFeasible, 150.0, 150.0),
                assessment("c", FeasibilityStatus::NotFeasible, 300.0, 120.0),
            ],
            monthly_unallocated: 30.0,
            buckets: BucketReport::new(&BucketPools::new(500.0, 0.0, 0.0), &BucketPools::new(30.0, 0.0, 0.0)),
        };

        let summary = plan.summary();

        assert_eq!(summary.total_goals, 3);
        assert_eq!(summary.feasible, 1);
        assert_eq!(summary.conditionally_feasible, 1);
        assert_eq!(summary.not_feasible, 1);
        assert_eq!(summary.total_required_monthly, 650.0);
        assert_eq!(summary.total_funded_monthly, 470.0);
        assert_eq!(summary.monthly_unallocated, 30.0);
        assert_eq!(plan.goal("c").unwrap().feasibility.funding_gap, 180.0);
    }

    #[test]
    fn test_category_derived_from_horizon() {
        let undated = assessment("a", FeasibilityStatus::Feasible, 0.0, 0.0);
        assert_eq!(undated.category(), None);

        let mut dated = undated.clone();
        dated.goal.deadline = chrono::NaiveDate::from_ymd_opt(2029, 1, 1);
        assert_eq!(dated.category(), Some(GoalCategory::MediumTerm));

        dated.goal.category = Some(GoalCategory::LongTerm);
        assert_eq!(dated.category(), Some(GoalCategory::LongTerm));
    }

    #[test]
    fn test_assessment_flattens_goal_fields() {
        let assessment = GoalAssessment {
            goal: FinancialGoal::new("g1", "Car", 9000.0),
            feasibility: FeasibilityResult::no_deadline(),
            strategy: None,
        };
        let value = serde_json::to_value(&assessment).unwrap();

        assert_eq!(value["id"], "g1");
        assert_eq!(value["targetAmount"], 9000.0);
        assert_eq!(value["feasibility"]["status"], "not-feasible");
        assert!(value["strategy"].is_null());
    }
}
