//! Household runner for batch planning
//!
//! Holds one assumption table and evaluates many households with it. Each
//! household gets its own allocation pass, so batches run in parallel.

use crate::assumptions::Assumptions;
use crate::household::HouseholdInput;
use crate::planning::{FeasibilityAllocator, PlanResult};
use chrono::NaiveDate;
use rayon::prelude::*;

/// Pre-configured runner for one or many households
///
/// # Example
/// ```ignore
/// let runner = HouseholdRunner::from_csv()?;
/// let plans = runner.run_batch(&households, today);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HouseholdRunner {
    allocator: FeasibilityAllocator,
}

impl HouseholdRunner {
    /// Create runner with the default planning assumptions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with custom assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            allocator: FeasibilityAllocator::new(assumptions),
        }
    }

    /// Create runner by loading assumptions from the default CSV location
    pub fn from_csv() -> crate::error::PlannerResult<Self> {
        Ok(Self::with_assumptions(Assumptions::from_csv()?))
    }

    pub fn assumptions(&self) -> &Assumptions {
        self.allocator.assumptions()
    }

    /// Plan a single household
    pub fn run(&self, household: &HouseholdInput, as_of: NaiveDate) -> PlanResult {
        self.allocator.check_feasibility(
            &household.goals,
            &household.profile,
            &household.assets,
            as_of,
        )
    }

    /// Plan many households in parallel; results keep input order
    pub fn run_batch(&self, households: &[HouseholdInput], as_of: NaiveDate) -> Vec<PlanResult> {
        households
            .par_iter()
            .map(|household| self.run(household, as_of))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::FinancialGoal;
    use crate::household::{FinancialProfile, SavingsContribution};

    fn household(id: &str, capacity: f64) -> HouseholdInput {
        let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        HouseholdInput {
            household_id: id.to_string(),
            profile: FinancialProfile {
                savings_capacity: vec![SavingsContribution { contributor_id: "a".into(), amount: capacity }],
                ..Default::default()
            },
            goals: vec![FinancialGoal::new("trip", "Trip", 3_000.0)
                .with_deadline(as_of + chrono::Duration::days(365))],
            assets: Vec::new(),
        }
    }

    #[test]
    fn test_batch_matches_individual_runs() {
        let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let runner = HouseholdRunner::new();
        let households: Vec<_> = (0..16).map(|i| household(&format!("h{}", i), 50.0 * i as f64)).collect();

        let batch = runner.run_batch(&households, as_of);

        assert_eq!(batch.len(), households.len());
        for (plan, h) in batch.iter().zip(&households) {
            assert_eq!(plan, &runner.run(h, as_of));
        }

        // More capacity never makes the same goal less funded
        let funded: Vec<f64> = batch.iter().map(|p| p.goals[0].feasibility.funded_amount).collect();
        assert!(funded.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_from_csv_loads_default_assumptions() {
        let runner = HouseholdRunner::from_csv().expect("Failed to load assumptions");
        assert_eq!(*runner.assumptions(), Assumptions::default_planning());
    }

    #[test]
    fn test_custom_assumptions_flow_through() {
        let mut assumptions = Assumptions::default_planning();
        assumptions.inflation_rate = 0.0;
        let runner = HouseholdRunner::with_assumptions(assumptions);
        let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

        let plan = runner.run(&household("h", 500.0), as_of);
        let strategy = plan.goals[0].strategy.as_ref().unwrap();

        assert_eq!(strategy.future_value, 3_000.0);
        assert_eq!(runner.assumptions().inflation_rate, 0.0);
    }
}
