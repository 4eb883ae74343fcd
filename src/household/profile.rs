//! Household savings profile

use log::warn;
use serde::{Deserialize, Serialize};

/// Monthly amount one contributor can set aside
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsContribution {
    pub contributor_id: String,
    pub amount: f64,
}

/// Net monthly income of one contributor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSource {
    pub contributor_id: String,
    pub net_monthly: f64,
}

/// Split of monthly savings across risk buckets, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAllocation {
    pub conservative: f64,
    pub moderate: f64,
    pub aggressive: f64,
}

impl Default for RiskAllocation {
    /// Everything in the conservative bucket
    fn default() -> Self {
        Self {
            conservative: 100.0,
            moderate: 0.0,
            aggressive: 0.0,
        }
    }
}

impl RiskAllocation {
    pub fn new(conservative: f64, moderate: f64, aggressive: f64) -> Self {
        Self { conservative, moderate, aggressive }
    }

    pub fn sum(&self) -> f64 {
        self.conservative + self.moderate + self.aggressive
    }

    /// A split is usable when every share is finite and non-negative and the total is positive
    pub fn is_valid(&self) -> bool {
        let shares = [self.conservative, self.moderate, self.aggressive];
        shares.iter().all(|s| s.is_finite() && *s >= 0.0) && self.sum() > 0.0
    }
}

/// Savings capacity and income of one household
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialProfile {
    #[serde(default)]
    pub savings_capacity: Vec<SavingsContribution>,

    #[serde(default)]
    pub risk_allocation: Option<RiskAllocation>,

    /// Annual income growth, percent
    #[serde(default)]
    pub income_growth_rate: f64,

    #[serde(default)]
    pub annual_bonus: f64,

    /// Only used to suggest how contributions are split
    #[serde(default)]
    pub income: Vec<IncomeSource>,
}

impl FinancialProfile {
    /// Total monthly savings capacity across contributors
    ///
    /// Negative or non-finite contributions count as zero.
    pub fn total_monthly_capacity(&self) -> f64 {
        self.savings_capacity
            .iter()
            .map(|c| {
                if c.amount.is_finite() && c.amount >= 0.0 {
                    c.amount
                } else {
                    warn!("Ignoring savings contribution {} from {}", c.amount, c.contributor_id);
                    0.0
                }
            })
            .sum()
    }

    /// Risk split to apply, falling back to all-conservative when absent or unusable
    pub fn effective_risk_allocation(&self) -> RiskAllocation {
        match self.risk_allocation {
            Some(allocation) if allocation.is_valid() => {
                if (allocation.sum() - 100.0).abs() > 0.01 {
                    warn!(
                        "Risk allocation sums to {:.2}%, pools are sized from the literal percentages",
                        allocation.sum()
                    );
                }
                allocation
            }
            Some(allocation) => {
                warn!("Invalid risk allocation {:?}, defaulting to all conservative", allocation);
                RiskAllocation::default()
            }
            None => RiskAllocation::default(),
        }
    }

    /// Sum of net monthly income across contributors
    pub fn total_net_income(&self) -> f64 {
        self.income.iter().map(|i| i.net_monthly).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contribution(id: &str, amount: f64) -> SavingsContribution {
        SavingsContribution { contributor_id: id.into(), amount }
    }

    #[test]
    fn test_total_capacity() {
        let profile = FinancialProfile {
            savings_capacity: vec![contribution("a", 600.0), contribution("b", 400.0)],
            ..Default::default()
        };
        assert_eq!(profile.total_monthly_capacity(), 1000.0);
    }

    #[test]
    fn test_negative_contribution_counts_as_zero() {
        let profile = FinancialProfile {
            savings_capacity: vec![contribution("a", -100.0), contribution("b", 250.0), contribution("c", f64::NAN)],
            ..Default::default()
        };
        assert_eq!(profile.total_monthly_capacity(), 250.0);
    }

    #[test]
    fn test_missing_allocation_defaults_conservative() {
        let profile = FinancialProfile::default();
        assert_eq!(profile.effective_risk_allocation(), RiskAllocation::new(100.0, 0.0, 0.0));
    }

    #[test]
    fn test_invalid_allocation_defaults_conservative() {
        let profile = FinancialProfile {
            risk_allocation: Some(RiskAllocation::new(-10.0, 60.0, 50.0)),
            ..Default::default()
        };
        assert_eq!(profile.effective_risk_allocation(), RiskAllocation::default());

        let zero = FinancialProfile {
            risk_allocation: Some(RiskAllocation::new(0.0, 0.0, 0.0)),
            ..Default::default()
        };
        assert_eq!(zero.effective_risk_allocation(), RiskAllocation::default());
    }

    #[test]
    fn test_valid_allocation_kept() {
        let profile = FinancialProfile {
            risk_allocation: Some(RiskAllocation::new(20.0, 30.0, 50.0)),
            ..Default::default()
        };
        assert_eq!(profile.effective_risk_allocation(), RiskAllocation::new(20.0, 30.0, 50.0));
    }

    #[test]
    fn test_profile_deserializes_from_document() {
        let json = r#"{
            "savingsCapacity": [{"contributorId": "alex", "amount": 800}],
            "riskAllocation": {"conservative": 50, "moderate": 30, "aggressive": 20},
            "incomeGrowthRate": 5,
            "annualBonus": 2000,
            "income": [{"contributorId": "alex", "netMonthly": 4200}]
        }"#;
        let profile: FinancialProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.total_monthly_capacity(), 800.0);
        assert_eq!(profile.income_growth_rate, 5.0);
        assert_eq!(profile.total_net_income(), 4200.0);
    }
}
