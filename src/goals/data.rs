//! Goal and asset records as stored by the household documents

use crate::planning::{LONG_TERM_MONTHS, SHORT_TERM_MONTHS};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Priority of a goal when competing for savings capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Ordering score; a goal without a priority scores like `Low`
    pub fn score(priority: Option<Priority>) -> u8 {
        match priority {
            Some(Priority::High) => 3,
            Some(Priority::Medium) => 2,
            Some(Priority::Low) | None => 1,
        }
    }
}

/// Explicit risk preference set on a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Conservative,
    Moderate,
    Aggressive,
}

/// Advisory horizon label shown next to a goal
///
/// The allocator never reads this; it recomputes the horizon from the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalCategory {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl GoalCategory {
    /// Classify a horizon in months using the allocator's bands
    pub fn from_months(months: f64) -> Self {
        if months < SHORT_TERM_MONTHS {
            GoalCategory::ShortTerm
        } else if months < LONG_TERM_MONTHS {
            GoalCategory::MediumTerm
        } else {
            GoalCategory::LongTerm
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalCategory::ShortTerm => "short-term",
            GoalCategory::MediumTerm => "medium-term",
            GoalCategory::LongTerm => "long-term",
        }
    }
}

/// A household financial goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialGoal {
    pub id: String,

    pub name: String,

    /// Amount to accumulate, in today's money
    pub target_amount: f64,

    /// Cash already set aside for the goal
    #[serde(default)]
    pub current_amount: f64,

    /// Without a deadline no monthly rate can be computed
    #[serde(default)]
    pub deadline: Option<NaiveDate>,

    #[serde(default)]
    pub priority: Option<Priority>,

    #[serde(default)]
    pub category: Option<GoalCategory>,

    /// Overrides the horizon-based bucket order when set
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,

    /// Linked assets whose value counts toward the goal
    #[serde(default)]
    pub funding_source_ids: Vec<String>,
}

impl FinancialGoal {
    /// Create a goal with only the required fields set
    pub fn new(id: impl Into<String>, name: impl Into<String>, target_amount: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target_amount,
            current_amount: 0.0,
            deadline: None,
            priority: None,
            category: None,
            risk_level: None,
            funding_source_ids: Vec::new(),
        }
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_current_amount(mut self, amount: f64) -> Self {
        self.current_amount = amount;
        self
    }

    pub fn with_risk_level(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = Some(risk_level);
        self
    }

    pub fn with_funding_sources<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.funding_source_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Cash plus the value of every linked asset found in `assets`
    ///
    /// Ids with no matching asset contribute nothing.
    pub fn effective_funding(&self, assets: &[Asset]) -> f64 {
        let linked: f64 = self
            .funding_source_ids
            .iter()
            .filter_map(|id| assets.iter().find(|a| &a.id == id))
            .map(Asset::value)
            .sum();
        self.current_amount + linked
    }
}

/// An externally tracked investment or account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,

    #[serde(default)]
    pub current_value: Option<f64>,

    #[serde(default)]
    pub amount_invested: Option<f64>,
}

impl Asset {
    /// Current value, falling back to the invested amount when the value is unset or zero
    pub fn value(&self) -> f64 {
        self.current_value
            .filter(|v| *v != 0.0)
            .or(self.amount_invested)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_score() {
        assert_eq!(Priority::score(Some(Priority::High)), 3);
        assert_eq!(Priority::score(Some(Priority::Medium)), 2);
        assert_eq!(Priority::score(Some(Priority::Low)), 1);
        assert_eq!(Priority::score(None), 1);
    }

    #[test]
    fn test_category_bands() {
        assert_eq!(GoalCategory::from_months(6.0), GoalCategory::ShortTerm);
        assert_eq!(GoalCategory::from_months(24.0), GoalCategory::MediumTerm);
        assert_eq!(GoalCategory::from_months(59.9), GoalCategory::MediumTerm);
        assert_eq!(GoalCategory::from_months(60.0), GoalCategory::LongTerm);
    }

    #[test]
    fn test_asset_value_fallback() {
        let valued = Asset { id: "a".into(), current_value: Some(1500.0), amount_invested: Some(1000.0) };
        let unvalued = Asset { id: "b".into(), current_value: Some(0.0), amount_invested: Some(800.0) };
        let empty = Asset { id: "c".into(), current_value: None, amount_invested: None };

        assert_eq!(valued.value(), 1500.0);
        assert_eq!(unvalued.value(), 800.0);
        assert_eq!(empty.value(), 0.0);
    }

    #[test]
    fn test_effective_funding_ignores_unknown_assets() {
        let assets = vec![
            Asset { id: "fund".into(), current_value: Some(2000.0), amount_invested: None },
        ];
        let goal = FinancialGoal::new("g1", "House", 50_000.0)
            .with_current_amount(500.0)
            .with_funding_sources(["fund", "missing"]);

        assert_eq!(goal.effective_funding(&assets), 2500.0);
    }

    #[test]
    fn test_goal_deserializes_from_document() {
        let json = r#"{
            "id": "g1",
            "name": "Emergency fund",
            "targetAmount": 10000,
            "currentAmount": 2500,
            "deadline": "2027-06-30",
            "priority": "high",
            "category": "short-term",
            "riskLevel": "conservative",
            "fundingSourceIds": ["acc-1"]
        }"#;
        let goal: FinancialGoal = serde_json::from_str(json).unwrap();

        assert_eq!(goal.priority, Some(Priority::High));
        assert_eq!(goal.category, Some(GoalCategory::ShortTerm));
        assert_eq!(goal.risk_level, Some(RiskLevel::Conservative));
        assert_eq!(goal.deadline, NaiveDate::from_ymd_opt(2027, 6, 30));
        assert_eq!(goal.funding_source_ids, vec!["acc-1".to_string()]);
    }

    #[test]
    fn test_goal_optional_fields_default() {
        let goal: FinancialGoal =
            serde_json::from_str(r#"{"id": "g2", "name": "Car", "targetAmount": 8000}"#).unwrap();

        assert_eq!(goal.current_amount, 0.0);
        assert!(goal.deadline.is_none());
        assert!(goal.priority.is_none());
        assert!(goal.funding_source_ids.is_empty());
    }
}
