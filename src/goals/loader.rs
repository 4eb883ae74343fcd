//! Load goal lists from JSON documents or CSV exports

use super::{FinancialGoal, Priority, RiskLevel};
use crate::error::{PlannerError, PlannerResult};
use chrono::NaiveDate;
use csv::Reader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Raw CSV row matching the goals export columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "GoalID")]
    goal_id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "TargetAmount")]
    target_amount: f64,
    #[serde(rename = "CurrentAmount", default)]
    current_amount: Option<f64>,
    #[serde(rename = "Deadline", default)]
    deadline: Option<String>,
    #[serde(rename = "Priority", default)]
    priority: Option<String>,
    #[serde(rename = "RiskLevel", default)]
    risk_level: Option<String>,
    /// Semicolon separated asset ids
    #[serde(rename = "FundingSources", default)]
    funding_sources: Option<String>,
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl CsvRow {
    fn to_goal(self) -> PlannerResult<FinancialGoal> {
        let deadline = match non_empty(self.deadline) {
            Some(raw) => Some(NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| {
                PlannerError::InvalidInput(format!("Goal {}: bad deadline '{}': {}", self.goal_id, raw, e))
            })?),
            None => None,
        };

        let priority = match non_empty(self.priority).as_deref() {
            Some("high") | Some("High") => Some(Priority::High),
            Some("medium") | Some("Medium") => Some(Priority::Medium),
            Some("low") | Some("Low") => Some(Priority::Low),
            None => None,
            Some(other) => {
                return Err(PlannerError::InvalidInput(format!("Unknown Priority: {}", other)))
            }
        };

        let risk_level = match non_empty(self.risk_level).as_deref() {
            Some("conservative") | Some("Conservative") => Some(RiskLevel::Conservative),
            Some("moderate") | Some("Moderate") => Some(RiskLevel::Moderate),
            Some("aggressive") | Some("Aggressive") => Some(RiskLevel::Aggressive),
            None => None,
            Some(other) => {
                return Err(PlannerError::InvalidInput(format!("Unknown RiskLevel: {}", other)))
            }
        };

        let current_amount = self.current_amount.unwrap_or(0.0);
        for (column, value) in [("TargetAmount", self.target_amount), ("CurrentAmount", current_amount)] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlannerError::InvalidInput(format!(
                    "Goal {}: {} must be a non-negative number, got {}",
                    self.goal_id, column, value
                )));
            }
        }

        let funding_source_ids = non_empty(self.funding_sources)
            .map(|s| {
                s.split(';')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(FinancialGoal {
            id: self.goal_id,
            name: self.name,
            target_amount: self.target_amount,
            current_amount,
            deadline,
            priority,
            category: None,
            risk_level,
            funding_source_ids,
        })
    }
}

/// Load goals from a CSV export
pub fn load_goals_csv<P: AsRef<Path>>(path: P) -> PlannerResult<Vec<FinancialGoal>> {
    load_goals_csv_from_reader(File::open(path)?)
}

/// Load goals from any CSV reader (e.g., string buffer)
pub fn load_goals_csv_from_reader<R: Read>(reader: R) -> PlannerResult<Vec<FinancialGoal>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut goals = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        goals.push(row.to_goal()?);
    }

    Ok(goals)
}

/// Load goals from a JSON array of goal documents
pub fn load_goals_json<P: AsRef<Path>>(path: P) -> PlannerResult<Vec<FinancialGoal>> {
    load_goals_json_from_reader(File::open(path)?)
}

pub fn load_goals_json_from_reader<R: Read>(reader: R) -> PlannerResult<Vec<FinancialGoal>> {
    Ok(serde_json::from_reader(BufReader::new(reader))?)
}
