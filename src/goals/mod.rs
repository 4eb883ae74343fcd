//! Goal data structures and goal list loading

mod data;
pub mod loader;

pub use data::{Asset, FinancialGoal, GoalCategory, Priority, RiskLevel};
pub use loader::{load_goals_csv, load_goals_csv_from_reader, load_goals_json, load_goals_json_from_reader};
