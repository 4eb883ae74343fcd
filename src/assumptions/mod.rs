//! Planning assumptions: inflation and nominal returns per risk bucket
//!
//! These are static assumptions, not fitted or fetched market data.

pub mod loader;

pub use loader::{load_assumption_rows, DEFAULT_ASSUMPTIONS_PATH};

use crate::error::{PlannerError, PlannerResult};
use crate::planning::Bucket;
use std::path::Path;

/// Container for all annual rate assumptions (decimals, e.g. 0.06 for 6%)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assumptions {
    pub inflation_rate: f64,
    pub conservative_return: f64,
    pub moderate_return: f64,
    pub aggressive_return: f64,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_planning()
    }
}

impl Assumptions {
    /// Fixed planning table: 6% inflation, 6% / 10% / 15% bucket returns
    pub fn default_planning() -> Self {
        Self {
            inflation_rate: 0.06,
            conservative_return: 0.06,
            moderate_return: 0.10,
            aggressive_return: 0.15,
        }
    }

    /// Nominal annual return of one bucket
    pub fn return_for(&self, bucket: Bucket) -> f64 {
        match bucket {
            Bucket::Conservative => self.conservative_return,
            Bucket::Moderate => self.moderate_return,
            Bucket::Aggressive => self.aggressive_return,
        }
    }

    /// Load from `planning_assumptions.csv` in the default location (data/assumptions/)
    pub fn from_csv() -> PlannerResult<Self> {
        Self::from_csv_path(Path::new(DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load from `planning_assumptions.csv` in a specific directory
    ///
    /// Rows that are absent keep the default planning value.
    pub fn from_csv_path(path: &Path) -> PlannerResult<Self> {
        let rows = loader::load_assumption_rows(path)?;
        Self::default_planning().with_overrides(&rows)
    }

    /// Apply `(name, value)` overrides on top of these assumptions
    pub fn with_overrides(mut self, rows: &[(String, f64)]) -> PlannerResult<Self> {
        for (name, value) in rows {
            let slot = match name.as_str() {
                "inflation" => &mut self.inflation_rate,
                "conservative_return" => &mut self.conservative_return,
                "moderate_return" => &mut self.moderate_return,
                "aggressive_return" => &mut self.aggressive_return,
                other => {
                    return Err(PlannerError::invalid_assumption(
                        other,
                        "unknown assumption name",
                    ))
                }
            };
            if !value.is_finite() || *value <= -1.0 {
                return Err(PlannerError::invalid_assumption(
                    name.as_str(),
                    format!("rate {} is out of range", value),
                ));
            }
            *slot = *value;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_planning_table() {
        let a = Assumptions::default_planning();
        assert_eq!(a.inflation_rate, 0.06);
        assert_eq!(a.return_for(Bucket::Conservative), 0.06);
        assert_eq!(a.return_for(Bucket::Moderate), 0.10);
        assert_eq!(a.return_for(Bucket::Aggressive), 0.15);
    }

    #[test]
    fn test_overrides_apply() {
        let rows = vec![("inflation".to_string(), 0.03), ("aggressive_return".to_string(), 0.12)];
        let a = Assumptions::default_planning().with_overrides(&rows).unwrap();
        assert_eq!(a.inflation_rate, 0.03);
        assert_eq!(a.aggressive_return, 0.12);
        assert_eq!(a.moderate_return, 0.10);
    }

    #[test]
    fn test_unknown_override_rejected() {
        let rows = vec![("equity_kicker".to_string(), 0.2)];
        assert!(Assumptions::default_planning().with_overrides(&rows).is_err());
    }
}
