//! CSV-based assumption loader
//!
//! Loads planning assumptions from CSV files in data/assumptions/

use crate::error::{PlannerError, PlannerResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// File name of the planning assumption table
pub const ASSUMPTIONS_FILE: &str = "planning_assumptions.csv";

/// Load `name,value` rows from `planning_assumptions.csv` in `path`
pub fn load_assumption_rows(path: &Path) -> PlannerResult<Vec<(String, f64)>> {
    let file = File::open(path.join(ASSUMPTIONS_FILE))?;
    load_assumption_rows_from_reader(file)
}

/// Load `name,value` rows from any reader
pub fn load_assumption_rows_from_reader<R: Read>(reader: R) -> PlannerResult<Vec<(String, f64)>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        let name = record.get(0).unwrap_or_default().trim().to_string();
        let raw = record.get(1).unwrap_or_default().trim();
        let value: f64 = raw
            .parse()
            .map_err(|_| PlannerError::invalid_assumption(name.as_str(), format!("'{}' is not a number", raw)))?;
        rows.push((name, value));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Assumptions;

    #[test]
    fn test_load_rows() {
        let csv = "name,value\ninflation,0.04\nmoderate_return,0.08\n";
        let rows = load_assumption_rows_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(rows, vec![("inflation".to_string(), 0.04), ("moderate_return".to_string(), 0.08)]);

        let assumptions = Assumptions::default_planning().with_overrides(&rows).unwrap();
        assert_eq!(assumptions.inflation_rate, 0.04);
        assert_eq!(assumptions.conservative_return, 0.06);
    }

    #[test]
    fn test_load_default_assumptions() {
        let result = Assumptions::from_csv();
        assert!(result.is_ok(), "Failed to load assumptions: {:?}", result.err());
        assert_eq!(result.unwrap(), Assumptions::default_planning());
    }

    #[test]
    fn test_malformed_value_rejected() {
        let csv = "name,value\ninflation,six percent\n";
        let err = load_assumption_rows_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidAssumption { .. }));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let err = load_assumption_rows(Path::new("no/such/dir")).unwrap_err();
        assert!(matches!(err, PlannerError::Io(_)));
    }
}
