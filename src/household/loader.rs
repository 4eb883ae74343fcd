//! Load household snapshots exported from the document store

use super::FinancialProfile;
use crate::error::PlannerResult;
use crate::goals::{Asset, FinancialGoal};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Everything the planner needs for one household, already fetched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdInput {
    #[serde(default)]
    pub household_id: String,

    #[serde(default)]
    pub profile: FinancialProfile,

    #[serde(default)]
    pub goals: Vec<FinancialGoal>,

    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// Load one household from a JSON file
pub fn load_household<P: AsRef<Path>>(path: P) -> PlannerResult<HouseholdInput> {
    load_household_from_reader(File::open(path)?)
}

pub fn load_household_from_reader<R: Read>(reader: R) -> PlannerResult<HouseholdInput> {
    Ok(serde_json::from_reader(BufReader::new(reader))?)
}

/// Load a JSON array of households
pub fn load_households<P: AsRef<Path>>(path: P) -> PlannerResult<Vec<HouseholdInput>> {
    load_households_from_reader(File::open(path)?)
}

pub fn load_households_from_reader<R: Read>(reader: R) -> PlannerResult<Vec<HouseholdInput>> {
    Ok(serde_json::from_reader(BufReader::new(reader))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;

    #[test]
    fn test_load_household_from_reader() {
        let json = r#"{
            "householdId": "h-1",
            "profile": {"savingsCapacity": [{"contributorId": "sam", "amount": 500}]},
            "goals": [{"id": "g1", "name": "Trip", "targetAmount": 3000, "deadline": "2027-05-01"}],
            "assets": [{"id": "a1", "currentValue": 1200}]
        }"#;
        let household = load_household_from_reader(json.as_bytes()).unwrap();

        assert_eq!(household.household_id, "h-1");
        assert_eq!(household.profile.total_monthly_capacity(), 500.0);
        assert_eq!(household.goals.len(), 1);
        assert_eq!(household.assets[0].value(), 1200.0);
    }

    #[test]
    fn test_load_households_array() {
        let json = r#"[{"householdId": "a"}, {"householdId": "b", "goals": []}]"#;
        let households = load_households_from_reader(json.as_bytes()).unwrap();
        assert_eq!(households.len(), 2);
        assert!(households[0].goals.is_empty());
    }

    #[test]
    fn test_load_sample_household() {
        let household = load_household("data/sample_household.json").expect("Failed to load sample");
        assert_eq!(household.household_id, "demo");
        assert_eq!(household.goals.len(), 4);
        assert_eq!(household.profile.total_monthly_capacity(), 1500.0);

        let car = household.goals.iter().find(|g| g.id == "car").unwrap();
        assert_eq!(car.effective_funding(&household.assets), 3500.0);
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = load_household_from_reader("{not json".as_bytes()).unwrap_err();
        assert!(matches!(err, PlannerError::Json(_)));
    }
}
