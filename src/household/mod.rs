//! Household profile and snapshot loading

mod profile;
pub mod loader;

pub use profile::{FinancialProfile, IncomeSource, RiskAllocation, SavingsContribution};
pub use loader::{
    load_household, load_household_from_reader, load_households, load_households_from_reader,
    HouseholdInput,
};
