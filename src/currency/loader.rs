//! Load manually entered rate tables

use super::RateTable;
use crate::error::PlannerResult;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Raw CSV row: `pair,rate` where pair is `FROM-TO`
#[derive(Debug, serde::Deserialize)]
struct RateRow {
    pair: String,
    rate: f64,
}

impl RateTable {
    /// Load a `pair,rate` CSV file
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> PlannerResult<Self> {
        Self::from_csv_reader(File::open(path)?)
    }

    /// Load `pair,rate` rows from any reader
    ///
    /// Keys are stored as written; malformed pairs are skipped when resolving.
    pub fn from_csv_reader<R: Read>(reader: R) -> PlannerResult<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut table = RateTable::new();

        for result in csv_reader.deserialize() {
            let row: RateRow = result?;
            table.insert_key(row.pair.trim().to_ascii_uppercase(), row.rate);
        }

        Ok(table)
    }

    /// Load a flat JSON object of `"FROM-TO": rate` entries
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> PlannerResult<Self> {
        Self::from_json_reader(File::open(path)?)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> PlannerResult<Self> {
        Ok(serde_json::from_reader(BufReader::new(reader))?)
    }
}
