//! Currency conversion over a sparse graph of manually entered rates

use crate::error::{PlannerError, PlannerResult};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

/// Upper-cased alphabetic currency code such as `EUR`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn parse(raw: &str) -> PlannerResult<Self> {
        let code = raw.trim().to_ascii_uppercase();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PlannerError::InvalidCurrency(format!("'{}' is not a currency code", raw)));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = PlannerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split a `"FROM-TO"` key into its two codes
pub fn parse_pair(key: &str) -> PlannerResult<(CurrencyCode, CurrencyCode)> {
    match key.split_once('-') {
        Some((from, to)) => Ok((CurrencyCode::parse(from)?, CurrencyCode::parse(to)?)),
        None => Err(PlannerError::InvalidCurrency(format!("'{}' is not a FROM-TO pair", key))),
    }
}

/// Directly defined rates keyed `"FROM-TO"`, meaning 1 FROM = rate TO
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: BTreeMap<String, f64>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(rates: BTreeMap<String, f64>) -> Self {
        Self { rates }
    }

    pub fn insert(&mut self, from: &CurrencyCode, to: &CurrencyCode, rate: f64) {
        self.rates.insert(format!("{}-{}", from, to), rate);
    }

    pub fn insert_key(&mut self, key: impl Into<String>, rate: f64) {
        self.rates.insert(key.into(), rate);
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Edges in both directions; the reverse edge carries the reciprocal
    ///
    /// Keys that don't parse and rates that are not positive and finite are skipped.
    fn adjacency(&self) -> HashMap<CurrencyCode, Vec<(CurrencyCode, f64)>> {
        let mut graph: HashMap<CurrencyCode, Vec<(CurrencyCode, f64)>> = HashMap::new();

        for (key, &rate) in &self.rates {
            let (from, to) = match parse_pair(key) {
                Ok(pair) => pair,
                Err(err) => {
                    warn!("Skipping rate entry: {}", err);
                    continue;
                }
            };
            if !rate.is_finite() || rate <= 0.0 {
                warn!("Skipping rate {} for {}: not a positive number", rate, key);
                continue;
            }

            graph.entry(from.clone()).or_default().push((to.clone(), rate));
            graph.entry(to).or_default().push((from, 1.0 / rate));
        }

        graph
    }
}

/// Rate converting one unit of `from` into `to`
///
/// Breadth-first from `from`, multiplying rates along the way; the first path
/// that reaches `to` (fewest hops) wins. `None` when no chain of defined
/// rates connects the two. Identical codes always give 1.0.
pub fn resolve_rate(from: &CurrencyCode, to: &CurrencyCode, table: &RateTable) -> Option<f64> {
    if from == to {
        return Some(1.0);
    }

    let graph = table.adjacency();
    let mut visited: HashSet<&CurrencyCode> = HashSet::new();
    let mut frontier: VecDeque<(&CurrencyCode, f64)> = VecDeque::new();

    frontier.push_back((from, 1.0));
    visited.insert(from);

    while let Some((current, rate)) = frontier.pop_front() {
        let Some(edges) = graph.get(current) else {
            continue;
        };

        for (next, edge_rate) in edges {
            if visited.contains(next) {
                continue;
            }
            let next_rate = rate * edge_rate;
            if next == to {
                return Some(next_rate);
            }
            visited.insert(next);
            frontier.push_back((next, next_rate));
        }
    }

    None
}

/// Convert `amount` of `from` into `to`, if a rate path exists
pub fn convert_amount(amount: f64, from: &CurrencyCode, to: &CurrencyCode, table: &RateTable) -> Option<f64> {
    resolve_rate(from, to, table).map(|rate| amount * rate)
}

/// An amount ready for display, converted when possible
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedAmount {
    pub amount: f64,
    /// `None` means `amount` is the literal, unconverted figure
    pub rate: Option<f64>,
}

impl ConvertedAmount {
    pub fn is_converted(&self) -> bool {
        self.rate.is_some()
    }
}

/// Convert when a path exists, otherwise keep the literal amount
pub fn convert_or_literal(amount: f64, from: &CurrencyCode, to: &CurrencyCode, table: &RateTable) -> ConvertedAmount {
    match resolve_rate(from, to, table) {
        Some(rate) => ConvertedAmount { amount: amount * rate, rate: Some(rate) },
        None => ConvertedAmount { amount, rate: None },
    }
}
