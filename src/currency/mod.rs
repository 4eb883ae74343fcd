//! Currency-pair rate lookup used by trip budgets

mod graph;
mod loader;

pub use graph::{
    convert_amount, convert_or_literal, parse_pair, resolve_rate, ConvertedAmount, CurrencyCode,
    RateTable,
};
