//! Savings capacity growth over a goal horizon

/// Ratio of average future monthly capacity to today's monthly capacity
///
/// Simulates whole years (`ceil(years)`): each year adds the current annual
/// capacity plus the bonus, then annual capacity grows by
/// `annual_growth_rate_pct / 100`.
///
/// Horizons of a year or less, and zero or negative capacity, return 1.0.
pub fn project_growth_multiplier(
    years: f64,
    annual_growth_rate_pct: f64,
    annual_bonus: f64,
    current_monthly_capacity: f64,
) -> f64 {
    if !(years > 1.0) || !(current_monthly_capacity > 0.0) {
        return 1.0;
    }

    let whole_years = years.ceil() as u32;
    let growth = 1.0 + annual_growth_rate_pct / 100.0;

    let mut current_annual = current_monthly_capacity * 12.0;
    let mut total = 0.0;
    for _ in 0..whole_years {
        total += current_annual + annual_bonus;
        current_annual *= growth;
    }

    (total / (whole_years as f64 * 12.0)) / current_monthly_capacity
}
