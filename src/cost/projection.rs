//! Geometric-series growth projection shared by the calculators.

pub const QUARTER_MONTHS: u32 = 3;
pub const HALF_YEAR_MONTHS: u32 = 6;
pub const YEAR_MONTHS: u32 = 12;

/// Cumulative cost over `periods` months when the monthly cost starts at
/// `monthly_cost` and compounds by `growth_rate` (a fraction) each month.
///
/// `C × ((1 + g)^n − 1) / g` for `g > 0`, otherwise `C × n`. Negative growth
/// is treated as no growth.
pub fn cumulative_projection(monthly_cost: f64, growth_rate: f64, periods: u32) -> f64 {
    if growth_rate > 0.0 {
        monthly_cost * ((1.0 + growth_rate).powi(periods as i32) - 1.0) / growth_rate
    } else {
        monthly_cost * periods as f64
    }
}

/// `5.0` (percent) -> `0.05`
pub fn percent_to_rate(percent: f64) -> f64 {
    percent / 100.0
}
