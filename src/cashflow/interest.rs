//! # Interest
//!
//! $$
//! FV_{\text{simple}} = P(1 + rt), \qquad FV_{\text{compound}} = P(1+r)^t, \qquad
//! FV_{\text{cont}} = Pe^{rt}
//! $$
//!
//! Closed-form interest formulas. Rates are decimals (0.05 = 5%) and time is in years.

const MONTHS_PER_YEAR: f64 = 12.0;
const DAYS_PER_YEAR: f64 = 365.0;

/// Years, months and days collapsed into fractional years (365-day year).
pub fn year_fraction(years: u32, months: u32, days: u32) -> f64 {
  years as f64 + months as f64 / MONTHS_PER_YEAR + days as f64 / DAYS_PER_YEAR
}

/// Interest earned under simple interest.
pub fn simple_interest(principal: f64, rate: f64, years: f64) -> f64 {
  principal * rate * years
}

/// Principal plus simple interest.
pub fn total_simple_interest(principal: f64, rate: f64, years: f64) -> f64 {
  simple_interest(principal, rate, years) + principal
}

/// Principal grown by annual compounding.
pub fn total_compound_interest(principal: f64, rate: f64, years: f64) -> f64 {
  principal * (1.0 + rate).powf(years)
}

/// Interest earned under annual compounding.
pub fn compound_interest(principal: f64, rate: f64, years: f64) -> f64 {
  total_compound_interest(principal, rate, years) - principal
}

/// Simple rate that grows `principal` into `end_value` over `years`.
pub fn find_simple_rate(principal: f64, end_value: f64, years: f64) -> f64 {
  (end_value - principal) / (years * principal)
}

/// Annually compounded rate that grows `principal` into `end_value` over `years`.
pub fn find_compound_rate(principal: f64, end_value: f64, years: f64) -> f64 {
  (end_value / principal).powf(1.0 / years) - 1.0
}

pub fn continuous_compound_interest(principal: f64, rate: f64, years: f64) -> f64 {
  principal * (rate * years).exp()
}

pub fn find_continuous_rate(principal: f64, end_value: f64, years: f64) -> f64 {
  (end_value / principal).ln() / years
}

/// Future value with `periods_per_year` compounding periods.
pub fn periodic_compound_interest(
  principal: f64,
  annual_rate: f64,
  years: f64,
  periods_per_year: u32,
) -> f64 {
  let n = periods_per_year as f64;
  principal * (1.0 + annual_rate / n).powf(n * years)
}

pub fn monthly_compound_interest(principal: f64, annual_rate: f64, years: f64) -> f64 {
  periodic_compound_interest(principal, annual_rate, years, 12)
}

pub fn daily_compound_interest(principal: f64, annual_rate: f64, years: f64) -> f64 {
  periodic_compound_interest(principal, annual_rate, years, 365)
}

/// Per-month rate that grows `principal` into `end_value` over `years`.
pub fn find_monthly_compound_rate(principal: f64, end_value: f64, years: f64) -> f64 {
  (end_value / principal).powf(1.0 / (MONTHS_PER_YEAR * years)) - 1.0
}

/// Per-day rate that grows `principal` into `end_value` over `years`.
pub fn find_daily_compound_rate(principal: f64, end_value: f64, years: f64) -> f64 {
  (end_value / principal).powf(1.0 / (DAYS_PER_YEAR * years)) - 1.0
}
