//! # Portfolio Types
//!
//! $$
//! \mathbf{w}^\*=\arg\max_{\mathbf{w}} \ \mu^\top \mathbf{w}
//! \quad \text{s.t.} \quad \nabla f(\mathbf{w}_0)^\top \mathbf{w} \le \bar\sigma^2
//! $$
//!
//! Shared enums, configuration and result containers for portfolio construction.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::PortfolioError;

/// Policy for bringing historical series onto a common length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CleanMethod {
  /// Extend shorter series to the longest length by polynomial resampling.
  Interpolate,
  /// Cut longer series to the shortest length.
  Truncate,
}

impl CleanMethod {
  /// Parse the single-letter code (`"i"` or `"c"`) or the long name.
  pub fn from_code(code: &str) -> Result<Self, PortfolioError> {
    match code.trim().to_lowercase().as_str() {
      "i" | "interpolate" => Ok(Self::Interpolate),
      "c" | "truncate" => Ok(Self::Truncate),
      other => Err(PortfolioError::invalid(format!(
        "invalid clean method '{other}', must be 'i' or 'c'"
      ))),
    }
  }

  pub fn code(&self) -> &'static str {
    match self {
      Self::Interpolate => "i",
      Self::Truncate => "c",
    }
  }
}

impl FromStr for CleanMethod {
  type Err = PortfolioError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::from_code(s)
  }
}

impl Display for CleanMethod {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      CleanMethod::Interpolate => write!(f, "interpolate"),
      CleanMethod::Truncate => write!(f, "truncate"),
    }
  }
}

/// Whether the held histories are known to share one length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
  Unaligned,
  Aligned(CleanMethod),
}

impl Alignment {
  pub fn is_aligned(&self) -> bool {
    matches!(self, Alignment::Aligned(_))
  }
}

/// LP solver settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OptimizerConfig {
  /// Duality-gap and feasibility tolerance.
  pub tolerance: f64,
  /// Interior-point iteration budget.
  pub max_iterations: usize,
}

impl Default for OptimizerConfig {
  fn default() -> Self {
    Self {
      tolerance: 1e-8,
      max_iterations: 200,
    }
  }
}

/// Risk/return snapshot of an allocation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PortfolioSummary {
  /// Weights in holding order.
  pub weights: Vec<f64>,
  /// `sum_i mu_i w_i`.
  pub expected_return: f64,
  /// `sqrt(w' Sigma w)`.
  pub volatility: f64,
  /// `(expected_return - risk_free) / volatility`, unguarded.
  pub sharpe: f64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_clean_codes() {
    assert_eq!(CleanMethod::from_code("i").unwrap(), CleanMethod::Interpolate);
    assert_eq!(CleanMethod::from_code("c").unwrap(), CleanMethod::Truncate);
    assert_eq!("Truncate".parse::<CleanMethod>().unwrap(), CleanMethod::Truncate);
    assert_eq!(CleanMethod::Interpolate.code(), "i");
  }

  #[test]
  fn rejects_unknown_clean_code() {
    for code in ["x", "", "ic"] {
      assert!(matches!(
        CleanMethod::from_code(code),
        Err(PortfolioError::InvalidArgument(_))
      ));
    }
  }
}
