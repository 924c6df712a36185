//! # Weight Helpers
//!
//! $$
//! w_i = \frac{v_i}{\sum_j v_j}
//! $$
//!

use crate::error::PortfolioError;
use crate::error::Result;

/// Convert asset values (e.g. estimated property values) into portfolio weights.
pub fn weights_from_values(values: &[f64]) -> Result<Vec<f64>> {
  if values.is_empty() {
    return Err(PortfolioError::invalid(
      "asset values list cannot be empty",
    ));
  }

  let total: f64 = values.iter().sum();
  if total == 0.0 {
    return Err(PortfolioError::invalid("total asset value cannot be zero"));
  }

  Ok(values.iter().map(|v| v / total).collect())
}

/// Rescale weights so they sum to one.
pub fn normalized_weights(weights: &[f64]) -> Result<Vec<f64>> {
  weights_from_values(weights)
}

/// `1/n` for each of `n` assets.
pub fn equal_weights(n: usize) -> Vec<f64> {
  if n == 0 {
    return Vec::new();
  }
  vec![1.0 / n as f64; n]
}
