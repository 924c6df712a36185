//! # Covariance Estimation
//!
//! $$
//! \Sigma_{ij} = \frac{1}{m-1}\sum_{t=1}^{m}(r_{ti}-\bar r_i)(r_{tj}-\bar r_j)
//! $$
//!
//! Sample covariance of aligned return histories and the quadratic forms built on it.

use ndarray::Array1;
use ndarray::Array2;
use ndarray_stats::CorrelationExt;

use crate::error::PortfolioError;
use crate::error::Result;

/// Stack equal-length histories into an `m x n` matrix, one column per asset.
///
/// Callers must align the histories first; a ragged input is rejected.
pub fn returns_matrix<S: AsRef<[f64]>>(histories: &[S]) -> Result<Array2<f64>> {
  let n = histories.len();
  if n == 0 {
    return Err(PortfolioError::EmptyPortfolio);
  }
  let m = histories[0].as_ref().len();
  if histories.iter().any(|h| h.as_ref().len() != m) {
    return Err(PortfolioError::invalid(
      "historical return counts differ between assets",
    ));
  }

  Ok(Array2::from_shape_fn((m, n), |(t, j)| histories[j].as_ref()[t]))
}

/// Sample covariance (Bessel-corrected) between the assets' histories.
pub fn covariance_matrix<S: AsRef<[f64]>>(histories: &[S]) -> Result<Array2<f64>> {
  let returns = returns_matrix(histories)?;
  let observations = returns.nrows();
  if observations < 2 {
    return Err(PortfolioError::InsufficientHistory {
      required: 2,
      actual: observations,
    });
  }

  // `cov` treats rows as variables and columns as observations
  Ok(returns.t().cov(1.0)?)
}

/// `w' Sigma w`.
pub fn portfolio_variance(cov: &Array2<f64>, weights: &Array1<f64>) -> f64 {
  weights.dot(&cov.dot(weights))
}

/// `sqrt(w' Sigma w)`, with round-off below zero floored so hedged books stay real.
pub fn portfolio_volatility(cov: &Array2<f64>, weights: &Array1<f64>) -> f64 {
  portfolio_variance(cov, weights).max(0.0).sqrt()
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::array;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use rand_distr::Distribution;
  use rand_distr::Normal;

  use super::*;

  #[test]
  fn builds_column_per_asset() {
    let m = returns_matrix(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    assert_eq!(m.shape(), &[3, 2]);
    assert_eq!(m.column(1).to_vec(), vec![4.0, 5.0, 6.0]);
  }

  #[test]
  fn sample_covariance_uses_bessel_correction() {
    let cov = covariance_matrix(&[
      vec![0.1, -0.1, 0.1, -0.1],
      vec![0.01, 0.01, -0.01, -0.01],
    ])
    .unwrap();

    assert_abs_diff_eq!(cov[[0, 0]], 0.04 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(cov[[1, 1]], 0.0004 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(cov[[0, 1]], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(cov[[0, 1]], cov[[1, 0]], epsilon = 1e-15);
  }

  #[test]
  fn rejects_ragged_and_short_input() {
    assert!(matches!(
      covariance_matrix(&[vec![1.0, 2.0], vec![1.0]]),
      Err(PortfolioError::InvalidArgument(_))
    ));
    assert!(matches!(
      covariance_matrix(&[vec![1.0], vec![2.0]]),
      Err(PortfolioError::InsufficientHistory { actual: 1, .. })
    ));
    assert!(matches!(
      covariance_matrix::<Vec<f64>>(&[]),
      Err(PortfolioError::EmptyPortfolio)
    ));
  }

  #[test]
  fn hedged_collinear_book_has_zero_volatility() {
    let mut rng = StdRng::seed_from_u64(19);
    let normal = Normal::new(0.0, 0.02).unwrap();
    let w = array![3.0, -1.0];

    for _ in 0..200 {
      let a: Vec<f64> = (0..12).map(|_| normal.sample(&mut rng)).collect();
      let b: Vec<f64> = a.iter().map(|r| 3.0 * r).collect();
      let cov = covariance_matrix(&[a, b]).unwrap();

      let vol = portfolio_volatility(&cov, &w);
      assert!(!vol.is_nan());
      assert_abs_diff_eq!(vol, 0.0, epsilon = 1e-7);
    }
  }

  #[test]
  fn volatility_of_quadratic_form() {
    let cov = array![[0.04, 0.0], [0.0, 0.09]];
    let w = array![0.5, 0.5];
    assert_abs_diff_eq!(portfolio_variance(&cov, &w), 0.0325, epsilon = 1e-12);
    assert_abs_diff_eq!(portfolio_volatility(&cov, &w), 0.0325f64.sqrt(), epsilon = 1e-12);
  }
}
