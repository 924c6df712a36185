//! # Allocation Optimizer
//!
//! $$
//! \max_{\mathbf{w}} \ \mu^\top\mathbf{w}
//! \quad \text{s.t.} \quad \mathbf{1}^\top\mathbf{w}=1,\ 0\le w_i\le 1,\
//! 2(\Sigma\mathbf{w}_0)^\top\mathbf{w}\le\bar\sigma^2
//! $$
//!
//! Long-only, fully-invested allocation that maximizes expected return under the
//! linearized variance bound.

use ndarray::Array1;
use ndarray::Array2;
use tracing::debug;

use super::linearize::linearized_risk_constraint;
use super::types::OptimizerConfig;
use crate::error::PortfolioError;
use crate::error::Result;
use crate::linprog::LinearConstraint;
use crate::linprog::LinearProgram;
use crate::linprog::LpSolver;

/// Assemble the allocation program for expected returns `mu`, covariance `cov` and
/// reference weights `w0` (all in the same asset order).
pub fn allocation_program(
  mu: &[f64],
  cov: &Array2<f64>,
  w0: &Array1<f64>,
  desired_risk: f64,
) -> Result<LinearProgram> {
  let n = mu.len();
  if n == 0 {
    return Err(PortfolioError::EmptyPortfolio);
  }
  if cov.dim() != (n, n) || w0.len() != n {
    return Err(PortfolioError::invalid(format!(
      "dimension mismatch: {n} returns, {:?} covariance, {} reference weights",
      cov.dim(),
      w0.len()
    )));
  }

  let mut lp = LinearProgram::maximize(mu.to_vec())
    .subject_to(LinearConstraint::equal(vec![1.0; n], 1.0))
    .subject_to(linearized_risk_constraint(cov, w0, desired_risk));

  for i in 0..n {
    let mut unit = vec![0.0; n];
    unit[i] = 1.0;
    lp.add_constraint(LinearConstraint::less_eq(unit, 1.0));
  }

  Ok(lp)
}

/// Solve the allocation program and return the optimal weights.
pub fn optimize_allocation(
  mu: &[f64],
  cov: &Array2<f64>,
  w0: &Array1<f64>,
  desired_risk: f64,
  config: &OptimizerConfig,
) -> Result<Vec<f64>> {
  let lp = allocation_program(mu, cov, w0, desired_risk)?;
  debug!(
    assets = mu.len(),
    desired_risk,
    constraints = lp.constraints.len(),
    "solving allocation program"
  );

  let solver = LpSolver::new(config.tolerance, config.max_iterations);
  let solution = solver.solve(&lp)?;

  debug!(
    iterations = solution.iterations,
    expected_return = solution.value,
    "allocation solved"
  );
  Ok(
    solution
      .point
      .into_iter()
      .map(|w| w.clamp(0.0, 1.0))
      .collect(),
  )
}
