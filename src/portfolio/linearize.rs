//! # Risk Constraint Linearization
//!
//! $$
//! f(\mathbf{w}) = \mathbf{w}^\top\Sigma\mathbf{w}, \qquad
//! f(\mathbf{w}) \approx \nabla f(\mathbf{w}_0)^\top \mathbf{w} = 2(\Sigma\mathbf{w}_0)^\top\mathbf{w}
//! $$
//!
//! First-order replacement of the quadratic variance bound by a linear inequality.
//! Accurate only near the reference point `w0`; the further an optimized allocation
//! moves from it, the looser the approximation.

use ndarray::Array1;
use ndarray::Array2;

use crate::linprog::LinearConstraint;

/// Gradient of `w' Sigma w` at `w0`, i.e. `2 Sigma w0`.
pub fn variance_gradient(cov: &Array2<f64>, w0: &Array1<f64>) -> Array1<f64> {
  cov.dot(w0) * 2.0
}

/// `grad f(w0) . w <= desired_risk`.
pub fn linearized_risk_constraint(
  cov: &Array2<f64>,
  w0: &Array1<f64>,
  desired_risk: f64,
) -> LinearConstraint {
  let gradient = variance_gradient(cov, w0);
  LinearConstraint::less_eq(gradient.to_vec(), desired_risk)
}
