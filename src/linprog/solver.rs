//! # Conic LP Backend
//!
//! $$
//! \min_{\mathbf{x}}\ \mathbf{q}^\top\mathbf{x}
//! \quad \text{s.t.} \quad A\mathbf{x} + \mathbf{s} = \mathbf{b},\ \mathbf{s}\in\{0\}^{m_e}\times\mathbb R_+^{m_i}
//! $$
//!
//! Linear programs are handed to the Clarabel interior-point solver with a zero
//! quadratic term. Equalities go to the zero cone; inequalities and the implicit
//! `x >= 0` bounds go to the non-negative cone.

use tracing::debug;
use tracing::warn;

use super::Goal;
use super::LinearProgram;
use super::Relation;
use crate::error::PortfolioError;
use crate::error::Result;

/// Optimal point of a linear program.
#[derive(Clone, Debug, PartialEq)]
pub struct LpSolution {
  /// Values of the decision variables.
  pub point: Vec<f64>,
  /// Objective value at `point`, in the program's own direction.
  pub value: f64,
  /// Interior-point iterations used.
  pub iterations: usize,
}

/// Solver settings forwarded to Clarabel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LpSolver {
  tolerance: f64,
  max_iterations: usize,
}

impl Default for LpSolver {
  fn default() -> Self {
    Self::new(1e-8, 200)
  }
}

/// Constraint rows in cone order: zero-cone rows first, then non-negative rows.
struct ConeRows {
  rows: Vec<Vec<f64>>,
  rhs: Vec<f64>,
  equalities: usize,
}

impl ConeRows {
  fn from_program(lp: &LinearProgram) -> Self {
    let n = lp.num_variables();
    let mut rows = Vec::with_capacity(lp.constraints.len() + n);
    let mut rhs = Vec::with_capacity(lp.constraints.len() + n);

    for c in lp.constraints.iter().filter(|c| c.relation == Relation::Eq) {
      rows.push(c.coefficients.clone());
      rhs.push(c.rhs);
    }
    let equalities = rows.len();

    for c in lp.constraints.iter().filter(|c| c.relation != Relation::Eq) {
      match c.relation {
        Relation::GreaterEq => {
          rows.push(c.coefficients.iter().map(|a| -a).collect());
          rhs.push(-c.rhs);
        }
        _ => {
          rows.push(c.coefficients.clone());
          rhs.push(c.rhs);
        }
      }
    }

    // x >= 0 as -x <= 0
    for j in 0..n {
      let mut row = vec![0.0; n];
      row[j] = -1.0;
      rows.push(row);
      rhs.push(0.0);
    }

    Self {
      rows,
      rhs,
      equalities,
    }
  }

  fn inequalities(&self) -> usize {
    self.rows.len() - self.equalities
  }

  /// Column-compressed copy of the rows.
  fn to_csc(&self, n: usize) -> clarabel::algebra::CscMatrix<f64> {
    let mut colptr = Vec::with_capacity(n + 1);
    let mut rowval = Vec::new();
    let mut nzval = Vec::new();
    colptr.push(0);
    for j in 0..n {
      for (i, row) in self.rows.iter().enumerate() {
        if row[j] != 0.0 {
          rowval.push(i);
          nzval.push(row[j]);
        }
      }
      colptr.push(nzval.len());
    }
    clarabel::algebra::CscMatrix::new(self.rows.len(), n, colptr, rowval, nzval)
  }
}

impl LpSolver {
  pub fn new(tolerance: f64, max_iterations: usize) -> Self {
    Self {
      tolerance,
      max_iterations,
    }
  }

  pub fn tolerance(&self) -> f64 {
    self.tolerance
  }

  pub fn max_iterations(&self) -> usize {
    self.max_iterations
  }

  /// Solve `lp` over the non-negative orthant.
  pub fn solve(&self, lp: &LinearProgram) -> Result<LpSolution> {
    use clarabel::algebra::*;
    use clarabel::solver::*;

    check_program(lp)?;
    let n = lp.num_variables();
    let sign = match lp.goal {
      Goal::Maximize => 1.0,
      Goal::Minimize => -1.0,
    };

    let p = CscMatrix::new(n, n, vec![0; n + 1], Vec::new(), Vec::new());
    let q: Vec<f64> = lp.objective.iter().map(|c| -sign * c).collect();

    let cone_rows = ConeRows::from_program(lp);
    let a = cone_rows.to_csc(n);
    let mut cones = Vec::with_capacity(2);
    if cone_rows.equalities > 0 {
      cones.push(ZeroConeT(cone_rows.equalities));
    }
    cones.push(NonnegativeConeT(cone_rows.inequalities()));

    let max_iter = u32::try_from(self.max_iterations).unwrap_or(u32::MAX);
    let settings = DefaultSettingsBuilder::default()
      .max_iter(max_iter)
      .tol_gap_abs(self.tolerance)
      .tol_gap_rel(self.tolerance)
      .tol_feas(self.tolerance)
      .verbose(false)
      .build()
      .map_err(|e| PortfolioError::Solver(format!("invalid solver settings: {e}")))?;

    let mut solver = DefaultSolver::new(&p, &q, &a, &cone_rows.rhs, &cones, settings)
      .map_err(|e| PortfolioError::Solver(format!("failed to create solver: {e:?}")))?;
    solver.solve();

    let solution = &solver.solution;
    let iterations = solution.iterations as usize;
    debug!(status = ?solution.status, iterations, "clarabel finished");

    match solution.status {
      SolverStatus::Solved => {}
      SolverStatus::AlmostSolved => {
        warn!(iterations, "linear program solved to reduced accuracy");
      }
      SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
        return Err(PortfolioError::Infeasible);
      }
      SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
        return Err(PortfolioError::Unbounded);
      }
      SolverStatus::MaxIterations => {
        return Err(PortfolioError::IterationLimit {
          iterations: self.max_iterations,
        });
      }
      _ => {
        return Err(PortfolioError::Solver(format!(
          "solver stopped with status {:?}",
          solution.status
        )));
      }
    }

    let point: Vec<f64> = solution.x.iter().map(|x| x.max(0.0)).collect();
    let value = point
      .iter()
      .zip(&lp.objective)
      .map(|(x, c)| x * c)
      .sum();

    Ok(LpSolution {
      point,
      value,
      iterations,
    })
  }
}

fn check_program(lp: &LinearProgram) -> Result<()> {
  let n = lp.num_variables();
  if n == 0 {
    return Err(PortfolioError::invalid(
      "linear program has no decision variables",
    ));
  }
  if lp.objective.iter().any(|c| !c.is_finite()) {
    return Err(PortfolioError::invalid(
      "objective coefficients must be finite",
    ));
  }
  for (k, c) in lp.constraints.iter().enumerate() {
    if c.coefficients.len() != n {
      return Err(PortfolioError::invalid(format!(
        "constraint {k} has {} coefficients, expected {n}",
        c.coefficients.len()
      )));
    }
    if !c.rhs.is_finite() || c.coefficients.iter().any(|a| !a.is_finite()) {
      return Err(PortfolioError::invalid(format!(
        "constraint {k} has non-finite terms"
      )));
    }
  }
  Ok(())
}
