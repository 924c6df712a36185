//! # Linear Programming
//!
//! $$
//! \max_{\mathbf{x}\ge 0}\ \mathbf{c}^\top\mathbf{x}
//! \quad \text{s.t.} \quad A\mathbf{x} \,\{\le,=,\ge\}\, \mathbf{b}
//! $$
//!
//! Problem description types and the solver that hands them to Clarabel. Decision
//! variables are always non-negative.

pub mod solver;

pub use solver::LpSolution;
pub use solver::LpSolver;

/// Optimization direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Goal {
  #[default]
  Maximize,
  Minimize,
}

/// Relation between a constraint's left-hand side and its bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
  LessEq,
  GreaterEq,
  Eq,
}

/// `coefficients . x (relation) rhs`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearConstraint {
  pub coefficients: Vec<f64>,
  pub relation: Relation,
  pub rhs: f64,
}

impl LinearConstraint {
  pub fn new(coefficients: Vec<f64>, relation: Relation, rhs: f64) -> Self {
    Self {
      coefficients,
      relation,
      rhs,
    }
  }

  pub fn less_eq(coefficients: Vec<f64>, rhs: f64) -> Self {
    Self::new(coefficients, Relation::LessEq, rhs)
  }

  pub fn greater_eq(coefficients: Vec<f64>, rhs: f64) -> Self {
    Self::new(coefficients, Relation::GreaterEq, rhs)
  }

  pub fn equal(coefficients: Vec<f64>, rhs: f64) -> Self {
    Self::new(coefficients, Relation::Eq, rhs)
  }
}

/// Objective, direction and constraints of a linear program.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinearProgram {
  pub objective: Vec<f64>,
  pub goal: Goal,
  pub constraints: Vec<LinearConstraint>,
}

impl LinearProgram {
  pub fn maximize(objective: Vec<f64>) -> Self {
    Self {
      objective,
      goal: Goal::Maximize,
      constraints: Vec::new(),
    }
  }

  pub fn minimize(objective: Vec<f64>) -> Self {
    Self {
      objective,
      goal: Goal::Minimize,
      constraints: Vec::new(),
    }
  }

  #[must_use]
  pub fn subject_to(mut self, constraint: LinearConstraint) -> Self {
    self.constraints.push(constraint);
    self
  }

  pub fn add_constraint(&mut self, constraint: LinearConstraint) {
    self.constraints.push(constraint);
  }

  pub fn num_variables(&self) -> usize {
    self.objective.len()
  }
}
