//! # Errors
//!
//! Failure modes of asset validation, history alignment, covariance estimation and
//! the allocation solver.

use ndarray_stats::errors::EmptyInput;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PortfolioError {
  #[error("Invalid argument: {0}")]
  InvalidArgument(String),

  #[error("Insufficient history: need at least {required} observations per asset, got {actual}")]
  InsufficientHistory { required: usize, actual: usize },

  #[error("Portfolio holds no assets")]
  EmptyPortfolio,

  #[error("Linear program is infeasible")]
  Infeasible,

  #[error("Linear program is unbounded")]
  Unbounded,

  #[error("Solver did not converge after {iterations} iterations")]
  IterationLimit { iterations: usize },

  #[error("LP solver failed: {0}")]
  Solver(String),

  #[error("Covariance estimation failed: {0}")]
  Covariance(String),
}

impl PortfolioError {
  pub(crate) fn invalid(reason: impl Into<String>) -> Self {
    PortfolioError::InvalidArgument(reason.into())
  }
}

impl From<EmptyInput> for PortfolioError {
  fn from(e: EmptyInput) -> Self {
    PortfolioError::Covariance(e.to_string())
  }
}

/// Standard result type for all portfolio operations.
pub type Result<T> = std::result::Result<T, PortfolioError>;
