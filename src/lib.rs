//! # realty-mpt
//!
//! $$
//! \max_{\mathbf{w}} \ \mu^\top\mathbf{w}
//! \quad \text{s.t.} \quad \mathbf{w}^\top\Sigma\mathbf{w} \lessapprox \bar\sigma^2
//! $$
//!
//! Modern-portfolio-theory tooling for real estate holdings: assets with cash-flow
//! derived returns, alignment of uneven return histories, covariance, volatility and
//! Sharpe ratio, and a linear-programming allocation under a linearized risk bound.

pub mod cashflow;
pub mod error;
pub mod linprog;
pub mod portfolio;

pub use error::PortfolioError;
pub use error::Result;
pub use portfolio::Asset;
pub use portfolio::CashFlows;
pub use portfolio::CleanMethod;
pub use portfolio::Portfolio;
