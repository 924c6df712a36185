//! # Portfolio
//!
//! $$
//! \sigma_p^2 = \mathbf{w}^\top \Sigma \mathbf{w}
//! $$
//!
//! Asset modeling, history alignment, covariance estimation and the linearized
//! risk-constrained allocation optimizer.

pub mod align;
pub mod asset;
pub mod covariance;
pub mod engine;
pub mod linearize;
pub mod optimizers;
pub mod types;
pub mod weights;

pub use align::align_histories;
pub use align::interpolate_histories;
pub use align::lengths_are_equal;
pub use align::truncate_histories;
pub use asset::Asset;
pub use asset::AssetKey;
pub use asset::CashFlows;
pub use asset::ExpectedReturn;
pub use covariance::covariance_matrix;
pub use covariance::portfolio_variance;
pub use covariance::portfolio_volatility;
pub use covariance::returns_matrix;
pub use engine::Portfolio;
pub use linearize::linearized_risk_constraint;
pub use linearize::variance_gradient;
pub use optimizers::allocation_program;
pub use optimizers::optimize_allocation;
pub use types::Alignment;
pub use types::CleanMethod;
pub use types::OptimizerConfig;
pub use types::PortfolioSummary;
pub use weights::equal_weights;
pub use weights::normalized_weights;
pub use weights::weights_from_values;
