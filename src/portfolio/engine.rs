//! # Portfolio Engine
//!
//! $$
//! \mathbb E[R_p] = \sum_i w_i \mu_i, \qquad
//! \sigma_p = \sqrt{\mathbf{w}^\top \Sigma \mathbf{w}}, \qquad
//! S = \frac{\mathbb E[R_p] - r_f}{\sigma_p}
//! $$
//!
//! Asset-to-weight book with lazily aligned histories. Holdings keep insertion order,
//! which is also the order of every weight vector, covariance row and optimizer
//! output produced here.
//!
//! A portfolio owns its copies of the assets, so aligning one portfolio never
//! rewrites the histories seen by another.

use ndarray::Array1;
use ndarray::Array2;
use tracing::debug;
use tracing::warn;

use super::align::align_histories;
use super::align::lengths_are_equal;
use super::asset::Asset;
use super::asset::AssetKey;
use super::covariance::covariance_matrix;
use super::covariance::portfolio_volatility;
use super::optimizers::optimize_allocation;
use super::types::Alignment;
use super::types::CleanMethod;
use super::types::OptimizerConfig;
use super::types::PortfolioSummary;
use crate::error::PortfolioError;
use crate::error::Result;

#[derive(Clone, Debug)]
struct Holding {
  asset: Asset,
  weight: f64,
}

/// Weighted collection of assets.
#[derive(Clone, Debug)]
pub struct Portfolio {
  holdings: Vec<Holding>,
  method: CleanMethod,
  alignment: Alignment,
  config: OptimizerConfig,
}

impl Portfolio {
  /// Empty portfolio; use [`Portfolio::add_asset`] to fill it.
  pub fn new(method: CleanMethod) -> Self {
    Self {
      holdings: Vec::new(),
      method,
      alignment: Alignment::Unaligned,
      config: OptimizerConfig::default(),
    }
  }

  /// Build from `(asset, weight)` pairs. A repeated asset keeps its last weight.
  pub fn from_pairs<I>(pairs: I, method: CleanMethod) -> Self
  where
    I: IntoIterator<Item = (Asset, f64)>,
  {
    let mut portfolio = Self::new(method);
    for (asset, weight) in pairs {
      portfolio.upsert(asset, weight);
    }
    portfolio.alignment = portfolio.initial_alignment();
    portfolio
  }

  /// Build from parallel asset and weight lists.
  pub fn from_lists(assets: Vec<Asset>, weights: Vec<f64>, method: CleanMethod) -> Result<Self> {
    if assets.len() != weights.len() {
      return Err(PortfolioError::invalid(format!(
        "the size of assets list ({}) and weights list ({}) must be the same",
        assets.len(),
        weights.len()
      )));
    }
    Ok(Self::from_pairs(assets.into_iter().zip(weights), method))
  }

  /// Like [`Portfolio::from_lists`] with the clean method given by its code.
  pub fn with_clean_code(assets: Vec<Asset>, weights: Vec<f64>, code: &str) -> Result<Self> {
    Self::from_lists(assets, weights, CleanMethod::from_code(code)?)
  }

  #[must_use]
  pub fn with_optimizer_config(mut self, config: OptimizerConfig) -> Self {
    self.config = config;
    self
  }

  pub fn optimizer_config(&self) -> &OptimizerConfig {
    &self.config
  }

  fn initial_alignment(&self) -> Alignment {
    if lengths_are_equal(&self.histories()) {
      Alignment::Aligned(self.method)
    } else {
      Alignment::Unaligned
    }
  }

  fn position(&self, key: AssetKey) -> Option<usize> {
    self.holdings.iter().position(|h| h.asset.key() == key)
  }

  fn upsert(&mut self, asset: Asset, weight: f64) {
    match self.position(asset.key()) {
      Some(i) => self.holdings[i] = Holding { asset, weight },
      None => self.holdings.push(Holding { asset, weight }),
    }
  }

  /// Insert or overwrite an asset's entry. Alignment is always invalidated.
  pub fn add_asset(&mut self, asset: Asset, weight: f64) {
    self.upsert(asset, weight);
    self.alignment = Alignment::Unaligned;
  }

  /// Remove an asset, returning its held copy and weight.
  pub fn remove_asset(&mut self, key: AssetKey) -> Option<(Asset, f64)> {
    let i = self.position(key)?;
    let holding = self.holdings.remove(i);
    self.alignment = Alignment::Unaligned;
    Some((holding.asset, holding.weight))
  }

  /// Change the weight of a held asset. Histories are untouched.
  pub fn set_weight(&mut self, key: AssetKey, weight: f64) -> Result<()> {
    let i = self
      .position(key)
      .ok_or_else(|| PortfolioError::invalid("asset is not held in this portfolio"))?;
    self.holdings[i].weight = weight;
    Ok(())
  }

  pub fn clean_method(&self) -> CleanMethod {
    self.method
  }

  /// Select the alignment policy by code (`"i"` or `"c"`).
  pub fn set_clean_method(&mut self, code: &str) -> Result<()> {
    self.method = CleanMethod::from_code(code)?;
    self.alignment = Alignment::Unaligned;
    Ok(())
  }

  pub fn alignment(&self) -> Alignment {
    self.alignment
  }

  pub fn len(&self) -> usize {
    self.holdings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.holdings.is_empty()
  }

  /// Held assets in portfolio order.
  pub fn assets(&self) -> impl Iterator<Item = &Asset> {
    self.holdings.iter().map(|h| &h.asset)
  }

  pub fn get(&self, key: AssetKey) -> Option<(&Asset, f64)> {
    self.position(key).map(|i| {
      let h = &self.holdings[i];
      (&h.asset, h.weight)
    })
  }

  pub fn weights(&self) -> Vec<f64> {
    self.holdings.iter().map(|h| h.weight).collect()
  }

  pub fn expected_returns(&self) -> Vec<f64> {
    self.holdings.iter().map(|h| h.asset.expected_return()).collect()
  }

  fn histories(&self) -> Vec<&[f64]> {
    self
      .holdings
      .iter()
      .map(|h| h.asset.historical_returns())
      .collect()
  }

  /// `sum_i mu_i w_i`, with the weights taken as given.
  pub fn expected_return(&self) -> f64 {
    self
      .holdings
      .iter()
      .map(|h| h.asset.expected_return() * h.weight)
      .sum()
  }

  /// Bring all held histories onto one length with the configured method.
  ///
  /// No-op once aligned; after it returns the portfolio is `Aligned`.
  pub fn history_cleaner(&mut self) -> Result<()> {
    if self.alignment.is_aligned() {
      return Ok(());
    }

    if !lengths_are_equal(&self.histories()) {
      let before: Vec<usize> = self.holdings.iter().map(|h| h.asset.history_len()).collect();
      let aligned = align_histories(&self.histories(), self.method);
      for (holding, series) in self.holdings.iter_mut().zip(aligned) {
        holding.asset.set_historical_returns(series)?;
      }
      debug!(
        method = %self.method,
        before = ?before,
        after = self.holdings.first().map(|h| h.asset.history_len()),
        "aligned histories"
      );
    }

    self.alignment = Alignment::Aligned(self.method);
    Ok(())
  }

  /// Sample covariance of the aligned histories, in portfolio order.
  pub fn covariance_matrix(&mut self) -> Result<Array2<f64>> {
    self.history_cleaner()?;
    covariance_matrix(&self.histories())
  }

  /// `sqrt(w' Sigma w)` over the current weights.
  pub fn volatility(&mut self) -> Result<f64> {
    let cov = self.covariance_matrix()?;
    Ok(portfolio_volatility(&cov, &Array1::from(self.weights())))
  }

  /// `(E[R_p] - r_f) / sigma_p`.
  ///
  /// A zero volatility yields an infinite or NaN ratio; it is reported, not masked.
  pub fn sharpe_ratio(&mut self, risk_free_rate: f64) -> Result<f64> {
    let volatility = self.volatility()?;
    Ok(sharpe(self.expected_return(), volatility, risk_free_rate))
  }

  /// Return, volatility and Sharpe ratio of the current weights.
  pub fn summary(&mut self, risk_free_rate: f64) -> Result<PortfolioSummary> {
    let volatility = self.volatility()?;
    let expected_return = self.expected_return();
    Ok(PortfolioSummary {
      weights: self.weights(),
      expected_return,
      volatility,
      sharpe: sharpe(expected_return, volatility, risk_free_rate),
    })
  }

  /// Weights maximizing expected return under the variance bound `desired_risk`,
  /// linearized around the current weights. Output follows portfolio order; the
  /// held weights are not modified.
  ///
  /// Histories that still differ in length after cleaning are rejected by the
  /// covariance step with `InvalidArgument`.
  pub fn optimize(&mut self, desired_risk: f64) -> Result<Vec<f64>> {
    let cov = self.covariance_matrix()?;
    optimize_allocation(
      &self.expected_returns(),
      &cov,
      &Array1::from(self.weights()),
      desired_risk,
      &self.config,
    )
  }

  /// Optimize, then evaluate the optimized weights against the same covariance.
  pub fn optimize_summary(
    &mut self,
    desired_risk: f64,
    risk_free_rate: f64,
  ) -> Result<PortfolioSummary> {
    let weights = self.optimize(desired_risk)?;
    let cov = covariance_matrix(&self.histories())?;
    let w = Array1::from(weights);
    let expected_return = w.dot(&Array1::from(self.expected_returns()));
    let volatility = portfolio_volatility(&cov, &w);

    Ok(PortfolioSummary {
      weights: w.to_vec(),
      expected_return,
      volatility,
      sharpe: sharpe(expected_return, volatility, risk_free_rate),
    })
  }
}

fn sharpe(expected_return: f64, volatility: f64, risk_free_rate: f64) -> f64 {
  if volatility == 0.0 || !volatility.is_finite() {
    warn!(volatility, "degenerate volatility in Sharpe ratio");
  }
  (expected_return - risk_free_rate) / volatility
}
