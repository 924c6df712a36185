//! # Asset
//!
//! $$
//! \mathbb E[R] = \frac{\text{rent} + \text{appreciation} - \text{expenses}}{V_0}
//! $$
//!
//! An investable instrument: an expected return (supplied or derived from annual cash
//! flows) plus the historical return series used for risk estimation. The type can
//! stand for a single property, a market, or any other return-producing unit.

use std::fmt;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use ndarray::ArrayView1;

use crate::error::PortfolioError;
use crate::error::Result;

static NEXT_KEY: AtomicU64 = AtomicU64::new(0);

/// Identity of an [`Asset`]. Assigned at construction and shared by clones, so two
/// handles to the same instrument compare equal even if their histories differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetKey(u64);

impl AssetKey {
  fn next() -> Self {
    Self(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
  }
}

/// Annual cash-flow inputs from which an expected return is derived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CashFlows {
  /// Annual rental income, `>= 0`.
  pub rental_income: f64,
  /// Annual appreciation in value, `>= 0`.
  pub appreciation: f64,
  /// Annual operating expenses, `>= 0`.
  pub expenses: f64,
  /// Acquisition value, `> 0`.
  pub initial_value: f64,
}

impl CashFlows {
  pub fn new(rental_income: f64, appreciation: f64, expenses: f64, initial_value: f64) -> Self {
    Self {
      rental_income,
      appreciation,
      expenses,
      initial_value,
    }
  }

  /// Net annual cash flow over acquisition value.
  pub fn expected_return(&self) -> f64 {
    (self.rental_income + self.appreciation - self.expenses) / self.initial_value
  }

  fn validate(&self) -> Result<()> {
    check_non_negative("annual rental income", self.rental_income)?;
    check_non_negative("annual appreciation", self.appreciation)?;
    check_non_negative("annual expenses", self.expenses)?;
    check_initial_value(self.initial_value)
  }
}

fn check_non_negative(field: &str, value: f64) -> Result<()> {
  if value.is_nan() || value < 0.0 {
    return Err(PortfolioError::invalid(format!(
      "{field} cannot be negative (got {value})"
    )));
  }
  Ok(())
}

fn check_initial_value(value: f64) -> Result<()> {
  if value.is_nan() || value <= 0.0 {
    return Err(PortfolioError::invalid(format!(
      "initial property value must be greater than 0 (got {value})"
    )));
  }
  Ok(())
}

fn check_history(history: &[f64]) -> Result<()> {
  if history.is_empty() {
    return Err(PortfolioError::invalid(
      "historical returns cannot be empty",
    ));
  }
  Ok(())
}

/// Source of an asset's expected return.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExpectedReturn {
  /// Supplied directly by the caller.
  Direct(f64),
  /// Recomputed from cash flows on every change.
  Derived(CashFlows),
}

impl ExpectedReturn {
  pub fn value(&self) -> f64 {
    match self {
      ExpectedReturn::Direct(r) => *r,
      ExpectedReturn::Derived(cf) => cf.expected_return(),
    }
  }
}

/// A single investable instrument.
#[derive(Clone, Debug)]
pub struct Asset {
  key: AssetKey,
  id: String,
  expected_return: ExpectedReturn,
  historical_returns: Vec<f64>,
}

impl Asset {
  /// Asset with an externally supplied expected return.
  pub fn new(
    id: impl Into<String>,
    expected_return: f64,
    historical_returns: Vec<f64>,
  ) -> Result<Self> {
    check_history(&historical_returns)?;
    Ok(Self {
      key: AssetKey::next(),
      id: id.into(),
      expected_return: ExpectedReturn::Direct(expected_return),
      historical_returns,
    })
  }

  /// Asset whose expected return is derived from annual cash flows.
  pub fn from_cash_flows(
    id: impl Into<String>,
    cash_flows: CashFlows,
    historical_returns: Vec<f64>,
  ) -> Result<Self> {
    cash_flows.validate()?;
    check_history(&historical_returns)?;
    Ok(Self {
      key: AssetKey::next(),
      id: id.into(),
      expected_return: ExpectedReturn::Derived(cash_flows),
      historical_returns,
    })
  }

  pub fn key(&self) -> AssetKey {
    self.key
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  /// Identifiers are free-form; uniqueness is not enforced.
  pub fn set_id(&mut self, id: impl Into<String>) {
    self.id = id.into();
  }

  pub fn expected_return(&self) -> f64 {
    self.expected_return.value()
  }

  pub fn expected_return_source(&self) -> ExpectedReturn {
    self.expected_return
  }

  /// Cash-flow inputs, if the expected return is derived from them.
  pub fn cash_flows(&self) -> Option<CashFlows> {
    match self.expected_return {
      ExpectedReturn::Derived(cf) => Some(cf),
      ExpectedReturn::Direct(_) => None,
    }
  }

  pub fn rental_income(&self) -> Option<f64> {
    self.cash_flows().map(|cf| cf.rental_income)
  }

  pub fn appreciation(&self) -> Option<f64> {
    self.cash_flows().map(|cf| cf.appreciation)
  }

  pub fn expenses(&self) -> Option<f64> {
    self.cash_flows().map(|cf| cf.expenses)
  }

  pub fn initial_value(&self) -> Option<f64> {
    self.cash_flows().map(|cf| cf.initial_value)
  }

  pub fn set_rental_income(&mut self, value: f64) -> Result<()> {
    check_non_negative("annual rental income", value)?;
    self.derived_mut()?.rental_income = value;
    Ok(())
  }

  pub fn set_appreciation(&mut self, value: f64) -> Result<()> {
    check_non_negative("annual appreciation", value)?;
    self.derived_mut()?.appreciation = value;
    Ok(())
  }

  pub fn set_expenses(&mut self, value: f64) -> Result<()> {
    check_non_negative("annual expenses", value)?;
    self.derived_mut()?.expenses = value;
    Ok(())
  }

  pub fn set_initial_value(&mut self, value: f64) -> Result<()> {
    check_initial_value(value)?;
    self.derived_mut()?.initial_value = value;
    Ok(())
  }

  fn derived_mut(&mut self) -> Result<&mut CashFlows> {
    match &mut self.expected_return {
      ExpectedReturn::Derived(cf) => Ok(cf),
      ExpectedReturn::Direct(_) => Err(PortfolioError::invalid(format!(
        "asset '{}' has a directly supplied expected return; cash-flow inputs do not apply",
        self.id
      ))),
    }
  }

  /// Read-only view of the return history.
  pub fn historical_returns(&self) -> &[f64] {
    &self.historical_returns
  }

  /// Replace the whole return history.
  pub fn set_historical_returns(&mut self, historical_returns: Vec<f64>) -> Result<()> {
    check_history(&historical_returns)?;
    self.historical_returns = historical_returns;
    Ok(())
  }

  pub fn history_len(&self) -> usize {
    self.historical_returns.len()
  }

  /// Population standard deviation of the stored return history.
  pub fn historical_volatility(&self) -> f64 {
    ArrayView1::from(self.historical_returns.as_slice()).std(0.0)
  }
}

impl PartialEq for Asset {
  fn eq(&self, other: &Self) -> bool {
    self.key == other.key
  }
}

impl Eq for Asset {}

impl fmt::Display for Asset {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Asset {{ id: '{}', expected return: {}, historical returns: {:?} }}",
      self.id,
      self.expected_return(),
      self.historical_returns
    )
  }
}
