//! # Mortgage
//!
//! $$
//! M = B\,\frac{r}{1-(1+r)^{-n}}, \qquad r = \frac{\text{annual rate}}{12}
//! $$
//!
//! Level-payment amortization for fixed-rate and adjustable-rate loans. Used to turn
//! financing terms into the annual expense figures of a cash-flow-derived asset.

use std::str::FromStr;

use crate::error::PortfolioError;
use crate::error::Result;

/// Unit in which a loan term is quoted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TermUnit {
  Years,
  Months,
}

impl TermUnit {
  /// `"y"` for years, `"m"` for months (case-insensitive).
  pub fn from_code(code: &str) -> Result<Self> {
    match code.to_lowercase().as_str() {
      "y" => Ok(Self::Years),
      "m" => Ok(Self::Months),
      _ => Err(PortfolioError::invalid(
        "invalid term type, use 'y' for years or 'm' for months",
      )),
    }
  }

  fn to_months(self, term: u32) -> Result<u32> {
    match self {
      Self::Years => term.checked_mul(12).ok_or_else(|| {
        PortfolioError::invalid(format!("term of {term} years overflows the month count"))
      }),
      Self::Months => Ok(term),
    }
  }
}

impl FromStr for TermUnit {
  type Err = PortfolioError;

  fn from_str(s: &str) -> Result<Self> {
    Self::from_code(s)
  }
}

/// One month of an amortization schedule.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AmortizationEntry {
  pub month: u32,
  pub beginning_balance: f64,
  pub payment: f64,
  pub interest_paid: f64,
  pub principal_paid: f64,
  pub ending_balance: f64,
}

/// Common loan calculations.
pub trait Mortgage {
  fn principal(&self) -> f64;

  fn term_months(&self) -> u32;

  /// Payment due in the first month.
  fn monthly_payment(&self) -> f64;

  /// Month-by-month breakdown over the full term.
  fn amortization_schedule(&self) -> Vec<AmortizationEntry>;

  /// Sum of all payments.
  fn total_cost(&self) -> f64 {
    self.amortization_schedule().iter().map(|e| e.payment).sum()
  }

  fn total_interest(&self) -> f64 {
    self.total_cost() - self.principal()
  }

  /// Outstanding balance after `months_paid` payments.
  fn remaining_balance(&self, months_paid: u32) -> Result<f64> {
    if months_paid == 0 {
      return Ok(self.principal());
    }
    check_month(months_paid, self.term_months())?;
    Ok(self.amortization_schedule()[months_paid as usize - 1].ending_balance)
  }

  /// Payments still due after `months_paid` payments.
  fn remaining_payments(&self, months_paid: u32) -> Result<f64> {
    if months_paid > 0 {
      check_month(months_paid, self.term_months())?;
    }
    Ok(
      self
        .amortization_schedule()
        .iter()
        .skip(months_paid as usize)
        .map(|e| e.payment)
        .sum(),
    )
  }

  /// Payments falling in loan year `year` (1-based); usable as an annual expense.
  fn annual_debt_service(&self, year: u32) -> Result<f64> {
    if year == 0 {
      return Err(PortfolioError::invalid("loan year must be positive"));
    }
    let first = (year - 1) * 12 + 1;
    check_month(first, self.term_months())?;
    Ok(
      self
        .amortization_schedule()
        .iter()
        .filter(|e| e.month >= first && e.month < first + 12)
        .map(|e| e.payment)
        .sum(),
    )
  }
}

fn check_month(month: u32, term: u32) -> Result<()> {
  if month == 0 {
    return Err(PortfolioError::invalid("month cannot be negative or zero"));
  }
  if month > term {
    return Err(PortfolioError::invalid(format!(
      "month {month} cannot exceed term time of {term} months"
    )));
  }
  Ok(())
}

fn check_loan(principal: f64, rate: f64, term: u32) -> Result<()> {
  if principal.is_nan() || principal <= 0.0 {
    return Err(PortfolioError::invalid(
      "principal cannot be negative or zero",
    ));
  }
  if rate.is_nan() || rate <= 0.0 {
    return Err(PortfolioError::invalid(
      "interest rate cannot be negative or zero",
    ));
  }
  if term == 0 {
    return Err(PortfolioError::invalid("term cannot be negative or zero"));
  }
  Ok(())
}

fn level_payment(balance: f64, monthly_rate: f64, months: u32) -> f64 {
  balance * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-f64::from(months)))
}

fn schedule_row(month: u32, balance: f64, payment: f64, monthly_rate: f64) -> AmortizationEntry {
  let interest_paid = balance * monthly_rate;
  let principal_paid = payment - interest_paid;
  AmortizationEntry {
    month,
    beginning_balance: balance,
    payment,
    interest_paid,
    principal_paid,
    ending_balance: balance - principal_paid,
  }
}

/// Constant-rate, level-payment loan.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedRateMortgage {
  principal: f64,
  annual_rate: f64,
  term_months: u32,
}

impl FixedRateMortgage {
  pub fn new(principal: f64, annual_rate: f64, term: u32, unit: TermUnit) -> Result<Self> {
    let term_months = unit.to_months(term)?;
    check_loan(principal, annual_rate, term_months)?;
    Ok(Self {
      principal,
      annual_rate,
      term_months,
    })
  }

  /// Term quoted in years.
  pub fn with_years(principal: f64, annual_rate: f64, years: u32) -> Result<Self> {
    Self::new(principal, annual_rate, years, TermUnit::Years)
  }

  pub fn annual_rate(&self) -> f64 {
    self.annual_rate
  }

  fn monthly_rate(&self) -> f64 {
    self.annual_rate / 12.0
  }
}

impl Mortgage for FixedRateMortgage {
  fn principal(&self) -> f64 {
    self.principal
  }

  fn term_months(&self) -> u32 {
    self.term_months
  }

  fn monthly_payment(&self) -> f64 {
    level_payment(self.principal, self.monthly_rate(), self.term_months)
  }

  fn amortization_schedule(&self) -> Vec<AmortizationEntry> {
    let payment = self.monthly_payment();
    let r = self.monthly_rate();
    let mut balance = self.principal;
    (1..=self.term_months)
      .map(|month| {
        let row = schedule_row(month, balance, payment, r);
        balance = row.ending_balance;
        row
      })
      .collect()
  }

  fn total_cost(&self) -> f64 {
    self.monthly_payment() * self.term_months as f64
  }

  fn remaining_balance(&self, months_paid: u32) -> Result<f64> {
    if months_paid > 0 {
      check_month(months_paid, self.term_months)?;
    }
    let r = self.monthly_rate();
    let growth = (1.0 + r).powf(f64::from(months_paid));
    Ok(self.principal * growth - self.monthly_payment() * (growth - 1.0) / r)
  }
}

/// Rate reset taking effect from `month` (1-based) onward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateChange {
  pub month: u32,
  pub rate: f64,
}

impl RateChange {
  pub fn new(month: u32, rate: f64) -> Self {
    Self { month, rate }
  }
}

/// Adjustable-rate loan. At each reset the outstanding balance is re-amortized over
/// the remaining term at the new rate.
#[derive(Clone, Debug, PartialEq)]
pub struct ArmMortgage {
  principal: f64,
  initial_rate: f64,
  term_months: u32,
  rate_changes: Vec<RateChange>,
}

impl ArmMortgage {
  pub fn new(
    principal: f64,
    initial_rate: f64,
    term: u32,
    unit: TermUnit,
    rate_changes: Vec<RateChange>,
  ) -> Result<Self> {
    let term_months = unit.to_months(term)?;
    check_loan(principal, initial_rate, term_months)?;
    let mut arm = Self {
      principal,
      initial_rate,
      term_months,
      rate_changes: Vec::new(),
    };
    arm.set_rate_changes(rate_changes)?;
    Ok(arm)
  }

  pub fn initial_rate(&self) -> f64 {
    self.initial_rate
  }

  pub fn rate_changes(&self) -> &[RateChange] {
    &self.rate_changes
  }

  /// Replace the reset schedule. Resets are kept in month order.
  pub fn set_rate_changes(&mut self, mut rate_changes: Vec<RateChange>) -> Result<()> {
    for rc in &rate_changes {
      check_month(rc.month, self.term_months)?;
      if rc.rate.is_nan() || rc.rate <= 0.0 {
        return Err(PortfolioError::invalid(
          "interest rate cannot be negative or zero",
        ));
      }
    }
    rate_changes.sort_by_key(|rc| rc.month);
    self.rate_changes = rate_changes;
    Ok(())
  }

  /// Annual rate in force during `month`.
  pub fn rate_for_month(&self, month: u32) -> f64 {
    self
      .rate_changes
      .iter()
      .take_while(|rc| month >= rc.month)
      .last()
      .map_or(self.initial_rate, |rc| rc.rate)
  }

  /// Payment due in `month` (1-based).
  pub fn payment_for_month(&self, month: u32) -> Result<f64> {
    check_month(month, self.term_months)?;
    Ok(self.amortization_schedule()[month as usize - 1].payment)
  }
}

impl Mortgage for ArmMortgage {
  fn principal(&self) -> f64 {
    self.principal
  }

  fn term_months(&self) -> u32 {
    self.term_months
  }

  fn monthly_payment(&self) -> f64 {
    level_payment(self.principal, self.initial_rate / 12.0, self.term_months)
  }

  fn amortization_schedule(&self) -> Vec<AmortizationEntry> {
    let mut balance = self.principal;
    let mut rate = self.initial_rate;
    let mut payment = self.monthly_payment();
    let mut schedule = Vec::with_capacity(self.term_months as usize);

    for month in 1..=self.term_months {
      let current = self.rate_for_month(month);
      if current != rate {
        rate = current;
        payment = level_payment(balance, rate / 12.0, self.term_months - month + 1);
      }
      let row = schedule_row(month, balance, payment, rate / 12.0);
      balance = row.ending_balance;
      schedule.push(row);
    }
    schedule
  }
}
