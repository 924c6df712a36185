use anyhow::Context;
use realty_mpt::cashflow::FixedRateMortgage;
use realty_mpt::cashflow::Mortgage;
use realty_mpt::Asset;
use realty_mpt::CashFlows;
use realty_mpt::Portfolio;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DESIRED_RISK: f64 = 0.3;
const RISK_FREE_RATE: f64 = 0.02;

fn main() -> anyhow::Result<()> {
  let env_filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("realty_mpt=info"));
  tracing_subscriber::fmt().with_env_filter(env_filter).init();

  // "c" truncates uneven histories, "i" interpolates them
  let clean_code = std::env::args().nth(1).unwrap_or_else(|| "c".to_string());

  let loan = FixedRateMortgage::with_years(240_000.0, 0.05, 30)?;
  let debt_service = loan.annual_debt_service(1)?;
  info!(
    payment = loan.monthly_payment(),
    debt_service, "financing for the duplex"
  );

  let duplex = Asset::from_cash_flows(
    "duplex",
    CashFlows::new(36_000.0, 12_000.0, debt_service + 6_000.0, 300_000.0),
    vec![0.012, 0.004, -0.003, 0.009, 0.011, 0.002],
  )?;
  let condo = Asset::new("condo", 0.045, vec![0.006, 0.008, -0.001, 0.004])?;
  let warehouse = Asset::new(
    "warehouse",
    0.07,
    vec![
      0.015, -0.008, 0.021, 0.003, -0.004, 0.017, 0.009, -0.012, 0.013, 0.006, 0.002, 0.010,
    ],
  )?;
  let reit = Asset::new("reit", 0.06, vec![0.02, -0.015, 0.018, 0.004, -0.006])?;

  let mut portfolio = Portfolio::with_clean_code(
    vec![duplex, condo, warehouse, reit],
    vec![0.25, 0.20, 0.30, 0.25],
    &clean_code,
  )
  .with_context(|| format!("building portfolio with clean method '{clean_code}'"))?;

  for asset in portfolio.assets() {
    println!("{asset}");
  }

  let current = portfolio.summary(RISK_FREE_RATE)?;
  println!("\nCurrent allocation ({})", portfolio.clean_method());
  println!("  weights:         {:?}", current.weights);
  println!("  expected return: {:.6}", current.expected_return);
  println!("  volatility:      {:.6}", current.volatility);
  println!("  sharpe ratio:    {:.6}", current.sharpe);

  let optimized = portfolio
    .optimize_summary(DESIRED_RISK, RISK_FREE_RATE)
    .context("optimizing allocation")?;
  println!("\nOptimized allocation (variance bound {DESIRED_RISK})");
  for (asset, w) in portfolio.assets().zip(&optimized.weights) {
    println!("  {:<10} {:.6}", asset.id(), w);
  }
  println!("  expected return: {:.6}", optimized.expected_return);
  println!("  volatility:      {:.6}", optimized.volatility);
  println!("  sharpe ratio:    {:.6}", optimized.sharpe);

  Ok(())
}
