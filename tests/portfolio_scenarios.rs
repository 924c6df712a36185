use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rand_distr::Distribution;
use rand_distr::Normal;
use realty_mpt::cashflow::FixedRateMortgage;
use realty_mpt::cashflow::Mortgage;
use realty_mpt::portfolio::Alignment;
use realty_mpt::portfolio::OptimizerConfig;
use realty_mpt::Asset;
use realty_mpt::CashFlows;
use realty_mpt::CleanMethod;
use realty_mpt::Portfolio;
use realty_mpt::PortfolioError;

fn uneven_assets() -> Vec<Asset> {
  vec![
    Asset::new("a", 0.05, vec![10.0, 430.06, 590.07, 543.08]).unwrap(),
    Asset::new(
      "b",
      0.04,
      vec![4030.03, 2540.02, 4230.01, 4850.04, 1805.20, 4002.03],
    )
    .unwrap(),
    Asset::new(
      "c",
      0.06,
      vec![
        3230.03, 140.02, 4430.01, 302.04, 230.05, 430.06, 590.07, 543.08, 49.0, 59.0, 43.0, 43.0,
      ],
    )
    .unwrap(),
  ]
}

fn history_lengths(portfolio: &Portfolio) -> Vec<usize> {
  portfolio.assets().map(|a| a.history_len()).collect()
}

fn random_history(rng: &mut StdRng, len: usize) -> Vec<f64> {
  let normal = Normal::new(0.004, 0.02).unwrap();
  (0..len).map(|_| normal.sample(rng)).collect()
}

#[test]
fn truncate_aligns_to_shortest_history() {
  let mut portfolio =
    Portfolio::with_clean_code(uneven_assets(), vec![0.3, 0.3, 0.4], "c").unwrap();
  assert_eq!(portfolio.alignment(), Alignment::Unaligned);

  portfolio.history_cleaner().unwrap();

  assert_eq!(history_lengths(&portfolio), vec![4, 4, 4]);
  assert_eq!(
    portfolio.alignment(),
    Alignment::Aligned(CleanMethod::Truncate)
  );
}

#[test]
fn interpolate_aligns_to_longest_history_and_keeps_originals() {
  let originals = uneven_assets();
  let mut portfolio =
    Portfolio::with_clean_code(originals.clone(), vec![0.3, 0.3, 0.4], "i").unwrap();

  portfolio.history_cleaner().unwrap();

  assert_eq!(history_lengths(&portfolio), vec![12, 12, 12]);
  for (before, after) in originals.iter().zip(portfolio.assets()) {
    let n = before.history_len();
    assert_eq!(&after.historical_returns()[..n], before.historical_returns());
  }
  // callers' copies are untouched
  assert_eq!(originals[0].history_len(), 4);
}

#[test]
fn cleaning_twice_matches_cleaning_once() {
  for code in ["c", "i"] {
    let mut portfolio =
      Portfolio::with_clean_code(uneven_assets(), vec![0.3, 0.3, 0.4], code).unwrap();
    portfolio.history_cleaner().unwrap();
    let once: Vec<Vec<f64>> = portfolio
      .assets()
      .map(|a| a.historical_returns().to_vec())
      .collect();

    portfolio.history_cleaner().unwrap();
    let twice: Vec<Vec<f64>> = portfolio
      .assets()
      .map(|a| a.historical_returns().to_vec())
      .collect();

    assert_eq!(once, twice);
  }
}

#[test]
fn four_asset_allocation_is_a_valid_weight_vector() {
  let assets = vec![
    Asset::new("duplex", 0.08, vec![0.012, 0.004, -0.003, 0.009, 0.011]).unwrap(),
    Asset::new("condo", 0.045, vec![0.006, 0.008, -0.001, 0.004]).unwrap(),
    Asset::new("warehouse", 0.07, vec![0.015, -0.008, 0.021, 0.003, -0.004, 0.017]).unwrap(),
    Asset::new("reit", 0.06, vec![0.02, -0.015, 0.018, 0.004, -0.006]).unwrap(),
  ];
  let mut portfolio =
    Portfolio::with_clean_code(assets, vec![0.25, 0.20, 0.30, 0.25], "c").unwrap();

  let weights = portfolio.optimize(0.3).unwrap();

  assert_eq!(weights.len(), 4);
  assert_abs_diff_eq!(weights.iter().sum::<f64>(), 1.0, epsilon = 1e-5);
  assert!(weights.iter().all(|w| (0.0..=1.0).contains(w)));
  // the risk bound is slack here, so everything goes to the best return
  assert_abs_diff_eq!(weights[0], 1.0, epsilon = 1e-6);
  // held weights are not replaced by the optimizer
  assert_eq!(portfolio.weights(), vec![0.25, 0.20, 0.30, 0.25]);
}

#[test]
fn derived_return_follows_cash_flow_changes() {
  let loan = FixedRateMortgage::with_years(100_000.0, 0.05, 30).unwrap();
  let debt_service = loan.annual_debt_service(1).unwrap();
  assert_abs_diff_eq!(debt_service, 12.0 * loan.monthly_payment(), epsilon = 1e-6);

  let mut asset = Asset::from_cash_flows(
    "rental",
    CashFlows::new(24_000.0, 5_000.0, debt_service, 200_000.0),
    vec![0.01, 0.02],
  )
  .unwrap();
  assert_abs_diff_eq!(
    asset.expected_return(),
    (24_000.0 + 5_000.0 - debt_service) / 200_000.0,
    epsilon = 1e-12
  );

  asset.set_initial_value(250_000.0).unwrap();
  assert_abs_diff_eq!(
    asset.expected_return(),
    (24_000.0 + 5_000.0 - debt_service) / 250_000.0,
    epsilon = 1e-12
  );
}

#[test]
fn validation_errors() {
  let bad_value = Asset::from_cash_flows(
    "x",
    CashFlows::new(1.0, 1.0, 1.0, 0.0),
    vec![0.01],
  );
  assert!(matches!(bad_value, Err(PortfolioError::InvalidArgument(_))));

  let mismatched = Portfolio::with_clean_code(uneven_assets(), vec![0.5, 0.5], "c");
  assert!(matches!(mismatched, Err(PortfolioError::InvalidArgument(_))));

  let mut portfolio =
    Portfolio::with_clean_code(uneven_assets(), vec![0.3, 0.3, 0.4], "c").unwrap();
  assert!(matches!(
    portfolio.set_clean_method("x"),
    Err(PortfolioError::InvalidArgument(_))
  ));
  assert_eq!(portfolio.clean_method(), CleanMethod::Truncate);

  let bad_code = Portfolio::with_clean_code(uneven_assets(), vec![0.3, 0.3, 0.4], "q");
  assert!(matches!(bad_code, Err(PortfolioError::InvalidArgument(_))));
}

#[test]
fn random_books_have_non_negative_volatility() {
  let mut rng = StdRng::seed_from_u64(42);

  for _ in 0..25 {
    let n = rng.gen_range(2..6);
    let assets: Vec<Asset> = (0..n)
      .map(|i| {
        let len = rng.gen_range(3..12);
        Asset::new(format!("asset-{i}"), rng.gen_range(0.0..0.1), random_history(&mut rng, len))
          .unwrap()
      })
      .collect();
    let raw: Vec<f64> = (0..n).map(|_| rng.gen_range(0.1..1.0)).collect();
    let weights = realty_mpt::portfolio::normalized_weights(&raw).unwrap();

    let mut portfolio = Portfolio::from_lists(assets, weights, CleanMethod::Truncate).unwrap();
    let volatility = portfolio.volatility().unwrap();
    assert!(volatility >= 0.0, "volatility {volatility}");
  }
}

#[test]
fn random_books_optimize_to_simplex_weights() {
  let mut rng = StdRng::seed_from_u64(7);

  for _ in 0..25 {
    let n = rng.gen_range(2..8);
    let assets: Vec<Asset> = (0..n)
      .map(|i| {
        Asset::new(
          format!("asset-{i}"),
          rng.gen_range(0.0..0.1),
          random_history(&mut rng, 24),
        )
        .unwrap()
      })
      .collect();
    let weights = realty_mpt::portfolio::equal_weights(n);

    let mut portfolio = Portfolio::from_lists(assets, weights, CleanMethod::Interpolate).unwrap();
    let optimized = portfolio.optimize(0.3).unwrap();

    assert_abs_diff_eq!(optimized.iter().sum::<f64>(), 1.0, epsilon = 1e-5);
    assert!(optimized.iter().all(|w| (0.0..=1.0).contains(w)));
  }
}

#[test]
fn exhausted_iteration_budget_is_reported() {
  let assets = vec![
    Asset::new("duplex", 0.08, vec![0.012, 0.004, -0.003, 0.009]).unwrap(),
    Asset::new("condo", 0.045, vec![0.006, 0.008, -0.001, 0.004]).unwrap(),
    Asset::new("warehouse", 0.07, vec![0.015, -0.008, 0.021, 0.003]).unwrap(),
  ];
  let mut portfolio = Portfolio::with_clean_code(assets, vec![0.4, 0.3, 0.3], "c")
    .unwrap()
    .with_optimizer_config(OptimizerConfig {
      max_iterations: 1,
      ..OptimizerConfig::default()
    });

  assert_eq!(
    portfolio.optimize(0.3),
    Err(PortfolioError::IterationLimit { iterations: 1 })
  );

  let mut relaxed = portfolio.with_optimizer_config(OptimizerConfig::default());
  assert!(relaxed.optimize(0.3).is_ok());
}

#[test]
fn hedged_collinear_books_never_report_nan_volatility() {
  let mut rng = StdRng::seed_from_u64(3);

  for _ in 0..200 {
    let len = rng.gen_range(4..16);
    let base = random_history(&mut rng, len);
    let tripled: Vec<f64> = base.iter().map(|r| 3.0 * r).collect();
    let assets = vec![
      Asset::new("long", 0.05, base).unwrap(),
      Asset::new("short", 0.15, tripled).unwrap(),
    ];

    let mut portfolio = Portfolio::from_lists(assets, vec![3.0, -1.0], CleanMethod::Truncate).unwrap();
    let volatility = portfolio.volatility().unwrap();
    assert!(volatility >= 0.0, "volatility {volatility}");
  }
}
