use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Distribution;
use rand_distr::Normal;
use realty_mpt::portfolio::align_histories;
use realty_mpt::Asset;
use realty_mpt::CleanMethod;
use realty_mpt::Portfolio;

fn random_histories(assets: usize, base_len: usize, seed: u64) -> Vec<Vec<f64>> {
  let mut rng = StdRng::seed_from_u64(seed);
  let normal = Normal::new(0.005, 0.02).unwrap();
  (0..assets)
    .map(|i| {
      let len = base_len + i * 3;
      (0..len).map(|_| normal.sample(&mut rng)).collect()
    })
    .collect()
}

fn book(assets: usize, base_len: usize, method: CleanMethod) -> Portfolio {
  let histories = random_histories(assets, base_len, 7);
  let weight = 1.0 / assets as f64;
  Portfolio::from_pairs(
    histories.into_iter().enumerate().map(|(i, h)| {
      let asset = Asset::new(format!("asset-{i}"), 0.02 + 0.01 * i as f64, h).unwrap();
      (asset, weight)
    }),
    method,
  )
}

fn bench_alignment(c: &mut Criterion) {
  let mut group = c.benchmark_group("align_histories");

  for &len in &[16, 64, 256] {
    let histories = random_histories(8, len, 11);
    for method in [CleanMethod::Truncate, CleanMethod::Interpolate] {
      group.bench_with_input(BenchmarkId::new(method.to_string(), len), &len, |b, _| {
        b.iter(|| black_box(align_histories(&histories, method)));
      });
    }
  }

  group.finish();
}

fn bench_optimize(c: &mut Criterion) {
  let mut group = c.benchmark_group("optimize");

  for &n in &[4, 16, 64] {
    group.bench_with_input(BenchmarkId::new("truncate", n), &n, |b, &n| {
      b.iter_batched(
        || book(n, 120, CleanMethod::Truncate),
        |mut portfolio| black_box(portfolio.optimize(0.3)),
        criterion::BatchSize::SmallInput,
      );
    });
  }

  group.finish();
}

criterion_group!(benches, bench_alignment, bench_optimize);
criterion_main!(benches);
