//! # History Alignment
//!
//! $$
//! \tilde r_i = P_n\!\left(\frac{i\,(n-1)}{L-1}\right), \quad n \le i < L
//! $$
//!
//! Pure transforms that bring return series of different lengths onto a common
//! length. Interpolation keeps every original observation and fills the tail by
//! evaluating the polynomial through the series' own points at a resampled index;
//! truncation keeps the leading observations of every series.

use super::types::CleanMethod;

/// `true` when every series has the same length. Empty input is never aligned.
pub fn lengths_are_equal<S: AsRef<[f64]>>(series: &[S]) -> bool {
  match series.first() {
    None => false,
    Some(first) => {
      let len = first.as_ref().len();
      series.iter().all(|s| s.as_ref().len() == len)
    }
  }
}

/// Dispatch to the transform selected by `method`.
pub fn align_histories<S: AsRef<[f64]>>(series: &[S], method: CleanMethod) -> Vec<Vec<f64>> {
  match method {
    CleanMethod::Interpolate => interpolate_histories(series),
    CleanMethod::Truncate => truncate_histories(series),
  }
}

/// Cut every series to the shortest length, keeping its first observations.
pub fn truncate_histories<S: AsRef<[f64]>>(series: &[S]) -> Vec<Vec<f64>> {
  let min_len = series.iter().map(|s| s.as_ref().len()).min().unwrap_or(0);
  series
    .iter()
    .map(|s| s.as_ref()[..min_len].to_vec())
    .collect()
}

/// Extend every series to the longest length.
///
/// Positions `[0, n)` keep the original values. Position `i` in `[n, L)` receives the
/// value of the interpolating polynomial through `(k, r_k)`, `k < n`, evaluated at
/// `i (n - 1) / (L - 1)`.
pub fn interpolate_histories<S: AsRef<[f64]>>(series: &[S]) -> Vec<Vec<f64>> {
  let max_len = series.iter().map(|s| s.as_ref().len()).max().unwrap_or(0);
  series
    .iter()
    .map(|s| resample_to(s.as_ref(), max_len))
    .collect()
}

fn resample_to(history: &[f64], target_len: usize) -> Vec<f64> {
  let n = history.len();
  if n >= target_len || n == 0 {
    return history.to_vec();
  }

  let xs: Vec<f64> = (0..n).map(|k| k as f64).collect();
  let scale = (n as f64 - 1.0) / (target_len as f64 - 1.0);

  let mut out = Vec::with_capacity(target_len);
  out.extend_from_slice(history);
  for i in n..target_len {
    out.push(neville(&xs, history, i as f64 * scale));
  }
  out
}

/// Evaluate the interpolating polynomial through `(xs[k], ys[k])` at `x`.
///
/// A single point yields the constant polynomial.
pub(crate) fn neville(xs: &[f64], ys: &[f64], x: f64) -> f64 {
  let n = xs.len().min(ys.len());
  if n == 0 {
    return f64::NAN;
  }

  let mut p = ys[..n].to_vec();
  for m in 1..n {
    for i in 0..n - m {
      let lo = xs[i];
      let hi = xs[i + m];
      p[i] = ((x - hi) * p[i] + (lo - x) * p[i + 1]) / (lo - hi);
    }
  }
  p[0]
}
