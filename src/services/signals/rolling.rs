//! Windowed statistics shared by every indicator.
//!
//! A [`Line`] is a value per input bar, `None` where the value is not yet
//! computable or not finite. All primitives take and return lines so that a
//! gap anywhere (short history, NaN input, zero denominator) propagates as
//! `None` instead of a bogus number.

/// One optional value per bar, aligned to the input series.
pub type Line = Vec<Option<f64>>;

/// `Some(x)` if `x` is finite.
pub fn finite(x: f64) -> Option<f64> {
    x.is_finite().then_some(x)
}

/// Wrap raw prices, marking non-finite entries as missing.
pub fn lift(values: &[f64]) -> Line {
    values.iter().map(|&v| finite(v)).collect()
}

/// Value at the last position.
pub fn last(line: &[Option<f64>]) -> Option<f64> {
    line.last().copied().flatten()
}

/// `(previous, last)` when both of the final two positions are defined.
pub fn last_two(line: &[Option<f64>]) -> Option<(f64, f64)> {
    match line {
        [.., Some(prev), Some(last)] => Some((*prev, *last)),
        _ => None,
    }
}

/// Number of defined values.
pub fn defined_count(line: &[Option<f64>]) -> usize {
    line.iter().filter(|v| v.is_some()).count()
}

/// Element-wise map, keeping gaps.
pub fn map(line: &[Option<f64>], f: impl Fn(f64) -> f64) -> Line {
    line.iter().map(|v| v.and_then(|x| finite(f(x)))).collect()
}

/// Element-wise combination of two aligned lines.
pub fn zip_with(a: &[Option<f64>], b: &[Option<f64>], f: impl Fn(f64, f64) -> f64) -> Line {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => finite(f(*x, *y)),
            _ => None,
        })
        .collect()
}

/// Value `lag` bars earlier.
pub fn shift(line: &[Option<f64>], lag: usize) -> Line {
    (0..line.len())
        .map(|i| if i >= lag { line[i - lag] } else { None })
        .collect()
}

/// Apply `f` to every full window of `period` values.
///
/// A window containing a gap yields `None`.
pub fn rolling(values: &[Option<f64>], period: usize, f: impl Fn(&[f64]) -> f64) -> Line {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let mut window = Vec::with_capacity(period);
    for end in (period - 1)..values.len() {
        window.clear();
        window.extend(values[end + 1 - period..=end].iter().map_while(|v| *v));
        if window.len() == period {
            out[end] = finite(f(&window));
        }
    }
    out
}

pub fn rolling_sum(values: &[Option<f64>], period: usize) -> Line {
    rolling(values, period, |w| w.iter().sum())
}

pub fn rolling_mean(values: &[Option<f64>], period: usize) -> Line {
    rolling(values, period, |w| w.iter().sum::<f64>() / w.len() as f64)
}

pub fn rolling_max(values: &[Option<f64>], period: usize) -> Line {
    rolling(values, period, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

pub fn rolling_min(values: &[Option<f64>], period: usize) -> Line {
    rolling(values, period, |w| w.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Linearly weighted mean; the newest value weighs `period`, the oldest 1.
pub fn rolling_wma(values: &[Option<f64>], period: usize) -> Line {
    let denominator = (period * (period + 1)) as f64 / 2.0;
    rolling(values, period, |w| {
        w.iter()
            .enumerate()
            .map(|(i, x)| (i + 1) as f64 * x)
            .sum::<f64>()
            / denominator
    })
}

/// Mean absolute deviation from the window mean.
pub fn rolling_mean_abs_dev(values: &[Option<f64>], period: usize) -> Line {
    rolling(values, period, |w| {
        let mean = w.iter().sum::<f64>() / w.len() as f64;
        w.iter().map(|x| (x - mean).abs()).sum::<f64>() / w.len() as f64
    })
}

/// How an exponential smoother gets its first state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seed {
    /// Start from the first observation (recursive form, no look-ahead).
    First,
    /// Start from the mean of the first `period` observations.
    Mean,
}

/// Exponential smoothing `s = s + alpha * (x - s)`.
///
/// Leading gaps are skipped. Output is defined once `period` observations
/// have been seen. A gap after the start leaves the state untouched.
pub fn smooth(values: &[Option<f64>], period: usize, alpha: f64, seed: Seed) -> Line {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }

    let mut state: Option<f64> = None;
    let mut observed = 0usize;
    let mut seed_sum = 0.0;

    for (i, value) in values.iter().enumerate() {
        let Some(x) = *value else { continue };
        observed += 1;

        state = match (seed, state) {
            (Seed::First, None) => Some(x),
            (Seed::Mean, None) => {
                seed_sum += x;
                (observed == period).then(|| seed_sum / period as f64)
            }
            (_, Some(prev)) => Some(prev + alpha * (x - prev)),
        };

        if observed >= period {
            out[i] = state.and_then(finite);
        }
    }
    out
}

/// EMA with `alpha = 2 / (period + 1)`, seeded with the first value.
pub fn ema(values: &[Option<f64>], period: usize) -> Line {
    smooth(values, period, 2.0 / (period as f64 + 1.0), Seed::First)
}

/// Wilder smoothing (`alpha = 1 / period`) seeded with the first value.
pub fn wilder(values: &[Option<f64>], period: usize) -> Line {
    smooth(values, period, 1.0 / period as f64, Seed::First)
}

/// Wilder smoothing seeded with the simple mean of the first `period` values.
pub fn wilder_mean_seeded(values: &[Option<f64>], period: usize) -> Line {
    smooth(values, period, 1.0 / period as f64, Seed::Mean)
}
