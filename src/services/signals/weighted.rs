//! Weighted trend/momentum score over bare closes.
//!
//! A lighter alternative to the indicator panel: four fixed-weight terms
//! summed and clamped to `[-1, 1]`.

use super::indicators::macd::macd_series;
use super::indicators::rsi::rsi_series;
use super::indicators::sma::sma_series;
use super::rolling::last;
use crate::types::{round4, RawValues, WeightedScore};

/// Closes needed before the score is computed.
pub const MIN_CLOSES: usize = 200;

const TREND_WEIGHT: f64 = 0.20;
const MACD_WEIGHT: f64 = 0.10;
const SLOPE_WEIGHT: f64 = 0.10;
const SLOPE_LOOKBACK: usize = 5;

/// Score a close series (oldest first).
///
/// Below [`MIN_CLOSES`], or when the last close is not finite, the fixed
/// neutral result is returned. RSI reads 50 where the average loss is zero.
pub fn weighted_score(closes: &[f64], trace: bool) -> WeightedScore {
    let Some(&close) = closes.last() else {
        return WeightedScore::neutral();
    };
    if closes.len() < MIN_CLOSES || !close.is_finite() {
        return WeightedScore::neutral();
    }

    let sma200 = last(&sma_series(closes, 200)).unwrap_or(close);
    let sma20 = sma_series(closes, 20);
    let rsi = last(&rsi_series(closes, 14, 50.0)).unwrap_or(50.0);
    let (macd_line, macd_signal) = macd_series(closes);
    let macd_line = last(&macd_line);
    let macd_signal = last(&macd_signal);

    let above_sma200 = close > sma200;
    let macd_gt_signal = matches!((macd_line, macd_signal), (Some(l), Some(s)) if l > s);
    // Compared by bar position: a gap at either end leaves the slope undefined.
    let earlier = sma20
        .len()
        .checked_sub(SLOPE_LOOKBACK + 1)
        .and_then(|i| sma20[i]);
    let slope = match (last(&sma20), earlier) {
        (Some(now), Some(then)) => Some(now - then),
        _ => None,
    };
    let sma20_slope_pos = slope.is_some_and(|s| s > 0.0);

    let sign = |flag: bool| if flag { 1.0 } else { -1.0 };
    let score = sign(above_sma200) * TREND_WEIGHT
        + (rsi - 50.0) / 100.0
        + sign(macd_gt_signal) * MACD_WEIGHT
        + sign(sma20_slope_pos) * SLOPE_WEIGHT;

    let raw = trace.then(|| {
        let mut raw = RawValues::new();
        raw.insert("close", close);
        raw.insert("sma200", sma200);
        raw.insert("rsi", rsi);
        if let Some(v) = macd_line {
            raw.insert("macd", v);
        }
        if let Some(v) = macd_signal {
            raw.insert("macd_signal", v);
        }
        if let Some(v) = last(&sma20) {
            raw.insert("sma20", v);
        }
        if let Some(v) = slope {
            raw.insert("sma20_slope", v);
        }
        raw
    });

    WeightedScore {
        score: round4(score.clamp(-1.0, 1.0)),
        rsi: (rsi * 100.0).round() / 100.0,
        macd_gt_signal,
        above_sma200,
        sma20_slope_pos,
        raw,
    }
}
