//! Rating engine property tests.
//!
//! Exercises the indicator panel and the weighted score through the public
//! library API on synthetic series.

use pulse::services::signals::{label, rate, weighted_score, RatingEngine};
use pulse::types::{Bar, GroupScope, Rating, Series, Vote};

/// Deterministic pseudo-random walk (LCG) so runs are reproducible.
fn random_walk(count: usize, seed: u64) -> Series {
    let mut state = seed;
    let mut price = 100.0;
    let bars = (0..count)
        .map(|i| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let step = ((state >> 33) as f64 / (1u64 << 31) as f64) - 0.5;
            let open = price;
            price = (price + step * 2.0).max(1.0);
            let high = open.max(price) + 0.3;
            let low = open.min(price) - 0.3;
            Bar::new(i as i64 * 60_000, open, high, low, price).with_volume(100.0 + i as f64)
        })
        .collect();
    Series::new(bars)
}

fn rising_closes(count: usize) -> Vec<f64> {
    (0..count).map(|i| 100.0 + 0.5 * i as f64).collect()
}

// =============================================================================
// Panel path
// =============================================================================

#[test]
fn test_five_bars_all_absent() {
    let result = rate(&Series::from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]), GroupScope::All, false);
    assert_eq!(result.votes.moving_averages.present_count(), 0);
    assert_eq!(result.votes.oscillators.present_count(), 0);
    assert_eq!(result.ma_score, 0.0);
    assert_eq!(result.osc_score, 0.0);
    assert_eq!(result.score, 0.0);
    assert_eq!(result.rating, Rating::Neutral);
}

#[test]
fn test_empty_series_is_neutral() {
    let result = rate(&Series::empty(), GroupScope::Oscillators, true);
    assert_eq!(result.score, 0.0);
    assert_eq!(result.rating, Rating::Neutral);
}

#[test]
fn test_scores_stay_in_range() {
    for seed in 1..20 {
        let result = rate(&random_walk(300, seed), GroupScope::All, false);
        for score in [result.ma_score, result.osc_score, result.score] {
            assert!((-1.0..=1.0).contains(&score), "seed {} score {}", seed, score);
        }
    }
}

#[test]
fn test_macd_never_neutral_when_defined() {
    for seed in 1..30 {
        for len in [34, 60, 150] {
            let result = rate(&random_walk(len, seed), GroupScope::All, false);
            let macd = result.votes.oscillators.get("MACD").flatten();
            assert!(
                matches!(macd, Some(Vote::Buy) | Some(Vote::Sell)),
                "seed {} len {}: {:?}",
                seed,
                len,
                macd
            );
        }
    }
}

#[test]
fn test_macd_absent_below_warm_up() {
    let result = rate(&random_walk(33, 7), GroupScope::All, false);
    assert_eq!(result.votes.oscillators.get("MACD"), Some(None));
}

#[test]
fn test_vwma_absent_without_volume() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
    let result = rate(&Series::from_closes(&closes), GroupScope::All, false);
    assert_eq!(result.votes.moving_averages.get("VWMA20"), Some(None));
    assert!(result.votes.moving_averages.get("SMA20").flatten().is_some());

    let with_volume = rate(&random_walk(60, 3), GroupScope::All, false);
    assert!(with_volume.votes.moving_averages.get("VWMA20").flatten().is_some());
}

#[test]
fn test_absent_votes_are_not_serialized() {
    let result = rate(&random_walk(25, 11), GroupScope::All, false);
    let json = serde_json::to_value(&result).unwrap();
    assert!(json["votes"]["MAs"].get("SMA20").is_some());
    assert!(json["votes"]["MAs"].get("SMA200").is_none());
    assert!(json["votes"]["Oscillators"].get("MACD").is_none());
    assert!(json.get("raw").is_none());
}

#[test]
fn test_group_scope_selects_score() {
    let series = random_walk(250, 5);
    let all = rate(&series, GroupScope::All, false);
    let mas = rate(&series, GroupScope::MovingAverages, false);
    let osc = rate(&series, GroupScope::Oscillators, false);
    assert_eq!(mas.score, all.ma_score);
    assert_eq!(osc.score, all.osc_score);
    assert!((all.score - (all.ma_score + all.osc_score) / 2.0).abs() <= 2e-4);
}

#[test]
fn test_rating_is_idempotent() {
    let series = random_walk(300, 42);
    let engine = RatingEngine::default();
    let first = engine.rate(&series, GroupScope::All, true);
    let second = engine.rate(&series, GroupScope::All, true);
    assert_eq!(first, second);
}

#[test]
fn test_trace_leaves_scores_untouched() {
    let series = random_walk(300, 9);
    let plain = rate(&series, GroupScope::All, false);
    let traced = rate(&series, GroupScope::All, true);
    assert_eq!(plain.score, traced.score);
    assert_eq!(plain.rating, traced.rating);
    assert_eq!(plain.votes, traced.votes);
    let raw = traced.raw.unwrap();
    assert!(raw["Stoch"].contains_key("k"));
    assert!(raw["MACD"].contains_key("line"));
}

#[test]
fn test_flat_series_rates_neutral() {
    let result = rate(&Series::from_closes(&[100.0; 250]), GroupScope::All, false);
    assert_eq!(result.rating, Rating::Neutral);
    assert_eq!(result.ma_score, 0.0);
}

// =============================================================================
// Weighted path
// =============================================================================

#[test]
fn test_weighted_needs_200_closes() {
    let short = weighted_score(&rising_closes(199), false);
    assert_eq!(short.score, 0.0);
    assert_eq!(short.rsi, 50.0);
    assert!(!short.macd_gt_signal);
    assert!(!short.above_sma200);
    assert!(!short.sma20_slope_pos);

    let enough = weighted_score(&rising_closes(200), false);
    assert!(enough.above_sma200);
    assert!(enough.score > 0.0);
}

#[test]
fn test_weighted_increasing_series() {
    let result = weighted_score(&rising_closes(250), false);
    assert!(result.above_sma200);
    assert!(result.macd_gt_signal);
    assert!(result.sma20_slope_pos);
    assert!(result.score > 0.0);
    assert_eq!(result.rating(), Rating::Buy);
}

#[test]
fn test_weighted_flat_series() {
    let result = weighted_score(&[100.0; 250], false);
    assert_eq!(result.rsi, 50.0);
    assert!(!result.above_sma200);
}

#[test]
fn test_weighted_score_bounded() {
    for seed in 1..20 {
        let closes = random_walk(260, seed).closes();
        let result = weighted_score(&closes, false);
        assert!((-1.0..=1.0).contains(&result.score));
        assert!((0.0..=100.0).contains(&result.rsi));
    }
}

// =============================================================================
// Rating mapper
// =============================================================================

#[test]
fn test_label_boundaries() {
    assert_eq!(label(0.51), Rating::StrongBuy);
    assert_eq!(label(0.5), Rating::Buy);
    assert_eq!(label(0.1), Rating::Neutral);
    assert_eq!(label(-0.1), Rating::Neutral);
    assert_eq!(label(-0.5), Rating::Sell);
    assert_eq!(label(-0.51), Rating::StrongSell);
}
