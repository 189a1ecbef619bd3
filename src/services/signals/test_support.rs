//! Series generators for indicator tests.

use crate::types::{Bar, Series};

pub fn uptrend(count: usize) -> Series {
    Series::new(
        (0..count)
            .map(|i| {
                let base = 100.0 + i as f64 * 1.5;
                Bar::new(1_000_000 + i as i64 * 60_000, base, base + 2.0, base - 1.0, base + 1.0)
                    .with_volume(1000.0)
            })
            .collect(),
    )
}

pub fn downtrend(count: usize) -> Series {
    Series::new(
        (0..count)
            .map(|i| {
                let base = 200.0 - i as f64 * 1.5;
                Bar::new(1_000_000 + i as i64 * 60_000, base, base + 1.0, base - 2.0, base - 1.0)
                    .with_volume(1000.0)
            })
            .collect(),
    )
}

/// Constant price, zero range.
pub fn flat(count: usize) -> Series {
    Series::from_closes(&vec![100.0; count])
}

/// Bars built from closes with a fixed half-range around each close.
pub fn from_closes(closes: &[f64], half_range: f64) -> Series {
    Series::new(
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                Bar::new(i as i64 * 60_000, c, c + half_range, c - half_range, c)
            })
            .collect(),
    )
}

/// Long decline followed by a sharp rebound on the final bars.
pub fn decline_then_bounce(decline: usize, bounce: usize) -> Series {
    let mut closes: Vec<f64> = (0..decline).map(|i| 200.0 - i as f64 * 2.0).collect();
    let bottom = *closes.last().unwrap_or(&200.0);
    closes.extend((1..=bounce).map(|i| bottom + i as f64 * 0.5));
    from_closes(&closes, 0.5)
}

/// Long rally followed by a pullback on the final bars.
pub fn rally_then_dip(rally: usize, dip: usize) -> Series {
    let mut closes: Vec<f64> = (0..rally).map(|i| 100.0 + i as f64 * 2.0).collect();
    let top = *closes.last().unwrap_or(&100.0);
    closes.extend((1..=dip).map(|i| top - i as f64 * 0.5));
    from_closes(&closes, 0.5)
}
