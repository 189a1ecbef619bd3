//! Average Directional Index (ADX) indicator.

use crate::services::signals::rolling::{last_two, wilder_mean_seeded, zip_with, Line};
use crate::services::signals::{Reading, Signal};
use crate::types::{IndicatorGroup, Series, Vote};

/// ADX, +DI and -DI lines.
pub struct DirectionalLines {
    pub adx: Line,
    pub plus_di: Line,
    pub minus_di: Line,
}

/// Directional movement system with Wilder smoothing.
///
/// True range and directional movement start at the second bar. Each is
/// smoothed with `alpha = 1 / period` seeded by the mean of the first
/// `period` values, and ADX is the same smoothing applied to DX.
pub fn directional_lines(series: &Series, period: usize) -> DirectionalLines {
    let bars = series.bars();
    let len = bars.len();
    let mut tr: Line = vec![None; len];
    let mut plus_dm: Line = vec![None; len];
    let mut minus_dm: Line = vec![None; len];

    for i in 1..len {
        let (cur, prev) = (&bars[i], &bars[i - 1]);
        let range = (cur.high - cur.low)
            .max((cur.high - prev.close).abs())
            .max((cur.low - prev.close).abs());
        let up = cur.high - prev.high;
        let down = prev.low - cur.low;

        tr[i] = range.is_finite().then_some(range);
        plus_dm[i] = up
            .is_finite()
            .then_some(if up > down && up > 0.0 { up } else { 0.0 });
        minus_dm[i] = down
            .is_finite()
            .then_some(if down > up && down > 0.0 { down } else { 0.0 });
    }

    let smoothed_tr = wilder_mean_seeded(&tr, period);
    let plus_di = zip_with(&wilder_mean_seeded(&plus_dm, period), &smoothed_tr, |dm, tr| {
        100.0 * dm / tr
    });
    let minus_di = zip_with(&wilder_mean_seeded(&minus_dm, period), &smoothed_tr, |dm, tr| {
        100.0 * dm / tr
    });
    let dx = zip_with(&plus_di, &minus_di, |p, m| 100.0 * (p - m).abs() / (p + m));
    let adx = wilder_mean_seeded(&dx, period);

    DirectionalLines {
        adx,
        plus_di,
        minus_di,
    }
}

/// ADX (Average Directional Index) indicator.
///
/// Measures trend strength (not direction). The trend counts as strong when
/// ADX is above 20 and rising; +DI and -DI then decide the direction.
pub struct Adx {
    period: usize,
}

impl Default for Adx {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Signal for Adx {
    fn id(&self) -> &str {
        "ADX"
    }

    fn group(&self) -> IndicatorGroup {
        IndicatorGroup::Oscillators
    }

    fn min_periods(&self) -> usize {
        // DX starts at `period`, ADX needs `period` DX values, the vote needs two.
        2 * self.period + 1
    }

    fn evaluate(&self, series: &Series) -> Reading {
        let lines = directional_lines(series, self.period);
        let Some((adx_prev, adx)) = last_two(&lines.adx) else {
            return Reading::absent();
        };
        let (Some(plus_di), Some(minus_di)) = (
            lines.plus_di.last().copied().flatten(),
            lines.minus_di.last().copied().flatten(),
        ) else {
            return Reading::absent();
        };

        let strong = adx > 20.0 && adx > adx_prev;
        let vote = if strong && plus_di > minus_di {
            Vote::Buy
        } else if strong && minus_di > plus_di {
            Vote::Sell
        } else {
            Vote::Neutral
        };

        Reading::vote(Some(vote))
            .with("adx", Some(adx))
            .with("adx_prev", Some(adx_prev))
            .with("plus_di", Some(plus_di))
            .with("minus_di", Some(minus_di))
    }
}
