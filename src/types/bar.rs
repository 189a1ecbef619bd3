use serde::{Deserialize, Serialize, Serializer};
use std::sync::Arc;

/// One OHLC(+volume) sample.
///
/// Serialized with the compact wire names `t, o, h, l, c, v`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Open time, unix milliseconds.
    #[serde(rename = "t")]
    pub time: i64,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v", default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Bar {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// (high + low) / 2
    pub fn median_price(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// Immutable, oldest-first sequence of bars.
///
/// Cloning is cheap; the bars are shared.
#[derive(Debug, Clone, Default)]
pub struct Series {
    bars: Arc<[Bar]>,
}

impl Series {
    /// Build a series, ordering bars by open time.
    pub fn new(mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|b| b.time);
        Self { bars: bars.into() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Series from bare closes; open/high/low equal the close and there is no volume.
    pub fn from_closes(closes: &[f64]) -> Self {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(i as i64 * 60_000, c, c, c, c))
            .collect();
        Self::new(bars)
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// The trailing `count` bars as a new series.
    pub fn tail(&self, count: usize) -> Self {
        let start = self.bars.len().saturating_sub(count);
        Self {
            bars: self.bars[start..].into(),
        }
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// Per-bar volume, or `None` when no bar carries a volume at all.
    pub fn volumes(&self) -> Option<Vec<Option<f64>>> {
        if self.bars.iter().all(|b| b.volume.is_none()) {
            return None;
        }
        Some(self.bars.iter().map(|b| b.volume).collect())
    }
}

/// Serialized as a plain array of bars.
impl Serialize for Series {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.bars.iter())
    }
}

impl From<Vec<Bar>> for Series {
    fn from(bars: Vec<Bar>) -> Self {
        Self::new(bars)
    }
}
