use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single indicator's vote.
///
/// Serialized as the integer `1`, `0` or `-1`. An indicator that cannot vote
/// is represented by `Option::<Vote>::None`, never by `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Vote {
    Sell,
    Neutral,
    Buy,
}

impl Vote {
    pub fn value(&self) -> i8 {
        match self {
            Vote::Sell => -1,
            Vote::Neutral => 0,
            Vote::Buy => 1,
        }
    }

    /// `Buy` when `value > reference`, `Sell` when below, `Neutral` when equal.
    pub fn from_comparison(value: f64, reference: f64) -> Self {
        if value > reference {
            Vote::Buy
        } else if value < reference {
            Vote::Sell
        } else {
            Vote::Neutral
        }
    }
}

impl From<Vote> for i8 {
    fn from(vote: Vote) -> Self {
        vote.value()
    }
}

impl TryFrom<i8> for Vote {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Vote::Sell),
            0 => Ok(Vote::Neutral),
            1 => Ok(Vote::Buy),
            other => Err(format!("invalid vote {}", other)),
        }
    }
}

/// Five-bucket rating label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    #[serde(rename = "Buy")]
    Buy,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Sell")]
    Sell,
    #[serde(rename = "Strong Sell")]
    StrongSell,
}

impl Rating {
    /// Map a score to its rating.
    ///
    /// `(0.5, ∞)` Strong Buy, `(0.1, 0.5]` Buy, `[-0.1, 0.1]` Neutral,
    /// `[-0.5, -0.1)` Sell, everything else Strong Sell.
    pub fn from_score(score: f64) -> Self {
        if score > 0.5 {
            Rating::StrongBuy
        } else if score > 0.1 {
            Rating::Buy
        } else if score >= -0.1 {
            Rating::Neutral
        } else if score >= -0.5 {
            Rating::Sell
        } else {
            Rating::StrongSell
        }
    }

    /// Get display label for this rating.
    pub fn label(&self) -> &'static str {
        match self {
            Rating::StrongBuy => "Strong Buy",
            Rating::Buy => "Buy",
            Rating::Neutral => "Neutral",
            Rating::Sell => "Sell",
            Rating::StrongSell => "Strong Sell",
        }
    }
}

/// Which indicator family an indicator votes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorGroup {
    #[serde(rename = "MAs")]
    MovingAverages,
    Oscillators,
}

/// Which group(s) the overall score is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GroupScope {
    #[serde(rename = "MAs")]
    MovingAverages,
    Oscillators,
    #[default]
    All,
}

impl GroupScope {
    /// Parse a scope name. Anything other than `MAs` or `Oscillators` means `All`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "mas" | "ma" | "moving_averages" => Self::MovingAverages,
            "oscillators" | "osc" => Self::Oscillators,
            _ => Self::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MovingAverages => "MAs",
            Self::Oscillators => "Oscillators",
            Self::All => "All",
        }
    }
}

/// Votes of one indicator group, keyed by indicator id.
///
/// Absent votes are kept so callers can tell "did not vote" from "neutral";
/// only present votes are serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoteGroup {
    votes: BTreeMap<String, Option<Vote>>,
}

impl VoteGroup {
    pub fn insert(&mut self, id: impl Into<String>, vote: Option<Vote>) {
        self.votes.insert(id.into(), vote);
    }

    /// Vote for an indicator: `None` if unknown, `Some(None)` if absent.
    pub fn get(&self, id: &str) -> Option<Option<Vote>> {
        self.votes.get(id).copied()
    }

    /// Indicators that cast a vote.
    pub fn present(&self) -> impl Iterator<Item = (&str, Vote)> + '_ {
        self.votes
            .iter()
            .filter_map(|(id, vote)| vote.map(|v| (id.as_str(), v)))
    }

    /// Indicators that were evaluated but could not vote.
    pub fn absent(&self) -> impl Iterator<Item = &str> + '_ {
        self.votes
            .iter()
            .filter(|(_, vote)| vote.is_none())
            .map(|(id, _)| id.as_str())
    }

    pub fn present_count(&self) -> usize {
        self.present().count()
    }

    /// Mean of present votes, 0.0 when nothing voted.
    pub fn mean(&self) -> f64 {
        let (sum, count) = self
            .present()
            .fold((0i32, 0usize), |(sum, count), (_, v)| (sum + v.value() as i32, count + 1));
        if count == 0 {
            0.0
        } else {
            sum as f64 / count as f64
        }
    }
}

impl Serialize for VoteGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.present_count()))?;
        for (id, vote) in self.present() {
            map.serialize_entry(id, &vote)?;
        }
        map.end()
    }
}

/// Votes of both groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VoteSet {
    #[serde(rename = "MAs")]
    pub moving_averages: VoteGroup,
    #[serde(rename = "Oscillators")]
    pub oscillators: VoteGroup,
}

impl VoteSet {
    pub fn group(&self, group: IndicatorGroup) -> &VoteGroup {
        match group {
            IndicatorGroup::MovingAverages => &self.moving_averages,
            IndicatorGroup::Oscillators => &self.oscillators,
        }
    }

    pub fn group_mut(&mut self, group: IndicatorGroup) -> &mut VoteGroup {
        match group {
            IndicatorGroup::MovingAverages => &mut self.moving_averages,
            IndicatorGroup::Oscillators => &mut self.oscillators,
        }
    }
}

/// Named raw values reported by one indicator (e.g. `"k"`, `"d"`).
pub type RawValues = BTreeMap<&'static str, f64>;

/// Raw values of every indicator, keyed by indicator id.
pub type IndicatorTrace = BTreeMap<String, RawValues>;

/// Result of the indicator-voting path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingResult {
    pub ma_score: f64,
    pub osc_score: f64,
    pub score: f64,
    pub rating: Rating,
    pub votes: VoteSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<IndicatorTrace>,
}

impl RatingResult {
    /// All-absent result for a series with nothing to evaluate.
    pub fn neutral() -> Self {
        Self {
            ma_score: 0.0,
            osc_score: 0.0,
            score: 0.0,
            rating: Rating::Neutral,
            votes: VoteSet::default(),
            raw: None,
        }
    }
}

/// Result of the weighted-score path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedScore {
    pub score: f64,
    pub rsi: f64,
    pub macd_gt_signal: bool,
    pub above_sma200: bool,
    pub sma20_slope_pos: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawValues>,
}

impl WeightedScore {
    /// Fixed result when history is too short.
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            rsi: 50.0,
            macd_gt_signal: false,
            above_sma200: false,
            sma20_slope_pos: false,
            raw: None,
        }
    }

    pub fn rating(&self) -> Rating {
        Rating::from_score(self.score)
    }
}

/// Boolean and RSI inputs behind a weighted score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightComponents {
    pub rsi14: f64,
    pub macd_gt_signal: bool,
    pub above_sma200: bool,
    pub sma20_slope_pos: bool,
}

/// Weighted score as reported per symbol and timeframe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedRating {
    pub score: f64,
    pub rating: Rating,
    pub components: WeightComponents,
    pub bars_used: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawValues>,
}

impl WeightedRating {
    pub fn new(score: WeightedScore, bars_used: usize) -> Self {
        Self {
            score: score.score,
            rating: score.rating(),
            components: WeightComponents {
                rsi14: score.rsi,
                macd_gt_signal: score.macd_gt_signal,
                above_sma200: score.above_sma200,
                sma20_slope_pos: score.sma20_slope_pos,
            },
            bars_used,
            raw: score.raw,
        }
    }
}

/// Round to four decimals, the precision of every reported score.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
