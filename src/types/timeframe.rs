use serde::{Deserialize, Serialize};
use std::fmt;

/// Bar interval supported by the rating endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timeframe {
    M1,
    M5,
    M15,
    M30,
    H1,
    H4,
    #[serde(rename = "D")]
    D1,
}

impl Timeframe {
    /// All timeframes, shortest first.
    pub const ALL: [Timeframe; 7] = [
        Timeframe::M1,
        Timeframe::M5,
        Timeframe::M15,
        Timeframe::M30,
        Timeframe::H1,
        Timeframe::H4,
        Timeframe::D1,
    ];

    /// Parse from an identifier such as `"M15"` or `"d"`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "M1" => Some(Self::M1),
            "M5" => Some(Self::M5),
            "M15" => Some(Self::M15),
            "M30" => Some(Self::M30),
            "H1" => Some(Self::H1),
            "H4" => Some(Self::H4),
            "D" | "D1" => Some(Self::D1),
            _ => None,
        }
    }

    /// Parse a comma-separated list, dropping unknown identifiers.
    pub fn parse_list(csv: &str) -> Vec<Self> {
        csv.split(',').filter_map(Self::from_str).collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M1 => "M1",
            Self::M5 => "M5",
            Self::M15 => "M15",
            Self::M30 => "M30",
            Self::H1 => "H1",
            Self::H4 => "H4",
            Self::D1 => "D",
        }
    }

    /// Kline interval name on Binance.
    pub fn binance_interval(&self) -> &'static str {
        match self {
            Self::M1 => "1m",
            Self::M5 => "5m",
            Self::M15 => "15m",
            Self::M30 => "30m",
            Self::H1 => "1h",
            Self::H4 => "4h",
            Self::D1 => "1d",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
