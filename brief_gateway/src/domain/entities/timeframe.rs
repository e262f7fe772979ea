use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Time window a brief covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "24h")]
    Last24Hours,
    #[serde(rename = "48h")]
    Last48Hours,
    #[serde(rename = "7d")]
    LastWeek,
    #[serde(rename = "30d")]
    LastMonth,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Last24Hours => "24h",
            Timeframe::Last48Hours => "48h",
            Timeframe::LastWeek => "7d",
            Timeframe::LastMonth => "30d",
        }
    }

    /// Human phrase used in the synthesis instructions
    pub fn window_phrase(&self) -> &'static str {
        match self {
            Timeframe::Last24Hours => "last 24 hours",
            Timeframe::Last48Hours => "last 48 hours",
            Timeframe::LastWeek => "last week",
            Timeframe::LastMonth => "last month",
        }
    }

    pub fn window_hours(&self) -> u32 {
        match self {
            Timeframe::Last24Hours => 24,
            Timeframe::Last48Hours => 48,
            Timeframe::LastWeek => 7 * 24,
            Timeframe::LastMonth => 30 * 24,
        }
    }
}

/// Phrase for an optional timeframe: an unknown window is described as "recent"
pub fn window_phrase(timeframe: Option<Timeframe>) -> &'static str {
    timeframe.map(|t| t.window_phrase()).unwrap_or("recent")
}

impl FromStr for Timeframe {
    type Err = TimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(Timeframe::Last24Hours),
            "48h" => Ok(Timeframe::Last48Hours),
            "7d" => Ok(Timeframe::LastWeek),
            "30d" => Ok(Timeframe::LastMonth),
            other => Err(TimeframeError::Unknown(other.to_string())),
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TimeframeError {
    #[error("Invalid timeframe {0}, expected one of 24h, 48h, 7d, 30d")]
    Unknown(String),
}
