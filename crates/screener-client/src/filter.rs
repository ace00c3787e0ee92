//! Filter identifiers and result types

use serde::{Deserialize, Serialize};

/// One matching stock, as the backend labels it
pub type StockResult = String;

/// Matching stocks in server response order
pub type ResultSet = Vec<StockResult>;

/// Which backend filter to invoke.
///
/// The presets are the screens the backend ships with. Anything else is
/// carried as `Custom` and forwarded verbatim; the client never rejects a
/// filter name, the backend does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterType {
    /// 5-minute close crossing a 15-bar WMA on 1.5x average volume
    Intraday,
    /// 20-day EMA crossing above the 50-day EMA
    Swing,
    /// Weekly close above the 200-week EMA
    LongTerm,
    /// Tight 30-day range broken on double volume
    ChartPattern,
    Custom(String),
}

impl FilterType {
    pub const PRESETS: [FilterType; 4] = [
        FilterType::Intraday,
        FilterType::Swing,
        FilterType::LongTerm,
        FilterType::ChartPattern,
    ];

    /// Value sent as the `type` query parameter
    pub fn as_str(&self) -> &str {
        match self {
            FilterType::Intraday => "intraday",
            FilterType::Swing => "swing",
            FilterType::LongTerm => "longterm",
            FilterType::ChartPattern => "chartpattern",
            FilterType::Custom(name) => name,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FilterType::Intraday => "Intraday Breakout",
            FilterType::Swing => "Swing Trading",
            FilterType::LongTerm => "Long Term",
            FilterType::ChartPattern => "Chart Pattern",
            FilterType::Custom(name) => name,
        }
    }

    pub fn is_preset(&self) -> bool {
        !matches!(self, FilterType::Custom(_))
    }
}

impl std::fmt::Display for FilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for FilterType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "intraday" => FilterType::Intraday,
            "swing" => FilterType::Swing,
            "longterm" => FilterType::LongTerm,
            "chartpattern" => FilterType::ChartPattern,
            _ => FilterType::Custom(s),
        }
    }
}

impl From<&str> for FilterType {
    fn from(s: &str) -> Self {
        FilterType::from(s.to_string())
    }
}

impl From<FilterType> for String {
    fn from(filter: FilterType) -> Self {
        match filter {
            FilterType::Custom(name) => name,
            preset => preset.as_str().to_string(),
        }
    }
}
