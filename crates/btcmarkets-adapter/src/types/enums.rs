/*
[INPUT]:  Exchange-specific side tokens
[OUTPUT]: Canonical trade side values
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the exchange adds side tokens
*/

use std::fmt;

use serde::{Serialize, Serializer};

/// Canonical trade side
///
/// The exchange reports maker sides as "Bid"/"Ask". Tokens outside that
/// pair pass through unmapped in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
    Other(String),
}

impl TradeSide {
    /// Map an exchange side token to its canonical form
    pub fn from_wire(token: &str) -> Self {
        match token {
            "Bid" => TradeSide::Buy,
            "Ask" => TradeSide::Sell,
            other => TradeSide::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
            TradeSide::Other(token) => token,
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TradeSide {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
