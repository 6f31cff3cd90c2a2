use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "BUY", alias = "buy", alias = "Buy")]
    Buy,
    #[serde(rename = "SELL", alias = "sell", alias = "Sell")]
    Sell,
}

impl Side {
    /// Map a trade fill `isBuyer` flag to the [`Side`] of the account.
    pub fn from_is_buyer(is_buyer: bool) -> Self {
        if is_buyer {
            Side::Buy
        } else {
            Side::Sell
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "BUY" | "buy" | "Buy" => Ok(Side::Buy),
            "SELL" | "sell" | "Sell" => Ok(Side::Sell),
            other => Err(format!("invalid side: {other}")),
        }
    }
}

/// Which of the two reporting pipelines produced a dataset.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PipelineKind {
    /// Account trade fills with explicit commissions.
    Fills,
    /// Order history with synthesized price and fee fields.
    Orders,
}

impl Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PipelineKind::Fills => "fills",
                PipelineKind::Orders => "orders",
            }
        )
    }
}

/// Time granularity of [`LedgerRow::timestamp`](crate::ledger::LedgerRow::timestamp).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// Full time of day is retained.
    Time,
    /// Truncated to the calendar day, time of day is always midnight.
    Day,
}

impl Resolution {
    pub fn display_format(&self) -> &'static str {
        match self {
            Resolution::Time => "%Y-%m-%d %H:%M:%S",
            Resolution::Day => "%Y-%m-%d",
        }
    }
}
