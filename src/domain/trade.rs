use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Market, Outcomes};

/// Decision tag carried by every analysis result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Bet,
    NoBet,
}

/// A sized bet on the market with the best edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "match")]
    pub match_label: String,
    pub bet: Market,
    /// Quoted bookmaker odds for `bet`
    pub odds: Decimal,
    pub fair_odds: Decimal,
    /// Edge in percent
    pub edge: Decimal,
    pub stake: Decimal,
    pub stake_percent: Decimal,
    /// Damped and capped Kelly fraction actually applied
    pub kelly_fraction: Decimal,
    pub confidence: f64,
    pub probabilities: Outcomes<f64>,
    pub edges: Outcomes<Decimal>,
    pub action: Action,
}

/// No market cleared the minimum edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoBet {
    pub action: Action,
    pub max_edge: Decimal,
}

impl NoBet {
    pub fn new(max_edge: Decimal) -> Self {
        Self {
            action: Action::NoBet,
            max_edge,
        }
    }
}

/// Outcome of analyzing one match description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Analysis {
    Bet(Recommendation),
    NoBet(NoBet),
}

impl Analysis {
    pub fn action(&self) -> Action {
        match self {
            Analysis::Bet(r) => r.action,
            Analysis::NoBet(n) => n.action,
        }
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        match self {
            Analysis::Bet(r) => Some(r),
            Analysis::NoBet(_) => None,
        }
    }
}

/// Simulated settlement of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeResult {
    Win,
    Lose,
}

impl TradeResult {
    pub fn is_win(&self) -> bool {
        matches!(self, TradeResult::Win)
    }
}

impl std::fmt::Display for TradeResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeResult::Win => write!(f, "WIN"),
            TradeResult::Lose => write!(f, "LOSE"),
        }
    }
}

/// Executed recommendation. Only the ledger creates these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// TRADE_0001, TRADE_0002, ...
    pub id: String,
    #[serde(flatten)]
    pub recommendation: Recommendation,
    pub result: TradeResult,
    pub profit: Decimal,
    pub bankroll_before: Decimal,
    pub bankroll_after: Decimal,
    pub executed_at: DateTime<Utc>,
}

/// Cumulative ledger performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub total_trades: usize,
    pub winning_trades: usize,
    /// Percent, one decimal
    pub win_rate: f64,
    pub bankroll: Decimal,
    pub initial_bankroll: Decimal,
    pub net_profit: Decimal,
}
