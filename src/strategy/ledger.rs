//! Append-only trade ledger with a running bankroll
//!
//! Trades are settled by a pluggable [`SettlementSource`]. The ledger is the
//! only writer of the bankroll: for every trade `n`,
//! `bankroll_after(n) == bankroll_before(n) + profit(n)` and
//! `bankroll_before(n + 1) == bankroll_after(n)`.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::{PerformanceSummary, Recommendation, Trade, TradeResult};

/// Decides whether a recommended bet wins
pub trait SettlementSource: Send {
    fn settle(&mut self, recommendation: &Recommendation) -> TradeResult;
}

/// Wins with a fixed probability, ignoring the model's own numbers
pub struct RandomSettlement {
    rng: StdRng,
    win_probability: f64,
}

impl RandomSettlement {
    pub fn new(win_probability: f64) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            win_probability: win_probability.clamp(0.0, 1.0),
        }
    }

    pub fn seeded(win_probability: f64, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            win_probability: win_probability.clamp(0.0, 1.0),
        }
    }
}

impl SettlementSource for RandomSettlement {
    fn settle(&mut self, _recommendation: &Recommendation) -> TradeResult {
        if self.rng.gen_bool(self.win_probability) {
            TradeResult::Win
        } else {
            TradeResult::Lose
        }
    }
}

/// Replays a fixed WIN/LOSE script, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedSettlement {
    script: Vec<TradeResult>,
    next: usize,
}

impl ScriptedSettlement {
    pub fn new(script: impl IntoIterator<Item = TradeResult>) -> Self {
        Self {
            script: script.into_iter().collect(),
            next: 0,
        }
    }
}

impl SettlementSource for ScriptedSettlement {
    fn settle(&mut self, _recommendation: &Recommendation) -> TradeResult {
        if self.script.is_empty() {
            return TradeResult::Lose;
        }
        let result = self.script[self.next % self.script.len()];
        self.next += 1;
        result
    }
}

pub struct TradeLedger {
    initial_bankroll: Decimal,
    bankroll: Decimal,
    trades: Vec<Trade>,
    settlement: Box<dyn SettlementSource>,
}

impl TradeLedger {
    pub fn new(initial_bankroll: Decimal, settlement: Box<dyn SettlementSource>) -> Self {
        let initial_bankroll = initial_bankroll.round_dp(2);
        Self {
            initial_bankroll,
            bankroll: initial_bankroll,
            trades: Vec::new(),
            settlement,
        }
    }

    pub fn bankroll(&self) -> Decimal {
        self.bankroll
    }

    /// All trades in insertion order
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Settle a recommendation and record it as the next trade
    pub fn append(&mut self, recommendation: Recommendation) -> &Trade {
        let id = format!("TRADE_{:04}", self.trades.len() + 1);
        let result = self.settlement.settle(&recommendation);

        let profit = match result {
            TradeResult::Win => recommendation.stake * (recommendation.odds - Decimal::ONE),
            TradeResult::Lose => -recommendation.stake,
        }
        .round_dp(2);

        let bankroll_before = self.bankroll;
        self.bankroll = (bankroll_before + profit).round_dp(2);

        info!(
            trade_id = %id,
            result = %result,
            stake = %recommendation.stake,
            profit = %profit,
            bankroll = %self.bankroll,
            "trade settled"
        );

        self.trades.push(Trade {
            id,
            recommendation,
            result,
            profit,
            bankroll_before,
            bankroll_after: self.bankroll,
            executed_at: Utc::now(),
        });

        let idx = self.trades.len() - 1;
        &self.trades[idx]
    }

    pub fn performance(&self) -> PerformanceSummary {
        let total_trades = self.trades.len();
        let winning_trades = self.trades.iter().filter(|t| t.result.is_win()).count();
        let win_rate = if total_trades == 0 {
            0.0
        } else {
            let pct = winning_trades as f64 / total_trades as f64 * 100.0;
            (pct * 10.0).round() / 10.0
        };

        PerformanceSummary {
            total_trades,
            winning_trades,
            win_rate,
            bankroll: self.bankroll.round_dp(2),
            initial_bankroll: self.initial_bankroll,
            net_profit: self.bankroll - self.initial_bankroll,
        }
    }
}

impl std::fmt::Debug for TradeLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradeLedger")
            .field("initial_bankroll", &self.initial_bankroll)
            .field("bankroll", &self.bankroll)
            .field("trades", &self.trades.len())
            .finish()
    }
}
