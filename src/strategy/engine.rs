//! Match analysis pipeline
//!
//! text → [`SignalExtractor`] → [`FairOddsModel`] → [`EdgeEvaluator`] →
//! [`StakeAdvisor`] → (on BET) [`TradeLedger`]

use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

use super::edge::EdgeEvaluator;
use super::extractor::SignalExtractor;
use super::fair_odds::FairOddsModel;
use super::ledger::{RandomSettlement, SettlementSource, TradeLedger};
use super::stake::StakeAdvisor;
use crate::config::AppConfig;
use crate::domain::{Analysis, PerformanceSummary, Trade};
use crate::error::{BetFootError, Result};

/// Entry point for analyzing match descriptions against one shared bankroll.
///
/// The ledger lock is held from reading the bankroll through the trade
/// append, so concurrent callers see an unbroken bankroll chain.
#[derive(Debug)]
pub struct Analyzer {
    extractor: SignalExtractor,
    model: FairOddsModel,
    evaluator: EdgeEvaluator,
    advisor: StakeAdvisor,
    ledger: Mutex<TradeLedger>,
}

impl Analyzer {
    /// Build from config with the random settlement it describes
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let ledger = &config.ledger;
        let settlement: Box<dyn SettlementSource> = match ledger.seed {
            Some(seed) => Box::new(RandomSettlement::seeded(ledger.win_probability, seed)),
            None => Box::new(RandomSettlement::new(ledger.win_probability)),
        };
        Self::with_settlement(config, settlement)
    }

    pub fn with_settlement(
        config: &AppConfig,
        settlement: Box<dyn SettlementSource>,
    ) -> Result<Self> {
        config
            .validate()
            .map_err(|errors| BetFootError::Validation(errors.join("; ")))?;

        Ok(Self {
            extractor: SignalExtractor::new(),
            model: FairOddsModel::new(config.model.clone()),
            evaluator: EdgeEvaluator::new(),
            advisor: StakeAdvisor::new(config.staking.clone()),
            ledger: Mutex::new(TradeLedger::new(config.ledger.initial_bankroll, settlement)),
        })
    }

    /// Price a match description and, when the edge clears the threshold,
    /// size and settle a bet against the bankroll.
    ///
    /// Model faults return `BetFootError::Model` before anything touches the ledger.
    pub fn analyze(&self, text: &str) -> Result<Analysis> {
        let signals = self.extractor.extract(text);
        let quote = self.model.price(&signals).inspect_err(|e| {
            warn!(error = %e, "pricing failed");
        })?;

        let quoted = signals
            .quoted_odds
            .unwrap_or(*self.advisor.default_odds());
        let edges = self.evaluator.evaluate(&quote.fair_odds, &quoted);

        let mut ledger = self.lock()?;
        let analysis = self
            .advisor
            .advise(&signals, &quote, &quoted, &edges, ledger.bankroll());

        if let Analysis::Bet(recommendation) = &analysis {
            let trade = ledger.append(recommendation.clone());
            info!(
                trade_id = %trade.id,
                result = %trade.result,
                bankroll = %trade.bankroll_after,
                "recommendation executed"
            );
        }

        Ok(analysis)
    }

    /// All trades in insertion order
    pub fn trades(&self) -> Result<Vec<Trade>> {
        Ok(self.lock()?.trades().to_vec())
    }

    pub fn performance(&self) -> Result<PerformanceSummary> {
        Ok(self.lock()?.performance())
    }

    fn lock(&self) -> Result<MutexGuard<'_, TradeLedger>> {
        self.ledger
            .lock()
            .map_err(|_| BetFootError::Internal("trade ledger lock poisoned".to_string()))
    }
}
