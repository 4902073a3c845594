pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod strategy;

pub use config::AppConfig;
pub use domain::{
    Action, Analysis, Market, MatchSignals, NoBet, Outcomes, PerformanceSummary, Recommendation,
    Trade, TradeResult,
};
pub use error::{BetFootError, Result};
pub use services::{create_router, ApiServer, ApiState};
pub use strategy::{
    Analyzer, EdgeEvaluator, FairOddsModel, RandomSettlement, ScriptedSettlement,
    SettlementSource, SignalExtractor, StakeAdvisor, TradeLedger,
};
