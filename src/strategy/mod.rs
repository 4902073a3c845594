pub mod edge;
pub mod engine;
pub mod extractor;
pub mod fair_odds;
pub mod ledger;
pub mod stake;

pub use edge::{EdgeEvaluator, EdgeReport};
pub use engine::Analyzer;
pub use extractor::SignalExtractor;
pub use fair_odds::{FairOddsModel, FairOddsQuote, ModelInputs};
pub use ledger::{RandomSettlement, ScriptedSettlement, SettlementSource, TradeLedger};
pub use stake::{StakeAdvisor, StakeSizing};
