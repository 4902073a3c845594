//! Fractional-Kelly stake sizing
//!
//! ```text
//! raw   = (edge / 100) / (odds - 1)
//! used  = min(raw · multiplier, cap)
//! stake = bankroll · used
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::edge::EdgeReport;
use super::fair_odds::FairOddsQuote;
use crate::config::StakingConfig;
use crate::domain::{Action, Analysis, MatchSignals, NoBet, Outcomes, Recommendation};

/// Kelly sizing for one bet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StakeSizing {
    pub raw_kelly: Decimal,
    /// Damped and capped
    pub kelly_fraction: Decimal,
    pub stake: Decimal,
    pub stake_percent: Decimal,
}

#[derive(Debug, Clone)]
pub struct StakeAdvisor {
    config: StakingConfig,
}

impl Default for StakeAdvisor {
    fn default() -> Self {
        Self::new(StakingConfig::default())
    }
}

impl StakeAdvisor {
    pub fn new(config: StakingConfig) -> Self {
        Self { config }
    }

    /// Quotes to price against when the text carried none
    pub fn default_odds(&self) -> &Outcomes<Decimal> {
        &self.config.default_odds
    }

    pub fn should_bet(&self, best_edge: Decimal) -> bool {
        best_edge >= self.config.min_edge_pct
    }

    /// Size a stake from an edge in percent and the quoted decimal odds
    pub fn size(&self, edge_pct: Decimal, odds: Decimal, bankroll: Decimal) -> StakeSizing {
        let net_odds = odds - Decimal::ONE;
        let raw_kelly = if net_odds > Decimal::ZERO {
            edge_pct / dec!(100) / net_odds
        } else {
            Decimal::ZERO
        };
        let kelly_fraction = (raw_kelly * self.config.kelly_multiplier)
            .min(self.config.max_stake_fraction)
            .max(Decimal::ZERO);

        // Truncated so the stake never exceeds the cap
        let stake =
            (bankroll * kelly_fraction).round_dp_with_strategy(2, RoundingStrategy::ToZero);
        let stake_percent = stake
            .checked_div(bankroll)
            .map(|f| (f * dec!(100)).round_dp(2))
            .unwrap_or(Decimal::ZERO);

        StakeSizing {
            raw_kelly,
            kelly_fraction,
            stake,
            stake_percent,
        }
    }

    /// BET recommendation for the best market, or NO_BET with the max edge seen
    pub fn advise(
        &self,
        signals: &MatchSignals,
        quote: &FairOddsQuote,
        quoted: &Outcomes<Decimal>,
        edges: &EdgeReport,
        bankroll: Decimal,
    ) -> Analysis {
        if !self.should_bet(edges.best_edge) {
            info!(max_edge = %edges.best_edge, "NO_BET: edge below threshold");
            return Analysis::NoBet(NoBet::new(edges.best_edge));
        }

        let market = edges.best_market;
        let odds = *quoted.get(market);
        if odds <= Decimal::ONE {
            info!(market = %market, odds = %odds, "NO_BET: quote pays nothing on a win");
            return Analysis::NoBet(NoBet::new(edges.best_edge));
        }
        let sizing = self.size(edges.best_edge, odds, bankroll);

        let recommendation = Recommendation {
            match_label: signals.match_label(),
            bet: market,
            odds,
            fair_odds: *quote.fair_odds.get(market),
            edge: edges.best_edge,
            stake: sizing.stake,
            stake_percent: sizing.stake_percent,
            kelly_fraction: sizing.kelly_fraction,
            confidence: round_to(quote.confidence, 2),
            probabilities: quote.probabilities.map(|p| round_to(*p, 3)),
            edges: edges.edges,
            action: Action::Bet,
        };

        info!(
            match_label = %recommendation.match_label,
            market = %market,
            odds = %odds,
            edge = %recommendation.edge,
            stake = %recommendation.stake,
            "BET recommended"
        );

        Analysis::Bet(recommendation)
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Market;
    use crate::strategy::{EdgeEvaluator, FairOddsModel, SignalExtractor};

    fn pipeline(text: &str, bankroll: Decimal) -> Analysis {
        let signals = SignalExtractor::new().extract(text);
        let quote = FairOddsModel::default().price(&signals).unwrap();
        let advisor = StakeAdvisor::default();
        let quoted = signals.quoted_odds.unwrap_or(*advisor.default_odds());
        let edges = EdgeEvaluator::new().evaluate(&quote.fair_odds, &quoted);
        advisor.advise(&signals, &quote, &quoted, &edges, bankroll)
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let advisor = StakeAdvisor::default();
        assert!(advisor.should_bet(dec!(3.00)));
        assert!(!advisor.should_bet(dec!(2.99)));
    }

    #[test]
    fn test_quarter_kelly_below_cap() {
        // raw = 0.04 / 1.0 = 0.04, quarter = 0.01
        let s = StakeAdvisor::default().size(dec!(4.0), dec!(2.00), dec!(10000));
        assert_eq!(s.raw_kelly, dec!(0.04));
        assert_eq!(s.kelly_fraction, dec!(0.01));
        assert_eq!(s.stake, dec!(100.00));
        assert_eq!(s.stake_percent, dec!(1.00));
    }

    #[test]
    fn test_stake_capped_at_five_percent() {
        let s = StakeAdvisor::default().size(dec!(126.47), dec!(3.40), dec!(10000));
        assert!(s.raw_kelly * dec!(0.25) > dec!(0.05));
        assert_eq!(s.kelly_fraction, dec!(0.05));
        assert_eq!(s.stake, dec!(500.00));
        assert_eq!(s.stake_percent, dec!(5.00));
    }

    #[test]
    fn test_fraction_is_min_of_damped_kelly_and_cap() {
        let advisor = StakeAdvisor::default();
        for (edge, odds) in [(dec!(3.0), dec!(1.5)), (dec!(12.5), dec!(4.2)), (dec!(60), dec!(2.0))] {
            let s = advisor.size(edge, odds, dec!(2500));
            let raw = edge / dec!(100) / (odds - Decimal::ONE);
            assert_eq!(s.kelly_fraction, (raw * dec!(0.25)).min(dec!(0.05)));
            assert!(s.stake <= dec!(125));
        }
    }

    #[test]
    fn test_stake_rounds_down_to_cents() {
        // 11320.96 * 0.05 = 566.048
        let s = StakeAdvisor::default().size(dec!(500), dec!(3.40), dec!(11320.96));
        assert_eq!(s.stake, dec!(566.04));
        assert!(s.stake <= dec!(11320.96) * dec!(0.05));
    }

    #[test]
    fn test_no_payout_quote_sizes_nothing() {
        let s = StakeAdvisor::default().size(dec!(400), dec!(1.00), dec!(10000));
        assert_eq!(s.raw_kelly, Decimal::ZERO);
        assert_eq!(s.stake, Decimal::ZERO);
    }

    #[test]
    fn test_best_market_at_one_is_no_bet() {
        // fair 1.46 / 7.70 / 7.70 against 1.00 everywhere
        let analysis = pipeline("1.00 1.00 1.00", dec!(10000));
        assert_eq!(analysis, Analysis::NoBet(NoBet::new(dec!(670.00))));
    }

    #[test]
    fn test_empty_bankroll_stakes_nothing() {
        let s = StakeAdvisor::default().size(dec!(10), dec!(2.0), Decimal::ZERO);
        assert_eq!(s.stake, Decimal::ZERO);
        assert_eq!(s.stake_percent, Decimal::ZERO);
    }

    #[test]
    fn test_default_match_bets_draw() {
        let analysis = pipeline("", dec!(10000));
        let rec = analysis.recommendation().expect("default match should bet");
        assert_eq!(rec.match_label, "Home vs Away");
        assert_eq!(rec.bet, Market::Draw);
        assert_eq!(rec.odds, dec!(3.40));
        assert_eq!(rec.fair_odds, dec!(7.70));
        assert_eq!(rec.edge, dec!(126.47));
        assert_eq!(rec.stake, dec!(500));
        assert_eq!(rec.confidence, 0.95);
        assert_eq!(rec.probabilities, Outcomes::new(0.725, 0.137, 0.137));
        assert_eq!(rec.action, Action::Bet);
    }

    #[test]
    fn test_small_edge_is_no_bet() {
        let analysis = pipeline("1.42 8.00 8.00", dec!(10000));
        assert_eq!(analysis, Analysis::NoBet(NoBet::new(dec!(2.82))));
    }

    #[test]
    fn test_no_positive_edge_reports_zero() {
        let analysis = pipeline("1.50 8.00 8.00", dec!(10000));
        assert_eq!(analysis.action(), Action::NoBet);
        assert_eq!(analysis, Analysis::NoBet(NoBet::new(Decimal::ZERO)));
    }
}
