use betfoot::{
    Action, Analysis, Analyzer, AppConfig, Market, NoBet, Outcomes, ScriptedSettlement,
    TradeResult,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

const SAMPLE: &str = "Arsenal vs Chelsea 2.10 3.40 3.60 xg_home: 2.1 xg_away: 0.8 \
    classement_home: 3 classement_away: 15 forme_home: ★★★★☆ forme_away: ★★☆☆☆";

fn analyzer(script: &[TradeResult]) -> Analyzer {
    Analyzer::with_settlement(
        &AppConfig::default(),
        Box::new(ScriptedSettlement::new(script.iter().copied())),
    )
    .expect("default config is valid")
}

#[test]
fn sample_match_bets_draw_at_capped_stake() {
    let a = analyzer(&[TradeResult::Win]);
    let analysis = a.analyze(SAMPLE).unwrap();
    let rec = analysis.recommendation().expect("sample should produce a bet");

    assert_eq!(rec.match_label, "Arsenal vs Chelsea");
    assert_eq!(rec.bet, Market::Draw);
    assert_eq!(rec.odds, dec!(3.40));
    assert_eq!(rec.fair_odds, dec!(37.98));
    assert_eq!(rec.edges, Outcomes::new(Decimal::ZERO, dec!(1017.06), dec!(955.00)));
    assert_eq!(rec.edge, dec!(1017.06));
    assert_eq!(rec.kelly_fraction, dec!(0.05));
    assert_eq!(rec.stake, dec!(500));
    assert_eq!(rec.stake_percent, dec!(5));
    assert_eq!(rec.probabilities, Outcomes::new(0.944, 0.028, 0.028));
    assert_eq!(rec.confidence, 0.95);

    let trade = &a.trades().unwrap()[0];
    assert_eq!(trade.id, "TRADE_0001");
    assert_eq!(trade.result, TradeResult::Win);
    assert_eq!(trade.profit, dec!(1200));
    assert_eq!(trade.bankroll_after, dec!(11200));
}

#[test]
fn empty_text_is_deterministic() {
    let first = analyzer(&[TradeResult::Win]).analyze("").unwrap();
    let second = analyzer(&[TradeResult::Lose]).analyze("").unwrap();
    assert_eq!(first, second);

    let rec = first.recommendation().unwrap();
    assert_eq!(rec.bet, Market::Draw);
    assert_eq!(rec.edges, Outcomes::new(Decimal::ZERO, dec!(126.47), dec!(113.89)));
}

#[test]
fn no_bet_below_threshold() {
    let a = analyzer(&[TradeResult::Win]);
    assert_eq!(
        a.analyze("Home vs Away 1.42 8.00 8.00").unwrap(),
        Analysis::NoBet(NoBet::new(dec!(2.82)))
    );
    assert_eq!(a.performance().unwrap().total_trades, 0);
}

#[test]
fn bankroll_chain_holds_across_trades() {
    let a = analyzer(&[TradeResult::Win, TradeResult::Lose, TradeResult::Lose]);
    for text in [SAMPLE, "", "xg_home: 1.2 xg_away: 1.4", SAMPLE, "", "1.42 8.00 8.00", ""] {
        a.analyze(text).unwrap();
    }

    let trades = a.trades().unwrap();
    assert_eq!(trades.len(), 6);
    assert_eq!(trades[0].bankroll_before, dec!(10000));
    for t in &trades {
        assert_eq!(t.bankroll_after, (t.bankroll_before + t.profit).round_dp(2));
        assert!(t.recommendation.stake <= t.bankroll_before * dec!(0.05));
    }
    for pair in trades.windows(2) {
        assert_eq!(pair[1].bankroll_before, pair[0].bankroll_after);
    }

    let perf = a.performance().unwrap();
    assert_eq!(perf.total_trades, 6);
    assert_eq!(perf.winning_trades, 2);
    assert_eq!(perf.win_rate, 33.3);
    assert_eq!(perf.bankroll, trades[5].bankroll_after);
}

#[test]
fn concurrent_callers_keep_ledger_consistent() {
    let a = Arc::new(analyzer(&[TradeResult::Win, TradeResult::Lose]));

    std::thread::scope(|s| {
        for _ in 0..8 {
            let a = Arc::clone(&a);
            s.spawn(move || {
                for _ in 0..5 {
                    a.analyze("").unwrap();
                }
            });
        }
    });

    let trades = a.trades().unwrap();
    assert_eq!(trades.len(), 40);
    for (i, t) in trades.iter().enumerate() {
        assert_eq!(t.id, format!("TRADE_{:04}", i + 1));
    }
    for pair in trades.windows(2) {
        assert_eq!(pair[1].bankroll_before, pair[0].bankroll_after);
    }
}

#[test]
fn model_fault_is_reported_not_recorded() {
    let a = analyzer(&[TradeResult::Win]);
    let err = a.analyze("xg_home: 0.1 xg_away: 99999.0").unwrap_err();
    assert!(err.is_model_fault());
    assert!(!err.to_string().is_empty());
    assert!(a.trades().unwrap().is_empty());
}

#[test]
fn analysis_json_shape() {
    let a = analyzer(&[TradeResult::Lose]);

    let bet = serde_json::to_value(a.analyze(SAMPLE).unwrap()).unwrap();
    assert_eq!(bet["action"], "BET");
    assert_eq!(bet["match"], "Arsenal vs Chelsea");
    assert_eq!(bet["bet"], "draw");

    let no_bet = serde_json::to_value(a.analyze("1.50 8.00 8.00").unwrap()).unwrap();
    assert_eq!(no_bet["action"], "NO_BET");
    assert!(no_bet.get("max_edge").is_some());

    let trades = serde_json::to_value(a.trades().unwrap()).unwrap();
    assert_eq!(trades[0]["id"], "TRADE_0001");
    assert_eq!(trades[0]["result"], "LOSE");
    assert_eq!(trades[0]["match"], "Arsenal vs Chelsea");

    let parsed: Analysis = serde_json::from_value(bet).unwrap();
    assert_eq!(parsed.action(), Action::Bet);
}
