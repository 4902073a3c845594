//! Fair-odds model for 1X2 football markets
//!
//! A weighted strength score from expected goals, league rank and form is
//! mapped to a home-win probability with a logistic curve:
//!
//! ```text
//! score  = w_xg·Δxg + w_rank·Δrank + w_form·Δform
//! p_home = 1 / (1 + e^-score)
//! p_draw = ceiling · (1 - |p_home - (1 - p_home)|)
//! p_away = 1 - p_home - p_draw
//! ```
//!
//! Fair odds per market are `1 / (p · margin)`, rounded to cents.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ModelConfig;
use crate::domain::{Labeled, MatchSignals, Outcomes};
use crate::error::{BetFootError, Result};

/// Model inputs after defaults have been applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelInputs {
    pub xg: (f64, f64),
    pub rank: (u32, u32),
    pub form: (f64, f64),
}

/// Priced match: normalized probabilities and margin-adjusted fair odds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairOddsQuote {
    pub inputs: ModelInputs,
    pub score: f64,
    /// Unrounded, sums to 1
    pub probabilities: Outcomes<f64>,
    pub fair_odds: Outcomes<Decimal>,
    /// Heuristic certainty proxy, not calibrated
    pub confidence: f64,
}

#[derive(Debug, Clone)]
pub struct FairOddsModel {
    config: ModelConfig,
}

impl Default for FairOddsModel {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

impl FairOddsModel {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    /// Resolve home/away inputs from the first two entries of each signal
    pub fn inputs(&self, signals: &MatchSignals) -> ModelInputs {
        let d = &self.config.defaults;
        let star = self.config.star_value;

        ModelInputs {
            xg: pair(&signals.expected_goals, d.xg_home, d.xg_away),
            rank: pair(&signals.rank, d.rank_home, d.rank_away),
            form: (
                nth(&signals.form_stars, 0).map_or(d.form_home, |s| s as f64 * star),
                nth(&signals.form_stars, 1).map_or(d.form_away, |s| s as f64 * star),
            ),
        }
    }

    pub fn price(&self, signals: &MatchSignals) -> Result<FairOddsQuote> {
        let inputs = self.inputs(signals);
        let score = self.score(&inputs);
        if !score.is_finite() {
            warn!(?inputs, "non-finite model score");
            return Err(BetFootError::Model(format!(
                "non-finite strength score from inputs {inputs:?}"
            )));
        }

        let probabilities = self.probabilities(score)?;
        let fair_odds = probabilities.try_map(|market, p| {
            if *p <= 0.0 {
                return Err(BetFootError::Model(format!(
                    "fair odds undefined for {market}: probability {p}"
                )));
            }
            let odds = 1.0 / (p * self.config.margin);
            Decimal::from_f64(odds)
                .map(|d| d.round_dp(2))
                .ok_or_else(|| {
                    BetFootError::Model(format!("fair odds for {market} not representable: {odds}"))
                })
        })?;

        let confidence = (score.abs() * self.config.confidence_scale).min(self.config.confidence_cap);

        debug!(
            score,
            p_home = probabilities.home,
            p_draw = probabilities.draw,
            p_away = probabilities.away,
            fair_home = %fair_odds.home,
            fair_draw = %fair_odds.draw,
            fair_away = %fair_odds.away,
            "priced match"
        );

        Ok(FairOddsQuote {
            inputs,
            score,
            probabilities,
            fair_odds,
            confidence,
        })
    }

    fn score(&self, inputs: &ModelInputs) -> f64 {
        let c = &self.config;
        let offset = c.rank_offset as f64;

        let delta_xg = inputs.xg.0 - inputs.xg.1;
        // Lower rank number means a stronger side
        let delta_rank = (offset - inputs.rank.0 as f64) - (offset - inputs.rank.1 as f64);
        let delta_form = inputs.form.0 - inputs.form.1;

        c.xg_weight * delta_xg + c.rank_weight * delta_rank + c.form_weight * delta_form
    }

    fn probabilities(&self, score: f64) -> Result<Outcomes<f64>> {
        let p_home = 1.0 / (1.0 + (-score).exp());
        let p_draw = self.config.draw_ceiling * (1.0 - (p_home - (1.0 - p_home)).abs());
        // Not clamped: a draw ceiling above 0.5 can push this negative
        let p_away = 1.0 - p_home - p_draw;

        let total = p_home + p_draw + p_away;
        if !total.is_finite() || total <= 0.0 {
            return Err(BetFootError::Model(format!(
                "cannot normalize probabilities (total {total})"
            )));
        }

        Ok(Outcomes::new(p_home / total, p_draw / total, p_away / total))
    }
}

fn nth<T: Copy>(values: &[Labeled<T>], i: usize) -> Option<T> {
    values.get(i).map(|l| l.value)
}

fn pair<T: Copy>(values: &[Labeled<T>], home: T, away: T) -> (T, T) {
    (nth(values, 0).unwrap_or(home), nth(values, 1).unwrap_or(away))
}
