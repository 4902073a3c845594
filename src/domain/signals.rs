use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Outcomes;

/// A numeric signal tagged with the side label found in the text (e.g. "home")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Labeled<T> {
    pub label: String,
    pub value: T,
}

impl<T> Labeled<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Structured signals pulled out of a free-text match description.
///
/// Every sequence keeps source order; the model reads entry 0 as home and
/// entry 1 as away and ignores the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSignals {
    /// First "<home> vs <away>" pair found
    pub teams: Option<(String, String)>,
    /// First run of three decimal odds (home, draw, away)
    pub quoted_odds: Option<Outcomes<Decimal>>,
    pub expected_goals: Vec<Labeled<f64>>,
    pub rank: Vec<Labeled<u32>>,
    /// Filled-star count, 0..=5
    pub form_stars: Vec<Labeled<u8>>,
}

impl MatchSignals {
    /// "<home> vs <away>", falling back to "Home vs Away"
    pub fn match_label(&self) -> String {
        match &self.teams {
            Some((home, away)) => format!("{home} vs {away}"),
            None => "Home vs Away".to_string(),
        }
    }
}
