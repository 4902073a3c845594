//! Best-effort extraction of match signals from free text
//!
//! Recognized fragments (anywhere in the text, in any order):
//! - `Arsenal vs Chelsea` - team names
//! - `2.10 3.40 3.60` - three decimal odds in a row (home, draw, away)
//! - `xg_home: 2.1` - expected goals
//! - `classement_home: 3` or `rank_home: 3` - league rank
//! - `forme_home: ★★★★☆` or `form_home: ★★★★☆` - recent form as stars
//!
//! Nothing here fails: unmatched or unparsable fragments are skipped and the
//! model falls back to its configured defaults.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

use crate::domain::{Labeled, MatchSignals, Outcomes};

static TEAMS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z][A-Za-z\s]*)\s+vs\s+([A-Za-z][A-Za-z\s]*)").expect("valid teams regex")
});
static ODDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+\.\d+)\s+(\d+\.\d+)\s+(\d+\.\d+)").expect("valid odds regex")
});
static XG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"xg_([a-z]+):\s*(\d+\.\d+)").expect("valid xg regex"));
static RANK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:classement|rank)_([a-z]+):\s*(\d+)").expect("valid rank regex")
});
static FORM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:forme|form)_([a-z]+):\s*([★☆]+)").expect("valid form regex"));

pub const FILLED_STAR: char = '★';
pub const MAX_STARS: u8 = 5;

/// Parses unstructured match descriptions into [`MatchSignals`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalExtractor;

impl SignalExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> MatchSignals {
        let signals = MatchSignals {
            teams: Self::teams(text),
            quoted_odds: Self::odds(text),
            expected_goals: Self::labeled(&XG_RE, text, |s| f64::from_str(s).ok()),
            rank: Self::labeled(&RANK_RE, text, |s| u32::from_str(s).ok()),
            form_stars: Self::labeled(&FORM_RE, text, |s| Some(count_stars(s))),
        };

        debug!(
            teams = ?signals.teams,
            odds = ?signals.quoted_odds,
            xg = signals.expected_goals.len(),
            rank = signals.rank.len(),
            form = signals.form_stars.len(),
            "extracted match signals"
        );

        signals
    }

    fn teams(text: &str) -> Option<(String, String)> {
        TEAMS_RE.captures_iter(text).find_map(|caps| {
            let home = caps.get(1)?.as_str().trim();
            let away = caps.get(2)?.as_str().trim();
            if home.is_empty() || away.is_empty() {
                None
            } else {
                Some((home.to_string(), away.to_string()))
            }
        })
    }

    /// First triple whose three prices all parse
    fn odds(text: &str) -> Option<Outcomes<Decimal>> {
        ODDS_RE.captures_iter(text).find_map(|caps| {
            let price = |i: usize| Decimal::from_str(caps.get(i)?.as_str()).ok();
            Some(Outcomes::new(price(1)?, price(2)?, price(3)?))
        })
    }

    fn labeled<T>(re: &Regex, text: &str, parse: impl Fn(&str) -> Option<T>) -> Vec<Labeled<T>> {
        re.captures_iter(text)
            .filter_map(|caps| {
                let label = caps.get(1)?.as_str();
                let value = parse(caps.get(2)?.as_str())?;
                Some(Labeled::new(label, value))
            })
            .collect()
    }
}

/// Filled stars in a rating string, capped at five
pub fn count_stars(rating: &str) -> u8 {
    let filled = rating.chars().filter(|c| *c == FILLED_STAR).count();
    filled.min(MAX_STARS as usize) as u8
}
