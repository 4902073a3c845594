use serde::{Deserialize, Serialize};

/// One of the three 1X2 markets of a football match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Home,
    Draw,
    Away,
}

impl Market {
    /// Iteration order used everywhere a market is selected; ties go to the earlier one
    pub const ALL: [Market; 3] = [Market::Home, Market::Draw, Market::Away];

    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Home => "home",
            Market::Draw => "draw",
            Market::Away => "away",
        }
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A value per market (probabilities, odds, edges)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Outcomes<T> {
    pub home: T,
    pub draw: T,
    pub away: T,
}

impl<T> Outcomes<T> {
    pub fn new(home: T, draw: T, away: T) -> Self {
        Self { home, draw, away }
    }

    pub fn get(&self, market: Market) -> &T {
        match market {
            Market::Home => &self.home,
            Market::Draw => &self.draw,
            Market::Away => &self.away,
        }
    }

    /// Pairs of (market, value) in home, draw, away order
    pub fn iter(&self) -> impl Iterator<Item = (Market, &T)> {
        Market::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    pub fn map<U, F: FnMut(&T) -> U>(&self, mut f: F) -> Outcomes<U> {
        Outcomes {
            home: f(&self.home),
            draw: f(&self.draw),
            away: f(&self.away),
        }
    }

    /// Fallible map, stopping at the first market that fails
    pub fn try_map<U, E, F>(&self, mut f: F) -> Result<Outcomes<U>, E>
    where
        F: FnMut(Market, &T) -> Result<U, E>,
    {
        Ok(Outcomes {
            home: f(Market::Home, &self.home)?,
            draw: f(Market::Draw, &self.draw)?,
            away: f(Market::Away, &self.away)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_order_is_home_draw_away() {
        let o = Outcomes::new(1, 2, 3);
        let order: Vec<(Market, i32)> = o.iter().map(|(m, v)| (m, *v)).collect();
        assert_eq!(
            order,
            vec![(Market::Home, 1), (Market::Draw, 2), (Market::Away, 3)]
        );
    }

    #[test]
    fn test_try_map_reports_failing_market() {
        let o = Outcomes::new(1.0, 0.0, 2.0);
        let res: Result<Outcomes<f64>, Market> =
            o.try_map(|m, v| if *v > 0.0 { Ok(1.0 / v) } else { Err(m) });
        assert_eq!(res.unwrap_err(), Market::Draw);
    }

    #[test]
    fn test_market_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Market::Away).unwrap(), "\"away\"");
    }
}
