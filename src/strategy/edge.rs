use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::{Market, Outcomes};

/// Per-market edges and the best candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeReport {
    /// Percent, floored at 0
    pub edges: Outcomes<Decimal>,
    pub best_market: Market,
    pub best_edge: Decimal,
}

/// Compares model fair odds against bookmaker quotes
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeEvaluator;

impl EdgeEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Percentage by which `fair` exceeds `quoted`, 0 when it does not
    pub fn edge(fair: Decimal, quoted: Decimal) -> Decimal {
        if quoted <= Decimal::ZERO || fair <= quoted {
            return Decimal::ZERO;
        }
        ((fair - quoted) / quoted * dec!(100)).round_dp(2)
    }

    pub fn evaluate(&self, fair: &Outcomes<Decimal>, quoted: &Outcomes<Decimal>) -> EdgeReport {
        let edges = Outcomes::new(
            Self::edge(fair.home, quoted.home),
            Self::edge(fair.draw, quoted.draw),
            Self::edge(fair.away, quoted.away),
        );

        let (mut best_market, mut best_edge) = (Market::Home, edges.home);
        for (market, edge) in edges.iter() {
            // Strictly greater: earlier market wins ties
            if *edge > best_edge {
                best_market = market;
                best_edge = *edge;
            }
        }

        EdgeReport {
            edges,
            best_market,
            best_edge,
        }
    }
}
