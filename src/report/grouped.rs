use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    data::filter::strategies,
    report::trade_statistics::{percentage, total},
    trade::Trade,
};

/// Rollup of the closed trades tagged with one strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyStats {
    pub strategy: String,
    pub trades: usize,
    pub pnl: Decimal,
    /// Percentage of `trades` with strictly positive P&L; zero when `trades` is zero.
    pub win_rate: Decimal,
}

/// Per-strategy statistics.
///
/// One row per distinct non-empty strategy of the collection, in first-seen
/// order. A strategy used only by open trades still gets a row, with zero
/// trades and a zero win rate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyPerformance {
    rows: Vec<StrategyStats>,
}

impl StrategyPerformance {
    pub fn rows(&self) -> &[StrategyStats] {
        &self.rows
    }

    pub fn get(&self, strategy: &str) -> Option<&StrategyStats> {
        self.rows.iter().find(|r| r.strategy == strategy)
    }
}

impl From<&[Trade]> for StrategyPerformance {
    fn from(trades: &[Trade]) -> Self {
        let rows = strategies(trades)
            .into_iter()
            .map(|strategy| {
                let pnls: Vec<Decimal> = trades
                    .iter()
                    .filter(|t| t.strategy() == Some(strategy))
                    .filter_map(Trade::pnl)
                    .collect();
                let wins = pnls.iter().filter(|p| **p > Decimal::ZERO).count();

                StrategyStats {
                    strategy: strategy.to_string(),
                    trades: pnls.len(),
                    pnl: total(pnls.iter().copied()),
                    win_rate: percentage(wins, pnls.len()),
                }
            })
            .collect();

        Self { rows }
    }
}
