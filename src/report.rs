use serde::{Deserialize, Serialize};

use crate::{
    report::{
        cumulative_returns::CumulativeReturns,
        grouped::StrategyPerformance,
        monthly_returns::MonthlyReturns,
        trade_statistics::{Overview, WinLoss},
    },
    trade::Trade,
};

pub mod cumulative_returns;
pub mod grouped;
pub mod io;
pub mod monthly_returns;
pub mod trade_statistics;

/// Every derived view of one trade collection.
///
/// Each report is a pure function of the slice it was built from; callers
/// rebuild after every journal mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub overview: Overview,
    pub cumulative_returns: CumulativeReturns,
    pub monthly_returns: MonthlyReturns,
    pub win_loss: WinLoss,
    pub strategy_performance: StrategyPerformance,
}

impl From<&[Trade]> for Analytics {
    fn from(trades: &[Trade]) -> Self {
        Self {
            overview: trades.into(),
            cumulative_returns: trades.into(),
            monthly_returns: trades.into(),
            win_loss: trades.into(),
            strategy_performance: trades.into(),
        }
    }
}
