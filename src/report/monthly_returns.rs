use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{report::trade_statistics::total, trade::Trade};

/// Realized P&L of all trades closed in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// Zero-padded `YYYY-MM` of the exit date.
    pub month: String,
    pub pnl: Decimal,
    pub trades: usize,
}

/// Monthly P&L buckets, ascending by month.
///
/// Buckets partition the closed trades: every closed trade (including
/// break-even ones) lands in exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReturns {
    buckets: Vec<MonthlyBucket>,
}

impl MonthlyReturns {
    pub fn buckets(&self) -> &[MonthlyBucket] {
        &self.buckets
    }

    pub fn trade_count(&self) -> usize {
        self.buckets.iter().map(|b| b.trades).sum()
    }

    pub fn total_pnl(&self) -> Decimal {
        total(self.buckets.iter().map(|b| b.pnl))
    }
}

impl From<&[Trade]> for MonthlyReturns {
    fn from(trades: &[Trade]) -> Self {
        // Zero-padded keys sort lexicographically in calendar order.
        let mut by_month: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();
        for closed in trades.iter().filter_map(Trade::closed) {
            let key = closed.exit_date().format("%Y-%m").to_string();
            let entry = by_month.entry(key).or_insert((Decimal::ZERO, 0));
            entry.0 = entry.0.saturating_add(closed.pnl());
            entry.1 += 1;
        }

        let buckets = by_month
            .into_iter()
            .map(|(month, (pnl, trades))| MonthlyBucket { month, pnl, trades })
            .collect();

        Self { buckets }
    }
}
