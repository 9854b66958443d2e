use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{data::domain::Symbol, trade::Trade};

/// One point of the equity curve.
///
/// `symbol` and `pnl` describe the trade that produced the point (tooltip data).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativePoint {
    pub date: NaiveDate,
    pub symbol: Symbol,
    pub pnl: Decimal,
    pub cumulative: Decimal,
}

/// Running sum of realized P&L, ordered by exit date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativeReturns {
    points: Vec<CumulativePoint>,
}

impl CumulativeReturns {
    pub fn points(&self) -> &[CumulativePoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Final cumulative value, zero for an empty series.
    pub fn total(&self) -> Decimal {
        self.points
            .last()
            .map(|p| p.cumulative)
            .unwrap_or(Decimal::ZERO)
    }
}

impl From<&[Trade]> for CumulativeReturns {
    /// Open trades have no exit date and are skipped. Ties on exit date keep
    /// the input order (stable sort).
    fn from(trades: &[Trade]) -> Self {
        let mut closed = trades
            .iter()
            .filter_map(|t| t.closed().map(|c| (c.exit_date(), t.symbol(), c.pnl())))
            .collect::<Vec<_>>();
        closed.sort_by_key(|(date, _, _)| *date);

        let points = closed
            .into_iter()
            .scan(Decimal::ZERO, |running, (date, symbol, pnl)| {
                *running = running.saturating_add(pnl);
                Some(CumulativePoint {
                    date,
                    symbol: symbol.clone(),
                    pnl,
                    cumulative: *running,
                })
            })
            .collect();

        Self { points }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{
        data::domain::{Action, Price, Quantity, TradeId},
        trade::TradeDraft,
    };

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn closed(
        id: &str,
        symbol: &str,
        exit_date: &str,
        entry: Decimal,
        exit: Decimal,
        qty: u32,
    ) -> Trade {
        let draft = TradeDraft::new(
            Symbol::new(symbol).unwrap(),
            Action::Buy,
            Quantity(qty),
            Price(entry),
            date("2024-01-01"),
        )
        .closed(Price(exit), date(exit_date));
        Trade::from_draft(TradeId::from(id), draft).unwrap()
    }

    #[test]
    fn running_sum_is_ordered_by_exit_date() {
        // Most-recent-first, as the journal stores them.
        let trades = vec![
            closed("3", "NVDA", "2024-01-28", dec!(100), dec!(105.25), 75),
            closed("2", "TSLA", "2024-01-22", dec!(200.00), dec!(195.75), 50),
            closed("1", "AAPL", "2024-01-18", dec!(150.25), dec!(155.50), 100),
        ];

        let series = CumulativeReturns::from(trades.as_slice());
        let cumulative: Vec<_> = series.points().iter().map(|p| p.cumulative).collect();
        assert_eq!(cumulative, [dec!(525), dec!(312.5), dec!(706.25)]);
        assert_eq!(series.points()[0].symbol.as_str(), "AAPL");
        assert_eq!(series.total(), dec!(706.25));
    }

    #[test]
    fn each_point_extends_the_previous_one() {
        let trades = vec![
            closed("1", "A", "2024-02-01", dec!(10), dec!(12), 3),
            closed("2", "B", "2024-01-01", dec!(10), dec!(7), 2),
            closed("3", "C", "2024-03-01", dec!(10), dec!(10), 1),
        ];
        let series = CumulativeReturns::from(trades.as_slice());
        let points = series.points();
        assert_eq!(points[0].cumulative, points[0].pnl);
        for pair in points.windows(2) {
            assert_eq!(pair[1].cumulative, pair[1].pnl + pair[0].cumulative);
        }
    }

    #[test]
    fn ties_keep_input_order_and_open_trades_are_skipped() {
        let open = Trade::from_draft(
            TradeId::from("open"),
            TradeDraft::new(
                Symbol::new("MSFT").unwrap(),
                Action::Buy,
                Quantity(1),
                Price(dec!(1)),
                date("2024-01-01"),
            ),
        )
        .unwrap();
        let trades = vec![
            closed("x", "X", "2024-01-05", dec!(1), dec!(2), 1),
            open,
            closed("y", "Y", "2024-01-05", dec!(1), dec!(3), 1),
        ];
        let series = CumulativeReturns::from(trades.as_slice());
        let symbols: Vec<_> = series.points().iter().map(|p| p.symbol.as_str()).collect();
        assert_eq!(symbols, ["X", "Y"]);
    }

    #[test]
    fn empty_input_yields_empty_series() {
        let empty: &[Trade] = &[];
        let series = CumulativeReturns::from(empty);
        assert!(series.is_empty());
        assert_eq!(series.total(), Decimal::ZERO);
    }
}
