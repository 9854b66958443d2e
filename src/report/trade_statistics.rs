use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::trade::Trade;

/// Count of winning vs. losing closed trades.
///
/// Break-even trades (P&L exactly zero) are neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLoss {
    pub winning: usize,
    pub losing: usize,
}

impl From<&[Trade]> for WinLoss {
    fn from(trades: &[Trade]) -> Self {
        trades
            .iter()
            .filter_map(Trade::pnl)
            .fold(Self::default(), |mut acc, pnl| {
                if pnl > Decimal::ZERO {
                    acc.winning += 1;
                } else if pnl < Decimal::ZERO {
                    acc.losing += 1;
                }
                acc
            })
    }
}

/// Top-line statistics over the closed trades of a collection.
///
/// Every ratio falls back to zero when its denominator is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_pnl: Decimal,
    pub closed_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Percentage in `[0, 100]`.
    pub win_rate: Decimal,
    pub avg_win: Decimal,
    /// Mean of losing trades, negative unless there are none.
    pub avg_loss: Decimal,
}

impl From<&[Trade]> for Overview {
    fn from(trades: &[Trade]) -> Self {
        let pnls: Vec<Decimal> = trades.iter().filter_map(Trade::pnl).collect();

        let wins: Vec<Decimal> = pnls.iter().copied().filter(|p| *p > Decimal::ZERO).collect();
        let losses: Vec<Decimal> = pnls.iter().copied().filter(|p| *p < Decimal::ZERO).collect();

        Self {
            total_pnl: total(pnls.iter().copied()),
            closed_trades: pnls.len(),
            winning_trades: wins.len(),
            losing_trades: losses.len(),
            win_rate: percentage(wins.len(), pnls.len()),
            avg_win: mean(&wins),
            avg_loss: mean(&losses),
        }
    }
}

/// `part / whole * 100`, or zero when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(part) / Decimal::from(whole) * Decimal::ONE_HUNDRED
}

/// Sum that saturates at the bounds of `Decimal` instead of overflowing.
pub fn total(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Sum of the absolute realized P&L, `None` if it leaves the range of `Decimal`.
///
/// Bounds every partial sum any report takes over the same trades.
pub fn gross_pnl<'a>(trades: impl IntoIterator<Item = &'a Trade>) -> Option<Decimal> {
    trades
        .into_iter()
        .filter_map(Trade::pnl)
        .try_fold(Decimal::ZERO, |acc, pnl| acc.checked_add(pnl.abs()))
}

fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    total(values.iter().copied()) / Decimal::from(values.len())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{
        data::domain::{Action, Price, Quantity, Symbol, TradeId},
        trade::TradeDraft,
    };

    fn trade(id: &str, entry: Decimal, exit: Option<Decimal>) -> Trade {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let mut draft = TradeDraft::new(
            Symbol::new("QQQ").unwrap(),
            Action::Buy,
            Quantity(10),
            Price(entry),
            date,
        );
        if let Some(exit) = exit {
            draft = draft.closed(Price(exit), date);
        }
        Trade::from_draft(TradeId::from(id), draft).unwrap()
    }

    #[test]
    fn break_even_is_neither_win_nor_loss() {
        let trades = vec![
            trade("1", dec!(10), Some(dec!(12))),
            trade("2", dec!(10), Some(dec!(10))),
            trade("3", dec!(10), Some(dec!(9))),
            trade("4", dec!(10), None),
        ];
        let wl = WinLoss::from(trades.as_slice());
        assert_eq!(wl, WinLoss { winning: 1, losing: 1 });
    }

    #[test]
    fn overview_uses_closed_trades_only() {
        let trades = vec![
            trade("1", dec!(10), Some(dec!(12))),
            trade("2", dec!(10), Some(dec!(14))),
            trade("3", dec!(10), Some(dec!(9))),
            trade("4", dec!(10), Some(dec!(10))),
            trade("5", dec!(10), None),
        ];
        let overview = Overview::from(trades.as_slice());
        assert_eq!(overview.closed_trades, 4);
        assert_eq!(overview.total_pnl, dec!(50));
        assert_eq!(overview.win_rate, dec!(50));
        assert_eq!(overview.avg_win, dec!(30));
        assert_eq!(overview.avg_loss, dec!(-10));
    }

    #[test]
    fn empty_overview_is_all_zero() {
        let trades = vec![trade("1", dec!(10), None)];
        assert_eq!(Overview::from(trades.as_slice()), Overview::default());
    }

    #[test]
    fn sums_near_the_decimal_bound_do_not_panic() {
        let big = Decimal::MAX / dec!(10) * dec!(6);
        let trades = vec![
            trade("1", dec!(0), Some(big / dec!(10))),
            trade("2", dec!(0), Some(big / dec!(10))),
        ];
        assert_eq!(gross_pnl(&trades), None);
        assert_eq!(Overview::from(trades.as_slice()).total_pnl, Decimal::MAX);
    }

    #[test]
    fn gross_pnl_counts_losses_at_face_value() {
        let trades = vec![
            trade("1", dec!(10), Some(dec!(12))),
            trade("2", dec!(10), Some(dec!(9))),
            trade("3", dec!(10), None),
        ];
        assert_eq!(gross_pnl(&trades), Some(dec!(30)));
    }

    #[test]
    fn percentage_of_nothing_is_zero() {
        assert_eq!(percentage(0, 0), Decimal::ZERO);
        assert_eq!(percentage(1, 3).round_dp(2), dec!(33.33));
    }
}
