use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    data::domain::{Action, Price, Quantity, Symbol, Tags, TradeId},
    error::TradeError,
    trade::{Closed, Status, StatusKind, Trade, non_empty},
};

/// Flat wire shape of a trade, as exchanged in journal JSON documents.
///
/// Exit fields and `pnl` are present only for closed trades. Absent optional
/// fields are omitted on output. Prices and P&L are JSON numbers carrying the
/// exact decimal digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub id: String,
    pub symbol: String,
    pub action: Action,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub entry_price: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::arbitrary_precision_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub exit_price: Option<Decimal>,
    pub entry_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_date: Option<NaiveDate>,
    #[serde(
        default,
        with = "rust_decimal::serde::arbitrary_precision_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub pnl: Option<Decimal>,
    pub status: StatusKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

impl From<Trade> for TradeRecord {
    fn from(trade: Trade) -> Self {
        let (exit_price, exit_date, pnl) = match &trade.status {
            Status::Open => (None, None, None),
            Status::Closed(c) => (Some(c.exit_price.0), Some(c.exit_date), Some(c.pnl)),
        };

        Self {
            status: trade.status_kind(),
            id: trade.id.0,
            symbol: trade.symbol.into(),
            action: trade.action,
            quantity: trade.quantity.0,
            entry_price: trade.entry_price.0,
            exit_price,
            entry_date: trade.entry_date,
            exit_date,
            pnl,
            strategy: trade.strategy,
            notes: trade.notes,
            tags: trade.tags,
        }
    }
}

impl TryFrom<TradeRecord> for Trade {
    type Error = TradeError;

    /// Validates a wire record.
    ///
    /// P&L is always recomputed from prices and quantity. A stored value that
    /// disagrees is replaced (and logged) rather than trusted.
    fn try_from(r: TradeRecord) -> Result<Self, Self::Error> {
        let symbol = Symbol::new(&r.symbol)?;
        let quantity = Quantity::new(r.quantity)?;
        let entry_price = Price::new("entryPrice", r.entry_price)?;

        let status = match r.status {
            StatusKind::Open => {
                if r.exit_price.is_some() {
                    return Err(TradeError::UnexpectedExitData("exitPrice"));
                }
                if r.exit_date.is_some() {
                    return Err(TradeError::UnexpectedExitData("exitDate"));
                }
                if r.pnl.is_some() {
                    warn!(id = %r.id, "Dropping pnl stored on an open trade");
                }
                Status::Open
            }
            StatusKind::Closed => {
                let exit_price = r
                    .exit_price
                    .ok_or(TradeError::MissingExitData("exitPrice"))
                    .and_then(|p| Price::new("exitPrice", p))?;
                let exit_date = r.exit_date.ok_or(TradeError::MissingExitData("exitDate"))?;
                let pnl = r.action.calculate_pnl(entry_price, exit_price, quantity)?;
                if let Some(stored) = r.pnl.filter(|stored| *stored != pnl) {
                    warn!(
                        id = %r.id,
                        stored = %stored,
                        computed = %pnl,
                        "Stored pnl disagrees with prices, using computed value"
                    );
                }
                Status::Closed(Closed {
                    exit_price,
                    exit_date,
                    pnl,
                })
            }
        };

        Ok(Trade {
            id: TradeId(r.id),
            symbol,
            action: r.action,
            quantity,
            entry_price,
            entry_date: r.entry_date,
            status,
            strategy: r.strategy.and_then(non_empty),
            notes: r.notes.and_then(non_empty),
            tags: r.tags,
        })
    }
}
