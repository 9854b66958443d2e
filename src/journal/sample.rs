use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    data::domain::{Action, Price, Quantity, Symbol, TradeId},
    trade::{Trade, TradeDraft},
};

/// The demo journal: AAPL and TSLA closed, MSFT still open.
///
/// Demo prices are far inside the range of `Decimal`, so no draft is dropped.
pub fn sample_trades() -> Vec<Trade> {
    [
        (
            "1",
            draft("AAPL", 100, Decimal::new(15025, 2), (2024, 1, 15))
                .closed(Price(Decimal::new(15550, 2)), ymd(2024, 1, 18))
                .with_strategy("Swing Trading")
                .with_notes("Strong earnings beat, held through announcement")
                .with_tags(["tech", "earnings"]),
        ),
        (
            "2",
            draft("TSLA", 50, Decimal::new(200, 0), (2024, 1, 20))
                .closed(Price(Decimal::new(19575, 2)), ymd(2024, 1, 22))
                .with_strategy("Momentum")
                .with_notes("Stopped out on market weakness")
                .with_tags(["ev", "momentum"]),
        ),
        (
            "3",
            draft("MSFT", 75, Decimal::new(38050, 2), (2024, 1, 25))
                .with_strategy("Long Term")
                .with_notes("Cloud growth thesis")
                .with_tags(["tech", "cloud"]),
        ),
    ]
    .into_iter()
    .filter_map(|(id, draft)| Trade::from_draft(TradeId::from(id), draft).ok())
    .collect()
}

fn draft(
    symbol: &'static str,
    qty: u32,
    entry: Decimal,
    (y, m, d): (i32, u32, u32),
) -> TradeDraft {
    TradeDraft::new(
        Symbol::from_static(symbol),
        Action::Buy,
        Quantity(qty),
        Price(entry),
        ymd(y, m, d),
    )
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}
