use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    data::domain::{Action, Price, Quantity, Symbol, Tags},
    error::TradeError,
    trade::{Trade, TradeDraft, non_empty},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw, string-valued contents of the trade entry form.
///
/// Field names follow the wire record so a form can be round-tripped through
/// JSON by a presentation layer. Leaving both exit fields blank records an
/// open trade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradeForm {
    pub symbol: String,
    pub action: String,
    pub quantity: String,
    pub entry_price: String,
    pub exit_price: String,
    pub entry_date: String,
    pub exit_date: String,
    pub strategy: String,
    pub notes: String,
    /// Comma separated labels.
    pub tags: String,
}

impl TradeForm {
    /// Prefills the form for editing an existing trade.
    pub fn from_trade(trade: &Trade) -> Self {
        Self {
            symbol: trade.symbol().to_string(),
            action: trade.action().to_string(),
            quantity: trade.quantity().0.to_string(),
            entry_price: trade.entry_price().to_string(),
            exit_price: trade
                .exit_price()
                .map(|p| p.to_string())
                .unwrap_or_default(),
            entry_date: trade.entry_date().format(DATE_FORMAT).to_string(),
            exit_date: trade
                .exit_date()
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            strategy: trade.strategy().unwrap_or_default().to_string(),
            notes: trade.notes().unwrap_or_default().to_string(),
            tags: trade.tags().join(", "),
        }
    }

    /// Parses the form into a draft.
    ///
    /// Blank `action` defaults to `buy`. Exit price and exit date must be
    /// given together or not at all.
    pub fn parse(&self) -> Result<TradeDraft, TradeError> {
        let symbol = Symbol::new(required("symbol", &self.symbol)?)?;

        let action = match self.action.trim() {
            "" => Action::Buy,
            raw => Action::from_str(raw)?,
        };

        let quantity = required("quantity", &self.quantity)?
            .parse::<u32>()
            .map_err(|source| TradeError::ParseInt {
                field: "quantity",
                source,
            })
            .and_then(Quantity::new)?;

        let entry_price = parse_price("entryPrice", required("entryPrice", &self.entry_price)?)?;
        let entry_date = parse_date("entryDate", required("entryDate", &self.entry_date)?)?;

        let mut draft = TradeDraft::new(symbol, action, quantity, entry_price, entry_date);

        match (self.exit_price.trim(), self.exit_date.trim()) {
            ("", "") => {}
            ("", _) => return Err(TradeError::MissingExitData("exitPrice")),
            (_, "") => return Err(TradeError::MissingExitData("exitDate")),
            (price, date) => {
                draft = draft.closed(
                    parse_price("exitPrice", price)?,
                    parse_date("exitDate", date)?,
                );
            }
        }

        draft.strategy = non_empty(self.strategy.trim().to_string());
        draft.notes = non_empty(self.notes.trim().to_string());
        draft.tags = self
            .tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect::<Tags>();

        Ok(draft)
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, TradeError> {
    match value.trim() {
        "" => Err(TradeError::MissingField(field)),
        v => Ok(v),
    }
}

fn parse_price(field: &'static str, raw: &str) -> Result<Price, TradeError> {
    let value =
        Decimal::from_str(raw).map_err(|source| TradeError::ParseDecimal { field, source })?;
    Price::new(field, value)
}

fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, TradeError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|source| TradeError::ParseDate { field, source })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{data::domain::TradeId, trade::StatusKind};

    fn aapl_form() -> TradeForm {
        TradeForm {
            symbol: "aapl".to_string(),
            action: "buy".to_string(),
            quantity: "100".to_string(),
            entry_price: "150.25".to_string(),
            exit_price: "155.50".to_string(),
            entry_date: "2024-01-15".to_string(),
            exit_date: "2024-01-18".to_string(),
            strategy: "Swing Trading".to_string(),
            notes: String::new(),
            tags: "tech, earnings,".to_string(),
        }
    }

    #[test]
    fn parses_closed_trade() {
        let draft = aapl_form().parse().expect("valid form");
        assert_eq!(draft.symbol.as_str(), "AAPL");
        assert_eq!(draft.quantity, Quantity(100));
        assert!(draft.exit.is_some());
        assert_eq!(draft.notes, None);
        assert_eq!(draft.tags.as_slice(), ["tech", "earnings"]);

        let trade = Trade::from_draft(TradeId::from("1"), draft).unwrap();
        assert_eq!(trade.pnl(), Some(dec!(525.00)));
    }

    #[test]
    fn blank_exit_fields_record_open_trade() {
        let form = TradeForm {
            exit_price: String::new(),
            exit_date: " ".to_string(),
            ..aapl_form()
        };
        let trade = Trade::from_draft(TradeId::from("1"), form.parse().unwrap()).unwrap();
        assert_eq!(trade.status_kind(), StatusKind::Open);
    }

    #[test]
    fn half_filled_exit_is_rejected() {
        let form = TradeForm {
            exit_date: String::new(),
            ..aapl_form()
        };
        assert!(matches!(
            form.parse(),
            Err(TradeError::MissingExitData("exitDate"))
        ));
    }

    #[test]
    fn unparsable_numbers_are_reported_by_field() {
        let form = TradeForm {
            quantity: "ten".to_string(),
            ..aapl_form()
        };
        assert!(matches!(
            form.parse(),
            Err(TradeError::ParseInt {
                field: "quantity",
                ..
            })
        ));

        let form = TradeForm {
            entry_price: String::new(),
            ..aapl_form()
        };
        assert!(matches!(
            form.parse(),
            Err(TradeError::MissingField("entryPrice"))
        ));

        let form = TradeForm {
            quantity: "0".to_string(),
            ..aapl_form()
        };
        assert!(matches!(form.parse(), Err(TradeError::InvalidQuantity(_))));
    }

    #[test]
    fn prefill_round_trips_through_parse() {
        let trade = Trade::from_draft(TradeId::from("7"), aapl_form().parse().unwrap()).unwrap();
        let reparsed = TradeForm::from_trade(&trade).parse().unwrap();
        assert_eq!(reparsed, trade.to_draft());
    }
}
