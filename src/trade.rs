use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use crate::{
    data::domain::{Action, Price, Quantity, Symbol, Tags, TradeId},
    error::TradeError,
};

pub mod form;
pub mod record;

pub use form::TradeForm;
pub use record::TradeRecord;

// ================================================================================================
// Status (Typestate as Enum)
// ================================================================================================

/// Discriminant of [`Status`], used for filtering and on the wire.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    EnumCount,
    Display,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Open,
    Closed,
}

/// Realized exit of a trade. Only exists once both exit price and exit date are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Closed {
    exit_price: Price,
    exit_date: NaiveDate,
    pnl: Decimal,
}

impl Closed {
    pub fn exit_price(&self) -> Price {
        self.exit_price
    }

    pub fn exit_date(&self) -> NaiveDate {
        self.exit_date
    }

    pub fn pnl(&self) -> Decimal {
        self.pnl
    }
}

/// Lifecycle state of a trade.
///
/// P&L lives inside `Closed`, so an open trade can never carry one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Open,
    Closed(Closed),
}

impl From<&Status> for StatusKind {
    fn from(status: &Status) -> Self {
        match status {
            Status::Open => StatusKind::Open,
            Status::Closed(_) => StatusKind::Closed,
        }
    }
}

// ================================================================================================
// Draft
// ================================================================================================

/// Exit data supplied when a trade is recorded as closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit {
    pub price: Price,
    pub date: NaiveDate,
}

/// Every field of a trade except its identifier.
///
/// Drafts come from the entry form (see [`TradeForm`]) or are built directly.
/// The journal turns a draft into a [`Trade`] on `add` and `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeDraft {
    pub symbol: Symbol,
    pub action: Action,
    pub quantity: Quantity,
    pub entry_price: Price,
    pub entry_date: NaiveDate,
    pub exit: Option<Exit>,
    pub strategy: Option<String>,
    pub notes: Option<String>,
    pub tags: Tags,
}

impl TradeDraft {
    pub fn new(
        symbol: Symbol,
        action: Action,
        quantity: Quantity,
        entry_price: Price,
        entry_date: NaiveDate,
    ) -> Self {
        Self {
            symbol,
            action,
            quantity,
            entry_price,
            entry_date,
            exit: None,
            strategy: None,
            notes: None,
            tags: Tags::new(),
        }
    }

    pub fn closed(self, exit_price: Price, exit_date: NaiveDate) -> Self {
        Self {
            exit: Some(Exit {
                price: exit_price,
                date: exit_date,
            }),
            ..self
        }
    }

    pub fn with_strategy(self, strategy: impl Into<String>) -> Self {
        Self {
            strategy: non_empty(strategy.into()),
            ..self
        }
    }

    pub fn with_notes(self, notes: impl Into<String>) -> Self {
        Self {
            notes: non_empty(notes.into()),
            ..self
        }
    }

    pub fn with_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            ..self
        }
    }
}

pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

// ================================================================================================
// Trade
// ================================================================================================

/// A journal entry.
///
/// Serializes to the flat [`TradeRecord`] wire shape; deserialization validates
/// the record before a `Trade` exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TradeRecord", into = "TradeRecord")]
pub struct Trade {
    id: TradeId,
    symbol: Symbol,
    action: Action,
    quantity: Quantity,
    entry_price: Price,
    entry_date: NaiveDate,
    status: Status,
    strategy: Option<String>,
    notes: Option<String>,
    tags: Tags,
}

impl Trade {
    /// Builds a trade from a draft, computing P&L when the draft carries exit data.
    pub fn from_draft(id: TradeId, draft: TradeDraft) -> Result<Self, TradeError> {
        let status = match draft.exit {
            Some(exit) => Status::Closed(Closed {
                exit_price: exit.price,
                exit_date: exit.date,
                pnl: draft
                    .action
                    .calculate_pnl(draft.entry_price, exit.price, draft.quantity)?,
            }),
            None => Status::Open,
        };

        Ok(Self {
            id,
            symbol: draft.symbol,
            action: draft.action,
            quantity: draft.quantity,
            entry_price: draft.entry_price,
            entry_date: draft.entry_date,
            status,
            strategy: draft.strategy,
            notes: draft.notes,
            tags: draft.tags,
        })
    }

    /// Replaces every field except the identifier. P&L is recomputed.
    ///
    /// On error the trade is left as it was.
    pub fn replace(&mut self, draft: TradeDraft) -> Result<(), TradeError> {
        *self = Self::from_draft(self.id.clone(), draft)?;
        Ok(())
    }

    /// Recovers the draft this trade was built from (edit-form prefill).
    pub fn to_draft(&self) -> TradeDraft {
        TradeDraft {
            symbol: self.symbol.clone(),
            action: self.action,
            quantity: self.quantity,
            entry_price: self.entry_price,
            entry_date: self.entry_date,
            exit: match &self.status {
                Status::Open => None,
                Status::Closed(c) => Some(Exit {
                    price: c.exit_price,
                    date: c.exit_date,
                }),
            },
            strategy: self.strategy.clone(),
            notes: self.notes.clone(),
            tags: self.tags.clone(),
        }
    }

    pub fn id(&self) -> &TradeId {
        &self.id
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn entry_price(&self) -> Price {
        self.entry_price
    }

    pub fn entry_date(&self) -> NaiveDate {
        self.entry_date
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn status_kind(&self) -> StatusKind {
        (&self.status).into()
    }

    pub fn strategy(&self) -> Option<&str> {
        self.strategy.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn closed(&self) -> Option<&Closed> {
        match &self.status {
            Status::Closed(c) => Some(c),
            Status::Open => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed().is_some()
    }

    /// Realized P&L. `None` while the trade is open.
    pub fn pnl(&self) -> Option<Decimal> {
        self.closed().map(Closed::pnl)
    }

    pub fn exit_price(&self) -> Option<Price> {
        self.closed().map(Closed::exit_price)
    }

    pub fn exit_date(&self) -> Option<NaiveDate> {
        self.closed().map(Closed::exit_date)
    }
}
