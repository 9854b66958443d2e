use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{
    error::TradeError,
    impl_add_sub_primitive, impl_from_primitive,
};

// ================================================================================================
// Domain Strong Types (NewTypes)
// ================================================================================================

/// Opaque, journal-unique trade identifier.
///
/// Identifiers are assigned once by the [`Journal`](crate::journal::Journal)
/// and never reassigned. Imported documents may carry any string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(pub String);

impl TradeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TradeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TradeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An uppercased ticker symbol (e.g., `AAPL`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Trims and uppercases `raw`. Empty symbols are rejected.
    pub fn new(raw: &str) -> Result<Self, TradeError> {
        let symbol = raw.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(TradeError::EmptySymbol);
        }
        Ok(Self(symbol))
    }

    /// For tickers known to be non-empty and uppercase.
    pub(crate) fn from_static(symbol: &'static str) -> Self {
        Self(symbol.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Symbol {
    type Error = TradeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

/// Represents a price level in the quote currency.
///
/// Prices are exact decimals; journals never round at computation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub Decimal);
impl_from_primitive!(Price, Decimal);
impl_add_sub_primitive!(Price, Decimal);

impl Price {
    /// Builds a price, rejecting negative values. `field` names the input in errors.
    pub fn new(field: &'static str, value: Decimal) -> Result<Self, TradeError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(TradeError::NegativePrice {
                field,
                value: value.to_string(),
            });
        }
        Ok(Self(value))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Number of shares or contracts traded. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(pub u32);
impl_from_primitive!(Quantity, u32);

impl Quantity {
    pub fn new(value: u32) -> Result<Self, TradeError> {
        if value == 0 {
            return Err(TradeError::InvalidQuantity(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }
}

/// Free-text labels attached to a trade. Most trades carry only a handful.
pub type Tags = SmallVec<[String; 4]>;

// ================================================================================================
// Action
// ================================================================================================

/// Direction of the opening order.
#[derive(
    Copy,
    Clone,
    Debug,
    EnumString,
    Display,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    PartialOrd,
    Ord,
    IntoStaticStr,
    EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Sell,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Per-unit price movement in the trade's favor.
    pub fn price_diff(&self, entry: Price, exit: Price) -> Price {
        match self {
            Action::Buy => exit - entry,
            Action::Sell => entry - exit,
        }
    }

    /// Realized profit or loss of a round trip.
    ///
    /// - `Buy`: `(exit - entry) * quantity`
    /// - `Sell`: `(entry - exit) * quantity`
    ///
    /// No rounding is applied. Fails if the product leaves the range of
    /// `Decimal`.
    pub fn calculate_pnl(
        &self,
        entry: Price,
        exit: Price,
        qty: Quantity,
    ) -> Result<Decimal, TradeError> {
        self.price_diff(entry, exit)
            .0
            .checked_mul(qty.as_decimal())
            .ok_or(TradeError::Overflow("pnl"))
    }
}
