use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
    error::TradeError,
    trade::{StatusKind, Trade},
};

/// Status predicate of a [`TradeQuery`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// **Default.** No status filtering is applied.
    #[default]
    All,
    Open,
    Closed,
}

impl StatusFilter {
    fn matches(&self, kind: StatusKind) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Open => kind == StatusKind::Open,
            StatusFilter::Closed => kind == StatusKind::Closed,
        }
    }
}

/// Strategy predicate of a [`TradeQuery`].
///
/// `Only` is an exact, case-sensitive match. Trades without a strategy never match it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyFilter {
    #[default]
    All,
    Only(String),
}

impl StrategyFilter {
    fn matches(&self, strategy: Option<&str>) -> bool {
        match self {
            StrategyFilter::All => true,
            StrategyFilter::Only(wanted) => strategy == Some(wanted.as_str()),
        }
    }
}

impl FromStr for StrategyFilter {
    type Err = std::convert::Infallible;

    /// `"all"` disables the predicate; anything else is a literal strategy name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "all" => StrategyFilter::All,
            other => StrategyFilter::Only(other.to_string()),
        })
    }
}

/// Filters applied to the trade list.
///
/// # Usage
/// Every predicate defaults to its disabled state, so `TradeQuery::default()`
/// matches every trade. Active predicates are combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeQuery {
    /// Case-insensitive substring matched against symbol, notes and strategy.
    ///
    /// A trade matches if ANY of the three contains it. Empty disables the predicate.
    pub search: String,
    pub status: StatusFilter,
    pub strategy: StrategyFilter,
}

impl TradeQuery {
    /// Builds a query from the raw values of the search box and the two dropdowns.
    pub fn parse(search: &str, status: &str, strategy: &str) -> Result<Self, TradeError> {
        Ok(Self {
            search: search.to_string(),
            status: StatusFilter::from_str(status)?,
            strategy: match StrategyFilter::from_str(strategy) {
                Ok(filter) => filter,
                Err(never) => match never {},
            },
        })
    }

    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self
        }
    }

    pub fn with_status(self, status: StatusFilter) -> Self {
        Self { status, ..self }
    }

    pub fn with_strategy(self, strategy: impl Into<String>) -> Self {
        Self {
            strategy: StrategyFilter::Only(strategy.into()),
            ..self
        }
    }

    /// Returns true if no predicate is active.
    pub fn is_unrestricted(&self) -> bool {
        self.search.is_empty()
            && self.status == StatusFilter::All
            && self.strategy == StrategyFilter::All
    }

    pub fn matches(&self, trade: &Trade) -> bool {
        self.matches_search(trade)
            && self.status.matches(trade.status_kind())
            && self.strategy.matches(trade.strategy())
    }

    fn matches_search(&self, trade: &Trade) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        let contains = |field: Option<&str>| {
            field.is_some_and(|value| value.to_lowercase().contains(&needle))
        };
        contains(Some(trade.symbol().as_str()))
            || contains(trade.notes())
            || contains(trade.strategy())
    }
}

/// Returns the trades matching `query`, preserving their relative order.
///
/// Recomputed on every call.
pub fn filter<'a>(trades: &'a [Trade], query: &TradeQuery) -> Vec<&'a Trade> {
    trades.iter().filter(|t| query.matches(t)).collect()
}

/// Distinct non-empty strategies in first-seen order.
pub fn strategies(trades: &[Trade]) -> Vec<&str> {
    trades.iter().filter_map(Trade::strategy).unique().collect()
}

/// "Showing `shown` of `total` trades".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSummary {
    pub shown: usize,
    pub total: usize,
}

impl FilterSummary {
    pub fn new(trades: &[Trade], query: &TradeQuery) -> Self {
        Self {
            shown: trades.iter().filter(|t| query.matches(t)).count(),
            total: trades.len(),
        }
    }
}
