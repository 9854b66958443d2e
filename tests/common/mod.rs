#![allow(dead_code)]

use std::sync::Once;

use chrono::NaiveDate;
use trading_journal::prelude::*;

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// The form a user fills in to record the AAPL swing trade.
pub fn aapl_form() -> TradeForm {
    TradeForm {
        symbol: "aapl".to_string(),
        action: "buy".to_string(),
        quantity: "100".to_string(),
        entry_price: "150.25".to_string(),
        exit_price: "155.50".to_string(),
        entry_date: "2024-01-15".to_string(),
        exit_date: "2024-01-18".to_string(),
        strategy: "Swing Trading".to_string(),
        notes: "Earnings play".to_string(),
        tags: "tech, earnings".to_string(),
    }
}

pub fn setup_journal() -> Journal {
    init_tracing();
    Journal::new(JournalPreset::Demo.into())
}
