use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Default prefix of export file names (`trading-journal-<date>.json`).
pub const DEFAULT_EXPORT_PREFIX: &str = "trading-journal";

/// Configuration of a [`Journal`](crate::journal::Journal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Prefix of export file names.
    pub export_prefix: String,

    /// Seed the journal with the demo trades on construction.
    pub seed_sample_trades: bool,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
            seed_sample_trades: false,
        }
    }
}

impl JournalConfig {
    pub fn with_export_prefix(self, prefix: impl Into<String>) -> Self {
        Self {
            export_prefix: prefix.into(),
            ..self
        }
    }

    pub fn with_sample_trades(self, seed: bool) -> Self {
        Self {
            seed_sample_trades: seed,
            ..self
        }
    }
}

// ================================================================================================
// Preset Journal Configurations
// ================================================================================================

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
    IntoStaticStr,
    EnumCount,
)]
#[strum(serialize_all = "snake_case")]
pub enum JournalPreset {
    /// An empty journal with default export naming.
    Empty,

    /// **Demo journal.**
    ///
    /// Seeded with three trades: AAPL closed at +525.00, TSLA closed at
    /// −212.50 and an open MSFT position.
    Demo,
}

impl From<JournalPreset> for JournalConfig {
    fn from(preset: JournalPreset) -> Self {
        match preset {
            JournalPreset::Empty => JournalConfig::default(),
            JournalPreset::Demo => JournalConfig::default().with_sample_trades(true),
        }
    }
}
