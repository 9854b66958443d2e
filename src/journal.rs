use std::{
    collections::HashSet,
    fmt, iter,
    path::{Path, PathBuf},
};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    config::JournalConfig,
    data::{
        domain::TradeId,
        filter::{self, TradeQuery},
    },
    error::{ImportError, JournalResult, TradeError},
    report::{
        Analytics, io,
        trade_statistics::{Overview, gross_pnl},
    },
    trade::{Trade, TradeDraft},
};

mod sample;

pub use sample::sample_trades;

/// Which entry form, if any, is currently shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormState {
    #[default]
    Closed,
    Adding,
    /// An edit session for the given trade. Only this trade can be updated.
    Editing(TradeId),
}

/// A mutation that was applied to the journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JournalEvent {
    Added(TradeId),
    Updated(TradeId),
    Deleted(TradeId),
    Replaced { count: usize },
}

/// Callback invoked after every applied mutation with the fresh overview.
pub type Subscriber = Box<dyn FnMut(&JournalEvent, &Overview) + Send>;

/// The authoritative trade collection.
///
/// The `Journal` owns the trades (most recent first), mediates every
/// mutation, and recomputes the [`Overview`] after each one. Dependent views
/// are notified through subscribers and re-derive themselves from
/// [`Journal::trades`].
pub struct Journal {
    trades: Vec<Trade>,
    overview: Overview,
    form: FormState,
    config: JournalConfig,
    last_issued_id: i64,
    subscribers: Vec<Subscriber>,
}

impl fmt::Debug for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Journal")
            .field("trades", &self.trades.len())
            .field("overview", &self.overview)
            .field("form", &self.form)
            .field("config", &self.config)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new(JournalConfig::default())
    }
}

impl Journal {
    pub fn new(config: JournalConfig) -> Self {
        let trades = if config.seed_sample_trades {
            sample_trades()
        } else {
            Vec::new()
        };

        Self {
            overview: Overview::from(trades.as_slice()),
            trades,
            form: FormState::Closed,
            config,
            last_issued_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// A journal seeded with the demo trades.
    pub fn with_sample_trades() -> Self {
        Self::new(JournalConfig::default().with_sample_trades(true))
    }

    // ============================================================================================
    // Read access
    // ============================================================================================

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn get(&self, id: &TradeId) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Top-line statistics, recomputed after every mutation.
    pub fn overview(&self) -> &Overview {
        &self.overview
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn config(&self) -> &JournalConfig {
        &self.config
    }

    pub fn analytics(&self) -> Analytics {
        Analytics::from(self.trades.as_slice())
    }

    pub fn filtered(&self, query: &TradeQuery) -> Vec<&Trade> {
        filter::filter(&self.trades, query)
    }

    pub fn strategies(&self) -> Vec<&str> {
        filter::strategies(&self.trades)
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&JournalEvent, &Overview) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    // ============================================================================================
    // Form state
    // ============================================================================================

    pub fn open_add_form(&mut self) {
        self.form = FormState::Adding;
    }

    /// Starts an edit session. Returns `None`, leaving the form untouched, if
    /// no trade has this id.
    pub fn begin_edit(&mut self, id: &TradeId) -> Option<&Trade> {
        let idx = self.position(id)?;
        self.form = FormState::Editing(id.clone());
        self.trades.get(idx)
    }

    pub fn close_form(&mut self) {
        self.form = FormState::Closed;
    }

    // ============================================================================================
    // Mutations
    // ============================================================================================

    /// Records a new trade at the top of the journal and closes the form.
    ///
    /// Fails, leaving the journal untouched, if the trade's P&L or the
    /// journal's gross P&L would overflow.
    #[tracing::instrument(skip(self, draft), fields(symbol = %draft.symbol))]
    pub fn add(&mut self, draft: TradeDraft) -> JournalResult<TradeId> {
        let trade = Trade::from_draft(self.next_id(), draft)?;
        ensure_bounded(self.trades.iter().chain(iter::once(&trade)))?;

        let id = trade.id().clone();
        self.trades.insert(0, trade);
        self.form = FormState::Closed;
        self.commit(JournalEvent::Added(id.clone()));
        Ok(id)
    }

    /// Replaces every field of the trade under edit except its id.
    ///
    /// Only applies while an edit session targets `id`; otherwise this is a
    /// silent no-op returning `Ok(None)`. Ends the edit session on success.
    /// A draft whose P&L would overflow is rejected and the session stays open.
    #[tracing::instrument(skip(self, draft), fields(id = %id))]
    pub fn update(&mut self, id: &TradeId, draft: TradeDraft) -> JournalResult<Option<&Trade>> {
        if self.form != FormState::Editing(id.clone()) {
            debug!(form = ?self.form, outcome = "ignored", "Update without matching edit session");
            return Ok(None);
        }

        let Some(idx) = self.position(id) else {
            debug!(outcome = "ignored", "Trade under edit no longer exists");
            self.form = FormState::Closed;
            return Ok(None);
        };

        let mut edited = self.trades[idx].clone();
        edited.replace(draft)?;
        let others = self
            .trades
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, t)| t);
        ensure_bounded(others.chain(iter::once(&edited)))?;

        self.trades[idx] = edited;
        self.form = FormState::Closed;
        self.commit(JournalEvent::Updated(id.clone()));
        Ok(self.trades.get(idx))
    }

    /// Removes a trade. Unknown ids are a no-op.
    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn delete(&mut self, id: &TradeId) -> Option<Trade> {
        let Some(idx) = self.position(id) else {
            debug!(outcome = "ignored", "Delete of unknown trade");
            return None;
        };

        let removed = self.trades.remove(idx);
        if self.form == FormState::Editing(id.clone()) {
            self.form = FormState::Closed;
        }
        self.commit(JournalEvent::Deleted(id.clone()));
        Some(removed)
    }

    /// Replaces the whole collection. Identifiers must be unique and the
    /// gross P&L must stay within the range of `Decimal`.
    #[tracing::instrument(skip(self, trades), fields(count = trades.len()))]
    pub fn replace_all(&mut self, trades: Vec<Trade>) -> JournalResult<usize> {
        let mut seen = HashSet::with_capacity(trades.len());
        if let Some(dup) = trades.iter().find(|t| !seen.insert(t.id())) {
            return Err(ImportError::DuplicateId(dup.id().to_string()).into());
        }
        ensure_bounded(&trades)?;

        let count = trades.len();
        self.trades = trades;
        let stale_edit = matches!(&self.form, FormState::Editing(id) if self.position(id).is_none());
        if stale_edit {
            self.form = FormState::Closed;
        }
        self.commit(JournalEvent::Replaced { count });
        Ok(count)
    }

    // ============================================================================================
    // Import / Export
    // ============================================================================================

    /// Replaces the collection with the trades of a JSON document.
    ///
    /// On any failure (invalid JSON, non-array document, invalid record,
    /// duplicate id) the journal is left untouched and the error is returned
    /// for the caller to surface.
    #[tracing::instrument(skip(self, document), fields(bytes = document.len()))]
    pub fn import_json(&mut self, document: &str) -> JournalResult<usize> {
        let count = io::parse_document(document)
            .and_then(|trades| self.replace_all(trades))
            .inspect_err(|e| warn!(error = %e, "Import Rejected"))?;
        info!(count, "Import Applied");
        Ok(count)
    }

    pub fn export_json(&self) -> JournalResult<String> {
        io::export_json(&self.trades)
    }

    /// File name of an export made on `date`.
    pub fn export_filename(&self, date: NaiveDate) -> String {
        io::export_filename(&self.config.export_prefix, date)
    }

    /// Writes the export made on `date` into `dir`, creating it if missing.
    #[tracing::instrument(skip(self, dir), fields(dir = %dir.as_ref().display()))]
    pub fn export_to_dir(&self, dir: impl AsRef<Path>, date: NaiveDate) -> JournalResult<PathBuf> {
        let path = io::write_export(&self.trades, dir, &self.export_filename(date))?;
        info!(path = %path.display(), count = self.trades.len(), "Export Written");
        Ok(path)
    }

    // ============================================================================================
    // Internals
    // ============================================================================================

    fn position(&self, id: &TradeId) -> Option<usize> {
        self.trades.iter().position(|t| t.id() == id)
    }

    /// Millisecond timestamp, bumped past every id this journal issued and
    /// every id currently stored.
    fn next_id(&mut self) -> TradeId {
        let mut candidate = Utc::now().timestamp_millis().max(self.last_issued_id + 1);
        while self.trades.iter().any(|t| t.id().as_str() == candidate.to_string()) {
            candidate += 1;
        }
        self.last_issued_id = candidate;
        TradeId(candidate.to_string())
    }

    fn commit(&mut self, event: JournalEvent) {
        self.overview = Overview::from(self.trades.as_slice());
        debug!(event = ?event, trades = self.trades.len(), "State Transition Applied");
        for subscriber in &mut self.subscribers {
            subscriber(&event, &self.overview);
        }
    }
}

/// Keeps every report over the collection free of overflow.
fn ensure_bounded<'a>(trades: impl IntoIterator<Item = &'a Trade>) -> Result<(), TradeError> {
    gross_pnl(trades)
        .map(|_| ())
        .ok_or(TradeError::Overflow("gross pnl"))
}
