//! Reference backends that serve ranked reads from records held in memory.
//!
//! Both stores match the trimmed query case-insensitively against the URL and
//! title of each record. They are useful for fixtures, snapshot files and
//! tests; production backends talk to real storage engines instead.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use tracing::trace;

use crate::backend::RankedBackend;
use crate::context::ReadContext;
use crate::error::BackendError;
use crate::records::{HistoryMetadataRecord, HistoryRecord};

/// Number of cancel requests each store remembers.
pub const CANCELLATION_HISTORY: usize = 16;

/// Bookkeeping shared by both in-memory stores.
#[derive(Debug, Default)]
struct ReadLog {
    queries: AtomicUsize,
    cancellations: Mutex<VecDeque<String>>,
}

impl ReadLog {
    fn record_query(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
    }

    fn record_cancel(&self, text: &str) {
        if let Ok(mut cancellations) = self.cancellations.lock() {
            if cancellations.len() == CANCELLATION_HISTORY {
                cancellations.pop_front();
            }
            cancellations.push_back(text.to_string());
        }
    }

    fn cancellations(&self) -> Vec<String> {
        self.cancellations
            .lock()
            .map(|cancellations| cancellations.iter().cloned().collect())
            .unwrap_or_default()
    }
}

fn replace_records<R>(store: &RwLock<Vec<R>>, records: Vec<R>) -> Result<(), BackendError> {
    let mut current = store
        .write()
        .map_err(|_| BackendError::unavailable("record store lock poisoned"))?;
    *current = records;
    Ok(())
}

fn matches_query(needle: &str, url: &str, title: Option<&str>) -> bool {
    url.to_lowercase().contains(needle)
        || title.is_some_and(|title| title.to_lowercase().contains(needle))
}

fn scan<R, F>(
    records: &RwLock<Vec<R>>,
    context: &ReadContext<'_>,
    limit: usize,
    is_match: F,
) -> Result<Vec<R>, BackendError>
where
    R: Clone,
    F: Fn(&R, &str) -> bool,
{
    if context.is_superseded() {
        return Err(BackendError::Cancelled {
            query: context.text().to_string(),
        });
    }

    let needle = context.text().trim().to_lowercase();
    let records = records
        .read()
        .map_err(|_| BackendError::unavailable("record store lock poisoned"))?;
    let found: Vec<R> = records
        .iter()
        .filter(|record| is_match(record, &needle))
        .take(limit)
        .cloned()
        .collect();
    trace!(query = context.text(), limit, found = found.len(), "in-memory scan");
    Ok(found)
}

/// History index kept in a `Vec`. Results are returned in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStorage {
    records: RwLock<Vec<HistoryRecord>>,
    log: ReadLog,
}

impl InMemoryHistoryStorage {
    #[must_use]
    pub fn new(records: Vec<HistoryRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            log: ReadLog::default(),
        }
    }

    /// Replace the stored records. Reads already scanning keep the old set.
    pub fn replace(&self, records: Vec<HistoryRecord>) -> Result<(), BackendError> {
        replace_records(&self.records, records)
    }

    /// Number of ranked reads served so far.
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.log.queries.load(Ordering::Relaxed)
    }

    /// The most recent [`CANCELLATION_HISTORY`] query texts passed to
    /// [`RankedBackend::cancel_reads`], oldest first.
    #[must_use]
    pub fn cancelled_reads(&self) -> Vec<String> {
        self.log.cancellations()
    }
}

impl RankedBackend for InMemoryHistoryStorage {
    type Record = HistoryRecord;

    fn query_ranked(
        &self,
        context: &ReadContext<'_>,
        limit: usize,
    ) -> Result<Vec<HistoryRecord>, BackendError> {
        self.log.record_query();
        scan(&self.records, context, limit, |record, needle| {
            matches_query(needle, &record.url, record.title.as_deref())
        })
    }

    fn cancel_reads(&self, text: &str) {
        self.log.record_cancel(text);
    }
}

/// Metadata index kept in a `Vec`. Insertion order is the relevance order.
#[derive(Debug, Default)]
pub struct InMemoryMetadataStorage {
    records: RwLock<Vec<HistoryMetadataRecord>>,
    log: ReadLog,
}

impl InMemoryMetadataStorage {
    #[must_use]
    pub fn new(records: Vec<HistoryMetadataRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            log: ReadLog::default(),
        }
    }

    /// Replace the stored records. Reads already scanning keep the old set.
    pub fn replace(&self, records: Vec<HistoryMetadataRecord>) -> Result<(), BackendError> {
        replace_records(&self.records, records)
    }

    /// Number of ranked reads served so far.
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.log.queries.load(Ordering::Relaxed)
    }

    /// The most recent [`CANCELLATION_HISTORY`] query texts passed to
    /// [`RankedBackend::cancel_reads`], oldest first.
    #[must_use]
    pub fn cancelled_reads(&self) -> Vec<String> {
        self.log.cancellations()
    }
}

impl RankedBackend for InMemoryMetadataStorage {
    type Record = HistoryMetadataRecord;

    fn query_ranked(
        &self,
        context: &ReadContext<'_>,
        limit: usize,
    ) -> Result<Vec<HistoryMetadataRecord>, BackendError> {
        self.log.record_query();
        scan(&self.records, context, limit, |record, needle| {
            matches_query(needle, record.url(), record.title.as_deref())
        })
    }

    fn cancel_reads(&self, text: &str) {
        self.log.record_cancel(text);
    }
}
