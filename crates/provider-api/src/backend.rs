use crate::context::ReadContext;
use crate::error::BackendError;
use crate::records::{HistoryMetadataRecord, HistoryRecord};

/// A storage engine that answers ranked queries over browsing history.
///
/// Implementations are shared between the caller's thread and the fetch
/// workers of every in-flight query, hence the `Send + Sync` bound.
pub trait RankedBackend: Send + Sync {
    /// Row type produced by this backend.
    type Record: Send;

    /// Return up to `limit` records matching [`ReadContext::text`].
    ///
    /// Backends may poll [`ReadContext::is_superseded`] and bail out with
    /// [`BackendError::Cancelled`] once the read is stale.
    fn query_ranked(
        &self,
        context: &ReadContext<'_>,
        limit: usize,
    ) -> Result<Vec<Self::Record>, BackendError>;

    /// Ask the backend to abandon outstanding reads ahead of a read for `text`.
    ///
    /// Best-effort: reads past their cancellable point still complete.
    fn cancel_reads(&self, text: &str);
}

/// Full-text history index. Results come back unsorted.
pub type HistoryBackend = dyn RankedBackend<Record = HistoryRecord>;

/// Visit metadata index. Results come back in relevance order.
pub type MetadataBackend = dyn RankedBackend<Record = HistoryMetadataRecord>;

/// Opens a connection to a likely destination before the user commits to it.
pub trait ConnectionWarmer: Send + Sync {
    /// Start warming a connection to `url`. Must not block the caller.
    ///
    /// Errors and panics are logged by the provider and never fail a query.
    fn prewarm_connection(&self, url: &str) -> Result<(), BackendError>;
}
