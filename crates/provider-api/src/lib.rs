pub mod backend;
pub mod context;
pub mod error;
pub mod host;
pub mod memory;
pub mod records;

pub use backend::{ConnectionWarmer, HistoryBackend, MetadataBackend, RankedBackend};
pub use context::ReadContext;
pub use error::{BackendError, HostFilterError};
pub use host::{HostFilter, host_without_common_prefixes};
pub use memory::{CANCELLATION_HISTORY, InMemoryHistoryStorage, InMemoryMetadataStorage};
pub use records::{DocumentType, HistoryMetadataKey, HistoryMetadataRecord, HistoryRecord};
