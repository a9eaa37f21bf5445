use thiserror::Error;

/// Errors reported by history backends and connection warmers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// The underlying storage could not serve the read.
    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },

    /// The read was abandoned because a newer query superseded it.
    #[error("read for '{query}' was cancelled")]
    Cancelled { query: String },

    /// A speculative connection could not be opened.
    #[error("connection to {url} failed: {reason}")]
    Connection { url: String, reason: String },
}

impl BackendError {
    /// Convenience constructor for [`BackendError::Unavailable`].
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Whether the error only signals that the read was superseded.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Errors raised while building a [`HostFilter`](crate::HostFilter).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostFilterError {
    /// The filter is not an absolute URL.
    #[error("'{input}' is not a valid url: {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL parsed but has nothing to compare hosts against.
    #[error("'{input}' has no host")]
    MissingHost { input: String },
}
