//! Address-bar suggestions built from two independently ranked history
//! indexes.
//!
//! [`CombinedHistoryProvider`] queries the visit metadata index and the
//! full-text history index concurrently and merges their answers into one
//! ranked, deduplicated and size-bounded list. Backend implementers only need
//! the traits re-exported from [`histmerge_provider_api`].

pub mod app_dirs;
pub mod error;
pub mod logging;
mod provider;
pub mod suggestion;

pub use error::SuggestionError;
pub use provider::{
	CombinedHistoryProvider, CombinedHistoryProviderBuilder, DEFAULT_COMBINED_SUGGESTION_LIMIT,
	QueryResult, RESULTS_TO_FILTER_SCALE_FACTOR,
};
pub use suggestion::{Suggestion, SuggestionIdentity, SuggestionSource};

pub use histmerge_provider_api as api;
