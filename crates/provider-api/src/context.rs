use std::sync::atomic::{AtomicU64, Ordering};

/// Inputs handed to a backend for a single ranked read.
///
/// Besides the query text the context carries the generation that issued the
/// read and a view of the provider's latest generation, so long-running
/// backends can notice that a newer query superseded them and stop early.
/// Cancellation keyed on text alone cannot tell two identical queries apart;
/// the generation can.
#[derive(Clone, Copy)]
pub struct ReadContext<'a> {
    text: &'a str,
    generation: u64,
    latest_generation: &'a AtomicU64,
}

impl<'a> ReadContext<'a> {
    /// Create a context for a read issued by query `generation`.
    #[must_use]
    pub fn new(text: &'a str, generation: u64, latest_generation: &'a AtomicU64) -> Self {
        Self {
            text,
            generation,
            latest_generation,
        }
    }

    /// Raw query text as typed by the user.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Generation of the query that issued this read.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a newer query has been issued since this read started.
    #[must_use]
    pub fn is_superseded(&self) -> bool {
        self.latest_generation.load(Ordering::Acquire) != self.generation
    }
}

impl std::fmt::Debug for ReadContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadContext")
            .field("text", &self.text)
            .field("generation", &self.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_notices_newer_generation() {
        let latest = AtomicU64::new(3);
        let context = ReadContext::new("moz", 3, &latest);
        assert!(!context.is_superseded());

        latest.store(4, Ordering::Release);
        assert!(context.is_superseded());
        assert_eq!(context.text(), "moz");
        assert_eq!(context.generation(), 3);
    }
}
