//! Diagnostic sink for failures the SDK absorbs.
//!
//! Catalog lookups and favorites persistence never return errors to the
//! caller. Instead each absorbed failure is described by a
//! [`DiagnosticEvent`] and handed to the configured [`DiagnosticSink`].

use std::fmt;

/// A failure that was absorbed rather than returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// A card search degraded to an empty page.
    SearchFailed {
        query: String,
        page: u32,
        page_size: u32,
        error: String,
    },
    /// A single-card lookup degraded to absent.
    LookupFailed { id: String, error: String },
    /// Stored favorites could not be read or decoded; the collection starts empty.
    HydrationFailed { error: String },
    /// Favorites could not be written back; memory and storage now differ.
    PersistFailed { error: String },
}

impl fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticEvent::SearchFailed {
                query,
                page,
                page_size,
                error,
            } => write!(
                f,
                "Error searching cards (query={:?}, page={}, pageSize={}): {}",
                query, page, page_size, error
            ),
            DiagnosticEvent::LookupFailed { id, error } => {
                write!(f, "Error getting card by ID {}: {}", id, error)
            }
            DiagnosticEvent::HydrationFailed { error } => {
                write!(f, "Error loading favorites: {}", error)
            }
            DiagnosticEvent::PersistFailed { error } => {
                write!(f, "Error saving favorites: {}", error)
            }
        }
    }
}

/// Receives absorbed failures.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, event: &DiagnosticEvent);
}

/// Default sink: every event becomes a `warn` line through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&self, event: &DiagnosticEvent) {
        log::warn!("{}", event);
    }
}
