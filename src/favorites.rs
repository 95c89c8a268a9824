//! Locally persisted favorites collection.
//!
//! The collection is hydrated from storage lazily, on the first call to any
//! operation, and exactly once per store instance even if that load fails.
//! Each mutation rewrites the whole collection under a single storage key
//! before returning.

use crate::config;
use crate::diagnostics::{DiagnosticEvent, DiagnosticSink};
use crate::error::{Result, TcgError};
use crate::models::{CardRecord, FavoriteEntry};
use crate::storage::KeyValueStore;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Lifecycle of the in-memory collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    /// Storage has not been read yet.
    Uninitialized,
    /// The one load attempt is in progress.
    Hydrating,
    /// The load was attempted; memory is authoritative from here on.
    Ready,
}

/// Owns the favorites collection and keeps its storage copy in sync.
///
/// At most one entry exists per card id, and entries keep insertion order.
/// Storage failures never reach the caller: a failed load starts from an
/// empty collection and a failed write keeps the in-memory change. Both are
/// reported to the [`DiagnosticSink`].
///
/// Methods take `&mut self`, so a single store cannot be mutated
/// concurrently. Callers sharing a store across tasks must serialize access.
pub struct FavoritesStore<S: KeyValueStore> {
    storage: S,
    key: String,
    entries: Vec<FavoriteEntry>,
    state: Hydration,
    sink: Arc<dyn DiagnosticSink>,
}

impl<S: KeyValueStore> fmt::Debug for FavoritesStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("key", &self.key)
            .field("state", &self.state)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Create a store persisting under [`config::FAVORITES_KEY`].
    pub fn new(storage: S, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self::with_key(storage, config::FAVORITES_KEY, sink)
    }

    /// Create a store persisting under a custom key.
    pub fn with_key(storage: S, key: &str, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            storage,
            key: key.to_string(),
            entries: Vec::new(),
            state: Hydration::Uninitialized,
            sink,
        }
    }

    pub fn state(&self) -> Hydration {
        self.state
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The storage backend, e.g. to inspect what has been persisted.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    // -- Queries -----------------------------------------------------------

    /// All favorites in insertion order.
    pub fn list(&mut self) -> &[FavoriteEntry] {
        self.ensure_ready();
        &self.entries
    }

    pub fn is_favorite(&mut self, id: &str) -> bool {
        self.ensure_ready();
        self.position(id).is_some()
    }

    pub fn get(&mut self, id: &str) -> Option<&FavoriteEntry> {
        self.ensure_ready();
        self.entries.iter().find(|e| e.card.id == id)
    }

    pub fn len(&mut self) -> usize {
        self.ensure_ready();
        self.entries.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    // -- Mutations ---------------------------------------------------------

    /// Favorite a card with empty notes, condition and price.
    ///
    /// Does nothing, and writes nothing, if the card is already a favorite.
    /// Returns whether an entry was added.
    pub fn add(&mut self, card: CardRecord) -> bool {
        self.ensure_ready();
        if self.position(&card.id).is_some() {
            return false;
        }
        log::info!("Adding favorite {} ({})", card.id, card.name);
        self.entries.push(FavoriteEntry::new(card));
        self.persist();
        true
    }

    /// Remove the favorite for `id`. Returns whether an entry was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        self.ensure_ready();
        let Some(index) = self.position(id) else {
            return false;
        };
        self.entries.remove(index);
        log::info!("Removed favorite {}", id);
        self.persist();
        true
    }

    /// Replace the stored entry whose card id matches `entry`'s, keeping its
    /// position. This is the only way to change notes, condition or price.
    ///
    /// Does nothing if no such entry exists. Returns whether an entry was
    /// replaced.
    pub fn update(&mut self, entry: FavoriteEntry) -> bool {
        self.ensure_ready();
        let Some(index) = self.position(entry.id()) else {
            return false;
        };
        log::debug!("Updating favorite {}", entry.id());
        self.entries[index] = entry;
        self.persist();
        true
    }

    // -- Hydration and persistence -----------------------------------------

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.card.id == id)
    }

    fn ensure_ready(&mut self) {
        if self.state != Hydration::Uninitialized {
            return;
        }
        self.state = Hydration::Hydrating;
        self.entries = match self.load() {
            Ok(entries) => {
                log::info!("Loaded {} favorites from '{}'", entries.len(), self.key);
                entries
            }
            Err(e) => {
                self.sink.record(&DiagnosticEvent::HydrationFailed {
                    error: e.to_string(),
                });
                Vec::new()
            }
        };
        self.state = Hydration::Ready;
    }

    /// Read and decode the stored collection.
    ///
    /// A missing key, blank value or JSON `null` is an empty collection.
    /// Duplicate ids keep their first occurrence.
    fn load(&self) -> Result<Vec<FavoriteEntry>> {
        let raw = match self.storage.read(&self.key)? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(Vec::new()),
        };

        let decoded: Option<Vec<FavoriteEntry>> = serde_json::from_str(&raw)?;
        let decoded = decoded.unwrap_or_default();

        let total = decoded.len();
        let mut seen = HashSet::new();
        let entries: Vec<FavoriteEntry> = decoded
            .into_iter()
            .filter(|e| seen.insert(e.card.id.clone()))
            .collect();
        if entries.len() != total {
            log::warn!(
                "Dropped {} duplicate favorites from '{}'",
                total - entries.len(),
                self.key
            );
        }
        Ok(entries)
    }

    /// Write the full collection back. A failure is reported, not rolled back.
    fn persist(&mut self) {
        let result = serde_json::to_string(&self.entries)
            .map_err(TcgError::from)
            .and_then(|json| self.storage.write(&self.key, &json));

        if let Err(e) = result {
            self.sink.record(&DiagnosticEvent::PersistFailed {
                error: e.to_string(),
            });
        }
    }
}
