//! Shared test fixtures for the Pokemon TCG SDK integration tests.
//!
//! Provides sample card payloads, an in-memory store that counts reads and
//! writes and can be told to fail, a sink that records diagnostics, and a
//! helper that drives the blocking catalog client from async tests.

#![allow(dead_code)]

use pokemontcg_sdk::{
    CardImages, CardRecord, CatalogClient, DiagnosticEvent, DiagnosticSink, KeyValueStore,
    Result, TcgError,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEST_API_KEY: &str = "test-api-key";

// ---------------------------------------------------------------------------
// Sample data
// ---------------------------------------------------------------------------

pub fn pikachu_json() -> serde_json::Value {
    serde_json::json!({
        "id": "base1-58",
        "name": "Pikachu",
        "supertype": "Pok\u{e9}mon",
        "subtypes": ["Basic"],
        "hp": "40",
        "types": ["Lightning"],
        "images": {
            "small": "https://images.pokemontcg.io/base1/58.png",
            "large": "https://images.pokemontcg.io/base1/58_hires.png"
        },
        "rarity": "Common"
    })
}

pub fn pikachu_v_json() -> serde_json::Value {
    serde_json::json!({
        "id": "swshp-SWSH061",
        "name": "Pikachu V",
        "supertype": "Pok\u{e9}mon",
        "subtypes": ["Basic", "V"],
        "hp": "190",
        "types": ["Lightning"],
        "images": {
            "small": "https://images.pokemontcg.io/swshp/SWSH061.png",
            "large": "https://images.pokemontcg.io/swshp/SWSH061_hires.png"
        },
        "rarity": "Promo"
    })
}

/// A two-card search page as the API returns it.
pub fn search_page_json() -> serde_json::Value {
    serde_json::json!({
        "data": [pikachu_json(), pikachu_v_json()],
        "page": 1,
        "pageSize": 20,
        "count": 2,
        "totalCount": 2
    })
}

pub fn card(id: &str, name: &str) -> CardRecord {
    CardRecord {
        id: id.to_string(),
        name: name.to_string(),
        supertype: "Pok\u{e9}mon".to_string(),
        subtypes: vec!["Basic".to_string()],
        hp: "60".to_string(),
        types: vec!["Lightning".to_string()],
        images: CardImages {
            small: format!("https://images.pokemontcg.io/{id}.png"),
            large: format!("https://images.pokemontcg.io/{id}_hires.png"),
        },
        rarity: "Common".to_string(),
    }
}

// ---------------------------------------------------------------------------
// CountingStore
// ---------------------------------------------------------------------------

/// In-memory store that counts calls and can simulate backend failures.
#[derive(Default)]
pub struct CountingStore {
    values: HashMap<String, String>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn failing_reads(self) -> Self {
        self.fail_reads.store(true, Ordering::SeqCst);
        self
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Successful writes only.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueStore for CountingStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(TcgError::Storage("read refused".into()));
        }
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TcgError::Storage("disk full".into()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RecordingSink
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, event: &DiagnosticEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

// ---------------------------------------------------------------------------
// Catalog helper
// ---------------------------------------------------------------------------

/// Build a [`CatalogClient`] for `base_url` and run `f` with it on the
/// blocking pool. Returns `f`'s output and the diagnostics it produced.
///
/// The blocking client must be created, used and dropped outside the async
/// context, hence the `spawn_blocking`.
pub async fn with_catalog<F, T>(base_url: String, f: F) -> (T, Vec<DiagnosticEvent>)
where
    F: FnOnce(&CatalogClient) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let sink = Arc::new(RecordingSink::default());
        let client = CatalogClient::new(
            &base_url,
            Some(TEST_API_KEY),
            Duration::from_secs(5),
            sink.clone(),
        )
        .unwrap();
        let out = f(&client);
        (out, sink.events())
    })
    .await
    .unwrap()
}
