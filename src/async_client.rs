//! Async wrapper around [`PokemonTcgSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free. The
//! SDK sits behind a [`Mutex`], so concurrent callers are serialized and each
//! favorites mutation observes every earlier one.
//!
//! # Example
//!
//! ```no_run
//! use pokemontcg_sdk::AsyncPokemonTcgSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncPokemonTcgSdk::builder().build().await.unwrap();
//!
//!     let cards = sdk.search("charizard", 1, 20).await.unwrap();
//!     if let Some(card) = cards.into_iter().next() {
//!         sdk.add_favorite(card).await.unwrap();
//!     }
//!
//!     sdk.close().await.unwrap();
//! }
//! ```

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::diagnostics::DiagnosticSink;
use crate::error::{Result, TcgError};
use crate::models::{CardRecord, FavoriteEntry, SearchResult};
use crate::storage::KeyValueStore;
use crate::{PokemonTcgSdk, PokemonTcgSdkBuilder};

// ---------------------------------------------------------------------------
// AsyncPokemonTcgSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncPokemonTcgSdk`] instance.
///
/// Accepts the same options as [`PokemonTcgSdkBuilder`].
#[derive(Default)]
pub struct AsyncPokemonTcgSdkBuilder {
    inner: PokemonTcgSdkBuilder,
}

impl AsyncPokemonTcgSdkBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.base_url(url);
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.inner = self.inner.api_key(key);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    pub fn storage_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.inner = self.inner.storage_dir(path);
        self
    }

    pub fn storage(mut self, storage: impl KeyValueStore + 'static) -> Self {
        self.inner = self.inner.storage(storage);
        self
    }

    pub fn diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.inner = self.inner.diagnostics(sink);
        self
    }

    /// Build the async SDK.
    ///
    /// Construction runs on the blocking thread pool since it creates the
    /// blocking HTTP client and may touch the filesystem.
    pub async fn build(self) -> Result<AsyncPokemonTcgSdk> {
        let inner = self.inner;
        tokio::task::spawn_blocking(move || {
            let sdk = inner.build()?;
            Ok(AsyncPokemonTcgSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| TcgError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncPokemonTcgSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`PokemonTcgSdk`].
///
/// Catalog and favorites operations keep their fail-soft contract; the
/// `Result` returned here only reports a panicked task or poisoned lock.
pub struct AsyncPokemonTcgSdk {
    inner: Arc<Mutex<PokemonTcgSdk>>,
}

impl AsyncPokemonTcgSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncPokemonTcgSdkBuilder {
        AsyncPokemonTcgSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use pokemontcg_sdk::AsyncPokemonTcgSdk;
    /// # async fn example() -> pokemontcg_sdk::Result<()> {
    /// # let sdk = AsyncPokemonTcgSdk::builder().build().await?;
    /// let count = sdk.run(|s| s.favorites_mut().len()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut PokemonTcgSdk) -> T + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = sdk
                .lock()
                .map_err(|_| TcgError::InvalidArgument("SDK lock poisoned".into()))?;
            Ok(f(&mut *guard))
        })
        .await
        .map_err(|e| TcgError::InvalidArgument(format!("Task join error: {e}")))?
    }

    // -- Catalog -------------------------------------------------------------

    pub async fn search(&self, query: &str, page: u32, page_size: u32) -> Result<Vec<CardRecord>> {
        let query = query.to_string();
        self.run(move |s| s.catalog().search(&query, page, page_size))
            .await
    }

    pub async fn search_page(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResult> {
        let query = query.to_string();
        self.run(move |s| s.catalog().search_page(&query, page, page_size))
            .await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<CardRecord>> {
        let id = id.to_string();
        self.run(move |s| s.catalog().get_by_id(&id)).await
    }

    // -- Favorites -----------------------------------------------------------

    /// Snapshot of the favorites collection.
    pub async fn favorites(&self) -> Result<Vec<FavoriteEntry>> {
        self.run(|s| s.favorites_mut().list().to_vec()).await
    }

    pub async fn is_favorite(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        self.run(move |s| s.favorites_mut().is_favorite(&id)).await
    }

    pub async fn add_favorite(&self, card: CardRecord) -> Result<bool> {
        self.run(move |s| s.favorites_mut().add(card)).await
    }

    pub async fn remove_favorite(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        self.run(move |s| s.favorites_mut().remove(&id)).await
    }

    pub async fn update_favorite(&self, entry: FavoriteEntry) -> Result<bool> {
        self.run(move |s| s.favorites_mut().update(entry)).await
    }

    /// Close the SDK, releasing all resources.
    ///
    /// The SDK is dropped on the blocking pool, where shutting down the
    /// blocking HTTP client is allowed.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || drop(self.inner))
            .await
            .map_err(|e| TcgError::InvalidArgument(format!("Task join error: {e}")))
    }
}
