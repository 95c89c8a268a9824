//! Pokemon TCG SDK for Rust.
//!
//! Two independent components behind one entry point:
//!
//! - [`CatalogClient`] searches the remote card catalog and looks up single
//!   cards. It is fail-soft: failures come back as empty or absent results.
//! - [`FavoritesStore`] keeps the user's favorited cards, with notes,
//!   condition and price, and persists them to key-value storage after every
//!   change.
//!
//! # Quick start
//!
//! ```no_run
//! use pokemontcg_sdk::PokemonTcgSdk;
//!
//! let mut sdk = PokemonTcgSdk::builder().build().unwrap();
//!
//! let cards = sdk.catalog().search("pikachu", 1, 20);
//! if let Some(card) = cards.into_iter().next() {
//!     sdk.favorites_mut().add(card);
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod favorites;
pub mod models;
pub mod storage;

#[cfg(feature = "async")]
pub use async_client::AsyncPokemonTcgSdk;
pub use catalog::CatalogClient;
pub use diagnostics::{DiagnosticEvent, DiagnosticSink, LogSink};
pub use error::{Result, TcgError};
pub use favorites::{FavoritesStore, Hydration};
pub use models::{CardImages, CardRecord, FavoriteEntry, SearchResult};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Favorites store over whichever backend the SDK was built with.
pub type SdkFavorites = FavoritesStore<Box<dyn KeyValueStore>>;

// ---------------------------------------------------------------------------
// PokemonTcgSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`PokemonTcgSdk`] instance.
///
/// Use [`PokemonTcgSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](PokemonTcgSdkBuilder::build).
pub struct PokemonTcgSdkBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    storage_dir: Option<PathBuf>,
    storage: Option<Box<dyn KeyValueStore>>,
    sink: Option<Arc<dyn DiagnosticSink>>,
}

impl Default for PokemonTcgSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: config::API_BASE.to_string(),
            api_key: None,
            timeout: config::DEFAULT_TIMEOUT,
            storage_dir: None,
            storage: None,
            sink: None,
        }
    }
}

impl PokemonTcgSdkBuilder {
    /// Point the catalog client at a different API root.
    ///
    /// Defaults to [`config::API_BASE`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key sent with every catalog request.
    ///
    /// If not set, `POKEMONTCG_API_KEY` is read from the environment. With
    /// neither, requests go out without a key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the per-request HTTP timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Persist favorites as files under `path`.
    ///
    /// If neither this nor [`storage`](Self::storage) is set, the platform
    /// data directory is used (e.g. `~/.local/share/pokemontcg-sdk` on Linux).
    pub fn storage_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Persist favorites to a custom backend. Takes precedence over
    /// [`storage_dir`](Self::storage_dir).
    pub fn storage(mut self, storage: impl KeyValueStore + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    /// Route absorbed failures to a custom sink instead of the log.
    pub fn diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build the SDK.
    ///
    /// Creates the storage directory if needed but does not read favorites
    /// or contact the API; both happen lazily on first use.
    pub fn build(self) -> Result<PokemonTcgSdk> {
        let sink = self.sink.unwrap_or_else(|| Arc::new(LogSink));
        let api_key = self.api_key.or_else(config::api_key_from_env);

        let catalog = CatalogClient::new(
            &self.base_url,
            api_key.as_deref(),
            self.timeout,
            Arc::clone(&sink),
        )?;

        let storage: Box<dyn KeyValueStore> = match self.storage {
            Some(storage) => storage,
            None => {
                let dir = self.storage_dir.unwrap_or_else(config::default_storage_dir);
                Box::new(FileStore::new(dir)?)
            }
        };

        Ok(PokemonTcgSdk {
            catalog,
            favorites: FavoritesStore::new(storage, sink),
        })
    }
}

// ---------------------------------------------------------------------------
// PokemonTcgSdk
// ---------------------------------------------------------------------------

/// The main entry point: owns one [`CatalogClient`] and one favorites store.
///
/// The two never call each other; callers fetch cards from the catalog and
/// hand them to the store.
pub struct PokemonTcgSdk {
    catalog: CatalogClient,
    favorites: SdkFavorites,
}

impl PokemonTcgSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> PokemonTcgSdkBuilder {
        PokemonTcgSdkBuilder::default()
    }

    /// Access the catalog client.
    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// Read-only view of the favorites store.
    ///
    /// Only the non-hydrating accessors (`state`, `key`, `storage`) are
    /// reachable through this; listing and mutating go through
    /// [`favorites_mut`](Self::favorites_mut).
    pub fn favorites(&self) -> &SdkFavorites {
        &self.favorites
    }

    /// Mutable access to the favorites store.
    pub fn favorites_mut(&mut self) -> &mut SdkFavorites {
        &mut self.favorites
    }

    /// Consume the SDK and release all resources.
    pub fn close(self) {
        drop(self);
    }
}

impl fmt::Display for PokemonTcgSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PokemonTcgSdk(base_url={}, favorites_key={}, hydration={:?})",
            self.catalog.base_url(),
            self.favorites().key(),
            self.favorites().state()
        )
    }
}
