use std::path::PathBuf;
use std::time::Duration;

pub const API_BASE: &str = "https://api.pokemontcg.io/v2";
pub const API_KEY_HEADER: &str = "X-Api-Key";
pub const API_KEY_ENV: &str = "POKEMONTCG_API_KEY";

/// Storage key the favorites blob lives under.
pub const FAVORITES_KEY: &str = "pokemon_favorites";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// API key from the environment, ignoring blank values.
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

pub fn default_storage_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("pokemontcg-sdk")
    } else {
        PathBuf::from(".pokemontcg-sdk")
    }
}
