//! Configuration management.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the local data directory:
//!
//! - Linux: `~/.local/share/sporlkit/.env`
//! - macOS: `~/Library/Application Support/sporlkit/.env`
//! - Windows: `%LOCALAPPDATA%/sporlkit/.env`
//!
//! Variables already set in the environment win over the file. Endpoints
//! fall back to the public Spotify urls; credentials have no default and
//! report [`Error::Config`] when missing.

use std::{env, path::PathBuf};

use crate::{
    cache::CacheSettings,
    error::{Error, Res},
    fetcher::DEFAULT_API_URL,
    utils,
};

pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SCOPE: &str = "user-read-private playlist-read-private";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";

/// Directory holding the `.env` file and the token cache.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporlkit");
    path
}

/// Loads `<data_dir>/.env` into the environment.
///
/// Creates the data directory if needed. A missing file is not an error;
/// a file that exists but cannot be parsed is.
pub async fn load_env() -> Res<()> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir).await?;

    let path = dir.join(".env");
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no .env file");
        return Ok(());
    }

    dotenv::from_path(&path)
        .map_err(|e| Error::Config(format!("cannot load {}: {}", path.display(), e)))?;
    tracing::debug!(path = %path.display(), "loaded .env file");
    Ok(())
}

fn required(key: &str) -> Res<String> {
    env::var(key).map_err(|_| Error::Config(format!("{} must be set", key)))
}

fn or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Address the local OAuth callback server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Application client id (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Res<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Application client secret (`SPOTIFY_API_AUTH_CLIENT_SECRET`), only needed
/// for the client-credentials flow.
pub fn spotify_client_secret() -> Res<String> {
    required("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Redirect uri registered for the application (`SPOTIFY_API_REDIRECT_URI`).
pub fn spotify_redirect_uri() -> Res<String> {
    required("SPOTIFY_API_REDIRECT_URI")
}

pub fn spotify_scope() -> String {
    or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    or_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_apiurl() -> String {
    or_default("SPOTIFY_API_URL", DEFAULT_API_URL)
}

pub fn spotify_apitoken_url() -> String {
    or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Default market for lookups (`SPORLKIT_MARKET`), e.g. `DE`.
pub fn market() -> Option<String> {
    env::var("SPORLKIT_MARKET")
        .ok()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Which entity kinds to cache (`SPORLKIT_CACHE`): a comma separated list of
/// kinds, `all` (the default) or `none`.
pub fn cache_settings() -> Res<CacheSettings> {
    match env::var("SPORLKIT_CACHE") {
        Ok(value) => utils::parse_entity_kinds(&value)
            .map(|kinds| kinds.cache_settings())
            .map_err(|e| Error::Config(format!("SPORLKIT_CACHE: {}", e))),
        Err(_) => Ok(CacheSettings::all()),
    }
}
