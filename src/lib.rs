//! Sporlkit
//!
//! A Spotify Web API client whose lookups go through an in-memory entity
//! cache. Raw payloads are materialized into linked domain objects (an
//! album's tracks, a track's album, a playlist's owner and items) once, and
//! managers serve repeated lookups of the same id from the cache.
//!
//! # Modules
//!
//! - `cache` - Per-kind entity cache and its settings
//! - `client` - The composition root holding cache, transport and managers
//! - `managers` - Cache-aware lookups, searches and listings per entity kind
//! - `model` - Domain objects and their constructors
//! - `wire` - Raw payload shapes
//! - `fetcher` - Transport boundary and its reqwest implementation
//! - `spotify` - Token acquisition (PKCE, refresh, client credentials)
//! - `management` - Token persistence
//! - `api` / `server` - Local OAuth callback server
//! - `cli` - Command implementations of the `sporlkit` binary
//! - `config` - Environment and `.env` configuration
//! - `utils` - PKCE helpers, code images, kind parsing
//!
//! # Example
//!
//! ```ignore
//! use sporlkit::{CacheSettings, Client};
//!
//! #[tokio::main]
//! async fn main() -> sporlkit::Res<()> {
//!     let client = Client::new("BQC...", CacheSettings::all())?;
//!     let album = client.albums.get("4aawyAB9vmqN3uQ7FjRGTy", false, None).await?;
//!     // served from the cache, no request
//!     let again = client.albums.get("4aawyAB9vmqN3uQ7FjRGTy", false, None).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod management;
pub mod managers;
pub mod model;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod wire;

pub use cache::{CacheSettings, EntityCache, EntityKind};
pub use client::Client;
pub use error::{Error, Res};
pub use fetcher::{Fetcher, HttpFetcher, Request};
pub use model::{Entity, Fidelity, Scannable};

/// Prints a status line prefixed with a blue `o`.
///
/// ```ignore
/// info!("Fetching {} album(s)...", ids.len());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a confirmation line prefixed with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red error line and exits with status 1.
///
/// Only for the binary's fatal paths; library code returns [`Error`]
/// instead.
///
/// ```ignore
/// error!("Cannot load token: {}", e);
/// // unreachable
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning line prefixed with a yellow `!`.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
