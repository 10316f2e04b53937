//! # Callback API
//!
//! HTTP endpoints served by the temporary local server during the PKCE
//! login ([`crate::spotify::auth::authorize_pkce`]).
//!
//! - [`callback`] - receives the authorization code from the accounts
//!   service, exchanges it together with the stored code verifier and hands
//!   the token back through the shared state.
//! - [`health`] - liveness probe reporting name and version.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use sporlkit::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
