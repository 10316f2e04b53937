//! # Spotify accounts service
//!
//! Token acquisition against `accounts.spotify.com`, kept apart from the Web
//! API client in [`crate::client`], which only ever sees a bearer token.
//!
//! ## Flows
//!
//! - **Authorization code with PKCE** ([`auth::authorize_pkce`]): user
//!   context without storing a client secret. A local callback server
//!   ([`crate::server`]) receives the code and exchanges it.
//! - **Refresh** ([`auth::refresh_token`]): renews an expired user token.
//! - **Client credentials** ([`auth::client_credentials`]): app-only token
//!   for catalog lookups; cannot be refreshed.
//!
//! Persisting and renewing tokens across runs is handled by
//! [`crate::management::TokenManager`].

pub mod auth;
