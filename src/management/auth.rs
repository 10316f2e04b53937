use std::path::PathBuf;

use chrono::Utc;

use crate::{
    config,
    error::{Error, Res},
    spotify,
    types::Token,
};

/// Seconds before the real expiry at which a token counts as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Keeps the OAuth token on disk and renews it when it is about to expire.
pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager {
            token,
            path: Self::token_path(),
        }
    }

    /// Manager persisting to `path` instead of the data directory.
    pub fn with_path(token: Token, path: impl Into<PathBuf>) -> Self {
        TokenManager {
            token,
            path: path.into(),
        }
    }

    pub async fn load() -> Res<Self> {
        Self::load_from(Self::token_path()).await
    }

    pub async fn load_from(path: impl Into<PathBuf>) -> Res<Self> {
        let path = path.into();
        let content = async_fs::read_to_string(&path).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self { token, path })
    }

    pub async fn persist(&self) -> Res<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Returns an access token that is valid for at least a few minutes,
    /// refreshing and persisting it first if needed.
    pub async fn get_valid_token(&mut self) -> Res<String> {
        if self.is_expired() {
            if self.token.refresh_token.is_empty() {
                return Err(Error::Auth(
                    "token expired and cannot be refreshed, please run sporlkit auth".to_string(),
                ));
            }
            tracing::debug!("access token expired, refreshing");
            self.token = spotify::auth::refresh_token(&self.token.refresh_token).await?;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache").join("token.json")
    }
}
