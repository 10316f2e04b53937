use std::{sync::Arc, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config,
    error::{Error, Res},
    server::start_api_server,
    types::{PkceToken, Token},
    utils, warning,
};

/// How long [`authorize_pkce`] waits for the browser round trip.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the OAuth 2.0 authorization-code flow with PKCE.
///
/// 1. Generates a code verifier and its SHA256 challenge
/// 2. Starts the local callback server on `SERVER_ADDRESS`
/// 3. Opens the authorization url in the default browser
/// 4. Waits for the callback handler to exchange the code for a token
///
/// If the browser cannot be opened the url is printed so the user can
/// navigate to it manually.
///
/// # Errors
///
/// [`Error::Config`] when the client id or redirect uri are not configured,
/// [`Error::Auth`] when no token arrived within 60 seconds.
pub async fn authorize_pkce(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Res<Token> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let auth_url = format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        spotify_auth_url = config::spotify_apiauth_url(),
        client_id = config::spotify_client_id()?,
        redirect_uri = config::spotify_redirect_uri()?,
        code_challenge = code_challenge,
        scope = config::spotify_scope().replace(' ', "%20")
    );

    // store verifier before the redirect so the callback can pick it up
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    let server_state = Arc::clone(&shared_state);
    let server = tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state).await;
    server.abort();

    token.ok_or_else(|| Error::Auth("authentication failed or timed out".to_string()))
}

/// Polls the shared state once a second until the callback stored a token
/// or [`CALLBACK_TIMEOUT`] elapsed.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < CALLBACK_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code and its PKCE verifier for a token.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Res<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;

    let res = Client::new()
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?;

    token_from_response(res).await
}

/// Exchanges a refresh token for a fresh access token.
///
/// Spotify may or may not rotate the refresh token; when the response
/// carries none, the old one is kept.
pub async fn refresh_token(refresh_token: &str) -> Res<Token> {
    let client_id = config::spotify_client_id()?;

    let res = Client::new()
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await?;

    let mut token = token_from_response(res).await?;
    if token.refresh_token.is_empty() {
        token.refresh_token = refresh_token.to_string();
    }
    Ok(token)
}

/// Client-credentials flow: an app token without user context.
pub async fn client_credentials(client_id: &str, client_secret: &str) -> Res<Token> {
    let basic = STANDARD.encode(format!("{}:{}", client_id, client_secret));

    let res = Client::new()
        .post(config::spotify_apitoken_url())
        .header("Authorization", format!("Basic {}", basic))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    token_from_response(res).await
}

async fn token_from_response(res: reqwest::Response) -> Res<Token> {
    let status = res.status();
    let json: Value = res.json().await?;

    if !status.is_success() {
        let reason = json["error_description"]
            .as_str()
            .or_else(|| json["error"].as_str())
            .unwrap_or("token request rejected");
        return Err(Error::Auth(format!("{} ({})", reason, status.as_u16())));
    }

    token_from_json(&json)
}

/// Builds a [`Token`] from a token endpoint response body.
pub fn token_from_json(json: &Value) -> Res<Token> {
    let access_token = json["access_token"]
        .as_str()
        .ok_or_else(|| Error::Auth("token response without access_token".to_string()))?;

    Ok(Token {
        access_token: access_token.to_string(),
        refresh_token: json["refresh_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_from_json() {
        let token = token_from_json(&json!({
            "access_token": "BQC",
            "refresh_token": "AQD",
            "scope": "user-read-private",
            "expires_in": 1800
        }))
        .unwrap();

        assert_eq!(token.access_token, "BQC");
        assert_eq!(token.refresh_token, "AQD");
        assert_eq!(token.expires_in, 1800);
        assert!(token.obtained_at > 0);
    }

    #[test]
    fn test_token_from_json_defaults() {
        let token = token_from_json(&json!({ "access_token": "BQC" })).unwrap();
        assert!(token.refresh_token.is_empty());
        assert_eq!(token.expires_in, 3600);
    }

    #[test]
    fn test_token_from_json_requires_access_token() {
        let err = token_from_json(&json!({ "error": "invalid_grant" })).unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
    }
}
