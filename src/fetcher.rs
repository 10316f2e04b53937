//! Transport boundary.
//!
//! Everything the managers know about HTTP is the [`Fetcher`] trait: send a
//! [`Request`], get back the parsed body, `None` for a 404, or an error for
//! anything else. [`HttpFetcher`] is the reqwest implementation used in
//! production; tests plug in their own.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::error::{Error, Res};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// A request relative to the API base url.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds the parameter only when a value is present.
    pub fn param_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    pub fn header(mut self, key: &str, value: impl ToString) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Value of the first parameter named `key`.
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Performs `request`.
    ///
    /// Returns `Ok(Some(body))` for 2xx responses (`Value::Null` when the
    /// body is empty), `Ok(None)` for 404, and an error otherwise.
    async fn fetch(&self, request: Request) -> Res<Option<Value>>;
}

/// reqwest backed [`Fetcher`] authenticating with a bearer token.
pub struct HttpFetcher {
    http_client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpFetcher {
    pub fn new(token: impl Into<String>) -> Res<Self> {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Res<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: Request) -> Res<Option<Value>> {
        let url = self.url_for(&request.path);
        tracing::debug!(method = %request.method, url = %url, "fetch");
        tracing::trace!(params = ?request.params, "request params");

        let mut builder = self
            .http_client
            .request(request.method, &url)
            .bearer_auth(&self.token)
            .query(&request.params);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(url = %url, "not found");
            return Ok(None);
        }

        let text = response.text().await?;

        if !status.is_success() {
            let body = serde_json::from_str::<Value>(&text).ok();
            let message = body
                .as_ref()
                .and_then(|b| b["error"]["message"].as_str())
                .map(str::to_string)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(Error::Unexpected {
                status: status.as_u16(),
                message,
                body,
            });
        }

        if text.trim().is_empty() {
            return Ok(Some(Value::Null));
        }

        Ok(Some(serde_json::from_str(&text)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_relative_and_absolute_paths() {
        let fetcher = HttpFetcher::with_base_url("token", "http://localhost:8080/v1/").unwrap();
        assert_eq!(fetcher.base_url(), "http://localhost:8080/v1");
        assert_eq!(
            fetcher.url_for("/albums/abc"),
            "http://localhost:8080/v1/albums/abc"
        );
        assert_eq!(
            fetcher.url_for("albums/abc"),
            "http://localhost:8080/v1/albums/abc"
        );
        assert_eq!(
            fetcher.url_for("https://api.spotify.com/v1/me"),
            "https://api.spotify.com/v1/me"
        );
    }

    #[test]
    fn test_request_builder_params() {
        let request = Request::get("/search")
            .param("q", "daft punk")
            .param_opt("market", Some("DE"))
            .param_opt::<u32>("limit", None);

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.param_value("q"), Some("daft punk"));
        assert_eq!(request.param_value("market"), Some("DE"));
        assert_eq!(request.param_value("limit"), None);
    }
}
