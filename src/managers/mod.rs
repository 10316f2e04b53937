//! Cache-aware managers, one per entity kind.
//!
//! All of them follow the same flow, implemented once here:
//!
//! ```text
//! get(id, force)
//!   ├─ cached and not forced ──────────────► cached object
//!   └─ fetch
//!        ├─ 404 ───────────────────────────► None (cache untouched)
//!        ├─ error ─────────────────────────► Err
//!        └─ body ─► construct ─► cache ────► object
//! ```
//!
//! Multi-gets, searches and sub-resource listings never read the cache but
//! still write every item they materialize.

mod album;
mod artist;
mod category;
mod episode;
mod playlist;
mod show;
mod track;
mod user;

use std::sync::Arc;

use serde_json::Value;

use crate::{
    cache::EntityCache,
    error::{Error, Res},
    fetcher::{Fetcher, Request},
    model::Entity,
};

pub use album::AlbumManager;
pub use artist::ArtistManager;
pub use category::CategoryManager;
pub use episode::EpisodeManager;
pub use playlist::{NewPlaylist, PlaylistManager};
pub use show::ShowManager;
pub use track::TrackManager;
pub use user::UserManager;

/// Upper bound on ids for the multi-get endpoints.
pub const MAX_MULTIPLE_IDS: usize = 20;

/// State shared by the client and all managers.
pub(crate) struct Shared {
    pub(crate) fetcher: Arc<dyn Fetcher>,
    pub(crate) cache: EntityCache,
}

/// Paging and market options for listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub market: Option<String>,
}

impl PageOptions {
    pub fn limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }

    fn apply(&self, request: Request) -> Request {
        request
            .param_opt("limit", self.limit)
            .param_opt("offset", self.offset)
            .param_opt("market", self.market.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub market: Option<String>,
    /// Set to `"audio"` to include externally hosted audio in results.
    pub include_external: Option<String>,
}

impl SearchOptions {
    pub fn limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }
}

impl Shared {
    async fn fetch(&self, request: Request) -> Res<Option<Value>> {
        self.fetcher.fetch(request).await
    }

    /// Materializes `value`, stores it and warms nested full entities.
    fn materialize<E: Entity>(&self, value: Value) -> Res<Arc<E>> {
        let entity = Arc::new(E::from_value(value)?);
        self.cache.set(Arc::clone(&entity));
        entity.warm(&self.cache);
        Ok(entity)
    }

    fn materialize_all<E: Entity>(&self, values: Vec<Value>) -> Res<Vec<Arc<E>>> {
        values
            .into_iter()
            .filter(|v| !v.is_null())
            .map(|v| self.materialize(v))
            .collect()
    }

    /// Cache-or-fetch lookup of a single entity.
    ///
    /// The result is stored under its own id and, when the API answered with
    /// another id (a track relinked for the requested market), under the
    /// requested id too, so repeated lookups of `id` hit the cache.
    pub(crate) async fn get<E: Entity>(
        &self,
        id: &str,
        force: bool,
        request: Request,
    ) -> Res<Option<Arc<E>>> {
        require_id(id, E::KIND.as_str())?;

        if !force {
            if let Some(hit) = self.cache.get::<E>(id) {
                tracing::debug!(kind = %E::KIND, id, "cache hit");
                return Ok(Some(hit));
            }
            tracing::debug!(kind = %E::KIND, id, "cache miss");
        }

        match self.fetch(request).await? {
            Some(value) if !value.is_null() => {
                let entity = self.materialize::<E>(value)?;
                self.cache.set_alias(id, Arc::clone(&entity));
                Ok(Some(entity))
            }
            _ => {
                tracing::debug!(kind = %E::KIND, id, "not found");
                Ok(None)
            }
        }
    }

    /// `GET /<kind>s?ids=..`; unknown ids come back as `null` and are
    /// skipped.
    pub(crate) async fn get_multiple<E: Entity>(
        &self,
        ids: &[&str],
        market: Option<&str>,
    ) -> Res<Vec<Arc<E>>> {
        if ids.is_empty() || ids.len() > MAX_MULTIPLE_IDS {
            return Err(Error::precondition(format!(
                "between 1 and {} {} ids are required, got {}",
                MAX_MULTIPLE_IDS,
                E::KIND,
                ids.len()
            )));
        }
        for id in ids {
            require_id(id, E::KIND.as_str())?;
        }

        let key = E::KIND.plural();
        let request = Request::get(format!("/{}", key))
            .param("ids", ids.join(","))
            .param_opt("market", market);

        let body = self.fetch(request).await?.unwrap_or(Value::Null);
        self.materialize_all(take_array(body, &[key])?)
    }

    /// `GET /search` for a single kind. Results are never served from the
    /// cache.
    pub(crate) async fn search<E: Entity>(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Res<Vec<Arc<E>>> {
        if query.trim().is_empty() {
            return Err(Error::precondition("search query cannot be empty"));
        }

        let request = Request::get("/search")
            .param("q", query)
            .param("type", E::KIND.as_str())
            .param_opt("limit", options.limit)
            .param_opt("offset", options.offset)
            .param_opt("market", options.market.as_deref())
            .param_opt("include_external", options.include_external.as_deref());

        let body = self.fetch(request).await?.unwrap_or(Value::Null);
        self.materialize_all(take_array(body, &[E::KIND.plural(), "items"])?)
    }

    /// Fetches a listing and materializes the array found at `path`.
    pub(crate) async fn list<E: Entity>(
        &self,
        request: Request,
        page: &PageOptions,
        path: &[&str],
    ) -> Res<Vec<Arc<E>>> {
        let body = self.fetch(page.apply(request)).await?.unwrap_or(Value::Null);
        self.materialize_all(take_array(body, path)?)
    }
}

pub(crate) fn require_id(id: &str, what: &str) -> Res<()> {
    if id.trim().is_empty() {
        return Err(Error::precondition(format!("{} id cannot be empty", what)));
    }
    Ok(())
}

/// Moves the array at `path` out of `body`.
///
/// A `null` body (404) or an explicit `null` on the path yields an empty
/// list. A missing key or a value of the wrong shape is a decode error.
pub(crate) fn take_array(mut body: Value, path: &[&str]) -> Res<Vec<Value>> {
    for key in path {
        body = match body {
            Value::Object(mut map) => map.remove(*key).ok_or_else(|| missing_key(key))?,
            Value::Null => return Ok(Vec::new()),
            other => return Err(shape_error(key, &other)),
        };
    }
    match body {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        other => Err(shape_error(path.last().copied().unwrap_or("body"), &other)),
    }
}

fn missing_key(key: &str) -> Error {
    let message = format!("missing field '{}'", key);
    Error::Decode(<serde_json::Error as serde::de::Error>::custom(message))
}

fn shape_error(key: &str, found: &Value) -> Error {
    let message = format!("expected an object or array at '{}', found {}", key, found);
    Error::Decode(<serde_json::Error as serde::de::Error>::custom(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_take_array_follows_path() {
        let body = json!({ "albums": { "items": [{ "id": "a" }, { "id": "b" }] } });
        let items = take_array(body, &["albums", "items"]).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["id"], "b");
    }

    #[test]
    fn test_take_array_missing_path_is_empty() {
        assert!(
            take_array(json!({ "tracks": null }), &["tracks", "items"])
                .unwrap()
                .is_empty()
        );
        assert!(take_array(Value::Null, &["albums"]).unwrap().is_empty());
    }

    #[test]
    fn test_take_array_missing_key_is_decode_error() {
        let err = take_array(json!({ "unexpected": true }), &["albums"]).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));

        let err = take_array(json!({ "albums": {} }), &["albums", "items"]).unwrap_err();
        assert!(err.to_string().contains("'items'"));
    }

    #[test]
    fn test_take_array_wrong_shape_is_decode_error() {
        let err = take_array(json!({ "albums": 3 }), &["albums"]).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert!(err.is_unexpected());
    }

    #[test]
    fn test_require_id() {
        assert!(require_id("abc", "album").is_ok());
        assert!(matches!(
            require_id("  ", "album"),
            Err(Error::Precondition(_))
        ));
    }
}
