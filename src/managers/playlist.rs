use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};

use super::{PageOptions, SearchOptions, Shared, require_id, take_array};
use crate::{
    error::{Error, Res},
    fetcher::Request,
    model::{Playlist, PlaylistTrack},
    wire::{PlaylistTrackObject, SnapshotResponse},
};

/// Maximum number of items per add/remove request.
pub const MAX_ITEMS_PER_REQUEST: usize = 100;

/// Body of a playlist creation request.
#[derive(Debug, Clone, Serialize)]
pub struct NewPlaylist {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

impl NewPlaylist {
    pub fn private(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            public: false,
            collaborative: false,
        }
    }
}

#[derive(Clone)]
pub struct PlaylistManager {
    shared: Arc<Shared>,
}

impl PlaylistManager {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// `GET /playlists/{id}`. Full tracks and episodes among the embedded
    /// items are cached as well.
    pub async fn get(
        &self,
        id: &str,
        force: bool,
        market: Option<&str>,
    ) -> Res<Option<Arc<Playlist>>> {
        let request = Request::get(format!("/playlists/{}", id)).param_opt("market", market);
        self.shared.get(id, force, request).await
    }

    pub async fn search(&self, query: &str, options: &SearchOptions) -> Res<Vec<Arc<Playlist>>> {
        self.shared.search(query, options).await
    }

    /// One page of playlist items, always fetched fresh. Wrapped tracks and
    /// episodes are written to their own caches.
    pub async fn get_tracks(&self, id: &str, page: &PageOptions) -> Res<Vec<PlaylistTrack>> {
        require_id(id, "playlist")?;
        let request = page.apply(Request::get(format!("/playlists/{}/tracks", id)));
        let body = self.shared.fetch(request).await?.unwrap_or(Value::Null);

        take_array(body, &["items"])?
            .into_iter()
            .filter(|v| !v.is_null())
            .map(|v| -> Res<PlaylistTrack> {
                let raw: PlaylistTrackObject = serde_json::from_value(v)?;
                let item = PlaylistTrack::from(raw);
                item.warm(&self.shared.cache);
                Ok(item)
            })
            .collect()
    }

    /// Creates a playlist for `user_id` and caches it.
    pub async fn create(&self, user_id: &str, playlist: &NewPlaylist) -> Res<Arc<Playlist>> {
        require_id(user_id, "user")?;
        let request = Request::post(format!("/users/{}/playlists", user_id))
            .json(serde_json::to_value(playlist)?);

        match self.shared.fetch(request).await? {
            Some(value) if !value.is_null() => self.shared.materialize(value),
            _ => Err(Error::Unexpected {
                status: 404,
                message: format!("user '{}' not found", user_id),
                body: None,
            }),
        }
    }

    /// Adds up to 100 track or episode uris, at `position` or appended.
    /// Returns the new snapshot id.
    pub async fn add_items(
        &self,
        id: &str,
        uris: &[&str],
        position: Option<u32>,
    ) -> Res<String> {
        require_id(id, "playlist")?;
        require_uris(uris)?;

        let mut body = json!({ "uris": uris });
        if let Some(position) = position {
            body["position"] = json!(position);
        }
        let request = Request::post(format!("/playlists/{}/tracks", id)).json(body);
        self.snapshot(request).await
    }

    /// Removes every occurrence of up to 100 uris. Returns the new snapshot
    /// id.
    pub async fn remove_items(
        &self,
        id: &str,
        uris: &[&str],
        snapshot_id: Option<&str>,
    ) -> Res<String> {
        require_id(id, "playlist")?;
        require_uris(uris)?;

        let tracks: Vec<Value> = uris.iter().map(|uri| json!({ "uri": uri })).collect();
        let mut body = json!({ "tracks": tracks });
        if let Some(snapshot_id) = snapshot_id {
            body["snapshot_id"] = json!(snapshot_id);
        }
        let request = Request::delete(format!("/playlists/{}/tracks", id)).json(body);
        self.snapshot(request).await
    }

    async fn snapshot(&self, request: Request) -> Res<String> {
        let path = request.path.clone();
        match self.shared.fetch(request).await? {
            Some(value) if !value.is_null() => {
                let response: SnapshotResponse = serde_json::from_value(value)?;
                Ok(response.snapshot_id)
            }
            _ => Err(Error::Unexpected {
                status: 404,
                message: format!("'{}' not found", path),
                body: None,
            }),
        }
    }
}

fn require_uris(uris: &[&str]) -> Res<()> {
    if uris.is_empty() || uris.len() > MAX_ITEMS_PER_REQUEST {
        return Err(Error::precondition(format!(
            "between 1 and {} uris are required, got {}",
            MAX_ITEMS_PER_REQUEST,
            uris.len()
        )));
    }
    Ok(())
}
