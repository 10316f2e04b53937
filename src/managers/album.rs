use std::sync::Arc;

use super::{PageOptions, SearchOptions, Shared, require_id};
use crate::{
    error::Res,
    fetcher::Request,
    model::{Album, Track},
};

/// Albums: lookups, multi-gets, search and track listings.
#[derive(Clone)]
pub struct AlbumManager {
    shared: Arc<Shared>,
}

impl AlbumManager {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// `GET /albums/{id}`, served from the cache unless `force` is set.
    pub async fn get(
        &self,
        id: &str,
        force: bool,
        market: Option<&str>,
    ) -> Res<Option<Arc<Album>>> {
        let request = Request::get(format!("/albums/{}", id)).param_opt("market", market);
        self.shared.get(id, force, request).await
    }

    /// Up to 20 albums in one request.
    pub async fn get_multiple(&self, ids: &[&str], market: Option<&str>) -> Res<Vec<Arc<Album>>> {
        self.shared.get_multiple(ids, market).await
    }

    pub async fn search(&self, query: &str, options: &SearchOptions) -> Res<Vec<Arc<Album>>> {
        self.shared.search(query, options).await
    }

    /// One page of the album's tracks. The tracks are simplified: they carry
    /// no album.
    pub async fn get_tracks(&self, id: &str, page: &PageOptions) -> Res<Vec<Arc<Track>>> {
        require_id(id, "album")?;
        let request = Request::get(format!("/albums/{}/tracks", id));
        self.shared.list(request, page, &["items"]).await
    }
}
