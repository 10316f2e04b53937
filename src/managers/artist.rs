use std::sync::Arc;

use super::{PageOptions, SearchOptions, Shared, require_id};
use crate::{
    error::Res,
    fetcher::Request,
    model::{Album, Artist, Track},
};

#[derive(Clone)]
pub struct ArtistManager {
    shared: Arc<Shared>,
}

impl ArtistManager {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    pub async fn get(&self, id: &str, force: bool) -> Res<Option<Arc<Artist>>> {
        let request = Request::get(format!("/artists/{}", id));
        self.shared.get(id, force, request).await
    }

    pub async fn get_multiple(&self, ids: &[&str]) -> Res<Vec<Arc<Artist>>> {
        self.shared.get_multiple(ids, None).await
    }

    pub async fn search(&self, query: &str, options: &SearchOptions) -> Res<Vec<Arc<Artist>>> {
        self.shared.search(query, options).await
    }

    /// One page of the artist's discography.
    ///
    /// `include_groups` is a comma separated subset of
    /// `album,single,appears_on,compilation`; `None` returns every group.
    pub async fn get_albums(
        &self,
        id: &str,
        page: &PageOptions,
        include_groups: Option<&str>,
    ) -> Res<Vec<Arc<Album>>> {
        require_id(id, "artist")?;
        let request = Request::get(format!("/artists/{}/albums", id))
            .param_opt("include_groups", include_groups);
        self.shared.list(request, page, &["items"]).await
    }

    /// The artist's top tracks in `market`.
    pub async fn get_top_tracks(&self, id: &str, market: &str) -> Res<Vec<Arc<Track>>> {
        require_id(id, "artist")?;
        let request = Request::get(format!("/artists/{}/top-tracks", id)).param("market", market);
        self.shared
            .list(request, &PageOptions::default(), &["tracks"])
            .await
    }

    pub async fn get_related_artists(&self, id: &str) -> Res<Vec<Arc<Artist>>> {
        require_id(id, "artist")?;
        let request = Request::get(format!("/artists/{}/related-artists", id));
        self.shared
            .list(request, &PageOptions::default(), &["artists"])
            .await
    }
}
