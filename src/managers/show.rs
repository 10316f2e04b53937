use std::sync::Arc;

use super::{PageOptions, SearchOptions, Shared, require_id};
use crate::{
    error::Res,
    fetcher::Request,
    model::{Episode, Show},
};

#[derive(Clone)]
pub struct ShowManager {
    shared: Arc<Shared>,
}

impl ShowManager {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    pub async fn get(
        &self,
        id: &str,
        force: bool,
        market: Option<&str>,
    ) -> Res<Option<Arc<Show>>> {
        let request = Request::get(format!("/shows/{}", id)).param_opt("market", market);
        self.shared.get(id, force, request).await
    }

    pub async fn get_multiple(&self, ids: &[&str], market: Option<&str>) -> Res<Vec<Arc<Show>>> {
        self.shared.get_multiple(ids, market).await
    }

    pub async fn search(&self, query: &str, options: &SearchOptions) -> Res<Vec<Arc<Show>>> {
        self.shared.search(query, options).await
    }

    /// One page of the show's episodes, always fetched fresh.
    pub async fn get_episodes(&self, id: &str, page: &PageOptions) -> Res<Vec<Arc<Episode>>> {
        require_id(id, "show")?;
        let request = Request::get(format!("/shows/{}/episodes", id));
        self.shared.list(request, page, &["items"]).await
    }
}
