use std::sync::Arc;

use super::{SearchOptions, Shared};
use crate::{error::Res, fetcher::Request, model::Episode};

#[derive(Clone)]
pub struct EpisodeManager {
    shared: Arc<Shared>,
}

impl EpisodeManager {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    pub async fn get(
        &self,
        id: &str,
        force: bool,
        market: Option<&str>,
    ) -> Res<Option<Arc<Episode>>> {
        let request = Request::get(format!("/episodes/{}", id)).param_opt("market", market);
        self.shared.get(id, force, request).await
    }

    pub async fn get_multiple(
        &self,
        ids: &[&str],
        market: Option<&str>,
    ) -> Res<Vec<Arc<Episode>>> {
        self.shared.get_multiple(ids, market).await
    }

    pub async fn search(&self, query: &str, options: &SearchOptions) -> Res<Vec<Arc<Episode>>> {
        self.shared.search(query, options).await
    }
}
