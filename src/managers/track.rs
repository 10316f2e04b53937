use std::sync::Arc;

use super::{SearchOptions, Shared};
use crate::{error::Res, fetcher::Request, model::Track};

#[derive(Clone)]
pub struct TrackManager {
    shared: Arc<Shared>,
}

impl TrackManager {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    pub async fn get(
        &self,
        id: &str,
        force: bool,
        market: Option<&str>,
    ) -> Res<Option<Arc<Track>>> {
        let request = Request::get(format!("/tracks/{}", id)).param_opt("market", market);
        self.shared.get(id, force, request).await
    }

    pub async fn get_multiple(&self, ids: &[&str], market: Option<&str>) -> Res<Vec<Arc<Track>>> {
        self.shared.get_multiple(ids, market).await
    }

    pub async fn search(&self, query: &str, options: &SearchOptions) -> Res<Vec<Arc<Track>>> {
        self.shared.search(query, options).await
    }
}
