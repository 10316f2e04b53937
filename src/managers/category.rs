use std::sync::Arc;

use super::{PageOptions, Shared, require_id};
use crate::{
    error::Res,
    fetcher::Request,
    model::{Category, Playlist},
};

#[derive(Clone)]
pub struct CategoryManager {
    shared: Arc<Shared>,
}

impl CategoryManager {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    pub async fn get(&self, id: &str, force: bool) -> Res<Option<Arc<Category>>> {
        let request = Request::get(format!("/browse/categories/{}", id));
        self.shared.get(id, force, request).await
    }

    /// One page of browse categories, localized by `country` and `locale`
    /// when given.
    pub async fn get_all(
        &self,
        page: &PageOptions,
        country: Option<&str>,
        locale: Option<&str>,
    ) -> Res<Vec<Arc<Category>>> {
        let request = Request::get("/browse/categories")
            .param_opt("country", country)
            .param_opt("locale", locale);
        self.shared
            .list(request, page, &["categories", "items"])
            .await
    }

    pub async fn get_playlists(&self, id: &str, page: &PageOptions) -> Res<Vec<Arc<Playlist>>> {
        require_id(id, "category")?;
        let request = Request::get(format!("/browse/categories/{}/playlists", id));
        self.shared
            .list(request, page, &["playlists", "items"])
            .await
    }
}
