use std::sync::Arc;

use super::{PageOptions, Shared, require_id};
use crate::{
    error::Res,
    fetcher::Request,
    model::{Playlist, User},
};

#[derive(Clone)]
pub struct UserManager {
    shared: Arc<Shared>,
}

impl UserManager {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    pub async fn get(&self, id: &str, force: bool) -> Res<Option<Arc<User>>> {
        let request = Request::get(format!("/users/{}", id));
        self.shared.get(id, force, request).await
    }

    /// Profile of the user owning the token.
    ///
    /// The id is not known up front, so this always fetches; the result is
    /// cached under the returned id.
    pub async fn me(&self) -> Res<Option<Arc<User>>> {
        match self.shared.fetch(Request::get("/me")).await? {
            Some(value) if !value.is_null() => self.shared.materialize(value).map(Some),
            _ => Ok(None),
        }
    }

    /// One page of the user's public playlists (simplified).
    pub async fn get_playlists(&self, id: &str, page: &PageOptions) -> Res<Vec<Arc<Playlist>>> {
        require_id(id, "user")?;
        let request = Request::get(format!("/users/{}/playlists", id));
        self.shared.list(request, page, &["items"]).await
    }
}
