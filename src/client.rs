//! Composition root.
//!
//! A [`Client`] owns one [`EntityCache`] and one [`Fetcher`] and hands both
//! to a manager per entity kind. Cached objects live exactly as long as the
//! client; two clients never share entries.

use std::sync::Arc;

use serde_json::Value;

use crate::{
    cache::{CacheSettings, EntityCache},
    config,
    error::Res,
    fetcher::{Fetcher, HttpFetcher, Request},
    managers::{
        AlbumManager, ArtistManager, CategoryManager, EpisodeManager, PlaylistManager,
        Shared, ShowManager, TrackManager, UserManager,
    },
};

/// Entry point of the library.
///
/// ```ignore
/// let client = Client::new(token, CacheSettings::all())?;
/// if let Some(album) = client.albums.get("4aawyAB9vmqN3uQ7FjRGTy", false, None).await? {
///     println!("{} has {} tracks", album.name, album.tracks().len());
/// }
/// ```
pub struct Client {
    token: Option<String>,
    shared: Arc<Shared>,
    pub users: UserManager,
    pub artists: ArtistManager,
    pub tracks: TrackManager,
    pub albums: AlbumManager,
    pub playlists: PlaylistManager,
    pub shows: ShowManager,
    pub episodes: EpisodeManager,
    pub categories: CategoryManager,
}

impl Client {
    /// Client talking to the public Web API with a bearer `token`.
    pub fn new(token: impl Into<String>, settings: CacheSettings) -> Res<Self> {
        let token = token.into();
        let fetcher = HttpFetcher::new(token.clone())?;
        let mut client = Self::with_fetcher(Arc::new(fetcher), settings);
        client.token = Some(token);
        Ok(client)
    }

    /// Like [`Client::new`], with the API url and cache settings read from
    /// the environment (`SPOTIFY_API_URL`, `SPORLKIT_CACHE`).
    pub fn from_env(token: impl Into<String>) -> Res<Self> {
        let token = token.into();
        let fetcher = HttpFetcher::with_base_url(token.clone(), config::spotify_apiurl())?;
        let mut client = Self::with_fetcher(Arc::new(fetcher), config::cache_settings()?);
        client.token = Some(token);
        Ok(client)
    }

    /// Client over an arbitrary transport.
    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>, settings: CacheSettings) -> Self {
        let shared = Arc::new(Shared {
            fetcher,
            cache: EntityCache::new(settings),
        });

        Self {
            token: None,
            users: UserManager::new(Arc::clone(&shared)),
            artists: ArtistManager::new(Arc::clone(&shared)),
            tracks: TrackManager::new(Arc::clone(&shared)),
            albums: AlbumManager::new(Arc::clone(&shared)),
            playlists: PlaylistManager::new(Arc::clone(&shared)),
            shows: ShowManager::new(Arc::clone(&shared)),
            episodes: EpisodeManager::new(Arc::clone(&shared)),
            categories: CategoryManager::new(Arc::clone(&shared)),
            shared,
        }
    }

    /// Bearer token, when the client was built with one.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn cache(&self) -> &EntityCache {
        &self.shared.cache
    }

    pub fn cache_settings(&self) -> &CacheSettings {
        self.shared.cache.settings()
    }

    /// Raw request through the shared fetcher, bypassing the cache.
    pub async fn fetch(&self, request: Request) -> Res<Option<Value>> {
        self.shared.fetcher.fetch(request).await
    }
}
