//! In-memory entity cache.
//!
//! One map per entity kind, keyed by Spotify id and holding shared
//! [`Arc`] snapshots. Each kind can be switched off through
//! [`CacheSettings`]; a disabled kind behaves like an always-empty map that
//! silently drops writes.
//!
//! The cache never expires or evicts anything. Entries live as long as the
//! owning [`crate::Client`] unless cleared explicitly.

use std::{collections::HashMap, fmt, str::FromStr, sync::Arc};

use parking_lot::RwLock;

use crate::model::{Album, Artist, Category, Episode, Playlist, Show, Track, User};

/// The kinds of entities the API exposes and the cache can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    User,
    Artist,
    Track,
    Album,
    Playlist,
    Show,
    Episode,
    Category,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::User,
        EntityKind::Artist,
        EntityKind::Track,
        EntityKind::Album,
        EntityKind::Playlist,
        EntityKind::Show,
        EntityKind::Episode,
        EntityKind::Category,
    ];

    /// Singular name, as used in uris and the `type` field of payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Artist => "artist",
            EntityKind::Track => "track",
            EntityKind::Album => "album",
            EntityKind::Playlist => "playlist",
            EntityKind::Show => "show",
            EntityKind::Episode => "episode",
            EntityKind::Category => "category",
        }
    }

    /// Plural name, as used in endpoint paths and multi-get response keys.
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::Artist => "artists",
            EntityKind::Track => "tracks",
            EntityKind::Album => "albums",
            EntityKind::Playlist => "playlists",
            EntityKind::Show => "shows",
            EntityKind::Episode => "episodes",
            EntityKind::Category => "categories",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        EntityKind::ALL
            .into_iter()
            .find(|k| normalized == k.as_str() || normalized == k.plural())
            .ok_or_else(|| format!("unknown entity kind '{}'", s.trim()))
    }
}

/// Per-kind switches deciding which kinds are cached.
///
/// `Default` disables everything; use [`CacheSettings::all`] to opt in to
/// caching for every kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheSettings {
    pub users: bool,
    pub artists: bool,
    pub tracks: bool,
    pub albums: bool,
    pub playlists: bool,
    pub shows: bool,
    pub episodes: bool,
    pub categories: bool,
}

impl CacheSettings {
    pub fn all() -> Self {
        Self::from_kinds(EntityKind::ALL)
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_kinds(kinds: impl IntoIterator<Item = EntityKind>) -> Self {
        let mut settings = Self::default();
        for kind in kinds {
            settings.set(kind, true);
        }
        settings
    }

    pub fn is_enabled(&self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::User => self.users,
            EntityKind::Artist => self.artists,
            EntityKind::Track => self.tracks,
            EntityKind::Album => self.albums,
            EntityKind::Playlist => self.playlists,
            EntityKind::Show => self.shows,
            EntityKind::Episode => self.episodes,
            EntityKind::Category => self.categories,
        }
    }

    pub fn set(&mut self, kind: EntityKind, enabled: bool) -> &mut Self {
        let flag = match kind {
            EntityKind::User => &mut self.users,
            EntityKind::Artist => &mut self.artists,
            EntityKind::Track => &mut self.tracks,
            EntityKind::Album => &mut self.albums,
            EntityKind::Playlist => &mut self.playlists,
            EntityKind::Show => &mut self.shows,
            EntityKind::Episode => &mut self.episodes,
            EntityKind::Category => &mut self.categories,
        };
        *flag = enabled;
        self
    }

    pub fn enabled_kinds(&self) -> Vec<EntityKind> {
        EntityKind::ALL
            .into_iter()
            .filter(|k| self.is_enabled(*k))
            .collect()
    }
}

pub type Slot<E> = RwLock<HashMap<String, Arc<E>>>;

/// Implemented by every domain type that has its own map in the cache.
pub trait Cached: Sized + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    #[doc(hidden)]
    fn slot(cache: &EntityCache) -> &Slot<Self>;
}

/// Keyed store of materialized entities, one map per [`EntityKind`].
///
/// Locks are only taken for a single map operation and never held across an
/// `.await`, so concurrent managers can share one instance freely. There is
/// no coalescing: two concurrent misses for the same id both fetch and the
/// last write wins.
#[derive(Default)]
pub struct EntityCache {
    settings: CacheSettings,
    users: Slot<User>,
    artists: Slot<Artist>,
    tracks: Slot<Track>,
    albums: Slot<Album>,
    playlists: Slot<Playlist>,
    shows: Slot<Show>,
    episodes: Slot<Episode>,
    categories: Slot<Category>,
}

impl EntityCache {
    pub fn new(settings: CacheSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    pub fn is_enabled(&self, kind: EntityKind) -> bool {
        self.settings.is_enabled(kind)
    }

    pub fn get<E: Cached>(&self, id: &str) -> Option<Arc<E>> {
        if !self.is_enabled(E::KIND) {
            return None;
        }
        E::slot(self).read().get(id).cloned()
    }

    pub fn has<E: Cached>(&self, id: &str) -> bool {
        self.is_enabled(E::KIND) && E::slot(self).read().contains_key(id)
    }

    /// Stores `entity` under its own id, replacing any previous entry.
    ///
    /// No-op when the kind is disabled or the entity has no id (local files).
    pub fn set<E: Cached>(&self, entity: Arc<E>) {
        if !self.is_enabled(E::KIND) || entity.id().is_empty() {
            return;
        }
        let id = entity.id().to_string();
        tracing::debug!(kind = %E::KIND, id = %id, "cache write");
        E::slot(self).write().insert(id, entity);
    }

    /// Stores `entity` under `id` as well, for lookups that answered with a
    /// different id than the one requested (relinked tracks).
    pub(crate) fn set_alias<E: Cached>(&self, id: &str, entity: Arc<E>) {
        if !self.is_enabled(E::KIND) || id.is_empty() || entity.id() == id {
            return;
        }
        tracing::debug!(kind = %E::KIND, id, canonical = %entity.id(), "cache alias");
        E::slot(self).write().insert(id.to_string(), entity);
    }

    /// Number of stored entries of `kind`, aliases included.
    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::User => self.users.read().len(),
            EntityKind::Artist => self.artists.read().len(),
            EntityKind::Track => self.tracks.read().len(),
            EntityKind::Album => self.albums.read().len(),
            EntityKind::Playlist => self.playlists.read().len(),
            EntityKind::Show => self.shows.read().len(),
            EntityKind::Episode => self.episodes.read().len(),
            EntityKind::Category => self.categories.read().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        EntityKind::ALL.into_iter().all(|k| self.len(k) == 0)
    }

    pub fn clear(&self, kind: EntityKind) {
        match kind {
            EntityKind::User => self.users.write().clear(),
            EntityKind::Artist => self.artists.write().clear(),
            EntityKind::Track => self.tracks.write().clear(),
            EntityKind::Album => self.albums.write().clear(),
            EntityKind::Playlist => self.playlists.write().clear(),
            EntityKind::Show => self.shows.write().clear(),
            EntityKind::Episode => self.episodes.write().clear(),
            EntityKind::Category => self.categories.write().clear(),
        }
    }

    pub fn clear_all(&self) {
        for kind in EntityKind::ALL {
            self.clear(kind);
        }
    }
}

macro_rules! cached {
    ($ty:ty, $kind:expr, $field:ident) => {
        impl Cached for $ty {
            const KIND: EntityKind = $kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn slot(cache: &EntityCache) -> &Slot<Self> {
                &cache.$field
            }
        }
    };
}

cached!(User, EntityKind::User, users);
cached!(Artist, EntityKind::Artist, artists);
cached!(Track, EntityKind::Track, tracks);
cached!(Album, EntityKind::Album, albums);
cached!(Playlist, EntityKind::Playlist, playlists);
cached!(Show, EntityKind::Show, shows);
cached!(Episode, EntityKind::Episode, episodes);
cached!(Category, EntityKind::Category, categories);
