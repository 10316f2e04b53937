use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::{Entity, Episode, ExternalUrls, Fidelity, Image, Track, User, images};
use crate::{
    cache::EntityCache,
    client::Client,
    error::Res,
    wire::{PlayableObject, PlaylistObject, PlaylistTrackObject},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub href: Option<String>,
    pub description: Option<String>,
    pub collaborative: bool,
    /// `None` when the playlist status is not relevant to the caller.
    pub public: Option<bool>,
    pub snapshot_id: String,
    pub images: Vec<Image>,
    pub owner: User,
    pub total_tracks: u32,
    pub external_urls: ExternalUrls,
    pub fidelity: Fidelity<PlaylistDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistDetails {
    pub followers: u64,
    /// First page of the playlist's items.
    pub items: Vec<PlaylistTrack>,
}

/// A single playlist entry wrapping a track or an episode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistTrack {
    /// RFC 3339 timestamp; missing for very old playlists.
    pub added_at: Option<String>,
    pub added_by: Option<User>,
    pub is_local: bool,
    /// `None` when the item is no longer available.
    pub item: Option<PlaylistItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlaylistItem {
    Track(Track),
    Episode(Episode),
}

impl PlaylistItem {
    pub fn name(&self) -> &str {
        match self {
            PlaylistItem::Track(t) => &t.name,
            PlaylistItem::Episode(e) => &e.name,
        }
    }

    pub fn uri(&self) -> &str {
        match self {
            PlaylistItem::Track(t) => &t.uri,
            PlaylistItem::Episode(e) => &e.uri,
        }
    }
}

impl PlaylistTrack {
    pub fn added_at(&self) -> Option<DateTime<FixedOffset>> {
        self.added_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
    }

    pub fn track(&self) -> Option<&Track> {
        match &self.item {
            Some(PlaylistItem::Track(t)) => Some(t),
            _ => None,
        }
    }

    pub fn episode(&self) -> Option<&Episode> {
        match &self.item {
            Some(PlaylistItem::Episode(e)) => Some(e),
            _ => None,
        }
    }

    /// Stores the wrapped track or episode in its own map if it is a full
    /// object.
    pub(crate) fn warm(&self, cache: &EntityCache) {
        match &self.item {
            Some(PlaylistItem::Track(t)) if t.is_full() && !t.is_local => {
                cache.set(Arc::new(t.clone()))
            }
            Some(PlaylistItem::Episode(e)) if e.is_full() => cache.set(Arc::new(e.clone())),
            _ => {}
        }
    }
}

impl From<PlaylistTrackObject> for PlaylistTrack {
    fn from(raw: PlaylistTrackObject) -> Self {
        PlaylistTrack {
            added_at: raw.added_at,
            added_by: raw.added_by.map(User::from_wire),
            is_local: raw.is_local,
            item: raw.track.map(|playable| match playable {
                PlayableObject::Track(t) => PlaylistItem::Track(Track::from_wire(t)),
                PlayableObject::Episode(e) => PlaylistItem::Episode(Episode::from_wire(e)),
            }),
        }
    }
}

impl Playlist {
    pub fn details(&self) -> Option<&PlaylistDetails> {
        self.fidelity.full()
    }

    pub fn items(&self) -> &[PlaylistTrack] {
        self.details()
            .map(|d| d.items.as_slice())
            .unwrap_or_default()
    }

    pub async fn fetch(&self, client: &Client) -> Res<Option<Arc<Playlist>>> {
        client.playlists.get(&self.id, true, None).await
    }
}

impl Entity for Playlist {
    type Wire = PlaylistObject;

    /// Simplified playlists only reference their tracks (`href`, `total`);
    /// full ones embed the first page of `items`.
    fn from_wire(raw: PlaylistObject) -> Self {
        let followers = raw.followers.map_or(0, |f| f.total);
        let details = raw.tracks.items.map(|items| PlaylistDetails {
            followers,
            items: items.into_iter().map(PlaylistTrack::from).collect(),
        });

        Playlist {
            id: raw.id,
            name: raw.name,
            uri: raw.uri,
            href: raw.href,
            description: raw.description,
            collaborative: raw.collaborative,
            public: raw.public,
            snapshot_id: raw.snapshot_id,
            images: images(raw.images),
            owner: User::from_wire(raw.owner),
            total_tracks: raw.tracks.total,
            external_urls: raw.external_urls,
            fidelity: Fidelity::from_option(details),
        }
    }

    fn is_full(&self) -> bool {
        self.fidelity.is_full()
    }

    fn warm(&self, cache: &EntityCache) {
        for item in self.items() {
            item.warm(cache);
        }
    }
}
