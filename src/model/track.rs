use std::{collections::HashMap, sync::Arc};

use serde::Serialize;

use super::{Album, Artist, Entity, ExternalUrls, Fidelity};
use crate::{client::Client, error::Res, wire::TrackObject};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    /// Empty for local files, which have no Spotify id.
    pub id: String,
    pub name: String,
    pub uri: String,
    pub href: Option<String>,
    pub artists: Vec<Artist>,
    pub available_markets: Vec<String>,
    pub disc_number: u32,
    pub duration_ms: u64,
    pub explicit: bool,
    pub external_urls: ExternalUrls,
    pub is_local: bool,
    pub is_playable: Option<bool>,
    pub preview_url: Option<String>,
    pub track_number: u32,
    pub fidelity: Fidelity<TrackDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackDetails {
    /// The track's album, in its simplified form.
    pub album: Album,
    pub external_ids: HashMap<String, String>,
    pub popularity: u32,
}

impl Track {
    pub fn details(&self) -> Option<&TrackDetails> {
        self.fidelity.full()
    }

    pub fn album(&self) -> Option<&Album> {
        self.details().map(|d| &d.album)
    }

    pub fn artist_names(&self) -> Vec<&str> {
        self.artists.iter().map(|a| a.name.as_str()).collect()
    }

    pub async fn fetch(&self, client: &Client) -> Res<Option<Arc<Track>>> {
        client.tracks.get(&self.id, true, None).await
    }
}

impl Entity for Track {
    type Wire = TrackObject;

    /// Tracks embedded in an album carry no `album`; every other track
    /// object does.
    fn from_wire(raw: TrackObject) -> Self {
        let details = raw.album.map(|album| TrackDetails {
            album: Album::from_wire(album),
            external_ids: raw.external_ids.unwrap_or_default(),
            popularity: raw.popularity.unwrap_or_default(),
        });

        Track {
            id: raw.id.unwrap_or_default(),
            name: raw.name,
            uri: raw.uri,
            href: raw.href,
            artists: raw.artists.into_iter().map(Artist::from_wire).collect(),
            available_markets: raw.available_markets,
            disc_number: raw.disc_number,
            duration_ms: raw.duration_ms,
            explicit: raw.explicit,
            external_urls: raw.external_urls,
            is_local: raw.is_local,
            is_playable: raw.is_playable,
            preview_url: raw.preview_url,
            track_number: raw.track_number,
            fidelity: Fidelity::from_option(details),
        }
    }

    fn is_full(&self) -> bool {
        self.fidelity.is_full()
    }
}
