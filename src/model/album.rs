use std::{collections::HashMap, sync::Arc};

use serde::Serialize;

use super::{Artist, Copyright, Entity, ExternalUrls, Fidelity, Image, Track, images};
use crate::{client::Client, error::Res, wire::AlbumObject};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub href: Option<String>,
    pub album_type: String,
    /// Relation to the artist, only set on artist album listings.
    pub album_group: Option<String>,
    pub artists: Vec<Artist>,
    pub images: Vec<Image>,
    pub release_date: String,
    pub release_date_precision: String,
    pub total_tracks: u32,
    pub available_markets: Vec<String>,
    pub external_urls: ExternalUrls,
    pub fidelity: Fidelity<AlbumDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlbumDetails {
    /// First page of the album's tracks, without album back-references.
    pub tracks: Vec<Track>,
    pub copyrights: Vec<Copyright>,
    pub external_ids: HashMap<String, String>,
    pub genres: Vec<String>,
    pub label: String,
    pub popularity: u32,
}

impl Album {
    pub fn details(&self) -> Option<&AlbumDetails> {
        self.fidelity.full()
    }

    /// Embedded tracks; empty for simplified albums.
    pub fn tracks(&self) -> &[Track] {
        self.details().map(|d| d.tracks.as_slice()).unwrap_or_default()
    }

    pub fn artist_names(&self) -> Vec<&str> {
        self.artists.iter().map(|a| a.name.as_str()).collect()
    }

    pub async fn fetch(&self, client: &Client) -> Res<Option<Arc<Album>>> {
        client.albums.get(&self.id, true, None).await
    }
}

impl Entity for Album {
    type Wire = AlbumObject;

    /// Only full album objects embed `tracks`.
    fn from_wire(raw: AlbumObject) -> Self {
        let details = raw.tracks.map(|tracks| AlbumDetails {
            tracks: tracks.items.into_iter().map(Track::from_wire).collect(),
            copyrights: raw
                .copyrights
                .unwrap_or_default()
                .into_iter()
                .map(Copyright::from)
                .collect(),
            external_ids: raw.external_ids.unwrap_or_default(),
            genres: raw.genres.unwrap_or_default(),
            label: raw.label.unwrap_or_default(),
            popularity: raw.popularity.unwrap_or_default(),
        });

        Album {
            id: raw.id,
            name: raw.name,
            uri: raw.uri,
            href: raw.href,
            album_type: raw.album_type,
            album_group: raw.album_group,
            artists: raw.artists.into_iter().map(Artist::from_wire).collect(),
            images: images(raw.images),
            release_date: raw.release_date,
            release_date_precision: raw.release_date_precision,
            total_tracks: raw.total_tracks,
            available_markets: raw.available_markets,
            external_urls: raw.external_urls,
            fidelity: Fidelity::from_option(details),
        }
    }

    fn is_full(&self) -> bool {
        self.fidelity.is_full()
    }
}
