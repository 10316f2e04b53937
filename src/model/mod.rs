//! Domain objects materialized from API payloads.
//!
//! Each entity is built once from its [`crate::wire`] shape by a pure,
//! synchronous constructor. Embedded entities (the artists of a track, the
//! owner of a playlist, ...) are built recursively from the JSON already in
//! the parent payload; nothing here talks to the network or to the cache.
//!
//! The wire format is always partial in one direction (an album's embedded
//! tracks do not embed the album again), and constructors only descend into
//! what the payload actually contains, so materialization always terminates.
//!
//! Whether an object is the simplified or the full variant is decided at
//! parse time and recorded as a [`Fidelity`].

mod album;
mod artist;
mod category;
mod episode;
mod playlist;
mod show;
mod track;
mod user;

use std::collections::HashMap;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    cache::{Cached, EntityCache},
    error::Res,
    utils, wire,
};

pub use album::{Album, AlbumDetails};
pub use artist::{Artist, ArtistDetails};
pub use category::Category;
pub use episode::{Episode, EpisodeDetails, ResumePoint};
pub use playlist::{Playlist, PlaylistDetails, PlaylistItem, PlaylistTrack};
pub use show::{Show, ShowDetails};
pub use track::{Track, TrackDetails};
pub use user::{User, UserDetails};

/// Fidelity level of an entity: as embedded in a parent payload
/// (`Simplified`) or as returned by a direct lookup (`Full`), in which case it
/// carries the extended attribute set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Fidelity<T> {
    Simplified,
    Full(T),
}

impl<T> Fidelity<T> {
    pub fn full(&self) -> Option<&T> {
        match self {
            Fidelity::Full(details) => Some(details),
            Fidelity::Simplified => None,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Fidelity::Full(_))
    }

    pub(crate) fn from_option(details: Option<T>) -> Self {
        details.map_or(Fidelity::Simplified, Fidelity::Full)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

impl From<wire::ImageObject> for Image {
    fn from(raw: wire::ImageObject) -> Self {
        Image {
            url: raw.url,
            height: raw.height,
            width: raw.width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Copyright {
    pub text: String,
    pub kind: String,
}

impl From<wire::CopyrightObject> for Copyright {
    fn from(raw: wire::CopyrightObject) -> Self {
        Copyright {
            text: raw.text,
            kind: raw.kind,
        }
    }
}

pub type ExternalUrls = HashMap<String, String>;

pub(crate) fn images(raw: Vec<wire::ImageObject>) -> Vec<Image> {
    raw.into_iter().map(Image::from).collect()
}

/// A cacheable domain object with a wire representation.
pub trait Entity: Cached {
    type Wire: DeserializeOwned;

    fn from_wire(raw: Self::Wire) -> Self;

    fn is_full(&self) -> bool;

    /// Parses and materializes a raw JSON payload.
    fn from_value(value: Value) -> Res<Self> {
        let raw: Self::Wire = serde_json::from_value(value)?;
        Ok(Self::from_wire(raw))
    }

    /// Writes full-fidelity entities embedded in `self` to their own maps.
    /// Only called on manager paths, after `self` itself was stored.
    fn warm(&self, _cache: &EntityCache) {}
}

/// Entities addressable by a `spotify:<type>:<id>` uri.
pub trait Scannable {
    fn uri(&self) -> &str;

    /// Url of the scannable Spotify code image for this entity, drawn on a
    /// background of `color` (hex, e.g. `"1DB954"`).
    fn make_code_image(&self, color: &str) -> Res<String> {
        utils::code_image_url(self.uri(), color)
    }

    /// [`Scannable::make_code_image`] on Spotify green
    /// ([`utils::DEFAULT_CODE_COLOR`]).
    fn make_default_code_image(&self) -> Res<String> {
        self.make_code_image(utils::DEFAULT_CODE_COLOR)
    }
}

macro_rules! scannable {
    ($($ty:ty),+) => {
        $(impl Scannable for $ty {
            fn uri(&self) -> &str {
                &self.uri
            }
        })+
    };
}

scannable!(User, Artist, Track, Album, Playlist, Show, Episode);
