//! Raw payload shapes as the Web API sends them.
//!
//! Every struct is lenient: all fields default when missing or `null`, so the
//! same type parses both the simplified object embedded in a parent payload
//! and the full object returned by a direct lookup. Which of the two a payload
//! was is decided later, by the constructors in [`crate::model`].

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageObject {
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowersObject {
    pub href: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub total: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyrightObject {
    #[serde(deserialize_with = "nullable")]
    pub text: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumePointObject {
    #[serde(deserialize_with = "nullable")]
    pub fully_played: bool,
    #[serde(deserialize_with = "nullable")]
    pub resume_position_ms: u64,
}

/// One page of a paginated collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paging<T> {
    pub href: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub items: Vec<T>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub total: Option<u32>,
}

impl<T> Default for Paging<T> {
    fn default() -> Self {
        Self {
            href: None,
            items: Vec::new(),
            limit: None,
            offset: None,
            next: None,
            previous: None,
            total: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserObject {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    pub display_name: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub uri: String,
    pub href: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub external_urls: HashMap<String, String>,
    #[serde(deserialize_with = "nullable")]
    pub images: Vec<ImageObject>,
    pub followers: Option<FollowersObject>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub product: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistObject {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub uri: String,
    pub href: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub external_urls: HashMap<String, String>,
    pub followers: Option<FollowersObject>,
    pub genres: Option<Vec<String>>,
    pub images: Option<Vec<ImageObject>>,
    pub popularity: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumObject {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub uri: String,
    pub href: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub album_type: String,
    pub album_group: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub artists: Vec<ArtistObject>,
    #[serde(deserialize_with = "nullable")]
    pub images: Vec<ImageObject>,
    #[serde(deserialize_with = "nullable")]
    pub release_date: String,
    #[serde(deserialize_with = "nullable")]
    pub release_date_precision: String,
    #[serde(deserialize_with = "nullable")]
    pub total_tracks: u32,
    #[serde(deserialize_with = "nullable")]
    pub available_markets: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub external_urls: HashMap<String, String>,
    pub tracks: Option<Paging<TrackObject>>,
    pub copyrights: Option<Vec<CopyrightObject>>,
    pub external_ids: Option<HashMap<String, String>>,
    pub genres: Option<Vec<String>>,
    pub label: Option<String>,
    pub popularity: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackObject {
    pub id: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub uri: String,
    pub href: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub artists: Vec<ArtistObject>,
    #[serde(deserialize_with = "nullable")]
    pub available_markets: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub disc_number: u32,
    #[serde(deserialize_with = "nullable")]
    pub duration_ms: u64,
    #[serde(deserialize_with = "nullable")]
    pub explicit: bool,
    #[serde(deserialize_with = "nullable")]
    pub external_urls: HashMap<String, String>,
    #[serde(deserialize_with = "nullable")]
    pub is_local: bool,
    pub is_playable: Option<bool>,
    pub preview_url: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub track_number: u32,
    pub album: Option<AlbumObject>,
    pub external_ids: Option<HashMap<String, String>>,
    pub popularity: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowObject {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub uri: String,
    pub href: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    pub html_description: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub publisher: String,
    #[serde(deserialize_with = "nullable")]
    pub explicit: bool,
    #[serde(deserialize_with = "nullable")]
    pub languages: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub media_type: String,
    #[serde(deserialize_with = "nullable")]
    pub images: Vec<ImageObject>,
    #[serde(deserialize_with = "nullable")]
    pub is_externally_hosted: bool,
    #[serde(deserialize_with = "nullable")]
    pub available_markets: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub copyrights: Vec<CopyrightObject>,
    #[serde(deserialize_with = "nullable")]
    pub total_episodes: u32,
    #[serde(deserialize_with = "nullable")]
    pub external_urls: HashMap<String, String>,
    pub episodes: Option<Paging<EpisodeObject>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeObject {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub uri: String,
    pub href: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    pub html_description: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub duration_ms: u64,
    #[serde(deserialize_with = "nullable")]
    pub explicit: bool,
    #[serde(deserialize_with = "nullable")]
    pub release_date: String,
    #[serde(deserialize_with = "nullable")]
    pub release_date_precision: String,
    #[serde(deserialize_with = "nullable")]
    pub languages: Vec<String>,
    pub audio_preview_url: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub images: Vec<ImageObject>,
    pub is_playable: Option<bool>,
    #[serde(deserialize_with = "nullable")]
    pub is_externally_hosted: bool,
    pub resume_point: Option<ResumePointObject>,
    #[serde(deserialize_with = "nullable")]
    pub external_urls: HashMap<String, String>,
    pub show: Option<ShowObject>,
}

/// Item of a playlist: either a track or an episode, told apart by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlayableObject {
    Track(TrackObject),
    Episode(EpisodeObject),
}

/// Reads a playlist entry's `track`. Entries whose `type` is missing or
/// neither `track` nor `episode` carry no item; a known type with a bad
/// shape is still an error.
fn playable<'de, D>(deserializer: D) -> Result<Option<PlayableObject>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let known = matches!(
        value.get("type").and_then(serde_json::Value::as_str),
        Some("track" | "episode")
    );
    if !known {
        return Ok(None);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistTrackObject {
    pub added_at: Option<String>,
    pub added_by: Option<UserObject>,
    #[serde(deserialize_with = "nullable")]
    pub is_local: bool,
    #[serde(deserialize_with = "playable")]
    pub track: Option<PlayableObject>,
}

/// `tracks` field of a playlist. Simplified playlists only carry `href` and
/// `total`; full playlists embed the first page of `items` too.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistTracksObject {
    pub href: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub total: u32,
    pub items: Option<Vec<PlaylistTrackObject>>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistObject {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub uri: String,
    pub href: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub collaborative: bool,
    pub public: Option<bool>,
    #[serde(deserialize_with = "nullable")]
    pub snapshot_id: String,
    #[serde(deserialize_with = "nullable")]
    pub images: Vec<ImageObject>,
    #[serde(deserialize_with = "nullable")]
    pub owner: UserObject,
    #[serde(deserialize_with = "nullable")]
    pub external_urls: HashMap<String, String>,
    #[serde(deserialize_with = "nullable")]
    pub tracks: PlaylistTracksObject,
    pub followers: Option<FollowersObject>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryObject {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    pub href: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub icons: Vec<ImageObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}
