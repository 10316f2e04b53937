//! # CLI Module
//!
//! Command implementations behind the `sporlkit` binary. Every command is an
//! `async fn` that prints its own output and terminates the process through
//! [`crate::error!`] on fatal failures.
//!
//! - [`auth`] - PKCE authorization, persists the token
//! - [`get`] - Looks up entities by id or uri through the cache-aware managers
//! - [`search`] - Catalog search for one entity kind
//! - [`code`] - Prints the Spotify code image url for a uri
//! - [`cache`] - Shows which entity kinds are cached
//!
//! ```bash
//! sporlkit auth
//! sporlkit get album 4aawyAB9vmqN3uQ7FjRGTy --items
//! sporlkit search artist "daft punk" --limit 5
//! sporlkit code spotify:track:6rqhFgbbKwnb9MLmUQDhG6 --color 1DB954
//! ```

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    client::Client,
    error,
    management::TokenManager,
    model::{Album, Artist, Category, Entity, Episode, Playlist, PlaylistTrack, Show, Track, User},
    types::{EntityTableRow, TrackTableRow},
    utils,
};

mod auth;
mod cache;
mod code;
mod get;
mod search;

pub use auth::auth;
pub use cache::cache;
pub use code::code;
pub use get::get;
pub use search::search;

/// Builds a client from the persisted token, refreshing it when needed.
async fn connect() -> Client {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run sporlkit auth\n Error: {}",
                e
            );
        }
    };

    let token = match token_mgr.get_valid_token().await {
        Ok(t) => t,
        Err(e) => error!("Cannot get a valid token. Err: {}", e),
    };

    match Client::from_env(token) {
        Ok(client) => client,
        Err(e) => error!("Cannot create client. Err: {}", e),
    }
}

fn spinner(msg: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// One summary line per entity in the `get` and `search` tables.
trait Row {
    fn row(&self) -> EntityTableRow;
}

fn entity_row<E: Entity>(entity: &E, name: &str, detail: String) -> EntityTableRow {
    EntityTableRow {
        kind: E::KIND.to_string(),
        id: entity.id().to_string(),
        name: name.to_string(),
        detail,
        fidelity: if entity.is_full() { "full" } else { "simplified" }.to_string(),
    }
}

impl Row for Album {
    fn row(&self) -> EntityTableRow {
        let detail = format!(
            "{} | {} | {} tracks",
            self.artist_names().join(", "),
            self.release_date,
            self.total_tracks
        );
        entity_row(self, &self.name, detail)
    }
}

impl Row for Artist {
    fn row(&self) -> EntityTableRow {
        let detail = match self.details() {
            Some(d) => format!(
                "{} followers | {}",
                d.followers,
                d.genres.iter().take(3).cloned().collect::<Vec<_>>().join(",")
            ),
            None => String::new(),
        };
        entity_row(self, &self.name, detail)
    }
}

impl Row for Track {
    fn row(&self) -> EntityTableRow {
        let mut detail = format!(
            "{} | {}",
            self.artist_names().join(", "),
            utils::format_duration(self.duration_ms)
        );
        if let Some(album) = self.album() {
            detail.push_str(&format!(" | {}", album.name));
        }
        entity_row(self, &self.name, detail)
    }
}

impl Row for Playlist {
    fn row(&self) -> EntityTableRow {
        let detail = format!("by {} | {} items", self.owner.name(), self.total_tracks);
        entity_row(self, &self.name, detail)
    }
}

impl Row for Show {
    fn row(&self) -> EntityTableRow {
        let detail = format!("{} | {} episodes", self.publisher, self.total_episodes);
        entity_row(self, &self.name, detail)
    }
}

impl Row for Episode {
    fn row(&self) -> EntityTableRow {
        let mut detail = format!(
            "{} | {}",
            self.release_date,
            utils::format_duration(self.duration_ms)
        );
        if let Some(show) = self.show() {
            detail.push_str(&format!(" | {}", show.name));
        }
        entity_row(self, &self.name, detail)
    }
}

impl Row for User {
    fn row(&self) -> EntityTableRow {
        let detail = match self.details() {
            Some(d) => format!("{} followers", d.followers),
            None => String::new(),
        };
        entity_row(self, self.name(), detail)
    }
}

impl Row for Category {
    fn row(&self) -> EntityTableRow {
        entity_row(self, &self.name, String::new())
    }
}

fn track_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .map(|t| TrackTableRow {
            number: t.track_number.to_string(),
            name: t.name.clone(),
            artists: t.artist_names().join(", "),
            duration: utils::format_duration(t.duration_ms),
        })
        .collect()
}

fn episode_rows(episodes: &[Episode]) -> Vec<TrackTableRow> {
    episodes
        .iter()
        .enumerate()
        .map(|(i, e)| TrackTableRow {
            number: (i + 1).to_string(),
            name: e.name.clone(),
            artists: e.release_date.clone(),
            duration: utils::format_duration(e.duration_ms),
        })
        .collect()
}

fn playlist_rows(items: &[PlaylistTrack]) -> Vec<TrackTableRow> {
    items
        .iter()
        .enumerate()
        .map(|(i, pt)| {
            let (artists, duration) = match (pt.track(), pt.episode()) {
                (Some(t), _) => (t.artist_names().join(", "), t.duration_ms),
                (None, Some(e)) => (
                    e.show().map(|s| s.name.clone()).unwrap_or_default(),
                    e.duration_ms,
                ),
                (None, None) => (String::new(), 0),
            };
            TrackTableRow {
                number: (i + 1).to_string(),
                name: pt
                    .item
                    .as_ref()
                    .map(|it| it.name().to_string())
                    .unwrap_or_default(),
                artists,
                duration: utils::format_duration(duration),
            }
        })
        .collect()
}
