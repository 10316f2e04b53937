use std::sync::Arc;

use serde::Serialize;

use super::{Entity, ExternalUrls, Fidelity, Image, Show, images};
use crate::{client::Client, error::Res, wire::EpisodeObject};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Episode {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub href: Option<String>,
    pub description: String,
    pub html_description: Option<String>,
    pub duration_ms: u64,
    pub explicit: bool,
    pub release_date: String,
    pub release_date_precision: String,
    pub languages: Vec<String>,
    pub audio_preview_url: Option<String>,
    pub images: Vec<Image>,
    pub is_playable: Option<bool>,
    pub is_externally_hosted: bool,
    /// Playback position of the current user; needs the
    /// `user-read-playback-position` scope.
    pub resume_point: Option<ResumePoint>,
    pub external_urls: ExternalUrls,
    pub fidelity: Fidelity<EpisodeDetails>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResumePoint {
    pub fully_played: bool,
    pub resume_position_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeDetails {
    pub show: Show,
}

impl Episode {
    pub fn details(&self) -> Option<&EpisodeDetails> {
        self.fidelity.full()
    }

    pub fn show(&self) -> Option<&Show> {
        self.details().map(|d| &d.show)
    }

    pub async fn fetch(&self, client: &Client) -> Res<Option<Arc<Episode>>> {
        client.episodes.get(&self.id, true, None).await
    }
}

impl Entity for Episode {
    type Wire = EpisodeObject;

    fn from_wire(raw: EpisodeObject) -> Self {
        let details = raw.show.map(|show| EpisodeDetails {
            show: Show::from_wire(show),
        });

        Episode {
            id: raw.id,
            name: raw.name,
            uri: raw.uri,
            href: raw.href,
            description: raw.description,
            html_description: raw.html_description,
            duration_ms: raw.duration_ms,
            explicit: raw.explicit,
            release_date: raw.release_date,
            release_date_precision: raw.release_date_precision,
            languages: raw.languages,
            audio_preview_url: raw.audio_preview_url,
            images: images(raw.images),
            is_playable: raw.is_playable,
            is_externally_hosted: raw.is_externally_hosted,
            resume_point: raw.resume_point.map(|r| ResumePoint {
                fully_played: r.fully_played,
                resume_position_ms: r.resume_position_ms,
            }),
            external_urls: raw.external_urls,
            fidelity: Fidelity::from_option(details),
        }
    }

    fn is_full(&self) -> bool {
        self.fidelity.is_full()
    }
}
