use std::sync::Arc;

use serde::Serialize;

use super::{Copyright, Entity, Episode, ExternalUrls, Fidelity, Image, images};
use crate::{client::Client, error::Res, wire::ShowObject};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Show {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub href: Option<String>,
    pub description: String,
    pub html_description: Option<String>,
    pub publisher: String,
    pub explicit: bool,
    pub languages: Vec<String>,
    pub media_type: String,
    pub images: Vec<Image>,
    pub is_externally_hosted: bool,
    pub available_markets: Vec<String>,
    pub copyrights: Vec<Copyright>,
    pub total_episodes: u32,
    pub external_urls: ExternalUrls,
    pub fidelity: Fidelity<ShowDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowDetails {
    /// First page of episodes, without show back-references.
    pub episodes: Vec<Episode>,
}

impl Show {
    pub fn details(&self) -> Option<&ShowDetails> {
        self.fidelity.full()
    }

    pub fn episodes(&self) -> &[Episode] {
        self.details()
            .map(|d| d.episodes.as_slice())
            .unwrap_or_default()
    }

    pub async fn fetch(&self, client: &Client) -> Res<Option<Arc<Show>>> {
        client.shows.get(&self.id, true, None).await
    }
}

impl Entity for Show {
    type Wire = ShowObject;

    fn from_wire(raw: ShowObject) -> Self {
        let details = raw.episodes.map(|episodes| ShowDetails {
            episodes: episodes.items.into_iter().map(Episode::from_wire).collect(),
        });

        Show {
            id: raw.id,
            name: raw.name,
            uri: raw.uri,
            href: raw.href,
            description: raw.description,
            html_description: raw.html_description,
            publisher: raw.publisher,
            explicit: raw.explicit,
            languages: raw.languages,
            media_type: raw.media_type,
            images: images(raw.images),
            is_externally_hosted: raw.is_externally_hosted,
            available_markets: raw.available_markets,
            copyrights: raw.copyrights.into_iter().map(Copyright::from).collect(),
            total_episodes: raw.total_episodes,
            external_urls: raw.external_urls,
            fidelity: Fidelity::from_option(details),
        }
    }

    fn is_full(&self) -> bool {
        self.fidelity.is_full()
    }
}
