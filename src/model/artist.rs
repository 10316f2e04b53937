use std::sync::Arc;

use serde::Serialize;

use super::{Entity, ExternalUrls, Fidelity, Image, images};
use crate::{client::Client, error::Res, wire::ArtistObject};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub href: Option<String>,
    pub external_urls: ExternalUrls,
    pub fidelity: Fidelity<ArtistDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistDetails {
    pub followers: u64,
    pub genres: Vec<String>,
    pub images: Vec<Image>,
    pub popularity: u32,
}

impl Artist {
    pub fn details(&self) -> Option<&ArtistDetails> {
        self.fidelity.full()
    }

    pub fn genres(&self) -> &[String] {
        self.details().map(|d| d.genres.as_slice()).unwrap_or_default()
    }

    pub async fn fetch(&self, client: &Client) -> Res<Option<Arc<Artist>>> {
        client.artists.get(&self.id, true).await
    }
}

impl Entity for Artist {
    type Wire = ArtistObject;

    /// `popularity` only appears on full artist objects.
    fn from_wire(raw: ArtistObject) -> Self {
        let details = raw.popularity.map(|popularity| ArtistDetails {
            followers: raw.followers.map_or(0, |f| f.total),
            genres: raw.genres.unwrap_or_default(),
            images: images(raw.images.unwrap_or_default()),
            popularity,
        });

        Artist {
            id: raw.id,
            name: raw.name,
            uri: raw.uri,
            href: raw.href,
            external_urls: raw.external_urls,
            fidelity: Fidelity::from_option(details),
        }
    }

    fn is_full(&self) -> bool {
        self.fidelity.is_full()
    }
}
