use std::sync::Arc;

use serde::Serialize;

use super::{Entity, ExternalUrls, Fidelity, Image, images};
use crate::{client::Client, error::Res, wire::UserObject};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
    pub uri: String,
    pub href: Option<String>,
    pub external_urls: ExternalUrls,
    pub images: Vec<Image>,
    pub fidelity: Fidelity<UserDetails>,
}

/// Present on public and private user profiles, missing on embedded owners.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDetails {
    pub followers: u64,
    /// Only set for the current user's own profile.
    pub country: Option<String>,
    pub email: Option<String>,
    pub product: Option<String>,
}

impl User {
    pub fn details(&self) -> Option<&UserDetails> {
        self.fidelity.full()
    }

    /// Display name, falling back to the id.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }

    pub async fn fetch(&self, client: &Client) -> Res<Option<Arc<User>>> {
        client.users.get(&self.id, true).await
    }
}

impl Entity for User {
    type Wire = UserObject;

    fn from_wire(raw: UserObject) -> Self {
        let details = raw.followers.map(|followers| UserDetails {
            followers: followers.total,
            country: raw.country,
            email: raw.email,
            product: raw.product,
        });

        User {
            id: raw.id,
            display_name: raw.display_name,
            uri: raw.uri,
            href: raw.href,
            external_urls: raw.external_urls,
            images: images(raw.images),
            fidelity: Fidelity::from_option(details),
        }
    }

    fn is_full(&self) -> bool {
        self.fidelity.is_full()
    }
}
