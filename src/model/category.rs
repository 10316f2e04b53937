use std::sync::Arc;

use serde::Serialize;

use super::{Entity, Image, images};
use crate::{client::Client, error::Res, wire::CategoryObject};

/// A browse category. Categories come in a single fidelity and have no uri.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub href: Option<String>,
    pub icons: Vec<Image>,
}

impl Category {
    pub async fn fetch(&self, client: &Client) -> Res<Option<Arc<Category>>> {
        client.categories.get(&self.id, true).await
    }
}

impl Entity for Category {
    type Wire = CategoryObject;

    fn from_wire(raw: CategoryObject) -> Self {
        Category {
            id: raw.id,
            name: raw.name,
            href: raw.href,
            icons: images(raw.icons),
        }
    }

    fn is_full(&self) -> bool {
        true
    }
}
