use std::sync::Arc;

use tabled::Table;

use crate::{
    cache::EntityKind, config, error, managers::SearchOptions, types::EntityTableRow, warning,
};

use super::{Row, connect, spinner};

fn rows<E: Row>(found: Vec<Arc<E>>) -> Vec<EntityTableRow> {
    found.iter().map(|e| e.row()).collect()
}

/// Searches the catalog for `query` and prints one row per hit.
pub async fn search(kind: EntityKind, query: String, limit: u32) {
    if kind == EntityKind::User || kind == EntityKind::Category {
        warning!("Searching {} is not supported.", kind.plural());
        return;
    }

    let client = connect().await;
    let options = SearchOptions {
        market: config::market(),
        ..SearchOptions::limit(limit)
    };

    let pb = spinner(format!("Searching {} for '{}'...", kind.plural(), query));
    let result = match kind {
        EntityKind::Album => client.albums.search(&query, &options).await.map(rows),
        EntityKind::Artist => client.artists.search(&query, &options).await.map(rows),
        EntityKind::Track => client.tracks.search(&query, &options).await.map(rows),
        EntityKind::Playlist => client.playlists.search(&query, &options).await.map(rows),
        EntityKind::Show => client.shows.search(&query, &options).await.map(rows),
        EntityKind::Episode => client.episodes.search(&query, &options).await.map(rows),
        EntityKind::User | EntityKind::Category => Ok(Vec::new()),
    };
    pb.finish_and_clear();

    match result {
        Ok(found) if found.is_empty() => warning!("No {} found for '{}'", kind.plural(), query),
        Ok(found) => println!("{}", Table::new(found)),
        Err(e) => error!("Search failed. Err: {}", e),
    }
}
