use tabled::Table;

use crate::{
    cache::EntityKind,
    client::Client,
    config,
    error,
    error::Res,
    info,
    model::{Album, Artist, Category, Episode, Playlist, Show, Track, User},
    types::{EntityTableRow, TrackTableRow},
    utils, warning,
};

use super::{Row, connect, episode_rows, playlist_rows, spinner, track_rows};

struct Lookup {
    row: EntityTableRow,
    items: Vec<TrackTableRow>,
    cached: bool,
}

/// Looks up `ids` (bare ids, uris or open.spotify.com links) of one kind.
///
/// Repeated ids within one invocation are answered from the cache unless
/// `force` is set. With `items`, the tracks of albums, the entries of
/// playlists and the episodes of shows are listed below the summary.
pub async fn get(
    kind: EntityKind,
    ids: Vec<String>,
    force: bool,
    market: Option<String>,
    items: bool,
) {
    let client = connect().await;
    let market = market.or_else(config::market);

    let pb = spinner(format!("Fetching {} {}...", ids.len(), kind.plural()));
    let mut rows = Vec::new();
    let mut listings = Vec::new();
    let mut from_cache = 0;

    for raw in &ids {
        let id = utils::id_from_uri(raw);
        match lookup(&client, kind, id, force, market.as_deref()).await {
            Ok(Some(found)) => {
                if found.cached {
                    from_cache += 1;
                }
                listings.push((found.row.name.clone(), found.items));
                rows.push(found.row);
            }
            Ok(None) => {
                pb.suspend(|| warning!("No {} found for id {}", kind, id));
            }
            Err(e) => {
                pb.finish_and_clear();
                error!("Failed to fetch {} {}. Err: {}", kind, id, e);
            }
        }
    }
    pb.finish_and_clear();

    if rows.is_empty() {
        warning!("Nothing found.");
        return;
    }

    println!("{}", Table::new(rows));
    if from_cache > 0 {
        info!("{} of {} lookups served from cache", from_cache, ids.len());
    }

    if items {
        for (name, rows) in listings.into_iter().filter(|(_, r)| !r.is_empty()) {
            info!("{}", name);
            println!("{}", Table::new(rows));
        }
    }
}

async fn lookup(
    client: &Client,
    kind: EntityKind,
    id: &str,
    force: bool,
    market: Option<&str>,
) -> Res<Option<Lookup>> {
    let cache = client.cache();

    let found = match kind {
        EntityKind::Album => {
            let cached = !force && cache.has::<Album>(id);
            client.albums.get(id, force, market).await?.map(|a| Lookup {
                row: a.row(),
                items: track_rows(a.tracks()),
                cached,
            })
        }
        EntityKind::Artist => {
            let cached = !force && cache.has::<Artist>(id);
            client.artists.get(id, force).await?.map(|a| Lookup {
                row: a.row(),
                items: Vec::new(),
                cached,
            })
        }
        EntityKind::Track => {
            let cached = !force && cache.has::<Track>(id);
            client.tracks.get(id, force, market).await?.map(|t| Lookup {
                row: t.row(),
                items: Vec::new(),
                cached,
            })
        }
        EntityKind::Playlist => {
            let cached = !force && cache.has::<Playlist>(id);
            client.playlists.get(id, force, market).await?.map(|p| Lookup {
                row: p.row(),
                items: playlist_rows(p.items()),
                cached,
            })
        }
        EntityKind::Show => {
            let cached = !force && cache.has::<Show>(id);
            client.shows.get(id, force, market).await?.map(|s| Lookup {
                row: s.row(),
                items: episode_rows(s.episodes()),
                cached,
            })
        }
        EntityKind::Episode => {
            let cached = !force && cache.has::<Episode>(id);
            client.episodes.get(id, force, market).await?.map(|e| Lookup {
                row: e.row(),
                items: Vec::new(),
                cached,
            })
        }
        EntityKind::User => {
            let cached = !force && cache.has::<User>(id);
            let user = if id == "me" {
                client.users.me().await?
            } else {
                client.users.get(id, force).await?
            };
            user.map(|u| Lookup {
                row: u.row(),
                items: Vec::new(),
                cached,
            })
        }
        EntityKind::Category => {
            let cached = !force && cache.has::<Category>(id);
            client.categories.get(id, force).await?.map(|c| Lookup {
                row: c.row(),
                items: Vec::new(),
                cached,
            })
        }
    };

    Ok(found)
}
