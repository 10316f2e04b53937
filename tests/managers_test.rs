use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Method;
use serde_json::{Value, json};
use sporlkit::{
    CacheSettings, Client, EntityKind, Error, Fetcher, Request, Res,
    managers::{NewPlaylist, PageOptions, SearchOptions},
    model::{Album, Artist, Entity, Episode, Playlist, Track},
};

#[derive(Clone)]
enum Reply {
    Body(Value),
    NotFound,
    Status(u16),
}

/// Answers by request path and records every call.
#[derive(Default)]
struct StubFetcher {
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<Request>>,
}

impl StubFetcher {
    fn with(self, path: &str, reply: Reply) -> Self {
        self.replies.lock().insert(path.to_string(), reply);
        self
    }

    fn set(&self, path: &str, reply: Reply) {
        self.replies.lock().insert(path.to_string(), reply);
    }

    fn calls(&self) -> usize {
        self.calls.lock().len()
    }

    fn last(&self) -> Request {
        self.calls.lock().last().cloned().unwrap()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, request: Request) -> Res<Option<Value>> {
        self.calls.lock().push(request.clone());
        match self.replies.lock().get(&request.path).cloned() {
            Some(Reply::Body(body)) => Ok(Some(body)),
            Some(Reply::NotFound) | None => Ok(None),
            Some(Reply::Status(status)) => Err(Error::Unexpected {
                status,
                message: "stubbed failure".to_string(),
                body: None,
            }),
        }
    }
}

fn client(stub: &Arc<StubFetcher>) -> Client {
    Client::with_fetcher(stub.clone(), CacheSettings::all())
}

fn album_payload() -> Value {
    json!({
        "id": "abc123",
        "name": "Test Album",
        "type": "album",
        "uri": "spotify:album:abc123",
        "album_type": "album",
        "release_date": "2001-03-12",
        "total_tracks": 1,
        "artists": [{ "id": "a1", "name": "Artist One", "type": "artist" }],
        "tracks": {
            "items": [{ "id": "t1", "name": "Song", "album": null, "duration_ms": 320357 }],
            "total": 1
        },
        "popularity": 50
    })
}

fn artist_payload(name: &str) -> Value {
    json!({
        "id": "a1",
        "name": name,
        "type": "artist",
        "popularity": 71,
        "followers": { "total": 9000 },
        "genres": ["french house"]
    })
}

#[tokio::test]
async fn test_album_lookup_is_cached() {
    let stub = Arc::new(
        StubFetcher::default().with("/albums/abc123", Reply::Body(album_payload())),
    );
    let client = client(&stub);

    let album = client.albums.get("abc123", false, None).await.unwrap().unwrap();
    assert_eq!(album.id, "abc123");
    assert_eq!(album.artists[0].id, "a1");
    assert_eq!(album.tracks()[0].id, "t1");
    assert!(album.is_full());
    assert_eq!(stub.calls(), 1);

    let again = client.albums.get("abc123", false, None).await.unwrap().unwrap();
    assert_eq!(stub.calls(), 1);
    assert!(Arc::ptr_eq(&album, &again));
}

#[tokio::test]
async fn test_cache_hit_skips_fetch() {
    let stub = Arc::new(StubFetcher::default());
    let client = client(&stub);
    let cached = Arc::new(Artist::from_value(artist_payload("Cached")).unwrap());
    client.cache().set(Arc::clone(&cached));

    let artist = client.artists.get("a1", false).await.unwrap().unwrap();

    assert_eq!(stub.calls(), 0);
    assert!(Arc::ptr_eq(&artist, &cached));
}

#[tokio::test]
async fn test_force_bypasses_and_overwrites_cache() {
    let stub = Arc::new(
        StubFetcher::default().with("/artists/a1", Reply::Body(artist_payload("Fresh"))),
    );
    let client = client(&stub);
    client
        .cache()
        .set(Arc::new(Artist::from_value(artist_payload("Stale")).unwrap()));

    let artist = client.artists.get("a1", true).await.unwrap().unwrap();

    assert_eq!(stub.calls(), 1);
    assert_eq!(artist.name, "Fresh");
    assert_eq!(client.cache().get::<Artist>("a1").unwrap().name, "Fresh");
}

#[tokio::test]
async fn test_missing_entity_is_none_and_not_cached() {
    let stub = Arc::new(StubFetcher::default().with("/tracks/gone", Reply::NotFound));
    let client = client(&stub);

    let track = client.tracks.get("gone", false, None).await.unwrap();

    assert!(track.is_none());
    assert!(!client.cache().has::<Track>("gone"));

    // absence is not remembered
    client.tracks.get("gone", false, None).await.unwrap();
    assert_eq!(stub.calls(), 2);
}

#[tokio::test]
async fn test_null_body_is_none() {
    let stub = Arc::new(StubFetcher::default().with("/shows/s1", Reply::Body(Value::Null)));
    let client = client(&stub);

    assert!(client.shows.get("s1", false, None).await.unwrap().is_none());
    assert_eq!(client.cache().len(EntityKind::Show), 0);
}

#[tokio::test]
async fn test_errors_propagate() {
    let stub = Arc::new(StubFetcher::default().with("/albums/abc123", Reply::Status(500)));
    let client = client(&stub);

    let err = client.albums.get("abc123", false, None).await.unwrap_err();

    assert!(err.is_unexpected());
    assert_eq!(err.status(), Some(500));
    assert!(!client.cache().has::<Album>("abc123"));
}

#[tokio::test]
async fn test_empty_id_is_precondition() {
    let stub = Arc::new(StubFetcher::default());
    let client = client(&stub);

    let err = client.albums.get("", false, None).await.unwrap_err();

    assert!(matches!(err, Error::Precondition(_)));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_get_multiple_bounds() {
    let stub = Arc::new(StubFetcher::default());
    let client = client(&stub);

    let err = client.albums.get_multiple(&[], None).await.unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));

    let ids = vec!["x"; 21];
    let err = client.tracks.get_multiple(&ids, None).await.unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));

    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_get_multiple_skips_unknown_ids() {
    let stub = Arc::new(StubFetcher::default().with(
        "/artists",
        Reply::Body(json!({ "artists": [artist_payload("One"), null] })),
    ));
    let client = client(&stub);

    let artists = client.artists.get_multiple(&["a1", "unknown"]).await.unwrap();

    assert_eq!(artists.len(), 1);
    assert_eq!(stub.last().param_value("ids"), Some("a1,unknown"));
    assert!(client.cache().has::<Artist>("a1"));
}

#[tokio::test]
async fn test_search_writes_but_never_reads_cache() {
    let stub = Arc::new(StubFetcher::default().with(
        "/search",
        Reply::Body(json!({ "artists": { "items": [artist_payload("Found")] } })),
    ));
    let client = client(&stub);

    let options = SearchOptions {
        market: Some("DE".to_string()),
        ..SearchOptions::limit(5)
    };
    let found = client.artists.search("daft punk", &options).await.unwrap();
    assert_eq!(found.len(), 1);
    assert!(client.cache().has::<Artist>("a1"));

    let request = stub.last();
    assert_eq!(request.param_value("q"), Some("daft punk"));
    assert_eq!(request.param_value("type"), Some("artist"));
    assert_eq!(request.param_value("limit"), Some("5"));
    assert_eq!(request.param_value("market"), Some("DE"));

    client.artists.search("daft punk", &options).await.unwrap();
    assert_eq!(stub.calls(), 2);
}

#[tokio::test]
async fn test_empty_search_query_is_precondition() {
    let stub = Arc::new(StubFetcher::default());
    let client = client(&stub);

    let err = client.tracks.search("  ", &SearchOptions::default()).await.unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_album_tracks_listing() {
    let stub = Arc::new(StubFetcher::default().with(
        "/albums/abc123/tracks",
        Reply::Body(json!({
            "items": [
                { "id": "t1", "name": "One More Time", "track_number": 1 },
                { "id": "t2", "name": "Aerodynamic", "track_number": 2 }
            ],
            "total": 2
        })),
    ));
    let client = client(&stub);

    let tracks = client
        .albums
        .get_tracks("abc123", &PageOptions::limit(2))
        .await
        .unwrap();

    assert_eq!(tracks.len(), 2);
    assert!(!tracks[0].is_full());
    assert_eq!(stub.last().param_value("limit"), Some("2"));
}

#[tokio::test]
async fn test_missing_listing_is_empty() {
    let stub = Arc::new(StubFetcher::default());
    let client = client(&stub);

    let albums = client
        .artists
        .get_albums("nobody", &PageOptions::default(), None)
        .await
        .unwrap();
    assert!(albums.is_empty());
}

#[tokio::test]
async fn test_playlist_warms_item_caches() {
    let playlist = json!({
        "id": "p1",
        "name": "Mix",
        "owner": { "id": "u1", "display_name": "Owner" },
        "followers": { "total": 3 },
        "tracks": {
            "total": 2,
            "items": [
                {
                    "added_at": "2024-05-01T10:00:00Z",
                    "track": {
                        "type": "track",
                        "id": "t1",
                        "name": "Song",
                        "album": { "id": "al1", "name": "Album" }
                    }
                },
                {
                    "added_at": "2024-05-02T10:00:00Z",
                    "track": {
                        "type": "episode",
                        "id": "e1",
                        "name": "Episode",
                        "show": { "id": "s1", "name": "Show" }
                    }
                }
            ]
        }
    });
    let stub = Arc::new(StubFetcher::default().with("/playlists/p1", Reply::Body(playlist)));
    let client = client(&stub);

    let playlist = client.playlists.get("p1", false, None).await.unwrap().unwrap();
    assert_eq!(playlist.items().len(), 2);

    assert!(client.cache().has::<Playlist>("p1"));
    assert!(client.cache().has::<Track>("t1"));
    assert!(client.cache().has::<Episode>("e1"));

    // served from the warmed cache
    let track = client.tracks.get("t1", false, None).await.unwrap().unwrap();
    assert_eq!(track.album().unwrap().id, "al1");
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_disabled_kind_always_fetches() {
    let stub = Arc::new(
        StubFetcher::default()
            .with("/artists/a1", Reply::Body(artist_payload("One")))
            .with("/albums/abc123", Reply::Body(album_payload())),
    );
    let client = Client::with_fetcher(
        stub.clone(),
        CacheSettings::from_kinds([EntityKind::Album]),
    );

    client.artists.get("a1", false).await.unwrap();
    client.artists.get("a1", false).await.unwrap();
    assert_eq!(stub.calls(), 2);
    assert_eq!(client.cache().len(EntityKind::Artist), 0);

    client.albums.get("abc123", false, None).await.unwrap();
    client.albums.get("abc123", false, None).await.unwrap();
    assert_eq!(stub.calls(), 3);
    assert_eq!(client.cache().len(EntityKind::Album), 1);
}

#[tokio::test]
async fn test_entity_fetch_forces_refresh() {
    let stub = Arc::new(
        StubFetcher::default().with("/artists/a1", Reply::Body(artist_payload("One"))),
    );
    let client = client(&stub);

    let artist = client.artists.get("a1", false).await.unwrap().unwrap();
    stub.set("/artists/a1", Reply::Body(artist_payload("Renamed")));

    let refreshed = artist.fetch(&client).await.unwrap().unwrap();

    assert_eq!(stub.calls(), 2);
    assert_eq!(refreshed.name, "Renamed");
    assert_eq!(client.cache().get::<Artist>("a1").unwrap().name, "Renamed");
}

#[tokio::test]
async fn test_me_is_cached_under_real_id() {
    let stub = Arc::new(StubFetcher::default().with(
        "/me",
        Reply::Body(json!({ "id": "u1", "display_name": "Me", "followers": { "total": 1 } })),
    ));
    let client = client(&stub);

    let me = client.users.me().await.unwrap().unwrap();
    assert_eq!(me.id, "u1");

    client.users.get("u1", false).await.unwrap().unwrap();
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_playlist_mutations() {
    let stub = Arc::new(
        StubFetcher::default()
            .with(
                "/users/u1/playlists",
                Reply::Body(json!({ "id": "p9", "name": "New", "owner": { "id": "u1" } })),
            )
            .with("/playlists/p9/tracks", Reply::Body(json!({ "snapshot_id": "snap2" }))),
    );
    let client = client(&stub);

    let created = client
        .playlists
        .create("u1", &NewPlaylist::private("New", "made by tests"))
        .await
        .unwrap();
    assert_eq!(created.id, "p9");
    assert_eq!(stub.last().method, Method::POST);
    assert_eq!(stub.last().body.unwrap()["public"], json!(false));
    assert!(client.cache().has::<Playlist>("p9"));

    let snapshot = client
        .playlists
        .add_items("p9", &["spotify:track:t1"], Some(0))
        .await
        .unwrap();
    assert_eq!(snapshot, "snap2");
    assert_eq!(stub.last().body.unwrap()["position"], json!(0));

    client
        .playlists
        .remove_items("p9", &["spotify:track:t1"], Some("snap2"))
        .await
        .unwrap();
    let request = stub.last();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.body.unwrap()["tracks"][0]["uri"], "spotify:track:t1");

    let too_many = vec!["spotify:track:t1"; 101];
    let err = client.playlists.add_items("p9", &too_many, None).await.unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));
}

#[tokio::test]
async fn test_malformed_lookup_is_decode_error() {
    let stub = Arc::new(StubFetcher::default().with(
        "/albums/abc123",
        Reply::Body(json!({ "id": "abc123", "name": ["not", "a", "string"] })),
    ));
    let client = client(&stub);

    let err = client.albums.get("abc123", false, None).await.unwrap_err();

    assert!(matches!(err, Error::Decode(_)));
    assert!(err.is_unexpected());
    assert!(!client.cache().has::<Album>("abc123"));
}

#[tokio::test]
async fn test_unexpected_shapes_are_decode_errors() {
    let body = Reply::Body(json!({ "unexpected": true }));
    let stub = Arc::new(
        StubFetcher::default()
            .with("/albums", body.clone())
            .with("/search", body.clone())
            .with("/shows/s1/episodes", body.clone())
            .with("/playlists/p1/tracks", body),
    );
    let client = client(&stub);

    let err = client.albums.get_multiple(&["a", "b"], None).await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)));

    let err = client
        .tracks
        .search("x", &SearchOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode(_)));

    let err = client
        .shows
        .get_episodes("s1", &PageOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_unexpected());

    let err = client
        .playlists
        .get_tracks("p1", &PageOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn test_wrong_shape_listing_is_decode_error() {
    let stub = Arc::new(StubFetcher::default().with(
        "/albums/abc123/tracks",
        Reply::Body(json!({ "items": { "id": "t1" } })),
    ));
    let client = client(&stub);

    let err = client
        .albums
        .get_tracks("abc123", &PageOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn test_null_listing_is_empty() {
    let stub = Arc::new(StubFetcher::default().with(
        "/search",
        Reply::Body(json!({ "episodes": null })),
    ));
    let client = client(&stub);

    let found = client
        .episodes
        .search("talk", &SearchOptions::default())
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_relinked_track_is_cached_under_requested_id() {
    let stub = Arc::new(StubFetcher::default().with(
        "/tracks/original",
        Reply::Body(json!({
            "id": "relinked",
            "name": "Song",
            "linked_from": { "id": "original" }
        })),
    ));
    let client = client(&stub);

    let track = client.tracks.get("original", false, Some("DE")).await.unwrap().unwrap();
    assert_eq!(track.id, "relinked");

    let again = client.tracks.get("original", false, Some("DE")).await.unwrap().unwrap();
    assert_eq!(stub.calls(), 1);
    assert!(Arc::ptr_eq(&track, &again));
    assert!(client.cache().has::<Track>("relinked"));
}
