use serde_json::{Value, json};
use sporlkit::model::{
    Album, Artist, Category, Entity, Episode, Fidelity, Playlist, PlaylistItem, Scannable, Show,
    Track, User,
};

fn simplified_artist() -> Value {
    json!({
        "id": "4tZwfgrHOc3mvqYlEYSvVi",
        "name": "Daft Punk",
        "type": "artist",
        "uri": "spotify:artist:4tZwfgrHOc3mvqYlEYSvVi",
        "href": "https://api.spotify.com/v1/artists/4tZwfgrHOc3mvqYlEYSvVi",
        "external_urls": { "spotify": "https://open.spotify.com/artist/4tZwfgrHOc3mvqYlEYSvVi" }
    })
}

fn full_artist() -> Value {
    let mut artist = simplified_artist();
    artist["popularity"] = json!(77);
    artist["followers"] = json!({ "href": null, "total": 9_000_000 });
    artist["genres"] = json!(["electro", "french house"]);
    artist["images"] = json!([{ "url": "https://i.scdn.co/image/ab67", "height": 640, "width": 640 }]);
    artist
}

#[test]
fn test_artist_fidelity_branch() {
    let simple = Artist::from_value(simplified_artist()).unwrap();
    let full = Artist::from_value(full_artist()).unwrap();

    assert!(!simple.is_full());
    assert!(simple.details().is_none());
    assert!(simple.genres().is_empty());

    assert!(full.is_full());
    let details = full.details().unwrap();
    assert_eq!(details.popularity, 77);
    assert_eq!(details.followers, 9_000_000);
    assert_eq!(details.images.len(), 1);
    assert_eq!(full.genres(), ["electro", "french house"]);

    // shared fields agree
    assert_eq!(simple.id, full.id);
    assert_eq!(simple.name, full.name);
    assert_eq!(simple.uri, full.uri);
    assert_eq!(simple.href, full.href);
    assert_eq!(simple.external_urls, full.external_urls);
}

#[test]
fn test_zero_popularity_is_still_full() {
    let mut artist = simplified_artist();
    artist["popularity"] = json!(0);
    assert!(Artist::from_value(artist).unwrap().is_full());
}

#[test]
fn test_album_materializes_nested_tracks() {
    let album = Album::from_value(json!({
        "id": "2noRn2Aes5aoNVsU6iWThc",
        "name": "Discovery",
        "album_type": "album",
        "release_date": "2001-03-12",
        "release_date_precision": "day",
        "total_tracks": 2,
        "artists": [simplified_artist()],
        "label": "Parlophone",
        "copyrights": [{ "text": "(P) 2001 Daft Life", "type": "P" }],
        "tracks": {
            "total": 2,
            "items": [
                { "id": "0DiWol3AO6WpXZgp0goxAV", "name": "One More Time", "track_number": 1, "duration_ms": 320357, "artists": [simplified_artist()] },
                { "id": "2VEZx7NWsZ1D0eJ4uv5Fym", "name": "Aerodynamic", "track_number": 2, "duration_ms": 212546 }
            ]
        }
    }))
    .unwrap();

    assert!(album.is_full());
    assert_eq!(album.artist_names(), ["Daft Punk"]);

    let details = album.details().unwrap();
    assert_eq!(details.label, "Parlophone");
    assert_eq!(details.copyrights[0].kind, "P");

    let tracks = album.tracks();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].name, "One More Time");
    assert_eq!(tracks[0].artists[0].id, "4tZwfgrHOc3mvqYlEYSvVi");
    // embedded album tracks carry no album, so they are simplified
    assert!(tracks.iter().all(|t| !t.is_full() && t.album().is_none()));
}

#[test]
fn test_simplified_album_has_no_tracks() {
    let album =
        Album::from_value(json!({ "id": "al1", "name": "Homework", "total_tracks": 16 })).unwrap();
    assert!(!album.is_full());
    assert!(album.tracks().is_empty());
    assert_eq!(album.total_tracks, 16);
}

#[test]
fn test_full_track_embeds_simplified_album() {
    let track = Track::from_value(json!({
        "id": "t1",
        "name": "Digital Love",
        "popularity": 60,
        "external_ids": { "isrc": "GBDUW0000053" },
        "album": { "id": "al1", "name": "Discovery", "artists": [simplified_artist()] }
    }))
    .unwrap();

    assert!(track.is_full());
    let album = track.album().unwrap();
    assert_eq!(album.id, "al1");
    assert!(!album.is_full());
    assert_eq!(track.details().unwrap().external_ids["isrc"], "GBDUW0000053");
}

#[test]
fn test_local_track_has_empty_id() {
    let track = Track::from_value(json!({ "id": null, "name": "Demo", "is_local": true })).unwrap();
    assert!(track.id.is_empty());
    assert!(track.is_local);
}

#[test]
fn test_null_fields_fall_back_to_defaults() {
    let track = Track::from_value(json!({
        "id": "t1",
        "name": null,
        "artists": null,
        "duration_ms": null,
        "available_markets": null
    }))
    .unwrap();

    assert_eq!(track.name, "");
    assert!(track.artists.is_empty());
    assert_eq!(track.duration_ms, 0);
}

#[test]
fn test_episode_with_show() {
    let full = Episode::from_value(json!({
        "id": "e1",
        "name": "Episode 1",
        "duration_ms": 1_800_000,
        "resume_point": { "fully_played": false, "resume_position_ms": 1000 },
        "show": { "id": "s1", "name": "The Show", "publisher": "Someone" }
    }))
    .unwrap();
    assert!(full.is_full());
    assert_eq!(full.show().unwrap().publisher, "Someone");
    assert_eq!(full.resume_point.as_ref().unwrap().resume_position_ms, 1000);

    let simple = Episode::from_value(json!({ "id": "e1", "name": "Episode 1" })).unwrap();
    assert!(!simple.is_full());
    assert!(simple.show().is_none());
}

#[test]
fn test_show_with_episodes() {
    let show = Show::from_value(json!({
        "id": "s1",
        "name": "The Show",
        "total_episodes": 2,
        "episodes": { "items": [{ "id": "e1", "name": "One" }, { "id": "e2", "name": "Two" }] }
    }))
    .unwrap();

    assert!(show.is_full());
    assert_eq!(show.episodes().len(), 2);
    assert!(show.episodes().iter().all(|e| !e.is_full()));
}

#[test]
fn test_user_fidelity() {
    let owner = User::from_value(json!({ "id": "u1" })).unwrap();
    assert!(!owner.is_full());
    assert_eq!(owner.name(), "u1");

    let profile = User::from_value(json!({
        "id": "u1",
        "display_name": "Someone",
        "followers": { "total": 42 },
        "country": "DE"
    }))
    .unwrap();
    assert!(profile.is_full());
    assert_eq!(profile.name(), "Someone");
    assert_eq!(profile.details().unwrap().country.as_deref(), Some("DE"));
}

#[test]
fn test_playlist_with_mixed_items() {
    let playlist = Playlist::from_value(json!({
        "id": "p1",
        "name": "Mixed",
        "snapshot_id": "snap1",
        "owner": { "id": "u1", "display_name": "Owner" },
        "followers": { "total": 3 },
        "tracks": {
            "total": 3,
            "items": [
                {
                    "added_at": "2024-05-01T10:00:00Z",
                    "added_by": { "id": "u1" },
                    "track": { "type": "track", "id": "t1", "name": "Song", "album": { "id": "al1" } }
                },
                {
                    "added_at": "2024-05-02T10:00:00Z",
                    "track": { "type": "episode", "id": "e1", "name": "Talk" }
                },
                { "added_at": null, "track": null }
            ]
        }
    }))
    .unwrap();

    assert!(playlist.is_full());
    assert_eq!(playlist.owner.name(), "Owner");
    assert_eq!(playlist.total_tracks, 3);
    assert_eq!(playlist.details().unwrap().followers, 3);

    let items = playlist.items();
    assert_eq!(items.len(), 3);
    assert!(matches!(items[0].item, Some(PlaylistItem::Track(_))));
    assert_eq!(items[0].track().unwrap().album().unwrap().id, "al1");
    assert_eq!(items[0].added_by.as_ref().unwrap().id, "u1");
    assert_eq!(items[1].episode().unwrap().name, "Talk");
    assert_eq!(items[1].item.as_ref().unwrap().uri(), "");
    assert!(items[2].item.is_none());

    let added = items[0].added_at().unwrap();
    assert_eq!(added.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    assert!(items[2].added_at().is_none());
}

#[test]
fn test_simplified_playlist() {
    let playlist = Playlist::from_value(json!({
        "id": "p1",
        "name": "Listed",
        "owner": { "id": "u1" },
        "tracks": { "href": "https://api.spotify.com/v1/playlists/p1/tracks", "total": 12 }
    }))
    .unwrap();

    assert!(!playlist.is_full());
    assert!(playlist.items().is_empty());
    assert_eq!(playlist.total_tracks, 12);
}

#[test]
fn test_category_is_always_full() {
    let category = Category::from_value(json!({
        "id": "dinner",
        "name": "Dinner",
        "icons": [{ "url": "https://t.scdn.co/images/dinner.jpg" }]
    }))
    .unwrap();
    assert!(category.is_full());
    assert_eq!(category.icons.len(), 1);
}

#[test]
fn test_make_code_image() {
    let artist = Artist::from_value(simplified_artist()).unwrap();
    let same = Artist::from_value(full_artist()).unwrap();

    let white = artist.make_code_image("000000").unwrap();
    assert_eq!(white, same.make_code_image("000000").unwrap());
    assert_eq!(
        white,
        "https://scannables.scdn.co/uri/plain/jpeg/000000/white/1080/spotify:artist:4tZwfgrHOc3mvqYlEYSvVi"
    );

    let black = artist.make_code_image("FFFFFF").unwrap();
    assert_eq!(
        black,
        "https://scannables.scdn.co/uri/plain/jpeg/FFFFFF/black/1080/spotify:artist:4tZwfgrHOc3mvqYlEYSvVi"
    );
}

#[test]
fn test_fidelity_accessors() {
    let full: Fidelity<u32> = Fidelity::Full(3);
    assert!(full.is_full());
    assert_eq!(full.full(), Some(&3));

    let simple: Fidelity<u32> = Fidelity::Simplified;
    assert!(!simple.is_full());
    assert_eq!(simple.full(), None);
}

#[test]
fn test_playlist_entries_of_unknown_type_have_no_item() {
    let playlist = Playlist::from_value(json!({
        "id": "p1",
        "name": "Odd",
        "owner": { "id": "u1" },
        "tracks": {
            "total": 3,
            "items": [
                { "track": { "type": "ad", "id": "x1" } },
                { "track": { "id": "x2", "name": "No type" } },
                { "track": { "type": "track", "id": "t1", "name": "Song" } }
            ]
        }
    }))
    .unwrap();

    let items = playlist.items();
    assert_eq!(items.len(), 3);
    assert!(items[0].item.is_none());
    assert!(items[1].item.is_none());
    assert_eq!(items[2].track().unwrap().id, "t1");
}

#[test]
fn test_playlist_entry_with_bad_track_shape_fails() {
    let result = Playlist::from_value(json!({
        "id": "p1",
        "owner": { "id": "u1" },
        "tracks": { "items": [{ "track": { "type": "track", "id": "t1", "duration_ms": "long" } }] }
    }));
    assert!(result.is_err());
}

#[test]
fn test_make_default_code_image() {
    let track = Track::from_value(json!({ "id": "t1", "uri": "spotify:track:t1" })).unwrap();

    assert_eq!(
        track.make_default_code_image().unwrap(),
        track.make_code_image("1DB954").unwrap()
    );
    assert_eq!(
        track.make_default_code_image().unwrap(),
        "https://scannables.scdn.co/uri/plain/jpeg/1DB954/white/1080/spotify:track:t1"
    );
}
