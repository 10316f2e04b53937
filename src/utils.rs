use std::{collections::BTreeSet, fmt};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::{
    cache::{CacheSettings, EntityKind},
    error::{Error, Res},
};

/// Spotify green, the default background of code images.
pub const DEFAULT_CODE_COLOR: &str = "1DB954";

const SCANNABLES_URL: &str = "https://scannables.scdn.co/uri/plain/jpeg";

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Parses a `RRGGBB` color, with or without a leading `#`.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Builds the url of a scannable Spotify code for `uri`.
///
/// The bar overlay is black on backgrounds whose red channel is above 150
/// and white otherwise.
pub fn code_image_url(uri: &str, color: &str) -> Res<String> {
    let (red, _, _) = hex_to_rgb(color)
        .ok_or_else(|| Error::precondition(format!("invalid hex color '{}'", color)))?;
    let overlay = if red > 150 { "black" } else { "white" };

    Ok(format!(
        "{base}/{color}/{overlay}/1080/{uri}",
        base = SCANNABLES_URL,
        color = color.trim().trim_start_matches('#'),
        overlay = overlay,
        uri = uri
    ))
}

/// A sorted, de-duplicated set of entity kinds, as given on the command line
/// or in `SPORLKIT_CACHE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityKinds(pub BTreeSet<EntityKind>);

impl EntityKinds {
    pub fn iter(&self) -> impl Iterator<Item = EntityKind> + '_ {
        self.0.iter().copied()
    }

    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings::from_kinds(self.iter())
    }
}

impl Default for EntityKinds {
    fn default() -> Self {
        EntityKinds(EntityKind::ALL.into_iter().collect())
    }
}

impl fmt::Display for EntityKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|k| k.as_str()).collect();
        f.write_str(&names.join(","))
    }
}

/// Parses a comma separated list of entity kinds.
///
/// Accepts singular or plural names in any case, plus the keywords `all`
/// and `none`.
pub fn parse_entity_kinds(input: &str) -> Result<EntityKinds, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("entity kinds cannot be empty".to_string());
    }

    match input.to_ascii_lowercase().as_str() {
        "all" => return Ok(EntityKinds::default()),
        "none" => return Ok(EntityKinds(BTreeSet::new())),
        _ => {}
    }

    let mut kinds = BTreeSet::new();
    for segment in input.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            return Err(format!("empty segment in '{}'", input));
        }
        let kind = segment
            .parse::<EntityKind>()
            .map_err(|_| format!("invalid value '{}'", segment))?;
        kinds.insert(kind);
    }

    Ok(EntityKinds(kinds))
}

/// Parses a single entity kind (clap value parser).
pub fn parse_entity_kind(input: &str) -> Result<EntityKind, String> {
    input.parse::<EntityKind>()
}

/// Extracts the id from a `spotify:<type>:<id>` uri or an
/// `open.spotify.com/<type>/<id>` link. Plain ids are returned unchanged.
pub fn id_from_uri(input: &str) -> &str {
    let input = input.trim();
    if let Some(rest) = input.strip_prefix("spotify:") {
        return rest.rsplit(':').next().unwrap_or(rest);
    }
    if input.contains("open.spotify.com/") {
        let path = input.split('?').next().unwrap_or(input);
        return path.trim_end_matches('/').rsplit('/').next().unwrap_or(path);
    }
    input
}

pub fn format_duration(duration_ms: u64) -> String {
    let total_secs = duration_ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
