use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    /// Empty for client-credentials tokens, which cannot be refreshed.
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

#[derive(Tabled)]
pub struct EntityTableRow {
    pub kind: String,
    pub id: String,
    pub name: String,
    pub detail: String,
    pub fidelity: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub number: String,
    pub name: String,
    pub artists: String,
    pub duration: String,
}

#[derive(Tabled)]
pub struct CacheTableRow {
    pub kind: String,
    pub enabled: String,
}
