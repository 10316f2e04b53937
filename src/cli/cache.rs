use tabled::Table;

use crate::{cache::EntityKind, config, error, types::CacheTableRow};

/// Shows the cache settings resolved from `SPORLKIT_CACHE`.
pub async fn cache() {
    let settings = match config::cache_settings() {
        Ok(s) => s,
        Err(e) => error!("Invalid cache configuration. Err: {}", e),
    };

    let rows: Vec<CacheTableRow> = EntityKind::ALL
        .iter()
        .map(|kind| CacheTableRow {
            kind: kind.plural().to_string(),
            enabled: if settings.is_enabled(*kind) { "yes" } else { "no" }.to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
}
