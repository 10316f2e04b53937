use crate::{error, utils};

/// Prints the scannable code image url for `uri`.
pub async fn code(uri: &str, color: &str) {
    let uri = uri.trim();
    if !uri.starts_with("spotify:") {
        error!("Expected a spotify uri like spotify:track:<id>, got '{}'", uri);
    }

    match utils::code_image_url(uri, color) {
        Ok(url) => println!("{}", url),
        Err(e) => error!("Cannot build code image url. Err: {}", e),
    }
}
