//! Inline image assets
//!
//! The label document is self-contained: every image is embedded as a
//! base64 data URI at render time. A missing asset file means that image
//! is omitted from the label, never an error.

use std::path::{Path, PathBuf};

use base64::Engine;
use tracing::debug;

/// Shop logo, printed in the label header.
pub const LOGO: &str = "logo.png";
/// "Keep chilled" handling icon.
pub const ICON_CHILLED: &str = "chilled.png";
/// "Fragile" handling icon.
pub const ICON_FRAGILE: &str = "fragile.png";

/// Fixed set of named image assets read from local storage.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    dir: PathBuf,
}

impl AssetCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Read an asset and inline it as a data URI.
    ///
    /// Returns `None` when the file is missing or unreadable.
    pub fn data_uri(&self, name: &str) -> Option<String> {
        let path = self.dir.join(name);
        match std::fs::read(&path) {
            Ok(bytes) => Some(file_data_uri(&path, &bytes)),
            Err(e) => {
                debug!(asset = name, error = %e, "Asset unavailable, omitting");
                None
            }
        }
    }
}

/// Data URI with the mime type guessed from the file name.
fn file_data_uri(path: &Path, bytes: &[u8]) -> String {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Data URI for generated PNG bytes.
pub(crate) fn png_data_uri(bytes: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}
