//! Artifact storage
//!
//! Rendered labels are plain HTML files under one output directory,
//! named by order id and timestamp so reprints of the same order never
//! collide. Artifacts are retained after dispatch.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Filesystem store for rendered label artifacts
#[derive(Debug, Clone)]
pub struct LabelStorage {
    output_dir: PathBuf,
}

impl LabelStorage {
    /// Open the store, creating the output directory if needed.
    pub fn open(output_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Persist a rendered label. The timestamped name keeps reprints of
    /// the same order unique.
    pub fn persist(&self, order_id: i64, html: &str) -> StorageResult<PathBuf> {
        let filename = format!("order-{}-{}.html", order_id, shared::util::now_millis());
        let path = self.output_dir.join(filename);
        std::fs::write(&path, html)?;
        info!(path = %path.display(), "Label saved");
        Ok(path)
    }

    /// Resolve a served basename to an artifact path.
    ///
    /// Only bare `*.html` basenames resolve; path components and
    /// traversal sequences are rejected so the serving route cannot
    /// escape the output directory.
    pub fn lookup(&self, basename: &str) -> Option<PathBuf> {
        if basename.contains(['/', '\\']) || basename.contains("..") {
            return None;
        }
        if !basename.ends_with(".html") {
            return None;
        }

        let path = self.output_dir.join(basename);
        path.is_file().then_some(path)
    }
}
