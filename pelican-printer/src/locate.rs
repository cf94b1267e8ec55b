//! External tool discovery
//!
//! Probes a fixed ordered list of well-known install paths for each
//! tool. First existing path wins. Absence is not an error, it's the
//! signal to fall back to a less automatic strategy.

use std::path::PathBuf;
use tracing::{debug, info};

/// External tools the dispatch chain can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Headless browser able to render HTML to PDF.
    PdfRenderer,
    /// Utility that prints a PDF to the default printer without a dialog.
    SilentPrinter,
}

impl Tool {
    /// Human-readable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Tool::PdfRenderer => "PDF renderer (headless Chrome)",
            Tool::SilentPrinter => "silent PDF printer (SumatraPDF)",
        }
    }
}

/// Well-known install paths for a tool, most common first.
///
/// Only Windows-class hosts carry the PDF pipeline tools; elsewhere the
/// list is empty and the chain collapses to the open handler.
pub fn candidate_paths(tool: Tool) -> Vec<PathBuf> {
    if !cfg!(windows) {
        return Vec::new();
    }

    let mut paths = match tool {
        Tool::PdfRenderer => vec![
            PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
            PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
        ],
        Tool::SilentPrinter => vec![
            PathBuf::from(r"C:\Program Files\SumatraPDF\SumatraPDF.exe"),
            PathBuf::from(r"C:\Program Files (x86)\SumatraPDF\SumatraPDF.exe"),
        ],
    };

    // Per-user installs land under LOCALAPPDATA
    if let Ok(local) = std::env::var("LOCALAPPDATA") {
        let local = PathBuf::from(local);
        match tool {
            Tool::PdfRenderer => paths.push(local.join(r"Google\Chrome\Application\chrome.exe")),
            Tool::SilentPrinter => paths.push(local.join(r"Programs\SumatraPDF\SumatraPDF.exe")),
        }
    }

    paths
}

/// Probe for a tool. Returns the first existing candidate path.
pub fn locate(tool: Tool) -> Option<PathBuf> {
    for path in candidate_paths(tool) {
        if path.exists() {
            info!(tool = tool.name(), path = %path.display(), "Located external tool");
            return Some(path);
        }
    }

    debug!(tool = tool.name(), "Tool not found on this host");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(windows))]
    fn test_no_candidates_off_windows() {
        assert!(candidate_paths(Tool::PdfRenderer).is_empty());
        assert!(candidate_paths(Tool::SilentPrinter).is_empty());
        assert!(locate(Tool::PdfRenderer).is_none());
    }

    #[test]
    #[cfg(windows)]
    fn test_candidates_are_absolute() {
        for tool in [Tool::PdfRenderer, Tool::SilentPrinter] {
            let paths = candidate_paths(tool);
            assert!(!paths.is_empty());
            assert!(paths.iter().all(|p| p.is_absolute()));
        }
    }
}
