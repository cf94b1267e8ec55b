//! Dispatch strategies for rendered labels
//!
//! Per dispatch call the chain is linear with fallback edges:
//!
//! ```text
//! render PDF (headless browser)
//!   ok  -> silent print (PDF utility) -> auto-printed
//!                               fail  -> open PDF in viewer (manual)
//!   fail -> open artifact in browser (manual)
//! ```
//!
//! Every external process is awaited with a timeout, so the caller's
//! sequencing (acknowledge, inter-order delay) stays causally ordered.
//! Dispatch never fails: exhausting the chain still leaves the user with
//! an openable artifact.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tempfile::TempPath;
use tokio::process::Command;
use tracing::{info, instrument, warn};

use crate::error::{DispatchError, DispatchResult};
use crate::locate::{Tool, locate};

/// Default wait for an external tool to exit.
const TOOL_TIMEOUT: Duration = Duration::from_secs(20);

/// How a dispatch call got the label out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Sent to the default printer without user interaction.
    AutoPrinted,
    /// Handed to a viewer or browser; the user prints manually.
    OpenedForManual {
        /// What was opened: the intermediate PDF or the original artifact.
        target: PathBuf,
    },
}

impl DispatchOutcome {
    /// Whether the label reached the printer without user interaction.
    pub fn is_auto(&self) -> bool {
        matches!(self, DispatchOutcome::AutoPrinted)
    }
}

/// Trait for dispatch strategies
#[allow(async_fn_in_trait)]
pub trait LabelDispatch {
    /// Send the artifact at `path` toward paper.
    ///
    /// Degrades instead of failing: the worst outcome is the artifact
    /// opened for manual printing.
    async fn dispatch(&self, artifact: &Path) -> DispatchOutcome;
}

/// Fallback dispatcher: hand the artifact to the platform open handler
/// and let the user print from whatever application claims it.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenHandler;

impl OpenHandler {
    async fn open(&self, path: &Path) -> DispatchResult<()> {
        let mut cmd = open_command(path);
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
        run_with_timeout(cmd, TOOL_TIMEOUT, "open handler").await?;
        Ok(())
    }
}

impl LabelDispatch for OpenHandler {
    #[instrument(skip(self), fields(artifact = %artifact.display()))]
    async fn dispatch(&self, artifact: &Path) -> DispatchOutcome {
        match self.open(artifact).await {
            Ok(()) => info!("Opened for manual printing"),
            Err(e) => warn!(error = %e, "Could not open artifact"),
        }
        DispatchOutcome::OpenedForManual {
            target: artifact.to_path_buf(),
        }
    }
}

/// Primary dispatcher: headless-browser PDF render, then silent print,
/// degrading to opening whatever stage last succeeded.
#[derive(Debug, Clone)]
pub struct PdfPipeline {
    pdf_renderer: Option<PathBuf>,
    silent_printer: Option<PathBuf>,
    timeout: Duration,
    opener: OpenHandler,
}

impl PdfPipeline {
    /// Probe the host for the pipeline tools.
    pub fn detect() -> Self {
        Self::with_tools(locate(Tool::PdfRenderer), locate(Tool::SilentPrinter))
    }

    /// Build a pipeline with explicit tool paths.
    ///
    /// `None` for a tool means "not installed" and triggers the same
    /// fallback as a failed probe.
    pub fn with_tools(pdf_renderer: Option<PathBuf>, silent_printer: Option<PathBuf>) -> Self {
        Self {
            pdf_renderer,
            silent_printer,
            timeout: TOOL_TIMEOUT,
            opener: OpenHandler,
        }
    }

    /// Set the per-tool wait timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Render the artifact to a PDF next to it.
    ///
    /// The returned guard deletes the PDF on drop; callers that hand the
    /// file to a viewer must `keep()` it.
    async fn generate_pdf(
        &self,
        renderer: &Path,
        artifact: &Path,
        pdf: &Path,
    ) -> DispatchResult<TempPath> {
        let guard = TempPath::from_path(pdf.to_path_buf());

        let mut cmd = Command::new(renderer);
        cmd.arg("--headless")
            .arg("--disable-gpu")
            .arg(format!("--print-to-pdf={}", pdf.display()))
            .arg(file_url(artifact))
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // A failed run drops the guard and removes any partial output
        let status = run_with_timeout(cmd, self.timeout, "pdf render").await?;
        if !status.success() {
            return Err(DispatchError::PdfGeneration(format!(
                "renderer exited with {status}"
            )));
        }
        if !pdf.exists() {
            return Err(DispatchError::PdfGeneration(
                "renderer exited cleanly but produced no output".to_string(),
            ));
        }

        Ok(guard)
    }

    /// Send a PDF to the default printer without a dialog.
    async fn silent_print(&self, printer: &Path, pdf: &Path) -> DispatchResult<()> {
        let mut cmd = Command::new(printer);
        cmd.arg("-print-to-default")
            .arg("-silent")
            .arg(pdf)
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let status = run_with_timeout(cmd, self.timeout, "silent print").await?;
        if !status.success() {
            return Err(DispatchError::ToolFailed(format!(
                "silent printer exited with {status}"
            )));
        }
        Ok(())
    }

    /// Keep the intermediate PDF and open it for manual printing.
    async fn open_pdf(&self, guard: TempPath, artifact: &Path) -> DispatchOutcome {
        match guard.keep() {
            Ok(pdf) => self.opener.dispatch(&pdf).await,
            Err(e) => {
                // Keeping failed; the guard is gone, fall back to the source
                warn!(error = %e, "Could not retain intermediate PDF");
                self.opener.dispatch(artifact).await
            }
        }
    }
}

impl LabelDispatch for PdfPipeline {
    #[instrument(skip(self), fields(artifact = %artifact.display()))]
    async fn dispatch(&self, artifact: &Path) -> DispatchOutcome {
        let Some(renderer) = self.pdf_renderer.clone() else {
            info!("PDF renderer not available, opening artifact directly");
            return self.opener.dispatch(artifact).await;
        };

        let pdf = artifact.with_extension("pdf");
        let guard = match self.generate_pdf(&renderer, artifact, &pdf).await {
            Ok(guard) => guard,
            Err(e) => {
                warn!(error = %e, "PDF generation failed, opening artifact directly");
                return self.opener.dispatch(artifact).await;
            }
        };

        let Some(printer) = self.silent_printer.clone() else {
            info!("Silent printer not available, opening PDF for manual printing");
            return self.open_pdf(guard, artifact).await;
        };

        match self.silent_print(&printer, &pdf).await {
            Ok(()) => {
                info!(pdf = %pdf.display(), "Label sent to default printer");
                // Guard drop removes the spooled intermediate PDF
                DispatchOutcome::AutoPrinted
            }
            Err(e) => {
                warn!(error = %e, "Silent print failed, opening PDF for manual printing");
                self.open_pdf(guard, artifact).await
            }
        }
    }
}

/// Platform dispatcher, selected once at startup.
#[derive(Debug, Clone)]
pub enum Dispatcher {
    /// Windows-class host: PDF pipeline with fallbacks.
    Pdf(PdfPipeline),
    /// Everything else: hand the artifact to the platform open handler.
    Open(OpenHandler),
}

impl Dispatcher {
    /// Pick the best chain for this host.
    pub fn detect() -> Self {
        if cfg!(windows) {
            Dispatcher::Pdf(PdfPipeline::detect())
        } else {
            Dispatcher::Open(OpenHandler)
        }
    }
}

impl LabelDispatch for Dispatcher {
    async fn dispatch(&self, artifact: &Path) -> DispatchOutcome {
        match self {
            Dispatcher::Pdf(pipeline) => pipeline.dispatch(artifact).await,
            Dispatcher::Open(handler) => handler.dispatch(artifact).await,
        }
    }
}

/// Spawn a command and await its exit, killing it on timeout.
async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    what: &str,
) -> DispatchResult<std::process::ExitStatus> {
    let mut child = cmd.spawn()?;

    match tokio::time::timeout(timeout, child.wait()).await {
        Ok(Ok(status)) => Ok(status),
        Ok(Err(e)) => Err(DispatchError::Io(e)),
        Err(_) => {
            let _ = child.kill().await;
            Err(DispatchError::Timeout(what.to_string()))
        }
    }
}

/// Platform open command for an arbitrary file.
fn open_command(path: &Path) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg("start").arg("").arg(path);
        cmd
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// `file://` URL for a local path (headless browsers want URLs, not paths).
fn file_url(path: &Path) -> String {
    let p = path.display().to_string().replace('\\', "/");
    if p.starts_with('/') {
        format!("file://{p}")
    } else {
        format!("file:///{p}")
    }
}
