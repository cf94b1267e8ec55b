//! # pelican-printer
//!
//! Print dispatch library - getting a rendered label onto paper.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - External tool discovery (headless browser, silent PDF printer)
//! - The PDF print pipeline with fallback to manual printing
//! - The platform open-handler fallback
//!
//! Business logic (WHAT to print) stays in application code:
//! - Label rendering → pelican-agent
//!
//! ## Example
//!
//! ```ignore
//! use pelican_printer::{Dispatcher, LabelDispatch};
//!
//! // Pick the best chain for this host, once at startup
//! let dispatcher = Dispatcher::detect();
//!
//! // Dispatch degrades instead of failing: worst case the artifact is
//! // opened for manual printing
//! let outcome = dispatcher.dispatch(&artifact_path).await;
//! if outcome.is_auto() {
//!     println!("sent to printer");
//! }
//! ```

mod dispatch;
mod error;
mod locate;

// Re-exports
pub use dispatch::{DispatchOutcome, Dispatcher, LabelDispatch, OpenHandler, PdfPipeline};
pub use error::{DispatchError, DispatchResult};
pub use locate::{Tool, candidate_paths, locate};
