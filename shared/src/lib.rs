//! Shared types for the Pelican print agent
//!
//! Domain model and wire types used across the agent and the dispatch
//! layer: orders as the remote feed delivers them, response shapes for
//! the local callback API, and the formatting helpers the label pipeline
//! depends on.

pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use models::{DeliveryMethod, Order, OrderItem, PaymentStatus, TimeSlot};
pub use response::{LabelResponse, PendingJobs};
