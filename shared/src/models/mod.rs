//! Data models
//!
//! Shared between the poll loop, the label renderer, and the local
//! reprint API.

pub mod order;

pub use order::{DeliveryMethod, Order, OrderItem, PaymentStatus, TimeSlot};
