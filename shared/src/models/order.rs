//! Order Model
//!
//! Orders arrive from the remote feed with Malay wire names; the serde
//! renames below keep the wire format stable while the Rust side uses
//! descriptive field names.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment status shown on the label checkbox row.
///
/// The feed historically sends `Jelas` (settled) / `Belum` (outstanding);
/// newer payloads use plain `paid` / `unpaid`. Anything else is carried
/// through as [`PaymentStatus::Other`] and renders with neither box marked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    Other(String),
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Other(String::new())
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "jelas" | "paid" => PaymentStatus::Paid,
            "belum" | "unpaid" => PaymentStatus::Unpaid,
            _ => PaymentStatus::Other(value),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(value: PaymentStatus) -> Self {
        match value {
            PaymentStatus::Paid => "Jelas".to_string(),
            PaymentStatus::Unpaid => "Belum".to_string(),
            PaymentStatus::Other(s) => s,
        }
    }
}

/// Fulfillment method. Unknown wire values decode to the default
/// (delivery) since the label only distinguishes Hantar/Ambil.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum DeliveryMethod {
    Pickup,
    #[default]
    Delivery,
}

impl From<String> for DeliveryMethod {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pickup" | "ambil" => DeliveryMethod::Pickup,
            _ => DeliveryMethod::Delivery,
        }
    }
}

impl From<DeliveryMethod> for String {
    fn from(value: DeliveryMethod) -> Self {
        match value {
            DeliveryMethod::Pickup => "pickup".to_string(),
            DeliveryMethod::Delivery => "delivery".to_string(),
        }
    }
}

/// Requested delivery window. Free-form on the wire with a recognized
/// set of day parts; everything else is preserved as [`TimeSlot::Other`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum TimeSlot {
    Pagi,
    Tengahari,
    Petang,
    Malam,
    Other(String),
}

impl TimeSlot {
    /// The recognized slots, in the order the label prints them.
    pub const RECOGNIZED: [TimeSlot; 4] = [
        TimeSlot::Pagi,
        TimeSlot::Tengahari,
        TimeSlot::Petang,
        TimeSlot::Malam,
    ];

    /// Caption printed next to the slot checkbox.
    pub fn label(&self) -> &str {
        match self {
            TimeSlot::Pagi => "Pagi",
            TimeSlot::Tengahari => "Tengahari",
            TimeSlot::Petang => "Petang",
            TimeSlot::Malam => "Malam",
            TimeSlot::Other(s) => s,
        }
    }
}

impl From<String> for TimeSlot {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pagi" => TimeSlot::Pagi,
            "tengahari" => TimeSlot::Tengahari,
            "petang" => TimeSlot::Petang,
            "malam" => TimeSlot::Malam,
            _ => TimeSlot::Other(value),
        }
    }
}

impl From<TimeSlot> for String {
    fn from(value: TimeSlot) -> Self {
        value.label().to_string()
    }
}

/// One line on the label's item table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    /// Positive when present; absent quantities print as a dash.
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub checked: bool,
}

/// A pending print job as the remote feed delivers it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,

    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "no_fon")]
    pub phone: String,

    #[serde(rename = "alamat")]
    pub address: String,
    #[serde(rename = "kawasan", default)]
    pub area: Option<String>,
    #[serde(rename = "poskod", default)]
    pub postcode: Option<String>,

    /// ISO-ish date string (`YYYY-MM-DD`, sometimes a full timestamp).
    #[serde(rename = "tarikh", default)]
    pub date: Option<String>,
    #[serde(rename = "masa", default)]
    pub time_of_day: Option<String>,
    #[serde(default)]
    pub time_slot: Option<TimeSlot>,

    #[serde(default)]
    pub delivery_method: DeliveryMethod,

    #[serde(default)]
    pub note: Option<String>,

    #[serde(default)]
    pub items: Vec<OrderItem>,

    #[serde(rename = "jumlah_bayaran")]
    pub amount_due: Decimal,
    #[serde(rename = "bayaran_status", default)]
    pub payment_status: PaymentStatus,
    #[serde(rename = "no_paket", default)]
    pub package_number: Option<String>,
}
