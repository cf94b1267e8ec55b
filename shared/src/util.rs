//! Formatting helpers used by the label pipeline

use rust_decimal::Decimal;

/// Compact date used when the order's date is absent or unparsable.
/// Digit-only so it stays encodable in the order barcode.
pub const FALLBACK_COMPACT_DATE: &str = "19700101";

/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Format a currency amount for the label: always two decimal places,
/// `RM` prefix.
pub fn format_amount(amount: Decimal) -> String {
    format!("RM {:.2}", amount)
}

/// Collapse an ISO-ish date string (`YYYY-MM-DD`, optionally with a time
/// suffix) to `YYYYMMDD`. Falls back to [`FALLBACK_COMPACT_DATE`] when the
/// input is absent or does not parse.
pub fn compact_date(date: Option<&str>) -> String {
    let Some(raw) = date else {
        return FALLBACK_COMPACT_DATE.to_string();
    };

    // Full timestamps ("2025-11-02T08:00:00Z") carry the date in the
    // first ten characters.
    let prefix = raw.trim();
    let prefix = if prefix.len() > 10 {
        prefix.get(..10).unwrap_or(prefix)
    } else {
        prefix
    };

    match chrono::NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
        Ok(d) => d.format("%Y%m%d").to_string(),
        Err(_) => FALLBACK_COMPACT_DATE.to_string(),
    }
}

/// Payload of the order barcode: compact date plus the order id
/// zero-padded to three digits.
pub fn order_code_payload(id: i64, date: Option<&str>) -> String {
    format!("{}{:03}", compact_date(date), id)
}
