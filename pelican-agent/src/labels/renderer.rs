//! Shipping label renderer
//!
//! Renders an [`Order`] into a self-contained A6 (100×150 mm) HTML
//! document: fixed template substitution, every image inlined, no
//! external references. Rendering is deterministic and infallible -
//! absent fields print as a dash, failed visual codes are omitted.

use shared::models::{DeliveryMethod, Order, PaymentStatus, TimeSlot};
use shared::util::{format_amount, order_code_payload};

use super::assets::{AssetCatalog, ICON_CHILLED, ICON_FRAGILE, LOGO};
use super::codes::{self, CheckboxGlyphs};

/// Placeholder for absent optional fields.
const DASH: &str = "-";

/// Fixed page style. One canonical physical size, no reflow.
const STYLE: &str = "<style>\n\
* { margin: 0; padding: 0; box-sizing: border-box; }\n\
@page { size: 100mm 150mm; margin: 0; }\n\
body { font-family: Arial, sans-serif; width: 100mm; height: 150mm; padding: 3mm; }\n\
.label { border: 1.5mm solid black; padding: 2.5mm; height: 100%; }\n\
.header { text-align: center; font-size: 18px; font-weight: bold; border-bottom: 1.5mm solid black; padding-bottom: 2mm; margin-bottom: 2.5mm; }\n\
.logo { height: 9mm; vertical-align: middle; margin-right: 2mm; }\n\
.row { display: flex; gap: 4mm; margin-bottom: 1.5mm; border-bottom: 0.6mm solid black; padding-bottom: 1.5mm; }\n\
.field { flex: 1; }\n\
.caption { font-weight: bold; font-size: 11px; }\n\
.value { font-size: 10px; margin-top: 1mm; }\n\
.location-code { width: 20mm; height: 20mm; }\n\
table { width: 100%; border: 0.8mm solid black; border-collapse: collapse; margin: 2mm 0; }\n\
th, td { border: 0.4mm solid black; padding: 1mm 2mm; font-size: 10px; text-align: left; }\n\
th { background: #f0f0f0; }\n\
.payment { border: 0.8mm solid black; padding: 2mm; margin-top: 1.5mm; }\n\
.payment .row, .row.slot-row { border: none; }\n\
.check { margin-right: 3mm; font-size: 10px; white-space: nowrap; }\n\
.checkbox { width: 3.5mm; height: 3.5mm; vertical-align: middle; }\n\
.footer { text-align: center; margin-top: 2.5mm; }\n\
.order-code { height: 11mm; }\n\
.order-code-text { font-family: monospace; font-size: 10px; letter-spacing: 1px; }\n\
.icon { height: 7mm; margin: 1mm 2mm 0; }\n\
</style>\n";

/// Auto-print hook for the open-in-browser fallback: the page prints
/// itself shortly after loading and then tries to close.
const AUTO_PRINT_SCRIPT: &str = "<script>\n\
window.onload = function() {\n\
    setTimeout(function() {\n\
        window.print();\n\
        setTimeout(function() { window.close(); }, 1000);\n\
    }, 500);\n\
};\n\
</script>\n";

/// Shipping label renderer
///
/// Holds the asset catalog; everything else is derived per call.
#[derive(Debug, Clone)]
pub struct LabelRenderer {
    assets: AssetCatalog,
}

impl LabelRenderer {
    pub fn new(assets: AssetCatalog) -> Self {
        Self { assets }
    }

    /// Render one order to a complete HTML document.
    pub fn render(&self, order: &Order) -> String {
        // One glyph pair per call, shared by every boolean field
        let glyphs = CheckboxGlyphs::generate();

        let mut html = String::with_capacity(16 * 1024);
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
        html.push_str(AUTO_PRINT_SCRIPT);
        html.push_str(STYLE);
        html.push_str("</head>\n<body>\n<div class=\"label\">\n");

        self.render_header(&mut html);
        self.render_recipient(&mut html, order);
        self.render_schedule(&mut html, order, &glyphs);
        self.render_note(&mut html, order);
        self.render_items(&mut html, order, &glyphs);
        self.render_payment(&mut html, order, &glyphs);
        self.render_fulfillment(&mut html, order, &glyphs);
        self.render_footer(&mut html, order);

        html.push_str("</div>\n</body>\n</html>\n");
        html
    }

    fn render_header(&self, html: &mut String) {
        html.push_str("<div class=\"header\">");
        if let Some(logo) = self.assets.data_uri(LOGO) {
            html.push_str(&format!("<img class=\"logo\" src=\"{}\" alt=\"\">", logo));
        }
        html.push_str("DELIVERY NOTE</div>\n");
    }

    fn render_recipient(&self, html: &mut String, order: &Order) {
        html.push_str(&format!(
            "<div class=\"row\">{}{}</div>\n",
            field("Nama", &escape(&order.name)),
            field("No Fon", &escape(&order.phone)),
        ));

        html.push_str("<div class=\"row\">");
        html.push_str(&field("Alamat", &escape(&order.address)));
        if let Some(qr) = codes::location_code(&order.address, order.area.as_deref()) {
            html.push_str(&format!(
                "<img class=\"location-code\" src=\"{}\" alt=\"\">",
                qr
            ));
        }
        html.push_str("</div>\n");

        html.push_str(&format!(
            "<div class=\"row\">{}{}</div>\n",
            field("Kawasan", &opt(order.area.as_deref())),
            field("Poskod", &opt(order.postcode.as_deref())),
        ));
    }

    fn render_schedule(&self, html: &mut String, order: &Order, glyphs: &CheckboxGlyphs) {
        html.push_str(&format!(
            "<div class=\"row\">{}{}</div>\n",
            field("Tarikh", &opt(order.date.as_deref())),
            field("Masa", &opt(order.time_of_day.as_deref())),
        ));

        // One checkbox per recognized slot; anything else prints verbatim
        html.push_str("<div class=\"row slot-row\"><div class=\"field\"><div class=\"caption\">Slot:</div><div class=\"value\">");
        match &order.time_slot {
            Some(slot) => {
                for known in &TimeSlot::RECOGNIZED {
                    push_checkbox(html, glyphs, slot == known, known.label());
                }
                if let TimeSlot::Other(other) = slot {
                    if other.trim().is_empty() {
                        html.push_str(DASH);
                    } else {
                        html.push_str(&escape(other));
                    }
                }
            }
            None => {
                for known in &TimeSlot::RECOGNIZED {
                    push_checkbox(html, glyphs, false, known.label());
                }
                html.push_str(DASH);
            }
        }
        html.push_str("</div></div></div>\n");
    }

    fn render_note(&self, html: &mut String, order: &Order) {
        html.push_str(&format!(
            "<div class=\"row\">{}</div>\n",
            field("Nota", &opt(order.note.as_deref())),
        ));
    }

    fn render_items(&self, html: &mut String, order: &Order, glyphs: &CheckboxGlyphs) {
        html.push_str(
            "<table>\n<thead><tr><th>Order</th><th>Kuantiti</th><th>Check</th></tr></thead>\n<tbody>\n",
        );
        for (idx, item) in order.items.iter().enumerate() {
            let quantity = item
                .quantity
                .map(|q| q.to_string())
                .unwrap_or_else(|| DASH.to_string());

            html.push_str(&format!(
                "<tr><td>{}. {}</td><td>{}</td><td>{}</td></tr>\n",
                idx + 1,
                escape(&item.name),
                quantity,
                checkbox_img(glyphs, item.checked),
            ));
        }
        html.push_str("</tbody>\n</table>\n");
    }

    fn render_payment(&self, html: &mut String, order: &Order, glyphs: &CheckboxGlyphs) {
        html.push_str("<div class=\"payment\">");
        html.push_str(&format!(
            "<div class=\"row\">{}{}</div>",
            field("Jumlah Bayaran", &format_amount(order.amount_due)),
            field("No Paket", &opt(order.package_number.as_deref())),
        ));

        html.push_str("<div class=\"row\"><div class=\"field\"><div class=\"caption\">Bayaran:</div><div class=\"value\">");
        push_checkbox(
            html,
            glyphs,
            order.payment_status == PaymentStatus::Paid,
            "Jelas",
        );
        push_checkbox(
            html,
            glyphs,
            order.payment_status == PaymentStatus::Unpaid,
            "Belum",
        );
        if let PaymentStatus::Other(other) = &order.payment_status {
            if !other.trim().is_empty() {
                html.push_str(&escape(other));
            }
        }
        html.push_str("</div></div></div>");
        html.push_str("</div>\n");
    }

    fn render_fulfillment(&self, html: &mut String, order: &Order, glyphs: &CheckboxGlyphs) {
        html.push_str("<div class=\"row\"><div class=\"field\"><div class=\"caption\">Penghantaran:</div><div class=\"value\">");
        push_checkbox(
            html,
            glyphs,
            order.delivery_method == DeliveryMethod::Delivery,
            "Hantar",
        );
        push_checkbox(
            html,
            glyphs,
            order.delivery_method == DeliveryMethod::Pickup,
            "Ambil",
        );
        html.push_str("</div></div></div>\n");
    }

    fn render_footer(&self, html: &mut String, order: &Order) {
        html.push_str("<div class=\"footer\">");
        if let Some(barcode) = codes::order_code(order.id, order.date.as_deref()) {
            html.push_str(&format!(
                "<img class=\"order-code\" src=\"{}\" alt=\"\"><br>",
                barcode
            ));
        }
        // Human-readable payload survives even when the bars don't render
        html.push_str(&format!(
            "<div class=\"order-code-text\">{}</div>",
            order_code_payload(order.id, order.date.as_deref()),
        ));
        for icon in [ICON_CHILLED, ICON_FRAGILE] {
            if let Some(uri) = self.assets.data_uri(icon) {
                html.push_str(&format!("<img class=\"icon\" src=\"{}\" alt=\"\">", uri));
            }
        }
        html.push_str("</div>\n");
    }
}

/// One captioned field cell.
fn field(caption: &str, value: &str) -> String {
    format!(
        "<div class=\"field\"><div class=\"caption\">{}:</div><div class=\"value\">{}</div></div>",
        caption, value
    )
}

/// Escaped value or the placeholder dash.
fn opt(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => escape(v),
        _ => DASH.to_string(),
    }
}

/// Checkbox image cell; degrades to a text marker when the glyph
/// bitmaps failed to generate.
fn checkbox_img(glyphs: &CheckboxGlyphs, checked: bool) -> String {
    match glyphs.for_state(checked) {
        Some(uri) => format!("<img class=\"checkbox\" src=\"{}\" alt=\"\">", uri),
        None => (if checked { "[x]" } else { "[ ]" }).to_string(),
    }
}

fn push_checkbox(html: &mut String, glyphs: &CheckboxGlyphs, checked: bool, caption: &str) {
    html.push_str(&format!(
        "<span class=\"check\">{} {}</span>",
        checkbox_img(glyphs, checked),
        escape(caption),
    ));
}

/// Minimal HTML escape for user-supplied text.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::OrderItem;

    fn test_renderer() -> LabelRenderer {
        // Nonexistent asset dir: images degrade to absent
        LabelRenderer::new(AssetCatalog::new("/nonexistent-assets-dir"))
    }

    fn create_test_order() -> Order {
        Order {
            id: 42,
            name: "Aminah binti Yusof".to_string(),
            phone: "012-3456789".to_string(),
            address: "12 Jalan Melur, Taman Sari".to_string(),
            area: Some("Shah Alam".to_string()),
            postcode: Some("40000".to_string()),
            date: Some("2025-11-02".to_string()),
            time_of_day: Some("10:30".to_string()),
            time_slot: Some(TimeSlot::Pagi),
            delivery_method: DeliveryMethod::Delivery,
            note: Some("Tinggal di pagar".to_string()),
            items: vec![
                OrderItem {
                    name: "Nasi Lemak".to_string(),
                    quantity: Some(2),
                    checked: true,
                },
                OrderItem {
                    name: "Teh Tarik".to_string(),
                    quantity: None,
                    checked: false,
                },
            ],
            amount_due: Decimal::new(2550, 2),
            payment_status: PaymentStatus::Paid,
            package_number: Some("P-7".to_string()),
        }
    }

    #[test]
    fn test_render_full_order() {
        let html = test_renderer().render(&create_test_order());

        assert!(html.contains("DELIVERY NOTE"));
        assert_eq!(html.matches("Aminah binti Yusof").count(), 1);
        // Address appears in the visible label text (the QR encodes a
        // URL, not raw HTML text)
        assert!(html.contains("12 Jalan Melur, Taman Sari"));
        assert!(html.contains("RM 25.50"));
        assert!(html.contains("P-7"));

        // Item names appear exactly once, in input order
        assert_eq!(html.matches("Nasi Lemak").count(), 1);
        assert_eq!(html.matches("Teh Tarik").count(), 1);
        let first = html.find("Nasi Lemak").unwrap();
        let second = html.find("Teh Tarik").unwrap();
        assert!(first < second);
        assert!(html.contains("1. Nasi Lemak"));
        assert!(html.contains("2. Teh Tarik"));
    }

    #[test]
    fn test_render_missing_optionals_uses_placeholders() {
        let order = Order {
            area: None,
            postcode: None,
            date: None,
            time_of_day: None,
            time_slot: None,
            note: None,
            package_number: None,
            ..create_test_order()
        };

        let html = test_renderer().render(&order);
        // Placeholder dashes, no panic
        assert!(html.contains(&field("Kawasan", DASH)));
        assert!(html.contains(&field("Nota", DASH)));
        assert!(html.contains(&field("Tarikh", DASH)));
    }

    #[test]
    fn test_render_empty_items() {
        let order = Order {
            items: Vec::new(),
            ..create_test_order()
        };

        let html = test_renderer().render(&order);
        assert!(html.contains("<tbody>"));
        assert!(html.contains("Kuantiti"));
    }

    #[test]
    fn test_render_escapes_user_text() {
        let order = Order {
            name: "<script>alert(1)</script>".to_string(),
            ..create_test_order()
        };

        let html = test_renderer().render(&order);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_render_is_self_contained() {
        let html = test_renderer().render(&create_test_order());
        // No external fetches: every src is an inline data URI
        for (pos, _) in html.match_indices("src=\"") {
            let rest = &html[pos + 5..];
            assert!(rest.starts_with("data:"), "non-inline src found");
        }
        assert!(!html.contains("href="));
    }

    #[test]
    fn test_render_end_to_end_scenario() {
        let order = Order {
            id: 7,
            date: Some("2025-11-02".to_string()),
            items: vec![OrderItem {
                name: "Nasi Lemak".to_string(),
                quantity: Some(2),
                checked: false,
            }],
            amount_due: Decimal::new(150, 1),
            payment_status: PaymentStatus::Unpaid,
            ..create_test_order()
        };

        let html = test_renderer().render(&order);

        assert!(html.contains("20251102007"));
        assert!(html.contains("RM 15.00"));

        // Unpaid box marked, paid box unmarked
        let glyphs = CheckboxGlyphs::generate();
        let checked = checkbox_img(&glyphs, true);
        let unchecked = checkbox_img(&glyphs, false);
        assert!(html.contains(&format!("{} Belum", checked)));
        assert!(html.contains(&format!("{} Jelas", unchecked)));
    }

    #[test]
    fn test_render_deterministic() {
        let order = create_test_order();
        let renderer = test_renderer();
        assert_eq!(renderer.render(&order), renderer.render(&order));
    }
}
