//! Derived visual codes
//!
//! Computed per render call: the QR location code, the Code39 order
//! code, and the checkbox glyph pair. Generation failures degrade to
//! "no image" - the rest of the label still renders.

use barcoders::generators::image::{Color, Image as BarcodeImage, Rotation};
use barcoders::sym::code39::Code39;
use image::{GrayImage, Luma};
use qrcode::QrCode;
use shared::util::order_code_payload;
use tracing::warn;

use super::assets::png_data_uri;

/// Pixel size of one QR module; display size is fixed by the template.
const QR_MODULE_PX: u32 = 4;
/// Order barcode bar height in pixels.
const BARCODE_HEIGHT: u32 = 60;
/// Narrow-bar width; widening keeps the code scannable at label size.
const BARCODE_XDIM: u32 = 2;
/// Checkbox glyph edge length in pixels.
const CHECKBOX_PX: u32 = 24;

/// Maps-search URL the location code encodes.
///
/// Built through the URL parser so the address is percent-encoded
/// correctly; a same address string always yields the same URL.
pub fn maps_query_url(address: &str, area: Option<&str>) -> Option<reqwest::Url> {
    let query = match area {
        Some(area) if !area.trim().is_empty() => format!("{}, {}", address, area),
        _ => address.to_string(),
    };

    reqwest::Url::parse_with_params(
        "https://www.google.com/maps/search/",
        [("api", "1"), ("query", query.as_str())],
    )
    .ok()
}

/// QR data URI for the delivery address. `None` when encoding fails.
pub fn location_code(address: &str, area: Option<&str>) -> Option<String> {
    let url = maps_query_url(address, area)?;

    let code = match QrCode::new(url.as_str().as_bytes()) {
        Ok(code) => code,
        Err(e) => {
            warn!(error = %e, "Location code generation failed");
            return None;
        }
    };

    let img = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(QR_MODULE_PX, QR_MODULE_PX)
        .build();

    encode_gray_png(&img).map(|bytes| png_data_uri(&bytes))
}

/// Code39 data URI for the order code. `None` when encoding fails.
pub fn order_code(id: i64, date: Option<&str>) -> Option<String> {
    let payload = order_code_payload(id, date);

    let barcode = match Code39::new(&payload) {
        Ok(barcode) => barcode,
        Err(e) => {
            warn!(error = %e, payload, "Order code generation failed");
            return None;
        }
    };

    let generator = BarcodeImage::PNG {
        height: BARCODE_HEIGHT,
        xdim: BARCODE_XDIM,
        rotation: Rotation::Zero,
        foreground: Color::new([0, 0, 0, 255]),
        background: Color::new([255, 255, 255, 255]),
    };

    match generator.generate(&barcode.encode()[..]) {
        Ok(bytes) => Some(png_data_uri(&bytes)),
        Err(e) => {
            warn!(error = %e, payload, "Order code image generation failed");
            None
        }
    }
}

/// The two checkbox bitmaps, generated once per render call and reused
/// for every boolean field on the label.
#[derive(Debug, Clone)]
pub struct CheckboxGlyphs {
    checked: Option<String>,
    unchecked: Option<String>,
}

impl CheckboxGlyphs {
    pub fn generate() -> Self {
        Self {
            checked: checkbox_png(true).map(|b| png_data_uri(&b)),
            unchecked: checkbox_png(false).map(|b| png_data_uri(&b)),
        }
    }

    /// Data URI for the requested state, if the glyph rendered.
    pub fn for_state(&self, checked: bool) -> Option<&str> {
        if checked {
            self.checked.as_deref()
        } else {
            self.unchecked.as_deref()
        }
    }
}

/// Square with a 2px border; the checked variant adds a tick.
fn checkbox_png(checked: bool) -> Option<Vec<u8>> {
    let mut img = GrayImage::from_pixel(CHECKBOX_PX, CHECKBOX_PX, Luma([255u8]));
    let last = CHECKBOX_PX - 1;

    for t in 0..2 {
        for x in 0..CHECKBOX_PX {
            img.put_pixel(x, t, Luma([0]));
            img.put_pixel(x, last - t, Luma([0]));
        }
        for y in 0..CHECKBOX_PX {
            img.put_pixel(t, y, Luma([0]));
            img.put_pixel(last - t, y, Luma([0]));
        }
    }

    if checked {
        // Down-stroke (5,11)..(10,16), up-stroke (10,16)..(18,8), 2px thick
        for i in 0..6u32 {
            img.put_pixel(5 + i, 11 + i, Luma([0]));
            img.put_pixel(5 + i, 12 + i, Luma([0]));
        }
        for i in 0..9u32 {
            img.put_pixel(10 + i, 16 - i, Luma([0]));
            img.put_pixel(10 + i, 17 - i, Luma([0]));
        }
    }

    encode_gray_png(&img)
}

fn encode_gray_png(img: &GrayImage) -> Option<Vec<u8>> {
    use image::ImageEncoder;

    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    match encoder.write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::L8,
    ) {
        Ok(()) => Some(buf),
        Err(e) => {
            warn!(error = %e, "PNG encode failed");
            None
        }
    }
}
