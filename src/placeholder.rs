//! Placeholder artwork: vehicle silhouettes, the sticker stand-in, and the
//! fallback previews shown when a gallery image fails to load.
//!
//! All artwork is emitted as SVG markup. [`svg_data_url`] wraps markup so the
//! browser can load it as an image source.

#[cfg(test)]
#[path = "placeholder_test.rs"]
mod placeholder_test;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// The vehicle silhouettes a design can be built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Car,
    Bike,
    Truck,
}

impl VehicleType {
    /// Parse a `data-vehicle` value. Unknown names fall back to [`VehicleType::Car`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "bike" => Self::Bike,
            "truck" => Self::Truck,
            _ => Self::Car,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Bike => "bike",
            Self::Truck => "truck",
        }
    }
}

/// 100×50 silhouette for `vehicle`.
#[must_use]
pub fn vehicle_svg(vehicle: VehicleType) -> &'static str {
    match vehicle {
        VehicleType::Car => concat!(
            r##"<svg width="100" height="50" viewBox="0 0 100 50" fill="none" xmlns="http://www.w3.org/2000/svg">"##,
            r##"<rect x="10" y="20" width="80" height="20" fill="#374151" rx="2"/>"##,
            r##"<rect x="15" y="15" width="70" height="10" fill="#4B5563" rx="1"/>"##,
            r##"<circle cx="25" cy="45" r="8" fill="#6B7280"/>"##,
            r##"<circle cx="75" cy="45" r="8" fill="#6B7280"/>"##,
            r##"<circle cx="25" cy="45" r="5" fill="#9CA3AF"/>"##,
            r##"<circle cx="75" cy="45" r="5" fill="#9CA3AF"/>"##,
            "</svg>"
        ),
        VehicleType::Bike => concat!(
            r##"<svg width="100" height="50" viewBox="0 0 100 50" fill="none" xmlns="http://www.w3.org/2000/svg">"##,
            r##"<circle cx="20" cy="35" r="12" fill="#374151"/>"##,
            r##"<circle cx="80" cy="35" r="12" fill="#374151"/>"##,
            r##"<circle cx="20" cy="35" r="8" fill="#6B7280"/>"##,
            r##"<circle cx="80" cy="35" r="8" fill="#6B7280"/>"##,
            r##"<line x1="20" y1="35" x2="80" y2="35" stroke="#374151" stroke-width="3"/>"##,
            r##"<line x1="50" y1="35" x2="50" y2="20" stroke="#374151" stroke-width="3"/>"##,
            r##"<line x1="50" y1="20" x2="65" y2="25" stroke="#374151" stroke-width="3"/>"##,
            "</svg>"
        ),
        VehicleType::Truck => concat!(
            r##"<svg width="100" height="50" viewBox="0 0 100 50" fill="none" xmlns="http://www.w3.org/2000/svg">"##,
            r##"<rect x="10" y="25" width="40" height="20" fill="#374151" rx="2"/>"##,
            r##"<rect x="50" y="20" width="40" height="25" fill="#4B5563" rx="2"/>"##,
            r##"<circle cx="25" cy="50" r="8" fill="#6B7280"/>"##,
            r##"<circle cx="75" cy="50" r="8" fill="#6B7280"/>"##,
            r##"<circle cx="25" cy="50" r="5" fill="#9CA3AF"/>"##,
            r##"<circle cx="75" cy="50" r="5" fill="#9CA3AF"/>"##,
            r##"<rect x="12" y="15" width="8" height="10" fill="#6B7280"/>"##,
            "</svg>"
        ),
    }
}

/// 60×60 stand-in drawn while (or instead of) a sticker's artwork loads.
#[must_use]
pub fn sticker_svg() -> &'static str {
    concat!(
        r##"<svg width="60" height="60" viewBox="0 0 60 60" fill="none" xmlns="http://www.w3.org/2000/svg">"##,
        r##"<rect width="60" height="60" fill="#F3F4F6" rx="8"/>"##,
        r##"<rect x="10" y="10" width="40" height="40" fill="#E5E7EB" rx="4"/>"##,
        r##"<text x="30" y="35" font-family="Arial" font-size="12" fill="#9CA3AF" text-anchor="middle">Sticker</text>"##,
        "</svg>"
    )
}

/// Labeled gray card used as a broken-image fallback in galleries.
///
/// The label is centered; `font_size` is in SVG user units.
#[must_use]
pub fn preview_svg(width: u32, height: u32, label: &str, font_size: u32) -> String {
    let cx = f64::from(width) / 2.0;
    let cy = f64::from(height) / 2.0;
    format!(
        concat!(
            r##"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" fill="none" xmlns="http://www.w3.org/2000/svg">"##,
            r##"<rect width="{w}" height="{h}" fill="#f3f4f6"/>"##,
            r##"<text x="{cx}" y="{cy}" font-family="Arial" font-size="{fs}" fill="#9ca3af" "##,
            r##"text-anchor="middle" dy=".3em">{label}</text>"##,
            "</svg>"
        ),
        w = width,
        h = height,
        cx = cx,
        cy = cy,
        fs = font_size,
        label = escape_xml(label),
    )
}

/// Fallback for the large homepage gallery cards.
#[must_use]
pub fn gallery_preview_svg() -> String {
    preview_svg(200, 150, "Sticker Preview", 14)
}

/// Fallback for the small tool-panel sticker tiles.
#[must_use]
pub fn tile_preview_svg() -> String {
    preview_svg(60, 60, "Sticker", 8)
}

/// Wrap SVG markup in a base64 `data:` URL.
#[must_use]
pub fn svg_data_url(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg.as_bytes()))
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
