//! Export settings and naming for the downloaded PNG.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use serde::{Deserialize, Serialize};

use crate::consts::{EXPORT_BACKGROUND, EXPORT_FILENAME_PREFIX, EXPORT_MULTIPLIER};

/// How the scene is rasterized for download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Output pixels per logical canvas pixel.
    pub multiplier: f64,
    /// Opaque fill painted beneath the scene.
    pub background: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self { multiplier: EXPORT_MULTIPLIER, background: EXPORT_BACKGROUND.to_owned() }
    }
}

impl ExportSettings {
    /// Raster size in whole pixels for a logical canvas of `width`×`height`.
    #[must_use]
    pub fn output_size(&self, width: f64, height: f64) -> (u32, u32) {
        (to_px(width * self.multiplier), to_px(height * self.multiplier))
    }
}

/// A finished export, ready to hand to a download link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedImage {
    pub filename: String,
    /// `data:image/png;base64,...`
    pub data_url: String,
}

/// `vehicle-sticker-design-<unix-millis>.png`
#[must_use]
pub fn export_filename(unix_millis: u64) -> String {
    format!("{EXPORT_FILENAME_PREFIX}{unix_millis}.png")
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_px(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 { v.round().min(f64::from(u32::MAX)) as u32 } else { 0 }
}
