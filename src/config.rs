//! Designer configuration supplied by the host page as JSON.
//!
//! Every field is optional on the wire; missing fields take the defaults in
//! [`crate::consts`]. An empty object `{}` yields the stock 800×600 designer.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::color;
use crate::consts::{
    CANVAS_BACKGROUND, CANVAS_HEIGHT, CANVAS_WIDTH, SELECTION_ACCENT, STICKER_SCALE, STICKER_SPAWN_MIN_X,
    STICKER_SPAWN_MIN_Y, STICKER_SPAWN_SPAN_X, STICKER_SPAWN_SPAN_Y, VEHICLE_SCALE,
};
use crate::doc::TextStyle;
use crate::error::DesignerError;
use crate::export::ExportSettings;
use crate::fit::FitOptions;

/// Half-open spawn rectangle for new stickers: `[min, min + span)` per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnArea {
    pub min_x: f64,
    pub span_x: f64,
    pub min_y: f64,
    pub span_y: f64,
}

impl Default for SpawnArea {
    fn default() -> Self {
        Self {
            min_x: STICKER_SPAWN_MIN_X,
            span_x: STICKER_SPAWN_SPAN_X,
            min_y: STICKER_SPAWN_MIN_Y,
            span_y: STICKER_SPAWN_SPAN_Y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub background: String,
    pub fit: FitOptions,
    pub vehicle_scale: f64,
    pub sticker_scale: f64,
    pub sticker_spawn: SpawnArea,
    pub default_text_style: TextStyle,
    pub selection_accent: String,
    pub export: ExportSettings,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            background: CANVAS_BACKGROUND.to_owned(),
            fit: FitOptions::default(),
            vehicle_scale: VEHICLE_SCALE,
            sticker_scale: STICKER_SCALE,
            sticker_spawn: SpawnArea::default(),
            default_text_style: TextStyle::default(),
            selection_accent: SELECTION_ACCENT.to_owned(),
            export: ExportSettings::default(),
        }
    }
}

impl DesignerConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::ConfigParse`] if the JSON is malformed or a
    /// value fails [`DesignerConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, DesignerError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()
    }

    /// Reject sizes, fractions, and scales the designer cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::ConfigParse`] naming the first bad field.
    pub fn validate(self) -> Result<Self, DesignerError> {
        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;
        fraction("fit.area_fraction_w", self.fit.area_fraction_w)?;
        fraction("fit.area_fraction_h", self.fit.area_fraction_h)?;
        positive("fit.max_scale", self.fit.max_scale)?;
        positive("vehicle_scale", self.vehicle_scale)?;
        positive("sticker_scale", self.sticker_scale)?;
        positive("export.multiplier", self.export.multiplier)?;
        non_negative("sticker_spawn.span_x", self.sticker_spawn.span_x)?;
        non_negative("sticker_spawn.span_y", self.sticker_spawn.span_y)?;
        hex("background", &self.background)?;
        hex("selection_accent", &self.selection_accent)?;
        hex("export.background", &self.export.background)?;

        let default_text_style = self
            .default_text_style
            .clone()
            .validated()
            .map_err(|e| DesignerError::ConfigParse(format!("default_text_style: {e}")))?;
        Ok(Self { default_text_style, ..self })
    }
}

fn positive(field: &str, v: f64) -> Result<(), DesignerError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(DesignerError::ConfigParse(format!("{field} must be positive, got {v}")))
    }
}

fn non_negative(field: &str, v: f64) -> Result<(), DesignerError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(DesignerError::ConfigParse(format!("{field} must not be negative, got {v}")))
    }
}

fn fraction(field: &str, v: f64) -> Result<(), DesignerError> {
    if v.is_finite() && v > 0.0 && v <= 1.0 {
        Ok(())
    } else {
        Err(DesignerError::ConfigParse(format!("{field} must be in (0, 1], got {v}")))
    }
}

fn hex(field: &str, v: &str) -> Result<(), DesignerError> {
    if color::parse_hex_rgb(v).is_some() {
        Ok(())
    } else {
        Err(DesignerError::ConfigParse(format!("{field} is not a hex color: {v:?}")))
    }
}
