//! Shared numeric and style constants for the designer.

// ── Canvas ──────────────────────────────────────────────────────

/// Logical canvas width in CSS pixels.
pub const CANVAS_WIDTH: f64 = 800.0;

/// Logical canvas height in CSS pixels.
pub const CANVAS_HEIGHT: f64 = 600.0;

/// Canvas background fill.
pub const CANVAS_BACKGROUND: &str = "#f8fafc";

// ── Fit area ────────────────────────────────────────────────────

/// Fraction of the canvas width a dropped image may occupy.
pub const FIT_AREA_FRACTION_W: f64 = 0.6;

/// Fraction of the canvas height a dropped image may occupy.
pub const FIT_AREA_FRACTION_H: f64 = 0.4;

/// Upper bound on the fit scale so tiny assets are not blown up.
pub const FIT_MAX_SCALE: f64 = 1.5;

/// Vertical anchor of the fit area as a fraction of canvas height.
/// Sits just below center to clear the roofline and the wheels.
pub const FIT_ANCHOR_Y_FRACTION: f64 = 0.55;

/// Prefix of the asset keys the engine hands out for uploaded files.
pub const UPLOAD_KEY_PREFIX: &str = "upload:";

// ── Placeholder geometry ────────────────────────────────────────

/// Natural width of every vehicle silhouette.
pub const VEHICLE_WIDTH: f64 = 100.0;

/// Natural height of every vehicle silhouette.
pub const VEHICLE_HEIGHT: f64 = 50.0;

/// Uniform scale applied to the vehicle silhouette.
pub const VEHICLE_SCALE: f64 = 2.0;

/// Natural edge length of the square sticker placeholder.
pub const STICKER_SIZE: f64 = 60.0;

/// Uniform scale applied to a freshly placed sticker.
pub const STICKER_SCALE: f64 = 0.8;

/// Sticker spawn area: `[min, min + span)` on each axis.
pub const STICKER_SPAWN_MIN_X: f64 = 100.0;
pub const STICKER_SPAWN_SPAN_X: f64 = 600.0;
pub const STICKER_SPAWN_MIN_Y: f64 = 100.0;
pub const STICKER_SPAWN_SPAN_Y: f64 = 400.0;

// ── Text ────────────────────────────────────────────────────────

pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_FONT_SIZE_PT: u32 = 24;
pub const DEFAULT_TEXT_COLOR: &str = "#1f2937";

/// Accepted font size range, inclusive.
pub const MIN_FONT_SIZE_PT: u32 = 1;
pub const MAX_FONT_SIZE_PT: u32 = 500;

/// Line height as a multiple of font size.
pub const TEXT_LINE_HEIGHT: f64 = 1.16;

/// Average glyph advance as a multiple of font size. Used for bounds only.
pub const TEXT_AVG_ADVANCE: f64 = 0.6;

// ── Selection chrome ────────────────────────────────────────────

/// Accent used for selection borders and corner handles.
pub const SELECTION_ACCENT: &str = "#6366f1";

/// Corner handle diameter in canvas pixels.
pub const HANDLE_SIZE_PX: f64 = 10.0;

/// Selection border width multiplier.
pub const BORDER_SCALE_FACTOR: f64 = 2.0;

/// Distance from the top edge of the bounds to the rotate handle.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 24.0;

/// Rotation step applied while Shift is held.
pub const ROTATION_SNAP_DEG: f64 = 15.0;

/// Smallest uniform scale a scale gesture may produce.
pub const MIN_OBJECT_SCALE: f64 = 0.05;

// ── Export ──────────────────────────────────────────────────────

/// Raster multiplier applied to the logical canvas on export.
pub const EXPORT_MULTIPLIER: f64 = 2.0;

/// Opaque background painted beneath the exported scene.
pub const EXPORT_BACKGROUND: &str = "#ffffff";

/// Prefix of the exported file name.
pub const EXPORT_FILENAME_PREFIX: &str = "vehicle-sticker-design-";
