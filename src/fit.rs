//! Fit-to-area placement for dropped images.
//!
//! A dropped image is scaled uniformly so it fits inside the fit area (a
//! fraction of the canvas) and is centered slightly below the canvas middle.

#[cfg(test)]
#[path = "fit_test.rs"]
mod fit_test;

use serde::{Deserialize, Serialize};

use crate::consts::{FIT_ANCHOR_Y_FRACTION, FIT_AREA_FRACTION_H, FIT_AREA_FRACTION_W, FIT_MAX_SCALE};
use crate::error::DesignerError;

/// Tunables for [`compute_fit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    pub area_fraction_w: f64,
    pub area_fraction_h: f64,
    pub max_scale: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self { area_fraction_w: FIT_AREA_FRACTION_W, area_fraction_h: FIT_AREA_FRACTION_H, max_scale: FIT_MAX_SCALE }
    }
}

/// Uniform scale plus the center point to place the object at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub scale: f64,
    pub anchor_x: f64,
    pub anchor_y: f64,
}

/// Compute the uniform scale and anchor for an object dropped on a container.
///
/// The scale is the smallest of the two axis ratios and `max_scale`, so the
/// object never exceeds the fit area on either axis and tiny assets are not
/// blown up. Zero, negative, or non-finite object dimensions yield scale 1.0.
///
/// # Errors
///
/// Returns [`DesignerError::InvalidArgument`] if either container dimension is
/// not a positive finite number.
pub fn compute_fit(
    container_w: f64,
    container_h: f64,
    object_w: f64,
    object_h: f64,
    opts: FitOptions,
) -> Result<Fit, DesignerError> {
    if !is_positive(container_w) || !is_positive(container_h) {
        return Err(DesignerError::InvalidArgument(format!(
            "container must be positive, got {container_w}x{container_h}"
        )));
    }

    let anchor_x = container_w / 2.0;
    let anchor_y = container_h * FIT_ANCHOR_Y_FRACTION;

    if !is_positive(object_w) || !is_positive(object_h) {
        log::debug!("fit: {}; using scale 1.0", DesignerError::DimensionUnavailable);
        return Ok(Fit { scale: 1.0, anchor_x, anchor_y });
    }

    let target_w = container_w * opts.area_fraction_w;
    let target_h = container_h * opts.area_fraction_h;
    let scale = (target_w / object_w).min(target_h / object_h).min(opts.max_scale);

    Ok(Fit { scale, anchor_x, anchor_y })
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
