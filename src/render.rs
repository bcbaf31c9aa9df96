//! Rendering: turns the scene into a display list, then paints it.
//!
//! [`plan`] is pure. It reads the scene and the selection and produces one
//! [`DrawCommand`] per object, bottom first, so repeated renders of an
//! unchanged scene yield the same list.
//!
//! [`paint`] is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. It draws a display list and never
//! mutates application state. All fallible `Canvas2D` calls propagate errors
//! via `Result<(), JsValue>`; the caller ([`crate::engine::Engine`]) converts
//! them.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::consts::{BORDER_SCALE_FACTOR, HANDLE_SIZE_PX, ROTATE_HANDLE_OFFSET_PX, TEXT_LINE_HEIGHT};
use crate::doc::{ObjectData, ObjectId, ObjectKind, Scene, Transform};

/// What to draw for one object.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawContent {
    Image { asset_ref: String, width: f64, height: f64 },
    Text { lines: Vec<String>, font: String, color: String, line_height: f64 },
}

/// One entry of the display list.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub transform: Transform,
    pub content: DrawContent,
    /// Unscaled size used for selection chrome.
    pub width: f64,
    pub height: f64,
    pub selected: bool,
}

/// Build the display list for `scene`, bottom first.
#[must_use]
pub fn plan(scene: &Scene, selected: Option<ObjectId>) -> Vec<DrawCommand> {
    scene
        .list_objects()
        .iter()
        .map(|obj| {
            let (width, height) = obj.natural_size();
            let content = match &obj.data {
                ObjectData::Image(img) => DrawContent::Image {
                    asset_ref: img.asset_ref.clone(),
                    width: img.natural_width,
                    height: img.natural_height,
                },
                ObjectData::Text(text) => DrawContent::Text {
                    lines: text.content.lines().map(str::to_owned).collect(),
                    font: text.style.css_font(),
                    color: text.style.color_hex.clone(),
                    line_height: f64::from(text.style.font_size_pt) * TEXT_LINE_HEIGHT,
                },
            };
            DrawCommand {
                id: obj.id,
                kind: obj.kind,
                transform: obj.transform,
                content,
                width,
                height,
                selected: obj.selectable && selected == Some(obj.id),
            }
        })
        .collect()
}

/// Surface-level paint settings.
#[derive(Debug, Clone, Copy)]
pub struct PaintOptions<'a> {
    /// Logical canvas size.
    pub width: f64,
    pub height: f64,
    /// Device pixels per logical pixel.
    pub pixel_ratio: f64,
    pub background: &'a str,
    pub accent: &'a str,
    /// Draw selection borders and handles.
    pub chrome: bool,
}

/// Resolves an asset reference to a loaded image element.
pub trait ImageLookup {
    /// The element for `asset_ref` if it has finished loading, else a fallback
    /// appropriate for `kind`, else `None`.
    fn image(&self, asset_ref: &str, kind: ObjectKind) -> Option<&HtmlImageElement>;
}

/// Draw a display list.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn paint(
    ctx: &CanvasRenderingContext2d,
    commands: &[DrawCommand],
    images: &impl ImageLookup,
    opts: &PaintOptions<'_>,
) -> Result<(), JsValue> {
    // Layer 1: reset and fill the background.
    ctx.set_transform(opts.pixel_ratio, 0.0, 0.0, opts.pixel_ratio, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, opts.width, opts.height);
    ctx.set_fill_style_str(opts.background);
    ctx.fill_rect(0.0, 0.0, opts.width, opts.height);

    // Layer 2: objects, bottom first.
    for cmd in commands {
        draw_command(ctx, cmd, images)?;
    }

    // Layer 3: selection chrome.
    if opts.chrome {
        for cmd in commands.iter().filter(|c| c.selected) {
            draw_selection(ctx, cmd, opts.accent)?;
        }
    }
    Ok(())
}

fn draw_command(ctx: &CanvasRenderingContext2d, cmd: &DrawCommand, images: &impl ImageLookup) -> Result<(), JsValue> {
    ctx.save();
    apply_transform(ctx, &cmd.transform)?;
    let result = match &cmd.content {
        DrawContent::Image { asset_ref, width, height } => match images.image(asset_ref, cmd.kind) {
            Some(img) => {
                ctx.draw_image_with_html_image_element_and_dw_and_dh(img, -width / 2.0, -height / 2.0, *width, *height)
            }
            None => Ok(()),
        },
        DrawContent::Text { lines, font, color, line_height } => draw_text(ctx, lines, font, color, *line_height),
    };
    ctx.restore();
    result
}

fn draw_text(
    ctx: &CanvasRenderingContext2d,
    lines: &[String],
    font: &str,
    color: &str,
    line_height: f64,
) -> Result<(), JsValue> {
    ctx.set_font(font);
    ctx.set_fill_style_str(color);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    #[allow(clippy::cast_precision_loss)]
    let first_y = -(lines.len().saturating_sub(1) as f64) * line_height / 2.0;
    let mut y = first_y;
    for line in lines {
        ctx.fill_text(line, 0.0, y)?;
        y += line_height;
    }
    Ok(())
}

/// Move the origin to the object's center, rotate, and scale.
fn apply_transform(ctx: &CanvasRenderingContext2d, t: &Transform) -> Result<(), JsValue> {
    ctx.translate(t.x, t.y)?;
    ctx.rotate(t.rotation.to_radians())?;
    ctx.scale(t.scale_x, t.scale_y)?;
    Ok(())
}

/// Border, circular corner handles, and the rotate handle, drawn unscaled so
/// handles keep a constant on-screen size.
fn draw_selection(ctx: &CanvasRenderingContext2d, cmd: &DrawCommand, accent: &str) -> Result<(), JsValue> {
    let hw = (cmd.width * cmd.transform.scale_x).abs() / 2.0;
    let hh = (cmd.height * cmd.transform.scale_y).abs() / 2.0;

    ctx.save();
    ctx.translate(cmd.transform.x, cmd.transform.y)?;
    ctx.rotate(cmd.transform.rotation.to_radians())?;

    ctx.set_stroke_style_str(accent);
    ctx.set_line_width(BORDER_SCALE_FACTOR);
    ctx.stroke_rect(-hw, -hh, hw * 2.0, hh * 2.0);

    // Rotate handle stem.
    ctx.begin_path();
    ctx.move_to(0.0, -hh);
    ctx.line_to(0.0, -hh - ROTATE_HANDLE_OFFSET_PX);
    ctx.stroke();

    ctx.set_fill_style_str(accent);
    let r = HANDLE_SIZE_PX / 2.0;
    for (x, y) in [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh), (0.0, -hh - ROTATE_HANDLE_OFFSET_PX)] {
        ctx.begin_path();
        ctx.arc(x, y, r, 0.0, 2.0 * PI)?;
        ctx.fill();
    }

    ctx.restore();
    Ok(())
}
