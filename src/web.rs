//! JavaScript bindings.
//!
//! The host wires DOM events to a [`Designer`] and reads back the resulting
//! actions as a JSON array. Every handler returns that array, even when it is
//! empty, so the host has one code path for all of them.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::catalog::{Catalog, Category};
use crate::config::DesignerConfig;
use crate::doc::TextStyle;
use crate::engine::{Action, Engine};
use crate::error::DesignerError;
use crate::geom::Point;
use crate::input::{Button, Key, Modifiers};
use crate::placeholder::{self, VehicleType};
use crate::selection::TextStyleEdit;

/// Install the panic hook and the console logger. `level` is a `log` level
/// name; unknown or missing values fall back to `info`.
#[wasm_bindgen(js_name = initDesigner)]
pub fn init(level: Option<String>) {
    console_error_panic_hook::set_once();
    let level = match level.as_deref().map(str::parse::<log::Level>) {
        Some(Ok(level)) => level,
        _ => log::Level::Info,
    };
    if console_log::init_with_level(level).is_err() {
        log::debug!("logger already installed");
    }
}

/// Data URL of the large gallery preview tile.
#[wasm_bindgen]
#[must_use]
pub fn gallery_preview_url() -> String {
    placeholder::svg_data_url(&placeholder::gallery_preview_svg())
}

/// Data URL of the small sticker tile used in the designer sidebar.
#[wasm_bindgen]
#[must_use]
pub fn tile_preview_url() -> String {
    placeholder::svg_data_url(&placeholder::tile_preview_svg())
}

#[wasm_bindgen]
pub struct Designer {
    engine: Engine,
}

#[wasm_bindgen]
impl Designer {
    /// Bind to the canvas with DOM id `canvas_id`.
    ///
    /// `config_json` and `catalog_json` are optional; the defaults and the
    /// built-in catalog are used when absent.
    ///
    /// # Errors
    ///
    /// Fails if either JSON document is invalid or the canvas cannot be found.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config_json: Option<String>, catalog_json: Option<String>) -> Result<Designer, JsValue> {
        let config = match config_json {
            Some(raw) => DesignerConfig::from_json(&raw).and_then(DesignerConfig::validate),
            None => Ok(DesignerConfig::default()),
        }
        .map_err(to_js)?;
        let catalog = match catalog_json {
            Some(raw) => Catalog::from_json(&raw).map_err(to_js)?,
            None => Catalog::builtin(),
        };
        log::info!("designer: {} stickers, canvas #{canvas_id}", catalog.len());
        let engine = Engine::from_element_id(canvas_id, config, catalog).map_err(to_js)?;
        Ok(Self { engine })
    }

    /// Register the redraw callback run when artwork finishes loading.
    pub fn set_on_asset_ready(&mut self, callback: js_sys::Function) {
        self.engine.set_on_asset_ready(callback);
    }

    /// Redraw. Returns the actions raised by artwork that finished loading,
    /// such as a refit upload.
    ///
    /// # Errors
    ///
    /// Fails if a canvas call fails.
    pub fn render(&mut self) -> Result<String, JsValue> {
        absorb(self.engine.render()).map(|acts| actions(&acts.unwrap_or_default()))
    }

    // --- Catalog ---

    /// The whole catalog as JSON.
    #[must_use]
    pub fn catalog(&self) -> String {
        to_json(&self.engine.core.catalog.all())
    }

    /// Stickers in `category` as JSON. Unknown categories yield `[]`.
    #[must_use]
    pub fn stickers_in(&self, category: &str) -> String {
        let stickers = Category::parse(category)
            .map(|c| self.engine.core.catalog.by_category(c))
            .unwrap_or_default();
        to_json(&stickers)
    }

    /// Stickers carrying `tag` as JSON.
    #[must_use]
    pub fn search_stickers(&self, tag: &str) -> String {
        to_json(&self.engine.core.catalog.search_tag(tag))
    }

    // --- Placement ---

    pub fn set_vehicle(&mut self, vehicle: &str) -> String {
        let vehicle = VehicleType::parse(vehicle);
        actions(&self.engine.apply(|core| Ok(core.set_vehicle(vehicle))))
    }

    pub fn add_sticker(&mut self, sticker_id: u32) -> String {
        actions(&self.engine.apply(|core| core.add_sticker(sticker_id)))
    }

    /// Add text. Missing style fields come from the configured default.
    pub fn add_text(
        &mut self,
        content: &str,
        font_family: Option<String>,
        font_size_pt: Option<u32>,
        color_hex: Option<String>,
    ) -> String {
        let edit = TextStyleEdit { font_family, font_size_pt, color_hex };
        actions(&self.engine.apply(|core| {
            let style = edit.merged_onto(&core.config.default_text_style)?;
            core.add_text(content, Some(style))
        }))
    }

    /// Place an uploaded file. `bytes` is the file content as read by the host.
    pub fn upload_image(&mut self, bytes: Vec<u8>, mime: &str) -> String {
        actions(&self.engine.apply(|core| core.handle_user_image(bytes, mime)))
    }

    pub fn clear(&mut self) -> String {
        actions(&self.engine.apply(|core| Ok(core.clear())))
    }

    // --- Selection ---

    pub fn clear_selection(&mut self) -> String {
        actions(&self.engine.apply(|core| Ok(core.clear_selection())))
    }

    /// Live edit from the text panel. Absent fields are left unchanged.
    pub fn edit_text_style(
        &mut self,
        font_family: Option<String>,
        font_size_pt: Option<u32>,
        color_hex: Option<String>,
    ) -> String {
        let edit = TextStyleEdit { font_family, font_size_pt, color_hex };
        actions(&self.engine.apply(|core| core.edit_text_style(&edit)))
    }

    pub fn delete_selected(&mut self) -> String {
        actions(&self.engine.apply(|core| Ok(core.remove_selected())))
    }

    pub fn bring_to_front(&mut self) -> String {
        actions(&self.engine.apply(|core| Ok(core.bring_selected_to_front())))
    }

    pub fn send_to_back(&mut self) -> String {
        actions(&self.engine.apply(|core| Ok(core.send_selected_to_back())))
    }

    /// The default text style as JSON, for seeding the panel.
    #[must_use]
    pub fn default_text_style(&self) -> String {
        to_json::<TextStyle>(&self.engine.core.config.default_text_style)
    }

    // --- Input ---

    /// `modifiers` is a bit set: 1 shift, 2 ctrl, 4 alt, 8 meta.
    pub fn pointer_down(&mut self, x: f64, y: f64, button: i16, modifiers: u8) -> String {
        let (pt, button, mods) = (Point::new(x, y), Button::from_dom(button), modifiers_from_bits(modifiers));
        actions(&self.engine.apply(|core| Ok(core.on_pointer_down(pt, button, mods))))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, modifiers: u8) -> String {
        let (pt, mods) = (Point::new(x, y), modifiers_from_bits(modifiers));
        actions(&self.engine.apply(|core| Ok(core.on_pointer_move(pt, mods))))
    }

    pub fn pointer_up(&mut self, x: f64, y: f64, button: i16, modifiers: u8) -> String {
        let (pt, button, mods) = (Point::new(x, y), Button::from_dom(button), modifiers_from_bits(modifiers));
        actions(&self.engine.apply(|core| Ok(core.on_pointer_up(pt, button, mods))))
    }

    pub fn key_down(&mut self, key: &str, modifiers: u8) -> String {
        let (key, mods) = (Key(key.to_owned()), modifiers_from_bits(modifiers));
        actions(&self.engine.apply(|core| Ok(core.on_key_down(&key, mods))))
    }

    // --- Export ---

    /// Export and download the design. Returns the file name, or `undefined`
    /// if the page has no document or body to download through.
    ///
    /// # Errors
    ///
    /// Fails if the canvas cannot encode.
    pub fn download(&mut self) -> Result<Option<String>, JsValue> {
        absorb(self.engine.download()).map(|image| image.map(|image| image.filename))
    }

    /// Export without downloading. Returns `{filename, data_url}` as JSON, or
    /// `undefined` if the page has no document.
    ///
    /// # Errors
    ///
    /// Fails if the canvas cannot encode.
    pub fn export_png(&mut self) -> Result<Option<String>, JsValue> {
        absorb(self.engine.export_png()).map(|image| image.map(|image| to_json(&image)))
    }
}

fn modifiers_from_bits(bits: u8) -> Modifiers {
    Modifiers { shift: bits & 1 != 0, ctrl: bits & 2 != 0, alt: bits & 4 != 0, meta: bits & 8 != 0 }
}

fn actions(actions: &[Action]) -> String {
    to_json(&actions)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::error!("web: serialization failed: {err}");
        "[]".to_owned()
    })
}

/// Absorbed failures become a logged no-op; the rest are thrown to JS.
fn absorb<T>(result: Result<T, DesignerError>) -> Result<Option<T>, JsValue> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_absorbed() => {
            log::debug!("web: skipped: {err}");
            Ok(None)
        }
        Err(err) => Err(to_js(err)),
    }
}

fn to_js(err: DesignerError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
