use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use uuid::Uuid;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlAnchorElement, HtmlCanvasElement};

use crate::assets::ImageCache;
use crate::catalog::Catalog;
use crate::config::DesignerConfig;
use crate::consts::{MIN_OBJECT_SCALE, ROTATION_SNAP_DEG, STICKER_SIZE, UPLOAD_KEY_PREFIX};
use crate::doc::{ImageData, ObjectData, ObjectId, ObjectKind, PartialTransform, PlacedObject, Scene, TextStyle, Transform};
use crate::error::DesignerError;
use crate::export::{ExportedImage, export_filename};
use crate::fit::compute_fit;
use crate::geom::Point;
use crate::hit::{Corner, HitPart, hit_test};
use crate::input::{Button, InputState, Key, Modifiers, angle_deg, normalize_degrees, snap_degrees};
use crate::media::MediaFile;
use crate::placeholder::VehicleType;
use crate::render::{self, DrawCommand, PaintOptions};
use crate::selection::{PanelBinding, SelectionController, TextStyleEdit};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from engine handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    ObjectCreated { id: ObjectId, kind: ObjectKind },
    ObjectModified { id: ObjectId, transform: Transform },
    ObjectRemoved { id: ObjectId },
    SceneCleared,
    SelectionChanged { selected: Option<ObjectId> },
    /// Populate or detach the edit panel.
    Panel { binding: PanelBinding },
    TextStyleApplied { id: ObjectId, style: TextStyle },
    SetCursor { cursor: String },
    /// Blocking notice for the user.
    Notice { message: String },
    RenderNeeded,
}

/// Turn a failed action into host actions: a notice when the user should
/// see one, nothing otherwise. The scene is untouched either way.
#[must_use]
pub fn recover(result: Result<Vec<Action>, DesignerError>) -> Vec<Action> {
    match result {
        Ok(actions) => actions,
        Err(err) if err.is_absorbed() => {
            log::debug!("action skipped: {err}");
            Vec::new()
        }
        Err(err) => {
            log::warn!("action rejected: {err}");
            err.user_notice()
                .map(|message| vec![Action::Notice { message: message.to_owned() }])
                .unwrap_or_default()
        }
    }
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub scene: Scene,
    pub selection: SelectionController,
    pub input: InputState,
    pub catalog: Catalog,
    pub config: DesignerConfig,
    vehicle: VehicleType,
    cursor: String,
    rng: StdRng,
    /// Uploaded file bytes as data URLs, keyed by the `asset_ref` of the
    /// objects showing them. Held once here instead of on every object.
    uploads: HashMap<String, String>,
    /// Uploads placed before their size was known, with the fallback
    /// transform they were given.
    r#unsized: HashMap<ObjectId, Transform>,
}

impl EngineCore {
    /// Build an engine with the default vehicle loaded. `seed` drives sticker placement.
    #[must_use]
    pub fn new(config: DesignerConfig, catalog: Catalog, seed: u64) -> Self {
        let mut core = Self {
            scene: Scene::new(),
            selection: SelectionController::new(),
            input: InputState::Idle,
            catalog,
            config,
            vehicle: VehicleType::default(),
            cursor: "default".to_owned(),
            rng: StdRng::seed_from_u64(seed),
            uploads: HashMap::new(),
            r#unsized: HashMap::new(),
        };
        core.load_vehicle();
        core
    }

    // --- Vehicle ---

    #[must_use]
    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle
    }

    /// Switch the silhouette. User content stays where it is.
    pub fn set_vehicle(&mut self, vehicle: VehicleType) -> Vec<Action> {
        self.vehicle = vehicle;
        let id = self.load_vehicle();
        vec![Action::ObjectCreated { id, kind: ObjectKind::Vehicle }, Action::RenderNeeded]
    }

    fn load_vehicle(&mut self) -> ObjectId {
        let t = Transform::at(
            self.config.canvas_width / 2.0,
            self.config.canvas_height / 2.0,
            self.config.vehicle_scale,
        );
        log::debug!("engine: loading {} silhouette", self.vehicle.name());
        self.scene.set_vehicle(self.vehicle, t)
    }

    // --- Placement ---

    /// Drop a catalog sticker at a random spot in the spawn area and select it.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::UnknownSticker`] if `sticker_id` is not in the catalog.
    pub fn add_sticker(&mut self, sticker_id: u32) -> Result<Vec<Action>, DesignerError> {
        let asset_ref = self
            .catalog
            .get(sticker_id)
            .map(|s| s.asset_ref.clone())
            .ok_or(DesignerError::UnknownSticker(sticker_id))?;
        let spawn = self.config.sticker_spawn;
        let x = spawn.min_x + self.rng.random::<f64>() * spawn.span_x;
        let y = spawn.min_y + self.rng.random::<f64>() * spawn.span_y;
        let image = ImageData { natural_width: STICKER_SIZE, natural_height: STICKER_SIZE, asset_ref };
        self.place_and_select(PlacedObject::sticker(image, Transform::at(x, y, self.config.sticker_scale)))
    }

    /// Add a text object at the canvas center and select it.
    ///
    /// `style` falls back to the configured default.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::EmptyTextInput`] for blank content and
    /// [`DesignerError::InvalidTextStyle`] for a bad style.
    pub fn add_text(&mut self, content: &str, style: Option<TextStyle>) -> Result<Vec<Action>, DesignerError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DesignerError::EmptyTextInput);
        }
        let style = style.unwrap_or_else(|| self.config.default_text_style.clone()).validated()?;
        let t = Transform::at(self.config.canvas_width / 2.0, self.config.canvas_height / 2.0, 1.0);
        self.place_and_select(PlacedObject::text(content, style, t))
    }

    /// Place a user-provided image scaled into the fit area and select it.
    ///
    /// The file's bytes go into the upload store under a fresh `upload:` key,
    /// which becomes the object's `asset_ref`. Images whose size cannot be
    /// read are placed at scale 1.0 and refit by
    /// [`EngineCore::resolve_natural_size`] once the browser knows the size.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::InvalidFileType`] for unsupported MIME types;
    /// nothing is added in that case.
    pub fn handle_user_image(&mut self, bytes: Vec<u8>, mime: &str) -> Result<Vec<Action>, DesignerError> {
        let file = MediaFile::new(bytes, mime)?;
        let dims = file.dimensions();
        let (w, h) = dims.unwrap_or((0.0, 0.0));
        let fit = compute_fit(self.config.canvas_width, self.config.canvas_height, w, h, self.config.fit)?;
        let key = format!("{UPLOAD_KEY_PREFIX}{}", Uuid::new_v4());
        let transform = Transform::at(fit.anchor_x, fit.anchor_y, fit.scale);
        let image = ImageData { natural_width: w, natural_height: h, asset_ref: key.clone() };
        let obj = PlacedObject::user_image(image, transform);
        let id = obj.id;
        let actions = self.place_and_select(obj)?;
        self.uploads.insert(key, file.data_url());
        if dims.is_none() {
            self.r#unsized.insert(id, transform);
        }
        Ok(actions)
    }

    /// Fill in the natural size of image objects that were placed without one.
    ///
    /// Uploads still sitting at their fallback transform are refit to the
    /// real size. Ones the user has already moved, scaled, or rotated keep
    /// their transform.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::InvalidArgument`] if the configured canvas
    /// size is not positive.
    pub fn resolve_natural_size(
        &mut self,
        asset_ref: &str,
        width: f64,
        height: f64,
    ) -> Result<Vec<Action>, DesignerError> {
        if width <= 0.0 || height <= 0.0 {
            return Ok(Vec::new());
        }
        let pending: Vec<ObjectId> = self
            .scene
            .list_objects()
            .iter()
            .filter(|o| {
                matches!(&o.data, ObjectData::Image(img)
                    if img.asset_ref == asset_ref && (img.natural_width <= 0.0 || img.natural_height <= 0.0))
            })
            .map(|o| o.id)
            .collect();
        if pending.is_empty() {
            return Ok(Vec::new());
        }
        let fit = compute_fit(self.config.canvas_width, self.config.canvas_height, width, height, self.config.fit)?;
        let mut actions = Vec::new();
        for id in pending {
            let fallback = self.r#unsized.remove(&id);
            let Some(obj) = self.scene.get_mut(&id) else {
                continue;
            };
            if let ObjectData::Image(img) = &mut obj.data {
                img.natural_width = width;
                img.natural_height = height;
            }
            if fallback == Some(obj.transform) {
                obj.transform = Transform::at(fit.anchor_x, fit.anchor_y, fit.scale);
                log::debug!("engine: refit {id} to {width}x{height} at scale {}", fit.scale);
                actions.push(Action::ObjectModified { id, transform: obj.transform });
            }
        }
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    fn place_and_select(&mut self, obj: PlacedObject) -> Result<Vec<Action>, DesignerError> {
        let kind = obj.kind;
        let id = self.scene.add_object(obj)?;
        let mut actions = vec![Action::ObjectCreated { id, kind }];
        actions.extend(self.select(id));
        Ok(actions)
    }

    // --- Assets ---

    /// What the browser should load for `asset_ref`: the stored data URL for
    /// an upload key, otherwise the reference itself.
    #[must_use]
    pub fn asset_source<'a>(&'a self, asset_ref: &'a str) -> &'a str {
        self.uploads.get(asset_ref).map_or(asset_ref, String::as_str)
    }

    /// Drop stored uploads that no object references any more.
    fn prune_uploads(&mut self) {
        let live: HashSet<&str> = self.scene.asset_refs().collect();
        let before = self.uploads.len();
        self.uploads.retain(|key, _| live.contains(key.as_str()));
        if self.uploads.len() < before {
            log::debug!("engine: released {} upload(s)", before - self.uploads.len());
        }
    }

    // --- Scene-wide ---

    /// Wipe every object, then reload the current vehicle.
    pub fn clear(&mut self) -> Vec<Action> {
        self.scene.clear();
        self.selection.clear();
        self.input = InputState::Idle;
        self.uploads.clear();
        self.r#unsized.clear();
        let id = self.load_vehicle();
        vec![
            Action::SceneCleared,
            Action::SelectionChanged { selected: None },
            Action::Panel { binding: PanelBinding::Detached },
            Action::ObjectCreated { id, kind: ObjectKind::Vehicle },
            Action::RenderNeeded,
        ]
    }

    // --- Selection ---

    /// Selection event from the rendering layer.
    pub fn select(&mut self, id: ObjectId) -> Vec<Action> {
        let binding = self.selection.select(id, &self.scene);
        vec![
            Action::SelectionChanged { selected: self.selection.selected() },
            Action::Panel { binding },
            Action::RenderNeeded,
        ]
    }

    /// Clear-selection event from the rendering layer.
    pub fn clear_selection(&mut self) -> Vec<Action> {
        let binding = self.selection.clear();
        vec![Action::SelectionChanged { selected: None }, Action::Panel { binding }, Action::RenderNeeded]
    }

    /// Apply an edit-panel change to the bound text object, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::InvalidTextStyle`] if the edit is invalid.
    pub fn edit_text_style(&mut self, edit: &TextStyleEdit) -> Result<Vec<Action>, DesignerError> {
        let Some(style) = self.selection.apply_style_edit(&mut self.scene, edit)? else {
            return Ok(Vec::new());
        };
        let Some(id) = self.selection.selected() else {
            return Ok(Vec::new());
        };
        Ok(vec![Action::TextStyleApplied { id, style }, Action::RenderNeeded])
    }

    /// Delete the selected object. Locked objects are never deleted.
    pub fn remove_selected(&mut self) -> Vec<Action> {
        let Some(id) = self.selection.selected() else {
            return Vec::new();
        };
        if !self.scene.get(&id).is_some_and(|o| o.selectable) {
            return Vec::new();
        }
        self.scene.remove_object(&id);
        self.selection.object_removed(&id);
        self.r#unsized.remove(&id);
        self.prune_uploads();
        if self.input.target() == Some(id) {
            self.input = InputState::Idle;
        }
        vec![
            Action::ObjectRemoved { id },
            Action::SelectionChanged { selected: None },
            Action::Panel { binding: PanelBinding::Detached },
            Action::RenderNeeded,
        ]
    }

    pub fn bring_selected_to_front(&mut self) -> Vec<Action> {
        match self.selection.selected() {
            Some(id) if self.scene.bring_to_front(&id) => vec![Action::RenderNeeded],
            _ => Vec::new(),
        }
    }

    pub fn send_selected_to_back(&mut self) -> Vec<Action> {
        match self.selection.selected() {
            Some(id) if self.scene.send_to_back(&id) => vec![Action::RenderNeeded],
            _ => Vec::new(),
        }
    }

    // --- Pointer / keyboard ---

    pub fn on_pointer_down(&mut self, pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let selected = self.selection.selected();
        let Some(hit) = hit_test(pt, &self.scene, selected) else {
            self.input = InputState::Idle;
            return if selected.is_some() { self.clear_selection() } else { Vec::new() };
        };
        let Some(orig) = self.scene.get(&hit.object_id).map(|o| o.transform) else {
            return Vec::new();
        };

        let id = hit.object_id;
        let mut actions = Vec::new();
        match hit.part {
            HitPart::Body => {
                if selected != Some(id) {
                    actions.extend(self.select(id));
                }
                self.input = InputState::DraggingObject { id, last: pt, orig };
                actions.extend(self.set_cursor("grabbing"));
            }
            HitPart::ScaleHandle(_) => {
                let start_dist = orig.center().distance(pt);
                if start_dist > f64::EPSILON {
                    self.input = InputState::ScalingObject { id, start_dist, orig };
                }
            }
            HitPart::RotateHandle => {
                let start_angle = angle_deg(orig.center(), pt);
                self.input = InputState::RotatingObject { id, start_angle, orig };
            }
        }
        actions
    }

    pub fn on_pointer_move(&mut self, pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let partial = match self.input {
            InputState::Idle => return self.hover(pt),
            InputState::DraggingObject { id, last, orig } => {
                let Some(cur) = self.scene.get(&id).map(|o| o.transform) else {
                    self.input = InputState::Idle;
                    return Vec::new();
                };
                self.input = InputState::DraggingObject { id, last: pt, orig };
                PartialTransform { x: Some(cur.x + pt.x - last.x), y: Some(cur.y + pt.y - last.y), ..Default::default() }
            }
            InputState::ScalingObject { start_dist, orig, .. } => {
                let factor = orig.center().distance(pt) / start_dist;
                PartialTransform {
                    scale_x: Some((orig.scale_x * factor).max(MIN_OBJECT_SCALE)),
                    scale_y: Some((orig.scale_y * factor).max(MIN_OBJECT_SCALE)),
                    ..Default::default()
                }
            }
            InputState::RotatingObject { start_angle, orig, .. } => {
                let mut rotation = normalize_degrees(orig.rotation + angle_deg(orig.center(), pt) - start_angle);
                if modifiers.shift {
                    rotation = normalize_degrees(snap_degrees(rotation, ROTATION_SNAP_DEG));
                }
                PartialTransform { rotation: Some(rotation), ..Default::default() }
            }
        };
        let Some(id) = self.input.target() else {
            return Vec::new();
        };
        if self.scene.apply_partial(&id, &partial) {
            vec![Action::RenderNeeded]
        } else {
            self.input = InputState::Idle;
            Vec::new()
        }
    }

    pub fn on_pointer_up(&mut self, pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        let mut actions = Vec::new();
        if let (Some(id), Some(orig)) = (state.target(), state.original()) {
            if let Some(obj) = self.scene.get(&id) {
                if obj.transform != orig {
                    actions.push(Action::ObjectModified { id, transform: obj.transform });
                }
            }
        }
        actions.extend(self.hover(pt));
        actions
    }

    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.is_delete() {
            return self.remove_selected();
        }
        if key.is_escape() && self.selection.selected().is_some() {
            self.input = InputState::Idle;
            return self.clear_selection();
        }
        Vec::new()
    }

    fn hover(&mut self, pt: Point) -> Vec<Action> {
        let cursor = match hit_test(pt, &self.scene, self.selection.selected()).map(|h| h.part) {
            None => "default",
            Some(HitPart::Body) => "move",
            Some(HitPart::RotateHandle) => "crosshair",
            Some(HitPart::ScaleHandle(Corner::Nw | Corner::Se)) => "nwse-resize",
            Some(HitPart::ScaleHandle(Corner::Ne | Corner::Sw)) => "nesw-resize",
        };
        self.set_cursor(cursor)
    }

    fn set_cursor(&mut self, cursor: &str) -> Vec<Action> {
        if self.cursor == cursor {
            return Vec::new();
        }
        cursor.clone_into(&mut self.cursor);
        vec![Action::SetCursor { cursor: cursor.to_owned() }]
    }

    // --- Queries ---

    /// The currently selected object, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.selection.selected()
    }

    /// Look up an object by ID.
    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&PlacedObject> {
        self.scene.get(id)
    }

    /// Display list for the current scene and selection.
    #[must_use]
    pub fn display_list(&self) -> Vec<DrawCommand> {
        render::plan(&self.scene, self.selection.selected())
    }
}

/// The full designer engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: ImageCache,
    pixel_ratio: f64,
    /// Actions raised while syncing assets, handed out by the next
    /// [`Engine::apply`] or [`Engine::render`].
    pending: Vec<Action>,
    pub core: EngineCore,
}

impl Engine {
    /// Bind to the canvas element with DOM id `canvas_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::MissingDomTarget`] if there is no document, no
    /// such element, it is not a canvas, or it has no 2D context.
    pub fn from_element_id(canvas_id: &str, config: DesignerConfig, catalog: Catalog) -> Result<Self, DesignerError> {
        let canvas = document()?
            .get_element_by_id(canvas_id)
            .ok_or_else(|| DesignerError::MissingDomTarget(format!("#{canvas_id}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| DesignerError::MissingDomTarget(format!("#{canvas_id} is not a canvas")))?;
        Self::new(canvas, config, catalog)
    }

    /// Create an engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::MissingDomTarget`] if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, config: DesignerConfig, catalog: Catalog) -> Result<Self, DesignerError> {
        let ctx = context_2d(&canvas)?;
        let pixel_ratio = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio()).max(1.0);
        let (w, h) = (config.canvas_width * pixel_ratio, config.canvas_height * pixel_ratio);
        canvas.set_width(to_px(w));
        canvas.set_height(to_px(h));
        canvas
            .set_attribute("style", &format!("width:{}px;height:{}px", config.canvas_width, config.canvas_height))
            .map_err(js_err)?;

        let mut images = ImageCache::new();
        images.ensure_fallbacks()?;
        let core = EngineCore::new(config, catalog, js_sys::Date::now().to_bits());
        let mut engine = Self { canvas, ctx, images, pixel_ratio, pending: Vec::new(), core };
        engine.sync_assets();
        Ok(engine)
    }

    /// Callback the engine runs whenever artwork finishes loading.
    pub fn set_on_asset_ready(&mut self, callback: js_sys::Function) {
        self.images.set_on_ready(callback);
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Run a mutation against the core, then make sure new artwork is loading.
    pub fn apply<F>(&mut self, f: F) -> Vec<Action>
    where
        F: FnOnce(&mut EngineCore) -> Result<Vec<Action>, DesignerError>,
    {
        let mut actions = recover(f(&mut self.core));
        self.sync_assets();
        actions.append(&mut self.pending);
        actions
    }

    /// Start loading new artwork, resolve sizes the browser has measured,
    /// and evict images nothing references.
    fn sync_assets(&mut self) {
        let refs: Vec<String> = self.core.scene.asset_refs().map(str::to_owned).collect();
        for asset_ref in &refs {
            if let Err(err) = self.images.ensure(asset_ref, self.core.asset_source(asset_ref)) {
                log::warn!("assets: {err}");
            }
            if let Some((w, h)) = self.images.natural_size(asset_ref) {
                let actions = recover(self.core.resolve_natural_size(asset_ref, w, h));
                self.pending.extend(actions);
            }
        }
        self.images.retain_referenced(&refs);
    }

    // --- Render ---

    /// Draw the current state to the canvas. Returns any actions raised by
    /// artwork that finished loading since the last call.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::Render`] if a `Canvas2D` call fails.
    pub fn render(&mut self) -> Result<Vec<Action>, DesignerError> {
        self.sync_assets();
        let config = &self.core.config;
        let opts = PaintOptions {
            width: config.canvas_width,
            height: config.canvas_height,
            pixel_ratio: self.pixel_ratio,
            background: &config.background,
            accent: &config.selection_accent,
            chrome: true,
        };
        render::paint(&self.ctx, &self.core.display_list(), &self.images, &opts).map_err(js_err)?;
        Ok(std::mem::take(&mut self.pending))
    }

    // --- Export ---

    /// Rasterize the design at the export multiplier on an opaque background.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::MissingDomTarget`] without a document and
    /// [`DesignerError::Render`] if painting or encoding fails.
    pub fn export_png(&mut self) -> Result<ExportedImage, DesignerError> {
        self.sync_assets();
        let config = &self.core.config;
        let canvas = document()?
            .create_element("canvas")
            .map_err(js_err)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| DesignerError::Render("created element is not a canvas".into()))?;
        let (w, h) = config.export.output_size(config.canvas_width, config.canvas_height);
        canvas.set_width(w);
        canvas.set_height(h);
        let ctx = context_2d(&canvas)?;

        let opts = PaintOptions {
            width: config.canvas_width,
            height: config.canvas_height,
            pixel_ratio: config.export.multiplier,
            background: &config.export.background,
            accent: &config.selection_accent,
            chrome: false,
        };
        render::paint(&ctx, &self.core.display_list(), &self.images, &opts).map_err(js_err)?;
        let data_url = canvas.to_data_url_with_type("image/png").map_err(js_err)?;
        Ok(ExportedImage { filename: export_filename(now_ms()), data_url })
    }

    /// Export and hand the PNG to the browser as a download.
    ///
    /// # Errors
    ///
    /// See [`Engine::export_png`]; also fails with
    /// [`DesignerError::MissingDomTarget`] if the page has no `<body>`.
    pub fn download(&mut self) -> Result<ExportedImage, DesignerError> {
        let image = self.export_png()?;
        let document = document()?;
        let body = document.body().ok_or_else(|| DesignerError::MissingDomTarget("body".into()))?;
        let link = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| DesignerError::Render("created element is not an anchor".into()))?;
        link.set_download(&image.filename);
        link.set_href(&image.data_url);
        body.append_child(&link).map_err(js_err)?;
        link.click();
        body.remove_child(&link).map_err(js_err)?;
        log::info!("export: downloaded {}", image.filename);
        Ok(image)
    }
}

fn document() -> Result<Document, DesignerError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| DesignerError::MissingDomTarget("document".into()))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, DesignerError> {
    canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or_else(|| DesignerError::MissingDomTarget("2d context".into()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| DesignerError::MissingDomTarget("2d context".into()))
}

fn js_err(err: JsValue) -> DesignerError {
    DesignerError::Render(format!("{err:?}"))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn now_ms() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_px(v: f64) -> u32 {
    v.round().max(0.0) as u32
}
