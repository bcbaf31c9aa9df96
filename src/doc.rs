//! Scene model: placed objects, their per-kind data, and the ordered scene.
//!
//! This module defines what is on the design surface (`PlacedObject`,
//! `ObjectKind`, `ObjectData`), a sparse transform update for gestures
//! (`PartialTransform`), and the store that owns every live object (`Scene`).
//!
//! The scene is an ordered stack: index 0 is drawn first. It upholds two
//! invariants after every mutation:
//!
//! - at most one [`ObjectKind::Vehicle`] exists, and it sits at index 0;
//! - each object's `z_order` equals its index.
//!
//! Nothing here touches the browser. The renderer reads the stack through
//! [`Scene::list_objects`].

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color;
use crate::consts::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE_PT, DEFAULT_TEXT_COLOR, MAX_FONT_SIZE_PT, MIN_FONT_SIZE_PT,
    TEXT_AVG_ADVANCE, TEXT_LINE_HEIGHT, VEHICLE_HEIGHT, VEHICLE_WIDTH,
};
use crate::error::DesignerError;
use crate::geom::{Bounds, Point};
use crate::placeholder::{self, VehicleType};

/// Unique identifier for a placed object.
pub type ObjectId = Uuid;

/// What a placed object represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Locked background silhouette.
    Vehicle,
    /// Artwork picked from the catalog.
    Sticker,
    /// Free text.
    Text,
    /// Image uploaded or dropped by the user.
    UserImage,
}

/// Position, scale, and rotation. `x`/`y` are the object's center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Clockwise rotation in degrees around the center.
    pub rotation: f64,
}

impl Transform {
    /// Unrotated transform centered at (`x`, `y`) with a uniform `scale`.
    #[must_use]
    pub fn at(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale_x: scale, scale_y: scale, rotation: 0.0 }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::at(0.0, 0.0, 1.0)
    }
}

/// Font, size, and fill of a text object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size_pt: u32,
    /// Canonical lowercase `#rrggbb`.
    pub color_hex: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            font_size_pt: DEFAULT_FONT_SIZE_PT,
            color_hex: DEFAULT_TEXT_COLOR.to_owned(),
        }
    }
}

impl TextStyle {
    /// Check the style and normalize its color.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::InvalidTextStyle`] for a blank font family, a
    /// size outside the accepted range, or a color that is not `#RGB`/`#RRGGBB`.
    pub fn validated(self) -> Result<Self, DesignerError> {
        let font_family = self.font_family.trim().to_owned();
        if font_family.is_empty() {
            return Err(DesignerError::InvalidTextStyle("font family is empty".into()));
        }
        if !(MIN_FONT_SIZE_PT..=MAX_FONT_SIZE_PT).contains(&self.font_size_pt) {
            return Err(DesignerError::InvalidTextStyle(format!("font size {} out of range", self.font_size_pt)));
        }
        let Some(color_hex) = color::normalize_hex(&self.color_hex) else {
            return Err(DesignerError::InvalidTextStyle(format!("bad color {:?}", self.color_hex)));
        };
        Ok(Self { font_family, font_size_pt: self.font_size_pt, color_hex })
    }

    /// CSS `font` shorthand for this style.
    #[must_use]
    pub fn css_font(&self) -> String {
        format!("{}px {}", self.font_size_pt, self.font_family)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextData {
    pub content: String,
    pub style: TextStyle,
}

impl TextData {
    /// Approximate unscaled (width, height) of the rendered text.
    ///
    /// The browser owns glyph metrics; this estimate only drives hit-testing
    /// and selection chrome.
    #[must_use]
    pub fn approx_size(&self) -> (f64, f64) {
        let size = f64::from(self.style.font_size_pt);
        let lines: Vec<&str> = self.content.lines().collect();
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let line_count = lines.len().max(1);
        #[allow(clippy::cast_precision_loss)]
        let (widest, line_count) = (widest as f64, line_count as f64);
        (widest * size * TEXT_AVG_ADVANCE, line_count * size * TEXT_LINE_HEIGHT)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    pub natural_width: f64,
    pub natural_height: f64,
    /// Path or `data:` URL of the artwork, or an `upload:` key whose bytes
    /// the engine holds once in its upload store.
    pub asset_ref: String,
}

/// Per-kind payload. Text objects carry [`TextData`]; everything else is image-backed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectData {
    Text(TextData),
    Image(ImageData),
}

/// An item on the design surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub transform: Transform,
    /// Stacking position; equals the object's index in the scene.
    pub z_order: i64,
    /// Locked objects ignore selection and gestures.
    pub selectable: bool,
    pub data: ObjectData,
}

impl PlacedObject {
    /// A selectable text object.
    #[must_use]
    pub fn text(content: impl Into<String>, style: TextStyle, transform: Transform) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ObjectKind::Text,
            transform,
            z_order: 0,
            selectable: true,
            data: ObjectData::Text(TextData { content: content.into(), style }),
        }
    }

    /// A selectable catalog sticker.
    #[must_use]
    pub fn sticker(image: ImageData, transform: Transform) -> Self {
        Self::with_image(ObjectKind::Sticker, image, transform)
    }

    /// A selectable image supplied by the user.
    #[must_use]
    pub fn user_image(image: ImageData, transform: Transform) -> Self {
        Self::with_image(ObjectKind::UserImage, image, transform)
    }

    /// The locked silhouette for `vehicle`, drawn from its placeholder artwork.
    #[must_use]
    pub fn vehicle(vehicle: VehicleType, transform: Transform) -> Self {
        let image = ImageData {
            natural_width: VEHICLE_WIDTH,
            natural_height: VEHICLE_HEIGHT,
            asset_ref: placeholder::svg_data_url(placeholder::vehicle_svg(vehicle)),
        };
        Self::with_image(ObjectKind::Vehicle, image, transform)
    }

    fn with_image(kind: ObjectKind, image: ImageData, transform: Transform) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            transform,
            z_order: 0,
            selectable: kind != ObjectKind::Vehicle,
            data: ObjectData::Image(image),
        }
    }

    /// Text kind carries text data and every other kind carries image data.
    #[must_use]
    pub fn kind_matches_data(&self) -> bool {
        (self.kind == ObjectKind::Text) == matches!(self.data, ObjectData::Text(_))
    }

    #[must_use]
    pub fn text_data(&self) -> Option<&TextData> {
        match &self.data {
            ObjectData::Text(t) => Some(t),
            ObjectData::Image(_) => None,
        }
    }

    pub fn text_data_mut(&mut self) -> Option<&mut TextData> {
        match &mut self.data {
            ObjectData::Text(t) => Some(t),
            ObjectData::Image(_) => None,
        }
    }

    /// Unscaled (width, height).
    #[must_use]
    pub fn natural_size(&self) -> (f64, f64) {
        match &self.data {
            ObjectData::Text(t) => t.approx_size(),
            ObjectData::Image(img) => (img.natural_width, img.natural_height),
        }
    }

    /// Rotated footprint on the canvas.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let (w, h) = self.natural_size();
        Bounds {
            center: self.transform.center(),
            half_width: (w * self.transform.scale_x).abs() / 2.0,
            half_height: (h * self.transform.scale_y).abs() / 2.0,
            rotation: self.transform.rotation,
        }
    }
}

/// Sparse transform update. Only present fields are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialTransform {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl PartialTransform {
    /// Merge present fields into `t`.
    pub fn apply_to(&self, t: &mut Transform) {
        if let Some(x) = self.x {
            t.x = x;
        }
        if let Some(y) = self.y {
            t.y = y;
        }
        if let Some(sx) = self.scale_x {
            t.scale_x = sx;
        }
        if let Some(sy) = self.scale_y {
            t.scale_y = sy;
        }
        if let Some(r) = self.rotation {
            t.rotation = r;
        }
    }
}

/// Ordered stack of placed objects. Index 0 is the bottom.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<PlacedObject>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self { objects: Vec::new() }
    }

    /// Insert an object and return its id.
    ///
    /// Non-vehicle objects go on top. A vehicle replaces any existing vehicle,
    /// is locked, and goes to the bottom.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::InvalidArgument`] if the object's kind and data
    /// disagree; the scene is unchanged.
    pub fn add_object(&mut self, obj: PlacedObject) -> Result<ObjectId, DesignerError> {
        if !obj.kind_matches_data() {
            return Err(DesignerError::InvalidArgument(format!("{:?} object with mismatched data", obj.kind)));
        }
        Ok(self.insert(obj))
    }

    /// Replace the vehicle with a fresh silhouette for `vehicle`.
    pub fn set_vehicle(&mut self, vehicle: VehicleType, transform: Transform) -> ObjectId {
        self.insert(PlacedObject::vehicle(vehicle, transform))
    }

    fn insert(&mut self, mut obj: PlacedObject) -> ObjectId {
        let id = obj.id;
        if obj.kind == ObjectKind::Vehicle {
            self.remove_vehicle();
            obj.selectable = false;
            self.objects.insert(0, obj);
        } else {
            self.objects.push(obj);
        }
        self.renumber();
        log::debug!("scene: added {id} ({} objects)", self.objects.len());
        id
    }

    /// Remove an object by id, returning it if it was present.
    pub fn remove_object(&mut self, id: &ObjectId) -> Option<PlacedObject> {
        let idx = self.index_of(id)?;
        let removed = self.objects.remove(idx);
        self.renumber();
        Some(removed)
    }

    /// Remove every object, the vehicle included. Callers re-add a vehicle if they want one.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// All objects, bottom first.
    #[must_use]
    pub fn list_objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| o.id == *id)
    }

    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut PlacedObject> {
        self.objects.iter_mut().find(|o| o.id == *id)
    }

    /// Distinct image asset references in the scene, bottom first.
    pub fn asset_refs(&self) -> impl Iterator<Item = &str> {
        let mut seen = HashSet::new();
        self.objects
            .iter()
            .filter_map(|o| match &o.data {
                ObjectData::Image(img) => Some(img.asset_ref.as_str()),
                ObjectData::Text(_) => None,
            })
            .filter(move |r| seen.insert(*r))
    }

    /// The vehicle object, if one is loaded.
    #[must_use]
    pub fn vehicle(&self) -> Option<&PlacedObject> {
        self.objects.first().filter(|o| o.kind == ObjectKind::Vehicle)
    }

    /// Apply a sparse transform update. Returns false if the object doesn't exist.
    pub fn apply_partial(&mut self, id: &ObjectId, partial: &PartialTransform) -> bool {
        let Some(obj) = self.get_mut(id) else {
            return false;
        };
        partial.apply_to(&mut obj.transform);
        true
    }

    /// Replace an object's transform. Returns false if the object doesn't exist.
    pub fn set_transform(&mut self, id: &ObjectId, transform: Transform) -> bool {
        let Some(obj) = self.get_mut(id) else {
            return false;
        };
        obj.transform = transform;
        true
    }

    /// Move an object to the top of the stack. Vehicles stay put.
    pub fn bring_to_front(&mut self, id: &ObjectId) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        if self.objects[idx].kind == ObjectKind::Vehicle {
            return false;
        }
        let obj = self.objects.remove(idx);
        self.objects.push(obj);
        self.renumber();
        true
    }

    /// Move an object to the bottom of the stack, just above the vehicle.
    pub fn send_to_back(&mut self, id: &ObjectId) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        if self.objects[idx].kind == ObjectKind::Vehicle {
            return false;
        }
        let obj = self.objects.remove(idx);
        let floor = usize::from(self.vehicle().is_some());
        self.objects.insert(floor, obj);
        self.renumber();
        true
    }

    /// Number of objects currently in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the scene contains no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn index_of(&self, id: &ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == *id)
    }

    fn remove_vehicle(&mut self) {
        self.objects.retain(|o| o.kind != ObjectKind::Vehicle);
    }

    fn renumber(&mut self) {
        for (z, obj) in (0_i64..).zip(self.objects.iter_mut()) {
            obj.z_order = z;
        }
    }
}
