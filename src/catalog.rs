//! Sticker catalog: the static, ordered list of placeable stickers.
//!
//! The catalog is loaded once at startup, either from the built-in list or
//! from a JSON array handed over by the host page, and is never mutated
//! afterward. Order is preserved because galleries render in catalog order.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::DesignerError;

/// Gallery grouping for a sticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cars,
    Bikes,
    Trucks,
    Custom,
}

impl Category {
    /// Capitalized label shown under gallery tiles.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Cars => "Cars",
            Self::Bikes => "Bikes",
            Self::Trucks => "Trucks",
            Self::Custom => "Custom",
        }
    }

    /// Parse the lowercase wire name (as used in `data-category`).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "cars" => Some(Self::Cars),
            "bikes" => Some(Self::Bikes),
            "trucks" => Some(Self::Trucks),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// One placeable sticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerDescriptor {
    pub id: u32,
    pub name: String,
    pub category: Category,
    /// Path or URL of the sticker artwork.
    #[serde(alias = "image")]
    pub asset_ref: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

/// Read-only, ordered sticker collection.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    stickers: Vec<StickerDescriptor>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::CatalogParse`] if two stickers share an id.
    pub fn new(stickers: Vec<StickerDescriptor>) -> Result<Self, DesignerError> {
        let mut seen = HashSet::with_capacity(stickers.len());
        for sticker in &stickers {
            if !seen.insert(sticker.id) {
                return Err(DesignerError::CatalogParse(format!("duplicate sticker id {}", sticker.id)));
            }
        }
        Ok(Self { stickers })
    }

    /// Parse a JSON array of sticker records.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::CatalogParse`] on malformed JSON or duplicate ids.
    pub fn from_json(raw: &str) -> Result<Self, DesignerError> {
        let stickers: Vec<StickerDescriptor> =
            serde_json::from_str(raw).map_err(|e| DesignerError::CatalogParse(e.to_string()))?;
        Self::new(stickers)
    }

    /// The twelve stickers shipped with the designer.
    #[must_use]
    pub fn builtin() -> Self {
        let entry = |id: u32, name: &str, category: Category, image: &str, tags: [&str; 2]| StickerDescriptor {
            id,
            name: name.to_owned(),
            category,
            asset_ref: format!("stickers/{image}.svg"),
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        };
        Self {
            stickers: vec![
                entry(1, "Speed Demon", Category::Cars, "car-sticker-1", ["speed", "racing"]),
                entry(2, "Classic Car", Category::Cars, "car-sticker-2", ["vintage", "classic"]),
                entry(3, "Modern Sport", Category::Cars, "car-sticker-3", ["sport", "modern"]),
                entry(4, "Biker Gang", Category::Bikes, "bike-sticker-1", ["motorcycle", "gang"]),
                entry(5, "Speed Bike", Category::Bikes, "bike-sticker-2", ["speed", "racing"]),
                entry(6, "Vintage Bike", Category::Bikes, "bike-sticker-3", ["vintage", "classic"]),
                entry(7, "Big Rig", Category::Trucks, "truck-sticker-1", ["truck", "commercial"]),
                entry(8, "Pickup Power", Category::Trucks, "truck-sticker-2", ["pickup", "power"]),
                entry(9, "Monster Truck", Category::Trucks, "truck-sticker-3", ["monster", "extreme"]),
                entry(10, "Custom Design 1", Category::Custom, "custom-sticker-1", ["custom", "unique"]),
                entry(11, "Custom Design 2", Category::Custom, "custom-sticker-2", ["custom", "artistic"]),
                entry(12, "Custom Design 3", Category::Custom, "custom-sticker-3", ["custom", "creative"]),
            ],
        }
    }

    #[must_use]
    pub fn all(&self) -> &[StickerDescriptor] {
        &self.stickers
    }

    #[must_use]
    pub fn get(&self, id: u32) -> Option<&StickerDescriptor> {
        self.stickers.iter().find(|s| s.id == id)
    }

    /// Stickers in `category`, in catalog order.
    #[must_use]
    pub fn by_category(&self, category: Category) -> Vec<&StickerDescriptor> {
        self.stickers.iter().filter(|s| s.category == category).collect()
    }

    /// Stickers carrying `tag` (case-insensitive), in catalog order.
    #[must_use]
    pub fn search_tag(&self, tag: &str) -> Vec<&StickerDescriptor> {
        let needle = tag.trim().to_lowercase();
        self.stickers
            .iter()
            .filter(|s| s.tags.iter().any(|t| t.to_lowercase() == needle))
            .collect()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let mut out = Vec::new();
        for sticker in &self.stickers {
            if !out.contains(&sticker.category) {
                out.push(sticker.category);
            }
        }
        out
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }
}
