//! Browser image cache for object artwork.
//!
//! Each distinct asset reference gets one `HtmlImageElement`, keyed by the
//! reference and loaded from its source URL. Loading is the browser's job;
//! when an image finishes (or fails) the host's callback runs so it can
//! request another render. Elements for references that left the scene are
//! evicted on the next sync.

use std::collections::HashMap;

use web_sys::HtmlImageElement;

use crate::doc::ObjectKind;
use crate::error::DesignerError;
use crate::placeholder;
use crate::render::ImageLookup;

pub struct ImageCache {
    images: HashMap<String, HtmlImageElement>,
    on_ready: Option<js_sys::Function>,
    sticker_fallback: String,
}

impl ImageCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
            on_ready: None,
            sticker_fallback: placeholder::svg_data_url(placeholder::sticker_svg()),
        }
    }

    /// Callback run whenever an image finishes loading or fails.
    pub fn set_on_ready(&mut self, callback: js_sys::Function) {
        self.on_ready = Some(callback);
    }

    /// Start loading `src` under `asset_ref` unless that key is already cached.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::Render`] if the image element cannot be created.
    pub fn ensure(&mut self, asset_ref: &str, src: &str) -> Result<(), DesignerError> {
        if self.images.contains_key(asset_ref) {
            return Ok(());
        }
        let img = HtmlImageElement::new().map_err(|e| DesignerError::Render(format!("{e:?}")))?;
        img.set_cross_origin(Some("anonymous"));
        if let Some(cb) = &self.on_ready {
            img.set_onload(Some(cb));
            img.set_onerror(Some(cb));
        }
        img.set_src(src);
        log::debug!("assets: loading {asset_ref} from {}", truncate(src));
        self.images.insert(asset_ref.to_owned(), img);
        Ok(())
    }

    /// Start loading the sticker stand-in.
    ///
    /// # Errors
    ///
    /// See [`ImageCache::ensure`].
    pub fn ensure_fallbacks(&mut self) -> Result<(), DesignerError> {
        let fallback = self.sticker_fallback.clone();
        self.ensure(&fallback, &fallback)
    }

    /// Evict every element except the fallback and those in `live`.
    pub fn retain_referenced(&mut self, live: &[String]) {
        let fallback = &self.sticker_fallback;
        let before = self.images.len();
        self.images.retain(|key, _| key == fallback || live.contains(key));
        if self.images.len() < before {
            log::debug!("assets: evicted {} image(s)", before - self.images.len());
        }
    }

    /// Natural size of a loaded image.
    #[must_use]
    pub fn natural_size(&self, asset_ref: &str) -> Option<(f64, f64)> {
        self.loaded(asset_ref)
            .map(|img| (f64::from(img.natural_width()), f64::from(img.natural_height())))
    }

    fn loaded(&self, asset_ref: &str) -> Option<&HtmlImageElement> {
        self.images
            .get(asset_ref)
            .filter(|img| img.complete() && img.natural_width() > 0)
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLookup for ImageCache {
    fn image(&self, asset_ref: &str, kind: ObjectKind) -> Option<&HtmlImageElement> {
        self.loaded(asset_ref).or_else(|| match kind {
            ObjectKind::Sticker => self.loaded(&self.sticker_fallback),
            ObjectKind::Vehicle | ObjectKind::Text | ObjectKind::UserImage => None,
        })
    }
}

/// Data URLs are long; keep log lines readable.
fn truncate(s: &str) -> &str {
    match s.char_indices().nth(64) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
