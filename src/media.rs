//! Intake of user-provided images: MIME validation, dimension probing, and
//! `data:` URL encoding.
//!
//! Raster headers are read with the `image` crate; nothing is decoded past
//! the header. SVG size comes from the root element's `width`/`height`,
//! falling back to its `viewBox`.

#[cfg(test)]
#[path = "media_test.rs"]
mod media_test;

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, ImageReader};

use crate::error::DesignerError;

/// Accepted upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Png,
    Jpeg,
    Svg,
    Webp,
}

impl MediaType {
    /// Map a declared MIME type to an accepted format.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::InvalidFileType`] for anything other than
    /// PNG, JPEG, SVG, or WEBP.
    pub fn from_mime(mime: &str) -> Result<Self, DesignerError> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Ok(Self::Png),
            "image/jpeg" => Ok(Self::Jpeg),
            "image/svg+xml" => Ok(Self::Svg),
            "image/webp" => Ok(Self::Webp),
            _ => Err(DesignerError::InvalidFileType { mime: mime.to_owned() }),
        }
    }

    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Svg => "image/svg+xml",
            Self::Webp => "image/webp",
        }
    }

    fn raster_format(self) -> Option<ImageFormat> {
        match self {
            Self::Png => Some(ImageFormat::Png),
            Self::Jpeg => Some(ImageFormat::Jpeg),
            Self::Webp => Some(ImageFormat::WebP),
            Self::Svg => None,
        }
    }
}

/// A file handed over by the host after its bytes were read.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub bytes: Vec<u8>,
    pub media_type: MediaType,
}

impl MediaFile {
    /// Validate the declared MIME type and wrap the bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::InvalidFileType`] for unsupported MIME types.
    pub fn new(bytes: Vec<u8>, mime: &str) -> Result<Self, DesignerError> {
        let media_type = MediaType::from_mime(mime)?;
        Ok(Self { bytes, media_type })
    }

    /// Natural (width, height), or `None` if the file does not say.
    #[must_use]
    pub fn dimensions(&self) -> Option<(f64, f64)> {
        probe_dimensions(&self.bytes, self.media_type)
    }

    #[must_use]
    pub fn data_url(&self) -> String {
        to_data_url(&self.bytes, self.media_type)
    }
}

/// Read natural dimensions without decoding pixel data.
#[must_use]
pub fn probe_dimensions(bytes: &[u8], media_type: MediaType) -> Option<(f64, f64)> {
    let Some(format) = media_type.raster_format() else {
        return svg_dimensions(bytes);
    };
    match ImageReader::with_format(Cursor::new(bytes), format).into_dimensions() {
        Ok((w, h)) if w > 0 && h > 0 => Some((f64::from(w), f64::from(h))),
        Ok(_) => None,
        Err(err) => {
            log::debug!("media: cannot read {} header: {err}", media_type.mime());
            None
        }
    }
}

/// `data:<mime>;base64,<payload>`
#[must_use]
pub fn to_data_url(bytes: &[u8], media_type: MediaType) -> String {
    format!("data:{};base64,{}", media_type.mime(), STANDARD.encode(bytes))
}

fn svg_dimensions(bytes: &[u8]) -> Option<(f64, f64)> {
    let Ok(text) = std::str::from_utf8(bytes) else {
        return None;
    };
    let tag = root_svg_tag(text)?;

    let width = attr(tag, "width").and_then(parse_length);
    let height = attr(tag, "height").and_then(parse_length);
    if let (Some(w), Some(h)) = (width, height) {
        return Some((w, h));
    }

    let view_box = attr(tag, "viewBox")?;
    let nums: Result<Vec<f64>, _> = view_box
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse::<f64>)
        .collect();
    let Ok(nums) = nums else {
        return None;
    };
    match nums.as_slice() {
        [_, _, w, h] if *w > 0.0 && *h > 0.0 => Some((*w, *h)),
        _ => None,
    }
}

/// The attribute section of the first `<svg ...>` start tag.
fn root_svg_tag(text: &str) -> Option<&str> {
    let start = text.find("<svg")?;
    let rest = &text[start + 4..];
    if !rest.starts_with(|c: char| c.is_whitespace() || c == '>' || c == '/') {
        return None;
    }
    let end = rest.find('>')?;
    Some(&rest[..end])
}

fn attr<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let mut rest = tag;
    while let Some(pos) = rest.find(name) {
        let before_ok = pos == 0 || rest[..pos].ends_with(char::is_whitespace);
        let after = rest[pos + name.len()..].trim_start();
        if before_ok {
            if let Some(after_eq) = after.strip_prefix('=') {
                let after_eq = after_eq.trim_start();
                let quote = after_eq.chars().next()?;
                if quote == '"' || quote == '\'' {
                    let value = &after_eq[1..];
                    let close = value.find(quote)?;
                    return Some(&value[..close]);
                }
            }
        }
        rest = &rest[pos + name.len()..];
    }
    None
}

/// Parse a plain or `px` length. Relative units yield `None`.
fn parse_length(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    let Ok(v) = number.trim().parse::<f64>() else {
        return None;
    };
    (v.is_finite() && v > 0.0).then_some(v)
}
