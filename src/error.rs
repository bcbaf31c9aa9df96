//! Error taxonomy for designer operations.
//!
//! Every failure here aborts a single user action and leaves the scene
//! untouched. [`DesignerError::user_notice`] tells the host which ones deserve
//! a blocking notice; the rest are absorbed after logging.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::doc::ObjectId;

#[derive(Debug, thiserror::Error)]
pub enum DesignerError {
    /// The user picked or dropped a file whose MIME type is not accepted.
    #[error("unsupported file type: {mime}")]
    InvalidFileType { mime: String },

    /// Add-text was invoked with blank content.
    #[error("text input is empty")]
    EmptyTextInput,

    /// An expected element (canvas, document, panel) is absent.
    #[error("missing DOM target: {0}")]
    MissingDomTarget(String),

    /// An object reported zero or unknown size during fit calculation.
    #[error("object dimensions unavailable")]
    DimensionUnavailable,

    /// A numeric argument was out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Font, size, or color failed validation.
    #[error("invalid text style: {0}")]
    InvalidTextStyle(String),

    #[error("unknown sticker id: {0}")]
    UnknownSticker(u32),

    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("config parse failed: {0}")]
    ConfigParse(String),

    #[error("catalog parse failed: {0}")]
    CatalogParse(String),

    /// A `Canvas2D` or DOM call failed while painting or exporting.
    #[error("render failed: {0}")]
    Render(String),
}

impl DesignerError {
    /// Text for a blocking notice, if this error should interrupt the user.
    ///
    /// Returns `None` for failures that are absorbed silently.
    #[must_use]
    pub fn user_notice(&self) -> Option<&'static str> {
        match self {
            Self::InvalidFileType { .. } => Some("Please upload an image file (PNG, JPG, SVG, or WEBP)."),
            Self::EmptyTextInput => Some("Please enter some text first!"),
            Self::InvalidTextStyle(_) => Some("Please choose a valid font, size, and color."),
            Self::MissingDomTarget(_)
            | Self::DimensionUnavailable
            | Self::InvalidArgument(_)
            | Self::UnknownSticker(_)
            | Self::ObjectNotFound(_)
            | Self::ConfigParse(_)
            | Self::CatalogParse(_)
            | Self::Render(_) => None,
        }
    }

    /// Failures the host should never see: the page is still mounting or the
    /// browser has not measured an asset yet. Callers log these at debug and
    /// carry on with a no-op.
    #[must_use]
    pub fn is_absorbed(&self) -> bool {
        matches!(self, Self::MissingDomTarget(_) | Self::DimensionUnavailable)
    }
}

impl From<serde_json::Error> for DesignerError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}
