//! Selection and live text-style editing.
//!
//! The controller is a two-state machine, `Unselected` and `Selected(id)`.
//! Selecting a text object binds the edit panel to it: the panel is seeded
//! with the object's style and every later edit lands on that object at once.
//! Selecting anything else, or clearing, detaches the panel so stale edits
//! cannot leak onto an unrelated object. There is no undo.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use serde::{Deserialize, Serialize};

use crate::doc::{ObjectId, Scene, TextStyle};
use crate::error::DesignerError;

/// Current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected(ObjectId),
}

/// What the edit panel should show after a selection change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelBinding {
    /// Populate the panel with this style; edits apply live.
    Bound { id: ObjectId, style: TextStyle },
    /// Panel is not bound to any object.
    Detached,
}

/// A sparse edit from the panel. Only present fields change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyleEdit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size_pt: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_hex: Option<String>,
}

impl TextStyleEdit {
    /// Merge into `base` and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::InvalidTextStyle`] if the merged style is invalid.
    pub fn merged_onto(&self, base: &TextStyle) -> Result<TextStyle, DesignerError> {
        TextStyle {
            font_family: self.font_family.clone().unwrap_or_else(|| base.font_family.clone()),
            font_size_pt: self.font_size_pt.unwrap_or(base.font_size_pt),
            color_hex: self.color_hex.clone().unwrap_or_else(|| base.color_hex.clone()),
        }
        .validated()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: SelectionState,
    bound: bool,
}

impl SelectionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// The selected object's id, if any.
    #[must_use]
    pub fn selected(&self) -> Option<ObjectId> {
        match self.state {
            SelectionState::Selected(id) => Some(id),
            SelectionState::Unselected => None,
        }
    }

    /// Whether the edit panel is live-bound to a text object.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Handle a selection event for `id`.
    ///
    /// Unknown or locked objects are treated as a clear. Selecting a
    /// different object moves directly from one selection to the next.
    pub fn select(&mut self, id: ObjectId, scene: &Scene) -> PanelBinding {
        let Some(obj) = scene.get(&id).filter(|o| o.selectable) else {
            return self.clear();
        };
        self.state = SelectionState::Selected(id);
        match obj.text_data() {
            Some(text) => {
                self.bound = true;
                PanelBinding::Bound { id, style: text.style.clone() }
            }
            None => {
                self.bound = false;
                PanelBinding::Detached
            }
        }
    }

    /// Handle a clear-selection event.
    pub fn clear(&mut self) -> PanelBinding {
        self.state = SelectionState::Unselected;
        self.bound = false;
        PanelBinding::Detached
    }

    /// Forget the selection if `id` was just removed from the scene.
    /// Returns true if the selection changed.
    pub fn object_removed(&mut self, id: &ObjectId) -> bool {
        if self.selected().as_ref() == Some(id) {
            self.clear();
            return true;
        }
        false
    }

    /// Apply a panel edit to the bound text object.
    ///
    /// Returns the new style when it was applied (the caller re-renders), or
    /// `None` when the panel is detached and the edit was dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::InvalidTextStyle`] if the merged style is
    /// invalid; the object is left unchanged.
    pub fn apply_style_edit(
        &mut self,
        scene: &mut Scene,
        edit: &TextStyleEdit,
    ) -> Result<Option<TextStyle>, DesignerError> {
        if !self.bound {
            return Ok(None);
        }
        let Some(id) = self.selected() else {
            return Ok(None);
        };
        let Some(text) = scene.get_mut(&id).and_then(|o| o.text_data_mut()) else {
            // Bound object vanished without a removal event.
            self.clear();
            return Ok(None);
        };
        let style = edit.merged_onto(&text.style)?;
        text.style = style.clone();
        Ok(Some(style))
    }
}
