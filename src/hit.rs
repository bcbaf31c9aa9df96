#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{HANDLE_SIZE_PX, ROTATE_HANDLE_OFFSET_PX};
use crate::doc::{ObjectId, Scene};
use crate::geom::Point;

/// Which part of an object was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ScaleHandle(Corner),
    RotateHandle,
}

/// Corner handle position, in the object's unrotated frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    Nw,
    Ne,
    Se,
    Sw,
}

impl Corner {
    /// Order matches [`crate::geom::Bounds::corners`].
    pub const ALL: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Se, Corner::Sw];
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub object_id: ObjectId,
    pub part: HitPart,
}

/// Find what is under `pt`.
///
/// Handles of the selected object win over everything. Otherwise the topmost
/// selectable object whose rotated bounds contain the point is returned.
/// Locked objects (the vehicle) are never hit.
#[must_use]
pub fn hit_test(pt: Point, scene: &Scene, selected: Option<ObjectId>) -> Option<Hit> {
    let slop = HANDLE_SIZE_PX / 2.0 + 2.0;

    if let Some(obj) = selected.and_then(|id| scene.get(&id)).filter(|o| o.selectable) {
        let bounds = obj.bounds();
        if bounds.rotate_handle(ROTATE_HANDLE_OFFSET_PX).distance(pt) <= slop {
            return Some(Hit { object_id: obj.id, part: HitPart::RotateHandle });
        }
        for (corner, at) in Corner::ALL.into_iter().zip(bounds.corners()) {
            if at.distance(pt) <= slop {
                return Some(Hit { object_id: obj.id, part: HitPart::ScaleHandle(corner) });
            }
        }
    }

    scene
        .list_objects()
        .iter()
        .rev()
        .filter(|o| o.selectable)
        .find(|o| o.bounds().contains(pt))
        .map(|o| Hit { object_id: o.id, part: HitPart::Body })
}
