//! Parts as consumed by the flow engine.

use bf_core::{Coord, PartId, Rotation, ShapeSize};
use serde::{Deserialize, Serialize};

use crate::route::Transitions;

/// Where and how a part sits on the layout grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Placement {
    /// Anchor column (top-left square).
    pub x: i32,
    /// Anchor row (top-left square).
    pub y: i32,
    pub rotation: Rotation,
    /// Mirrored horizontally before rotation.
    pub flipped: bool,
    /// Footprint before rotation.
    pub size: ShapeSize,
}

impl Placement {
    pub fn new(x: i32, y: i32, rotation: Rotation, flipped: bool, size: ShapeSize) -> Self {
        Self {
            x,
            y,
            rotation,
            flipped,
            size,
        }
    }

    pub fn anchor(&self) -> Coord {
        Coord::grid(self.x, self.y)
    }
}

/// A part with connectivity in its own local, unrotated space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatePart {
    pub id: PartId,
    /// Part type name, e.g. `"TeeTube"`.
    pub kind: String,
    pub placement: Placement,
    pub transitions: Transitions,
}

/// A part with connectivity expressed in shared layout coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowPart {
    pub id: PartId,
    pub kind: String,
    pub placement: Placement,
    pub transitions: Transitions,
}
