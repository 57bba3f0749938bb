//! Gesture context and splitter feedback.
//!
//! ```text
//! Idle -> Active(Split | Pull) -> Idle
//! ```
//!
//! A context exists only between a start and an end event. The mesh drops it
//! when the gesture ends, whether or not the commit succeeded.

use serde::{Deserialize, Serialize};
use tilemesh_core::geometry::{Axis, Point, Size};

/// What the gesture will do on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureMode {
    /// Started on the mesh's outer border: carve a new panel.
    Split,
    /// Started on a border shared by two panels: resize or merge.
    Pull,
}

/// Everything collected at gesture start, in mesh-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureContext {
    pub mode: GestureMode,
    pub axis: Axis,
    /// Mesh top (horizontal) or left (vertical) in page space.
    pub offset: f64,
    /// Act on the whole mesh edge/line.
    pub full: bool,
    pub drag_from: Point,
    /// Start of the border segment being dragged.
    pub edge1: Point,
    /// End of the border segment being dragged.
    pub edge2: Point,
    /// Latest pointer position reported by the host.
    pub current: Point,
}

impl GestureContext {
    /// Indicator rectangle for the border at its current drag position.
    #[must_use]
    pub fn splitter_bar(&self, grip: Size) -> SplitterBar {
        let w = grip.w.max((self.edge2.x - self.edge1.x).abs());
        let h = grip.h.max((self.edge2.y - self.edge1.y).abs());
        let line = self.axis.line_of(self.current);
        SplitterBar {
            axis: self.axis,
            origin: self.axis.with_line(self.edge1, line),
            size: Size::new(w, h),
        }
    }
}

/// Where the host should draw the drag indicator (mesh-local).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitterBar {
    pub axis: Axis,
    pub origin: Point,
    pub size: Size,
}
