//! Outbound notifications for the host renderer.

use serde::{Deserialize, Serialize};
use tilemesh_core::geometry::Rectangle;

use crate::panel::PanelId;

/// One change to the partition, queued in mutation order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MeshEvent {
    /// A panel joined `mesh` with the given rectangle.
    Created {
        id: PanelId,
        rect: Rectangle,
        mesh: PanelId,
    },
    /// A panel's rectangle changed.
    Resized { id: PanelId, rect: Rectangle },
    /// A panel left the mesh.
    Removed { id: PanelId },
}

impl MeshEvent {
    /// Panel the event is about.
    #[must_use]
    pub const fn panel(&self) -> PanelId {
        match self {
            Self::Created { id, .. } | Self::Resized { id, .. } | Self::Removed { id } => *id,
        }
    }
}
