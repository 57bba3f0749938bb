//! Panels: the indivisible rectangles a mesh is tiled with.

use std::fmt;

use serde::{Deserialize, Serialize};
use tilemesh_core::geometry::Rectangle;

use crate::error::MeshError;

/// Stable identifier for panels and meshes.
///
/// `0` is reserved/invalid so IDs are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(u64);

impl PanelId {
    /// Lowest valid panel ID.
    pub const MIN: Self = Self(1);

    /// Create a new panel ID, rejecting 0.
    pub fn new(raw: u64) -> Result<Self, MeshError> {
        if raw == 0 {
            return Err(MeshError::ZeroPanelId);
        }
        Ok(Self(raw))
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Return the next ID, or an error on overflow.
    pub fn checked_next(self) -> Result<Self, MeshError> {
        let Some(next) = self.0.checked_add(1) else {
            return Err(MeshError::PanelIdOverflow { current: self });
        };
        Self::new(next)
    }
}

/// Id of a freshly built mesh's own frame.
pub(crate) const MESH_FRAME_ID: PanelId = PanelId(1);

/// Id of the panel a fresh mesh starts with.
pub(crate) const ROOT_PANEL_ID: PanelId = PanelId(2);

/// First id a fresh mesh allocates.
pub(crate) const FIRST_FREE_ID: PanelId = PanelId(3);

impl Default for PanelId {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deterministic allocator for panel IDs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelIdAllocator {
    next: PanelId,
}

impl PanelIdAllocator {
    /// Start allocating from a known ID.
    #[must_use]
    pub const fn with_next(next: PanelId) -> Self {
        Self { next }
    }

    /// Peek at the next ID without consuming.
    #[must_use]
    pub const fn peek(&self) -> PanelId {
        self.next
    }

    /// Allocate the next ID and advance.
    pub fn allocate(&mut self) -> Result<PanelId, MeshError> {
        let current = self.next;
        self.next = self.next.checked_next()?;
        Ok(current)
    }

    /// Make sure `id` will never be handed out.
    pub fn reserve(&mut self, id: PanelId) -> Result<(), MeshError> {
        if id >= self.next {
            self.next = id.checked_next()?;
        }
        Ok(())
    }
}

impl Default for PanelIdAllocator {
    fn default() -> Self {
        Self { next: PanelId::MIN }
    }
}

/// A rectangle-owning node with a stable identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    id: PanelId,
    bound: Rectangle,
    mesh: Option<PanelId>,
}

impl Panel {
    /// Detached panel; attach it with [`crate::Mesh::add`].
    #[must_use]
    pub const fn new(id: PanelId, bound: Rectangle) -> Self {
        Self {
            id,
            bound,
            mesh: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> PanelId {
        self.id
    }

    #[must_use]
    pub const fn bound(&self) -> Rectangle {
        self.bound
    }

    pub fn set_bound(&mut self, bound: Rectangle) {
        self.bound = bound;
    }

    /// Parent mesh, if attached.
    #[must_use]
    pub const fn mesh(&self) -> Option<PanelId> {
        self.mesh
    }

    pub(crate) fn set_mesh(&mut self, mesh: Option<PanelId>) {
        self.mesh = mesh;
    }

    pub fn resize(&mut self, w: f64, h: f64) {
        self.bound.w = w;
        self.bound.h = h;
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.bound.x = x;
        self.bound.y = y;
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.bound;
        write!(f, "*Panel#{}, bound:{},{}^{},{}", self.id, r.x, r.y, r.w, r.h)
    }
}
