#![forbid(unsafe_code)]

//! tilemesh public facade crate.
//!
//! Re-exports the geometry and input types from `tilemesh-core` and the
//! mesh engine from `tilemesh-layout`, plus a prelude for day-to-day use.

// --- Core re-exports -------------------------------------------------------

pub use tilemesh_core::event::{Modifiers, PointerEvent, PointerEventKind};
pub use tilemesh_core::geometry::{Axis, Edge, Point, Rectangle, Size};

// --- Layout re-exports -----------------------------------------------------

pub use tilemesh_layout::{
    GestureResponse, Mesh, MeshConfig, MeshConfigError, MeshError, MeshEvent, MeshInvariantCode,
    MeshInvariantReport, Panel, PanelId, PullOutcome, SplitterBar,
};

/// Standard result type for tilemesh APIs.
pub type Result<T> = std::result::Result<T, MeshError>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Axis, Edge, GestureResponse, Mesh, MeshConfig, MeshError, MeshEvent, Modifiers, Panel,
        PanelId, Point, PointerEvent, Rectangle, Result, Size, SplitterBar,
    };

    pub use crate::{core, layout};
}

pub use tilemesh_core as core;
pub use tilemesh_layout as layout;
