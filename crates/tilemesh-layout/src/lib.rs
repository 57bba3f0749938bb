#![forbid(unsafe_code)]

//! Partition model and gesture solvers.
//!
//! A [`Mesh`] is a rectangle tiled by non-overlapping [`Panel`]s. Hosts feed
//! it pointer gestures on panel borders; the mesh splits panels, moves shared
//! borders, collapses panels that get too small, and reports every change as
//! a [`MeshEvent`].
//!
//! ```
//! use tilemesh_core::event::Modifiers;
//! use tilemesh_core::geometry::{Axis, Point, Rectangle};
//! use tilemesh_layout::Mesh;
//!
//! let mut mesh = Mesh::new(Rectangle::from_size(200.0, 200.0));
//! mesh.on_gesture_start(Point::new(100.0, 0.0), Axis::Horizontal, Modifiers::NONE)?;
//! mesh.on_gesture_move(Point::new(100.0, 90.0))?;
//! mesh.on_gesture_end(Point::new(100.0, 100.0))?;
//! assert_eq!(mesh.len(), 2);
//! # Ok::<(), tilemesh_layout::MeshError>(())
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod gesture;
pub mod invariants;
pub mod mesh;
pub mod order;
pub mod panel;

pub use config::{
    MESH_DEFAULT_GRIP_HEIGHT, MESH_DEFAULT_GRIP_WIDTH, MESH_DEFAULT_MIN_WIDTH_HEIGHT,
    MESH_DEFAULT_PROBE_DELTA, MESH_DEFAULT_SEARCH_STEP, MESH_DEFAULT_SNAP_TOLERANCE, MeshConfig,
    MeshConfigError,
};
pub use error::MeshError;
pub use event::MeshEvent;
pub use gesture::{GestureContext, GestureMode, SplitterBar};
pub use invariants::{
    MeshInvariantCode, MeshInvariantIssue, MeshInvariantReport, MeshInvariantSeverity,
};
pub use mesh::{GestureResponse, Mesh, PullOutcome};
pub use order::{SortDirection, sort_panels};
pub use panel::{Panel, PanelId, PanelIdAllocator};
