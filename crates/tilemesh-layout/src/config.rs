//! Tunable distances used by the mesh solvers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default grip hit width for the splitter indicator.
pub const MESH_DEFAULT_GRIP_WIDTH: f64 = 2.0;

/// Default grip hit height for the splitter indicator.
pub const MESH_DEFAULT_GRIP_HEIGHT: f64 = 2.0;

/// Default minimal panel width and height.
pub const MESH_DEFAULT_MIN_WIDTH_HEIGHT: f64 = 50.0;

/// Default distance of the border probes from the pointer.
pub const MESH_DEFAULT_PROBE_DELTA: f64 = 8.0;

/// Default distance within which coordinates snap to an existing border.
pub const MESH_DEFAULT_SNAP_TOLERANCE: f64 = 10.0;

/// Default advance of the border-segment search per iteration.
pub const MESH_DEFAULT_SEARCH_STEP: f64 = 4.0;

/// Per-mesh tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    pub grip_width: f64,
    pub grip_height: f64,
    /// No panel may become narrower or shorter than this.
    pub min_width_height: f64,
    /// Offset of the two probes used to detect a border under the pointer.
    /// Also the tolerance for "this coordinate is on that line".
    pub probe_delta: f64,
    pub snap_tolerance: f64,
    pub search_step: f64,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            grip_width: MESH_DEFAULT_GRIP_WIDTH,
            grip_height: MESH_DEFAULT_GRIP_HEIGHT,
            min_width_height: MESH_DEFAULT_MIN_WIDTH_HEIGHT,
            probe_delta: MESH_DEFAULT_PROBE_DELTA,
            snap_tolerance: MESH_DEFAULT_SNAP_TOLERANCE,
            search_step: MESH_DEFAULT_SEARCH_STEP,
        }
    }
}

impl MeshConfig {
    /// Override the minimal panel width/height.
    #[must_use]
    pub const fn with_min_width_height(mut self, min_width_height: f64) -> Self {
        self.min_width_height = min_width_height;
        self
    }

    /// Check that every distance is finite and positive, and that the probes
    /// cannot skip over a whole minimal panel.
    pub fn validate(&self) -> Result<(), MeshConfigError> {
        let fields = [
            ("grip_width", self.grip_width),
            ("grip_height", self.grip_height),
            ("min_width_height", self.min_width_height),
            ("probe_delta", self.probe_delta),
            ("snap_tolerance", self.snap_tolerance),
            ("search_step", self.search_step),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(MeshConfigError::NonPositive { field, value });
            }
        }
        if self.probe_delta >= self.min_width_height {
            return Err(MeshConfigError::ProbeExceedsMinimum {
                probe_delta: self.probe_delta,
                min_width_height: self.min_width_height,
            });
        }
        Ok(())
    }
}

/// Rejected [`MeshConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshConfigError {
    NonPositive {
        field: &'static str,
        value: f64,
    },
    ProbeExceedsMinimum {
        probe_delta: f64,
        min_width_height: f64,
    },
}

impl fmt::Display for MeshConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be finite and > 0 (got {value})")
            }
            Self::ProbeExceedsMinimum {
                probe_delta,
                min_width_height,
            } => write!(
                f,
                "probe_delta {probe_delta} must be smaller than min_width_height {min_width_height}"
            ),
        }
    }
}

impl std::error::Error for MeshConfigError {}
