//! Contract violations reported by the mesh.
//!
//! Geometric dead ends (a split that would produce a sliver, a pointer that is
//! not on a border) are not errors; they resolve to `Ok` with no effect.

use std::fmt;

use tilemesh_core::geometry::Axis;

use crate::config::MeshConfigError;
use crate::panel::PanelId;

/// Errors for mesh container and gesture operations.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    ZeroPanelId,
    PanelIdOverflow {
        current: PanelId,
    },
    GestureAlreadyActive,
    NoActiveGesture,
    DuplicatePanel {
        id: PanelId,
    },
    PanelAlreadyAttached {
        id: PanelId,
        mesh: PanelId,
    },
    PanelNotFound {
        id: PanelId,
    },
    TooManyClosestPanels {
        count: usize,
    },
    LineNotOnEdge {
        id: PanelId,
        axis: Axis,
        line: f64,
    },
    InvalidConfig(MeshConfigError),
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPanelId => write!(f, "panel id 0 is invalid"),
            Self::PanelIdOverflow { current } => {
                write!(f, "panel id overflow after {}", current.get())
            }
            Self::GestureAlreadyActive => write!(f, "gesture started while another is active"),
            Self::NoActiveGesture => write!(f, "no active gesture"),
            Self::DuplicatePanel { id } => write!(f, "panel <{}> already exists", id.get()),
            Self::PanelAlreadyAttached { id, mesh } => write!(
                f,
                "panel <{}> already attached to mesh <{}>",
                id.get(),
                mesh.get()
            ),
            Self::PanelNotFound { id } => write!(f, "panel <{}> not exists", id.get()),
            Self::TooManyClosestPanels { count } => {
                write!(f, "too many panels around border probe (>2): {count}")
            }
            Self::LineNotOnEdge { id, axis, line } => {
                let edges = match axis {
                    Axis::Horizontal => "top/bottom",
                    Axis::Vertical => "left/right",
                };
                write!(f, "line {line} not on {edges} of panel <{}>", id.get())
            }
            Self::InvalidConfig(error) => write!(f, "invalid mesh config: {error}"),
        }
    }
}

impl std::error::Error for MeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::InvalidConfig(error) = self {
            return Some(error);
        }
        None
    }
}

impl From<MeshConfigError> for MeshError {
    fn from(error: MeshConfigError) -> Self {
        Self::InvalidConfig(error)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn display_names_the_panel() {
        let id = PanelId::new(7).expect("non-zero");
        assert_eq!(
            MeshError::DuplicatePanel { id }.to_string(),
            "panel <7> already exists"
        );
        assert_eq!(
            MeshError::LineNotOnEdge {
                id,
                axis: Axis::Vertical,
                line: 12.0
            }
            .to_string(),
            "line 12 not on left/right of panel <7>"
        );
    }

    #[test]
    fn config_error_is_the_source() {
        let inner = MeshConfigError::NonPositive {
            field: "probe_delta",
            value: -1.0,
        };
        let error = MeshError::from(inner);
        assert!(error.source().is_some());
        assert!(error.to_string().contains("probe_delta"));
        assert!(MeshError::NoActiveGesture.source().is_none());
    }
}
