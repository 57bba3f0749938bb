//! Structural checks over a mesh partition.
//!
//! The solvers maintain these properties by construction; the report exists
//! for hosts that feed rectangles through `apply_layout`, and for tests.

use serde::{Deserialize, Serialize};
use tilemesh_core::geometry::Rectangle;

use crate::panel::{Panel, PanelId};

/// Relative tolerance for the area sum.
const AREA_EPSILON: f64 = 1e-6;

/// Severity for one invariant finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshInvariantSeverity {
    Error,
    Warning,
}

/// Stable code for invariant findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshInvariantCode {
    Overlap,
    OutOfBounds,
    BelowMinimum,
    AreaMismatch,
}

/// One actionable invariant finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshInvariantIssue {
    pub code: MeshInvariantCode,
    pub severity: MeshInvariantSeverity,
    pub panel: Option<PanelId>,
    pub related_panel: Option<PanelId>,
    pub message: String,
}

/// Structured invariant report over a mesh partition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshInvariantReport {
    pub issues: Vec<MeshInvariantIssue>,
}

impl MeshInvariantReport {
    /// Return true if any error-level finding exists.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity == MeshInvariantSeverity::Error)
    }

    /// Whether any finding carries `code`.
    #[must_use]
    pub fn has(&self, code: MeshInvariantCode) -> bool {
        self.issues.iter().any(|issue| issue.code == code)
    }
}

pub(crate) fn build_invariant_report<'a>(
    bound: Rectangle,
    min_width_height: f64,
    panels: impl IntoIterator<Item = &'a Panel>,
) -> MeshInvariantReport {
    let panels: Vec<&Panel> = panels.into_iter().collect();
    let mut issues = Vec::new();

    for (idx, panel) in panels.iter().enumerate() {
        let r = panel.bound();
        if !bound.contains_rect(&r) {
            issues.push(MeshInvariantIssue {
                code: MeshInvariantCode::OutOfBounds,
                severity: MeshInvariantSeverity::Error,
                panel: Some(panel.id()),
                related_panel: None,
                message: format!("{r} exceeds mesh {bound}"),
            });
        }
        if !r.size().fits(min_width_height) {
            issues.push(MeshInvariantIssue {
                code: MeshInvariantCode::BelowMinimum,
                severity: MeshInvariantSeverity::Error,
                panel: Some(panel.id()),
                related_panel: None,
                message: format!("{} below minimum {min_width_height}", r.size()),
            });
        }
        for other in &panels[idx + 1..] {
            if r.overlaps_interior(&other.bound()) {
                issues.push(MeshInvariantIssue {
                    code: MeshInvariantCode::Overlap,
                    severity: MeshInvariantSeverity::Error,
                    panel: Some(panel.id()),
                    related_panel: Some(other.id()),
                    message: format!("{r} overlaps {}", other.bound()),
                });
            }
        }
    }

    let covered: f64 = panels.iter().map(|p| p.bound().area()).sum();
    let expected = bound.area();
    if (covered - expected).abs() > AREA_EPSILON * expected.max(1.0) {
        // Overlaps already explain a surplus; a deficit is always a gap.
        let overlapping = issues
            .iter()
            .any(|issue| issue.code == MeshInvariantCode::Overlap);
        let severity = if covered > expected && overlapping {
            MeshInvariantSeverity::Warning
        } else {
            MeshInvariantSeverity::Error
        };
        issues.push(MeshInvariantIssue {
            code: MeshInvariantCode::AreaMismatch,
            severity,
            panel: None,
            related_panel: None,
            message: format!("panels cover {covered}, mesh area is {expected}"),
        });
    }

    MeshInvariantReport { issues }
}
