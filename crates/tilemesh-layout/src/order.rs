//! Panel ordering for cascading edge adjustment.

use serde::{Deserialize, Serialize};
use tilemesh_core::geometry::Edge;

use crate::panel::Panel;

/// Sort direction for [`sort_panels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Stable sort of `panels` by the value of `edge`.
pub fn sort_panels(panels: &mut [Panel], edge: Edge, direction: SortDirection) {
    panels.sort_by(|a, b| {
        let ordering = a.bound().edge(edge).total_cmp(&b.bound().edge(edge));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
