//! Split, pull/merge and full-edge cascading.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tilemesh_core::geometry::{Axis, Edge, Point, Rectangle};
use tracing::{debug, trace};

use super::Mesh;
use super::probe::on_line;
use crate::error::MeshError;
use crate::gesture::GestureContext;
use crate::order::{SortDirection, sort_panels};
use crate::panel::{Panel, PanelId};

/// Result of a committed pull.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PullOutcome {
    /// Where the border ended up.
    pub line: f64,
    /// Panel collapsed by the pull, if any.
    pub removed: Option<PanelId>,
    /// Panels whose rectangle was recomputed, in id order.
    pub resized: Vec<PanelId>,
}

impl PullOutcome {
    fn unchanged(line: f64) -> Self {
        Self {
            line,
            ..Self::default()
        }
    }
}

/// Whether a pull may collapse a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MergePolicy {
    Allow,
    Forbid,
}

/// `r` with the edge at `from` moved to `to` on `axis`; the other edge stays.
fn pull_rect(axis: Axis, r: Rectangle, from: f64, to: f64) -> Rectangle {
    let [near, far] = axis.line_edges();
    let (lo, hi) = if from == r.edge(near) {
        (to, r.edge(far))
    } else {
        (r.edge(near), to)
    };
    match axis {
        Axis::Horizontal => Rectangle::new(r.x, lo, r.w, hi - lo),
        Axis::Vertical => Rectangle::new(lo, r.y, hi - lo, r.h),
    }
}

/// Rectangle between lines `a` and `b` across `span`.
fn strip(axis: Axis, a: f64, b: f64, [start, end]: [f64; 2]) -> Rectangle {
    let (lo, hi) = (a.min(b), a.max(b));
    match axis {
        Axis::Horizontal => Rectangle::new(start, lo, end - start, hi - lo),
        Axis::Vertical => Rectangle::new(lo, start, hi - lo, end - start),
    }
}

impl Mesh {
    /// Split the panel under `pt` (mesh-local) along `axis`.
    ///
    /// `Ok(None)` when no panel contains the point or the split would leave
    /// a part below the minimum size.
    pub fn split_child_at(&mut self, pt: Point, axis: Axis) -> Result<Option<PanelId>, MeshError> {
        let Some(id) = self.find_panel_at(pt) else {
            debug!(target: "tilemesh_layout::mesh", at = %pt, "split: no panel under point");
            return Ok(None);
        };
        self.split_panel(id, axis, pt)
    }

    /// Cut panel `id` in two at the line coordinate of `at` (mesh-local).
    ///
    /// The line snaps to a nearby border first. The panel keeps the top/left
    /// part; the returned panel covers the rest.
    pub fn split_panel(
        &mut self,
        id: PanelId,
        axis: Axis,
        at: Point,
    ) -> Result<Option<PanelId>, MeshError> {
        let r = self.bound_of(id)?;
        let line = self.round_to_grid(axis, axis.line_of(at));
        let [near, _] = axis.line_edges();
        let offset = line - r.edge(near);
        let (first, second) = match axis {
            Axis::Horizontal => (
                Rectangle::new(r.x, r.y, r.w, offset),
                Rectangle::new(r.x, r.y + offset, r.w, r.h - offset),
            ),
            Axis::Vertical => (
                Rectangle::new(r.x, r.y, offset, r.h),
                Rectangle::new(r.x + offset, r.y, r.w - offset, r.h),
            ),
        };

        let min = self.config.min_width_height;
        if !first.size().fits(min) || !second.size().fits(min) {
            debug!(
                target: "tilemesh_layout::mesh",
                panel = id.get(),
                ?axis,
                line,
                "split rejected below minimum"
            );
            return Ok(None);
        }

        self.set_panel_bound(id, first)?;
        let created = self.create_panel(second)?;
        debug!(
            target: "tilemesh_layout::mesh",
            panel = id.get(),
            created = created.get(),
            ?axis,
            line,
            "split panel"
        );
        Ok(Some(created))
    }

    /// Commit a pull gesture to `to` (mesh-local).
    pub(crate) fn pull_childs_to(
        &mut self,
        context: &GestureContext,
        to: Point,
    ) -> Result<PullOutcome, MeshError> {
        let axis = context.axis;
        self.snap_and_pull(
            axis,
            axis.line_of(context.drag_from),
            axis.line_of(to),
            [axis.span_of(context.edge1), axis.span_of(context.edge2)],
        )
    }

    /// Move the border at line `from` to `to` over the segment `[edge1, edge2]`.
    ///
    /// `from` snaps to a border of a panel inside the segment; `to` and the
    /// segment ends snap to any nearby border. Only panels with an edge
    /// exactly on the snapped `from` line move. Panels on the shrinking side
    /// are clamped to the minimum size. A single panel that would be clamped
    /// and spans the whole segment collapses: it is removed and its
    /// neighbours across the border take its area.
    pub fn pull_childs(
        &mut self,
        axis: Axis,
        from: f64,
        to: f64,
        edge1: f64,
        edge2: f64,
    ) -> Result<PullOutcome, MeshError> {
        self.snap_and_pull(axis, from, to, [edge1, edge2])
    }

    fn snap_and_pull(
        &mut self,
        axis: Axis,
        from: f64,
        to: f64,
        [edge1, edge2]: [f64; 2],
    ) -> Result<PullOutcome, MeshError> {
        let a = self.round_to_grid(axis.other(), edge1);
        let b = self.round_to_grid(axis.other(), edge2);
        let span = [a.min(b), a.max(b)];
        let from = self.round_to_grid_within(axis, from, span);
        let to = self.round_to_grid(axis, to);
        self.pull_lines(axis, from, to, span, MergePolicy::Allow)
    }

    fn pull_lines(
        &mut self,
        axis: Axis,
        from: f64,
        to: f64,
        span: [f64; 2],
        merge: MergePolicy,
    ) -> Result<PullOutcome, MeshError> {
        if to == from {
            return Ok(PullOutcome::unchanged(from));
        }
        let overlapped = self.overlapped_panels_within(axis, from, span, 0.0);
        if overlapped.is_empty() {
            trace!(target: "tilemesh_layout::mesh", ?axis, from, "pull: nothing on line");
            return Ok(PullOutcome::unchanged(from));
        }

        let min = self.config.min_width_height;
        let dir = (to - from).signum();
        let [start, end] = axis.span_edges();

        let mut targets = Vec::with_capacity(overlapped.len());
        let mut candidates = Vec::new();
        for id in overlapped {
            let r = self.bound_of(id)?;
            let clamped = self.adjust_pull(axis, id, &r, from, to)?;
            if clamped != to && r.edge(start) == span[0] && r.edge(end) == span[1] {
                candidates.push((id, clamped));
            }
            targets.push((id, r, clamped));
        }

        let nearest: fn(f64, f64) -> f64 = if dir > 0.0 { f64::min } else { f64::max };
        let extremum = targets
            .iter()
            .map(|&(_, _, clamped)| clamped)
            .fold(to, nearest);
        let (line, removed) = match (merge, candidates.as_slice()) {
            (MergePolicy::Allow, &[(id, clamped)]) => (clamped + dir * min, Some(id)),
            _ => (extremum, None),
        };
        if candidates.len() > 1 {
            debug!(
                target: "tilemesh_layout::mesh",
                candidates = candidates.len(),
                "pull: ambiguous merge, clamping instead"
            );
        }

        if let Some(id) = removed {
            self.remove(id)?;
        }
        let mut resized = Vec::with_capacity(targets.len());
        for (id, r, _) in targets {
            if removed == Some(id) {
                continue;
            }
            self.set_panel_bound(id, pull_rect(axis, r, from, line))?;
            resized.push(id);
        }

        debug!(
            target: "tilemesh_layout::mesh",
            ?axis,
            from,
            to,
            line,
            removed = removed.map(PanelId::get),
            resized = resized.len(),
            "pull"
        );
        Ok(PullOutcome {
            line,
            removed,
            resized,
        })
    }

    /// Mesh edge a full-edge split starts from: the leading edge when the
    /// drag began on it, otherwise the trailing one.
    #[must_use]
    pub fn full_edge_origin(&self, context: &GestureContext) -> Edge {
        let [near, far] = context.axis.line_edges();
        let line = context.axis.line_of(context.drag_from);
        if on_line(line, self.local_bound().edge(near), self.config.probe_delta) {
            near
        } else {
            far
        }
    }

    /// Move the whole mesh edge `from_edge` inward to `to` and fill the freed
    /// strip with a new panel.
    ///
    /// Every border parallel to the edge is compressed proportionally toward
    /// the opposite edge. Nothing changes when the strip would be thinner
    /// than the minimum size; a failed cascade leaves the mesh untouched.
    pub fn split_full_edge(
        &mut self,
        from_edge: Edge,
        to: f64,
    ) -> Result<Option<PanelId>, MeshError> {
        let panels = self.panels.clone();
        let ids = self.ids.clone();
        let mark = self.events.len();

        let result = self.apply_edges(from_edge, to);
        if !matches!(result, Ok(Some(_))) {
            self.panels = panels;
            self.ids = ids;
            self.events.truncate(mark);
        }
        result
    }

    fn apply_edges(&mut self, from_edge: Edge, to: f64) -> Result<Option<PanelId>, MeshError> {
        let axis = from_edge.axis();
        let local = self.local_bound();
        let min = self.config.min_width_height;
        let moved = local.edge(from_edge);
        let fixed = local.edge(from_edge.opposite());
        let span = axis.span_edges().map(|edge| local.edge(edge));

        let smallest = self
            .panels
            .values()
            .map(|panel| axis.extent(&panel.bound()))
            .fold(f64::INFINITY, f64::min);
        if !smallest.is_finite() || smallest <= 0.0 {
            return Ok(None);
        }

        let to = self.adjust_pull(axis, self.id(), &local, moved, to)?;
        let needed = (moved - fixed).abs() * min / smallest;
        let to = if moved > fixed {
            to.min(moved).round().max((fixed + needed).ceil())
        } else {
            to.max(moved).round().min((fixed - needed).floor())
        };
        if (moved - to).abs() < min {
            debug!(
                target: "tilemesh_layout::mesh",
                edge = ?from_edge,
                to,
                "full split: strip below minimum"
            );
            return Ok(None);
        }

        let scale = (fixed - to) / (fixed - moved);
        let direction = if from_edge.is_leading() {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        let mut ordered: Vec<Panel> = self.panels.values().cloned().collect();
        sort_panels(&mut ordered, from_edge, direction);

        let mut done = FxHashSet::default();
        for panel in &ordered {
            let line = panel.bound().edge(from_edge);
            if line == moved || !done.insert(line.to_bits()) {
                continue;
            }
            let current = self.bound_of(panel.id())?;
            if current.edge(from_edge) != line {
                continue;
            }
            let target = (fixed + (line - fixed) * scale).round();
            let target = self.adjust_pull(axis, panel.id(), &current, line, target)?;
            trace!(
                target: "tilemesh_layout::mesh",
                panel = panel.id().get(),
                line,
                target,
                "cascade line"
            );
            self.pull_lines(axis, line, target, span, MergePolicy::Forbid)?;
        }

        let committed = self
            .pull_lines(axis, moved, to, span, MergePolicy::Forbid)?
            .line;
        if (moved - committed).abs() < min {
            debug!(
                target: "tilemesh_layout::mesh",
                edge = ?from_edge,
                committed,
                "full split rolled back"
            );
            return Ok(None);
        }

        let created = self.create_panel(strip(axis, moved, committed, span))?;
        debug!(
            target: "tilemesh_layout::mesh",
            edge = ?from_edge,
            line = committed,
            created = created.get(),
            scale,
            "full split"
        );
        Ok(Some(created))
    }
}
