//! Border detection and snapping.

use tilemesh_core::geometry::{Axis, Edge, Point, Rectangle};
use tracing::trace;

use super::Mesh;
use crate::error::MeshError;
use crate::panel::{Panel, PanelId};

/// Whether `line` lies strictly within `tolerance` of `at`.
#[inline]
pub(crate) fn on_line(line: f64, at: f64, tolerance: f64) -> bool {
    line < at + tolerance && line > at - tolerance
}

impl Mesh {
    /// Panels on either side of the border under `at`.
    ///
    /// Two probes sit `probe_delta` before and after `at` on the axis's line
    /// coordinate. The result has:
    /// - 0 entries when `at` is not on a border (including a point inside a
    ///   single panel, where both probes land in the same one),
    /// - 1 entry on the mesh's outer border,
    /// - 2 entries (before, after) on a shared border.
    pub fn closest_panels(&self, axis: Axis, at: Point) -> Result<Vec<PanelId>, MeshError> {
        let delta = self.config.probe_delta;
        let line = axis.line_of(at);
        let probes = [axis.with_line(at, line - delta), axis.with_line(at, line + delta)];

        let mut hits = Vec::with_capacity(2);
        for probe in probes {
            hits.extend(
                self.panels
                    .values()
                    .filter(|panel| panel.bound().contains(probe))
                    .map(Panel::id),
            );
        }

        if hits.len() > 2 {
            return Err(MeshError::TooManyClosestPanels { count: hits.len() });
        }
        if hits.len() == 2 && hits[0] == hits[1] {
            hits.clear();
        }
        trace!(
            target: "tilemesh_layout::mesh",
            at = %at,
            ?axis,
            found = hits.len(),
            "closest panels"
        );
        Ok(hits)
    }

    /// Where the border through `at` ends in the direction of `edge`.
    ///
    /// Walks outward along the border. While the two panels at the probe
    /// position disagree on `edge`, the walk jumps `search_step` past the
    /// nearer of the two edges. It stops when both panels share the edge.
    /// Returns `None` when the walk leaves the border.
    ///
    /// Agreement is exact on purpose: accepting edges a few units apart
    /// yields a segment end that only one of the two panels reaches.
    pub fn split_line(&self, axis: Axis, at: Point, edge: Edge) -> Result<Option<f64>, MeshError> {
        let step = self.config.search_step;
        let span_extent = axis.other().extent(&self.local_bound());
        let max_iterations = (span_extent / step).ceil() as usize + 2;

        let mut current = at;
        for _ in 0..max_iterations {
            let found = self.closest_panels(axis, current)?;
            let &[first, second] = found.as_slice() else {
                trace!(target: "tilemesh_layout::mesh", at = %current, ?edge, "walked off border");
                return Ok(None);
            };
            let a = self.bound_of(first)?.edge(edge);
            let b = self.bound_of(second)?.edge(edge);
            if a == b {
                return Ok(Some(a));
            }
            let next = if edge.is_leading() {
                a.max(b) - step
            } else {
                a.min(b) + step
            };
            current = axis.with_span(current, next);
        }
        Ok(None)
    }

    /// Snap `line` to the nearest panel border on `axis` within
    /// `snap_tolerance`, or return it unchanged.
    #[must_use]
    pub fn round_to_grid(&self, axis: Axis, line: f64) -> f64 {
        self.snap_line(axis, line, self.panels.values())
    }

    /// [`round_to_grid`](Self::round_to_grid) restricted to panels lying
    /// within the span `[from, to]`.
    pub(crate) fn round_to_grid_within(&self, axis: Axis, line: f64, [from, to]: [f64; 2]) -> f64 {
        let [start, end] = axis.span_edges();
        let inside = self.panels.values().filter(move |panel| {
            let r = panel.bound();
            r.edge(start) >= from && r.edge(end) <= to
        });
        self.snap_line(axis, line, inside)
    }

    fn snap_line<'a>(&self, axis: Axis, line: f64, panels: impl Iterator<Item = &'a Panel>) -> f64 {
        let tolerance = self.config.snap_tolerance;
        let mut best: Option<(f64, f64)> = None;
        for panel in panels {
            let rect = panel.bound();
            for edge in axis.line_edges() {
                let value = rect.edge(edge);
                if !on_line(line, value, tolerance) {
                    continue;
                }
                let distance = (line - value).abs();
                if best.is_none_or(|(_, d)| distance < d) {
                    best = Some((value, distance));
                }
            }
        }
        best.map_or(line, |(value, _)| value)
    }

    /// [`round_to_grid`](Self::round_to_grid) applied to a point's line
    /// coordinate.
    #[must_use]
    pub fn round_to_grid_at(&self, axis: Axis, at: Point) -> Point {
        axis.with_line(at, self.round_to_grid(axis, axis.line_of(at)))
    }

    /// Panels lying within the span `[from, to]` whose near or far edge is
    /// on `line`.
    #[must_use]
    pub fn overlapped_panels(&self, axis: Axis, line: f64, from: f64, to: f64) -> Vec<PanelId> {
        self.overlapped_panels_within(axis, line, [from, to], self.config.probe_delta)
    }

    /// [`overlapped_panels`](Self::overlapped_panels) with an explicit line
    /// tolerance. `0.0` means an exact match.
    pub(crate) fn overlapped_panels_within(
        &self,
        axis: Axis,
        line: f64,
        [from, to]: [f64; 2],
        tolerance: f64,
    ) -> Vec<PanelId> {
        let [start, end] = axis.span_edges();
        let [near, far] = axis.line_edges();
        self.panels
            .values()
            .filter(|panel| {
                let r = panel.bound();
                if r.edge(start) < from || r.edge(end) > to {
                    return false;
                }
                (line - r.edge(near)).abs() <= tolerance || (line - r.edge(far)).abs() <= tolerance
            })
            .map(Panel::id)
            .collect()
    }

    /// Exact line of the border between `before` and `after`, as returned by
    /// [`closest_panels`](Self::closest_panels). `None` when the two panels
    /// do not meet.
    pub(crate) fn shared_line(
        &self,
        axis: Axis,
        before: PanelId,
        after: PanelId,
    ) -> Result<Option<f64>, MeshError> {
        let [near, far] = axis.line_edges();
        let line = self.bound_of(before)?.edge(far);
        Ok((self.bound_of(after)?.edge(near) == line).then_some(line))
    }

    /// Clamp a pull of `r`'s edge at `from` toward `to` so the panel keeps
    /// `min_width_height` along `axis`.
    ///
    /// `from` must be exactly one of the two edges on `axis`.
    pub fn adjust_pull(
        &self,
        axis: Axis,
        id: PanelId,
        r: &Rectangle,
        from: f64,
        to: f64,
    ) -> Result<f64, MeshError> {
        let min = self.config.min_width_height;
        let [near, far] = axis.line_edges();
        if from == r.edge(far) {
            Ok(to.max(r.edge(near) + min))
        } else if from == r.edge(near) {
            Ok(to.min(r.edge(far) - min))
        } else {
            Err(MeshError::LineNotOnEdge {
                id,
                axis,
                line: from,
            })
        }
    }

    /// Border under the pointer for a split gesture: along the contacted
    /// panel, or along the whole mesh when `full`.
    pub(crate) fn split_segment(
        &self,
        axis: Axis,
        at: Point,
        panel: PanelId,
        full: bool,
    ) -> Result<(Point, Point), MeshError> {
        let r = if full {
            self.local_bound()
        } else {
            self.bound_of(panel)?
        };
        let line = axis.line_of(at);
        let [start, end] = axis.span_edges();
        Ok((axis.point(line, r.edge(start)), axis.point(line, r.edge(end))))
    }

    /// Shared border segment under the pointer for a pull gesture, or the
    /// whole mesh line when `full`.
    pub(crate) fn pull_segment(
        &self,
        axis: Axis,
        at: Point,
        full: bool,
    ) -> Result<Option<(Point, Point)>, MeshError> {
        let [start, end] = axis.span_edges();
        let (a, b) = if full {
            let local = self.local_bound();
            (local.edge(start), local.edge(end))
        } else {
            let Some(a) = self.split_line(axis, at, start)? else {
                return Ok(None);
            };
            let Some(b) = self.split_line(axis, at, end)? else {
                return Ok(None);
            };
            (a, b)
        };
        let line = axis.line_of(at);
        Ok(Some((axis.point(line, a), axis.point(line, b))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::PanelId;

    fn id(raw: u64) -> PanelId {
        PanelId::new(raw).expect("test ID must be non-zero")
    }

    /// 200x200 mesh laid out from explicit rectangles (ids 10, 11, ...).
    fn mesh_with(rects: &[Rectangle]) -> Mesh {
        let mut mesh = Mesh::new(Rectangle::from_size(200.0, 200.0));
        let root = mesh.panels().next().expect("root").id();
        mesh.remove(root).expect("drop root");
        mesh.apply_layout(
            rects
                .iter()
                .enumerate()
                .map(|(idx, rect)| (id(10 + idx as u64), *rect)),
        )
        .expect("layout");
        mesh
    }

    fn stacked() -> Mesh {
        mesh_with(&[
            Rectangle::new(0.0, 0.0, 200.0, 100.0),
            Rectangle::new(0.0, 100.0, 200.0, 100.0),
        ])
    }

    /// Full-width top panel over two bottom panels meeting at x=120.
    fn tee() -> Mesh {
        mesh_with(&[
            Rectangle::new(0.0, 0.0, 200.0, 100.0),
            Rectangle::new(0.0, 100.0, 120.0, 100.0),
            Rectangle::new(120.0, 100.0, 80.0, 100.0),
        ])
    }

    /// Four quadrants.
    fn cross() -> Mesh {
        mesh_with(&[
            Rectangle::new(0.0, 0.0, 100.0, 100.0),
            Rectangle::new(100.0, 0.0, 100.0, 100.0),
            Rectangle::new(0.0, 100.0, 100.0, 100.0),
            Rectangle::new(100.0, 100.0, 100.0, 100.0),
        ])
    }

    #[test]
    fn closest_cardinality() {
        let mesh = stacked();
        assert!(
            mesh.closest_panels(Axis::Horizontal, Point::new(100.0, 50.0))
                .expect("probe")
                .is_empty()
        );
        assert_eq!(
            mesh.closest_panels(Axis::Horizontal, Point::new(100.0, 100.0))
                .expect("probe"),
            vec![id(10), id(11)]
        );
        assert_eq!(
            mesh.closest_panels(Axis::Horizontal, Point::new(100.0, 0.0))
                .expect("probe"),
            vec![id(10)]
        );
        assert_eq!(
            mesh.closest_panels(Axis::Horizontal, Point::new(100.0, 200.0))
                .expect("probe"),
            vec![id(11)]
        );
        assert_eq!(
            mesh.closest_panels(Axis::Vertical, Point::new(0.0, 50.0))
                .expect("probe"),
            vec![id(10)]
        );
        assert!(
            mesh.closest_panels(Axis::Vertical, Point::new(-50.0, 50.0))
                .expect("probe")
                .is_empty()
        );
    }

    #[test]
    fn closest_tolerates_pointer_slop() {
        let mesh = stacked();
        assert_eq!(
            mesh.closest_panels(Axis::Horizontal, Point::new(30.0, 94.0))
                .expect("probe")
                .len(),
            2
        );
    }

    #[test]
    fn overlapping_panels_are_a_contract_error() {
        let mesh = mesh_with(&[
            Rectangle::new(0.0, 0.0, 200.0, 100.0),
            Rectangle::new(0.0, 0.0, 200.0, 100.0),
            Rectangle::new(0.0, 100.0, 200.0, 100.0),
        ]);
        assert_eq!(
            mesh.closest_panels(Axis::Horizontal, Point::new(50.0, 100.0)),
            Err(MeshError::TooManyClosestPanels { count: 3 })
        );
    }

    #[test]
    fn split_line_spans_a_tee() {
        let mesh = tee();
        let at = Point::new(160.0, 100.0);
        assert_eq!(
            mesh.split_line(Axis::Horizontal, at, Edge::Left).expect("search"),
            Some(0.0)
        );
        assert_eq!(
            mesh.split_line(Axis::Horizontal, at, Edge::Right).expect("search"),
            Some(200.0)
        );
    }

    #[test]
    fn split_line_stops_at_a_cross() {
        let mesh = cross();
        let at = Point::new(100.0, 40.0);
        assert_eq!(
            mesh.split_line(Axis::Vertical, at, Edge::Top).expect("search"),
            Some(0.0)
        );
        assert_eq!(
            mesh.split_line(Axis::Vertical, at, Edge::Bottom).expect("search"),
            Some(100.0)
        );
    }

    #[test]
    fn split_line_off_border_is_none() {
        let mesh = stacked();
        assert_eq!(
            mesh.split_line(Axis::Horizontal, Point::new(100.0, 50.0), Edge::Left)
                .expect("search"),
            None
        );
    }

    #[test]
    fn snap_picks_nearest_border() {
        let mesh = tee();
        assert_eq!(mesh.round_to_grid(Axis::Horizontal, 96.0), 100.0);
        assert_eq!(mesh.round_to_grid(Axis::Horizontal, 150.0), 150.0);
        assert_eq!(mesh.round_to_grid(Axis::Vertical, 113.0), 120.0);
        assert_eq!(mesh.round_to_grid(Axis::Vertical, 195.0), 200.0);
        assert_eq!(
            mesh.round_to_grid_at(Axis::Vertical, Point::new(3.0, 77.0)),
            Point::new(0.0, 77.0)
        );
    }

    #[test]
    fn snap_is_identity_on_existing_borders() {
        let mesh = tee();
        for panel in mesh.panels() {
            let r = panel.bound();
            for edge in Edge::ALL {
                let axis = edge.axis();
                assert_eq!(mesh.round_to_grid(axis, r.edge(edge)), r.edge(edge));
            }
        }
    }

    #[test]
    fn segment_snap_ignores_neighbouring_columns() {
        // Left column splits at y=100, right column at y=105.
        let mesh = mesh_with(&[
            Rectangle::new(0.0, 0.0, 100.0, 100.0),
            Rectangle::new(0.0, 100.0, 100.0, 100.0),
            Rectangle::new(100.0, 0.0, 100.0, 105.0),
            Rectangle::new(100.0, 105.0, 100.0, 95.0),
        ]);
        assert_eq!(mesh.round_to_grid(Axis::Horizontal, 103.0), 105.0);
        assert_eq!(
            mesh.round_to_grid_within(Axis::Horizontal, 103.0, [0.0, 100.0]),
            100.0
        );
        assert_eq!(
            mesh.round_to_grid_within(Axis::Horizontal, 103.0, [100.0, 200.0]),
            105.0
        );

        let closest = mesh
            .closest_panels(Axis::Horizontal, Point::new(150.0, 102.0))
            .expect("two panels");
        assert_eq!(closest, vec![id(12), id(13)]);
        assert_eq!(
            mesh.shared_line(Axis::Horizontal, id(12), id(13)),
            Ok(Some(105.0))
        );
        assert_eq!(
            mesh.shared_line(Axis::Horizontal, id(10), id(13)),
            Ok(None)
        );
    }

    #[test]
    fn overlapped_panels_respect_segment() {
        let mesh = cross();
        assert_eq!(
            mesh.overlapped_panels(Axis::Horizontal, 100.0, 100.0, 200.0),
            vec![id(11), id(13)]
        );
        assert_eq!(
            mesh.overlapped_panels(Axis::Horizontal, 100.0, 0.0, 200.0),
            vec![id(10), id(11), id(12), id(13)]
        );
        assert!(
            mesh.overlapped_panels(Axis::Horizontal, 50.0, 0.0, 200.0)
                .is_empty()
        );
    }

    #[test]
    fn adjust_pull_clamps_to_minimum() {
        let mesh = stacked();
        let top = Rectangle::new(0.0, 0.0, 200.0, 100.0);
        let bottom = Rectangle::new(0.0, 100.0, 200.0, 100.0);
        // Shrinking the top panel from its bottom edge.
        assert_eq!(
            mesh.adjust_pull(Axis::Horizontal, id(10), &top, 100.0, 20.0),
            Ok(50.0)
        );
        assert_eq!(
            mesh.adjust_pull(Axis::Horizontal, id(10), &top, 100.0, 160.0),
            Ok(160.0)
        );
        // Shrinking the bottom panel from its top edge.
        assert_eq!(
            mesh.adjust_pull(Axis::Horizontal, id(11), &bottom, 100.0, 160.0),
            Ok(150.0)
        );
        assert_eq!(
            mesh.adjust_pull(Axis::Horizontal, id(11), &bottom, 120.0, 160.0),
            Err(MeshError::LineNotOnEdge {
                id: id(11),
                axis: Axis::Horizontal,
                line: 120.0
            })
        );
    }

    #[test]
    fn segments_for_split_and_pull() {
        let mesh = tee();
        let (a, b) = mesh
            .split_segment(Axis::Vertical, Point::new(200.0, 150.0), id(12), false)
            .expect("segment");
        assert_eq!((a, b), (Point::new(200.0, 100.0), Point::new(200.0, 200.0)));
        let (a, b) = mesh
            .split_segment(Axis::Vertical, Point::new(200.0, 150.0), id(12), true)
            .expect("segment");
        assert_eq!((a, b), (Point::new(200.0, 0.0), Point::new(200.0, 200.0)));

        let segment = mesh
            .pull_segment(Axis::Vertical, Point::new(120.0, 150.0), false)
            .expect("segment");
        assert_eq!(
            segment,
            Some((Point::new(120.0, 100.0), Point::new(120.0, 200.0)))
        );
    }
}
