//! The mesh: a bounded container tiled by panels, plus the drag gestures
//! that split, resize and merge them.
//!
//! Child rectangles live in mesh-local coordinates: the first panel is
//! `(0, 0, bound.w, bound.h)`. Pointer input arrives in page coordinates and
//! is shifted by the mesh origin on entry.
//!
//! The solvers are split across submodules:
//! - `probe`: border detection, segment search and grid snapping.
//! - `edit`: split, pull/merge and full-edge cascading.

mod edit;
mod probe;

use std::collections::BTreeMap;
use std::fmt;

use tilemesh_core::event::{Modifiers, PointerEvent, PointerEventKind};
use tilemesh_core::geometry::{Axis, Point, Rectangle, Size};
use tracing::{debug, warn};

use crate::config::MeshConfig;
use crate::error::MeshError;
use crate::event::MeshEvent;
use crate::gesture::{GestureContext, GestureMode, SplitterBar};
use crate::invariants::{MeshInvariantReport, build_invariant_report};
use crate::panel::{
    FIRST_FREE_ID, MESH_FRAME_ID, Panel, PanelId, PanelIdAllocator, ROOT_PANEL_ID,
};

pub use edit::PullOutcome;

/// What a pointer event did.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureResponse {
    /// Not on a border, or no gesture in progress.
    Ignored,
    /// A gesture is active; draw the indicator here.
    Indicator(SplitterBar),
    /// The gesture ended; these changes were committed.
    Committed(Vec<MeshEvent>),
}

/// Panel container and gesture engine.
#[derive(Debug, Clone)]
pub struct Mesh {
    frame: Panel,
    config: MeshConfig,
    panels: BTreeMap<PanelId, Panel>,
    ids: PanelIdAllocator,
    context: Option<GestureContext>,
    events: Vec<MeshEvent>,
}

impl Mesh {
    /// Mesh with default tuning and a single panel covering `bound`.
    #[must_use]
    pub fn new(bound: Rectangle) -> Self {
        Self::build(bound, MeshConfig::default())
    }

    /// Mesh with explicit tuning.
    pub fn with_config(bound: Rectangle, config: MeshConfig) -> Result<Self, MeshError> {
        config.validate()?;
        Ok(Self::build(bound, config))
    }

    fn build(bound: Rectangle, config: MeshConfig) -> Self {
        let mut mesh = Self {
            frame: Panel::new(MESH_FRAME_ID, bound),
            config,
            panels: BTreeMap::new(),
            ids: PanelIdAllocator::with_next(FIRST_FREE_ID),
            context: None,
            events: Vec::new(),
        };
        let root = Panel::new(ROOT_PANEL_ID, Rectangle::from_size(bound.w, bound.h));
        mesh.attach(root);
        mesh
    }

    #[must_use]
    pub const fn id(&self) -> PanelId {
        self.frame.id()
    }

    /// Bound in page coordinates.
    #[must_use]
    pub const fn bound(&self) -> Rectangle {
        self.frame.bound()
    }

    /// Bound in the mesh's own frame, where child rectangles live.
    #[must_use]
    pub fn local_bound(&self) -> Rectangle {
        let bound = self.bound();
        Rectangle::from_size(bound.w, bound.h)
    }

    /// Move the mesh on the page. Child rectangles are unaffected.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.frame.move_to(x, y);
    }

    #[must_use]
    pub const fn config(&self) -> &MeshConfig {
        &self.config
    }

    #[must_use]
    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: PanelId) -> bool {
        self.panels.contains_key(&id)
    }

    /// Child panels in id order.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.panels.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// The in-memory rectangle map.
    #[must_use]
    pub fn layout(&self) -> BTreeMap<PanelId, Rectangle> {
        self.panels
            .iter()
            .map(|(id, panel)| (*id, panel.bound()))
            .collect()
    }

    /// Active gesture, if any.
    #[must_use]
    pub const fn context(&self) -> Option<&GestureContext> {
        self.context.as_ref()
    }

    #[must_use]
    pub const fn is_gesture_active(&self) -> bool {
        self.context.is_some()
    }

    /// Hand all queued change notifications to the host.
    pub fn drain_events(&mut self) -> Vec<MeshEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check the partition invariants.
    #[must_use]
    pub fn invariant_report(&self) -> MeshInvariantReport {
        build_invariant_report(
            self.local_bound(),
            self.config.min_width_height,
            self.panels.values(),
        )
    }

    /// Convert a page coordinate to the mesh frame.
    #[must_use]
    pub fn coordinate_at(&self, page: Point) -> Point {
        let bound = self.bound();
        Point::new(page.x - bound.x, page.y - bound.y)
    }

    /// First panel whose interior strictly contains `pt`.
    #[must_use]
    pub fn find_panel_at(&self, pt: Point) -> Option<PanelId> {
        self.panels
            .values()
            .find(|panel| panel.bound().contains(pt))
            .map(Panel::id)
    }

    // --- Container ---------------------------------------------------------

    /// Register a detached panel.
    pub fn add(&mut self, panel: Panel) -> Result<PanelId, MeshError> {
        let id = panel.id();
        if self.panels.contains_key(&id) {
            return Err(MeshError::DuplicatePanel { id });
        }
        if let Some(mesh) = panel.mesh() {
            return Err(MeshError::PanelAlreadyAttached { id, mesh });
        }
        self.ids.reserve(id)?;
        self.attach(panel);
        Ok(id)
    }

    /// Allocate an id and register a new panel covering `rect`.
    pub fn create_panel(&mut self, rect: Rectangle) -> Result<PanelId, MeshError> {
        let id = self.ids.allocate()?;
        self.add(Panel::new(id, rect))
    }

    /// Deregister a panel and hand it back detached.
    pub fn remove(&mut self, id: PanelId) -> Result<Panel, MeshError> {
        let Some(mut panel) = self.panels.remove(&id) else {
            return Err(MeshError::PanelNotFound { id });
        };
        panel.set_mesh(None);
        debug!(
            target: "tilemesh_layout::mesh",
            panel = id.get(),
            rect = %panel.bound(),
            remaining = self.panels.len(),
            "remove panel"
        );
        self.events.push(MeshEvent::Removed { id });
        Ok(panel)
    }

    /// Create or update panels from an external rectangle map.
    ///
    /// Ids missing from `layout` are left alone.
    pub fn apply_layout(
        &mut self,
        layout: impl IntoIterator<Item = (PanelId, Rectangle)>,
    ) -> Result<(), MeshError> {
        for (id, rect) in layout {
            if self.panels.contains_key(&id) {
                self.set_panel_bound(id, rect)?;
            } else {
                self.add(Panel::new(id, rect))?;
            }
        }
        self.warn_on_broken_invariants("apply_layout");
        Ok(())
    }

    fn attach(&mut self, mut panel: Panel) {
        let id = panel.id();
        let rect = panel.bound();
        panel.set_mesh(Some(self.id()));
        self.panels.insert(id, panel);
        debug!(
            target: "tilemesh_layout::mesh",
            panel = id.get(),
            rect = %rect,
            count = self.panels.len(),
            "add panel"
        );
        self.events.push(MeshEvent::Created {
            id,
            rect,
            mesh: self.id(),
        });
    }

    pub(crate) fn bound_of(&self, id: PanelId) -> Result<Rectangle, MeshError> {
        self.panels
            .get(&id)
            .map(Panel::bound)
            .ok_or(MeshError::PanelNotFound { id })
    }

    pub(crate) fn set_panel_bound(
        &mut self,
        id: PanelId,
        rect: Rectangle,
    ) -> Result<(), MeshError> {
        let Some(panel) = self.panels.get_mut(&id) else {
            return Err(MeshError::PanelNotFound { id });
        };
        if panel.bound() == rect {
            return Ok(());
        }
        panel.set_bound(rect);
        self.events.push(MeshEvent::Resized { id, rect });
        Ok(())
    }

    fn warn_on_broken_invariants(&self, operation: &'static str) {
        let report = self.invariant_report();
        if report.has_errors() {
            warn!(
                target: "tilemesh_layout::mesh",
                operation,
                issues = ?report.issues,
                "mesh invariants violated"
            );
        }
    }

    // --- Gestures ----------------------------------------------------------

    fn grip(&self) -> Size {
        Size::new(self.config.grip_width, self.config.grip_height)
    }

    /// Begin a drag on a border grip.
    ///
    /// Returns `None` when `page` is not on a border (or the border segment
    /// cannot be resolved); the mesh stays idle. A pull records the exact
    /// line shared by the two panels under the pointer as its origin.
    pub fn on_gesture_start(
        &mut self,
        page: Point,
        axis: Axis,
        modifiers: Modifiers,
    ) -> Result<Option<SplitterBar>, MeshError> {
        if self.context.is_some() {
            return Err(MeshError::GestureAlreadyActive);
        }

        let at = self.coordinate_at(page);
        let full = modifiers.is_full();
        let closest = self.closest_panels(axis, at)?;
        let (mode, at, segment) = match closest.as_slice() {
            [] => {
                debug!(target: "tilemesh_layout::mesh", at = %at, "gesture start off border");
                return Ok(None);
            }
            &[panel] => (
                GestureMode::Split,
                at,
                Some(self.split_segment(axis, at, panel, full)?),
            ),
            &[before, after] => {
                let Some(line) = self.shared_line(axis, before, after)? else {
                    debug!(target: "tilemesh_layout::mesh", at = %at, "panels do not meet");
                    return Ok(None);
                };
                let at = axis.with_line(at, line);
                (GestureMode::Pull, at, self.pull_segment(axis, at, full)?)
            }
            more => return Err(MeshError::TooManyClosestPanels { count: more.len() }),
        };
        let Some((edge1, edge2)) = segment else {
            debug!(target: "tilemesh_layout::mesh", at = %at, "border segment not found");
            return Ok(None);
        };

        let bound = self.bound();
        let context = GestureContext {
            mode,
            axis,
            offset: axis.line_of(Point::new(bound.x, bound.y)),
            full,
            drag_from: at,
            edge1,
            edge2,
            current: at,
        };
        debug!(
            target: "tilemesh_layout::mesh",
            ?mode,
            ?axis,
            full,
            from = %edge1,
            to = %edge2,
            "gesture start"
        );
        let bar = context.splitter_bar(self.grip());
        self.context = Some(context);
        Ok(Some(bar))
    }

    /// Track the pointer during a drag. Visual feedback only.
    pub fn on_gesture_move(&mut self, page: Point) -> Result<SplitterBar, MeshError> {
        let local = self.coordinate_at(page);
        let grip = self.grip();
        let Some(context) = self.context.as_mut() else {
            return Err(MeshError::NoActiveGesture);
        };
        let line = context.axis.line_of(page) - context.offset;
        context.current = context.axis.with_line(local, line);
        Ok(context.splitter_bar(grip))
    }

    /// Finish the drag and commit it.
    ///
    /// The gesture context is cleared even when the commit fails.
    pub fn on_gesture_end(&mut self, page: Point) -> Result<Vec<MeshEvent>, MeshError> {
        let Some(context) = self.context.take() else {
            return Err(MeshError::NoActiveGesture);
        };
        let at = self.coordinate_at(page);
        let mark = self.events.len();

        match context.mode {
            GestureMode::Split if context.full => {
                let edge = self.full_edge_origin(&context);
                self.split_full_edge(edge, context.axis.line_of(at))?;
            }
            GestureMode::Split => {
                self.split_child_at(at, context.axis)?;
            }
            GestureMode::Pull => {
                self.pull_childs_to(&context, at)?;
            }
        }

        self.warn_on_broken_invariants("gesture");
        Ok(self.events.split_off(mark))
    }

    /// Dispatch one host pointer event through the gesture state machine.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Result<GestureResponse, MeshError> {
        match event.kind {
            PointerEventKind::Down(axis) => Ok(
                match self.on_gesture_start(event.position, axis, event.modifiers)? {
                    Some(bar) => GestureResponse::Indicator(bar),
                    None => GestureResponse::Ignored,
                },
            ),
            PointerEventKind::Drag if self.context.is_some() => Ok(GestureResponse::Indicator(
                self.on_gesture_move(event.position)?,
            )),
            PointerEventKind::Up if self.context.is_some() => Ok(GestureResponse::Committed(
                self.on_gesture_end(event.position)?,
            )),
            PointerEventKind::Drag | PointerEventKind::Up => Ok(GestureResponse::Ignored),
        }
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*Mesh#{}, bound={}", self.id(), self.bound())?;
        for panel in self.panels.values() {
            write!(f, "\n\t{panel}")?;
        }
        Ok(())
    }
}
