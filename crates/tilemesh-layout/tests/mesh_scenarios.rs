//! End-to-end gesture scenarios driven through the public mesh API.

use tilemesh_core::event::{Modifiers, PointerEvent};
use tilemesh_core::geometry::{Axis, Point, Rectangle};
use tilemesh_layout::{GestureMode, GestureResponse, Mesh, MeshConfig, MeshEvent, PanelId};

fn id(raw: u64) -> PanelId {
    PanelId::new(raw).expect("test ID must be non-zero")
}

fn rect_of(mesh: &Mesh, raw: u64) -> Rectangle {
    mesh.panel(id(raw)).expect("panel exists").bound()
}

fn assert_clean(mesh: &Mesh) {
    let report = mesh.invariant_report();
    assert!(
        !report.has_errors(),
        "invariant report contains errors: {:?}",
        report.issues
    );
}

/// Drag from `from` to `to` as a single gesture. Returns the committed
/// events, or `None` when the start point was not on a border.
fn drag(
    mesh: &mut Mesh,
    axis: Axis,
    from: Point,
    to: Point,
    modifiers: Modifiers,
) -> Option<Vec<MeshEvent>> {
    mesh.on_gesture_start(from, axis, modifiers)
        .expect("start")?;
    mesh.on_gesture_move(to).expect("move");
    Some(mesh.on_gesture_end(to).expect("end"))
}

/// 200x200 mesh at the page origin, split once at y=100.
fn stacked() -> Mesh {
    let mut mesh = Mesh::new(Rectangle::from_size(200.0, 200.0));
    drag(
        &mut mesh,
        Axis::Horizontal,
        Point::new(100.0, 0.0),
        Point::new(100.0, 100.0),
        Modifiers::NONE,
    )
    .expect("top border starts a split");
    mesh.drain_events();
    mesh
}

/// `stacked` with the bottom panel split at x=120.
fn tee() -> Mesh {
    let mut mesh = stacked();
    drag(
        &mut mesh,
        Axis::Vertical,
        Point::new(0.0, 150.0),
        Point::new(120.0, 150.0),
        Modifiers::NONE,
    )
    .expect("left border starts a split");
    mesh.drain_events();
    mesh
}

#[test]
fn split_reject_then_merge() {
    let mut mesh = stacked();
    assert_eq!(rect_of(&mesh, 2), Rectangle::new(0.0, 0.0, 200.0, 100.0));
    assert_eq!(rect_of(&mesh, 3), Rectangle::new(0.0, 100.0, 200.0, 100.0));

    let events = drag(
        &mut mesh,
        Axis::Horizontal,
        Point::new(100.0, 0.0),
        Point::new(100.0, 20.0),
        Modifiers::NONE,
    )
    .expect("split gesture");
    assert!(events.is_empty(), "sliver split is abandoned");
    assert_eq!(mesh.len(), 2);

    assert_eq!(
        mesh.context().map(|c| c.mode),
        None,
        "context cleared after commit"
    );
    mesh.on_gesture_start(Point::new(100.0, 100.0), Axis::Horizontal, Modifiers::NONE)
        .expect("start")
        .expect("shared border");
    assert_eq!(mesh.context().map(|c| c.mode), Some(GestureMode::Pull));
    let events = mesh
        .on_gesture_end(Point::new(100.0, 160.0))
        .expect("end");

    assert_eq!(
        events,
        vec![
            MeshEvent::Removed { id: id(3) },
            MeshEvent::Resized {
                id: id(2),
                rect: Rectangle::new(0.0, 0.0, 200.0, 200.0)
            },
        ]
    );
    assert_eq!(mesh.len(), 1);
    assert_clean(&mesh);
}

#[test]
fn pull_across_tee_moves_every_panel_on_the_line() {
    let mut mesh = tee();
    assert_eq!(rect_of(&mesh, 3), Rectangle::new(0.0, 100.0, 120.0, 100.0));
    assert_eq!(rect_of(&mesh, 4), Rectangle::new(120.0, 100.0, 80.0, 100.0));

    let events = drag(
        &mut mesh,
        Axis::Horizontal,
        Point::new(60.0, 100.0),
        Point::new(60.0, 130.0),
        Modifiers::NONE,
    )
    .expect("shared border");
    assert_eq!(events.len(), 3);
    assert_eq!(rect_of(&mesh, 2), Rectangle::new(0.0, 0.0, 200.0, 130.0));
    assert_eq!(rect_of(&mesh, 3), Rectangle::new(0.0, 130.0, 120.0, 70.0));
    assert_eq!(rect_of(&mesh, 4), Rectangle::new(120.0, 130.0, 80.0, 70.0));
    assert_clean(&mesh);
}

#[test]
fn pull_below_junction_only_touches_its_segment() {
    let mut mesh = tee();
    let bar = mesh
        .on_gesture_start(Point::new(120.0, 150.0), Axis::Vertical, Modifiers::NONE)
        .expect("start")
        .expect("shared border");
    assert_eq!(bar.origin, Point::new(120.0, 100.0));
    assert_eq!(bar.size.h, 100.0);

    mesh.on_gesture_end(Point::new(140.0, 150.0)).expect("end");
    assert_eq!(rect_of(&mesh, 2), Rectangle::new(0.0, 0.0, 200.0, 100.0));
    assert_eq!(rect_of(&mesh, 3), Rectangle::new(0.0, 100.0, 140.0, 100.0));
    assert_eq!(rect_of(&mesh, 4), Rectangle::new(140.0, 100.0, 60.0, 100.0));

    // Far enough to collapse the right-hand panel.
    drag(
        &mut mesh,
        Axis::Vertical,
        Point::new(140.0, 150.0),
        Point::new(190.0, 150.0),
        Modifiers::NONE,
    )
    .expect("shared border");
    assert!(!mesh.contains(id(4)));
    assert_eq!(rect_of(&mesh, 3), Rectangle::new(0.0, 100.0, 200.0, 100.0));
    assert_clean(&mesh);
}

#[test]
fn shift_drag_on_outer_edge_cascades() {
    let mut mesh = stacked();
    let events = drag(
        &mut mesh,
        Axis::Horizontal,
        Point::new(100.0, 200.0),
        Point::new(100.0, 150.0),
        Modifiers::SHIFT,
    )
    .expect("bottom border");

    let Some(MeshEvent::Created { id: created, rect, .. }) = events.last().copied() else {
        panic!("full split creates a panel: {events:?}");
    };
    assert_eq!(rect, Rectangle::new(0.0, 150.0, 200.0, 50.0));
    assert_eq!(rect_of(&mesh, 2), Rectangle::new(0.0, 0.0, 200.0, 75.0));
    assert_eq!(rect_of(&mesh, 3), Rectangle::new(0.0, 75.0, 200.0, 75.0));
    assert!(mesh.contains(created));
    assert_clean(&mesh);
}

#[test]
fn shift_drag_on_leading_edge_cascades_downwards() {
    let mut mesh = stacked();
    drag(
        &mut mesh,
        Axis::Horizontal,
        Point::new(100.0, 0.0),
        Point::new(100.0, 60.0),
        Modifiers::SHIFT,
    )
    .expect("top border");
    assert_eq!(mesh.len(), 3);
    let created = mesh
        .find_panel_at(Point::new(100.0, 30.0))
        .expect("new strip at the top");
    assert_eq!(
        mesh.panel(created).map(|p| p.bound()),
        Some(Rectangle::new(0.0, 0.0, 200.0, 60.0))
    );
    assert_clean(&mesh);
}

#[test]
fn gestures_use_page_coordinates() {
    let mut mesh = Mesh::new(Rectangle::new(100.0, 50.0, 200.0, 200.0));
    drag(
        &mut mesh,
        Axis::Vertical,
        Point::new(100.0, 150.0),
        Point::new(200.0, 150.0),
        Modifiers::NONE,
    )
    .expect("left border");
    assert_eq!(rect_of(&mesh, 2), Rectangle::new(0.0, 0.0, 100.0, 200.0));
    assert_eq!(rect_of(&mesh, 3), Rectangle::new(100.0, 0.0, 100.0, 200.0));

    mesh.move_to(0.0, 0.0);
    let events = drag(
        &mut mesh,
        Axis::Vertical,
        Point::new(100.0, 100.0),
        Point::new(130.0, 100.0),
        Modifiers::NONE,
    )
    .expect("shared border after moving the mesh");
    assert_eq!(events.len(), 2);
    assert_eq!(rect_of(&mesh, 2), Rectangle::new(0.0, 0.0, 130.0, 200.0));
    assert_clean(&mesh);
}

#[test]
fn pointer_events_drive_the_same_flow() {
    let mut mesh = stacked();
    let down = PointerEvent::down(Axis::Horizontal, Point::new(100.0, 100.0));
    let Ok(GestureResponse::Indicator(bar)) = mesh.handle_pointer(&down) else {
        panic!("shared border shows an indicator");
    };
    assert_eq!(bar.size.w, 200.0);

    mesh.handle_pointer(&PointerEvent::drag(Point::new(100.0, 120.0)))
        .expect("drag");
    let Ok(GestureResponse::Committed(events)) =
        mesh.handle_pointer(&PointerEvent::up(Point::new(100.0, 120.0)))
    else {
        panic!("release commits");
    };
    assert_eq!(events.len(), 2);
    assert_eq!(rect_of(&mesh, 3), Rectangle::new(0.0, 120.0, 200.0, 80.0));
}

#[test]
fn events_serialize_with_tags() {
    let mut mesh = stacked();
    drag(
        &mut mesh,
        Axis::Horizontal,
        Point::new(100.0, 100.0),
        Point::new(100.0, 130.0),
        Modifiers::NONE,
    )
    .expect("shared border");
    let layout = mesh.layout();
    let first = MeshEvent::Resized {
        id: id(2),
        rect: layout[&id(2)],
    };
    let value = serde_json::to_value(first).expect("serialize");
    assert_eq!(value["event"], "resized");
    assert_eq!(value["id"], 2);
    assert_eq!(value["rect"]["type"], "Rectangle");
    assert_eq!(value["rect"]["h"], 130.0);

    let report = serde_json::to_value(mesh.invariant_report()).expect("serialize");
    assert_eq!(report["issues"], serde_json::json!([]));
}

#[test]
fn minimum_size_comes_from_mesh_config() {
    let config = MeshConfig::default().with_min_width_height(80.0);
    let mut mesh =
        Mesh::with_config(Rectangle::from_size(200.0, 200.0), config).expect("valid config");

    let rejected = drag(
        &mut mesh,
        Axis::Horizontal,
        Point::new(100.0, 0.0),
        Point::new(100.0, 60.0),
        Modifiers::NONE,
    )
    .expect("top border");
    assert!(rejected.is_empty());

    drag(
        &mut mesh,
        Axis::Horizontal,
        Point::new(100.0, 0.0),
        Point::new(100.0, 100.0),
        Modifiers::NONE,
    )
    .expect("top border");
    assert_eq!(mesh.len(), 2);

    // Clamped at 200 - 80 = 120, which collapses the bottom panel.
    drag(
        &mut mesh,
        Axis::Horizontal,
        Point::new(100.0, 100.0),
        Point::new(100.0, 125.0),
        Modifiers::NONE,
    )
    .expect("shared border");
    assert_eq!(mesh.len(), 1);
    assert_clean(&mesh);
}

/// Two columns whose horizontal borders are 5 apart: 150 left, 155 right.
fn staggered() -> Mesh {
    let mut mesh = Mesh::new(Rectangle::from_size(200.0, 300.0));
    mesh.apply_layout([
        (id(2), Rectangle::new(0.0, 0.0, 100.0, 150.0)),
        (id(10), Rectangle::new(0.0, 150.0, 100.0, 150.0)),
        (id(11), Rectangle::new(100.0, 0.0, 100.0, 155.0)),
        (id(12), Rectangle::new(100.0, 155.0, 100.0, 145.0)),
    ])
    .expect("apply");
    assert_clean(&mesh);
    mesh.drain_events();
    mesh
}

#[test]
fn pull_with_pointer_slop_moves_the_grabbed_border() {
    let mut mesh = staggered();
    let bar = mesh
        .on_gesture_start(Point::new(150.0, 152.0), Axis::Horizontal, Modifiers::NONE)
        .expect("start")
        .expect("shared border");
    assert_eq!(mesh.context().map(|c| c.mode), Some(GestureMode::Pull));
    assert_eq!(bar.origin, Point::new(100.0, 155.0));
    assert_eq!(bar.size.w, 100.0);

    let events = mesh.on_gesture_end(Point::new(150.0, 200.0)).expect("end");
    assert_eq!(events.len(), 2);
    assert_eq!(rect_of(&mesh, 11), Rectangle::new(100.0, 0.0, 100.0, 200.0));
    assert_eq!(rect_of(&mesh, 12), Rectangle::new(100.0, 200.0, 100.0, 100.0));
    assert_eq!(rect_of(&mesh, 2), Rectangle::new(0.0, 0.0, 100.0, 150.0));
    assert_eq!(rect_of(&mesh, 10), Rectangle::new(0.0, 150.0, 100.0, 150.0));
    assert_clean(&mesh);
}

#[test]
fn pull_with_slop_past_the_neighbouring_line() {
    let mut mesh = staggered();
    drag(
        &mut mesh,
        Axis::Horizontal,
        Point::new(50.0, 157.0),
        Point::new(50.0, 120.0),
        Modifiers::NONE,
    )
    .expect("shared border");
    assert_eq!(rect_of(&mesh, 2), Rectangle::new(0.0, 0.0, 100.0, 120.0));
    assert_eq!(rect_of(&mesh, 10), Rectangle::new(0.0, 120.0, 100.0, 180.0));
    assert_eq!(rect_of(&mesh, 11), Rectangle::new(100.0, 0.0, 100.0, 155.0));
    assert_clean(&mesh);
}

#[test]
fn every_slop_offset_pulls_cleanly() {
    for offset in -7..=7 {
        let offset = f64::from(offset);
        for (x, line) in [(50.0, 150.0), (150.0, 155.0)] {
            let mut mesh = staggered();
            let events = drag(
                &mut mesh,
                Axis::Horizontal,
                Point::new(x, line + offset),
                Point::new(x, line + 40.0),
                Modifiers::NONE,
            )
            .unwrap_or_else(|| panic!("offset {offset} at x={x} is on the border"));
            assert_eq!(events.len(), 2, "offset {offset} at x={x}");
            assert_clean(&mesh);
        }
    }
}
