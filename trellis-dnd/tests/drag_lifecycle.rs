//! End-to-end drag lifecycles and the auto-scroll driver

use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use trellis_config::{AutoScrollConfig, ReorderConfig};
use trellis_dnd::{
    drive, Axis, DragMachine, DragState, HoverCandidate, Point, Rect, ScrollStep, ScrollSurface,
};
use trellis_position::{compute_insertion_position, Edge, Position, PositionedItem, Spacing};

fn list(id: &str, left: f64) -> HoverCandidate {
    HoverCandidate {
        id: id.into(),
        scope: "board-1".into(),
        rect: Rect::new(left, 0.0, 280.0, 800.0),
        axis: Axis::Horizontal,
    }
}

#[test_log::test]
fn test_drag_list_to_the_left_of_another() {
    let mut m = DragMachine::new(&ReorderConfig::default());
    let now = Instant::now();

    assert!(m.press("list-c".into(), "board-1".into(), Point::new(620.0, 20.0)));
    assert!(m.pointer_move(Point::new(600.0, 22.0)));

    // Over list-b's left half, then over list-a's right half.
    assert!(m.hover(&list("list-b", 300.0), Point::new(320.0, 40.0)));
    assert_eq!(m.preview().unwrap().edge, Edge::Before);
    assert!(m.hover(&list("list-a", 0.0), Point::new(200.0, 40.0)));

    let intent = m.release(now).expect("drop intent");
    assert!(matches!(m.state(), DragState::Dropped { .. }));
    assert_eq!(intent.target.as_ref().map(|t| t.as_str()), Some("list-a"));
    assert_eq!(intent.edge, Edge::After);
    assert!(!intent.is_cross_scope());

    let siblings = vec![
        PositionedItem::new("list-a", Position::from(1000)),
        PositionedItem::new("list-b", Position::from(2000)),
        PositionedItem::new("list-c", Position::from(3000)),
    ];
    let request = intent.to_request(siblings);
    let position = compute_insertion_position(
        &request.siblings,
        request.target_id.as_ref(),
        request.edge,
        Spacing::default(),
    );
    assert_eq!(position, Position::from(1500));

    assert!(m.complete());
    assert_eq!(m.state(), &DragState::Idle);
    assert!(m.suppresses_click(now + Duration::from_millis(10)));
    assert!(!m.suppresses_click(now + Duration::from_millis(500)));
}

#[test_log::test]
fn test_drop_into_empty_list() {
    let mut m = DragMachine::new(&ReorderConfig::default());
    m.start("card-1".into(), "list-todo".into());
    assert!(m.hover_scope("list-done".into()));

    let intent = m.release(Instant::now()).unwrap();
    assert_eq!(intent.target, None);
    assert_eq!(intent.edge, Edge::After);
    assert!(intent.is_cross_scope());

    let position = compute_insertion_position(&[], None, intent.edge, Spacing::default());
    assert_eq!(position, Position::from(1000));
}

#[test_log::test]
fn test_release_without_any_preview_is_silent() {
    let mut m = DragMachine::new(&ReorderConfig::default());
    m.start("card-1".into(), "list-todo".into());
    assert_eq!(m.release(Instant::now()), None);
    assert_eq!(m.state(), &DragState::Idle);
}

struct FakeList {
    bounds: Rect,
    pointer: Option<Point>,
    scrolled: f64,
    stop_after: usize,
    steps: usize,
}

impl ScrollSurface for FakeList {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    fn scroll_by(&mut self, step: ScrollStep) {
        self.scrolled += step.dy;
        self.steps += 1;
        if self.steps >= self.stop_after {
            self.pointer = None;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_drive_scrolls_until_pointer_is_gone() {
    let config = AutoScrollConfig {
        edge_threshold_px: 30.0,
        initial_step_px: 4.0,
        acceleration_px: 4.0,
        max_step_px: 12.0,
        tick_ms: 16,
    };
    let mut surface = FakeList {
        bounds: Rect::new(0.0, 0.0, 280.0, 600.0),
        pointer: Some(Point::new(100.0, 590.0)),
        scrolled: 0.0,
        stop_after: 4,
        steps: 0,
    };

    let applied = drive(&mut surface, config, CancellationToken::new()).await;

    assert_eq!(applied, 4);
    assert_eq!(surface.scrolled, 4.0 + 8.0 + 12.0 + 12.0);
}

#[tokio::test(start_paused = true)]
async fn test_drive_stops_on_cancel() {
    let mut surface = FakeList {
        bounds: Rect::new(0.0, 0.0, 280.0, 600.0),
        pointer: Some(Point::new(100.0, 300.0)),
        scrolled: 0.0,
        stop_after: usize::MAX,
        steps: 0,
    };
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let applied = drive(&mut surface, AutoScrollConfig::default(), cancel).await;

    // Pointer sat in the middle the whole time.
    assert_eq!(applied, 0);
    assert_eq!(surface.scrolled, 0.0);
}
