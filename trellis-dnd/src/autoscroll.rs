//! Edge auto-scroll while dragging
//!
//! While the pointer stays near an edge of a scrollable container, the
//! container scrolls toward that edge. The step grows every tick the pointer
//! stays in the zone and is capped; leaving the zone resets it.

use crate::geometry::{Point, Rect};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};
use trellis_config::AutoScrollConfig;

/// Scroll offset to apply for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollStep {
    pub dx: f64,
    pub dy: f64,
}

/// Computes scroll steps from pointer position, one tick at a time
#[derive(Debug, Clone)]
pub struct AutoScroller {
    config: AutoScrollConfig,
    direction: (i8, i8),
    streak: u32,
}

impl AutoScroller {
    pub fn new(config: AutoScrollConfig) -> Self {
        Self {
            config,
            direction: (0, 0),
            streak: 0,
        }
    }

    /// Step for this tick, or `None` when the pointer is outside every edge zone
    pub fn step(&mut self, container: Rect, pointer: Point) -> Option<ScrollStep> {
        let direction = self.direction_for(container, pointer);
        if direction == (0, 0) {
            self.reset();
            return None;
        }
        if direction != self.direction {
            self.direction = direction;
            self.streak = 0;
        }

        let magnitude = (self.config.initial_step_px
            + self.config.acceleration_px * f64::from(self.streak))
        .min(self.config.max_step_px);
        self.streak = self.streak.saturating_add(1);

        Some(ScrollStep {
            dx: f64::from(direction.0) * magnitude,
            dy: f64::from(direction.1) * magnitude,
        })
    }

    /// Forget any acceleration built up so far
    pub fn reset(&mut self) {
        self.direction = (0, 0);
        self.streak = 0;
    }

    fn direction_for(&self, container: Rect, pointer: Point) -> (i8, i8) {
        if !container.contains(pointer) {
            return (0, 0);
        }
        let zone = self.config.edge_threshold_px;
        let axis = |pos: f64, start: f64, end: f64| -> i8 {
            if pos - start < zone {
                -1
            } else if end - pos < zone {
                1
            } else {
                0
            }
        };
        (
            axis(pointer.x, container.left, container.right()),
            axis(pointer.y, container.top, container.bottom()),
        )
    }
}

/// A scrollable container observed by [`drive`]
pub trait ScrollSurface {
    /// Visible bounds of the container
    fn bounds(&self) -> Rect;

    /// Current pointer position, `None` once the drag is over
    fn pointer(&self) -> Option<Point>;

    /// Scroll the container by one step
    fn scroll_by(&mut self, step: ScrollStep);
}

/// Run auto-scroll on a timer until the pointer is gone or `cancel` fires.
///
/// Returns the number of steps applied.
pub async fn drive<S: ScrollSurface>(
    surface: &mut S,
    config: AutoScrollConfig,
    cancel: CancellationToken,
) -> u32 {
    let mut scroller = AutoScroller::new(config);
    let mut interval = tokio::time::interval(config.tick());
    let mut applied = 0u32;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }

        let Some(pointer) = surface.pointer() else {
            break;
        };
        if let Some(step) = scroller.step(surface.bounds(), pointer) {
            trace!(dx = step.dx, dy = step.dy, "auto-scroll step");
            surface.scroll_by(step);
            applied += 1;
        }
    }

    debug!(steps = applied, "auto-scroll stopped");
    applied
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AutoScrollConfig {
        AutoScrollConfig {
            edge_threshold_px: 20.0,
            initial_step_px: 2.0,
            acceleration_px: 3.0,
            max_step_px: 10.0,
            tick_ms: 16,
        }
    }

    fn container() -> Rect {
        Rect::new(0.0, 0.0, 300.0, 500.0)
    }

    #[test]
    fn test_no_step_in_the_middle() {
        let mut s = AutoScroller::new(config());
        assert_eq!(s.step(container(), Point::new(150.0, 250.0)), None);
    }

    #[test]
    fn test_no_step_outside_container() {
        let mut s = AutoScroller::new(config());
        assert_eq!(s.step(container(), Point::new(150.0, 510.0)), None);
    }

    #[test]
    fn test_accelerates_and_caps() {
        let mut s = AutoScroller::new(config());
        let near_bottom = Point::new(150.0, 490.0);
        let steps: Vec<f64> = (0..5)
            .map(|_| s.step(container(), near_bottom).unwrap().dy)
            .collect();
        assert_eq!(steps, vec![2.0, 5.0, 8.0, 10.0, 10.0]);
    }

    #[test]
    fn test_scrolls_up_near_top() {
        let mut s = AutoScroller::new(config());
        let step = s.step(container(), Point::new(150.0, 5.0)).unwrap();
        assert_eq!(step, ScrollStep { dx: 0.0, dy: -2.0 });
    }

    #[test]
    fn test_leaving_zone_resets() {
        let mut s = AutoScroller::new(config());
        let near_bottom = Point::new(150.0, 490.0);
        s.step(container(), near_bottom);
        s.step(container(), near_bottom);
        s.step(container(), Point::new(150.0, 250.0));
        assert_eq!(s.step(container(), near_bottom).unwrap().dy, 2.0);
    }

    #[test]
    fn test_direction_change_resets() {
        let mut s = AutoScroller::new(config());
        s.step(container(), Point::new(150.0, 490.0));
        s.step(container(), Point::new(150.0, 490.0));
        let up = s.step(container(), Point::new(150.0, 5.0)).unwrap();
        assert_eq!(up.dy, -2.0);
    }

    #[test]
    fn test_corner_scrolls_both_axes() {
        let mut s = AutoScroller::new(config());
        let step = s.step(container(), Point::new(295.0, 495.0)).unwrap();
        assert_eq!(step, ScrollStep { dx: 2.0, dy: 2.0 });
    }
}
