//! Pointer geometry

use serde::{Deserialize, Serialize};
use trellis_position::Edge;

/// Pointer coordinates in client pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box of an element in client pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// True if the point lies inside or on the border
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }
}

/// Layout axis of a sibling scope: cards stack vertically, lists sit side by side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Which side of `rect` the pointer is on.
///
/// The split line sits at `split_fraction` of the rect's extent along `axis`;
/// anything before it (above, or left of it) is [`Edge::Before`].
pub fn edge_at(rect: Rect, point: Point, axis: Axis, split_fraction: f64) -> Edge {
    let (start, extent, coord) = match axis {
        Axis::Vertical => (rect.top, rect.height, point.y),
        Axis::Horizontal => (rect.left, rect.width, point.x),
    };
    if coord < start + extent * split_fraction {
        Edge::Before
    } else {
        Edge::After
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_midline() {
        let rect = Rect::new(0.0, 100.0, 200.0, 40.0);
        assert_eq!(edge_at(rect, Point::new(10.0, 110.0), Axis::Vertical, 0.5), Edge::Before);
        assert_eq!(edge_at(rect, Point::new(10.0, 120.0), Axis::Vertical, 0.5), Edge::After);
        assert_eq!(edge_at(rect, Point::new(10.0, 139.0), Axis::Vertical, 0.5), Edge::After);
    }

    #[test]
    fn test_horizontal_uses_x() {
        let rect = Rect::new(300.0, 0.0, 100.0, 600.0);
        assert_eq!(edge_at(rect, Point::new(320.0, 590.0), Axis::Horizontal, 0.5), Edge::Before);
        assert_eq!(edge_at(rect, Point::new(380.0, 5.0), Axis::Horizontal, 0.5), Edge::After);
    }

    #[test]
    fn test_custom_split_fraction() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let p = Point::new(0.0, 30.0);
        assert_eq!(edge_at(rect, p, Axis::Vertical, 0.5), Edge::Before);
        assert_eq!(edge_at(rect, p, Axis::Vertical, 0.25), Edge::After);
    }

    #[test]
    fn test_contains() {
        let rect = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(15.0, 20.0)));
        assert!(!rect.contains(Point::new(21.0, 15.0)));
    }

    #[test]
    fn test_geometry_json_shape() {
        let axis: Axis = serde_json::from_str("\"horizontal\"").unwrap();
        assert_eq!(axis, Axis::Horizontal);

        let rect: Rect =
            serde_json::from_str(r#"{"left":8.0,"top":16.0,"width":240.0,"height":48.0}"#).unwrap();
        assert_eq!(rect.bottom(), 64.0);

        let point = serde_json::to_value(Point::new(1.5, 2.0)).unwrap();
        assert_eq!(point, serde_json::json!({"x": 1.5, "y": 2.0}));
    }
}
