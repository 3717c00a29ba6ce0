use serde::{Deserialize, Serialize};

use super::item::TargetId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self { Self { x, y } }

    #[must_use]
    pub fn distance(self, other: Point) -> f64 { (self.x - other.x).hypot(self.y - other.y) }
}

/// Axis-aligned rectangle in client coordinates, `y` growing downwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 { self.left + self.width }

    #[must_use]
    pub fn bottom(&self) -> f64 { self.top + self.height }

    #[must_use]
    pub fn area(&self) -> f64 { self.width * self.height }

    /// Edges count as inside.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.left <= point.x
            && point.x <= self.right()
            && self.top <= point.y
            && point.y <= self.bottom()
    }

    /// Top-left, top-right, bottom-left, bottom-right.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right(), self.top),
            Point::new(self.left, self.bottom()),
            Point::new(self.right(), self.bottom()),
        ]
    }

    /// Area shared by both rectangles divided by the area of their union,
    /// `0.0` when they don't overlap.
    #[must_use]
    pub fn intersection_ratio(&self, other: &Rect) -> f64 {
        let left = self.left.max(other.left);
        let right = self.right().min(other.right());
        let top = self.top.max(other.top);
        let bottom = self.bottom().min(other.bottom());

        if left >= right || top >= bottom {
            return 0.0;
        }

        let intersection = (right - left) * (bottom - top);
        let union = self.area() + other.area() - intersection;

        if union > 0.0 { intersection / union } else { 0.0 }
    }

    /// Mean distance between each corner of `self` and the matching corner
    /// of `other`.
    #[must_use]
    pub fn corner_distance(&self, other: &Rect) -> f64 {
        let total: f64 = self
            .corners()
            .iter()
            .zip(other.corners())
            .map(|(a, b)| a.distance(b))
            .sum();

        total / 4.0
    }

    /// Mean distance between `point` and the corners of `self`.
    #[must_use]
    pub fn mean_distance_to_corners(&self, point: Point) -> f64 {
        let total: f64 = self.corners().iter().map(|corner| corner.distance(point)).sum();

        total / 4.0
    }
}

/// A drop zone the dragged card can land on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droppable {
    pub id: TargetId,
    pub rect: Rect,
}

impl Droppable {
    #[must_use]
    pub fn new(id: TargetId, rect: Rect) -> Self { Self { id, rect } }
}

/// Geometry of an in-flight drag gesture.
///
/// `pointer` is absent for gestures that don't come from a pointing device,
/// such as keyboard dragging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragGeometry {
    pub pointer: Option<Point>,
    pub active_rect: Rect,
}

impl DragGeometry {
    #[must_use]
    pub fn new(pointer: Option<Point>, active_rect: Rect) -> Self {
        Self {
            pointer,
            active_rect,
        }
    }
}
