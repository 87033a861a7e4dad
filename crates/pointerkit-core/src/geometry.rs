//! Stateless geometry over pointer positions.
//!
//! Every function here works on client-space `kurbo::Point`s and has no side
//! effects. Angles are reported in degrees.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Coarse movement direction between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Check if the direction is on the horizontal axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Check if the direction is on the vertical axis.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// Round a coordinate to whole pixels, halves rounding towards positive infinity.
pub fn round_px(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round both coordinates of a point to whole pixels.
pub fn round_point(point: Point) -> Point {
    Point::new(round_px(point.x), round_px(point.y))
}

/// Center of a pointer set.
///
/// A single point is returned rounded as-is. For several points this is the
/// rounded midpoint of their axis-aligned bounding box, not the centroid, so
/// the result does not depend on pointer order. An empty set yields the origin.
pub fn center<I>(points: I) -> Point
where
    I: IntoIterator<Item = Point>,
{
    let mut points = points.into_iter();
    let Some(first) = points.next() else {
        return Point::ZERO;
    };

    let mut bounds = Rect::from_points(first, first);
    let mut count = 1;
    for point in points {
        bounds = bounds.union_pt(point);
        count += 1;
    }

    if count == 1 {
        return round_point(first);
    }
    round_point(bounds.center())
}

/// Euclidean distance from `p1` to `p2`.
pub fn distance(p1: Point, p2: Point) -> f64 {
    p1.distance(p2)
}

/// Angle of the vector `p1 -> p2` in degrees, within `(-180, 180]`.
pub fn angle(p1: Point, p2: Point) -> f64 {
    let delta = p2 - p1;
    let degrees = delta.y.atan2(delta.x).to_degrees();
    if degrees <= -180.0 { degrees + 360.0 } else { degrees }
}

/// Classify the offset between two points into a [`Direction`].
///
/// The offset is taken as `p1 - p2`, so a move from `p1` to the right yields a
/// negative `dx` and maps to [`Direction::Right`]. Equal components, including
/// no movement at all, give [`Direction::None`].
pub fn direction(p1: Point, p2: Point) -> Direction {
    let dx = p1.x - p2.x;
    let dy = p1.y - p2.y;

    if dx == dy {
        return Direction::None;
    }

    if dx.abs() >= dy.abs() {
        if dx > 0.0 { Direction::Left } else { Direction::Right }
    } else if dy > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    }
}

/// Rotation in degrees between two pointer pairs, compared slot by slot.
pub fn rotation(start: [Point; 2], end: [Point; 2]) -> f64 {
    angle(end[1], end[0]) - angle(start[1], start[0])
}

/// Ratio of the pair spread at `end` to the spread at `start`.
///
/// Returns a non-finite value when the start pair is coincident.
pub fn scale(start: [Point; 2], end: [Point; 2]) -> f64 {
    distance(end[0], end[1]) / distance(start[0], start[1])
}
