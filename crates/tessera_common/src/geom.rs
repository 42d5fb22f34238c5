//! Integer placement geometry.
//!
//! Coordinates are expressed in placement-grid units: sites along the x axis
//! and rows along the y axis. Rectangles are half-open on their max side, so a
//! cell footprint of width `w` at `x` covers sites `x..x + w`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A grid coordinate (site column, row).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Point {
    /// Site column.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the Manhattan distance to `other`.
    pub fn manhattan(self, other: Point) -> i64 {
        (self.x as i64 - other.x as i64).abs() + (self.y as i64 - other.y as i64).abs()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle, half-open on the max side.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Inclusive lower x bound.
    pub x_min: i32,
    /// Inclusive lower y bound.
    pub y_min: i32,
    /// Exclusive upper x bound.
    pub x_max: i32,
    /// Exclusive upper y bound.
    pub y_max: i32,
}

impl Rect {
    /// Creates a rectangle from its four bounds.
    pub fn new(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Creates the footprint rectangle of a `width` x `height` block at `origin`.
    pub fn from_origin(origin: Point, width: i32, height: i32) -> Self {
        Self::new(origin.x, origin.y, origin.x + width, origin.y + height)
    }

    /// Returns the extent along x.
    pub fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    /// Returns the extent along y.
    pub fn height(&self) -> i32 {
        self.y_max - self.y_min
    }

    /// Returns the number of sites covered, zero for degenerate rectangles.
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width() as i64 * self.height() as i64
        }
    }

    /// Returns whether the rectangle covers no sites.
    pub fn is_empty(&self) -> bool {
        self.x_max <= self.x_min || self.y_max <= self.y_min
    }

    /// Midpoint along x, rounded toward zero.
    pub fn mid_x(&self) -> i32 {
        (self.x_min + self.x_max) / 2
    }

    /// Midpoint along y, rounded toward zero.
    pub fn mid_y(&self) -> i32 {
        (self.y_min + self.y_max) / 2
    }

    /// Returns the lower-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x_min, self.y_min)
    }

    /// Returns whether the two rectangles share at least one site.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x_min < other.x_max
            && other.x_min < self.x_max
            && self.y_min < other.y_max
            && other.y_min < self.y_max
    }

    /// Returns whether `other` lies entirely within this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.x_min <= other.x_min
            && other.x_max <= self.x_max
            && self.y_min <= other.y_min
            && other.y_max <= self.y_max
    }

    /// Returns whether the site at `p` lies within this rectangle.
    pub fn contains_point(&self, p: Point) -> bool {
        self.x_min <= p.x && p.x < self.x_max && self.y_min <= p.y && p.y < self.y_max
    }

    /// Returns the smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            self.x_min.min(other.x_min),
            self.y_min.min(other.y_min),
            self.x_max.max(other.x_max),
            self.y_max.max(other.y_max),
        )
    }

    /// Returns the shared area of two rectangles.
    pub fn overlap_area(&self, other: &Rect) -> i64 {
        Rect::new(
            self.x_min.max(other.x_min),
            self.y_min.max(other.y_min),
            self.x_max.min(other.x_max),
            self.y_max.min(other.y_max),
        )
        .area()
    }

    /// Returns the bounding box of a set of rectangles, or `None` when empty.
    pub fn bounding<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
        rects.into_iter().fold(None, |acc, r| match acc {
            None => Some(*r),
            Some(b) => Some(b.union(r)),
        })
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) x [{}, {})",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance() {
        assert_eq!(Point::new(1, 2).manhattan(Point::new(4, -2)), 7);
        assert_eq!(Point::new(3, 3).manhattan(Point::new(3, 3)), 0);
    }

    #[test]
    fn half_open_overlap() {
        let a = Rect::new(0, 0, 4, 2);
        let touching = Rect::new(4, 0, 6, 2);
        let crossing = Rect::new(3, 1, 6, 3);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&crossing));
        assert_eq!(a.overlap_area(&crossing), 1);
        assert_eq!(a.overlap_area(&touching), 0);
    }

    #[test]
    fn containment() {
        let region = Rect::new(0, 0, 10, 4);
        assert!(region.contains_rect(&Rect::from_origin(Point::new(8, 2), 2, 2)));
        assert!(!region.contains_rect(&Rect::from_origin(Point::new(9, 2), 2, 2)));
        assert!(region.contains_point(Point::new(9, 3)));
        assert!(!region.contains_point(Point::new(10, 3)));
    }

    #[test]
    fn midpoints_round_toward_zero() {
        let r = Rect::new(0, 0, 5, 3);
        assert_eq!(r.mid_x(), 2);
        assert_eq!(r.mid_y(), 1);
    }

    #[test]
    fn bounding_box() {
        let rects = [Rect::new(0, 0, 2, 2), Rect::new(5, 3, 8, 9)];
        assert_eq!(Rect::bounding(&rects), Some(Rect::new(0, 0, 8, 9)));
        assert_eq!(Rect::bounding(&[]), None);
    }

    #[test]
    fn degenerate_area_is_zero() {
        assert_eq!(Rect::new(3, 3, 3, 8).area(), 0);
        assert!(Rect::new(3, 3, 2, 8).is_empty());
    }

    #[test]
    fn serde_roundtrip() {
        let r = Rect::new(1, 2, 3, 4);
        let json = serde_json::to_string(&r).unwrap();
        let back: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
