//! Region-relative distance.
//!
//! Anchors a cell toward the corner of a rectangle nearest its original
//! global position: on each axis the max bound is chosen when the original
//! coordinate lies past the midpoint, the min bound otherwise.

use crate::data::Design;
use crate::ids::CellId;
use tessera_common::{Point, Rect};

/// The corner a cell is drawn toward and its distance from the cell's origin.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Anchor {
    /// The selected corner of the rectangle.
    pub target: Point,
    /// Manhattan distance from the original location to `target`.
    pub dist: i64,
}

/// Computes the anchor of an original location `init` relative to `rect`.
pub fn rect_anchor(init: Point, rect: &Rect) -> Anchor {
    let x = if init.x > rect.mid_x() {
        rect.x_max
    } else {
        rect.x_min
    };
    let y = if init.y > rect.mid_y() {
        rect.y_max
    } else {
        rect.y_min
    };
    let target = Point::new(x, y);
    Anchor {
        target,
        dist: init.manhattan(target),
    }
}

/// Computes the anchor of a cell's original location relative to `rect`.
pub fn cell_anchor(design: &Design, cell: CellId, rect: &Rect) -> Anchor {
    rect_anchor(design.cell(cell).init, rect)
}
