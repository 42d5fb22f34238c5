//! Interfaces between the legalizer and its collaborators.
//!
//! The legalization passes never touch site occupancy directly. They ask a
//! [`PlacementSurface`] to place, erase, swap, and refine cells, and a
//! [`RegionAssigner`] to prepare group regions and density weights before the
//! first pass runs. [`SiteGrid`](crate::grid::SiteGrid) implements both.

use crate::data::Design;
use crate::ids::CellId;
use tessera_common::{Point, Rect};

/// Occupancy grid and legality oracle consumed by the legalization passes.
///
/// Every mutating operation either commits a legal placement and reports
/// `true`, or leaves the design and the occupancy untouched and reports
/// `false`. The geometric queries have default implementations in terms of
/// the design alone.
pub trait PlacementSurface {
    /// Returns whether the cell is a fixed obstacle.
    fn is_fixed(&self, design: &Design, cell: CellId) -> bool {
        design.cell(cell).fixed
    }

    /// Places the cell at the nearest legal site to its original location.
    fn map_move(&mut self, design: &mut Design, cell: CellId) -> bool {
        let target = self.init_location(design, cell);
        self.map_move_to(design, cell, target)
    }

    /// Places the cell at the nearest legal site to `target`.
    fn map_move_to(&mut self, design: &mut Design, cell: CellId, target: Point) -> bool;

    /// Places the cell with a search widened beyond the regular map-move radius.
    fn shift_move(&mut self, design: &mut Design, cell: CellId) -> bool;

    /// Releases the cell's sites and marks it unplaced.
    fn erase(&mut self, design: &mut Design, cell: CellId);

    /// Exchanges the sites of two placed cells if the result is legal and improving.
    fn swap_cells(&mut self, design: &mut Design, a: CellId, b: CellId) -> bool;

    /// Moves a placed cell to a legal site with smaller displacement.
    fn refine_move(&mut self, design: &mut Design, cell: CellId) -> bool;

    /// Returns whether the cell's current footprint overlaps `rect`.
    fn check_overlap(&self, design: &Design, cell: CellId, rect: &Rect) -> bool {
        design.footprint(cell).overlaps(rect)
    }

    /// Returns whether the cell's current footprint lies inside `rect`.
    fn check_inside(&self, design: &Design, cell: CellId, rect: &Rect) -> bool {
        rect.contains_rect(&design.footprint(cell))
    }

    /// Returns the nearest origin on the boundary of `rect` legal for this cell.
    ///
    /// Group members are pulled inside the rectangle (clamped); any other cell
    /// is pushed out across the nearest edge, trying left, right, bottom, then
    /// top on ties. A non-member that does not overlap `rect` stays put.
    fn nearest_coord_to_rect_boundary(&self, design: &Design, cell: CellId, rect: &Rect) -> Point {
        let c = design.cell(cell);
        let m = design.macro_of(cell);
        let pos = c.pos;

        if c.in_any_group() {
            let x = pos.x.clamp(rect.x_min, (rect.x_max - m.width).max(rect.x_min));
            let y = pos.y.clamp(rect.y_min, (rect.y_max - m.height).max(rect.y_min));
            return Point::new(x, y);
        }

        if !design.footprint(cell).overlaps(rect) {
            return pos;
        }
        let candidates = [
            Point::new(rect.x_min - m.width, pos.y),
            Point::new(rect.x_max, pos.y),
            Point::new(pos.x, rect.y_min - m.height),
            Point::new(pos.x, rect.y_max),
        ];
        let mut best = candidates[0];
        for p in &candidates[1..] {
            if p.manhattan(pos) < best.manhattan(pos) {
                best = *p;
            }
        }
        best
    }

    /// Returns the cell's original global-placement location.
    fn init_location(&self, design: &Design, cell: CellId) -> Point {
        design.cell(cell).init
    }

    /// Returns the Manhattan distance between the cell's current and original location.
    fn displacement(&self, design: &Design, cell: CellId) -> i64 {
        let c = design.cell(cell);
        c.pos.manhattan(c.init)
    }
}

/// Prepares per-group regions and per-cell weights before legalization.
pub trait RegionAssigner {
    /// Assigns each group member a region and computes group boundary and utilization.
    fn assign_group_regions(&mut self, design: &mut Design);

    /// Computes the density weights used to order the non-group population.
    fn assign_non_group_regions(&mut self, design: &mut Design);
}
