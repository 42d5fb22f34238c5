//! Processing order for greedy assignment.
//!
//! Larger cells go first, then denser ones; the cell id breaks the remaining
//! ties so the permutation never depends on how the caller collected cells.

use crate::data::Design;
use crate::ids::CellId;
use std::cmp::Ordering;

/// Compares two cells: area descending, dense factor descending, id ascending.
pub fn placement_order(design: &Design, a: CellId, b: CellId) -> Ordering {
    design
        .cell_area(b)
        .cmp(&design.cell_area(a))
        .then_with(|| {
            design
                .cell(b)
                .dense_factor
                .total_cmp(&design.cell(a).dense_factor)
        })
        .then_with(|| a.cmp(&b))
}

/// Sorts cells in place by [`placement_order`].
pub fn sort_for_placement(design: &Design, cells: &mut [CellId]) {
    cells.sort_by(|&a, &b| placement_order(design, a, b));
}
