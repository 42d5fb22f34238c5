//! Displacement-percentile refinement.

use crate::data::Design;
use crate::ids::{CellId, GroupId};
use crate::surface::PlacementSurface;

/// Attempts one refine move on each of the worst-displaced `percent` of `cells`.
fn refine_population<S: PlacementSurface>(
    design: &mut Design,
    surface: &mut S,
    mut cells: Vec<CellId>,
    percent: f64,
) -> usize {
    // stable: equal displacements keep population order
    cells.sort_by(|&a, &b| {
        surface
            .displacement(design, b)
            .cmp(&surface.displacement(design, a))
    });
    let take = ((cells.len() as f64 * percent).ceil() as usize).min(cells.len());

    let mut moved = 0;
    for &cell in &cells[..take] {
        if design.cell(cell).hold {
            continue;
        }
        if surface.refine_move(design, cell) {
            moved += 1;
        }
    }
    moved
}

/// Refines the most displaced siblings of `group`.
pub(crate) fn group_refine<S: PlacementSurface>(
    design: &mut Design,
    surface: &mut S,
    group: GroupId,
    percent: f64,
) -> usize {
    let siblings = design.group(group).siblings.clone();
    refine_population(design, surface, siblings, percent)
}

/// Refines the most displaced movable cells without a group.
pub(crate) fn non_group_refine<S: PlacementSurface>(
    design: &mut Design,
    surface: &mut S,
    percent: f64,
) -> usize {
    let cells = design
        .cell_ids()
        .filter(|&c| {
            let cell = design.cell(c);
            !(cell.fixed || cell.hold || cell.in_any_group())
        })
        .collect();
    refine_population(design, surface, cells, percent)
}
