//! Pre-placement snapping of cells that straddle group regions.
//!
//! Cells snapped here are marked `hold` and take no further part in greedy
//! assignment, refinement, or annealing.

use crate::data::Design;
use crate::ids::{CellId, GroupId};
use crate::legalize::distance::cell_anchor;
use crate::surface::PlacementSurface;

fn candidate(design: &Design, cell: CellId) -> bool {
    let c = design.cell(cell);
    !(c.is_placed || c.fixed || c.hold)
}

/// Snaps group members lying outside every region of their group into the
/// nearest region. Returns the number of cells frozen.
pub(crate) fn group_pre_placement<S: PlacementSurface>(
    design: &mut Design,
    surface: &mut S,
    group: GroupId,
) -> usize {
    let siblings = design.group(group).siblings.clone();
    let mut frozen = 0;

    for cell in siblings {
        if !candidate(design, cell) {
            continue;
        }
        let regions = &design.group(group).regions;
        if regions.iter().any(|r| surface.check_inside(design, cell, r)) {
            continue;
        }

        let mut best: Option<(i64, usize)> = None;
        for (i, region) in regions.iter().enumerate() {
            let dist = cell_anchor(design, cell, region).dist;
            if best.map_or(true, |(d, _)| dist < d) {
                best = Some((dist, i));
            }
        }
        let Some((_, i)) = best else {
            continue;
        };

        let region = regions[i];
        let target = surface.nearest_coord_to_rect_boundary(design, cell, &region);
        if surface.map_move_to(design, cell, target) {
            design.cell_mut(cell).hold = true;
            frozen += 1;
        }
    }
    frozen
}

/// Pushes cells without a group out of any group region they overlap.
/// Returns the number of cells frozen.
pub(crate) fn non_group_pre_placement<S: PlacementSurface>(
    design: &mut Design,
    surface: &mut S,
) -> usize {
    let mut frozen = 0;

    for cell in design.cell_ids().collect::<Vec<_>>() {
        if !candidate(design, cell) || design.cell(cell).in_any_group() {
            continue;
        }

        // last overlapping region wins
        let overlapped = design
            .groups
            .iter()
            .flat_map(|g| g.regions.iter())
            .filter(|r| surface.check_overlap(design, cell, r))
            .last()
            .copied();
        let Some(region) = overlapped else {
            continue;
        };

        let target = surface.nearest_coord_to_rect_boundary(design, cell, &region);
        if surface.map_move_to(design, cell, target) {
            design.cell_mut(cell).hold = true;
            frozen += 1;
        }
    }
    frozen
}
