//! Greedy site assignment.
//!
//! Eligible cells are sorted by [`sort_for_placement`] and placed at the legal
//! site nearest their original location, multi-row cells first. Inside a group
//! a single failure aborts the group; outside groups a failing cell gets one
//! widened search before it is left unplaced with a warning.

use crate::data::Design;
use crate::ids::{CellId, GroupId};
use crate::legalize::codes;
use crate::legalize::ordering::sort_for_placement;
use crate::surface::PlacementSurface;
use tessera_diagnostics::{Diagnostic, DiagnosticSink, Subject};

/// Result of greedy assignment for one group.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum GreedyOutcome {
    /// Every eligible sibling was placed.
    Placed,
    /// Placement stopped at `cell`.
    Failed {
        /// The cell no legal site was found for.
        cell: CellId,
        /// Whether the failure happened in the multi-row pass.
        multi_row: bool,
    },
}

fn eligible(design: &Design, cell: CellId) -> bool {
    let c = design.cell(cell);
    !(c.is_placed || c.fixed)
}

/// Splits sorted cells into the multi-row and single-row passes.
fn passes(design: &Design, mut cells: Vec<CellId>) -> (Vec<CellId>, Vec<CellId>) {
    sort_for_placement(design, &mut cells);
    cells
        .into_iter()
        .partition(|&c| design.macro_of(c).is_multi)
}

/// Places the unplaced members of `group`, stopping at the first failure.
pub(crate) fn place_group<S: PlacementSurface>(
    design: &mut Design,
    surface: &mut S,
    group: GroupId,
) -> GreedyOutcome {
    let cells: Vec<CellId> = design
        .group(group)
        .siblings
        .iter()
        .copied()
        .filter(|&c| eligible(design, c))
        .collect();
    let (multi, single) = passes(design, cells);

    for (pass, multi_row) in [(multi, true), (single, false)] {
        for cell in pass {
            if !surface.map_move(design, cell) {
                return GreedyOutcome::Failed { cell, multi_row };
            }
        }
    }
    GreedyOutcome::Placed
}

/// Places every unplaced cell without a group. Returns the cells left unplaced.
pub(crate) fn place_non_group<S: PlacementSurface>(
    design: &mut Design,
    surface: &mut S,
    sink: &DiagnosticSink,
) -> Vec<CellId> {
    let cells: Vec<CellId> = design
        .cell_ids()
        .filter(|&c| eligible(design, c) && !design.cell(c).in_any_group())
        .collect();
    let (multi, single) = passes(design, cells);

    let mut unplaced = Vec::new();
    for cell in multi.into_iter().chain(single) {
        if surface.map_move(design, cell) || surface.shift_move(design, cell) {
            continue;
        }
        let c = design.cell(cell);
        sink.emit(
            Diagnostic::warning(codes::NON_GROUP_UNPLACED, "no legal site found")
                .with_subject(Subject::Cell(c.name.clone()))
                .with_note(format!(
                    "original location {} with macro '{}'",
                    c.init,
                    design.macro_of(cell).name
                )),
        );
        unplaced.push(cell);
    }
    unplaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Cell, Group, Macro};
    use crate::grid::SiteGrid;
    use tessera_common::{Point, Rect};
    use tessera_config::SurfaceConfig;

    fn grid(d: &Design, radius: i32) -> SiteGrid {
        SiteGrid::new(d, &SurfaceConfig { search_radius: radius }).unwrap()
    }

    #[test]
    fn multi_row_cells_claim_sites_first() {
        let mut d = Design::new(Rect::new(0, 0, 10, 2));
        let inv = d.add_macro(Macro::new("INV", 1, 1));
        let ff = d.add_macro(Macro::new("DFF2", 2, 2));
        let g = d.add_group(Group::new("g", vec![Rect::new(0, 0, 10, 2)]));
        let small = d.add_cell(Cell::movable("small", inv, Point::new(4, 0)).in_group(g));
        let tall = d.add_cell(Cell::movable("tall", ff, Point::new(4, 0)).in_group(g));
        let mut s = grid(&d, 4);

        assert_eq!(place_group(&mut d, &mut s, g), GreedyOutcome::Placed);
        assert_eq!(d.cell(tall).pos, Point::new(4, 0));
        assert_ne!(d.cell(small).pos, Point::new(4, 0));
        assert!(d.cell(small).is_placed);
    }

    #[test]
    fn group_stops_at_first_failure() {
        let mut d = Design::new(Rect::new(0, 0, 10, 2));
        let ff = d.add_macro(Macro::new("DFF2", 2, 2));
        let g = d.add_group(Group::new("g", vec![Rect::new(0, 0, 4, 2)]));
        let cells: Vec<_> = (0..3)
            .map(|i| d.add_cell(Cell::movable(format!("ff{i}"), ff, Point::new(0, 0)).in_group(g)))
            .collect();
        let mut s = grid(&d, 8);

        let outcome = place_group(&mut d, &mut s, g);
        assert_eq!(
            outcome,
            GreedyOutcome::Failed {
                cell: cells[2],
                multi_row: true
            }
        );
        assert!(d.cell(cells[0]).is_placed);
        assert!(d.cell(cells[1]).is_placed);
        assert!(!d.cell(cells[2]).is_placed);
    }

    #[test]
    fn non_group_falls_back_to_shift_move() {
        let mut d = Design::new(Rect::new(0, 0, 12, 1));
        let inv = d.add_macro(Macro::new("INV", 1, 1));
        for x in 0..5 {
            d.add_cell(Cell::fixed(format!("blk{x}"), inv, Point::new(x, 0)));
        }
        let a = d.add_cell(Cell::movable("a", inv, Point::new(0, 0)));
        let sink = DiagnosticSink::new();
        let mut s = grid(&d, 2);

        assert!(place_non_group(&mut d, &mut s, &sink).is_empty());
        assert_eq!(d.cell(a).pos, Point::new(5, 0));
        assert_eq!(sink.warning_count(), 0);
    }

    #[test]
    fn non_group_warns_when_die_is_full() {
        let mut d = Design::new(Rect::new(0, 0, 2, 1));
        let inv = d.add_macro(Macro::new("INV", 1, 1));
        let cells: Vec<_> = (0..3)
            .map(|i| d.add_cell(Cell::movable(format!("u{i}"), inv, Point::new(0, 0))))
            .collect();
        let sink = DiagnosticSink::new();
        let mut s = grid(&d, 2);

        let unplaced = place_non_group(&mut d, &mut s, &sink);
        assert_eq!(unplaced, vec![cells[2]]);
        let diags = sink.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, codes::NON_GROUP_UNPLACED);
        assert_eq!(diags[0].subject, Some(Subject::Cell("u2".into())));
    }
}
