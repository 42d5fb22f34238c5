//! Brick placement, the fallback for groups greedy assignment could not place.
//!
//! Siblings are packed in order of their distance to an anchor rectangle and
//! each is placed at its anchor corner. Near-saturated groups anchor against
//! the group boundary; others anchor against each cell's own region. Failures
//! are warnings; the pass always runs to completion.

use crate::data::Design;
use crate::ids::{CellId, GroupId};
use crate::legalize::codes;
use crate::legalize::distance::cell_anchor;
use crate::surface::PlacementSurface;
use serde::Serialize;
use tessera_common::Rect;
use tessera_diagnostics::{Diagnostic, DiagnosticSink, Subject};

/// How a failed group is packed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum BrickStrategy {
    /// Anchor every sibling against the group's bounding rectangle.
    BoundaryAnchored,
    /// Anchor each sibling against its assigned region.
    RegionAnchored,
}

impl BrickStrategy {
    /// Selects the strategy for a group; utilization exactly at the threshold
    /// stays region-anchored.
    pub fn for_utilization(util: f64, threshold: f64) -> Self {
        if util > threshold {
            BrickStrategy::BoundaryAnchored
        } else {
            BrickStrategy::RegionAnchored
        }
    }
}

/// Runs brick placement over every sibling of `group` and returns the
/// strategy it used. Cells left unplaced are reported on `sink`.
pub(crate) fn brick_placement<S: PlacementSurface>(
    design: &mut Design,
    surface: &mut S,
    group: GroupId,
    threshold: f64,
    sink: &DiagnosticSink,
) -> BrickStrategy {
    let g = design.group(group);
    let strategy = BrickStrategy::for_utilization(g.util, threshold);
    let boundary = g.boundary;
    let util = g.util;

    let anchor_rect = |design: &Design, cell: CellId| -> Rect {
        match strategy {
            BrickStrategy::BoundaryAnchored => boundary,
            BrickStrategy::RegionAnchored => design.assigned_region(cell).unwrap_or(boundary),
        }
    };

    let mut order = g.siblings.clone();
    order.sort_by_key(|&c| cell_anchor(design, c, &anchor_rect(design, c)).dist);

    for cell in order {
        let c = design.cell(cell);
        if c.hold || c.fixed || c.is_placed {
            continue;
        }
        let target = cell_anchor(design, cell, &anchor_rect(design, cell)).target;
        if surface.map_move_to(design, cell, target) {
            continue;
        }

        let (code, what) = match strategy {
            BrickStrategy::BoundaryAnchored => (codes::BRICK_BOUNDARY_FAILED, "boundary"),
            BrickStrategy::RegionAnchored => (codes::BRICK_REGION_FAILED, "region"),
        };
        sink.emit(
            Diagnostic::warning(
                code,
                format!("brick placement failed to place cell near {what} anchor {target}"),
            )
            .with_subject(Subject::Cell(design.cell(cell).name.clone()))
            .with_note(format!(
                "group '{}' has utilization {util:.3}",
                design.group(group).name
            )),
        );
    }
    strategy
}
