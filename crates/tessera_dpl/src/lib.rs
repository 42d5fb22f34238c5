//! Detailed-placement legalization for standard-cell layouts.
//!
//! Takes a [`Design`] whose cells sit at their global-placement coordinates
//! and moves every movable cell onto a legal site: grid-aligned, free of
//! overlaps and fixed obstacles, and inside its group's regions if it has a
//! group. Displacement from the original coordinates is kept small.
//!
//! # Pipeline
//!
//! 1. **Region assignment**: group boundaries, utilizations, and per-cell
//!    regions; density weights for ordering
//! 2. **Pre-placement**: snap cells straddling group regions and freeze them
//! 3. **Greedy assignment**: per group, then for the remaining cells; large
//!    and multi-row cells first
//! 4. **Brick placement**: fallback packing for groups greedy assignment failed
//! 5. **Improvement**: displacement-percentile refinement and seeded random
//!    pairwise swaps
//!
//! # Usage
//!
//! ```ignore
//! use tessera_dpl::{legalize, check_placement};
//!
//! let report = legalize(&mut design, &config, &sink)?;
//! assert!(check_placement(&design).is_legal());
//! ```

#![warn(missing_docs)]

pub mod check;
pub mod data;
pub mod error;
pub mod grid;
pub mod ids;
pub mod legalize;
pub mod surface;

pub use check::{check_placement, DisplacementStats, LegalityReport};
pub use data::{Cell, Design, Group, Macro};
pub use error::DesignError;
pub use grid::SiteGrid;
pub use ids::{CellId, GroupId, MacroId};
pub use legalize::{BrickStrategy, LegalizeReport, Legalizer};
pub use surface::{PlacementSurface, RegionAssigner};

use tessera_config::TesseraConfig;
use tessera_diagnostics::DiagnosticSink;

/// Legalizes `design` in place on a [`SiteGrid`] built from it.
///
/// Validates the design, registers fixed and pre-placed cells, and runs the
/// full pipeline. Only a malformed design is an error; cells that cannot be
/// placed are reported as warnings on `sink` and counted in the report.
pub fn legalize(
    design: &mut Design,
    config: &TesseraConfig,
    sink: &DiagnosticSink,
) -> Result<LegalizeReport, DesignError> {
    design.validate()?;
    let mut grid = SiteGrid::new(design, &config.surface)?;
    Ok(Legalizer::new(design, &mut grid, &config.legalizer, sink).run())
}
