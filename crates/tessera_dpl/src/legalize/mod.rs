//! The legalization pipeline.
//!
//! [`Legalizer::run`] sequences the passes over one design:
//!
//! 1. region assignment (groups, then density weights for everything),
//! 2. pre-placement snapping of cells straddling group regions,
//! 3. greedy assignment per group, with brick placement for groups that fail,
//! 4. a bounded refine/anneal loop per group,
//! 5. greedy assignment for cells without a group,
//! 6. optionally, one non-group refine and anneal pass.
//!
//! Placement difficulty never aborts the run. Cells that cannot be placed are
//! reported as warnings on the [`DiagnosticSink`] and counted in the
//! [`LegalizeReport`].

mod anneal;
mod brick;
pub mod distance;
mod greedy;
pub mod ordering;
mod preplace;
mod refine;

use crate::data::Design;
use crate::ids::GroupId;
use crate::surface::{PlacementSurface, RegionAssigner};
use greedy::GreedyOutcome;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tessera_config::LegalizerConfig;
use tessera_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Subject};

pub use brick::BrickStrategy;

/// Diagnostic codes emitted by the legalizer.
pub mod codes {
    use tessera_diagnostics::DiagnosticCode;

    /// Group regions and utilizations assigned.
    pub const GROUP_REGIONS_ASSIGNED: DiagnosticCode = DiagnosticCode::info(1);
    /// Density weights assigned.
    pub const NON_GROUP_REGIONS_ASSIGNED: DiagnosticCode = DiagnosticCode::info(2);
    /// Group pre-placement finished.
    pub const GROUP_PRE_PLACED: DiagnosticCode = DiagnosticCode::info(3);
    /// Non-group pre-placement finished.
    pub const NON_GROUP_PRE_PLACED: DiagnosticCode = DiagnosticCode::info(4);
    /// Group placement finished.
    pub const GROUP_PLACED: DiagnosticCode = DiagnosticCode::info(5);
    /// Non-group placement finished.
    pub const NON_GROUP_PLACED: DiagnosticCode = DiagnosticCode::info(6);
    /// Refine/anneal summary for one group.
    pub const GROUP_IMPROVED: DiagnosticCode = DiagnosticCode::info(10);
    /// A group failed greedy assignment and was routed to brick placement.
    pub const GROUP_TO_BRICK: DiagnosticCode = DiagnosticCode::info(20);
    /// Boundary-anchored brick placement left a cell unplaced.
    pub const BRICK_BOUNDARY_FAILED: DiagnosticCode = DiagnosticCode::warning(201);
    /// Region-anchored brick placement left a cell unplaced.
    pub const BRICK_REGION_FAILED: DiagnosticCode = DiagnosticCode::warning(202);
    /// A cell without a group found no legal site.
    pub const NON_GROUP_UNPLACED: DiagnosticCode = DiagnosticCode::warning(203);
}

/// Summary of one legalization run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LegalizeReport {
    /// Movable cells placed at the end of the run.
    pub placed: usize,
    /// Movable cells left unplaced.
    pub unplaced: usize,
    /// Cells frozen by pre-placement.
    pub held: usize,
    /// Groups routed to brick placement, with the strategy used.
    pub fallback_groups: Vec<(String, BrickStrategy)>,
    /// Successful refine moves over all passes.
    pub refine_moves: usize,
    /// Successful swaps over all passes.
    pub swaps: usize,
    /// Warnings emitted during the run.
    pub warnings: usize,
}

/// Drives the legalization passes over a design and its placement surface.
pub struct Legalizer<'a, S> {
    design: &'a mut Design,
    surface: &'a mut S,
    config: &'a LegalizerConfig,
    sink: &'a DiagnosticSink,
    rng: StdRng,
}

impl<'a, S: PlacementSurface + RegionAssigner> Legalizer<'a, S> {
    /// Creates a legalizer over `design`, placing through `surface`.
    pub fn new(
        design: &'a mut Design,
        surface: &'a mut S,
        config: &'a LegalizerConfig,
        sink: &'a DiagnosticSink,
    ) -> Self {
        Self {
            design,
            surface,
            config,
            sink,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Runs the full pipeline and reports what happened.
    pub fn run(mut self) -> LegalizeReport {
        let warnings_before = self.sink.warning_count();
        let mut report = LegalizeReport::default();
        let has_groups = !self.design.groups.is_empty();
        let groups: Vec<GroupId> = self.design.group_ids().collect();

        if has_groups {
            self.surface.assign_group_regions(self.design);
            self.progress(
                codes::GROUP_REGIONS_ASSIGNED,
                format!("assigned regions for {} groups", groups.len()),
            );
        }
        self.surface.assign_non_group_regions(self.design);
        self.progress(
            codes::NON_GROUP_REGIONS_ASSIGNED,
            "assigned density weights".to_string(),
        );

        if has_groups {
            for &group in &groups {
                report.held += preplace::group_pre_placement(self.design, self.surface, group);
            }
            self.progress(
                codes::GROUP_PRE_PLACED,
                format!("group pre-placement froze {} cells", report.held),
            );
            let frozen = preplace::non_group_pre_placement(self.design, self.surface);
            report.held += frozen;
            self.progress(
                codes::NON_GROUP_PRE_PLACED,
                format!("non-group pre-placement froze {frozen} cells"),
            );

            for &group in &groups {
                if let Some(strategy) = self.place_group(group) {
                    let name = self.design.group(group).name.clone();
                    report.fallback_groups.push((name, strategy));
                }
            }
            for &group in &groups {
                let (moves, swaps) = self.improve_group(group);
                report.refine_moves += moves;
                report.swaps += swaps;
            }
            self.progress(
                codes::GROUP_PLACED,
                format!(
                    "placed {} groups, {} through brick placement",
                    groups.len(),
                    report.fallback_groups.len()
                ),
            );
        }

        let unplaced = greedy::place_non_group(self.design, self.surface, self.sink);
        self.progress(
            codes::NON_GROUP_PLACED,
            format!("non-group placement left {} cells unplaced", unplaced.len()),
        );

        if self.config.non_group_improve {
            report.refine_moves += refine::non_group_refine(
                self.design,
                self.surface,
                self.config.non_group_refine_percent,
            );
            self.reseed();
            report.swaps += anneal::non_group_annealing(
                self.design,
                self.surface,
                self.config.non_group_annealing_factor,
                &mut self.rng,
            );
        }

        report.placed = self.design.placed_count();
        report.unplaced = self
            .design
            .cells
            .iter()
            .filter(|c| !c.fixed && !c.is_placed)
            .count();
        report.warnings = self.sink.warning_count() - warnings_before;
        report
    }

    /// Greedily places one group, falling back to brick placement on failure.
    /// Returns the brick strategy when the fallback ran.
    fn place_group(&mut self, group: GroupId) -> Option<BrickStrategy> {
        let GreedyOutcome::Failed { cell, multi_row } =
            greedy::place_group(self.design, self.surface, group)
        else {
            return None;
        };

        let siblings = self.design.group(group).siblings.clone();
        for &sibling in &siblings {
            self.surface.erase(self.design, sibling);
        }

        let g = self.design.group(group);
        let pass = if multi_row { "multi-row" } else { "single-row" };
        self.sink.emit(
            Diagnostic::note(
                codes::GROUP_TO_BRICK,
                "greedy assignment failed, switching to brick placement",
            )
            .with_subject(Subject::Group(g.name.clone()))
            .with_note(format!(
                "no legal site for {pass} cell '{}'",
                self.design.cell(cell).name
            ))
            .with_note(format!("utilization {:.3}", g.util)),
        );

        let outcome = brick::brick_placement(
            self.design,
            self.surface,
            group,
            self.config.brick_utilization_threshold,
            self.sink,
        );
        Some(outcome)
    }

    /// Runs the bounded refine/anneal loop for one group.
    fn improve_group(&mut self, group: GroupId) -> (usize, usize) {
        let config = self.config;
        let design = &mut *self.design;
        let surface = &mut *self.surface;
        let rng = &mut self.rng;
        let tally = improve_rounds(config, || {
            let moves = refine::group_refine(design, surface, group, config.group_refine_percent);
            *rng = StdRng::seed_from_u64(config.seed);
            let swaps = anneal::group_annealing(
                design,
                surface,
                group,
                config.group_annealing_factor,
                rng,
            );
            (moves, swaps)
        });

        let name = self.design.group(group).name.clone();
        self.progress_with(
            Diagnostic::note(
                codes::GROUP_IMPROVED,
                format!(
                    "{} refine moves, {} swaps in {} iterations",
                    tally.moves, tally.swaps, tally.iterations
                ),
            )
            .with_subject(Subject::Group(name)),
        );
        (tally.moves, tally.swaps)
    }

    fn reseed(&mut self) {
        self.rng = StdRng::seed_from_u64(self.config.seed);
    }

    fn progress(&self, code: DiagnosticCode, message: String) {
        self.progress_with(Diagnostic::note(code, message));
    }

    fn progress_with(&self, diag: Diagnostic) {
        if self.config.verbose {
            self.sink.emit(diag);
        }
    }
}

/// Totals of one improvement loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct ImproveTally {
    moves: usize,
    swaps: usize,
    iterations: u32,
}

/// Repeats `round` (one refine pass then one anneal pass, returning their
/// counts) up to `max_improve_iterations` times. Stops after the first round
/// that falls short of either minimum.
fn improve_rounds(
    config: &LegalizerConfig,
    mut round: impl FnMut() -> (usize, usize),
) -> ImproveTally {
    let mut tally = ImproveTally::default();
    while tally.iterations < config.max_improve_iterations {
        tally.iterations += 1;
        let (moves, swaps) = round();
        tally.moves += moves;
        tally.swaps += swaps;
        if moves < config.min_refine_moves || swaps < config.min_annealing_swaps {
            break;
        }
    }
    tally
}
