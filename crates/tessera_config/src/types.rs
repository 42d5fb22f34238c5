//! Configuration types deserialized from `tessera.toml`.

use serde::{Deserialize, Serialize};

/// The top-level configuration parsed from `tessera.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TesseraConfig {
    /// Legalization pipeline tuning.
    #[serde(default)]
    pub legalizer: LegalizerConfig,
    /// Placement surface search parameters.
    #[serde(default)]
    pub surface: SurfaceConfig,
}

/// Tuning knobs of the legalization pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegalizerConfig {
    /// Fraction of a group's siblings (highest displacement first) given a refine move.
    pub group_refine_percent: f64,
    /// Fraction of the non-group population given a refine move.
    pub non_group_refine_percent: f64,
    /// Groups with utilization strictly above this use boundary-anchored brick placement.
    pub brick_utilization_threshold: f64,
    /// Upper bound on refine/anneal iterations per group.
    pub max_improve_iterations: u32,
    /// A group's improvement loop stops once a refine pass moves fewer cells than this.
    pub min_refine_moves: usize,
    /// A group's improvement loop stops once an annealing pass swaps fewer pairs than this.
    pub min_annealing_swaps: usize,
    /// Annealing trials per group sibling.
    pub group_annealing_factor: usize,
    /// Annealing trials per design cell for the non-group pass.
    pub non_group_annealing_factor: usize,
    /// Seed the annealer's generator is reset to at every invocation.
    pub seed: u64,
    /// Chain a non-group refine and anneal pass after non-group placement.
    pub non_group_improve: bool,
    /// Emit progress notes for each pipeline phase.
    pub verbose: bool,
}

impl Default for LegalizerConfig {
    fn default() -> Self {
        Self {
            group_refine_percent: 0.05,
            non_group_refine_percent: 0.02,
            brick_utilization_threshold: 0.95,
            max_improve_iterations: 3,
            min_refine_moves: 10,
            min_annealing_swaps: 100,
            group_annealing_factor: 1000,
            non_group_annealing_factor: 100,
            seed: 777,
            non_group_improve: false,
            verbose: false,
        }
    }
}

/// Search parameters of the site-grid placement surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurfaceConfig {
    /// Manhattan radius, in sites/rows, searched by a regular map move.
    pub search_radius: i32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self { search_radius: 32 }
    }
}
