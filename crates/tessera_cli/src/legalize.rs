//! `tessera legalize`: legalize a JSON design.
//!
//! 1. Resolve `tessera.toml` (or `--config`)
//! 2. Load the design
//! 3. Run the legalizer
//! 4. Write the legalized design
//! 5. Render diagnostics and the run summary

use std::path::Path;

use serde::Serialize;
use tessera_common::Fingerprint;
use tessera_diagnostics::{Diagnostic, DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use tessera_dpl::{DisplacementStats, LegalizeReport};

use crate::pipeline::{load_design, resolve_config, write_design};
use crate::{GlobalArgs, LegalizeArgs, ReportFormat};

/// Machine-readable summary printed with `--format json`.
#[derive(Serialize)]
struct JsonSummary<'a> {
    report: &'a LegalizeReport,
    displacement: &'a DisplacementStats,
    fingerprint: Fingerprint,
    diagnostics: &'a [Diagnostic],
}

/// Runs the `tessera legalize` command.
///
/// Returns exit code 0 once legalization completes, even if some cells
/// remain unplaced; those are reported as warnings.
pub fn run(args: &LegalizeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(global)?;
    let mut design = load_design(Path::new(&args.input))?;

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!(
            "  Legalizing {} ({} cells, {} groups)",
            args.input,
            design.cell_count(),
            design.groups.len()
        );
    }

    let sink = DiagnosticSink::new();
    let report = tessera_dpl::legalize(&mut design, &config, &sink)?;
    write_design(&design, args.output.as_deref().map(Path::new))?;

    let diagnostics = sink.take_all();
    let stats = DisplacementStats::from_design(&design);
    let fingerprint = design.fingerprint();

    match args.format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color);
            for diag in &diagnostics {
                eprint!("{}", renderer.render(diag));
            }
            if !global.quiet {
                eprintln!(
                    "   Result: {} placed, {} unplaced, {} held, {} warning(s)",
                    report.placed, report.unplaced, report.held, report.warnings
                );
                for (group, strategy) in &report.fallback_groups {
                    eprintln!("   Brick placement: group {group} ({strategy:?})");
                }
                eprintln!(
                    "   Improvement: {} refine moves, {} swaps",
                    report.refine_moves, report.swaps
                );
                eprintln!("   {stats}");
                eprintln!("   Fingerprint: {fingerprint}");
            }
        }
        ReportFormat::Json => {
            let summary = JsonSummary {
                report: &report,
                displacement: &stats,
                fingerprint,
                diagnostics: &diagnostics,
            };
            let json = serde_json::to_string_pretty(&summary)?;
            // stdout carries the design when no output file is given
            if args.output.is_some() {
                println!("{json}");
            } else {
                eprintln!("{json}");
            }
        }
    }

    Ok(0)
}
