//! `tessera check`: verify the legality of a placed design.

use std::path::Path;

use serde::Serialize;
use tessera_common::Fingerprint;
use tessera_dpl::{check_placement, DisplacementStats, LegalityReport};

use crate::pipeline::load_design;
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Exit code returned when the placement has violations.
pub const EXIT_ILLEGAL: i32 = 2;

#[derive(Serialize)]
struct JsonCheck<'a> {
    legal: bool,
    violations: &'a LegalityReport,
    displacement: &'a DisplacementStats,
    fingerprint: Fingerprint,
}

/// Runs the `tessera check` command.
///
/// Returns exit code 0 for a legal placement and 2 otherwise.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let design = load_design(Path::new(&args.input))?;
    design.validate()?;

    let report = check_placement(&design);
    let stats = DisplacementStats::from_design(&design);

    match args.format {
        ReportFormat::Text => {
            if !global.quiet || !report.is_legal() {
                print!("{report}");
            }
            if !global.quiet {
                println!("{stats}");
                println!("fingerprint: {}", design.fingerprint());
            }
        }
        ReportFormat::Json => {
            let json = JsonCheck {
                legal: report.is_legal(),
                violations: &report,
                displacement: &stats,
                fingerprint: design.fingerprint(),
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(if report.is_legal() { 0 } else { EXIT_ILLEGAL })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use tessera_common::{Point, Rect};
    use tessera_dpl::{Cell, Design, Macro};

    fn write(dir: &Path, design: &Design) -> String {
        let path = dir.join("placed.json");
        fs::write(&path, serde_json::to_string(design).unwrap()).unwrap();
        path.display().to_string()
    }

    fn args(input: String) -> CheckArgs {
        CheckArgs {
            input,
            format: ReportFormat::Text,
        }
    }

    fn quiet() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: None,
        }
    }

    #[test]
    fn unplaced_design_is_illegal() {
        let tmp = TempDir::new().unwrap();
        let mut d = Design::new(Rect::new(0, 0, 4, 1));
        let inv = d.add_macro(Macro::new("INV", 1, 1));
        d.add_cell(Cell::movable("u0", inv, Point::new(0, 0)));

        let code = run(&args(write(tmp.path(), &d)), &quiet()).unwrap();
        assert_eq!(code, EXIT_ILLEGAL);
    }

    #[test]
    fn legalized_design_passes() {
        let tmp = TempDir::new().unwrap();
        let mut d = Design::new(Rect::new(0, 0, 4, 1));
        let inv = d.add_macro(Macro::new("INV", 1, 1));
        for i in 0..3 {
            d.add_cell(Cell::movable(format!("u{i}"), inv, Point::new(1, 0)));
        }
        let sink = tessera_diagnostics::DiagnosticSink::new();
        tessera_dpl::legalize(&mut d, &Default::default(), &sink).unwrap();

        let mut check = args(write(tmp.path(), &d));
        check.format = ReportFormat::Json;
        assert_eq!(run(&check, &quiet()).unwrap(), 0);
    }
}
