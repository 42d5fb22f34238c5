//! Tessera CLI, the command-line front end of the placement legalizer.
//!
//! Provides `tessera legalize` to legalize a JSON design and `tessera check`
//! to verify an existing placement.

#![warn(missing_docs)]

mod check;
mod legalize;
mod pipeline;

use std::io::IsTerminal;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Tessera: detailed-placement legalization for standard-cell layouts.
#[derive(Parser, Debug)]
#[command(name = "tessera", version, about = "Tessera placement legalizer")]
pub struct Cli {
    /// Print only diagnostics and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Also print legalizer progress notes (I001-I010).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// When to color diagnostics.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Configuration file to use instead of `./tessera.toml`.
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Legalize the placement of a design.
    Legalize(LegalizeArgs),
    /// Check a placement for legality.
    Check(CheckArgs),
}

/// Arguments for the `tessera legalize` subcommand.
#[derive(Parser, Debug)]
pub struct LegalizeArgs {
    /// Design file (JSON).
    pub input: String,

    /// Output path for the legalized design (stdout when omitted).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format for diagnostics and the run summary.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `tessera check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Design file (JSON).
    pub input: String,

    /// Output format for the legality report.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// `--color` setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal.
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => std::io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// How results are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Plain text for a terminal.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Flags shared by every subcommand, resolved once in `main`.
pub struct GlobalArgs {
    /// `--quiet`.
    pub quiet: bool,
    /// `--verbose`.
    pub verbose: bool,
    /// `--color`, resolved against the terminal.
    pub color: bool,
    /// `--config`.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color: cli.color.enabled(),
        config: cli.config,
    };

    let outcome = match &cli.command {
        Command::Legalize(args) => legalize::run(args, &global),
        Command::Check(args) => check::run(args, &global),
    };
    let code = outcome.unwrap_or_else(|e| {
        eprintln!("error: {e}");
        1
    });
    process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_legalize_default() {
        let cli = Cli::parse_from(["tessera", "legalize", "design.json"]);
        match cli.command {
            Command::Legalize(ref args) => {
                assert_eq!(args.input, "design.json");
                assert!(args.output.is_none());
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("expected Legalize command"),
        }
    }

    #[test]
    fn parse_legalize_with_args() {
        let cli = Cli::parse_from([
            "tessera",
            "legalize",
            "in.json",
            "-o",
            "out.json",
            "--format",
            "json",
        ]);
        match cli.command {
            Command::Legalize(ref args) => {
                assert_eq!(args.output.as_deref(), Some("out.json"));
                assert_eq!(args.format, ReportFormat::Json);
            }
            _ => panic!("expected Legalize command"),
        }
    }

    #[test]
    fn parse_check() {
        let cli = Cli::parse_from(["tessera", "check", "placed.json"]);
        match cli.command {
            Command::Check(ref args) => assert_eq!(args.input, "placed.json"),
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["tessera", "--quiet", "--color", "never", "check", "a.json"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["tessera", "legalize", "a.json", "--verbose"]);
        assert!(cli.verbose);
        assert_eq!(cli.color, ColorChoice::Auto);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from(["tessera", "--config", "/path/to/tessera.toml", "check", "a.json"]);
        assert_eq!(cli.config.as_deref(), Some("/path/to/tessera.toml"));
    }

    #[test]
    fn missing_input_is_rejected() {
        assert!(Cli::try_parse_from(["tessera", "legalize"]).is_err());
    }
}
