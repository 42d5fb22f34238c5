//! Shared plumbing for the CLI commands: design and config loading.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use tessera_config::{ConfigError, TesseraConfig};
use tessera_dpl::Design;

use crate::GlobalArgs;

/// Name of the configuration file picked up from the working directory.
pub const CONFIG_FILE: &str = "tessera.toml";

/// Reads a JSON design and rebuilds its lookup indices.
pub fn load_design(path: &Path) -> Result<Design, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read design '{}': {e}", path.display()))?;
    let mut design: Design = serde_json::from_str(&text)
        .map_err(|e| format!("invalid design '{}': {e}", path.display()))?;
    design.rebuild_indices();
    Ok(design)
}

/// Writes a design as pretty JSON to `output`, or to stdout when absent.
pub fn write_design(design: &Design, output: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(design)?;
    match output {
        Some(path) => fs::write(path, json + "\n")
            .map_err(|e| format!("cannot write '{}': {e}", path.display()).into()),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

/// Resolves the configuration: `--config` if given, else `tessera.toml` in
/// the working directory, else defaults. `--verbose` enables progress notes.
pub fn resolve_config(global: &GlobalArgs) -> Result<TesseraConfig, ConfigError> {
    let path = match &global.config {
        Some(path) => Some(PathBuf::from(path)),
        None => Some(PathBuf::from(CONFIG_FILE)).filter(|p| p.is_file()),
    };
    let mut config = match path {
        Some(path) => tessera_config::load_config(&path)?,
        None => TesseraConfig::default(),
    };
    if global.verbose {
        config.legalizer.verbose = true;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tessera_common::{Point, Rect};
    use tessera_dpl::{Cell, Macro};

    fn global(config: Option<String>, verbose: bool) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose,
            color: false,
            config,
        }
    }

    #[test]
    fn design_roundtrip_through_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("d.json");
        let mut d = Design::new(Rect::new(0, 0, 4, 2));
        let inv = d.add_macro(Macro::new("INV", 1, 1));
        d.add_cell(Cell::movable("u0", inv, Point::new(1, 1)));

        write_design(&d, Some(&path)).unwrap();
        let back = load_design(&path).unwrap();
        assert_eq!(back.cell_named("u0"), d.cell_named("u0"));
        assert_eq!(back.fingerprint(), d.fingerprint());
    }

    #[test]
    fn missing_design_names_path() {
        let err = load_design(Path::new("/nonexistent/design.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/design.json"));
    }

    #[test]
    fn malformed_design_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        fs::write(&path, "{ \"die\": 3 }").unwrap();
        let err = load_design(&path).unwrap_err();
        assert!(err.to_string().starts_with("invalid design"));
    }

    #[test]
    fn explicit_config_file_is_loaded() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        fs::write(&path, "[legalizer]\nseed = 5\n[surface]\nsearch_radius = 3\n").unwrap();

        let config = resolve_config(&global(Some(path.display().to_string()), true)).unwrap();
        assert_eq!(config.legalizer.seed, 5);
        assert_eq!(config.surface.search_radius, 3);
        assert!(config.legalizer.verbose);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let result = resolve_config(&global(Some("/nonexistent/tessera.toml".into()), false));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
