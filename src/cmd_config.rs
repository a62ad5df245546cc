//! Configuration loading and the `check-config` subcommand.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use tracing::{info, warn};

use editor_bridge_config::{BridgeConfig, ConfigLoader, ConfigValidator, ValidationResult};

/// Load the configuration used by `replay` and `locate`. An explicit path
/// must exist; the default path may be absent.
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<BridgeConfig> {
    let config = match path {
        Some(path) => {
            let path = expand(path);
            ConfigLoader::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => ConfigLoader::load_or_default(&ConfigLoader::default_path())
            .context("Failed to load default config")?,
    };

    let result = ConfigValidator::validate(&config);
    for warning in &result.warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }
    if !result.is_valid() {
        bail!(describe(&result));
    }
    Ok(config)
}

/// Handle `check-config`.
pub(crate) fn handle_check_config(path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = path
        .map(|p| expand(&p))
        .unwrap_or_else(ConfigLoader::default_path);
    let config = ConfigLoader::load(&path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    let result = ConfigValidator::validate(&config);

    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }
    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }

    if !result.is_valid() {
        bail!(describe(&result));
    }
    info!(path = %path.display(), warnings = result.warnings.len(), "Configuration is valid");
    println!("{}: ok", path.display());
    Ok(())
}

/// Expand `~` in a user-supplied path.
fn expand(path: &Path) -> PathBuf {
    PathBuf::from(ConfigLoader::expand_path(&path.to_string_lossy()))
}

fn describe(result: &ValidationResult) -> String {
    let details: Vec<String> = result
        .errors
        .iter()
        .map(|e| format!("{}: {}", e.path, e.message))
        .collect();
    format!(
        "Configuration has {} error(s): {}",
        result.errors.len(),
        details.join("; ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_config_from_path() {
        let file = config_file("[selector]\nmax_classes = 1\n");
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.selector.max_classes, 1);
        assert_eq!(config.selector.max_depth, 4);
    }

    #[test]
    fn test_load_config_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing)).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let file = config_file("[selector]\nmax_depth = 0\n\n[overlay]\nmarker_attribute = \"\"\n");
        let err = load_config(Some(file.path())).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("2 error(s)"), "{message}");
        assert!(message.contains("selector.max_depth"), "{message}");
    }

    #[test]
    fn test_load_config_expands_tilde() {
        let Some(home) = std::env::var_os("HOME").map(PathBuf::from) else {
            return;
        };
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile_in(&home)
            .unwrap();
        file.write_all(b"[selector]\nmax_classes = 3\n").unwrap();
        let name = file.path().file_name().unwrap().to_string_lossy().into_owned();

        let tilde_path = PathBuf::from(format!("~/{name}"));
        let config = load_config(Some(&tilde_path)).unwrap();
        assert_eq!(config.selector.max_classes, 3);
        assert!(handle_check_config(Some(tilde_path)).is_ok());
    }

    #[test]
    fn test_check_config_valid_file() {
        let file = config_file("[messaging]\ntarget_origin = \"https://controller.example\"\n");
        assert!(handle_check_config(Some(file.path().to_path_buf())).is_ok());
    }

    #[test]
    fn test_check_config_invalid_file() {
        let file = config_file("[overlay]\npopover_width = -1.0\n");
        assert!(handle_check_config(Some(file.path().to_path_buf())).is_err());
    }
}
