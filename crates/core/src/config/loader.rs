//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-repository config file names, checked in order under the repository root
const CANDIDATES: &[&str] = &[".transync.toml", "transync.toml", ".config/transync.toml"];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed and validated settings
    pub schema: ConfigSchema,
    /// File the settings came from, `None` for built-in defaults
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration for the repository at `root`
    ///
    /// An explicit path must exist. Otherwise the repository candidates and
    /// then the user config directory are searched, falling back to defaults.
    pub fn load(explicit: Option<&Path>, root: &Path) -> Result<Self> {
        let config_path = match explicit {
            Some(p) if !p.is_file() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(root),
        };

        let schema = match &config_path {
            Some(p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };
        schema.validate()?;

        debug!(
            path = %config_path.as_deref().map_or_else(|| "<defaults>".into(), |p| p.display().to_string()),
            "loaded configuration"
        );
        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

/// Find configuration file in standard locations
fn find_config_file(root: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .chain(dirs::config_dir().map(|dir| dir.join("transync").join("config.toml")))
        .find(|path| path.is_file())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::fs;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.platform.program, "tx");
    }

    #[test]
    fn test_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load(Some(&missing), dir.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_repository_candidate_is_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".transync.toml"),
            "[repository]\ntranslations_dir = \"locales\"\n",
        )
        .unwrap();

        let config = Config::load(None, dir.path()).unwrap();
        assert_eq!(config.path, Some(dir.path().join(".transync.toml")));
        assert_eq!(
            config.schema.repository.translations_dir,
            PathBuf::from("locales")
        );
    }

    #[test]
    fn test_explicit_file_wins_over_candidates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".transync.toml"), "[platform]\nprogram = \"a\"\n").unwrap();
        let explicit = dir.path().join("other.toml");
        fs::write(&explicit, "[platform]\nprogram = \"b\"\n").unwrap();

        let config = Config::load(Some(&explicit), dir.path()).unwrap();
        assert_eq!(config.schema.platform.program, "b");
    }

    #[test]
    fn test_invalid_toml_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[platform\nprogram = ").unwrap();

        let err = Config::load(Some(&path), dir.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.context.unwrap().contains("bad.toml"));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[platform]\nprogram = \"\"\n").unwrap();

        let err = Config::load(Some(&path), dir.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
    }
}
