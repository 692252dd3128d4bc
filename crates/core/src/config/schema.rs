//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigSchema {
    /// `[repository]`: where translations live
    #[serde(default)]
    pub repository: RepositoryConfig,

    /// `[platform]`: how the translation client is invoked
    #[serde(default)]
    pub platform: PlatformConfig,

    /// `[commit]`: messages of the sync commits
    #[serde(default)]
    pub commit: CommitConfig,
}

impl ConfigSchema {
    /// Check values that serde accepts but the sync workflow cannot use
    pub fn validate(&self) -> Result<()> {
        let dir = &self.repository.translations_dir;
        if dir.as_os_str().is_empty() {
            return Err(Error::config_invalid("repository.translations_dir must not be empty"));
        }
        if dir.is_absolute() || dir.components().any(|c| c == Component::ParentDir) {
            return Err(Error::config_invalid(format!(
                "repository.translations_dir must be relative to the repository root: {}",
                dir.display()
            )));
        }

        if self.platform.program.trim().is_empty() {
            return Err(Error::config_invalid("platform.program must not be empty"));
        }

        let pull = self.commit.pull_message.trim();
        let push = self.commit.push_message.trim();
        if pull.is_empty() || push.is_empty() {
            return Err(Error::config_invalid("commit messages must not be empty"));
        }
        if pull == push {
            return Err(Error::config_invalid(
                "commit.pull_message and commit.push_message must differ",
            )
            .with_suggestion("Use distinct messages so the two sync commits can be told apart"));
        }

        Ok(())
    }
}

/// Repository layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    /// Directory holding one translation file per language
    #[serde(default = "default_translations_dir")]
    pub translations_dir: PathBuf,

    /// Checkout of a related project that must sit next to this one
    #[serde(default)]
    pub sibling_checkout: Option<String>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            translations_dir: default_translations_dir(),
            sibling_checkout: None,
        }
    }
}

impl RepositoryConfig {
    /// Resolve the sibling checkout against the repository root, expanding `~`
    #[must_use]
    pub fn sibling_checkout_path(&self, root: &Path) -> Option<PathBuf> {
        let raw = self.sibling_checkout.as_deref()?;
        let path = PathBuf::from(shellexpand::tilde(raw).as_ref());
        if path.is_absolute() {
            Some(path)
        } else {
            Some(root.join(path))
        }
    }
}

fn default_translations_dir() -> PathBuf {
    PathBuf::from("po")
}

/// Translation platform client invocation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PlatformConfig {
    /// Client program, looked up on PATH
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments that download translations into the working tree
    #[serde(default = "default_pull_args")]
    pub pull_args: Vec<String>,

    /// Arguments that upload the current source strings
    #[serde(default = "default_push_args")]
    pub push_args: Vec<String>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            pull_args: default_pull_args(),
            push_args: default_push_args(),
        }
    }
}

fn default_program() -> String {
    "tx".to_string()
}

fn default_pull_args() -> Vec<String> {
    vec!["pull", "--all", "--force"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_push_args() -> Vec<String> {
    vec!["push", "--source"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Fixed commit messages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CommitConfig {
    /// Message for the commit after the initial pull
    #[serde(default = "default_pull_message")]
    pub pull_message: String,

    /// Message for the commit after pushing source strings and re-pulling
    #[serde(default = "default_push_message")]
    pub push_message: String,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            pull_message: default_pull_message(),
            push_message: default_push_message(),
        }
    }
}

fn default_pull_message() -> String {
    "Update translations from translation platform".to_string()
}

fn default_push_message() -> String {
    "Refresh translations after pushing source strings".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_defaults_are_valid() {
        let schema = ConfigSchema::default();
        assert!(schema.validate().is_ok());
        assert_eq!(schema.repository.translations_dir, PathBuf::from("po"));
        assert_eq!(schema.platform.program, "tx");
        assert_ne!(schema.commit.pull_message, schema.commit.push_message);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [repository]
            translations_dir = "locale"

            [platform]
            push_args = ["push", "-s", "--skip"]
            "#,
        )
        .unwrap();

        assert_eq!(schema.repository.translations_dir, PathBuf::from("locale"));
        assert_eq!(schema.platform.program, "tx");
        assert_eq!(schema.platform.push_args, vec!["push", "-s", "--skip"]);
        assert_eq!(schema.commit, CommitConfig::default());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: std::result::Result<ConfigSchema, _> =
            toml::from_str("[repository]\ntranslation_dir = \"po\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_absolute_translations_dir_rejected() {
        let mut schema = ConfigSchema::default();
        schema.repository.translations_dir = PathBuf::from("/srv/po");
        let err = schema.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);

        schema.repository.translations_dir = PathBuf::from("../po");
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_identical_commit_messages_rejected() {
        let mut schema = ConfigSchema::default();
        schema.commit.push_message = schema.commit.pull_message.clone();
        let err = schema.validate().unwrap_err();
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_sibling_checkout_resolution() {
        let root = Path::new("/work/app");
        let mut repo = RepositoryConfig::default();
        assert_eq!(repo.sibling_checkout_path(root), None);

        repo.sibling_checkout = Some("../website".to_string());
        assert_eq!(
            repo.sibling_checkout_path(root),
            Some(PathBuf::from("/work/app/../website"))
        );

        repo.sibling_checkout = Some("/opt/website".to_string());
        assert_eq!(
            repo.sibling_checkout_path(root),
            Some(PathBuf::from("/opt/website"))
        );
    }
}
