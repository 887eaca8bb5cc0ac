//! Project configuration: `.spec_agent/config.yaml`.
//!
//! ```yaml
//! roots:
//!   - internal/controllers
//!   - cmd
//! ```
//!
//! `roots` are *search* roots: directories scanned for spec files. They are unrelated to the
//! root specs of the dependency graph, which are derived from the links between specs.

use serde::{Deserialize, Serialize};
use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use crate::error::SpecError;

/// Directory holding configuration, assets and build output, relative to the project.
pub const CONFIG_DIR: &str = ".spec_agent";

/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yaml";

/// Export directory name inside [`CONFIG_DIR`].
pub const BUILD_DIR: &str = "build";

/// Directory for change plans, created next to [`CONFIG_DIR`] by `init`.
pub const CHANGES_DIR: &str = "spec_changes";

/// Search roots written by `init`.
pub const DEFAULT_ROOTS: &[&str] = &["internal/controllers", "cmd"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecConfig {
    #[serde(default)]
    pub roots: Vec<PathBuf>,
}

impl SpecConfig {
    pub fn from_yaml(text: &str) -> Result<Self, SpecError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Fail unless at least one search root is declared.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.roots.is_empty() {
            return Err(SpecError::Config(format!(
                "no roots declared in {CONFIG_FILE}"
            )));
        }
        Ok(())
    }

    /// Search roots, with relative entries resolved against `project_dir`.
    pub fn search_roots(&self, project_dir: &Path) -> Vec<PathBuf> {
        self.roots
            .iter()
            .map(|root| {
                if root.is_absolute() {
                    root.clone()
                } else {
                    project_dir.join(root)
                }
            })
            .collect()
    }

    /// YAML text of the configuration written by `init`.
    pub fn default_yaml() -> String {
        let mut text = String::from("roots:\n");
        for root in DEFAULT_ROOTS {
            text.push_str("  - ");
            text.push_str(root);
            text.push('\n');
        }
        text
    }
}

/// Location of the configuration file for a project directory.
pub fn config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Default export directory for a project directory.
pub fn build_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(CONFIG_DIR).join(BUILD_DIR)
}

pub trait ConfigProvider {
    fn load(&self) -> Result<SpecConfig, SpecError>;

    /// Directory that relative search roots are resolved against.
    fn project_dir(&self) -> &Path;
}

/// Reads `.spec_agent/config.yaml` from a project directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YamlConfigProvider {
    project_dir: PathBuf,
}

impl YamlConfigProvider {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        YamlConfigProvider {
            project_dir: project_dir.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        config_path(&self.project_dir)
    }
}

impl ConfigProvider for YamlConfigProvider {
    fn load(&self) -> Result<SpecConfig, SpecError> {
        let path = self.path();
        tracing::debug!("Attempting to read config from: {:?}", &path);
        let content = read_to_string(&path).map_err(|e| {
            SpecError::Config(format!("could not load {}: {e}", path.display()))
        })?;
        SpecConfig::from_yaml(&content)
    }

    fn project_dir(&self) -> &Path {
        &self.project_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_roots_and_ignores_unknown_keys() {
        let config = SpecConfig::from_yaml("roots:\n  - cmd\n  - /abs/specs\nextra: 1\n").unwrap();
        assert_eq!(
            config.roots,
            vec![PathBuf::from("cmd"), PathBuf::from("/abs/specs")]
        );
        assert_eq!(
            config.search_roots(Path::new("/project")),
            vec![PathBuf::from("/project/cmd"), PathBuf::from("/abs/specs")]
        );
    }

    #[test]
    fn missing_roots_fail_validation() {
        let config = SpecConfig::from_yaml("other: true\n").unwrap();
        assert!(config.roots.is_empty());
        assert!(matches!(config.validate(), Err(SpecError::Config(_))));
    }

    #[test]
    fn malformed_yaml_is_a_serialization_error() {
        let err = SpecConfig::from_yaml("roots: [unclosed").unwrap_err();
        assert!(matches!(err, SpecError::Serialization(_)));
    }

    #[test]
    fn default_yaml_round_trips() {
        let config = SpecConfig::from_yaml(&SpecConfig::default_yaml()).unwrap();
        assert_eq!(
            config.roots,
            DEFAULT_ROOTS.iter().map(PathBuf::from).collect::<Vec<_>>()
        );
    }

    #[test]
    fn provider_reports_missing_config() {
        let dir = tempdir().unwrap();
        let provider = YamlConfigProvider::new(dir.path());
        assert!(matches!(provider.load(), Err(SpecError::Config(_))));

        std::fs::create_dir_all(dir.path().join(CONFIG_DIR)).unwrap();
        std::fs::write(provider.path(), "roots:\n  - specs\n").unwrap();
        let config = provider.load().unwrap();
        assert_eq!(config.roots, vec![PathBuf::from("specs")]);
        assert_eq!(provider.project_dir(), dir.path());
    }
}
