use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration from `.skyline.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Overrides for snapshot project metadata. Unset fields fall back to the
/// project manifest (`package.json`), then to defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "typescript".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            language: default_language(),
        }
    }
}

/// Substring filters applied to root-relative paths during discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Paths must start with one of these; empty accepts everything.
    #[serde(default)]
    pub include: Vec<String>,
    /// Paths containing any of these are skipped; matching directories are
    /// never descended into.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

fn default_exclude() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        ".git".to_string(),
        "dist".to_string(),
        "build".to_string(),
        "coverage".to_string(),
    ]
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: default_exclude(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
}

fn default_output_path() -> String {
    "uml-snapshot.json".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl Config {
    /// Load configuration from a `.skyline.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "failed to parse '{}'. Run `skyline init` to create a valid config file",
                path.display()
            )
        })?;
        Ok(config)
    }

    /// Load from `.skyline.toml` in the given directory or any ancestor, or
    /// return defaults.
    pub fn load_or_default(dir: &Path) -> Self {
        let start = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        let mut current = start.as_path();
        loop {
            let config_path = current.join(".skyline.toml");
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => config,
                    Err(e) => {
                        eprintln!(
                            "Warning: failed to load config from '{}': {e:#}. Using defaults.",
                            config_path.display()
                        );
                        Self::default()
                    }
                };
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        Self::default()
    }

    /// Generate default TOML content for `skyline init`.
    pub fn default_toml() -> String {
        r#"# Skyline - UML snapshot generator configuration

[project]
# Override the name/description read from package.json
# name = "My Project"
# description = "What this project does"
language = "typescript"

[scan]
# Root-relative path prefixes to analyze; empty = the whole tree
include = []
# Path substrings to skip entirely (matching directories are not descended)
exclude = ["node_modules", ".git", "dist", "build", "coverage"]

[output]
path = "uml-snapshot.json"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.scan.include.is_empty());
        assert!(config.scan.exclude.contains(&"node_modules".to_string()));
        assert_eq!(config.output.path, "uml-snapshot.json");
        assert_eq!(config.project.language, "typescript");
    }

    #[test]
    fn test_default_toml_round_trips() {
        let config: Config = toml::from_str(&Config::default_toml()).unwrap();
        assert_eq!(config.project.language, "typescript");
        assert!(config.scan.exclude.contains(&"dist".to_string()));
    }

    #[test]
    fn test_load_or_default_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(tmp.path());
        assert_eq!(config.output.path, "uml-snapshot.json");
    }

    #[test]
    fn test_load_or_default_from_ancestor() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(".skyline.toml"),
            "[scan]\ninclude = [\"src\"]\n",
        )
        .unwrap();
        let nested = tmp.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        let config = Config::load_or_default(&nested);
        assert_eq!(config.scan.include, vec!["src".to_string()]);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[project]\nname = \"x\"\n").unwrap();
        assert_eq!(config.project.name.as_deref(), Some("x"));
        assert!(config.scan.exclude.contains(&"node_modules".to_string()));
    }
}
