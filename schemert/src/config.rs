//! Configuration for `schemert`: REPL prompt text, whether to echo the
//! value of non-`define` top-level forms, and a default search path for
//! `schemert run`. A `serde`+`toml`+`dirs` config struct with a
//! `#[serde(default = "...")]` on every field so a partial config file
//! still parses.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemertError};

/// Default configuration file name, resolved under `dirs::config_dir()`.
pub const CONFIG_FILE_NAME: &str = "schemert.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Prompt text shown before reading each REPL form.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Whether `schemert run` prints the value of every non-`define`
    /// top-level form, not just REPL input.
    #[serde(default)]
    pub echo_values: bool,

    /// Directories searched for a bare filename passed to `schemert run`
    /// or `schemert check` when it isn't found relative to the current
    /// directory.
    #[serde(default)]
    pub search_path: Vec<PathBuf>,
}

fn default_prompt() -> String {
    "schemer> ".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            echo_values: false,
            search_path: Vec::new(),
        }
    }
}

impl Config {
    /// Loads configuration from `dirs::config_dir()/schemert/schemert.toml`,
    /// falling back to defaults if the file doesn't exist.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SchemertError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content)
            .map_err(|e| SchemertError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("schemert").join(CONFIG_FILE_NAME))
    }

    /// Resolves `name` against the current directory first, then each
    /// entry of [`Config::search_path`] in order.
    pub fn resolve(&self, name: &Path) -> PathBuf {
        if name.exists() {
            return name.to_path_buf();
        }
        for dir in &self.search_path {
            let candidate = dir.join(name);
            if candidate.exists() {
                return candidate;
            }
        }
        name.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_a_prompt_and_no_echo() {
        let config = Config::default();
        assert_eq!(config.prompt, "schemer> ");
        assert!(!config.echo_values);
        assert!(config.search_path.is_empty());
    }

    #[test]
    fn load_from_path_parses_a_partial_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schemert.toml");
        std::fs::write(&path, "echo_values = true\n").unwrap();
        let config = Config::load_from_path(&path).unwrap();
        assert!(config.echo_values);
        assert_eq!(config.prompt, "schemer> ");
    }

    #[test]
    fn load_from_path_reports_missing_files() {
        let result = Config::load_from_path(Path::new("/nonexistent/schemert.toml"));
        assert!(matches!(result, Err(SchemertError::Io { .. })));
    }

    #[test]
    fn resolve_prefers_an_existing_relative_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.scm");
        std::fs::write(&file, "()").unwrap();
        let config = Config::default();
        assert_eq!(config.resolve(&file), file);
    }

    #[test]
    fn resolve_falls_back_to_the_search_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("lib.scm"), "()").unwrap();
        let config = Config {
            search_path: vec![dir.path().to_path_buf()],
            ..Config::default()
        };
        let resolved = config.resolve(Path::new("lib.scm"));
        assert_eq!(resolved, dir.path().join("lib.scm"));
    }
}
