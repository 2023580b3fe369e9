//! Configuration loading for the LSP engine
//!
//! Loads settings from YAML configuration files.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use unitsense::EngineOptions;

/// Configuration file names, in lookup order
pub const CONFIG_FILES: [&str; 4] = [".unit-lsp.yaml", ".unit-lsp.yml", "unit-lsp.yaml", "unit-lsp.yml"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {file}: {source}")]
    Read {
        file: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {file}: {source}")]
    Parse {
        file: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Main engine configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine settings
    pub engine: EngineSettings,
    /// Completion behavior
    pub completion: CompletionSettings,
    /// Custom catalog discovery
    pub catalog: CatalogSettings,
    /// Unit file extensions handled by the server (without the dot).
    /// `.conf` files in a `<name>.<extension>.d` drop-in directory count too.
    pub extensions: Vec<String>,
    /// Client language ids handled regardless of the file name
    pub language_ids: Vec<String>,
}

/// Core engine settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Server name
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Look for a custom catalog in the workspace
    pub workspace_discovery: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    pub trigger_characters: Vec<String>,
    /// Truncate completion lists (unlimited if unset)
    pub max_items: Option<usize>,
    pub filter_values: bool,
    pub match_sections_to_file: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Catalog files to try, relative to the workspace root
    pub search_paths: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            name: "unit-lsp".to_string(),
            log_level: "info".to_string(),
            workspace_discovery: true,
        }
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            trigger_characters: vec!["=".to_string()],
            max_items: None,
            filter_values: false,
            match_sections_to_file: false,
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            search_paths: vec![
                ".unitkb.yaml".to_string(),
                ".unitkb.json".to_string(),
                "unitkb.yaml".to_string(),
                "unitkb.json".to_string(),
            ],
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine: EngineSettings::default(),
            completion: CompletionSettings::default(),
            catalog: CatalogSettings::default(),
            extensions: ["service", "socket", "mount", "automount", "path", "swap", "timer"]
                .into_iter()
                .map(String::from)
                .collect(),
            language_ids: vec!["systemd".to_string()],
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            file: path.to_path_buf(),
            source,
        })?;

        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            file: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from default locations
    pub fn load_default(workspace_root: &Path) -> Self {
        for name in CONFIG_FILES {
            let candidate = workspace_root.join(name);
            if !candidate.exists() {
                continue;
            }

            match Self::load(&candidate) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("{}", e),
            }
        }

        Self::new()
    }

    /// Find a custom catalog in the workspace
    pub fn find_catalog(&self, workspace_root: &Path) -> Option<PathBuf> {
        self.catalog
            .search_paths
            .iter()
            .map(|path| workspace_root.join(path))
            .find(|candidate| candidate.is_file())
    }

    /// Whether a document is a unit file, by its client language id or its path
    pub fn handles(&self, path: &str, language_id: &str) -> bool {
        self.language_ids.iter().any(|id| id == language_id) || self.handles_path(path)
    }

    /// Whether a path names a unit file or a drop-in for one
    pub fn handles_path(&self, path: &str) -> bool {
        let path = Path::new(path);
        let extension = |p: &Path| p.extension().and_then(|ext| ext.to_str()).map(str::to_owned);

        match extension(path) {
            Some(ext) if ext.eq_ignore_ascii_case("conf") => path
                .parent()
                .and_then(|dir| dir.file_name())
                .and_then(|dir| dir.to_str())
                .and_then(|dir| dir.strip_suffix(".d"))
                .and_then(|unit| extension(Path::new(unit)))
                .is_some_and(|ext| self.is_unit_extension(&ext)),
            Some(ext) => self.is_unit_extension(&ext),
            None => false,
        }
    }

    fn is_unit_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Engine options from the completion settings
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            max_completions: self.completion.max_items,
            filter_values: self.completion.filter_values,
            match_sections_to_file: self.completion.match_sections_to_file,
        }
    }
}
