//! Catalog file loading.
//!
//! A catalog declares shared settings groups and the sections that use them:
//!
//! ```text
//! {
//!   "groups":   { "exec": [ { "name": "User", "choices": [], "doc": "..." } ] },
//!   "sections": [
//!     { "name": "Service", "fileMatch": ".+\\.service", "doc": "...",
//!       "include": ["exec"], "settings": [ ... ] }
//!   ]
//! }
//! ```
//!
//! Included groups come first, in the order listed, followed by the section's
//! own settings.

use crate::knowledge::KnowledgeBase;
use crate::types::{Section, Setting, SettingsIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Catalog shipped with the crate.
const BUILTIN_CATALOG: &str = include_str!("../data/systemd.json");

/// Errors that can occur when loading a catalog.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Failed to read a file.
    #[error("Failed to read: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a JSON catalog.
    #[error("Failed to parse {file}: {source}")]
    Json {
        file: PathBuf,
        source: serde_json::Error,
    },

    /// Failed to parse a YAML catalog.
    #[error("Failed to parse {file}: {source}")]
    Yaml {
        file: PathBuf,
        source: serde_yaml::Error,
    },

    /// The catalog file was not found.
    #[error("Catalog not found: {0}")]
    NotFound(PathBuf),

    /// A section includes a group the catalog does not declare.
    #[error("Section {section} includes unknown settings group '{group}'")]
    UnknownGroup { section: String, group: String },

    /// Two sections share a name.
    #[error("Duplicate section: {0}")]
    DuplicateSection(String),

    /// A setting name that cannot be written as `Name=` in a unit file.
    #[error("Invalid setting name '{setting}' in section {section}")]
    InvalidSettingName { section: String, setting: String },

    /// A section's file pattern is not a valid regex.
    #[error("Invalid file pattern for section {section}: {source}")]
    InvalidPattern {
        section: String,
        source: regex::Error,
    },
}

/// On-disk catalog layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Named settings groups that sections can include
    #[serde(default)]
    pub groups: HashMap<String, Vec<Setting>>,

    /// Sections in display order
    #[serde(default)]
    pub sections: Vec<CatalogSection>,
}

/// A section as declared in a catalog file, before groups are expanded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSection {
    pub name: String,

    #[serde(default, rename = "fileMatch", skip_serializing_if = "Option::is_none")]
    pub file_match: Option<String>,

    #[serde(default)]
    pub doc: String,

    /// Groups whose settings are prepended to `settings`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    #[serde(default)]
    pub settings: Vec<Setting>,
}

impl Catalog {
    /// Parse a catalog from JSON text.
    pub fn from_json(content: &str, file: &Path) -> Result<Self, LoadError> {
        serde_json::from_str(content).map_err(|source| LoadError::Json {
            file: file.to_path_buf(),
            source,
        })
    }

    /// Parse a catalog from YAML text.
    pub fn from_yaml(content: &str, file: &Path) -> Result<Self, LoadError> {
        serde_yaml::from_str(content).map_err(|source| LoadError::Yaml {
            file: file.to_path_buf(),
            source,
        })
    }

    /// Expand group includes into concrete sections.
    pub fn into_sections(self) -> Result<Vec<Section>, LoadError> {
        let Catalog { groups, sections } = self;

        sections
            .into_iter()
            .map(|decl| {
                let mut settings = SettingsIndex::new();

                for group in &decl.include {
                    let members = groups.get(group).ok_or_else(|| LoadError::UnknownGroup {
                        section: decl.name.clone(),
                        group: group.clone(),
                    })?;
                    for setting in members {
                        settings.insert(setting.clone());
                    }
                }

                for setting in decl.settings {
                    settings.insert(setting);
                }

                Ok(Section {
                    name: decl.name,
                    file_match: decl.file_match,
                    doc: decl.doc,
                    settings,
                })
            })
            .collect()
    }
}

impl KnowledgeBase {
    /// The systemd catalog embedded in the crate.
    pub fn builtin() -> Result<Self, LoadError> {
        let catalog = Catalog::from_json(BUILTIN_CATALOG, Path::new("<builtin>/systemd.json"))?;
        Self::from_catalog(catalog)
    }

    /// Load a catalog file. `.yaml` and `.yml` files are read as YAML,
    /// anything else as JSON.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let catalog = if is_yaml {
            Catalog::from_yaml(&content, path)?
        } else {
            Catalog::from_json(&content, path)?
        };

        let kb = Self::from_catalog(catalog)?;
        tracing::debug!(
            path = %path.display(),
            sections = kb.sections().len(),
            "Loaded catalog"
        );
        Ok(kb)
    }

    /// Build from a parsed catalog.
    pub fn from_catalog(catalog: Catalog) -> Result<Self, LoadError> {
        Self::from_sections(catalog.into_sections()?)
    }
}
