//! The knowledge base and its derived lookup views.

use crate::loader::LoadError;
use crate::types::{Section, SettingsIndex};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Names usable as a key on the left of `=`.
static SETTING_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+$").expect("setting name pattern is valid"));

/// Immutable catalog of sections and their settings.
///
/// Built once, then shared read-only (typically behind an `Arc`) by every
/// request. Nothing here is mutated after construction.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    /// Sections in declaration order
    sections: Vec<Section>,

    /// Section name -> position in `sections`
    by_name: HashMap<String, usize>,

    /// Compiled `fileMatch` patterns, parallel to `sections`
    file_patterns: Vec<Option<Regex>>,
}

/// Catalog statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KnowledgeStats {
    pub sections: usize,
    pub settings: usize,
    pub enumerated_settings: usize,
}

impl KnowledgeBase {
    /// Build from fully composed sections.
    pub fn from_sections(sections: Vec<Section>) -> Result<Self, LoadError> {
        let mut by_name = HashMap::with_capacity(sections.len());
        let mut file_patterns = Vec::with_capacity(sections.len());

        for (pos, section) in sections.iter().enumerate() {
            if by_name.insert(section.name.clone(), pos).is_some() {
                return Err(LoadError::DuplicateSection(section.name.clone()));
            }

            if let Some(bad) = section.settings.iter().find(|s| !SETTING_NAME.is_match(&s.name)) {
                return Err(LoadError::InvalidSettingName {
                    section: section.name.clone(),
                    setting: bad.name.clone(),
                });
            }

            let pattern = section
                .file_match
                .as_deref()
                .map(Regex::new)
                .transpose()
                .map_err(|source| LoadError::InvalidPattern {
                    section: section.name.clone(),
                    source,
                })?;
            file_patterns.push(pattern);
        }

        Ok(Self {
            sections,
            by_name,
            file_patterns,
        })
    }

    /// All sections, in declaration order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Look up a section by its exact name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.by_name
            .get(name)
            .and_then(|&pos| self.sections.get(pos))
    }

    /// Settings of the named section.
    pub fn settings(&self, section: &str) -> Option<&SettingsIndex> {
        self.section(section).map(|s| &s.settings)
    }

    /// Sections whose file pattern accepts `file_name`, in declaration order.
    pub fn sections_for_file(&self, file_name: &str) -> Vec<&Section> {
        self.sections
            .iter()
            .zip(&self.file_patterns)
            .filter(|(_, pattern)| pattern.as_ref().map_or(true, |re| re.is_match(file_name)))
            .map(|(section, _)| section)
            .collect()
    }

    pub fn stats(&self) -> KnowledgeStats {
        let settings = self.sections.iter().map(|s| s.settings.len()).sum();
        let enumerated_settings = self
            .sections
            .iter()
            .flat_map(|s| s.settings.iter())
            .filter(|s| s.is_enumerated())
            .count();

        KnowledgeStats {
            sections: self.sections.len(),
            settings,
            enumerated_settings,
        }
    }
}
