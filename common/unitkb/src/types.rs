//! Core knowledge base types.
//!
//! - [`Setting`] - One recognized key and its allowed values
//! - [`SettingsIndex`] - Ordered settings with O(1) lookup by name
//! - [`Section`] - One `[Name]` block type

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A recognized key within a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    /// Key name as written before the `=` (e.g. "Type")
    pub name: String,

    /// Permitted literal values, in display order. Empty means free-form.
    #[serde(default)]
    pub choices: Vec<String>,

    /// Human-readable description
    #[serde(default)]
    pub doc: String,
}

impl Setting {
    pub fn new(name: impl Into<String>, doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            choices: Vec::new(),
            doc: doc.into(),
        }
    }

    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the value can be completed from a fixed list.
    pub fn is_enumerated(&self) -> bool {
        !self.choices.is_empty()
    }
}

/// Settings of one section, in declaration order, indexed by name.
///
/// Building the index from a sequence that repeats a name keeps the first
/// position and the last definition, so names are always unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Setting>", into = "Vec<Setting>")]
pub struct SettingsIndex {
    settings: Vec<Setting>,
    positions: HashMap<String, usize>,
}

impl SettingsIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a setting, replacing an earlier one with the same name in place.
    pub fn insert(&mut self, setting: Setting) {
        match self.positions.get(&setting.name) {
            Some(&pos) => self.settings[pos] = setting,
            None => {
                self.positions
                    .insert(setting.name.clone(), self.settings.len());
                self.settings.push(setting);
            }
        }
    }

    /// Look up a setting by name.
    pub fn get(&self, name: &str) -> Option<&Setting> {
        self.positions
            .get(name)
            .and_then(|&pos| self.settings.get(pos))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Setting> {
        self.settings.iter()
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

impl FromIterator<Setting> for SettingsIndex {
    fn from_iter<T: IntoIterator<Item = Setting>>(iter: T) -> Self {
        let mut index = Self::new();
        for setting in iter {
            index.insert(setting);
        }
        index
    }
}

impl From<Vec<Setting>> for SettingsIndex {
    fn from(settings: Vec<Setting>) -> Self {
        settings.into_iter().collect()
    }
}

impl From<SettingsIndex> for Vec<Setting> {
    fn from(index: SettingsIndex) -> Self {
        index.settings
    }
}

impl<'a> IntoIterator for &'a SettingsIndex {
    type Item = &'a Setting;
    type IntoIter = std::slice::Iter<'a, Setting>;

    fn into_iter(self) -> Self::IntoIter {
        self.settings.iter()
    }
}

/// A section type, introduced in a unit file by a `[Name]` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Name as written inside the brackets (e.g. "Service")
    pub name: String,

    /// Regex over file names this section belongs in. `None` matches any file.
    #[serde(default, rename = "fileMatch", skip_serializing_if = "Option::is_none")]
    pub file_match: Option<String>,

    /// Description of the section's purpose
    #[serde(default)]
    pub doc: String,

    /// Settings valid in this section
    #[serde(default)]
    pub settings: SettingsIndex,
}

impl Section {
    pub fn new(name: impl Into<String>, doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_match: None,
            doc: doc.into(),
            settings: SettingsIndex::new(),
        }
    }

    pub fn with_file_match(mut self, pattern: impl Into<String>) -> Self {
        self.file_match = Some(pattern.into());
        self
    }

    pub fn with_setting(mut self, setting: Setting) -> Self {
        self.settings.insert(setting);
        self
    }
}
