use crate::theme::ThemeKind;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use wordsearch_core::{validate_words, word_lists, BUILTIN_WORD_LISTS};

/// Grid size used when neither the command line nor settings give one
pub const DEFAULT_GRID_SIZE: usize = 15;

/// Directory holding settings, the saved puzzle, and the log file
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wordsearch")
}

/// User preferences persisted between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemeKind,
    pub rows: usize,
    pub cols: usize,
    /// User-defined word lists by name
    pub custom_lists: BTreeMap<String, Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeKind::default(),
            rows: DEFAULT_GRID_SIZE,
            cols: DEFAULT_GRID_SIZE,
            custom_lists: BTreeMap::new(),
        }
    }
}

impl Settings {
    fn path() -> PathBuf {
        data_dir().join("settings.json")
    }

    /// Load settings, falling back to defaults when missing or unreadable
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!("ignoring unreadable settings {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> io::Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    /// Store a custom list under `name`, validating its words. Built-in
    /// names cannot be overridden. Returns the number of words kept.
    pub fn add_custom_list<S: AsRef<str>>(&mut self, name: &str, words: &[S]) -> Option<usize> {
        if word_lists::builtin(name).is_some() {
            return None;
        }
        let words = validate_words(words);
        let kept = words.len();
        self.custom_lists.insert(name.to_string(), words);
        Some(kept)
    }

    /// Delete a custom list, matching its name case-insensitively. Built-in
    /// lists cannot be removed. Returns false when nothing was removed.
    pub fn remove_custom_list(&mut self, name: &str) -> bool {
        if word_lists::builtin(name).is_some() {
            return false;
        }
        let key = self
            .custom_lists
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .cloned();
        match key {
            Some(key) => self.custom_lists.remove(&key).is_some(),
            None => false,
        }
    }

    /// Resolve a built-in or custom list by name
    pub fn word_list(&self, name: &str) -> Option<(String, Vec<String>)> {
        if let Some(list) = word_lists::builtin(name) {
            return Some((list.name.to_string(), list.to_vec()));
        }
        self.custom_lists
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(key, words)| (key.clone(), words.clone()))
    }

    /// Names of every available list, built-ins first
    pub fn list_names(&self) -> Vec<String> {
        BUILTIN_WORD_LISTS
            .iter()
            .map(|l| l.name.to_string())
            .chain(self.custom_lists.keys().cloned())
            .collect()
    }
}
