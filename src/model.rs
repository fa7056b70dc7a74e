use std::collections::HashMap;

pub const DESKTOP_ENTRY: &str = "[Desktop Entry]";

/// Key/value pairs of one section. The first occurrence of a key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    values: HashMap<String, String>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key` unless it is already present. Returns whether it was stored.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.values.contains_key(&key) {
            return false;
        }
        self.values.insert(key, value.into());
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// `key[pt_BR]`, then `key[pt]`, then `key`.
    pub fn localized(&self, key: &str, locale: Option<&str>) -> Option<&str> {
        if let Some(locale) = locale {
            if let Some(value) = self.get(&format!("{key}[{locale}]")) {
                return Some(value);
            }
            if let Some((lang, _)) = locale.split_once('_') {
                if let Some(value) = self.get(&format!("{key}[{lang}]")) {
                    return Some(value);
                }
            }
        }
        self.get(key)
    }

    /// `;`-separated list value, empty items dropped.
    pub fn list(&self, key: &str) -> Vec<&str> {
        self.get(key)
            .map(|v| v.split(';').filter(|item| !item.is_empty()).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parsed desktop entry: section header (brackets included) to its keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: HashMap<String, Section>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repeated header replaces the earlier section.
    pub fn insert_section(&mut self, header: impl Into<String>, section: Section) {
        self.sections.insert(header.into(), section);
    }

    pub fn section(&self, header: &str) -> Option<&Section> {
        self.sections.get(header)
    }

    pub fn desktop_entry(&self) -> Option<&Section> {
        self.section(DESKTOP_ENTRY)
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }
}
