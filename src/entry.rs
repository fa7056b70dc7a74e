use crate::error::{Error, Result};
use crate::model::{Document, Section};
use crate::sources::parser;
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// A `.desktop` file on disk, parsed on first access.
///
/// The parsed document is cached for the lifetime of the value; changes to
/// the file after the first [`DesktopFile::content`] call are not observed.
#[derive(Debug, Clone)]
pub struct DesktopFile {
    path: PathBuf,
    content: OnceLock<Document>,
}

impl DesktopFile {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path = std::path::absolute(path).map_err(|source| Error::Path {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path,
            content: OnceLock::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name, e.g. `firefox.desktop`.
    pub fn id(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    pub fn content(&self) -> Result<&Document> {
        if let Some(document) = self.content.get() {
            return Ok(document);
        }
        let document = parser::parse_file(&self.path)?;
        Ok(self.content.get_or_init(|| document))
    }

    /// The `[Desktop Entry]` section. Unreadable files have none.
    pub fn desktop_entry(&self) -> Option<&Section> {
        self.content().ok()?.desktop_entry()
    }

    pub fn name(&self) -> Option<&str> {
        self.desktop_entry()?.get("Name")
    }

    pub fn display_name(&self, locale: Option<&str>) -> String {
        self.desktop_entry()
            .and_then(|entry| entry.localized("Name", locale))
            .map(str::to_string)
            .unwrap_or_else(|| self.id().to_string())
    }

    pub fn exec(&self) -> Option<&str> {
        self.desktop_entry()?.get("Exec")
    }

    /// Lowercased `Name`, or the path when the entry has no name.
    pub fn sort_key(&self) -> String {
        match self.name() {
            Some(name) => name.to_lowercase(),
            None => self.path.to_string_lossy().into_owned(),
        }
    }
}

impl PartialEq for DesktopFile {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for DesktopFile {}

impl PartialOrd for DesktopFile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DesktopFile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for DesktopFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "<DesktopFile: {}>", name),
            None => write!(f, "<DesktopFile: {}>", self.id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_entry(dir: &Path, file: &str, body: &str) -> PathBuf {
        let path = dir.join(file);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn relative_paths_become_absolute() {
        let file = DesktopFile::new("apps/firefox.desktop").unwrap();
        assert!(file.path().is_absolute());
        assert!(file.path().ends_with("apps/firefox.desktop"));
        assert_eq!(file.id(), "firefox.desktop");
    }

    #[test]
    fn content_is_parsed_once() {
        let dir = tempdir().unwrap();
        let path = write_entry(dir.path(), "a.desktop", "[Desktop Entry]\nName=Before\n");
        let file = DesktopFile::new(&path).unwrap();
        assert_eq!(file.name(), Some("Before"));

        fs::write(&path, "[Desktop Entry]\nName=After\n").unwrap();
        assert_eq!(file.name(), Some("Before"));

        let fresh = DesktopFile::new(&path).unwrap();
        assert_eq!(fresh.name(), Some("After"));
    }

    #[test]
    fn unreadable_file_is_an_error_not_an_empty_document() {
        let dir = tempdir().unwrap();
        let file = DesktopFile::new(dir.path().join("gone.desktop")).unwrap();
        assert!(matches!(file.content(), Err(Error::Read { .. })));
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.desktop");
        fs::write(&path, b"[Desktop Entry]\nName=\xff\n").unwrap();
        let file = DesktopFile::new(&path).unwrap();

        assert!(matches!(file.content(), Err(Error::Read { .. })));
        assert_eq!(file.name(), None);
    }

    #[test]
    fn headerless_file_is_an_empty_document() {
        let dir = tempdir().unwrap();
        let path = write_entry(dir.path(), "junk.desktop", "just some text\n");
        let file = DesktopFile::new(&path).unwrap();

        assert!(file.content().unwrap().is_empty());
        assert_eq!(file.sort_key(), path.to_string_lossy());
    }

    #[test]
    fn sorts_by_name_ignoring_case() {
        let dir = tempdir().unwrap();
        let entry = |file: &str, name: &str| {
            let body = format!("[Desktop Entry]\nName={}\n", name);
            DesktopFile::new(write_entry(dir.path(), file, &body)).unwrap()
        };
        let banana = entry("b.desktop", "banana");
        let apple = entry("a.desktop", "Apple");

        let mut files = vec![banana, apple];
        files.sort();
        let names: Vec<_> = files.iter().map(|f| f.name().unwrap()).collect();
        assert_eq!(names, vec!["Apple", "banana"]);
    }

    #[test]
    fn equal_when_names_match_case_insensitively() {
        let dir = tempdir().unwrap();
        let entry = |file: &str, name: &str| {
            let body = format!("[Desktop Entry]\nName={}\n", name);
            DesktopFile::new(write_entry(dir.path(), file, &body)).unwrap()
        };
        let a = entry("a.desktop", "Editor");
        let b = entry("b.desktop", "EDITOR");
        let c = entry("c.desktop", "Other");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn display_name_uses_locale() {
        let dir = tempdir().unwrap();
        let path = write_entry(
            dir.path(),
            "files.desktop",
            "[Desktop Entry]\nName=Files\nName[pt_BR]=Arquivos\n",
        );
        let file = DesktopFile::new(&path).unwrap();

        assert_eq!(file.display_name(Some("pt_BR")), "Arquivos");
        assert_eq!(file.display_name(None), "Files");
        assert_eq!(file.to_string(), "<DesktopFile: Files>");
    }
}
