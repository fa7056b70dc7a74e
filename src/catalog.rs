use crate::config::Environment;
use crate::entry::DesktopFile;
use crate::model::{Document, Section};
use crate::sources::locator::Locator;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Menu categories, after the freedesktop.org category registry plus the
/// packaging buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    All,
    Development,
    Education,
    Multimedia,
    Game,
    Graphics,
    Network,
    Office,
    Settings,
    System,
    Utility,
    Others,
    Snap,
    Flatpak,
    AppImage,
}

impl Category {
    pub const ALL: [Category; 15] = [
        Category::All,
        Category::Development,
        Category::Education,
        Category::Multimedia,
        Category::Game,
        Category::Graphics,
        Category::Network,
        Category::Office,
        Category::Settings,
        Category::System,
        Category::Utility,
        Category::Others,
        Category::Snap,
        Category::Flatpak,
        Category::AppImage,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Development => "Development",
            Category::Education => "Education",
            Category::Multimedia => "Multimedia",
            Category::Game => "Game",
            Category::Graphics => "Graphics",
            Category::Network => "Network",
            Category::Office => "Office",
            Category::Settings => "Settings",
            Category::System => "System",
            Category::Utility => "Utility",
            Category::Others => "Others",
            Category::Snap => "Snap",
            Category::Flatpak => "Flatpak",
            Category::AppImage => "AppImage",
        }
    }

    /// Bucket for a name listed in an entry's `Categories` key.
    /// `AudioVideo`, `Audio` and `Video` all land in `Multimedia`. `All` and
    /// the packaging buckets are never taken from the list.
    pub fn from_desktop_category(name: &str) -> Option<Category> {
        match name {
            "AudioVideo" | "Audio" | "Video" | "Multimedia" => Some(Category::Multimedia),
            "Development" => Some(Category::Development),
            "Education" => Some(Category::Education),
            "Game" => Some(Category::Game),
            "Graphics" => Some(Category::Graphics),
            "Network" => Some(Category::Network),
            "Office" => Some(Category::Office),
            "Settings" => Some(Category::Settings),
            "System" => Some(Category::System),
            "Utility" => Some(Category::Utility),
            "Others" => Some(Category::Others),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

const SNAP_MARKERS: [&str; 1] = ["/snap/bin/"];
const FLATPAK_MARKERS: [&str; 2] = ["/bin/flatpak ", "flatpak run "];
// Matched lowercased. AppImageKit's desktop integration names its launchers
// `appimagekit_<hash>-<App>`.
const APPIMAGE_MARKERS: [&str; 2] = [".appimage", "appimagekit_"];

/// Packaging bucket for an `Exec` value, first match in Snap, Flatpak,
/// AppImage order.
pub fn packaging(exec: &str) -> Option<Category> {
    if SNAP_MARKERS.iter().any(|m| exec.contains(m)) {
        return Some(Category::Snap);
    }
    if FLATPAK_MARKERS.iter().any(|m| exec.contains(m)) {
        return Some(Category::Flatpak);
    }
    let lower = exec.to_lowercase();
    if APPIMAGE_MARKERS.iter().any(|m| lower.contains(m)) {
        return Some(Category::AppImage);
    }
    None
}

/// Whether an entry should be shown on `current_desktop`.
///
/// A missing `[Desktop Entry]` or a `Type` other than `Application` always
/// hides it. The remaining rules apply in sequence and each may overturn the
/// previous outcome: `NoDisplay=true`, `Hidden=true`, then `OnlyShowIn`,
/// then `NotShowIn`.
pub fn is_visible(document: &Document, current_desktop: &str) -> bool {
    let Some(entry) = document.desktop_entry() else {
        return false;
    };
    if entry.get("Type") != Some("Application") {
        return false;
    }

    let mut visible = true;
    if entry.get("NoDisplay") == Some("true") {
        visible = false;
    }
    if entry.get("Hidden") == Some("true") {
        visible = false;
    }
    if entry.contains_key("OnlyShowIn") {
        visible = entry.list("OnlyShowIn").contains(&current_desktop);
    }
    if entry.contains_key("NotShowIn") {
        visible = !entry.list("NotShowIn").contains(&current_desktop);
    }
    visible
}

/// All visible applications, sorted by name, plus per-category buckets of
/// indices into that list.
///
/// Rebuilt from scratch on every refresh.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<DesktopFile>,
    buckets: HashMap<Category, Vec<usize>>,
}

impl Catalog {
    pub fn build(env: &Environment) -> Self {
        let locator = Locator::new(env);
        Self::from_paths(locator.by_priority(), &env.current_desktop)
    }

    /// Unreadable files are logged and left out.
    pub fn from_paths<I, P>(paths: I, current_desktop: &str) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut entries = Vec::new();

        for path in paths {
            let file = match DesktopFile::new(path.as_ref()) {
                Ok(file) => file,
                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            };
            match file.content() {
                Ok(document) if is_visible(document, current_desktop) => {}
                Ok(_) => {
                    debug!("Hiding {:?}", file.path());
                    continue;
                }
                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            }
            entries.push(file);
        }

        entries.sort_by_cached_key(DesktopFile::sort_key);

        let mut catalog = Self {
            entries,
            buckets: HashMap::new(),
        };
        catalog.fill_buckets();
        info!("Catalog: {} applications", catalog.entries.len());
        catalog
    }

    fn fill_buckets(&mut self) {
        let mut buckets: HashMap<Category, Vec<usize>> = HashMap::new();

        for (index, file) in self.entries.iter().enumerate() {
            let Some(entry) = file.desktop_entry() else { continue };
            for category in categories_of(entry) {
                let bucket = buckets.entry(category).or_default();
                // An entry may list several names folding into one bucket.
                if !bucket.contains(&index) {
                    bucket.push(index);
                }
            }
        }

        self.buckets = buckets;
    }

    pub fn entries(&self) -> &[DesktopFile] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&DesktopFile> {
        self.entries.get(index)
    }

    pub fn indices(&self, category: Category) -> &[usize] {
        self.buckets.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn category(&self, category: Category) -> impl Iterator<Item = &DesktopFile> {
        self.indices(category).iter().map(|&i| &self.entries[i])
    }

    /// Categories with at least one entry, in menu order.
    pub fn categories(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.indices(c).len()))
            .filter(|&(_, count)| count > 0)
            .collect()
    }

    pub fn find(&self, path: &Path) -> Option<&DesktopFile> {
        let path: PathBuf = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        self.entries.iter().find(|f| f.path() == path.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Buckets for one visible entry. `All` always, `Others` when `Categories` is
/// absent or lists it, and at most one packaging bucket.
fn categories_of(entry: &Section) -> Vec<Category> {
    let mut categories = vec![Category::All];

    if entry.contains_key("Categories") {
        categories.extend(
            entry
                .list("Categories")
                .into_iter()
                .filter_map(Category::from_desktop_category),
        );
    } else {
        categories.push(Category::Others);
    }

    if let Some(origin) = entry.get("Exec").and_then(packaging) {
        categories.push(origin);
    }
    categories
}
