//! Small ordered lists of desktop files kept in `~/.config/tuxmenu/<name>.json`.
//!
//! Files are overwritten in place on every change, without locking. Two
//! processes writing the same list race and the last writer wins.

use crate::config::Environment;
use crate::entry::DesktopFile;
use crate::error::{Error, Result};
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const RECENT_APPS: &str = "recent-apps";
pub const PIN_APPS: &str = "pin-apps";

// `{ "<name>": ["/usr/share/applications/firefox.desktop", ...] }`
type HistoryFile = HashMap<String, Vec<PathBuf>>;

#[derive(Debug)]
pub struct History {
    name: String,
    path: PathBuf,
    apps: Vec<DesktopFile>,
}

impl History {
    pub fn open(env: &Environment, name: &str) -> Result<Self> {
        Self::open_in(&env.config_dir(), name)
    }

    /// Loads `<dir>/<name>.json`, creating `dir` if needed.
    ///
    /// A missing file is an empty list. A corrupt file is logged and treated
    /// as empty. Paths that no longer exist are dropped.
    pub fn open_in(dir: &Path, name: &str) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|source| Error::Persistence {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(format!("{}.json", name));

        let apps = match load_paths(&path, name) {
            Ok(paths) => paths
                .into_iter()
                .filter(|p| {
                    let exists = p.exists();
                    if !exists {
                        debug!("Dropping missing {:?} from {}", p, name);
                    }
                    exists
                })
                .filter_map(|p| DesktopFile::new(p).ok())
                .collect(),
            Err(e @ Error::HistoryFormat { .. }) => {
                warn!("{}, starting empty", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            name: name.to_string(),
            path,
            apps,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn apps(&self) -> &[DesktopFile] {
        &self.apps
    }

    pub fn position(&self, path: &Path) -> Option<usize> {
        self.apps.iter().position(|app| app.path() == path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.position(path).is_some()
    }

    /// Moves `app` to the front, evicting the oldest entry when a new one
    /// would exceed `capacity`, then saves.
    pub fn touch(&mut self, app: DesktopFile, capacity: usize) -> Result<()> {
        if let Some(index) = self.position(app.path()) {
            self.apps.remove(index);
        } else if self.apps.len() >= capacity {
            self.apps.pop();
        }
        self.apps.insert(0, app);
        self.apps.truncate(capacity.max(1));
        self.save()
    }

    /// Puts `app` at the front unless already present. Returns whether the
    /// list changed.
    pub fn pin(&mut self, app: DesktopFile) -> Result<bool> {
        if self.contains(app.path()) {
            return Ok(false);
        }
        self.apps.insert(0, app);
        self.save()?;
        Ok(true)
    }

    /// Returns whether the list changed.
    pub fn unpin(&mut self, path: &Path) -> Result<bool> {
        let Some(index) = self.position(path) else {
            return Ok(false);
        };
        self.apps.remove(index);
        self.save()?;
        Ok(true)
    }

    pub fn save(&self) -> Result<()> {
        let paths: Vec<PathBuf> = self.apps.iter().map(|a| a.path().to_path_buf()).collect();
        save_paths(&self.path, &self.name, &paths)
    }
}

fn load_paths(path: &Path, name: &str) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).map_err(|source| Error::Persistence {
        path: path.to_path_buf(),
        source,
    })?;
    let mut file: HistoryFile =
        serde_json::from_str(&content).map_err(|source| Error::HistoryFormat {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(file.remove(name).unwrap_or_default())
}

/// Writes `{ "<name>": [paths...] }`, replacing the whole file.
pub fn save_paths(path: &Path, name: &str, paths: &[PathBuf]) -> Result<()> {
    let file = HistoryFile::from([(name.to_string(), paths.to_vec())]);

    let content = serde_json::to_string_pretty(&file).map_err(|source| Error::HistoryFormat {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, content).map_err(|source| Error::Persistence {
        path: path.to_path_buf(),
        source,
    })
}
