use crate::config::Environment;
use crate::error::{Error, Result};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SYSTEM_DIRS: [&str; 2] = ["/usr/local/share/applications", "/usr/share/applications"];

/// Finds `.desktop` files in the XDG application directories.
#[derive(Debug, Clone)]
pub struct Locator {
    dirs: Vec<PathBuf>,
}

impl Locator {
    pub fn new(env: &Environment) -> Self {
        Self { dirs: search_dirs(env) }
    }

    pub fn with_dirs(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Search directories, highest priority first.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// One path per file name. A user entry shadows a system entry with the
    /// same name, `/usr/local` shadows `/usr`.
    pub fn by_priority(&self) -> Vec<PathBuf> {
        let mut seen: HashSet<OsString> = HashSet::new();
        let mut files = Vec::new();

        for dir in &self.dirs {
            for path in self.candidates(dir) {
                let Some(name) = path.file_name() else { continue };
                if seen.insert(name.to_os_string()) {
                    files.push(path);
                } else {
                    debug!("{:?} is shadowed by a higher priority entry", path);
                }
            }
        }

        info!("Locator: found {} desktop files", files.len());
        files
    }

    /// Every candidate in every directory, duplicates included.
    pub fn all(&self) -> Vec<PathBuf> {
        self.dirs.iter().flat_map(|dir| self.candidates(dir)).collect()
    }

    fn candidates(&self, dir: &Path) -> Vec<PathBuf> {
        match list_dir(dir) {
            Ok(files) => files,
            Err(e) => {
                warn!("{}", e);
                Vec::new()
            }
        }
    }
}

pub fn search_dirs(env: &Environment) -> Vec<PathBuf> {
    let mut dirs = vec![env.data_home().join("applications")];

    match &env.data_dirs {
        Some(data_dirs) => dirs.extend(data_dirs.iter().map(|d| d.join("applications"))),
        None => dirs.extend(SYSTEM_DIRS.iter().map(PathBuf::from)),
    }

    dirs
}

pub fn is_candidate(file_name: &str) -> bool {
    !file_name.contains('~') && file_name.ends_with(".desktop")
}

/// Direct children of `dir` that look like desktop entries, sorted by name.
/// A missing directory, or a path that is not a directory, is empty.
fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        debug!("Skipping missing directory {:?}", dir);
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        warn!("Skipping {:?}, not a directory", dir);
        return Ok(Vec::new());
    }

    debug!("Scanning desktop files in {:?}", dir);
    let mut files = Vec::new();
    let walker = WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // The root failing means nothing in it can be listed.
            Err(source) if source.depth() == 0 => {
                return Err(Error::Discovery {
                    dir: dir.to_path_buf(),
                    source,
                });
            }
            Err(e) => {
                warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                continue;
            }
        };

        if entry.file_name().to_str().is_some_and(is_candidate) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
