use crate::config::Environment;
use crate::entry::DesktopFile;
use crate::error::{Error, Result};
use log::{debug, info};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// The user's desktop folder: `XDG_DESKTOP_DIR` from
/// `~/.config/user-dirs.dirs`, otherwise `~/Desktop`.
pub fn desktop_dir(env: &Environment) -> PathBuf {
    let user_dirs = env.home.join(".config/user-dirs.dirs");
    fs::read_to_string(&user_dirs)
        .ok()
        .and_then(|content| parse_desktop_dir(&content, &env.home))
        .unwrap_or_else(|| env.home.join("Desktop"))
}

// The file is sourced by shells, so a later assignment overrides an earlier one.
fn parse_desktop_dir(content: &str, home: &Path) -> Option<PathBuf> {
    let home = home.to_string_lossy();
    content
        .lines()
        .filter_map(|line| line.trim().strip_prefix("XDG_DESKTOP_DIR="))
        .last()
        .map(|value| {
            let value = value.trim().trim_matches('"');
            PathBuf::from(value.replace("${HOME}", &home).replace("$HOME", &home))
        })
}

/// Copies `file` into `dir` and makes the copy executable.
///
/// An existing file of the same name is left alone. Returns the shortcut path
/// and whether it was created.
pub fn create_in(file: &DesktopFile, dir: &Path) -> Result<(PathBuf, bool)> {
    let destination = dir.join(file.id());
    if destination.exists() {
        debug!("Shortcut {:?} already exists", destination);
        return Ok((destination, false));
    }

    let wrap = |source| Error::Shortcut {
        path: destination.clone(),
        source,
    };
    fs::create_dir_all(dir).map_err(wrap)?;
    fs::copy(file.path(), &destination).map_err(wrap)?;
    fs::set_permissions(&destination, fs::Permissions::from_mode(0o755)).map_err(wrap)?;

    info!("Created shortcut {:?}", destination);
    Ok((destination, true))
}

pub fn create(file: &DesktopFile, env: &Environment) -> Result<(PathBuf, bool)> {
    create_in(file, &desktop_dir(env))
}
