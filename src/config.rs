use crate::error::{Error, Result};
use directories::BaseDirs;
use log::debug;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_DIRNAME: &str = "tuxmenu";

/// Process environment the core depends on.
///
/// Built once at the boundary and passed down by reference, so discovery,
/// filtering and persistence never read the process environment themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// `$XDG_DATA_HOME`, `None` when unset.
    pub data_home: Option<PathBuf>,
    /// `$XDG_DATA_DIRS` split on `:`, `None` when unset.
    pub data_dirs: Option<Vec<PathBuf>>,
    /// `$XDG_CURRENT_DESKTOP`, matched verbatim against `OnlyShowIn`/`NotShowIn`.
    pub current_desktop: String,
    pub home: PathBuf,
    /// Messages locale without encoding, e.g. `pt_BR`.
    pub locale: Option<String>,
}

impl Environment {
    pub fn from_env() -> Self {
        let home = env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .or_else(|| BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("/"));

        let locale = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|value| !value.is_empty())
            .and_then(|value| parse_locale(&value));

        Self {
            data_home: non_empty_var("XDG_DATA_HOME").map(PathBuf::from),
            data_dirs: non_empty_var("XDG_DATA_DIRS").map(|dirs| split_data_dirs(&dirs)),
            current_desktop: env::var("XDG_CURRENT_DESKTOP").unwrap_or_default(),
            home,
            locale,
        }
    }

    /// Environment rooted at `home` with nothing else set.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            data_home: None,
            data_dirs: None,
            current_desktop: String::new(),
            home: home.into(),
            locale: None,
        }
    }

    pub fn data_home(&self) -> PathBuf {
        self.data_home
            .clone()
            .unwrap_or_else(|| self.home.join(".local/share"))
    }

    /// `<home>/.config/tuxmenu`
    pub fn config_dir(&self) -> PathBuf {
        self.home.join(".config").join(APP_DIRNAME)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn split_data_dirs(value: &str) -> Vec<PathBuf> {
    value
        .split(':')
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// `pt_BR.UTF-8@euro` -> `pt_BR`. `C` and `POSIX` carry no translations.
fn parse_locale(value: &str) -> Option<String> {
    let locale = value
        .split(['.', '@'])
        .next()
        .unwrap_or_default();
    match locale {
        "" | "C" | "POSIX" => None,
        other => Some(other.to_string()),
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default)]
    pub terminal: Option<String>,
}

fn default_recent_limit() -> usize { 6 }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
            terminal: None,
        }
    }
}

pub fn config_path(env: &Environment) -> PathBuf {
    env.config_dir().join("config.toml")
}

pub fn load_config(env: &Environment) -> Result<Config> {
    load_config_from(&config_path(env))
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("No config at {:?}, using defaults", path);
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn locale_strips_encoding_and_modifier() {
        assert_eq!(parse_locale("pt_BR.UTF-8"), Some("pt_BR".to_string()));
        assert_eq!(parse_locale("de_DE@euro"), Some("de_DE".to_string()));
        assert_eq!(parse_locale("C.UTF-8"), None);
        assert_eq!(parse_locale("POSIX"), None);
    }

    #[test]
    fn data_dirs_skip_empty_segments() {
        assert_eq!(
            split_data_dirs("/usr/local/share::/usr/share:"),
            vec![PathBuf::from("/usr/local/share"), PathBuf::from("/usr/share")]
        );
    }

    #[test]
    fn data_home_defaults_under_home() {
        let env = Environment::with_home("/home/tux");
        assert_eq!(env.data_home(), PathBuf::from("/home/tux/.local/share"));
        assert_eq!(env.config_dir(), PathBuf::from("/home/tux/.config/tuxmenu"));
    }

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.general.recent_limit, 6);
        assert!(config.general.terminal.is_none());
    }

    #[test]
    fn config_overrides_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general]\nrecent_limit = 3\nterminal = \"foot -e\"\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.general.recent_limit, 3);
        assert_eq!(config.general.terminal.as_deref(), Some("foot -e"));
    }

    #[test]
    fn broken_config_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\n").unwrap();

        assert!(matches!(load_config_from(&path), Err(Error::Config { .. })));
    }

    #[test]
    fn unreadable_config_reports_config_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::create_dir(&path).unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
        assert!(err.to_string().starts_with("cannot read config file"));
    }
}
