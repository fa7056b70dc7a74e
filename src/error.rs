use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot list directory {dir:?}: {source}")]
    Discovery {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("cannot resolve path {path:?}: {source}")]
    Path {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read desktop entry {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot persist {path:?}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid history file {path:?}: {source}")]
    HistoryFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path:?} has no Exec command")]
    NoExec { path: PathBuf },

    #[error("cannot launch {command:?}: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot create shortcut {path:?}: {source}")]
    Shortcut {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
