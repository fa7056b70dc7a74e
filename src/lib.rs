//! Application menu core: finds `.desktop` files, parses them, sorts the
//! visible ones into menu categories and keeps the recent/pinned lists.

pub mod catalog;
pub mod config;
pub mod entry;
pub mod error;
pub mod executor;
pub mod matcher;
pub mod model;
pub mod shortcut;
pub mod sources;

pub use catalog::{Catalog, Category};
pub use config::{Config, Environment};
pub use entry::DesktopFile;
pub use error::{Error, Result};
pub use sources::history::History;
