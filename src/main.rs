use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tuxmenu::config::load_config;
use tuxmenu::matcher::FuzzyMatcher;
use tuxmenu::sources::history::{PIN_APPS, RECENT_APPS};
use tuxmenu::sources::locator::Locator;
use tuxmenu::{Catalog, Category, DesktopFile, Environment, History, executor, shortcut};

#[derive(Parser, Debug)]
#[command(author, version, about = "Application menu built from .desktop files", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the desktop files found in the search directories
    Files {
        /// Include files shadowed by a higher priority directory
        #[arg(short, long)]
        all: bool,
    },
    /// Print every section of a desktop file
    Show { file: PathBuf },
    /// Print the non-empty menu categories
    Categories,
    /// List the applications of a category
    List {
        #[arg(default_value = "All")]
        category: Category,
    },
    /// Fuzzy search by name, generic name, comment and command
    Search { query: String },
    /// Launch an application and record it as recent
    Launch { file: PathBuf },
    /// Print the recently launched applications
    Recent,
    /// Print the pinned applications
    Pins,
    Pin { file: PathBuf },
    Unpin { file: PathBuf },
    /// Copy an application's desktop file to the user's desktop folder
    Shortcut { file: PathBuf },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let env = Environment::from_env();
    let config = load_config(&env)?;
    let locale = env.locale.as_deref();

    match args.command {
        Cmd::Files { all } => {
            let locator = Locator::new(&env);
            let files = if all { locator.all() } else { locator.by_priority() };
            for path in files {
                println!("{}", path.display());
            }
        }
        Cmd::Show { file } => {
            let file = resolve(&env, &file)?;
            let content = file.content()?;
            let mut headers: Vec<&str> = content.headers().collect();
            headers.sort();
            for header in headers {
                println!("{}", header);
                let Some(section) = content.section(header) else { continue };
                let mut pairs: Vec<(&str, &str)> = section.iter().collect();
                pairs.sort();
                for (key, value) in pairs {
                    println!("  {}={}", key, value);
                }
            }
        }
        Cmd::Categories => {
            let catalog = Catalog::build(&env);
            for (category, count) in catalog.categories() {
                println!("{:<12} {}", category, count);
            }
        }
        Cmd::List { category } => {
            let catalog = Catalog::build(&env);
            print_files(catalog.category(category), locale);
        }
        Cmd::Search { query } => {
            let catalog = Catalog::build(&env);
            let mut matcher = FuzzyMatcher::new();
            let found = matcher.search(&query, &catalog, locale);
            print_files(found.iter().filter_map(|&i| catalog.get(i)), locale);
        }
        Cmd::Launch { file } => {
            let file = resolve(&env, &file)?;
            let mut recent = History::open(&env, RECENT_APPS)?;
            executor::launch(&file, &config, &mut recent)?;
        }
        Cmd::Recent => {
            let recent = History::open(&env, RECENT_APPS)?;
            print_files(recent.apps().iter(), locale);
        }
        Cmd::Pins => {
            let pins = History::open(&env, PIN_APPS)?;
            print_files(pins.apps().iter(), locale);
        }
        Cmd::Pin { file } => {
            let file = resolve(&env, &file)?;
            let mut pins = History::open(&env, PIN_APPS)?;
            if !pins.pin(file)? {
                println!("Already pinned");
            }
        }
        Cmd::Unpin { file } => {
            let file = resolve(&env, &file)?;
            let mut pins = History::open(&env, PIN_APPS)?;
            if !pins.unpin(file.path())? {
                println!("Not pinned");
            }
        }
        Cmd::Shortcut { file } => {
            let file = resolve(&env, &file)?;
            let (path, created) = shortcut::create(&file, &env)?;
            if created {
                println!("{}", path.display());
            } else {
                println!("{} already exists", path.display());
            }
        }
    }

    Ok(())
}

/// A path to a desktop file, or a file name such as `firefox.desktop` looked
/// up in the search directories.
fn resolve(env: &Environment, file: &Path) -> Result<DesktopFile> {
    if file.exists() {
        return Ok(DesktopFile::new(file)?);
    }

    let Some(name) = file.file_name().filter(|_| file.components().count() == 1) else {
        bail!("{} does not exist", file.display());
    };
    let found = Locator::new(env)
        .by_priority()
        .into_iter()
        .find(|p| p.file_name() == Some(name))
        .with_context(|| format!("no desktop file named {}", file.display()))?;
    Ok(DesktopFile::new(found)?)
}

fn print_files<'a>(files: impl Iterator<Item = &'a DesktopFile>, locale: Option<&str>) {
    for file in files {
        println!("{:<40} {}", file.display_name(locale), file.path().display());
    }
}
