use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};
use tuxmenu::sources::history::{PIN_APPS, RECENT_APPS};
use tuxmenu::sources::locator::Locator;
use tuxmenu::{Catalog, Category, DesktopFile, Environment, History};

struct Fixture {
    _root: TempDir,
    env: Environment,
    user: PathBuf,
    system: PathBuf,
}

impl Fixture {
    fn new(desktop: &str) -> Self {
        let root = tempdir().unwrap();
        let home = root.path().join("home");
        let share = root.path().join("share");
        let user = home.join(".local/share/applications");
        let system = share.join("applications");
        fs::create_dir_all(&user).unwrap();
        fs::create_dir_all(&system).unwrap();

        let env = Environment {
            data_home: None,
            data_dirs: Some(vec![share, root.path().join("missing")]),
            current_desktop: desktop.to_string(),
            home,
            locale: None,
        };
        Self { _root: root, env, user, system }
    }

    fn write(&self, dir: &Path, file: &str, body: &str) -> PathBuf {
        let path = dir.join(file);
        fs::write(&path, body).unwrap();
        path
    }
}

fn names<'a>(files: impl Iterator<Item = &'a DesktopFile>) -> Vec<String> {
    files.map(|f| f.name().unwrap_or_default().to_string()).collect()
}

#[test]
fn user_override_hides_system_entry() {
    let fx = Fixture::new("GNOME");
    fx.write(
        &fx.system,
        "editor.desktop",
        "[Desktop Entry]\nType=Application\nName=Editor\nExec=editor\n",
    );
    fx.write(
        &fx.user,
        "editor.desktop",
        "[Desktop Entry]\nType=Application\nName=Editor\nExec=editor\nHidden=true\n",
    );
    fx.write(
        &fx.system,
        "term.desktop",
        "[Desktop Entry]\nType=Application\nName=Terminal\nExec=term\nCategories=System;\n",
    );

    let files = Locator::new(&fx.env).by_priority();
    assert_eq!(files, vec![fx.user.join("editor.desktop"), fx.system.join("term.desktop")]);

    let catalog = Catalog::build(&fx.env);
    assert_eq!(names(catalog.category(Category::All)), vec!["Terminal"]);
    assert_eq!(names(catalog.category(Category::System)), vec!["Terminal"]);
}

#[test]
fn catalog_respects_current_desktop() {
    let kde = Fixture::new("KDE");
    let body = "[Desktop Entry]\nType=Application\nName=Konsole\nExec=konsole\nOnlyShowIn=KDE;\n";
    kde.write(&kde.system, "konsole.desktop", body);
    assert_eq!(Catalog::build(&kde.env).len(), 1);

    let xfce = Fixture::new("XFCE");
    xfce.write(&xfce.system, "konsole.desktop", body);
    assert!(Catalog::build(&xfce.env).is_empty());
}

#[test]
fn recent_and_pins_survive_reopen() {
    let fx = Fixture::new("");
    let a = fx.write(
        &fx.system,
        "a.desktop",
        "[Desktop Entry]\nType=Application\nName=A\nExec=a\n",
    );
    let b = fx.write(
        &fx.system,
        "b.desktop",
        "[Desktop Entry]\nType=Application\nName=B\nExec=b\n",
    );

    let mut recent = History::open(&fx.env, RECENT_APPS).unwrap();
    recent.touch(DesktopFile::new(&a).unwrap(), 2).unwrap();
    recent.touch(DesktopFile::new(&b).unwrap(), 2).unwrap();

    let mut pins = History::open(&fx.env, PIN_APPS).unwrap();
    pins.pin(DesktopFile::new(&a).unwrap()).unwrap();

    assert!(fx.env.home.join(".config/tuxmenu/recent-apps.json").is_file());
    assert!(fx.env.home.join(".config/tuxmenu/pin-apps.json").is_file());

    fs::remove_file(&b).unwrap();
    let recent = History::open(&fx.env, RECENT_APPS).unwrap();
    assert_eq!(names(recent.apps().iter()), vec!["A"]);
    let pins = History::open(&fx.env, PIN_APPS).unwrap();
    assert_eq!(names(pins.apps().iter()), vec!["A"]);
}
