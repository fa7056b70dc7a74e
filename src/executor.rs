use crate::config::Config;
use crate::entry::DesktopFile;
use crate::error::{Error, Result};
use crate::sources::history::History;
use log::info;
use std::process::{Command, Stdio};

/// Argument vector for an `Exec` value.
///
/// Field codes (`%f`, `%U`, ...) are dropped, surrounding quotes trimmed and
/// the rest split on whitespace.
pub fn command_line(exec: &str) -> Vec<String> {
    let stripped: Vec<&str> = exec
        .split_whitespace()
        .filter(|arg| !arg.starts_with('%'))
        .collect();
    stripped
        .join(" ")
        .trim()
        .trim_matches('"')
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Full argument vector for `file`, wrapped in the configured terminal when
/// the entry asks for one.
pub fn build_command(file: &DesktopFile, config: &Config) -> Result<Vec<String>> {
    let exec = file.exec().ok_or_else(|| Error::NoExec {
        path: file.path().to_path_buf(),
    })?;

    let mut cmd_parts = Vec::new();
    let in_terminal = file
        .desktop_entry()
        .and_then(|entry| entry.get("Terminal"))
        == Some("true");
    if in_terminal {
        if let Some(term_cmd) = &config.general.terminal {
            cmd_parts.extend(term_cmd.split_whitespace().map(str::to_string));
        }
    }
    cmd_parts.extend(command_line(exec));

    if cmd_parts.is_empty() {
        return Err(Error::NoExec {
            path: file.path().to_path_buf(),
        });
    }
    Ok(cmd_parts)
}

/// Spawns `file` without waiting for it to exit.
pub fn execute(file: &DesktopFile, config: &Config) -> Result<()> {
    let cmd_parts = build_command(file, config)?;

    let mut command = Command::new(&cmd_parts[0]);
    command
        .args(&cmd_parts[1..])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    if let Some(dir) = file.desktop_entry().and_then(|entry| entry.get("Path")) {
        if !dir.is_empty() {
            command.current_dir(dir);
        }
    }

    info!("Launching {:?}", cmd_parts);
    command.spawn().map_err(|source| Error::Launch {
        command: cmd_parts.join(" "),
        source,
    })?;
    Ok(())
}

/// Records `file` as the most recent app, then launches it.
pub fn launch(file: &DesktopFile, config: &Config, recent: &mut History) -> Result<()> {
    recent.touch(file.clone(), config.general.recent_limit)?;
    execute(file, config)
}
