use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use resolve_unc::{DriveMapper, MountTable};
use tracing::{debug, warn};

/// Resolves `raw` and starts the terminal with the result as its working
/// directory.
///
/// Resolution failures are not fatal here: the terminal is started with the
/// raw path instead, except for a network path the parser cannot split, which
/// on Windows goes through the pushd launcher so `cmd` can reach it anyway.
pub fn run<T: MountTable>(
    mapper: &DriveMapper<T>,
    terminal: Option<&Path>,
    raw: &str,
) -> Result<()> {
    let terminal = locate_terminal(terminal)?;

    let cwd = match mapper.resolve(raw) {
        Ok(resolved) => {
            println!("{}", resolved.local_path);
            resolved.local_path
        }
        #[cfg(windows)]
        Err(resolve_unc::Unresolved::UnparsablePath) => {
            warn!(path = raw, "unparsable network path, using the pushd launcher");
            return start_pushd_launcher(raw, &terminal);
        }
        Err(reason) => {
            warn!(%reason, path = raw, "resolution failed, keeping the raw path");
            raw.to_string()
        }
    };

    debug!(terminal = %terminal.display(), %cwd, "starting terminal");
    Command::new(&terminal)
        .arg("start")
        .arg("--cwd")
        .arg(&cwd)
        .spawn()
        .with_context(|| format!("failed to start {}", terminal.display()))?;
    Ok(())
}

fn locate_terminal(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Ok(found) = which::which("wezterm-gui") {
        return Ok(found);
    }
    #[cfg(windows)]
    {
        // Stock WezTerm install location.
        let fixed = Path::new(r"C:\Program Files\WezTerm\wezterm-gui.exe");
        if fixed.exists() {
            return Ok(fixed.to_path_buf());
        }
    }
    bail!("no terminal emulator found; pass --terminal");
}

/// Writes a batch script that `pushd`s into `path` (letting `cmd` create its
/// own temporary mapping) and starts the terminal from whatever directory
/// that produced.
#[cfg(windows)]
fn write_pushd_script(dir: &Path, path: &str, terminal: &Path) -> std::io::Result<PathBuf> {
    let script = dir.join("resolve_unc_launcher.bat");
    let body = format!(
        "@echo off\r\npushd \"{path}\"\r\n\"{terminal}\" start --cwd \"%CD%\"\r\npopd\r\n",
        terminal = terminal.display(),
    );
    std::fs::write(&script, body)?;
    Ok(script)
}

#[cfg(windows)]
fn start_pushd_launcher(path: &str, terminal: &Path) -> Result<()> {
    let script = write_pushd_script(&std::env::temp_dir(), path, terminal)
        .context("failed to write the pushd launcher script")?;
    debug!(script = %script.display(), "starting the pushd launcher");
    Command::new("cmd")
        .arg("/C")
        .arg(&script)
        .spawn()
        .context("failed to start the pushd launcher")?;
    Ok(())
}
