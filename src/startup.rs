//! Run-at-login registration via the user's Startup folder.
//!
//! A plain `.url` internet-shortcut file pointing at the executable; no
//! registry writes, no COM shortcut objects. Failure to register is logged
//! and otherwise ignored: the app still works for the current session.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the shortcut for `app_name`.
pub fn shortcut_file_name(app_name: &str) -> String {
    format!("{app_name}.url")
}

/// Contents of the `.url` file for an executable path.
pub fn shortcut_contents(exe_path: &str) -> String {
    format!(
        "[InternetShortcut]\r\nURL=file:///{}\r\n",
        exe_path.replace('\\', "/")
    )
}

/// Write the shortcut into `dir` (creating nothing but the file).
pub fn write_shortcut(dir: &Path, app_name: &str, exe_path: &str) -> io::Result<PathBuf> {
    let path = dir.join(shortcut_file_name(app_name));
    fs::write(&path, shortcut_contents(exe_path))?;
    Ok(path)
}

/// Remove the shortcut from `dir` if present.
pub fn remove_shortcut(dir: &Path, app_name: &str) -> io::Result<()> {
    let path = dir.join(shortcut_file_name(app_name));
    match fs::remove_file(&path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// The per-user Startup folder.
#[cfg(target_os = "windows")]
fn startup_dir() -> Option<PathBuf> {
    let appdata = std::env::var_os("APPDATA")?;
    Some(
        PathBuf::from(appdata)
            .join("Microsoft")
            .join("Windows")
            .join("Start Menu")
            .join("Programs")
            .join("Startup"),
    )
}

/// Register `exe_path` to start at login. Best effort.
#[cfg(target_os = "windows")]
pub fn register(app_name: &str, exe_path: &Path) {
    let Some(dir) = startup_dir() else {
        log::warn!("APPDATA not set; skipping startup registration");
        return;
    };
    match write_shortcut(&dir, app_name, &exe_path.to_string_lossy()) {
        Ok(path) => log::debug!("startup shortcut written to {}", path.display()),
        Err(e) => log::warn!("startup registration failed: {e}"),
    }
}

/// Remove the login-start entry. Best effort.
#[cfg(target_os = "windows")]
pub fn unregister(app_name: &str) {
    let Some(dir) = startup_dir() else {
        return;
    };
    if let Err(e) = remove_shortcut(&dir, app_name) {
        log::warn!("startup unregistration failed: {e}");
    }
}
