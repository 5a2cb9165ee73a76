//! Config file location.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Application directory under the config root.
const APP_DIR: &str = "cinedex";

/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// Lookup order:
/// 1. `{dir}/config.toml` when `--dir` is given.
/// 2. `$XDG_CONFIG_HOME/cinedex/config.toml` when set to an absolute path.
/// 3. `$HOME/.config/cinedex/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is usable
/// (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    config_path_from(
        dir.map(PathBuf::as_path),
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

fn config_path_from(
    dir: Option<&Path>,
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }

    // Relative XDG values are invalid and get ignored.
    let xdg = xdg_config_home
        .map(PathBuf::from)
        .filter(|p| p.is_absolute());
    if let Some(root) = xdg {
        return Ok(root.join(APP_DIR).join(CONFIG_FILE));
    }

    match home.filter(|h| !h.is_empty()) {
        Some(h) => Ok(PathBuf::from(h).join(".config").join(APP_DIR).join(CONFIG_FILE)),
        None => bail!("cannot locate config directory: neither XDG_CONFIG_HOME nor HOME is set"),
    }
}
