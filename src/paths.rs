//! Per-user locations for the optional config file and the log file.

use crate::constants::{APP_NAME, CONFIG_FILE_NAME, LOG_FILE_NAME};
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::PathBuf;

fn project_dirs() -> io::Result<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })
}

/// Where `config.json` is looked up when `--config` is not given.
pub fn default_config_path() -> io::Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
}

/// Log file path, creating its directory if needed.
pub fn log_path() -> io::Result<PathBuf> {
    let dirs = project_dirs()?;
    let dir = dirs.data_local_dir();
    fs::create_dir_all(dir)?;
    Ok(dir.join(LOG_FILE_NAME))
}
