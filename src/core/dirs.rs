use crate::core::error::{ExplorerError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "catalog-explorer";

pub fn get_config_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| home_dir().map(|home| home.join(".config")))?,
        "macos" => home_dir()?.join("Library/Application Support"),
        _ => dirs::config_dir().ok_or_else(|| missing("config"))?,
    };

    Ok(base.join(APP_DIR))
}

pub fn get_data_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|_| home_dir().map(|home| home.join(".local/share")))?,
        "macos" => home_dir()?.join("Library/Application Support"),
        _ => dirs::data_dir().ok_or_else(|| missing("data"))?,
    };

    Ok(base.join(APP_DIR))
}

pub fn get_cache_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .or_else(|_| home_dir().map(|home| home.join(".cache")))?,
        "macos" => home_dir()?.join("Library/Caches"),
        _ => dirs::cache_dir().ok_or_else(|| missing("cache"))?,
    };

    Ok(base.join(APP_DIR))
}

/// Per-catalog session directory, so two catalogs never share a displayed list.
pub fn get_session_directory(api_url: &str) -> Result<PathBuf> {
    let catalog_hash = format!("{:x}", md5::compute(api_url.as_bytes()));
    log::debug!("get_session_directory: api_url = {api_url:?}, hash = {catalog_hash}");
    Ok(get_cache_directory()?.join(catalog_hash))
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| missing("home"))
}

fn missing(kind: &str) -> ExplorerError {
    ExplorerError::config_error(format!("Could not determine the {kind} directory"))
}
