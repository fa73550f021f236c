//! Cache directory resolution
//!
//! The client has no config file; the only tunable is where cached API
//! responses live. Resolution priority order:
//! 1. Command-line argument (highest priority)
//! 2. `IGNITE_CACHE_DIR` environment variable
//! 3. OS-dependent application data directory (fallback)

use crate::Result;
use std::path::{Path, PathBuf};

/// Environment variable overriding the cache directory
pub const CACHE_DIR_ENV_VAR: &str = "IGNITE_CACHE_DIR";

/// Resolve the directory holding cached API responses.
pub fn resolve_cache_dir(cli_arg: Option<&Path>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CACHE_DIR_ENV_VAR) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: OS-dependent application data directory
    default_cache_dir()
}

/// OS-dependent default cache directory
///
/// Linux: ~/.local/share/ignite-schedule/cache
/// macOS: ~/Library/Application Support/ignite-schedule/cache
/// Windows: %LOCALAPPDATA%\ignite-schedule\cache
fn default_cache_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("ignite-schedule").join("cache"))
        .unwrap_or_else(|| PathBuf::from("./ignite_cache"))
}

/// Create the cache directory if it does not exist yet.
pub fn ensure_cache_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        tracing::info!("Creating cache directory: {}", dir.display());
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
