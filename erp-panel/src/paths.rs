//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "br";
const ORGANIZATION: &str = "erp";
const APPLICATION: &str = "erp-panel";

/// Old log files kept next to `latest.log`.
pub const MAX_OLD_LOGS: usize = 25;

const LATEST_LOG: &str = "latest.log";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Cache directory, home of the log files.
///
/// - Linux: `$XDG_CACHE_HOME/erp-panel` or `~/.cache/erp-panel`
/// - macOS: `~/Library/Caches/br.erp.erp-panel`
/// - Windows: `C:\Users\<User>\AppData\Local\erp\erp-panel\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Configuration directory.
///
/// - Linux: `$XDG_CONFIG_HOME/erp-panel` or `~/.config/erp-panel`
/// - macOS: `~/Library/Application Support/br.erp.erp-panel`
/// - Windows: `C:\Users\<User>\AppData\Roaming\erp\erp-panel\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default location of `config.toml`.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Path of the current log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archive `latest.log` under a timestamped name and prune old logs.
///
/// Call at startup, before the new log file is created.
pub fn rotate_logs() {
    if let Some(cache) = cache_dir() {
        rotate_logs_in(&cache, MAX_OLD_LOGS);
    }
}

/// Rotation on an explicit directory.
pub fn rotate_logs_in(dir: &Path, keep: usize) {
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let archived = dir.join(format!("{timestamp}.log"));
        if let Err(e) = fs::rename(&latest, &archived) {
            eprintln!("cannot archive {}: {e}", latest.display());
        }
    }
    prune_logs(dir, keep);
}

/// Keep only the `keep` most recently modified archived logs.
fn prune_logs(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();
    if logs.len() <= keep {
        return;
    }

    logs.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());
    for entry in logs.iter().take(logs.len() - keep) {
        let _ = fs::remove_file(entry.path());
    }
}
