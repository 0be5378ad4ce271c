//! Diagnostic logging.
//!
//! The chat view owns the terminal, so diagnostics go to a file instead of
//! stderr. The filter comes from `CUTIE_LOG` and defaults to `cutie=info`.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "CUTIE_LOG";
const DEFAULT_FILTER: &str = "cutie=info";

/// Default log location under the platform's local data directory.
pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "cutie", "cutie").map(|dirs| dirs.data_local_dir().join("cutie.log"))
}

fn open_log_file(path: &Path) -> Result<File, Box<dyn std::error::Error>> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing to `log_file`, or to the default
/// location when none is given. Returns the path in use.
///
/// Without a usable path logging stays disabled; the chat still works.
pub fn init_logging(log_file: Option<&Path>) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    let path = match log_file.map(Path::to_path_buf).or_else(default_log_path) {
        Some(path) => path,
        None => return Ok(None),
    };

    let file = open_log_file(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| -> Box<dyn std::error::Error> { err })?;

    Ok(Some(path))
}
