//! File logging; the terminal belongs to the UI.

use std::fs::{self, File};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `HALO_LOG=debug`.
const LOG_ENV: &str = "HALO_LOG";

/// Install a subscriber writing to `halo.log` in the local data directory.
///
/// Logging stays off when the directory or file cannot be created.
pub fn init() {
    let Some(dirs) = ProjectDirs::from("", "", "halo") else {
        return;
    };
    let dir = dirs.data_local_dir();
    if fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join("halo.log")) else {
        return;
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
