//! Configuration paths for the dagschema tool.
//!
//! ```text
//! ~/.dagschema/
//! └── registry.json   # Projects, phases, workers and links
//! ```
//!
//! # Environment Variables
//!
//! - `DAGSCHEMA_STATE_DIR`: Override the state directory
//! - `DAGSCHEMA_REGISTRY`: Override the registry file
//!
//! Both are also read from `.env.local` in the working directory.

use std::path::{Path, PathBuf};

/// File loaded into the environment at startup, if present.
pub const ENV_FILE: &str = ".env.local";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".dagschema";

/// Registry file name inside the state directory.
const REGISTRY_FILE: &str = "registry.json";

/// Loads `.env.local` into the process environment if it exists.
///
/// Runs before logging is set up, so failures are ignored.
pub fn load_env() {
    let _ = dotenvy::from_filename(ENV_FILE);
}

/// Resolves the state directory.
///
/// Uses the explicit override if given, else `~/.dagschema`, else
/// `.dagschema` in the current directory.
pub fn state_dir(explicit: Option<&Path>) -> PathBuf {
    explicit.map(Path::to_path_buf).unwrap_or_else(|| {
        dirs::home_dir()
            .map(|h| h.join(DEFAULT_STATE_DIR))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
    })
}

/// Resolves the registry file: the explicit path, or `registry.json` in the state directory.
pub fn registry_file(explicit: Option<&Path>, state_dir: &Path) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| state_dir.join(REGISTRY_FILE))
}
