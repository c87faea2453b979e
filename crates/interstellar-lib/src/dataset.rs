use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::db::{load_json_snapshot, load_snapshot, Snapshot};
use crate::error::{Error, Result};

/// Default filename for the dataset inside a data directory.
const DATASET_FILENAME: &str = "interstellar.db";

/// Environment variable overriding the dataset location.
pub const DATASET_ENV_VAR: &str = "INTERSTELLAR_DATASET";

/// On-disk encodings a snapshot can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Sqlite,
    Json,
}

impl DatasetFormat {
    /// Pick the format from the file extension; anything but `.json` is SQLite.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DatasetFormat::Json,
            _ => DatasetFormat::Sqlite,
        }
    }
}

/// Resolve the default dataset location using platform-specific project directories.
pub fn default_dataset_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "discovery", "interstellar")
        .ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATASET_FILENAME))
}

/// Resolve which dataset file to read.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `INTERSTELLAR_DATASET` environment variable.
/// 3. Platform-specific project data directory.
///
/// Directories resolve to `interstellar.db` inside them.
pub fn resolve_dataset_path(target: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = target {
        return Ok(canonical_dataset_path(explicit));
    }

    if let Some(env_path) = env::var_os(DATASET_ENV_VAR) {
        return Ok(canonical_dataset_path(Path::new(&env_path)));
    }

    default_dataset_path()
}

/// Resolve and load a snapshot in one step.
pub fn load_dataset(target: Option<&Path>) -> Result<Snapshot> {
    let path = resolve_dataset_path(target)?;
    load_dataset_file(&path)
}

/// Load a snapshot from `path`, picking the reader from the extension.
pub fn load_dataset_file(path: &Path) -> Result<Snapshot> {
    if !path.is_file() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    let format = DatasetFormat::for_path(path);
    debug!(path = %path.display(), ?format, "reading dataset");
    match format {
        DatasetFormat::Json => load_json_snapshot(path),
        DatasetFormat::Sqlite => load_snapshot(path),
    }
}

fn canonical_dataset_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.join(DATASET_FILENAME);
    }
    path.to_path_buf()
}
