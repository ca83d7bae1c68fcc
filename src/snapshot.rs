use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::units::{DisplayUnit, UnitGrid};

pub const DEFAULT_FILE_NAME: &str = "matrix_radar_state.json";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("snapshot encoding: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flat JSON snapshot of the whole grid.
pub struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Default location: next to the executable.
    pub fn default_path() -> PathBuf {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join(DEFAULT_FILE_NAME);
            }
        }
        PathBuf::from(DEFAULT_FILE_NAME)
    }

    /// Loads the stored grid. Anything missing, unreadable or of the wrong
    /// shape yields the defaults.
    pub fn load(&self) -> UnitGrid {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no snapshot yet, starting from defaults");
                return UnitGrid::new();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "snapshot unreadable, using defaults");
                return UnitGrid::new();
            }
        };
        match decode(&text) {
            Some(grid) => {
                tracing::info!(path = %self.path.display(), lit = grid.lit_count(), "snapshot loaded");
                grid
            }
            None => {
                tracing::warn!(path = %self.path.display(), "discarding incompatible snapshot");
                UnitGrid::new()
            }
        }
    }

    /// Writes the grid via a sibling temp file and a rename.
    pub fn save(&self, units: &[DisplayUnit]) -> Result<(), SnapshotError> {
        let json = serde_json::to_string(units)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| SnapshotError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| SnapshotError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "snapshot written");
        Ok(())
    }
}

fn decode(text: &str) -> Option<UnitGrid> {
    let units: Vec<DisplayUnit> = serde_json::from_str(text).ok()?;
    UnitGrid::from_units(units).ok()
}
