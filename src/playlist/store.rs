//! Flat-file persistence: one absolute path per line, UTF-8, append-only.
//!
//! Membership is re-checked against the file on every append
//! (read-modify-append). This assumes a single writing process.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read playlist {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write playlist {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    Added,
    AlreadyPresent,
}

#[derive(Debug, Clone)]
pub struct PlaylistStore {
    path: PathBuf,
}

impl PlaylistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all stored paths in file order. A missing file is an empty
    /// playlist.
    pub fn load(&self) -> Result<Vec<String>, StoreError> {
        let content = self.read_raw()?;
        Ok(content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Append `track_path` unless the file already holds that exact line.
    pub fn append(&self, track_path: &str) -> Result<AppendOutcome, StoreError> {
        let content = self.read_raw()?;
        if content.lines().any(|l| l == track_path) {
            return Ok(AppendOutcome::AlreadyPresent);
        }

        let write_err = |source: io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_err)?;

        // Repair a hand-edited file whose last line lacks its newline.
        let mut line = String::with_capacity(track_path.len() + 2);
        if !content.is_empty() && !content.ends_with('\n') {
            line.push('\n');
        }
        line.push_str(track_path);
        line.push('\n');
        file.write_all(line.as_bytes()).map_err(write_err)?;

        debug!(path = %track_path, store = %self.path.display(), "appended track");
        Ok(AppendOutcome::Added)
    }

    fn read_raw(&self) -> Result<String, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(s) => Ok(s),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
