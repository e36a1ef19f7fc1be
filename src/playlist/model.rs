use std::path::Path;

/// A playable audio file, identified by its path string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Track {
    path: String,
}

impl Track {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.path)
    }

    /// File name without extension, used for the status line and the
    /// playlist panel.
    pub fn title(&self) -> &str {
        self.as_path()
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.path)
    }
}
