//! Error types for conversion and project merging

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("No path element found in SVG")]
    NoPathElement,

    #[error("Path has no data (d) attribute")]
    MissingPathData,

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid project document: {0}")]
    InvalidProject(String),
}

impl ConvertError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
