//! Error type shared by the core and its collaborators.

use std::path::PathBuf;

/// Everything that can go wrong between a landmark source, the config
/// layer and the window.
///
/// Out-of-frame fingertip positions are *not* errors; they are clamped
/// onto the grid by [`GridGeometry::cell_of`](crate::grid::GridGeometry::cell_of).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PaintError {
    /// A collaborator handed over a hand with the wrong number of points.
    #[error("malformed detection: expected {expected} landmarks, found {found}")]
    MalformedDetection { expected: usize, found: usize },

    /// A configuration value is out of its legal range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The configuration file could not be read.
    #[error("cannot read config {}: {reason}", .path.display())]
    ConfigRead { path: PathBuf, reason: String },

    /// The configuration file is not valid TOML for [`PaintConfig`](crate::config::PaintConfig).
    #[error("cannot parse config: {reason}")]
    ConfigParse { reason: String },

    /// The display window could not be created or updated.
    #[error("window error: {reason}")]
    Window { reason: String },
}

impl PaintError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        PaintError::InvalidConfig { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, PaintError>;
