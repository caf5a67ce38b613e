//! Error types for scene construction and the headless driver.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("no eligible terrain point within {half_extent} units of the origin")]
    NoEligibleTerrainPoint { half_extent: f32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to write snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SceneError>;
