use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Invalid map dimensions {width}x{height}: both must be greater than zero")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid growth bias {0}: expected a value in [1, 100]")]
    InvalidGrowthBias(u32),

    #[error("Invalid number of maps {0}: expected a value greater than zero")]
    InvalidBatchSize(usize),

    /// Нарушение внутреннего инварианта генератора: выбор из пустого множества.
    #[error("Cannot pick a coordinate from an empty available set")]
    EmptyAvailableSet,

    #[error("Malformed grid: {0}")]
    MalformedGrid(String),

    #[error("Failed to write file {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Image for {width}x{height} map with {cell_size}px cells is too large")]
    ImageTooLarge {
        width: u32,
        height: u32,
        cell_size: u32,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, MapError>;
