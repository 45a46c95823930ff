use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArtError>;

#[derive(Error, Debug)]
pub enum ArtError {
    #[error("Character set is empty")]
    EmptySet,

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    #[error("Invalid resolution: {columns} columns for a {width}x{height} image")]
    InvalidResolution { columns: u32, width: u32, height: u32 },

    #[error("Failed to load image '{source_name}': {reason}")]
    ImageLoad { source_name: String, reason: String },

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Font error: {0}")]
    FontLoad(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
