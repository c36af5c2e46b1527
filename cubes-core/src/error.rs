/// Error types for scene loading and screenshot output
use thiserror::Error;

use crate::surface::PixelSize;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scene config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("frame buffer of {len} bytes does not match {size}")]
    FrameSize { size: PixelSize, len: usize },
}
