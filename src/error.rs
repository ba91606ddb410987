//! Error types for the unibar library.

use std::io;
use thiserror::Error;

/// Result type alias for unibar operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while configuring, encoding, or rendering
/// a barcode symbol.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while writing to an output sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A configuration value is malformed or inconsistent.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A required configuration key is absent and no default was supplied.
    #[error("Missing configuration key: {0}")]
    MissingKey(String),

    /// The message cannot be encoded by the selected symbology.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The message contains a character outside the symbology's alphabet.
    #[error("Character {ch:?} is not valid in {symbology}")]
    UnsupportedCharacter {
        /// The offending character.
        ch: char,
        /// Name of the symbology that rejected it.
        symbology: &'static str,
    },

    /// The trailing check character does not match the computed checksum.
    #[error("Checksum mismatch: expected {expected:?}, found {found:?}")]
    ChecksumMismatch {
        /// The check character the algorithm computed.
        expected: char,
        /// The check character found in the message.
        found: char,
    },

    /// A canvas backend could not be constructed.
    #[error("Canvas setup error: {0}")]
    CanvasSetup(String),

    /// A programmatically supplied parameter is out of its accepted range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No symbology is registered under the given name.
    #[error("Unknown symbology: {0}")]
    UnknownSymbology(String),

    /// Encoding a raster image failed.
    #[error("Image encoding error: {0}")]
    ImageEncode(String),
}

impl From<png::EncodingError> for Error {
    fn from(err: png::EncodingError) -> Self {
        match err {
            png::EncodingError::IoError(e) => Error::Io(e),
            other => Error::ImageEncode(other.to_string()),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageEncode(err.to_string())
    }
}
