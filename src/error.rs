use thiserror::Error;

/// Main error type for the KalaKini Booth library
#[derive(Error, Debug)]
pub enum BoothError {
    #[error("Frame acquisition error: {0}")]
    Acquisition(#[from] AcquisitionError),

    #[error("Image decoding error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    #[error("Image encoding error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Camera / frame source errors
#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("No frame available: {reason}")]
    Unavailable { reason: String },

    #[error("Frame source has been released")]
    Released,
}

/// Errors turning bytes or buffers into a raster image
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed image data: {reason}")]
    Malformed { reason: String },

    #[error("Image has no pixels: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("Pixel buffer of {actual} bytes does not match {width}x{height} RGBA ({expected} bytes)")]
    BufferMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Caller contract violations
#[derive(Error, Debug)]
pub enum InvalidInputError {
    #[error("Expected exactly {expected} photos, got {actual}")]
    PhotoCount { expected: usize, actual: usize },

    #[error("Unknown filter: {name}")]
    UnknownFilter { name: String },

    #[error("No photo strip has been composed yet")]
    StripNotReady,

    #[error("Not a plain file name: {name:?}")]
    InvalidFilename { name: String },
}

/// Errors producing encoded output
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Failed to encode {format}: {reason}")]
    Failed { format: String, reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using BoothError
pub type Result<T> = std::result::Result<T, BoothError>;

impl BoothError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (the user can simply try again)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            // A missing frame or a bad capture only loses that one attempt
            Self::Acquisition(_) => true,
            Self::Decode(_) => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Acquisition(AcquisitionError::Unavailable { .. }) => {
                "Could not read a frame from the camera. Check that it is connected and allowed.".to_string()
            }
            Self::Acquisition(AcquisitionError::Released) => {
                "The camera has been stopped. Start it again to keep taking photos.".to_string()
            }
            Self::Decode(_) => {
                "That photo could not be read and was discarded. Please take it again.".to_string()
            }
            Self::InvalidInput(InvalidInputError::UnknownFilter { name }) => {
                format!(
                    "Filter '{}' not found. Available filters: none, vintage, bright, smooth, hearts, stars, sparkles",
                    name
                )
            }
            Self::InvalidInput(InvalidInputError::InvalidFilename { name }) => {
                format!("'{}' cannot be used as a file name. Use a name without folders.", name)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
