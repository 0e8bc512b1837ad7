//! Error types for noise generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for noise generation operations.
pub type NoiseResult<T> = Result<T, NoiseError>;

/// Errors that can occur while generating a noise file.
///
/// An encoder that runs and exits non-zero is not represented here: its
/// status is forwarded to the caller as part of a completed run.
#[derive(Debug, Error)]
pub enum NoiseError {
    /// Encoder executable not found.
    #[error("{program} not available")]
    EncoderNotFound { program: String },

    /// Audio parameters rejected before any file was touched.
    #[error("Invalid audio parameters: {message}")]
    InvalidParams { message: String },

    /// Payload does not fit the container's 32-bit chunk sizes.
    #[error("Container payload of {bytes} bytes exceeds the AIFF chunk size limit")]
    ContainerTooLarge { bytes: u64 },

    /// Failed to write the uncompressed container.
    #[error("Failed to write container {path}: {source}")]
    WriteContainerFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to spawn the encoder process.
    #[error("Failed to spawn encoder {program}: {source}")]
    SpawnFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl NoiseError {
    /// Creates a new encoder not found error.
    pub fn encoder_not_found(program: impl Into<String>) -> Self {
        Self::EncoderNotFound {
            program: program.into(),
        }
    }

    /// Creates a new invalid parameters error.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    /// Creates a new container write error.
    pub fn write_container_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteContainerFailed {
            path: path.into(),
            source,
        }
    }

    /// Stable identifier for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            NoiseError::EncoderNotFound { .. } => "NOISEGEN_001",
            NoiseError::InvalidParams { .. } => "NOISEGEN_002",
            NoiseError::ContainerTooLarge { .. } => "NOISEGEN_003",
            NoiseError::WriteContainerFailed { .. } => "NOISEGEN_004",
            NoiseError::SpawnFailed { .. } => "NOISEGEN_005",
        }
    }
}
