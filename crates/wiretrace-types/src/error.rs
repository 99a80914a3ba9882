use thiserror::Error;

/// Result type for wiretrace operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced across the normalization boundary
///
/// Only the last two variants involve I/O; the normalizers themselves never
/// produce them.
#[derive(Error, Debug)]
pub enum Error {
    /// Exchange carries nothing that can be normalized
    #[error("Normalization error: {0}")]
    Normalization(String),

    /// Protocol tag is not one of the known protocols
    #[error("Unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    /// Protocol tag names a different protocol than the exchange carries
    #[error("Protocol mismatch: requested {expected}, exchange is {found}")]
    ProtocolMismatch { expected: String, found: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Stable machine-readable code for the output boundary
    pub fn code(&self) -> &'static str {
        match self {
            Error::Normalization(_) => "normalization_failed",
            Error::UnsupportedProtocol(_) => "unsupported_protocol",
            Error::ProtocolMismatch { .. } => "protocol_mismatch",
            Error::Io(_) => "io_error",
            Error::Json(_) => "invalid_json",
        }
    }
}
