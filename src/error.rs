//! Zone request error types

use std::io;
use thiserror::Error;

/// Result type for zone requests
pub type ZoneResult<T> = Result<T, ZoneError>;

/// Error code reported with every rejected request
pub const ZONE_ERROR_CODE: u16 = 338;

/// Errors raised while accepting a zone request.
///
/// The engine itself cannot fail; everything here is detected before it
/// runs. The display text is the fixed client-facing message, the `reason`
/// carries the detail for logs.
#[derive(Error, Debug)]
pub enum ZoneError {
    #[error("Pixels have incorrect format")]
    MalformedPixels { reason: String },

    #[error("Routers have incorrect format")]
    MalformedRouters { reason: String },

    #[error("Walls have incorrect format")]
    MalformedWalls { reason: String },

    #[error("Wall Scale have incorrect format")]
    MalformedScale { reason: String },

    #[error("Receiver coefficient has incorrect format")]
    MalformedReceiverCoef { reason: String },

    /// Request body is not JSON at all
    #[error("Request is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ZoneError {
    /// Detail behind a validation failure, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            ZoneError::MalformedPixels { reason }
            | ZoneError::MalformedRouters { reason }
            | ZoneError::MalformedWalls { reason }
            | ZoneError::MalformedScale { reason }
            | ZoneError::MalformedReceiverCoef { reason } => Some(reason),
            ZoneError::Json(_) | ZoneError::Io(_) => None,
        }
    }

    /// True for errors caused by the request content.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ZoneError::Io(_))
    }
}
