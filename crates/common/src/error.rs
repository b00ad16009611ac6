//! Error types shared across pixcam crates.
//!
//! Every variant except `Io` and `Json` signals a programming error in the
//! host: the camera state is not meant to be recovered after one of them.

/// Top-level error type for pixcam operations.
#[derive(Debug, thiserror::Error)]
pub enum PixcamError {
    #[error("Draw stage violation: can't {operation} during draw stage")]
    DrawStage { operation: &'static str },

    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("Numerical instability: {message}")]
    NumericalInstability { message: String },

    #[error("Phase error: {message}")]
    Phase { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using PixcamError.
pub type PixcamResult<T> = Result<T, PixcamError>;

impl PixcamError {
    pub fn draw_stage(operation: &'static str) -> Self {
        Self::DrawStage { operation }
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: msg.into(),
        }
    }

    pub fn numerical_instability(msg: impl Into<String>) -> Self {
        Self::NumericalInstability {
            message: msg.into(),
        }
    }

    pub fn phase(msg: impl Into<String>) -> Self {
        Self::Phase {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

/// Fails with `InvalidParameter` unless `condition` holds.
pub fn ensure(condition: bool, msg: impl Into<String>) -> PixcamResult<()> {
    if condition {
        Ok(())
    } else {
        Err(PixcamError::invalid_parameter(msg))
    }
}
