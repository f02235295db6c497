/// Core error types for tradecard.
use std::path::PathBuf;

/// A specialized Result type for tradecard operations.
pub type TradecardResult<T> = Result<T, TradecardError>;

/// Top-level error type encompassing all tradecard subsystems.
///
/// Asset and font problems during a render are recovered locally and never
/// reach this type; what remains are configuration, input and output failures.
#[derive(Debug, thiserror::Error)]
pub enum TradecardError {
    #[error("render error: {0}")]
    Render(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("asset error: {message} ({path:?})")]
    Asset { message: String, path: PathBuf },

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TradecardError {
    /// Create an asset error.
    pub fn asset(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        TradecardError::Asset {
            message: message.into(),
            path: path.into(),
        }
    }
}
