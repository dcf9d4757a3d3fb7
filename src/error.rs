use thiserror::Error;

pub type ScaleResult<T> = Result<T, ScaleError>;

/// Failures raised at the configuration and rendering boundaries.
///
/// The numeric core never produces these: degenerate input there degrades to
/// empty divisions or clamped values instead.
#[derive(Debug, Error)]
pub enum ScaleError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}
