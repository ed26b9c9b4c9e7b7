use thiserror::Error;

/// Errors surfaced by the canvas engine.
///
/// None of these are fatal: empty strokes, empty history and stale host
/// commands are reported through `Ok` values instead.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("canvas buffer has not been initialized")]
    Uninitialized,

    #[error("canvas buffer is already initialized")]
    AlreadyInitialized,

    #[error("invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse engine configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to read engine configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;
