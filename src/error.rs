use thiserror::Error;

/// Errors raised by the moon widget and its desktop host.
#[derive(Debug, Error)]
pub enum MoonError {
    /// A packed measure spec carried the reserved mode bits `0b11`.
    #[error("unrecognized measure mode bits {0:#x}")]
    UnrecognizedMeasureMode(u32),

    #[error("invalid ARGB color `{0}`, expected 8 hex digits like FFFFFF00")]
    InvalidColor(String),

    #[error("invalid value `{value}` for {flag}")]
    InvalidArgument { flag: &'static str, value: String },

    #[error("max framerate must be positive and finite, got {0}")]
    InvalidFramerate(f64),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("framebuffer error: {0}")]
    Pixels(#[from] pixels::Error),
}

pub type Result<T> = std::result::Result<T, MoonError>;
