/// Result alias that carries the custom [`MorseBlinkError`] type.
pub type Result<T> = std::result::Result<T, MorseBlinkError>;

/// Common error type for the core crate.
///
/// Building a schedule, looking up the light state and driving the poll timer
/// are total operations. Only loading configuration and asking an audio source
/// to start can fail.
#[derive(Debug, thiserror::Error)]
pub enum MorseBlinkError {
    /// Configuration values that cannot drive a timeline.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// The audio source refused to start, e.g. because of an autoplay policy.
    #[error("playback was rejected: {0}")]
    PlaybackRejected(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Wrapper around preset (de)serialisation errors.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl MorseBlinkError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }
}
