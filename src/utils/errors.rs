use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Media not found: {0}")]
    MediaNotFound(String),

    #[error("Episode not found: {0}")]
    EpisodeNotFound(String),

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors surfaced by the playback engine. They are kept as player state
/// rather than propagated across the component boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The transport refused to start playback (autoplay policy, permissions).
    #[error("Playback could not start: {0}")]
    StartRejected(String),

    /// The media failed to load or decode.
    #[error("Error playing video: {0}")]
    Transport(String),

    #[error("Fullscreen unavailable: {0}")]
    Fullscreen(String),

    #[error("No playable source for this title")]
    NoSource,
}

impl PlaybackError {
    /// Terminal errors replace the whole player with the error view.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlaybackError::Transport(_) | PlaybackError::NoSource)
    }
}
