/// Top-level startup and runtime errors.

use crate::config::ConfigError;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// The terminal could not provide a drawable area large enough for the
    /// play field.  Raised before anything is drawn.
    #[error("rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("terminal I/O error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
