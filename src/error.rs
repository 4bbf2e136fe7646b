//! Setup failures
//!
//! Only initialization can fail. Once the render loop runs, every tick is
//! infallible and surface hiccups are handled in place.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no browser window available")]
    NoWindow,

    #[error("no document attached to the window")]
    NoDocument,

    #[error("no element with id '{0}'")]
    CanvasNotFound(String),

    #[error("element '{0}' is not a canvas")]
    NotACanvas(String),

    #[error("failed to create drawing surface: {0}")]
    Surface(String),

    #[error("no compatible GPU adapter: {0}")]
    Adapter(String),

    #[error("failed to create GPU device: {0}")]
    Device(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
