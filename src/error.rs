//! Error types for asyncware.

use thiserror::Error;

use crate::pipeline::Registration;

/// Opaque error value carried through a handler chain.
///
/// Handlers fail with whatever error type they like; the chain only needs
/// `Display` to render it and `Send + Sync` to cross task boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for all asyncware operations.
#[derive(Debug, Error)]
pub enum AsyncwareError {
    /// The underlying listener failed to bind/start.
    #[error("listener failed to start: {0}")]
    Listen(BoxError),

    /// The listener went away before signaling readiness or failure.
    #[error("listener closed before signaling readiness")]
    ListenAborted,

    /// No async-aware variant was added for this registration method.
    #[error("no async variant was added for `{0}`")]
    NotDecorated(Registration),

    /// Route arguments could not be partitioned into path + handlers.
    #[error("invalid route arguments: {0}")]
    InvalidRoute(String),
}

/// Result type alias using AsyncwareError.
pub type Result<T> = std::result::Result<T, AsyncwareError>;
