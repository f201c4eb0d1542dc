use crate::output::handle::RenderOutputHandle;

/// Convenience result type used across softblit.
pub type BlitResult<T> = Result<T, BlitError>;

/// Why a [`RenderOutputHandle`] was rejected by the output registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleFault {
    /// The handle is [`RenderOutputHandle::INVALID`].
    Sentinel,
    /// The registry never minted this handle.
    NeverIssued,
    /// The handle was live once but has since been destroyed.
    Destroyed,
}

impl std::fmt::Display for HandleFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Sentinel => "invalid sentinel",
            Self::NeverIssued => "never issued",
            Self::Destroyed => "already destroyed",
        };
        f.write_str(s)
    }
}

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum BlitError {
    /// Invalid caller-provided geometry, buffers, or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Lifecycle misuse of a render output handle.
    #[error("invalid output handle {handle}: {fault}")]
    InvalidHandle {
        /// The rejected handle.
        handle: RenderOutputHandle,
        /// Classification of the misuse.
        fault: HandleFault,
    },

    /// An image asset could not be loaded or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// The presentation sink refused a request.
    #[error("sink error: {0}")]
    Sink(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlitError {
    /// Build a [`BlitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BlitError::InvalidHandle`] value.
    pub fn invalid_handle(handle: RenderOutputHandle, fault: HandleFault) -> Self {
        Self::InvalidHandle { handle, fault }
    }

    /// Build a [`BlitError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`BlitError::Sink`] value.
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }

    /// Build a [`BlitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return the handle fault if this is a lifecycle error.
    pub fn handle_fault(&self) -> Option<HandleFault> {
        match self {
            Self::InvalidHandle { fault, .. } => Some(*fault),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
