//! Error type for payload emission.

use thiserror::Error;

/// Raised when a response sink cannot accept a payload.
///
/// Controllers never recover from it; it surfaces to whoever invoked the
/// controller action.
#[derive(Error, Debug)]
pub enum InvocationError {
    /// The sink has no emit capability (e.g. a body-less `HEAD` response).
    #[error("Sink cannot emit: {0}")]
    MissingCapability(String),

    /// A single-shot sink was emitted into twice.
    #[error("Response already sent")]
    AlreadySent,

    /// The payload could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The underlying transport failed.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<std::io::Error> for InvocationError {
    fn from(e: std::io::Error) -> Self {
        InvocationError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for InvocationError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            InvocationError::Transport(e.to_string())
        } else {
            InvocationError::Serialization(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_maps_to_transport() {
        let err: InvocationError =
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed").into();
        assert!(matches!(err, InvocationError::Transport(ref msg) if msg.contains("pipe closed")));
    }

    #[test]
    fn test_json_error_maps_to_serialization() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: InvocationError = json_err.into();
        assert!(matches!(err, InvocationError::Serialization(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(InvocationError::AlreadySent.to_string(), "Response already sent");
        assert_eq!(
            InvocationError::MissingCapability("HEAD".into()).to_string(),
            "Sink cannot emit: HEAD"
        );
    }
}
