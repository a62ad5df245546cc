//! Protocol errors.

use thiserror::Error;

/// Errors raised while decoding or encoding bridge messages.
///
/// None of these reach the controller: the channel is shared with unrelated
/// traffic, so callers log and drop anything that fails to decode.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Message is not a JSON object")]
    NotAnObject,

    #[error("Unrecognized message: {0}")]
    Unrecognized(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_an_object_error() {
        let err = ProtocolError::NotAnObject;
        assert!(err.to_string().contains("not a JSON object"));
    }

    #[test]
    fn test_unrecognized_error() {
        let err = ProtocolError::Unrecognized("unknown variant `RELOAD`".to_string());
        let display = err.to_string();
        assert!(display.contains("Unrecognized"));
        assert!(display.contains("RELOAD"));
    }

    #[test]
    fn test_json_error_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = ProtocolError::from(json_err);
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_error_debug() {
        let err = ProtocolError::NotAnObject;
        let debug = format!("{:?}", err);
        assert!(debug.contains("NotAnObject"));
    }
}
