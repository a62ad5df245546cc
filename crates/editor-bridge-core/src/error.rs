//! Bridge errors.
//!
//! Only [`BridgeError`] escapes the public API (from [`crate::EditorBridge::mount`]).
//! [`DomError`] and [`TransportError`] are produced by host implementations
//! and are logged and dropped by the bridge.

use thiserror::Error;

use editor_bridge_protocols::ProtocolError;

use crate::dom::ElementHandle;

/// Errors reported by a [`crate::dom::Document`] implementation.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("Element not found: {0}")]
    ElementNotFound(ElementHandle),

    #[error("Nothing to focus: composer input is not mounted")]
    NothingToFocus,

    #[error("Invalid document fixture: {0}")]
    InvalidFixture(String),
}

/// Errors reported by a [`crate::bus::Transport`] implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Post failed: {0}")]
    PostFailed(String),

    #[error("Encoding failed: {0}")]
    Encode(#[from] ProtocolError),
}

/// Errors raised while mounting a bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Invalid utility class pattern: {0}")]
    Pattern(#[from] regex::Error),
}
