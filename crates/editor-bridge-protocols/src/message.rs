//! Cross-frame message envelopes.
//!
//! Inbound (controller -> document):
//!
//! ```json
//! { "type": "SITE_EDITOR_CONTROL", "action": "ACTIVATE" }
//! ```
//!
//! Outbound (document -> controller):
//!
//! ```json
//! { "type": "SITE_EDITOR_PAGE_INFO", "payload": { "route": "/about", "title": "About" } }
//! { "type": "SITE_EDITOR_ANNOTATION", "payload": { "id": "...", "selector": "#buy", ... } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::annotation::AnnotationRecord;
use crate::error::ProtocolError;

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;

/// Envelope type of inbound control messages.
pub const CONTROL_TYPE: &str = "SITE_EDITOR_CONTROL";

/// Envelope type of the page info reply.
pub const PAGE_INFO_TYPE: &str = "SITE_EDITOR_PAGE_INFO";

/// Envelope type of a submitted annotation.
pub const ANNOTATION_TYPE: &str = "SITE_EDITOR_ANNOTATION";

const TRAFFIC_PREFIX: &str = "SITE_EDITOR";

/// Action carried by a control envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlAction {
    /// Enter annotation mode.
    Activate,
    /// Leave annotation mode and drop any hover or composer state.
    Deactivate,
    /// Reply synchronously with the current route and title.
    GetPageInfo,
}

impl std::fmt::Display for ControlAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlAction::Activate => write!(f, "ACTIVATE"),
            ControlAction::Deactivate => write!(f, "DEACTIVATE"),
            ControlAction::GetPageInfo => write!(f, "GET_PAGE_INFO"),
        }
    }
}

/// Inbound message (controller -> embedded document).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InboundMessage {
    #[serde(rename = "SITE_EDITOR_CONTROL")]
    Control { action: ControlAction },
}

impl InboundMessage {
    /// Build a control envelope.
    pub fn control(action: ControlAction) -> Self {
        InboundMessage::Control { action }
    }

    /// The control action carried by this message.
    pub fn action(&self) -> ControlAction {
        match self {
            InboundMessage::Control { action } => *action,
        }
    }

    /// Decode an inbound message from an already-parsed JSON value.
    ///
    /// Anything that is not a recognized control envelope is an error; the
    /// caller decides whether to log it.
    pub fn from_value(value: &Value) -> Result<Self, ProtocolError> {
        if !value.is_object() {
            return Err(ProtocolError::NotAnObject);
        }
        InboundMessage::deserialize(value).map_err(|e| ProtocolError::Unrecognized(e.to_string()))
    }

    /// Decode an inbound message from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Encode as a JSON value, as a controller would post it.
    pub fn to_value(&self) -> Value {
        match self {
            InboundMessage::Control { action } => serde_json::json!({
                "type": CONTROL_TYPE,
                "action": action,
            }),
        }
    }
}

/// Whether a raw message looks like bridge traffic (`type` starts with
/// `SITE_EDITOR`), regardless of whether it decodes.
pub fn is_bridge_traffic(value: &Value) -> bool {
    value
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|t| t.starts_with(TRAFFIC_PREFIX))
}

/// Route and title of the embedded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub route: String,
    pub title: String,
}

impl PageInfo {
    pub fn new(route: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            title: title.into(),
        }
    }
}

/// Outbound message (embedded document -> controller).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum OutboundMessage {
    #[serde(rename = "SITE_EDITOR_PAGE_INFO")]
    PageInfo(PageInfo),

    #[serde(rename = "SITE_EDITOR_ANNOTATION")]
    Annotation(AnnotationRecord),
}

impl OutboundMessage {
    /// Envelope `type` string of this message.
    pub fn message_type(&self) -> &'static str {
        match self {
            OutboundMessage::PageInfo(_) => PAGE_INFO_TYPE,
            OutboundMessage::Annotation(_) => ANNOTATION_TYPE,
        }
    }

    /// Encode as a JSON value ready to be posted.
    pub fn to_value(&self) -> Result<Value, ProtocolError> {
        Ok(serde_json::to_value(self)?)
    }
}
