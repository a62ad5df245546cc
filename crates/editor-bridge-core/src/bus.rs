//! Message bus to the parent browsing context.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, warn};

use editor_bridge_protocols::{ControlAction, InboundMessage, OutboundMessage, is_bridge_traffic};

use crate::context::BridgeContext;
use crate::error::TransportError;
use crate::listeners::{EventKind, ListenerGuard, ListenerRegistry};

/// Delivery to the parent context (`window.parent.postMessage` in a
/// browser). At most once, no confirmation.
pub trait Transport: Send + Sync {
    fn post(&self, message: &Value, target_origin: &str) -> Result<(), TransportError>;
}

/// A message captured by [`MemoryTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct PostedMessage {
    pub message: Value,
    pub target_origin: String,
}

/// Transport that records every post.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    posted: Mutex<Vec<PostedMessage>>,
    failing: AtomicBool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything posted so far.
    pub fn posted(&self) -> Vec<PostedMessage> {
        self.posted.lock().clone()
    }

    /// Posted messages decoded back into [`OutboundMessage`]s.
    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.posted
            .lock()
            .iter()
            .filter_map(|p| serde_json::from_value(p.message.clone()).ok())
            .collect()
    }

    /// Drain the recorded posts.
    pub fn take(&self) -> Vec<PostedMessage> {
        std::mem::take(&mut *self.posted.lock())
    }

    /// Make subsequent posts fail (and record nothing).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Transport for MemoryTransport {
    fn post(&self, message: &Value, target_origin: &str) -> Result<(), TransportError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TransportError::PostFailed("transport closed".to_string()));
        }
        self.posted.lock().push(PostedMessage {
            message: message.clone(),
            target_origin: target_origin.to_string(),
        });
        Ok(())
    }
}

/// Inbound subscription; unsubscribes on drop.
#[derive(Debug)]
pub struct Subscription {
    _guard: ListenerGuard,
}

/// Bidirectional channel to the controller, live only in an embedded
/// context.
pub struct MessageBus {
    transport: Arc<dyn Transport>,
    target_origin: String,
    context: BridgeContext,
}

impl MessageBus {
    pub fn new(
        transport: Arc<dyn Transport>,
        target_origin: impl Into<String>,
        context: BridgeContext,
    ) -> Self {
        Self {
            transport,
            target_origin: target_origin.into(),
            context,
        }
    }

    /// Start receiving control messages. Standalone documents never
    /// subscribe.
    pub fn subscribe(&self, registry: &ListenerRegistry) -> Option<Subscription> {
        match self.context {
            BridgeContext::Embedded => {
                debug!("Setting up message listener");
                Some(Subscription {
                    _guard: registry.listen(EventKind::Message),
                })
            }
            BridgeContext::Standalone => {
                debug!("Not in editor context, skipping message listener");
                None
            }
        }
    }

    /// Decode an inbound message. Anything that is not a control envelope
    /// yields `None`.
    pub fn receive(&self, raw: &Value) -> Option<ControlAction> {
        let traffic = is_bridge_traffic(raw);
        match InboundMessage::from_value(raw) {
            Ok(message) => {
                debug!(action = %message.action(), "Received control message");
                Some(message.action())
            }
            Err(e) => {
                if traffic {
                    debug!(error = %e, "Ignoring malformed bridge message");
                }
                None
            }
        }
    }

    /// Post a message to the parent. Returns whether the transport accepted
    /// it; failures are logged and otherwise dropped.
    pub fn send(&self, message: &OutboundMessage) -> bool {
        if self.context == BridgeContext::Standalone {
            debug!(kind = message.message_type(), "No parent context, dropping message");
            return false;
        }

        let result = message
            .to_value()
            .map_err(TransportError::from)
            .and_then(|value| self.transport.post(&value, &self.target_origin));

        match result {
            Ok(()) => {
                debug!(
                    kind = message.message_type(),
                    target_origin = %self.target_origin,
                    "Message sent to parent"
                );
                true
            }
            Err(e) => {
                warn!(kind = message.message_type(), error = %e, "Failed to post message");
                false
            }
        }
    }
}
