//! Embedding context detection.

use serde::{Deserialize, Serialize};
use tracing::info;

use editor_bridge_config::DetectionConfig;

use crate::dom::Document;

/// Whether the document runs inside a controller's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeContext {
    Standalone,
    Embedded,
}

impl std::fmt::Display for BridgeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BridgeContext::Standalone => write!(f, "standalone"),
            BridgeContext::Embedded => write!(f, "embedded"),
        }
    }
}

/// What the detector saw at mount time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextReport {
    pub hostname: String,
    pub known_host: bool,
    pub loopback: bool,
    pub has_parent: bool,
    pub context: BridgeContext,
}

/// Classifies the document once per load.
///
/// Any distinct parent context makes the document `Embedded`. The parent's
/// origin is not checked; the hostname checks only feed the report.
#[derive(Debug, Clone)]
pub struct ContextDetector {
    known_hosts: Vec<String>,
}

impl ContextDetector {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            known_hosts: config.known_hosts.clone(),
        }
    }

    pub fn detect(&self, document: &dyn Document) -> ContextReport {
        let hostname = document.hostname();
        let known_host = self.known_hosts.iter().any(|h| hostname.contains(h.as_str()));
        let loopback = matches!(hostname.as_str(), "localhost" | "127.0.0.1" | "[::1]");
        let has_parent = document.has_parent_context();

        let context = if has_parent {
            BridgeContext::Embedded
        } else {
            BridgeContext::Standalone
        };

        info!(
            hostname = %hostname,
            known_host,
            loopback,
            has_parent,
            context = %context,
            "Context check"
        );

        ContextReport {
            hostname,
            known_host,
            loopback,
            has_parent,
            context,
        }
    }
}
