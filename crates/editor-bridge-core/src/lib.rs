//! # Editor Bridge Core
//!
//! Remote-driven click-to-annotate for a document embedded in a
//! controller's frame.
//!
//! ## Architecture
//!
//! ```text
//!  controller (parent context)
//!        │  SITE_EDITOR_CONTROL            ▲ SITE_EDITOR_PAGE_INFO
//!        ▼                                 │ SITE_EDITOR_ANNOTATION
//! ┌──────────────────────────────────────────────────────────────┐
//! │ EditorBridge                                                  │
//! │   ContextDetector ── gates ──► MessageBus ──► ModeController  │
//! │                                                 │             │
//! │         ┌──────────────┬───────────────────────┤             │
//! │         ▼              ▼                        ▼             │
//! │   HoverTracker    ClickCapture ──► AnnotationComposer         │
//! │                        │                        │             │
//! │                        └── SelectorSynthesizer ◄┘             │
//! │                                                               │
//! │   OverlayRenderer: session ──► overlay descriptions           │
//! └──────────────────────────────────────────────────────────────┘
//!        ▲ pointer / click / key events, tick()
//!  host (Document + Transport + Clock)
//! ```
//!
//! The crate never touches a real DOM. Hosts implement [`Document`],
//! [`Transport`] and [`Clock`]; [`MemoryDocument`], [`MemoryTransport`] and
//! [`ManualClock`] are in-memory versions used by tests and the CLI.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use editor_bridge_config::BridgeConfig;
//! use editor_bridge_core::{EditorBridge, ElementSpec, ManualClock, MemoryDocument, MemoryTransport};
//! use serde_json::json;
//!
//! let document = Arc::new(MemoryDocument::new());
//! let heading = document.append_to_body(ElementSpec::new("h1").id("hero-title"));
//! let transport = Arc::new(MemoryTransport::new());
//!
//! let mut bridge = EditorBridge::mount(
//!     &BridgeConfig::default(),
//!     document.clone(),
//!     transport.clone(),
//!     Arc::new(ManualClock::default()),
//! )
//! .unwrap();
//!
//! bridge.handle_message(&json!({"type": "SITE_EDITOR_CONTROL", "action": "ACTIVATE"}));
//! assert!(bridge.click(heading).prevent_default);
//! bridge.set_draft("Make this larger");
//! assert!(bridge.submit());
//! assert_eq!(transport.messages().len(), 1);
//! ```

pub mod bridge;
pub mod bus;
pub mod click;
pub mod clock;
pub mod composer;
pub mod context;
pub mod deferred;
pub mod dom;
pub mod error;
pub mod hover;
pub mod listeners;
pub mod mode;
pub mod overlay;
pub mod selector;

pub use bridge::EditorBridge;
pub use bus::{MemoryTransport, MessageBus, PostedMessage, Subscription, Transport};
pub use click::{ClickCapture, ClickOutcome, ElementSnapshot};
pub use clock::{Clock, ManualClock, SystemClock};
pub use composer::{AnnotationComposer, KeyCommand, KeyEvent, KeyOutcome};
pub use context::{BridgeContext, ContextDetector, ContextReport};
pub use deferred::{DeferredQueue, DeferredTask};
pub use dom::{
    Document, DocumentFixture, ElementFixture, ElementHandle, ElementSpec, MemoryDocument, Rect,
    Viewport,
};
pub use error::{BridgeError, DomError, TransportError};
pub use hover::HoverTracker;
pub use listeners::{EventKind, ListenerGuard, ListenerRegistry};
pub use mode::{ComposingTarget, Mode, ModeController, ModeEvent, Session, Transition};
pub use overlay::{ComposerView, OverlayElement, OverlayKind, OverlayMarker, OverlayRenderer};
pub use selector::SelectorSynthesizer;
