//! # Editor Bridge Protocols
//!
//! Wire contract between an embedded document and the controller that
//! drives it from a parent browsing context.
//!
//! ## Messages
//!
//! - [`InboundMessage`] - Control envelopes sent by the controller
//!   (`SITE_EDITOR_CONTROL` with an [`ControlAction`])
//! - [`OutboundMessage`] - Page info replies and submitted annotations
//!   (`SITE_EDITOR_PAGE_INFO`, `SITE_EDITOR_ANNOTATION`)
//! - [`AnnotationRecord`] - The annotation payload
//!
//! Delivery is fire-and-forget: there are no acknowledgements and no
//! request ids. The only request/response pair is `GET_PAGE_INFO`, which is
//! answered within the same handler invocation.

pub mod annotation;
pub mod error;
pub mod message;

pub use annotation::{AnnotationRecord, BoundingRect};
pub use error::ProtocolError;
pub use message::{
    ANNOTATION_TYPE, CONTROL_TYPE, ControlAction, InboundMessage, OutboundMessage, PAGE_INFO_TYPE,
    PageInfo, is_bridge_traffic,
};
