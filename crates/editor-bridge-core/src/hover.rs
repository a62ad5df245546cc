//! Pointer tracking while annotation mode is armed.

use crate::dom::{Document, ElementHandle};
use crate::mode::ModeEvent;
use crate::overlay::OverlayMarker;

/// Maps raw pointer events to [`ModeEvent`]s.
#[derive(Debug, Clone)]
pub struct HoverTracker {
    marker: OverlayMarker,
}

impl HoverTracker {
    pub fn new(marker: OverlayMarker) -> Self {
        Self { marker }
    }

    /// Pointer moved over `target`. Overlay elements and detached targets
    /// count as leaving the page.
    pub fn pointer_move(&self, document: &dyn Document, target: ElementHandle) -> ModeEvent {
        if self.marker.owns(document, target) || document.tag_name(target).is_none() {
            ModeEvent::PointerExit
        } else {
            ModeEvent::PointerEnter(target)
        }
    }

    /// Pointer left the document.
    pub fn pointer_leave(&self) -> ModeEvent {
        ModeEvent::PointerExit
    }
}
