//! Click interception while annotation mode is armed.

use chrono::Duration;
use tracing::debug;

use editor_bridge_config::ComposerConfig;

use crate::dom::{Document, ElementHandle};
use crate::mode::ComposingTarget;
use crate::overlay::OverlayMarker;
use crate::selector::SelectorSynthesizer;

/// What the host should do with the original click event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickOutcome {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl ClickOutcome {
    /// Let the page handle the click.
    pub const PASS_THROUGH: Self = Self {
        prevent_default: false,
        stop_propagation: false,
    };

    /// The bridge consumed the click.
    pub const CAPTURED: Self = Self {
        prevent_default: true,
        stop_propagation: true,
    };

    pub fn is_captured(&self) -> bool {
        self.prevent_default
    }
}

/// Descriptive data read from an element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSnapshot {
    pub element: ElementHandle,
    /// Lowercase.
    pub tag_name: String,
    pub class_tokens: Vec<String>,
    pub text_preview: Option<String>,
    pub locator: String,
}

impl ElementSnapshot {
    /// Read `element` from the document. `None` when it no longer resolves.
    pub fn capture(
        document: &dyn Document,
        element: ElementHandle,
        selector: &SelectorSynthesizer,
        preview_chars: usize,
    ) -> Option<Self> {
        let tag_name = document.tag_name(element)?.to_lowercase();
        let text_preview = document
            .text_content(element)
            .map(|text| text.chars().take(preview_chars).collect());

        Some(Self {
            element,
            tag_name,
            class_tokens: document.class_list(element),
            text_preview,
            locator: selector.locate(document, element),
        })
    }
}

/// Turns a click on a page element into a [`ComposingTarget`].
#[derive(Debug, Clone)]
pub struct ClickCapture {
    marker: OverlayMarker,
    focus_delay: Duration,
    preview_chars: usize,
}

impl ClickCapture {
    pub fn new(marker: OverlayMarker, config: &ComposerConfig) -> Self {
        let delay_ms = i64::try_from(config.focus_delay_ms).unwrap_or(i64::MAX);
        Self {
            marker,
            focus_delay: Duration::try_milliseconds(delay_ms).unwrap_or(Duration::MAX),
            preview_chars: config.text_preview_chars,
        }
    }

    /// Delay between capture and the composer focus request.
    pub fn focus_delay(&self) -> Duration {
        self.focus_delay
    }

    /// Snapshot the click target, freezing its bounding box and the current
    /// text selection. `None` for overlay clicks and detached targets.
    pub fn capture(
        &self,
        document: &dyn Document,
        selector: &SelectorSynthesizer,
        target: ElementHandle,
    ) -> Option<ComposingTarget> {
        if self.marker.owns(document, target) {
            debug!(target = %target, "Click on overlay, passing through");
            return None;
        }

        let rect = document.bounding_rect(target)?;
        let snapshot = ElementSnapshot::capture(document, target, selector, self.preview_chars)?;
        debug!(
            target = %target,
            tag = %snapshot.tag_name,
            locator = %snapshot.locator,
            "Click captured"
        );

        Some(ComposingTarget {
            snapshot,
            rect,
            selected_text: document.selected_text(),
        })
    }
}
