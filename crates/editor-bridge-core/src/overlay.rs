//! Overlay descriptions: what the host should draw for the current session.
//!
//! Rendering is a pure function of the session, live document geometry and
//! configuration. Every description carries the reserved marker attribute;
//! the host must set it on whatever it materializes, which is how hover
//! tracking and click capture recognize (and skip) the overlay.

use serde::Serialize;

use editor_bridge_config::OverlayConfig;

use crate::context::BridgeContext;
use crate::dom::{Document, ElementHandle, Rect};
use crate::mode::{Mode, Session};
use crate::selector::SelectorSynthesizer;

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod tests;

const TOOLTIP_MIN_TOP: f64 = 8.0;
const INDICATOR_TOP: f64 = 16.0;

pub const COMPOSER_PROMPT: &str = "What would you like to change?";
pub const COMPOSER_PLACEHOLDER: &str = "e.g., Make this larger, change color to blue...";
pub const COMPOSER_HINT: &str = "Enter to submit • Esc to cancel";
pub const MODE_INDICATOR_TEXT: &str = "Click any element to annotate";

/// The reserved attribute identifying overlay-owned elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayMarker {
    attribute: String,
}

impl OverlayMarker {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// `element` or one of its ancestors carries the marker.
    pub fn owns(&self, document: &dyn Document, element: ElementHandle) -> bool {
        document
            .closest_with_attribute(element, &self.attribute)
            .is_some()
    }
}

/// Contents of the note popover.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposerView {
    pub prompt: String,
    pub placeholder: String,
    pub draft: String,
    pub hint: String,
    pub cancel_label: String,
    pub submit_label: String,
    pub submit_enabled: bool,
}

impl ComposerView {
    fn for_draft(draft: &str) -> Self {
        Self {
            prompt: COMPOSER_PROMPT.to_string(),
            placeholder: COMPOSER_PLACEHOLDER.to_string(),
            draft: draft.to_string(),
            hint: COMPOSER_HINT.to_string(),
            cancel_label: "Cancel".to_string(),
            submit_label: "Add ✓".to_string(),
            submit_enabled: !draft.trim().is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlayKind {
    /// Outline over the hovered element.
    HoverHighlight,
    /// Locator of the hovered element.
    LocatorTooltip { text: String },
    /// Outline over the element being annotated.
    SelectionHighlight,
    Composer(ComposerView),
    ModeIndicator { text: String },
}

/// One fixed-position overlay element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayElement {
    #[serde(flatten)]
    pub kind: OverlayKind,
    pub top: f64,
    /// `None` centers the element horizontally.
    pub left: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub z_index: u32,
    pub marker_attribute: String,
}

impl OverlayElement {
    /// Inline style declaration for the element.
    pub fn css(&self) -> String {
        let mut css = format!("position:fixed;top:{}px;", self.top);
        match self.left {
            Some(left) => css.push_str(&format!("left:{left}px;")),
            None => css.push_str("left:50%;transform:translateX(-50%);"),
        }
        if let Some(width) = self.width {
            css.push_str(&format!("width:{width}px;"));
        }
        if let Some(height) = self.height {
            css.push_str(&format!("height:{height}px;"));
        }
        css.push_str(&format!("z-index:{};", self.z_index));
        css
    }
}

/// Computes overlay descriptions.
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    config: OverlayConfig,
    marker: OverlayMarker,
}

impl OverlayRenderer {
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            marker: OverlayMarker::new(config.marker_attribute.clone()),
            config: config.clone(),
        }
    }

    pub fn marker(&self) -> &OverlayMarker {
        &self.marker
    }

    pub fn render(
        &self,
        session: &Session,
        document: &dyn Document,
        selector: &SelectorSynthesizer,
    ) -> Vec<OverlayElement> {
        if session.context() == BridgeContext::Standalone || !session.mode().is_active() {
            return Vec::new();
        }

        let mut elements = Vec::new();
        match session.mode() {
            Mode::ActiveHovering => {
                let hovered = session
                    .hovered_target()
                    .and_then(|el| document.bounding_rect(el).map(|rect| (el, rect)));
                if let Some((element, rect)) = hovered {
                    elements.push(self.outline(OverlayKind::HoverHighlight, rect));
                    elements.push(self.tooltip(selector.locate(document, element), rect));
                }
            }
            Mode::ActiveComposing => {
                if let Some(target) = session.composing_target() {
                    elements.push(self.outline(OverlayKind::SelectionHighlight, target.rect));
                    elements.push(self.popover(session.draft_note(), target.rect, document));
                }
            }
            Mode::ActiveIdle | Mode::Inactive => {}
        }
        elements.push(self.indicator());
        elements
    }

    fn element(
        &self,
        kind: OverlayKind,
        top: f64,
        left: Option<f64>,
        z_index: u32,
    ) -> OverlayElement {
        OverlayElement {
            kind,
            top,
            left,
            width: None,
            height: None,
            z_index,
            marker_attribute: self.marker.attribute().to_string(),
        }
    }

    fn outline(&self, kind: OverlayKind, rect: Rect) -> OverlayElement {
        OverlayElement {
            width: Some(rect.width),
            height: Some(rect.height),
            ..self.element(kind, rect.top(), Some(rect.left()), self.config.highlight_z_index)
        }
    }

    fn tooltip(&self, locator: String, rect: Rect) -> OverlayElement {
        let top = TOOLTIP_MIN_TOP.max(rect.bottom() + self.config.tooltip_gap);
        self.element(
            OverlayKind::LocatorTooltip { text: locator },
            top,
            Some(rect.left()),
            self.config.popover_z_index,
        )
    }

    fn popover(&self, draft: &str, rect: Rect, document: &dyn Document) -> OverlayElement {
        let viewport = document.viewport();
        let top = (rect.bottom() + self.config.popover_gap)
            .min(viewport.height - self.config.popover_bottom_reserve);
        let max_left = viewport.width - self.config.popover_width - self.config.popover_min_inset;
        let left = self.config.popover_min_inset.max(rect.left().min(max_left));

        OverlayElement {
            width: Some(self.config.popover_width),
            ..self.element(
                OverlayKind::Composer(ComposerView::for_draft(draft)),
                top,
                Some(left),
                self.config.popover_z_index,
            )
        }
    }

    fn indicator(&self) -> OverlayElement {
        self.element(
            OverlayKind::ModeIndicator {
                text: MODE_INDICATOR_TEXT.to_string(),
            },
            INDICATOR_TOP,
            None,
            self.config.popover_z_index,
        )
    }
}
