//! The host document seen by the bridge.

use crate::error::DomError;

use super::dom_types::{ElementHandle, Rect, Viewport};

/// Read access to the hosting document, plus the one side effect the bridge
/// needs (focusing the composer input).
///
/// Lookups on a handle that no longer resolves return `None`.
pub trait Document: Send + Sync {
    /// Whether the document is loaded inside a distinct parent browsing
    /// context.
    fn has_parent_context(&self) -> bool;

    fn hostname(&self) -> String;

    /// Current path, e.g. `/about`.
    fn route(&self) -> String;

    fn title(&self) -> String;

    fn viewport(&self) -> Viewport;

    /// The `<body>` element, where ancestor walks stop.
    fn body(&self) -> Option<ElementHandle>;

    /// Tag name as reported by the document; callers lowercase it.
    fn tag_name(&self, element: ElementHandle) -> Option<String>;

    fn attribute(&self, element: ElementHandle, name: &str) -> Option<String>;

    fn parent(&self, element: ElementHandle) -> Option<ElementHandle>;

    /// Concatenated text of the element and its descendants.
    fn text_content(&self, element: ElementHandle) -> Option<String>;

    /// Live bounding box.
    fn bounding_rect(&self, element: ElementHandle) -> Option<Rect>;

    /// Current text selection, if any.
    fn selected_text(&self) -> Option<String>;

    /// Move keyboard focus into the composer's text field.
    fn focus_composer_input(&self) -> Result<(), DomError>;

    /// Non-empty `id` attribute.
    fn id_attribute(&self, element: ElementHandle) -> Option<String> {
        self.attribute(element, "id").filter(|id| !id.is_empty())
    }

    /// Class tokens in authored order.
    fn class_list(&self, element: ElementHandle) -> Vec<String> {
        self.attribute(element, "class")
            .map(|class| class.split_whitespace().map(String::from).collect())
            .unwrap_or_default()
    }

    /// The element itself or its nearest ancestor carrying `attribute`.
    fn closest_with_attribute(
        &self,
        element: ElementHandle,
        attribute: &str,
    ) -> Option<ElementHandle> {
        let mut current = Some(element);
        while let Some(node) = current {
            if self.attribute(node, attribute).is_some() {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }
}
