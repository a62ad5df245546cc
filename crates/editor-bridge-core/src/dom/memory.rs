//! In-memory document used by tests and the replay CLI.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::DomError;

use super::document::Document;
use super::dom_types::{ElementHandle, Rect, Viewport};

const ROOT: ElementHandle = ElementHandle(0);
const BODY: ElementHandle = ElementHandle(1);

/// Serialized document: page metadata plus a flat element list.
///
/// `<html>` (handle 0) and `<body>` (handle 1) always exist; elements
/// without a `parent` hang off the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFixture {
    #[serde(default = "default_route")]
    pub route: String,

    #[serde(default)]
    pub title: String,

    #[serde(default = "default_hostname")]
    pub hostname: String,

    #[serde(default = "default_embedded")]
    pub embedded: bool,

    #[serde(default)]
    pub viewport: Viewport,

    #[serde(default)]
    pub selection: Option<String>,

    #[serde(default)]
    pub elements: Vec<ElementFixture>,
}

fn default_route() -> String {
    "/".to_string()
}

fn default_hostname() -> String {
    "localhost".to_string()
}

fn default_embedded() -> bool {
    true
}

/// One element of a [`DocumentFixture`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementFixture {
    pub handle: u64,

    #[serde(default)]
    pub parent: Option<u64>,

    pub tag: String,

    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub rect: Option<Rect>,
}

/// Builder for elements appended programmatically.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    rect: Option<Rect>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }
}

#[derive(Debug)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    rect: Option<Rect>,
    parent: Option<ElementHandle>,
    children: Vec<ElementHandle>,
}

impl Node {
    fn new(tag: &str, parent: Option<ElementHandle>) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            text: String::new(),
            rect: None,
            parent,
            children: Vec::new(),
        }
    }
}

#[derive(Debug)]
struct DocState {
    route: String,
    title: String,
    hostname: String,
    embedded: bool,
    viewport: Viewport,
    selection: Option<String>,
    nodes: HashMap<ElementHandle, Node>,
    next_handle: u64,
    composer_input_mounted: bool,
}

/// A [`Document`] backed by an element arena.
#[derive(Debug)]
pub struct MemoryDocument {
    state: RwLock<DocState>,
    focus_requests: AtomicUsize,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// An embedded, empty document at `/` on `localhost`.
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        let mut root = Node::new("html", None);
        root.children.push(BODY);
        nodes.insert(ROOT, root);
        nodes.insert(BODY, Node::new("body", Some(ROOT)));

        Self {
            state: RwLock::new(DocState {
                route: default_route(),
                title: String::new(),
                hostname: default_hostname(),
                embedded: true,
                viewport: Viewport::default(),
                selection: None,
                nodes,
                next_handle: 2,
                composer_input_mounted: true,
            }),
            focus_requests: AtomicUsize::new(0),
        }
    }

    /// Build a document from a fixture, checking handles and parents.
    pub fn from_fixture(fixture: DocumentFixture) -> Result<Self, DomError> {
        let doc = Self::new();
        {
            let mut state = doc.state.write();
            state.route = fixture.route;
            state.title = fixture.title;
            state.hostname = fixture.hostname;
            state.embedded = fixture.embedded;
            state.viewport = fixture.viewport;
            state.selection = fixture.selection;

            for element in &fixture.elements {
                let handle = ElementHandle(element.handle);
                if state.nodes.contains_key(&handle) {
                    return Err(DomError::InvalidFixture(format!(
                        "duplicate or reserved handle {}",
                        element.handle
                    )));
                }
                let mut node = Node::new(&element.tag, None);
                node.attributes = element.attributes.clone();
                node.text = element.text.clone();
                node.rect = element.rect;
                state.nodes.insert(handle, node);
                state.next_handle = state.next_handle.max(element.handle + 1);
            }

            // Link in a second pass so parents may appear after children.
            for element in &fixture.elements {
                let handle = ElementHandle(element.handle);
                let parent = element.parent.map(ElementHandle).unwrap_or(BODY);
                if parent == handle {
                    return Err(DomError::InvalidFixture(format!(
                        "element {} is its own parent",
                        element.handle
                    )));
                }
                let Some(parent_node) = state.nodes.get_mut(&parent) else {
                    return Err(DomError::InvalidFixture(format!(
                        "element {} has unknown parent {}",
                        element.handle, parent.0
                    )));
                };
                parent_node.children.push(handle);
                if let Some(node) = state.nodes.get_mut(&handle) {
                    node.parent = Some(parent);
                }
            }

            if let Some(handle) = Self::find_cycle(&state) {
                return Err(DomError::InvalidFixture(format!(
                    "element {} is its own ancestor",
                    handle.0
                )));
            }
        }
        Ok(doc)
    }

    /// Parse a JSON fixture.
    pub fn from_json(json: &str) -> Result<Self, DomError> {
        let fixture: DocumentFixture =
            serde_json::from_str(json).map_err(|e| DomError::InvalidFixture(e.to_string()))?;
        Self::from_fixture(fixture)
    }

    fn find_cycle(state: &DocState) -> Option<ElementHandle> {
        let limit = state.nodes.len();
        state.nodes.keys().copied().find(|&start| {
            let mut current = state.nodes.get(&start).and_then(|n| n.parent);
            let mut steps = 0;
            while let Some(node) = current {
                if node == start || steps > limit {
                    return true;
                }
                steps += 1;
                current = state.nodes.get(&node).and_then(|n| n.parent);
            }
            false
        })
    }

    /// Append an element under `parent`.
    pub fn append(
        &self,
        parent: ElementHandle,
        spec: ElementSpec,
    ) -> Result<ElementHandle, DomError> {
        let mut state = self.state.write();
        let handle = ElementHandle(state.next_handle);
        let parent_node = state
            .nodes
            .get_mut(&parent)
            .ok_or(DomError::ElementNotFound(parent))?;
        parent_node.children.push(handle);

        let mut node = Node::new(&spec.tag, Some(parent));
        node.attributes = spec.attributes;
        node.text = spec.text;
        node.rect = spec.rect;
        state.nodes.insert(handle, node);
        state.next_handle += 1;
        Ok(handle)
    }

    /// Append an element directly under `<body>`.
    pub fn append_to_body(&self, spec: ElementSpec) -> ElementHandle {
        let mut state = self.state.write();
        let handle = ElementHandle(state.next_handle);
        let mut node = Node::new(&spec.tag, Some(BODY));
        node.attributes = spec.attributes;
        node.text = spec.text;
        node.rect = spec.rect;
        state.nodes.insert(handle, node);
        if let Some(body) = state.nodes.get_mut(&BODY) {
            body.children.push(handle);
        }
        state.next_handle += 1;
        handle
    }

    /// Remove an element and its subtree.
    pub fn remove(&self, element: ElementHandle) {
        let mut state = self.state.write();
        let Some(node) = state.nodes.remove(&element) else {
            return;
        };
        if let Some(parent) = node.parent.and_then(|p| state.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != element);
        }
        let mut pending = node.children;
        while let Some(child) = pending.pop() {
            if let Some(removed) = state.nodes.remove(&child) {
                pending.extend(removed.children);
            }
        }
    }

    pub fn set_route(&self, route: impl Into<String>) {
        self.state.write().route = route.into();
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.state.write().title = title.into();
    }

    pub fn set_embedded(&self, embedded: bool) {
        self.state.write().embedded = embedded;
    }

    pub fn set_hostname(&self, hostname: impl Into<String>) {
        self.state.write().hostname = hostname.into();
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.state.write().viewport = viewport;
    }

    pub fn set_selection(&self, selection: Option<String>) {
        self.state.write().selection = selection;
    }

    pub fn set_attribute(&self, element: ElementHandle, name: &str, value: impl Into<String>) {
        if let Some(node) = self.state.write().nodes.get_mut(&element) {
            node.attributes.insert(name.to_string(), value.into());
        }
    }

    /// Move an element (layout change).
    pub fn set_rect(&self, element: ElementHandle, rect: Rect) {
        if let Some(node) = self.state.write().nodes.get_mut(&element) {
            node.rect = Some(rect);
        }
    }

    /// Whether the host currently shows the composer's text field.
    pub fn set_composer_input_mounted(&self, mounted: bool) {
        self.state.write().composer_input_mounted = mounted;
    }

    /// Number of successful composer focus requests.
    pub fn focus_requests(&self) -> usize {
        self.focus_requests.load(Ordering::SeqCst)
    }

    fn collect_text(state: &DocState, element: ElementHandle, out: &mut String) {
        if let Some(node) = state.nodes.get(&element) {
            out.push_str(&node.text);
            for child in &node.children {
                Self::collect_text(state, *child, out);
            }
        }
    }
}

impl Document for MemoryDocument {
    fn has_parent_context(&self) -> bool {
        self.state.read().embedded
    }

    fn hostname(&self) -> String {
        self.state.read().hostname.clone()
    }

    fn route(&self) -> String {
        self.state.read().route.clone()
    }

    fn title(&self) -> String {
        self.state.read().title.clone()
    }

    fn viewport(&self) -> Viewport {
        self.state.read().viewport
    }

    fn body(&self) -> Option<ElementHandle> {
        Some(BODY)
    }

    fn tag_name(&self, element: ElementHandle) -> Option<String> {
        self.state.read().nodes.get(&element).map(|n| n.tag.clone())
    }

    fn attribute(&self, element: ElementHandle, name: &str) -> Option<String> {
        self.state
            .read()
            .nodes
            .get(&element)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    fn parent(&self, element: ElementHandle) -> Option<ElementHandle> {
        self.state.read().nodes.get(&element).and_then(|n| n.parent)
    }

    fn text_content(&self, element: ElementHandle) -> Option<String> {
        let state = self.state.read();
        if !state.nodes.contains_key(&element) {
            return None;
        }
        let mut text = String::new();
        Self::collect_text(&state, element, &mut text);
        Some(text)
    }

    fn bounding_rect(&self, element: ElementHandle) -> Option<Rect> {
        self.state
            .read()
            .nodes
            .get(&element)
            .map(|n| n.rect.unwrap_or_default())
    }

    fn selected_text(&self) -> Option<String> {
        self.state
            .read()
            .selection
            .clone()
            .filter(|s| !s.is_empty())
    }

    fn focus_composer_input(&self) -> Result<(), DomError> {
        if !self.state.read().composer_input_mounted {
            return Err(DomError::NothingToFocus);
        }
        self.focus_requests.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
