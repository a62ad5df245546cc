//! Structural locator synthesis.
//!
//! Locators are human-readable hints shown to the end user and forwarded to
//! the controller. They are not guaranteed to be unique.

use regex::Regex;

use editor_bridge_config::SelectorConfig;

use crate::dom::{Document, ElementHandle};

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;

/// Builds locators like `section.hero > div > h1.title` for elements.
#[derive(Debug, Clone)]
pub struct SelectorSynthesizer {
    max_depth: usize,
    max_classes: usize,
    utility: Regex,
}

impl SelectorSynthesizer {
    pub fn new(config: &SelectorConfig) -> Result<Self, regex::Error> {
        let prefixes: Vec<String> = config
            .utility_prefixes
            .iter()
            .map(|p| regex::escape(p))
            .collect();
        let utility = Regex::new(&format!("^(?:{})-", prefixes.join("|")))?;

        Ok(Self {
            max_depth: config.max_depth.max(1),
            max_classes: config.max_classes,
            utility,
        })
    }

    /// Whether a class token looks like a utility class (`p-4`, `md-flex`).
    pub fn is_utility_class(&self, class: &str) -> bool {
        self.utility.is_match(class)
    }

    /// Locator for `element`. Never empty for an element that resolves.
    pub fn locate(&self, document: &dyn Document, element: ElementHandle) -> String {
        if let Some(id) = document.id_attribute(element) {
            return format!("#{id}");
        }

        let body = document.body();
        let mut fragments = Vec::with_capacity(self.max_depth);
        let mut current = Some(element);

        while let Some(node) = current {
            if fragments.len() >= self.max_depth || Some(node) == body {
                break;
            }
            let Some(tag) = document.tag_name(node) else {
                break;
            };
            fragments.push(self.fragment(document, node, &tag));
            current = document.parent(node);
        }

        if fragments.is_empty() {
            return document
                .tag_name(element)
                .map(|tag| tag.to_lowercase())
                .unwrap_or_default();
        }

        fragments.reverse();
        fragments.join(" > ")
    }

    fn fragment(&self, document: &dyn Document, node: ElementHandle, tag: &str) -> String {
        let mut fragment = tag.to_lowercase();
        for class in document
            .class_list(node)
            .iter()
            .filter(|c| !self.is_utility_class(c))
            .take(self.max_classes)
        {
            fragment.push('.');
            fragment.push_str(class);
        }
        fragment
    }
}
