//! Document abstraction.
//!
//! The bridge never holds DOM nodes. It holds [`ElementHandle`]s and asks the
//! [`Document`] for tags, attributes, ancestry and live geometry each time it
//! needs them, so a handle whose element was removed simply stops resolving.

mod document;
mod dom_types;
mod memory;

pub use document::Document;
pub use dom_types::{ElementHandle, Rect, Viewport};
pub use memory::{DocumentFixture, ElementFixture, ElementSpec, MemoryDocument};

#[cfg(test)]
#[path = "dom_tests.rs"]
mod tests;
