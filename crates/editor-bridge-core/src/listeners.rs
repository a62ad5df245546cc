//! Scoped event listener registrations.
//!
//! Every registration is a [`ListenerGuard`]; dropping the guard removes the
//! registration. The bridge keeps one guard set per mode and replaces it on
//! every mode change, so no listener outlives the mode (or the mount) that
//! created it.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Event kinds a host forwards to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Cross-context `message` on the window.
    Message,
    /// `mousemove` on the document.
    PointerMove,
    /// `mouseleave` on the document.
    PointerLeave,
    /// Capture-phase `click` on the document.
    Click,
    /// `keydown` on the document.
    KeyDown,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Message => write!(f, "message"),
            EventKind::PointerMove => write!(f, "mousemove"),
            EventKind::PointerLeave => write!(f, "mouseleave"),
            EventKind::Click => write!(f, "click"),
            EventKind::KeyDown => write!(f, "keydown"),
        }
    }
}

/// Reference-counted set of live registrations.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    armed: Arc<Mutex<BTreeMap<EventKind, usize>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in `kind` until the returned guard is dropped.
    pub fn listen(&self, kind: EventKind) -> ListenerGuard {
        *self.armed.lock().entry(kind).or_insert(0) += 1;
        ListenerGuard {
            registry: self.clone(),
            kind,
        }
    }

    pub fn is_armed(&self, kind: EventKind) -> bool {
        self.armed.lock().contains_key(&kind)
    }

    /// Currently armed kinds, in a stable order.
    pub fn armed(&self) -> Vec<EventKind> {
        self.armed.lock().keys().copied().collect()
    }

    fn release(&self, kind: EventKind) {
        let mut armed = self.armed.lock();
        if let Some(count) = armed.get_mut(&kind) {
            *count -= 1;
            if *count == 0 {
                armed.remove(&kind);
            }
        }
    }
}

/// A live registration; removes itself on drop.
#[derive(Debug)]
#[must_use = "the listener is removed as soon as the guard is dropped"]
pub struct ListenerGuard {
    registry: ListenerRegistry,
    kind: EventKind,
}

impl ListenerGuard {
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.registry.release(self.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_arms_and_releases() {
        let registry = ListenerRegistry::new();
        assert!(!registry.is_armed(EventKind::Click));

        let guard = registry.listen(EventKind::Click);
        assert_eq!(guard.kind(), EventKind::Click);
        assert!(registry.is_armed(EventKind::Click));

        drop(guard);
        assert!(!registry.is_armed(EventKind::Click));
    }

    #[test]
    fn test_overlapping_guards() {
        let registry = ListenerRegistry::new();
        let first = registry.listen(EventKind::KeyDown);
        let second = registry.listen(EventKind::KeyDown);

        drop(first);
        assert!(registry.is_armed(EventKind::KeyDown));
        drop(second);
        assert!(!registry.is_armed(EventKind::KeyDown));
    }

    #[test]
    fn test_armed_is_ordered() {
        let registry = ListenerRegistry::new();
        let _guards = vec![
            registry.listen(EventKind::Click),
            registry.listen(EventKind::Message),
            registry.listen(EventKind::PointerMove),
        ];
        assert_eq!(
            registry.armed(),
            vec![EventKind::Message, EventKind::PointerMove, EventKind::Click]
        );
    }

    #[test]
    fn test_clearing_guard_set() {
        let registry = ListenerRegistry::new();
        let mut guards = vec![
            registry.listen(EventKind::PointerMove),
            registry.listen(EventKind::PointerLeave),
        ];
        guards.clear();
        assert!(registry.armed().is_empty());
    }

    #[test]
    fn test_event_kind_display() {
        assert_eq!(EventKind::PointerMove.to_string(), "mousemove");
        assert_eq!(EventKind::KeyDown.to_string(), "keydown");
    }
}
