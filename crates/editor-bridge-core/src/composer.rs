//! Note entry: keyboard shortcuts and record assembly.

use serde::{Deserialize, Serialize};

use editor_bridge_config::ComposerConfig;
use editor_bridge_protocols::AnnotationRecord;

use crate::click::ElementSnapshot;
use crate::clock::Clock;
use crate::dom::Document;
use crate::mode::Session;
use crate::selector::SelectorSynthesizer;

/// A keydown as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// `KeyboardEvent.key` value, e.g. `Enter`, `Escape`, `a`.
    pub key: String,
    #[serde(default)]
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            shift: false,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Shortcut recognized while composing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Submit,
    Cancel,
}

/// What the host should do with the original keydown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    pub prevent_default: bool,
}

/// Draft handling for the composing state.
#[derive(Debug, Clone)]
pub struct AnnotationComposer {
    preview_chars: usize,
}

impl AnnotationComposer {
    pub fn new(config: &ComposerConfig) -> Self {
        Self {
            preview_chars: config.text_preview_chars,
        }
    }

    /// Escape cancels. Enter without shift submits and suppresses the
    /// newline; Shift+Enter falls through to the text field.
    pub fn interpret_key(&self, key: &KeyEvent) -> (Option<KeyCommand>, KeyOutcome) {
        match key.key.as_str() {
            "Escape" => (Some(KeyCommand::Cancel), KeyOutcome::default()),
            "Enter" if !key.shift => (
                Some(KeyCommand::Submit),
                KeyOutcome {
                    prevent_default: true,
                },
            ),
            _ => (None, KeyOutcome::default()),
        }
    }

    /// Assemble the record for the current composing target. `None` when
    /// nothing is being composed or the trimmed draft is empty.
    ///
    /// Descriptive fields are read from the live element so the locator
    /// reflects the page at submit time. If the element has been removed
    /// since the click, the click-time snapshot is used instead. The
    /// bounding box is always the click-time one.
    pub fn build_record(
        &self,
        session: &Session,
        document: &dyn Document,
        selector: &SelectorSynthesizer,
        clock: &dyn Clock,
    ) -> Option<AnnotationRecord> {
        let target = session.composing_target()?;
        let note = session.draft_note().trim();
        if note.is_empty() {
            return None;
        }

        let snapshot =
            ElementSnapshot::capture(document, target.element(), selector, self.preview_chars)
                .unwrap_or_else(|| target.snapshot.clone());
        let captured_at = clock.now();

        Some(AnnotationRecord {
            id: AnnotationRecord::generate_id(captured_at),
            locator: snapshot.locator,
            class_tokens: snapshot.class_tokens,
            tag_name: snapshot.tag_name,
            text_preview: snapshot.text_preview,
            bounding_box: target.rect.to_bounding_rect(),
            note: note.to_string(),
            selected_text: target.selected_text.clone(),
            captured_at,
            route: document.route(),
        })
    }
}
