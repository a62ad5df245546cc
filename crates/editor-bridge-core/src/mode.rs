//! Annotation session state machine.
//!
//! ```text
//!             Activate                 pointer enters
//!  Inactive ───────────► ActiveIdle ◄──────────────► ActiveHovering
//!     ▲                    │   ▲      pointer leaves       │
//!     │ Deactivate         │   │ submit / cancel           │
//!     │ (any state)  click │   │                    click  │
//!     │                    ▼   │                           │
//!     └─────────────── ActiveComposing ◄───────────────────┘
//! ```
//!
//! [`ModeController::apply`] is the only way to change [`Session`] state
//! besides [`ModeController::set_draft`], which edits the draft while
//! composing.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::click::ElementSnapshot;
use crate::context::BridgeContext;
use crate::dom::{ElementHandle, Rect};

#[cfg(test)]
#[path = "mode_tests.rs"]
mod tests;

/// Session mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Inactive,
    ActiveIdle,
    ActiveHovering,
    ActiveComposing,
}

impl Mode {
    /// Annotation mode is on.
    pub fn is_active(&self) -> bool {
        !matches!(self, Mode::Inactive)
    }

    /// Hover tracking and click capture are armed.
    pub fn is_capturing(&self) -> bool {
        matches!(self, Mode::ActiveIdle | Mode::ActiveHovering)
    }

    pub fn is_composing(&self) -> bool {
        matches!(self, Mode::ActiveComposing)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Inactive => write!(f, "inactive"),
            Mode::ActiveIdle => write!(f, "active_idle"),
            Mode::ActiveHovering => write!(f, "active_hovering"),
            Mode::ActiveComposing => write!(f, "active_composing"),
        }
    }
}

/// The element being annotated, frozen at click time.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposingTarget {
    pub snapshot: ElementSnapshot,
    /// Bounding box at click time; does not follow later layout changes.
    pub rect: Rect,
    pub selected_text: Option<String>,
}

impl ComposingTarget {
    pub fn element(&self) -> ElementHandle {
        self.snapshot.element
    }
}

/// Events accepted by the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeEvent {
    Activate,
    Deactivate,
    /// Pointer is over a page element.
    PointerEnter(ElementHandle),
    /// Pointer left the document or moved onto the overlay.
    PointerExit,
    Click(ComposingTarget),
    Submit,
    Cancel,
}

impl ModeEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ModeEvent::Activate => "activate",
            ModeEvent::Deactivate => "deactivate",
            ModeEvent::PointerEnter(_) => "pointer_enter",
            ModeEvent::PointerExit => "pointer_exit",
            ModeEvent::Click(_) => "click",
            ModeEvent::Submit => "submit",
            ModeEvent::Cancel => "cancel",
        }
    }
}

/// An accepted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
}

impl Transition {
    pub fn changed_mode(&self) -> bool {
        self.from != self.to
    }
}

/// Per-document session state.
#[derive(Debug, Clone)]
pub struct Session {
    context: BridgeContext,
    mode: Mode,
    hovered_target: Option<ElementHandle>,
    composing_target: Option<ComposingTarget>,
    draft_note: String,
}

impl Session {
    fn new(context: BridgeContext) -> Self {
        Self {
            context,
            mode: Mode::Inactive,
            hovered_target: None,
            composing_target: None,
            draft_note: String::new(),
        }
    }

    pub fn context(&self) -> BridgeContext {
        self.context
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn hovered_target(&self) -> Option<ElementHandle> {
        self.hovered_target
    }

    pub fn composing_target(&self) -> Option<&ComposingTarget> {
        self.composing_target.as_ref()
    }

    pub fn draft_note(&self) -> &str {
        &self.draft_note
    }

    /// The draft would pass submission.
    pub fn has_submittable_draft(&self) -> bool {
        !self.draft_note.trim().is_empty()
    }

    fn clear_transient(&mut self) {
        self.hovered_target = None;
        self.composing_target = None;
        self.draft_note.clear();
    }
}

/// Owner of the [`Session`].
#[derive(Debug, Clone)]
pub struct ModeController {
    session: Session,
}

impl ModeController {
    pub fn new(context: BridgeContext) -> Self {
        Self {
            session: Session::new(context),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn mode(&self) -> Mode {
        self.session.mode
    }

    /// Apply an event. Returns `None`, leaving the session untouched, when
    /// the event is not valid in the current mode.
    pub fn apply(&mut self, event: ModeEvent) -> Option<Transition> {
        let from = self.session.mode;
        let name = event.name();

        let to = match (from, event) {
            (Mode::Inactive, ModeEvent::Activate) => {
                self.session.clear_transient();
                Mode::ActiveIdle
            }
            (_, ModeEvent::Deactivate) => {
                self.session.clear_transient();
                Mode::Inactive
            }
            (Mode::ActiveIdle | Mode::ActiveHovering, ModeEvent::PointerEnter(element)) => {
                self.session.hovered_target = Some(element);
                Mode::ActiveHovering
            }
            (Mode::ActiveHovering, ModeEvent::PointerExit) => {
                self.session.hovered_target = None;
                Mode::ActiveIdle
            }
            (Mode::ActiveIdle | Mode::ActiveHovering, ModeEvent::Click(target)) => {
                self.session.hovered_target = None;
                self.session.composing_target = Some(target);
                self.session.draft_note.clear();
                Mode::ActiveComposing
            }
            (Mode::ActiveComposing, ModeEvent::Submit) if self.session.has_submittable_draft() => {
                self.session.clear_transient();
                Mode::ActiveIdle
            }
            (Mode::ActiveComposing, ModeEvent::Cancel) => {
                self.session.clear_transient();
                Mode::ActiveIdle
            }
            (mode, _) => {
                trace!(mode = %mode, event = name, "Event ignored in current mode");
                return None;
            }
        };

        self.session.mode = to;
        Some(Transition { from, to })
    }

    /// Replace the draft note. Only possible while composing.
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        if !self.session.mode.is_composing() {
            return false;
        }
        self.session.draft_note = text.into();
        true
    }
}
