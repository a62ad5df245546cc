//! The mounted bridge: wires host events through the state machine.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use serde_json::Value;
use tracing::{debug, info};

use editor_bridge_config::BridgeConfig;
use editor_bridge_protocols::{ControlAction, OutboundMessage, PageInfo};

use crate::bus::{MessageBus, Subscription, Transport};
use crate::click::{ClickCapture, ClickOutcome};
use crate::clock::Clock;
use crate::composer::{AnnotationComposer, KeyCommand, KeyEvent, KeyOutcome};
use crate::context::{BridgeContext, ContextDetector, ContextReport};
use crate::deferred::{DeferredQueue, DeferredTask};
use crate::dom::{Document, ElementHandle};
use crate::error::BridgeError;
use crate::hover::HoverTracker;
use crate::listeners::{EventKind, ListenerGuard, ListenerRegistry};
use crate::mode::{Mode, ModeController, ModeEvent, Session, Transition};
use crate::overlay::{OverlayElement, OverlayRenderer};
use crate::selector::SelectorSynthesizer;

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;

/// Listener set armed in each mode.
fn listeners_for(mode: Mode) -> &'static [EventKind] {
    match mode {
        Mode::Inactive => &[],
        Mode::ActiveIdle | Mode::ActiveHovering => {
            &[EventKind::PointerMove, EventKind::PointerLeave, EventKind::Click]
        }
        Mode::ActiveComposing => &[EventKind::KeyDown],
    }
}

/// One bridge per document load.
///
/// The host forwards raw events to the matching method. Events whose kind is
/// not armed in the current mode are ignored, so the host may forward
/// everything unconditionally. Nothing here blocks; the host calls
/// [`EditorBridge::tick`] to run deferred work.
pub struct EditorBridge {
    document: Arc<dyn Document>,
    clock: Arc<dyn Clock>,
    report: ContextReport,
    bus: MessageBus,
    controller: ModeController,
    selector: SelectorSynthesizer,
    hover: HoverTracker,
    click_capture: ClickCapture,
    composer: AnnotationComposer,
    overlay: OverlayRenderer,
    deferred: DeferredQueue,
    registry: ListenerRegistry,
    subscription: Option<Subscription>,
    mode_listeners: Vec<ListenerGuard>,
    mounted: bool,
}

impl EditorBridge {
    /// Detect the context, create the session and subscribe to control
    /// messages when embedded.
    pub fn mount(
        config: &BridgeConfig,
        document: Arc<dyn Document>,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, BridgeError> {
        let report = ContextDetector::new(&config.detection).detect(document.as_ref());
        let context = report.context;

        let selector = SelectorSynthesizer::new(&config.selector)?;
        let overlay = OverlayRenderer::new(&config.overlay);
        let marker = overlay.marker().clone();
        let bus = MessageBus::new(transport, config.messaging.target_origin.clone(), context);
        let registry = ListenerRegistry::new();
        let subscription = bus.subscribe(&registry);

        info!(
            context = %context,
            route = %document.route(),
            "Editor bridge mounted"
        );

        Ok(Self {
            document,
            clock,
            report,
            bus,
            controller: ModeController::new(context),
            selector,
            hover: HoverTracker::new(marker.clone()),
            click_capture: ClickCapture::new(marker, &config.composer),
            composer: AnnotationComposer::new(&config.composer),
            overlay,
            deferred: DeferredQueue::new(),
            registry,
            subscription,
            mode_listeners: Vec::new(),
            mounted: true,
        })
    }

    /// Release every listener and pending task. Later events are ignored.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.subscription = None;
        self.mode_listeners.clear();
        self.deferred.cancel_all();
        info!("Editor bridge unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn context(&self) -> BridgeContext {
        self.controller.session().context()
    }

    pub fn report(&self) -> &ContextReport {
        &self.report
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    pub fn session(&self) -> &Session {
        self.controller.session()
    }

    /// Event kinds currently armed, message listener included.
    pub fn armed_events(&self) -> Vec<EventKind> {
        self.registry.armed()
    }

    /// Number of deferred tasks waiting for [`EditorBridge::tick`].
    pub fn pending_tasks(&self) -> usize {
        self.deferred.len()
    }

    /// When the earliest deferred task becomes due, if any is pending.
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.deferred.next_due()
    }

    /// A cross-context message arrived on the window.
    pub fn handle_message(&mut self, raw: &Value) {
        if !self.registry.is_armed(EventKind::Message) {
            return;
        }
        let Some(action) = self.bus.receive(raw) else {
            return;
        };

        match action {
            ControlAction::Activate => {
                self.transition(ModeEvent::Activate);
            }
            ControlAction::Deactivate => {
                self.transition(ModeEvent::Deactivate);
            }
            ControlAction::GetPageInfo => {
                let info = PageInfo::new(self.document.route(), self.document.title());
                self.bus.send(&OutboundMessage::PageInfo(info));
            }
        }
    }

    /// Same as [`EditorBridge::handle_message`] for hosts that deliver text.
    /// Text that is not JSON is ignored.
    pub fn handle_message_text(&mut self, text: &str) {
        match serde_json::from_str::<Value>(text) {
            Ok(raw) => self.handle_message(&raw),
            Err(e) => debug!(error = %e, "Ignoring non-JSON message"),
        }
    }

    pub fn pointer_move(&mut self, target: ElementHandle) {
        if !self.registry.is_armed(EventKind::PointerMove) {
            return;
        }
        let event = self.hover.pointer_move(self.document.as_ref(), target);
        self.transition(event);
    }

    pub fn pointer_leave(&mut self) {
        if !self.registry.is_armed(EventKind::PointerLeave) {
            return;
        }
        let event = self.hover.pointer_leave();
        self.transition(event);
    }

    /// A click reached the document in the capture phase.
    pub fn click(&mut self, target: ElementHandle) -> ClickOutcome {
        if !self.registry.is_armed(EventKind::Click) {
            return ClickOutcome::PASS_THROUGH;
        }
        let document = self.document.as_ref();
        let Some(composing) = self.click_capture.capture(document, &self.selector, target) else {
            return ClickOutcome::PASS_THROUGH;
        };
        if self.transition(ModeEvent::Click(composing)).is_none() {
            return ClickOutcome::PASS_THROUGH;
        }

        match self.clock.now().checked_add_signed(self.click_capture.focus_delay()) {
            Some(due) => self.deferred.schedule(due, DeferredTask::FocusComposer),
            None => debug!("Focus delay out of range, not scheduling focus"),
        }
        ClickOutcome::CAPTURED
    }

    pub fn key_down(&mut self, key: &KeyEvent) -> KeyOutcome {
        if !self.registry.is_armed(EventKind::KeyDown) {
            return KeyOutcome::default();
        }
        let (command, outcome) = self.composer.interpret_key(key);
        match command {
            Some(KeyCommand::Submit) => {
                self.submit();
            }
            Some(KeyCommand::Cancel) => {
                self.cancel();
            }
            None => {}
        }
        outcome
    }

    /// Replace the composer draft. Ignored unless composing.
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        self.mounted && self.controller.set_draft(text)
    }

    /// Send the annotation for the current composing target. Returns `false`
    /// (and changes nothing) when there is no target or the note is blank.
    pub fn submit(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        let Some(record) = self.composer.build_record(
            self.controller.session(),
            self.document.as_ref(),
            &self.selector,
            self.clock.as_ref(),
        ) else {
            debug!(
                mode = %self.mode(),
                has_draft = self.controller.session().has_submittable_draft(),
                "Cannot submit annotation"
            );
            return false;
        };

        info!(
            id = %record.id,
            selector = %record.locator,
            route = %record.route,
            "Submitting annotation"
        );
        self.bus.send(&OutboundMessage::Annotation(record));
        self.transition(ModeEvent::Submit).is_some()
    }

    pub fn cancel(&mut self) -> bool {
        self.mounted && self.transition(ModeEvent::Cancel).is_some()
    }

    /// Run deferred tasks that are due. Returns how many ran.
    pub fn tick(&mut self) -> usize {
        let due = self.deferred.take_due(self.clock.now());
        for task in &due {
            match task {
                DeferredTask::FocusComposer => {
                    if let Err(e) = self.document.focus_composer_input() {
                        debug!(error = %e, "Composer focus skipped");
                    }
                }
            }
        }
        due.len()
    }

    /// Overlay for the current state.
    pub fn render(&self) -> Vec<OverlayElement> {
        if !self.mounted {
            return Vec::new();
        }
        self.overlay
            .render(self.controller.session(), self.document.as_ref(), &self.selector)
    }

    fn transition(&mut self, event: ModeEvent) -> Option<Transition> {
        let transition = self.controller.apply(event)?;
        if transition.changed_mode() {
            info!(from = %transition.from, to = %transition.to, "Mode changed");
            self.rearm(transition.to);
            if !transition.to.is_composing() {
                self.deferred.cancel_all();
            }
        }
        Some(transition)
    }

    fn rearm(&mut self, mode: Mode) {
        self.mode_listeners.clear();
        if !self.mounted {
            return;
        }
        self.mode_listeners = listeners_for(mode)
            .iter()
            .map(|kind| self.registry.listen(*kind))
            .collect();
        debug!(mode = %mode, armed = ?self.registry.armed(), "Listeners re-armed");
    }
}

impl std::fmt::Debug for EditorBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBridge")
            .field("report", &self.report)
            .field("session", self.controller.session())
            .field("armed", &self.registry.armed())
            .field("pending_tasks", &self.deferred.len())
            .field("mounted", &self.mounted)
            .finish()
    }
}
