//! `replay` subcommand.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde_json::{Value, json};
use tracing::{debug, info};

use editor_bridge_config::BridgeConfig;
use editor_bridge_protocols::InboundMessage;
use editor_bridge_core::{
    Clock, EditorBridge, ElementHandle, KeyEvent, ManualClock, MemoryDocument, MemoryTransport,
    SystemClock,
};

use crate::script::{ScriptEvent, parse_script};

/// How `advance` events move time.
enum ReplayClock {
    Manual(Arc<ManualClock>),
    Realtime,
}

/// A bridge mounted on an in-memory document, fed one script event at a
/// time.
pub(crate) struct Replay {
    document: Arc<MemoryDocument>,
    transport: Arc<MemoryTransport>,
    clock: ReplayClock,
    bridge: EditorBridge,
    render: bool,
}

impl Replay {
    pub(crate) fn new(
        config: &BridgeConfig,
        document: MemoryDocument,
        render: bool,
        realtime: bool,
    ) -> anyhow::Result<Self> {
        let document = Arc::new(document);
        let transport = Arc::new(MemoryTransport::new());
        let (clock, bridge_clock): (ReplayClock, Arc<dyn Clock>) = if realtime {
            (ReplayClock::Realtime, Arc::new(SystemClock))
        } else {
            let manual = Arc::new(ManualClock::new(SystemClock.now()));
            let shared: Arc<dyn Clock> = manual.clone();
            (ReplayClock::Manual(manual), shared)
        };

        let bridge = EditorBridge::mount(config, document.clone(), transport.clone(), bridge_clock)
            .context("Failed to mount bridge")?;

        Ok(Self {
            document,
            transport,
            clock,
            bridge,
            render,
        })
    }

    /// Apply one event and return the output lines it produced: outbound
    /// messages, then the overlay when rendering.
    pub(crate) async fn step(&mut self, index: usize, event: &ScriptEvent) -> Vec<Value> {
        debug!(step = index, event = event.name(), "Replaying event");

        match event {
            ScriptEvent::Message { data } => self.bridge.handle_message(data),
            ScriptEvent::Control { action } => {
                self.bridge.handle_message(&InboundMessage::control(*action).to_value());
            }
            ScriptEvent::PointerMove { target } => self.bridge.pointer_move(ElementHandle(*target)),
            ScriptEvent::PointerLeave => self.bridge.pointer_leave(),
            ScriptEvent::Click { target } => {
                let outcome = self.bridge.click(ElementHandle(*target));
                debug!(element = *target, captured = outcome.is_captured(), "Click dispatched");
            }
            ScriptEvent::Key { key, shift } => {
                let outcome = self.bridge.key_down(&KeyEvent {
                    key: key.clone(),
                    shift: *shift,
                });
                debug!(key = %key, prevent_default = outcome.prevent_default, "Key dispatched");
            }
            ScriptEvent::Draft { text } => {
                self.bridge.set_draft(text.clone());
            }
            ScriptEvent::Submit => {
                self.bridge.submit();
            }
            ScriptEvent::Cancel => {
                self.bridge.cancel();
            }
            ScriptEvent::Advance { ms } => self.advance(*ms).await,
            ScriptEvent::Navigate { route } => self.document.set_route(route.clone()),
            ScriptEvent::Unmount => self.bridge.unmount(),
        }
        self.bridge.tick();
        self.settle().await;

        let mut lines: Vec<Value> = self
            .transport
            .take()
            .into_iter()
            .map(|posted| posted.message)
            .collect();
        if self.render {
            lines.push(json!({
                "step": index,
                "event": event.name(),
                "mode": self.bridge.mode(),
                "overlay": self.bridge.render(),
            }));
        }
        lines
    }

    /// In realtime mode, wait for pending deferred work and run it.
    async fn settle(&mut self) {
        if !matches!(self.clock, ReplayClock::Realtime) {
            return;
        }
        while let Some(due) = self.bridge.next_due() {
            if let Ok(wait) = (due - SystemClock.now()).to_std() {
                tokio::time::sleep(wait).await;
            }
            self.bridge.tick();
        }
    }

    async fn advance(&self, ms: u64) {
        match &self.clock {
            ReplayClock::Manual(clock) => {
                let ms = i64::try_from(ms).unwrap_or(i64::MAX);
                clock.advance(
                    chrono::Duration::try_milliseconds(ms).unwrap_or(chrono::Duration::MAX),
                );
            }
            ReplayClock::Realtime => {
                tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
            }
        }
    }
}

/// Handle `replay`.
pub(crate) async fn handle_replay(
    config: &BridgeConfig,
    document: &Path,
    script: &Path,
    render: bool,
    realtime: bool,
) -> anyhow::Result<()> {
    let fixture = tokio::fs::read_to_string(document)
        .await
        .with_context(|| format!("Failed to read document fixture {}", document.display()))?;
    let document = MemoryDocument::from_json(&fixture).context("Invalid document fixture")?;

    let script_text = tokio::fs::read_to_string(script)
        .await
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let events = parse_script(&script_text)?;
    info!(events = events.len(), "Starting replay");

    let mut replay = Replay::new(config, document, render, realtime)?;
    let mut emitted = 0;
    for (index, event) in events.iter().enumerate() {
        for line in replay.step(index, event).await {
            println!("{}", serde_json::to_string(&line)?);
            emitted += 1;
        }
    }

    info!(lines = emitted, "Replay finished");
    Ok(())
}
