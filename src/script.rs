//! Replay scripts: one JSON event per line.

use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;

use editor_bridge_protocols::ControlAction;

/// A host event fed to the bridge during replay.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub(crate) enum ScriptEvent {
    /// Window `message` carrying `data`.
    Message { data: Value },
    /// Shorthand for a control envelope from the controller.
    Control { action: ControlAction },
    PointerMove { target: u64 },
    PointerLeave,
    Click { target: u64 },
    Key {
        key: String,
        #[serde(default)]
        shift: bool,
    },
    /// Replace the composer draft.
    Draft { text: String },
    Submit,
    Cancel,
    /// Let time pass, then run due deferred tasks.
    Advance { ms: u64 },
    /// Client-side route change.
    Navigate { route: String },
    Unmount,
}

impl ScriptEvent {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            ScriptEvent::Message { .. } => "message",
            ScriptEvent::Control { .. } => "control",
            ScriptEvent::PointerMove { .. } => "pointer_move",
            ScriptEvent::PointerLeave => "pointer_leave",
            ScriptEvent::Click { .. } => "click",
            ScriptEvent::Key { .. } => "key",
            ScriptEvent::Draft { .. } => "draft",
            ScriptEvent::Submit => "submit",
            ScriptEvent::Cancel => "cancel",
            ScriptEvent::Advance { .. } => "advance",
            ScriptEvent::Navigate { .. } => "navigate",
            ScriptEvent::Unmount => "unmount",
        }
    }
}

/// Parse a script. Blank lines and lines starting with `#` are skipped.
pub(crate) fn parse_script(text: &str) -> anyhow::Result<Vec<ScriptEvent>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid script line {}", index + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_script() {
        let script = r#"
# activate, then annotate the buy button
{"event":"message","data":{"type":"SITE_EDITOR_CONTROL","action":"ACTIVATE"}}
{"event":"click","target":3}

{"event":"draft","text":"make this bigger"}
{"event":"key","key":"Enter"}
{"event":"advance","ms":50}
"#;
        let events = parse_script(script).unwrap();
        assert_eq!(events.len(), 5);
        assert_eq!(
            events[0],
            ScriptEvent::Message {
                data: json!({"type": "SITE_EDITOR_CONTROL", "action": "ACTIVATE"})
            }
        );
        assert_eq!(events[1], ScriptEvent::Click { target: 3 });
        assert_eq!(
            events[3],
            ScriptEvent::Key {
                key: "Enter".to_string(),
                shift: false
            }
        );
        assert_eq!(events[4].name(), "advance");
    }

    #[test]
    fn test_unit_events() {
        let events = parse_script(
            "{\"event\":\"submit\"}\n{\"event\":\"cancel\"}\n{\"event\":\"pointer_leave\"}\n{\"event\":\"unmount\"}",
        )
        .unwrap();
        assert_eq!(
            events,
            vec![
                ScriptEvent::Submit,
                ScriptEvent::Cancel,
                ScriptEvent::PointerLeave,
                ScriptEvent::Unmount
            ]
        );
    }

    #[test]
    fn test_control_shorthand() {
        let events = parse_script(r#"{"event":"control","action":"GET_PAGE_INFO"}"#).unwrap();
        assert_eq!(
            events,
            vec![ScriptEvent::Control {
                action: ControlAction::GetPageInfo
            }]
        );
        assert_eq!(events[0].name(), "control");
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let err = parse_script("{\"event\":\"submit\"}\n{\"event\":\"fly\"}").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
