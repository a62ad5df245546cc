use super::*;
use crate::annotation::BoundingRect;
use chrono::TimeZone;
use serde_json::json;

#[test]
fn test_control_action_serialization() {
    assert_eq!(serde_json::to_string(&ControlAction::Activate).unwrap(), "\"ACTIVATE\"");
    assert_eq!(serde_json::to_string(&ControlAction::Deactivate).unwrap(), "\"DEACTIVATE\"");
    assert_eq!(
        serde_json::to_string(&ControlAction::GetPageInfo).unwrap(),
        "\"GET_PAGE_INFO\""
    );
}

#[test]
fn test_control_action_display_matches_wire() {
    for action in [
        ControlAction::Activate,
        ControlAction::Deactivate,
        ControlAction::GetPageInfo,
    ] {
        let wire = serde_json::to_value(action).unwrap();
        assert_eq!(wire.as_str().unwrap(), action.to_string());
    }
}

#[test]
fn test_decode_activate() {
    let value = json!({ "type": "SITE_EDITOR_CONTROL", "action": "ACTIVATE" });
    let msg = InboundMessage::from_value(&value).unwrap();
    assert_eq!(msg.action(), ControlAction::Activate);
}

#[test]
fn test_decode_get_page_info_from_text() {
    let msg = InboundMessage::from_json(r#"{"type":"SITE_EDITOR_CONTROL","action":"GET_PAGE_INFO"}"#)
        .unwrap();
    assert_eq!(msg.action(), ControlAction::GetPageInfo);
}

#[test]
fn test_decode_ignores_extra_fields() {
    let value = json!({
        "type": "SITE_EDITOR_CONTROL",
        "action": "DEACTIVATE",
        "source": "controller",
    });
    let msg = InboundMessage::from_value(&value).unwrap();
    assert_eq!(msg.action(), ControlAction::Deactivate);
}

#[test]
fn test_decode_rejects_other_type() {
    let value = json!({ "type": "webpackOk" });
    let err = InboundMessage::from_value(&value).unwrap_err();
    assert!(matches!(err, ProtocolError::Unrecognized(_)));
}

#[test]
fn test_decode_rejects_unknown_action() {
    let value = json!({ "type": "SITE_EDITOR_CONTROL", "action": "RELOAD" });
    assert!(matches!(
        InboundMessage::from_value(&value),
        Err(ProtocolError::Unrecognized(_))
    ));
}

#[test]
fn test_decode_rejects_missing_action() {
    let value = json!({ "type": "SITE_EDITOR_CONTROL" });
    assert!(InboundMessage::from_value(&value).is_err());
}

#[test]
fn test_decode_rejects_non_object() {
    assert!(matches!(
        InboundMessage::from_value(&json!("ACTIVATE")),
        Err(ProtocolError::NotAnObject)
    ));
    assert!(matches!(
        InboundMessage::from_value(&json!(null)),
        Err(ProtocolError::NotAnObject)
    ));
}

#[test]
fn test_decode_rejects_invalid_json_text() {
    assert!(matches!(
        InboundMessage::from_json("{\"type\":"),
        Err(ProtocolError::Json(_))
    ));
}

#[test]
fn test_inbound_to_value() {
    let value = InboundMessage::control(ControlAction::GetPageInfo).to_value();
    assert_eq!(value, json!({ "type": "SITE_EDITOR_CONTROL", "action": "GET_PAGE_INFO" }));
}

#[test]
fn test_is_bridge_traffic() {
    assert!(is_bridge_traffic(&json!({ "type": "SITE_EDITOR_CONTROL" })));
    assert!(is_bridge_traffic(&json!({ "type": "SITE_EDITOR_SOMETHING_NEW" })));
    assert!(!is_bridge_traffic(&json!({ "type": "webpackOk" })));
    assert!(!is_bridge_traffic(&json!({ "kind": "SITE_EDITOR_CONTROL" })));
    assert!(!is_bridge_traffic(&json!(42)));
}

#[test]
fn test_page_info_envelope() {
    let msg = OutboundMessage::PageInfo(PageInfo::new("/about", "About us"));
    assert_eq!(msg.message_type(), PAGE_INFO_TYPE);
    assert_eq!(
        msg.to_value().unwrap(),
        json!({
            "type": "SITE_EDITOR_PAGE_INFO",
            "payload": { "route": "/about", "title": "About us" },
        })
    );
}

#[test]
fn test_annotation_envelope() {
    let record = AnnotationRecord {
        id: "annotation-1".to_string(),
        locator: "#buy".to_string(),
        class_tokens: vec!["btn".to_string()],
        tag_name: "button".to_string(),
        text_preview: Some("Buy".to_string()),
        bounding_box: BoundingRect::new(10, 20, 80, 32),
        note: "make this bigger".to_string(),
        selected_text: None,
        captured_at: chrono::Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        route: "/".to_string(),
    };
    let msg = OutboundMessage::Annotation(record);
    assert_eq!(msg.message_type(), ANNOTATION_TYPE);

    let value = msg.to_value().unwrap();
    assert_eq!(value["type"], "SITE_EDITOR_ANNOTATION");
    assert_eq!(value["payload"]["selector"], "#buy");
    assert_eq!(value["payload"]["note"], "make this bigger");
}

#[test]
fn test_outbound_decodes_back() {
    let text = r#"{"type":"SITE_EDITOR_PAGE_INFO","payload":{"route":"/contact","title":"Contact"}}"#;
    let msg: OutboundMessage = serde_json::from_str(text).unwrap();
    assert_eq!(msg, OutboundMessage::PageInfo(PageInfo::new("/contact", "Contact")));
}
