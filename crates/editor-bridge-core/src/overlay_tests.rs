use super::*;
use crate::click::ClickCapture;
use crate::dom::{ElementSpec, MemoryDocument, Viewport};
use crate::mode::{ModeController, ModeEvent};
use editor_bridge_config::{ComposerConfig, SelectorConfig};

fn renderer() -> OverlayRenderer {
    OverlayRenderer::new(&OverlayConfig::default())
}

fn selector() -> SelectorSynthesizer {
    SelectorSynthesizer::new(&SelectorConfig::default()).unwrap()
}

fn active(context: BridgeContext) -> ModeController {
    let mut controller = ModeController::new(context);
    controller.apply(ModeEvent::Activate);
    controller
}

fn compose_on(doc: &MemoryDocument, element: ElementHandle, controller: &mut ModeController) {
    let capture = ClickCapture::new(
        OverlayMarker::new("data-editor-bridge"),
        &ComposerConfig::default(),
    );
    let target = capture.capture(doc, &selector(), element).unwrap();
    controller.apply(ModeEvent::Click(target)).unwrap();
}

#[test]
fn test_inactive_renders_nothing() {
    let doc = MemoryDocument::new();
    let controller = ModeController::new(BridgeContext::Embedded);
    assert!(renderer().render(controller.session(), &doc, &selector()).is_empty());
}

#[test]
fn test_standalone_renders_nothing() {
    let doc = MemoryDocument::new();
    let controller = active(BridgeContext::Standalone);
    assert!(renderer().render(controller.session(), &doc, &selector()).is_empty());
}

#[test]
fn test_idle_shows_only_indicator() {
    let doc = MemoryDocument::new();
    let controller = active(BridgeContext::Embedded);
    let elements = renderer().render(controller.session(), &doc, &selector());

    assert_eq!(elements.len(), 1);
    assert_eq!(
        elements[0].kind,
        OverlayKind::ModeIndicator {
            text: MODE_INDICATOR_TEXT.to_string()
        }
    );
    assert_eq!(elements[0].top, 16.0);
    assert_eq!(elements[0].left, None);
}

#[test]
fn test_hover_highlight_and_tooltip() {
    let doc = MemoryDocument::new();
    let card = doc.append_to_body(
        ElementSpec::new("div")
            .class("card")
            .rect(Rect::new(40.0, 100.0, 200.0, 50.0)),
    );
    let mut controller = active(BridgeContext::Embedded);
    controller.apply(ModeEvent::PointerEnter(card));

    let elements = renderer().render(controller.session(), &doc, &selector());
    assert_eq!(elements.len(), 3);

    let highlight = &elements[0];
    assert_eq!(highlight.kind, OverlayKind::HoverHighlight);
    assert_eq!((highlight.top, highlight.left), (100.0, Some(40.0)));
    assert_eq!((highlight.width, highlight.height), (Some(200.0), Some(50.0)));
    assert_eq!(highlight.z_index, 99998);

    let tooltip = &elements[1];
    assert_eq!(
        tooltip.kind,
        OverlayKind::LocatorTooltip {
            text: "div.card".to_string()
        }
    );
    assert_eq!(tooltip.top, 158.0);
    assert_eq!(tooltip.left, Some(40.0));
    assert_eq!(tooltip.z_index, 99999);
}

#[test]
fn test_hover_uses_live_geometry() {
    let doc = MemoryDocument::new();
    let card = doc.append_to_body(ElementSpec::new("div").rect(Rect::new(0.0, 0.0, 10.0, 10.0)));
    let mut controller = active(BridgeContext::Embedded);
    controller.apply(ModeEvent::PointerEnter(card));

    doc.set_rect(card, Rect::new(5.0, 300.0, 10.0, 10.0));
    let elements = renderer().render(controller.session(), &doc, &selector());
    assert_eq!(elements[0].top, 300.0);
}

#[test]
fn test_tooltip_clamped_below_top_edge() {
    let doc = MemoryDocument::new();
    let banner = doc.append_to_body(ElementSpec::new("div").rect(Rect::new(0.0, -100.0, 50.0, 20.0)));
    let mut controller = active(BridgeContext::Embedded);
    controller.apply(ModeEvent::PointerEnter(banner));

    let elements = renderer().render(controller.session(), &doc, &selector());
    assert_eq!(elements[1].top, 8.0);
}

#[test]
fn test_detached_hover_target_draws_only_indicator() {
    let doc = MemoryDocument::new();
    let card = doc.append_to_body(ElementSpec::new("div"));
    let mut controller = active(BridgeContext::Embedded);
    controller.apply(ModeEvent::PointerEnter(card));
    doc.remove(card);

    let elements = renderer().render(controller.session(), &doc, &selector());
    assert_eq!(elements.len(), 1);
    assert!(matches!(elements[0].kind, OverlayKind::ModeIndicator { .. }));
}

#[test]
fn test_composing_popover_geometry() {
    let doc = MemoryDocument::new();
    doc.set_viewport(Viewport {
        width: 1024.0,
        height: 768.0,
    });
    let heading = doc.append_to_body(ElementSpec::new("h1").rect(Rect::new(100.0, 200.0, 300.0, 40.0)));
    let mut controller = active(BridgeContext::Embedded);
    compose_on(&doc, heading, &mut controller);

    let elements = renderer().render(controller.session(), &doc, &selector());
    assert_eq!(elements.len(), 3);
    assert_eq!(elements[0].kind, OverlayKind::SelectionHighlight);

    let popover = &elements[1];
    assert_eq!(popover.top, 252.0);
    assert_eq!(popover.left, Some(100.0));
    assert_eq!(popover.width, Some(280.0));
    let OverlayKind::Composer(view) = &popover.kind else {
        panic!("expected composer, got {:?}", popover.kind);
    };
    assert_eq!(view.prompt, COMPOSER_PROMPT);
    assert_eq!(view.hint, COMPOSER_HINT);
    assert!(!view.submit_enabled);
}

#[test]
fn test_popover_clamped_to_viewport() {
    let doc = MemoryDocument::new();
    doc.set_viewport(Viewport {
        width: 800.0,
        height: 600.0,
    });
    let footer = doc.append_to_body(ElementSpec::new("footer").rect(Rect::new(700.0, 550.0, 100.0, 40.0)));
    let mut controller = active(BridgeContext::Embedded);
    compose_on(&doc, footer, &mut controller);

    let popover = &renderer().render(controller.session(), &doc, &selector())[1];
    assert_eq!(popover.top, 440.0);
    assert_eq!(popover.left, Some(504.0));
}

#[test]
fn test_popover_left_inset() {
    let doc = MemoryDocument::new();
    let edge = doc.append_to_body(ElementSpec::new("aside").rect(Rect::new(2.0, 10.0, 50.0, 20.0)));
    let mut controller = active(BridgeContext::Embedded);
    compose_on(&doc, edge, &mut controller);

    let popover = &renderer().render(controller.session(), &doc, &selector())[1];
    assert_eq!(popover.left, Some(16.0));
}

#[test]
fn test_composing_highlight_uses_frozen_rect() {
    let doc = MemoryDocument::new();
    let heading = doc.append_to_body(ElementSpec::new("h1").rect(Rect::new(100.0, 200.0, 300.0, 40.0)));
    let mut controller = active(BridgeContext::Embedded);
    compose_on(&doc, heading, &mut controller);
    doc.set_rect(heading, Rect::new(0.0, 0.0, 1.0, 1.0));

    let highlight = &renderer().render(controller.session(), &doc, &selector())[0];
    assert_eq!(highlight.top, 200.0);
    assert_eq!(highlight.width, Some(300.0));
}

#[test]
fn test_submit_enabled_follows_draft() {
    let doc = MemoryDocument::new();
    let heading = doc.append_to_body(ElementSpec::new("h1"));
    let mut controller = active(BridgeContext::Embedded);
    compose_on(&doc, heading, &mut controller);
    controller.set_draft("Bigger please");

    let popover = &renderer().render(controller.session(), &doc, &selector())[1];
    let OverlayKind::Composer(view) = &popover.kind else {
        panic!("expected composer");
    };
    assert_eq!(view.draft, "Bigger please");
    assert!(view.submit_enabled);
}

#[test]
fn test_every_element_is_marked() {
    let doc = MemoryDocument::new();
    let card = doc.append_to_body(ElementSpec::new("div"));
    let mut controller = active(BridgeContext::Embedded);
    controller.apply(ModeEvent::PointerEnter(card));

    let elements = renderer().render(controller.session(), &doc, &selector());
    assert_eq!(elements.len(), 3);
    assert!(elements.iter().all(|e| e.marker_attribute == "data-editor-bridge"));
}

#[test]
fn test_css_declaration() {
    let doc = MemoryDocument::new();
    let card = doc.append_to_body(ElementSpec::new("div").rect(Rect::new(4.0, 8.0, 16.0, 32.0)));
    let mut controller = active(BridgeContext::Embedded);
    controller.apply(ModeEvent::PointerEnter(card));

    let elements = renderer().render(controller.session(), &doc, &selector());
    assert_eq!(
        elements[0].css(),
        "position:fixed;top:8px;left:4px;width:16px;height:32px;z-index:99998;"
    );
    assert_eq!(
        elements[2].css(),
        "position:fixed;top:16px;left:50%;transform:translateX(-50%);z-index:99999;"
    );
}

#[test]
fn test_marker_owns_descendants() {
    let doc = MemoryDocument::new();
    let overlay = doc.append_to_body(ElementSpec::new("div").attr("data-editor-bridge", ""));
    let inner = doc.append(overlay, ElementSpec::new("textarea")).unwrap();
    let page = doc.append_to_body(ElementSpec::new("p"));
    let marker = OverlayMarker::new("data-editor-bridge");

    assert!(marker.owns(&doc, overlay));
    assert!(marker.owns(&doc, inner));
    assert!(!marker.owns(&doc, page));
}

#[test]
fn test_overlay_element_serializes_kind_tag() {
    let doc = MemoryDocument::new();
    let controller = active(BridgeContext::Embedded);
    let elements = renderer().render(controller.session(), &doc, &selector());

    let value = serde_json::to_value(&elements[0]).unwrap();
    assert_eq!(value["kind"], "mode_indicator");
    assert_eq!(value["text"], MODE_INDICATOR_TEXT);
    assert_eq!(value["z_index"], 99999);
}
