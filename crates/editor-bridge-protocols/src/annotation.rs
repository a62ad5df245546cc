//! Annotation payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "annotation_tests.rs"]
mod tests;

/// Integer bounding box in viewport pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Round fractional layout coordinates to whole pixels. Halves round
    /// toward positive infinity, so `-2.5` becomes `-2`.
    pub fn rounded(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            round_half_up(x),
            round_half_up(y),
            round_half_up(width),
            round_half_up(height),
        )
    }
}

fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// One submitted annotation.
///
/// Field names on the wire follow the controller's contract (`selector`,
/// `classNames`, `boundingRect`, `timestamp`), which differ from the Rust
/// names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Opaque unique id, generated at emission time.
    pub id: String,

    /// Structural locator of the annotated element, for display only.
    #[serde(rename = "selector")]
    pub locator: String,

    /// Class list of the element in authored order.
    #[serde(rename = "classNames")]
    pub class_tokens: Vec<String>,

    /// Lowercase tag name.
    #[serde(rename = "tagName")]
    pub tag_name: String,

    /// Leading characters of the element's text content.
    #[serde(rename = "textContent", skip_serializing_if = "Option::is_none", default)]
    pub text_preview: Option<String>,

    /// Bounding box captured when the element was clicked.
    #[serde(rename = "boundingRect")]
    pub bounding_box: BoundingRect,

    /// Trimmed, non-empty note typed by the user.
    pub note: String,

    /// Text the user had selected in the document when clicking.
    #[serde(rename = "selectedText", skip_serializing_if = "Option::is_none", default)]
    pub selected_text: Option<String>,

    /// Capture time, encoded as unix milliseconds.
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub captured_at: DateTime<Utc>,

    /// Document path at capture time.
    pub route: String,
}

impl AnnotationRecord {
    /// Generate an annotation id for the given capture time.
    ///
    /// Ids look like `annotation-1700000000000-1a2b3c4d`; the random suffix
    /// keeps ids unique when two records share a millisecond.
    pub fn generate_id(at: DateTime<Utc>) -> String {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("annotation-{}-{}", at.timestamp_millis(), &suffix[..8])
    }
}
