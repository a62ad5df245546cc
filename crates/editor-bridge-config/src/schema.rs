//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub detection: DetectionConfig,

    #[serde(default)]
    pub messaging: MessagingConfig,

    #[serde(default)]
    pub selector: SelectorConfig,

    #[serde(default)]
    pub overlay: OverlayConfig,

    #[serde(default)]
    pub composer: ComposerConfig,
}

/// Context detection hints.
///
/// `known_hosts` only feeds the mount-time diagnostic report. Any document
/// with a parent browsing context is treated as embedded regardless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    #[serde(default = "default_known_hosts")]
    pub known_hosts: Vec<String>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            known_hosts: default_known_hosts(),
        }
    }
}

fn default_known_hosts() -> Vec<String> {
    vec!["preview.qwertz.me".to_string()]
}

/// Outbound messaging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagingConfig {
    /// Target origin passed to the transport for every outbound message.
    #[serde(default = "default_target_origin")]
    pub target_origin: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            target_origin: default_target_origin(),
        }
    }
}

fn default_target_origin() -> String {
    "*".to_string()
}

/// Locator synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Levels walked upward, counting the element itself.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Meaningful class tokens kept per level.
    #[serde(default = "default_max_classes")]
    pub max_classes: usize,

    /// Class prefixes (before a `-`) treated as utility classes and skipped.
    #[serde(default = "default_utility_prefixes")]
    pub utility_prefixes: Vec<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_classes: default_max_classes(),
            utility_prefixes: default_utility_prefixes(),
        }
    }
}

fn default_max_depth() -> usize {
    4
}

fn default_max_classes() -> usize {
    2
}

fn default_utility_prefixes() -> Vec<String> {
    [
        "p", "m", "w", "h", "text", "bg", "flex", "grid", "border", "rounded", "shadow", "hover",
        "focus", "active", "sm", "md", "lg", "xl",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Overlay geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Attribute carried by every overlay element.
    #[serde(default = "default_marker_attribute")]
    pub marker_attribute: String,

    #[serde(default = "default_popover_width")]
    pub popover_width: f64,

    /// Smallest distance kept between the popover and the viewport's edges.
    #[serde(default = "default_popover_min_inset")]
    pub popover_min_inset: f64,

    /// Space reserved below the popover's top edge at the viewport bottom.
    #[serde(default = "default_popover_bottom_reserve")]
    pub popover_bottom_reserve: f64,

    /// Gap between the selected element and the popover.
    #[serde(default = "default_popover_gap")]
    pub popover_gap: f64,

    /// Gap between the hovered element and the locator tooltip.
    #[serde(default = "default_tooltip_gap")]
    pub tooltip_gap: f64,

    #[serde(default = "default_highlight_z_index")]
    pub highlight_z_index: u32,

    #[serde(default = "default_popover_z_index")]
    pub popover_z_index: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            marker_attribute: default_marker_attribute(),
            popover_width: default_popover_width(),
            popover_min_inset: default_popover_min_inset(),
            popover_bottom_reserve: default_popover_bottom_reserve(),
            popover_gap: default_popover_gap(),
            tooltip_gap: default_tooltip_gap(),
            highlight_z_index: default_highlight_z_index(),
            popover_z_index: default_popover_z_index(),
        }
    }
}

fn default_marker_attribute() -> String {
    "data-editor-bridge".to_string()
}

fn default_popover_width() -> f64 {
    280.0
}

fn default_popover_min_inset() -> f64 {
    16.0
}

fn default_popover_bottom_reserve() -> f64 {
    160.0
}

fn default_popover_gap() -> f64 {
    12.0
}

fn default_tooltip_gap() -> f64 {
    8.0
}

fn default_highlight_z_index() -> u32 {
    99998
}

fn default_popover_z_index() -> u32 {
    99999
}

/// Annotation composer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Delay before the composer input is focused after a click.
    #[serde(default = "default_focus_delay_ms")]
    pub focus_delay_ms: u64,

    /// Characters of element text kept in the record.
    #[serde(default = "default_text_preview_chars")]
    pub text_preview_chars: usize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            focus_delay_ms: default_focus_delay_ms(),
            text_preview_chars: default_text_preview_chars(),
        }
    }
}

fn default_focus_delay_ms() -> u64 {
    50
}

fn default_text_preview_chars() -> usize {
    100
}
