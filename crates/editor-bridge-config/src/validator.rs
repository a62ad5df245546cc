//! Configuration validation.

use crate::schema::BridgeConfig;

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &BridgeConfig) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_detection(config, &mut result);
        Self::validate_messaging(config, &mut result);
        Self::validate_selector(config, &mut result);
        Self::validate_overlay(config, &mut result);
        Self::validate_composer(config, &mut result);

        result
    }

    fn validate_detection(config: &BridgeConfig, result: &mut ValidationResult) {
        for host in &config.detection.known_hosts {
            if host.contains("://") || host.contains('/') {
                result.add_warning(ValidationWarning::new(
                    "detection.known_hosts",
                    format!("'{}' looks like a URL, expected a bare hostname", host),
                ));
            }
        }
    }

    fn validate_messaging(config: &BridgeConfig, result: &mut ValidationResult) {
        let origin = &config.messaging.target_origin;
        if origin.is_empty() {
            result.add_error(ValidationError::new(
                "messaging.target_origin",
                "target_origin cannot be empty",
            ));
        } else if origin == "*" {
            result.add_warning(ValidationWarning::new(
                "messaging.target_origin",
                "Outbound messages are posted to any parent origin",
            ));
        } else if !origin.starts_with("http://") && !origin.starts_with("https://") {
            result.add_error(ValidationError::new(
                "messaging.target_origin",
                "target_origin must be \"*\" or start with http:// or https://",
            ));
        }
    }

    fn validate_selector(config: &BridgeConfig, result: &mut ValidationResult) {
        if config.selector.max_depth == 0 {
            result.add_error(ValidationError::new(
                "selector.max_depth",
                "max_depth must be greater than 0",
            ));
        }

        if config.selector.max_depth > 16 {
            result.add_warning(ValidationWarning::new(
                "selector.max_depth",
                "max_depth is very high (>16), locators will be hard to read",
            ));
        }

        for prefix in &config.selector.utility_prefixes {
            if prefix.is_empty() {
                result.add_error(ValidationError::new(
                    "selector.utility_prefixes",
                    "Utility prefixes cannot be empty",
                ));
            } else if prefix.ends_with('-') {
                result.add_warning(ValidationWarning::new(
                    "selector.utility_prefixes",
                    format!("Prefix '{}' should not include the trailing '-'", prefix),
                ));
            }
        }
    }

    fn validate_overlay(config: &BridgeConfig, result: &mut ValidationResult) {
        let marker = &config.overlay.marker_attribute;
        if marker.is_empty() {
            result.add_error(ValidationError::new(
                "overlay.marker_attribute",
                "marker_attribute cannot be empty",
            ));
        } else if marker
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '=' | '>' | '/'))
        {
            result.add_error(ValidationError::new(
                "overlay.marker_attribute",
                format!("'{}' is not a valid attribute name", marker),
            ));
        }

        if config.overlay.popover_width <= 0.0 {
            result.add_error(ValidationError::new(
                "overlay.popover_width",
                "popover_width must be greater than 0",
            ));
        }

        for (path, value) in [
            ("overlay.popover_min_inset", config.overlay.popover_min_inset),
            ("overlay.popover_bottom_reserve", config.overlay.popover_bottom_reserve),
            ("overlay.popover_gap", config.overlay.popover_gap),
            ("overlay.tooltip_gap", config.overlay.tooltip_gap),
        ] {
            if value < 0.0 {
                result.add_error(ValidationError::new(path, "Value cannot be negative"));
            }
        }

        if config.overlay.highlight_z_index >= config.overlay.popover_z_index {
            result.add_warning(ValidationWarning::new(
                "overlay.highlight_z_index",
                "Highlights will be drawn over the composer popover",
            ));
        }
    }

    fn validate_composer(config: &BridgeConfig, result: &mut ValidationResult) {
        if config.composer.text_preview_chars == 0 {
            result.add_warning(ValidationWarning::new(
                "composer.text_preview_chars",
                "Text previews are disabled",
            ));
        }

        if config.composer.focus_delay_ms > 1000 {
            result.add_warning(ValidationWarning::new(
                "composer.focus_delay_ms",
                "focus_delay_ms is very high (>1000), the composer will feel unresponsive",
            ));
        }
    }
}
