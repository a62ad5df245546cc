use super::*;

#[test]
fn test_validate_default_config() {
    let config = BridgeConfig::default();
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(
        result
            .warnings
            .iter()
            .any(|w| w.path == "messaging.target_origin")
    );
}

#[test]
fn test_validate_zero_depth() {
    let mut config = BridgeConfig::default();
    config.selector.max_depth = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "selector.max_depth"));
}

#[test]
fn test_validate_high_depth_warning() {
    let mut config = BridgeConfig::default();
    config.selector.max_depth = 40;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "selector.max_depth"));
}

#[test]
fn test_validate_empty_prefix() {
    let mut config = BridgeConfig::default();
    config.selector.utility_prefixes.push(String::new());

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
}

#[test]
fn test_validate_prefix_with_dash_warning() {
    let mut config = BridgeConfig::default();
    config.selector.utility_prefixes = vec!["tw-".to_string()];

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "selector.utility_prefixes"));
}

#[test]
fn test_validate_empty_marker_attribute() {
    let mut config = BridgeConfig::default();
    config.overlay.marker_attribute = String::new();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "overlay.marker_attribute"));
}

#[test]
fn test_validate_marker_attribute_with_space() {
    let mut config = BridgeConfig::default();
    config.overlay.marker_attribute = "data editor".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
}

#[test]
fn test_validate_negative_gap() {
    let mut config = BridgeConfig::default();
    config.overlay.popover_gap = -1.0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "overlay.popover_gap"));
}

#[test]
fn test_validate_zero_popover_width() {
    let mut config = BridgeConfig::default();
    config.overlay.popover_width = 0.0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
}

#[test]
fn test_validate_explicit_origin() {
    let mut config = BridgeConfig::default();
    config.messaging.target_origin = "https://editor.example.com".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(
        !result
            .warnings
            .iter()
            .any(|w| w.path == "messaging.target_origin")
    );
}

#[test]
fn test_validate_bad_origin() {
    let mut config = BridgeConfig::default();
    config.messaging.target_origin = "editor.example.com".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
}

#[test]
fn test_validate_known_host_url_warning() {
    let mut config = BridgeConfig::default();
    config.detection.known_hosts = vec!["https://preview.example.com".to_string()];

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "detection.known_hosts"));
}

#[test]
fn test_validate_preview_disabled_warning() {
    let mut config = BridgeConfig::default();
    config.composer.text_preview_chars = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.warnings.iter().any(|w| w.path == "composer.text_preview_chars"));
}

#[test]
fn test_validation_result_default() {
    let result = ValidationResult::default();
    assert!(result.is_valid());
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validation_error_new() {
    let err = ValidationError::new("selector.max_depth", "must be positive");
    assert_eq!(err.path, "selector.max_depth");
    assert_eq!(err.message, "must be positive");
}
