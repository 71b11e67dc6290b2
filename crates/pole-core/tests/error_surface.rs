use pole_core::errors::{ErrorInfo, PoleError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("layer", "POSTE_A")
        .with_context("reason", "example")
}

#[test]
fn configuration_error_surface() {
    let err = PoleError::Configuration(sample_info("invalid-radius", "radius must be positive"));
    assert_eq!(err.info().code, "invalid-radius");
    assert!(err.info().context.contains_key("layer"));
    assert!(!err.is_empty_input());
}

#[test]
fn path_extraction_error_surface() {
    let err = PoleError::PathExtraction(sample_info("no-segments", "no segments"));
    assert_eq!(err.info().code, "no-segments");
}

#[test]
fn empty_input_is_distinguishable() {
    let err = PoleError::EmptyInput(sample_info("empty-pool", "nothing to number"));
    assert!(err.is_empty_input());
}

#[test]
fn display_includes_context_and_hint() {
    let err = PoleError::Association(
        ErrorInfo::new("A001", "layer missing")
            .with_context("layer", "TEXT")
            .with_hint("check the layer name"),
    );
    let rendered = err.to_string();
    assert!(rendered.starts_with("association error: layer missing (code: A001)"));
    assert!(rendered.contains("layer=TEXT"));
    assert!(rendered.contains("hint: check the layer name"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = PoleError::Serde(ErrorInfo::new("json_write", "disk full"));
    let value = serde_json::to_value(&err).unwrap();
    assert_eq!(value["family"], "Serde");
    assert_eq!(value["detail"]["code"], "json_write");
    let back: PoleError = serde_json::from_value(value).unwrap();
    assert_eq!(back, err);
}
