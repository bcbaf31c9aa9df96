use uuid::Uuid;

use super::*;

#[test]
fn invalid_file_type_has_notice() {
    let err = DesignerError::InvalidFileType { mime: "application/pdf".into() };
    assert_eq!(err.user_notice(), Some("Please upload an image file (PNG, JPG, SVG, or WEBP)."));
    assert!(err.to_string().contains("application/pdf"));
}

#[test]
fn empty_text_has_notice() {
    assert_eq!(DesignerError::EmptyTextInput.user_notice(), Some("Please enter some text first!"));
}

#[test]
fn absorbed_errors_have_no_notice() {
    assert!(DesignerError::MissingDomTarget("design-canvas".into()).user_notice().is_none());
    assert!(DesignerError::DimensionUnavailable.user_notice().is_none());
    assert!(DesignerError::ObjectNotFound(Uuid::nil()).user_notice().is_none());
    assert!(DesignerError::Render("boom".into()).user_notice().is_none());
}

#[test]
fn dom_and_dimension_failures_are_absorbed() {
    assert!(DesignerError::MissingDomTarget("document".into()).is_absorbed());
    assert!(DesignerError::DimensionUnavailable.is_absorbed());
    assert!(!DesignerError::Render("boom".into()).is_absorbed());
    assert!(!DesignerError::EmptyTextInput.is_absorbed());
}

#[test]
fn absorbed_and_notice_never_overlap() {
    let all = [
        DesignerError::InvalidFileType { mime: "text/plain".into() },
        DesignerError::EmptyTextInput,
        DesignerError::MissingDomTarget("body".into()),
        DesignerError::DimensionUnavailable,
        DesignerError::InvalidArgument("x".into()),
        DesignerError::InvalidTextStyle("x".into()),
        DesignerError::UnknownSticker(99),
        DesignerError::ObjectNotFound(Uuid::nil()),
        DesignerError::ConfigParse("x".into()),
        DesignerError::CatalogParse("x".into()),
        DesignerError::Render("x".into()),
    ];
    for err in &all {
        assert!(!(err.is_absorbed() && err.user_notice().is_some()), "{err} is both absorbed and a notice");
    }
    assert_eq!(all.iter().filter(|e| e.is_absorbed()).count(), 2);
}

#[test]
fn serde_error_maps_to_config_parse() {
    let err = serde_json::from_str::<u32>("nope").map_err(DesignerError::from);
    assert!(matches!(err, Err(DesignerError::ConfigParse(_))));
}
