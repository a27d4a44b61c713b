//! Load-time errors and their diagnostics.

use formlet::{Form, FormError, SourceContext, SourceSpan};
use pretty_assertions::assert_eq;

#[test]
fn test_missing_name_diagnostic() {
    let source = "<ui:form>\n  <ui:text id=\"usn\"/>\n</ui:form>";
    let err = Form::load(source).unwrap_err();
    assert_eq!(
        err,
        FormError::MissingName {
            element: "ui:text".to_string(),
            location: SourceSpan::new(13, 20),
        }
    );

    let diagnostic = err.to_diagnostic();
    insta::assert_snapshot!(diagnostic.to_text(None).trim_end(), @r"
    Error [F-2-2]: Missing Element Name
    Element `ui:text` needs a non-empty `name` attribute
    ? Only labels, messages and directives may omit `name`. Add one?
    ");

    let ctx = SourceContext::new("signup.xml", source);
    let text = diagnostic.to_text(Some(&ctx));
    assert!(text.contains("F-2-2"), "{}", text);
    assert!(text.contains("signup.xml"), "{}", text);
    assert!(text.contains("? Only labels"), "{}", text);
}

#[test]
fn test_wrong_root_diagnostic() {
    let err = Form::load(r#"<html><ui:text name="a"/></html>"#).unwrap_err();
    assert_eq!(err.location(), Some(SourceSpan::new(1, 5)));

    let json = err.to_diagnostic().to_json();
    assert_eq!(json["code"], "F-2-1");
    assert_eq!(json["kind"], "error");
    assert_eq!(json["details"][0]["content"], "Found `html`");
}

#[test]
fn test_markup_errors() {
    let err = Form::load("<ui:form><p></ui:form>").unwrap_err();
    assert!(matches!(err, FormError::Xml(_)), "Got: {:?}", err);
    assert!(err.location().is_some());

    let err = Form::load("   ").unwrap_err();
    assert_eq!(err.to_diagnostic().code.as_deref(), Some("F-1-5"));
}

#[test]
fn test_missing_name_inside_directive() {
    let err = Form::load(
        r#"<ui:form><ui:iferror><p><ui:multiSelect bind="x"/></p></ui:iferror></ui:form>"#,
    )
    .unwrap_err();
    assert!(
        matches!(&err, FormError::MissingName { element, .. } if element == "ui:multiSelect"),
        "Got: {:?}",
        err
    );
}
