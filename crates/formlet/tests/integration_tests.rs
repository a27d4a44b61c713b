//! End-to-end tests: load a layout, submit a request, validate and render.

use formlet::{DataBinding, FieldValue, Form, MapTranslator, RequestData, ValidatorInput, Value};
use pretty_assertions::assert_eq;
use std::path::Path;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> std::path::PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir).join("test-fixtures").join(name)
}

fn signup(request: RequestData) -> Form {
    let source = std::fs::read_to_string(fixture_path("signup.xml"))
        .unwrap_or_else(|_| panic!("Failed to read fixture: signup.xml"));
    let translator = MapTranslator::new()
        .with("user.name", "Name")
        .with("user.age", "Age")
        .with("choose", "-- choose --")
        .with("button.send", "Send");

    let mut form = Form::load(&source)
        .unwrap()
        .with_translator(translator)
        .with_validator("weekday", |input: &ValidatorInput<'_>| match input {
            ValidatorInput::Multi { values, .. } => !values.contains(&"Sun"),
            _ => false,
        })
        .with_request(request);
    form.register_binding("langs", vec!["Rust", "Go"]);
    form.register_binding("days", vec!["Mon", "Tue", "Wed", "Sun"]);
    form.register_binding("show_admin", false);
    form
}

#[test]
fn test_empty_required_field_scenario() {
    let form = Form::load(r#"<ui:form><ui:text name="usn" required=""/><ui:submit name="go"/></ui:form>"#)
        .unwrap()
        .with_request(RequestData::new("/").with_param("go", "1").with_param("usn", ""));

    assert!(form.is_submitted());
    assert!(!form.is_valid());
    assert_eq!(form.messages(), ["Field \"usn\" may not be empty."]);
}

#[test]
fn test_optional_text_with_content_is_valid() {
    let form = Form::load(r#"<ui:form><ui:text name="t"/><ui:submit name="go"/></ui:form>"#)
        .unwrap()
        .with_request(RequestData::new("/").with_param("go", "1").with_param("t", "x"));
    assert!(form.is_valid());
}

#[test]
fn test_number_field() {
    let layout = r#"<ui:form><ui:text name="n" number=""/><ui:submit name="go"/></ui:form>"#;
    let check = |value: &str| {
        let form = Form::load(layout)
            .unwrap()
            .with_request(RequestData::new("/").with_param("go", "1").with_param("n", value));
        (form.is_valid(), form.messages().to_vec())
    };

    assert_eq!(check("12"), (true, vec![]));
    assert_eq!(
        check("12a"),
        (false, vec!["Field \"n\" may only contain a number.".to_string()])
    );
}

#[test]
fn test_required_single_select_not_submitted() {
    let layout = r#"<ui:form>
        <ui:singleSelect name="a" bind="x" required=""/>
        <ui:singleSelect name="b" bind="x" required="" message=":msg.pick"/>
        <ui:submit name="go"/>
    </ui:form>"#;
    let form = Form::load(layout)
        .unwrap()
        .with_request(RequestData::new("/").with_param("go", "1"));
    assert!(!form.is_valid());
    assert_eq!(form.messages(), ["Field \"a\" is not valid.", ":msg.pick"]);
}

#[test]
fn test_signup_invalid_submission() {
    let form = signup(
        RequestData::new("/signup")
            .with_param("go", "1")
            .with_param("usn", "ab")
            .with_param("age", "12a")
            .with_param("pwd", "")
            .with_param("lang", "-1"),
    );

    assert!(form.is_submitted());
    assert!(!form.is_valid());
    assert_eq!(
        form.messages(),
        [
            "Field \"usn\" requires at least 3 characters.",
            "Field \"age\" may only contain a number.",
            "Field \"pwd\" may not be empty.",
            "Select one option from \"lang\".",
            "For field \"days\" at least one element must be selected.",
        ]
    );

    let markup = form.to_markup();
    assert!(markup.contains("Please fix the errors above."));
    assert!(markup.contains(r#"<li class="error">Field "pwd" may not be empty.</li>"#));
    assert!(markup.contains(r#"<input type="text" name="usn" id="usn" value="ab" />"#));
    assert!(markup.contains(r#"<option value="-1" selected>-- choose --</option>"#));
}

#[test]
fn test_signup_valid_submission() {
    let form = signup(
        RequestData::from_pairs(
            "/signup",
            [
                ("go", "1"),
                ("usn", "ada"),
                ("age", "36"),
                ("pwd", "secret"),
                ("lang", "1"),
                ("days[]", "0"),
                ("days[]", "2"),
                ("agree[]", "on"),
            ],
        ),
    );

    assert!(form.is_valid());
    assert!(form.messages().is_empty());

    assert_eq!(form.value("lang", false), Some(FieldValue::Selected("Go".to_string())));
    assert_eq!(form.value("days", true), Some(FieldValue::Indices(vec![0, 2])));
    assert_eq!(
        form.value("days", false),
        Some(FieldValue::SelectedMany(vec!["Mon".to_string(), "Wed".to_string()]))
    );
    assert_eq!(form.value("agree", false), Some(FieldValue::Checked(true)));
    assert_eq!(form.value("age", false), Some(FieldValue::Text("36".to_string())));

    let markup = form.to_markup();
    assert!(!markup.contains("Please fix the errors above."));
    assert!(markup.contains(r#"<option value="-1">-- choose --</option>"#));
    assert!(markup.contains(r#"<option value="1" selected>Go</option>"#));
    assert!(markup.contains(r#"id="days_labelfor_2" value="2" checked>"#));
    assert!(markup.contains(r#"id="days_labelfor_1" value="1">"#));
    assert!(markup.contains(r#"<input type="checkbox" name="agree[]" value="on" checked>&nbsp;"#));
    assert!(form.diagnostics().is_empty(), "{:?}", form.diagnostics());
}

#[test]
fn test_signup_validator_rejects_sunday() {
    let form = signup(RequestData::from_pairs(
        "/signup",
        [
            ("go", "1"),
            ("usn", "ada"),
            ("pwd", "secret"),
            ("lang", "0"),
            ("days[]", "1"),
            ("days[]", "3"),
        ],
    ));
    assert!(!form.is_valid());
    assert_eq!(form.messages(), ["Field \"days\" is not valid."]);
}

#[test]
fn test_duplicate_names_share_one_request_key() {
    let layout = r#"<ui:form>
        <ui:text name="a" required=""/>
        <ui:singleSelect name="a" bind="o" required=""/>
        <ui:submit name="go"/>
    </ui:form>"#;
    let load = |value: &str| {
        let mut form = Form::load(layout)
            .unwrap()
            .with_request(RequestData::new("/").with_param("go", "1").with_param("a", value));
        form.register_binding("o", vec!["x", "y"]);
        form
    };

    // The last element with the name answers value lookups
    let form = load("1");
    assert!(form.is_valid());
    assert_eq!(form.value("a", false), Some(FieldValue::Selected("y".to_string())));
    let markup = form.to_markup();
    assert!(markup.contains(r#"<input type="text" name="a" value="1" />"#), "{}", markup);
    assert!(markup.contains(r#"<option value="1" selected>y</option>"#), "{}", markup);

    // Each element is validated on its own
    let form = load("-1");
    assert!(!form.is_valid());
    assert_eq!(form.messages(), ["Select one option from \"a\"."]);
    assert_eq!(form.value("a", true), Some(FieldValue::Index(-1)));

    let form = load("");
    assert!(!form.is_valid());
    assert_eq!(
        form.messages(),
        ["Field \"a\" may not be empty.", "Field \"a\" is not valid."]
    );
    assert!(form.to_markup().contains(r#"<input type="text" name="a" />"#));
}

#[test]
fn test_iferror_visibility() {
    let layout = r#"<ui:form>
        <ui:iferror><b>oops</b></ui:iferror>
        <ui:text name="t" required=""/>
        <ui:submit name="go"/>
    </ui:form>"#;
    let render = |request: RequestData| Form::load(layout).unwrap().with_request(request).to_markup();

    assert!(!render(RequestData::new("/")).contains("oops"));
    assert!(render(RequestData::new("/").with_param("go", "1")).contains("oops"));
    assert!(!render(RequestData::new("/").with_param("go", "1").with_param("t", "x")).contains("oops"));
}

#[test]
fn test_predefined_values_before_submission() {
    let mut form = signup(RequestData::new("/signup"));
    form.set_predefined("usn", "guest");
    form.set_predefined("days", vec!["1"]);
    form.set_predefined("bio", "a < b");

    let markup = form.to_markup();
    assert!(markup.contains(r#"value="guest""#));
    assert!(markup.contains(r#"id="days_labelfor_1" value="1" checked>"#));
    assert!(markup.contains(r#"<textarea name="bio" rows="3">a &lt; b</textarea>"#));
    assert_eq!(form.value("usn", false), None);
}

#[test]
fn test_rendered_block_follows_binding() {
    let mut form = signup(RequestData::new("/signup"));
    assert!(!form.to_markup().contains(r#"name="role""#));

    form.register_binding("show_admin", DataBinding::Flag(true));
    assert!(
        form.to_markup()
            .contains(r#"<input type="hidden" name="role" value="admin" />"#)
    );
}

#[test]
fn test_request_from_json() {
    let request = RequestData::from_json(
        r#"{ "path": "/signup", "params": { "go": "1", "days": ["1"], "usn": "bob" } }"#,
    )
    .unwrap();
    assert_eq!(request.get("days"), Some(&Value::from(vec!["1"])));

    let form = signup(request);
    assert!(form.is_submitted());
    assert_eq!(form.value("days", false), Some(FieldValue::SelectedMany(vec!["Tue".to_string()])));
}
