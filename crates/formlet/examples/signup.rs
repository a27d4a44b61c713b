//! Render the signup layout for a first visit and for a submission.
//!
//! Run with `RUST_LOG=formlet=debug` to see indexing and validation logs.

use formlet::{Form, MapTranslator, RequestData, SourceContext, ValidatorInput, ValidatorRegistry};
use tracing_subscriber::EnvFilter;

const LAYOUT: &str = include_str!("../test-fixtures/signup.xml");

fn build(request: RequestData) -> anyhow::Result<Form> {
    let translator = MapTranslator::new()
        .with("user.name", "Name")
        .with("user.age", "Age")
        .with("choose", "-- choose --")
        .with("button.send", "Send");

    let validators = ValidatorRegistry::new().with("weekday", |input: &ValidatorInput<'_>| {
        matches!(input, ValidatorInput::Multi { values, .. } if !values.contains(&"Sun"))
    });

    let mut form = match Form::load(LAYOUT) {
        Ok(form) => form,
        Err(err) => {
            let ctx = SourceContext::new("signup.xml", LAYOUT);
            eprint!("{}", err.to_diagnostic().to_text(Some(&ctx)));
            return Err(err.into());
        }
    }
    .with_translator(translator)
    .with_validators(validators)
    .with_request(request);

    form.register_binding("langs", vec!["Rust", "Go", "Zig"]);
    form.register_binding("days", vec!["Mon", "Tue", "Wed", "Sun"]);
    form.register_binding("show_admin", false);
    Ok(form)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut first_visit = build(RequestData::new("/signup"))?;
    first_visit.set_predefined("usn", "guest");
    println!("{}", first_visit.to_markup());

    let submitted = build(RequestData::from_pairs(
        "/signup",
        [("go", "1"), ("usn", "al"), ("lang", "-1"), ("days[]", "1")],
    ))?;
    println!("{}", submitted.to_markup());
    println!("valid: {}", submitted.is_valid());
    for message in submitted.messages() {
        println!("- {}", message);
    }

    for diagnostic in submitted.diagnostics() {
        eprint!("{}", diagnostic.to_text(None));
    }
    Ok(())
}
