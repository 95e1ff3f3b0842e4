use ariadne::Source;
use mathbot_attrs::ErrorKind;
use mathbot_error::{Error, ErrorClass, ErrorKind as _};
use pretty_assertions::assert_eq;

#[derive(Debug, ErrorKind)]
#[error(
    class = UnknownIdentifier,
    message = format!("unknown variable `{}`", name),
    labels = ["this variable"],
    help = "bind it to a value first",
)]
struct UnknownVariable {
    name: String,
}

#[derive(Debug, ErrorKind)]
#[error(class = SyntaxError, message = "unclosed parenthesis", labels = ["add `)` here", "to close this"])]
struct Unclosed;

#[derive(Debug, ErrorKind)]
#[error(class = Overflow, message = "result is too large")]
struct TooLarge;

/// Renders the report of the error into a string.
fn render(err: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    err.build_report("input")
        .write(("input", Source::from(source)), &mut buf)
        .unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn derived_class_and_message() {
    let kind = UnknownVariable { name: "y".to_string() };
    assert_eq!(kind.class(), ErrorClass::UnknownIdentifier);
    assert_eq!(kind.message(), "unknown variable `y`");
}

#[test]
fn derived_report_contains_message() {
    let err = Error::new(vec![0..1], UnknownVariable { name: "y".to_string() });
    let report = render(&err, "y+1");
    assert!(report.contains("unknown variable `y`"));
    assert!(report.contains("bind it to a value first"));
}

#[test]
fn extra_labels_are_ignored_without_spans() {
    // only one span, but two labels
    let err = Error::new(vec![5..5], Unclosed);
    let report = render(&err, "(1 + 2");
    assert!(report.contains("unclosed parenthesis"));
}

#[test]
fn default_label() {
    let err = Error::new(vec![0..3], TooLarge);
    assert_eq!(err.class(), ErrorClass::Overflow);
    assert_eq!(err.quote("9^9^9"), "overflow: result is too large at `9^9` (offset 0)");
}
