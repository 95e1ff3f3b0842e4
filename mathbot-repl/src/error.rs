use ariadne::Source;
use mathbot_error::Error;

/// Report the error to stderr.
///
/// The `ariadne` crate's [`Report`](ariadne::Report) type does not have a `Display`
/// implementation, so we can only use its `eprint` method to print to stderr. If that fails, the
/// error is printed as a single line of plain text instead.
pub fn report_to_stderr(err: &Error, input: &str) {
    let report = err.build_report("input");
    if report.eprint(("input", Source::from(input))).is_err() {
        eprintln!("{}", err.quote(input));
    }
}
