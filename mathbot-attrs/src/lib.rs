mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the `ErrorKind` trait from `mathbot-error` for the given struct.
///
/// The information of the error is customized using the `error` attribute:
/// ```ignore
/// use mathbot_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     class = SyntaxError,
///     message = "unexpected end of input",
///     labels = ["add something here"],
/// )]
/// pub struct UnexpectedEof;
/// ```
///
/// The following tags are available:
///
/// | Tag       | Description                                                                      |
/// | --------- | -------------------------------------------------------------------------------- |
/// | `class`   | The `ErrorClass` variant the error belongs to. Required.                         |
/// | `message` | The message displayed at the top of the error. Required.                         |
/// | `labels`  | An array of label texts, one per span of the error, in order. Defaults to `here`. |
/// | `help`    | Optional help text describing what the user can do to fix the error.             |
///
/// `message`, `labels` and `help` accept expressions. For structs with named fields, the
/// expressions are evaluated with the fields of the struct in scope (by reference). Tuple structs
/// are not supported.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    quote! { #target }.into()
}
