mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct or enum.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```
/// use rateq_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "unexpected end of file", labels = ["add something here"])]
/// pub struct Foo;
///
/// #[derive(Debug, ErrorKind)]
/// pub enum Bar {
///     #[error(message = "empty input")]
///     Empty,
///
///     #[error(message = format!("found {} `=` signs", count), labels = ["here"])]
///     TooMany { count: usize },
/// }
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | An array of label texts, one for each span the error points at.              |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression that should evaluate to something that implements
/// [`ToString`]. For structs and enum variants with named fields, the expression is evaluated
/// with the fields in scope, so they can be used in the expression (tuple fields are not
/// supported). On enums, the `error` attribute is placed on each variant.
///
/// Alongside [`ErrorKind::build_report`], the derive generates [`ErrorKind::message`], which
/// returns the plain `message` text without any report formatting.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    let (impl_generics, ty_generics, where_clause) = target.generics.split_for_impl();
    quote! {
        impl #impl_generics rateq_error::ErrorKind for #name #ty_generics #where_clause {
            #target
        }
    }.into()
}
