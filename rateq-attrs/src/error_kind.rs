use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    Attribute,
    Data,
    DeriveInput,
    Expr,
    Fields,
    Generics,
    Ident,
    Result,
    Token,
};

/// The arguments that can be passed to the `error` attribute.
#[derive(Debug, Default)]
pub struct ErrorArgs {
    pub message: Option<Expr>,
    pub labels: Option<Expr>,
    pub help: Option<Expr>,
}

impl ErrorArgs {
    /// Parse the next argument in the input stream and applies it to itself.
    fn parse_arg(&mut self, input: ParseStream) -> Result<()> {
        let ident: Ident = input.parse()?;
        input.parse::<Token![=]>()?;

        let ident_str = ident.to_string();
        match ident_str.as_str() {
            "message" => self.message = Some(input.parse()?),
            "labels" => self.labels = Some(input.parse()?),
            "help" => self.help = Some(input.parse()?),
            _ => return Err(syn::Error::new_spanned(ident, format!("unknown tag `{}`", ident_str))),
        }

        Ok(())
    }

    /// Finds the `error` attribute in the given list and parses its arguments.
    fn from_attributes(attributes: &[Attribute]) -> Result<Option<Self>> {
        for attr in attributes {
            if attr.path().is_ident("error") {
                return attr.parse_args::<ErrorArgs>().map(Some);
            }
        }
        Ok(None)
    }
}

impl Parse for ErrorArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = ErrorArgs::default();

        while !input.is_empty() {
            args.parse_arg(input)?;
            if input.parse::<Token![,]>().is_err() {
                break;
            }
        }

        Ok(args)
    }
}

/// Creates the pattern that destructures the given path into its named fields. Returns a compile
/// error if the fields are not named.
fn destructure_pattern(path: TokenStream2, ident: &Ident, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(fields) => {
            let fields = fields.named.iter().map(|field| {
                let field_name = field.ident.as_ref();
                quote! { #field_name }
            });
            quote! { #path { #(#fields),* } }
        },
        Fields::Unnamed(_) => quote_spanned! { ident.span() => compile_error!("`ErrorKind` cannot be derived for tuple fields") },
        Fields::Unit => path,
    }
}

/// One way to construct the error: the struct itself, or one variant of an enum.
#[derive(Debug)]
struct Shape {
    /// The pattern that matches `self` and brings the fields into scope.
    pattern: TokenStream2,

    /// The arguments of the `error` attribute for this shape.
    args: ErrorArgs,
}

/// The target struct or enum to derive [`ErrorKind`] for.
#[derive(Debug)]
pub struct ErrorKindTarget {
    pub name: Ident,
    pub generics: Generics,
    shapes: Vec<Shape>,
}

impl Parse for ErrorKindTarget {
    fn parse(input: ParseStream) -> Result<Self> {
        let input = input.parse::<DeriveInput>()?;
        let name = input.ident.clone();

        let shapes = match &input.data {
            Data::Struct(data) => {
                let args = ErrorArgs::from_attributes(&input.attrs)?.unwrap_or_default();
                vec![Shape {
                    pattern: destructure_pattern(quote! { #name }, &name, &data.fields),
                    args,
                }]
            },
            Data::Enum(data) => data.variants
                .iter()
                .map(|variant| {
                    let variant_name = &variant.ident;
                    let args = ErrorArgs::from_attributes(&variant.attrs)?
                        .ok_or_else(|| syn::Error::new_spanned(variant_name, "missing `error` attribute on variant"))?;
                    Ok(Shape {
                        pattern: destructure_pattern(quote! { #name::#variant_name }, variant_name, &variant.fields),
                        args,
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            Data::Union(_) => return Err(syn::Error::new_spanned(name, "`ErrorKind` cannot be derived for unions")),
        };

        Ok(ErrorKindTarget {
            name,
            generics: input.generics,
            shapes,
        })
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let message_arms = self.shapes.iter().map(|shape| {
            let pattern = &shape.pattern;
            let message = shape.args.message.as_ref()
                .map(|message| quote! { #message })
                .unwrap_or_else(|| quote! { "an error occurred" });
            quote! {
                #[allow(unused_variables)]
                #pattern => ::std::string::ToString::to_string(&#message),
            }
        });

        let report_arms = self.shapes.iter().map(|shape| {
            let pattern = &shape.pattern;
            let labels = shape.args.labels.as_ref()
                .map(|labels| quote! {
                    #labels
                        .into_iter()
                        .map(|label| ::std::string::ToString::to_string(&label))
                        .collect::<Vec<String>>()
                })
                .unwrap_or_else(|| quote! { Vec::<String>::new() });
            let help = shape.args.help.as_ref()
                .map(|help| quote! { Some(::std::string::ToString::to_string(&#help)) })
                .unwrap_or_else(|| quote! { None::<String> });
            quote! {
                #[allow(unused_variables)]
                #pattern => (#labels, #help),
            }
        });

        tokens.extend(quote! {
            fn message(&self) -> String {
                match self {
                    #(#message_arms)*
                }
            }

            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                let (labels, help) = match self {
                    #(#report_arms)*
                };
                let offset = spans.first().map_or(0, |span| span.start);

                let mut builder = ariadne::Report::build(ariadne::ReportKind::Error, src_id, offset)
                    .with_message(self.message())
                    .with_labels(
                        labels
                            .into_iter()
                            .enumerate()
                            .map(|(i, label_str)| {
                                let span = spans.get(i).cloned().unwrap_or(offset..offset);
                                let mut label = ariadne::Label::new((src_id, span))
                                    .with_color(rateq_error::EXPR);

                                if !label_str.is_empty() {
                                    label = label.with_message(label_str);
                                }

                                label
                            })
                            .collect::<Vec<_>>()
                    );

                if let Some(help) = help {
                    builder.set_help(help);
                }
                builder.finish()
            }
        });
    }
}
