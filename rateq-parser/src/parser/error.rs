//! Error kinds produced while parsing equations.

pub use rateq_error::{Error, ErrorKind};

pub mod kind {
    use ariadne::Fmt;
    use rateq_attrs::ErrorKind;
    use rateq_error::EXPR;
    use crate::tokenizer::TokenKind;

    /// The end of the source code was reached unexpectedly.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "unexpected end of input",
        labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
    )]
    pub struct UnexpectedEof;

    /// The end of the source code was expected, but something else was found.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "expected end of input",
        labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
        help = "multiplication must be written out explicitly, as in `2*x`",
    )]
    pub struct ExpectedEof;

    /// An unexpected token was encountered.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "unexpected token",
        labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
        help = format!("found {:?}", found),
    )]
    pub struct UnexpectedToken {
        /// The token(s) that were expected.
        pub expected: &'static [TokenKind],

        /// The token that was found.
        pub found: TokenKind,
    }

    /// A parenthesis was opened but never closed.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "unclosed parenthesis",
        labels = ["this parenthesis is never closed"],
        help = format!("add a closing {} to match it", "`)`".fg(EXPR)),
    )]
    pub struct UnclosedParenthesis;

    /// The equation has no `=` sign.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "missing `=` in equation",
        labels = ["an equation needs a left and a right side"],
    )]
    pub struct MissingEquals;

    /// The equation has more than one `=` sign.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "an equation must contain exactly one `=`",
        labels = ["this is an extra `=`"],
    )]
    pub struct ExtraEquals;
}
