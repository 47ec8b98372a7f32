use crate::{
    parser::{
        ast::{expr::Expr, literal::LitSym},
        error::Error,
        fmt::Latex,
        token::{CloseParen, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function applied to arguments, such as `sqrt(x)` or `sin(2*x)`.
///
/// Only `sqrt` of a constant can be evaluated. Any call that involves the variable makes the
/// equation non-rational, so calls are parsed only to report them precisely.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    pub name: LitSym,
    pub args: Vec<Expr>,

    /// Spans from the name to the closing parenthesis.
    pub span: Range<usize>,

    /// Spans the argument list, parentheses included.
    pub paren_span: Range<usize>,
}

impl Call {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// The single argument of a one-argument call.
    pub fn sole_arg(&self) -> Option<&Expr> {
        match self.args.as_slice() {
            [arg] => Some(arg),
            _ => None,
        }
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open = input.try_parse::<OpenParen>()?;
        let args = input.try_parse_delimited::<Expr>(TokenKind::Comma)?;
        let close = input.try_parse::<CloseParen>()?;
        Ok(Self {
            span: name.span.start..close.span.end,
            paren_span: open.span.start..close.span.end,
            name,
            args,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let args = self.args.iter().map(Expr::to_string).collect::<Vec<_>>();
        write!(f, "{}({})", self.name, args.join(", "))
    }
}

impl Latex for Call {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.name.name.as_str(), self.sole_arg()) {
            ("sqrt", Some(arg)) => {
                write!(f, "\\sqrt{{")?;
                arg.innermost().fmt_latex(f)?;
                write!(f, "}}")
            },
            (name, _) => {
                write!(f, "\\operatorname{{{}}}\\left(", name)?;
                for (i, arg) in self.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    arg.fmt_latex(f)?;
                }
                write!(f, "\\right)")
            },
        }
    }
}
