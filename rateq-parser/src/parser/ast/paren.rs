use crate::parser::{
    ast::expr::Expr,
    error::{kind, Error},
    fmt::Latex,
    token::{CloseParen, OpenParen},
    Parse,
    Parser,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A grouping, such as the denominator in `1/(x - 2)`.
///
/// Groupings are kept in the tree rather than folded away, so a canonical equation prints with
/// the same grouping the input had.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    pub expr: Box<Expr>,

    /// Spans both parentheses.
    pub span: Range<usize>,
}

impl Paren {
    /// Groups `expr`, attributing the grouping to `span`. Used when a value is substituted for a
    /// symbol, so the grouping points at the symbol it replaced.
    pub fn around(expr: Expr, span: Range<usize>) -> Self {
        Self { expr: Box::new(expr), span }
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Looks through any number of nested groupings.
    pub fn innermost(&self) -> &Expr {
        self.expr.innermost()
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open = input.try_parse::<OpenParen>()?;
        let expr = input.try_parse::<Expr>()?;
        match input.try_parse::<CloseParen>() {
            Ok(close) => Ok(Self::around(expr, open.span.start..close.span.end)),
            Err(_) => Err(Error::new(vec![open.span], kind::UnclosedParenthesis)),
        }
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.expr)
    }
}

impl Latex for Paren {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("\\left(")?;
        self.expr.fmt_latex(f)?;
        f.write_str("\\right)")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn nested_groupings() {
        let expr = Parser::new("((x - 2))").try_parse_full::<Expr>().unwrap();
        assert_eq!(expr.to_string(), "((x - 2))");
        assert_eq!(expr.innermost().to_string(), "x - 2");
    }

    #[test]
    fn unclosed() {
        assert!(Parser::new("(x - 2").try_parse_full::<Expr>().is_err());
    }
}
