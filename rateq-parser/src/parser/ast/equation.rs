use crate::parser::{
    ast::expr::Expr,
    error::Error,
    fmt::Latex,
    token::Eq,
    Parse,
    Parser,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An equation with exactly one `=`, such as `1/(x-2) = 3/(x+1)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equation {
    /// The left-hand side of the equation.
    pub lhs: Expr,

    /// The right-hand side of the equation.
    pub rhs: Expr,

    /// The region of the source code that this equation was parsed from.
    pub span: Range<usize>,
}

impl Equation {
    /// Formats the equation in canonical form, such as `x+1=5`.
    pub fn canonical(&self) -> String {
        format!("{}={}", self.lhs.canonical(), self.rhs.canonical())
    }
}

impl Parse for Equation {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = input.try_parse::<Expr>()?;
        input.try_parse::<Eq>()?;
        let rhs = input.try_parse::<Expr>()?;
        let span = lhs.span().start..rhs.span().end;
        Ok(Self { lhs, rhs, span })
    }
}

impl std::fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

impl Latex for Equation {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.lhs.fmt_latex(f)?;
        write!(f, " = ")?;
        self.rhs.fmt_latex(f)
    }
}
