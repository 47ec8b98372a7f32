use crate::parser::{
    ast::{binary::Binary, expr::{Expr, Primary}},
    error::Error,
    fmt::Latex,
    token::op::UnaryOp,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-x`. Unary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or a primary expression if there is no unary operator.
    ///
    /// The operand of a unary operator extends over any exponentiation that follows it, so
    /// `-x**2` is parsed as `-(x**2)`.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        if let Ok(op) = input.try_parse::<UnaryOp>() {
            let operand = Self::parse_or_lower(input)?;
            let operand = Binary::parse_expr(input, operand, Precedence::Exp)?;
            let span = op.span.start..operand.span().end;
            Ok(Expr::Unary(Self {
                operand: Box::new(operand),
                op,
                span,
            }))
        } else {
            Ok(input.try_parse::<Primary>()?.into())
        }
    }
}

impl std::fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign = self.op.kind.symbol();
        match self.operand.precedence() {
            Some(precedence) if precedence <= Precedence::Term => write!(f, "{}({})", sign, self.operand),
            _ => write!(f, "{}{}", sign, self.operand),
        }
    }
}

impl Latex for Unary {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.op.kind.symbol())?;
        match self.operand.precedence() {
            Some(precedence) if precedence <= Precedence::Term => {
                write!(f, "\\left(")?;
                self.operand.fmt_latex(f)?;
                write!(f, "\\right)")
            },
            _ => self.operand.fmt_latex(f),
        }
    }
}
