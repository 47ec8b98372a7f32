use crate::parser::{
    ast::{expr::Expr, unary::Unary},
    error::{kind, Error},
    fmt::{fmt_pow, Latex},
    token::op::{BinOp, BinOpKind},
    Associativity,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    fn complete_rhs(input: &mut Parser, lhs: Expr, op: BinOp, mut rhs: Expr) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            // before creating the `lhs op rhs` node, we should check the precedence of the
            // following operator, if any
            // this is because we can't parse an expression like `3 + 4 * 5`, as (3 + 4) * 5

            // clone the input stream to emulate peeking
            let mut input_ahead = input.clone();
            if let Ok(next_op) = input_ahead.try_parse::<BinOp>() {
                if next_op.precedence() > precedence
                    || (next_op.precedence() == precedence && next_op.associativity() == Associativity::Right)
                {
                    // this operator has a higher precedence or it is right associative, so we
                    // should parse its expression starting with `rhs` first
                    rhs = Self::parse_expr(input, rhs, next_op.precedence())?;
                } else {
                    // this operator has lower precedence, or equal precedence and
                    // left-associativity; this is in scenarios like:
                    // `1 * 2 + 3` or `1 * 2 * 3`
                    //
                    // so just break out of the loop and let `lhs` become `1 * 2`
                    // we will parse this operator on the next iteration of the outside loop
                    break;
                }
            } else {
                break;
            }
        }

        // create the binary node representing `lhs op rhs`
        let (start_span, end_span) = (lhs.span().start, rhs.span().end);
        Ok(Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span: start_span..end_span,
        }))
    }

    /// Parses a chain of binary operations starting with `lhs`, consuming only operators with a
    /// precedence of at least `precedence`.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        loop {
            let mut input_ahead = input.clone();
            let Ok(op) = input_ahead.try_parse_then::<BinOp, _>(|bin_op, input| {
                if bin_op.precedence() >= precedence {
                    Ok(())
                } else {
                    Err(input.error(kind::UnexpectedEof))
                }
            }) else {
                break;
            };

            input.set_cursor(&input_ahead);
            let rhs = Unary::parse_or_lower(input)?;
            lhs = Self::complete_rhs(input, lhs, op, rhs)?;
        }

        Ok(lhs)
    }

    /// Returns true if `child` must be wrapped in parentheses to appear on the given side of
    /// this operator.
    fn needs_parens(&self, child: &Expr, right: bool) -> bool {
        let Some(child_precedence) = child.precedence() else {
            return false;
        };
        let precedence = self.op.precedence();
        if child_precedence != precedence {
            return child_precedence < precedence;
        }
        match self.op.associativity() {
            Associativity::Left => right,
            Associativity::Right => !right,
        }
    }
}

impl std::fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let side = |f: &mut fmt::Formatter, expr: &Expr, right: bool| {
            if self.needs_parens(expr, right) {
                write!(f, "({})", expr)
            } else {
                write!(f, "{}", expr)
            }
        };

        side(f, &self.lhs, false)?;
        match self.op.kind {
            BinOpKind::Add | BinOpKind::Sub => write!(f, " {} ", self.op.kind.symbol())?,
            kind => write!(f, "{}", kind.symbol())?,
        }
        side(f, &self.rhs, true)
    }
}

impl Latex for Binary {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let side = |f: &mut fmt::Formatter, expr: &Expr, right: bool| {
            if self.needs_parens(expr, right) {
                write!(f, "\\left(")?;
                expr.fmt_latex(f)?;
                write!(f, "\\right)")
            } else {
                expr.fmt_latex(f)
            }
        };

        match self.op.kind {
            BinOpKind::Exp => fmt_pow(f, Some(&self.lhs), Some(&self.rhs)),
            BinOpKind::Div => {
                write!(f, "\\frac{{")?;
                self.lhs.innermost().fmt_latex(f)?;
                write!(f, "}}{{")?;
                self.rhs.innermost().fmt_latex(f)?;
                write!(f, "}}")
            },
            BinOpKind::Mul => {
                side(f, &self.lhs, false)?;
                let rhs_starts_with_digit = self.rhs.to_string()
                    .trim_start_matches('(')
                    .starts_with(|c: char| c.is_ascii_digit());
                if rhs_starts_with_digit {
                    write!(f, " \\cdot ")?;
                } else {
                    write!(f, " ")?;
                }
                side(f, &self.rhs, true)
            },
            BinOpKind::Add | BinOpKind::Sub => {
                side(f, &self.lhs, false)?;
                write!(f, " {} ", self.op.kind.symbol())?;
                side(f, &self.rhs, true)
            },
        }
    }
}
