use crate::parser::{
    ast::{
        binary::Binary,
        call::Call,
        literal::{Literal, LitSym},
        paren::Paren,
        unary::Unary,
    },
    error::Error,
    fmt::Latex,
    token::op::{UnaryOp, UnaryOpKind},
    Parse,
    Parser,
    Precedence,
};
use std::{collections::BTreeSet, fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents a general expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `sqrt(x)`.
    Call(Call),

    /// A unary operation, such as `-1`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// If this expression is an [`Expr::Paren`], returns the innermost expression in the
    /// parenthesized expression. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        let mut inner = self;
        while let Expr::Paren(paren) = inner {
            inner = &paren.expr;
        }
        inner
    }

    /// Returns the precedence of the outermost operation, or [`None`] if the expression is
    /// atomic (a literal, parenthesized expression, or call).
    pub fn precedence(&self) -> Option<Precedence> {
        match self {
            Expr::Literal(_) | Expr::Paren(_) | Expr::Call(_) => None,
            Expr::Unary(unary) => Some(unary.op.precedence()),
            Expr::Binary(binary) => Some(binary.op.precedence()),
        }
    }

    /// Returns the names of all free symbols in the expression. Function names are not included.
    pub fn symbols(&self) -> BTreeSet<&str> {
        let mut symbols = BTreeSet::new();
        self.visit(&mut |expr| {
            if let Expr::Literal(Literal::Symbol(sym)) = expr {
                symbols.insert(sym.name.as_str());
            }
        });
        symbols
    }

    /// Returns every function call in the expression, outermost first.
    pub fn calls(&self) -> Vec<&Call> {
        let mut calls = Vec::new();
        self.visit(&mut |expr| {
            if let Expr::Call(call) = expr {
                calls.push(call);
            }
        });
        calls
    }

    /// Calls `f` on this expression and every sub-expression, in pre-order.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Expr)) {
        f(self);
        match self {
            Expr::Literal(_) => (),
            Expr::Paren(paren) => paren.expr.visit(f),
            Expr::Call(call) => call.args.iter().for_each(|arg| arg.visit(f)),
            Expr::Unary(unary) => unary.operand.visit(f),
            Expr::Binary(binary) => {
                binary.lhs.visit(f);
                binary.rhs.visit(f);
            },
        }
    }

    /// Splits the expression into its additive terms, so that the sum of the returned terms is
    /// the original expression.
    ///
    /// Sums nested in parentheses or under a unary sign are flattened as well. Subtracted terms
    /// are wrapped in a unary negation, so `1 - (x + 2)` has the terms `1`, `-x` and `-2`.
    pub fn terms(&self) -> Vec<Expr> {
        fn collect(expr: &Expr, negate: bool, out: &mut Vec<Expr>) {
            use crate::parser::token::op::BinOpKind;
            match expr {
                Expr::Paren(paren) => collect(&paren.expr, negate, out),
                Expr::Unary(unary) => {
                    let negate = match unary.op.kind {
                        UnaryOpKind::Neg => !negate,
                        UnaryOpKind::Pos => negate,
                    };
                    collect(&unary.operand, negate, out);
                },
                Expr::Binary(binary) if binary.op.kind == BinOpKind::Add => {
                    collect(&binary.lhs, negate, out);
                    collect(&binary.rhs, negate, out);
                },
                Expr::Binary(binary) if binary.op.kind == BinOpKind::Sub => {
                    collect(&binary.lhs, negate, out);
                    collect(&binary.rhs, !negate, out);
                },
                expr if negate => out.push(Expr::Unary(Unary {
                    operand: Box::new(expr.clone()),
                    op: UnaryOp { kind: UnaryOpKind::Neg, span: expr.span().start..expr.span().start },
                    span: expr.span(),
                })),
                expr => out.push(expr.clone()),
            }
        }

        let mut terms = Vec::new();
        collect(self, false, &mut terms);
        terms
    }

    /// Replaces every occurrence of the symbol `name` with `value`. Non-atomic values are
    /// wrapped in parentheses so that the result prints unambiguously.
    pub fn substitute(&self, name: &str, value: &Expr) -> Expr {
        match self {
            Expr::Literal(Literal::Symbol(sym)) if sym.name == name => {
                if value.precedence().is_none() {
                    value.clone()
                } else {
                    Expr::Paren(Paren::around(value.clone(), sym.span.clone()))
                }
            },
            Expr::Literal(_) => self.clone(),
            Expr::Paren(paren) => Expr::Paren(Paren::around(paren.expr.substitute(name, value), paren.span())),
            Expr::Call(call) => Expr::Call(Call {
                name: call.name.clone(),
                args: call.args.iter().map(|arg| arg.substitute(name, value)).collect(),
                span: call.span.clone(),
                paren_span: call.paren_span.clone(),
            }),
            Expr::Unary(unary) => Expr::Unary(Unary {
                operand: Box::new(unary.operand.substitute(name, value)),
                op: unary.op.clone(),
                span: unary.span.clone(),
            }),
            Expr::Binary(binary) => Expr::Binary(Binary {
                lhs: Box::new(binary.lhs.substitute(name, value)),
                op: binary.op.clone(),
                rhs: Box::new(binary.rhs.substitute(name, value)),
                span: binary.span.clone(),
            }),
        }
    }

    /// Formats the expression in canonical form: explicit operators, `**` for powers, and no
    /// whitespace.
    pub fn canonical(&self) -> String {
        self.to_string().chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// Returns true if the expression is the symbol with the given name.
    pub fn is_symbol(&self, name: &str) -> bool {
        matches!(self.innermost(), Expr::Literal(Literal::Symbol(LitSym { name: n, .. })) if n == name)
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = Unary::parse_or_lower(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => write!(f, "{}", literal),
            Expr::Paren(paren) => write!(f, "{}", paren),
            Expr::Call(call) => write!(f, "{}", call),
            Expr::Unary(unary) => write!(f, "{}", unary),
            Expr::Binary(binary) => write!(f, "{}", binary),
        }
    }
}

impl Latex for Expr {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt_latex(f),
            Expr::Paren(paren) => paren.fmt_latex(f),
            Expr::Call(call) => call.fmt_latex(f),
            Expr::Unary(unary) => unary.fmt_latex(f),
            Expr::Binary(binary) => binary.fmt_latex(f),
        }
    }
}

/// Represents a primary expression in the language. Primary expressions are the simplest
/// expressions, and are the building blocks of more complex expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `sqrt(x)`.
    Call(Call),
}

impl Parse for Primary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input.try_parse::<Call>().map(Primary::Call)
            .or_else(|_| input.try_parse::<Literal>().map(Primary::Literal))
            .or_else(|literal_err| {
                // an unclosed parenthesis is the more useful error to report
                match input.try_parse::<Paren>() {
                    Ok(paren) => Ok(Primary::Paren(paren)),
                    Err(paren_err) if is_open_paren(input) => Err(paren_err),
                    Err(_) => Err(literal_err),
                }
            })
    }
}

/// Returns true if the next non-whitespace token is an opening parenthesis.
fn is_open_paren(input: &Parser) -> bool {
    let mut input_ahead = input.clone();
    input_ahead.next_token()
        .map_or(false, |token| token.kind == crate::tokenizer::TokenKind::OpenParen)
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        match primary {
            Primary::Literal(literal) => Self::Literal(literal),
            Primary::Paren(paren) => Self::Paren(paren),
            Primary::Call(call) => Self::Call(call),
        }
    }
}
