use crate::{
    parser::{error::{kind, Error}, fmt::Latex, token::Name, Parse, Parser},
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A number literal, such as `16` or `0.25`. The digits are kept exactly as written so that
/// decimals can be converted to exact fractions later.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitNum {
    /// The digits of the number, as written in the source.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitNum {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        if token.kind.is_number() {
            Ok(Self {
                value: token.lexeme.to_owned(),
                span: token.span,
            })
        } else {
            Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::Int, TokenKind::Float],
                found: token.kind,
            }))
        }
    }
}

impl std::fmt::Display for LitNum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Latex for LitNum {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A symbol / identifier literal, such as `x`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<Name>()?;
        Ok(Self {
            name: name.lexeme,
            span: name.span,
        })
    }
}

impl std::fmt::Display for LitSym {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Latex for LitSym {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name.as_str() {
            "I" => write!(f, "i"),
            "pi" => write!(f, "\\pi"),
            name if name.chars().count() == 1 => write!(f, "{}", name),
            name => write!(f, "\\mathrm{{{}}}", name),
        }
    }
}

/// Represents a literal value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// A number literal.
    Number(LitNum),

    /// A symbol / identifier literal.
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span.clone(),
            Literal::Symbol(sym) => sym.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input.try_parse::<LitNum>().map(Literal::Number)
            .or_else(|_| input.try_parse::<LitSym>().map(Literal::Symbol))
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Number(num) => write!(f, "{}", num),
            Literal::Symbol(sym) => write!(f, "{}", sym),
        }
    }
}

impl Latex for Literal {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Number(num) => num.fmt_latex(f),
            Literal::Symbol(sym) => sym.fmt_latex(f),
        }
    }
}
