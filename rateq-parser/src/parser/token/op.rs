//! The operators of the equation grammar.
//!
//! Unary operators bind tighter than `*` and `/` but looser than `**`, so `-x**2` is `-(x**2)`.
//! Only `**` is right-associative.

use crate::{
    parser::{
        error::{Error, kind},
        Associativity,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOpKind {
    Neg,
    Pos,
}

impl UnaryOpKind {
    const TOKENS: &'static [TokenKind] = &[TokenKind::Sub, TokenKind::Add];

    fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Sub => Some(Self::Neg),
            TokenKind::Add => Some(Self::Pos),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Pos => "+",
        }
    }
}

/// A sign in front of an operand.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryOp {
    pub kind: UnaryOpKind,
    pub span: Range<usize>,
}

impl UnaryOp {
    pub fn precedence(&self) -> Precedence {
        Precedence::Neg
    }
}

impl Parse for UnaryOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        match UnaryOpKind::from_token(token.kind) {
            Some(kind) => Ok(Self { kind, span: token.span }),
            None => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: UnaryOpKind::TOKENS,
                found: token.kind,
            })),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOpKind {
    Exp,
    Mul,
    Div,
    Add,
    Sub,
}

impl BinOpKind {
    const TOKENS: &'static [TokenKind] = &[
        TokenKind::Exp,
        TokenKind::Mul,
        TokenKind::Div,
        TokenKind::Add,
        TokenKind::Sub,
    ];

    fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Exp => Some(Self::Exp),
            TokenKind::Mul => Some(Self::Mul),
            TokenKind::Div => Some(Self::Div),
            TokenKind::Add => Some(Self::Add),
            TokenKind::Sub => Some(Self::Sub),
            _ => None,
        }
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Exp => Precedence::Exp,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }

    pub fn associativity(&self) -> Associativity {
        if *self == Self::Exp {
            Associativity::Right
        } else {
            Associativity::Left
        }
    }

    /// The canonical ASCII spelling. Exponentiation is always printed as `**`, whichever spelling
    /// the input used.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Exp => "**",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Add => "+",
            Self::Sub => "-",
        }
    }
}

/// An operator between two operands.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinOp {
    pub kind: BinOpKind,
    pub span: Range<usize>,
}

impl BinOp {
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl Parse for BinOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        match BinOpKind::from_token(token.kind) {
            Some(kind) => Ok(Self { kind, span: token.span }),
            None => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: BinOpKind::TOKENS,
                found: token.kind,
            })),
        }
    }
}
