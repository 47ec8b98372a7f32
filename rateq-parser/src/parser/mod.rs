pub mod ast;
pub mod error;
pub mod fmt;
pub mod token;

use error::{kind, Error, ErrorKind};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A high-level parser for equations. This is the type to use to parse an arbitrary piece of
/// text into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Moves the cursor of this parser to the cursor of another parser over the same tokens.
    pub fn set_cursor(&mut self, other: &Parser) {
        self.cursor = other.cursor;
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses multiple values (at least one) from the given stream of tokens, each
    /// delimited by a certain token.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// values are returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_delimited<T: Parse>(&mut self, delimiter: TokenKind) -> Result<Vec<T>, Error> {
        let start = self.cursor;
        let mut values = Vec::new();

        loop {
            match self.try_parse::<T>() {
                Ok(value) => values.push(value),
                Err(err) => {
                    if values.is_empty() {
                        self.cursor = start;
                        return Err(err);
                    } else {
                        return Ok(values);
                    }
                },
            }

            let mut input_ahead = self.clone();
            match input_ahead.next_token() {
                Ok(token) if token.kind == delimiter => self.set_cursor(&input_ahead),
                _ => return Ok(values),
            }
        }
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses a value from the given stream of tokens, with a validation predicate.
    /// The value must parse successfully, **and** the predicate must return [`Ok`] for this
    /// function to return successfully.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        let start = self.cursor;

        // closure workaround allows us to use `?` in the closure
        let compute = |input: &mut Parser<'source>| {
            let value = T::parse(input)?;
            predicate(&value, input)?;
            Ok(value)
        };

        match compute(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser (trailing whitespace is allowed); if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        while self.current_token().map_or(false, Token::is_whitespace) {
            self.cursor += 1;
        }

        if self.cursor == self.tokens.len() {
            Ok(value)
        } else {
            Err(self.error(kind::ExpectedEof))
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of unary negation (`-`) and unary plus (`+`).
    Neg,

    /// Precedence of exponentiation (`^` or `**`).
    Exp,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{
        binary::Binary,
        call::Call,
        equation::Equation,
        expr::Expr,
        literal::{Literal, LitNum, LitSym},
        paren::Paren,
        unary::Unary,
    };
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn num(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value: value.to_string(), span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    #[test]
    fn literal_int() {
        let mut parser = Parser::new("16");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, num("16", 0..2));
    }

    #[test]
    fn literal_float() {
        let mut parser = Parser::new("3.14");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, num("3.14", 0..4));
    }

    #[test]
    fn binary_left_associativity() {
        let mut parser = Parser::new("3 - 2 - 1");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(num("3", 0..1)),
                op: BinOp { kind: BinOpKind::Sub, span: 2..3 },
                rhs: Box::new(num("2", 4..5)),
                span: 0..5,
            })),
            op: BinOp { kind: BinOpKind::Sub, span: 6..7 },
            rhs: Box::new(num("1", 8..9)),
            span: 0..9,
        }));
    }

    #[test]
    fn binary_right_associativity() {
        let mut parser = Parser::new("2^3**4");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(num("2", 0..1)),
            op: BinOp { kind: BinOpKind::Exp, span: 1..2 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(num("3", 2..3)),
                op: BinOp { kind: BinOpKind::Exp, span: 3..5 },
                rhs: Box::new(num("4", 5..6)),
                span: 2..6,
            })),
            span: 0..6,
        }));
    }

    #[test]
    fn binary_precedence() {
        let mut parser = Parser::new("1 + 2*x");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(num("1", 0..1)),
            op: BinOp { kind: BinOpKind::Add, span: 2..3 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(num("2", 4..5)),
                op: BinOp { kind: BinOpKind::Mul, span: 5..6 },
                rhs: Box::new(sym("x", 6..7)),
                span: 4..7,
            })),
            span: 0..7,
        }));
    }

    #[test]
    fn unary_binds_looser_than_power() {
        let mut parser = Parser::new("-x**2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Binary(Binary {
                lhs: Box::new(sym("x", 1..2)),
                op: BinOp { kind: BinOpKind::Exp, span: 2..4 },
                rhs: Box::new(num("2", 4..5)),
                span: 1..5,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..5,
        }));
    }

    #[test]
    fn negative_exponent() {
        let mut parser = Parser::new("x^-1");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(sym("x", 0..1)),
            op: BinOp { kind: BinOpKind::Exp, span: 1..2 },
            rhs: Box::new(Expr::Unary(Unary {
                operand: Box::new(num("1", 3..4)),
                op: UnaryOp { kind: UnaryOpKind::Neg, span: 2..3 },
                span: 2..4,
            })),
            span: 0..4,
        }));
    }

    #[test]
    fn paren_and_call() {
        let mut parser = Parser::new("sqrt((x))");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Call(Call {
            name: LitSym { name: "sqrt".to_string(), span: 0..4 },
            args: vec![Expr::Paren(Paren {
                expr: Box::new(sym("x", 6..7)),
                span: 5..8,
            })],
            span: 0..9,
            paren_span: 4..9,
        }));
    }

    #[test]
    fn equation() {
        let mut parser = Parser::new("1/x = 2");
        let equation = parser.try_parse_full::<Equation>().unwrap();

        assert_eq!(equation, Equation {
            lhs: Expr::Binary(Binary {
                lhs: Box::new(num("1", 0..1)),
                op: BinOp { kind: BinOpKind::Div, span: 1..2 },
                rhs: Box::new(sym("x", 2..3)),
                span: 0..3,
            }),
            rhs: num("2", 6..7),
            span: 0..7,
        });
    }

    #[test]
    fn implicit_multiplication_is_rejected() {
        let mut parser = Parser::new("2x");
        assert!(parser.try_parse_full::<Expr>().is_err());
    }

    #[test]
    fn unbalanced_paren_is_rejected() {
        let mut parser = Parser::new("(x + 1");
        assert!(parser.try_parse_full::<Expr>().is_err());
    }

    #[test]
    fn trailing_whitespace() {
        let mut parser = Parser::new("x + 1   ");
        assert!(parser.try_parse_full::<Expr>().is_ok());
    }
}
