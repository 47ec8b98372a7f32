pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Every character of the input ends up in exactly one token, so joining the lexemes gives back
/// the input. Characters the lexer cannot classify become [`TokenKind::Symbol`] tokens.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: result.unwrap_or(TokenKind::Symbol),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_equation() {
        compare_tokens(
            "2*x + 1 = 5",
            [
                (TokenKind::Int, "2"),
                (TokenKind::Mul, "*"),
                (TokenKind::Name, "x"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Eq, "="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "5"),
            ],
        );
    }

    #[test]
    fn both_power_spellings() {
        compare_tokens(
            "x**2^3",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Exp, "**"),
                (TokenKind::Int, "2"),
                (TokenKind::Exp, "^"),
                (TokenKind::Int, "3"),
            ],
        );
    }

    #[test]
    fn decimals_and_symbols() {
        compare_tokens(
            "0.5x≠.25",
            [
                (TokenKind::Float, "0.5"),
                (TokenKind::Name, "x"),
                (TokenKind::Symbol, "≠"),
                (TokenKind::Float, ".25"),
            ],
        );
    }

    #[test]
    fn lossless() {
        let input = "4[x/4 + 3/2 = 5/4]4 ✓";
        let joined = tokenize_complete(input)
            .iter()
            .map(|token| token.lexeme)
            .collect::<String>();
        assert_eq!(joined, input);
    }
}
