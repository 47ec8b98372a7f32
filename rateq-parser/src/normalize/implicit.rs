//! Inserts the multiplication signs that handwriting leaves implicit.

use crate::tokenizer::{tokenize_complete, Token, TokenKind};

/// Returns true if a `*` belongs between `prev` and `next`. `spaced` is true if whitespace
/// separates the two tokens.
///
/// A number multiplies a directly following name (`2x`) or a parenthesis (`2 (x+1)`), a closing
/// parenthesis multiplies whatever operand follows it, and a single-letter name multiplies a
/// following parenthesis (`x(x+1)`). Longer names are function calls, so `sqrt(x)` is kept.
fn needs_star(prev: &Token, next: &Token, spaced: bool) -> bool {
    let next_is_operand = matches!(next.kind, TokenKind::Name | TokenKind::OpenParen) || next.kind.is_number();
    match prev.kind {
        kind if kind.is_number() => match next.kind {
            TokenKind::Name => !spaced,
            TokenKind::OpenParen => true,
            _ => false,
        },
        TokenKind::CloseParen => next_is_operand,
        TokenKind::Name => next.kind == TokenKind::OpenParen && prev.lexeme.chars().count() == 1,
        _ => false,
    }
}

/// Makes every multiplication explicit. Whitespace and all other characters are preserved.
pub fn insert_multiplication(s: &str) -> String {
    let tokens = tokenize_complete(s);
    let mut out = String::with_capacity(s.len());
    let mut prev: Option<&Token> = None;
    let mut spaced = false;

    for token in tokens.iter() {
        if token.is_whitespace() {
            spaced = true;
        } else {
            if prev.map_or(false, |prev| needs_star(prev, token, spaced)) {
                out.push('*');
            }
            prev = Some(token);
            spaced = false;
        }
        out.push_str(token.lexeme);
    }

    out
}
