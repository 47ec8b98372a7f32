pub mod op;

use crate::{
    parser::{error::{kind, Error}, Parser, Parse},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Declares one parseable type per punctuation or name token, so grammar rules can ask for
/// `input.try_parse::<CloseParen>()` and get the token's span back.
macro_rules! single_tokens {
    ($($(#[$doc:meta])* $name:ident)*) => {
        $(
            $(#[$doc])*
            #[derive(Clone, Debug, PartialEq)]
            pub struct $name {
                pub lexeme: String,
                pub span: Range<usize>,
            }

            impl Parse for $name {
                fn parse(input: &mut Parser) -> Result<Self, Error> {
                    let token = input.next_token()?;
                    if token.kind != TokenKind::$name {
                        return Err(Error::new(vec![token.span], kind::UnexpectedToken {
                            expected: &[TokenKind::$name],
                            found: token.kind,
                        }));
                    }
                    Ok(Self { lexeme: token.lexeme.to_owned(), span: token.span })
                }
            }
        )*
    };
}

single_tokens!(
    /// The `=` between the two sides of an equation.
    Eq
    OpenParen
    CloseParen
    /// A variable or function name.
    Name
);
