use crate::validate::{ValidationError, Verdict};
use rateq_parser::parser::{
    ast::{Equation, Expr},
    fmt::Latex,
    Parser,
};
use std::fmt;

/// A parsed equation in canonical form, such as `1/(x-2)=3/(x+1)`.
///
/// The source text is kept so that errors can point into it.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalEquation {
    text: String,
    equation: Equation,
}

impl CanonicalEquation {
    /// Parses a canonical equation string, usually the output of
    /// [`normalize`](rateq_parser::normalize::normalize).
    ///
    /// Fails with [`Verdict::NotAnEquation`] if there is no `=`, or [`Verdict::Unparsable`] if
    /// either side is not an expression.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        if !text.contains('=') {
            return Err(ValidationError {
                verdict: Verdict::NotAnEquation,
                span: 0..text.len(),
            });
        }

        match Parser::new(text).try_parse_full::<Equation>() {
            Ok(equation) => Ok(Self { text: text.to_owned(), equation }),
            Err(err) => Err(ValidationError {
                verdict: Verdict::Unparsable { detail: err.message() },
                span: err.spans.first().cloned().unwrap_or(0..text.len()),
            }),
        }
    }

    /// The source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lhs(&self) -> &Expr {
        &self.equation.lhs
    }

    pub fn rhs(&self) -> &Expr {
        &self.equation.rhs
    }

    pub fn equation(&self) -> &Equation {
        &self.equation
    }

    /// Formats the equation as LaTeX.
    pub fn latex(&self) -> String {
        self.equation.as_display().to_string()
    }
}

/// Formats the equation with spaces around operators, such as `1/(x - 2) = 3/(x + 1)`.
impl fmt::Display for CanonicalEquation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.equation)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn parse_sides() {
        let eq = CanonicalEquation::parse("1/(x-2)=3/(x+1)").unwrap();
        assert_eq!(eq.lhs().to_string(), "1/(x - 2)");
        assert_eq!(eq.rhs().to_string(), "3/(x + 1)");
        assert_eq!(eq.to_string(), "1/(x - 2) = 3/(x + 1)");
        assert_eq!(eq.text(), "1/(x-2)=3/(x+1)");
    }

    #[test]
    fn missing_equals() {
        let err = CanonicalEquation::parse("2*x+1").unwrap_err();
        assert_eq!(err.verdict, Verdict::NotAnEquation);
    }

    #[test]
    fn bad_side() {
        let err = CanonicalEquation::parse("2*x+=5").unwrap_err();
        assert!(matches!(err.verdict, Verdict::Unparsable { .. }));
    }
}
