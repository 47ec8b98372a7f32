//! Checks that a canonical equation is a rational equation worth solving.

use crate::{config::Config, equation::CanonicalEquation};
use rateq_attrs::ErrorKind;
use rateq_compute::ratfn::{from_expr, ConvertError, NotRational};
use rateq_error::ErrorKind as _;
use std::ops::Range;
use tracing::{debug, warn};

/// The validator's judgement of an equation. Only [`Verdict::Valid`] equations are analyzed.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Both sides are ratios of polynomials in the variable, and the equation is neither always
    /// nor never true.
    Valid,

    /// The input has no `=`.
    NotAnEquation,

    /// One side is not an expression.
    Unparsable {
        /// The parser's message.
        detail: String,
    },

    /// One side is not a ratio of polynomials in the variable.
    NonRational {
        /// What is wrong with it.
        reason: NotRational,

        /// The equation's variable.
        var: String,
    },

    /// A denominator is identically zero.
    ZeroDenominator,

    /// Some part of one side expands past the largest degree allowed.
    TooLarge {
        /// The degree it would reach.
        degree: usize,

        /// The largest degree allowed.
        max: usize,
    },

    /// Both sides are equal for every value of the variable.
    Identity,

    /// Both sides differ by a nonzero constant, so no value satisfies the equation.
    Contradiction,
}

impl Verdict {
    /// Returns true if the equation can be analyzed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// The user-facing message for this verdict.
    pub fn message(&self) -> String {
        match self {
            Verdict::Valid => String::from("Valid rational equation."),
            Verdict::NotAnEquation => String::from("Not an equation. Missing '='."),
            Verdict::Unparsable { detail } => format!("Invalid equation format. ({})", detail),
            Verdict::NonRational { reason: NotRational::Function { .. }, .. } => {
                String::from("Not a rational equation (contains non-polynomial functions).")
            },
            Verdict::NonRational { var, .. } => {
                format!("Not a rational equation (must be a fraction of polynomials in {}).", var)
            },
            Verdict::ZeroDenominator => String::from("Denominator is identically zero."),
            Verdict::TooLarge { degree, max } => {
                format!("This equation is too large to solve (degree {} is above the limit of {}).", degree, max)
            },
            Verdict::Identity => String::from("This equation is always true (infinite solutions)."),
            Verdict::Contradiction => String::from("This equation has no solution (contradiction)."),
        }
    }

    /// A short description of the highlighted part of the input.
    fn label(&self) -> String {
        match self {
            Verdict::NonRational { reason, .. } => reason.message(),
            Verdict::Unparsable { .. } => String::from("the problem is here"),
            Verdict::ZeroDenominator => String::from("this is always zero"),
            Verdict::TooLarge { degree, .. } => format!("this expands to degree {}", degree),
            Verdict::Identity | Verdict::Contradiction => String::from("both sides simplify to constants"),
            Verdict::Valid | Verdict::NotAnEquation => String::new(),
        }
    }

    fn help(&self) -> Option<String> {
        match self {
            Verdict::NotAnEquation => Some(String::from("write the equation as `left side = right side`")),
            Verdict::Unparsable { .. } => Some(String::from("multiplication must be written out explicitly, as in `2*x`")),
            Verdict::NonRational { reason: NotRational::Function { suggestion: Some(suggestion), .. }, .. } => {
                Some(format!("did you mean `{}`? Only +, -, *, / and integer powers are allowed", suggestion))
            },
            Verdict::NonRational { .. } => Some(String::from("only +, -, *, / and integer powers are allowed")),
            Verdict::TooLarge { .. } => Some(String::from("try smaller exponents")),
            _ => None,
        }
    }
}

/// An equation that cannot be analyzed, and the part of its source text responsible.
#[derive(Debug, Clone, PartialEq, ErrorKind)]
#[error(
    message = verdict.message(),
    labels = [verdict.label()],
    help = verdict.help().unwrap_or_default(),
)]
pub struct ValidationError {
    /// Why the equation cannot be analyzed. This is never [`Verdict::Valid`].
    pub verdict: Verdict,

    /// The region of the equation's source text to highlight.
    pub span: Range<usize>,
}

impl From<ValidationError> for rateq_error::Error {
    fn from(err: ValidationError) -> Self {
        let span = err.span.clone();
        rateq_error::Error::new(vec![span], err)
    }
}

/// The error for a side that failed to convert to a ratio of polynomials, or [`None`] if the
/// conversion only ran out of time.
pub(crate) fn reject(err: ConvertError, var: &str) -> Option<ValidationError> {
    Some(match err {
        ConvertError::NotRational(NotRational::ZeroDivision { span }) => {
            ValidationError { verdict: Verdict::ZeroDenominator, span }
        },
        ConvertError::NotRational(reason) => {
            let span = reason.span();
            ValidationError {
                verdict: Verdict::NonRational { reason, var: var.to_owned() },
                span,
            }
        },
        ConvertError::DegreeTooHigh { degree, max, span } => {
            ValidationError { verdict: Verdict::TooLarge { degree, max }, span }
        },
        ConvertError::Timeout => return None,
    })
}

/// Classifies an equation. Runs under the configured time budget; if simplification runs out of
/// time, the equation is assumed to be [`Verdict::Valid`] and left for the analyzer to judge.
pub fn validate(eq: &CanonicalEquation, config: &Config) -> Verdict {
    let (verdict, _) = validate_with_span(eq, config);
    verdict
}

/// Classifies an equation, returning an error pointing at the problem if it is not valid.
pub fn validate_equation(eq: &CanonicalEquation, config: &Config) -> Result<(), ValidationError> {
    match validate_with_span(eq, config) {
        (Verdict::Valid, _) => Ok(()),
        (verdict, span) => Err(ValidationError { verdict, span }),
    }
}

fn validate_with_span(eq: &CanonicalEquation, config: &Config) -> (Verdict, Range<usize>) {
    let var = config.variable.as_str();
    let whole = 0..eq.text().len();
    let budget = config.budget();

    let mut sides = Vec::with_capacity(2);
    for side in [eq.lhs(), eq.rhs()] {
        match from_expr(side, var, config.max_expression_degree, &budget) {
            Ok(conversion) => sides.push(conversion.value),
            Err(err) => match reject(err, var) {
                Some(ValidationError { verdict, span }) => {
                    debug!(target: "validate", equation = %eq, verdict = %verdict.message(), "rejected");
                    return (verdict, span);
                },
                None => {
                    warn!(target: "validate", equation = %eq, "timed out converting sides, assuming valid");
                    return (Verdict::Valid, whole);
                },
            },
        }
    }

    let difference = &sides[0] - &sides[1];
    let verdict = match difference.reduce(&budget) {
        Ok(difference) if difference.is_zero() => Verdict::Identity,
        Ok(difference) if difference.as_constant().is_some() => Verdict::Contradiction,
        Ok(_) => Verdict::Valid,
        Err(_) => {
            warn!(target: "validate", equation = %eq, "timed out comparing sides, assuming valid");
            Verdict::Valid
        },
    };
    debug!(target: "validate", equation = %eq, ?verdict, "validated");
    (verdict, whole)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rateq_error::ErrorKind;
    use super::*;

    fn verdict(source: &str) -> Verdict {
        let eq = CanonicalEquation::parse(source).unwrap();
        validate(&eq, &Config::default())
    }

    #[test]
    fn valid_equations() {
        assert_eq!(verdict("2*x+1=5"), Verdict::Valid);
        assert_eq!(verdict("1/(x-2)=3/(x+1)"), Verdict::Valid);
        assert_eq!(verdict("x**2=4"), Verdict::Valid);
    }

    #[test]
    fn identity_and_contradiction() {
        assert_eq!(verdict("x+1=1+x"), Verdict::Identity);
        assert_eq!(verdict("2*(x+1)=2*x+2"), Verdict::Identity);
        assert_eq!(verdict("x+1=x+2"), Verdict::Contradiction);
        assert_eq!(verdict("2=3"), Verdict::Contradiction);
    }

    #[test]
    fn rejected_equations() {
        assert!(matches!(
            verdict("sin(x)=1"),
            Verdict::NonRational { reason: NotRational::Function { .. }, .. },
        ));
        assert!(matches!(verdict("x*y=1"), Verdict::NonRational { .. }));
        assert_eq!(verdict("1/(x-x)=1"), Verdict::ZeroDenominator);
    }

    #[test]
    fn nested_powers_are_too_large() {
        assert_eq!(verdict("((x+1)**256)**256=1"), Verdict::TooLarge { degree: 65536, max: 256 });
        assert_eq!(
            verdict("((x+1)**256)**256=1").message(),
            "This equation is too large to solve (degree 65536 is above the limit of 256).",
        );

        let eq = CanonicalEquation::parse("(x+1)**3=1").unwrap();
        let config = Config::default().max_expression_degree(2);
        assert_eq!(validate(&eq, &config), Verdict::TooLarge { degree: 3, max: 2 });
    }

    #[test]
    fn timeout_while_converting_is_left_to_the_analyzer() {
        let eq = CanonicalEquation::parse("(x+1)**2=1").unwrap();
        let config = Config::default().time_budget(std::time::Duration::ZERO);
        assert_eq!(validate(&eq, &config), Verdict::Valid);
    }

    #[test]
    fn messages() {
        assert_eq!(
            verdict("sin(x)=1").message(),
            "Not a rational equation (contains non-polynomial functions).",
        );
        assert_eq!(
            verdict("x*y=1").message(),
            "Not a rational equation (must be a fraction of polynomials in x).",
        );
        assert_eq!(verdict("x=x").message(), "This equation is always true (infinite solutions).");
        assert_eq!(Verdict::NotAnEquation.message(), "Not an equation. Missing '='.");
    }

    #[test]
    fn error_span_points_at_problem() {
        let eq = CanonicalEquation::parse("x+sin(x)=1").unwrap();
        let err = validate_equation(&eq, &Config::default()).unwrap_err();
        assert_eq!(err.span, 2..8);
        assert_eq!(err.message(), "Not a rational equation (contains non-polynomial functions).");
    }
}
