//! Turns raw OCR, LaTeX or hand-typed input into a canonical equation string.
//!
//! The canonical form is ASCII with exactly one `=`, explicit `*` for multiplication, `**` for
//! powers, balanced parentheses and no whitespace, such as `1/(x-2)=3/(x+1)`. Normalization runs
//! these stages in order, each on the previous stage's output:
//!
//! 1. [`clean`]: artifact stripping
//! 2. [`latex`]: LaTeX and typographic de-sugaring
//! 3. [`recover`]: equality-form recovery
//! 4. [`implicit`]: implicit multiplication
//! 5. the final guard, which parses both sides and prints them canonically, with one repair pass
//!    if the first attempt fails

pub mod clean;
pub mod error;
pub mod implicit;
pub mod latex;
pub mod recover;

pub use error::NormalizeError;

use crate::parser::{ast::expr::Expr, Parser};
use rateq_error::ErrorKind;
use tracing::{debug, trace};

/// Normalizes raw input into a canonical equation string.
pub fn normalize(raw: &str) -> Result<String, NormalizeError> {
    let cleaned = clean::clean(raw);
    if cleaned.is_empty() {
        return Err(NormalizeError::Empty);
    }
    trace!(target: "normalize", %cleaned, "stripped artifacts");

    let plain = latex::desugar(&cleaned);
    trace!(target: "normalize", %plain, "desugared latex");

    let recovered = recover::recover(&plain);
    let explicit = implicit::insert_multiplication(&recovered);
    trace!(target: "normalize", %explicit, "inserted multiplication");

    let canonical = guard(&explicit)?;
    debug!(target: "normalize", raw, %canonical, "normalized equation");
    Ok(canonical)
}

/// Normalizes a single line of a student's written work. The same cleanup, LaTeX and implicit
/// multiplication rules as [`normalize`] apply, but no equality is required, so the line may be
/// prose.
pub fn normalize_line(line: &str) -> String {
    let plain = latex::desugar(&clean::clean(line));
    clean::collapse_whitespace(&implicit::insert_multiplication(&plain))
}

/// Normalizes a lone expression, such as a declared answer, to canonical form. Returns [`None`]
/// if it does not parse.
pub fn normalize_expr(raw: &str) -> Option<String> {
    let plain = latex::desugar(&clean::clean(raw));
    let explicit = implicit::insert_multiplication(&plain);
    Parser::new(explicit.trim())
        .try_parse_full::<Expr>()
        .ok()
        .map(|expr| expr.canonical())
}

/// Parses both sides of `s` and prints them canonically. If that fails, one repair pass is tried
/// before giving up with the original error.
fn guard(s: &str) -> Result<String, NormalizeError> {
    match finish(s) {
        Ok(canonical) => Ok(canonical),
        Err(err) => {
            let repaired = repair(s);
            if repaired == s {
                return Err(err);
            }
            trace!(target: "normalize", %repaired, error = %err.message(), "retrying after repair");
            finish(&repaired)
        },
    }
}

/// Requires exactly one `=` and two parseable sides.
fn finish(s: &str) -> Result<String, NormalizeError> {
    let sides = s.split('=').collect::<Vec<_>>();
    let [lhs, rhs] = sides[..] else {
        return Err(match sides.len() {
            1 if s.trim().is_empty() => NormalizeError::Empty,
            1 => NormalizeError::NoEquality,
            n => NormalizeError::MultipleEquality { count: n - 1 },
        });
    };

    let parse_side = |side: &'static str, text: &str| {
        Parser::new(text.trim())
            .try_parse_full::<Expr>()
            .map_err(|err| NormalizeError::Unparsable { side, detail: err.message() })
    };
    let lhs = parse_side("left", lhs)?;
    let rhs = parse_side("right", rhs)?;
    Ok(format!("{}={}", lhs.canonical(), rhs.canonical()))
}

/// Last-resort repairs for OCR output:
///
/// - `==` becomes `=`
/// - an echoed side (`a=b=b`) or an empty side left by a trailing `=` is dropped
/// - square brackets become parentheses
/// - stray `)` at the start and `(` at the end of a side are dropped, along with any `*` or `/`
///   left dangling at the start, and any other unbalanced parentheses are closed
fn repair(s: &str) -> String {
    let mut s = s.replace('[', "(").replace(']', ")");
    while s.contains("==") {
        s = s.replace("==", "=");
    }

    let mut sides = s.split('=')
        .map(str::trim)
        .filter(|side| !side.is_empty())
        .collect::<Vec<_>>();
    sides.dedup();

    sides.into_iter()
        .map(|side| {
            let side = side
                .trim_start_matches(|c: char| c == ')' || c == '*' || c == '/')
                .trim_end_matches('(');
            recover::close_side(side)
        })
        .collect::<Vec<_>>()
        .join("=")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn already_canonical() {
        assert_eq!(normalize("2*x+1=5").unwrap(), "2*x+1=5");
        assert_eq!(normalize("1/(x-2)=3/(x+1)").unwrap(), "1/(x-2)=3/(x+1)");
    }

    #[test]
    fn plain_text() {
        assert_eq!(normalize("2x + 1 = 5").unwrap(), "2*x+1=5");
        assert_eq!(normalize("x^2 - 5x + 6 = 0").unwrap(), "x**(2)-5*x+6=0");
        assert_eq!(normalize("x**2 - 5x + 6 = 0").unwrap(), "x**2-5*x+6=0");
    }

    #[test]
    fn eq_wrapper() {
        assert_eq!(normalize("Eq(x+1,5)").unwrap(), "x+1=5");
        assert_eq!(normalize("Eq(x+1)").unwrap(), "x+1=0");
    }

    #[test]
    fn comma_as_equals() {
        assert_eq!(normalize("2*x+1,5").unwrap(), "2*x+1=5");
    }

    #[test]
    fn bracket_equations() {
        assert_eq!(
            normalize("4[x/4 + 3/2 = 5/4]4").unwrap(),
            "(4*4)*(x/4+3/2)=(4*4)*(5/4)",
        );
        assert_eq!(
            normalize("3[2x + 1 = 7]3").unwrap(),
            "(3*3)*(2*x+1)=(3*3)*(7)",
        );
        assert_eq!(
            normalize("(4*x[x+2)/(x)=(3)/(4)]4*x").unwrap(),
            "(4*x*4*x)*((x+2)/(x))=(4*x*4*x)*((3)/(4))",
        );
        assert_eq!(
            normalize("4x[x+2/x = 3/4]4x").unwrap(),
            "(4*x*4*x)*(x+2/x)=(4*x*4*x)*(3/4)",
        );
    }

    #[test]
    fn ocr_note() {
        assert_eq!(normalize("x + 1 = 5 [OCR artifact]").unwrap(), "x+1=5");
    }

    #[test]
    fn mojibake_dot() {
        assert_eq!(normalize("4Â·x + 4 = 8").unwrap(), "4*x+4=8");
    }

    #[test]
    fn latex_fractions() {
        assert_eq!(
            normalize("\\frac{1}{x-2}=\\dfrac{3}{x+1}").unwrap(),
            "(1)/(x-2)=(3)/(x+1)",
        );
        assert_eq!(
            normalize("$\\frac{x}{x-3} = \\frac{3}{x-3} + 2$").unwrap(),
            "(x)/(x-3)=(3)/(x-3)+2",
        );
    }

    #[test]
    fn latex_powers() {
        assert_eq!(normalize("x^{2} = 4").unwrap(), "x**(2)=4");
    }

    #[test]
    fn echo_after_line_break() {
        assert_eq!(normalize("x + 1 = 5 \\\\ x + 1 = 5").unwrap(), "x+1=5");
    }

    #[test]
    fn idempotent() {
        for input in [
            "4[x/4 + 3/2 = 5/4]4",
            "\\frac{1}{x-2}=\\dfrac{3}{x+1}",
            "x^2 - x^{-1} = -(x+1)",
            "2x(x-1) = 3 - -x",
        ] {
            let once = normalize(input).unwrap();
            assert_eq!(normalize(&once).unwrap(), once);
        }
    }

    #[test]
    fn repairs() {
        assert_eq!(normalize("x+1==5").unwrap(), "x+1=5");
        assert_eq!(normalize("x+1=5=5").unwrap(), "x+1=5");
        assert_eq!(normalize("(x+1=5").unwrap(), "(x+1)=5");
        assert_eq!(normalize("x+1)=5").unwrap(), "(x+1)=5");
        assert_eq!(normalize(")x+1=5").unwrap(), "x+1=5");
        assert_eq!(normalize(")2x=4").unwrap(), "2*x=4");
        assert_eq!(normalize("x-1=)(x+1)").unwrap(), "x-1=(x+1)");
    }

    #[test]
    fn failures() {
        assert_eq!(normalize("   ").unwrap_err(), NormalizeError::Empty);
        assert_eq!(normalize("x+1").unwrap_err(), NormalizeError::NoEquality);
        assert_eq!(
            normalize("x=1=2").unwrap_err(),
            NormalizeError::MultipleEquality { count: 2 },
        );
        assert!(matches!(
            normalize("x+=1").unwrap_err(),
            NormalizeError::Unparsable { side: "left", .. },
        ));
    }

    #[test]
    fn student_lines() {
        assert_eq!(normalize_line("LCD is 4x"), "LCD is 4*x");
        assert_eq!(normalize_line("X = \\frac{3}{2}"), "x = (3)/(2)");
        assert_eq!(normalize_line("multiply by (x-2)(x+1)"), "multiply by (x-2)*(x+1)");
    }

    #[test]
    fn expressions() {
        assert_eq!(normalize_expr("3/2").as_deref(), Some("3/2"));
        assert_eq!(normalize_expr("2 + \\sqrt{3}").as_deref(), Some("2+sqrt(3)"));
        assert_eq!(normalize_expr("2 +"), None);
    }
}
