//! Reading values out of a student's declared answer.

use super::lines::{LineKind, StudentLine};
use rateq_compute::{approx::format_complex, eval::eval_numeric};
use rateq_parser::{
    normalize::normalize_expr,
    parser::{ast::Expr, Parser},
};
use rug::Complex;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A value the student gave for the variable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct StudentValue {
    /// The value in canonical form, such as `3/2+sqrt(5)/2`.
    pub expression: String,

    /// The numeric value.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub value: Complex,

    /// The numeric value, formatted to the configured number of significant digits.
    pub approx: String,
}

/// Rewrites the radical sign as a call to `sqrt`. A radical sign not followed by a parenthesis
/// applies to the number or name right after it, so `√5/2` becomes `sqrt(5)/2`.
fn radicals(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '√' {
            out.push(c);
            continue;
        }

        out.push_str("sqrt");
        if chars.peek() == Some(&'(') {
            continue;
        }
        out.push('(');
        while let Some(&next) = chars.peek() {
            if next.is_alphanumeric() || next == '.' {
                out.push(next);
                chars.next();
            } else {
                break;
            }
        }
        out.push(')');
    }
    out
}

/// Strips a leading `x =`, `x ≠` or `x !=` from an answer.
fn strip_assignment<'a>(s: &'a str, var: &str) -> &'a str {
    let s = s.trim();
    let Some(rest) = s.strip_prefix(var) else {
        return s;
    };
    let rest = rest.trim_start();
    ["=", "≠", "!="]
        .iter()
        .find_map(|sign| rest.strip_prefix(sign))
        .map_or(s, str::trim)
}

/// Evaluates a single candidate value.
fn evaluate(candidate: &str, digits: usize) -> Option<StudentValue> {
    let expression = normalize_expr(&radicals(candidate))?;
    let expr = Parser::new(&expression).try_parse_full::<Expr>().ok()?;
    let value = eval_numeric(&expr).ok()?;
    let approx = format_complex(&value, digits);
    Some(StudentValue { expression, value, approx })
}

/// Reads every value from an answer such as `x = 2`, `x = -1, x = 4` or `x = 3 ± √2`.
fn parse_answer(answer: &str, var: &str, digits: usize) -> Vec<StudentValue> {
    let answer = if var == "x" { answer.replace('X', "x") } else { answer.to_owned() };
    let answer = answer.replace("+/-", "±").replace(" or ", ",").replace(" and ", ",");

    let mut values = Vec::new();
    for part in answer.split(|c: char| c == ',' || c == ';') {
        let part = strip_assignment(part, var);
        if part.is_empty() {
            continue;
        }
        let candidates = if part.contains('±') {
            vec![part.replace('±', "+"), part.replace('±', "-")]
        } else {
            vec![part.to_owned()]
        };
        for candidate in candidates {
            match evaluate(&candidate, digits) {
                Some(value) => values.push(value),
                None => trace!(target: "check", %candidate, "unreadable answer"),
            }
        }
    }
    values
}

/// Finds the value assigned to the variable in a line of work, such as the `2` in `so x = 2`. The
/// last assignment in the line is used. Occurrences of the variable inside a product, such as
/// the `x` in `2*x=4`, are not assignments.
fn assignment<'a>(line: &'a str, var: &str) -> Option<&'a str> {
    line.match_indices(var).collect::<Vec<_>>().into_iter().rev().find_map(|(at, _)| {
        let before = line[..at].chars().next_back();
        if before.map_or(false, |c| c.is_alphanumeric() || matches!(c, '*' | '/' | '^' | '_' | '.')) {
            return None;
        }
        let rest = line[at + var.len()..].trim_start().strip_prefix('=')?;
        if rest.starts_with('=') {
            return None;
        }
        let end = rest.find(|c: char| c == ',' || c == ';').unwrap_or(rest.len());
        Some(rest[..end].trim())
    })
}

/// Reads the student's values from their declared answer. If none can be read, the written work
/// is scanned from the last line up for a line assigning a value to the variable.
pub fn read(answer: &str, lines: &[StudentLine], var: &str, digits: usize) -> Vec<StudentValue> {
    let values = parse_answer(answer, var, digits);
    if !values.is_empty() {
        return values;
    }

    lines.iter()
        .rev()
        .filter(|line| line.kind == LineKind::Equation)
        .find_map(|line| {
            let values = parse_answer(assignment(&line.normalized, var)?, var, digits);
            (!values.is_empty()).then_some(values)
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use super::super::lines::classify;
    use super::*;

    fn values(answer: &str) -> Vec<String> {
        parse_answer(answer, "x", 8).into_iter().map(|v| v.approx).collect()
    }

    #[test]
    fn prefixes() {
        assert_eq!(values("x = 7/2"), vec!["3.5000000"]);
        assert_eq!(values("X=7/2"), vec!["3.5000000"]);
        assert_eq!(values("x ≠ 2"), vec!["2.0000000"]);
        assert_eq!(values("-3"), vec!["-3.0000000"]);
    }

    #[test]
    fn radicals_and_plus_minus() {
        assert_eq!(radicals("3 ± √5"), "3 ± sqrt(5)");
        assert_eq!(radicals("√(x+1)"), "sqrt(x+1)");
        assert_eq!(values("x = 3/2 ± √5/2"), vec!["2.6180340", "0.38196601"]);
        assert_eq!(values("x = 1 +/- 2"), vec!["3.0000000", "-1.0000000"]);
    }

    #[test]
    fn imaginary_unit() {
        let parsed = parse_answer("x = 1/2 + sqrt(3)*I/2", "x", 8);
        assert_float_absolute_eq!(parsed[0].value.imag().to_f64(), 0.8660254037844386, 1e-12);
    }

    #[test]
    fn several_values() {
        assert_eq!(values("x = -1, x = 4"), vec!["-1.0000000", "4.0000000"]);
        assert_eq!(values("x = -1 or x = 4"), vec!["-1.0000000", "4.0000000"]);
    }

    #[test]
    fn unreadable() {
        assert!(values("").is_empty());
        assert!(values("x = x + 1").is_empty());
        assert!(values("I don't know").is_empty());
    }

    #[test]
    fn assignments_in_work() {
        assert_eq!(assignment("so x = 2", "x"), Some("2"));
        assert_eq!(assignment("2*x=4", "x"), None);
        assert_eq!(assignment("x=2, check: x=2", "x"), Some("2"));
        assert_eq!(assignment("1/(x-2)", "x"), None);
    }

    #[test]
    fn falls_back_to_work() {
        let lines = classify(["2x = 7", "x = 7/2", "check: 1/(7/2 - 2) = 2/3"]);
        let read = read("", &lines, "x", 8);
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].approx, "3.5000000");
    }
}
