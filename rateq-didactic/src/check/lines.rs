//! Normalizing and classifying the lines of a student's written work.

use rateq_parser::normalize::normalize_line;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Names that read as mathematics rather than prose.
const FUNCTION_NAMES: [&str; 4] = ["sqrt", "lcd", "lhs", "rhs"];

/// Characters that only appear in mathematics.
const ARITHMETIC: [char; 14] = ['+', '-', '*', '/', '÷', '(', ')', 'x', 'X', '²', '^', '±', '√', '≠'];

/// Whether a line of work reads as mathematics or as prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LineKind {
    /// An equation or expression.
    Equation,

    /// A sentence or note.
    Prose,
}

/// One line of a student's written work.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct StudentLine {
    /// The line as written, trimmed.
    pub raw: String,

    /// The line after the same cleanup as the instructor's equation.
    pub normalized: String,

    /// Whether the line reads as mathematics.
    pub kind: LineKind,
}

/// Returns true if the line has a word of three or more letters that is not a function name.
fn has_words(line: &str) -> bool {
    line.split(|c: char| !c.is_alphabetic())
        .filter(|word| word.chars().count() >= 3)
        .any(|word| !FUNCTION_NAMES.contains(&word.to_lowercase().as_str()))
}

/// Classifies a normalized line.
///
/// Any line with an `=` is an equation, even with words around it, such as `check: x = 2`.
/// Otherwise, a line with words is prose, and a line with enough arithmetic is an equation.
pub fn kind(line: &str) -> LineKind {
    let length = line.chars().count();
    if line.contains('=') {
        LineKind::Equation
    } else if has_words(line) {
        LineKind::Prose
    } else if length > 2 && line.contains(&ARITHMETIC[..]) {
        LineKind::Equation
    } else if length > 3 && line.chars().any(|c| c.is_ascii_digit()) {
        LineKind::Equation
    } else {
        LineKind::Prose
    }
}

/// Normalizes and classifies each non-blank line independently, so a malformed line affects only
/// itself.
pub fn classify<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<StudentLine> {
    lines.into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|raw| {
            let normalized = normalize_line(raw);
            let kind = kind(&normalized);
            StudentLine { raw: raw.to_owned(), normalized, kind }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn equations_and_prose() {
        assert_eq!(kind("2*x+1=5"), LineKind::Equation);
        assert_eq!(kind("check: x = 2"), LineKind::Equation);
        assert_eq!(kind("(x-2)*(x+1)"), LineKind::Equation);
        assert_eq!(kind("sqrt(5)/2"), LineKind::Equation);
        assert_eq!(kind("12.5"), LineKind::Equation);
        assert_eq!(kind("multiply both sides by (x-2)"), LineKind::Prose);
        assert_eq!(kind("done"), LineKind::Prose);
        assert_eq!(kind("7"), LineKind::Prose);
    }

    #[test]
    fn lines_are_normalized_independently() {
        let lines = classify(["  2x+3=7 ", "", "\\frac{1}{x} = 2", "((", "so x is 2"]);
        let normalized = lines.iter().map(|line| line.normalized.as_str()).collect::<Vec<_>>();
        assert_eq!(normalized, vec!["2*x+3=7", "(1)/(x) = 2", "((", "so x is 2"]);
        assert_eq!(lines[0].raw, "2x+3=7");
        assert_eq!(lines[3].kind, LineKind::Prose);
        assert_eq!(lines[4].kind, LineKind::Prose);
    }
}
