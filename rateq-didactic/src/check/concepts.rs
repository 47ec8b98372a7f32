//! Detecting which parts of the method a student's work shows.
//!
//! Detection is lexical: each flag is set as soon as any line, or a line together with its
//! neighbors, carries one of the cues for it. Long keywords also match with one typo, since the
//! work is usually read by OCR from handwriting.

use levenshtein::levenshtein;
use rateq_solver::AnalysisResult;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Words of at least this many letters match keywords with one typo.
const FUZZY_MIN_LEN: usize = 7;

const DENOMINATOR_CUES: [&str; 5] = ["denominator", "denominators", "denom", "lcd", "least common denominator"];

const RESTRICTION_CUES: [&str; 11] = [
    "restriction",
    "restrictions",
    "excluded",
    "cannot",
    "≠",
    "!=",
    "not equal",
    "not equal to",
    "undefined",
    "domain",
    "not allowed",
];

const LCD_CUES: [&str; 3] = ["multiply both sides by", "multiply by", "times"];

const VERIFICATION_CUES: [&str; 16] = [
    "verify",
    "verification",
    "check",
    "substitute",
    "substitution",
    "test",
    "testing",
    "plug in",
    "plugging in",
    "lhs",
    "rhs",
    "left side",
    "right side",
    "both sides",
    "balance",
    "balanced",
];

/// Words that mark a line as checking a value.
const CHECK_WORDS: [&str; 6] = ["check", "verify", "test", "substitute", "lhs", "rhs"];

/// Words on the line after `x = ...` that mark it as checking that value.
const FOLLOW_UP_WORDS: [&str; 8] = ["check", "verify", "test", "substitute", "lhs", "rhs", "left", "right"];

/// Labels that introduce a computed side, as in `lhs = 2/3`.
const SIDE_LABELS: [&str; 8] = ["lhs =", "rhs =", "lhs=", "rhs=", "left side =", "right side =", "left=", "right="];

const CHECK_HEADINGS: [&str; 3] = ["check:", "verify:", "test:"];

/// How many earlier lines may hold the value a line is checking.
const LOOK_BACK: usize = 3;

/// Which parts of the method a student's work shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ConceptFlags {
    /// The work names the denominators, or writes one of them out.
    pub mentions_denominators: bool,

    /// The work states which values are excluded.
    pub mentions_restrictions: bool,

    /// The work says it multiplies by the LCD.
    pub mentions_lcd: bool,

    /// The work shows an equation with the fractions cleared.
    pub shows_simplified_equation: bool,

    /// The work talks about checking the answer.
    pub mentions_verification: bool,

    /// The work actually substitutes a value back in.
    pub shows_verification_work: bool,
}

/// Returns true if the line contains one of the cues, or a word one typo away from a long
/// single-word cue.
fn mentions(lower: &str, cues: &[&str]) -> bool {
    if cues.iter().any(|cue| lower.contains(cue)) {
        return true;
    }
    lower.split(|c: char| !c.is_alphabetic())
        .filter(|word| word.chars().count() >= FUZZY_MIN_LEN)
        .any(|word| {
            cues.iter()
                .filter(|cue| cue.chars().count() >= FUZZY_MIN_LEN && !cue.contains(' '))
                .any(|cue| levenshtein(word, cue) == 1)
        })
}

fn has_digit(line: &str) -> bool {
    line.chars().any(|c| c.is_ascii_digit())
}

fn has_relation(line: &str) -> bool {
    line.contains(|c: char| matches!(c, '=' | '≈' | '≠'))
}

/// The line-level checks for a student substituting a value back in. `lines` holds the lowercase
/// lines, and `assigns` returns true for a line assigning a value to the variable.
fn shows_check_at(lines: &[String], idx: usize, var: &str, assigns: &dyn Fn(&str) -> bool) -> bool {
    let lower = lines[idx].as_str();
    let next = lines.get(idx + 1).map(String::as_str);
    let earlier_value = || {
        lines[idx.saturating_sub(LOOK_BACK)..idx]
            .iter()
            .any(|prev| assigns(prev.as_str()) && has_digit(prev))
    };

    if has_relation(lower) && lower.contains(var) && has_digit(lower) && mentions(lower, &CHECK_WORDS) {
        return true;
    }
    if assigns(lower) && next.map_or(false, |next| mentions(next, &FOLLOW_UP_WORDS)) {
        return true;
    }
    if lower.contains('/') && has_digit(lower) && has_relation(lower) && mentions(lower, &CHECK_WORDS[..4]) {
        return true;
    }
    if SIDE_LABELS.iter().any(|label| lower.contains(label)) {
        return true;
    }

    let when = format!("when {} =", var);
    if (lower.contains(&when) || (assigns(lower) && lower.contains(':')))
        && lower.contains(|c: char| matches!(c, '(' | ')' | '/'))
        && has_digit(lower)
    {
        return true;
    }

    let heading = CHECK_HEADINGS.iter().any(|h| lower.contains(h));
    let worked_below = next.map_or(false, |next| {
        next.contains(|c: char| matches!(c, '=' | '/' | '(' | ')')) && has_digit(next)
    });
    if heading && worked_below {
        return true;
    }

    lower.contains('/') && has_relation(lower) && earlier_value()
}

/// Detects the concepts shown in the raw lines of a student's work.
pub fn detect(lines: &[&str], analysis: &AnalysisResult) -> ConceptFlags {
    let var = analysis.variable.as_str();
    let lower = lines.iter().map(|line| line.to_lowercase()).collect::<Vec<_>>();
    let assignment = [format!("{} =", var), format!("{}=", var)];
    let assigns = |line: &str| assignment.iter().any(|a| line.contains(a.as_str()));

    let mut flags = ConceptFlags::default();
    for (idx, line) in lines.iter().enumerate() {
        let lowered = lower[idx].as_str();
        flags.mentions_denominators |= mentions(lowered, &DENOMINATOR_CUES);
        flags.mentions_restrictions |= mentions(lowered, &RESTRICTION_CUES);
        flags.mentions_lcd |= mentions(lowered, &LCD_CUES);
        flags.mentions_verification |= mentions(lowered, &VERIFICATION_CUES);
        flags.shows_simplified_equation |= line.contains('=')
            && !line.contains(|c: char| c == '/' || c == '÷')
            && lowered.contains(var)
            && line.chars().count() > 5;
        if !flags.shows_verification_work {
            flags.shows_verification_work = shows_check_at(&lower, idx, var, &assigns);
        }
    }

    // writing out a denominator counts as naming it, and writing it next to a product counts as
    // multiplying by it
    let compact = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    let denominators = analysis.denominators
        .iter()
        .flat_map(|d| [d.display(var), d.expand().display(var)])
        .map(|d| compact(&d))
        .collect::<Vec<_>>();
    for (line, lowered) in lines.iter().zip(&lower) {
        let line = compact(line);
        let writes_denominator = denominators.iter().any(|d| line.contains(d.as_str()));
        flags.mentions_denominators |= writes_denominator;
        flags.mentions_lcd |= writes_denominator && (line.contains('*') || lowered.contains("multiply"));
    }

    flags
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rateq_solver::{solve_raw, Config};
    use super::*;

    fn flags(equation: &str, lines: &[&str]) -> ConceptFlags {
        let analysis = solve_raw(equation, &Config::default()).unwrap();
        detect(lines, &analysis)
    }

    #[test]
    fn nothing_shown() {
        assert_eq!(flags("1/(x-2) = 3/(x+1)", &[]), ConceptFlags::default());
    }

    #[test]
    fn full_solution() {
        let work = [
            "The denominators are x-2 and x+1",
            "Restrictions: x ≠ 2, x ≠ -1",
            "Multiply both sides by the LCD (x-2)(x+1)",
            "x + 1 = 3x - 6",
            "7 = 2x",
            "x = 7/2",
            "Check: 1/(7/2 - 2) = 2/3 and 3/(7/2 + 1) = 2/3",
        ];
        let flags = flags("1/(x-2) = 3/(x+1)", &work);
        assert_eq!(flags, ConceptFlags {
            mentions_denominators: true,
            mentions_restrictions: true,
            mentions_lcd: true,
            shows_simplified_equation: true,
            mentions_verification: true,
            shows_verification_work: true,
        });
    }

    #[test]
    fn misspelled_keywords() {
        let flags = flags("1/(x-2) = 3/(x+1)", &["the denominaters cant be zero", "restrictons apply"]);
        assert!(flags.mentions_denominators);
        assert!(flags.mentions_restrictions);
    }

    #[test]
    fn writing_a_denominator_counts() {
        let flags = flags("1/(x-2) = 3/(x+1)", &["(x - 2)*(x + 1)*1/(x-2) = x + 1"]);
        assert!(flags.mentions_denominators);
        assert!(flags.mentions_lcd);
    }

    #[test]
    fn verification_on_the_next_line() {
        let flags = flags("1/(x-2) = 3/(x+1)", &["x = 7/2", "left: 2/3, right: 2/3"]);
        assert!(flags.shows_verification_work);
    }

    #[test]
    fn side_labels() {
        let flags = flags("1/(x-2) = 3/(x+1)", &["LHS = 2/3", "RHS = 2/3"]);
        assert!(flags.mentions_verification);
        assert!(flags.shows_verification_work);
    }

    #[test]
    fn talking_about_checking_is_not_checking() {
        let flags = flags("2*x + 1 = 5", &["I should check my answer"]);
        assert!(flags.mentions_verification);
        assert!(!flags.shows_verification_work);
    }
}
