//! Rewrites LaTeX and typographic notation into plain ASCII algebra.

/// Typographic operators and spacing commands, replaced in order.
const REPLACEMENTS: [(&str, &str); 23] = [
    ("\\dfrac", "\\frac"),
    ("\\tfrac", "\\frac"),
    ("\\cdot", "*"),
    ("\\times", "*"),
    ("\\div", "/"),
    ("·", "*"),
    ("×", "*"),
    ("∙", "*"),
    ("⋅", "*"),
    ("÷", "/"),
    ("−", "-"),
    ("–", "-"),
    ("—", "-"),
    ("\\left", ""),
    ("\\right", ""),
    ("\\displaystyle", ""),
    ("\\qquad", " "),
    ("\\quad", " "),
    ("\\,", ""),
    ("\\;", ""),
    ("\\:", ""),
    ("\\!", ""),
    ("\\ ", " "),
];

/// Commands whose single argument is kept as plain text.
const UNWRAPPED: [&str; 4] = ["mathrm", "operatorname", "mathit", "mathbf"];

/// Commands whose argument is prose and is dropped.
const DROPPED: [&str; 2] = ["text", "textrm"];

/// Converts LaTeX notation to plain ASCII algebra:
///
/// - `$` delimiters are removed
/// - `\frac{a}{b}` (nested to any depth, or the brace-less `\frac12`) becomes `(a)/(b)`
/// - `\sqrt{a}` becomes `sqrt(a)`
/// - `a^{b}` and `a^b` become `a**(b)`
/// - typographic operators become `*`, `/` and `-`; spacing commands are dropped
/// - any other command loses its backslash, and remaining braces become parentheses
pub fn desugar(s: &str) -> String {
    let mut s = s.replace('$', "");
    for (from, to) in REPLACEMENTS {
        s = s.replace(from, to);
    }

    let chars = s.chars().collect::<Vec<_>>();
    let s = rewrite(&chars);
    s.replace('{', "(").replace('}', ")")
}

/// Returns the contents of the brace group opening at `open`, and the index just past its closing
/// brace.
fn braced(chars: &[char], open: usize) -> Option<(&[char], usize)> {
    let mut depth = 0usize;
    for (i, &c) in chars.iter().enumerate().skip(open) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some((&chars[open + 1..i], i + 1));
                }
            },
            _ => (),
        }
    }
    None
}

/// Reads one command argument starting at `start`: a brace group, or a single character.
fn argument(chars: &[char], start: usize) -> Option<(&[char], usize)> {
    let start = skip_spaces(chars, start);
    match chars.get(start)? {
        '{' => braced(chars, start),
        '}' => None,
        _ => Some((&chars[start..start + 1], start + 1)),
    }
}

fn skip_spaces(chars: &[char], mut i: usize) -> usize {
    while chars.get(i).map_or(false, |c| c.is_whitespace()) {
        i += 1;
    }
    i
}

/// Reads the name of the command whose backslash is at `start`.
fn command_name(chars: &[char], start: usize) -> (String, usize) {
    let mut end = start + 1;
    while chars.get(end).map_or(false, |c| c.is_ascii_alphabetic()) {
        end += 1;
    }
    (chars[start + 1..end].iter().collect(), end)
}

/// Rewrites commands and exponents, recursing into their arguments.
fn rewrite(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                let (name, after) = command_name(chars, i);
                i = match name.as_str() {
                    "frac" => match fraction(chars, after) {
                        Some((num, den, end)) => {
                            out.push_str(&format!("({})/({})", rewrite(num), rewrite(den)));
                            end
                        },
                        None => after,
                    },
                    "sqrt" => match argument(chars, after) {
                        Some((arg, end)) if chars[skip_spaces(chars, after)] == '{' => {
                            out.push_str(&format!("sqrt({})", rewrite(arg)));
                            end
                        },
                        _ => {
                            out.push_str("sqrt");
                            after
                        },
                    },
                    name if DROPPED.contains(&name) => match braced(chars, skip_spaces(chars, after)) {
                        Some((_, end)) => {
                            out.push(' ');
                            end
                        },
                        None => after,
                    },
                    name if UNWRAPPED.contains(&name) => match braced(chars, skip_spaces(chars, after)) {
                        Some((arg, end)) => {
                            out.push_str(&rewrite(arg));
                            end
                        },
                        None => after,
                    },
                    name => {
                        out.push_str(name);
                        after
                    },
                };
            },
            '^' => {
                i = exponent(chars, i + 1, &mut out);
            },
            c => {
                out.push(c);
                i += 1;
            },
        }
    }

    out
}

/// Reads the numerator and denominator of a `\frac`, returning the index just past them.
fn fraction(chars: &[char], start: usize) -> Option<(&[char], &[char], usize)> {
    let (num, after_num) = argument(chars, start)?;
    let (den, end) = argument(chars, after_num)?;
    Some((num, den, end))
}

/// Writes the exponent following a `^` as `**(..)`, returning the index just past it.
fn exponent(chars: &[char], start: usize, out: &mut String) -> usize {
    let start = skip_spaces(chars, start);
    match chars.get(start) {
        Some('{') => match braced(chars, start) {
            Some((arg, end)) => {
                out.push_str(&format!("**({})", rewrite(arg)));
                end
            },
            None => {
                out.push_str("**");
                start
            },
        },
        Some(&sign @ ('-' | '+')) if chars.get(start + 1).map_or(false, char::is_ascii_digit) => {
            let mut end = start + 1;
            while chars.get(end).map_or(false, char::is_ascii_digit) {
                end += 1;
            }
            let digits = chars[start + 1..end].iter().collect::<String>();
            out.push_str(&format!("**({}{})", sign, digits));
            end
        },
        Some(c) if c.is_ascii_alphanumeric() => {
            out.push_str(&format!("**({})", c));
            start + 1
        },
        _ => {
            out.push_str("**");
            start
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn nested_fractions() {
        assert_eq!(
            desugar("\\frac{1}{x-2}=\\dfrac{3}{x+1}"),
            "(1)/(x-2)=(3)/(x+1)",
        );
        assert_eq!(
            desugar("\\frac{\\frac{1}{x}}{x+\\frac{1}{2}} = 1"),
            "((1)/(x))/(x+(1)/(2)) = 1",
        );
    }

    #[test]
    fn braceless_fraction() {
        assert_eq!(desugar("\\frac12 x = 3"), "(1)/(2) x = 3");
        assert_eq!(desugar("\\frac1{x} = 3"), "(1)/(x) = 3");
    }

    #[test]
    fn exponents() {
        assert_eq!(desugar("x^{2}+x^3"), "x**(2)+x**(3)");
        assert_eq!(desugar("x^{-1} = x^-2"), "x**(-1) = x**(-2)");
        assert_eq!(desugar("(x+1)^2"), "(x+1)**(2)");
        assert_eq!(desugar("x^{x^{2}}"), "x**(x**(2))");
    }

    #[test]
    fn square_roots() {
        assert_eq!(desugar("\\sqrt{x+1} = 2"), "sqrt(x+1) = 2");
    }

    #[test]
    fn typographic_operators() {
        assert_eq!(desugar("3\\cdot x − 2×4 ÷ 2"), "3* x - 2*4 / 2");
        assert_eq!(desugar("4·x"), "4*x");
    }

    #[test]
    fn spacing_and_delimiters() {
        assert_eq!(
            desugar("$$\\displaystyle \\left(x\\,+1\\right)=2$$"),
            " (x+1)=2",
        );
    }

    #[test]
    fn other_commands() {
        assert_eq!(desugar("\\sin{x} = \\pi"), "sin(x) = pi");
        assert_eq!(desugar("x = 2 \\text{or} x = 3"), "x = 2   x = 3");
        assert_eq!(desugar("\\mathrm{x} = 1"), "x = 1");
    }
}
