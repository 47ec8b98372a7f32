//! Recovers a single equality from inputs that express it indirectly.

use tracing::trace;

/// Tries each equality-recovery rule in order, returning the first rewrite that applies. If none
/// applies, the input is returned unchanged.
///
/// 1. `Eq(A, B)` becomes `A=B`, splitting on the top-level comma. `Eq(A)` becomes `A=0`.
/// 2. A single comma with no `=` anywhere is read as the `=`.
/// 3. A bracketed sub-equation `P[A=B]S` becomes `(P*S)*(A)=(P*S)*(B)`.
pub fn recover(s: &str) -> String {
    if let Some(eq) = eq_wrapper(s) {
        trace!(target: "normalize", input = s, output = %eq, "recovered Eq(..) wrapper");
        return eq;
    }
    if let Some(eq) = comma_as_equals(s) {
        trace!(target: "normalize", input = s, output = %eq, "read comma as equals");
        return eq;
    }
    if let Some(eq) = bracket_equation(s) {
        trace!(target: "normalize", input = s, output = %eq, "distributed bracket multiplier");
        return eq;
    }
    s.to_owned()
}

/// Returns the index of the `)` matching the `(` at `open`.
fn matching_paren(s: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open + i);
                }
            },
            _ => (),
        }
    }
    None
}

/// Returns the index of the first comma outside any parentheses.
fn top_level_comma(s: &str) -> Option<usize> {
    let mut depth = 0isize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => return Some(i),
            _ => (),
        }
    }
    None
}

fn eq_wrapper(s: &str) -> Option<String> {
    let s = s.trim();
    let open = s.strip_prefix("Eq")?.starts_with('(').then_some(2)?;
    if matching_paren(s, open)? != s.len() - 1 {
        return None;
    }

    let content = &s[open + 1..s.len() - 1];
    match top_level_comma(content) {
        Some(comma) => Some(format!("{}={}", content[..comma].trim(), content[comma + 1..].trim())),
        None if content.contains('=') => Some(content.trim().to_owned()),
        None => Some(format!("{}=0", content.trim())),
    }
}

fn comma_as_equals(s: &str) -> Option<String> {
    (!s.contains('=') && s.matches(',').count() == 1).then(|| s.replace(',', "="))
}

/// Removes parentheses that have no partner within `s`, as left behind when a bracket boundary
/// cuts through a parenthesized group.
fn trim_unmatched(s: &str) -> String {
    let mut open = Vec::new();
    let mut drop = Vec::new();
    for (i, c) in s.char_indices() {
        match c {
            '(' => open.push(i),
            ')' => match open.pop() {
                Some(_) => (),
                None => drop.push(i),
            },
            _ => (),
        }
    }
    drop.extend(open);

    s.char_indices()
        .filter(|(i, _)| !drop.contains(i))
        .map(|(_, c)| c)
        .collect()
}

/// Balances the parentheses of `s` by adding `(` at the start for each unmatched `)`, and `)` at
/// the end for each unmatched `(`.
pub(crate) fn close_side(s: &str) -> String {
    let mut depth = 0isize;
    let mut missing_open = 0usize;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => missing_open += 1,
            ')' => depth -= 1,
            _ => (),
        }
    }

    format!("{}{}{}", "(".repeat(missing_open), s, ")".repeat(depth as usize))
}

/// Finds where the inner equation of an unclosed bracket ends: at the first `)` that closes
/// nothing opened inside the bracket, provided an `=` comes before it.
fn inferred_bracket_end(after: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in after.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return after[..i].contains('=').then_some(i),
            ')' => depth -= 1,
            _ => (),
        }
    }
    None
}

/// Trims the factor on either side of the bracket: whitespace, stray `*` and unmatched
/// parentheses.
fn multiplier_part(s: &str) -> String {
    let trimmed = trim_unmatched(s);
    trimmed.trim_matches(|c: char| c.is_whitespace() || c == '*').to_owned()
}

fn bracket_equation(s: &str) -> Option<String> {
    let open = s.find('[')?;
    let after = &s[open + 1..];
    if !after.contains('=') {
        return None;
    }

    let (inner, suffix) = match after.find(']') {
        Some(close) => (&after[..close], &after[close + 1..]),
        None => match inferred_bracket_end(after) {
            Some(close) => (&after[..close], &after[close + 1..]),
            None => (after, ""),
        },
    };
    let (lhs, rhs) = inner.split_once('=')?;
    let lhs = close_side(lhs.trim());
    let rhs = close_side(rhs.trim());

    let prefix = multiplier_part(&s[..open]);
    let suffix = multiplier_part(suffix);
    let multiplier = match (prefix.is_empty(), suffix.is_empty()) {
        (false, false) => Some(format!("({}*{})", prefix, suffix)),
        (false, true) => Some(format!("({})", prefix)),
        (true, false) => Some(format!("({})", suffix)),
        (true, true) => None,
    };

    Some(match multiplier {
        Some(m) => format!("{m}*({lhs})={m}*({rhs})"),
        None => format!("({lhs})=({rhs})"),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn eq_wrapper_with_comma() {
        assert_eq!(recover("Eq(x+1,5)"), "x+1=5");
        assert_eq!(recover("Eq(f(x, 1), 5)"), "f(x, 1)=5");
    }

    #[test]
    fn eq_wrapper_without_comma() {
        assert_eq!(recover("Eq(x**2-4)"), "x**2-4=0");
    }

    #[test]
    fn eq_wrapper_must_span_input() {
        assert_eq!(recover("Eq(x)+Eq(y)"), "Eq(x)+Eq(y)");
    }

    #[test]
    fn comma_as_equals() {
        assert_eq!(recover("2*x+1,5"), "2*x+1=5");
        assert_eq!(recover("1,2,3"), "1,2,3");
    }

    #[test]
    fn bracket_with_prefix_and_suffix() {
        assert_eq!(
            recover("4[x/4 + 3/2 = 5/4]4"),
            "(4*4)*(x/4 + 3/2)=(4*4)*(5/4)",
        );
    }

    #[test]
    fn bracket_with_prefix_only() {
        assert_eq!(recover("6 [x/2 = 1/3]"), "(6)*(x/2)=(6)*(1/3)");
    }

    #[test]
    fn bracket_cutting_through_parens() {
        assert_eq!(
            recover("(4*x[x+2)/(x)=(3)/(4)]4*x"),
            "(4*x*4*x)*((x+2)/(x))=(4*x*4*x)*((3)/(4))",
        );
    }

    #[test]
    fn bracket_missing_close() {
        assert_eq!(
            recover("(x-1)[x/(x-1)=2)(x-1)"),
            "((x-1)*(x-1))*(x/(x-1))=((x-1)*(x-1))*(2)",
        );
        assert_eq!(recover("[x = 2"), "(x)=(2)");
    }

    #[test]
    fn unrelated_input_is_unchanged() {
        assert_eq!(recover("x+1=5"), "x+1=5");
    }

    #[test]
    fn balancing() {
        assert_eq!(close_side("x+2)/(x"), "(x+2)/(x)");
        assert_eq!(trim_unmatched("(4*x"), "4*x");
        assert_eq!(trim_unmatched(")(x-1)("), "(x-1)");
    }
}
