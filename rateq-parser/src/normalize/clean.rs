//! Removes OCR artifacts that carry no mathematical content.

/// Invisible characters left behind by OCR engines and copy-paste.
const INVISIBLE: [char; 6] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}', '\u{00A0}', '\u{2060}'];

/// Function names that may appear inside a bracketed group without making it prose.
const KNOWN_NAMES: [&str; 7] = ["sqrt", "sin", "cos", "tan", "log", "exp", "abs"];

/// Strips OCR artifacts from the raw input:
///
/// - uppercase `X` is folded to the variable `x`
/// - everything after the first LaTeX line break (`\\`) is an echo and is discarded
/// - zero-width and non-breaking characters are removed
/// - bracketed notes without an `=`, such as `[OCR artifact]`, are removed; other bracketed
///   groups without an `=` become parentheses
/// - whitespace runs collapse to a single space
pub fn clean(raw: &str) -> String {
    let mut s = raw.replace('X', "x");
    if let Some(line_break) = s.find("\\\\") {
        s.truncate(line_break);
    }
    let s = s.replace("Â·", "·")
        .chars()
        .filter(|c| !INVISIBLE.contains(c))
        .collect::<String>();
    collapse_whitespace(&strip_notes(&s))
}

/// Collapses every run of whitespace into one space and trims both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the index of the `]` matching the `[` at `open`, if any.
fn matching_bracket(s: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s[open..].char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            },
            _ => (),
        }
    }
    None
}

/// Removes bracketed notes. Brackets holding an `=` are left for equality recovery, and unclosed
/// brackets are left untouched.
fn strip_notes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let Some(close) = matching_bracket(rest, open) else {
            out.push_str(&rest[open..]);
            return out;
        };

        let inner = &rest[open + 1..close];
        if inner.contains('=') {
            out.push_str(&rest[open..=close]);
        } else if is_note(inner) {
            out.push(' ');
        } else {
            out.push('(');
            out.push_str(&strip_notes(inner));
            out.push(')');
        }
        rest = &rest[close + 1..];
    }

    out.push_str(rest);
    out
}

/// A bracketed span is a note if it is empty or contains a word: a run of at least three letters
/// that is neither a LaTeX command nor a known function name.
fn is_note(inner: &str) -> bool {
    if inner.trim().is_empty() {
        return true;
    }

    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            while chars.next_if(|c| c.is_ascii_alphabetic()).is_some() {}
            continue;
        }

        if c.is_alphabetic() {
            let mut word = String::from(c);
            while let Some(c) = chars.next_if(|c| c.is_alphabetic()) {
                word.push(c);
            }
            if word.chars().count() >= 3 && !KNOWN_NAMES.contains(&word.as_str()) {
                return true;
            }
        }
    }
    false
}
