//! The whole solution as a single `aligned` LaTeX block.

use rateq_compute::{approx::format_complex, root::Root, solve::SolveOutcome, surd::Surd};
use rateq_error::ErrorKind;
use rateq_parser::parser::fmt::Latex;
use rateq_solver::{analyze::SideCheck, AnalysisResult};
use super::{root_decimal, side_decimal};

/// Formats a decimal approximation for LaTeX.
fn decimal(text: &str) -> String {
    text.replace("*I", " i")
}

/// Escapes text for use inside `\text{}`.
fn text(s: &str) -> String {
    s.replace('\\', "\\textbackslash ")
        .replace('{', "\\{")
        .replace('}', "\\}")
        .replace('_', "\\_")
        .replace('^', "\\^{}")
        .replace('#', "\\#")
        .replace('%', "\\%")
        .replace('&', "\\&")
}

fn roots(roots: &[Root]) -> String {
    roots.iter().map(Root::latex).collect::<Vec<_>>().join(", ")
}

/// The chain `expression → substituted → value` for one side.
fn side_chain(side: &SideCheck, digits: usize) -> String {
    let value = match (&side.exact, &side.approx) {
        (Some(exact), _) => exact.latex(),
        (None, Some(approx)) => format!("\\approx {}", decimal(&format_complex(approx, digits))),
        (None, None) => String::from("\\text{undefined}"),
    };
    [side.expr.as_display().to_string(), side.substituted.as_display().to_string(), value]
        .join(" \\rightarrow ")
}

/// The approximation shown next to a side, or the side's exact value if it needs none.
fn side_approx(side: &SideCheck, digits: usize) -> String {
    match side_decimal(side, digits) {
        Some(approx) => decimal(&approx),
        None => side.exact.as_ref().map(Surd::latex).unwrap_or_default(),
    }
}

pub(super) fn render(result: &AnalysisResult) -> String {
    let var = result.variable.as_str();
    let digits = result.significant_digits;
    let mut rows = vec![format!("\\text{{Original equation: }} {}", result.equation.latex())];

    match (&result.lcd, &result.cleared) {
        (Some(lcd), Some(cleared)) if result.has_denominators() => {
            rows.push(format!("\\text{{LCD: }} {}", lcd.latex(var)));
            rows.push(format!("{} = {}", cleared.lhs.latex(var), cleared.rhs.latex(var)));
        },
        (Some(_), Some(_)) => {
            rows.push(String::from("\\text{LCD: } 1"));
            rows.push(result.equation.latex());
        },
        _ => rows.push(String::from("\\text{LCD: could not be found}")),
    }

    if let Some(cleared) = &result.cleared {
        rows.push(format!("{} = 0", cleared.polynomial.latex(var)));
    }

    match &result.outcome {
        Err(err) => rows.push(format!("\\text{{Solve: {}}}", text(&err.message()))),
        Ok(SolveOutcome::Evaluated(true)) => {
            rows.push(format!("\\text{{Every }} {} \\text{{ satisfies the cleared equation}}", var));
        },
        Ok(_) => {
            for root in &result.solutions.raw {
                rows.push(format!("{} = {}", var, root.latex()));
            }
        },
    }

    if !result.solutions.extraneous.is_empty() {
        rows.push(format!("\\text{{Extraneous: }} {} = {}", var, roots(&result.solutions.extraneous)));
    }

    if !result.excluded_values.is_empty() {
        rows.push(format!("\\text{{Restrictions: }} {} \\ne {}", var, roots(&result.excluded_values)));
    }

    if result.verification.is_empty() {
        rows.push(String::from("\\text{Check: No valid solutions to verify}"));
    }
    for record in &result.verification {
        let mut row = format!(
            "\\text{{Check }} {} = {}\\!:\\quad \\text{{Left side: }}{}\\quad \\text{{Right side: }}{}",
            var,
            record.root.latex(),
            side_chain(&record.lhs, digits),
            side_chain(&record.rhs, digits),
        );
        let needs_approx = side_decimal(&record.lhs, digits).is_some()
            || side_decimal(&record.rhs, digits).is_some();
        if needs_approx {
            row.push_str(&format!(
                " \\; (\\approx {} = {})",
                side_approx(&record.lhs, digits),
                side_approx(&record.rhs, digits),
            ));
        }
        row.push_str(if record.satisfies { " \\quad \\text{VALID ✅}" } else { " \\quad \\text{INVALID ❌}" });
        rows.push(row);
    }

    if !result.is_complete() {
        rows.push(String::from("\\text{Final solution(s): could not be determined}"));
    } else if result.holds_everywhere() {
        if result.excluded_values.is_empty() {
            rows.push(format!("\\text{{Final solution(s): every }} {}", var));
        } else {
            rows.push(format!(
                "\\text{{Final solution(s): every }} {} \\ne {}",
                var,
                roots(&result.excluded_values),
            ));
        }
    } else if result.solutions.valid.is_empty() {
        rows.push(String::from("\\text{Final solution(s): none}"));
    } else {
        let mut row = format!("\\text{{Final solution(s): }} {} = {}", var, roots(&result.solutions.valid));
        let approx = result.solutions.valid
            .iter()
            .filter_map(|root| root_decimal(root, digits))
            .map(|d| format!("{} \\approx {}", var, decimal(&d)))
            .collect::<Vec<_>>();
        if !approx.is_empty() {
            row.push_str(&format!(" \\quad ({})", approx.join("; ")));
        }
        rows.push(row);
    }

    format!("\\begin{{aligned}}{}\\end{{aligned}}", rows.join(" \\\\ "))
}
