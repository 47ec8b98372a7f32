//! Short labelled steps with no commentary.

use super::{list, root_decimal, side_decimal};
use rateq_compute::solve::SolveOutcome;
use rateq_error::ErrorKind;
use rateq_solver::{analyze::SideCheck, AnalysisResult};

fn side_trace(lines: &mut Vec<String>, label: &str, side: &SideCheck, digits: usize) {
    lines.push(format!("    {} side expression: {}", label, side.expr));
    lines.push(format!("      → Substitute: {}", side.substituted));
    match (&side.exact, &side.approx) {
        (Some(exact), _) => lines.push(format!("      → Simplify: {}", exact)),
        (None, None) => lines.push(String::from("      → Simplify: undefined")),
        (None, Some(_)) => (),
    }
    if let Some(decimal) = side_decimal(side, digits) {
        lines.push(format!("      → ≈ {}", decimal));
    }
}

pub(super) fn render(result: &AnalysisResult) -> String {
    let var = result.variable.as_str();
    let digits = result.significant_digits;
    let mut lines = vec![
        String::from("Step 1: Original equation"),
        format!("  {}", result.equation),
    ];

    match (&result.lcd, &result.cleared) {
        (Some(lcd), Some(cleared)) if result.has_denominators() => {
            lines.push(String::from("Step 2: Least common denominator"));
            lines.push(format!("  LCD = {}", lcd.display(var)));
            lines.push(String::from("  After clearing denominators:"));
            lines.push(format!("    {} = {}", cleared.lhs.display(var), cleared.rhs.display(var)));
        },
        (Some(_), Some(_)) => lines.push(String::from("Step 2: No denominators to clear (LCD = 1)")),
        _ => lines.push(String::from("Step 2: Least common denominator could not be found")),
    }

    if let Some(cleared) = &result.cleared {
        lines.push(String::from("Step 3: Polynomial form"));
        lines.push(format!("  {} = 0", cleared.polynomial.display(var)));
    }

    match &result.outcome {
        Err(err) => {
            lines.push(format!("Step 4: Solve for {}", var));
            lines.push(format!("  {}", err.message()));
        },
        Ok(SolveOutcome::Evaluated(true)) => {
            lines.push(format!("Step 4: Solve for {}", var));
            lines.push(format!("  Every value of {} satisfies the cleared equation", var));
        },
        Ok(_) if !result.solutions.raw.is_empty() => {
            lines.push(format!("Step 4: Solve for {}", var));
            for root in &result.solutions.raw {
                lines.push(format!("  {} = {}", var, root));
            }
        },
        Ok(_) => lines.push(String::from("Step 4: No solutions returned by solver")),
    }

    if !result.solutions.extraneous.is_empty() {
        lines.push(String::from("Remove extraneous values"));
        for root in &result.solutions.extraneous {
            lines.push(format!("  {} = {} (excluded)", var, root));
        }
    }

    if !result.excluded_values.is_empty() || result.restriction_error.is_some() {
        lines.push(String::from("Domain restrictions"));
        for value in &result.excluded_values {
            lines.push(format!("  {} ≠ {}", var, value));
        }
        if let Some(err) = &result.restriction_error {
            lines.push(format!("  Some restrictions could not be found: {}", err.message()));
        }
    }

    lines.push(String::from("Step 5: Verify solutions"));
    if result.verification.is_empty() {
        lines.push(String::from("  No valid solutions to verify"));
    }
    for record in &result.verification {
        lines.push(format!("  Substitute {} = {}", var, record.root));
        side_trace(&mut lines, "Left", &record.lhs, digits);
        side_trace(&mut lines, "Right", &record.rhs, digits);
        let verdict = if record.satisfies { "VALID ✅" } else { "INVALID ❌" };
        lines.push(format!("    Result: {}", verdict));
    }

    lines.push(String::from("Final solution"));
    if !result.is_complete() {
        lines.push(String::from("  Could not be determined"));
    } else if result.holds_everywhere() {
        if result.excluded_values.is_empty() {
            lines.push(format!("  Every value of {}", var));
        } else {
            lines.push(format!("  Every {} ≠ {}", var, list(&result.excluded_values)));
        }
    } else if result.solutions.valid.is_empty() {
        lines.push(String::from("  No valid solution"));
    }
    for root in &result.solutions.valid {
        match root_decimal(root, digits) {
            Some(decimal) => lines.push(format!("  {} = {}  (≈ {})", var, root, decimal)),
            None => lines.push(format!("  {} = {}", var, root)),
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rateq_solver::{solve_raw, Config};
    use super::*;

    fn concise(raw: &str) -> String {
        render(&solve_raw(raw, &Config::default()).unwrap())
    }

    #[test]
    fn two_denominators() {
        let expected = [
            "Step 1: Original equation",
            "  1/(x - 2) = 3/(x + 1)",
            "Step 2: Least common denominator",
            "  LCD = (x - 2)*(x + 1)",
            "  After clearing denominators:",
            "    x + 1 = 3*x - 6",
            "Step 3: Polynomial form",
            "  -2*x + 7 = 0",
            "Step 4: Solve for x",
            "  x = 7/2",
            "Domain restrictions",
            "  x ≠ 2",
            "  x ≠ -1",
            "Step 5: Verify solutions",
            "  Substitute x = 7/2",
            "    Left side expression: 1/(x - 2)",
            "      → Substitute: 1/((7/2) - 2)",
            "      → Simplify: 2/3",
            "      → ≈ 0.66666667",
            "    Right side expression: 3/(x + 1)",
            "      → Substitute: 3/((7/2) + 1)",
            "      → Simplify: 2/3",
            "      → ≈ 0.66666667",
            "    Result: VALID ✅",
            "Final solution",
            "  x = 7/2",
        ];
        assert_eq!(concise("1/(x-2) = 3/(x+1)"), expected.join("\n"));
    }

    #[test]
    fn no_denominators() {
        let text = concise("2*x + 1 = 5");
        assert!(text.contains("Step 2: No denominators to clear (LCD = 1)"));
        assert!(text.contains("  2*x - 4 = 0"));
        assert!(!text.contains("Domain restrictions"));
        // integer values have no decimal line
        assert!(!text.contains("→ ≈"));
        assert!(text.ends_with("Final solution\n  x = 2"));
    }

    #[test]
    fn extraneous_root() {
        let text = concise("x**2/(x-3) = 9/(x-3)");
        assert!(text.contains("Remove extraneous values\n  x = 3 (excluded)"));
        assert!(text.contains("Domain restrictions\n  x ≠ 3"));
        assert!(text.ends_with("Final solution\n  x = -3"));
    }

    #[test]
    fn nothing_to_verify() {
        let text = concise("1/(x-1) + 1/(x+1) = 2/(x**2-1)");
        assert!(text.contains("  No valid solutions to verify"));
        assert!(text.ends_with("  No valid solution"));
    }

    #[test]
    fn irrational_roots_get_decimals() {
        let text = concise("x = 3 - 1/x");
        assert!(text.contains("  x = 3/2 - sqrt(5)/2  (≈ 0.38196601)"));
        assert!(text.contains("  x = 3/2 + sqrt(5)/2  (≈ 2.6180340)"));
    }

    #[test]
    fn timeout() {
        let config = Config::default().time_budget(std::time::Duration::ZERO);
        let text = render(&solve_raw("1/(x-2) = 3/(x+1)", &config).unwrap());
        assert!(text.contains("Step 2: Least common denominator could not be found"));
        assert!(text.ends_with("Final solution\n  Could not be determined"));
    }
}
