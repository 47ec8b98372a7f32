//! A walkthrough in a teacher's voice.
//!
//! The prose around each step depends only on how many denominators and solutions there are,
//! never on the mathematics itself, which comes straight from the analysis.

use rateq_compute::{
    approx::format_complex,
    factor::Factored,
    poly::Poly,
    root::Root,
    solve::SolveOutcome,
};
use rateq_error::ErrorKind;
use rateq_parser::parser::ast::Expr;
use rateq_solver::{
    analyze::{Side, SideCheck, Term},
    AnalysisResult,
};
use rug::Rational;
use super::{as_factor, side_decimal};

/// Opens a quoted teacher's remark made of numbered points.
fn voice(lines: &mut Vec<String>, intro: &str, points: &[String]) {
    lines.push(String::from("**TEACHER'S VOICE:**"));
    lines.push(format!("\"{}", intro));
    for (i, point) in points.iter().enumerate() {
        let close = if i + 1 == points.len() { "\"" } else { "" };
        lines.push(format!("{}. {}{}", i + 1, point, close));
    }
    lines.push(String::new());
}

fn divider(lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push(String::from("---"));
}

/// Parenthesizes a negative number, for use as an operand.
fn operand(r: &Rational) -> String {
    if r.cmp0().is_lt() {
        format!("({})", r)
    } else {
        r.to_string()
    }
}

/// The value of a denominator at a root, and whether it is zero.
fn denominator_at(d: &Factored, root: &Root, digits: usize) -> (String, bool) {
    let d = d.expand();
    match root {
        Root::Exact(surd) => {
            let value = surd.eval(&d);
            (value.to_string(), value.is_zero())
        },
        Root::Approx { value, .. } => {
            let value = d.eval_complex(value);
            (format_complex(&value, digits), value.is_zero())
        },
    }
}

fn denominators_step(lines: &mut Vec<String>, result: &AnalysisResult) {
    let var = result.variable.as_str();
    let names = result.denominators.iter().map(|d| d.display(var)).collect::<Vec<_>>();
    let invisible = String::from("Any constant terms have an invisible denominator of 1");
    let repeated = result.denominators
        .iter()
        .any(|d| d.factors.iter().any(|(_, multiplicity)| *multiplicity > 1));
    let plural_note = String::from(if repeated {
        "Some of these are repeated factors, already written as powers"
    } else {
        "Since these are already simple, we don't need to factor them further"
    });

    lines.push(String::from("### **Step 1: Find and Factor All Denominators**"));
    let intro = "Let's look carefully at all bottom parts (denominators):";
    match names.as_slice() {
        [] => voice(lines, intro, &[
            format!("This equation has no fractions with {} in the denominator", var),
            String::from("All terms are either constants or polynomials"),
            String::from("We can solve this directly without clearing denominators"),
        ]),
        [only] => voice(lines, intro, &[
            format!("There is one denominator here, {}", only),
            if repeated {
                format!("{} is a repeated factor, already written as a power", only)
            } else {
                format!("Since {} is already simple, we don't need to factor it further", only)
            },
            invisible,
        ]),
        [a, b] => voice(lines, intro, &[
            format!("The denominators are built from two pieces, {} and {}", a, b),
            plural_note,
            invisible,
        ]),
        many => voice(lines, intro, &[
            format!("The denominators are built from {} different pieces", many.len()),
            format!("The pieces are: {}", many.join(", ")),
            plural_note,
            invisible,
        ]),
    }

    lines.push(String::from("```"));
    lines.push(String::from(
        "INSTRUCTION: First, list every denominator and factor it as far as it goes. Any value of \
        the variable that makes a denominator zero makes the equation undefined, so it can never \
        be a solution.",
    ));
    for name in &names {
        lines.push(format!("  {}  # Already in simplest form", name));
    }

    lines.push(String::from("INSTRUCTION: Values that would break the math."));
    if result.excluded_values.is_empty() && result.restriction_error.is_none() {
        lines.push(String::from("  None  # No values make any denominator zero."));
    }
    for value in &result.excluded_values {
        lines.push(format!("  {} = {}  # Never allowed, a denominator would be 0", var, value));
    }
    if let Some(err) = &result.restriction_error {
        lines.push(format!("  Some values could not be found: {}", err.message()));
    }

    match &result.lcd {
        Some(lcd) if result.has_denominators() => {
            lines.push(format!("• LCD: {}  # This is our magic cleaner for all fractions", lcd.display(var)));
        },
        Some(_) => lines.push(String::from("• LCD: 1  # No denominators to clear")),
        None => lines.push(String::from("• LCD: could not be found in time")),
    }
    lines.push(String::from("```"));
    divider(lines);
}

/// Shows one term being multiplied by the LCD.
fn term_walkthrough(lines: &mut Vec<String>, term: &Term, lcd: &str, var: &str) {
    let written = match &term.expr {
        Expr::Unary(_) => format!("({})", term.expr),
        expr => expr.to_string(),
    };
    lines.push(format!("  {} * {}", lcd, written));
    if term.value.den().is_constant() {
        lines.push(format!("    = {}  # Distribute", term.cleared.display(var)));
    } else {
        lines.push(format!("    = {}  # After cancellation", term.cleared.display(var)));
    }
}

fn clearing_step(lines: &mut Vec<String>, result: &AnalysisResult) {
    let var = result.variable.as_str();
    lines.push(String::from("### **Step 2: Multiply Both Sides by LCD**"));

    let lcd = result.lcd.as_ref().filter(|_| result.has_denominators());
    match lcd {
        Some(lcd) => voice(lines, &format!("We'll multiply EVERY term by {} to clean up:", lcd.display(var)), &[
            String::from("For fractions: The bottom cancels with our LCD"),
            String::from("For whole numbers: We distribute like multiplication"),
            String::from("Watch how each part transforms!"),
        ]),
        None => voice(lines, "Since there are no denominators to clear:", &[
            String::from("We can solve this equation directly"),
            String::from("No multiplication by LCD is needed"),
            String::from("Let's proceed to solving!"),
        ]),
    }

    lines.push(String::from("```"));
    lines.push(String::from(
        "INSTRUCTION: To make this easier to work with, we'll multiply every single term by our \
        least common denominator (LCD). This will clear all the fractions. Watch carefully how \
        each fraction simplifies when we do this multiplication.",
    ));
    match (lcd, &result.cleared) {
        (Some(lcd), Some(cleared)) => {
            let factor = as_factor(lcd, var);
            for (side, heading) in [(Side::Left, "• Left Side Transformation:"), (Side::Right, "• Right Side Transformation:")] {
                lines.push(String::from(heading));
                for term in result.terms.iter().filter(|term| term.side == side) {
                    term_walkthrough(lines, term, &factor, var);
                }
            }
            lines.push(String::from("• New Clean Equation:"));
            lines.push(format!(
                "  {} = {}  # All fractions gone!",
                cleared.lhs.display(var),
                cleared.rhs.display(var),
            ));
        },
        (None, Some(_)) => {
            lines.push(String::from("• No denominators to clear - equation is already in polynomial form"));
        },
        (_, None) => lines.push(String::from("• The denominators could not be cleared in time")),
    }
    lines.push(String::from("```"));
    divider(lines);
}

/// Shows the roots of a linear polynomial being found.
fn solve_linear(lines: &mut Vec<String>, p: &Poly, roots: &[Root], var: &str, digits: usize) {
    let a = p.coeff(1);
    let b = Rational::from(-p.coeff(0));
    lines.push(String::from("• Move terms:"));
    lines.push(format!("  {} = {}*{}", b, a, var));
    lines.push(format!("• Divide both sides by {} to isolate {}:", a, var));
    lines.push(format!("  {}/{} = {}", operand(&b), operand(&a), var));
    lines.push(String::from("• Final solution:"));
    for root in roots {
        lines.push(format!("  {} = {}  # Exact form", var, root));
        lines.push(format!("  {} ≈ {}  # Decimal form", var, format_complex(&root.approx(), digits)));
    }
}

/// Shows the roots of a quadratic polynomial being found with the quadratic formula.
fn solve_quadratic(lines: &mut Vec<String>, p: &Poly, roots: &[Root], var: &str, digits: usize) {
    let (a, b, c) = (p.coeff(2), p.coeff(1), p.coeff(0));
    let discriminant = Rational::from(&b * &b) - Rational::from(4 * Rational::from(&a * &c));
    lines.push(String::from("This is a quadratic equation. Use the quadratic formula:"));
    lines.push(format!("Standard form: a{0}² + b{0} + c = 0", var));
    lines.push(format!("→ {} = 0", p.display(var)));
    lines.push(format!("Quadratic formula: {} = [-b ± √(b² - 4ac)] / (2a)", var));
    lines.push(format!(
        "Discriminant D = {}² - 4*{}*{} = {}",
        operand(&b),
        operand(&a),
        operand(&c),
        discriminant,
    ));

    let subscripts = ["₁", "₂"];
    for (root, subscript) in roots.iter().zip(subscripts) {
        lines.push(format!("{}{} = {}", var, subscript, root));
    }
    for (root, subscript) in roots.iter().zip(subscripts) {
        lines.push(format!("{}{} ≈ {}", var, subscript, format_complex(&root.approx(), digits)));
    }
}

fn solving_step(lines: &mut Vec<String>, result: &AnalysisResult) {
    let var = result.variable.as_str();
    let digits = result.significant_digits;
    lines.push(String::from("### **Step 3: Solve the Simplified Equation**"));

    let degree = result.cleared.as_ref().map(|cleared| cleared.polynomial.degree());
    match degree {
        Some(1) => voice(lines, "Now we solve like a regular linear algebra problem:", &[
            String::from("Combine like terms on both sides"),
            format!("Move {} terms to one side, constants to the other", var),
            format!("Divide by the coefficient of {}", var),
        ]),
        Some(2) => voice(lines, "Now we solve like a regular quadratic algebra problem:", &[
            format!("Combine like terms to get standard form a{}² + b{} + c = 0", var, var),
            String::from("Use the quadratic formula or factoring"),
            String::from("Check for real solutions"),
        ]),
        Some(_) => voice(lines, "Now we solve this polynomial equation:", &[
            String::from("Combine like terms to get standard form"),
            String::from("Use appropriate solving methods"),
            String::from("Check for valid solutions"),
        ]),
        None => voice(lines, "Now we solve this equation:", &[
            String::from("Combine like terms on both sides"),
            String::from("Isolate the variable"),
            String::from("Check for valid solutions"),
        ]),
    }

    lines.push(String::from("```"));
    lines.push(String::from(
        "INSTRUCTION: Now that we've eliminated the fractions, we have a cleaner equation to work \
        with. Gather every term on one side so that the other side is zero, then find the values \
        that make it true.",
    ));

    let Some(cleared) = &result.cleared else {
        if let Some(err) = result.solve_error() {
            lines.push(format!("• {}", err.message()));
        }
        lines.push(String::from("```"));
        divider(lines);
        return;
    };

    lines.push(String::from("• Combine like terms:"));
    lines.push(format!("  {} = {}", cleared.lhs.display(var), cleared.rhs.display(var)));
    lines.push(format!("  {} = 0", cleared.polynomial.display(var)));

    let raw = &result.solutions.raw;
    match (&result.outcome, degree) {
        (Err(err), _) => lines.push(format!("• {}", err.message())),
        (Ok(SolveOutcome::Evaluated(true)), _) => {
            lines.push(format!("• Every value of {} makes this true", var));
        },
        (Ok(SolveOutcome::Evaluated(false)), _) => {
            lines.push(String::from("• This is never true, so there are no solutions"));
        },
        (Ok(_), Some(1)) => solve_linear(lines, &cleared.polynomial, raw, var, digits),
        (Ok(_), Some(2)) => solve_quadratic(lines, &cleared.polynomial, raw, var, digits),
        (Ok(_), _) => {
            lines.push(String::from("• Solutions:"));
            if raw.is_empty() {
                lines.push(String::from("  No solutions"));
            }
            for root in raw {
                lines.push(format!("  {} = {}", var, root));
            }
        },
    }
    lines.push(String::from("```"));
    divider(lines);
}

fn side_calculation(lines: &mut Vec<String>, label: &str, side: &SideCheck, digits: usize) {
    lines.push(format!("• {} Side Calculation:", label));
    match (&side.exact, &side.approx) {
        (Some(exact), _) => {
            lines.push(format!("  {} = {} = {}  # Exact", side.expr, side.substituted, exact));
        },
        (None, Some(_)) => lines.push(format!("  {} = {}", side.expr, side.substituted)),
        (None, None) => lines.push(String::from("  Error: Division by zero or undefined result.")),
    }
    if let Some(decimal) = side_decimal(side, digits) {
        lines.push(format!("  {}  # Decimal", decimal));
    }
}

fn verification_step(lines: &mut Vec<String>, result: &AnalysisResult) {
    let var = result.variable.as_str();
    let digits = result.significant_digits;
    lines.push(String::from("### **Step 4: Verify the Solution**"));

    match result.solutions.raw.as_slice() {
        [only] => voice(lines, &format!("Let's test {} = {} in the original equation:", var, only), &[
            String::from("Calculate left side by substituting the value"),
            String::from("Calculate right side by substituting the value"),
            String::from("Both sides should give the same result"),
        ]),
        [] => voice(lines, "Let's verify our work:", &[
            String::from("Check if any solutions were found"),
            String::from("Verify that denominators are not zero"),
            String::from("Confirm the mathematical validity"),
        ]),
        _ => voice(lines, "Let's test each solution in the original equation:", &[
            String::from("Calculate left side for each solution"),
            String::from("Calculate right side for each solution"),
            String::from("Both sides should give the same result for valid solutions"),
        ]),
    }

    lines.push(String::from("```"));
    lines.push(String::from(
        "INSTRUCTION: It's crucial to verify our answer by plugging it back into the original \
        equation. This ensures our solution doesn't make any denominators zero and that both \
        sides of the equation balance correctly.",
    ));

    for root in &result.solutions.raw {
        lines.push(format!("• Check {} = {}:", var, root));
        if result.has_denominators() {
            lines.push(String::from("• Check denominator safety:"));
            for d in &result.denominators {
                let name = d.display(var);
                match denominator_at(d, root, digits) {
                    (_, true) => lines.push(format!("  {} = 0  # Bad!", name)),
                    (value, false) => lines.push(format!("  {} = {} ≠ 0  # Good!", name, value)),
                }
            }
        }

        match result.verification.iter().find(|record| &record.root == root) {
            Some(record) => {
                side_calculation(lines, "Left", &record.lhs, digits);
                side_calculation(lines, "Right", &record.rhs, digits);
                if record.satisfies {
                    lines.push(String::from("  ✓ Both sides match perfectly!"));
                } else {
                    lines.push(String::from("  ✗ Sides don't match"));
                }
            },
            None => lines.push(format!("  ✗ {} = {} is extraneous, so we throw it out", var, root)),
        }
    }
    lines.push(String::from("```"));
    divider(lines);
}

pub(super) fn render(result: &AnalysisResult) -> String {
    let var = result.variable.as_str();
    let mut lines = vec![
        String::from("**Step-by-Step Solution with Teacher-Level Explanations:**"),
        String::new(),
        String::from("---"),
        String::from("### **Raw Equation:**"),
        result.equation.to_string(),
        format!("*(We're solving for {} in this fraction equation)*", var),
    ];
    divider(&mut lines);

    denominators_step(&mut lines, result);
    clearing_step(&mut lines, result);
    solving_step(&mut lines, result);
    verification_step(&mut lines, result);

    lines.push(String::from("**Final Answer:**"));
    let valid = result.verification
        .iter()
        .filter(|record| record.satisfies)
        .collect::<Vec<_>>();
    if let Some(err) = result.solve_error() {
        lines.push(format!("The equation could not be solved: {}", err.message()));
    } else if valid.is_empty() {
        lines.push(String::from("No valid solution exists."));
    } else {
        for record in valid {
            lines.push(format!("{} = {}", var, record.root));
        }
        lines.push(String::from("*(The solution checks out mathematically!)*"));
    }
    divider(&mut lines);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use rateq_solver::{solve_raw, Config};
    use super::*;

    fn narrated(raw: &str) -> String {
        render(&solve_raw(raw, &Config::default()).unwrap())
    }

    #[test]
    fn sections_in_order() {
        let text = narrated("1/(x-2) = 3/(x+1)");
        let headings = [
            "### **Raw Equation:**",
            "### **Step 1: Find and Factor All Denominators**",
            "### **Step 2: Multiply Both Sides by LCD**",
            "### **Step 3: Solve the Simplified Equation**",
            "### **Step 4: Verify the Solution**",
            "**Final Answer:**",
        ];
        let positions = headings.iter().map(|h| text.find(h).unwrap()).collect::<Vec<_>>();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prose_follows_denominator_count() {
        assert!(narrated("2*x + 1 = 5").contains("1. This equation has no fractions with x in the denominator"));
        assert!(narrated("1/(x-2) = 3").contains("1. There is one denominator here, x - 2"));
        assert!(narrated("1/(x-2) = 3/(x+1)")
            .contains("1. The denominators are built from two pieces, x - 2 and x + 1"));
        assert!(narrated("1/x + 1/(x-1) = 1/(x+1)")
            .contains("1. The denominators are built from 3 different pieces"));
    }

    #[test]
    fn repeated_factors_are_not_called_simple() {
        let text = narrated("1/x**2 = 4");
        assert!(text.contains("is a repeated factor, already written as a power"));
        assert!(!text.contains("already simple"));

        let text = narrated("1/(x-1)**2 = 1/(x+1)");
        assert!(text.contains("Some of these are repeated factors, already written as powers"));
        assert!(!text.contains("already simple"));

        assert!(narrated("1/(x-2) = 3").contains("Since x - 2 is already simple"));
    }

    #[test]
    fn walks_through_each_term() {
        let text = narrated("1/(x-2) = 3/(x+1)");
        assert!(text.contains("  (x - 2)*(x + 1) * 1/(x - 2)\n    = x + 1  # After cancellation"));
        assert!(text.contains("  (x - 2)*(x + 1) * 3/(x + 1)\n    = 3*x - 6  # After cancellation"));
        assert!(text.contains("  x + 1 = 3*x - 6  # All fractions gone!"));
    }

    #[test]
    fn lone_lcd_is_parenthesized() {
        let text = narrated("1/(x-2) + 1 = 3");
        assert!(text.contains("  (x - 2) * 1\n    = x - 2  # Distribute"));
    }

    #[test]
    fn linear_solving() {
        let text = narrated("1/(x-2) = 3/(x+1)");
        assert!(text.contains("• Move terms:\n  -7 = -2*x"));
        assert!(text.contains("  x = 7/2  # Exact form\n  x ≈ 3.5000000  # Decimal form"));
    }

    #[test]
    fn quadratic_solving() {
        let text = narrated("x = 3 - 1/x");
        assert!(text.contains("Discriminant D = (-3)² - 4*1*1 = 5"));
        assert!(text.contains("x₁ = 3/2 - sqrt(5)/2"));
    }

    #[test]
    fn extraneous_roots_fail_the_safety_check() {
        let text = narrated("x**2/(x-3) = 9/(x-3)");
        assert!(text.contains("  x - 3 = -6 ≠ 0  # Good!"));
        assert!(text.contains("  x - 3 = 0  # Bad!"));
        assert!(text.contains("  ✗ x = 3 is extraneous, so we throw it out"));
        assert!(text.contains("**Final Answer:**\nx = -3\n*(The solution checks out mathematically!)*"));
    }

    #[test]
    fn no_valid_solution() {
        let text = narrated("1/(x-1) + 1/(x+1) = 2/(x**2-1)");
        assert!(text.contains("No valid solution exists."));
    }
}
