//! Advice for the student and the model derivation.

use super::{answer::StudentValue, concepts::ConceptFlags, Grade};
use crate::explain::{as_factor, list, side_decimal};
use rateq_compute::approx::within;
use rateq_error::ErrorKind;
use rateq_solver::{analyze::SideCheck, AnalysisResult};

#[cfg(feature = "serde")]
use serde::Serialize;

/// How thoroughly the student checked their answer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct VerificationReport {
    /// The work talks about checking the answer.
    pub mentions_verification: bool,

    /// The work substitutes a value back in.
    pub shows_verification_work: bool,

    /// 100 if the work shows a substitution, 50 if it only talks about checking, 0 otherwise.
    pub score: u8,

    /// Advice about checking.
    pub feedback: Vec<String>,

    /// The substitution of each valid root into the original equation.
    pub steps: Vec<String>,
}

fn side_steps(steps: &mut Vec<String>, label: &str, side: &SideCheck, digits: usize) {
    steps.push(format!("{} side:", label));
    steps.push(format!("  {} → {}", side.expr, side.substituted));
    match &side.exact {
        Some(exact) => steps.push(format!("  → {}", exact)),
        None if side.approx.is_none() => steps.push(String::from("  → undefined")),
        None => (),
    }
    if let Some(decimal) = side_decimal(side, digits) {
        steps.push(format!("  → ≈ {}", decimal));
    }
}

/// Builds the verification report from the detected concepts and the analysis's own check of
/// each valid root.
pub fn verification_report(concepts: &ConceptFlags, analysis: &AnalysisResult) -> VerificationReport {
    let var = analysis.variable.as_str();
    let mentions = concepts.mentions_verification || concepts.shows_verification_work;

    let (score, mut feedback) = if concepts.shows_verification_work {
        (100, vec![String::from("Good verification: the solution was substituted back into the original equation.")])
    } else if mentions {
        (50, vec![String::from("The student mentions checking the answer; ask them to show the substitution into the original equation.")])
    } else {
        (0, vec![String::from("Remind the student to verify each solution by substituting it into the original equation.")])
    };
    if !concepts.shows_verification_work && !analysis.solutions.extraneous.is_empty() {
        feedback.push(format!(
            "Checking matters here: {} = {} makes a denominator zero and must be rejected.",
            var,
            list(&analysis.solutions.extraneous),
        ));
    }

    let mut steps = Vec::new();
    for record in &analysis.verification {
        steps.push(format!("Check {} = {}:", var, record.root));
        side_steps(&mut steps, "Left", &record.lhs, analysis.significant_digits);
        side_steps(&mut steps, "Right", &record.rhs, analysis.significant_digits);
        steps.push(String::from(if record.satisfies { "VALID ✅" } else { "INVALID ❌" }));
    }

    VerificationReport {
        mentions_verification: mentions,
        shows_verification_work: concepts.shows_verification_work,
        score,
        feedback,
        steps,
    }
}

/// Builds the advice for the student, in a fixed order with no repeats.
pub fn feedback(
    grade: Grade,
    values: &[StudentValue],
    analysis: &AnalysisResult,
    concepts: &ConceptFlags,
    verification: &VerificationReport,
    has_lines: bool,
    tolerance: f64,
) -> Vec<String> {
    let var = analysis.variable.as_str();
    let mut notes = Vec::new();

    notes.push(match grade {
        Grade::Correct => String::from("Great job! The final answer is correct."),
        Grade::Incorrect => String::from("Student answer is incorrect; review the guided steps below."),
        Grade::NoAnswer => format!("No final answer could be read; ask the student to state the value of {}.", var),
        Grade::CannotGrade => match analysis.solve_error() {
            Some(err) => format!("The answer could not be graded: {}", err.message()),
            None => String::from("The answer could not be graded."),
        },
    });

    for root in &analysis.solutions.extraneous {
        if values.iter().any(|value| within(&value.value, &root.approx(), tolerance)) {
            notes.push(format!(
                "{} = {} makes a denominator zero, so it is an extraneous solution and must be rejected.",
                var,
                root,
            ));
        }
    }

    if analysis.has_denominators() {
        if !concepts.mentions_denominators {
            notes.push(String::from("Remind the student to list each denominator explicitly before clearing fractions."));
        }
        if !analysis.excluded_values.is_empty() && !concepts.mentions_restrictions {
            notes.push(String::from("Ask the student to state the domain restrictions (values that make denominators zero)."));
        }
        if !concepts.mentions_lcd {
            notes.push(String::from("Encourage the student to indicate that they are multiplying by the LCD and why that step is valid."));
        }
        if !concepts.shows_simplified_equation {
            notes.push(String::from("Prompt the student to display the simplified equation after clearing denominators."));
        }
    }

    if !has_lines {
        notes.push(String::from("No written work detected - request the complete solution steps in addition to the final answer."));
    }

    notes.extend(verification.feedback.iter().cloned());

    let mut seen = Vec::with_capacity(notes.len());
    for note in notes {
        if !seen.contains(&note) {
            seen.push(note);
        }
    }
    seen
}

/// The model derivation of the equation's solutions, drawn from the analysis.
pub fn remedial_steps(analysis: &AnalysisResult) -> Vec<String> {
    let var = analysis.variable.as_str();
    let mut steps = vec![
        String::from("📝 Step 1: Original equation"),
        format!("   {}", analysis.equation),
        String::from("📝 Step 2: Restrictions"),
    ];

    if !analysis.excluded_values.is_empty() {
        steps.push(format!("   {} ≠ {}", var, list(&analysis.excluded_values)));
    } else if analysis.has_denominators() {
        steps.push(String::from("   Could not be determined"));
    } else {
        steps.push(String::from("   None (no variable denominators)"));
    }

    match &analysis.lcd {
        Some(lcd) if analysis.has_denominators() => {
            let factor = as_factor(lcd, var);
            steps.push(String::from("📝 Step 3: Multiply both sides by LCD"));
            steps.push(format!("   LCD = {}", lcd.display(var)));
            steps.push(format!(
                "   {} × ({}) = {} × ({})",
                factor,
                analysis.equation.lhs(),
                factor,
                analysis.equation.rhs(),
            ));
        },
        _ => steps.push(String::from("📝 Step 3: No denominators to clear")),
    }

    if let Some(cleared) = &analysis.cleared {
        let (lhs, rhs) = (cleared.lhs.display(var), cleared.rhs.display(var));
        steps.push(String::from("📝 Step 4: Simplified equation"));
        steps.push(format!("   {} = {}", lhs, rhs));
        steps.push(format!("📝 Step 5: Solve for {}", var));
        steps.push(format!("   {} - ({}) = 0", lhs, rhs));
        steps.push(format!("   {} = 0", cleared.polynomial.display(var)));
    }

    if let Some(err) = analysis.solve_error() {
        steps.push(format!("   {}", err.message()));
        return steps;
    }

    steps.push(String::from("📝 Step 6: Solutions"));
    if analysis.holds_everywhere() {
        if analysis.excluded_values.is_empty() {
            steps.push(format!("   Every value of {}", var));
        } else {
            steps.push(format!("   Every {} ≠ {}", var, list(&analysis.excluded_values)));
        }
    } else if analysis.solutions.valid.is_empty() {
        steps.push(String::from("   No valid solution"));
    } else {
        steps.push(format!("   {} = {}", var, list(&analysis.solutions.valid)));
    }
    for root in &analysis.solutions.extraneous {
        steps.push(format!("   {} = {} is extraneous (a denominator is zero there)", var, root));
    }

    steps
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rateq_solver::{solve_raw, Config};
    use super::*;

    fn analysis(raw: &str) -> AnalysisResult {
        solve_raw(raw, &Config::default()).unwrap()
    }

    #[test]
    fn verification_scores() {
        let analysis = analysis("1/(x-2) = 3/(x+1)");
        let none = verification_report(&ConceptFlags::default(), &analysis);
        assert_eq!(none.score, 0);

        let talk = ConceptFlags { mentions_verification: true, ..Default::default() };
        assert_eq!(verification_report(&talk, &analysis).score, 50);

        let work = ConceptFlags { shows_verification_work: true, ..Default::default() };
        let report = verification_report(&work, &analysis);
        assert_eq!(report.score, 100);
        assert!(report.mentions_verification);
    }

    #[test]
    fn verification_steps() {
        let report = verification_report(&ConceptFlags::default(), &analysis("1/(x-2) = 3/(x+1)"));
        assert_eq!(report.steps, vec![
            "Check x = 7/2:",
            "Left side:",
            "  1/(x - 2) → 1/((7/2) - 2)",
            "  → 2/3",
            "  → ≈ 0.66666667",
            "Right side:",
            "  3/(x + 1) → 3/((7/2) + 1)",
            "  → 2/3",
            "  → ≈ 0.66666667",
            "VALID ✅",
        ]);
    }

    #[test]
    fn extraneous_roots_make_checking_matter() {
        let report = verification_report(&ConceptFlags::default(), &analysis("x**2/(x-3) = 9/(x-3)"));
        assert!(report.feedback.iter().any(|note| note.contains("x = 3 makes a denominator zero")));
    }

    #[test]
    fn no_denominators_no_method_reminders() {
        let analysis = analysis("2*x + 1 = 5");
        let concepts = ConceptFlags::default();
        let report = verification_report(&concepts, &analysis);
        let notes = feedback(Grade::Correct, &[], &analysis, &concepts, &report, false, 1e-8);
        assert_eq!(notes, vec![
            "Great job! The final answer is correct.",
            "No written work detected - request the complete solution steps in addition to the final answer.",
            "Remind the student to verify each solution by substituting it into the original equation.",
        ]);
    }

    #[test]
    fn method_reminders_in_order() {
        let analysis = analysis("1/(x-2) = 3/(x+1)");
        let concepts = ConceptFlags::default();
        let report = verification_report(&concepts, &analysis);
        let notes = feedback(Grade::Incorrect, &[], &analysis, &concepts, &report, true, 1e-8);
        assert_eq!(notes, vec![
            "Student answer is incorrect; review the guided steps below.",
            "Remind the student to list each denominator explicitly before clearing fractions.",
            "Ask the student to state the domain restrictions (values that make denominators zero).",
            "Encourage the student to indicate that they are multiplying by the LCD and why that step is valid.",
            "Prompt the student to display the simplified equation after clearing denominators.",
            "Remind the student to verify each solution by substituting it into the original equation.",
        ]);
    }

    #[test]
    fn remedial_derivation() {
        assert_eq!(remedial_steps(&analysis("x**2/(x-3) = 9/(x-3)")), vec![
            "📝 Step 1: Original equation",
            "   x**2/(x - 3) = 9/(x - 3)",
            "📝 Step 2: Restrictions",
            "   x ≠ 3",
            "📝 Step 3: Multiply both sides by LCD",
            "   LCD = x - 3",
            "   (x - 3) × (x**2/(x - 3)) = (x - 3) × (9/(x - 3))",
            "📝 Step 4: Simplified equation",
            "   x**2 = 9",
            "📝 Step 5: Solve for x",
            "   x**2 - (9) = 0",
            "   x**2 - 9 = 0",
            "📝 Step 6: Solutions",
            "   x = -3",
            "   x = 3 is extraneous (a denominator is zero there)",
        ]);
    }

    #[test]
    fn remedial_without_denominators() {
        let steps = remedial_steps(&analysis("2*x + 1 = 5"));
        assert_eq!(steps[3], "   None (no variable denominators)");
        assert_eq!(steps[4], "📝 Step 3: No denominators to clear");
        assert_eq!(steps.last().map(String::as_str), Some("   x = 2"));
    }
}
