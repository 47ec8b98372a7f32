use pretty_assertions::assert_eq;
use rateq_didactic::{check, Grade, LineKind};
use rateq_solver::Config;

const NO_WORK: [&str; 0] = [];

#[test]
fn answer_without_denominators() {
    let assessment = check("2*x + 1 = 5", "x = 2", &NO_WORK, &Config::default()).unwrap();
    assert!(assessment.answer_correct());
    assert!(assessment.remedial_steps.is_empty());
    assert!(!assessment.feedback.iter().any(|note| note.contains("domain restrictions")));
    assert!(!assessment.feedback.iter().any(|note| note.contains("denominator")));
}

#[test]
fn extraneous_answer_is_rejected() {
    let assessment = check("x**2/(x-3) = 9/(x-3)", "x = 3", &NO_WORK, &Config::default()).unwrap();
    assert_eq!(assessment.grade, Grade::Incorrect);
    assert!(assessment.feedback.iter().any(|note| note.starts_with("x = 3 makes a denominator zero")));
    assert_eq!(
        assessment.remedial_steps.last().map(String::as_str),
        Some("   x = 3 is extraneous (a denominator is zero there)"),
    );

    let assessment = check("x**2/(x-3) = 9/(x-3)", "x = -3", &NO_WORK, &Config::default()).unwrap();
    assert_eq!(assessment.grade, Grade::Correct);
}

#[test]
fn both_roots_required_values_only_checked() {
    let config = Config::default();
    let both = check("x = 3 - 1/x", "x = 3/2 + sqrt(5)/2, x = 3/2 - sqrt(5)/2", &NO_WORK, &config).unwrap();
    assert_eq!(both.grade, Grade::Correct);

    let one_wrong = check("x = 3 - 1/x", "x = 3/2 + sqrt(5)/2 or x = 1", &NO_WORK, &config).unwrap();
    assert_eq!(one_wrong.grade, Grade::Incorrect);
}

#[test]
fn full_written_solution() {
    let work = [
        "Denominators: x-2 and x+1, so x ≠ 2 and x ≠ -1",
        "Multiply both sides by the LCD (x-2)(x+1)",
        "x + 1 = 3(x - 2)",
        "x + 1 = 3x - 6",
        "7 = 2x",
        "x = 7/2",
        "Check: LHS = 1/(7/2 - 2) = 2/3, RHS = 3/(7/2 + 1) = 2/3",
    ];
    let assessment = check("1/(x-2) = 3/(x+1)", "x = 7/2", &work, &Config::default()).unwrap();

    assert!(assessment.answer_correct());
    assert_eq!(assessment.lines.len(), work.len());
    assert_eq!(assessment.lines[2].normalized, "x + 1 = 3*(x - 2)");
    assert_eq!(assessment.lines[0].kind, LineKind::Prose);
    assert_eq!(assessment.lines[3].kind, LineKind::Equation);
    assert_eq!(assessment.verification.score, 100);
    assert_eq!(assessment.feedback, vec![
        "Great job! The final answer is correct.",
        "Good verification: the solution was substituted back into the original equation.",
    ]);
}

#[test]
fn answer_read_from_work() {
    let work = ["x + 1 = 3x - 6", "so x = 7/2"];
    let assessment = check("1/(x-2) = 3/(x+1)", "", &work, &Config::default()).unwrap();
    assert_eq!(assessment.student_values.len(), 1);
    assert_eq!(assessment.student_values[0].expression, "7/2");
    assert_eq!(assessment.grade, Grade::Correct);
}

#[test]
fn prose_and_equations() {
    let work = ["first find the restrictions", "x-2 != 0", "done"];
    let assessment = check("1/(x-2) = 3/(x+1)", "x = 7/2", &work, &Config::default()).unwrap();
    assert_eq!(assessment.equations().count(), 1);
    assert_eq!(assessment.notes().count(), 2);
    assert!(assessment.concepts.mentions_restrictions);
}

#[test]
fn other_variable() {
    let config = Config::default().variable("t");
    let assessment = check("1/(t-2) = 3/(t+1)", "t = 7/2", &NO_WORK, &config).unwrap();
    assert!(assessment.answer_correct());
}
