//! Grading a student's solution of a rational equation.
//!
//! [`check`] solves the instructor's equation, reads the student's declared answer and written
//! work, and reports whether the answer is right, which parts of the method the work shows, and
//! what to tell the student. When the answer is wrong, it also lays out the model derivation.

mod answer;
mod concepts;
mod feedback;
mod lines;

pub use answer::StudentValue;
pub use concepts::ConceptFlags;
pub use feedback::VerificationReport;
pub use lines::{LineKind, StudentLine};

use rateq_compute::approx::within;
use rateq_solver::{solve_raw, AnalysisResult, Config, PipelineError};
use std::{fmt, io};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Serialize, Serializer};

/// How a student's answer compares to the equation's solutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Grade {
    /// Every value the student gave is a valid solution.
    Correct,

    /// Some value the student gave is not a valid solution.
    Incorrect,

    /// No value could be read from the student's answer or work.
    NoAnswer,

    /// The equation could not be solved, so the answer cannot be judged either way.
    CannotGrade,
}

/// The instructor's equation cannot be checked against.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckerError(pub PipelineError);

impl CheckerError {
    /// The user-facing message.
    pub fn message(&self) -> String {
        format!("Cannot check answers against this equation: {}", self.0.message())
    }

    /// Reports the error to stderr, highlighting the offending part of the equation.
    pub fn report_to_stderr(self, src_id: &str, equation: &str) -> io::Result<()> {
        self.0.report_to_stderr(src_id, equation)
    }
}

impl From<PipelineError> for CheckerError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

impl fmt::Display for CheckerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CheckerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

#[cfg(feature = "serde")]
impl Serialize for CheckerError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// The assessment of a student's solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// The analysis of the instructor's equation the student is graded against.
    pub analysis: AnalysisResult,

    /// The student's declared answer, trimmed.
    pub student_answer: String,

    /// The student's non-blank lines of work, in order.
    pub lines: Vec<StudentLine>,

    /// The values read from the student's answer, or failing that, from their work. Answers with
    /// `±` give two values.
    pub student_values: Vec<StudentValue>,

    /// How the answer compares to the valid solutions.
    pub grade: Grade,

    /// Which parts of the method the student's work shows.
    pub concepts: ConceptFlags,

    /// How thoroughly the student checked their answer.
    pub verification: VerificationReport,

    /// Advice for the student, in a fixed order with no repeats.
    pub feedback: Vec<String>,

    /// The model derivation, given when the answer is not correct.
    pub remedial_steps: Vec<String>,
}

impl Assessment {
    /// Returns true if the student's answer is correct.
    pub fn answer_correct(&self) -> bool {
        self.grade == Grade::Correct
    }

    /// The normalized lines that read as mathematics.
    pub fn equations(&self) -> impl Iterator<Item = &str> {
        self.lines_of(LineKind::Equation)
    }

    /// The normalized lines that read as prose.
    pub fn notes(&self) -> impl Iterator<Item = &str> {
        self.lines_of(LineKind::Prose)
    }

    fn lines_of(&self, kind: LineKind) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(move |line| line.kind == kind)
            .map(|line| line.normalized.as_str())
    }
}

#[cfg(feature = "serde")]
impl Serialize for Assessment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Assessment", 12)?;
        state.serialize_field("analysis", &self.analysis)?;
        state.serialize_field("student_answer", &self.student_answer)?;
        state.serialize_field("normalized_lines", &self.lines.iter().map(|l| &l.normalized).collect::<Vec<_>>())?;
        state.serialize_field("equations", &self.equations().collect::<Vec<_>>())?;
        state.serialize_field("notes", &self.notes().collect::<Vec<_>>())?;
        state.serialize_field("student_values", &self.student_values)?;
        state.serialize_field("grade", &self.grade)?;
        state.serialize_field("answer_correct", &self.answer_correct())?;
        state.serialize_field("concepts", &self.concepts)?;
        state.serialize_field("verification", &self.verification)?;
        state.serialize_field("feedback", &self.feedback)?;
        state.serialize_field("remedial_steps", &self.remedial_steps)?;
        state.end()
    }
}

/// Compares the student's values to the equation's solutions.
fn grade(analysis: &AnalysisResult, values: &[StudentValue], tolerance: f64) -> Grade {
    if !analysis.is_complete() {
        return Grade::CannotGrade;
    }
    if values.is_empty() {
        return Grade::NoAnswer;
    }

    let solves = |value: &StudentValue| {
        if analysis.holds_everywhere() {
            !analysis.excluded_values.iter().any(|root| within(&value.value, &root.approx(), tolerance))
        } else {
            analysis.solutions.valid.iter().any(|root| within(&value.value, &root.approx(), tolerance))
        }
    };
    if values.iter().all(solves) {
        Grade::Correct
    } else {
        Grade::Incorrect
    }
}

/// Grades a student's solution of `equation`.
///
/// `student_answer` is the declared final answer, such as `x = 7/2`, and `student_lines` is the
/// written work, one line per entry. Fails only if `equation` itself cannot be normalized or is
/// not a rational equation.
pub fn check(
    equation: &str,
    student_answer: &str,
    student_lines: &[impl AsRef<str>],
    config: &Config,
) -> Result<Assessment, CheckerError> {
    let analysis = solve_raw(equation, config)?;
    let var = analysis.variable.as_str();
    let student_answer = student_answer.trim().to_owned();

    let lines = lines::classify(student_lines.iter().map(|line| line.as_ref()));
    let student_values = answer::read(&student_answer, &lines, var, config.significant_digits);
    let grade = grade(&analysis, &student_values, config.tolerance);
    debug!(
        target: "check",
        equation = analysis.equation.text(),
        answer = %student_answer,
        values = student_values.len(),
        ?grade,
        "graded answer"
    );

    let raw_lines = lines.iter().map(|line| line.raw.as_str()).collect::<Vec<_>>();
    let concepts = concepts::detect(&raw_lines, &analysis);
    let verification = feedback::verification_report(&concepts, &analysis);
    let feedback = feedback::feedback(
        grade,
        &student_values,
        &analysis,
        &concepts,
        &verification,
        !lines.is_empty(),
        config.tolerance,
    );
    let remedial_steps = match grade {
        Grade::Correct => Vec::new(),
        _ => feedback::remedial_steps(&analysis),
    };

    Ok(Assessment {
        analysis,
        student_answer,
        lines,
        student_values,
        grade,
        concepts,
        verification,
        feedback,
        remedial_steps,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    const NO_WORK: [&str; 0] = [];

    fn check_answer(equation: &str, answer: &str) -> Assessment {
        check(equation, answer, &NO_WORK, &Config::default()).unwrap()
    }

    #[test]
    fn correct_answer() {
        let assessment = check_answer("1/(x-2) = 3/(x+1)", "x = 7/2");
        assert_eq!(assessment.grade, Grade::Correct);
        assert!(assessment.answer_correct());
        assert!(assessment.remedial_steps.is_empty());
    }

    #[test]
    fn decimal_answer() {
        let assessment = check_answer("1/(x-2) = 3/(x+1)", "x=3.5");
        assert_eq!(assessment.grade, Grade::Correct);
    }

    #[test]
    fn extraneous_answer_is_incorrect() {
        let assessment = check_answer("x**2/(x-3) = 9/(x-3)", "x = 3");
        assert_eq!(assessment.grade, Grade::Incorrect);
        assert!(!assessment.remedial_steps.is_empty());
    }

    #[test]
    fn plus_minus_answer() {
        let assessment = check_answer("x = 3 - 1/x", "x = 3/2 ± √5/2");
        assert_eq!(assessment.student_values.len(), 2);
        assert_eq!(assessment.grade, Grade::Correct);
    }

    #[test]
    fn no_answer() {
        let assessment = check_answer("2*x + 1 = 5", "");
        assert_eq!(assessment.grade, Grade::NoAnswer);
        assert!(!assessment.answer_correct());
    }

    #[test]
    fn cannot_grade_without_solutions() {
        let config = Config::default().time_budget(std::time::Duration::ZERO);
        let assessment = check("1/(x-2) = 3/(x+1)", "x = 7/2", &NO_WORK, &config).unwrap();
        assert_eq!(assessment.grade, Grade::CannotGrade);
    }

    #[test]
    fn invalid_equation() {
        let err = check("x + 1", "x = 2", &NO_WORK, &Config::default()).unwrap_err();
        assert!(matches!(err.0, PipelineError::Normalize(_)));

        let err = check("sin(x) = 1", "x = 2", &NO_WORK, &Config::default()).unwrap_err();
        assert!(matches!(err.0, PipelineError::Invalid { .. }));
    }
}
