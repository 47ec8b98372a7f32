//! The serialized form of an [`AnalysisResult`]. Mathematical values are written as the strings
//! they display as.

use super::{AnalysisResult, SideCheck, VerificationRecord};
use rateq_compute::approx::format_complex;
use rateq_error::ErrorKind;
use serde::{Serialize, Serializer};

#[derive(Serialize)]
struct AnalysisRecord {
    equation: String,
    variable: String,
    denominators: Vec<String>,
    excluded_values: Vec<String>,
    lcd: Option<String>,
    cleared_equation: Option<ClearedRecord>,
    solutions: SolutionRecord,
    verification: Vec<VerificationView>,
    solve_error: Option<String>,
    restriction_error: Option<String>,
}

#[derive(Serialize)]
struct ClearedRecord {
    lhs: String,
    rhs: String,
    polynomial: String,
}

#[derive(Serialize)]
struct SolutionRecord {
    raw: Vec<String>,
    valid: Vec<String>,
    extraneous: Vec<String>,
}

#[derive(Serialize)]
struct SideView {
    expression: String,
    substituted: String,
    simplified: Option<String>,
    approx: Option<String>,
}

#[derive(Serialize)]
struct VerificationView {
    root: String,
    lhs: SideView,
    rhs: SideView,
    satisfies: bool,
    numeric_agreement: bool,
    error: Option<String>,
}

fn strings<T: ToString>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

impl SideView {
    fn new(side: &SideCheck, digits: usize) -> Self {
        Self {
            expression: side.expr.to_string(),
            substituted: side.substituted.to_string(),
            simplified: side.exact.as_ref().map(ToString::to_string),
            approx: side.approx.as_ref().map(|z| format_complex(z, digits)),
        }
    }
}

impl VerificationView {
    fn new(record: &VerificationRecord, digits: usize) -> Self {
        Self {
            root: record.root.to_string(),
            lhs: SideView::new(&record.lhs, digits),
            rhs: SideView::new(&record.rhs, digits),
            satisfies: record.satisfies,
            numeric_agreement: record.numeric_agreement,
            error: record.error.as_ref().map(ErrorKind::message),
        }
    }
}

impl From<&AnalysisResult> for AnalysisRecord {
    fn from(result: &AnalysisResult) -> Self {
        let var = result.variable.as_str();
        Self {
            equation: result.equation.text().to_owned(),
            variable: result.variable.clone(),
            denominators: result.denominators.iter().map(|d| d.display(var)).collect(),
            excluded_values: strings(&result.excluded_values),
            lcd: result.lcd.as_ref().map(|lcd| lcd.display(var)),
            cleared_equation: result.cleared.as_ref().map(|cleared| ClearedRecord {
                lhs: cleared.lhs.display(var),
                rhs: cleared.rhs.display(var),
                polynomial: cleared.polynomial.display(var),
            }),
            solutions: SolutionRecord {
                raw: strings(&result.solutions.raw),
                valid: strings(&result.solutions.valid),
                extraneous: strings(&result.solutions.extraneous),
            },
            verification: result.verification
                .iter()
                .map(|record| VerificationView::new(record, result.significant_digits))
                .collect(),
            solve_error: result.solve_error().map(ErrorKind::message),
            restriction_error: result.restriction_error.as_ref().map(ErrorKind::message),
        }
    }
}

impl Serialize for AnalysisResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        AnalysisRecord::from(self).serialize(serializer)
    }
}
