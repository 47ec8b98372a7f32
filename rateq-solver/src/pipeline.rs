//! The whole pipeline, from raw input to analysis.

use crate::{
    analyze::{analyze, AnalysisResult},
    config::Config,
    equation::CanonicalEquation,
    validate::ValidationError,
};
use rateq_error::ErrorKind;
use rateq_parser::normalize::{normalize, NormalizeError};
use std::{fmt, io};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Serialize, Serializer};

/// The reasons raw input cannot be analyzed. Both are the user's to fix.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// No canonical equation could be recovered from the input.
    Normalize(NormalizeError),

    /// The input normalized to an equation that cannot be analyzed.
    Invalid {
        /// The canonical equation the error's span points into.
        canonical: String,

        /// What is wrong with it.
        error: ValidationError,
    },
}

impl PipelineError {
    /// The user-facing message.
    pub fn message(&self) -> String {
        match self {
            PipelineError::Normalize(err) => err.message(),
            PipelineError::Invalid { error, .. } => error.message(),
        }
    }

    /// Converts into a source-located error, along with the source text it points into.
    pub fn into_error(self, raw: &str) -> (String, rateq_error::Error) {
        match self {
            PipelineError::Normalize(err) => {
                (raw.to_owned(), rateq_error::Error::new(vec![0..raw.len()], err))
            },
            PipelineError::Invalid { canonical, error } => (canonical, error.into()),
        }
    }

    /// Reports the error to stderr, highlighting the offending part of the input.
    pub fn report_to_stderr(self, src_id: &str, raw: &str) -> io::Result<()> {
        let (source, error) = self.into_error(raw);
        error.report_to_stderr(src_id, &source)
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PipelineError {}

#[cfg(feature = "serde")]
impl Serialize for PipelineError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PipelineError", 2)?;
        match self {
            PipelineError::Normalize(_) => state.serialize_field("stage", "normalize")?,
            PipelineError::Invalid { .. } => state.serialize_field("stage", "validate")?,
        }
        state.serialize_field("error", &self.message())?;
        state.end()
    }
}

/// Normalizes raw input and parses it as a canonical equation.
pub fn canonicalize(raw: &str) -> Result<CanonicalEquation, PipelineError> {
    let canonical = normalize(raw).map_err(PipelineError::Normalize)?;
    CanonicalEquation::parse(&canonical)
        .map_err(|error| PipelineError::Invalid { canonical: canonical.clone(), error })
}

/// Normalizes, validates and analyzes raw input.
pub fn solve_raw(raw: &str, config: &Config) -> Result<AnalysisResult, PipelineError> {
    let eq = canonicalize(raw)?;
    debug!(target: "analyze", raw, canonical = eq.text(), "solving");
    analyze(&eq, config).map_err(|error| PipelineError::Invalid {
        canonical: eq.text().to_owned(),
        error,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn solves_latex() {
        let result = solve_raw("\\frac{1}{x-2} = \\frac{3}{x+1}", &Config::default()).unwrap();
        assert_eq!(result.equation.text(), "(1)/(x-2)=(3)/(x+1)");
        assert_eq!(result.solutions.valid.len(), 1);
    }

    #[test]
    fn reports_stage() {
        assert!(matches!(solve_raw("", &Config::default()), Err(PipelineError::Normalize(_))));

        let err = solve_raw("x + 1 = x + 2", &Config::default()).unwrap_err();
        assert_eq!(err.message(), "This equation has no solution (contradiction).");
        assert!(matches!(err, PipelineError::Invalid { .. }));
    }
}
