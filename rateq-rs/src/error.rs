use rateq_didactic::CheckerError;
use rateq_solver::PipelineError;
use rustyline::error::ReadlineError;
use std::io;

/// Utility enum to package the errors that can stop a command.
#[derive(Debug)]
pub enum CliError {
    /// The input could not be normalized or is not a rational equation.
    Pipeline(PipelineError),

    /// The instructor's equation cannot be checked against.
    Checker(CheckerError),

    /// The result could not be written as JSON.
    Json(serde_json::Error),

    /// Reading input failed.
    Io(io::Error),

    /// The interactive editor failed.
    Readline(ReadlineError),
}

impl CliError {
    /// The user-facing message.
    pub fn message(&self) -> String {
        match self {
            Self::Pipeline(err) => err.message(),
            Self::Checker(err) => err.message(),
            Self::Json(err) => err.to_string(),
            Self::Io(err) => err.to_string(),
            Self::Readline(err) => err.to_string(),
        }
    }

    /// Reports the error to stderr. Errors about the input are drawn as `ariadne` reports
    /// highlighting the offending part of `input`.
    pub fn report_to_stderr(self, src_id: &str, input: &str) {
        let reported = match self {
            Self::Pipeline(err) => err.report_to_stderr(src_id, input),
            Self::Checker(err) => {
                eprintln!("Cannot check answers against this equation:");
                err.report_to_stderr(src_id, input)
            },
            other => {
                eprintln!("error: {}", other.message());
                Ok(())
            },
        };
        if let Err(err) = reported {
            eprintln!("error: could not write report: {}", err);
        }
    }

    /// The error as a JSON object, for commands run with `--json`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Pipeline(err) => serde_json::json!({ "status": "error", "error": err }),
            Self::Checker(err) => serde_json::json!({ "status": "error", "error": err }),
            other => serde_json::json!({ "status": "error", "error": { "message": other.message() } }),
        }
    }
}

impl From<PipelineError> for CliError {
    fn from(err: PipelineError) -> Self {
        Self::Pipeline(err)
    }
}

impl From<CheckerError> for CliError {
    fn from(err: CheckerError) -> Self {
        Self::Checker(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        Self::Readline(err)
    }
}
