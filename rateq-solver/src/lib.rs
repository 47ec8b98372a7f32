//! Validation and step-by-step analysis of single-variable rational equations.
//!
//! The usual entry point is [`solve_raw`], which takes raw input such as
//! `\frac{1}{x-2} = \frac{3}{x+1}`, normalizes it, checks that it is a rational equation, and
//! returns an [`AnalysisResult`] describing every step of its solution: the denominators and the
//! values they exclude, the least common denominator, the cleared polynomial, its roots, which of
//! them are extraneous, and a check of each remaining root against the original equation.
//!
//! ```
//! use rateq_solver::{solve_raw, Config};
//!
//! let result = solve_raw("1/(x-2) = 3/(x+1)", &Config::default()).unwrap();
//! assert_eq!(result.solutions.valid[0].to_string(), "7/2");
//! ```

pub mod analyze;
pub mod config;
pub mod equation;
pub mod pipeline;
pub mod validate;

pub use analyze::{analyze, AnalysisResult};
pub use config::Config;
pub use equation::CanonicalEquation;
pub use pipeline::{solve_raw, PipelineError};
pub use validate::{validate, ValidationError, Verdict};
