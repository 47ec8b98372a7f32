//! Partial failures of solving and simplification. These are stored on analysis results rather
//! than aborting the whole pipeline.

use crate::budget::Timeout;
use rateq_attrs::ErrorKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The roots of a polynomial could not be found.
#[derive(Debug, Clone, PartialEq, ErrorKind)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolveError {
    /// The time budget ran out.
    #[error(
        message = "solving took too long and was stopped",
        help = "try a simpler equation, or raise the time limit",
    )]
    Timeout,

    /// A factor of the polynomial has no closed-form roots, and numeric roots are disabled.
    #[error(
        message = format!("cannot solve a degree {} factor exactly", degree),
        help = "enable numeric roots to approximate its solutions",
    )]
    NoClosedForm {
        /// The degree of the factor.
        degree: usize,
    },

    /// The polynomial's degree exceeds the configured maximum.
    #[error(message = format!("the cleared equation has degree {}, above the limit of {}", degree, max))]
    DegreeTooHigh {
        /// The degree of the polynomial.
        degree: usize,

        /// The configured maximum degree.
        max: usize,
    },
}

impl From<Timeout> for SolveError {
    fn from(_: Timeout) -> Self {
        Self::Timeout
    }
}

/// A value could not be simplified or evaluated.
#[derive(Debug, Clone, PartialEq, ErrorKind)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SimplifyError {
    /// The time budget ran out.
    #[error(message = "simplification took too long and was stopped")]
    Timeout,

    /// A denominator evaluated to zero.
    #[error(message = "division by zero")]
    DivisionByZero,

    /// The expression refers to a symbol with no known value.
    #[error(message = format!("`{}` has no known value", name))]
    UnknownSymbol {
        /// The symbol's name.
        name: String,
    },

    /// The expression calls a function that cannot be evaluated.
    #[error(message = format!("cannot evaluate the function `{}`", name))]
    UnknownFunction {
        /// The function's name.
        name: String,
    },
}

impl From<Timeout> for SimplifyError {
    fn from(_: Timeout) -> Self {
        Self::Timeout
    }
}
