use rateq_compute::{budget::Budget, solve::SolveOptions};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options shared by every stage of the pipeline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// The name of the equation's variable. Every other symbol is rejected.
    ///
    /// The default value is `"x"`.
    pub variable: String,

    /// The largest absolute difference at which two numeric values are considered equal. This is
    /// used to compare a student's answer to the solutions, and as the secondary numeric check when
    /// verifying solutions.
    ///
    /// The default value is `1e-8`.
    pub tolerance: f64,

    /// The number of significant digits shown in decimal approximations.
    ///
    /// The default value is `8`.
    pub significant_digits: usize,

    /// How long a single call may spend factoring, solving and simplifying before giving up with
    /// a timeout error.
    ///
    /// The default value is 5 seconds.
    pub time_budget: Duration,

    /// Whether to approximate the roots of irreducible factors with no closed-form solution, such
    /// as `x**3 - 2`. If this is `false`, such equations fail to solve.
    ///
    /// The default value is `true`.
    pub numeric_roots: bool,

    /// The largest degree of the cleared polynomial that will be solved.
    ///
    /// The default value is `12`.
    pub max_degree: usize,

    /// The largest degree any part of either side may reach while it is converted to a ratio of
    /// polynomials, such as `(x+1)**300`. Larger equations are rejected before any expansion.
    ///
    /// The default value is `256`.
    pub max_expression_degree: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variable: String::from("x"),
            tolerance: 1e-8,
            significant_digits: 8,
            time_budget: Duration::from_secs(5),
            numeric_roots: true,
            max_degree: 12,
            max_expression_degree: 256,
        }
    }
}

impl Config {
    /// Sets the name of the equation's variable.
    pub fn variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    /// Sets the numeric tolerance.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the number of significant digits in decimal approximations.
    pub fn significant_digits(mut self, digits: usize) -> Self {
        self.significant_digits = digits;
        self
    }

    /// Sets the time budget of a single call.
    pub fn time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Sets whether roots with no closed form are approximated.
    pub fn numeric_roots(mut self, numeric_roots: bool) -> Self {
        self.numeric_roots = numeric_roots;
        self
    }

    /// Sets the largest degree that will be solved.
    pub fn max_degree(mut self, max_degree: usize) -> Self {
        self.max_degree = max_degree;
        self
    }

    /// Sets the largest degree of any part of an expression.
    pub fn max_expression_degree(mut self, max_expression_degree: usize) -> Self {
        self.max_expression_degree = max_expression_degree;
        self
    }

    /// The options passed to the root solver.
    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            numeric_roots: self.numeric_roots,
            max_degree: self.max_degree,
        }
    }

    /// Starts a new budget of [`Config::time_budget`].
    pub fn budget(&self) -> Budget {
        Budget::new(self.time_budget)
    }
}
