//! Step-by-step analysis of a valid rational equation.
//!
//! [`analyze`] follows the method taught for rational equations:
//!
//! 1. split each side into additive terms and reduce each term to a single ratio
//! 2. collect the distinct denominators, and the values that make them zero
//! 3. take the least common denominator (LCD) of the factored denominators
//! 4. multiply every term by the LCD to clear the denominators, giving `P(x) = 0`
//! 5. solve `P(x) = 0`
//! 6. reject extraneous roots, which make one of the denominators zero
//! 7. verify the remaining roots by substituting them into the original equation
//!
//! Every intermediate result is kept on the [`AnalysisResult`] so that it can be explained.
//! Failing to solve `P(x) = 0` is not an error: the result still carries the denominators, LCD
//! and restrictions, with the failure recorded in [`AnalysisResult::outcome`].

mod denominators;
mod verify;

#[cfg(feature = "serde")]
mod record;

pub use verify::{SideCheck, VerificationRecord};

use crate::{
    config::Config,
    equation::CanonicalEquation,
    validate::{reject, validate_equation, ValidationError},
};
use rateq_compute::{
    budget::{Budget, Timeout},
    error::SolveError,
    factor::Factored,
    poly::Poly,
    ratfn::{from_expr, Conversion, ConvertError, RationalFn},
    root::Root,
    solve::{solve, SolveOutcome},
};
use rateq_parser::parser::ast::Expr;
use tracing::{debug, warn};

/// A side of an equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// One additive term of one side of the equation.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    /// The side the term is on.
    pub side: Side,

    /// The term as written. Subtracted terms are wrapped in a negation.
    pub expr: Expr,

    /// The term as a ratio of polynomials in lowest terms.
    pub value: RationalFn,

    /// The term multiplied by the LCD, with the denominator cancelled.
    pub cleared: Poly,
}

/// The equation after multiplying both sides by the LCD.
#[derive(Debug, Clone, PartialEq)]
pub struct ClearedEquation {
    /// The left side multiplied by the LCD, expanded.
    pub lhs: Poly,

    /// The right side multiplied by the LCD, expanded.
    pub rhs: Poly,

    /// `lhs - rhs`. The equation's solutions are among the roots of this polynomial.
    pub polynomial: Poly,
}

/// The roots of the cleared polynomial, split by whether they solve the original equation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionSet {
    /// Every distinct root of the cleared polynomial.
    pub raw: Vec<Root>,

    /// The roots that keep every denominator nonzero.
    pub valid: Vec<Root>,

    /// The roots that make some denominator zero.
    pub extraneous: Vec<Root>,
}

/// Everything found while solving a rational equation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// The analyzed equation.
    pub equation: CanonicalEquation,

    /// The name of the equation's variable.
    pub variable: String,

    /// The number of significant digits to show in decimal approximations.
    pub significant_digits: usize,

    /// The additive terms of both sides, left side first.
    pub terms: Vec<Term>,

    /// The distinct nonconstant denominators, each a power of a single primitive factor, in the
    /// order they appear. This includes factors that cancel when a term is reduced, since the
    /// equation is still undefined where they vanish.
    pub denominators: Vec<Factored>,

    /// The values of the variable that make some denominator zero.
    pub excluded_values: Vec<Root>,

    /// Why some excluded values could not be found, if any.
    pub restriction_error: Option<SolveError>,

    /// The least common denominator, or [`None`] if the analysis ran out of time before it was
    /// found.
    pub lcd: Option<Factored>,

    /// The equation with denominators cleared, or [`None`] if the analysis ran out of time before
    /// it was found.
    pub cleared: Option<ClearedEquation>,

    /// The result of solving the cleared polynomial.
    pub outcome: Result<SolveOutcome, SolveError>,

    /// The roots of the cleared polynomial. Empty if solving failed.
    pub solutions: SolutionSet,

    /// One record for each valid root, in the same order.
    pub verification: Vec<VerificationRecord>,
}

impl AnalysisResult {
    /// Returns true if the equation was solved, so the valid roots are known.
    pub fn is_complete(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Returns true if any term has a nonconstant denominator.
    pub fn has_denominators(&self) -> bool {
        !self.denominators.is_empty()
    }

    /// Returns true if the cleared equation holds for every value of the variable, so every
    /// value except the excluded values is a solution.
    pub fn holds_everywhere(&self) -> bool {
        matches!(self.outcome, Ok(SolveOutcome::Evaluated(true)))
    }

    /// The error that stopped the equation from being solved, if any.
    pub fn solve_error(&self) -> Option<&SolveError> {
        self.outcome.as_ref().err()
    }

    /// A result with only the equation filled in, for when the analysis could not get further.
    fn empty(equation: &CanonicalEquation, config: &Config, error: SolveError) -> Self {
        Self {
            equation: equation.clone(),
            variable: config.variable.clone(),
            significant_digits: config.significant_digits,
            terms: Vec::new(),
            denominators: Vec::new(),
            excluded_values: Vec::new(),
            restriction_error: None,
            lcd: None,
            cleared: None,
            outcome: Err(error),
            solutions: SolutionSet::default(),
            verification: Vec::new(),
        }
    }
}

/// Analyzes a rational equation. Fails only if the equation does not pass validation.
pub fn analyze(eq: &CanonicalEquation, config: &Config) -> Result<AnalysisResult, ValidationError> {
    validate_equation(eq, config)?;
    let var = config.variable.as_str();
    let budget = config.budget();

    let sides = match convert_sides(eq, config, &budget) {
        Ok(sides) => sides,
        Err(err) => return match reject(err, var) {
            Some(err) => Err(err),
            None => {
                warn!(target: "analyze", equation = %eq, "timed out converting sides");
                Ok(AnalysisResult::empty(eq, config, SolveError::Timeout))
            },
        },
    };
    let (lhs, rhs, parts) = sides;

    let structure = match denominators::clear(parts, &budget) {
        Ok(structure) => structure,
        Err(Timeout) => {
            warn!(target: "analyze", equation = %eq, "timed out clearing denominators");
            return Ok(AnalysisResult::empty(eq, config, SolveError::Timeout));
        },
    };
    debug!(
        target: "analyze",
        equation = %eq,
        denominators = structure.denominators.len(),
        lcd = %structure.lcd.display(var),
        polynomial = %structure.cleared.polynomial.display(var),
        "cleared denominators"
    );

    let options = config.solve_options();
    let (excluded_values, restriction_error) =
        denominators::excluded_values(&structure.denominators, &options, &budget);
    if let Some(err) = &restriction_error {
        warn!(target: "analyze", equation = %eq, ?err, "could not find every excluded value");
    }

    let mut outcome = solve(&structure.cleared.polynomial, &options, &budget);
    let solutions = match &outcome {
        Ok(solved) => match partition(solved.roots(), &structure.denominators, &budget) {
            Ok(solutions) => solutions,
            Err(Timeout) => {
                outcome = Err(SolveError::Timeout);
                SolutionSet::default()
            },
        },
        Err(_) => SolutionSet::default(),
    };
    match &outcome {
        Ok(_) => debug!(
            target: "analyze",
            valid = solutions.valid.len(),
            extraneous = solutions.extraneous.len(),
            "partitioned roots"
        ),
        Err(err) => warn!(target: "analyze", equation = %eq, ?err, "could not solve the cleared equation"),
    }

    let verification = solutions.valid
        .iter()
        .map(|root| verify::verify(root, [(eq.lhs(), &lhs.value), (eq.rhs(), &rhs.value)], var, config.tolerance, &budget))
        .collect();

    Ok(AnalysisResult {
        equation: eq.clone(),
        variable: config.variable.clone(),
        significant_digits: config.significant_digits,
        terms: structure.terms,
        denominators: structure.denominators,
        excluded_values,
        restriction_error,
        lcd: Some(structure.lcd),
        cleared: Some(structure.cleared),
        outcome,
        solutions,
        verification,
    })
}

/// The converted sides of the equation, and each side's additive terms converted on their own.
type ConvertedSides = (Conversion, Conversion, Vec<(Side, Expr, Conversion)>);

/// Converts both sides and every additive term to ratios of polynomials.
fn convert_sides(eq: &CanonicalEquation, config: &Config, budget: &Budget) -> Result<ConvertedSides, ConvertError> {
    let var = config.variable.as_str();
    let convert = |expr: &Expr| from_expr(expr, var, config.max_expression_degree, budget);

    let lhs = convert(eq.lhs())?;
    let rhs = convert(eq.rhs())?;
    let mut parts = Vec::new();
    for (side, expr) in [(Side::Left, eq.lhs()), (Side::Right, eq.rhs())] {
        for term in expr.terms() {
            let conversion = convert(&term)?;
            parts.push((side, term, conversion));
        }
    }
    Ok((lhs, rhs, parts))
}

/// Splits roots into those that keep every denominator nonzero and those that do not.
fn partition(
    roots: &[Root],
    denominators: &[Factored],
    budget: &Budget,
) -> Result<SolutionSet, Timeout> {
    let mut solutions = SolutionSet { raw: roots.to_vec(), ..Default::default() };
    for root in roots {
        let mut extraneous = false;
        for (factor, _) in denominators.iter().flat_map(|d| &d.factors) {
            if root.is_root_of(factor, budget)? {
                extraneous = true;
                break;
            }
        }

        if extraneous {
            debug!(target: "analyze", %root, "extraneous root");
            solutions.extraneous.push(root.clone());
        } else {
            solutions.valid.push(root.clone());
        }
    }
    Ok(solutions)
}
