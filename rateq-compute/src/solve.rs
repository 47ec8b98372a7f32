//! Root solving for polynomials over the rationals.
//!
//! Rational roots come from [`factor`]. Residual quadratic factors are solved with the quadratic
//! formula, and biquadratic factors `a*x**4 + b*x**2 + c` through the quadratic in `x**2` when
//! that quadratic has rational roots. Every other residual factor is refined numerically with the
//! Durand-Kerner method if [`SolveOptions::numeric_roots`] is set.

use crate::{
    budget::Budget,
    error::SolveError,
    factor::factor,
    poly::Poly,
    primitive::{complex, float, int, rat, PRECISION},
    root::Root,
    surd::Surd,
};
use rug::{Assign, Complex, Float, Rational};
use std::cmp::Ordering;
use tracing::{debug, trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Durand-Kerner stops after this many iterations even if it has not converged.
const MAX_ITERATIONS: usize = 1000;

/// Durand-Kerner has converged once no root moves by more than this.
const CONVERGED: f64 = 1e-100;

/// Imaginary parts smaller than this, relative to the root's magnitude, are rounding noise.
const REAL_CUTOFF: f64 = 1e-60;

/// Options for [`solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveOptions {
    /// Refine roots of residual factors with no closed form numerically instead of failing.
    pub numeric_roots: bool,

    /// The largest degree attempted.
    pub max_degree: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self { numeric_roots: true, max_degree: 12 }
    }
}

/// The result of solving `P(x) = 0`.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// There are no roots.
    NoSolution,

    /// There is exactly one root.
    SingleValue(Root),

    /// There are two or more distinct roots.
    RootList(Vec<Root>),

    /// `P` is a constant, so the equation is true for every `x` or for none.
    Evaluated(bool),
}

impl SolveOutcome {
    /// Wraps a list of distinct roots.
    pub fn from_roots(mut roots: Vec<Root>) -> Self {
        match roots.len() {
            0 => Self::NoSolution,
            1 => Self::SingleValue(roots.remove(0)),
            _ => Self::RootList(roots),
        }
    }

    /// The roots, if any. [`SolveOutcome::Evaluated`] has no roots to list.
    pub fn roots(&self) -> &[Root] {
        match self {
            Self::NoSolution | Self::Evaluated(_) => &[],
            Self::SingleValue(root) => std::slice::from_ref(root),
            Self::RootList(roots) => roots,
        }
    }
}

/// Finds every distinct complex root of `poly`.
///
/// Real roots come first in ascending order, followed by complex roots ordered by real and then
/// imaginary part.
pub fn solve(poly: &Poly, options: &SolveOptions, budget: &Budget) -> Result<SolveOutcome, SolveError> {
    if poly.is_constant() {
        return Ok(SolveOutcome::Evaluated(poly.is_zero()));
    }
    if poly.degree() > options.max_degree {
        return Err(SolveError::DegreeTooHigh { degree: poly.degree(), max: options.max_degree });
    }

    let factored = factor(poly, budget)?;
    debug!(target: "solve", factored = %factored, "factored polynomial");

    let mut roots = factored.rational_roots()
        .into_iter()
        .map(|r| Root::Exact(Surd::rational(r)))
        .collect::<Vec<_>>();
    for (residual, _) in factored.residual() {
        for root in solve_irreducible(residual, options, budget)? {
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
    }

    sort_roots(&mut roots);
    debug!(target: "solve", count = roots.len(), "found roots");
    Ok(SolveOutcome::from_roots(roots))
}

/// Solves a factor with no rational roots.
fn solve_irreducible(f: &Poly, options: &SolveOptions, budget: &Budget) -> Result<Vec<Root>, SolveError> {
    if f.degree() == 2 {
        return Ok(quadratic(&f.coeff(2), &f.coeff(1), &f.coeff(0))
            .into_iter()
            .map(Root::Exact)
            .collect());
    }
    if let Some(roots) = biquadratic(f) {
        return Ok(roots.into_iter().map(Root::Exact).collect());
    }
    if !options.numeric_roots {
        return Err(SolveError::NoClosedForm { degree: f.degree() });
    }

    warn!(target: "solve", degree = f.degree(), "no closed form, refining roots numerically");
    Ok(durand_kerner(f, budget)?
        .into_iter()
        .map(|value| Root::Approx { value, factor: f.clone() })
        .collect())
}

/// The two roots of `a*x**2 + b*x + c`, with the root using `-sqrt(D)` first.
fn quadratic(a: &Rational, b: &Rational, c: &Rational) -> [Surd; 2] {
    let discriminant = rat(b.square_ref()) - rat(4) * a * c;
    let two_a = rat(2) * a;
    let vertex = rat(-b) / &two_a;

    // sqrt(p/q) = sqrt(p*q)/q
    let radicand = int(discriminant.numer() * discriminant.denom());
    let coeff = rat(1) / (two_a * discriminant.denom());
    [
        Surd::new(vertex.clone(), rat(-&coeff), radicand.clone()),
        Surd::new(vertex, coeff, radicand),
    ]
}

/// Solves `a*x**4 + b*x**2 + c` when the quadratic in `x**2` has rational roots.
fn biquadratic(f: &Poly) -> Option<Vec<Surd>> {
    if f.degree() != 4 || f.coeff(1) != 0 || f.coeff(3) != 0 {
        return None;
    }

    let [low, high] = quadratic(&f.coeff(4), &f.coeff(2), &f.coeff(0));
    let low = low.as_rational()?.clone();
    let high = high.as_rational()?.clone();
    trace!(target: "solve", %low, %high, "biquadratic with rational squares");

    let mut roots = Vec::new();
    for square in [low, high] {
        let root = Surd::sqrt(&square);
        roots.push(root.neg());
        roots.push(root);
    }
    Some(roots)
}

/// Refines every root of a square-free polynomial simultaneously with the Durand-Kerner method.
fn durand_kerner(f: &Poly, budget: &Budget) -> Result<Vec<Complex>, SolveError> {
    let f = f.monic();
    let n = f.degree();

    // powers of a number that is neither real nor a root of unity
    let seed = complex((0.4, 0.9));
    let mut roots = (0..n)
        .scan(complex(1), |power, _| {
            let current = power.clone();
            *power *= &seed;
            Some(current)
        })
        .collect::<Vec<_>>();

    let mut converged = false;
    for iteration in 0..MAX_ITERATIONS {
        budget.check("numeric root refinement")?;

        let mut largest_step = float(0);
        for k in 0..n {
            let mut denominator = complex(1);
            for (j, other) in roots.iter().enumerate() {
                if j != k {
                    denominator *= complex(&roots[k] - other);
                }
            }
            if denominator.is_zero() {
                continue;
            }

            let step = f.eval_complex(&roots[k]) / denominator;
            let size = Float::with_val(PRECISION, step.abs_ref());
            if size > largest_step {
                largest_step = size;
            }
            roots[k] -= step;
        }

        if largest_step < CONVERGED {
            trace!(target: "solve", iteration, "durand-kerner converged");
            converged = true;
            break;
        }
    }
    if !converged {
        warn!(target: "solve", degree = n, "durand-kerner did not converge");
    }

    for root in &mut roots {
        let magnitude = float(root.abs_ref()).max(&float(1));
        if float(root.imag().abs_ref()) < magnitude * REAL_CUTOFF {
            root.mut_imag().assign(0);
        }
    }
    Ok(roots)
}

/// Sorts real roots first in ascending order, then complex roots by real and imaginary part.
fn sort_roots(roots: &mut [Root]) {
    roots.sort_by(|a, b| {
        let (a_value, b_value) = (a.approx(), b.approx());
        b.is_real().cmp(&a.is_real())
            .then_with(|| a_value.real().partial_cmp(b_value.real()).unwrap_or(Ordering::Equal))
            .then_with(|| a_value.imag().partial_cmp(b_value.imag()).unwrap_or(Ordering::Equal))
    });
}
