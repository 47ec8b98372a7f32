//! Factorization over the rationals.
//!
//! Polynomials are split into a rational content, linear factors for every rational root, and
//! residual factors with no rational roots. Residual factors of degree 3 or more are not split
//! further, so they may still be reducible (for example, `(x**2 - 2)*(x**2 - 3)`).

use crate::{
    budget::{Budget, Timeout},
    poly::Poly,
    primitive::{int, rat},
    surd::latex_rational,
};
use rug::{Integer, Rational};
use std::{cmp::Ordering, fmt};
use tracing::trace;

/// Divisor enumeration gives up after this many trial divisions. Rational roots whose numerator
/// or denominator has a prime factor above this bound stay inside a residual factor, where the
/// root solver still finds them.
const TRIAL_LIMIT: u64 = 1_000_000;

/// A factored polynomial, `content * f_1^m_1 * f_2^m_2 * ...`.
///
/// Every factor is primitive with a positive leading coefficient, so the factorization of a
/// polynomial is unique up to the order of the factors, which is fixed by [`factor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factored {
    /// The rational constant in front of the factors.
    pub content: Rational,

    /// The factors and their multiplicities, sorted by degree and then by coefficients.
    pub factors: Vec<(Poly, usize)>,
}

impl Factored {
    /// Multiplies the factors back together.
    pub fn expand(&self) -> Poly {
        self.factors
            .iter()
            .fold(Poly::constant(self.content.clone()), |acc, (f, m)| &acc * &f.pow(*m as u32))
    }

    /// Returns the rational roots found while factoring, one per linear factor, in factor order.
    pub fn rational_roots(&self) -> Vec<Rational> {
        self.factors
            .iter()
            .filter(|(f, _)| f.degree() == 1)
            .map(|(f, _)| rat(-f.coeff(0)) / f.coeff(1))
            .collect()
    }

    /// Returns the factors of degree 2 or more.
    pub fn residual(&self) -> impl Iterator<Item = &(Poly, usize)> {
        self.factors.iter().filter(|(f, _)| f.degree() >= 2)
    }

    /// Returns true if there is exactly one factor, appearing once, with content 1, so that the
    /// factored form reads the same as the expanded form.
    fn is_bare(&self) -> bool {
        self.content == 1 && matches!(self.factors.as_slice(), [(_, 1)])
    }

    /// Formats the factored polynomial, such as `(x - 2)*(x + 1)`, `x*(x - 1)**2` or
    /// `3*(x - 2)/2`.
    pub fn display(&self, var: &str) -> String {
        if self.factors.is_empty() {
            return self.content.to_string();
        }
        if self.is_bare() {
            return self.factors[0].0.display(var);
        }

        let body = self.factors
            .iter()
            .map(|(f, m)| {
                let base = if f.term_count() == 1 {
                    f.display(var)
                } else {
                    format!("({})", f.display(var))
                };
                if *m == 1 {
                    base
                } else {
                    format!("{}**{}", base, m)
                }
            })
            .collect::<Vec<_>>()
            .join("*");

        let numer = self.content.numer();
        let denom = self.content.denom();
        let prefix = match numer.to_i32() {
            Some(1) => String::new(),
            Some(-1) => String::from("-"),
            _ => format!("{}*", numer),
        };
        if *denom == 1 {
            format!("{}{}", prefix, body)
        } else {
            format!("{}{}/{}", prefix, body, denom)
        }
    }

    /// Formats the factored polynomial as LaTeX, such as `\left(x - 2\right) \left(x + 1\right)`.
    pub fn latex(&self, var: &str) -> String {
        if self.factors.is_empty() {
            return latex_rational(&self.content);
        }
        if self.is_bare() {
            return self.factors[0].0.latex(var);
        }

        let body = self.factors
            .iter()
            .map(|(f, m)| {
                let base = if f.term_count() == 1 {
                    f.latex(var)
                } else {
                    format!("\\left({}\\right)", f.latex(var))
                };
                if *m == 1 {
                    base
                } else {
                    format!("{}^{{{}}}", base, m)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        match self.content.numer().to_i32().filter(|_| *self.content.denom() == 1) {
            Some(1) => body,
            Some(-1) => format!("-{}", body),
            _ => format!("{} {}", latex_rational(&self.content), body),
        }
    }
}

impl fmt::Display for Factored {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display("x"))
    }
}

/// Factors a polynomial over the rationals.
pub fn factor(poly: &Poly, budget: &Budget) -> Result<Factored, Timeout> {
    if poly.is_constant() {
        return Ok(Factored { content: poly.coeff(0), factors: Vec::new() });
    }

    let mut factors = Vec::new();
    for (part, multiplicity) in poly.squarefree(budget)? {
        let mut rest = part.primitive_part();
        for root in rational_roots(&rest, budget)? {
            let linear = Poly::new(vec![rat(int(-root.numer())), rat(root.denom())]);
            trace!(target: "solve", root = %root, "found rational root");
            if let Some(quotient) = rest.exact_div(&linear) {
                rest = quotient.primitive_part();
                factors.push((linear, multiplicity));
            }
        }
        if !rest.is_constant() {
            factors.push((rest, multiplicity));
        }
    }

    factors.sort_by(|(a, _), (b, _)| {
        a.degree().cmp(&b.degree())
            .then(a.term_count().cmp(&b.term_count()))
            .then_with(|| a.coeffs().cmp(b.coeffs()))
    });

    let product = factors
        .iter()
        .fold(Poly::one(), |acc, (f, m)| &acc * &f.pow(*m as u32));
    let content = poly.leading() / product.leading();
    Ok(Factored { content, factors })
}

/// Returns every rational root of a square-free polynomial with integer coefficients, in
/// ascending order.
fn rational_roots(poly: &Poly, budget: &Budget) -> Result<Vec<Rational>, Timeout> {
    let mut roots = Vec::new();
    let mut poly = poly.clone();

    if poly.coeff(0).cmp0() == Ordering::Equal {
        roots.push(rat(0));
        poly = poly.div_rem(&Poly::x()).0;
    }
    if poly.is_constant() {
        return Ok(roots);
    }

    // by the rational root theorem, p/q is a root only if p divides a_0 and q divides a_n
    let numerators = divisors(poly.coeff(0).numer(), budget)?;
    let denominators = divisors(poly.leading().numer(), budget)?;
    for q in &denominators {
        for p in &numerators {
            budget.check("rational root search")?;
            for candidate in [rat((p.clone(), q.clone())), -rat((p.clone(), q.clone()))] {
                if !roots.contains(&candidate) && poly.eval(&candidate).cmp0() == Ordering::Equal {
                    roots.push(candidate);
                }
            }
        }
    }

    roots.sort();
    Ok(roots)
}

/// Returns the positive divisors of `n`, or as many as can be found with [`TRIAL_LIMIT`] trial
/// divisions.
fn divisors(n: &Integer, budget: &Budget) -> Result<Vec<Integer>, Timeout> {
    let n = int(n.abs_ref());
    let mut small = Vec::new();
    let mut large = Vec::new();

    let mut d = 1u64;
    while d <= TRIAL_LIMIT && int(d) * d <= n {
        if d % 1024 == 0 {
            budget.check("divisor search")?;
        }
        if n.is_divisible_u(d as u32) {
            let quotient = int(&n / d as u32);
            if quotient != d {
                large.push(quotient);
            }
            small.push(int(d));
        }
        d += 1;
    }

    small.extend(large.into_iter().rev());
    Ok(small)
}
