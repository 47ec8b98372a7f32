//! Roots of polynomials, either exact or numerically refined.

use crate::{
    approx::{format_complex, within},
    budget::{Budget, Timeout},
    poly::Poly,
    surd::Surd,
};
use rug::Complex;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// Digits shown for approximate roots.
const DISPLAY_DIGITS: usize = 8;

/// Residual tolerance when checking an approximate root against another polynomial.
const APPROX_TOLERANCE: f64 = 1e-10;

/// A root of a polynomial.
#[derive(Debug, Clone, PartialEq)]
pub enum Root {
    /// An exact root in a quadratic field, such as `2`, `3/2 + sqrt(5)/2` or `1 - 2*I`.
    Exact(Surd),

    /// A numerically refined root of an irreducible factor with no closed-form roots.
    Approx {
        /// The refined value.
        value: Complex,

        /// The irreducible factor this is a root of.
        factor: Poly,
    },
}

impl Root {
    /// Returns the exact value, if there is one.
    pub fn as_exact(&self) -> Option<&Surd> {
        match self {
            Root::Exact(surd) => Some(surd),
            Root::Approx { .. } => None,
        }
    }

    /// Returns true if the root is a real number.
    pub fn is_real(&self) -> bool {
        match self {
            Root::Exact(surd) => surd.is_real(),
            Root::Approx { value, .. } => value.imag().is_zero(),
        }
    }

    /// Returns true if the root is rational.
    pub fn is_rational(&self) -> bool {
        matches!(self, Root::Exact(surd) if surd.is_rational())
    }

    /// The numeric value of the root.
    pub fn approx(&self) -> Complex {
        match self {
            Root::Exact(surd) => surd.to_complex(),
            Root::Approx { value, .. } => value.clone(),
        }
    }

    /// Returns true if this is also a root of `poly`.
    ///
    /// Exact roots are tested by exact evaluation. An approximate root is a root of `poly` only if
    /// its factor shares a nonconstant factor with `poly`; the shared factor is then evaluated
    /// numerically to tell its roots apart.
    pub fn is_root_of(&self, poly: &Poly, budget: &Budget) -> Result<bool, Timeout> {
        match self {
            Root::Exact(surd) => Ok(surd.is_root_of(poly)),
            Root::Approx { value, factor } => {
                let common = factor.gcd(poly, budget)?;
                if common.is_constant() {
                    return Ok(false);
                }
                let residual = common.eval_complex(value);
                Ok(within(&residual, &Complex::new(value.prec()), APPROX_TOLERANCE))
            },
        }
    }

    /// Formats the root as LaTeX. Approximate roots are written as decimals.
    pub fn latex(&self) -> String {
        match self {
            Root::Exact(surd) => surd.latex(),
            Root::Approx { value, .. } => format_complex(value, DISPLAY_DIGITS).replace("*I", " i"),
        }
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Root::Exact(surd) => write!(f, "{}", surd),
            Root::Approx { value, .. } => write!(f, "{}", format_complex(value, DISPLAY_DIGITS)),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Root {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::{complex, float, int, rat};
    use pretty_assertions::assert_eq;
    use super::*;

    fn poly(coeffs: &[i64]) -> Poly {
        Poly::new(coeffs.iter().map(|&c| rat(c)).collect())
    }

    #[test]
    fn exact_roots() {
        let two = Root::Exact(Surd::rational(rat(2)));
        assert!(two.is_rational());
        assert!(two.is_root_of(&poly(&[-2, 1]), &Budget::unlimited()).unwrap());
        assert!(!two.is_root_of(&poly(&[1, 1]), &Budget::unlimited()).unwrap());
        assert_eq!(two.to_string(), "2");

        let i = Root::Exact(Surd::new(rat(0), rat(1), int(-1)));
        assert!(!i.is_real());
        assert_eq!(i.to_string(), "I");
        assert_eq!(i.latex(), "i");
    }

    #[test]
    fn approximate_roots() {
        // x^3 - 2 has the real root 2^(1/3)
        let factor = poly(&[-2, 0, 0, 1]);
        let value = complex(float(2).cbrt());
        let root = Root::Approx { value, factor: factor.clone() };

        assert!(root.is_real());
        assert_eq!(root.to_string(), "1.2599210");
        assert!(root.is_root_of(&(&factor * &poly(&[1, 1])), &Budget::unlimited()).unwrap());
        assert!(!root.is_root_of(&poly(&[-2, 0, 1]), &Budget::unlimited()).unwrap());
    }
}
