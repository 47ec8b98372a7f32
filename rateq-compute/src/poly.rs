//! Dense univariate polynomials with exact rational coefficients.

use crate::{budget::{Budget, Timeout}, primitive::{complex, float, int, rat}};
use rug::{Complex, Rational};
use std::{
    cmp::Ordering,
    fmt::Write,
    ops::{Add, Mul, Neg, Sub},
};

/// A polynomial in one variable with [`Rational`] coefficients.
///
/// `coeffs[i]` is the coefficient of `x^i`. The coefficient list never ends in a zero, so the
/// zero polynomial has no coefficients at all and two equal polynomials always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Poly {
    coeffs: Vec<Rational>,
}

impl Poly {
    /// Creates a polynomial from its coefficients, lowest degree first.
    pub fn new(coeffs: Vec<Rational>) -> Self {
        let mut poly = Self { coeffs };
        poly.trim();
        poly
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// The constant polynomial `1`.
    pub fn one() -> Self {
        Self::constant(rat(1))
    }

    /// A constant polynomial.
    pub fn constant(c: Rational) -> Self {
        Self::new(vec![c])
    }

    /// The polynomial `x`.
    pub fn x() -> Self {
        Self::new(vec![rat(0), rat(1)])
    }

    /// The monic linear polynomial `x - root`.
    pub fn linear(root: &Rational) -> Self {
        Self::new(vec![rat(-root), rat(1)])
    }

    fn trim(&mut self) {
        while self.coeffs.last().map_or(false, |c| c.cmp0() == Ordering::Equal) {
            self.coeffs.pop();
        }
    }

    /// The coefficients, lowest degree first.
    pub fn coeffs(&self) -> &[Rational] {
        &self.coeffs
    }

    /// The coefficient of `x^i`.
    pub fn coeff(&self, i: usize) -> Rational {
        self.coeffs.get(i).cloned().unwrap_or_default()
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns true for constants, including zero.
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1
    }

    /// Returns the constant value if this polynomial is a constant.
    pub fn as_constant(&self) -> Option<Rational> {
        self.is_constant().then(|| self.coeff(0))
    }

    /// The degree of the polynomial. Constants, including zero, have degree 0.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// The coefficient of the highest power, or zero for the zero polynomial.
    pub fn leading(&self) -> Rational {
        self.coeffs.last().cloned().unwrap_or_default()
    }

    /// The number of nonzero coefficients.
    pub fn term_count(&self) -> usize {
        self.coeffs.iter().filter(|c| c.cmp0() != Ordering::Equal).count()
    }

    /// Multiplies every coefficient by `c`.
    pub fn scale(&self, c: &Rational) -> Self {
        Self::new(self.coeffs.iter().map(|a| rat(a * c)).collect())
    }

    /// Raises the polynomial to the power `n`.
    pub fn pow(&self, n: u32) -> Self {
        (0..n).fold(Self::one(), |acc, _| &acc * self)
    }

    /// Raises the polynomial to the power `n` by repeated squaring, checking the budget before
    /// each multiplication.
    pub fn pow_within(&self, n: u32, budget: &Budget) -> Result<Self, Timeout> {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut n = n;
        while n > 0 {
            budget.check("pow")?;
            if n & 1 == 1 {
                result = &result * &base;
            }
            n >>= 1;
            if n > 0 {
                base = &base * &base;
            }
        }
        Ok(result)
    }

    /// Divides `self` by `divisor`, returning the quotient and remainder.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is the zero polynomial.
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        assert!(!divisor.is_zero(), "division by the zero polynomial");

        if self.degree() < divisor.degree() || self.is_zero() {
            return (Self::zero(), self.clone());
        }

        let divisor_degree = divisor.degree();
        let divisor_leading = divisor.leading();
        let mut quotient = vec![rat(0); self.degree() - divisor_degree + 1];
        let mut remainder = self.coeffs.clone();

        for shift in (0..quotient.len()).rev() {
            let top = shift + divisor_degree;
            let q = rat(&remainder[top] / &divisor_leading);
            if q.cmp0() == Ordering::Equal {
                continue;
            }
            for (i, d) in divisor.coeffs.iter().enumerate() {
                remainder[shift + i] -= rat(&q * d);
            }
            quotient[shift] = q;
        }

        (Self::new(quotient), Self::new(remainder))
    }

    /// Divides `self` by `divisor`, returning [`None`] if the division leaves a remainder or the
    /// divisor is zero.
    pub fn exact_div(&self, divisor: &Self) -> Option<Self> {
        if divisor.is_zero() {
            return None;
        }
        let (quotient, remainder) = self.div_rem(divisor);
        remainder.is_zero().then_some(quotient)
    }

    /// Returns true if `divisor` divides `self` exactly.
    pub fn is_divisible_by(&self, divisor: &Self) -> bool {
        self.exact_div(divisor).is_some()
    }

    /// Scales the polynomial so its leading coefficient is 1. The zero polynomial is returned
    /// unchanged.
    pub fn monic(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        self.scale(&rat(self.leading().recip_ref()))
    }

    /// The rational content of the polynomial: the number `c` such that `self / c` has coprime
    /// integer coefficients and a positive leading coefficient. The content of zero is zero.
    pub fn content(&self) -> Rational {
        if self.is_zero() {
            return rat(0);
        }

        let numerator_gcd = self.coeffs.iter()
            .fold(int(0), |acc, c| int(acc.gcd_ref(c.numer())));
        let denominator_lcm = self.coeffs.iter()
            .fold(int(1), |acc, c| int(acc.lcm_ref(c.denom())));
        let content = rat((numerator_gcd, denominator_lcm));

        if self.leading().cmp0() == Ordering::Less {
            -content
        } else {
            content
        }
    }

    /// Splits the polynomial into its content and primitive part.
    pub fn primitive(&self) -> (Rational, Self) {
        let content = self.content();
        if content.cmp0() == Ordering::Equal {
            return (content, Self::zero());
        }
        let part = self.scale(&rat(content.recip_ref()));
        (content, part)
    }

    /// The primitive part of the polynomial.
    pub fn primitive_part(&self) -> Self {
        self.primitive().1
    }

    /// The greatest common divisor of two polynomials, as a monic polynomial. The GCD of two zero
    /// polynomials is zero.
    pub fn gcd(&self, other: &Self, budget: &Budget) -> Result<Self, Timeout> {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            budget.check("gcd")?;
            let (_, r) = a.div_rem(&b);
            // keep the intermediate coefficients small
            a = b;
            b = r.primitive_part();
        }
        Ok(a.monic())
    }

    /// The least common multiple of two polynomials, as a primitive polynomial.
    pub fn lcm(&self, other: &Self, budget: &Budget) -> Result<Self, Timeout> {
        if self.is_zero() || other.is_zero() {
            return Ok(Self::zero());
        }
        let gcd = self.gcd(other, budget)?;
        let product = self * other;
        Ok(product.div_rem(&gcd).0.primitive_part())
    }

    /// The formal derivative.
    pub fn derivative(&self) -> Self {
        Self::new(
            self.coeffs.iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| rat(c * int(i as u64)))
                .collect()
        )
    }

    /// Splits the polynomial into square-free parts using Yun's algorithm: returns `(f_i, i)`
    /// pairs with nonconstant, pairwise coprime, square-free, monic `f_i` such that the product
    /// of every `f_i^i` is the monic form of `self`.
    pub fn squarefree(&self, budget: &Budget) -> Result<Vec<(Self, usize)>, Timeout> {
        let mut parts = Vec::new();
        if self.is_constant() {
            return Ok(parts);
        }

        let f = self.monic();
        let derivative = f.derivative();
        let a0 = f.gcd(&derivative, budget)?;
        let mut b = f.div_rem(&a0).0;
        let mut c = derivative.div_rem(&a0).0;
        let mut d = &c - &b.derivative();
        let mut i = 1;

        while !b.is_constant() {
            budget.check("squarefree")?;
            let a = b.gcd(&d, budget)?;
            if !a.is_constant() {
                parts.push((a.clone(), i));
            }
            b = b.div_rem(&a).0;
            c = d.div_rem(&a).0;
            d = &c - &b.derivative();
            i += 1;
        }

        Ok(parts)
    }

    /// Evaluates the polynomial at a rational point.
    pub fn eval(&self, x: &Rational) -> Rational {
        self.coeffs.iter()
            .rev()
            .fold(rat(0), |acc, c| rat(&acc * x) + c)
    }

    /// Evaluates the polynomial at a complex point.
    pub fn eval_complex(&self, x: &Complex) -> Complex {
        self.coeffs.iter()
            .rev()
            .fold(complex(0), |acc, c| complex(&acc * x) + float(c))
    }

    /// Formats the polynomial in descending powers of `var`, such as `x**2 - 5*x + 6` or
    /// `3*x**2/4 - x/2`.
    pub fn display(&self, var: &str) -> String {
        self.format(var, Style::Ascii)
    }

    /// Formats the polynomial as LaTeX, such as `x^{2} - 5 x + 6` or `\frac{3 x^{2}}{4}`.
    pub fn latex(&self, var: &str) -> String {
        self.format(var, Style::Latex)
    }

    fn format(&self, var: &str, style: Style) -> String {
        if self.is_zero() {
            return String::from("0");
        }

        let mut out = String::new();
        for (power, coeff) in self.coeffs.iter().enumerate().rev() {
            if coeff.cmp0() == Ordering::Equal {
                continue;
            }

            let negative = coeff.cmp0() == Ordering::Less;
            let term = style.term(&rat(coeff.abs_ref()), var, power);
            match (out.is_empty(), negative) {
                (true, true) => write!(out, "-{}", term),
                (true, false) => write!(out, "{}", term),
                (false, true) => write!(out, " - {}", term),
                (false, false) => write!(out, " + {}", term),
            }.ok();
        }
        out
    }
}

/// How to print a polynomial.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Style {
    Ascii,
    Latex,
}

impl Style {
    /// Formats `coeff * var^power` for a positive coefficient.
    fn term(self, coeff: &Rational, var: &str, power: usize) -> String {
        let numer = coeff.numer();
        let denom = coeff.denom();
        let monomial = match (self, power) {
            (_, 0) => String::new(),
            (_, 1) => var.to_owned(),
            (Style::Ascii, n) => format!("{}**{}", var, n),
            (Style::Latex, n) => format!("{}^{{{}}}", var, n),
        };

        let top = match (monomial.is_empty(), *numer == 1, self) {
            (true, _, _) => numer.to_string(),
            (false, true, _) => monomial,
            (false, false, Style::Ascii) => format!("{}*{}", numer, monomial),
            (false, false, Style::Latex) => format!("{} {}", numer, monomial),
        };

        match (*denom == 1, self) {
            (true, _) => top,
            (false, Style::Ascii) => format!("{}/{}", top, denom),
            (false, Style::Latex) => format!("\\frac{{{}}}{{{}}}", top, denom),
        }
    }
}

impl Add for &Poly {
    type Output = Poly;

    fn add(self, rhs: &Poly) -> Poly {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        Poly::new((0..len).map(|i| self.coeff(i) + rhs.coeff(i)).collect())
    }
}

impl Sub for &Poly {
    type Output = Poly;

    fn sub(self, rhs: &Poly) -> Poly {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        Poly::new((0..len).map(|i| self.coeff(i) - rhs.coeff(i)).collect())
    }
}

impl Mul for &Poly {
    type Output = Poly;

    fn mul(self, rhs: &Poly) -> Poly {
        if self.is_zero() || rhs.is_zero() {
            return Poly::zero();
        }

        let mut coeffs = vec![rat(0); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += rat(a * b);
            }
        }
        Poly::new(coeffs)
    }
}

impl Neg for &Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        Poly::new(self.coeffs.iter().map(|c| rat(-c)).collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Builds a polynomial from integer coefficients, lowest degree first.
    fn poly(coeffs: &[i64]) -> Poly {
        Poly::new(coeffs.iter().map(|&c| rat(c)).collect())
    }

    #[test]
    fn trims_trailing_zeros() {
        assert_eq!(poly(&[1, 2, 0, 0]), poly(&[1, 2]));
        assert!(poly(&[0, 0]).is_zero());
        assert_eq!(poly(&[0]).degree(), 0);
    }

    #[test]
    fn arithmetic() {
        let a = poly(&[1, 1]);
        let b = poly(&[-1, 1]);
        assert_eq!(&a * &b, poly(&[-1, 0, 1]));
        assert_eq!(&a + &b, poly(&[0, 2]));
        assert_eq!(&a - &a, Poly::zero());
        assert_eq!(-&a, poly(&[-1, -1]));
        assert_eq!(a.pow(2), poly(&[1, 2, 1]));
        assert_eq!(a.pow_within(5, &Budget::unlimited()), Ok(a.pow(5)));
        assert_eq!(a.pow_within(0, &Budget::new(std::time::Duration::ZERO)), Ok(Poly::one()));
        assert_eq!(a.pow_within(2, &Budget::new(std::time::Duration::ZERO)), Err(Timeout));
    }

    #[test]
    fn division() {
        let (q, r) = poly(&[1, 2, 1]).div_rem(&poly(&[1, 1]));
        assert_eq!(q, poly(&[1, 1]));
        assert!(r.is_zero());

        let (q, r) = poly(&[1, 0, 1]).div_rem(&poly(&[0, 2]));
        assert_eq!(q, Poly::new(vec![rat(0), rat((1, 2))]));
        assert_eq!(r, poly(&[1]));

        assert_eq!(poly(&[1, 0, 1]).exact_div(&poly(&[1, 1])), None);
    }

    #[test]
    fn gcd_and_lcm() {
        let budget = Budget::unlimited();
        let a = poly(&[-1, 0, 1]);
        let b = poly(&[1, 2, 1]);
        assert_eq!(a.gcd(&b, &budget).unwrap(), poly(&[1, 1]));
        assert_eq!(a.lcm(&b, &budget).unwrap(), poly(&[-1, -1, 1, 1]));

        // constant multiples share every factor
        let c = poly(&[-4, 2]);
        let d = poly(&[-2, 1]);
        assert_eq!(c.lcm(&d, &budget).unwrap(), d);
    }

    #[test]
    fn content_and_primitive() {
        let p = Poly::new(vec![rat((1, 2)), rat((-3, 4))]);
        let (content, part) = p.primitive();
        assert_eq!(content, rat((-1, 4)));
        assert_eq!(part, poly(&[-2, 3]));
    }

    #[test]
    fn squarefree_parts() {
        let budget = Budget::unlimited();
        // (x - 1)^2 (x + 2)
        let p = &poly(&[-1, 1]).pow(2) * &poly(&[2, 1]);
        let parts = p.squarefree(&budget).unwrap();
        assert_eq!(parts, vec![(poly(&[2, 1]), 1), (poly(&[-1, 1]), 2)]);
    }

    #[test]
    fn evaluation() {
        let p = poly(&[6, -5, 1]);
        assert_eq!(p.eval(&rat(2)), rat(0));
        assert_eq!(p.eval(&rat((1, 2))), rat((15, 4)));
        assert_eq!(p.derivative(), poly(&[-5, 2]));
    }

    #[test]
    fn display() {
        assert_eq!(poly(&[6, -5, 1]).display("x"), "x**2 - 5*x + 6");
        assert_eq!(poly(&[0, -1]).display("x"), "-x");
        assert_eq!(Poly::new(vec![rat(0), rat((-1, 2)), rat((3, 4))]).display("x"), "3*x**2/4 - x/2");
        assert_eq!(Poly::constant(rat((-5, 3))).display("x"), "-5/3");
        assert_eq!(Poly::zero().display("x"), "0");
    }

    #[test]
    fn latex() {
        assert_eq!(poly(&[6, -5, 1]).latex("x"), "x^{2} - 5 x + 6");
        assert_eq!(Poly::new(vec![rat((1, 2)), rat((3, 4))]).latex("t"), "\\frac{3 t}{4} + \\frac{1}{2}");
    }
}
