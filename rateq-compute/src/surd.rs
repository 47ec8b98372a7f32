//! Exact numbers of the form `a + b*sqrt(d)`.

use crate::{
    poly::Poly,
    primitive::{complex, float, int, rat, PRECISION},
};
use rug::{Complex, Float, Integer, Rational};
use std::{cmp::Ordering, fmt};

/// Trial division stops at this factor when extracting squares from the radicand. Radicands
/// with larger repeated prime factors still print correctly, just not in lowest terms.
const TRIAL_LIMIT: u32 = 100_000;

/// An element of a quadratic field, `a + b*sqrt(d)`.
///
/// `d` is a square-free integer other than 1 and may be negative, in which case the number is
/// complex. Rational numbers have `b = 0` and `d = 1`, so two equal surds always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Surd {
    a: Rational,
    b: Rational,
    d: Integer,
}

impl Surd {
    /// Creates the surd `a + b*sqrt(d)`, pulling square factors out of `d`.
    pub fn new(a: Rational, b: Rational, d: Integer) -> Self {
        if b.cmp0() == Ordering::Equal || d.cmp0() == Ordering::Equal {
            return Self::rational(a);
        }

        let (square, free) = split_square(d);
        let b = b * square;
        if free == 1 {
            Self::rational(a + b)
        } else {
            Self { a, b, d: free }
        }
    }

    /// A rational number.
    pub fn rational(a: Rational) -> Self {
        Self { a, b: rat(0), d: int(1) }
    }

    /// The square root of a rational number, `sqrt(r)`.
    pub fn sqrt(r: &Rational) -> Self {
        // sqrt(p/q) = sqrt(p*q)/q
        let radicand = int(r.numer() * r.denom());
        Self::new(rat(0), rat((int(1), r.denom().clone())), radicand)
    }

    /// The rational part `a`.
    pub fn rational_part(&self) -> &Rational {
        &self.a
    }

    /// The coefficient `b` of the radical.
    pub fn radical_coeff(&self) -> &Rational {
        &self.b
    }

    /// The radicand `d`.
    pub fn radicand(&self) -> &Integer {
        &self.d
    }

    pub fn is_zero(&self) -> bool {
        self.a.cmp0() == Ordering::Equal && self.is_rational()
    }

    pub fn is_rational(&self) -> bool {
        self.b.cmp0() == Ordering::Equal
    }

    /// Returns the value if it is rational.
    pub fn as_rational(&self) -> Option<&Rational> {
        self.is_rational().then_some(&self.a)
    }

    pub fn is_real(&self) -> bool {
        self.is_rational() || self.d.cmp0() == Ordering::Greater
    }

    /// The conjugate `a - b*sqrt(d)`.
    pub fn conjugate(&self) -> Self {
        Self { a: self.a.clone(), b: rat(-&self.b), d: self.d.clone() }
    }

    /// Returns the radicand shared by `self` and `other`, or [`None`] if they live in different
    /// quadratic fields.
    fn common_radicand(&self, other: &Self) -> Option<Integer> {
        match (self.is_rational(), other.is_rational()) {
            (true, true) => Some(int(1)),
            (true, false) => Some(other.d.clone()),
            (false, true) => Some(self.d.clone()),
            (false, false) => (self.d == other.d).then(|| self.d.clone()),
        }
    }

    /// Adds two surds. Returns [`None`] if they have different radicands.
    pub fn add(&self, other: &Self) -> Option<Self> {
        let d = self.common_radicand(other)?;
        Some(Self::new(rat(&self.a + &other.a), rat(&self.b + &other.b), d))
    }

    /// Subtracts two surds. Returns [`None`] if they have different radicands.
    pub fn sub(&self, other: &Self) -> Option<Self> {
        self.add(&other.neg())
    }

    /// Multiplies two surds. Returns [`None`] if they have different radicands.
    pub fn mul(&self, other: &Self) -> Option<Self> {
        let d = self.common_radicand(other)?;
        // (a1 + b1 r)(a2 + b2 r) = a1 a2 + b1 b2 d + (a1 b2 + a2 b1) r
        let a = rat(&self.a * &other.a) + rat(&self.b * &other.b) * &d;
        let b = rat(&self.a * &other.b) + rat(&other.a * &self.b);
        Some(Self::new(a, b, d))
    }

    /// The multiplicative inverse. Returns [`None`] for zero.
    pub fn recip(&self) -> Option<Self> {
        // 1 / (a + b r) = (a - b r) / (a^2 - b^2 d)
        let norm = rat(self.a.square_ref()) - rat(self.b.square_ref()) * &self.d;
        if norm.cmp0() == Ordering::Equal {
            return None;
        }
        Some(Self::new(rat(&self.a / &norm), rat(-&self.b) / &norm, self.d.clone()))
    }

    /// Divides two surds. Returns [`None`] for division by zero or different radicands.
    pub fn div(&self, other: &Self) -> Option<Self> {
        self.mul(&other.recip()?)
    }

    pub fn neg(&self) -> Self {
        Self { a: rat(-&self.a), b: rat(-&self.b), d: self.d.clone() }
    }

    /// Evaluates a polynomial at this value. Always succeeds, since every coefficient is rational.
    pub fn eval(&self, poly: &Poly) -> Self {
        poly.coeffs()
            .iter()
            .rev()
            .fold(Self::rational(rat(0)), |acc, c| {
                let product = acc.mul(self).unwrap_or_else(|| acc.clone());
                product.add(&Self::rational(c.clone())).unwrap_or(product)
            })
    }

    /// Returns true if this value is a root of `poly`.
    pub fn is_root_of(&self, poly: &Poly) -> bool {
        self.eval(poly).is_zero()
    }

    /// The value as a complex number.
    pub fn to_complex(&self) -> Complex {
        let magnitude = int(self.d.abs_ref());
        let radical = Float::with_val(PRECISION, &magnitude).sqrt();
        let scaled = radical * float(&self.b);
        if self.d.cmp0() == Ordering::Less {
            complex((float(&self.a), scaled))
        } else {
            complex((float(&self.a) + scaled, float(0)))
        }
    }

    /// Formats the value as LaTeX, such as `\frac{3}{2} + \frac{\sqrt{5}}{2}` or `1 - 2 i`.
    pub fn latex(&self) -> String {
        let radical = match self.d.to_i32() {
            Some(-1) => String::from("i"),
            _ if self.d.cmp0() == Ordering::Less => format!("\\sqrt{{{}}} i", self.d.clone().abs()),
            _ => format!("\\sqrt{{{}}}", self.d),
        };
        self.format(&radical, latex_term, latex_rational)
    }

    fn format(
        &self,
        radical: &str,
        term: fn(&Rational, &str) -> String,
        rational: fn(&Rational) -> String,
    ) -> String {
        if self.is_rational() {
            return rational(&self.a);
        }

        let b_abs = rat(self.b.abs_ref());
        let radical_term = term(&b_abs, radical);
        let negative = self.b.cmp0() == Ordering::Less;
        if self.a.cmp0() == Ordering::Equal {
            format!("{}{}", if negative { "-" } else { "" }, radical_term)
        } else {
            format!("{} {} {}", rational(&self.a), if negative { "-" } else { "+" }, radical_term)
        }
    }
}

/// Formats `coeff * radical` for a positive coefficient, such as `sqrt(5)/2` or `3*I`.
fn ascii_term(coeff: &Rational, radical: &str) -> String {
    let top = if *coeff.numer() == 1 {
        radical.to_owned()
    } else {
        format!("{}*{}", coeff.numer(), radical)
    };
    if *coeff.denom() == 1 {
        top
    } else {
        format!("{}/{}", top, coeff.denom())
    }
}

fn latex_term(coeff: &Rational, radical: &str) -> String {
    let top = if *coeff.numer() == 1 {
        radical.to_owned()
    } else {
        format!("{} {}", coeff.numer(), radical)
    };
    if *coeff.denom() == 1 {
        top
    } else {
        format!("\\frac{{{}}}{{{}}}", top, coeff.denom())
    }
}

fn ascii_rational(r: &Rational) -> String {
    r.to_string()
}

/// Formats a rational number as LaTeX, such as `-\frac{3}{2}`.
pub fn latex_rational(r: &Rational) -> String {
    if *r.denom() == 1 {
        r.numer().to_string()
    } else {
        let sign = if r.cmp0() == Ordering::Less { "-" } else { "" };
        format!("{}\\frac{{{}}}{{{}}}", sign, r.numer().clone().abs(), r.denom())
    }
}

/// Splits `n` into `(s, f)` with `n = s^2 * f`, pulling out square prime factors below the trial
/// division limit.
fn split_square(n: Integer) -> (Integer, Integer) {
    let negative = n.cmp0() == Ordering::Less;
    let mut rest = n.abs();
    let mut square = int(1);

    if rest.is_perfect_square() {
        square = rest.sqrt();
        rest = int(1);
    } else {
        let mut p = 2u32;
        while p <= TRIAL_LIMIT && int(p) * p <= rest {
            let p_squared = int(p) * p;
            while rest.is_divisible(&p_squared) {
                rest /= &p_squared;
                square *= p;
            }
            p += if p == 2 { 1 } else { 2 };
        }
    }

    if negative {
        rest = -rest;
    }
    (square, rest)
}

impl fmt::Display for Surd {
    /// Formats the value in the same style as the expression printer, such as
    /// `3/2 + sqrt(5)/2`, `-sqrt(2)` or `1 - 2*I`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let radical = match self.d.to_i32() {
            Some(-1) => String::from("I"),
            _ if self.d.cmp0() == Ordering::Less => format!("sqrt({})*I", self.d.clone().abs()),
            _ => format!("sqrt({})", self.d),
        };
        write!(f, "{}", self.format(&radical, ascii_term, ascii_rational))
    }
}
