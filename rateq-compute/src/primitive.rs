//! Functions to construct [`Integer`]s, [`Rational`]s, [`Float`]s, and [`Complex`] numbers from
//! various types.

use rug::{Assign, Complex, Float, Integer, Rational};

/// The number of bits of precision to use when computing approximate values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rat<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Complex`] with the given value.
pub fn complex<T>(n: T) -> Complex
where
    Complex: Assign<T>,
{
    Complex::with_val(PRECISION, n)
}

/// Parses a decimal literal such as `16`, `0.25` or `.5` into an exact [`Rational`]. Returns
/// [`None`] if the string is not made of digits with at most one decimal point.
pub fn rat_from_decimal(s: &str) -> Option<Rational> {
    let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
    let digits = format!("{}{}", whole, fraction);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let numerator = Integer::from_str_radix(&digits, 10).ok()?;
    let denominator = int(Integer::u_pow_u(10, fraction.len() as u32));
    Some(rat((numerator, denominator)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn decimals_are_exact() {
        assert_eq!(rat_from_decimal("16"), Some(rat(16)));
        assert_eq!(rat_from_decimal("0.25"), Some(rat((1, 4))));
        assert_eq!(rat_from_decimal(".5"), Some(rat((1, 2))));
        assert_eq!(rat_from_decimal("1.10"), Some(rat((11, 10))));
    }

    #[test]
    fn malformed_decimals() {
        assert_eq!(rat_from_decimal(""), None);
        assert_eq!(rat_from_decimal("."), None);
        assert_eq!(rat_from_decimal("1.2.3"), None);
    }
}
