//! Decimal approximations with a fixed number of significant digits.

use crate::primitive::complex;
use rug::{float::Round, Complex, Float};
use std::cmp::Ordering;

/// Formats a float with exactly `digits` significant digits, such as `2.0000000`, `0.33333333` or
/// `-1.4142136` for 8 digits.
///
/// Numbers too large to show every integer digit, or smaller than `1e-5`, are written in
/// scientific notation, such as `1.2345679e+12`.
pub fn format_sig(n: &Float, digits: usize) -> String {
    if n.is_zero() {
        return String::from("0");
    }

    let digits = digits.max(1);
    let (negative, mut s, exponent) = n.to_sign_string_exp_round(10, Some(digits), Round::Nearest);
    let exponent = match exponent {
        Some(exponent) => exponent,
        // NaN and infinity
        None => return n.to_string(),
    };
    let sign = if negative { "-" } else { "" };

    // the value is 0.<s> * 10^exponent
    if exponent > digits as i32 || exponent < -4 {
        let (first, rest) = s.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        return format!("{}{}.{}e{:+}", sign, first, rest, exponent - 1);
    }

    match exponent.cmp(&0) {
        Ordering::Less | Ordering::Equal => {
            s.insert_str(0, &format!("0.{}", "0".repeat(-exponent as usize)));
        },
        Ordering::Greater if exponent as usize == s.len() => s.push_str(".0"),
        Ordering::Greater => s.insert(exponent as usize, '.'),
    }
    format!("{}{}", sign, s)
}

/// Formats a complex number with `digits` significant digits in each part, such as
/// `0.50000000 + 1.3228757*I`. Numbers with a zero imaginary part are formatted as reals.
pub fn format_complex(z: &Complex, digits: usize) -> String {
    let (re, im) = (z.real(), z.imag());
    if im.is_zero() {
        return format_sig(re, digits);
    }

    let im_abs = format_sig(&Float::with_val(im.prec(), im.abs_ref()), digits);
    if re.is_zero() {
        let sign = if im.is_sign_negative() { "-" } else { "" };
        format!("{}{}*I", sign, im_abs)
    } else {
        let sign = if im.is_sign_negative() { "-" } else { "+" };
        format!("{} {} {}*I", format_sig(re, digits), sign, im_abs)
    }
}

/// Returns true if `a` and `b` are within `tolerance` of each other.
pub fn within(a: &Complex, b: &Complex, tolerance: f64) -> bool {
    let difference = complex(a - b).abs();
    let magnitude = difference.real().to_f64();
    magnitude.is_finite() && magnitude < tolerance
}

#[cfg(test)]
mod tests {
    use crate::primitive::{float, rat};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn eight_digits() {
        assert_eq!(format_sig(&float(2), 8), "2.0000000");
        assert_eq!(format_sig(&float(rat((1, 3))), 8), "0.33333333");
        assert_eq!(format_sig(&float(-1.5), 8), "-1.5000000");
        assert_eq!(format_sig(&float(2).sqrt(), 8), "1.4142136");
        assert_eq!(format_sig(&float(123.456), 8), "123.45600");
        assert_eq!(format_sig(&float(12345678), 8), "12345678.0");
    }

    #[test]
    fn small_and_large() {
        assert_eq!(format_sig(&float(0.001), 8), "0.0010000000");
        assert_eq!(format_sig(&float(1_234_567_890_123u64), 8), "1.2345679e+12");
        assert_eq!(format_sig(&float(rat((1, 1_000_000))), 3), "1.00e-6");
        assert_eq!(format_sig(&float(0), 8), "0");
    }

    #[test]
    fn complex_numbers() {
        assert_eq!(format_complex(&complex((1, 2)), 3), "1.00 + 2.00*I");
        assert_eq!(format_complex(&complex((1, -2)), 3), "1.00 - 2.00*I");
        assert_eq!(format_complex(&complex((0, -1)), 3), "-1.00*I");
        assert_eq!(format_complex(&complex((5, 0)), 3), "5.00");
    }

    #[test]
    fn tolerance() {
        let a = complex(float(2).sqrt());
        let b = complex(1.41421356237);
        assert!(within(&a, &b, 1e-8));
        assert!(!within(&a, &complex(1.4142), 1e-8));
    }
}
