//! Ratios of polynomials, and their construction from parsed expressions.

use crate::{
    budget::{Budget, Timeout},
    poly::Poly,
    primitive::{rat, rat_from_decimal},
    surd::Surd,
};
use levenshtein::levenshtein;
use rateq_attrs::ErrorKind;
use rateq_parser::parser::{
    ast::{Expr, Literal},
    token::op::{BinOpKind, UnaryOpKind},
};
use rug::{Complex, Rational};
use std::{fmt, ops::{Add, Mul, Neg, Range, Sub}};

/// The largest exponent magnitude accepted in an expression.
pub const MAX_EXPONENT: u32 = 256;

/// Function names recognized for "did you mean" suggestions. None of them are rational.
const KNOWN_FUNCTIONS: [&str; 10] = ["sqrt", "sin", "cos", "tan", "log", "ln", "exp", "abs", "asin", "acos"];

/// A ratio of two polynomials, `num / den`.
///
/// The ratio is not kept in lowest terms; [`RationalFn::reduce`] cancels common factors. The
/// denominator is never the zero polynomial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RationalFn {
    num: Poly,
    den: Poly,
}

impl RationalFn {
    /// Creates the ratio `num / den`. Returns [`None`] if `den` is zero.
    pub fn new(num: Poly, den: Poly) -> Option<Self> {
        (!den.is_zero()).then_some(Self { num, den })
    }

    /// A polynomial, as a ratio with denominator 1.
    pub fn poly(num: Poly) -> Self {
        Self { num, den: Poly::one() }
    }

    /// A constant.
    pub fn constant(c: Rational) -> Self {
        Self::poly(Poly::constant(c))
    }

    pub fn num(&self) -> &Poly {
        &self.num
    }

    pub fn den(&self) -> &Poly {
        &self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    /// Returns the value if this ratio is a constant.
    pub fn as_constant(&self) -> Option<Rational> {
        if self.num.is_constant() && self.den.is_constant() {
            Some(self.num.coeff(0) / self.den.coeff(0))
        } else {
            None
        }
    }

    /// Cancels common factors, leaving a primitive denominator with a positive leading
    /// coefficient. Zero is reduced to `0/1`.
    pub fn reduce(&self, budget: &Budget) -> Result<Self, Timeout> {
        if self.num.is_zero() {
            return Ok(Self::poly(Poly::zero()));
        }

        let common = self.num.gcd(&self.den, budget)?;
        let num = self.num.div_rem(&common).0;
        let den = self.den.div_rem(&common).0;
        let (content, den) = den.primitive();
        Ok(Self { num: num.scale(&rat(content.recip_ref())), den })
    }

    /// Divides two ratios. Returns [`None`] if `other` is zero.
    pub fn checked_div(&self, other: &Self) -> Option<Self> {
        Self::new(&self.num * &other.den, &self.den * &other.num)
    }

    /// Raises the ratio to an integer power. Returns [`None`] for a negative power of zero.
    pub fn powi(&self, n: i32, budget: &Budget) -> Result<Option<Self>, Timeout> {
        let magnitude = n.unsigned_abs();
        let raised = Self {
            num: self.num.pow_within(magnitude, budget)?,
            den: self.den.pow_within(magnitude, budget)?,
        };
        Ok(if n < 0 {
            Self::new(raised.den, raised.num)
        } else {
            Some(raised)
        })
    }

    /// The larger of the numerator's and denominator's degrees.
    pub fn degree(&self) -> usize {
        self.num.degree().max(self.den.degree())
    }

    /// Evaluates the ratio at an exact point. Returns [`None`] if the denominator vanishes there.
    pub fn eval_surd(&self, x: &Surd) -> Option<Surd> {
        x.eval(&self.num).div(&x.eval(&self.den))
    }

    /// Evaluates the ratio at a complex point. Returns [`None`] if the denominator vanishes there.
    pub fn eval_complex(&self, x: &Complex) -> Option<Complex> {
        let den = self.den.eval_complex(x);
        (!den.is_zero()).then(|| self.num.eval_complex(x) / den)
    }

    /// Formats the ratio, such as `(3*x - 5)/(x - 2)`.
    pub fn display(&self, var: &str) -> String {
        if self.den == Poly::one() {
            return self.num.display(var);
        }

        let num = self.num.display(var);
        let den = self.den.display(var);
        let wrap = |s: String, compound: bool| if compound { format!("({})", s) } else { s };
        let num_compound = self.num.term_count() > 1 || num.contains('/');
        let den_compound = self.den.term_count() > 1 || den.contains(['/', '*']);
        format!("{}/{}", wrap(num, num_compound), wrap(den, den_compound))
    }

    /// Formats the ratio as LaTeX, such as `\frac{3 x - 5}{x - 2}`.
    pub fn latex(&self, var: &str) -> String {
        if self.den == Poly::one() {
            self.num.latex(var)
        } else {
            format!("\\frac{{{}}}{{{}}}", self.num.latex(var), self.den.latex(var))
        }
    }
}

impl fmt::Display for RationalFn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display("x"))
    }
}

impl Add for &RationalFn {
    type Output = RationalFn;

    fn add(self, rhs: &RationalFn) -> RationalFn {
        if self.den == rhs.den {
            return RationalFn { num: &self.num + &rhs.num, den: self.den.clone() };
        }
        RationalFn {
            num: &(&self.num * &rhs.den) + &(&rhs.num * &self.den),
            den: &self.den * &rhs.den,
        }
    }
}

impl Sub for &RationalFn {
    type Output = RationalFn;

    fn sub(self, rhs: &RationalFn) -> RationalFn {
        self + &(-rhs)
    }
}

impl Mul for &RationalFn {
    type Output = RationalFn;

    fn mul(self, rhs: &RationalFn) -> RationalFn {
        RationalFn { num: &self.num * &rhs.num, den: &self.den * &rhs.den }
    }
}

impl Neg for &RationalFn {
    type Output = RationalFn;

    fn neg(self) -> RationalFn {
        RationalFn { num: -&self.num, den: self.den.clone() }
    }
}

/// The reasons an expression is not a ratio of polynomials in the variable.
#[derive(Debug, Clone, PartialEq, ErrorKind)]
pub enum NotRational {
    /// The expression calls a function.
    #[error(
        message = format!("`{}` is not a polynomial operation", name),
        labels = ["this function"],
        help = match suggestion {
            Some(suggestion) => format!("did you mean `{}`? Either way, only +, -, *, / and integer powers are allowed", suggestion),
            None => String::from("only +, -, *, / and integer powers are allowed"),
        },
    )]
    Function {
        /// The function's name.
        name: String,

        /// Where the call appears.
        span: Range<usize>,

        /// A known function with a similar name.
        suggestion: Option<String>,
    },

    /// The expression refers to a symbol other than the variable.
    #[error(
        message = format!("unknown symbol `{}`", name),
        labels = ["this symbol"],
        help = format!("the equation may only use the variable `{}`", var),
    )]
    Symbol {
        /// The symbol's name.
        name: String,

        /// The equation's variable.
        var: String,

        /// Where the symbol appears.
        span: Range<usize>,
    },

    /// An exponent is not a constant integer of reasonable size.
    #[error(
        message = "exponents must be integer constants",
        labels = ["this exponent"],
        help = format!("fractional exponents are radicals, and exponents above {} are not supported", MAX_EXPONENT),
    )]
    Exponent {
        /// Where the exponent appears.
        span: Range<usize>,
    },

    /// A divisor is identically zero.
    #[error(
        message = "division by an expression that is always zero",
        labels = ["this is always zero"],
    )]
    ZeroDivision {
        /// Where the divisor appears.
        span: Range<usize>,
    },
}

impl NotRational {
    /// Where in the source the problem is.
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Function { span, .. }
                | Self::Symbol { span, .. }
                | Self::Exponent { span }
                | Self::ZeroDivision { span } => span.clone(),
        }
    }
}

impl From<NotRational> for rateq_error::Error {
    fn from(kind: NotRational) -> Self {
        rateq_error::Error::new(vec![kind.span()], kind)
    }
}

/// An expression converted to a ratio of polynomials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// The combined ratio. Denominators are multiplied together without cancellation.
    pub value: RationalFn,

    /// The numerator of every nonconstant divisor in the expression, including bases raised to
    /// negative powers, as primitive polynomials in the order they appear. The expression is
    /// undefined wherever one of them vanishes, even if [`RationalFn::reduce`] would cancel it.
    pub divisors: Vec<Poly>,
}

/// Why an expression could not be converted to a ratio of polynomials.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// The expression is not a ratio of polynomials in the variable.
    NotRational(NotRational),

    /// Some part of the expression has a degree above the limit, such as `((x+1)**256)**256`.
    DegreeTooHigh {
        /// The degree the expression would reach.
        degree: usize,

        /// The largest degree allowed.
        max: usize,

        /// Where the oversized part appears.
        span: Range<usize>,
    },

    /// The time budget ran out.
    Timeout,
}

impl From<NotRational> for ConvertError {
    fn from(reason: NotRational) -> Self {
        Self::NotRational(reason)
    }
}

impl From<Timeout> for ConvertError {
    fn from(_: Timeout) -> Self {
        Self::Timeout
    }
}

/// Converts an expression to a ratio of polynomials in `var`.
///
/// No intermediate numerator or denominator may exceed `max_degree`, and the conversion stops
/// with [`ConvertError::Timeout`] once `budget` runs out.
pub fn from_expr(
    expr: &Expr,
    var: &str,
    max_degree: usize,
    budget: &Budget,
) -> Result<Conversion, ConvertError> {
    let mut converter = Converter { var, max_degree, budget, divisors: Vec::new() };
    let value = converter.convert(expr)?;
    Ok(Conversion { value, divisors: converter.divisors })
}

struct Converter<'a> {
    var: &'a str,
    max_degree: usize,
    budget: &'a Budget,
    divisors: Vec<Poly>,
}

impl Converter<'_> {
    fn convert(&mut self, expr: &Expr) -> Result<RationalFn, ConvertError> {
        match expr {
            Expr::Literal(Literal::Number(num)) => rat_from_decimal(&num.value)
                .map(RationalFn::constant)
                .ok_or_else(|| NotRational::Symbol {
                    name: num.value.clone(),
                    var: self.var.to_owned(),
                    span: num.span.clone(),
                }.into()),
            Expr::Literal(Literal::Symbol(sym)) if sym.name == self.var => Ok(RationalFn::poly(Poly::x())),
            Expr::Literal(Literal::Symbol(sym)) => Err(NotRational::Symbol {
                name: sym.name.clone(),
                var: self.var.to_owned(),
                span: sym.span.clone(),
            }.into()),
            Expr::Paren(paren) => self.convert(&paren.expr),
            Expr::Call(call) => {
                let name = &call.name.name;
                let suggestion = KNOWN_FUNCTIONS
                    .iter()
                    .find(|known| **known != name.as_str() && levenshtein(known, name) < 2)
                    .map(|known| known.to_string());
                Err(NotRational::Function { name: name.clone(), span: call.span(), suggestion }.into())
            },
            Expr::Unary(unary) => {
                let operand = self.convert(&unary.operand)?;
                Ok(match unary.op.kind {
                    UnaryOpKind::Neg => -&operand,
                    UnaryOpKind::Pos => operand,
                })
            },
            Expr::Binary(binary) => {
                self.budget.check("convert")?;
                let lhs = self.convert(&binary.lhs)?;
                let value = match binary.op.kind {
                    BinOpKind::Add => &lhs + &self.convert(&binary.rhs)?,
                    BinOpKind::Sub => &lhs - &self.convert(&binary.rhs)?,
                    BinOpKind::Mul => &lhs * &self.convert(&binary.rhs)?,
                    BinOpKind::Div => {
                        let rhs = self.convert(&binary.rhs)?;
                        self.record_divisor(rhs.num(), binary.rhs.span())?;
                        lhs.checked_div(&rhs)
                            .ok_or(NotRational::ZeroDivision { span: binary.rhs.span() })?
                    },
                    BinOpKind::Exp => {
                        let n = self.exponent(&binary.rhs)?;
                        let degree = lhs.degree() * n.unsigned_abs() as usize;
                        self.bounded(degree, binary.span())?;
                        if n < 0 {
                            self.record_divisor(lhs.num(), binary.lhs.span())?;
                        }
                        lhs.powi(n, self.budget)?
                            .ok_or(NotRational::ZeroDivision { span: binary.lhs.span() })?
                    },
                };
                self.bounded(value.degree(), binary.span())?;
                Ok(value)
            },
        }
    }

    /// Fails if `degree` is above the limit.
    fn bounded(&self, degree: usize, span: Range<usize>) -> Result<(), ConvertError> {
        if degree > self.max_degree {
            return Err(ConvertError::DegreeTooHigh { degree, max: self.max_degree, span });
        }
        Ok(())
    }

    /// Records the numerator of a divisor, failing if it is identically zero.
    fn record_divisor(&mut self, num: &Poly, span: Range<usize>) -> Result<(), NotRational> {
        if num.is_zero() {
            return Err(NotRational::ZeroDivision { span });
        }
        if !num.is_constant() {
            let divisor = num.primitive_part();
            if !self.divisors.contains(&divisor) {
                self.divisors.push(divisor);
            }
        }
        Ok(())
    }

    /// Evaluates an exponent, which must be a constant integer.
    fn exponent(&mut self, expr: &Expr) -> Result<i32, ConvertError> {
        let error = || ConvertError::NotRational(NotRational::Exponent { span: expr.span() });
        let value = match self.convert(expr) {
            Ok(value) => value.as_constant(),
            Err(ConvertError::Timeout) => return Err(ConvertError::Timeout),
            Err(_) => None,
        }.ok_or_else(error)?;
        if *value.denom() != 1 {
            return Err(error());
        }
        value.numer()
            .to_i32()
            .filter(|n| n.unsigned_abs() <= MAX_EXPONENT)
            .ok_or_else(error)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rateq_parser::parser::Parser;
    use super::*;

    fn poly(coeffs: &[i64]) -> Poly {
        Poly::new(coeffs.iter().map(|&c| rat(c)).collect())
    }

    fn convert(source: &str) -> Result<Conversion, NotRational> {
        match convert_within(source, 256, &Budget::unlimited()) {
            Ok(conversion) => Ok(conversion),
            Err(ConvertError::NotRational(reason)) => Err(reason),
            Err(err) => panic!("unexpected conversion error: {:?}", err),
        }
    }

    fn convert_within(source: &str, max_degree: usize, budget: &Budget) -> Result<Conversion, ConvertError> {
        let expr = Parser::new(source).try_parse_full::<Expr>().unwrap();
        from_expr(&expr, "x", max_degree, budget)
    }

    #[test]
    fn combines_terms() {
        let conversion = convert("1/(x-2) + 3").unwrap();
        assert_eq!(conversion.value.display("x"), "(3*x - 5)/(x - 2)");
        assert_eq!(conversion.divisors, vec![poly(&[-2, 1])]);
    }

    #[test]
    fn keeps_cancelled_divisors() {
        let conversion = convert("x**2/x").unwrap();
        assert_eq!(conversion.divisors, vec![poly(&[0, 1])]);

        let reduced = conversion.value.reduce(&Budget::unlimited()).unwrap();
        assert_eq!(reduced, RationalFn::poly(poly(&[0, 1])));
    }

    #[test]
    fn powers() {
        let conversion = convert("2**(-1)*x + x**(-2)").unwrap();
        assert_eq!(conversion.divisors, vec![poly(&[0, 1])]);
        let reduced = conversion.value.reduce(&Budget::unlimited()).unwrap();
        assert_eq!(reduced.display("x"), "(x**3/2 + 1)/x**2");

        assert_eq!(convert("(x+1)**(4/2)").unwrap().value, RationalFn::poly(poly(&[1, 2, 1])));
    }

    #[test]
    fn decimals_are_exact() {
        let conversion = convert("0.5*x").unwrap();
        assert_eq!(conversion.value.num(), &Poly::new(vec![rat(0), rat((1, 2))]));
    }

    #[test]
    fn rejects_non_rational() {
        assert!(matches!(convert("sin(x)"), Err(NotRational::Function { .. })));
        assert!(matches!(convert("y + 1"), Err(NotRational::Symbol { .. })));
        assert!(matches!(convert("x**(1/2)"), Err(NotRational::Exponent { .. })));
        assert!(matches!(convert("x**x"), Err(NotRational::Exponent { .. })));
        assert!(matches!(convert("x**1000"), Err(NotRational::Exponent { .. })));
        assert!(matches!(convert("1/(x-x)"), Err(NotRational::ZeroDivision { .. })));
        assert!(matches!(convert("0**(-1)"), Err(NotRational::ZeroDivision { .. })));
    }

    #[test]
    fn nested_powers_are_bounded() {
        assert!(matches!(
            convert_within("((x+1)**256)**256", 256, &Budget::unlimited()),
            Err(ConvertError::DegreeTooHigh { degree: 65536, max: 256, .. }),
        ));

        assert!(matches!(
            convert_within("(x+1)**200*(x-1)**200", 256, &Budget::unlimited()),
            Err(ConvertError::DegreeTooHigh { degree: 400, max: 256, .. }),
        ));
        assert_eq!(convert_within("(x**2)**3", 6, &Budget::unlimited()).unwrap().value.degree(), 6);
    }

    #[test]
    fn conversion_stops_when_budget_runs_out() {
        let budget = Budget::new(std::time::Duration::ZERO);
        assert_eq!(convert_within("(x+1)**20", 256, &budget), Err(ConvertError::Timeout));
        assert!(convert_within("x", 256, &budget).is_ok());
    }

    #[test]
    fn suggests_functions() {
        let Err(NotRational::Function { suggestion, .. }) = convert("sinn(x)") else {
            panic!("expected a function error");
        };
        assert_eq!(suggestion.as_deref(), Some("sin"));
    }

    #[test]
    fn evaluation() {
        let value = convert("1/(x-2)").unwrap().value;
        assert_eq!(value.eval_surd(&Surd::rational(rat(4))), Some(Surd::rational(rat((1, 2)))));
        assert_eq!(value.eval_surd(&Surd::rational(rat(2))), None);
    }
}
