//! Numeric evaluation of parsed expressions.
//!
//! Values are [`Complex`] numbers at [`PRECISION`] bits, so square roots of negative numbers and
//! the imaginary unit `I` evaluate without special cases.

use crate::{error::SimplifyError, primitive::{complex, float, rat_from_decimal, PRECISION}};
use rateq_parser::parser::{
    ast::{Binary, Call, Expr, Literal, Unary},
    token::op::{BinOpKind, UnaryOpKind},
};
use rug::{float::Constant, ops::Pow, Complex, Float};

/// The largest integer exponent computed by repeated multiplication. Larger or non-integer
/// exponents go through the complex logarithm.
const MAX_INTEGER_EXPONENT: i32 = 1 << 16;

/// Values for free symbols.
#[derive(Debug, Clone, Copy, Default)]
pub struct Env<'a> {
    binding: Option<(&'a str, &'a Complex)>,
}

impl<'a> Env<'a> {
    /// An environment that binds the symbol `name` to `value`.
    pub fn with(name: &'a str, value: &'a Complex) -> Self {
        Self { binding: Some((name, value)) }
    }

    fn lookup(&self, name: &str) -> Option<Complex> {
        match self.binding {
            Some((bound, value)) if bound == name => Some(value.clone()),
            _ => match name {
                "I" => Some(complex((0, 1))),
                "pi" => Some(complex(Float::with_val(PRECISION, Constant::Pi))),
                "E" => Some(complex(float(1).exp())),
                _ => None,
            },
        }
    }
}

/// Any expression that can be evaluated to a number.
pub trait Evaluate {
    /// Evaluates the expression, looking up free symbols in `env`.
    fn eval(&self, env: &Env) -> Result<Complex, SimplifyError>;

    /// Evaluates the expression with only the built-in constants `I`, `pi` and `E` defined.
    fn eval_default(&self) -> Result<Complex, SimplifyError> {
        self.eval(&Env::default())
    }
}

impl Evaluate for Literal {
    fn eval(&self, env: &Env) -> Result<Complex, SimplifyError> {
        match self {
            Literal::Number(num) => rat_from_decimal(&num.value)
                .map(complex)
                .ok_or_else(|| SimplifyError::UnknownSymbol { name: num.value.clone() }),
            Literal::Symbol(sym) => env.lookup(&sym.name)
                .ok_or_else(|| SimplifyError::UnknownSymbol { name: sym.name.clone() }),
        }
    }
}

impl Evaluate for Call {
    fn eval(&self, env: &Env) -> Result<Complex, SimplifyError> {
        match (self.name.name.as_str(), self.sole_arg()) {
            ("sqrt", Some(arg)) => Ok(arg.eval(env)?.sqrt()),
            (name, _) => Err(SimplifyError::UnknownFunction { name: name.to_owned() }),
        }
    }
}

impl Evaluate for Unary {
    fn eval(&self, env: &Env) -> Result<Complex, SimplifyError> {
        let operand = self.operand.eval(env)?;
        Ok(match self.op.kind {
            UnaryOpKind::Neg => -operand,
            UnaryOpKind::Pos => operand,
        })
    }
}

impl Evaluate for Binary {
    fn eval(&self, env: &Env) -> Result<Complex, SimplifyError> {
        let left = self.lhs.eval(env)?;
        let right = self.rhs.eval(env)?;
        match self.op.kind {
            BinOpKind::Add => Ok(left + right),
            BinOpKind::Sub => Ok(left - right),
            BinOpKind::Mul => Ok(left * right),
            BinOpKind::Div if right.is_zero() => Err(SimplifyError::DivisionByZero),
            BinOpKind::Div => Ok(left / right),
            BinOpKind::Exp => power(left, right),
        }
    }
}

/// Raises `base` to `exponent`, exactly when the exponent is a small integer.
fn power(base: Complex, exponent: Complex) -> Result<Complex, SimplifyError> {
    let integer = exponent.imag().is_zero()
        .then(|| exponent.real().to_integer())
        .flatten()
        .filter(|n| *exponent.real() == *n)
        .and_then(|n| n.to_i32())
        .filter(|n| n.abs() <= MAX_INTEGER_EXPONENT);

    match integer {
        Some(n) if n < 0 && base.is_zero() => Err(SimplifyError::DivisionByZero),
        Some(n) => Ok(base.pow(n)),
        None if base.is_zero() => Ok(base),
        None => Ok(base.pow(&exponent)),
    }
}

impl Evaluate for Expr {
    fn eval(&self, env: &Env) -> Result<Complex, SimplifyError> {
        match self {
            Expr::Literal(literal) => literal.eval(env),
            Expr::Paren(paren) => paren.expr.eval(env),
            Expr::Call(call) => call.eval(env),
            Expr::Unary(unary) => unary.eval(env),
            Expr::Binary(binary) => binary.eval(env),
        }
    }
}

/// Evaluates an expression with no free variables.
pub fn eval_numeric(expr: &Expr) -> Result<Complex, SimplifyError> {
    expr.eval_default()
}
