//! Substituting roots back into the original equation.

use rateq_compute::{
    approx::within,
    budget::Budget,
    error::SimplifyError,
    ratfn::RationalFn,
    root::Root,
    surd::Surd,
};
use rateq_parser::parser::{
    ast::{Expr, LitSym, Literal},
    Parser,
};
use rug::Complex;
use tracing::trace;

/// One side of the original equation evaluated at a root.
#[derive(Debug, Clone, PartialEq)]
pub struct SideCheck {
    /// The side as written.
    pub expr: Expr,

    /// The side with the root substituted for the variable.
    pub substituted: Expr,

    /// The exact value, for exact roots.
    pub exact: Option<Surd>,

    /// The numeric value.
    pub approx: Option<Complex>,
}

/// The check of one root against the original equation.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationRecord {
    /// The root being checked.
    pub root: Root,

    /// The left side at the root.
    pub lhs: SideCheck,

    /// The right side at the root.
    pub rhs: SideCheck,

    /// Whether the root satisfies the equation. For exact roots, this is exact equality of both
    /// sides. Approximate roots can only be checked numerically, so this is the same as
    /// [`VerificationRecord::numeric_agreement`].
    pub satisfies: bool,

    /// Whether both sides agree numerically within the configured tolerance.
    pub numeric_agreement: bool,

    /// Why a side could not be evaluated, if one could not.
    pub error: Option<SimplifyError>,
}

/// Converts a root into an expression that can be substituted for the variable.
fn root_expr(root: &Root) -> Expr {
    let text = root.to_string();
    Parser::new(&text)
        .try_parse_full::<Expr>()
        .unwrap_or_else(|_| Expr::Literal(Literal::Symbol(LitSym {
            name: text.clone(),
            span: 0..text.len(),
        })))
}

/// Evaluates one side at the root.
fn check_side(
    expr: &Expr,
    value: &RationalFn,
    root: &Root,
    var: &str,
    root_expr: &Expr,
) -> (SideCheck, Option<SimplifyError>) {
    let substituted = expr.substitute(var, root_expr);
    let (exact, approx) = match root {
        Root::Exact(surd) => {
            let exact = value.eval_surd(surd);
            let approx = exact.as_ref().map(Surd::to_complex);
            (exact, approx)
        },
        Root::Approx { value: x, .. } => (None, value.eval_complex(x)),
    };
    let error = approx.is_none().then_some(SimplifyError::DivisionByZero);
    (SideCheck { expr: expr.clone(), substituted, exact, approx }, error)
}

/// Substitutes `root` into both sides of the original equation. `sides` pairs each side as written
/// with its value as an unreduced ratio of polynomials.
pub(super) fn verify(
    root: &Root,
    sides: [(&Expr, &RationalFn); 2],
    var: &str,
    tolerance: f64,
    budget: &Budget,
) -> VerificationRecord {
    let replacement = root_expr(root);
    let [(lhs_expr, lhs_value), (rhs_expr, rhs_value)] = sides;

    if let Err(timeout) = budget.check("verification") {
        let unevaluated = |expr: &Expr| SideCheck {
            expr: expr.clone(),
            substituted: expr.substitute(var, &replacement),
            exact: None,
            approx: None,
        };
        return VerificationRecord {
            root: root.clone(),
            lhs: unevaluated(lhs_expr),
            rhs: unevaluated(rhs_expr),
            satisfies: false,
            numeric_agreement: false,
            error: Some(timeout.into()),
        };
    }

    let (lhs, lhs_error) = check_side(lhs_expr, lhs_value, root, var, &replacement);
    let (rhs, rhs_error) = check_side(rhs_expr, rhs_value, root, var, &replacement);

    let numeric_agreement = match (&lhs.approx, &rhs.approx) {
        (Some(a), Some(b)) => within(a, b, tolerance),
        _ => false,
    };
    let satisfies = match (root, &lhs.exact, &rhs.exact) {
        (Root::Exact(_), Some(a), Some(b)) => a == b,
        (Root::Exact(_), _, _) => false,
        (Root::Approx { .. }, _, _) => numeric_agreement,
    };
    trace!(target: "analyze", %root, satisfies, numeric_agreement, "verified root");

    VerificationRecord {
        root: root.clone(),
        lhs,
        rhs,
        satisfies,
        numeric_agreement,
        error: lhs_error.or(rhs_error),
    }
}
