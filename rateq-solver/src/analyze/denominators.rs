//! Denominators, excluded values and the LCD.

use super::{ClearedEquation, Side, Term};
use rateq_compute::{
    budget::{Budget, Timeout},
    error::SolveError,
    factor::{factor, Factored},
    poly::Poly,
    primitive::rat,
    ratfn::Conversion,
    root::Root,
    solve::{solve, SolveOptions},
};
use rateq_parser::parser::ast::Expr;
use tracing::trace;

/// The result of clearing denominators.
pub(super) struct Structure {
    pub terms: Vec<Term>,
    pub denominators: Vec<Factored>,
    pub lcd: Factored,
    pub cleared: ClearedEquation,
}

/// The denominator `f**m` of a single primitive factor.
fn prime_power(f: Poly, m: usize) -> Factored {
    Factored { content: rat(1), factors: vec![(f, m)] }
}

fn insert(denominators: &mut Vec<Factored>, d: Factored) {
    if !denominators.contains(&d) {
        trace!(target: "analyze", denominator = %d, "new denominator");
        denominators.push(d);
    }
}

/// Reduces every term, collects the denominators, and multiplies through by their LCD.
pub(super) fn clear(parts: Vec<(Side, Expr, Conversion)>, budget: &Budget) -> Result<Structure, Timeout> {
    let mut denominators = Vec::new();
    let mut reduced = Vec::with_capacity(parts.len());
    for (side, expr, conversion) in parts {
        let value = conversion.value.reduce(budget)?;
        for (f, m) in factor(value.den(), budget)?.factors {
            insert(&mut denominators, prime_power(f, m));
        }

        // a divisor that cancelled still restricts the variable
        for divisor in &conversion.divisors {
            for (f, _) in factor(divisor, budget)?.factors {
                if !value.den().is_divisible_by(&f) {
                    insert(&mut denominators, prime_power(f, 1));
                }
            }
        }
        reduced.push((side, expr, value));
    }

    let mut lcd = Poly::one();
    for d in &denominators {
        lcd = lcd.lcm(&d.expand(), budget)?;
    }
    let lcd_factored = factor(&lcd, budget)?;

    let mut terms = Vec::with_capacity(reduced.len());
    let (mut lhs, mut rhs) = (Poly::zero(), Poly::zero());
    for (side, expr, value) in reduced {
        // exact, since every factor of the denominator is a factor of the LCD
        let (quotient, _) = lcd.div_rem(value.den());
        let cleared = value.num() * &quotient;
        match side {
            Side::Left => lhs = &lhs + &cleared,
            Side::Right => rhs = &rhs + &cleared,
        }
        terms.push(Term { side, expr, value, cleared });
    }

    let polynomial = &lhs - &rhs;
    Ok(Structure {
        terms,
        denominators,
        lcd: lcd_factored,
        cleared: ClearedEquation { lhs, rhs, polynomial },
    })
}

/// Finds the roots of every denominator, in order, without repeats. If some denominator cannot be
/// solved, the roots of the others are still returned alongside the first error.
pub(super) fn excluded_values(
    denominators: &[Factored],
    options: &SolveOptions,
    budget: &Budget,
) -> (Vec<Root>, Option<SolveError>) {
    let mut values = Vec::new();
    let mut error = None;
    for (f, _) in denominators.iter().flat_map(|d| &d.factors) {
        match solve(f, options, budget) {
            Ok(outcome) => {
                for root in outcome.roots() {
                    if !values.contains(root) {
                        values.push(root.clone());
                    }
                }
            },
            Err(err) => {
                error.get_or_insert(err);
            },
        }
    }
    (values, error)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rateq_compute::ratfn::from_expr;
    use rateq_parser::parser::Parser;
    use super::*;

    fn parts(terms: &[(Side, &str)]) -> Vec<(Side, Expr, Conversion)> {
        terms.iter()
            .map(|(side, source)| {
                let expr = Parser::new(source).try_parse_full::<Expr>().unwrap();
                let conversion = from_expr(&expr, "x", 256, &Budget::unlimited()).unwrap();
                (*side, expr, conversion)
            })
            .collect()
    }

    #[test]
    fn repeated_factor_keeps_each_power() {
        let structure = clear(
            parts(&[(Side::Left, "1/(x-1)**2"), (Side::Left, "1/(x-1)"), (Side::Right, "1")]),
            &Budget::unlimited(),
        ).unwrap();
        let shown = structure.denominators.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(shown, vec!["(x - 1)**2", "x - 1"]);
        assert_eq!(structure.lcd.to_string(), "(x - 1)**2");
        assert_eq!(structure.terms[1].cleared.display("x"), "x - 1");
    }

    #[test]
    fn scaled_denominators_share_a_factor() {
        let structure = clear(
            parts(&[(Side::Left, "1/(2*x+2)"), (Side::Right, "1/(3*x+3)")]),
            &Budget::unlimited(),
        ).unwrap();
        assert_eq!(structure.denominators.len(), 1);
        assert_eq!(structure.lcd.to_string(), "x + 1");
    }

    #[test]
    fn quadratic_denominator_without_rational_roots() {
        let denominators = vec![prime_power(Poly::new(vec![rat(1), rat(0), rat(1)]), 1)];
        let (values, error) = excluded_values(&denominators, &SolveOptions::default(), &Budget::unlimited());
        let shown = values.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(shown, vec!["-I", "I"]);
        assert_eq!(error, None);
    }
}
