use pretty_assertions::assert_eq;
use rateq_compute::{poly::Poly, root::Root, solve::SolveOutcome};
use rateq_parser::normalize::normalize;
use rateq_solver::{analyze::Side, solve_raw, AnalysisResult, Config};

fn solve(raw: &str) -> AnalysisResult {
    solve_raw(raw, &Config::default()).unwrap()
}

fn strings(roots: &[Root]) -> Vec<String> {
    roots.iter().map(ToString::to_string).collect()
}

#[test]
fn linear_equation() {
    let result = solve("2*x + 1 = 5");
    assert_eq!(strings(&result.solutions.valid), vec!["2"]);
    assert!(result.denominators.is_empty());
    assert!(result.excluded_values.is_empty());
    assert_eq!(result.lcd.unwrap().to_string(), "1");
}

#[test]
fn two_linear_denominators() {
    let result = solve("1/(x-2) = 3/(x+1)");
    let denominators = result.denominators.iter().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(denominators, vec!["x - 2", "x + 1"]);
    assert_eq!(strings(&result.excluded_values), vec!["2", "-1"]);
    assert_eq!(result.lcd.as_ref().unwrap().to_string(), "(x - 2)*(x + 1)");
    for root in &result.solutions.valid {
        assert!(!result.excluded_values.contains(root));
    }
}

#[test]
fn eq_call_form() {
    assert_eq!(normalize("Eq(x+1,5)").unwrap(), "x+1=5");
}

#[test]
fn comma_instead_of_equals() {
    assert_eq!(normalize("2*x+1,5").unwrap(), "2*x+1=5");
}

#[test]
fn extraneous_root_is_not_valid() {
    let result = solve("x**2/(x-3) = 9/(x-3)");
    assert_eq!(strings(&result.solutions.extraneous), vec!["3"]);
    assert_eq!(strings(&result.solutions.valid), vec!["-3"]);
}

#[test]
fn valid_roots_keep_denominators_nonzero() {
    let equations = [
        "1/(x-2) = 3/(x+1)",
        "x**2/(x-3) = 9/(x-3)",
        "1/(x-1) + 1/(x+1) = 2/(x**2-1)",
        "x/(x+2) + 1/x = 1",
        "1/x + 1/(x**2) = 6/(x**3)",
    ];
    for equation in equations {
        let result = solve(equation);
        for d in &result.denominators {
            for root in &result.solutions.valid {
                assert!(!root.as_exact().unwrap().is_root_of(&d.expand()), "{} zeroes {} in {}", root, d, equation);
            }
        }
        for root in &result.solutions.extraneous {
            let zeroes_one = result.denominators
                .iter()
                .any(|d| root.as_exact().unwrap().is_root_of(&d.expand()));
            assert!(zeroes_one, "{} in {}", root, equation);
        }
    }
}

#[test]
fn no_denominators_clears_to_difference() {
    for equation in ["3*x - 7 = x + 1", "x**2 + 2*x = 3", "(x - 1)*(x + 4) = 2*x"] {
        let result = solve(equation);
        assert!(result.denominators.is_empty());
        assert_eq!(result.lcd.as_ref().unwrap().to_string(), "1");

        let cleared = result.cleared.as_ref().unwrap();
        let lhs = result.terms.iter().filter(|t| t.side == Side::Left);
        let sum = lhs.fold(Poly::zero(), |acc, term| &acc + term.value.num());
        assert_eq!(cleared.lhs, sum);
        assert_eq!(cleared.polynomial, &cleared.lhs - &cleared.rhs);
    }
}

#[test]
fn normalizing_is_idempotent() {
    for raw in ["2*x + 1 = 5", "\\frac{1}{x-2} = \\frac{3}{x+1}", "Eq(x+1,5)", "x^2 = 4", "2x+3=7"] {
        let once = normalize(raw).unwrap();
        assert_eq!(normalize(&once).unwrap(), once);
    }
}

#[test]
fn quadratic_with_irrational_roots() {
    let result = solve("x = 3 - 1/x");
    assert_eq!(strings(&result.solutions.valid), vec!["3/2 - sqrt(5)/2", "3/2 + sqrt(5)/2"]);
    assert!(result.verification.iter().all(|record| record.satisfies));
}

#[test]
fn complex_roots() {
    let result = solve("x + 1/x = 1");
    assert_eq!(strings(&result.solutions.valid), vec!["1/2 - sqrt(3)*I/2", "1/2 + sqrt(3)*I/2"]);
    assert!(result.verification.iter().all(|record| record.satisfies));
}

#[test]
fn numeric_roots_of_a_cubic() {
    let result = solve("x**2 = 2/x");
    assert_eq!(result.solutions.valid.len(), 3);
    assert!(matches!(result.solutions.valid[0], Root::Approx { .. }));
    assert!(result.verification.iter().all(|record| record.numeric_agreement));
}

#[test]
fn timeout_is_partial() {
    let config = Config::default().time_budget(std::time::Duration::ZERO);
    let result = solve_raw("1/(x-2) = 3/(x+1)", &config).unwrap();
    assert!(!result.is_complete());
    assert!(result.solutions.valid.is_empty());
}

#[test]
fn other_variable() {
    let config = Config::default().variable("t");
    let result = solve_raw("1/t = 2", &config).unwrap();
    assert_eq!(strings(&result.solutions.valid), vec!["1/2"]);
    assert!(matches!(result.outcome, Ok(SolveOutcome::SingleValue(_))));
}
