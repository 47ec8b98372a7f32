use rateq_didactic::{explain::render_level, render, DetailLevel, Mode};
use rateq_solver::{solve_raw, AnalysisResult, Config};

const MODES: [Mode; 3] = [Mode::Concise, Mode::Narrated, Mode::Latex];

fn solve(raw: &str) -> AnalysisResult {
    solve_raw(raw, &Config::default()).unwrap()
}

#[test]
fn every_mode_names_the_answer() {
    let result = solve("1/(x-2) = 3/(x+1)");
    for mode in MODES {
        let text = render(&result, mode);
        match mode {
            Mode::Latex => assert!(text.contains(r"x = \frac{7}{2}"), "{}", text),
            _ => assert!(text.contains("x = 7/2"), "{}", text),
        }
    }
}

#[test]
fn extraneous_root_never_in_final_answer() {
    let result = solve("x**2/(x-3) = 9/(x-3)");

    let concise = render(&result, Mode::Concise);
    let (_, answer) = concise.split_once("Final solution").unwrap();
    assert_eq!(answer.trim(), "x = -3");

    let narrated = render(&result, Mode::Narrated);
    let (_, answer) = narrated.split_once("**Final Answer:**").unwrap();
    assert!(answer.contains("x = -3"));
    assert!(!answer.contains("x = 3"));
}

#[test]
fn partial_results_still_render() {
    let config = Config::default().time_budget(std::time::Duration::ZERO);
    let result = solve_raw("1/(x-2) = 3/(x+1)", &config).unwrap();
    for mode in MODES {
        let text = render(&result, mode);
        assert!(!text.is_empty());
    }
}

#[test]
fn rendering_is_deterministic() {
    let result = solve("x = 3 - 1/x");
    for mode in MODES {
        assert_eq!(render(&result, mode), render(&result, mode));
    }
}

#[test]
fn shortcut_level() {
    let result = solve("2*x + 1 = 5");
    let rendered = render_level(&result, DetailLevel::Shortcut);
    let modes = rendered.iter().map(|(mode, _)| *mode).collect::<Vec<_>>();
    assert_eq!(modes, vec![Mode::Concise, Mode::Latex]);
    assert!(rendered[1].1.starts_with(r"\begin{aligned}"));
}
