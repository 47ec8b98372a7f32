//! Written solutions of an analyzed equation.
//!
//! Every mode presents the same sections in the same order: the original equation, the LCD and
//! the cleared equation, the polynomial form, its roots, the extraneous roots and domain
//! restrictions, a check of each valid root, and the final answer. They differ only in the prose
//! around those sections.

mod concise;
mod latex;
mod narrated;

use rateq_compute::{approx::format_complex, factor::Factored, root::Root};
use rateq_solver::{analyze::SideCheck, AnalysisResult};
use std::{fmt, str::FromStr};

/// How to present a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// Short labelled steps with no commentary.
    Concise,

    /// Steps interleaved with a teacher's explanation of each one.
    Narrated,

    /// One `aligned` LaTeX block with a row per step.
    Latex,
}

/// How much explanation a learner asked for. Each level is shown as one or more [`Mode`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DetailLevel {
    /// The full narrated walkthrough.
    Raw,

    /// The concise steps.
    Process,

    /// The concise steps along with their LaTeX rendering.
    Shortcut,
}

impl DetailLevel {
    /// The modes that make up this level, in the order they are shown.
    pub fn modes(self) -> &'static [Mode] {
        match self {
            DetailLevel::Raw => &[Mode::Narrated],
            DetailLevel::Process => &[Mode::Concise],
            DetailLevel::Shortcut => &[Mode::Concise, Mode::Latex],
        }
    }
}

/// A mode or detail level name that is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName {
    /// The name given.
    pub name: String,

    /// The names that would have been accepted.
    pub expected: &'static [&'static str],
}

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown name `{}`, expected one of: {}", self.name, self.expected.join(", "))
    }
}

impl std::error::Error for UnknownName {}

impl FromStr for Mode {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "concise" => Ok(Mode::Concise),
            "narrated" => Ok(Mode::Narrated),
            "latex" => Ok(Mode::Latex),
            _ => Err(UnknownName {
                name: s.to_owned(),
                expected: &["concise", "narrated", "latex"],
            }),
        }
    }
}

impl FromStr for DetailLevel {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw" => Ok(DetailLevel::Raw),
            "process" => Ok(DetailLevel::Process),
            "shortcut" => Ok(DetailLevel::Shortcut),
            _ => Err(UnknownName {
                name: s.to_owned(),
                expected: &["raw", "process", "shortcut"],
            }),
        }
    }
}

/// Renders the analysis in the given mode.
pub fn render(result: &AnalysisResult, mode: Mode) -> String {
    match mode {
        Mode::Concise => concise::render(result),
        Mode::Narrated => narrated::render(result),
        Mode::Latex => latex::render(result),
    }
}

/// Renders the analysis in every mode of the given detail level.
pub fn render_level(result: &AnalysisResult, level: DetailLevel) -> Vec<(Mode, String)> {
    level.modes()
        .iter()
        .map(|&mode| (mode, render(result, mode)))
        .collect()
}

/// The decimal approximation of a side to show next to its exact value. Integers are already as
/// plain as they get, so they have none.
pub(crate) fn side_decimal(side: &SideCheck, digits: usize) -> Option<String> {
    let is_integer = side.exact
        .as_ref()
        .and_then(|exact| exact.as_rational())
        .map_or(false, |r| *r.denom() == 1);
    if is_integer {
        return None;
    }
    side.approx.as_ref().map(|z| format_complex(z, digits))
}

/// The decimal approximation to show next to a root in the final answer, given only for real
/// roots whose exact form is irrational.
fn root_decimal(root: &Root, digits: usize) -> Option<String> {
    (root.is_real() && !root.is_rational()).then(|| format_complex(&root.approx(), digits))
}

/// Formats the LCD as a factor of a product, parenthesizing a lone sum.
pub(crate) fn as_factor(lcd: &Factored, var: &str) -> String {
    let lone_sum = lcd.content == 1
        && matches!(lcd.factors.as_slice(), [(f, 1)] if f.term_count() > 1);
    if lone_sum {
        format!("({})", lcd.display(var))
    } else {
        lcd.display(var)
    }
}

/// Joins values with commas.
pub(crate) fn list<T: ToString>(items: &[T]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rateq_solver::{solve_raw, Config};
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("Concise".parse::<Mode>(), Ok(Mode::Concise));
        assert_eq!(" latex ".parse::<Mode>(), Ok(Mode::Latex));
        assert_eq!("shortcut".parse::<DetailLevel>(), Ok(DetailLevel::Shortcut));
        assert!("verbose".parse::<Mode>().is_err());
    }

    #[test]
    fn detail_levels() {
        assert_eq!(DetailLevel::Raw.modes(), &[Mode::Narrated]);
        assert_eq!(DetailLevel::Process.modes(), &[Mode::Concise]);
        assert_eq!(DetailLevel::Shortcut.modes(), &[Mode::Concise, Mode::Latex]);

        let result = solve_raw("1/(x-2) = 3/(x+1)", &Config::default()).unwrap();
        let rendered = render_level(&result, DetailLevel::Shortcut);
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[1].1, render(&result, Mode::Latex));
    }

    #[test]
    fn final_decimals_only_for_irrational_roots() {
        let result = solve_raw("x = 3 - 1/x", &Config::default()).unwrap();
        assert_eq!(root_decimal(&result.solutions.valid[0], 8).as_deref(), Some("0.38196601"));

        let result = solve_raw("1/(x-2) = 3/(x+1)", &Config::default()).unwrap();
        assert_eq!(root_decimal(&result.solutions.valid[0], 8), None);
    }
}
