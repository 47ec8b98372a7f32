use clap::{Parser, Subcommand};
use rateq_didactic::{DetailLevel, Mode};
use rateq_solver::Config;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "rateq", version)]
#[command(about = "Solve rational equations step by step and check student solutions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// The variable to solve for
    #[arg(long, global = true, default_value = "x")]
    pub var: String,

    /// Largest difference at which two numbers are considered equal
    #[arg(long, global = true)]
    pub tolerance: Option<f64>,

    /// Time budget for solving and simplifying, in milliseconds
    #[arg(long = "timeout-ms", global = true)]
    pub timeout_ms: Option<u64>,

    /// Significant digits of decimal approximations
    #[arg(long, global = true)]
    pub digits: Option<usize>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the canonical form of an equation
    Normalize {
        /// The equation, as plain text or LaTeX
        input: String,
    },

    /// Solve an equation and explain each step
    Solve {
        /// The equation, as plain text or LaTeX
        input: String,

        /// How to present the solution: concise, narrated or latex
        #[arg(short, long, default_value = "concise")]
        mode: Mode,

        /// Present the solution at a detail level instead: raw, process or shortcut
        #[arg(short, long, conflicts_with = "mode")]
        level: Option<DetailLevel>,

        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Grade a student's answer and written work
    Check {
        /// The instructor's equation
        equation: String,

        /// The student's final answer, such as `x = 7/2`
        #[arg(short, long, default_value = "")]
        answer: String,

        /// A line of the student's written work; repeat for each line
        #[arg(short = 'l', long = "line")]
        lines: Vec<String>,

        /// Print the full assessment as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Builds the pipeline configuration from the global options.
    pub fn config(&self) -> Config {
        let mut config = Config::default().variable(self.var.as_str());
        if let Some(tolerance) = self.tolerance {
            config = config.tolerance(tolerance);
        }
        if let Some(ms) = self.timeout_ms {
            config = config.time_budget(Duration::from_millis(ms));
        }
        if let Some(digits) = self.digits {
            config = config.significant_digits(digits);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn global_options() {
        let cli = Cli::parse_from(["rateq", "solve", "1/(t-2) = 3", "--var", "t", "--timeout-ms", "250"]);
        let config = cli.config();
        assert_eq!(config.variable, "t");
        assert_eq!(config.time_budget, Duration::from_millis(250));
        assert_eq!(config.tolerance, 1e-8);
    }

    #[test]
    fn solve_mode() {
        let cli = Cli::parse_from(["rateq", "solve", "x = 1", "--mode", "latex"]);
        assert!(matches!(cli.command, Some(Command::Solve { mode: Mode::Latex, level: None, .. })));

        assert!(Cli::try_parse_from(["rateq", "solve", "x = 1", "--mode", "verbose"]).is_err());
    }

    #[test]
    fn check_lines() {
        let cli = Cli::parse_from([
            "rateq", "check", "2*x + 1 = 5",
            "--answer", "x = 2",
            "--line", "2x = 4",
            "--line", "x = 2",
        ]);
        match cli.command {
            Some(Command::Check { answer, lines, json, .. }) => {
                assert_eq!(answer, "x = 2");
                assert_eq!(lines, vec!["2x = 4", "x = 2"]);
                assert!(!json);
            },
            _ => panic!("expected the check command"),
        }
    }
}
