mod cli;
mod error;

use clap::Parser;
use cli::{Cli, Command};
use error::CliError;
use rateq_didactic::{
    check,
    explain::render_level,
    render,
    DetailLevel,
    Mode,
};
use rateq_solver::{pipeline::canonicalize, solve_raw, Config};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{io::{self, IsTerminal, Read}, process::ExitCode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logs go to stderr so stdout holds only results.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Prints the canonical form of an equation.
fn normalize(input: &str) -> Result<(), CliError> {
    let eq = canonicalize(input)?;
    println!("{}", eq.text());
    Ok(())
}

/// Solves an equation and prints its explanation in each requested mode.
fn solve(input: &str, modes: &[Mode], json: bool, config: &Config) -> Result<(), CliError> {
    let result = solve_raw(input, config)?;
    if json {
        let explanations = modes.iter()
            .map(|&mode| serde_json::json!({ "mode": mode, "text": render(&result, mode) }))
            .collect::<Vec<_>>();
        let out = serde_json::json!({
            "status": "ok",
            "analysis": result,
            "explanations": explanations,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let level = modes.iter().map(|&mode| render(&result, mode)).collect::<Vec<_>>();
        println!("{}", level.join("\n\n"));
    }
    Ok(())
}

/// Grades a student's answer and prints the assessment.
fn grade(equation: &str, answer: &str, lines: &[String], json: bool, config: &Config) -> Result<(), CliError> {
    let assessment = check(equation, answer, lines, config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    println!("Grade: {:?}", assessment.grade);
    for value in &assessment.student_values {
        println!("  {} = {}  (≈ {})", assessment.analysis.variable, value.expression, value.approx);
    }
    println!();
    for note in &assessment.feedback {
        println!("- {}", note);
    }
    if !assessment.verification.steps.is_empty() {
        println!();
        println!("Verification (score {}):", assessment.verification.score);
        for step in &assessment.verification.steps {
            println!("  {}", step);
        }
    }
    if !assessment.remedial_steps.is_empty() {
        println!();
        for step in &assessment.remedial_steps {
            println!("{}", step);
        }
    }
    Ok(())
}

/// Solves each non-blank line of piped input in concise mode.
fn solve_stdin(config: &Config) -> Result<bool, CliError> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let mut ok = true;
    for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match solve_raw(line, config) {
            Ok(result) => println!("{}\n", render(&result, Mode::Concise)),
            Err(err) => {
                CliError::from(err).report_to_stderr("input", line);
                ok = false;
            },
        }
    }
    Ok(ok)
}

/// Runs the interactive mode, solving each line entered.
fn repl(config: &Config) -> Result<(), CliError> {
    let mut rl = DefaultEditor::new()?;

    fn process_line(rl: &mut DefaultEditor, config: &Config) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        match solve_raw(&input, config) {
            Ok(result) => println!("{}", render_level(&result, DetailLevel::Process)
                .into_iter()
                .map(|(_, text)| text)
                .collect::<Vec<_>>()
                .join("\n\n")),
            Err(err) => CliError::from(err).report_to_stderr("input", &input),
        }
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, config) {
            return match err {
                ReadlineError::Eof | ReadlineError::Interrupted => Ok(()),
                err => Err(err.into()),
            };
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();
    let config = cli.config();

    let (result, json, source) = match &cli.command {
        Some(Command::Normalize { input }) => (normalize(input), false, input.as_str()),
        Some(Command::Solve { input, mode, level, json }) => {
            let modes = level.map_or_else(|| vec![*mode], |level| level.modes().to_vec());
            (solve(input, &modes, *json, &config), *json, input.as_str())
        },
        Some(Command::Check { equation, answer, lines, json }) => {
            (grade(equation, answer, lines, *json, &config), *json, equation.as_str())
        },
        None if !io::stdin().is_terminal() => {
            return match solve_stdin(&config) {
                Ok(true) => ExitCode::SUCCESS,
                Ok(false) => ExitCode::FAILURE,
                Err(err) => {
                    err.report_to_stderr("input", "");
                    ExitCode::FAILURE
                },
            };
        },
        None => (repl(&config), false, ""),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if json => {
            println!("{}", err.to_json());
            ExitCode::FAILURE
        },
        Err(err) => {
            err.report_to_stderr("input", source);
            ExitCode::FAILURE
        },
    }
}
