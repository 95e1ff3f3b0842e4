mod command;
mod error;

use command::{Command, HELP};
use error::report_to_stderr;
use mathbot_compute::{
    compute,
    derivative,
    simplify,
    solve_equation_with,
    Bindings,
    Policy,
    Solution,
    SolveStep,
};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, IsTerminal, Read}};

/// The longest output printed for a single line, in characters.
const MAX_OUTPUT: usize = 2000;

/// Shortens the output to at most [`MAX_OUTPUT`] characters.
fn truncate(output: String) -> String {
    if output.chars().count() <= MAX_OUTPUT {
        return output;
    }

    let mut truncated = output.chars().take(MAX_OUTPUT - 3).collect::<String>();
    truncated.push_str("...");
    truncated
}

/// Describes the solution of an equation solved for `var`.
fn describe(var: &str, solution: &Solution) -> String {
    match solution {
        Solution::Roots { roots, .. } => roots.iter()
            .map(|root| format!("{} = {}", var, root))
            .collect::<Vec<_>>()
            .join(", "),
        Solution::Infinite => format!("every value of {} is a solution", var),
        _ => solution.to_string(),
    }
}

/// Solves the equation, and returns the working followed by the roots.
fn solve(var: &str, expr: &str, bindings: &Bindings) -> Result<String, mathbot_error::Error> {
    let mut steps: Vec<SolveStep> = Vec::new();
    let solution = solve_equation_with(expr, var, bindings, &Policy::default(), &mut steps)?
        .require_supported(expr)?;

    let mut lines = steps.iter()
        .map(|step| format!("  {}", step))
        .collect::<Vec<_>>();
    lines.push(describe(var, &solution));
    Ok(lines.join("\n"))
}

/// Executes a single line of input, printing the result or reporting the error.
fn execute(line: &str, bindings: &mut Bindings) {
    let command = match Command::parse(line) {
        Ok(command) => command,
        Err(usage) => {
            eprintln!("{}", usage);
            return;
        },
    };

    let (result, source) = match command {
        Command::Help => (Ok(HELP.to_string()), ""),
        Command::Compute(expr) => (compute(expr, bindings).map(|value| value.to_string()), expr),
        Command::Let { name, expr } => {
            let result = compute(expr, bindings).map(|value| {
                let output = format!("{} = {}", name, value);
                bindings.insert(name.to_string(), value);
                output
            });
            (result, expr)
        },
        Command::Simplify(expr) => (simplify(expr), expr),
        Command::Derivative { var, expr } => (derivative(expr, var), expr),
        Command::Solve { var, expr } => (solve(var, expr, bindings), expr),
    };

    match result {
        Ok(output) => println!("{}", truncate(output)),
        Err(err) => report_to_stderr(&err, source),
    }
}

fn main() {
    let mut args = std::env::args();
    args.next();

    let mut bindings = Bindings::new();

    if let Some(filename) = args.next() {
        // run each line of a file
        match fs::read_to_string(&filename) {
            Ok(input) => input.lines()
                .filter(|line| !line.trim().is_empty())
                .for_each(|line| execute(line, &mut bindings)),
            Err(err) => eprintln!("could not read {}: {}", filename, err),
        }
    } else if !io::stdin().is_terminal() {
        // read lines from stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("could not read stdin: {}", err);
            return;
        }
        input.lines()
            .filter(|line| !line.trim().is_empty())
            .for_each(|line| execute(line, &mut bindings));
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                return;
            },
        };

        fn process_line(rl: &mut DefaultEditor, bindings: &mut Bindings) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            execute(&input, bindings);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &mut bindings) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mathbot_compute::Value;
    use super::*;

    #[test]
    fn truncate_long_output() {
        let output = "1".repeat(MAX_OUTPUT + 10);
        let truncated = truncate(output);
        assert_eq!(truncated.chars().count(), MAX_OUTPUT);
        assert!(truncated.ends_with("..."));

        assert_eq!(truncate("14".to_string()), "14");
    }

    #[test]
    fn describe_roots() {
        let solution = Solution::Roots {
            degree: 2,
            kind: mathbot_compute::RootKind::DistinctReal,
            roots: vec![Value::from(2), Value::from(3)],
        };
        assert_eq!(describe("x", &solution), "x = 2, x = 3");
        assert_eq!(describe("x", &Solution::Infinite), "every value of x is a solution");
        assert_eq!(describe("x", &Solution::NoSolution), "no solution");
    }

    #[test]
    fn solve_shows_working() {
        let output = solve("x", "x^2 = 4", &Bindings::new()).unwrap();
        assert!(output.contains("polynomial of degree 2"));
        assert!(output.ends_with("x = -2, x = 2"));
    }
}
