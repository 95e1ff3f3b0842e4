//! Parsing of the commands accepted by the REPL.

/// A single line of REPL input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `help`
    Help,

    /// `solve <var>: <expr>`
    Solve { var: &'a str, expr: &'a str },

    /// `d/d<var> <expr>`
    Derivative { var: &'a str, expr: &'a str },

    /// `simplify <expr>`
    Simplify(&'a str),

    /// `let <name> = <expr>`
    Let { name: &'a str, expr: &'a str },

    /// Any other input is an expression to compute.
    Compute(&'a str),
}

pub const HELP: &str = "\
commands:
  <expr>               compute an expression, such as `2x + 1`
  let <name> = <expr>  compute an expression and bind the result to a name
  simplify <expr>      simplify an expression
  d/d<var> <expr>      differentiate an expression, such as `d/dx x^2 + 3x`
  solve <var>: <expr>  solve a linear or quadratic equation, such as `solve x: x^2 = 4`
  help                 show this message";

/// Returns true if the name can be bound with `let`.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl<'a> Command<'a> {
    /// Parses a line of input. Returns a usage message if the line starts with a command keyword,
    /// but is malformed.
    pub fn parse(line: &'a str) -> Result<Self, String> {
        let line = line.trim();

        if line == "help" {
            return Ok(Self::Help);
        }

        if let Some(rest) = line.strip_prefix("solve ") {
            let (var, expr) = rest.split_once(':')
                .ok_or_else(|| "usage: solve <var>: <expr>".to_string())?;
            return Ok(Self::Solve { var: var.trim(), expr: expr.trim() });
        }

        if let Some(rest) = line.strip_prefix("d/d") {
            let (var, expr) = rest.split_once(char::is_whitespace)
                .ok_or_else(|| "usage: d/d<var> <expr>".to_string())?;
            return Ok(Self::Derivative { var, expr: expr.trim() });
        }

        if let Some(expr) = line.strip_prefix("simplify ") {
            return Ok(Self::Simplify(expr.trim()));
        }

        if let Some(rest) = line.strip_prefix("let ") {
            let (name, expr) = rest.split_once('=')
                .ok_or_else(|| "usage: let <name> = <expr>".to_string())?;
            let name = name.trim();
            if !is_identifier(name) {
                return Err(format!("`{}` is not a valid variable name", name));
            }
            return Ok(Self::Let { name, expr: expr.trim() });
        }

        Ok(Self::Compute(line))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn commands() {
        assert_eq!(Command::parse("help"), Ok(Command::Help));
        assert_eq!(
            Command::parse("solve x: x^2 = 4"),
            Ok(Command::Solve { var: "x", expr: "x^2 = 4" }),
        );
        assert_eq!(
            Command::parse("d/dt  t^2 + 1"),
            Ok(Command::Derivative { var: "t", expr: "t^2 + 1" }),
        );
        assert_eq!(Command::parse("simplify x + x"), Ok(Command::Simplify("x + x")));
        assert_eq!(Command::parse("let a = 2 + 3"), Ok(Command::Let { name: "a", expr: "2 + 3" }));
    }

    #[test]
    fn expressions() {
        assert_eq!(Command::parse("  2x + 1 "), Ok(Command::Compute("2x + 1")));
        assert_eq!(Command::parse("letter + 1"), Ok(Command::Compute("letter + 1")));
    }

    #[test]
    fn malformed() {
        assert!(Command::parse("solve x^2 = 4").is_err());
        assert!(Command::parse("let 2 = 3").is_err());
        assert!(Command::parse("d/dx").is_err());
    }
}
