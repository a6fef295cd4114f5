//! Hand-parsed command-line arguments.

use std::fmt;
use std::path::PathBuf;

use trellis_eval::EvalMode;
use trellis_expr::is_identifier;

/// Where the template is read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => f.write_str("<stdin>"),
            Input::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Options shared by `eval` and `check`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalOptions {
    pub template: Input,
    pub globals: Option<PathBuf>,
    /// `--set` bindings as `(name, literal source)`, in command-line order.
    pub sets: Vec<(String, String)>,
    pub mode: EvalMode,
    pub compact: bool,
}

impl EvalOptions {
    pub fn new(template: Input) -> Self {
        EvalOptions {
            template,
            globals: None,
            sets: Vec::new(),
            mode: EvalMode::Full,
            compact: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Eval(EvalOptions),
    Check(EvalOptions),
    Help,
    Version,
}

/// A malformed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsageError(pub String);

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for UsageError {}

fn usage(message: impl Into<String>) -> UsageError {
    UsageError(message.into())
}

/// Parse the arguments following the program name.
pub fn parse_args(args: &[String]) -> Result<Command, UsageError> {
    let Some((command, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };

    match command.as_str() {
        "eval" => parse_eval_options("eval", rest).map(Command::Eval),
        "check" => parse_eval_options("check", rest).map(Command::Check),
        "help" | "--help" | "-h" => Ok(Command::Help),
        "version" | "--version" | "-V" => Ok(Command::Version),
        other => Err(usage(format!("unknown command '{other}'"))),
    }
}

fn parse_eval_options(command: &str, args: &[String]) -> Result<EvalOptions, UsageError> {
    let mut template = None;
    let mut globals = None;
    let mut sets = Vec::new();
    let mut mode = EvalMode::Full;
    let mut compact = false;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if let Some(path) = arg.strip_prefix("--globals=") {
            globals = Some(PathBuf::from(path));
        } else if arg == "--globals" {
            i += 1;
            let path = args
                .get(i)
                .ok_or_else(|| usage("--globals expects a file path"))?;
            globals = Some(PathBuf::from(path));
        } else if let Some(binding) = arg.strip_prefix("--set=") {
            sets.push(parse_set(binding)?);
        } else if arg == "--set" {
            i += 1;
            let binding = args
                .get(i)
                .ok_or_else(|| usage("--set expects <name>=<literal>"))?;
            sets.push(parse_set(binding)?);
        } else if arg == "--shallow" {
            mode = EvalMode::Shallow;
        } else if arg == "--compact" {
            compact = true;
        } else if arg == "-" || !arg.starts_with('-') {
            if template.is_some() {
                return Err(usage(format!("unexpected argument '{arg}'")));
            }
            template = Some(if arg == "-" {
                Input::Stdin
            } else {
                Input::File(PathBuf::from(arg))
            });
        } else {
            return Err(usage(format!("unknown option '{arg}'")));
        }
        i += 1;
    }

    let template =
        template.ok_or_else(|| usage(format!("{command} expects a template file or '-'")))?;
    Ok(EvalOptions {
        template,
        globals,
        sets,
        mode,
        compact,
    })
}

fn parse_set(binding: &str) -> Result<(String, String), UsageError> {
    let Some((name, literal)) = binding.split_once('=') else {
        return Err(usage(format!("--set expects <name>=<literal>, got '{binding}'")));
    };
    let name = name.trim();
    if !is_identifier(name) {
        return Err(usage(format!("--set name '{name}' is not an identifier")));
    }
    Ok((name.to_owned(), literal.to_owned()))
}

#[cfg(test)]
mod tests;
