//! Command handlers for the trellis CLI.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;
use trellis_eval::{Engine, TemplateError};
use trellis_expr::{Evaluate, ExprError, Interpreter};
use trellis_value::{Map, Value};

use crate::args::{Command, EvalOptions, Input};
use crate::json::{from_json, object_from_json, to_json};

/// A failed command.
#[derive(Debug)]
pub enum CliError {
    /// A file or stdin could not be read.
    Io { source: String, error: std::io::Error },
    /// A file is not valid JSON, or the output could not be serialized.
    Json {
        source: String,
        error: serde_json::Error,
    },
    /// The globals file is valid JSON but not an object.
    GlobalsNotObject { path: PathBuf, got: &'static str },
    /// A `--set` literal failed to evaluate.
    Set { name: String, error: ExprError },
    /// The template failed to evaluate.
    Template(TemplateError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io { source, error } => write!(f, "cannot read {source}: {error}"),
            CliError::Json { source, error } => write!(f, "invalid JSON in {source}: {error}"),
            CliError::GlobalsNotObject { path, got } => write!(
                f,
                "globals file {} must contain a JSON object, got {got}",
                path.display()
            ),
            CliError::Set { name, error } => write!(f, "--set {name}: {error}"),
            CliError::Template(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io { error, .. } => Some(error),
            CliError::Json { error, .. } => Some(error),
            CliError::Set { error, .. } => Some(error),
            CliError::Template(error) => Some(error),
            CliError::GlobalsNotObject { .. } => None,
        }
    }
}

impl From<TemplateError> for CliError {
    fn from(error: TemplateError) -> Self {
        CliError::Template(error)
    }
}

/// Run an `eval` or `check` command.
pub fn run(command: &Command) -> Result<(), CliError> {
    match command {
        Command::Eval(options) => {
            let result = evaluate(options)?;
            println!("{}", render(&result, options.compact)?);
        }
        Command::Check(options) => {
            evaluate(options)?;
            println!("OK: {}", options.template);
        }
        Command::Help | Command::Version => {}
    }
    Ok(())
}

/// Load the template and globals named by `options` and evaluate.
pub fn evaluate(options: &EvalOptions) -> Result<Value, CliError> {
    let globals = load_globals(options)?;
    let template = load_template(&options.template)?;
    debug!(template = %options.template, globals = globals.len(), "evaluating");
    let engine = Engine::new(globals);
    Ok(engine.evaluate_with(&template, options.mode)?)
}

/// Globals from `--globals`, overlaid with `--set` bindings in order.
pub fn load_globals(options: &EvalOptions) -> Result<Map, CliError> {
    let mut globals = match &options.globals {
        Some(path) => {
            let json = parse_json(&read_file(path)?, &path.display().to_string())?;
            object_from_json(json).map_err(|got| CliError::GlobalsNotObject {
                path: path.clone(),
                got,
            })?
        }
        None => Map::new(),
    };
    for (name, literal) in &options.sets {
        globals.insert(name.clone(), set_value(name, literal)?);
    }
    Ok(globals)
}

/// Evaluate a `--set` literal against an empty scope.
pub fn set_value(name: &str, literal: &str) -> Result<Value, CliError> {
    Interpreter::new()
        .evaluate(literal, &())
        .map_err(|error| CliError::Set {
            name: name.to_owned(),
            error,
        })
}

/// Serialize a result as pretty or single-line JSON.
pub fn render(value: &Value, compact: bool) -> Result<String, CliError> {
    let json = to_json(value);
    let text = if compact {
        serde_json::to_string(&json)
    } else {
        serde_json::to_string_pretty(&json)
    };
    text.map_err(|error| CliError::Json {
        source: "output".to_owned(),
        error,
    })
}

fn load_template(input: &Input) -> Result<Value, CliError> {
    let text = match input {
        Input::Stdin => std::io::read_to_string(std::io::stdin()).map_err(|error| CliError::Io {
            source: input.to_string(),
            error,
        })?,
        Input::File(path) => read_file(path)?,
    };
    Ok(from_json(parse_json(&text, &input.to_string())?))
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|error| CliError::Io {
        source: path.display().to_string(),
        error,
    })
}

fn parse_json(text: &str, source: &str) -> Result<serde_json::Value, CliError> {
    serde_json::from_str(text).map_err(|error| CliError::Json {
        source: source.to_owned(),
        error,
    })
}

#[cfg(test)]
mod tests;
