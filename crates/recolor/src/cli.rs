//! Argument parsing

use std::path::PathBuf;

use recolor_css::rewrite::{DEFAULT_SCOPE_PROPERTY, DEFAULT_SCOPE_TOKENS};
use recolor_css::{Config, Operation, Percentage, PruneMode, SelectorScope};

use crate::error::{CliError, CliResult};
use crate::files::Output;

/// What the user asked for
#[derive(Debug)]
pub enum Command {
    Help,
    Version,
    Run(Invocation),
}

/// A transform over one stylesheet file
#[derive(Debug)]
pub struct Invocation {
    pub config: Config,
    pub input: PathBuf,
    pub output: Output,
}

/// Parse arguments, excluding the program name
pub fn parse_args(args: &[String]) -> CliResult<Command> {
    let Some(command) = args.first() else {
        return Err(CliError::usage("missing command"));
    };

    match command.as_str() {
        "--help" | "-h" => Ok(Command::Help),
        "--version" | "-V" => Ok(Command::Version),
        "darken" | "lighten" => {
            let percent = args
                .get(1)
                .ok_or_else(|| CliError::usage(format!("{} needs a <PERCENT>", command)))?;
            let pct = Percentage::parse(percent)?;
            let operation = if command == "darken" {
                Operation::Darken(pct)
            } else {
                Operation::Lighten(pct)
            };
            parse_invocation(operation, &args[2..])
        }
        "prune" => parse_invocation(Operation::Prune(PruneMode::Strict), &args[1..]),
        other => Err(CliError::usage(format!("unknown command '{}'", other))),
    }
}

fn parse_invocation(mut operation: Operation, args: &[String]) -> CliResult<Command> {
    let is_prune = matches!(operation, Operation::Prune(_));

    let mut input = None;
    let mut output = Output::InPlace;
    let mut scope_tokens: Option<Vec<String>> = None;
    let mut property: Option<String> = None;

    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            flag if is_prune && (is_scope_flag(flag) || flag == "--property") => {
                return Err(CliError::usage(format!("{} does not apply to prune", flag)));
            }
            "--scope" => {
                // A bare token list is only taken once <FILE> is known
                let list = if input.is_some() {
                    iter.next_if(|next| !next.starts_with("--"))
                } else {
                    None
                };
                scope_tokens = Some(list.map_or_else(default_tokens, |l| split_tokens(l)));
            }
            flag if flag.starts_with("--scope=") => {
                scope_tokens = Some(split_tokens(&flag["--scope=".len()..]));
            }
            "--property" => {
                let name = iter
                    .next()
                    .ok_or_else(|| CliError::usage("--property needs a <NAME>"))?;
                property = Some(name.clone());
            }
            "--keep-unmatched" => match operation {
                Operation::Prune(_) => operation = Operation::Prune(PruneMode::PassThrough),
                _ => return Err(CliError::usage("--keep-unmatched only applies to prune")),
            },
            "--out" => {
                let path = iter.next().ok_or_else(|| CliError::usage("--out needs a <PATH>"))?;
                output = Output::Path(PathBuf::from(path));
            }
            "--stdout" => output = Output::Stdout,
            flag if flag.starts_with("--") => {
                return Err(CliError::usage(format!("unknown option '{}'", flag)));
            }
            path => {
                if input.is_some() {
                    return Err(CliError::usage(format!("unexpected argument '{}'", path)));
                }
                input = Some(PathBuf::from(path));
            }
        }
    }

    let input = input.ok_or_else(|| CliError::usage("missing <FILE>"))?;

    let mut config = Config::new(operation);
    if scope_tokens.is_some() || property.is_some() {
        let tokens = scope_tokens.unwrap_or_else(default_tokens);
        let property = property.unwrap_or_else(|| DEFAULT_SCOPE_PROPERTY.to_string());
        config = config.with_scope(SelectorScope::new(tokens, property)?);
    }

    Ok(Command::Run(Invocation { config, input, output }))
}

fn is_scope_flag(flag: &str) -> bool {
    flag == "--scope" || flag.starts_with("--scope=")
}

fn default_tokens() -> Vec<String> {
    DEFAULT_SCOPE_TOKENS.iter().map(|t| t.to_string()).collect()
}

fn split_tokens(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
