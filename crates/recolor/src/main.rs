//! Recolor - darken, lighten or prune stylesheet colors
//!
//! Usage: recolor <COMMAND> [ARGS] <FILE>

mod cli;
mod error;
mod files;

use std::env;
use std::process::ExitCode;

use cli::{Command, Invocation};
use error::CliResult;
use files::{read_stylesheet, write_stylesheet};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("recolor");

    let command = match cli::parse_args(args.get(1..).unwrap_or_default()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run '{} --help' for usage.", program);
            return ExitCode::FAILURE;
        }
    };

    match command {
        Command::Help => {
            print_usage(program);
            ExitCode::SUCCESS
        }
        Command::Version => {
            println!("Recolor {}", VERSION);
            ExitCode::SUCCESS
        }
        Command::Run(invocation) => match execute(&invocation) {
            Ok(Some(text)) => {
                print!("{}", text);
                ExitCode::SUCCESS
            }
            Ok(None) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn print_usage(program: &str) {
    println!(
        r#"Recolor {} - darken, lighten or prune stylesheet colors

USAGE:
    {} darken  <PERCENT> <FILE> [OPTIONS]
    {} lighten <PERCENT> <FILE> [OPTIONS]
    {} prune   <FILE> [OPTIONS]

PERCENT:
    A fraction (0.3) or a percentage (30%) between 0 and 1 / 0% and 100%

OPTIONS:
    -h, --help              Print this help message
    -V, --version           Print version information
    --scope [a,b,...]       Only rewrite blocks whose selector contains one of
                            these tokens (default: btn,text,badge). A bare
                            list is read only after <FILE>; before it, use
                            --scope=a,b
    --property <NAME>       Property rewritten in scoped blocks (default: color)
    --keep-unmatched        prune: keep text outside rule blocks
    --out <PATH>            Write to PATH instead of overwriting FILE
    --stdout                Print the result instead of writing a file

EXAMPLES:
    {} darken 30% styles.css
    {} lighten 75% styles.css --scope --out modified_styles.css
    {} prune styles.css --stdout

"#,
        VERSION, program, program, program, program, program, program
    );
}

/// Run one transform. Returns the text to print when writing to stdout.
fn execute(invocation: &Invocation) -> CliResult<Option<String>> {
    let css = read_stylesheet(&invocation.input)?;
    log::info!("Read {} bytes", css.len());

    let outcome = recolor_css::run(&invocation.config, &css)?;
    if !outcome.warnings.is_empty() {
        log::warn!(
            "{} color value(s) could not be parsed and were left unchanged",
            outcome.warnings.len()
        );
    }

    let Some(target) = invocation.output.target(&invocation.input) else {
        return Ok(Some(outcome.text));
    };

    if !outcome.changed(&css) {
        log::info!("No changes detected");
        return Ok(None);
    }

    write_stylesheet(target, &outcome.text)?;
    log::info!("Stylesheet saved to {}", target.display());
    Ok(None)
}
