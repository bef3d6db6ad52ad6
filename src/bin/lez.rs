//! Command-line interface for lez
//!
//! Compiles a parsed lesson AST (JSON, as emitted by the upstream parser)
//! into the renderer-facing lesson document.
//!
//! Usage:
//!   lez compile `<ast.json>` [--format `<json|yaml>`] [--pretty]  - Compile and print the full output
//!   lez check `<ast.json>`                                      - Compile and print diagnostics only

use clap::{Arg, ArgAction, Command};
use lez::ast::AstDocument;
use lez::{Compiler, CompilerOutput};
use std::fmt;
use std::io::Read;

/// Errors at the CLI boundary (file and serialization problems, not
/// authoring diagnostics)
#[derive(Debug)]
enum CliError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(msg) => write!(f, "Error reading input: {msg}"),
            CliError::Parse(msg) => write!(f, "Error parsing AST: {msg}"),
            CliError::Serialize(msg) => write!(f, "Error serializing output: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

fn main() {
    let matches = Command::new("lez")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A compiler for the lez lesson format")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("compile")
                .about("Compile a parsed AST into a lesson document")
                .arg(
                    Arg::new("path")
                        .help("Path to the AST JSON file ('-' for stdin)")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('json' or 'yaml')")
                        .default_value("json"),
                )
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .help("Pretty-print JSON output")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Compile and report diagnostics without emitting the document")
                .arg(
                    Arg::new("path")
                        .help("Path to the AST JSON file ('-' for stdin)")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("compile", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let format = sub.get_one::<String>("format").unwrap();
            let pretty = sub.get_flag("pretty");
            handle_compile(path, format, pretty)
        }
        Some(("check", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            handle_check(path)
        }
        _ => unreachable!(),
    };

    match result {
        Ok(success) => {
            if !success {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}

fn read_ast(path: &str) -> Result<AstDocument, CliError> {
    let source = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| CliError::Io(e.to_string()))?;
        buffer
    } else {
        std::fs::read_to_string(path).map_err(|e| CliError::Io(e.to_string()))?
    };
    serde_json::from_str(&source).map_err(|e| CliError::Parse(e.to_string()))
}

fn serialize_output(
    output: &CompilerOutput,
    format: &str,
    pretty: bool,
) -> Result<String, CliError> {
    match format {
        "yaml" => serde_yaml::to_string(output).map_err(|e| CliError::Serialize(e.to_string())),
        "json" if pretty => {
            serde_json::to_string_pretty(output).map_err(|e| CliError::Serialize(e.to_string()))
        }
        "json" => serde_json::to_string(output).map_err(|e| CliError::Serialize(e.to_string())),
        other => Err(CliError::Serialize(format!("unknown format '{other}'"))),
    }
}

fn handle_compile(path: &str, format: &str, pretty: bool) -> Result<bool, CliError> {
    let ast = read_ast(path)?;
    let output = Compiler::new().compile(&ast);
    println!("{}", serialize_output(&output, format, pretty)?);
    Ok(output.success)
}

fn handle_check(path: &str) -> Result<bool, CliError> {
    let ast = read_ast(path)?;
    let output = Compiler::new().compile(&ast);

    for error in &output.errors {
        eprintln!("error {error}");
        if let Some(help) = &error.help {
            eprintln!("  = help: {help}");
        }
    }
    for warning in &output.warnings {
        eprintln!("warning {warning}");
        if let Some(help) = &warning.help {
            eprintln!("  = help: {help}");
        }
    }

    if output.success {
        println!(
            "ok: {} errori, {} avvisi",
            output.errors.len(),
            output.warnings.len()
        );
    } else {
        println!(
            "fallita: {} errori, {} avvisi",
            output.errors.len(),
            output.warnings.len()
        );
    }
    Ok(output.success)
}
