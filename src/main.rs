mod debug_report;

use contractor::registry::{CompiledType, DeclarativeType, RegistryBuilder};
use contractor::{LoadContext, NoLocalization, TypeRegistry, load_document};
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let registry = match config.registry.build() {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let ctx = LoadContext::new(&registry);
    let report = match load_document(&config.input, &ctx) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let options = debug_report::ReportOptions { color: config.color, show_saved: config.show_saved };
    debug_report::print_report(&report, &registry, &NoLocalization, &options);

    if !report.is_valid() {
        std::process::exit(1);
    }
}

struct CliConfig {
    input: String,
    registry: RegistryBuilder,
    color: bool,
    show_saved: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut path: Option<String> = None;
    let mut registry = TypeRegistry::builder();
    let mut color = io::stdout().is_terminal();
    let mut show_saved = false;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("contractor {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--save" => show_saved = true,
            "--type" => {
                let value = args.next().ok_or_else(|| "error: --type expects a value".to_string())?;
                registry = registry.declarative(parse_declarative(&value)?);
            }
            "--invalid-type" => {
                let value = args.next().ok_or_else(|| "error: --invalid-type expects a value".to_string())?;
                registry = registry.declarative(parse_declarative(&value)?.invalid());
            }
            "--compiled" => {
                let value = args.next().ok_or_else(|| "error: --compiled expects a value".to_string())?;
                registry = registry.compiled(CompiledType::new(value));
            }
            _ if arg.starts_with("--type=") => {
                registry = registry.declarative(parse_declarative(arg.trim_start_matches("--type="))?);
            }
            _ if arg.starts_with("--compiled=") => {
                registry = registry.compiled(CompiledType::new(arg.trim_start_matches("--compiled=")));
            }
            _ if arg.starts_with('-') && arg != "-" => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                if path.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                path = Some(arg);
            }
        }
    }

    let input = match path.as_deref() {
        None | Some("-") => read_stdin_input()?,
        Some(path) => {
            std::fs::read_to_string(path).map_err(|err| format!("error: failed to read '{path}': {err}"))?
        }
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, registry, color, show_saved })
}

/// `NAME` or `NAME=Generic title`.
fn parse_declarative(value: &str) -> Result<DeclarativeType, String> {
    let (name, title) = value.split_once('=').unwrap_or((value, value));
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("error: invalid contract type '{value}' (expected NAME or NAME=TITLE)"));
    }
    Ok(DeclarativeType::new(name, title.trim()))
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "contractor {version}

Validate contract requirement and parameter definitions.

Usage:
  contractor [OPTIONS] [FILE]

Reads FILE, or stdin when FILE is omitted or '-'.

Options:
  --type <NAME[=TITLE]>      Register a declarative contract type.
  --invalid-type <NAME>      Register a declarative contract type that failed
                             its own load (resolvable, never used as a title).
  --compiled <PATH>          Register a compiled contract type, e.g.
                             Contracts.Templates.PartTest.
  --save                     Print the saved session state of each requirement.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  RUST_LOG                   Log filter (default: warn).

Exit codes:
  0  Every definition is valid.
  1  At least one definition failed, or the input is malformed.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
