//! Argument definitions and dispatch

use crate::commands;
use crate::config::CliConfig;
use crate::logging;
use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

fn file_arg() -> Arg {
    Arg::new("file")
        .value_parser(value_parser!(PathBuf))
        .help("Input file (reads stdin when omitted)")
}

/// Build the `artifex` command
#[must_use]
pub fn build_cli() -> Command {
    Command::new("artifex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract typed artifacts from assistant text streams")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML file with [parser] and [logging] sections"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("trace, debug, info, warn or error (RUST_LOG overrides)"),
        )
        .subcommand(
            Command::new("parse")
                .about("Stream input through the parser and print what it finds")
                .arg(file_arg())
                .arg(
                    Arg::new("chunk-size")
                        .long("chunk-size")
                        .default_value("4096")
                        .value_parser(value_parser!(usize))
                        .help("Bytes per chunk fed to the parser"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("roundtrip")
                .about("Check that every artifact survives serialize and reparse")
                .arg(file_arg()),
        )
        .subcommand(Command::new("types").about("List registered artifact types"))
}

/// Resolve configuration: file first, then flags
///
/// # Errors
/// Fails when the config file cannot be loaded.
pub fn resolve_config(matches: &ArgMatches) -> anyhow::Result<CliConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    if let Some(level) = matches.get_one::<String>("log-level") {
        config = config.with_log_level(level.clone());
    }
    Ok(config)
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}

/// Run a parsed command line
///
/// # Errors
/// Fails on unreadable input or config, or when stdout is closed.
pub fn run(matches: &ArgMatches) -> anyhow::Result<ExitCode> {
    let config = resolve_config(matches)?;
    logging::init(&config.logging.level, config.logging.format)?;
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "artifex starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match matches.subcommand() {
        Some(("parse", args)) => {
            let input = read_input(args.get_one::<PathBuf>("file"))?;
            let chunk_size = args.get_one::<usize>("chunk-size").copied().unwrap_or(4096);
            let report = commands::parse_stream(&input, chunk_size, config.parser);
            if args.get_flag("json") {
                serde_json::to_writer_pretty(&mut out, &report)?;
                writeln!(out)?;
            } else {
                commands::write_parse_text(&report, &mut out)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(("roundtrip", args)) => {
            let input = read_input(args.get_one::<PathBuf>("file"))?;
            let report = commands::round_trip(&input, &config.parser);
            commands::write_round_trip(&report, &mut out)?;
            Ok(if report.all_survived() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Some(("types", _)) => {
            let registry = artifex_registry::global().read();
            commands::write_types(&registry, &mut out)?;
            Ok(ExitCode::SUCCESS)
        }
        Some((name, _)) => anyhow::bail!("unknown command '{name}'"),
        None => anyhow::bail!("no command given"),
    }
}
