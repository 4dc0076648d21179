//! The stylegen Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions. Every handler returns whether it succeeded;
//! diagnostics are printed with `miette` as they are found so one failing
//! site does not hide the others.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use termcolor::Color;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::args::{Command, StyleGenArgs};
use crate::cli::output::{expansion_report, DiagnosticReport, Printer};
use crate::config::Config;
use crate::discovery::{discover_sources, plan_outputs};
use crate::engine::{expand_source, render, ExpansionContext, FileExpansion, RenderOptions};
use crate::errors::{io_error, print_error, SourceContext, StyleGenError, ValidationContext};
use crate::macros::MacroRegistry;
use crate::syntax::{lower_site, parser};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() -> ExitCode {
    let args = StyleGenArgs::parse();
    init_tracing(args.verbose);

    let printer = Printer::new(args.color.choice(atty::Stream::Stdout));
    let result = Config::load(args.config.as_deref())
        .and_then(|config| dispatch(args.command, &config, printer));

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            print_error(e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("stylegen={}", default_level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn dispatch(command: Command, config: &Config, mut printer: Printer) -> Result<bool, StyleGenError> {
    match command {
        Command::Expand { file, json } => handle_expand(&file, json, config, &mut printer),
        Command::Generate { paths, out_dir } => {
            handle_generate(&paths, out_dir.as_deref(), config, &mut printer)
        }
        Command::Check { paths, out_dir } => {
            handle_check(&paths, out_dir.as_deref(), config, &mut printer)
        }
        Command::Ast { file } => handle_ast(&file, &mut printer),
        Command::ListMacros => {
            printer.print_macro_table(&MacroRegistry::for_targets(&config.targets()));
            Ok(true)
        }
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

/// Handles the `expand` subcommand.
fn handle_expand(
    path: &Path,
    json: bool,
    config: &Config,
    printer: &mut Printer,
) -> Result<bool, StyleGenError> {
    let source = read_source(path)?;
    let mut expansion = expand_source(&ExpansionContext::from_config(source, config))?;

    if json {
        printer.plain(&to_json(&expansion_report(&expansion))?);
    } else {
        printer.print_expansion(&expansion);
    }

    Ok(report_errors(&mut expansion))
}

/// Handles the `generate` subcommand.
fn handle_generate(
    paths: &[PathBuf],
    out_dir: Option<&Path>,
    config: &Config,
    printer: &mut Printer,
) -> Result<bool, StyleGenError> {
    let mut ok = true;

    for (file, target) in plan_outputs(discover_sources(paths, config)?, config, out_dir)? {
        let Some(rendered) = render_file(&file, config, &mut ok)? else {
            continue;
        };

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_error(parent.display(), e))?;
        }
        fs::write(&target, rendered).map_err(|e| io_error(target.display(), e))?;

        info!(source = %file.display(), output = %target.display(), "wrote generated file");
        printer.status("generated", Color::Green, &target);
    }

    Ok(ok)
}

/// Handles the `check` subcommand.
fn handle_check(
    paths: &[PathBuf],
    out_dir: Option<&Path>,
    config: &Config,
    printer: &mut Printer,
) -> Result<bool, StyleGenError> {
    let mut ok = true;

    for (file, target) in plan_outputs(discover_sources(paths, config)?, config, out_dir)? {
        let Some(rendered) = render_file(&file, config, &mut ok)? else {
            continue;
        };

        match fs::read_to_string(&target) {
            Ok(on_disk) if on_disk == rendered => {
                printer.status("fresh", Color::Green, &target);
            }
            Ok(on_disk) => {
                printer.status("stale", Color::Red, &target);
                printer.print_diff(&on_disk, &rendered);
                ok = false;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                printer.status("missing", Color::Red, &target);
                ok = false;
            }
            Err(e) => return Err(io_error(target.display(), e)),
        }
    }

    Ok(ok)
}

/// Handles the `ast` subcommand.
fn handle_ast(path: &Path, printer: &mut Printer) -> Result<bool, StyleGenError> {
    let source = read_source(path)?;
    let parsed = parser::parse(&source)?;
    let ctx = ValidationContext::new(source, "lower");

    let mut ok = true;
    let mut entries = Vec::new();
    for site in &parsed.sites {
        match lower_site(site, &ctx) {
            Ok(lowered) => entries.push(serde_json::json!({
                "declaration": lowered.declaration,
                "invocations": lowered.invocations,
            })),
            Err(error) => {
                entries.push(serde_json::json!({ "error": DiagnosticReport::from(&error) }));
                print_error(error);
                ok = false;
            }
        }
    }

    printer.plain(&to_json(&entries)?);
    Ok(ok)
}

// ============================================================================
// HELPERS
// ============================================================================

fn read_source(path: &Path) -> Result<SourceContext, StyleGenError> {
    let content = fs::read_to_string(path).map_err(|e| io_error(path.display(), e))?;
    Ok(SourceContext::from_file(path.display().to_string(), content))
}

/// Expands and renders one file for `generate` and `check`.
///
/// `None` when the file has no sites or has failing sites; in the second case
/// the errors are printed and `ok` is cleared.
fn render_file(path: &Path, config: &Config, ok: &mut bool) -> Result<Option<String>, StyleGenError> {
    let source = read_source(path)?;
    let content = source.content.clone();
    let mut expansion = expand_source(&ExpansionContext::from_config(source, config))?;

    if expansion.is_empty() {
        warn!(file = %path.display(), "no annotated declarations");
        return Ok(None);
    }

    let rendered = render(&content, &expansion, &RenderOptions::from_config(config));
    if !report_errors(&mut expansion) {
        *ok = false;
    }
    Ok(rendered)
}

/// Prints every site error. Returns true when there were none.
fn report_errors(expansion: &mut FileExpansion) -> bool {
    let errors = expansion.take_errors();
    let clean = errors.is_empty();
    for error in errors {
        print_error(error);
    }
    clean
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, StyleGenError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| io_error("<stdout>", std::io::Error::new(std::io::ErrorKind::Other, e)))
}
