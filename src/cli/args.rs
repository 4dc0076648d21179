//! Defines the command-line arguments and subcommands for the stylegen CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use termcolor::ColorChoice;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "stylegen",
    version,
    about = "Generates style and UI component boilerplate from annotated declarations."
)]
pub struct StyleGenArgs {
    /// Configuration file. Defaults to ./stylegen.yaml when it exists.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More log output on stderr: -v info, -vv debug, -vvv trace.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// When to colour output.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the declarations generated for each annotated site of a file.
    Expand {
        /// The source file to expand.
        #[arg(required = true)]
        file: PathBuf,
        /// Print JSON instead of source text.
        #[arg(long)]
        json: bool,
    },
    /// Write the expanded version of every source file that has annotated sites.
    Generate {
        /// Source files or directories to scan.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Directory for generated files instead of next to each source.
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
    /// Fail if any generated file is missing or out of date.
    Check {
        /// Source files or directories to scan.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Directory the generated files were written to.
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
    /// Show the parsed declarations and macro invocations of a file as JSON.
    Ast {
        /// The source file to parse.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// List all available macros with their documentation.
    ListMacros,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolves the mode for one output stream. `auto` colours only
    /// terminals.
    pub fn choice(self, stream: atty::Stream) -> ColorChoice {
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto if atty::is(stream) => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
        }
    }
}
