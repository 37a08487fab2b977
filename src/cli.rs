//! CLI argument parsing for pdfcombine.
//!
//! Global options are parsed by `clap`. Everything from the first input
//! file on is handed to [`parse_inputs`], because clap cannot attach
//! options to the positional value they follow.
//!
//! # Examples
//!
//! ```no_run
//! use pdfcombine::cli::Cli;
//! use pdfcombine::config::Config;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! let config = Config::try_from(&cli).expect("invalid arguments");
//! println!("Combining {} input(s)", config.inputs.len());
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, DEFAULT_OUTPUT, OverwriteMode};
use crate::error::{PdfCombineError, Result};
use crate::input::parse_inputs;

/// Combine, reorder, subset and rotate pages of PDF files.
///
/// Each input file may be followed by options that apply to it alone:
///
///   <file.pdf> [-k|--keep <range> | -r|--remove <range>] [-a|--angle <degrees>]
///
/// A range is a comma-separated list of pages and inclusive intervals,
/// e.g. "4,1-2". Pages listed in --keep are emitted in the given order.
#[derive(Parser, Debug)]
#[command(name = "pdfcombine")]
#[command(version)]
#[command(about = "Combine, reorder, subset and rotate pages of PDF files", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Output PDF file path
    ///
    /// Defaults to combined.pdf in the current directory. May also be
    /// given among the inputs, but only once.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Dry run - resolve and print the page plan without writing output
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the dry-run plan as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Overwrite the output file if it already exists
    #[arg(short, long)]
    pub force: bool,

    /// Verbose output - show statistics and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Input files, each followed by its own options
    ///
    /// Examples:
    ///   pdfcombine foo.pdf --keep 1-2 bar.pdf --remove 1-2 -o out.pdf
    ///   pdfcombine scan.pdf -k 3,1-2 -a 90
    #[arg(
        required = true,
        value_name = "INPUT",
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub inputs: Vec<String>,
}

impl Cli {
    /// True if `-h` or `--help` appears among the trailing input tokens,
    /// where clap does not see it.
    ///
    /// Values of per-input options are skipped, so `--keep -h` is left for
    /// the tokenizer to reject.
    pub fn wants_help(&self) -> bool {
        let mut tokens = self.inputs.iter();
        while let Some(token) = tokens.next() {
            match token.as_str() {
                "-h" | "--help" => return true,
                "-k" | "--keep" | "-r" | "--remove" | "-a" | "--angle" | "-o" | "--output" => {
                    tokens.next();
                }
                _ => {}
            }
        }
        false
    }

    fn overwrite_mode(&self) -> OverwriteMode {
        if self.force {
            OverwriteMode::Force
        } else {
            OverwriteMode::NoClobber
        }
    }
}

impl TryFrom<&Cli> for Config {
    type Error = PdfCombineError;

    /// Tokenize the inputs and build a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns any tokenizer error, [`PdfCombineError::InvalidArgument`]
    /// if the output is given both before and among the inputs, or a
    /// validation error.
    fn try_from(cli: &Cli) -> Result<Self> {
        let parsed = parse_inputs(&cli.inputs)?;

        let output = match (&cli.output, parsed.output) {
            (Some(_), Some(_)) => {
                return Err(PdfCombineError::invalid_argument(
                    "--output",
                    "output file given more than once",
                ));
            }
            (Some(output), None) => output.clone(),
            (None, Some(output)) => output,
            (None, None) => PathBuf::from(DEFAULT_OUTPUT),
        };

        let config = Config {
            inputs: parsed.inputs,
            output,
            dry_run: cli.dry_run,
            json: cli.json,
            verbose: cli.verbose,
            quiet: cli.quiet,
            overwrite_mode: cli.overwrite_mode(),
        };

        config.validate()?;
        Ok(config)
    }
}
