//! Per-input groups and the tokenizer that builds them.
//!
//! Each input on the command line is a file followed by the options that
//! apply to it:
//!
//! ```text
//! <file.pdf> [-k|--keep <range> | -r|--remove <range>] [-a|--angle <degrees>]
//! ```
//!
//! An option always belongs to the closest file token before it.
//! `-o/--output <file>` may appear anywhere in the stream.

use std::path::{Path, PathBuf};

use crate::config::Rotation;
use crate::error::{PdfCombineError, Result};
use crate::range::PageRange;

/// One input file with its page selection and rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    path: PathBuf,
    keep: Option<PageRange>,
    remove: Option<PageRange>,
    rotation: Rotation,
}

/// How the pages of one input are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
    /// Every page, in natural order.
    All,
    /// Only the listed pages, in the listed order.
    Keep(&'a PageRange),
    /// Every page except the listed ones, in natural order.
    Remove(&'a PageRange),
}

impl InputSpec {
    /// An input that keeps every page without rotation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            keep: None,
            remove: None,
            rotation: Rotation::NONE,
        }
    }

    /// Keep only the pages in `range`.
    pub fn with_keep(mut self, range: PageRange) -> Self {
        self.keep = Some(range);
        self
    }

    /// Drop the pages in `range`.
    pub fn with_remove(mut self, range: PageRange) -> Self {
        self.remove = Some(range);
        self
    }

    /// Rotate every emitted page by `rotation`.
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Path of the input file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `--keep` range, if any.
    pub fn keep(&self) -> Option<&PageRange> {
        self.keep.as_ref()
    }

    /// The `--remove` range, if any.
    pub fn remove(&self) -> Option<&PageRange> {
        self.remove.as_ref()
    }

    /// Rotation applied to every page of this input.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Resolve the selection mode.
    ///
    /// # Errors
    ///
    /// Returns [`PdfCombineError::InvalidMode`] when both a keep and a
    /// remove range are present.
    pub fn selection(&self) -> Result<Selection<'_>> {
        match (&self.keep, &self.remove) {
            (None, None) => Ok(Selection::All),
            (Some(keep), None) => Ok(Selection::Keep(keep)),
            (None, Some(remove)) => Ok(Selection::Remove(remove)),
            (Some(_), Some(_)) => Err(PdfCombineError::InvalidMode {
                path: self.path.clone(),
            }),
        }
    }
}

/// Result of tokenizing the positional part of the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInputs {
    /// Input groups in command-line order.
    pub inputs: Vec<InputSpec>,
    /// Output path, if `-o/--output` appeared among the inputs.
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputOption {
    Keep,
    Remove,
    Angle,
}

impl InputOption {
    fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "-k" | "--keep" => Some(Self::Keep),
            "-r" | "--remove" => Some(Self::Remove),
            "-a" | "--angle" => Some(Self::Angle),
            _ => None,
        }
    }
}

fn is_output_flag(flag: &str) -> bool {
    matches!(flag, "-o" | "--output")
}

fn is_global_flag(flag: &str) -> bool {
    matches!(
        flag,
        "-n" | "--dry-run"
            | "--json"
            | "-f"
            | "--force"
            | "-v"
            | "--verbose"
            | "-q"
            | "--quiet"
            | "-h"
            | "--help"
            | "-V"
            | "--version"
    )
}

/// Group command-line tokens into [`InputSpec`]s.
///
/// A token that does not start with `-` opens a new input; the options that
/// follow apply to it until the next file token. Repeating an option on the
/// same input replaces the earlier value. Values may be given as the next
/// token or inline (`--keep=1-3`); the next token is always taken as the
/// value, so `--angle -90` works.
///
/// # Errors
///
/// - [`PdfCombineError::InvalidArgument`] for an unknown option, an option
///   before the first file, a missing value, or a second output path.
/// - [`PdfCombineError::InvalidInput`] wrapping the range or angle error
///   when a value does not parse.
///
/// # Examples
///
/// ```
/// use pdfcombine::input::parse_inputs;
///
/// let parsed = parse_inputs(["foo.pdf", "--keep", "1-2", "bar.pdf", "-o", "out.pdf"]).unwrap();
/// assert_eq!(parsed.inputs.len(), 2);
/// assert_eq!(parsed.inputs[0].keep().unwrap().pages(), &[1, 2]);
/// assert_eq!(parsed.output.unwrap().to_str(), Some("out.pdf"));
/// ```
pub fn parse_inputs<I, S>(tokens: I) -> Result<ParsedInputs>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut iter = tokens.into_iter().map(|t| t.as_ref().to_string());
    let mut parsed = ParsedInputs::default();

    while let Some(token) = iter.next() {
        if token == "-" {
            return Err(PdfCombineError::invalid_argument(
                token,
                "reading from standard input is not supported",
            ));
        }

        if !token.starts_with('-') {
            parsed.inputs.push(InputSpec::new(token));
            continue;
        }

        let (flag, inline_value) = match token.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => {
                (flag.to_string(), Some(value.to_string()))
            }
            _ => (token.clone(), None),
        };

        let option = InputOption::from_flag(&flag);
        if option.is_none() && !is_output_flag(&flag) {
            let reason = if is_global_flag(&flag) {
                "global options must come before the first input file"
            } else {
                "unknown option; expected --keep, --remove, --angle or --output"
            };
            return Err(PdfCombineError::invalid_argument(token, reason));
        }

        let Some(value) = inline_value.or_else(|| iter.next()) else {
            return Err(PdfCombineError::invalid_argument(flag, "requires a value"));
        };

        let Some(option) = option else {
            if parsed.output.is_some() {
                return Err(PdfCombineError::invalid_argument(
                    flag,
                    "output file given more than once",
                ));
            }
            parsed.output = Some(PathBuf::from(value));
            continue;
        };

        let Some(current) = parsed.inputs.last_mut() else {
            return Err(PdfCombineError::invalid_argument(
                flag,
                "must follow an input file",
            ));
        };

        let in_current = |err: PdfCombineError| err.in_input(current.path.clone(), &flag);
        match option {
            InputOption::Keep => {
                let range = PageRange::parse(&value).map_err(in_current)?;
                current.keep = Some(range);
            }
            InputOption::Remove => {
                let range = PageRange::parse(&value).map_err(in_current)?;
                current.remove = Some(range);
            }
            InputOption::Angle => {
                let rotation = value.parse::<Rotation>().map_err(in_current)?;
                current.rotation = rotation;
            }
        }
    }

    Ok(parsed)
}
