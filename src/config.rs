//! Configuration module for pdfcombine.
//!
//! This module turns parsed CLI arguments into a validated, normalized
//! configuration that drives the combine process. It handles:
//! - Validation of argument combinations
//! - Application of defaults
//! - Angle normalization

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{PdfCombineError, Result};
use crate::input::InputSpec;

/// Output file used when `-o/--output` is not given.
pub const DEFAULT_OUTPUT: &str = "combined.pdf";

/// Page rotation, normalized to `[0, 360)` degrees clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rotation(u16);

impl Rotation {
    /// No rotation.
    pub const NONE: Self = Self(0);

    /// Build a rotation from a signed angle in degrees.
    ///
    /// Any integer multiple of 90 is accepted; negative angles rotate
    /// counter-clockwise and are normalized, so `-90` becomes 270 and
    /// `450` becomes 90.
    ///
    /// # Errors
    ///
    /// Returns [`PdfCombineError::InvalidAngle`] if `degrees` is not a
    /// multiple of 90.
    pub fn from_degrees(degrees: i64) -> Result<Self> {
        if degrees % 90 != 0 {
            return Err(PdfCombineError::InvalidAngle {
                value: degrees.to_string(),
            });
        }
        Ok(Self(degrees.rem_euclid(360) as u16))
    }

    /// Get rotation as degrees in `[0, 360)`.
    pub fn degrees(&self) -> u16 {
        self.0
    }

    /// True when no rotation is applied.
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// Compose two rotations additively.
    pub fn then(self, other: Rotation) -> Rotation {
        Self((self.0 + other.0) % 360)
    }
}

impl FromStr for Rotation {
    type Err = PdfCombineError;

    fn from_str(s: &str) -> Result<Self> {
        let degrees: i64 = s.trim().parse().map_err(|_| PdfCombineError::InvalidAngle {
            value: s.to_string(),
        })?;
        Self::from_degrees(degrees).map_err(|_| PdfCombineError::InvalidAngle {
            value: s.to_string(),
        })
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

impl Serialize for Rotation {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.0)
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Never overwrite, error if file exists (default).
    #[default]
    NoClobber,
    /// Always overwrite.
    Force,
}

/// Complete configuration for a combine operation.
///
/// This structure contains all settings needed to build and write the
/// combined document, derived and validated from CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input groups in command-line order.
    pub inputs: Vec<InputSpec>,

    /// Output PDF file path.
    pub output: PathBuf,

    /// Dry run mode - resolve the plan without writing output.
    pub dry_run: bool,

    /// Print the dry-run plan as JSON.
    pub json: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,
}

impl Config {
    /// Create a configuration with defaults for everything but the inputs.
    pub fn new(inputs: Vec<InputSpec>, output: impl Into<PathBuf>) -> Self {
        Self {
            inputs,
            output: output.into(),
            dry_run: false,
            json: false,
            verbose: false,
            quiet: false,
            overwrite_mode: OverwriteMode::default(),
        }
    }

    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[InputSpec] {
        self.inputs.as_ref()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PdfCombineError::InvalidConfig`] if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - `--json` is used without `--dry-run`
    /// - The output path has no file name or names one of the inputs
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(PdfCombineError::invalid_config("No input files specified"));
        }

        if self.verbose && self.quiet {
            return Err(PdfCombineError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if self.json && !self.dry_run {
            return Err(PdfCombineError::invalid_config(
                "--json is only available together with --dry-run",
            ));
        }

        if self.output.file_name().is_none() {
            return Err(PdfCombineError::invalid_config(format!(
                "Output path does not name a file: {}",
                self.output.display()
            )));
        }

        for input in &self.inputs {
            if same_file(input.path(), &self.output) {
                return Err(PdfCombineError::invalid_config(format!(
                    "Output file cannot be the same as an input file: {}",
                    self.output.display()
                )));
            }
        }

        Ok(())
    }

    /// Check if progress output should be displayed.
    ///
    /// Returns false in quiet mode, and for a JSON dry run so stdout only
    /// carries the JSON document.
    pub fn should_print(&self) -> bool {
        !self.quiet && !(self.dry_run && self.json)
    }
}

/// Compare two paths, resolving them when both exist on disk.
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
