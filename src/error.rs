//! Error types for pdfcombine.
//!
//! Every failure is terminal for the current invocation: nothing is retried
//! and nothing is written unless the whole plan was built and assembled.
//! Messages carry enough context (file, option, offending token) for the
//! user to fix the command line.
//!
//! # Error Categories
//!
//! - **Argument Errors**: malformed page ranges, angles, unknown options
//! - **Plan Errors**: pages out of range, conflicting keep/remove
//! - **I/O Errors**: missing inputs, unreadable PDFs, output failures

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfcombine operations.
pub type Result<T> = std::result::Result<T, PdfCombineError>;

/// Main error type for pdfcombine operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfCombineError {
    /// A page-range string could not be parsed.
    #[error("Invalid page range '{range}': term '{term}' {reason}")]
    InvalidRange {
        /// The full range string as given.
        range: String,
        /// The offending comma-separated term.
        term: String,
        /// What is wrong with the term.
        reason: String,
    },

    /// A rotation angle is not an integer multiple of 90 degrees.
    #[error("Invalid angle '{value}': must be an integer multiple of 90 degrees")]
    InvalidAngle {
        /// The angle as given on the command line.
        value: String,
    },

    /// A command-line token could not be interpreted.
    #[error("Invalid argument '{token}': {reason}")]
    InvalidArgument {
        /// The offending token.
        token: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An option value attached to an input file was rejected.
    #[error("Invalid {option} value for {}\n  Reason: {source}", path.display())]
    InvalidInput {
        /// Input file the option belongs to.
        path: PathBuf,
        /// The option name as typed (e.g. `--keep`).
        option: String,
        /// The underlying parse error.
        #[source]
        source: Box<PdfCombineError>,
    },

    /// Both `--keep` and `--remove` were given for one input.
    #[error(
        "Conflicting options for {}: --keep and --remove cannot be combined on one input",
        path.display()
    )]
    InvalidMode {
        /// Input file with the conflicting options.
        path: PathBuf,
    },

    /// A requested page does not exist in the input file.
    #[error(
        "Page {page} in range '{range}' is out of range for {}\n  \
         PDF has {total_pages} page(s). Page numbers must be between 1 and {total_pages}",
        path.display()
    )]
    PageOutOfRange {
        /// Input file the range applies to.
        path: PathBuf,
        /// The first offending page number.
        page: u32,
        /// Number of pages the file actually has.
        total_pages: usize,
        /// The range string as given.
        range: String,
    },

    /// The resolved plan selects no pages at all.
    #[error("No pages selected: the combined document would be empty")]
    EmptyPlan,

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// The PDF library could not read the file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    UnreadablePdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason reported by the PDF library.
        reason: String,
    },

    /// PDF file is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// The combined document could not be written.
    #[error("Failed to write output file: {}\n  Reason: {source}", path.display())]
    OutputWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The output page tree could not be built.
    #[error("Failed to assemble combined document: {reason}")]
    AssemblyFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },
}

impl PdfCombineError {
    /// Create an InvalidRange error.
    pub fn invalid_range(
        range: impl Into<String>,
        term: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidRange {
            range: range.into(),
            term: term.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidArgument error.
    pub fn invalid_argument(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create an UnreadablePdf error.
    pub fn unreadable_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::UnreadablePdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an AssemblyFailed error.
    pub fn assembly_failed(reason: impl Into<String>) -> Self {
        Self::AssemblyFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Attach the input file and option name to a value parse error.
    pub fn in_input(self, path: PathBuf, option: impl Into<String>) -> Self {
        Self::InvalidInput {
            path,
            option: option.into(),
            source: Box::new(self),
        }
    }

    /// Get the exit code for this error.
    ///
    /// Argument and plan errors exit with 1, missing inputs with 2,
    /// unreadable PDFs with 3, an existing output with 4, write failures
    /// with 5 and assembly failures with 6.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidRange { .. } => 1,
            Self::InvalidAngle { .. } => 1,
            Self::InvalidArgument { .. } => 1,
            Self::InvalidInput { source, .. } => source.exit_code(),
            Self::InvalidMode { .. } => 1,
            Self::PageOutOfRange { .. } => 1,
            Self::EmptyPlan => 1,
            Self::InvalidConfig { .. } => 1,
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::UnreadablePdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::OutputWrite { .. } => 5,
            Self::AssemblyFailed { .. } => 6,
            Self::Io { .. } => 5,
        }
    }
}
