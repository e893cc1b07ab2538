//! # Command Line Arguments
//!
//! ```bash
//! cobro <document.json> [--kind quotation|billing]
//! ```

use std::path::PathBuf;

use cobro_core::DocumentKind;

pub const USAGE: &str = "usage: cobro <document.json> [--kind quotation|billing]";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// JSON record exported from the document store.
    pub path: PathBuf,
    /// Defaults to quotation.
    pub kind: DocumentKind,
}

/// Argument parsing errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ArgsError {
    #[error("missing document path\n{}", USAGE)]
    MissingPath,

    #[error("--kind requires a value\n{}", USAGE)]
    MissingKind,

    #[error("unexpected argument '{0}'\n{}", USAGE)]
    Unexpected(String),

    #[error(transparent)]
    InvalidKind(#[from] cobro_core::ValidationError),
}

impl Args {
    /// Parses arguments (without the program name).
    pub fn parse<I>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut path = None;
        let mut kind = DocumentKind::Quotation;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            if arg == "--kind" || arg == "-k" {
                let value = args.next().ok_or(ArgsError::MissingKind)?;
                kind = value.parse()?;
            } else if arg.starts_with('-') || path.is_some() {
                return Err(ArgsError::Unexpected(arg));
            } else {
                path = Some(PathBuf::from(arg));
            }
        }

        Ok(Args {
            path: path.ok_or(ArgsError::MissingPath)?,
            kind,
        })
    }
}
