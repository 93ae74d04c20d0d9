//! Input resolution.
//!
//! A conversion reads its HTML from exactly one place: a file on disk or a
//! markup string supplied inline. [`DocumentSource`] makes that choice a
//! single value, and [`Request::resolve`] is the only way callers holding
//! loose optional fields (command-line flags, form state) get one.

use crate::error::{ErrorKind, Result};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

/// Where the HTML to convert comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentSource {
    /// An HTML file on disk. Relative assets resolve against its directory.
    File(PathBuf),
    /// Inline HTML markup.
    Markup(String),
}

impl DocumentSource {
    /// Select the source from two mutually exclusive, optional inputs.
    ///
    /// Empty values count as absent; whitespace-only markup is still a
    /// document (it renders a blank page). Supplying both, or neither, is a
    /// [`Configuration`](ErrorKind::Configuration) error.
    pub fn resolve(path: Option<PathBuf>, markup: Option<String>) -> Result<Self> {
        let path = path.filter(|p| !p.as_os_str().is_empty());
        let markup = markup.filter(|m| !m.is_empty());
        match (path, markup) {
            (Some(path), None) => Ok(Self::File(path)),
            (None, Some(markup)) => Ok(Self::Markup(markup)),
            (Some(_), Some(_)) => {
                exn::bail!(ErrorKind::configuration("an input file and an HTML string are mutually exclusive"))
            },
            (None, None) => exn::bail!(ErrorKind::configuration("either an input file or an HTML string is required")),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Markup(_) => None,
        }
    }
}

impl Display for DocumentSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Markup(_) => write!(f, "HTML string"),
        }
    }
}

/// A single, fully specified conversion: one source and one destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub source: DocumentSource,
    pub output: PathBuf,
}

impl Request {
    pub fn new(source: DocumentSource, output: impl Into<PathBuf>) -> Self {
        Self { source, output: output.into() }
    }

    /// Resolve the source (see [`DocumentSource::resolve`]) and require a
    /// destination path.
    pub fn resolve(path: Option<PathBuf>, markup: Option<String>, output: Option<PathBuf>) -> Result<Self> {
        let source = DocumentSource::resolve(path, markup)?;
        let Some(output) = output.filter(|o| !o.as_os_str().is_empty()) else {
            exn::bail!(ErrorKind::configuration("an output PDF path is required"));
        };
        Ok(Self { source, output })
    }
}
