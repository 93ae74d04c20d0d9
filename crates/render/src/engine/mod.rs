//! Rendering engines.
//!
//! An [`Engine`] is the external collaborator that turns an HTML file into a
//! PDF file. It is given a prepared document (stylesheets already injected)
//! and a path to write to; layout, fonts and PDF encoding are entirely its
//! business.

mod chrome;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use self::chrome::Chrome;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::{MOCK_PDF, MockEngine};
use crate::error::Result;
use std::path::Path;
use std::sync::Arc;

/// Something that can print an HTML document to PDF.
pub trait Engine: Send + Sync {
    /// Name of the engine, used for logging only.
    fn name(&self) -> &str;

    /// Print the HTML document at `html` into a PDF at `pdf`.
    ///
    /// `pdf` already exists (empty) and lives in the final destination's
    /// directory. Implementations overwrite it; they must not create files
    /// anywhere else.
    fn print_to_pdf(&self, html: &Path, pdf: &Path) -> Result<()>;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn print_to_pdf(&self, html: &Path, pdf: &Path) -> Result<()> {
        (**self).print_to_pdf(html, pdf)
    }
}

impl<E: Engine + ?Sized> Engine for Arc<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn print_to_pdf(&self, html: &Path, pdf: &Path) -> Result<()> {
        (**self).print_to_pdf(html, pdf)
    }
}
