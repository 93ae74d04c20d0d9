//! In-process rendering engine for testing.

use crate::engine::Engine;
use crate::error::{ErrorKind, Result};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

/// Bytes written by [`MockEngine`] in place of a real PDF.
pub const MOCK_PDF: &[u8] = b"%PDF-1.7\n%mock\n%%EOF\n";

enum Behaviour {
    Succeed,
    Fail { code: Option<i32>, stderr: String },
    WriteNothing,
}

/// Rendering engine for testing.
///
/// Records every document it is asked to print (so tests can inspect the
/// injected stylesheets) and writes [`MOCK_PDF`] to the destination. It can
/// also be told to fail the way Chrome does, or to "succeed" without writing
/// anything.
pub struct MockEngine {
    behaviour: Behaviour,
    documents: Mutex<Vec<String>>,
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEngine {
    pub fn new() -> Self {
        Self { behaviour: Behaviour::Succeed, documents: Mutex::new(Vec::new()) }
    }

    /// An engine that fails every job, like Chrome exiting with `code`.
    pub fn failing(code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self { behaviour: Behaviour::Fail { code, stderr: stderr.into() }, ..Self::new() }
    }

    /// An engine that reports success but leaves the PDF empty.
    pub fn silent() -> Self {
        Self { behaviour: Behaviour::WriteNothing, ..Self::new() }
    }

    /// Every HTML document printed so far, in order.
    pub fn documents(&self) -> Vec<String> {
        match self.documents.lock() {
            Ok(documents) => documents.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Engine for MockEngine {
    fn name(&self) -> &str {
        "mock"
    }

    fn print_to_pdf(&self, html: &Path, pdf: &Path) -> Result<()> {
        let document = fs::read_to_string(html).map_err(ErrorKind::Io)?;
        match self.documents.lock() {
            Ok(mut documents) => documents.push(document),
            Err(poisoned) => poisoned.into_inner().push(document),
        }
        match &self.behaviour {
            Behaviour::Succeed => fs::write(pdf, MOCK_PDF).map_err(ErrorKind::Io)?,
            Behaviour::Fail { code, stderr } => {
                exn::bail!(ErrorKind::ChromeFailed { code: *code, stderr: stderr.clone() })
            },
            Behaviour::WriteNothing => {},
        }
        Ok(())
    }
}
