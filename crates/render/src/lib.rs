//! HTML to A4 PDF rendering.
//!
//! The crate covers everything between "here is some HTML" and "here is a
//! PDF on disk", except the rendering itself, which is delegated to an
//! [`Engine`](engine::Engine) (headless Chrome/Chromium in production):
//!
//! - [`Request`] / [`DocumentSource`] resolve exactly one input (file or
//!   inline markup) and a destination;
//! - [`PrintProfile`] builds the supplemental A4 print stylesheet and
//!   [`StyleConfig`] layers it with any user stylesheets;
//! - [`Renderer`] injects those stylesheets into the document, hands it to
//!   the engine and moves the finished PDF into place atomically.

pub mod engine;
pub mod error;
mod render;
mod source;
mod style;

use crate::engine::{Chrome, Engine};
use crate::error::Result;
pub use crate::source::{DocumentSource, Request};
pub use crate::style::{
    KEEP_TOGETHER, KEEP_WITH_NEIGHBOURS, Margins, PAGE_SIZE, Palette, PrintProfile, StyleConfig,
    WIDOWS_ORPHANS,
};

pub type TempFile = tempfile::NamedTempFile;

pub struct Renderer {
    engine: Box<dyn Engine>,
    styles: StyleConfig,
}
impl Renderer {
    /// Create a renderer backed by whichever Chrome/Chromium is installed.
    pub fn new(styles: StyleConfig) -> Result<Self> {
        Ok(Self::with_engine(Chrome::discover()?, styles))
    }

    pub fn with_engine(engine: impl Engine + 'static, styles: StyleConfig) -> Self {
        Self { engine: Box::new(engine), styles }
    }

    pub fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }
}
