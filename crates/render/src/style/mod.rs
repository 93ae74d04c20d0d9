//! CSS style management for rendered documents.
//!
//! Styles are assembled through [`StyleConfig`]'s builder API, starting from
//! a [`PrintProfile`] (pagination rules plus an optional palette from the
//! compile-time embedded builtins) and followed by user-provided files or
//! raw CSS content. All styles are read eagerly at construction time so that
//! missing files fail fast rather than at render time.

mod assets;
mod profile;

pub use self::profile::{KEEP_TOGETHER, KEEP_WITH_NEIGHBOURS, Margins, PAGE_SIZE, Palette, PrintProfile, WIDOWS_ORPHANS};
use crate::error::{ErrorKind, Result};
use std::path::Path;
use std::{fs, io::Write};

/// An ordered collection of CSS stylesheets to inject into rendered documents.
///
/// Styles are applied in insertion order, later styles override earlier ones.
///
/// # Example
///
/// ```no_run
/// use a4print_render::{Palette, PrintProfile, StyleConfig};
/// # use a4print_render::error::Result;
///
/// # fn get_styles() -> Result<StyleConfig> {
/// let profile = PrintProfile { palette: Palette::Dark, ..Default::default() };
/// let styles = StyleConfig::from_profile(&profile)?
///     .with_file("/path/to/custom.css")?;
/// # Ok(styles)
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct StyleConfig {
    // Since styles should be constructed once per invocation, file contents
    // are read during construction. We'd have to load them at render time
    // anyway, so do it here and fail fast.
    styles: Vec<String>,
}
impl StyleConfig {
    /// Creates an empty style configuration with no stylesheets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a style configuration holding the profile's print stylesheet.
    pub fn from_profile(profile: &PrintProfile) -> Result<Self> {
        Ok(Self::new().with_content(profile.stylesheet()?))
    }

    /// Appends a stylesheet read from a file on disk.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            exn::bail!(ErrorKind::AssetNotFound(path.display().to_string()));
        }
        let css = fs::read_to_string(path).map_err(ErrorKind::Io)?;
        self.styles.push(css);
        Ok(self)
    }

    /// Appends every file in order; see [`with_file()`](Self::with_file).
    pub fn with_files<P: AsRef<Path>>(self, paths: impl IntoIterator<Item = P>) -> Result<Self> {
        paths.into_iter().try_fold(self, |styles, path| styles.with_file(path))
    }

    /// Appends raw CSS content as a stylesheet. This is infallible since no
    /// I/O is involved.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.styles.push(content.into());
        self
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Write every stylesheet as its own `<style>` element, returning how
    /// many were written.
    pub(crate) fn write_all_to(&self, w: &mut impl Write) -> std::io::Result<usize> {
        for css in &self.styles {
            w.write_all(b"<style>\n")?;
            w.write_all(css.as_bytes())?;
            w.write_all(b"</style>\n")?;
        }
        Ok(self.styles.len())
    }
}
