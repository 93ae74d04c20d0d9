use crate::engine::Engine;
use crate::error::{ErrorKind, Result};
use crate::source::{DocumentSource, Request};
use crate::{Renderer, TempFile};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::instrument;
use url::Url;

impl Renderer {
    /// Render a resolved request, dispatching on the kind of source.
    ///
    /// Returns the path the PDF was written to.
    pub fn render(&self, request: &Request) -> Result<PathBuf> {
        match &request.source {
            DocumentSource::File(path) => self.render_path(path, &request.output),
            DocumentSource::Markup(markup) => self.render_markup(markup, &request.output),
        }
    }

    /// Render an HTML file. Relative links in the document resolve against
    /// the file's own directory.
    #[instrument(skip(self, save_to), fields(engine = self.engine.name()))]
    pub fn render_path(&self, html: &Path, save_to: impl AsRef<Path>) -> Result<PathBuf> {
        if !html.is_file() {
            exn::bail!(ErrorKind::InputNotFound(html.to_path_buf()));
        }
        let absolute = std::path::absolute(html).map_err(ErrorKind::Io)?;
        let base = absolute.parent().and_then(|dir| Url::from_directory_path(dir).ok());
        let document = fs::read(&absolute).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::InputNotFound(html.to_path_buf()),
            _ => ErrorKind::Io(e),
        })?;
        self.render_to(&document, base, save_to.as_ref())
    }

    /// Render inline HTML markup. No base URL is set, so relative links
    /// resolve against wherever the engine loads the document from.
    #[instrument(skip_all, fields(engine = self.engine.name(), bytes = markup.len()))]
    pub fn render_markup(&self, markup: &str, save_to: impl AsRef<Path>) -> Result<PathBuf> {
        self.render_to(markup.as_bytes(), None, save_to.as_ref())
    }

    fn render_to(&self, html: &[u8], base: Option<Url>, save_to: &Path) -> Result<PathBuf> {
        let pdf = Self::reserve_output(save_to)?;
        let input = self.persist_html(html, base.as_ref())?;
        self.engine.print_to_pdf(input.path(), pdf.path())?;
        let written = fs::metadata(pdf.path()).map_err(ErrorKind::Io)?.len();
        if written == 0 {
            exn::bail!(ErrorKind::EmptyOutput);
        }
        // A replaced destination keeps its mode.
        if let Ok(existing) = fs::metadata(save_to) {
            fs::set_permissions(pdf.path(), existing.permissions()).map_err(ErrorKind::Io)?;
        }
        // Renaming within one directory is atomic; on failure the temporary
        // file is dropped and removed.
        pdf.persist(save_to).map_err(|e| ErrorKind::Io(e.error))?;
        tracing::info!(output = %save_to.display(), bytes = written, "PDF written");
        Ok(save_to.to_path_buf())
    }

    /// Create the (empty) file the engine prints into, next to the final
    /// destination so it can be renamed into place.
    fn reserve_output(save_to: &Path) -> Result<TempFile> {
        let parent = match save_to.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !parent.is_dir() {
            exn::bail!(ErrorKind::OutputDirectory(parent.to_path_buf()));
        }
        let parent = std::path::absolute(parent).map_err(ErrorKind::Io)?;
        let mut builder = tempfile::Builder::new();
        builder.prefix(".a4print-").suffix(".pdf");
        // Same mode a plain file creation would get (0666 less the umask),
        // not the owner-only default of temporary files.
        #[cfg(unix)]
        builder.permissions(<fs::Permissions as std::os::unix::fs::PermissionsExt>::from_mode(0o666));
        let pdf = builder.tempfile_in(parent).map_err(ErrorKind::Io)?;
        Ok(pdf)
    }

    /// Write the document the engine loads: the original markup with the
    /// base URL and print stylesheets spliced in.
    fn persist_html(&self, html: &[u8], base: Option<&Url>) -> Result<TempFile> {
        let mut tmp = tempfile::Builder::new().prefix("a4print-").suffix(".html").tempfile().map_err(ErrorKind::Io)?;
        self.splice(&mut tmp, html, base).map_err(ErrorKind::Io)?;
        tmp.flush().map_err(ErrorKind::Io)?;
        Ok(tmp)
    }

    /// `<base>` opens the head, ahead of any `<link>` or `<script>` whose URL
    /// it must resolve. Stylesheets close it, after the document's own. Without a closing head tag the stylesheets
    /// are appended; browsers apply `<style>` anywhere.
    fn splice(&self, w: &mut impl Write, html: &[u8], base: Option<&Url>) -> std::io::Result<usize> {
        let mut cursor = 0;
        if let Some(base) = base {
            cursor = base_position(html);
            w.write_all(&html[..cursor])?;
            write!(w, "<base href=\"{}\">", base.as_str().replace('"', "%22"))?;
        }
        let blocks = match find_tag(html, cursor, b"/head") {
            Some(close) => {
                w.write_all(&html[cursor..close])?;
                let blocks = self.styles.write_all_to(w)?;
                w.write_all(&html[close..])?;
                tracing::debug!(position = close, blocks = blocks, "Print stylesheets injected into HTML head");
                blocks
            },
            None => {
                w.write_all(&html[cursor..])?;
                let blocks = self.styles.write_all_to(w)?;
                tracing::warn!(blocks = blocks, "Closing head tag not found; print stylesheets appended to document");
                blocks
            },
        };
        Ok(blocks)
    }
}

/// Just past the opening `<head>` tag; failing that past `<html>`, then past
/// the doctype, then the very start. Anything before the doctype would
/// switch the browser into quirks mode.
fn base_position(html: &[u8]) -> usize {
    let anchors: [&[u8]; 3] = [b"head", b"html", b"!doctype"];
    anchors
        .into_iter()
        .find_map(|name| find_tag(html, 0, name).and_then(|start| tag_end(html, start)))
        .unwrap_or(0)
}

/// Offset of the first `<name` at or after `from`, ignoring ASCII case and
/// matching whole names only (`<head` but never `<header`).
fn find_tag(html: &[u8], from: usize, name: &[u8]) -> Option<usize> {
    let len = name.len() + 1;
    let last = html.len().checked_sub(len)?;
    (from..=last).find(|&i| {
        html[i] == b'<'
            && html[i + 1..i + len].eq_ignore_ascii_case(name)
            && html.get(i + len).is_none_or(|&b| b == b'>' || b == b'/' || b.is_ascii_whitespace())
    })
}

fn tag_end(html: &[u8], start: usize) -> Option<usize> {
    html[start..].iter().position(|&b| b == b'>').map(|offset| start + offset + 1)
}
