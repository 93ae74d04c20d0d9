//! The conversion pipeline shared by both front ends.
//!
//! Input resolution happens in the caller (it owns the loose fields); from a
//! resolved [`Request`] onwards every conversion goes through [`convert`]:
//! build the print stylesheet from the settings, pick the engine, render.

use a4print_config::Settings;
use a4print_render::engine::Chrome;
use a4print_render::error::{ErrorKind, Result};
use a4print_render::{DocumentSource, Renderer, Request, StyleConfig};
use std::path::PathBuf;

/// Convert one document, returning the path of the written PDF.
pub fn convert(request: &Request, settings: &Settings) -> Result<PathBuf> {
    // Report a missing input before spending time on engine discovery.
    if let Some(path) = request.source.path()
        && !path.is_file()
    {
        exn::bail!(ErrorKind::InputNotFound(path.to_path_buf()));
    }
    let renderer = renderer(settings)?;
    tracing::info!(source = %request.source, output = %request.output.display(), engine = renderer.engine().name(), "Converting");
    renderer.render(request)
}

/// The stylesheets every document is rendered with.
pub fn styles(settings: &Settings) -> Result<StyleConfig> {
    StyleConfig::from_profile(&settings.profile())?.with_files(&settings.stylesheets)
}

fn renderer(settings: &Settings) -> Result<Renderer> {
    let styles = styles(settings)?;
    match &settings.chrome {
        Some(executable) => Ok(Renderer::with_engine(Chrome::from_executable(executable)?, styles)),
        None => Renderer::new(styles),
    }
}

/// The line reported after a successful conversion.
pub fn confirmation(request: &Request) -> String {
    match &request.source {
        DocumentSource::File(path) => {
            format!("PDF generated from file {}: {}", path.display(), request.output.display())
        },
        DocumentSource::Markup(_) => format!("PDF generated from HTML string: {}", request.output.display()),
    }
}

/// Fold a configuration-loading failure into the conversion error taxonomy.
#[track_caller]
pub fn configuration_error(err: a4print_config::error::Error) -> a4print_render::error::Error {
    let message = (*err).to_string();
    err.raise(ErrorKind::Configuration(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use a4print_config::{Margins, Palette};
    use a4print_render::engine::{MOCK_PDF, MockEngine};
    use std::fs;
    use std::sync::Arc;

    #[test]
    fn styles_follow_settings() {
        let dir = tempfile::tempdir().unwrap();
        let extra = dir.path().join("extra.css");
        fs::write(&extra, "p { font-family: serif; }").unwrap();
        let settings = Settings {
            margins: Margins::Inset,
            palette: Palette::Dark,
            stylesheets: vec![extra],
            chrome: None,
        };
        assert_eq!(styles(&settings).unwrap().len(), 2);
    }

    #[test]
    fn missing_user_stylesheet_fails_before_rendering() {
        let settings = Settings { stylesheets: vec![PathBuf::from("/definitely/not/here.css")], ..Default::default() };
        let err = styles(&settings).unwrap_err();
        assert!(matches!(&*err, ErrorKind::AssetNotFound(_)));
    }

    #[test]
    fn configured_chrome_must_exist() {
        let settings = Settings { chrome: Some(PathBuf::from("/definitely/not/chrome")), ..Default::default() };
        let request = Request::resolve(None, Some("<h1>Hello</h1>".into()), Some(PathBuf::from("out.pdf"))).unwrap();
        let err = convert(&request, &settings).unwrap_err();
        assert!(matches!(&*err, ErrorKind::ChromeNotFound));
        assert!(!PathBuf::from("out.pdf").exists());
    }

    #[test]
    fn renders_with_mock_engine() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("hello.pdf");
        let request = Request::resolve(None, Some("<h1>Hello</h1>".into()), Some(output.clone())).unwrap();
        let engine = Arc::new(MockEngine::new());
        let renderer = Renderer::with_engine(engine.clone(), styles(&Settings::default()).unwrap());
        assert_eq!(renderer.render(&request).unwrap(), output);
        assert_eq!(fs::read(&output).unwrap(), MOCK_PDF);
        assert!(engine.documents()[0].contains("widows: 3;"));
    }

    #[test]
    fn confirmation_lines() {
        let file = Request::new(DocumentSource::File("in.html".into()), "out.pdf");
        assert_eq!(confirmation(&file), "PDF generated from file in.html: out.pdf");
        let markup = Request::new(DocumentSource::Markup("<p>x</p>".into()), "out.pdf");
        assert_eq!(confirmation(&markup), "PDF generated from HTML string: out.pdf");
    }

    #[test]
    fn configuration_errors_are_configuration() {
        let err = a4print_config::Settings::load(
            Some(std::path::Path::new("/definitely/not/here.toml")),
            &Default::default(),
        )
        .unwrap_err();
        let err = configuration_error(err);
        assert!(err.is_configuration());
        assert!((*err).to_string().contains("here.toml"));
    }
}
