//! Interactive front end: native file pickers and message boxes.
//!
//! The form holds the two selections (source HTML, destination PDF). The
//! user picks both, confirms, and the conversion runs synchronously on the
//! calling thread; the outcome is reported in a message box. Failed or
//! incomplete attempts return to the pickers, a success ends the session.

use crate::pipeline;
use a4print_config::Settings;
use a4print_render::Request;
use a4print_render::error::Result;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const TITLE: &str = "HTML to PDF";
const INCOMPLETE: &str = "Select the HTML file and the output PDF path.";

/// The dialogs the form needs. Native ones come from [`rfd`].
pub trait Dialogs {
    fn pick_source(&self) -> Option<PathBuf>;
    /// `suggested` is a file name, not a path.
    fn pick_destination(&self, suggested: Option<&str>) -> Option<PathBuf>;
    /// The trigger: `true` to convert now, `false` to quit.
    fn confirm(&self, form: &Form) -> bool;
    fn info(&self, title: &str, message: &str);
    fn error(&self, title: &str, message: &str);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Form {
    pub source: Option<PathBuf>,
    pub destination: Option<PathBuf>,
}

/// How a submission ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Incomplete,
    Generated(PathBuf),
    Failed(String),
}

impl Form {
    /// Ask for the source; cancelling keeps the previous selection.
    pub fn select_source(&mut self, dialogs: &impl Dialogs) {
        if let Some(path) = dialogs.pick_source() {
            self.source = Some(path);
        }
    }

    /// Ask for the destination, suggesting `<source stem>.pdf`. Cancelling
    /// keeps the previous selection.
    pub fn select_destination(&mut self, dialogs: &impl Dialogs) {
        let suggested =
            self.source.as_deref().and_then(Path::file_stem).map(|stem| format!("{}.pdf", stem.to_string_lossy()));
        if let Some(path) = dialogs.pick_destination(suggested.as_deref()) {
            self.destination = Some(with_pdf_extension(path));
        }
    }

    /// Run the conversion and report the outcome through `dialogs`.
    pub fn submit(&self, dialogs: &impl Dialogs, convert: impl FnOnce(&Request) -> Result<PathBuf>) -> Outcome {
        let request = match Request::resolve(self.source.clone(), None, self.destination.clone()) {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(error = %&*err, "Form incomplete");
                dialogs.error("Error", INCOMPLETE);
                return Outcome::Incomplete;
            },
        };
        match convert(&request) {
            Ok(output) => {
                dialogs.info("Success", &format!("PDF generated successfully: {}", output.display()));
                Outcome::Generated(output)
            },
            Err(err) => {
                let message = (*err).to_string();
                tracing::warn!(error = ?err, "Conversion failed");
                dialogs.error("Error generating PDF", &message);
                Outcome::Failed(message)
            },
        }
    }
}

/// Save dialogs don't always append the extension for us.
fn with_pdf_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() { path } else { path.with_extension("pdf") }
}

/// Keep offering the form until a PDF is generated or the user quits.
pub fn run_form(dialogs: &impl Dialogs, mut convert: impl FnMut(&Request) -> Result<PathBuf>) -> Option<PathBuf> {
    let mut form = Form::default();
    loop {
        form.select_source(dialogs);
        form.select_destination(dialogs);
        if !dialogs.confirm(&form) {
            return None;
        }
        if let Outcome::Generated(output) = form.submit(dialogs, &mut convert) {
            return Some(output);
        }
    }
}

pub fn run() -> ExitCode {
    let settings = Settings::default();
    run_form(&NativeDialogs, |request| pipeline::convert(request, &settings));
    ExitCode::SUCCESS
}

struct NativeDialogs;

impl Dialogs for NativeDialogs {
    fn pick_source(&self) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Select the HTML file")
            .add_filter("HTML files", &["html", "htm"])
            .add_filter("All files", &["*"])
            .pick_file()
    }

    fn pick_destination(&self, suggested: Option<&str>) -> Option<PathBuf> {
        let mut dialog = FileDialog::new().set_title("Save PDF as").add_filter("PDF", &["pdf"]);
        if let Some(name) = suggested {
            dialog = dialog.set_file_name(name);
        }
        dialog.save_file()
    }

    fn confirm(&self, form: &Form) -> bool {
        let describe =
            |path: &Option<PathBuf>| path.as_ref().map_or("(none)".to_string(), |p| p.display().to_string());
        let description = format!(
            "HTML file: {}\nOutput PDF: {}\n\nGenerate the PDF now?",
            describe(&form.source),
            describe(&form.destination)
        );
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(TITLE)
            .set_description(description)
            .set_buttons(MessageButtons::YesNo)
            .show();
        matches!(answer, MessageDialogResult::Yes | MessageDialogResult::Ok)
    }

    fn info(&self, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn error(&self, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a4print_render::error::ErrorKind;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Scripted dialogs: answers are consumed in order, messages recorded.
    #[derive(Default)]
    struct Script {
        sources: RefCell<VecDeque<Option<PathBuf>>>,
        destinations: RefCell<VecDeque<Option<PathBuf>>>,
        confirmations: RefCell<VecDeque<bool>>,
        suggestions: RefCell<Vec<Option<String>>>,
        messages: RefCell<Vec<(&'static str, String, String)>>,
    }
    impl Script {
        fn round(self, source: Option<&str>, destination: Option<&str>, confirm: bool) -> Self {
            self.sources.borrow_mut().push_back(source.map(PathBuf::from));
            self.destinations.borrow_mut().push_back(destination.map(PathBuf::from));
            self.confirmations.borrow_mut().push_back(confirm);
            self
        }
    }
    impl Dialogs for Script {
        fn pick_source(&self) -> Option<PathBuf> {
            self.sources.borrow_mut().pop_front().flatten()
        }
        fn pick_destination(&self, suggested: Option<&str>) -> Option<PathBuf> {
            self.suggestions.borrow_mut().push(suggested.map(String::from));
            self.destinations.borrow_mut().pop_front().flatten()
        }
        fn confirm(&self, _form: &Form) -> bool {
            self.confirmations.borrow_mut().pop_front().unwrap_or(false)
        }
        fn info(&self, title: &str, message: &str) {
            self.messages.borrow_mut().push(("info", title.into(), message.into()));
        }
        fn error(&self, title: &str, message: &str) {
            self.messages.borrow_mut().push(("error", title.into(), message.into()));
        }
    }

    fn succeed(request: &Request) -> Result<PathBuf> {
        Ok(request.output.clone())
    }

    #[test]
    fn incomplete_form() {
        let script = Script::default();
        let form = Form { source: Some("in.html".into()), destination: None };
        assert_eq!(form.submit(&script, succeed), Outcome::Incomplete);
        let messages = script.messages.borrow();
        assert_eq!(messages.as_slice(), &[("error", "Error".to_string(), INCOMPLETE.to_string())]);
    }

    #[test]
    fn incomplete_form_never_converts() {
        let script = Script::default();
        let outcome = Form::default().submit(&script, |_| panic!("must not convert an incomplete form"));
        assert_eq!(outcome, Outcome::Incomplete);
    }

    #[test]
    fn success_names_destination() {
        let script = Script::default();
        let form = Form { source: Some("in.html".into()), destination: Some("out.pdf".into()) };
        assert_eq!(form.submit(&script, succeed), Outcome::Generated("out.pdf".into()));
        let messages = script.messages.borrow();
        assert_eq!(messages[0].0, "info");
        assert_eq!(messages[0].2, "PDF generated successfully: out.pdf");
    }

    #[test]
    fn failure_shows_render_error() {
        let script = Script::default();
        let form = Form { source: Some("in.html".into()), destination: Some("out.pdf".into()) };
        let outcome = form.submit(&script, |_| exn::bail!(ErrorKind::ChromeNotFound));
        assert_eq!(outcome, Outcome::Failed("chrome/chromium not detected on your system".into()));
        let messages = script.messages.borrow();
        assert_eq!(messages[0].0, "error");
        assert_eq!(messages[0].1, "Error generating PDF");
    }

    #[test]
    fn destination_gets_pdf_extension_and_suggestion() {
        let script = Script::default().round(Some("docs/report.html"), Some("out/report"), true);
        let mut form = Form::default();
        form.select_source(&script);
        form.select_destination(&script);
        assert_eq!(form.destination, Some(PathBuf::from("out/report.pdf")));
        assert_eq!(script.suggestions.borrow().as_slice(), &[Some("report.pdf".to_string())]);
    }

    #[test]
    fn cancelled_picker_keeps_selection() {
        let script = Script::default().round(None, None, true);
        let mut form = Form { source: Some("a.html".into()), destination: Some("a.pdf".into()) };
        form.select_source(&script);
        form.select_destination(&script);
        assert_eq!(form, Form { source: Some("a.html".into()), destination: Some("a.pdf".into()) });
    }

    #[test]
    fn retries_until_generated() {
        let script = Script::default()
            .round(Some("in.html"), None, true)
            .round(None, Some("out.pdf"), true);
        let mut calls = 0;
        let output = run_form(&script, |request| {
            calls += 1;
            succeed(request)
        });
        assert_eq!(output, Some(PathBuf::from("out.pdf")));
        assert_eq!(calls, 1);
        let messages = script.messages.borrow();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].2, INCOMPLETE);
        assert_eq!(messages[1].0, "info");
    }

    #[test]
    fn quitting_converts_nothing() {
        let script = Script::default().round(Some("in.html"), Some("out.pdf"), false);
        assert_eq!(run_form(&script, |_| panic!("must not convert after quitting")), None);
        assert!(script.messages.borrow().is_empty());
    }
}
