use crate::engine::Engine;
use crate::error::{ErrorKind, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::instrument;
use url::Url;

/// Executable names looked up on `PATH`, in order of preference.
const EXECUTABLES: [&str; 4] = ["google-chrome", "chromium", "chromium-browser", "chrome"];
/// Flatpak application IDs checked when none of [`EXECUTABLES`] is found.
const FLATPAK_APPS: [&str; 2] = ["com.google.Chrome", "org.chromium.Chromium"];
/// How many trailing lines of Chrome's stderr to keep for error reports.
const STDERR_TAIL_LINES: usize = 20;

/// Represents a Chrome/Chromium executable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Chrome {
    /// A directly executable binary.
    Binary { path: PathBuf },
    /// A Flatpak-installed application.
    Flatpak { flatpak: PathBuf, app_id: String },
}
impl Chrome {
    /// Find an installed browser: a known executable on `PATH` first, then a
    /// Flatpak-installed application.
    pub fn discover() -> Result<Self> {
        if let Some(path) = EXECUTABLES.into_iter().find_map(|name| which::which(name).ok()) {
            tracing::debug!(chrome = %path.display(), "Using Chrome from PATH");
            return Ok(Self::Binary { path });
        }
        let Ok(flatpak) = which::which("flatpak") else {
            tracing::info!("No Chrome on PATH and no flatpak to look in");
            exn::bail!(ErrorKind::ChromeNotFound);
        };
        let installed = FLATPAK_APPS
            .into_iter()
            .find(|app_id| Command::new(&flatpak).args(["info", *app_id]).output().is_ok_and(|o| o.status.success()));
        match installed {
            Some(app_id) => {
                tracing::debug!(app_id, "Using Chrome from Flatpak");
                Ok(Self::Flatpak { flatpak, app_id: app_id.to_string() })
            },
            None => {
                tracing::info!(flatpak = %flatpak.display(), "No Chrome among Flatpak applications");
                exn::bail!(ErrorKind::ChromeNotFound)
            },
        }
    }

    /// Use a specific executable, either a path or a name looked up in `PATH`.
    pub fn from_executable(executable: impl AsRef<Path>) -> Result<Self> {
        let executable = executable.as_ref();
        match which::which(executable) {
            Ok(path) => Ok(Self::Binary { path }),
            Err(_) => {
                tracing::warn!(chrome = %executable.display(), "Configured Chrome executable is not runnable");
                exn::bail!(ErrorKind::ChromeNotFound)
            },
        }
    }

    fn command(&self) -> Command {
        match self {
            Self::Binary { path } => Command::new(path),
            Self::Flatpak { flatpak, app_id } => {
                let mut command = Command::new(flatpak);
                // The sandboxed app needs to reach both the temporary document
                // and the destination directory.
                command.args(["run", "--filesystem=host", app_id]);
                command
            },
        }
    }

    fn arguments(html: &Path, pdf: &Path) -> Result<Vec<OsString>> {
        let Ok(document) = Url::from_file_path(html) else {
            exn::bail!(ErrorKind::InputNotFound(html.to_path_buf()));
        };
        let mut print_to = OsString::from("--print-to-pdf=");
        print_to.push(pdf);
        Ok(vec![
            "--headless".into(),
            "--disable-gpu".into(),
            "--no-pdf-header-footer".into(),
            "--allow-file-access-from-files".into(),
            print_to,
            document.as_str().into(),
        ])
    }
}

impl Engine for Chrome {
    fn name(&self) -> &str {
        match self {
            Self::Binary { .. } => "chrome",
            Self::Flatpak { app_id, .. } => app_id,
        }
    }

    #[instrument(skip(self), fields(engine = self.name()))]
    fn print_to_pdf(&self, html: &Path, pdf: &Path) -> Result<()> {
        let output = self.command().args(Self::arguments(html, pdf)?).output().map_err(ErrorKind::Io)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
            let tail = lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join("\n");
            exn::bail!(ErrorKind::ChromeFailed { code: output.status.code(), stderr: tail });
        }
        tracing::debug!("Chrome finished printing");
        Ok(())
    }
}
