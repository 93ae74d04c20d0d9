//! Layered settings for a4print.
//!
//! [`Settings`] are extracted with [`figment`] from, in increasing priority:
//!
//! 1. built-in defaults (flush margins, the document's own colors);
//! 2. a profile file, only when one is named explicitly (`.toml`,
//!    `.yaml`/`.yml` or `.json`);
//! 3. command-line [`Overrides`], containing only what was actually given.
//!
//! No file is read implicitly and the environment is never consulted.
//! Stylesheet lists are concatenated across layers; every other key is
//! replaced by the higher layer.

pub mod error;

use crate::error::{ErrorKind, Result};
pub use a4print_render::{Margins, Palette, PrintProfile};
use figment::Figment;
use figment::providers::{Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Page margins: `flush` or `inset`.
    pub margins: Margins,
    /// Color override: `document`, `dark` or `light`.
    pub palette: Palette,
    /// Extra stylesheets, injected after the print stylesheet.
    pub stylesheets: Vec<PathBuf>,
    /// Chrome/Chromium executable; discovered when absent.
    pub chrome: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the defaults, an optional profile file, and the
    /// given overrides.
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));
        if let Some(path) = file {
            figment = figment.merge(profile_file(path)?);
            tracing::debug!(config = %path.display(), "Configuration file loaded");
        }
        let settings: Settings = figment
            .admerge(Serialized::defaults(overrides))
            .extract()
            .map_err(|e| ErrorKind::Invalid(e.to_string()))?;
        tracing::debug!(?settings, "Settings resolved");
        Ok(settings)
    }

    pub fn profile(&self) -> PrintProfile {
        PrintProfile::new(self.margins, self.palette)
    }
}

/// Settings given on the command line. Absent values leave lower layers untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margins: Option<Margins>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<Palette>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stylesheets: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome: Option<PathBuf>,
}

/// Open a profile file, picking its format from the extension.
fn profile_file(path: &Path) -> Result<Figment> {
    if !path.is_file() {
        exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
    }
    let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    let figment = match extension.as_deref() {
        Some("toml") => Figment::from(Toml::file_exact(path)),
        Some("yaml" | "yml") => Figment::from(Yaml::file_exact(path)),
        Some("json") => Figment::from(Json::file_exact(path)),
        _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
    };
    Ok(figment)
}
