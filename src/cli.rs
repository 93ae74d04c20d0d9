//! Batch front end: command-line flags in, confirmation line or error out.

use crate::pipeline;
use a4print_config::{Margins, Overrides, Palette, Settings};
use a4print_render::Request;
use a4print_render::error::Result;
use clap::{ArgAction, ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

/// Convert HTML into a paginated A4 PDF, keeping the document's own styling.
///
/// Run without arguments to pick files interactively.
#[derive(Debug, Parser)]
#[command(name = "a4print", version)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "string"])))]
pub struct Args {
    /// Path to the input HTML file
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,
    /// HTML markup to convert
    #[arg(long, value_name = "HTML")]
    pub string: Option<String>,
    /// Path to the output PDF file
    #[arg(long, value_name = "PATH", required = true)]
    pub output: Option<PathBuf>,
    /// Page margins
    #[arg(long, value_enum)]
    pub margins: Option<MarginsArg>,
    /// Force a color palette instead of the document's own colors
    #[arg(long, value_enum)]
    pub palette: Option<PaletteArg>,
    /// Additional stylesheet, applied after the print rules (repeatable)
    #[arg(long = "stylesheet", value_name = "PATH", action = ArgAction::Append)]
    pub stylesheets: Vec<PathBuf>,
    /// Chrome/Chromium executable to render with
    #[arg(long, value_name = "PATH")]
    pub chrome: Option<PathBuf>,
    /// Profile file (toml, yaml or json) with default settings
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MarginsArg {
    /// No page margins
    Flush,
    /// 20mm top and bottom, 15mm left and right
    Inset,
}
impl From<MarginsArg> for Margins {
    fn from(value: MarginsArg) -> Self {
        match value {
            MarginsArg::Flush => Self::Flush,
            MarginsArg::Inset => Self::Inset,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PaletteArg {
    /// Keep the document's colors
    Document,
    /// Dark background, light text
    Dark,
    /// White background, dark text
    Light,
}
impl From<PaletteArg> for Palette {
    fn from(value: PaletteArg) -> Self {
        match value {
            PaletteArg::Document => Self::Document,
            PaletteArg::Dark => Self::Dark,
            PaletteArg::Light => Self::Light,
        }
    }
}

impl Args {
    pub fn request(&self) -> Result<Request> {
        Request::resolve(self.input.clone(), self.string.clone(), self.output.clone())
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            margins: self.margins.map(Into::into),
            palette: self.palette.map(Into::into),
            stylesheets: self.stylesheets.clone(),
            chrome: self.chrome.clone(),
        }
    }

    pub fn settings(&self) -> Result<Settings> {
        Settings::load(self.config.as_deref(), &self.overrides()).map_err(pipeline::configuration_error)
    }
}

/// Resolve, convert and report. Nothing is printed to stdout on failure.
pub fn run(args: &Args) -> ExitCode {
    match execute(args) {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        },
        Err(err) => {
            tracing::debug!(error = ?err, "Conversion failed");
            eprintln!("error generating PDF: {}", &*err);
            ExitCode::FAILURE
        },
    }
}

pub(crate) fn execute(args: &Args) -> Result<String> {
    let request = args.request()?;
    let settings = args.settings()?;
    pipeline::convert(&request, &settings)?;
    Ok(pipeline::confirmation(&request))
}
