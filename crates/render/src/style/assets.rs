//! Embedded assets for rendering.
//!
//! This module provides access to the palette stylesheets that are embedded
//! into the binary at compile time using [`rust-embed`](rust_embed).

use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use rust_embed::Embed;
use std::borrow::Cow;

#[derive(Embed)]
#[folder = "../../assets/styles/"]
pub(crate) struct Builtins;
impl Builtins {
    /// Get the CSS content for a builtin style by name.
    pub fn load(name: impl AsRef<str>) -> Result<Cow<'static, [u8]>> {
        Self::get(name.as_ref()).map(|f| f.data).ok_or_raise(|| ErrorKind::AssetNotFound(Self::identifier(name)))
    }

    /// Get the CSS content for a builtin style by name, as text.
    pub fn load_str(name: impl AsRef<str>) -> Result<String> {
        let data = Self::load(name.as_ref())?;
        match String::from_utf8(data.into_owned()) {
            Ok(css) => Ok(css),
            Err(_) => exn::bail!(ErrorKind::AssetNotFound(Self::identifier(name))),
        }
    }

    pub(crate) fn identifier(name: impl AsRef<str>) -> String {
        format!("builtin:{}", name.as_ref().trim().trim_start_matches("builtin:"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_load_palettes() {
        for name in ["dark.css", "light.css"] {
            let css = Builtins::load_str(name).unwrap();
            assert!(css.contains("!important"), "{name} should force its colors");
        }
    }

    #[test]
    fn missing_builtin() {
        let err = Builtins::load("sepia.css").unwrap_err();
        assert!(matches!(&*err, ErrorKind::AssetNotFound(name) if name == "builtin:sepia.css"));
    }
}
