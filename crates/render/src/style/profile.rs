//! A4 print stylesheet construction.
//!
//! [`PrintProfile`] produces the supplemental stylesheet injected into every
//! document. The base rules never vary except for the page margins:
//!
//! | Rule                         | Selector                  | Value                          |
//! |------------------------------|---------------------------|--------------------------------|
//! | Sheet size                   | `@page`                   | `A4`                           |
//! | No breaks around headings    | `h1` … `h6`               | `break-before/after: avoid`    |
//! | No breaks inside blocks      | `table, pre, blockquote`  | `break-inside: avoid`          |
//! | Widow/orphan control         | `p`                       | `3` lines                      |
//!
//! A [`Palette`] other than [`Palette::Document`] appends a color layer after
//! the base rules; the base rules are always emitted first and in full.

use crate::error::Result;
use crate::style::assets::Builtins;

/// Paper size pinned by the `@page` rule.
pub const PAGE_SIZE: &str = "A4";
/// Minimum lines kept together at the top (widows) and bottom (orphans) of a page.
pub const WIDOWS_ORPHANS: u8 = 3;
/// Elements that must not be separated from their surrounding content.
pub const KEEP_WITH_NEIGHBOURS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];
/// Elements that must not be split across pages.
pub const KEEP_TOGETHER: [&str; 3] = ["table", "pre", "blockquote"];

/// Page margins applied through the `@page` rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum Margins {
    /// Content runs to the sheet edge.
    #[default]
    Flush,
    /// 20mm top and bottom, 15mm left and right.
    Inset,
}
impl Margins {
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::Flush => "0",
            Self::Inset => "20mm 15mm",
        }
    }
}

/// Optional color override layered on top of the pagination rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum Palette {
    /// Keep the document's own colors and backgrounds.
    #[default]
    Document,
    /// Force a dark background with light text.
    Dark,
    /// Force a white background with dark text.
    Light,
}
impl Palette {
    /// Name of the embedded stylesheet implementing this palette, if any.
    pub fn builtin(&self) -> Option<&'static str> {
        match self {
            Self::Document => None,
            Self::Dark => Some("dark.css"),
            Self::Light => Some("light.css"),
        }
    }
}

/// Pagination parameters for one conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct PrintProfile {
    pub margins: Margins,
    pub palette: Palette,
}

impl PrintProfile {
    pub fn new(margins: Margins, palette: Palette) -> Self {
        Self { margins, palette }
    }

    /// The pagination rules alone, without any palette layer.
    pub fn base_rules(&self) -> String {
        format!(
            "@page {{\n    size: {PAGE_SIZE};\n    margin: {};\n}}\n\
             {} {{\n    break-before: avoid;\n    break-after: avoid;\n    page-break-before: avoid;\n    page-break-after: avoid;\n}}\n\
             {} {{\n    break-inside: avoid;\n    page-break-inside: avoid;\n}}\n\
             p {{\n    orphans: {WIDOWS_ORPHANS};\n    widows: {WIDOWS_ORPHANS};\n}}\n\
             html, body {{\n    margin: 0 !important;\n    padding: 0 !important;\n}}\n",
            self.margins.as_css(),
            KEEP_WITH_NEIGHBOURS.join(", "),
            KEEP_TOGETHER.join(", "),
        )
    }

    /// The complete supplemental stylesheet: pagination rules followed by
    /// the palette layer, if one is selected.
    pub fn stylesheet(&self) -> Result<String> {
        let mut css = self.base_rules();
        if let Some(name) = self.palette.builtin() {
            css.push_str(&Builtins::load_str(name)?);
        }
        Ok(css)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ALL_PALETTES: [Palette; 3] = [Palette::Document, Palette::Dark, Palette::Light];

    #[rstest]
    #[case(Margins::Flush, "margin: 0;")]
    #[case(Margins::Inset, "margin: 20mm 15mm;")]
    fn page_rule(#[case] margins: Margins, #[case] expected: &str) {
        for palette in ALL_PALETTES {
            let css = PrintProfile::new(margins, palette).stylesheet().unwrap();
            let page = &css[css.find("@page").unwrap()..];
            let page = &page[..page.find('}').unwrap()];
            assert!(page.contains("size: A4;"));
            assert!(page.contains(expected), "{page}");
        }
    }

    #[rstest]
    #[case(Palette::Document)]
    #[case(Palette::Dark)]
    #[case(Palette::Light)]
    fn pagination_rules_survive_every_palette(#[case] palette: Palette) {
        let profile = PrintProfile::new(Margins::Flush, palette);
        let css = profile.stylesheet().unwrap();
        assert!(css.starts_with(&profile.base_rules()));
        assert!(css.contains("h1, h2, h3, h4, h5, h6 {"));
        assert!(css.contains("page-break-before: avoid;"));
        assert!(css.contains("page-break-after: avoid;"));
        assert!(css.contains("table, pre, blockquote {"));
        assert!(css.contains("page-break-inside: avoid;"));
        assert!(css.contains("orphans: 3;"));
        assert!(css.contains("widows: 3;"));
    }

    #[test]
    fn document_palette_leaves_colors_alone() {
        let css = PrintProfile::default().stylesheet().unwrap();
        assert!(!css.contains("background"));
        assert!(!css.contains("color:"));
    }

    #[rstest]
    #[case(Palette::Dark, "#23272f")]
    #[case(Palette::Light, "#fff")]
    fn palette_is_appended(#[case] palette: Palette, #[case] background: &str) {
        let profile = PrintProfile::new(Margins::Inset, palette);
        let css = profile.stylesheet().unwrap();
        let base_len = profile.base_rules().len();
        assert!(css.len() > base_len);
        assert!(css[base_len..].contains(background));
        assert!(!css[..base_len].contains(background));
    }

    #[test]
    fn deterministic() {
        for margins in [Margins::Flush, Margins::Inset] {
            for palette in ALL_PALETTES {
                let profile = PrintProfile::new(margins, palette);
                assert_eq!(profile.stylesheet().unwrap(), profile.stylesheet().unwrap());
            }
        }
    }

    #[test]
    fn fixed_parameters() {
        let profile = PrintProfile::default();
        assert_eq!(PAGE_SIZE, "A4");
        assert_eq!(WIDOWS_ORPHANS, 3);
        assert_eq!(profile.margins, Margins::Flush);
        assert_eq!(profile.palette, Palette::Document);
    }
}
