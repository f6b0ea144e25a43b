use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use letterpress_engine::text::FontFace;

/// Environment variable naming the font file to render with.
pub const FONT_ENV: &str = "LETTERPRESS_FONT";

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Loads the sample's font from `LETTERPRESS_FONT`, else the first system
/// font that parses.
pub fn load_font() -> Result<FontFace> {
    load_from(std::env::var_os(FONT_ENV))
}

/// An explicit override that fails to load is an error, not a fallback.
fn load_from(override_path: Option<OsString>) -> Result<FontFace> {
    if let Some(path) = override_path.map(PathBuf::from) {
        return FontFace::from_path(&path)
            .with_context(|| format!("failed to load {FONT_ENV}={}", path.display()));
    }

    for path in SYSTEM_FONTS.iter().map(PathBuf::from) {
        match FontFace::from_path(&path) {
            Ok(face) => {
                log::debug!("loaded font from {}", path.display());
                return Ok(face);
            }
            Err(err) => log::trace!("skipping {}: {err}", path.display()),
        }
    }
    bail!("no usable font found; set {FONT_ENV} to a .ttf or .otf file")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_override_does_not_fall_back() {
        let err = load_from(Some("/nonexistent/letterpress.ttf".into()))
            .err()
            .expect("missing override must fail");
        let message = format!("{err:#}");
        assert!(message.contains(FONT_ENV), "{message}");
    }

    #[test]
    fn system_fallback_when_installed() {
        if !SYSTEM_FONTS.iter().any(|p| std::path::Path::new(p).exists()) {
            return;
        }
        assert!(load_from(None).is_ok());
    }
}
