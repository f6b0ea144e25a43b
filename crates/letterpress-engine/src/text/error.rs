use std::fmt;

/// Errors produced by the text layer.
///
/// Only font loading surfaces these to callers. Per-glyph failures are logged
/// and turned into advance-only glyphs by the [`TextRenderer`](super::TextRenderer).
#[derive(Debug)]
pub enum TextError {
    /// Font bytes could not be parsed as TrueType/OpenType.
    FontLoad(String),
    /// Reading a font file failed.
    Io(std::io::Error),
    /// A bitmap with zero width or height was passed to a texture allocator.
    EmptyBitmap,
    /// The texture allocator rejected an upload.
    Upload(String),
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextError::FontLoad(msg) => write!(f, "font load error: {msg}"),
            TextError::Io(err) => write!(f, "font read error: {err}"),
            TextError::EmptyBitmap => f.write_str("glyph bitmap has zero area"),
            TextError::Upload(msg) => write!(f, "glyph upload failed: {msg}"),
        }
    }
}

impl std::error::Error for TextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TextError {
    fn from(err: std::io::Error) -> Self {
        TextError::Io(err)
    }
}
