use std::path::Path;

use tiny_skia::PathBuilder;

use super::{GlyphBounds, GlyphMetrics, TextError};

/// Font queries the glyph cache depends on.
///
/// All sizes are pixel sizes; outline coordinates are in pixels with the origin
/// on the baseline at the pen position and +Y up.
pub trait FontEngine {
    /// Glyph index for `ch`, or `None` when the font has no glyph for it.
    fn glyph_index(&self, ch: char) -> Option<u16>;

    /// Bounding box and advance for a glyph index at `px`.
    ///
    /// Index 0 reports the font's missing-glyph metrics.
    fn metrics(&self, index: u16, px: f32) -> GlyphMetrics;

    /// Outline of the glyph as a path, or `None` when it has no contours.
    fn outline(&self, index: u16, px: f32) -> Option<tiny_skia::Path>;
}

/// A TrueType/OpenType font loaded from memory.
///
/// `fontdue` answers glyph lookups and metrics; outlines come from
/// `ttf-parser`, which reads the same font bytes.
pub struct FontFace {
    font: fontdue::Font,
    data: Vec<u8>,
}

impl FontFace {
    /// Parses a font from raw bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, TextError> {
        // Validate with ttf-parser up front so `outline` can rely on it.
        ttf_parser::Face::parse(&data, 0).map_err(|e| TextError::FontLoad(e.to_string()))?;

        let font = fontdue::Font::from_bytes(data.as_slice(), fontdue::FontSettings::default())
            .map_err(|e| TextError::FontLoad(e.to_string()))?;

        Ok(Self { font, data })
    }

    /// Reads and parses a font file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TextError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        log::debug!("loaded font file {} ({} bytes)", path.display(), data.len());
        Self::from_bytes(data)
    }

    /// Font name from the naming table, if present.
    pub fn name(&self) -> Option<&str> {
        self.font.name()
    }
}

impl FontEngine for FontFace {
    fn glyph_index(&self, ch: char) -> Option<u16> {
        match self.font.lookup_glyph_index(ch) {
            0 => None,
            index => Some(index),
        }
    }

    fn metrics(&self, index: u16, px: f32) -> GlyphMetrics {
        let m = self.font.metrics_indexed(index, px);
        GlyphMetrics {
            bounds: GlyphBounds {
                xmin: m.bounds.xmin,
                ymin: m.bounds.ymin,
                width: m.bounds.width,
                height: m.bounds.height,
            },
            advance: m.advance_width,
        }
    }

    fn outline(&self, index: u16, px: f32) -> Option<tiny_skia::Path> {
        let face = match ttf_parser::Face::parse(&self.data, 0) {
            Ok(face) => face,
            Err(e) => {
                log::error!("font data no longer parses: {e}");
                return None;
            }
        };

        let units_per_em = f32::from(face.units_per_em());
        if units_per_em <= 0.0 {
            return None;
        }

        let mut pen = OutlinePen {
            builder: PathBuilder::new(),
            scale: px / units_per_em,
        };
        face.outline_glyph(ttf_parser::GlyphId(index), &mut pen)?;
        pen.builder.finish()
    }
}

/// Scales font-unit outline segments into a pixel-space path.
struct OutlinePen {
    builder: PathBuilder,
    scale: f32,
}

impl ttf_parser::OutlineBuilder for OutlinePen {
    fn move_to(&mut self, x: f32, y: f32) {
        let s = self.scale;
        self.builder.move_to(x * s, y * s);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let s = self.scale;
        self.builder.line_to(x * s, y * s);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let s = self.scale;
        self.builder.quad_to(x1 * s, y1 * s, x * s, y * s);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let s = self.scale;
        self.builder.cubic_to(x1 * s, y1 * s, x2 * s, y2 * s, x * s, y * s);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
