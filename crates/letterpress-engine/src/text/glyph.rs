use crate::coords::Vec2;

/// How a glyph outline is painted into its bitmap.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum GlyphStyle {
    /// Outline interior filled (non-zero winding).
    #[default]
    Fill,
    /// Outline traced with a fixed-width pen; interior left empty.
    Stroke,
}

/// Cache key: one character in one style.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GlyphKey {
    pub ch: char,
    pub style: GlyphStyle,
}

impl GlyphKey {
    #[inline]
    pub const fn new(ch: char, style: GlyphStyle) -> Self {
        Self { ch, style }
    }
}

/// Outline bounding box in pixels, relative to the pen on the baseline.
///
/// `ymin` is measured upwards from the baseline (font convention), so the
/// visual top of the glyph sits at `ymin + height`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct GlyphBounds {
    pub xmin: f32,
    pub ymin: f32,
    pub width: f32,
    pub height: f32,
}

impl GlyphBounds {
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Distance from the baseline up to the top edge of the outline.
    #[inline]
    pub fn top(self) -> f32 {
        self.ymin + self.height
    }
}

/// Layout metrics reported by a [`FontEngine`](super::FontEngine).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct GlyphMetrics {
    pub bounds: GlyphBounds,
    pub advance: f32,
}

/// 8-bit single-channel coverage bitmap, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl GlyphBitmap {
    /// Coverage at `(x, y)`; `None` outside the bitmap.
    pub fn coverage(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }
}

/// A rasterized character at one style, as stored in the glyph cache.
///
/// `texture` is `None` for glyphs that only move the pen: characters the font
/// has no glyph for, empty outlines (whitespace) and failed uploads.
#[derive(Debug)]
pub struct Glyph<T> {
    pub texture: Option<T>,
    /// Bitmap size in pixels.
    pub size: Vec2,
    /// Offset from the pen to the visual top-left corner (+Y up).
    pub bearing: Vec2,
    pub advance: f32,
    /// Font glyph index; `None` when the font has no glyph for the character.
    pub glyph_index: Option<u16>,
    /// Pixel size this entry was rendered at.
    pub font_size: f32,
}

impl<T> Glyph<T> {
    /// A glyph that advances the pen without drawing anything.
    pub fn advance_only(advance: f32, glyph_index: Option<u16>, font_size: f32) -> Self {
        Self {
            texture: None,
            size: Vec2::zero(),
            bearing: Vec2::zero(),
            advance,
            glyph_index,
            font_size,
        }
    }

    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.texture.is_some()
    }

    /// Builds the screen-space quad for this glyph with the pen at `pen`.
    ///
    /// Screen space is +Y down, so the bearing's upward offset is subtracted.
    pub fn quad_at(&self, pen: Vec2) -> Option<GlyphQuad> {
        if !self.is_drawable() {
            return None;
        }
        let lt = Vec2::new(pen.x + self.bearing.x, pen.y - self.bearing.y);
        Some(GlyphQuad::from_top_left(lt, self.size))
    }
}

/// One textured corner of a glyph quad.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct QuadCorner {
    pub position: Vec2,
    pub tex_coords: Vec2,
}

/// Four corners of a glyph quad in triangle-strip order: `lt, rt, lb, rb`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlyphQuad {
    pub corners: [QuadCorner; 4],
}

impl GlyphQuad {
    pub fn from_top_left(lt: Vec2, size: Vec2) -> Self {
        let corner = |dx: f32, dy: f32| QuadCorner {
            position: Vec2::new(lt.x + size.x * dx, lt.y + size.y * dy),
            tex_coords: Vec2::new(dx, dy),
        };
        Self {
            corners: [corner(0.0, 0.0), corner(1.0, 0.0), corner(0.0, 1.0), corner(1.0, 1.0)],
        }
    }

    #[inline]
    pub fn top_left(&self) -> Vec2 {
        self.corners[0].position
    }

    #[inline]
    pub fn bottom_right(&self) -> Vec2 {
        self.corners[3].position
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.bottom_right() - self.top_left()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_corners_follow_strip_order() {
        let q = GlyphQuad::from_top_left(Vec2::new(10.0, 20.0), Vec2::new(4.0, 6.0));
        let pos: Vec<_> = q.corners.iter().map(|c| (c.position.x, c.position.y)).collect();
        assert_eq!(pos, vec![(10.0, 20.0), (14.0, 20.0), (10.0, 26.0), (14.0, 26.0)]);
        let uv: Vec<_> = q.corners.iter().map(|c| (c.tex_coords.x, c.tex_coords.y)).collect();
        assert_eq!(uv, vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
    }

    #[test]
    fn quad_subtracts_bearing_y_from_pen() {
        let glyph = Glyph {
            texture: Some(()),
            size: Vec2::new(8.0, 12.0),
            bearing: Vec2::new(1.0, 10.0),
            advance: 9.0,
            glyph_index: Some(3),
            font_size: 16.0,
        };
        let q = glyph.quad_at(Vec2::new(100.0, 50.0)).unwrap();
        assert_eq!(q.top_left(), Vec2::new(101.0, 40.0));
        assert_eq!(q.size(), Vec2::new(8.0, 12.0));
    }

    #[test]
    fn advance_only_glyph_has_no_quad() {
        let glyph: Glyph<()> = Glyph::advance_only(7.0, None, 16.0);
        assert!(glyph.quad_at(Vec2::zero()).is_none());
    }

    #[test]
    fn coverage_out_of_bounds_is_none() {
        let bmp = GlyphBitmap {
            width: 2,
            height: 1,
            pixels: vec![0, 255],
        };
        assert_eq!(bmp.coverage(1, 0), Some(255));
        assert_eq!(bmp.coverage(2, 0), None);
        assert_eq!(bmp.coverage(0, 1), None);
    }
}
