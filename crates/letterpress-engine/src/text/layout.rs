use std::str::Chars;

use crate::coords::Vec2;

use super::{Glyph, GlyphCache, GlyphKey, GlyphQuad, GlyphStyle};

/// A character placed on the line.
#[derive(Debug)]
pub struct PlacedGlyph<'a, T> {
    pub ch: char,
    pub glyph: &'a Glyph<T>,
    /// Pen position before this glyph advanced it.
    pub pen: Vec2,
    /// Screen quad; `None` for glyphs that only advance the pen.
    pub quad: Option<GlyphQuad>,
}

/// Lazy left-to-right placement of a string's glyphs.
///
/// Produced by [`TextRenderer::layout`](super::TextRenderer::layout) once every
/// glyph of the string is cached. Cloning restarts from the current position;
/// a fresh clone taken before iteration replays the whole string.
#[derive(Debug)]
pub struct GlyphLayout<'a, T> {
    cache: &'a GlyphCache<T>,
    chars: Chars<'a>,
    style: GlyphStyle,
    pen: Vec2,
}

impl<'a, T> GlyphLayout<'a, T> {
    pub(crate) fn new(
        cache: &'a GlyphCache<T>,
        text: &'a str,
        origin: Vec2,
        style: GlyphStyle,
    ) -> Self {
        Self {
            cache,
            chars: text.chars(),
            style,
            pen: origin,
        }
    }

    /// Current pen position; after exhaustion, where the next string continues.
    #[inline]
    pub fn pen(&self) -> Vec2 {
        self.pen
    }
}

impl<T> Clone for GlyphLayout<'_, T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache,
            chars: self.chars.clone(),
            style: self.style,
            pen: self.pen,
        }
    }
}

impl<'a, T> Iterator for GlyphLayout<'a, T> {
    type Item = PlacedGlyph<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let ch = self.chars.next()?;
            let Some(glyph) = self.cache.get(&GlyphKey::new(ch, self.style)) else {
                log::debug!("layout skipped uncached glyph {ch:?}");
                continue;
            };

            let pen = self.pen;
            self.pen = self.pen.advanced(glyph.advance);

            return Some(PlacedGlyph {
                ch,
                glyph,
                pen,
                quad: glyph.quad_at(pen),
            });
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.chars.size_hint().1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawable(texture: u32, advance: f32, size: Vec2, bearing: Vec2) -> Glyph<u32> {
        Glyph {
            texture: Some(texture),
            size,
            bearing,
            advance,
            glyph_index: Some(texture as u16),
            font_size: 100.0,
        }
    }

    fn cache() -> GlyphCache<u32> {
        let mut cache = GlyphCache::new();
        cache.insert(
            GlyphKey::new('A', GlyphStyle::Fill),
            drawable(1, 60.0, Vec2::new(50.0, 70.0), Vec2::new(2.0, 70.0)),
        );
        cache.insert(
            GlyphKey::new('g', GlyphStyle::Fill),
            drawable(2, 40.0, Vec2::new(30.0, 60.0), Vec2::new(3.0, 45.0)),
        );
        cache.insert(
            GlyphKey::new(' ', GlyphStyle::Fill),
            Glyph::advance_only(25.0, Some(3), 100.0),
        );
        cache
    }

    #[test]
    fn pen_advances_by_each_glyph() {
        let cache = cache();
        let mut layout = GlyphLayout::new(&cache, "A g", Vec2::new(10.0, 100.0), GlyphStyle::Fill);
        let pens: Vec<f32> = layout.by_ref().map(|p| p.pen.x).collect();
        assert_eq!(pens, vec![10.0, 70.0, 95.0]);
        assert_eq!(layout.pen(), Vec2::new(135.0, 100.0));
    }

    #[test]
    fn glyphs_share_a_baseline() {
        let cache = cache();
        let placed: Vec<_> =
            GlyphLayout::new(&cache, "Ag", Vec2::new(0.0, 100.0), GlyphStyle::Fill).collect();

        let a = placed[0].quad.unwrap();
        let g = placed[1].quad.unwrap();
        assert_eq!(a.top_left(), Vec2::new(2.0, 30.0));
        assert_eq!(g.top_left(), Vec2::new(63.0, 55.0));
        // Descender: 'g' extends 15px below the baseline.
        assert_eq!(g.bottom_right().y, 115.0);
    }

    #[test]
    fn whitespace_advances_without_quad() {
        let cache = cache();
        let placed: Vec<_> =
            GlyphLayout::new(&cache, " ", Vec2::zero(), GlyphStyle::Fill).collect();
        assert_eq!(placed.len(), 1);
        assert!(placed[0].quad.is_none());
    }

    #[test]
    fn clone_replays_the_sequence() {
        let cache = cache();
        let layout = GlyphLayout::new(&cache, "gA", Vec2::zero(), GlyphStyle::Fill);
        let first: Vec<_> = layout.clone().map(|p| (p.ch, p.quad)).collect();
        let second: Vec<_> = layout.map(|p| (p.ch, p.quad)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn other_style_entries_are_not_used() {
        let cache = cache();
        let placed: Vec<_> =
            GlyphLayout::new(&cache, "A", Vec2::zero(), GlyphStyle::Stroke).collect();
        assert!(placed.is_empty());
    }
}
