use crate::coords::Vec2;

use super::raster::{self, RasterOptions};
use super::{
    FontEngine, Glyph, GlyphCache, GlyphKey, GlyphLayout, GlyphSink, GlyphStyle, GlyphTextures,
};

/// Pixel size glyphs are rendered at when the caller does not ask for one.
pub const DEFAULT_FONT_SIZE: f32 = 100.0;

/// Text renderer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TextConfig {
    /// Size used by [`TextRenderer::layout`], [`TextRenderer::draw_text`] and
    /// [`TextRenderer::glyph_default`].
    pub font_size: f32,
    pub raster: RasterOptions,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            raster: RasterOptions::default(),
        }
    }
}

/// Rasterizes, caches and lays out glyphs from a single font.
///
/// Each `(character, style)` pair is rasterized on first use and uploaded as
/// its own texture through `A`. Entries are reused while their stored size is
/// at least the requested size and replaced otherwise. A replaced texture may
/// still be referenced by quads queued this frame, so it is retired and only
/// released by [`release_retired`](Self::release_retired) once the frame has
/// been submitted. Dropping the renderer releases every texture it holds.
///
/// Glyph failures never surface as errors. A character the font cannot map,
/// an empty outline or a failed upload produces an advance-only glyph that
/// moves the pen but draws nothing.
pub struct TextRenderer<F, A: GlyphTextures> {
    font: F,
    textures: A,
    cache: GlyphCache<A::Texture>,
    retired: Vec<A::Texture>,
    config: TextConfig,
}

impl<F: FontEngine, A: GlyphTextures> TextRenderer<F, A> {
    pub fn new(font: F, textures: A) -> Self {
        Self::with_config(font, textures, TextConfig::default())
    }

    pub fn with_config(font: F, textures: A, config: TextConfig) -> Self {
        Self {
            font,
            textures,
            cache: GlyphCache::new(),
            retired: Vec::new(),
            config,
        }
    }

    pub fn font(&self) -> &F {
        &self.font
    }

    pub fn cache(&self) -> &GlyphCache<A::Texture> {
        &self.cache
    }

    /// Returns the cached glyph for `(ch, style)`, rasterizing it when absent
    /// or when the cached entry was rendered smaller than `font_size`.
    pub fn glyph(&mut self, ch: char, style: GlyphStyle, font_size: f32) -> &Glyph<A::Texture> {
        let key = GlyphKey::new(ch, style);
        let (glyph, superseded) = self.cache.get_or_insert_with(key, font_size, || {
            build_glyph(&self.font, &mut self.textures, &self.config.raster, key, font_size)
        });

        if let Some(texture) = superseded.and_then(|old| old.texture) {
            log::debug!("replaced {key:?} with a {font_size}px rendering");
            self.retired.push(texture);
        }

        glyph
    }

    /// [`glyph`](Self::glyph) at the configured font size.
    pub fn glyph_default(&mut self, ch: char, style: GlyphStyle) -> &Glyph<A::Texture> {
        let size = self.config.font_size;
        self.glyph(ch, style, size)
    }

    /// Lays out `text` on one line starting at `origin` (pen on the baseline).
    ///
    /// All glyphs are resolved before the layout is returned; iterating it does
    /// no further rasterization.
    pub fn layout<'a>(
        &'a mut self,
        text: &'a str,
        origin: Vec2,
        style: GlyphStyle,
    ) -> GlyphLayout<'a, A::Texture> {
        let size = self.config.font_size;
        self.layout_sized(text, origin, style, size)
    }

    /// [`layout`](Self::layout) with an explicit font size.
    pub fn layout_sized<'a>(
        &'a mut self,
        text: &'a str,
        origin: Vec2,
        style: GlyphStyle,
        font_size: f32,
    ) -> GlyphLayout<'a, A::Texture> {
        for ch in text.chars() {
            self.glyph(ch, style, font_size);
        }
        GlyphLayout::new(&self.cache, text, origin, style)
    }

    /// Emits one textured quad per visible glyph of `text` into `sink`.
    ///
    /// Returns the pen position after the last character so consecutive calls
    /// continue on the same line.
    pub fn draw_text<S>(
        &mut self,
        text: &str,
        origin: Vec2,
        style: GlyphStyle,
        sink: &mut S,
    ) -> Vec2
    where
        S: GlyphSink<A::Texture> + ?Sized,
    {
        let mut layout = self.layout(text, origin, style);
        for placed in layout.by_ref() {
            if let (Some(texture), Some(quad)) = (&placed.glyph.texture, &placed.quad) {
                sink.draw_glyph(texture, quad);
            }
        }
        layout.pen()
    }

    /// Total advance of `text` at the configured font size.
    pub fn measure(&mut self, text: &str, style: GlyphStyle) -> f32 {
        let mut layout = self.layout(text, Vec2::zero(), style);
        layout.by_ref().for_each(drop);
        layout.pen().x
    }
}

impl<F, A: GlyphTextures> TextRenderer<F, A> {
    /// Releases textures superseded by larger renderings. Call after the frame
    /// that may still sample them has been submitted.
    pub fn release_retired(&mut self) -> usize {
        let count = self.retired.len();
        for texture in self.retired.drain(..) {
            self.textures.release(texture);
        }
        count
    }

    /// Drops every cached glyph and releases its texture.
    pub fn clear(&mut self) {
        let mut released = self.release_retired();
        for texture in self.cache.drain().filter_map(|g| g.texture) {
            self.textures.release(texture);
            released += 1;
        }
        if released > 0 {
            log::debug!("released {released} glyph textures");
        }
    }
}

impl<F, A: GlyphTextures> Drop for TextRenderer<F, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

fn build_glyph<F: FontEngine, A: GlyphTextures>(
    font: &F,
    textures: &mut A,
    options: &RasterOptions,
    key: GlyphKey,
    font_size: f32,
) -> Glyph<A::Texture> {
    let Some(index) = font.glyph_index(key.ch) else {
        let advance = font.metrics(0, font_size).advance;
        log::warn!("font has no glyph for {:?}; advancing {advance}px", key.ch);
        return Glyph::advance_only(advance, None, font_size);
    };

    let metrics = font.metrics(index, font_size);
    if metrics.bounds.is_empty() {
        return Glyph::advance_only(metrics.advance, Some(index), font_size);
    }
    let Some(path) = font.outline(index, font_size) else {
        return Glyph::advance_only(metrics.advance, Some(index), font_size);
    };

    let bitmap = raster::rasterize(&path, metrics.bounds, key.style, options);
    match textures.create(&bitmap) {
        Ok(texture) => {
            log::debug!(
                "rasterized {:?} ({:?}) at {font_size}px into {}x{}",
                key.ch,
                key.style,
                bitmap.width,
                bitmap.height
            );
            Glyph {
                texture: Some(texture),
                size: Vec2::new(bitmap.width as f32, bitmap.height as f32),
                bearing: Vec2::new(metrics.bounds.xmin, metrics.bounds.top()),
                advance: metrics.advance,
                glyph_index: Some(index),
                font_size,
            }
        }
        Err(e) => {
            log::error!("glyph {:?} upload failed: {e}", key.ch);
            Glyph::advance_only(metrics.advance, Some(index), font_size)
        }
    }
}
