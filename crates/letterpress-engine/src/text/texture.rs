use super::{GlyphBitmap, GlyphQuad, TextError};

/// Allocates one single-channel 8-bit texture per rasterized glyph.
///
/// Textures are written once at creation and never updated in place.
pub trait GlyphTextures {
    type Texture;

    /// Allocates a texture sized to `bitmap` and uploads its pixels.
    fn create(&mut self, bitmap: &GlyphBitmap) -> Result<Self::Texture, TextError>;

    /// Frees a texture that is no longer referenced by the cache.
    fn release(&mut self, texture: Self::Texture);
}

/// Receives one textured quad per drawn glyph, in layout order.
pub trait GlyphSink<T> {
    fn draw_glyph(&mut self, texture: &T, quad: &GlyphQuad);
}

impl<T, S: GlyphSink<T> + ?Sized> GlyphSink<T> for &mut S {
    fn draw_glyph(&mut self, texture: &T, quad: &GlyphQuad) {
        (**self).draw_glyph(texture, quad);
    }
}
