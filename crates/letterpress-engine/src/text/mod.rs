//! Glyph rasterization, caching and single-line layout.
//!
//! The pieces are backend agnostic: fonts come in through [`FontEngine`],
//! textures go out through [`GlyphTextures`] and draw calls through
//! [`GlyphSink`]. The wgpu implementations live in `render::text`.

mod cache;
mod error;
mod font;
mod glyph;
mod layout;
pub mod raster;
mod renderer;
mod texture;

pub use cache::GlyphCache;
pub use error::TextError;
pub use font::{FontEngine, FontFace};
pub use glyph::{
    Glyph, GlyphBitmap, GlyphBounds, GlyphKey, GlyphMetrics, GlyphQuad, GlyphStyle, QuadCorner,
};
pub use layout::{GlyphLayout, PlacedGlyph};
pub use raster::RasterOptions;
pub use renderer::{DEFAULT_FONT_SIZE, TextConfig, TextRenderer};
pub use texture::{GlyphSink, GlyphTextures};
