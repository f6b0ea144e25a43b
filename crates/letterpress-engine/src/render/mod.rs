//! GPU rendering subsystem.
//!
//! Convention:
//! - CPU geometry is in physical pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.

mod common;
mod ctx;
pub mod text;

pub use common::TextVertex;
pub use ctx::{RenderCtx, RenderTarget};
pub use text::{GlyphBatch, GpuGlyph, TextPipeline, WgpuGlyphTextures};
