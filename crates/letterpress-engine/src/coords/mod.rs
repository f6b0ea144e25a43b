//! Screen-space types shared by the text and render modules.
//!
//! All positions are physical pixels: origin top-left, +X right, +Y down.
//! The text shader converts to NDC using a viewport uniform.

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
