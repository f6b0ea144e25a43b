//! Letterpress engine crate.
//!
//! Glyph rasterization and caching (`text`), the wgpu pipeline that draws
//! glyph quads (`render`), and the window/GPU runtime that hosts an app.

pub mod core;
pub mod coords;
pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
pub mod text;
pub mod time;
pub mod window;
