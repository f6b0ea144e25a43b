//! Color model shared by the frame clear and the text pipeline.
//!
//! Colors are stored as linear premultiplied RGBA to match the pipeline's
//! `One, OneMinusSrcAlpha` blending.

mod color;

pub use color::Color;
