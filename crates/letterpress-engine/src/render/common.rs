//! Shared GPU types for the text pipeline.

use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;
use crate::paint::Color;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── frame uniform ─────────────────────────────────────────────────────────

/// Per-frame text uniform: pixel viewport for NDC conversion and the
/// premultiplied text color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct TextUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
    pub color: [f32; 4],
}

impl TextUniform {
    pub(super) fn new(viewport: Viewport, color: Color) -> Self {
        Self {
            viewport: [viewport.width.max(1.0), viewport.height.max(1.0)],
            _pad: [0.0; 2],
            color: color.to_array(),
        }
    }
}

/// Minimum binding size for the text uniform buffer.
pub(super) fn text_ubo_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<TextUniform>() as u64)
        .expect("TextUniform has non-zero size by construction")
}

// ── glyph vertex ──────────────────────────────────────────────────────────

/// Glyph quad corner in pixels (top-left origin, +Y down).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct TextVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl TextVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x2  // tex_coords
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TextVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_std140_sized() {
        assert_eq!(std::mem::size_of::<TextUniform>(), 32);
        assert_eq!(text_ubo_min_binding_size().get(), 32);
    }

    #[test]
    fn degenerate_viewport_is_clamped() {
        let u = TextUniform::new(Viewport::new(0.0, 600.0), Color::WHITE);
        assert_eq!(u.viewport, [1.0, 600.0]);
        assert_eq!(u.color, [1.0, 1.0, 1.0, 1.0]);
    }
}
