//! GPU device + surface management.
//!
//! Creates the wgpu device and queue for one window, keeps the swapchain
//! configured across resizes and hands out per-frame encoders.

mod config;
mod frame;
mod gpu;
mod surface;

pub use config::GpuInit;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use surface::SurfaceErrorAction;
