//! Contract between the runtime loop and the application it drives.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
