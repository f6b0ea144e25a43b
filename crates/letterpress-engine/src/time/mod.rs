//! Frame timing and pacing.
//!
//! One [`FrameClock`] per window: `tick()` once per presented frame, and ask
//! `deadline()` when the next frame is due.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
