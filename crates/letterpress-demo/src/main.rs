mod font;
mod sample;

use anyhow::Result;
use letterpress_engine::device::GpuInit;
use letterpress_engine::logging::{LoggingConfig, init_logging};
use letterpress_engine::window::{Runtime, RuntimeConfig};

use crate::sample::TextSample;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let face = font::load_font()?;
    log::info!("font: {}", face.name().unwrap_or("<unnamed>"));

    let config = RuntimeConfig {
        title: "Text".to_string(),
        ..Default::default()
    };
    Runtime::run(config, GpuInit::default(), TextSample::new(face))
}
