use letterpress_engine::coords::Vec2;
use letterpress_engine::core::{App, AppControl, FrameCtx};
use letterpress_engine::paint::Color;
use letterpress_engine::render::{GlyphBatch, RenderCtx, TextPipeline, WgpuGlyphTextures};
use letterpress_engine::text::{
    FontEngine, FontFace, GlyphSink, GlyphStyle, GlyphTextures, TextRenderer,
};

// Opaque, so straight and premultiplied components agree.
const CLEAR: Color = Color::from_premul(0.2, 0.3, 0.3, 1.0);

/// One run of text; `origin: None` continues from the previous run's pen.
struct Run {
    text: &'static str,
    style: GlyphStyle,
    origin: Option<Vec2>,
}

const RUNS: &[Run] = &[
    Run {
        text: "This is sample text",
        style: GlyphStyle::Fill,
        origin: Some(Vec2::new(50.0, 250.0)),
    },
    Run {
        text: "(C) ",
        style: GlyphStyle::Stroke,
        origin: Some(Vec2::new(400.0, 600.0)),
    },
    Run {
        text: "LearnOpenGL",
        style: GlyphStyle::Fill,
        origin: None,
    },
    Run {
        text: ".com",
        style: GlyphStyle::Stroke,
        origin: None,
    },
];

/// Lays out every run into `sink`, returning the final pen.
fn draw_runs<F, A, S>(renderer: &mut TextRenderer<F, A>, sink: &mut S) -> Vec2
where
    F: FontEngine,
    A: GlyphTextures,
    S: GlyphSink<A::Texture>,
{
    let mut pen = Vec2::zero();
    for run in RUNS {
        pen = renderer.draw_text(run.text, run.origin.unwrap_or(pen), run.style, sink);
    }
    pen
}

struct GpuState {
    pipeline: TextPipeline,
    renderer: TextRenderer<FontFace, WgpuGlyphTextures>,
    batch: GlyphBatch,
}

/// The text sample: four strings redrawn every frame.
pub struct TextSample {
    font: Option<FontFace>,
    size: (u32, u32),
    gpu: Option<GpuState>,
}

impl TextSample {
    pub fn new(font: FontFace) -> Self {
        Self {
            font: Some(font),
            size: (1, 1),
            gpu: None,
        }
    }

    fn ensure_gpu(&mut self, ctx: &RenderCtx<'_>) -> Option<&mut GpuState> {
        if self.gpu.is_none() {
            let font = self.font.take()?;
            let mut pipeline = TextPipeline::new(ctx, Default::default());
            pipeline.resize(self.size.0, self.size.1);
            pipeline.set_color(Color::WHITE);
            let renderer = TextRenderer::new(font, pipeline.glyph_textures(ctx));
            log::debug!("text pipeline ready");
            self.gpu = Some(GpuState {
                pipeline,
                renderer,
                batch: GlyphBatch::new(),
            });
        }
        self.gpu.as_mut()
    }
}

impl App for TextSample {
    fn on_resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.pipeline.resize(width, height);
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(gpu) = self.ensure_gpu(&ctx.gpu.render_ctx()) else {
            log::error!("font already consumed without a pipeline");
            return AppControl::Exit;
        };

        let GpuState {
            pipeline,
            renderer,
            batch,
        } = gpu;
        batch.clear();
        draw_runs(renderer, batch);

        let control = ctx.render(CLEAR, |rctx, target| pipeline.encode(rctx, target, batch));
        renderer.release_retired();
        control
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterpress_engine::text::{
        GlyphBitmap, GlyphBounds, GlyphKey, GlyphMetrics, GlyphQuad, TextError,
    };

    struct BoxFont;

    impl FontEngine for BoxFont {
        fn glyph_index(&self, ch: char) -> Option<u16> {
            Some(ch as u16)
        }

        fn metrics(&self, index: u16, px: f32) -> GlyphMetrics {
            let blank = index == ' ' as u16;
            GlyphMetrics {
                bounds: if blank {
                    GlyphBounds::default()
                } else {
                    GlyphBounds {
                        xmin: 0.0,
                        ymin: 0.0,
                        width: px * 0.375,
                        height: px * 0.625,
                    }
                },
                advance: px * 0.5,
            }
        }

        fn outline(&self, index: u16, px: f32) -> Option<tiny_skia::Path> {
            if index == ' ' as u16 {
                return None;
            }
            let rect = tiny_skia::Rect::from_xywh(0.0, 0.0, px * 0.375, px * 0.625)?;
            Some(tiny_skia::PathBuilder::from_rect(rect))
        }
    }

    #[derive(Default)]
    struct Ids(u32);

    impl GlyphTextures for Ids {
        type Texture = u32;

        fn create(&mut self, _bitmap: &GlyphBitmap) -> Result<u32, TextError> {
            self.0 += 1;
            Ok(self.0)
        }

        fn release(&mut self, _texture: u32) {}
    }

    #[derive(Default)]
    struct Quads(Vec<GlyphQuad>);

    impl GlyphSink<u32> for Quads {
        fn draw_glyph(&mut self, _texture: &u32, quad: &GlyphQuad) {
            self.0.push(*quad);
        }
    }

    #[test]
    fn runs_continue_on_one_line() {
        let mut renderer = TextRenderer::new(BoxFont, Ids::default());
        let mut quads = Quads::default();
        let pen = draw_runs(&mut renderer, &mut quads);

        // 50px advance per char at 100px; the second line starts at x=400.
        let second_line = "(C) LearnOpenGL.com".chars().count() as f32;
        assert_eq!(pen, Vec2::new(400.0 + 50.0 * second_line, 600.0));

        let visible = RUNS
            .iter()
            .flat_map(|r| r.text.chars())
            .filter(|c| *c != ' ')
            .count();
        assert_eq!(quads.0.len(), visible);
        // 'T' hangs 62.5px above the first baseline.
        assert_eq!(quads.0[0].top_left(), Vec2::new(50.0, 187.5));
    }

    #[test]
    fn stroke_and_fill_are_cached_separately() {
        let mut renderer = TextRenderer::new(BoxFont, Ids::default());
        let mut quads = Quads::default();
        draw_runs(&mut renderer, &mut quads);

        // 'e' is filled in both lines, 'o' only appears stroked in ".com"
        // and 'O' only filled in "LearnOpenGL".
        let cache = renderer.cache();
        assert!(cache.contains(&GlyphKey::new('e', GlyphStyle::Fill)));
        assert!(cache.contains(&GlyphKey::new('o', GlyphStyle::Stroke)));
        assert!(!cache.contains(&GlyphKey::new('o', GlyphStyle::Fill)));
        assert!(cache.contains(&GlyphKey::new('O', GlyphStyle::Fill)));
        assert!(!cache.contains(&GlyphKey::new('O', GlyphStyle::Stroke)));
        assert!(cache.contains(&GlyphKey::new('C', GlyphStyle::Stroke)));
        assert!(!cache.contains(&GlyphKey::new('C', GlyphStyle::Fill)));
    }
}
