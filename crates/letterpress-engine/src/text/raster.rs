use tiny_skia::{FillRule, Paint, Pixmap, Stroke, Transform};

use super::{GlyphBitmap, GlyphBounds, GlyphStyle};

/// Rasterization settings shared by every glyph of a [`TextRenderer`](super::TextRenderer).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RasterOptions {
    /// Anti-aliased edges. Off produces hard 0/255 coverage.
    pub antialias: bool,
    /// Pen width in pixels for [`GlyphStyle::Stroke`].
    pub stroke_width: f32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            antialias: false,
            stroke_width: 1.0,
        }
    }
}

/// Bitmap dimensions for an outline: bounding box plus one pixel, truncated.
pub fn bitmap_size(bounds: GlyphBounds) -> (u32, u32) {
    let w = (bounds.width.max(0.0) + 1.0) as u32;
    let h = (bounds.height.max(0.0) + 1.0) as u32;
    (w.max(1), h.max(1))
}

/// Renders `path` (pixel units, baseline origin, +Y up) into a coverage bitmap.
///
/// The outline is shifted so its bounding box starts at the bitmap's top-left
/// and flipped so row 0 is the top of the glyph.
pub fn rasterize(
    path: &tiny_skia::Path,
    bounds: GlyphBounds,
    style: GlyphStyle,
    options: &RasterOptions,
) -> GlyphBitmap {
    let (width, height) = bitmap_size(bounds);

    let Some(mut pixmap) = Pixmap::new(width, height) else {
        log::warn!("{width}x{height} glyph bitmap is too large, leaving it blank");
        return GlyphBitmap {
            width: 1,
            height: 1,
            pixels: vec![0],
        };
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(255, 255, 255, 255);
    paint.anti_alias = options.antialias;

    let transform = Transform::from_row(1.0, 0.0, 0.0, -1.0, -bounds.xmin, bounds.top());

    match style {
        GlyphStyle::Fill => {
            pixmap.fill_path(path, &paint, FillRule::Winding, transform, None);
        }
        GlyphStyle::Stroke => {
            let stroke = Stroke {
                width: options.stroke_width,
                ..Stroke::default()
            };
            pixmap.stroke_path(path, &paint, &stroke, transform, None);
        }
    }

    let pixels = pixmap.pixels().iter().map(|p| p.alpha()).collect();
    GlyphBitmap { width, height, pixels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::{PathBuilder, Rect};

    fn bounds(xmin: f32, ymin: f32, width: f32, height: f32) -> GlyphBounds {
        GlyphBounds {
            xmin,
            ymin,
            width,
            height,
        }
    }

    // 20x20 square sitting on the baseline, 2px right of the pen.
    fn square() -> (tiny_skia::Path, GlyphBounds) {
        let path = PathBuilder::from_rect(Rect::from_xywh(2.0, 0.0, 20.0, 20.0).unwrap());
        (path, bounds(2.0, 0.0, 20.0, 20.0))
    }

    #[test]
    fn bitmap_is_bounds_plus_one_pixel() {
        let (w, h) = bitmap_size(bounds(0.0, -3.0, 10.4, 7.9));
        assert_eq!((w, h), (11, 8));
    }

    #[test]
    fn empty_bounds_still_yield_one_pixel() {
        assert_eq!(bitmap_size(GlyphBounds::default()), (1, 1));
    }

    #[test]
    fn fill_covers_interior() {
        let (path, bounds) = square();
        let bmp = rasterize(&path, bounds, GlyphStyle::Fill, &RasterOptions::default());
        assert_eq!((bmp.width, bmp.height), (21, 21));
        assert_eq!(bmp.pixels.len(), 21 * 21);
        assert_eq!(bmp.coverage(10, 10), Some(255));
        assert_eq!(bmp.coverage(1, 1), Some(255));
        // Padding column/row past the box stay empty.
        assert_eq!(bmp.coverage(20, 10), Some(0));
        assert_eq!(bmp.coverage(10, 20), Some(0));
    }

    #[test]
    fn stroke_leaves_interior_empty() {
        // Box edges land 1.5px inside the bitmap so a 3px pen stays on canvas.
        let path = PathBuilder::from_rect(Rect::from_xywh(3.5, 1.5, 20.0, 20.0).unwrap());
        let options = RasterOptions {
            stroke_width: 3.0,
            ..RasterOptions::default()
        };
        let bmp = rasterize(&path, bounds(2.0, 0.0, 23.0, 23.0), GlyphStyle::Stroke, &options);
        assert_eq!((bmp.width, bmp.height), (24, 24));
        assert_eq!(bmp.coverage(12, 12), Some(0));
        assert_eq!(bmp.coverage(1, 12), Some(255));
        assert_eq!(bmp.coverage(12, 1), Some(255));
    }

    #[test]
    fn aliased_output_is_binary() {
        let path = PathBuilder::from_circle(10.0, 10.0, 9.3).unwrap();
        let circle = bounds(0.7, 0.7, 18.6, 18.6);
        let bmp = rasterize(&path, circle, GlyphStyle::Fill, &RasterOptions::default());
        assert!(bmp.pixels.iter().all(|&c| c == 0 || c == 255));
    }

    #[test]
    fn antialiased_output_has_partial_coverage() {
        let path = PathBuilder::from_circle(10.0, 10.0, 9.3).unwrap();
        let options = RasterOptions {
            antialias: true,
            ..RasterOptions::default()
        };
        let bmp = rasterize(&path, bounds(0.7, 0.7, 18.6, 18.6), GlyphStyle::Fill, &options);
        assert!(bmp.pixels.iter().any(|&c| c > 0 && c < 255));
    }

    #[test]
    fn rows_run_top_to_bottom() {
        // Only the upper half of the box (y 10..20 above the baseline) is filled.
        let path = PathBuilder::from_rect(Rect::from_xywh(0.0, 10.0, 20.0, 10.0).unwrap());
        let half = bounds(0.0, 0.0, 20.0, 20.0);
        let bmp = rasterize(&path, half, GlyphStyle::Fill, &RasterOptions::default());
        assert_eq!(bmp.coverage(10, 2), Some(255));
        assert_eq!(bmp.coverage(10, 17), Some(0));
    }

    #[test]
    fn oversized_outline_falls_back_to_blank_pixel() {
        let path = PathBuilder::from_rect(Rect::from_xywh(0.0, 0.0, 20.0, 20.0).unwrap());
        let huge = bounds(0.0, 0.0, 3.0e9, 20.0);
        let bmp = rasterize(&path, huge, GlyphStyle::Fill, &RasterOptions::default());
        assert_eq!((bmp.width, bmp.height), (1, 1));
        assert_eq!(bmp.pixels, vec![0]);
    }
}
