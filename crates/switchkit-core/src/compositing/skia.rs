use super::{composite_masked, Compositor, DrawStep, Fill};
use crate::errors::SwitchError;
use crate::text::TextStyle;
use skia_safe::{
    canvas::SaveLayerRec, gradient_shader, BlendMode, Canvas, ClipOp, Image, Paint, PaintStyle,
    Path, Point, RRect, Rect, TileMode,
};

/// Compositor backed by a Skia canvas.
///
/// Skia keeps the blend mode on each `Paint` rather than in canvas state, so a blend
/// stack is mirrored alongside the canvas save stack.
pub struct SkiaCompositor<'a> {
    canvas: &'a Canvas,
    blend_stack: Vec<BlendMode>,
    base_count: usize,
}

impl<'a> SkiaCompositor<'a> {
    pub fn new(canvas: &'a Canvas) -> Self {
        Self {
            canvas,
            blend_stack: vec![BlendMode::SrcOver],
            base_count: canvas.save_count(),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        self.canvas
    }

    fn paint(&self, fill: &Fill<'_>) -> Paint {
        let mut paint = Paint::default();
        paint.set_anti_alias(true);
        paint.set_blend_mode(self.blend_mode());

        match fill {
            Fill::Solid(color) => {
                paint.set_color4f(color.to_color4f(), None);
            }
            Fill::Gradient { config, bounds } => match config.colors.as_slice() {
                [single] => {
                    paint.set_color4f(single.to_color4f(), None);
                }
                colors => {
                    let colors: Vec<skia_safe::Color> = colors.iter().map(|c| c.to_skia()).collect();
                    let (start, end) = config.endpoints(*bounds);
                    let shader = gradient_shader::linear(
                        (start, end),
                        colors.as_slice(),
                        config.positions.as_deref(),
                        TileMode::Clamp,
                        None,
                        None,
                    );
                    paint.set_shader(shader);
                }
            },
        }
        paint
    }
}

impl Compositor for SkiaCompositor<'_> {
    fn save(&mut self) -> usize {
        let count = self.canvas.save();
        self.blend_stack.push(self.blend_mode());
        count
    }

    fn save_layer(&mut self, blend: BlendMode) -> usize {
        let mut paint = Paint::default();
        paint.set_blend_mode(blend);
        let count = self.canvas.save_layer(&SaveLayerRec::default().paint(&paint));
        self.blend_stack.push(BlendMode::SrcOver);
        count
    }

    fn restore(&mut self) {
        // Never pop state that existed before this compositor was created.
        if self.canvas.save_count() > self.base_count {
            self.canvas.restore();
        }
        if self.blend_stack.len() > 1 {
            self.blend_stack.pop();
        }
    }

    fn save_count(&self) -> usize {
        self.canvas.save_count()
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.canvas.translate((dx, dy));
    }

    fn clip_rrect(&mut self, rect: Rect, radius: f32) {
        let rrect = RRect::new_rect_xy(rect, radius, radius);
        self.canvas.clip_rrect(rrect, ClipOp::Intersect, true);
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        if let Some(top) = self.blend_stack.last_mut() {
            *top = mode;
        }
    }

    fn blend_mode(&self) -> BlendMode {
        self.blend_stack
            .last()
            .copied()
            .unwrap_or(BlendMode::SrcOver)
    }

    fn fill_rect(&mut self, rect: Rect, fill: &Fill<'_>) {
        let paint = self.paint(fill);
        self.canvas.draw_rect(rect, &paint);
    }

    fn fill_path(&mut self, path: &Path, fill: &Fill<'_>) {
        let paint = self.paint(fill);
        self.canvas.draw_path(path, &paint);
    }

    fn stroke_path(&mut self, path: &Path, width: f32, fill: &Fill<'_>) {
        let mut paint = self.paint(fill);
        paint.set_style(PaintStyle::Stroke);
        paint.set_stroke_width(width);
        self.canvas.draw_path(path, &paint);
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle, fill: &Fill<'_>) {
        let paint = self.paint(fill);
        self.canvas.draw_str(text, origin, &style.font(), &paint);
    }

    fn draw_image(&mut self, image: &Image, dst: Rect) {
        let mut paint = Paint::default();
        paint.set_anti_alias(true);
        paint.set_blend_mode(self.blend_mode());
        self.canvas.draw_image_rect(image, None, dst, &paint);
    }

    fn apply_mask(
        &mut self,
        content: &mut DrawStep<'_>,
        mask: &mut DrawStep<'_>,
    ) -> Result<(), SwitchError> {
        composite_masked(self, content, mask)
    }
}
