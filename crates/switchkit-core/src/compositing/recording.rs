use super::{composite_masked, Compositor, DrawStep, Fill};
use crate::errors::SwitchError;
use crate::text::TextStyle;
use skia_safe::{BlendMode, Image, Path, PathFillType, Point, Rect};

/// One recorded compositor call. Primitives carry the blend mode they were drawn with.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Save,
    SaveLayer(BlendMode),
    Restore,
    Translate(f32, f32),
    ClipRRect { rect: Rect, radius: f32 },
    SetBlendMode(BlendMode),
    FillRect { rect: Rect, blend: BlendMode },
    FillPath { bounds: Rect, fill_type: PathFillType, blend: BlendMode },
    StrokePath { bounds: Rect, width: f32, blend: BlendMode },
    Text { text: String, origin: Point, blend: BlendMode },
    Image { dst: Rect, blend: BlendMode },
}

/// A compositor that rasterizes nothing and remembers every call.
///
/// Useful for asserting draw order and save/restore balance without a surface.
#[derive(Clone, Debug)]
pub struct RecordingCompositor {
    ops: Vec<DrawOp>,
    blend_stack: Vec<BlendMode>,
    underflows: usize,
    max_depth: usize,
}

impl Default for RecordingCompositor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCompositor {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            blend_stack: vec![BlendMode::SrcOver],
            underflows: 0,
            max_depth: 1,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Restores issued with nothing left to restore.
    pub fn underflows(&self) -> usize {
        self.underflows
    }

    /// Deepest save count reached.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Every save was matched by exactly one restore.
    pub fn is_balanced(&self) -> bool {
        self.blend_stack.len() == 1 && self.underflows == 0
    }

    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    fn push(&mut self, blend: BlendMode) -> usize {
        let before = self.blend_stack.len();
        self.blend_stack.push(blend);
        self.max_depth = self.max_depth.max(self.blend_stack.len());
        before
    }
}

impl Compositor for RecordingCompositor {
    fn save(&mut self) -> usize {
        self.ops.push(DrawOp::Save);
        let blend = self.blend_mode();
        self.push(blend)
    }

    fn save_layer(&mut self, blend: BlendMode) -> usize {
        self.ops.push(DrawOp::SaveLayer(blend));
        self.push(BlendMode::SrcOver)
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
        if self.blend_stack.len() > 1 {
            self.blend_stack.pop();
        } else {
            self.underflows += 1;
        }
    }

    fn save_count(&self) -> usize {
        self.blend_stack.len()
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.ops.push(DrawOp::Translate(dx, dy));
    }

    fn clip_rrect(&mut self, rect: Rect, radius: f32) {
        self.ops.push(DrawOp::ClipRRect { rect, radius });
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.ops.push(DrawOp::SetBlendMode(mode));
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

    fn fill_rect(&mut self, rect: Rect, _fill: &Fill<'_>) {
        let blend = self.blend_mode();
        self.ops.push(DrawOp::FillRect { rect, blend });
    }

    fn fill_path(&mut self, path: &Path, _fill: &Fill<'_>) {
        let blend = self.blend_mode();
        self.ops.push(DrawOp::FillPath {
            bounds: *path.bounds(),
            fill_type: path.fill_type(),
            blend,
        });
    }

    fn stroke_path(&mut self, path: &Path, width: f32, _fill: &Fill<'_>) {
        let blend = self.blend_mode();
        self.ops.push(DrawOp::StrokePath {
            bounds: *path.bounds(),
            width,
            blend,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, _style: &TextStyle, _fill: &Fill<'_>) {
        let blend = self.blend_mode();
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            origin,
            blend,
        });
    }

    fn draw_image(&mut self, _image: &Image, dst: Rect) {
        let blend = self.blend_mode();
        self.ops.push(DrawOp::Image { dst, blend });
    }

    fn apply_mask(
        &mut self,
        content: &mut DrawStep<'_>,
        mask: &mut DrawStep<'_>,
    ) -> Result<(), SwitchError> {
        composite_masked(self, content, mask)
    }
}
