//! # Compositing
//!
//! The drawing capability every rendering backend provides.
//!
//! ## Responsibilities
//! - **Primitives**: fills, strokes, text and images under the current blend mode.
//! - **State**: save/restore of transform, clip and blend mode (`StateGuard` scopes them).
//! - **Masking**: `invert` builds even-odd knockout paths, `apply_mask` composites content
//!   through a mask's alpha.
//!
//! ## Backends
//! - `SkiaCompositor`: draws onto a `skia_safe::Canvas`.
//! - `RecordingCompositor`: records operations without rasterizing.

use crate::errors::SwitchError;
use crate::text::TextStyle;
use crate::types::{Color, GradientConfig};
use skia_safe::{BlendMode, Image, Path, PathFillType, Point, Rect};
use std::ops::{Deref, DerefMut};

pub mod recording;
pub mod skia;

pub use recording::{DrawOp, RecordingCompositor};
pub use skia::SkiaCompositor;

/// A single drawing step run against a compositor, used for mask content and mask shape.
pub type DrawStep<'a> = dyn FnMut(&mut dyn Compositor) -> Result<(), SwitchError> + 'a;

/// How a primitive is painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fill<'a> {
    Solid(Color),
    /// Linear gradient whose relative endpoints are mapped onto `bounds`.
    Gradient {
        config: &'a GradientConfig,
        bounds: Rect,
    },
}

pub trait Compositor {
    /// Pushes the current state. Returns the save count before the push.
    fn save(&mut self) -> usize;

    /// Pushes the current state and starts an offscreen layer composited with `blend` on restore.
    fn save_layer(&mut self, blend: BlendMode) -> usize;

    /// Pops the most recent `save`/`save_layer`.
    fn restore(&mut self);

    fn save_count(&self) -> usize;

    fn translate(&mut self, dx: f32, dy: f32);

    /// Intersects the clip with a rounded rect.
    fn clip_rrect(&mut self, rect: Rect, radius: f32);

    /// Sets the blend mode used by subsequent primitives. Restored along with the rest of the state.
    fn set_blend_mode(&mut self, mode: BlendMode);

    fn blend_mode(&self) -> BlendMode;

    fn fill_rect(&mut self, rect: Rect, fill: &Fill<'_>);

    /// Fills `path` honouring its fill type.
    fn fill_path(&mut self, path: &Path, fill: &Fill<'_>);

    fn stroke_path(&mut self, path: &Path, width: f32, fill: &Fill<'_>);

    /// Draws one line of text with its baseline starting at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle, fill: &Fill<'_>);

    fn draw_image(&mut self, image: &Image, dst: Rect);

    /// Builds the knockout of `path` within `bounds`: opaque everywhere except inside `path`.
    fn invert(&self, path: &Path, bounds: Rect) -> Path {
        invert_path(path, bounds)
    }

    /// Draws `content`, then keeps only the parts covered by what `mask` draws (by alpha).
    fn apply_mask(
        &mut self,
        content: &mut DrawStep<'_>,
        mask: &mut DrawStep<'_>,
    ) -> Result<(), SwitchError>;
}

/// Appends the full `bounds` rect to `path` under the even-odd rule.
///
/// Points inside `path` are covered twice and drop out; the rest of `bounds` is covered once.
pub fn invert_path(path: &Path, bounds: Rect) -> Path {
    let mut inverted = path.clone();
    inverted.add_rect(bounds, None);
    inverted.set_fill_type(PathFillType::EvenOdd);
    inverted
}

/// Reference `apply_mask`: content in one layer, mask in a nested `DstIn` layer.
pub fn composite_masked(
    ctx: &mut dyn Compositor,
    content: &mut DrawStep<'_>,
    mask: &mut DrawStep<'_>,
) -> Result<(), SwitchError> {
    let mut layer = StateGuard::layer(ctx, BlendMode::SrcOver);
    content(&mut *layer)?;
    let mut mask_layer = StateGuard::layer(&mut *layer, BlendMode::DstIn);
    mask(&mut *mask_layer)
}

/// Scoped save/restore.
///
/// The matching `restore` runs when the guard drops, so early returns and panics
/// inside the scope still leave the compositor balanced.
pub struct StateGuard<'a, C: Compositor + ?Sized> {
    ctx: &'a mut C,
}

impl<'a, C: Compositor + ?Sized> StateGuard<'a, C> {
    pub fn save(ctx: &'a mut C) -> Self {
        ctx.save();
        Self { ctx }
    }

    pub fn layer(ctx: &'a mut C, blend: BlendMode) -> Self {
        ctx.save_layer(blend);
        Self { ctx }
    }
}

impl<C: Compositor + ?Sized> Deref for StateGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        &*self.ctx
    }
}

impl<C: Compositor + ?Sized> DerefMut for StateGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut *self.ctx
    }
}

impl<C: Compositor + ?Sized> Drop for StateGuard<'_, C> {
    fn drop(&mut self) {
        self.ctx.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_path_is_even_odd_knockout() {
        let mut knob = Path::new();
        knob.add_oval(Rect::from_xywh(10.0, 10.0, 20.0, 20.0), None);
        let inverted = invert_path(&knob, Rect::from_wh(100.0, 40.0));

        assert_eq!(inverted.fill_type(), PathFillType::EvenOdd);
        assert!(!inverted.contains((20.0, 20.0)));
        assert!(inverted.contains((60.0, 20.0)));
        assert!(inverted.contains((2.0, 2.0)));
        assert_eq!(*inverted.bounds(), Rect::from_wh(100.0, 40.0));
    }

    #[test]
    fn test_invert_empty_path_covers_bounds() {
        let inverted = invert_path(&Path::new(), Rect::from_wh(50.0, 20.0));
        assert!(inverted.contains((25.0, 10.0)));
    }

    fn clear_then_fail(ctx: &mut RecordingCompositor) -> Result<(), SwitchError> {
        let mut scope = StateGuard::save(ctx);
        scope.set_blend_mode(BlendMode::Clear);
        Err(SwitchError::RecursionLimit)
    }

    #[test]
    fn test_guard_restores_on_error() {
        let mut recorder = RecordingCompositor::new();
        assert!(clear_then_fail(&mut recorder).is_err());
        assert!(recorder.is_balanced());
        assert_eq!(recorder.blend_mode(), BlendMode::SrcOver);
    }

    #[test]
    fn test_composite_masked_nests_dst_in() {
        let mut recorder = RecordingCompositor::new();
        recorder
            .apply_mask(
                &mut |ctx: &mut dyn Compositor| {
                    ctx.fill_rect(Rect::from_wh(10.0, 10.0), &Fill::Solid(Color::RED));
                    Ok(())
                },
                &mut |ctx: &mut dyn Compositor| {
                    ctx.fill_rect(Rect::from_wh(5.0, 5.0), &Fill::Solid(Color::BLACK));
                    Ok(())
                },
            )
            .expect("masking succeeds");

        let ops = recorder.ops();
        assert_eq!(ops[0], DrawOp::SaveLayer(BlendMode::SrcOver));
        assert!(matches!(ops[1], DrawOp::FillRect { .. }));
        assert_eq!(ops[2], DrawOp::SaveLayer(BlendMode::DstIn));
        assert!(matches!(ops[3], DrawOp::FillRect { .. }));
        assert_eq!(ops[4], DrawOp::Restore);
        assert_eq!(ops[5], DrawOp::Restore);
        assert!(recorder.is_balanced());
    }
}
