//! # Renderer System
//!
//! Paints a [`Layer`] tree through a [`Compositor`].
//!
//! ## Responsibilities
//! - **Tree Traversal**: Recursively paints layers, their content and sublayers (`render_layer`).
//! - **Masking**: Content and sublayers of a masked layer are composited through the mask's alpha.
//! - **Rasterizing**: One-shot rendering of an [`Element`] to a raster image or PNG bytes.

use crate::compositing::{Compositor, Fill, SkiaCompositor, StateGuard};
use crate::element::Element;
use crate::errors::SwitchError;
use crate::layer::{Layer, LayerContent};
use skia_safe::{AlphaType, ColorSpace, ColorType, EncodedImageFormat, Image, ImageInfo, Point};
use tracing::{debug, trace};

/// Deepest nesting of sublayers and masks the renderer will follow.
pub const MAX_LAYER_DEPTH: usize = 64;

/// Renders `layer` (and everything under it) in the compositor's current coordinate space.
pub fn render_layer(layer: &Layer, ctx: &mut dyn Compositor) -> Result<(), SwitchError> {
    render_recursive(layer, ctx, 0)
}

fn render_recursive(
    layer: &Layer,
    ctx: &mut dyn Compositor,
    depth: usize,
) -> Result<(), SwitchError> {
    if depth > MAX_LAYER_DEPTH {
        return Err(SwitchError::RecursionLimit);
    }
    if layer.hidden {
        trace!(layer = %layer.name, "skipping hidden layer");
        return Ok(());
    }

    let mut scope = StateGuard::save(ctx);
    scope.translate(layer.frame.left, layer.frame.top);
    if layer.masks_to_bounds {
        scope.clip_rrect(layer.bounds(), layer.corner_radius);
    }

    match layer.mask.as_deref() {
        Some(mask) => scope.apply_mask(
            &mut |ctx: &mut dyn Compositor| draw_body(layer, ctx, depth),
            &mut |ctx: &mut dyn Compositor| render_recursive(mask, ctx, depth + 1),
        ),
        None => draw_body(layer, &mut *scope, depth),
    }
}

fn draw_body(layer: &Layer, ctx: &mut dyn Compositor, depth: usize) -> Result<(), SwitchError> {
    draw_content(layer, ctx)?;
    for sublayer in &layer.sublayers {
        render_recursive(sublayer, ctx, depth + 1)?;
    }
    Ok(())
}

fn draw_content(layer: &Layer, ctx: &mut dyn Compositor) -> Result<(), SwitchError> {
    let bounds = layer.bounds();
    match &layer.content {
        LayerContent::Empty => {}
        LayerContent::Gradient(config) => {
            ctx.fill_rect(bounds, &Fill::Gradient { config, bounds });
        }
        LayerContent::Shape(shape) => {
            if let Some(color) = shape.fill {
                let path = if shape.inverted {
                    ctx.invert(&shape.path, bounds)
                } else {
                    shape.resolved_path()
                };
                ctx.fill_path(&path, &Fill::Solid(color));
            }
            if let Some(stroke) = shape.stroke {
                ctx.stroke_path(&shape.path, stroke.width, &Fill::Solid(stroke.color));
            }
        }
        LayerContent::Text(text) => {
            let (ascent, _) = text.style.vertical_metrics();
            ctx.draw_text(
                &text.text,
                Point::new(0.0, -ascent),
                &text.style,
                &Fill::Solid(text.color),
            );
        }
        LayerContent::Image(image) => ctx.draw_image(image, bounds),
        LayerContent::Label(label) => label.draw(ctx, bounds)?,
    }
    Ok(())
}

/// Draws `element` onto a transparent raster surface the size of its frame.
///
/// The frame's origin maps to the image's top-left pixel, so offset and negative origins
/// neither crop the element nor pad the image.
pub fn rasterize(element: &dyn Element) -> Result<Image, SwitchError> {
    let frame = element.frame();
    let width = frame.width().ceil().max(1.0) as i32;
    let height = frame.height().ceil().max(1.0) as i32;

    let info = ImageInfo::new(
        (width, height),
        ColorType::RGBA8888,
        AlphaType::Premul,
        Some(ColorSpace::new_srgb()),
    );
    let mut surface =
        skia_safe::surfaces::raster(&info, None, None).ok_or(SwitchError::SurfaceFailure)?;

    {
        let mut ctx = SkiaCompositor::new(surface.canvas());
        ctx.translate(-frame.left, -frame.top);
        element.render(&mut ctx)?;
    }

    debug!(width, height, "rasterized element");
    Ok(surface.image_snapshot())
}

/// [`rasterize`] followed by PNG encoding.
pub fn render_to_png(element: &dyn Element) -> Result<Vec<u8>, SwitchError> {
    let image = rasterize(element)?;
    let data = image
        .encode(None, EncodedImageFormat::PNG, 100)
        .ok_or_else(|| SwitchError::Encode("PNG encoder returned no data".to_string()))?;
    Ok(data.as_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositing::{DrawOp, RecordingCompositor};
    use crate::layer::ShapeLayer;
    use crate::types::GradientConfig;
    use skia_safe::{BlendMode, Path, Rect};

    fn gradient(name: &str, frame: Rect) -> Layer {
        Layer::new(name, frame, LayerContent::Gradient(GradientConfig::default()))
    }

    #[test]
    fn test_hidden_layers_draw_nothing() {
        let root = gradient("root", Rect::from_wh(10.0, 10.0)).hidden(true);
        let mut recorder = RecordingCompositor::new();
        render_layer(&root, &mut recorder).expect("render");
        assert!(recorder.ops().is_empty());
    }

    #[test]
    fn test_mask_uses_dst_in_layer() {
        let mut knob = Path::new();
        knob.add_oval(Rect::from_xywh(2.0, 2.0, 6.0, 6.0), None);
        let mask = Layer::new(
            "mask",
            Rect::from_wh(20.0, 10.0),
            LayerContent::Shape(ShapeLayer::inverted(knob)),
        );
        let root = gradient("root", Rect::from_xywh(5.0, 5.0, 20.0, 10.0))
            .with_mask(mask)
            .masking_to_bounds(5.0);

        let mut recorder = RecordingCompositor::new();
        render_layer(&root, &mut recorder).expect("render");

        let ops = recorder.ops();
        assert_eq!(ops[1], DrawOp::Translate(5.0, 5.0));
        assert_eq!(
            ops[2],
            DrawOp::ClipRRect {
                rect: Rect::from_wh(20.0, 10.0),
                radius: 5.0
            }
        );
        assert_eq!(ops[3], DrawOp::SaveLayer(BlendMode::SrcOver));
        assert!(ops.contains(&DrawOp::SaveLayer(BlendMode::DstIn)));
        assert_eq!(
            recorder.count(|op| matches!(
                op,
                DrawOp::FillPath { fill_type: skia_safe::PathFillType::EvenOdd, .. }
            )),
            1
        );
        assert!(recorder.is_balanced());
    }

    #[test]
    fn test_recursion_limit_is_an_error() {
        let mut layer = Layer::new("leaf", Rect::from_wh(1.0, 1.0), LayerContent::Empty);
        for i in 0..(MAX_LAYER_DEPTH + 2) {
            layer = Layer::new(format!("l{}", i), Rect::from_wh(1.0, 1.0), LayerContent::Empty)
                .with_sublayer(layer);
        }
        let mut recorder = RecordingCompositor::new();
        let err = render_layer(&layer, &mut recorder).unwrap_err();
        assert!(matches!(err, SwitchError::RecursionLimit));
        assert!(recorder.is_balanced());
    }

    #[test]
    fn test_inverted_mask_punches_knob() {
        let mut knob = Path::new();
        knob.add_oval(Rect::from_xywh(10.0, 10.0, 20.0, 20.0), None);
        let mask = Layer::new(
            "mask",
            Rect::from_wh(60.0, 40.0),
            LayerContent::Shape(ShapeLayer::inverted(knob)),
        );
        let root = gradient("root", Rect::from_wh(60.0, 40.0)).with_mask(mask);

        let info = ImageInfo::new(
            (60, 40),
            ColorType::RGBA8888,
            AlphaType::Premul,
            Some(ColorSpace::new_srgb()),
        );
        let mut surface = skia_safe::surfaces::raster(&info, None, None).expect("surface");
        {
            let mut ctx = SkiaCompositor::new(surface.canvas());
            render_layer(&root, &mut ctx).expect("render");
        }
        let image = surface.image_snapshot();
        let pixels = image.peek_pixels().expect("pixels");
        assert_eq!(pixels.get_color((20, 20)).a(), 0);
        assert_eq!(pixels.get_color((50, 20)).a(), 255);
    }
}
