mod common;

use common::alpha_at;
use skia_safe::Rect;
use switchkit_core::compositing::{DrawOp, RecordingCompositor};
use switchkit_core::systems::{rasterize, render_to_png};
use switchkit_core::SwitchConfig;

#[test]
fn test_gradient_shows_in_track_but_not_in_knob() {
    let view = common::standard_view();
    let image = rasterize(&view).expect("rasterize");
    assert_eq!((image.width(), image.height()), (106, 46));

    // Knob hole at the on position.
    assert_eq!(alpha_at(&image, 26, 23), 0);
    // Open track right of the label text.
    assert_eq!(alpha_at(&image, 83, 23), 255);
    // Outside the pill's rounded corners.
    assert_eq!(alpha_at(&image, 1, 1), 0);
    assert_eq!(alpha_at(&image, 104, 44), 0);

    let pixels = image.peek_pixels().expect("raster image");
    let color = pixels.get_color((83, 23));
    assert!(color.b() > 0 && color.g() > 0, "expected blended gradient, got {:?}", color);
}

#[test]
fn test_knob_hole_moves_to_off_position() {
    let mut view = common::standard_view();
    view.update(5.0);
    let image = rasterize(&view).expect("rasterize");

    assert_eq!(alpha_at(&image, 83, 23), 0);
    assert_eq!(alpha_at(&image, 10, 23), 255);
}

#[test]
fn test_gradient_runs_top_to_bottom() {
    let view = common::standard_view();
    let image = rasterize(&view).expect("rasterize");
    let pixels = image.peek_pixels().expect("raster image");

    let top = pixels.get_color((83, 8));
    let bottom = pixels.get_color((83, 38));
    assert!(top.b() > bottom.b());
    assert!(bottom.g() > top.g());
}

fn assert_whole_switch(bounds: Rect) {
    let view = common::view_with(bounds, SwitchConfig::default());
    let image = rasterize(&view).expect("rasterize");
    assert_eq!((image.width(), image.height()), (106, 46));

    // Knob hole, open track and a cut-away corner, all in frame-local pixels.
    assert_eq!(alpha_at(&image, 26, 23), 0);
    assert_eq!(alpha_at(&image, 83, 23), 255);
    assert_eq!(alpha_at(&image, 10, 23), 255);
    assert_eq!(alpha_at(&image, 1, 1), 0);
}

#[test]
fn test_offset_bounds_render_at_their_origin() {
    assert_whole_switch(Rect::from_xywh(20.0, 10.0, 100.0, 40.0));
}

#[test]
fn test_negative_origin_is_not_cropped() {
    assert_whole_switch(Rect::from_xywh(-20.0, -10.0, 100.0, 40.0));
}

#[test]
fn test_far_origin_does_not_grow_the_image() {
    assert_whole_switch(Rect::from_xywh(10_000.0, 10_000.0, 100.0, 40.0));
}

#[test]
fn test_hidden_layers_are_not_composited() {
    let view = common::standard_view();
    let mut recorder = RecordingCompositor::new();
    view.render(&mut recorder).expect("render");

    assert!(recorder.is_balanced());
    assert_eq!(recorder.count(|op| matches!(op, DrawOp::Image { .. })), 0);

    let config = SwitchConfig {
        show_knob_icon: true,
        show_off_label: true,
        ..Default::default()
    };
    let view = common::view_with(Rect::from_wh(100.0, 40.0), config);
    let mut recorder = RecordingCompositor::new();
    view.render(&mut recorder).expect("render");
    assert!(recorder.is_balanced());
    assert_eq!(recorder.count(|op| matches!(op, DrawOp::Image { .. })), 1);
    assert!(recorder.count(|op| matches!(op, DrawOp::Text { text, .. } if text == "Off")) == 1);
}

#[test]
fn test_png_export() {
    let view = common::standard_view();
    let png = render_to_png(&view).expect("encode");
    assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
}
