#![allow(dead_code)]

use skia_safe::{Image, Rect};
use switchkit_core::{MemoryAssetLoader, SwitchConfig, ToggleSwitchView};

/// Routes engine logs through the test harness.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn bundled_loader() -> MemoryAssetLoader {
    MemoryAssetLoader::default().with_bundled_icon()
}

pub fn view_with(bounds: Rect, config: SwitchConfig) -> ToggleSwitchView {
    init_logging();
    ToggleSwitchView::with_config(bounds, config, &bundled_loader()).expect("valid switch")
}

/// A 100x40 switch at the origin (106x46 frame).
pub fn standard_view() -> ToggleSwitchView {
    view_with(Rect::from_wh(100.0, 40.0), SwitchConfig::default())
}

pub fn alpha_at(image: &Image, x: i32, y: i32) -> u8 {
    let pixels = image.peek_pixels().expect("raster image");
    pixels.get_color((x, y)).a()
}

/// True when the host has a font that actually produces glyphs.
pub fn fonts_available() -> bool {
    switchkit_core::text::TextStyle::new(20.0).measure("On").width > 0.0
}
