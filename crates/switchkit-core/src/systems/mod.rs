pub mod assets;
pub mod renderer;

pub use assets::load_image;
pub use renderer::{rasterize, render_layer, render_to_png, MAX_LAYER_DEPTH};
