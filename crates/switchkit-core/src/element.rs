use crate::compositing::Compositor;
use crate::errors::SwitchError;
use skia_safe::Rect;

/// Something that can be placed in a frame, advanced in time and drawn.
pub trait Element: std::fmt::Debug {
    /// Position and size in the parent's coordinate space.
    fn frame(&self) -> Rect;

    /// Advances the element to absolute time `time` (seconds).
    ///
    /// # Returns
    /// * `true` if the element's visual appearance changed (requiring a repaint).
    fn update(&mut self, _time: f64) -> bool {
        false
    }

    /// Draws the element at its frame.
    fn render(&self, ctx: &mut dyn Compositor) -> Result<(), SwitchError>;
}
