//! # Types Module
//!
//! Shared data types used across the crate.
//!
//! ## Key Types
//! - `Color`: Float-based RGBA color with Skia conversion.
//! - `GradientConfig`: Linear gradient in relative coordinates.
//! - `EdgeInsets`: Per-edge padding applied to a drawing rect.
//! - `SwitchState`: The four states a toggle switch can be in.

use serde::{Deserialize, Serialize};
use skia_safe::{Color4f, Rect};

/// Represents a RGBA color in float format (0.0 - 1.0).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Converts to Skia's `Color` struct (u8 based).
    pub fn to_skia(&self) -> skia_safe::Color {
        skia_safe::Color::from_argb(
            (self.a * 255.0) as u8,
            (self.r * 255.0) as u8,
            (self.g * 255.0) as u8,
            (self.b * 255.0) as u8,
        )
    }

    /// Converts to Skia's `Color4f` struct (float based).
    pub fn to_color4f(&self) -> Color4f {
        Color4f::new(self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Configuration for a linear gradient fill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientConfig {
    /// List of colors in the gradient.
    pub colors: Vec<Color>,
    /// Optional positions for the color stops (0.0 to 1.0).
    pub positions: Option<Vec<f32>>,
    /// Start point of the gradient (Relative coordinates 0.0 to 1.0).
    pub start: (f32, f32),
    /// End point of the gradient (Relative coordinates 0.0 to 1.0).
    pub end: (f32, f32),
}

impl GradientConfig {
    /// Maps the relative start/end points onto `bounds`.
    pub fn endpoints(&self, bounds: Rect) -> (skia_safe::Point, skia_safe::Point) {
        let at = |(x, y): (f32, f32)| {
            skia_safe::Point::new(
                bounds.left + bounds.width() * x,
                bounds.top + bounds.height() * y,
            )
        };
        (at(self.start), at(self.end))
    }
}

impl Default for GradientConfig {
    fn default() -> Self {
        // Top-to-bottom, blue into green
        Self {
            colors: vec![Color::BLUE, Color::GREEN],
            positions: None,
            start: (0.5, 0.0),
            end: (0.5, 1.0),
        }
    }
}

/// Padding applied to each edge of a rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Shrinks `rect` by the insets. Edges never cross: an over-inset axis collapses to zero size.
    pub fn inset_rect(&self, rect: Rect) -> Rect {
        let left = rect.left + self.left;
        let top = rect.top + self.top;
        let right = (rect.right - self.right).max(left);
        let bottom = (rect.bottom - self.bottom).max(top);
        Rect::new(left, top, right, bottom)
    }
}

/// The visual state of a toggle switch.
///
/// `Custom` doubles as the in-flight state while the knob travels between `On` and `Off`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum SwitchState {
    #[default]
    None = 0,
    On = 1,
    Custom = 2,
    Off = 3,
}

impl From<SwitchState> for i32 {
    fn from(state: SwitchState) -> i32 {
        state as i32
    }
}

impl TryFrom<i32> for SwitchState {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, i32> {
        match value {
            0 => Ok(SwitchState::None),
            1 => Ok(SwitchState::On),
            2 => Ok(SwitchState::Custom),
            3 => Ok(SwitchState::Off),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inset_rect() {
        let insets = EdgeInsets::new(0.0, 25.0, 0.0, 0.0);
        let r = insets.inset_rect(Rect::from_xywh(0.0, 0.0, 100.0, 40.0));
        assert_eq!(r, Rect::new(25.0, 0.0, 100.0, 40.0));
    }

    #[test]
    fn test_inset_rect_collapses() {
        let insets = EdgeInsets::new(30.0, 80.0, 30.0, 80.0);
        let r = insets.inset_rect(Rect::from_xywh(0.0, 0.0, 100.0, 40.0));
        assert_eq!(r.width(), 0.0);
        assert_eq!(r.height(), 0.0);
    }

    #[test]
    fn test_switch_state_discriminants() {
        assert_eq!(i32::from(SwitchState::None), 0);
        assert_eq!(i32::from(SwitchState::Off), 3);
        assert_eq!(SwitchState::try_from(2), Ok(SwitchState::Custom));
        assert_eq!(SwitchState::try_from(7), Err(7));
    }

    #[test]
    fn test_gradient_endpoints() {
        let g = GradientConfig::default();
        let (s, e) = g.endpoints(Rect::from_xywh(10.0, 0.0, 100.0, 50.0));
        assert_eq!((s.x, s.y), (60.0, 0.0));
        assert_eq!((e.x, e.y), (60.0, 50.0));
    }
}
