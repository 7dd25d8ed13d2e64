//! # Geometry Module
//!
//! Frame-derived shapes of the toggle switch.
//!
//! All values are computed once from the input bounds and a stroke width. Nothing here
//! is recomputed on resize, and identical inputs always produce bit-identical output.
//!
//! Coordinates are local to the expanded frame: `(0, 0)` is the frame's top-left corner.

use crate::errors::SwitchError;
use skia_safe::{Path, Point, RRect, Rect, Size};

/// Horizontal resting places of the knob.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KnobPosition {
    /// Centered on the first quarter of the frame width.
    On,
    /// Right edge half a knob away from the frame's right edge.
    Off,
    /// Centered in the frame.
    Loading,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwitchGeometry {
    bounds: Rect,
    stroke_width: f32,
    frame: Rect,
    knob_size: Size,
}

impl SwitchGeometry {
    /// Derives the switch geometry from the caller's bounds.
    ///
    /// Bounds whose width or height do not exceed twice the stroke width are rejected.
    pub fn new(bounds: Rect, stroke_width: f32) -> Result<Self, SwitchError> {
        let (width, height) = (bounds.width(), bounds.height());
        let min = 2.0 * stroke_width;
        if !bounds.left.is_finite()
            || !bounds.top.is_finite()
            || !width.is_finite()
            || !height.is_finite()
            || width <= min
            || height <= min
        {
            return Err(SwitchError::DegenerateBounds { width, height });
        }

        let frame = Rect::from_xywh(
            bounds.left,
            bounds.top,
            width + 2.0 * stroke_width,
            height + 2.0 * stroke_width,
        );
        let knob = frame.height() / 2.0;

        Ok(Self {
            bounds,
            stroke_width,
            frame,
            knob_size: Size::new(knob, knob),
        })
    }

    /// The bounds passed in by the caller.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// The bounds grown by twice the stroke width on each axis, same origin.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// The frame moved to the origin.
    pub fn local_bounds(&self) -> Rect {
        Rect::from_wh(self.frame.width(), self.frame.height())
    }

    pub fn knob_size(&self) -> Size {
        self.knob_size
    }

    pub fn knob_diameter(&self) -> f32 {
        self.knob_size.width
    }

    /// Track corner radius: half the frame height, giving a pill.
    pub fn corner_radius(&self) -> f32 {
        self.frame.height() / 2.0
    }

    pub fn track_rrect(&self) -> RRect {
        let radius = self.corner_radius();
        RRect::new_rect_xy(self.local_bounds(), radius, radius)
    }

    /// Outline of the whole switch; used as the root clip mask.
    pub fn track_path(&self) -> Path {
        let mut path = Path::new();
        path.add_rrect(self.track_rrect(), None);
        path
    }

    /// Centerline of the border ring, inset half a stroke from the frame edge.
    pub fn border_rrect(&self) -> RRect {
        let s = self.stroke_width;
        let rect = Rect::from_xywh(
            s / 2.0,
            s / 2.0,
            self.bounds.width() + s,
            self.bounds.height() + s,
        );
        let radius = (self.bounds.height() + s) / 2.0;
        RRect::new_rect_xy(rect, radius, radius)
    }

    pub fn border_path(&self) -> Path {
        let mut path = Path::new();
        path.add_rrect(self.border_rrect(), None);
        path
    }

    /// Bounding square of the knob at `position`.
    pub fn knob_rect(&self, position: KnobPosition) -> Rect {
        let width = self.frame.width();
        let height = self.frame.height();
        let d = self.knob_diameter();
        let left = match position {
            KnobPosition::On => width / 4.0 - d / 2.0,
            KnobPosition::Off => width - d - d / 2.0,
            KnobPosition::Loading => (width - d) / 2.0,
        };
        Rect::from_xywh(left, height / 4.0, d, d)
    }

    pub fn knob_center(&self, position: KnobPosition) -> Point {
        self.knob_rect(position).center()
    }

    /// The knob ellipse at `position`.
    pub fn knob_path(&self, position: KnobPosition) -> Path {
        let mut path = Path::new();
        path.add_oval(self.knob_rect(position), None);
        path
    }

    /// Square of side `H / 2` inset `H / 4` from the frame's top-left corner; holds the power glyph.
    pub fn icon_frame(&self) -> Rect {
        let h = self.frame.height();
        Rect::from_xywh(h / 4.0, h / 4.0, h / 2.0, h / 2.0)
    }
}
