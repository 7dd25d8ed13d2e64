use crate::compositing::{Compositor, Fill, StateGuard};
use crate::element::Element;
use crate::errors::SwitchError;
use crate::text::TextStyle;
use crate::types::{Color, EdgeInsets};
use skia_safe::{BlendMode, Point, Rect};

/// A single line of text, left-aligned and vertically centered in its frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub style: TextStyle,
    pub frame: Rect,
    pub color: Color,
}

impl Default for Label {
    fn default() -> Self {
        Self {
            text: String::new(),
            style: TextStyle::default(),
            frame: Rect::default(),
            color: Color::BLACK,
        }
    }
}

impl Label {
    pub fn new(text: impl Into<String>, style: TextStyle, frame: Rect) -> Self {
        Self {
            text: text.into(),
            style,
            frame,
            ..Default::default()
        }
    }

    /// Draws the text inside `rect`.
    pub fn draw_text(&self, ctx: &mut dyn Compositor, rect: Rect) -> Result<(), SwitchError> {
        if self.text.is_empty() {
            return Ok(());
        }
        let baseline = rect.top + self.style.centered_baseline(rect.height());
        ctx.draw_text(
            &self.text,
            Point::new(rect.left, baseline),
            &self.style,
            &Fill::Solid(self.color),
        );
        Ok(())
    }
}

/// A label whose glyphs are holes in an opaque white rect.
///
/// Drawing fills the rect white, switches to `BlendMode::Clear` and then draws the text,
/// so each glyph removes coverage instead of adding ink. Used as a mask, it reveals
/// everything except the text.
#[derive(Clone, Debug, PartialEq)]
pub struct InvertedLabel {
    pub label: Label,
    pub insets: EdgeInsets,
}

impl InvertedLabel {
    pub fn new(insets: EdgeInsets) -> Self {
        Self {
            label: Label::default(),
            insets,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>, style: TextStyle) -> Self {
        self.label.text = text.into();
        self.label.style = style;
        self
    }

    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.label.frame = frame;
        self
    }

    /// Draws the text into `rect` shrunk by the insets.
    pub fn draw_text(&self, ctx: &mut dyn Compositor, rect: Rect) -> Result<(), SwitchError> {
        self.label.draw_text(ctx, self.insets.inset_rect(rect))
    }

    /// Fills `rect` white and knocks the text out of it.
    pub fn draw(&self, ctx: &mut dyn Compositor, rect: Rect) -> Result<(), SwitchError> {
        self.draw_with(ctx, rect, |ctx, rect| self.draw_text(ctx, rect))
    }

    /// `draw` with a caller-supplied text step.
    ///
    /// The state saved before the fill is restored exactly once however `text_step`
    /// exits, including by error or panic.
    pub fn draw_with<F>(
        &self,
        ctx: &mut dyn Compositor,
        rect: Rect,
        text_step: F,
    ) -> Result<(), SwitchError>
    where
        F: FnOnce(&mut dyn Compositor, Rect) -> Result<(), SwitchError>,
    {
        let mut scope = StateGuard::save(ctx);
        scope.fill_rect(rect, &Fill::Solid(Color::WHITE));
        scope.set_blend_mode(BlendMode::Clear);
        text_step(&mut *scope, rect)
    }
}

impl Element for InvertedLabel {
    fn frame(&self) -> Rect {
        self.label.frame
    }

    fn render(&self, ctx: &mut dyn Compositor) -> Result<(), SwitchError> {
        let mut scope = StateGuard::save(ctx);
        scope.translate(self.label.frame.left, self.label.frame.top);
        let bounds = Rect::from_wh(self.label.frame.width(), self.label.frame.height());
        self.draw(&mut *scope, bounds)
    }
}
