use serde::{Deserialize, Serialize};
use skia_safe::{Font, FontMgr, FontStyle, Size};
use std::cell::RefCell;

/// Font selection for labels and text layers.
///
/// The Skia font is resolved on first use and reused until `font_size` or `font_family`
/// changes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_size: f32,
    /// `None` resolves to the platform's default sans-serif face.
    pub font_family: Option<String>,
    #[serde(skip)]
    resolved: RefCell<Option<ResolvedFont>>,
}

#[derive(Clone, Debug)]
struct ResolvedFont {
    font_size: f32,
    font_family: Option<String>,
    font: Font,
}

impl PartialEq for TextStyle {
    fn eq(&self, other: &Self) -> bool {
        self.font_size == other.font_size && self.font_family == other.font_family
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(20.0)
    }
}

impl TextStyle {
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            font_family: None,
            resolved: RefCell::new(None),
        }
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// The Skia font for this style.
    pub fn font(&self) -> Font {
        if let Some(cached) = self.resolved.borrow().as_ref() {
            if cached.font_size == self.font_size && cached.font_family == self.font_family {
                return cached.font.clone();
            }
        }

        let font = self.resolve();
        *self.resolved.borrow_mut() = Some(ResolvedFont {
            font_size: self.font_size,
            font_family: self.font_family.clone(),
            font: font.clone(),
        });
        font
    }

    /// Looks the typeface up through the platform font manager.
    ///
    /// Falls back to the default face, then to Skia's empty typeface when the host has no fonts.
    fn resolve(&self) -> Font {
        let font_mgr = FontMgr::new();
        let typeface = self
            .font_family
            .as_deref()
            .and_then(|family| font_mgr.match_family_style(family, FontStyle::normal()))
            .or_else(|| font_mgr.match_family_style("Arial", FontStyle::normal()))
            .or_else(|| font_mgr.match_family_style("", FontStyle::normal()));

        match typeface {
            Some(typeface) => Font::new(typeface, Some(self.font_size)),
            None => {
                let mut font = Font::default();
                font.set_size(self.font_size);
                font
            }
        }
    }

    /// Ascent (negative, above the baseline) and descent (positive) for this style.
    pub fn vertical_metrics(&self) -> (f32, f32) {
        let (_, metrics) = self.font().metrics();
        (metrics.ascent, metrics.descent)
    }

    /// Single-line bounding size: advance width by ascent-to-descent height.
    pub fn measure(&self, text: &str) -> Size {
        let font = self.font();
        let (advance, _) = font.measure_str(text, None);
        let (_, metrics) = font.metrics();
        Size::new(advance, metrics.descent - metrics.ascent)
    }

    /// Baseline offset that vertically centers one line of text inside `height`.
    pub fn centered_baseline(&self, height: f32) -> f32 {
        let (ascent, descent) = self.vertical_metrics();
        (height - (descent - ascent)) / 2.0 - ascent
    }
}
