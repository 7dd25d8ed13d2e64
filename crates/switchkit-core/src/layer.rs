//! # Layer Module
//!
//! A minimal retained layer tree.
//!
//! Every `Layer` owns its content, its optional mask and its sublayers outright. There are
//! no parent pointers; the tree is dropped with its root.
//!
//! A mask is itself a `Layer`, laid out in its owner's coordinate space. Only the mask's
//! alpha matters: content (and sublayers) survive where the mask draws something opaque.

use crate::node::InvertedLabel;
use crate::text::TextStyle;
use crate::types::{Color, GradientConfig};
use skia_safe::{Image, Path, PathFillType, Rect};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl From<FillRule> for PathFillType {
    fn from(rule: FillRule) -> Self {
        match rule {
            FillRule::NonZero => PathFillType::Winding,
            FillRule::EvenOdd => PathFillType::EvenOdd,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// A vector shape.
#[derive(Clone, Debug)]
pub struct ShapeLayer {
    pub path: Path,
    pub fill_rule: FillRule,
    /// `None` leaves the interior unpainted.
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
    /// Paint the knockout of `path` against the layer bounds instead of `path` itself.
    pub inverted: bool,
}

impl ShapeLayer {
    /// An opaque black fill of `path`.
    pub fn filled(path: Path) -> Self {
        Self {
            path,
            fill_rule: FillRule::NonZero,
            fill: Some(Color::BLACK),
            stroke: None,
            inverted: false,
        }
    }

    /// An outline of `path` with a clear interior.
    pub fn stroked(path: Path, color: Color, width: f32) -> Self {
        Self {
            path,
            fill_rule: FillRule::NonZero,
            fill: None,
            stroke: Some(Stroke { color, width }),
            inverted: false,
        }
    }

    /// Opaque everywhere in the layer except inside `path`.
    pub fn inverted(path: Path) -> Self {
        Self {
            path,
            fill_rule: FillRule::EvenOdd,
            fill: Some(Color::BLACK),
            stroke: None,
            inverted: true,
        }
    }

    /// `path` with `fill_rule` applied.
    pub fn resolved_path(&self) -> Path {
        let mut path = self.path.clone();
        path.set_fill_type(self.fill_rule.into());
        path
    }
}

/// One line of text drawn from the layer's top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayer {
    pub text: String,
    pub style: TextStyle,
    pub color: Color,
}

#[derive(Clone, Debug, Default)]
pub enum LayerContent {
    #[default]
    Empty,
    Gradient(GradientConfig),
    Shape(ShapeLayer),
    Text(TextLayer),
    Image(Image),
    Label(InvertedLabel),
}

#[derive(Clone, Debug, Default)]
pub struct Layer {
    pub name: String,
    /// Position and size in the parent's coordinate space.
    pub frame: Rect,
    pub content: LayerContent,
    pub mask: Option<Box<Layer>>,
    pub sublayers: Vec<Layer>,
    /// Clip content and sublayers to the (rounded) bounds.
    pub masks_to_bounds: bool,
    pub corner_radius: f32,
    pub hidden: bool,
}

impl Layer {
    pub fn new(name: impl Into<String>, frame: Rect, content: LayerContent) -> Self {
        Self {
            name: name.into(),
            frame,
            content,
            ..Default::default()
        }
    }

    pub fn with_mask(mut self, mask: Layer) -> Self {
        self.mask = Some(Box::new(mask));
        self
    }

    pub fn with_sublayer(mut self, sublayer: Layer) -> Self {
        self.sublayers.push(sublayer);
        self
    }

    pub fn masking_to_bounds(mut self, corner_radius: f32) -> Self {
        self.masks_to_bounds = true;
        self.corner_radius = corner_radius;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// The frame moved to the origin.
    pub fn bounds(&self) -> Rect {
        Rect::from_wh(self.frame.width(), self.frame.height())
    }

    /// Depth-first search through masks and sublayers.
    pub fn find(&self, name: &str) -> Option<&Layer> {
        if self.name == name {
            return Some(self);
        }
        if let Some(found) = self.mask.as_deref().and_then(|m| m.find(name)) {
            return Some(found);
        }
        self.sublayers.iter().find_map(|l| l.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Layer> {
        if self.name == name {
            return Some(self);
        }
        if let Some(found) = self.mask.as_deref_mut().and_then(|m| m.find_mut(name)) {
            return Some(found);
        }
        self.sublayers.iter_mut().find_map(|l| l.find_mut(name))
    }

    /// Number of layers in this subtree, masks included.
    pub fn layer_count(&self) -> usize {
        1 + self.mask.as_ref().map_or(0, |m| m.layer_count())
            + self.sublayers.iter().map(Layer::layer_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Layer {
        let mask = Layer::new("mask", Rect::from_wh(10.0, 10.0), LayerContent::Empty);
        let child = Layer::new("child", Rect::from_wh(10.0, 10.0), LayerContent::Empty)
            .with_mask(Layer::new("child-mask", Rect::from_wh(5.0, 5.0), LayerContent::Empty));
        Layer::new("root", Rect::from_xywh(4.0, 4.0, 10.0, 10.0), LayerContent::Empty)
            .with_mask(mask)
            .with_sublayer(child)
    }

    #[test]
    fn test_find_through_masks() {
        let mut root = tree();
        assert!(root.find("child-mask").is_some());
        assert!(root.find("missing").is_none());

        root.find_mut("child").expect("child").hidden = true;
        assert!(root.find("child").map(|l| l.hidden).unwrap_or(false));
    }

    #[test]
    fn test_layer_count_and_bounds() {
        let root = tree();
        assert_eq!(root.layer_count(), 4);
        assert_eq!(root.bounds(), Rect::from_wh(10.0, 10.0));
    }

    #[test]
    fn test_inverted_shape_uses_even_odd() {
        let mut path = Path::new();
        path.add_oval(Rect::from_wh(4.0, 4.0), None);
        let shape = ShapeLayer::inverted(path);
        assert_eq!(shape.resolved_path().fill_type(), PathFillType::EvenOdd);
        assert!(shape.inverted);
    }
}
