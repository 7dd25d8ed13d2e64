//! # Toggle Switch
//!
//! A pill-shaped on/off switch built entirely from masked gradient layers.
//!
//! ## Layer tree
//! ```text
//! switch            clipped to the track pill
//! ├── border        gradient through the stroked border ring
//! ├── overlay       masked by an InvertedLabel ("On" knocked out of white)
//! │   └── knob      gradient through the inverted knob ellipse
//! ├── off-label     gradient through the "Off" text (hidden by default)
//! └── knob-icon     gradient through the power glyph (hidden by default)
//! ```
//!
//! Construction starts a one-shot animation that moves the knob hole from the on position
//! to the off position. Time only advances through [`ToggleSwitchView::update`], and the
//! completion signal is consumed there, on the caller's thread.

use crate::animation::{AnimationEvent, PathAnimation};
use crate::compositing::{invert_path, Compositor};
use crate::config::SwitchConfig;
use crate::element::Element;
use crate::errors::SwitchError;
use crate::geometry::{KnobPosition, SwitchGeometry};
use crate::layer::{Layer, LayerContent, ShapeLayer, TextLayer};
use crate::node::InvertedLabel;
use crate::systems::{load_image, render_layer};
use crate::types::{Color, SwitchState};
use crate::{AssetLoader, DefaultAssetLoader};
use crossbeam_channel::{unbounded, Receiver};
use skia_safe::{Path, Rect};
use tracing::{debug, instrument};

pub const ROOT_LAYER: &str = "switch";
pub const TRACK_MASK_LAYER: &str = "track-mask";
pub const BORDER_LAYER: &str = "border";
pub const BORDER_MASK_LAYER: &str = "border-mask";
pub const OVERLAY_LAYER: &str = "overlay";
pub const LABEL_MASK_LAYER: &str = "label-mask";
pub const KNOB_LAYER: &str = "knob";
pub const KNOB_MASK_LAYER: &str = "knob-mask";
pub const OFF_LABEL_LAYER: &str = "off-label";
pub const OFF_LABEL_MASK_LAYER: &str = "off-label-mask";
pub const KNOB_ICON_LAYER: &str = "knob-icon";
pub const KNOB_ICON_MASK_LAYER: &str = "knob-icon-mask";

/// Animation key of the knob mask transition.
pub const KNOB_ANIMATION_KEY: &str = "path";

/// Horizontal nudge of the off text away from the knob.
const OFF_LABEL_OFFSET: f32 = 8.0;

#[derive(Debug)]
pub struct ToggleSwitchView {
    config: SwitchConfig,
    geometry: SwitchGeometry,
    root: Layer,
    state: SwitchState,
    on_path: Path,
    off_path: Path,
    loading_path: Path,
    animation: Option<PathAnimation>,
    events: Receiver<AnimationEvent>,
    completed: usize,
}

impl ToggleSwitchView {
    /// Builds a switch with the default configuration, loading assets from disk.
    pub fn new(bounds: Rect) -> Result<Self, SwitchError> {
        Self::with_config(bounds, SwitchConfig::default(), &DefaultAssetLoader)
    }

    /// Builds the layer tree and starts the on-to-off knob animation at time `0.0`.
    #[instrument(level = "debug", skip(config, loader))]
    pub fn with_config(
        bounds: Rect,
        config: SwitchConfig,
        loader: &dyn AssetLoader,
    ) -> Result<Self, SwitchError> {
        config.validate()?;
        let geometry = SwitchGeometry::new(bounds, config.stroke_width)?;

        let on_path = geometry.knob_path(KnobPosition::On);
        let off_path = geometry.knob_path(KnobPosition::Off);
        let loading_path = geometry.knob_path(KnobPosition::Loading);

        let mut root = Layer::new(
            ROOT_LAYER,
            geometry.frame(),
            LayerContent::Empty,
        )
        .with_mask(Layer::new(
            TRACK_MASK_LAYER,
            geometry.local_bounds(),
            LayerContent::Shape(ShapeLayer::filled(geometry.track_path())),
        ))
        .masking_to_bounds(geometry.corner_radius())
        .with_sublayer(border_layer(&geometry, &config))
        .with_sublayer(overlay_layer(&geometry, &config, on_path.clone()))
        .with_sublayer(off_label_layer(&geometry, &config));

        if let Some(asset) = &config.icon_asset {
            root = root.with_sublayer(knob_icon_layer(&geometry, &config, loader, asset)?);
        }

        let (tx, events) = unbounded();
        let animation = PathAnimation::new(
            KNOB_ANIMATION_KEY,
            on_path.clone(),
            off_path.clone(),
            0.0,
            config.animation_duration,
            config.easing,
            tx,
        );

        debug!(
            frame = ?geometry.frame(),
            knob = geometry.knob_diameter(),
            layers = root.layer_count(),
            "toggle switch constructed"
        );

        Ok(Self {
            config,
            geometry,
            root,
            state: SwitchState::On,
            on_path,
            off_path,
            loading_path,
            animation: Some(animation),
            events,
            completed: 0,
        })
    }

    /// The expanded frame: input bounds grown by twice the stroke width.
    pub fn frame(&self) -> Rect {
        self.geometry.frame()
    }

    pub fn geometry(&self) -> &SwitchGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &SwitchConfig {
        &self.config
    }

    pub fn state(&self) -> SwitchState {
        self.state
    }

    pub fn root_layer(&self) -> &Layer {
        &self.root
    }

    /// True until the knob animation has delivered its completion.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Number of completed knob transitions. Never exceeds one.
    pub fn completed_transitions(&self) -> usize {
        self.completed
    }

    /// The current knob mask: opaque across the frame except inside the knob ellipse.
    pub fn knob_mask_path(&self) -> Path {
        invert_path(&self.knob_path(), self.geometry.local_bounds())
    }

    /// Snaps the knob to the position for `state`.
    ///
    /// `Custom` shows the centered loading knob and `None` removes the knob hole.
    /// Rejected while the knob animation is running.
    pub fn set_state(&mut self, state: SwitchState) -> Result<(), SwitchError> {
        if self.is_animating() {
            return Err(SwitchError::InvalidTransition {
                from: self.state,
                to: state,
            });
        }

        let path = match state {
            SwitchState::On => self.on_path.clone(),
            SwitchState::Off => self.off_path.clone(),
            SwitchState::Custom => self.loading_path.clone(),
            SwitchState::None => Path::new(),
        };
        self.set_knob_path(path);
        debug!(from = ?self.state, to = ?state, "switch state changed");
        self.state = state;
        Ok(())
    }

    /// Advances the knob animation to absolute time `time` (seconds).
    ///
    /// Returns `true` when the knob mask changed.
    pub fn update(&mut self, time: f64) -> bool {
        let (path, mut changed) = match self.animation.as_mut() {
            Some(animation) => {
                let before = animation.progress();
                let path = animation.advance(time).clone();
                (path, animation.progress() != before)
            }
            None => return false,
        };

        if changed {
            self.set_knob_path(path);
            if self.state == SwitchState::On {
                debug!(time, "knob animation in flight");
                self.state = SwitchState::Custom;
            }
        }

        while let Ok(event) = self.events.try_recv() {
            match event {
                AnimationEvent::Finished { key } if key == KNOB_ANIMATION_KEY => {
                    self.finish_transition(time);
                    changed = true;
                }
                AnimationEvent::Finished { key } => {
                    debug!(key, "ignoring completion for unknown animation");
                }
            }
        }
        changed
    }

    /// Paints the whole switch at its frame.
    pub fn render(&self, ctx: &mut dyn Compositor) -> Result<(), SwitchError> {
        render_layer(&self.root, ctx)
    }

    fn finish_transition(&mut self, time: f64) {
        self.set_knob_path(self.off_path.clone());
        self.animation = None;
        self.completed += 1;
        self.state = SwitchState::Off;
        debug!(time, "knob animation completed, mask swapped to off");
    }

    fn knob_path(&self) -> Path {
        match self.root.find(KNOB_MASK_LAYER).map(|l| &l.content) {
            Some(LayerContent::Shape(shape)) => shape.path.clone(),
            _ => Path::new(),
        }
    }

    fn set_knob_path(&mut self, path: Path) {
        if let Some(layer) = self.root.find_mut(KNOB_MASK_LAYER) {
            if let LayerContent::Shape(shape) = &mut layer.content {
                shape.path = path;
            }
        }
    }
}

impl Element for ToggleSwitchView {
    fn frame(&self) -> Rect {
        ToggleSwitchView::frame(self)
    }

    fn update(&mut self, time: f64) -> bool {
        ToggleSwitchView::update(self, time)
    }

    fn render(&self, ctx: &mut dyn Compositor) -> Result<(), SwitchError> {
        ToggleSwitchView::render(self, ctx)
    }
}

fn gradient(name: &str, frame: Rect, config: &SwitchConfig) -> Layer {
    Layer::new(name, frame, LayerContent::Gradient(config.gradient.clone()))
}

fn border_layer(geometry: &SwitchGeometry, config: &SwitchConfig) -> Layer {
    let bounds = geometry.local_bounds();
    let ring = ShapeLayer::stroked(geometry.border_path(), Color::RED, geometry.stroke_width());
    gradient(BORDER_LAYER, bounds, config)
        .with_mask(Layer::new(BORDER_MASK_LAYER, bounds, LayerContent::Shape(ring)))
        .masking_to_bounds(geometry.corner_radius())
}

fn overlay_layer(geometry: &SwitchGeometry, config: &SwitchConfig, knob: Path) -> Layer {
    let bounds = geometry.local_bounds();
    let label = InvertedLabel::new(config.label_insets)
        .with_text(config.on_text.clone(), config.font.clone())
        .with_frame(bounds);

    let knob_layer = gradient(KNOB_LAYER, bounds, config).with_mask(Layer::new(
        KNOB_MASK_LAYER,
        bounds,
        LayerContent::Shape(ShapeLayer::inverted(knob)),
    ));

    Layer::new(OVERLAY_LAYER, bounds, LayerContent::Empty)
        .with_mask(Layer::new(LABEL_MASK_LAYER, bounds, LayerContent::Label(label)))
        .with_sublayer(knob_layer)
}

fn off_label_layer(geometry: &SwitchGeometry, config: &SwitchConfig) -> Layer {
    let bounds = geometry.local_bounds();
    let size = config.font.measure(&config.off_text);
    let x = bounds.right - (size.width + bounds.width() / 2.0) / 2.0 - OFF_LABEL_OFFSET;
    let y = (bounds.height() - size.height) / 2.0;

    let text = TextLayer {
        text: config.off_text.clone(),
        style: config.font.clone(),
        color: Color::BLACK,
    };
    gradient(OFF_LABEL_LAYER, bounds, config)
        .with_mask(Layer::new(
            OFF_LABEL_MASK_LAYER,
            Rect::from_xywh(x, y, size.width, size.height),
            LayerContent::Text(text),
        ))
        .hidden(!config.show_off_label)
}

fn knob_icon_layer(
    geometry: &SwitchGeometry,
    config: &SwitchConfig,
    loader: &dyn AssetLoader,
    asset: &str,
) -> Result<Layer, SwitchError> {
    let image = load_image(loader, asset)?;
    let frame = geometry.icon_frame();
    let local = Rect::from_wh(frame.width(), frame.height());

    Ok(gradient(KNOB_ICON_LAYER, frame, config)
        .with_mask(Layer::new(KNOB_ICON_MASK_LAYER, local, LayerContent::Image(image)))
        .masking_to_bounds(frame.height() / 2.0)
        .hidden(!config.show_knob_icon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositing::RecordingCompositor;
    use crate::MemoryAssetLoader;

    fn view() -> ToggleSwitchView {
        ToggleSwitchView::with_config(
            Rect::from_xywh(0.0, 0.0, 100.0, 40.0),
            SwitchConfig::default(),
            &MemoryAssetLoader::default().with_bundled_icon(),
        )
        .expect("valid view")
    }

    #[test]
    fn test_tree_shape() {
        let view = view();
        let root = view.root_layer();
        let names: Vec<&str> = root.sublayers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, [BORDER_LAYER, OVERLAY_LAYER, OFF_LABEL_LAYER, KNOB_ICON_LAYER]);
        assert!(root.find(OFF_LABEL_LAYER).map(|l| l.hidden).unwrap_or(false));
        assert!(root.find(KNOB_ICON_LAYER).map(|l| l.hidden).unwrap_or(false));
        assert_eq!(root.find(KNOB_LAYER).map(|l| l.frame), Some(view.geometry().local_bounds()));
    }

    #[test]
    fn test_starts_on_with_on_knob() {
        let view = view();
        assert_eq!(view.state(), SwitchState::On);
        assert!(view.is_animating());
        let on = view.geometry().knob_center(KnobPosition::On);
        assert!(!view.knob_mask_path().contains((on.x, on.y)));
    }

    #[test]
    fn test_no_icon_asset_skips_layer() {
        let config = SwitchConfig {
            icon_asset: None,
            ..Default::default()
        };
        let view = ToggleSwitchView::with_config(
            Rect::from_wh(100.0, 40.0),
            config,
            &MemoryAssetLoader::default(),
        )
        .expect("no asset needed");
        assert!(view.root_layer().find(KNOB_ICON_LAYER).is_none());
    }

    #[test]
    fn test_render_is_balanced() {
        let view = view();
        let mut recorder = RecordingCompositor::new();
        view.render(&mut recorder).expect("render");
        assert!(recorder.is_balanced());
    }

    #[test]
    fn test_update_after_completion_is_idle() {
        let mut view = view();
        assert!(view.update(10.0));
        assert!(!view.update(11.0));
        assert_eq!(view.completed_transitions(), 1);
    }
}
