//! # Config Module
//!
//! Serializable settings for a [`ToggleSwitchView`](crate::node::ToggleSwitchView).
//! Every field has a default, so partial JSON documents are accepted.

use crate::animation::EasingType;
use crate::errors::SwitchError;
use crate::text::TextStyle;
use crate::types::{EdgeInsets, GradientConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Width of the border ring drawn around the track.
pub const DEFAULT_STROKE_WIDTH: f32 = 3.0;
/// Seconds the knob takes to travel from the on position to the off position.
pub const DEFAULT_ANIMATION_DURATION: f64 = 5.0;
/// Asset name of the power glyph shown on the knob.
pub const DEFAULT_ICON_ASSET: &str = "power_filled.png";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchConfig {
    pub stroke_width: f32,
    pub animation_duration: f64,
    pub easing: EasingType,
    pub gradient: GradientConfig,
    pub on_text: String,
    pub off_text: String,
    pub font: TextStyle,
    /// Offsets the "on" text inside the knockout label.
    pub label_insets: EdgeInsets,
    /// `None` skips the knob icon entirely.
    pub icon_asset: Option<String>,
    pub show_off_label: bool,
    pub show_knob_icon: bool,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            easing: EasingType::Linear,
            gradient: GradientConfig::default(),
            on_text: "On".to_string(),
            off_text: "Off".to_string(),
            font: TextStyle::default(),
            label_insets: EdgeInsets::new(0.0, 25.0, 0.0, 0.0),
            icon_asset: Some(DEFAULT_ICON_ASSET.to_string()),
            show_off_label: false,
            show_knob_icon: false,
        }
    }
}

impl SwitchConfig {
    /// Parses a JSON document and validates it.
    pub fn from_json(json: &str) -> Result<Self, SwitchError> {
        let config: SwitchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SwitchError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, SwitchError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SwitchError> {
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(SwitchError::InvalidConfig(format!(
                "stroke_width must be positive, got {}",
                self.stroke_width
            )));
        }
        if !self.animation_duration.is_finite() || self.animation_duration < 0.0 {
            return Err(SwitchError::InvalidConfig(format!(
                "animation_duration must be a non-negative number of seconds, got {}",
                self.animation_duration
            )));
        }
        if self.gradient.colors.is_empty() {
            return Err(SwitchError::InvalidConfig(
                "gradient needs at least one color".to_string(),
            ));
        }
        if let Some(positions) = &self.gradient.positions {
            if positions.len() != self.gradient.colors.len() {
                return Err(SwitchError::InvalidConfig(format!(
                    "gradient has {} colors but {} positions",
                    self.gradient.colors.len(),
                    positions.len()
                )));
            }
        }
        if !self.font.font_size.is_finite() || self.font.font_size <= 0.0 {
            return Err(SwitchError::InvalidConfig(format!(
                "font_size must be positive, got {}",
                self.font.font_size
            )));
        }
        Ok(())
    }
}
