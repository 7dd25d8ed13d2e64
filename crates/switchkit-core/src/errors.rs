use crate::types::SwitchState;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwitchError {
    #[error("Asset not found: {0}")]
    AssetNotFound(String),
    #[error("Degenerate bounds: {width}x{height} leaves no room for the switch track")]
    DegenerateBounds { width: f32, height: f32 },
    #[error("Failed to decode image: {0}")]
    InvalidImage(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Cannot move from {from:?} to {to:?} while the knob animation is running")]
    InvalidTransition { from: SwitchState, to: SwitchState },
    #[error("Failed to create surface")]
    SurfaceFailure,
    #[error("Failed to encode frame: {0}")]
    Encode(String),
    #[error("Recursion depth limit exceeded")]
    RecursionLimit,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
